use crate::align::reconstruct_lines;
use crate::chord::chord_root;
use crate::classify::{is_chord_line, is_section_marker};
use crate::data::{STATUS_PENDING, SongRecord, SourceInfo};
use crate::settings::Settings;

const SCAN_WINDOW: usize = 10;
const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 50;
const KEY_LABELS: [&str; 2] = ["tono:", "tonalidad:"];
const QUOTE_PAIRS: [(char, char); 4] = [('"', '"'), ('\'', '\''), ('«', '»'), ('“', '”')];

pub fn assemble_song(
    lines: &[String],
    source: &SourceInfo,
    settings: &Settings,
) -> Option<SongRecord> {
    if lines.iter().all(|line| line.trim().is_empty()) {
        return None;
    }
    let scan: Vec<&str> = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .take(SCAN_WINDOW)
        .collect();
    let title = extract_title(&scan).unwrap_or_else(|| source.title_fallback());
    let key = detect_key(&scan).unwrap_or_else(|| settings.default_key.clone());
    let lyrics = reconstruct_lines(lines).join("\n");
    Some(SongRecord {
        title,
        artist: settings.unknown_artist.clone(),
        lyrics,
        key,
        status: STATUS_PENDING.to_string(),
        category: settings.default_category.clone(),
        notes: format!(
            "Importado de {} ({})",
            source.file_name,
            source.format.label()
        ),
    })
}

fn extract_title(scan: &[&str]) -> Option<String> {
    let mut first = None;
    for line in scan {
        if !title_length_ok(line) || is_chord_line(line) || is_section_marker(line) {
            continue;
        }
        if let Some(inner) = strip_quotes(line) {
            return Some(inner.trim().to_string());
        }
        if first.is_none() {
            first = Some(line.to_string());
        }
    }
    first
}

fn title_length_ok(text: &str) -> bool {
    (TITLE_MIN..=TITLE_MAX).contains(&text.chars().count())
}

fn strip_quotes(text: &str) -> Option<&str> {
    let mut chars = text.chars();
    let open = chars.next()?;
    let close = chars.next_back()?;
    QUOTE_PAIRS
        .iter()
        .find(|pair| open == pair.0 && close == pair.1)
        .map(|_| &text[open.len_utf8()..text.len() - close.len_utf8()])
}

fn detect_key(scan: &[&str]) -> Option<String> {
    for line in scan {
        for label in KEY_LABELS {
            if let Some(rest) = find_after_label(line, label) {
                if let Some(root) = rest.split_whitespace().find_map(chord_root) {
                    return Some(root);
                }
            }
        }
    }
    scan.iter()
        .filter(|line| is_chord_line(line))
        .find_map(|line| line.split_whitespace().find_map(chord_root))
}

fn find_after_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let bytes = line.as_bytes();
    let needle = label.as_bytes();
    if bytes.len() < needle.len() {
        return None;
    }
    (0..=bytes.len() - needle.len())
        .find(|&at| bytes[at..at + needle.len()].eq_ignore_ascii_case(needle))
        .map(|at| &line[at + needle.len()..])
}
