use crate::chord;
use crate::classify;

#[derive(Debug, Clone, PartialEq)]
pub struct ChordToken {
    pub raw: String,
    pub normalized: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChordAnchor {
    pub chord: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignedLine {
    pub lyric: String,
    pub chords: Vec<ChordAnchor>,
}

impl AlignedLine {
    pub fn render_inline(&self) -> String {
        let mut out = String::with_capacity(self.lyric.len());
        let mut pending = self.chords.iter().peekable();
        for (i, ch) in self.lyric.chars().enumerate() {
            while let Some(anchor) = pending.peek() {
                if anchor.index != i {
                    break;
                }
                out.push('[');
                out.push_str(&anchor.chord);
                out.push(']');
                pending.next();
            }
            out.push(ch);
        }
        for anchor in pending {
            out.push('[');
            out.push_str(&anchor.chord);
            out.push(']');
        }
        out
    }
}

pub fn expand_tabs(line: &str) -> String {
    line.replace('\t', "    ")
}

pub fn parse_aligned_pair(chord_line: &str, lyric_line: &str) -> AlignedLine {
    let chord_line = expand_tabs(chord_line);
    let lyric_line = expand_tabs(lyric_line);
    let lyric = lyric_line.trim_end().to_string();
    let lyric_len = lyric.chars().count();
    let mut chords = Vec::new();
    for token in tokenize_columns(&chord_line) {
        if !chord::is_chord_token(&token.raw) {
            continue;
        }
        let midpoint = (token.start + token.end - 1) as f64 / 2.0;
        let mut index = midpoint.round() as usize;
        if lyric_len == 0 {
            index = 0;
        } else if index >= lyric_len {
            index = lyric_len - 1;
        }
        chords.push(ChordAnchor {
            chord: token.normalized,
            index,
        });
    }
    AlignedLine { lyric, chords }
}

pub fn reconstruct_fixed_width(text: &str) -> String {
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect();
    reconstruct_lines(&lines).join("\n")
}

pub fn reconstruct_lines(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let line = expand_tabs(&lines[i]);
        if line.trim().is_empty() {
            out.push(String::new());
            i += 1;
            continue;
        }
        if classify::is_chord_line(&line) {
            if let Some(next) = lines.get(i + 1) {
                let next = expand_tabs(next);
                if !next.trim().is_empty() && !classify::is_chord_line(&next) {
                    out.push(merge_chord_line(&line));
                    out.push(next.trim_end().to_string());
                    i += 2;
                    continue;
                }
            }
        }
        out.push(line);
        i += 1;
    }
    out
}

pub fn tokenize_columns(line: &str) -> Vec<ChordToken> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        let raw: String = chars[start..i].iter().collect();
        let normalized = chord::normalize_chord(&raw);
        tokens.push(ChordToken {
            raw,
            normalized,
            start,
            end: i,
        });
    }
    tokens
}

fn merge_chord_line(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut replaced = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() {
            replaced.push(chars[i]);
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        let raw: String = chars[start..i].iter().collect();
        if chord::is_chord_token(&raw) {
            replaced.push_str(&chord::normalize_chord(&raw));
        } else {
            replaced.push_str(&raw);
        }
    }
    collapse_space_runs(&replaced).trim_end().to_string()
}

fn collapse_space_runs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut run = 0usize;
    for ch in line.chars() {
        if ch == ' ' {
            run += 1;
            continue;
        }
        push_run(&mut out, run);
        run = 0;
        out.push(ch);
    }
    push_run(&mut out, run);
    out
}

fn push_run(out: &mut String, run: usize) {
    if run == 0 {
        return;
    }
    out.push(' ');
    if run > 1 {
        out.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_chords_at_token_midpoints() {
        let aligned = parse_aligned_pair("DO                  DO7", "Esta es la luz de Cristo,");
        assert_eq!(aligned.lyric, "Esta es la luz de Cristo,");
        assert_eq!(aligned.chords.len(), 2);
        assert_eq!(aligned.chords[0].chord, "C");
        assert_eq!(aligned.chords[0].index, 1);
        assert_eq!(aligned.chords[1].chord, "C7");
        assert_eq!(aligned.chords[1].index, 21);
    }

    #[test]
    fn anchors_stay_inside_the_lyric() {
        let aligned = parse_aligned_pair("                    SOL", "corto");
        assert_eq!(aligned.chords[0].index, 4);
        let empty = parse_aligned_pair("DO", "");
        assert_eq!(empty.lyric, "");
        assert_eq!(empty.chords[0].index, 0);
        for (chords, lyric) in [("DO  RE  MI", "letra"), ("SOL", "x"), ("LA7", "")] {
            let aligned = parse_aligned_pair(chords, lyric);
            let len = aligned.lyric.chars().count();
            for anchor in &aligned.chords {
                assert!(anchor.index < len.max(1));
            }
        }
    }

    #[test]
    fn drops_non_chord_tokens() {
        let aligned = parse_aligned_pair("DO  que  SOL", "letra de prueba");
        let kept: Vec<&str> = aligned
            .chords
            .iter()
            .map(|anchor| anchor.chord.as_str())
            .collect();
        assert_eq!(kept, ["C", "G"]);
    }

    #[test]
    fn expands_tabs_before_anchoring() {
        let aligned = parse_aligned_pair("\tDO", "12345678");
        assert_eq!(aligned.chords[0].index, 5);
    }

    #[test]
    fn parse_is_deterministic() {
        let first = parse_aligned_pair("FA              DO", "yo la haré brillar.");
        let second = parse_aligned_pair("FA              DO", "yo la haré brillar.");
        assert_eq!(first, second);
    }

    #[test]
    fn renders_inline_annotations() {
        let aligned = parse_aligned_pair("DO      SOL", "Esta es la luz");
        assert_eq!(aligned.render_inline(), "E[C]sta es l[G]a luz");
        let empty = parse_aligned_pair("DO", "");
        assert_eq!(empty.render_inline(), "[C]");
    }

    #[test]
    fn merges_chord_lines_with_following_lyrics() {
        let text = [
            "DO                  DO7",
            "Esta es la luz de Cristo,",
            "FA              DO",
            "yo la haré brillar.",
        ]
        .join("\n");
        let merged = reconstruct_fixed_width(&text);
        let lines: Vec<&str> = merged.split('\n').collect();
        assert_eq!(
            lines,
            [
                "C  C7",
                "Esta es la luz de Cristo,",
                "F  C",
                "yo la haré brillar.",
            ]
        );
    }

    #[test]
    fn passes_chord_free_text_through() {
        let text = "Esta es la luz de Cristo,\n\nyo la haré brillar.";
        assert_eq!(reconstruct_fixed_width(text), text);
    }

    #[test]
    fn expands_tabs_in_every_line() {
        assert_eq!(reconstruct_fixed_width("una\tletra"), "una    letra");
    }

    #[test]
    fn leaves_orphan_chord_lines_unchanged() {
        let text = "DO  SOL\n\nEsta es la letra final";
        assert_eq!(reconstruct_fixed_width(text), text);
    }

    #[test]
    fn keeps_consecutive_chord_lines_separate() {
        let text = "DO  SOL\nFA  DO\nEsta es la letra de hoy";
        let merged = reconstruct_fixed_width(&text);
        let lines: Vec<&str> = merged.split('\n').collect();
        assert_eq!(lines, ["DO  SOL", "F  C", "Esta es la letra de hoy"]);
    }

    #[test]
    fn preserves_blank_lines_as_empty() {
        let text = "Título de prueba\n   \nDO\nletra corta aquí\n";
        assert_eq!(
            reconstruct_fixed_width(text),
            "Título de prueba\n\nC\nletra corta aquí\n"
        );
    }

    #[test]
    fn reconstruction_is_idempotent() {
        let text = [
            "CORO:",
            "SOL         FA      DO",
            "Brillará, brillará, brillará.",
            "",
            "DO  SOL",
            "FA  DO",
        ]
        .join("\n");
        let once = reconstruct_fixed_width(&text);
        assert_eq!(reconstruct_fixed_width(&once), once);
    }
}
