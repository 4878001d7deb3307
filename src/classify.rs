use crate::chord;

const SECTION_NAMES: [&str; 8] = [
    "INTRO",
    "VERSO",
    "CORO",
    "ESTRIBILLO",
    "PUENTE",
    "ESTROFA",
    "CODA",
    "FINAL",
];

const PROSE_TOKEN_LEN: usize = 6;

pub fn is_chord_line(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return false;
    }
    if tokens.iter().any(|token| chord::has_strong_signal(token)) {
        return true;
    }
    let valid = tokens
        .iter()
        .filter(|token| chord::is_chord_token(token))
        .count();
    if valid == 0 {
        return false;
    }
    if tokens.iter().any(|token| is_prose_word(token)) {
        return false;
    }
    valid * 2 >= tokens.len()
}

pub fn is_section_marker(line: &str) -> bool {
    let text = line
        .trim()
        .trim_matches(|c: char| matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | ':' | '.' | '-'))
        .trim();
    if text.is_empty() {
        return false;
    }
    let upper = text.to_uppercase();
    let (name, rest) = match upper.split_once(' ') {
        Some((name, rest)) => (name, rest.trim()),
        None => (upper.as_str(), ""),
    };
    SECTION_NAMES.contains(&name) && (rest.is_empty() || rest.chars().all(|c| c.is_ascii_digit()))
}

fn is_prose_word(token: &str) -> bool {
    token.chars().count() > PROSE_TOKEN_LEN && !chord::is_chord_token(token)
}
