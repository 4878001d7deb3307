const LATIN_ROOTS: [(&str, char); 7] = [
    ("SOL", 'G'),
    ("DO", 'C'),
    ("RE", 'D'),
    ("MI", 'E'),
    ("FA", 'F'),
    ("LA", 'A'),
    ("SI", 'B'),
];

const QUALITIES: [&str; 7] = ["maj", "min", "sus", "dim", "aug", "add", "m"];

struct RootMatch<'a> {
    root: char,
    accidental: Option<char>,
    suffix: &'a str,
}

pub fn normalize_chord(token: &str) -> String {
    let stripped = strip_wrapping(token);
    match parse_chord(stripped) {
        Some(normalized) => normalized,
        None => token.to_string(),
    }
}

pub fn is_chord_token(token: &str) -> bool {
    let stripped = strip_wrapping(token);
    if stripped.is_empty() {
        return false;
    }
    parse_chord(stripped).is_some() || has_strong_signal(stripped)
}

pub fn has_strong_signal(token: &str) -> bool {
    let stripped = strip_wrapping(token);
    if stripped.chars().any(|c| matches!(c, '#' | '♯' | '♭')) {
        return true;
    }
    match stripped.split_once('/') {
        Some((left, right)) => parse_plain(left).is_some() || parse_plain(right).is_some(),
        None => false,
    }
}

pub fn chord_root(token: &str) -> Option<String> {
    let stripped = strip_wrapping(token);
    let first = match stripped.split_once('/') {
        Some((left, _)) => left,
        None => stripped,
    };
    let normalized = parse_plain(first)?;
    let mut chars = normalized.chars();
    let mut root = String::new();
    root.push(chars.next()?);
    if let Some(accidental @ ('#' | 'b')) = chars.next() {
        root.push(accidental);
    }
    Some(root)
}

fn parse_chord(token: &str) -> Option<String> {
    match token.split_once('/') {
        Some((left, right)) => {
            let left = parse_plain(left)?;
            let right = parse_plain(right)?;
            Some(format!("{left}/{right}"))
        }
        None => parse_plain(token),
    }
}

fn parse_plain(token: &str) -> Option<String> {
    if token.is_empty() {
        return None;
    }
    if let Some(found) = match_anglo(token) {
        if suffix_is_valid(found.suffix) {
            return Some(render_chord(&found, found.suffix));
        }
    }
    if let Some(found) = match_latin(token) {
        if let Some(suffix) = normalize_latin_suffix(found.suffix) {
            return Some(render_chord(&found, &suffix));
        }
    }
    None
}

fn match_anglo(token: &str) -> Option<RootMatch<'_>> {
    let first = token.chars().next()?;
    if !first.is_ascii_alphabetic() || !matches!(first.to_ascii_uppercase(), 'A'..='G') {
        return None;
    }
    let (accidental, suffix) = split_accidental(&token[first.len_utf8()..]);
    Some(RootMatch {
        root: first.to_ascii_uppercase(),
        accidental,
        suffix,
    })
}

fn match_latin(token: &str) -> Option<RootMatch<'_>> {
    for (name, root) in LATIN_ROOTS {
        if token.len() >= name.len()
            && token.is_char_boundary(name.len())
            && token[..name.len()].eq_ignore_ascii_case(name)
        {
            let (accidental, suffix) = split_accidental(&token[name.len()..]);
            return Some(RootMatch {
                root,
                accidental,
                suffix,
            });
        }
    }
    None
}

fn split_accidental(rest: &str) -> (Option<char>, &str) {
    let Some(first) = rest.chars().next() else {
        return (None, rest);
    };
    let canonical = match first {
        '#' | '♯' => '#',
        'b' | '♭' => 'b',
        _ => return (None, rest),
    };
    (Some(canonical), &rest[first.len_utf8()..])
}

fn suffix_is_valid(suffix: &str) -> bool {
    if suffix.is_empty() {
        return true;
    }
    let lower = suffix.to_lowercase();
    let rest = QUALITIES
        .iter()
        .find_map(|quality| lower.strip_prefix(quality))
        .unwrap_or(lower.as_str());
    rest.is_empty() || (rest.chars().count() <= 2 && rest.chars().all(|c| c.is_ascii_digit()))
}

fn normalize_latin_suffix(suffix: &str) -> Option<String> {
    if !suffix_is_valid(suffix) {
        return None;
    }
    if suffix.is_empty() {
        return Some(String::new());
    }
    let lower = suffix.to_lowercase();
    if lower.starts_with("maj") {
        return Some(format!("maj{}", &suffix[3..]));
    }
    if lower.starts_with('m') && !lower.starts_with("min") {
        return Some(format!("m{}", &suffix[1..]));
    }
    Some(suffix.to_string())
}

fn render_chord(found: &RootMatch<'_>, suffix: &str) -> String {
    let mut out = String::with_capacity(suffix.len() + 2);
    out.push(found.root);
    if let Some(accidental) = found.accidental {
        out.push(accidental);
    }
    out.push_str(suffix);
    out
}

fn strip_wrapping(token: &str) -> &str {
    token.trim_matches(|c: char| {
        matches!(
            c,
            '(' | ')'
                | '['
                | ']'
                | '{'
                | '}'
                | '.'
                | ','
                | ';'
                | ':'
                | '!'
                | '¡'
                | '?'
                | '¿'
                | '"'
                | '\''
                | '«'
                | '»'
                | '“'
                | '”'
                | '‘'
                | '’'
                | '|'
                | '*'
                | '-'
                | '–'
                | '—'
        )
    })
}
