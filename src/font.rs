use std::collections::HashMap;

use tracing::warn;

pub const FALLBACK_CHAR_WIDTH: f32 = 0.6;
pub const DEFAULT_FONT_SIZE: u32 = 12;

const SEED_WIDTHS: &[(&str, u32, char, f32)] = &[
    ("Arial", 12, ' ', 0.28),
    ("Arial", 12, 'i', 0.22),
    ("Arial", 12, 'j', 0.22),
    ("Arial", 12, 'l', 0.22),
    ("Arial", 12, 't', 0.28),
    ("Arial", 12, 'f', 0.28),
    ("Arial", 12, 'r', 0.33),
    ("Arial", 12, 's', 0.5),
    ("Arial", 12, 'a', 0.55),
    ("Arial", 12, 'e', 0.55),
    ("Arial", 12, 'n', 0.55),
    ("Arial", 12, 'o', 0.56),
    ("Arial", 12, 'w', 0.72),
    ("Arial", 12, 'm', 0.83),
    ("Arial", 11, ' ', 0.29),
    ("Arial", 11, 'i', 0.23),
    ("Arial", 11, 'l', 0.23),
    ("Arial", 11, 'm', 0.84),
    ("Arial", 10, ' ', 0.3),
    ("Arial", 10, 'i', 0.24),
    ("Arial", 10, 'l', 0.24),
    ("Arial", 10, 'm', 0.85),
    ("Times New Roman", 12, ' ', 0.25),
    ("Times New Roman", 12, 'i', 0.28),
    ("Times New Roman", 12, 'l', 0.28),
    ("Times New Roman", 12, 'a', 0.44),
    ("Times New Roman", 12, 'e', 0.44),
    ("Times New Roman", 12, 'o', 0.5),
    ("Times New Roman", 12, 'w', 0.72),
    ("Times New Roman", 12, 'm', 0.89),
    ("Calibri", 11, ' ', 0.23),
    ("Calibri", 11, 'i', 0.21),
    ("Calibri", 11, 'l', 0.21),
    ("Calibri", 11, 'a', 0.48),
    ("Calibri", 11, 'e', 0.5),
    ("Calibri", 11, 'o', 0.51),
    ("Calibri", 11, 'w', 0.67),
    ("Calibri", 11, 'm', 0.82),
];

const SEED_DEFAULTS: &[(&str, u32, f32)] = &[
    ("Arial", 10, 0.54),
    ("Arial", 11, 0.53),
    ("Arial", 12, 0.52),
    ("Times New Roman", 12, 0.5),
    ("Calibri", 11, 0.47),
    ("Courier New", 12, 1.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub family: String,
    pub size: u32,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, size: u32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WidthModel {
    overrides: HashMap<(String, u32, char), f32>,
}

impl WidthModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(entries: &HashMap<String, f32>) -> Self {
        let mut overrides = HashMap::new();
        for (key, width) in entries {
            match parse_override_key(key) {
                Some((family, size, ch)) if *width > 0.0 && *width <= 2.0 => {
                    overrides.insert((family, size, ch), *width);
                }
                _ => warn!("ignoring invalid font width entry {key:?} = {width}"),
            }
        }
        Self { overrides }
    }

    pub fn char_width(&self, font: &FontDescriptor, ch: char) -> f32 {
        for (family, size, seeded, width) in SEED_WIDTHS {
            if *size == font.size && *seeded == ch && family.eq_ignore_ascii_case(&font.family) {
                return *width;
            }
        }
        for (family, size, width) in SEED_DEFAULTS {
            if *size == font.size && family.eq_ignore_ascii_case(&font.family) {
                return *width;
            }
        }
        if let Some(width) = self
            .overrides
            .get(&(font.family.to_lowercase(), font.size, ch))
        {
            return *width;
        }
        FALLBACK_CHAR_WIDTH
    }

    pub fn text_width(&self, font: &FontDescriptor, text: &str) -> f32 {
        text.chars().map(|ch| self.char_width(font, ch)).sum()
    }

    pub fn to_monospace(&self, font: &FontDescriptor, line: &str) -> String {
        let chars: Vec<char> = line.chars().collect();
        let mut out = String::with_capacity(chars.len());
        let mut i = 0;
        while i < chars.len() {
            let start = i;
            let is_space = chars[i].is_whitespace();
            while i < chars.len() && chars[i].is_whitespace() == is_space {
                i += 1;
            }
            let segment: String = chars[start..i].iter().collect();
            if is_space {
                let cells = (self.text_width(font, &segment).round() as usize).max(1);
                for _ in 0..cells {
                    out.push(' ');
                }
            } else {
                out.push_str(&segment);
            }
        }
        out
    }
}

fn parse_override_key(key: &str) -> Option<(String, u32, char)> {
    let mut parts = key.split('/');
    let family = parts.next()?.trim();
    let size = parts.next()?.trim().parse::<u32>().ok()?;
    let ch_part = parts.next()?;
    if parts.next().is_some() || family.is_empty() {
        return None;
    }
    let ch = match ch_part {
        "space" => ' ',
        other => {
            let mut chars = other.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            ch
        }
    };
    Some((family.to_lowercase(), size, ch))
}
