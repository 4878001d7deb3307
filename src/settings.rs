use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::font::{DEFAULT_FONT_SIZE, FontDescriptor};

const DEFAULT_SETTINGS_TOML: &str = include_str!("../settings.toml");

#[derive(Debug, Clone)]
pub struct Settings {
    pub default_category: String,
    pub unknown_artist: String,
    pub default_key: String,
    pub ignore: Vec<String>,
    pub font_family: Option<String>,
    pub font_size: Option<u32>,
    pub font_widths: HashMap<String, f32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_category: "General".to_string(),
            unknown_artist: "Desconocido".to_string(),
            default_key: "C".to_string(),
            ignore: Vec::new(),
            font_family: None,
            font_size: None,
            font_widths: HashMap::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    import: Option<ImportSettings>,
    fonts: Option<FontSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct ImportSettings {
    default_category: Option<String>,
    unknown_artist: Option<String>,
    default_key: Option<String>,
    ignore: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct FontSettings {
    family: Option<String>,
    size: Option<u32>,
    widths: Option<HashMap<String, f32>>,
}

pub fn load_settings(extra_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();
    let embedded: SettingsFile =
        toml::from_str(DEFAULT_SETTINGS_TOML).with_context(|| "failed to parse embedded settings")?;
    settings.merge(embedded);

    let mut ordered_paths = Vec::new();
    ordered_paths.push(PathBuf::from("settings.toml"));
    ordered_paths.push(PathBuf::from("settings.local.toml"));

    if let Some(extra) = extra_path {
        if !extra.exists() {
            return Err(anyhow!("settings file not found: {}", extra.display()));
        }
        ordered_paths.push(extra.to_path_buf());
    }

    for path in ordered_paths {
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            let parsed: SettingsFile = toml::from_str(&content)
                .with_context(|| format!("failed to parse settings: {}", path.display()))?;
            settings.merge(parsed);
        }
    }

    Ok(settings)
}

impl Settings {
    fn merge(&mut self, incoming: SettingsFile) {
        if let Some(import) = incoming.import {
            if let Some(category) = import.default_category {
                if !category.trim().is_empty() {
                    self.default_category = category;
                }
            }
            if let Some(artist) = import.unknown_artist {
                if !artist.trim().is_empty() {
                    self.unknown_artist = artist;
                }
            }
            if let Some(key) = import.default_key {
                if !key.trim().is_empty() {
                    self.default_key = key;
                }
            }
            if let Some(ignore) = import.ignore {
                self.ignore = ignore;
            }
        }
        if let Some(fonts) = incoming.fonts {
            if let Some(family) = fonts.family {
                if !family.trim().is_empty() {
                    self.font_family = Some(family);
                }
            }
            if let Some(size) = fonts.size {
                if size > 0 {
                    self.font_size = Some(size);
                }
            }
            if let Some(widths) = fonts.widths {
                for (key, value) in widths {
                    self.font_widths.insert(key, value);
                }
            }
        }
    }

    pub fn font(&self) -> Option<FontDescriptor> {
        self.font_family.as_ref().map(|family| {
            FontDescriptor::new(family.clone(), self.font_size.unwrap_or(DEFAULT_FONT_SIZE))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn carries_songbook_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_category, "General");
        assert_eq!(settings.unknown_artist, "Desconocido");
        assert_eq!(settings.default_key, "C");
        assert!(settings.font().is_none());
    }

    #[test]
    fn extra_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ajustes.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[import]").unwrap();
        writeln!(file, "default_key = \"G\"").unwrap();
        writeln!(file, "[fonts]").unwrap();
        writeln!(file, "family = \"Arial\"").unwrap();
        writeln!(file, "[fonts.widths]").unwrap();
        writeln!(file, "\"Arial/12/space\" = 0.3").unwrap();
        drop(file);

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.default_key, "G");
        assert_eq!(settings.unknown_artist, "Desconocido");
        let font = settings.font().unwrap();
        assert_eq!(font.family, "Arial");
        assert_eq!(font.size, 12);
        assert_eq!(settings.font_widths.get("Arial/12/space"), Some(&0.3));
    }

    #[test]
    fn missing_extra_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-existe.toml");
        assert!(load_settings(Some(&path)).is_err());
    }

    #[test]
    fn blank_values_do_not_override() {
        let mut settings = Settings::default();
        let parsed: SettingsFile = toml::from_str("[import]\ndefault_key = \"  \"\n").unwrap();
        settings.merge(parsed);
        assert_eq!(settings.default_key, "C");
    }
}
