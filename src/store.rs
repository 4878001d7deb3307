use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::SongRecord;

pub trait SongStore {
    fn save(&self, record: &SongRecord) -> Result<String>;
}

#[derive(Debug, Default)]
pub struct NullStore;

impl SongStore for NullStore {
    fn save(&self, record: &SongRecord) -> Result<String> {
        Ok(format!("skipped (dry run): {}", record.title))
    }
}

#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SongStore for JsonlStore {
    fn save(&self, record: &SongRecord) -> Result<String> {
        let line =
            serde_json::to_string(record).with_context(|| "failed to serialize song record")?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        writeln!(file, "{}", line)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(format!("saved: {}", record.title))
    }
}
