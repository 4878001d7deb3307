use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;
use time::{OffsetDateTime, format_description};
use tracing::{debug, info, warn};

use crate::assemble::assemble_song;
use crate::data::{SourceInfo, detect_format};
use crate::extract::{LineSource, extract_lines};
use crate::font::{FontDescriptor, WidthModel};
use crate::settings::Settings;
use crate::store::SongStore;

pub type ProgressCallback = Box<dyn Fn(&str, Option<u8>)>;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported format: {extension:?}")]
    UnsupportedFormat { extension: String },
    #[error("extraction failed: {message}")]
    Extraction { message: String },
    #[error("document has no usable text")]
    EmptyDocument,
    #[error("failed to save {title}: {message}")]
    Persistence { title: String, message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub file: String,
    pub songs: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: String,
    pub total: usize,
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub songs_found: usize,
    pub outcomes: Vec<FileOutcome>,
}

pub struct Importer<S: SongStore> {
    store: S,
    settings: Settings,
    width_model: WidthModel,
    font: Option<FontDescriptor>,
    pdf_source: Option<Box<dyn LineSource>>,
    progress: Option<ProgressCallback>,
}

impl<S: SongStore> Importer<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        let width_model = WidthModel::with_overrides(&settings.font_widths);
        let font = settings.font();
        Self {
            store,
            settings,
            width_model,
            font,
            pdf_source: None,
            progress: None,
        }
    }

    pub fn with_pdf_source(mut self, source: Box<dyn LineSource>) -> Self {
        self.pdf_source = Some(source);
        self
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn import_files(&self, files: &[PathBuf]) -> BatchReport {
        let total = files.len();
        let mut outcomes = Vec::with_capacity(total);
        let mut successful = 0;
        let mut failed = 0;
        let mut songs_found = 0;

        for (index, path) in files.iter().enumerate() {
            let percent = (((index + 1) * 100) / total.max(1)) as u8;
            self.report(&format!("importing {}", path.display()), Some(percent));
            match self.import_file(path) {
                Ok(outcome) => {
                    info!("imported {} ({} song)", outcome.file, outcome.songs);
                    successful += 1;
                    songs_found += outcome.songs;
                    outcomes.push(outcome);
                }
                Err(err) => {
                    warn!("skipping {}: {}", path.display(), err);
                    failed += 1;
                    let songs = match &err {
                        ImportError::Persistence { .. } => 1,
                        _ => 0,
                    };
                    songs_found += songs;
                    outcomes.push(FileOutcome {
                        file: path.display().to_string(),
                        songs,
                        error: Some(err.to_string()),
                    });
                }
            }
        }

        BatchReport {
            generated_at: OffsetDateTime::now_utc()
                .format(&format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string()),
            total,
            processed: outcomes.len(),
            successful,
            failed,
            songs_found,
            outcomes,
        }
    }

    fn import_file(&self, path: &Path) -> Result<FileOutcome, ImportError> {
        let bytes = fs::read(path).map_err(|err| ImportError::Extraction {
            message: format!("failed to read {}: {}", path.display(), err),
        })?;
        let format = detect_format(path, &bytes).ok_or_else(|| ImportError::UnsupportedFormat {
            extension: path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default()
                .to_string(),
        })?;
        debug!("format: {}", format.label());
        let lines = extract_lines(format, &bytes, self.pdf_source.as_deref()).map_err(|err| {
            ImportError::Extraction {
                message: format!("{err:#}"),
            }
        })?;
        debug!("extracted {} lines", lines.len());
        let lines = self.monospaced(lines);
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let source = SourceInfo::new(file_name, format);
        let song =
            assemble_song(&lines, &source, &self.settings).ok_or(ImportError::EmptyDocument)?;
        let message = self
            .store
            .save(&song)
            .map_err(|err| ImportError::Persistence {
                title: song.title.clone(),
                message: format!("{err:#}"),
            })?;
        self.report(&message, None);
        Ok(FileOutcome {
            file: path.display().to_string(),
            songs: 1,
            error: None,
        })
    }

    fn monospaced(&self, lines: Vec<String>) -> Vec<String> {
        match &self.font {
            Some(font) => lines
                .iter()
                .map(|line| self.width_model.to_monospace(font, line))
                .collect(),
            None => lines,
        }
    }

    fn report(&self, message: &str, percent: Option<u8>) {
        if let Some(progress) = &self.progress {
            progress(message, percent);
        }
    }
}

pub fn render_report(report: &BatchReport, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }
    let mut out = String::new();
    out.push_str(&format!(
        "Imported {} of {} file(s), {} song(s) found.\n",
        report.successful, report.total, report.songs_found
    ));
    for outcome in &report.outcomes {
        match &outcome.error {
            Some(error) => out.push_str(&format!("  failed  {}: {}\n", outcome.file, error)),
            None => out.push_str(&format!("  ok      {}\n", outcome.file)),
        }
    }
    if report.failed > 0 {
        out.push_str(&format!("{} file(s) failed.\n", report.failed));
    }
    Ok(out)
}
