use std::path::Path;

use serde::{Deserialize, Serialize};

pub const STATUS_PENDING: &str = "pending";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Text,
    Docx,
    Pdf,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" | "text" => Some(Self::Text),
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "plain text",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }
}

pub fn detect_format(path: &Path, bytes: &[u8]) -> Option<DocumentFormat> {
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        if let Some(format) = DocumentFormat::from_extension(ext) {
            return Some(format);
        }
    }
    sniff_format(bytes)
}

fn sniff_format(bytes: &[u8]) -> Option<DocumentFormat> {
    let kind = infer::get(bytes)?;
    match kind.mime_type() {
        "application/pdf" => Some(DocumentFormat::Pdf),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
            Some(DocumentFormat::Docx)
        }
        "application/zip" => contains_docx_marker(bytes).then_some(DocumentFormat::Docx),
        _ => None,
    }
}

fn contains_docx_marker(bytes: &[u8]) -> bool {
    bytes
        .windows(b"word/".len())
        .any(|window| window == b"word/")
}

#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub file_name: String,
    pub format: DocumentFormat,
}

impl SourceInfo {
    pub fn new(file_name: impl Into<String>, format: DocumentFormat) -> Self {
        Self {
            file_name: file_name.into(),
            format,
        }
    }

    pub fn title_fallback(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file_name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    pub title: String,
    pub artist: String,
    pub lyrics: String,
    pub key: String,
    pub status: String,
    pub category: String,
    pub notes: String,
}
