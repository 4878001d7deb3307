use anyhow::{Result, anyhow};

use crate::data::DocumentFormat;

mod docx;

pub use docx::docx_lines;

pub trait LineSource {
    fn extract_lines(&self, bytes: &[u8]) -> Result<Vec<String>>;
}

pub fn extract_lines(
    format: DocumentFormat,
    bytes: &[u8],
    pdf_source: Option<&dyn LineSource>,
) -> Result<Vec<String>> {
    match format {
        DocumentFormat::Text => Ok(text_lines(bytes)),
        DocumentFormat::Docx => docx_lines(bytes),
        DocumentFormat::Pdf => match pdf_source {
            Some(source) => source.extract_lines(bytes),
            None => Err(anyhow!("no pdf line source is configured")),
        },
    }
}

pub fn text_lines(bytes: &[u8]) -> Vec<String> {
    match std::str::from_utf8(bytes) {
        Ok(text) => split_lines(text),
        Err(_) => {
            let decoded: String = bytes.iter().map(|&byte| byte as char).collect();
            split_lines(&decoded)
        }
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(|line| line.to_string()).collect()
}
