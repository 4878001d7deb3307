use std::io::{Cursor, Read};

use anyhow::{Context, Result, anyhow};
use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

pub fn docx_lines(bytes: &[u8]) -> Result<Vec<String>> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).with_context(|| "failed to read docx archive")?;
    let mut document = archive
        .by_name("word/document.xml")
        .with_context(|| "failed to locate word/document.xml")?;
    let mut xml = Vec::new();
    document
        .read_to_end(&mut xml)
        .with_context(|| "failed to read word/document.xml")?;
    paragraph_lines(&xml)
}

fn paragraph_lines(xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(Cursor::new(xml));
    reader.trim_text(false);
    let mut buf = Vec::new();
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" => lines.push(String::new()),
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => lines.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    if in_paragraph {
                        lines.push(std::mem::take(&mut current));
                        in_paragraph = false;
                    }
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text {
                    current.push_str(&e.unescape()?);
                }
            }
            Ok(Event::CData(e)) => {
                if in_text {
                    current.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(anyhow!("failed to parse docx xml: {}", err));
            }
        }
        buf.clear();
    }
    Ok(lines)
}
