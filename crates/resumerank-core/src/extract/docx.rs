//! DOCX text extraction.
//!
//! A DOCX file is a ZIP container; the visible text lives in
//! `word/document.xml` as `<w:body>` → `<w:p>` (paragraph) → `<w:r>` (run)
//! → `<w:t>` (text). Only paragraphs that are direct children of the body
//! are read, so table cells and text boxes are not included. Paragraphs are
//! concatenated with no separator: the last word of one paragraph runs
//! straight into the first word of the next.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::ExtractionFailure;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract the body paragraph text of an in-memory DOCX file.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionFailure> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionFailure::Docx(format!("not a DOCX container: {e}")))?;

    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionFailure::Docx(format!("missing {DOCUMENT_PART}: {e}")))?;

    let mut xml = Vec::new();
    part.read_to_end(&mut xml)
        .map_err(|e| ExtractionFailure::Docx(format!("failed to read {DOCUMENT_PART}: {e}")))?;

    body_text(&xml)
}

/// Text contributed by a childless run element (`<w:tab/>`, `<w:br/>`, ...).
fn run_marker_text(e: &BytesStart<'_>) -> Option<char> {
    match e.local_name().as_ref() {
        b"tab" => Some('\t'),
        b"br" | b"cr" => Some('\n'),
        _ => None,
    }
}

fn body_text(xml: &[u8]) -> Result<String, ExtractionFailure> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::with_capacity(4096);
    let mut text = String::new();

    // Nesting depth of the open <w:body>, body-level <w:p> and its outermost <w:r>.
    let mut depth: usize = 0;
    let mut body_depth: Option<usize> = None;
    let mut para_depth: Option<usize> = None;
    let mut run_depth: Option<usize> = None;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| ExtractionFailure::Docx(format!("malformed {DOCUMENT_PART}: {e}")))?;

        match event {
            Event::Start(ref e) => {
                depth += 1;
                let local = e.local_name();
                let local = local.as_ref();

                match (body_depth, para_depth, run_depth) {
                    (None, _, _) if local == b"body" => body_depth = Some(depth),
                    (Some(bd), None, _) if depth == bd + 1 && local == b"p" => {
                        para_depth = Some(depth);
                    }
                    (Some(_), Some(_), None) if local == b"r" => run_depth = Some(depth),
                    (Some(_), Some(_), Some(rd)) if depth == rd + 1 => {
                        if local == b"t" {
                            in_text = true;
                        } else if let Some(c) = run_marker_text(e) {
                            text.push(c);
                        }
                    }
                    _ => {}
                }
            }

            Event::Empty(ref e) => {
                if let Some(rd) = run_depth {
                    if depth == rd {
                        if let Some(c) = run_marker_text(e) {
                            text.push(c);
                        }
                    }
                }
            }

            Event::Text(ref e) => {
                if in_text {
                    let t = e
                        .unescape()
                        .map_err(|e| ExtractionFailure::Docx(e.to_string()))?;
                    text.push_str(&t);
                }
            }

            Event::CData(ref e) => {
                if in_text {
                    text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }

            Event::End(_) => {
                if in_text && run_depth.is_some_and(|rd| depth == rd + 1) {
                    in_text = false;
                }
                if run_depth == Some(depth) {
                    run_depth = None;
                }
                if para_depth == Some(depth) {
                    para_depth = None;
                }
                if body_depth == Some(depth) {
                    body_depth = None;
                }
                depth = depth.saturating_sub(1);
            }

            Event::Eof => break,

            _ => {}
        }

        buf.clear();
    }

    Ok(text)
}
