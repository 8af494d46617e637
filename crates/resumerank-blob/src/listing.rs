//! Parser for the container enumeration XML returned by a blob listing call.
//!
//! The payload looks like:
//!
//! ```xml
//! <EnumerationResults ContainerName="https://acct.blob.core.windows.net/resumes">
//!   <Blobs>
//!     <Blob>
//!       <Name>alice.pdf</Name>
//!       <Url>https://acct.blob.core.windows.net/resumes/alice.pdf</Url>
//!     </Blob>
//!   </Blobs>
//! </EnumerationResults>
//! ```
//!
//! Every `<Blob>` element, wherever it sits in the tree, must carry a `<Url>`
//! child with non-empty text. Anything else is reported as a parse error.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::{BlobEntry, BlobError};

/// Which child of `<Blob>` we're currently reading text for.
enum Field {
    Name,
    Url,
}

/// Parse a listing payload into its blob entries, in document order.
pub fn parse_listing(xml: &[u8]) -> Result<Vec<BlobEntry>, BlobError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::with_capacity(1024);
    let mut entries = Vec::new();

    let mut depth: usize = 0;
    let mut saw_root = false;
    // Nesting depth of the `<Blob>` element currently open, if any.
    let mut blob_depth: Option<usize> = None;
    let mut current_name: Option<String> = None;
    let mut current_url: Option<String> = None;
    let mut reading: Option<Field> = None;
    let mut text_buf = String::new();

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            BlobError::Parse(format!("at byte {}: {}", reader.buffer_position(), e))
        })?;

        match event {
            Event::Start(ref e) => {
                depth += 1;
                saw_root = true;
                let local = e.local_name();

                match blob_depth {
                    None if local.as_ref() == b"Blob" => {
                        blob_depth = Some(depth);
                        current_name = None;
                        current_url = None;
                        reading = None;
                    }
                    Some(bd) if depth == bd + 1 && reading.is_none() => match local.as_ref() {
                        b"Url" if current_url.is_none() => {
                            reading = Some(Field::Url);
                            text_buf.clear();
                        }
                        b"Name" if current_name.is_none() => {
                            reading = Some(Field::Name);
                            text_buf.clear();
                        }
                        _ => {}
                    },
                    _ => {}
                }
            }

            Event::Empty(ref e) => {
                saw_root = true;
                if blob_depth.is_none() && e.local_name().as_ref() == b"Blob" {
                    return Err(BlobError::Parse("Blob entry without Url".into()));
                }
            }

            Event::Text(ref e) => {
                if reading.is_some() {
                    let text = e.unescape().map_err(|e| BlobError::Parse(e.to_string()))?;
                    text_buf.push_str(&text);
                }
            }

            Event::CData(ref e) => {
                if reading.is_some() {
                    text_buf.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }

            Event::End(_) => {
                if let Some(bd) = blob_depth {
                    if depth == bd + 1 {
                        let text = text_buf.trim();
                        match reading.take() {
                            Some(Field::Url) if !text.is_empty() => {
                                current_url = Some(text.to_string());
                            }
                            Some(Field::Name) if !text.is_empty() => {
                                current_name = Some(text.to_string());
                            }
                            _ => {}
                        }
                    } else if depth == bd {
                        let url = current_url
                            .take()
                            .ok_or_else(|| BlobError::Parse("Blob entry without Url".into()))?;
                        entries.push(BlobEntry {
                            name: current_name.take(),
                            url,
                        });
                        blob_depth = None;
                    }
                }
                depth = depth.saturating_sub(1);
            }

            Event::Eof => {
                if !saw_root {
                    return Err(BlobError::Parse("no root element".into()));
                }
                if depth != 0 {
                    return Err(BlobError::Parse("unexpected end of document".into()));
                }
                break;
            }

            _ => {}
        }

        buf.clear();
    }

    Ok(entries)
}
