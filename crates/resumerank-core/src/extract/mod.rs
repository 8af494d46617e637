//! Text extraction, dispatched on [`DocumentFormat`].

mod docx;
mod pdf;

pub use docx::extract_docx;
pub use pdf::extract_pdf;

use crate::{DocumentFormat, ExtractionFailure, PdfBackend, RawDocument};

/// Extract plain text from a downloaded document.
///
/// - PDF → page texts concatenated via `backend`; whitespace-only output is
///   [`ExtractionFailure::EmptyContent`]
/// - DOCX → body paragraphs concatenated with no separator
/// - anything else → [`ExtractionFailure::Unsupported`]
pub fn extract_text(
    raw: &RawDocument,
    backend: &dyn PdfBackend,
) -> Result<String, ExtractionFailure> {
    match raw.format {
        DocumentFormat::Pdf => extract_pdf(&raw.bytes, backend),
        DocumentFormat::Docx => extract_docx(&raw.bytes),
        DocumentFormat::Unknown => Err(ExtractionFailure::Unsupported),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BackendError;

    struct NoPdf;

    impl PdfBackend for NoPdf {
        fn extract_pages(&self, _bytes: &[u8]) -> Result<Vec<String>, BackendError> {
            Err(BackendError::OpenError("not a PDF".into()))
        }
    }

    fn raw(format: DocumentFormat, bytes: &[u8]) -> RawDocument {
        RawDocument {
            filename: "doc".into(),
            format,
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_unknown_format_never_extracted() {
        assert!(matches!(
            extract_text(&raw(DocumentFormat::Unknown, b"hello"), &NoPdf),
            Err(ExtractionFailure::Unsupported)
        ));
    }

    #[test]
    fn test_pdf_failure_is_reported() {
        assert!(matches!(
            extract_text(&raw(DocumentFormat::Pdf, b"%PDF-broken"), &NoPdf),
            Err(ExtractionFailure::Pdf(_))
        ));
    }

    #[test]
    fn test_docx_dispatch_does_not_touch_pdf_backend() {
        assert!(matches!(
            extract_text(&raw(DocumentFormat::Docx, b"garbage"), &NoPdf),
            Err(ExtractionFailure::Docx(_))
        ));
    }
}
