use crate::{ExtractionFailure, PdfBackend};

/// Concatenate every page's text, in page order, with nothing in between.
pub fn extract_pdf(bytes: &[u8], backend: &dyn PdfBackend) -> Result<String, ExtractionFailure> {
    let pages = backend.extract_pages(bytes)?;
    let content = pages.concat();

    if content.trim().is_empty() {
        return Err(ExtractionFailure::EmptyContent);
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BackendError;

    /// Treats the input as UTF-8 with pages separated by form feeds.
    struct FormFeedPages;

    impl PdfBackend for FormFeedPages {
        fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, BackendError> {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| BackendError::OpenError(e.to_string()))?;
            Ok(text.split('\x0c').map(String::from).collect())
        }
    }

    #[test]
    fn test_pages_joined_without_separator() {
        let text = extract_pdf(b"Senior Rust\x0cEngineer", &FormFeedPages).unwrap();
        assert_eq!(text, "Senior RustEngineer");
    }

    #[test]
    fn test_whitespace_only_is_empty_content() {
        assert!(matches!(
            extract_pdf(b" \n\x0c\t ", &FormFeedPages),
            Err(ExtractionFailure::EmptyContent)
        ));
        assert!(matches!(
            extract_pdf(b"", &FormFeedPages),
            Err(ExtractionFailure::EmptyContent)
        ));
    }

    #[test]
    fn test_surrounding_whitespace_is_kept() {
        let text = extract_pdf(b"  engineer \n", &FormFeedPages).unwrap();
        assert_eq!(text, "  engineer \n");
    }

    #[test]
    fn test_backend_error_propagates() {
        assert!(matches!(
            extract_pdf(&[0xff, 0xfe], &FormFeedPages),
            Err(ExtractionFailure::Pdf(BackendError::OpenError(_)))
        ));
    }
}
