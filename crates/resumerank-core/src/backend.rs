use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

/// Trait for PDF text extraction backends.
///
/// Implementors turn an in-memory PDF into one string per page, in page
/// order. Joining pages and deciding whether the result counts as content
/// happens in [`crate::extract`].
pub trait PdfBackend: Send + Sync {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, BackendError>;
}
