use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

pub mod backend;
pub mod config_file;
pub mod extract;
pub mod format;
pub mod pipeline;
pub mod ranking;
pub mod scoring;
pub mod source;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend};
pub use extract::extract_text;
pub use format::{DocumentFormat, DocumentLocation};
pub use pipeline::ResumeRanker;
pub use ranking::rank;
pub use scoring::score;
pub use source::{DocumentSource, HttpSource};

/// A downloaded document, held in memory until it has been extracted.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub filename: String,
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
}

/// Plain text pulled out of a document.
///
/// `text` is `None` when extraction failed or produced nothing usable. That
/// is not the same as `Some("")`, which is a document that legitimately has
/// no text (e.g. an empty DOCX).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub filename: String,
    pub text: Option<String>,
}

/// A document and its keyword-density score in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub filename: String,
    pub score: f64,
}

/// Scored documents ordered by descending score, truncated to the requested count.
pub type RankedResult = Vec<ScoredDocument>;

/// Why a listed document did not make it into the scored set.
#[derive(Debug)]
pub enum SkipReason {
    /// Extension is neither `.pdf` nor `.docx`; never downloaded.
    UnsupportedFormat,
    Fetch(FetchError),
    Extraction(ExtractionFailure),
}

/// A listed document that was left out of scoring.
#[derive(Debug)]
pub struct SkippedDocument {
    pub filename: String,
    /// Listed URL. `None` for documents read from the local filesystem.
    pub url: Option<String>,
    pub reason: SkipReason,
}

/// Everything a pipeline run produced: the ranking and what was skipped on the way.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub ranked: RankedResult,
    pub skipped: Vec<SkippedDocument>,
}

impl PipelineReport {
    /// Number of skips caused by download or extraction failures
    /// (unsupported formats are not failures).
    pub fn failure_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| !matches!(s.reason, SkipReason::UnsupportedFormat))
            .count()
    }
}

/// Input to one ranking run.
#[derive(Debug, Clone)]
pub struct RankRequest {
    pub keywords: Vec<String>,
    pub required_count: i64,
    /// Accepted for compatibility with existing callers; it does not filter
    /// or otherwise affect the result.
    pub threshold: f64,
    pub listing_url: String,
}

impl RankRequest {
    /// Reject inputs that would make the run meaningless.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_arguments(&self.keywords, self.required_count)
    }
}

/// Check the keyword list and requested count shared by every entry point.
pub fn validate_arguments<S: AsRef<str>>(
    keywords: &[S],
    required_count: i64,
) -> Result<(), CoreError> {
    if required_count < 0 {
        return Err(CoreError::InvalidArgument(format!(
            "required count must be non-negative, got {}",
            required_count
        )));
    }
    if keywords.is_empty() {
        return Err(CoreError::InvalidArgument("no keywords given".into()));
    }
    if keywords.iter().any(|k| k.as_ref().is_empty()) {
        return Err(CoreError::InvalidArgument("empty keyword".into()));
    }
    Ok(())
}

/// Failure to obtain the document listing. Fatal for the whole run.
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("listing endpoint unreachable: {0}")]
    Transport(String),
    #[error("listing endpoint returned HTTP {0}")]
    Status(u16),
    #[error("malformed listing: {0}")]
    Parse(String),
}

/// Failure to download one document. Only that document is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP {0}")]
    Status(u16),
}

/// Failure to get text out of one document. Only that document is skipped.
#[derive(Error, Debug)]
pub enum ExtractionFailure {
    #[error("PDF extraction failed: {0}")]
    Pdf(#[from] BackendError),
    #[error("DOCX extraction failed: {0}")]
    Docx(String),
    #[error("document has no text content")]
    EmptyContent,
    #[error("extraction task failed: {0}")]
    Task(String),
    #[error("unsupported document format")]
    Unsupported,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Configuration for a [`ResumeRanker`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Timeout applied to every listing and download request.
    pub request_timeout_secs: u64,
    /// Documents fetched and extracted at the same time. `1` is fully sequential.
    pub max_concurrent_fetches: usize,
    pub user_agent: String,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout_secs: resumerank_blob::DEFAULT_TIMEOUT.as_secs(),
            max_concurrent_fetches: 1,
            user_agent: resumerank_blob::DEFAULT_USER_AGENT.to_string(),
        }
    }
}
