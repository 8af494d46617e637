//! Blob container access for resumerank.
//!
//! Lists a container through its XML enumeration endpoint and downloads
//! individual blobs into memory. No credentials are handled here: the listing
//! URL is expected to be publicly readable or to carry its own SAS token.

mod client;
pub mod listing;

use thiserror::Error;

pub use client::{BlobClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use listing::parse_listing;

#[derive(Error, Debug)]
pub enum BlobError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("malformed listing: {0}")]
    Parse(String),
}

/// One `<Blob>` entry from a container listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobEntry {
    /// Blob name as reported by the listing, if present.
    pub name: Option<String>,
    /// Absolute URL the blob can be downloaded from.
    pub url: String,
}
