use std::future::Future;
use std::pin::Pin;

use resumerank_blob::{BlobClient, BlobError};

use super::DocumentSource;
use crate::{Config, CoreError, FetchError, ListingError};

/// [`DocumentSource`] backed by a blob container listing over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: BlobClient,
}

impl HttpSource {
    pub fn new(config: &Config) -> Result<Self, CoreError> {
        let client = BlobClient::new(config.request_timeout(), &config.user_agent)
            .map_err(|e| CoreError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl From<BlobError> for ListingError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::Http(e) => ListingError::Transport(e.to_string()),
            BlobError::Status { status, .. } => ListingError::Status(status),
            BlobError::Parse(msg) => ListingError::Parse(msg),
        }
    }
}

impl From<BlobError> for FetchError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::Status { status, .. } => FetchError::Status(status),
            other => FetchError::Transport(other.to_string()),
        }
    }
}

impl DocumentSource for HttpSource {
    fn list<'a>(
        &'a self,
        endpoint: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, ListingError>> + Send + 'a>> {
        Box::pin(async move {
            let entries = self.client.list(endpoint).await?;
            Ok(entries.into_iter().map(|entry| entry.url).collect())
        })
    }

    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, FetchError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.client.download(url).await?) })
    }
}
