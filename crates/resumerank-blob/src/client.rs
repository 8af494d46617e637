use std::time::Duration;

use crate::listing::parse_listing;
use crate::{BlobEntry, BlobError};

pub const DEFAULT_USER_AGENT: &str = concat!("resumerank/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for a blob container: one call to enumerate, one call per blob.
#[derive(Debug, Clone)]
pub struct BlobClient {
    client: reqwest::Client,
}

impl BlobClient {
    /// Build a client with the given per-request timeout and user agent.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, BlobError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch and parse the container listing at `listing_url`.
    pub async fn list(&self, listing_url: &str) -> Result<Vec<BlobEntry>, BlobError> {
        let body = self.get_bytes(listing_url).await?;
        let entries = parse_listing(&body)?;
        tracing::debug!(url = listing_url, blobs = entries.len(), "parsed listing");
        Ok(entries)
    }

    /// Download a single blob into memory.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, BlobError> {
        let bytes = self.get_bytes(url).await?;
        tracing::trace!(url, bytes = bytes.len(), "downloaded blob");
        Ok(bytes)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, BlobError> {
        let response = self.client.get(url).send().await?;
        check_status(&response, url)?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Only a plain 200 counts; redirects are followed by reqwest already.
fn check_status(response: &reqwest::Response, url: &str) -> Result<(), BlobError> {
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(BlobError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_carries_version() {
        assert!(DEFAULT_USER_AGENT.starts_with("resumerank/"));
        assert!(DEFAULT_USER_AGENT.len() > "resumerank/".len());
    }

    #[tokio::test]
    async fn test_invalid_url_is_http_error() {
        let client = BlobClient::new(Duration::from_secs(1), DEFAULT_USER_AGENT).unwrap();
        let err = client.list("not a url").await.unwrap_err();
        assert!(matches!(err, BlobError::Http(_)));
    }

    fn response(status: u16) -> reqwest::Response {
        let http_resp = http::Response::builder().status(status).body("").unwrap();
        reqwest::Response::from(http_resp)
    }

    #[test]
    fn test_ok_on_200() {
        assert!(check_status(&response(200), "https://h/c/a.pdf").is_ok());
    }

    #[test]
    fn test_partial_content_is_not_success() {
        let err = check_status(&response(206), "https://h/c/a.pdf").unwrap_err();
        match err {
            BlobError::Status { url, status } => {
                assert_eq!(url, "https://h/c/a.pdf");
                assert_eq!(status, 206);
            }
            _ => panic!("expected Status"),
        }
    }

    #[test]
    fn test_not_found_is_status_error() {
        let err = check_status(&response(404), "https://h/c").unwrap_err();
        assert!(matches!(err, BlobError::Status { status: 404, .. }));
    }
}
