//! Where listed documents come from.

mod http;

pub use http::HttpSource;

use std::future::Future;
use std::pin::Pin;

use crate::{FetchError, ListingError};

/// A store that can enumerate document URLs and hand back their bytes.
pub trait DocumentSource: Send + Sync {
    /// List the URLs of every document under `endpoint`, in listing order.
    fn list<'a>(
        &'a self,
        endpoint: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, ListingError>> + Send + 'a>>;

    /// Download one document.
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, FetchError>> + Send + 'a>>;
}
