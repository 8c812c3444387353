//! HTTP dataset fetcher.
//!
//! Every reference is fetched with one blocking GET bounded by the
//! configured timeout. Any non-success status or transport failure is a
//! failure; no partial text is ever returned.
//!
//! Bodies are always decoded as UTF-8 (invalid sequences become U+FFFD),
//! whatever charset the response declares, so a digest depends only on the
//! dataset bytes.

#![allow(clippy::result_large_err)]

use reportseal_core::canonical::DatasetFetcher;
use reportseal_core::errors::{ExError, ExErrorKind, SealError};
use reqwest::blocking::Client;

use crate::config::FetchConfig;

/// Fetches dataset references over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests time out after `config.timeout_ms`
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the HTTP client cannot be constructed.
    pub fn new(config: &FetchConfig) -> Result<Self, ExError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                ExError::new(ExErrorKind::Internal)
                    .with_op("build_http_client")
                    .with_message(e.to_string())
            })?;
        Ok(Self { client })
    }
}

impl DatasetFetcher for HttpFetcher {
    fn fetch(&self, reference: &str) -> reportseal_core::Result<String> {
        let response = self
            .client
            .get(reference)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| fetch_error(reference, e))?;
        let body = response.bytes().map_err(|e| fetch_error(reference, e))?;

        tracing::debug!(reference = %reference, bytes = body.len(), "Fetched dataset");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

fn fetch_error(reference: &str, err: reqwest::Error) -> SealError {
    if err.is_timeout() {
        SealError::FetchTimedOut {
            reference: reference.to_string(),
        }
    } else {
        SealError::FetchFailed {
            reference: reference.to_string(),
            reason: err.to_string(),
        }
    }
}
