//! Dataset fetch contract
//!
//! The hasher never performs I/O itself: it asks a [`DatasetFetcher`] for
//! each reference. The network implementation lives in the engine crate.

use std::collections::HashMap;

use crate::errors::{Result, SealError};

/// Retrieves the text of a dataset reference
pub trait DatasetFetcher: Send + Sync {
    /// Fetch the full text behind `reference`
    ///
    /// # Errors
    ///
    /// Any non-success outcome must be an error (`FetchFailed` or
    /// `FetchTimedOut`); a partial body is never returned.
    fn fetch(&self, reference: &str) -> Result<String>;
}

impl<F: DatasetFetcher + ?Sized> DatasetFetcher for &F {
    fn fetch(&self, reference: &str) -> Result<String> {
        (**self).fetch(reference)
    }
}

/// Fetcher backed by previously fetched texts
///
/// Lets a caller hash against a cached copy of the datasets. A reference
/// with no cached text fails like an unreachable one.
#[derive(Debug, Clone, Default)]
pub struct MapFetcher {
    texts: HashMap<String, String>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, reference: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(reference, text);
        self
    }

    pub fn insert(&mut self, reference: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(reference.into(), text.into());
    }
}

impl DatasetFetcher for MapFetcher {
    fn fetch(&self, reference: &str) -> Result<String> {
        self.texts
            .get(reference)
            .cloned()
            .ok_or_else(|| SealError::FetchFailed {
                reference: reference.to_string(),
                reason: "no cached copy of dataset".to_string(),
            })
    }
}
