pub mod batch;
pub mod dedup;
pub mod error;
pub mod filename;
pub mod headers;
pub mod pipeline;
pub mod validate;

pub use batch::{BatchEvent, BatchRunner, BatchSummary};
pub use dedup::DedupIndex;
pub use error::FetchError;
pub use pipeline::{Fetcher, FetcherOptions};

use std::path::PathBuf;

/// Result of one fetch attempt.
///
/// Advisory warnings are collected as soon as response headers are seen, so
/// they are present even when a later stage fails.
#[derive(Debug)]
pub struct FetchOutcome {
    pub url: String,
    pub warnings: Vec<String>,
    pub result: Result<SavedImage, FetchError>,
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone)]
pub struct SavedImage {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl SavedImage {
    /// Size in KB for display.
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}
