pub mod config;
pub mod fetch;

// Re-export commonly used types for easier access in tests
pub use config::{Config, ConfigManager};
pub use fetch::{
    BatchEvent, BatchRunner, BatchSummary, DedupIndex, FetchError, FetchOutcome, Fetcher,
    FetcherOptions, SavedImage,
};
