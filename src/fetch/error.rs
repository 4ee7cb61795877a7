use std::path::PathBuf;
use thiserror::Error;

/// Every way a single fetch can terminate short of a saved file.
///
/// A batch never aborts on these; each one is folded into the per-URL
/// outcome and counted.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("connection timed out - server took too long to respond")]
    Timeout,

    #[error("connection error - unable to reach server")]
    Connection,

    #[error("HTTP error: status {0}")]
    Http(u16),

    #[error("not an image file (content-type: {0})")]
    NotAnImage(String),

    #[error("duplicate image content - already saved")]
    Duplicate,

    #[error("permission denied - cannot write to {0:?}")]
    PermissionDenied(PathBuf),

    #[error("filesystem error: {0}")]
    Filesystem(#[source] std::io::Error),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}
