use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE, HeaderName};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::dedup::DedupIndex;
use super::error::FetchError;
use super::{FetchOutcome, SavedImage, filename, headers, validate};

#[derive(Debug, Clone)]
pub struct FetcherOptions {
    pub output_dir: PathBuf,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetcherOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("Fetched_Images"),
            timeout: Duration::from_secs(30),
            user_agent: format!(
                "imgfetch/{} (respectful image fetcher)",
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}

/// Runs the whole pipeline for one URL: validate, request, inspect headers,
/// verify the type, read the body, dedup, and write the file.
///
/// Owns its HTTP client and dedup index; no process-wide state.
pub struct Fetcher {
    client: Client,
    dedup: DedupIndex,
    options: FetcherOptions,
    clock: fn() -> u64,
}

impl Fetcher {
    /// Build a fetcher and seed its dedup index from files already present
    /// in the output directory.
    pub async fn new(options: FetcherOptions) -> Result<Self> {
        let dedup = DedupIndex::from_directory(&options.output_dir).await;
        Self::with_index(options, dedup)
    }

    /// Build a fetcher with a caller-supplied dedup index, so tests can
    /// control the starting state without touching disk.
    pub fn with_index(options: FetcherOptions, dedup: DedupIndex) -> Result<Self> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            dedup,
            options,
            clock: unix_now,
        })
    }

    /// Override the timestamp source used for synthesized filenames.
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.options.output_dir
    }

    /// Number of distinct content hashes currently known.
    pub fn indexed_count(&self) -> usize {
        self.dedup.len()
    }

    /// Fetch one image. Every failure is folded into the outcome; nothing
    /// escapes to the caller, so a bad URL never aborts a batch.
    pub async fn fetch(&mut self, raw_url: &str) -> FetchOutcome {
        let mut warnings = Vec::new();
        let result = self.fetch_inner(raw_url, &mut warnings).await;
        FetchOutcome {
            url: raw_url.to_string(),
            warnings,
            result,
        }
    }

    async fn fetch_inner(
        &mut self,
        raw_url: &str,
        warnings: &mut Vec<String>,
    ) -> Result<SavedImage, FetchError> {
        let url = validate::validate_url(raw_url)?;

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(FetchError::Timeout),
            Err(e) if e.is_connect() => return Err(FetchError::Connection),
            Err(e) => return Err(FetchError::Unexpected(e.to_string())),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }

        let content_type = header_str(&response, CONTENT_TYPE)
            .unwrap_or_default()
            .to_ascii_lowercase();
        let content_length =
            header_str(&response, CONTENT_LENGTH).and_then(|v| v.parse::<u64>().ok());
        let content_disposition = header_str(&response, CONTENT_DISPOSITION);
        warnings.extend(headers::inspect(
            &content_type,
            content_length,
            content_disposition.as_deref(),
        ));

        if !content_type.starts_with("image/") {
            return Err(FetchError::NotAnImage(content_type));
        }

        let body = read_body(response).await?;

        if self.dedup.check_and_insert(&body) {
            return Err(FetchError::Duplicate);
        }

        let dir = &self.options.output_dir;
        fs::create_dir_all(dir).await.map_err(|e| fs_error(dir, e))?;

        let existing = existing_names(dir).await?;
        let name = filename::derive_filename(&url, &content_type, &existing, (self.clock)());
        let path = dir.join(&name);
        write_new(&path, &body).await?;

        Ok(SavedImage {
            path,
            size_bytes: body.len() as u64,
        })
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn header_str(response: &reqwest::Response, name: HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Unexpected(e.to_string())
            }
        })?;
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn fs_error(path: &Path, e: std::io::Error) -> FetchError {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        FetchError::PermissionDenied(path.to_path_buf())
    } else {
        FetchError::Filesystem(e)
    }
}

async fn existing_names(dir: &Path) -> Result<HashSet<String>, FetchError> {
    let mut names = HashSet::new();
    let mut entries = fs::read_dir(dir).await.map_err(|e| fs_error(dir, e))?;
    while let Some(entry) = entries.next_entry().await.map_err(|e| fs_error(dir, e))? {
        if let Ok(name) = entry.file_name().into_string() {
            names.insert(name);
        }
    }
    Ok(names)
}

/// Exclusive create: an existing file at `path` is an error, never an
/// overwrite. Collision resolution upstream makes this unreachable in the
/// sequential model.
async fn write_new(path: &Path, bytes: &[u8]) -> Result<(), FetchError> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| fs_error(path, e))?;
    file.write_all(bytes).await.map_err(|e| fs_error(path, e))?;
    file.flush().await.map_err(|e| fs_error(path, e))?;
    Ok(())
}
