use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;

use super::FetchOutcome;
use super::pipeline::Fetcher;

/// Default wait between sequential requests, out of politeness to the
/// remote servers.
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);

/// Progress events emitted while a batch runs.
#[derive(Debug)]
pub enum BatchEvent {
    Started {
        index: usize,
        total: usize,
        url: String,
    },
    Finished {
        index: usize,
        total: usize,
        outcome: FetchOutcome,
    },
}

#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub output_dir: PathBuf,
}

/// Runs the fetch pipeline over a list of URLs, one at a time, in input
/// order. Individual failures are counted, never fatal to the batch.
pub struct BatchRunner {
    fetcher: Fetcher,
    pacing: Duration,
}

impl BatchRunner {
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            pacing: DEFAULT_PACING,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn fetcher_mut(&mut self) -> &mut Fetcher {
        &mut self.fetcher
    }

    /// Fetch every URL in order, reporting progress through `events`.
    ///
    /// The sender is consumed so receivers see end-of-stream once the batch
    /// is done. An empty list performs no network calls at all.
    pub async fn run(
        &mut self,
        urls: &[String],
        events: mpsc::UnboundedSender<BatchEvent>,
    ) -> BatchSummary {
        let total = urls.len();
        let mut successful = 0;
        let mut failed = 0;

        for (index, url) in urls.iter().enumerate() {
            let _ = events.send(BatchEvent::Started {
                index,
                total,
                url: url.clone(),
            });

            let outcome = self.fetcher.fetch(url.trim()).await;
            if outcome.is_success() {
                successful += 1;
            } else {
                failed += 1;
            }
            let _ = events.send(BatchEvent::Finished {
                index,
                total,
                outcome,
            });

            // No delay after the last request.
            if index + 1 < total {
                sleep(self.pacing).await;
            }
        }

        BatchSummary {
            total,
            successful,
            failed,
            output_dir: self.fetcher.output_dir().to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::dedup::DedupIndex;
    use crate::fetch::error::FetchError;
    use crate::fetch::pipeline::{Fetcher, FetcherOptions};
    use tempfile::TempDir;

    fn runner_for(dir: &TempDir) -> BatchRunner {
        let options = FetcherOptions {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let fetcher = Fetcher::with_index(options, DedupIndex::new()).unwrap();
        BatchRunner::new(fetcher).with_pacing(Duration::from_millis(0))
    }

    #[tokio::test]
    async fn empty_batch_reports_zero_counts_and_no_events() {
        let dir = TempDir::new().unwrap();
        let mut runner = runner_for(&dir);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let summary = runner.run(&[], tx).await;

        assert_eq!(summary.total, 0);
        assert_eq!(summary.successful, 0);
        assert_eq!(summary.failed, 0);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn invalid_url_counts_as_failure_without_network() {
        let dir = TempDir::new().unwrap();
        let mut runner = runner_for(&dir);

        let urls = vec!["ftp://example.com/img.png".to_string()];
        let (tx, mut rx) = mpsc::unbounded_channel();
        let summary = runner.run(&urls, tx).await;

        assert_eq!(summary.total, 1);
        assert_eq!(summary.successful, 0);
        assert_eq!(summary.failed, 1);

        assert!(matches!(rx.recv().await, Some(BatchEvent::Started { .. })));
        match rx.recv().await {
            Some(BatchEvent::Finished { outcome, .. }) => {
                assert!(matches!(outcome.result, Err(FetchError::InvalidUrl(_))));
            }
            other => panic!("expected Finished event, got {:?}", other),
        }
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn urls_are_trimmed_before_validation() {
        let dir = TempDir::new().unwrap();
        let mut runner = runner_for(&dir);

        // Whitespace padding alone must not turn a bad scheme into a
        // different error kind.
        let urls = vec!["  ftp://example.com/img.png  ".to_string()];
        let (tx, mut rx) = mpsc::unbounded_channel();
        runner.run(&urls, tx).await;

        let mut finished = None;
        while let Some(event) = rx.recv().await {
            if let BatchEvent::Finished { outcome, .. } = event {
                finished = Some(outcome);
            }
        }
        let outcome = finished.expect("batch should emit a Finished event");
        assert!(matches!(outcome.result, Err(FetchError::InvalidUrl(_))));
    }
}
