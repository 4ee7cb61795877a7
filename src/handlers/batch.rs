use anyhow::{Context, Result};
use console::Term;
use imgfetch::config::Config;
use imgfetch::fetch::{BatchEvent, BatchRunner, Fetcher};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

use super::{fetcher_options, print_outcome};

pub async fn handle_batch(
    config: &Config,
    output_dir: Option<&str>,
    mut urls: Vec<String>,
    file: Option<PathBuf>,
    delay: Option<u64>,
    verbose: bool,
) -> Result<()> {
    if let Some(path) = file {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read URL list: {:?}", path))?;
        urls.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from),
        );
    }
    urls.retain(|url| !url.trim().is_empty());

    if urls.is_empty() {
        println!("No URLs provided");
        return Ok(());
    }

    println!("🚀 Starting batch download of {} images...", urls.len());
    println!("{}", "=".repeat(50));

    let fetcher = Fetcher::new(fetcher_options(config, output_dir)).await?;
    if verbose {
        println!(
            "   {} previously saved images indexed",
            fetcher.indexed_count()
        );
    }

    let pacing = Duration::from_secs(delay.unwrap_or(config.general.pacing_delay_secs));
    let mut runner = BatchRunner::new(fetcher).with_pacing(pacing);

    let term = Term::stdout();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (summary, _) = tokio::join!(runner.run(&urls, tx), async {
        while let Some(event) = rx.recv().await {
            match event {
                BatchEvent::Started { index, total, url } => {
                    println!("\n[{}/{}] Processing: {}", index + 1, total, url);
                }
                BatchEvent::Finished { outcome, .. } => {
                    let _ = print_outcome(&term, &outcome);
                }
            }
        }
    });

    println!("\n{}", "=".repeat(50));
    println!("📊 Batch summary");
    println!("   ✓ Successful: {}", summary.successful);
    println!("   ✗ Failed: {}", summary.failed);
    println!("   📁 Images saved in: {}", summary.output_dir.display());

    Ok(())
}
