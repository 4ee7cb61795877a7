use anyhow::Result;
use console::{Term, style};
use imgfetch::config::Config;
use imgfetch::fetch::Fetcher;
use indicatif::{ProgressBar, ProgressStyle};
use std::process;
use std::time::Duration;

use super::{fetcher_options, print_outcome};

pub async fn handle_fetch(
    config: &Config,
    output_dir: Option<&str>,
    url: String,
    verbose: bool,
) -> Result<()> {
    let term = Term::stdout();
    term.write_line(&format!(
        "{} Processing: {}",
        style("🔍").cyan(),
        style(&url).cyan()
    ))?;

    // Seeding the dedup index can take a moment on a full directory.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    spinner.set_message("Indexing existing images...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut fetcher = Fetcher::new(fetcher_options(config, output_dir)).await?;
    spinner.finish_and_clear();

    if verbose {
        term.write_line(&format!(
            "   {} previously saved images indexed",
            style(fetcher.indexed_count()).cyan()
        ))?;
    }

    term.write_line(&format!("{} Connecting...", style("📡").cyan()))?;
    let outcome = fetcher.fetch(&url).await;
    print_outcome(&term, &outcome)?;

    if !outcome.is_success() {
        process::exit(1);
    }

    Ok(())
}
