pub mod batch;
pub mod config;
pub mod fetch;
pub mod interactive;
pub mod list;

// Re-export all handlers
pub use batch::handle_batch;
pub use config::handle_config;
pub use fetch::handle_fetch;
pub use interactive::handle_interactive;
pub use list::handle_list;

use console::{Term, style};
use imgfetch::config::Config;
use imgfetch::fetch::{FetchOutcome, FetcherOptions};
use std::path::PathBuf;
use std::time::Duration;

/// Resolve fetcher options from config plus the CLI override.
pub(crate) fn fetcher_options(config: &Config, output_dir: Option<&str>) -> FetcherOptions {
    FetcherOptions {
        output_dir: PathBuf::from(output_dir.unwrap_or(&config.general.output_dir)),
        timeout: Duration::from_secs(config.http.timeout_secs),
        user_agent: config.http.user_agent.clone(),
    }
}

/// Print one outcome: advisory warnings first, then the result line.
pub(crate) fn print_outcome(term: &Term, outcome: &FetchOutcome) -> std::io::Result<()> {
    for warning in &outcome.warnings {
        term.write_line(&format!("{} {}", style("⚠").yellow(), warning))?;
    }

    match &outcome.result {
        Ok(saved) => {
            term.write_line(&format!(
                "{} Saved {} ({:.1} KB)",
                style("✓").green(),
                style(saved.path.display()).cyan(),
                saved.size_kb()
            ))?;
        }
        Err(e) => {
            term.write_line(&format!("{} {}", style("✗").red(), e))?;
        }
    }

    Ok(())
}
