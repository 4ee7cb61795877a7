use anyhow::Result;
use console::{Term, style};
use dialoguer::{Input, Select};
use imgfetch::config::Config;
use imgfetch::fetch::{BatchEvent, BatchRunner, Fetcher};
use std::time::Duration;
use tokio::sync::mpsc;

use super::{fetcher_options, print_outcome};

pub async fn handle_interactive(
    config: &Config,
    output_dir: Option<&str>,
    verbose: bool,
) -> Result<()> {
    let term = Term::stdout();
    term.write_line(&format!("{} Welcome to imgfetch", style("🖼").cyan()))?;
    term.write_line("A tool for mindfully collecting images from the web")?;
    term.write_line("")?;

    let fetcher = Fetcher::new(fetcher_options(config, output_dir)).await?;
    if verbose {
        term.write_line(&format!(
            "   {} previously saved images indexed",
            style(fetcher.indexed_count()).cyan()
        ))?;
    }
    let mut runner = BatchRunner::new(fetcher)
        .with_pacing(Duration::from_secs(config.general.pacing_delay_secs));

    loop {
        let choice = Select::new()
            .with_prompt("Choose an option")
            .items(&["Fetch a single image", "Fetch multiple images", "Quit"])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let url: String = Input::new()
                    .with_prompt("Image URL")
                    .interact_text()?;
                let url = url.trim().to_string();
                if url.is_empty() {
                    continue;
                }
                let outcome = runner.fetcher_mut().fetch(&url).await;
                print_outcome(&term, &outcome)?;
            }
            1 => {
                term.write_line("Enter image URLs (empty line to finish):")?;
                let mut urls = Vec::new();
                loop {
                    let line: String = Input::new()
                        .with_prompt(format!("URL {}", urls.len() + 1))
                        .allow_empty(true)
                        .interact_text()?;
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        break;
                    }
                    urls.push(line);
                }

                if urls.is_empty() {
                    term.write_line("No URLs entered")?;
                    continue;
                }

                let (tx, mut rx) = mpsc::unbounded_channel();
                let (summary, _) = tokio::join!(runner.run(&urls, tx), async {
                    while let Some(event) = rx.recv().await {
                        match event {
                            BatchEvent::Started { index, total, url } => {
                                let _ = term.write_line(&format!(
                                    "\n[{}/{}] Processing: {}",
                                    index + 1,
                                    total,
                                    url
                                ));
                            }
                            BatchEvent::Finished { outcome, .. } => {
                                let _ = print_outcome(&term, &outcome);
                            }
                        }
                    }
                });

                term.write_line(&format!(
                    "\n{} {} saved, {} failed",
                    style("📊").cyan(),
                    summary.successful,
                    summary.failed
                ))?;
            }
            _ => {
                term.write_line("Thank you for using imgfetch!")?;
                break;
            }
        }
    }

    Ok(())
}
