mod cli;
mod handlers;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use imgfetch::config::ConfigManager;
use std::process;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize logging based on verbosity
    let verbose = args.verbose;
    if verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    let mut config_manager = ConfigManager::new()?;
    if let Err(e) = config_manager.validate() {
        eprintln!("Configuration validation failed: {}", e);
        eprintln!("Run 'imgfetch config reset' to restore defaults");
        process::exit(1);
    }

    let output_dir = args.output_dir.clone();

    match args.command {
        Commands::Fetch { url } => {
            handlers::handle_fetch(
                config_manager.config(),
                output_dir.as_deref(),
                url,
                verbose,
            )
            .await?;
        }
        Commands::Batch { urls, file, delay } => {
            handlers::handle_batch(
                config_manager.config(),
                output_dir.as_deref(),
                urls,
                file,
                delay,
                verbose,
            )
            .await?;
        }
        Commands::Interactive => {
            handlers::handle_interactive(config_manager.config(), output_dir.as_deref(), verbose)
                .await?;
        }
        Commands::List { long } => {
            handlers::handle_list(
                config_manager.config(),
                output_dir.as_deref(),
                long || verbose,
            )
            .await?;
        }
        Commands::Config { action } => {
            handlers::handle_config(&mut config_manager, action).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["imgfetch", "fetch", "https://example.com/a.png"]).unwrap();
        assert!(cli.requires_network());
        match cli.command {
            Commands::Fetch { url } => assert_eq!(url, "https://example.com/a.png"),
            _ => panic!("expected fetch command"),
        }

        let cli = Cli::try_parse_from(["imgfetch", "list", "--long"]).unwrap();
        assert!(!cli.requires_network());

        let cli = Cli::try_parse_from([
            "imgfetch", "batch", "-f", "urls.txt", "--delay", "2", "-o", "Pics",
        ])
        .unwrap();
        assert_eq!(cli.output_dir.as_deref(), Some("Pics"));
        match cli.command {
            Commands::Batch { urls, file, delay } => {
                assert!(urls.is_empty());
                assert_eq!(file.as_deref(), Some(std::path::Path::new("urls.txt")));
                assert_eq!(delay, Some(2));
            }
            _ => panic!("expected batch command"),
        }
    }

    #[test]
    fn test_cli_aliases() {
        use clap::Parser;

        assert!(Cli::try_parse_from(["imgfetch", "f", "https://example.com/a.png"]).is_ok());
        assert!(Cli::try_parse_from(["imgfetch", "ls"]).is_ok());
        assert!(Cli::try_parse_from(["imgfetch", "cfg", "show"]).is_ok());
    }
}
