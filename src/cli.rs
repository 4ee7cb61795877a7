use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgfetch")]
#[command(about = "A tool for mindfully collecting images from the web")]
#[command(long_about = "
imgfetch downloads images over HTTP(S), checks response headers for anything
suspicious, skips images it has already saved (by content hash), and writes
them under a local directory with safe, collision-free filenames.

Examples:
  imgfetch fetch https://example.com/photo.jpg
  imgfetch batch https://a.example/1.png https://b.example/2.png
  imgfetch batch --file urls.txt --delay 2
  imgfetch interactive                 # menu-driven mode
  imgfetch list --long                 # what has been saved so far
")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the output directory for saved images
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a single image
    #[command(visible_alias = "f")]
    Fetch {
        /// Image URL (http:// or https://)
        url: String,
    },

    /// Fetch multiple images sequentially
    #[command(visible_alias = "b")]
    Batch {
        /// Image URLs
        urls: Vec<String>,

        /// Read URLs from a file, one per line
        #[arg(short, long, value_name = "FILE")]
        #[arg(help = "Read URLs from a file (one per line, # comments allowed)")]
        file: Option<PathBuf>,

        /// Seconds to wait between requests
        #[arg(short, long, value_name = "SECS")]
        #[arg(help = "Seconds to wait between requests (default from config)")]
        delay: Option<u64>,
    },

    /// Interactive menu mode
    #[command(visible_alias = "i")]
    Interactive,

    /// List saved images
    #[command(visible_alias = "ls")]
    List {
        /// Show sizes and modification times
        #[arg(short = 'l', long)]
        long: bool,
    },

    /// Manage configuration
    #[command(visible_alias = "cfg")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the config file location
    Path,

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// True when the command will hit the network.
    pub fn requires_network(&self) -> bool {
        matches!(
            self.command,
            Commands::Fetch { .. } | Commands::Batch { .. } | Commands::Interactive
        )
    }
}
