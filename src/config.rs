use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_pacing_delay_secs")]
    pub pacing_delay_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

// Default value functions
fn default_output_dir() -> String {
    "Fetched_Images".to_string()
}
fn default_pacing_delay_secs() -> u64 {
    1
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    format!(
        "imgfetch/{} (respectful image fetcher)",
        env!("CARGO_PKG_VERSION")
    )
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            pacing_delay_secs: default_pacing_delay_secs(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

pub struct ConfigManager {
    config_file: PathBuf,
    config: Config,
}

impl ConfigManager {
    /// Create a new ConfigManager and load existing config or create default
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "imgfetch")
            .context("Failed to determine config directory")?;

        let config_dir = project_dirs.config_dir().to_path_buf();
        let config_file = config_dir.join("config.toml");

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
        }

        let config = if config_file.exists() {
            Self::load_config(&config_file)?
        } else {
            let default_config = Config::default();
            Self::save_config(&config_file, &default_config)?;
            default_config
        };

        Ok(Self {
            config_file,
            config,
        })
    }

    /// Get a reference to the current config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the config file path
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Save the current config to disk
    pub fn save(&self) -> Result<()> {
        Self::save_config(&self.config_file, &self.config)
    }

    /// Replace the current config with defaults and persist them
    pub fn reset(&mut self) -> Result<()> {
        self.config = Config::default();
        self.save()
    }

    /// Validate the current configuration
    pub fn validate(&self) -> Result<()> {
        if self.config.general.output_dir.is_empty() {
            anyhow::bail!("output_dir cannot be empty");
        }

        if self.config.http.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }

        if self.config.http.user_agent.is_empty() {
            anyhow::bail!("user_agent cannot be empty");
        }

        Ok(())
    }

    fn load_config(config_file: &Path) -> Result<Config> {
        let content = fs::read_to_string(config_file)
            .with_context(|| format!("Failed to read config file: {:?}", config_file))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_file))?;

        Ok(config)
    }

    fn save_config(config_file: &Path, config: &Config) -> Result<()> {
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(config_file, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_file))?;

        Ok(())
    }
}
