//! Application configuration: an optional RON file overridden by CLI flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;
use vidiwise_engine::ServiceSettings;
use vidiwise_logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "vidiwise.ron";

#[derive(Debug, Parser)]
#[command(name = "vidiwise", version, about = "Ask questions about a video")]
pub struct Cli {
    /// Path of the RON configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Base URL of the processing service.
    #[arg(long)]
    pub server: Option<String>,
    /// Seconds between two status checks.
    #[arg(long)]
    pub poll_interval: Option<u64>,
    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
    /// Video URL to submit right away.
    pub url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub poll_interval_secs: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Log to `vidiwise.log` instead of the terminal, which the shell uses
    /// for its own output.
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let service = ServiceSettings::default();
        Self {
            server_url: service.base_url,
            poll_interval_secs: vidiwise_core::DEFAULT_POLL_INTERVAL.as_secs(),
            connect_timeout_secs: service.connect_timeout.as_secs(),
            request_timeout_secs: service.request_timeout.as_secs(),
            log_to_file: true,
        }
    }
}

impl AppConfig {
    /// Loads the file named by the CLI (defaults when it does not exist) and
    /// applies the CLI overrides.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = Self::load(&cli.config)?;
        if let Some(server) = &cli.server {
            config.server_url = server.clone();
        }
        if let Some(secs) = cli.poll_interval {
            config.poll_interval_secs = secs;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_url.trim().is_empty() {
            return Err(ConfigError::Invalid("server_url must not be empty".into()));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_secs must be at least 1".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            base_url: self.server_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        if self.log_to_file {
            LogDestination::default_file()
        } else {
            LogDestination::Terminal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("vidiwise").chain(args.iter().copied()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.server_url, "http://localhost:8080");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("vidiwise.ron");
        std::fs::write(&path, "(server_url: \"http://analysis:9000\", log_to_file: false)").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server_url, "http://analysis:9000");
        assert!(!config.log_to_file);
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.log_destination(), LogDestination::Terminal);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("vidiwise.ron");
        std::fs::write(&path, "(server_url: 42").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn cli_overrides_file_values() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("vidiwise.ron");
        std::fs::write(&path, "(server_url: \"http://file:1\", poll_interval_secs: 9)").unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let config = AppConfig::resolve(&cli(&[
            "--config",
            &path_arg,
            "--server",
            "http://cli:2",
        ]))
        .unwrap();
        assert_eq!(config.server_url, "http://cli:2");
        assert_eq!(config.poll_interval_secs, 9);

        let settings = config.service_settings();
        assert_eq!(settings.base_url, "http://cli:2");
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let temp = tempfile::TempDir::new().unwrap();
        let path_arg = temp.path().join("none.ron").to_string_lossy().into_owned();
        let err = AppConfig::resolve(&cli(&["--config", &path_arg, "--poll-interval", "0"]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn positional_url_is_captured() {
        let parsed = cli(&["-v", "https://youtu.be/abc"]);
        assert!(parsed.verbose);
        assert_eq!(parsed.url.as_deref(), Some("https://youtu.be/abc"));
        assert_eq!(parsed.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    }
}
