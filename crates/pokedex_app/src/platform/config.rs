//! Application configuration, read from a RON file.
//!
//! A missing file means defaults; every field may be omitted.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;
use pokedex_engine::{ClientSettings, DEFAULT_BASE_URL};
use pokedex_logging::{dex_info, LogDestination};
use serde::Deserialize;

pub const CONFIG_FILENAME: &str = "pokedex.ron";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    /// `None` logs to the terminal instead of a file.
    pub log_file: Option<PathBuf>,
    /// Also mirror file logging to the terminal.
    pub log_to_terminal: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            page_size: client.page_size,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_response_bytes: client.max_bytes,
            log_file: Some(PathBuf::from("pokedex.log")),
            log_to_terminal: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read config {path:?}"));
            }
        };
        let config = Self::parse(&content).with_context(|| format!("invalid config {path:?}"))?;
        dex_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = ron::from_str(content)?;
        anyhow::ensure!(config.page_size > 0, "page_size must be positive");
        Ok(config)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_base_url.clone(),
            page_size: self.page_size,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
            ..ClientSettings::default()
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match (&self.log_file, self.log_to_terminal) {
            (Some(path), true) => LogDestination::Both(path.clone()),
            (Some(path), false) => LogDestination::File(path.clone()),
            (None, _) => LogDestination::Terminal,
        }
    }

    /// Unrecognised levels fall back to `Info`.
    pub fn log_level(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}
