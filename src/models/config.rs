//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Atlas endpoint and HTTP behavior
    #[serde(default)]
    pub atlas: AtlasConfig,

    /// Response parsing policy
    #[serde(default)]
    pub parsing: ParsingConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Progress reporting
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.atlas.user_agent.trim().is_empty() {
            return Err(AppError::validation("atlas.user_agent is empty"));
        }
        if self.atlas.timeout_secs == 0 {
            return Err(AppError::validation("atlas.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.atlas.base_url).map_err(|e| {
            AppError::validation(format!(
                "atlas.base_url '{}' is not a URL: {}",
                self.atlas.base_url, e
            ))
        })?;
        if self.output.prefix.trim().is_empty() {
            return Err(AppError::validation("output.prefix is empty"));
        }
        if self.logging.progress_interval == 0 {
            return Err(AppError::validation(
                "logging.progress_interval must be > 0",
            ));
        }
        Ok(())
    }
}

/// Atlas endpoint and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Page queried with `?fbgn=<id>&tableOut=gene`
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// How a tissue-set mismatch in a response is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Report the mismatch and build a best-effort record
    #[default]
    Lenient,
    /// Fail the identifier
    Strict,
}

/// Response parsing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsingConfig {
    #[serde(default)]
    pub mode: ParseMode,
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Prefix shared by all output files
    #[serde(default = "defaults::prefix")]
    pub prefix: String,

    /// Process identifiers in sorted order for reproducible row order
    #[serde(default)]
    pub sort_identifiers: bool,

    /// Also write `<prefix>-summary.json` with run statistics
    #[serde(default)]
    pub write_summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: defaults::prefix(),
            sort_identifiers: false,
            write_summary: false,
        }
    }
}

/// Progress reporting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log progress every N identifiers
    #[serde(default = "defaults::progress_interval")]
    pub progress_interval: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            progress_interval: defaults::progress_interval(),
        }
    }
}

mod defaults {
    pub fn base_url() -> String {
        "http://flyatlas.gla.ac.uk/FA2Direct/index.html".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; atlas-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        0
    }
    pub fn prefix() -> String {
        "myFlyAtlas2Queries".into()
    }
    pub fn progress_interval() -> usize {
        100
    }
}
