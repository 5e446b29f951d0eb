//! Report configuration loaded from TOML

use crate::cache::DEFAULT_TTL_HOURS;
use crate::error::{Result, TrendError};
use crate::models::{ForecastMethod, DEFAULT_ALPHA};
use crate::utils::validate_currency_code;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output format of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(TrendError::InvalidParameter(format!(
                "unknown output format: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default = "default_target")]
    pub target: String,
    /// Days of history to analyse
    #[serde(default = "default_days")]
    pub days: u32,
    /// Days to forecast; 0 disables forecasting
    #[serde(default = "default_predict")]
    pub predict: usize,
    #[serde(default = "default_format")]
    pub format: OutputFormat,
    #[serde(default = "default_method")]
    pub method: ForecastMethod,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: i64,
}

fn default_base() -> String {
    "EUR".to_string()
}
fn default_target() -> String {
    "GBP".to_string()
}
fn default_days() -> u32 {
    30
}
fn default_predict() -> usize {
    7
}
fn default_format() -> OutputFormat {
    OutputFormat::Text
}
fn default_method() -> ForecastMethod {
    ForecastMethod::Combined
}
fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}
fn default_cache_enabled() -> bool {
    true
}
fn default_cache_dir() -> PathBuf {
    PathBuf::from("./data/cache")
}
fn default_ttl_hours() -> i64 {
    DEFAULT_TTL_HOURS
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            dir: default_cache_dir(),
            ttl_hours: default_ttl_hours(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            target: default_target(),
            days: default_days(),
            predict: default_predict(),
            format: default_format(),
            method: default_method(),
            alpha: default_alpha(),
            cache: CacheConfig::default(),
        }
    }
}

impl CacheConfig {
    /// Time-to-live as a duration
    pub fn ttl(&self) -> Result<Duration> {
        if self.ttl_hours < 0 {
            return Err(TrendError::InvalidParameter(
                "cache ttl_hours cannot be negative".to_string(),
            ));
        }
        Duration::try_hours(self.ttl_hours).ok_or_else(|| {
            TrendError::InvalidParameter(format!("cache ttl_hours out of range: {}", self.ttl_hours))
        })
    }
}

impl ReportConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject values the report cannot work with
    pub fn validate(&self) -> Result<()> {
        if !validate_currency_code(&self.base) {
            return Err(TrendError::InvalidParameter(format!(
                "Invalid base currency: {}",
                self.base
            )));
        }
        if !validate_currency_code(&self.target) {
            return Err(TrendError::InvalidParameter(format!(
                "Invalid target currency: {}",
                self.target
            )));
        }
        if self.days == 0 {
            return Err(TrendError::InvalidParameter(
                "days must be greater than zero".to_string(),
            ));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(TrendError::InvalidParameter(format!(
                "alpha must be between 0 and 1, got {}",
                self.alpha
            )));
        }
        self.cache.ttl()?;
        Ok(())
    }
}
