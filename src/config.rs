// src/config.rs
// =============================================================================
// Scan configuration.
//
// Values come from three places, later ones winning:
// 1. Built-in defaults (the default_* functions below)
// 2. An optional TOML file (--config scan.toml)
// 3. Command-line flags
//
// Example scan.toml:
//   seed_url = "https://example.com"
//   max_pages = 25
//   politeness_delay_secs = 0.5
// =============================================================================

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, ScanError};

/// Everything the pipeline needs to run one scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanConfig {
    /// URL to start crawling from
    #[serde(default)]
    pub seed_url: String,

    /// Maximum number of pages to fetch successfully
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Pause before every fetch, in seconds
    #[serde(default = "default_politeness_delay")]
    pub politeness_delay_secs: f64,

    /// Per-request timeout, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// How many issues the priority list shows
    #[serde(default = "default_top_issues")]
    pub top_issues: usize,
}

fn default_max_pages() -> usize {
    50
}

fn default_politeness_delay() -> f64 {
    1.0
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "SEO-Scanner/1.0 (SEO Analysis Tool)".to_string()
}

fn default_top_issues() -> usize {
    10
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            seed_url: String::new(),
            max_pages: default_max_pages(),
            politeness_delay_secs: default_politeness_delay(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            top_issues: default_top_issues(),
        }
    }
}

impl ScanConfig {
    /// Create a configuration with default values for the given seed.
    pub fn new(seed_url: &str) -> Self {
        Self {
            seed_url: seed_url.to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::from_file(path).unwrap_or_else(|e| {
            log::warn!("Failed to load config from {}: {}", path.display(), e);
            log::warn!("Using default configuration.");
            Self::default()
        })
    }

    /// Reject values the crawler can't work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(ScanError::config("max_pages must be at least 1"));
        }
        // Anything a Duration can't hold (NaN, negative, huge) is rejected
        if Duration::try_from_secs_f64(self.politeness_delay_secs).is_err() {
            return Err(ScanError::config(format!(
                "politeness_delay_secs must be a non-negative number of seconds, got {}",
                self.politeness_delay_secs
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ScanError::config("timeout_secs must be at least 1"));
        }
        Ok(())
    }

    /// The politeness delay as a Duration. Out of range values (which
    /// `validate` rejects) give no delay.
    pub fn politeness_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.politeness_delay_secs).unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::new("https://example.com");
        assert_eq!(config.seed_url, "https://example.com");
        assert_eq!(config.max_pages, 50);
        assert_eq!(config.politeness_delay(), Duration::from_secs(1));
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_fills_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed_url = \"https://example.com\"").unwrap();
        writeln!(file, "max_pages = 5").unwrap();
        writeln!(file, "politeness_delay_secs = 0.25").unwrap();

        let config = ScanConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.politeness_delay(), Duration::from_millis(250));
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.top_issues, 10);
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_pages = \"lots\"").unwrap();
        assert!(matches!(
            ScanConfig::from_file(file.path()),
            Err(ScanError::Toml(_))
        ));
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScanConfig::load_or_default(dir.path().join("missing.toml"));
        assert_eq!(config, ScanConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_budget_and_negative_delay() {
        let mut config = ScanConfig::new("https://example.com");
        config.max_pages = 0;
        assert!(matches!(config.validate(), Err(ScanError::Config(_))));

        let mut config = ScanConfig::new("https://example.com");
        config.politeness_delay_secs = -1.0;
        assert!(config.validate().is_err());

        config.politeness_delay_secs = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_delay_too_large_for_a_duration() {
        let mut config = ScanConfig::new("https://example.com");
        config.politeness_delay_secs = 1e20;
        assert!(matches!(config.validate(), Err(ScanError::Config(_))));
        // Doesn't panic even when validate was skipped
        assert_eq!(config.politeness_delay(), Duration::ZERO);
    }

    #[test]
    fn test_huge_delay_from_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "politeness_delay_secs = 1e20").unwrap();

        let config = ScanConfig::from_file(file.path()).unwrap();
        assert!(matches!(config.validate(), Err(ScanError::Config(_))));
    }
}
