//! Application configuration
//!
//! Loaded from `config.toml` in the platform data directory
//! (`~/.local/share/nivesh` on Linux). Environment variables
//! `NIVESH_BACKEND_URL` and `NIVESH_API_KEY` override the file, so the CLI
//! works without a config file in scripted environments.
//!
//! ```toml
//! backend_url = "https://abc123.backend.example.com"
//! api_key = "publishable-key"
//! epf_monthly_amount = 1800.0
//! currency = "₹"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::reconcile::DEFAULT_EPF_AMOUNT;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the hosted backend (auth + row API share it)
    #[serde(default)]
    pub backend_url: String,
    /// Publishable API key sent with every request
    #[serde(default)]
    pub api_key: String,
    /// Monthly EPF contribution the reconciler inserts
    #[serde(default = "default_epf_amount")]
    pub epf_monthly_amount: f64,
    /// Currency symbol for display
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_epf_amount() -> f64 {
    DEFAULT_EPF_AMOUNT
}

fn default_currency() -> String {
    "₹".to_string()
}

/// Data directory for config and session files
pub fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join("nivesh"))
        .ok_or_else(|| Error::Config("Could not determine platform data directory".to_string()))
}

fn config_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("config.toml"))
}

impl Config {
    /// Load config from the default location, applying environment overrides
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self {
                backend_url: String::new(),
                api_key: String::new(),
                epf_monthly_amount: DEFAULT_EPF_AMOUNT,
                currency: default_currency(),
            }
        };

        if let Ok(url) = std::env::var("NIVESH_BACKEND_URL") {
            config.backend_url = url;
        }
        if let Ok(key) = std::env::var("NIVESH_API_KEY") {
            config.api_key = key;
        }

        if config.backend_url.is_empty() || config.api_key.is_empty() {
            return Err(Error::Config(format!(
                "backend_url and api_key must be set in {} (or via NIVESH_BACKEND_URL / NIVESH_API_KEY)",
                path.display()
            )));
        }

        Ok(config)
    }

    /// Parse a config file without environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
backend_url = "https://demo.backend.example.com"
api_key = "pk-123"
epf_monthly_amount = 2400.0
currency = "INR "
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.backend_url, "https://demo.backend.example.com");
        assert_eq!(config.api_key, "pk-123");
        assert_eq!(config.epf_monthly_amount, 2400.0);
        assert_eq!(config.currency, "INR ");
    }

    #[test]
    fn test_load_from_applies_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
backend_url = "https://demo.backend.example.com"
api_key = "pk-123"
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.epf_monthly_amount, DEFAULT_EPF_AMOUNT);
        assert_eq!(config.currency, "₹");
    }

    #[test]
    fn test_load_from_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "backend_url = [not toml").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
