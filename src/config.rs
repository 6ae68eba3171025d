use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Runtime configuration for the client and CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    /// Buyer account used for favorites and interests
    pub buyer_id: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!("terralink/", env!("CARGO_PKG_VERSION")).to_string(),
            log_level: "info".to_string(),
            buyer_id: None,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `~/.terralink/config.toml`
    /// is used when present, otherwise defaults. Environment overrides are
    /// applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).context("Failed to parse config file (invalid TOML)")
    }

    /// `~/.terralink/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".terralink/config.toml")
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = env::var("TERRALINK_API_URL") {
            self.api_base_url = url;
        }
        if let Ok(level) = env::var("TERRALINK_LOG") {
            self.log_level = level;
        }
        if let Ok(buyer) = env::var("TERRALINK_BUYER_ID") {
            let id = buyer
                .trim()
                .parse()
                .with_context(|| format!("TERRALINK_BUYER_ID is not a number: {}", buyer))?;
            self.buyer_id = Some(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base_url = \"https://api.example.test\"").unwrap();
        writeln!(file, "buyer_id = 7").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.test");
        assert_eq!(config.buyer_id, Some(7));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = \"soon\"").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        assert!(Config::load(Some(Path::new("/nonexistent/terralink.toml"))).is_err());
    }
}
