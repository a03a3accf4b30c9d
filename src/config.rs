use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::http::{BROWSER_USER_AGENT, DEFAULT_TIMEOUT};
use crate::invidious::DEFAULT_MIRRORS;
use crate::ranking::RANKING_POOL_SIZE;

/// Search defaults that can be saved to a file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirrors: Option<Vec<String>>,
}

impl Config {
    /// Create a new empty config
    pub fn new() -> Self {
        Config {
            user_agent: None,
            timeout_secs: None,
            max_results: None,
            mirrors: None,
        }
    }

    /// Get the config file path (~/.state/tabfetch/defaults.toml)
    pub fn get_config_path() -> Result<PathBuf, ConfigError> {
        let home = std::env::var("HOME").map_err(|_| ConfigError::HomeNotSet)?;
        Ok(Path::new(&home).join(".state").join("tabfetch").join("defaults.toml"))
    }

    /// Load config from the default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load config from `path`; a missing file is an empty config
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::new());
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Merge this config with another, preferring values from other
    pub fn merge(&mut self, other: &Config) {
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent.clone();
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.max_results.is_some() {
            self.max_results = other.max_results;
        }
        if other.mirrors.is_some() {
            self.mirrors = other.mirrors.clone();
        }
    }

    // ── Effective values ─────────────────────────────────────────────────

    pub fn user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| BROWSER_USER_AGENT.to_string())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs.map(Duration::from_secs).unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn max_results(&self) -> usize {
        self.max_results.unwrap_or(RANKING_POOL_SIZE)
    }

    pub fn mirrors(&self) -> Vec<String> {
        match &self.mirrors {
            Some(m) if !m.is_empty() => m.clone(),
            _ => DEFAULT_MIRRORS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Print the config in a human-readable format
    pub fn print(&self, title: &str) {
        println!("{}:", title);
        println!("  User agent:   {}", self.user_agent());
        println!("  Timeout:      {} seconds", self.timeout().as_secs());
        println!("  Max results:  {}", self.max_results());
        println!("  Mirrors:");
        for mirror in self.mirrors() {
            println!("    {}", mirror);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_defaults() {
        let config = Config::new();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_results(), 15);
        assert_eq!(config.mirrors().len(), DEFAULT_MIRRORS.len());
        assert!(config.user_agent().starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_empty_mirror_list_uses_defaults() {
        let config = Config { mirrors: Some(Vec::new()), ..Config::new() };
        assert_eq!(config.mirrors()[0], DEFAULT_MIRRORS[0]);
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            timeout_secs: Some(5),
            max_results: Some(20),
            ..Config::new()
        };
        let other = Config {
            timeout_secs: Some(30),
            mirrors: Some(vec!["https://mirror.example".to_string()]),
            ..Config::new()
        };
        base.merge(&other);

        assert_eq!(base.timeout_secs, Some(30));
        assert_eq!(base.max_results, Some(20));
        assert_eq!(base.mirrors(), vec!["https://mirror.example".to_string()]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("defaults.toml");

        let config = Config {
            timeout_secs: Some(3),
            mirrors: Some(vec!["https://a.example".to_string(), "https://b.example".to_string()]),
            ..Config::new()
        };
        config.save_to(&path).unwrap();

        let saved = fs::read_to_string(&path).unwrap();
        assert!(!saved.contains("user_agent"));
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::new());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defaults.toml");
        fs::write(&path, "timeout_secs = \"soon\"").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
    }
}
