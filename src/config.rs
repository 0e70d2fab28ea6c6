// src/config.rs
// =============================================================================
// Tool configuration.
//
// Every setting has a sensible default, so the tool works with no config
// file at all. A `catalog-scout.toml` in the working directory (or the file
// passed with --config) can override any subset of fields.
//
// Example catalog-scout.toml:
//
//   posts_dir = "_posts"
//   concurrency = 8
//   branches = ["main", "master"]
// =============================================================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, ScoutError};

/// File looked up in the working directory when --config is not given
pub const DEFAULT_CONFIG_FILE: &str = "catalog-scout.toml";

/// All knobs the commands read
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the Jekyll post records
    pub posts_dir: PathBuf,
    /// Directory holding downloaded post images
    pub images_dir: PathBuf,
    /// Host serving raw repository files
    pub raw_base_url: String,
    /// GitHub REST API root
    pub api_base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Per-request timeout for README and API fetches
    pub timeout_secs: u64,
    /// Per-request timeout for image downloads
    pub download_timeout_secs: u64,
    /// How many repositories are processed at once
    pub concurrency: usize,
    /// Branches tried, in order, when looking for a README
    pub branches: Vec<String>,
    /// README file names tried on each branch, in order
    pub readme_names: Vec<String>,
    /// Sequential sweeps pause after this many API calls
    pub pause_every: usize,
    /// Length of that pause in milliseconds
    pub pause_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("_posts"),
            images_dir: PathBuf::from("images/posts"),
            raw_base_url: "https://raw.githubusercontent.com".to_string(),
            api_base_url: "https://api.github.com".to_string(),
            user_agent: "AndroidUICollection/1.0".to_string(),
            timeout_secs: 10,
            download_timeout_secs: 30,
            concurrency: 5,
            branches: vec!["master".into(), "main".into(), "develop".into()],
            readme_names: vec![
                "README.md".into(),
                "readme.md".into(),
                "Readme.md".into(),
                "README.MD".into(),
                "README.markdown".into(),
                "README".into(),
                "readme".into(),
                "readme.markdown".into(),
            ],
            pause_every: 10,
            pause_ms: 1000,
        }
    }
}

impl Config {
    /// Loads the configuration
    ///
    /// - explicit path: the file must exist
    /// - no path: `catalog-scout.toml` is used if present, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScoutError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parses a TOML document; missing fields fall back to defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ScoutError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Rejects settings the commands cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(ScoutError::Config("concurrency must be at least 1".into()));
        }
        if self.branches.is_empty() {
            return Err(ScoutError::Config("branches must not be empty".into()));
        }
        if self.readme_names.is_empty() {
            return Err(ScoutError::Config("readme_names must not be empty".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml("concurrency = 8\nbranches = [\"main\"]").unwrap();
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.branches, vec!["main"]);
        assert_eq!(config.posts_dir, PathBuf::from("_posts"));
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_default_branch_order() {
        let config = Config::default();
        assert_eq!(config.branches, vec!["master", "main", "develop"]);
        assert_eq!(config.readme_names[0], "README.md");
        // extensionless names come last
        assert_eq!(
            &config.readme_names[5..],
            &["README", "readme", "readme.markdown"]
        );
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = Config {
            concurrency: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml("concurrency = \"lots\"").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scout.toml");
        std::fs::write(&path, "posts_dir = \"content/_posts\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.posts_dir, PathBuf::from("content/_posts"));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
