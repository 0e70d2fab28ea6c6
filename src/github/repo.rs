// src/github/repo.rs
// =============================================================================
// Identifying a GitHub repository.
//
// Post records store a full link ("https://github.com/skydoves/cloudy"),
// the CLI accepts either that or the short "skydoves/cloudy" form. Both end
// up as a RepositoryReference.
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScoutError};

// owner/name right after "github.com/", anywhere in a string
static GITHUB_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"github\.com/([^/\s'\x22]+)/([^/\s'\x22?#)]+)").expect("valid regex"));

/// An (owner, name) pair identifying a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepositoryReference {
    owner: String,
    name: String,
}

impl RepositoryReference {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parses a GitHub URL
    ///
    /// Supported formats:
    ///   - https://github.com/owner/repo
    ///   - https://github.com/owner/repo.git
    ///   - https://github.com/owner/repo/tree/main/docs (extra segments ignored)
    ///   - github.com/owner/repo
    pub fn from_url(url: &str) -> Result<Self> {
        let trimmed = url
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_start_matches("www.");

        let path = trimmed
            .strip_prefix("github.com/")
            .ok_or_else(|| ScoutError::InvalidRepository(url.to_string()))?;

        let mut parts = path.split('/').filter(|p| !p.is_empty());
        let owner = parts.next();
        let name = parts.next();

        match (owner, name) {
            (Some(owner), Some(name)) => Ok(Self::new(owner, clean_name(name))),
            _ => Err(ScoutError::InvalidRepository(url.to_string())),
        }
    }

    /// Finds the first github.com/owner/name inside arbitrary text
    ///
    /// Used on post bodies, where the link might only appear inside the
    /// remote_markdown include.
    pub fn find_in(text: &str) -> Option<Self> {
        let caps = GITHUB_PATH.captures(text)?;
        Some(Self::new(&caps[1], clean_name(&caps[2])))
    }

    /// Browser URL of the repository
    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

// "repo.git" -> "repo", "repo?tab=readme" -> "repo"
fn clean_name(name: &str) -> &str {
    name.split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or(name)
        .trim_end_matches(".git")
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// Serialized as "owner/name" so JSON reports stay flat
impl Serialize for RepositoryReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for RepositoryReference {
    type Err = ScoutError;

    /// Accepts "owner/name" or any URL form `from_url` understands
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.contains("github.com") {
            return Self::from_url(s);
        }

        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, clean_name(name)))
            }
            _ => Err(ScoutError::InvalidRepository(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_url() {
        let repo = RepositoryReference::from_url("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(repo.owner(), "rust-lang");
        assert_eq!(repo.name(), "rust");
    }

    #[test]
    fn test_parse_github_url_with_git() {
        let repo = RepositoryReference::from_url("https://github.com/user/repo.git").unwrap();
        assert_eq!(repo.to_string(), "user/repo");
    }

    #[test]
    fn test_parse_github_url_with_extra_segments() {
        let repo =
            RepositoryReference::from_url("https://github.com/skydoves/cloudy/tree/main/").unwrap();
        assert_eq!(repo.to_string(), "skydoves/cloudy");
    }

    #[test]
    fn test_parse_invalid_url() {
        assert!(RepositoryReference::from_url("https://gitlab.com/user/repo").is_err());
        assert!(RepositoryReference::from_url("https://github.com/user").is_err());
    }

    #[test]
    fn test_from_str_short_form() {
        let repo: RepositoryReference = "TEAM-PREAT/peekaboo".parse().unwrap();
        assert_eq!(repo.owner(), "TEAM-PREAT");
        assert_eq!(repo.html_url(), "https://github.com/TEAM-PREAT/peekaboo");

        assert!("peekaboo".parse::<RepositoryReference>().is_err());
        assert!("a/b/c".parse::<RepositoryReference>().is_err());
    }

    #[test]
    fn test_find_in_text() {
        let text = "{% remote_markdown https://raw.githubusercontent.com/x/y/master/README.md %}\n\
                    link: 'https://github.com/skydoves/landscapist'";
        let repo = RepositoryReference::find_in(text).unwrap();
        assert_eq!(repo.to_string(), "skydoves/landscapist");

        assert!(RepositoryReference::find_in("no links here").is_none());
    }
}
