// src/github/metadata.rs
// =============================================================================
// Repository metadata from the GitHub REST API.
//
// GET {api_base}/repos/{owner}/{name}
//
// Unauthenticated, so GitHub allows 60 requests an hour; sequential sweeps
// pause every few calls (see Config::pause_every).
// =============================================================================

use serde::{Deserialize, Serialize};

use super::fetch::Fetcher;
use super::repo::RepositoryReference;
use crate::error::Result;

/// The fields of `GET /repos/{owner}/{name}` the catalog uses
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RepoMetadata {
    pub full_name: String,
    #[serde(rename = "stargazers_count")]
    pub stars: u64,
    pub archived: bool,
    pub private: bool,
    pub description: Option<String>,
    pub topics: Vec<String>,
    pub default_branch: Option<String>,
    pub updated_at: Option<String>,
    pub language: Option<String>,
}

/// Fetches metadata for one repository
///
/// A missing repository comes back as `ScoutError::Status { status: 404 }`,
/// see `ScoutError::is_not_found`.
pub async fn fetch_metadata<F>(
    fetcher: &F,
    api_base_url: &str,
    repo: &RepositoryReference,
) -> Result<RepoMetadata>
where
    F: Fetcher + ?Sized,
{
    let url = format!(
        "{}/repos/{}/{}",
        api_base_url.trim_end_matches('/'),
        repo.owner(),
        repo.name()
    );

    let body = fetcher.get_json(&url).await?.into_body(&url)?;
    Ok(serde_json::from_str(&body)?)
}
