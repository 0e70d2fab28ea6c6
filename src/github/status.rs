// src/github/status.rs
// =============================================================================
// Repository health check.
//
// For each catalogued repository we want to know:
// - does it still exist? (deleted repos should leave the catalog)
// - is it archived? (still listed, but worth flagging)
// - where does its README actually live? Many posts were generated with a
//   hard-coded `/master/README.md` include that 404s once a project moves
//   to `main`.
// =============================================================================

use serde::Serialize;
use tracing::{debug, warn};

use super::fetch::{Fetcher, ReadmeLocator};
use super::metadata::fetch_metadata;
use super::repo::RepositoryReference;

/// Branches tried after the default branch
pub const FALLBACK_BRANCHES: [&str; 4] = ["main", "master", "develop", "dev"];

/// Outcome of checking one repository
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepoStatus {
    /// README located
    Found {
        readme_url: String,
        branch: String,
        archived: bool,
        stars: u64,
        /// Set when the README is not on the default branch
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    /// Repository exists but no README candidate answered
    NoReadme { archived: bool, stars: u64 },
    /// Repository is private
    Private,
    /// GitHub answered 404
    NotFound,
    /// Anything else (rate limit, network, bad JSON)
    Error { message: String },
}

impl RepoStatus {
    /// Short label for tables and summaries
    pub fn label(&self) -> &'static str {
        match self {
            RepoStatus::Found { .. } => "found",
            RepoStatus::NoReadme { .. } => "no_readme",
            RepoStatus::Private => "private",
            RepoStatus::NotFound => "not_found",
            RepoStatus::Error { .. } => "error",
        }
    }

    /// True when a human has to look at the repository
    pub fn needs_attention(&self) -> bool {
        !matches!(self, RepoStatus::Found { .. })
    }
}

/// One row of the check report
#[derive(Debug, Clone, Serialize)]
pub struct RepoCheck {
    pub repository: RepositoryReference,
    #[serde(flatten)]
    pub status: RepoStatus,
}

/// Checks one repository: metadata first, then the README search
pub async fn check_repository<F>(
    fetcher: &F,
    api_base_url: &str,
    locator: &ReadmeLocator,
    repo: RepositoryReference,
) -> RepoCheck
where
    F: Fetcher + ?Sized,
{
    let meta = match fetch_metadata(fetcher, api_base_url, &repo).await {
        Ok(meta) => meta,
        Err(e) if e.is_not_found() => {
            return RepoCheck {
                repository: repo,
                status: RepoStatus::NotFound,
            }
        }
        Err(e) => {
            warn!("Could not check {}: {}", repo, e);
            return RepoCheck {
                repository: repo,
                status: RepoStatus::Error {
                    message: e.to_string(),
                },
            };
        }
    };

    if meta.private {
        return RepoCheck {
            repository: repo,
            status: RepoStatus::Private,
        };
    }

    let default_branch = meta.default_branch.as_deref().unwrap_or("main");
    debug!("{}: default branch {}", repo, default_branch);

    let status = match locator
        .preferring(default_branch, &FALLBACK_BRANCHES)
        .fetch(fetcher, &repo)
        .await
    {
        Some(readme) => {
            let note = (readme.branch != default_branch)
                .then(|| format!("Found in '{}' branch (not default)", readme.branch));
            RepoStatus::Found {
                readme_url: readme.url,
                branch: readme.branch,
                archived: meta.archived,
                stars: meta.stars,
                note,
            }
        }
        None => RepoStatus::NoReadme {
            archived: meta.archived,
            stars: meta.stars,
        },
    };

    RepoCheck {
        repository: repo,
        status,
    }
}
