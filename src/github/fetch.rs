// src/github/fetch.rs
// =============================================================================
// Fetching files from GitHub repositories.
//
// Strategy:
// - raw.githubusercontent.com serves file contents without authentication
// - Repositories disagree on both the branch name (master/main/develop) and
//   the README spelling (README.md/readme.md/Readme.md/...)
// - So we walk an ordered list of (branch, filename) candidates and stop at
//   the first one that answers 2xx
//
// The HTTP layer sits behind the `Fetcher` trait. The real implementation
// wraps a reqwest Client; tests plug in an in-memory map instead.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::repo::RepositoryReference;
use crate::config::Config;
use crate::error::{Result, ScoutError};

/// Status and body of a completed GET
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-2xx answer into an error, keeping the body otherwise
    pub fn into_body(self, url: &str) -> Result<String> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(ScoutError::Status {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

/// The one HTTP capability the catalog needs: GET a URL as text
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url`. Transport failures (timeouts, DNS, TLS) are errors;
    /// any HTTP status, including 404, is a response.
    async fn get(&self, url: &str) -> Result<FetchResponse>;

    /// GET a GitHub REST API resource
    async fn get_json(&self, url: &str) -> Result<FetchResponse> {
        self.get(url).await
    }
}

/// Fetcher backed by a shared reqwest Client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a client with a fixed User-Agent and per-request timeout
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(user_agent)
            .map_err(|e| ScoutError::Config(format!("Invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, agent);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.user_agent, config.timeout())
    }

    /// The underlying client, for binary downloads
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    }

    async fn get_json(&self, url: &str) -> Result<FetchResponse> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github.v3+json")
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    }
}

/// One (branch, filename) pair tried when searching for a README
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLocation {
    pub branch: String,
    pub filename: String,
}

/// The first README that could be fetched
#[derive(Debug, Clone)]
pub struct ReadmeDocument {
    pub branch: String,
    pub filename: String,
    pub url: String,
    pub body: String,
}

/// Knows where READMEs may live and how to fetch them
#[derive(Debug, Clone)]
pub struct ReadmeLocator {
    raw_base_url: String,
    branches: Vec<String>,
    readme_names: Vec<String>,
}

impl ReadmeLocator {
    pub fn new(raw_base_url: &str, branches: Vec<String>, readme_names: Vec<String>) -> Self {
        Self {
            raw_base_url: raw_base_url.trim_end_matches('/').to_string(),
            branches,
            readme_names,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.raw_base_url,
            config.branches.clone(),
            config.readme_names.clone(),
        )
    }

    /// Same locator, but `branch` is tried first
    ///
    /// `fallbacks` are appended after it; duplicates are dropped so a branch
    /// is never fetched twice.
    pub fn preferring(&self, branch: &str, fallbacks: &[&str]) -> Self {
        let mut branches: Vec<String> = Vec::new();
        for b in std::iter::once(branch).chain(fallbacks.iter().copied()) {
            if !branches.iter().any(|existing| existing == b) {
                branches.push(b.to_string());
            }
        }

        Self {
            raw_base_url: self.raw_base_url.clone(),
            branches,
            readme_names: self.readme_names.clone(),
        }
    }

    /// Every (branch, filename) pair, branch-major, in preference order
    pub fn candidates(&self) -> Vec<CandidateLocation> {
        self.branches
            .iter()
            .flat_map(|branch| {
                self.readme_names.iter().map(move |filename| CandidateLocation {
                    branch: branch.clone(),
                    filename: filename.clone(),
                })
            })
            .collect()
    }

    /// Raw URL of one file on one branch
    pub fn raw_url(&self, repo: &RepositoryReference, branch: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base_url,
            repo.owner(),
            repo.name(),
            branch,
            filename
        )
    }

    /// Directory URL that repo-relative paths on `branch` resolve against
    ///
    /// Always ends with '/', so Url::join appends instead of replacing the
    /// last segment.
    pub fn branch_base(&self, repo: &RepositoryReference, branch: &str) -> Result<Url> {
        let base = format!(
            "{}/{}/{}/{}/",
            self.raw_base_url,
            repo.owner(),
            repo.name(),
            branch
        );
        Ok(Url::parse(&base)?)
    }

    /// Tries each candidate in order; returns the first README that loads
    ///
    /// Errors and non-2xx answers just move on to the next candidate.
    pub async fn fetch<F>(&self, fetcher: &F, repo: &RepositoryReference) -> Option<ReadmeDocument>
    where
        F: Fetcher + ?Sized,
    {
        for candidate in self.candidates() {
            let url = self.raw_url(repo, &candidate.branch, &candidate.filename);

            match fetcher.get(&url).await {
                Ok(response) if response.is_success() => {
                    debug!("README found at {}", url);
                    return Some(ReadmeDocument {
                        branch: candidate.branch,
                        filename: candidate.filename,
                        url,
                        body: response.body,
                    });
                }
                Ok(response) => {
                    debug!("{} -> HTTP {}", url, response.status);
                }
                Err(e) => {
                    debug!("{} -> {}", url, e);
                }
            }
        }

        None
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a trait for fetching?
//    - The resolver only needs "GET this URL, give me status + text"
//    - Tests can answer from a HashMap instead of the network
//    - #[async_trait] is needed because the trait is used behind `&dyn`
//      and generics alike
//
// 2. Why `F: Fetcher + ?Sized`?
//    - ?Sized lets callers pass `&dyn Fetcher` as well as concrete types
// -----------------------------------------------------------------------------
