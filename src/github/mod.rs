// src/github/mod.rs
// =============================================================================
// Everything that talks to GitHub.
//
// - repo: parsing owner/name out of URLs and post bodies
// - fetch: the Fetcher trait, its reqwest implementation, README search
// - metadata: GET /repos/{owner}/{name}
// - status: existence / archived / README location report
// =============================================================================

mod fetch;
mod metadata;
mod repo;
mod status;

pub use fetch::{Fetcher, HttpFetcher, ReadmeLocator};
pub use metadata::{fetch_metadata, RepoMetadata};
pub use repo::RepositoryReference;
pub use status::{check_repository, RepoCheck, RepoStatus};

#[cfg(test)]
pub(crate) use fetch::tests::{FailingFetcher, StaticFetcher};
