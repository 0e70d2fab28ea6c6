// src/resolver/mod.rs
// =============================================================================
// README image resolver.
//
// Given a repository, find one picture that shows what the library looks
// like. GIFs win because they show the component moving.
//
//   1. fetch the README from the first (branch, filename) that answers
//   2. scan it for image references (see scan.rs)
//   3. resolve relative paths against the branch the README came from
//
// Every failure - no README anywhere, no image in it - comes back as None,
// which callers report as "manual image needed". Nothing is written here;
// downloading and updating posts is the caller's job.
// =============================================================================

mod image;
mod scan;

pub use image::{ImageCandidate, ImageExtension};
pub use scan::scan_readme;

use tracing::{debug, info};

use crate::github::{Fetcher, ReadmeLocator, RepositoryReference};

/// Resolves the illustrative image of a repository's README
pub struct ImageResolver<F> {
    fetcher: F,
    locator: ReadmeLocator,
}

impl<F: Fetcher> ImageResolver<F> {
    pub fn new(fetcher: F, locator: ReadmeLocator) -> Self {
        Self { fetcher, locator }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns the preferred image, or None when nothing usable was found
    pub async fn resolve(&self, repo: &RepositoryReference) -> Option<ImageCandidate> {
        let readme = match self.locator.fetch(&self.fetcher, repo).await {
            Some(readme) => readme,
            None => {
                info!("{}: no README at any candidate location", repo);
                return None;
            }
        };

        let base = self.locator.branch_base(repo, &readme.branch).ok()?;
        let found = scan_readme(&readme.body, &base);

        match &found {
            Some(image) => debug!(
                "{}: picked {} from {} on {}",
                repo, image.url, readme.filename, readme.branch
            ),
            None => info!("{}: no image referenced in {}", repo, readme.url),
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::github::{FailingFetcher, StaticFetcher};

    fn resolver(fetcher: StaticFetcher) -> ImageResolver<StaticFetcher> {
        ImageResolver::new(fetcher, ReadmeLocator::from_config(&Config::default()))
    }

    #[tokio::test]
    async fn test_master_readme_with_gif() {
        let fetcher = StaticFetcher::default().with(
            "https://raw.githubusercontent.com/o/n/master/README.md",
            "# n\n\n![demo](https://user-images.githubusercontent.com/1/demo.gif)",
        );

        let found = resolver(fetcher)
            .resolve(&RepositoryReference::new("o", "n"))
            .await
            .unwrap();
        assert_eq!(found.url, "https://user-images.githubusercontent.com/1/demo.gif");
        assert_eq!(found.extension, ImageExtension::Gif);
    }

    #[tokio::test]
    async fn test_relative_image_uses_branch_that_served_readme() {
        let fetcher = StaticFetcher::default().with(
            "https://raw.githubusercontent.com/o/n/main/README.md",
            "![demo](docs/demo.png)",
        );

        let found = resolver(fetcher)
            .resolve(&RepositoryReference::new("o", "n"))
            .await
            .unwrap();
        assert_eq!(
            found.url,
            "https://raw.githubusercontent.com/o/n/main/docs/demo.png"
        );
    }

    #[tokio::test]
    async fn test_erroring_branch_falls_through_to_next() {
        let fetcher = FailingFetcher {
            inner: StaticFetcher::default().with(
                "https://raw.githubusercontent.com/o/n/main/README.md",
                "![demo](art/demo.gif)",
            ),
            pattern: "/master/".to_string(),
        };
        let resolver = ImageResolver::new(fetcher, ReadmeLocator::from_config(&Config::default()));

        let found = resolver
            .resolve(&RepositoryReference::new("o", "n"))
            .await
            .unwrap();
        assert_eq!(
            found.url,
            "https://raw.githubusercontent.com/o/n/main/art/demo.gif"
        );
    }

    #[tokio::test]
    async fn test_no_readme_anywhere() {
        let resolver = resolver(StaticFetcher::default());
        assert!(resolver
            .resolve(&RepositoryReference::new("o", "gone"))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_readme_without_images() {
        let fetcher = StaticFetcher::default().with(
            "https://raw.githubusercontent.com/o/n/master/README.md",
            "# n\n\nJust words.",
        );
        let resolver = resolver(fetcher);
        assert!(resolver
            .resolve(&RepositoryReference::new("o", "n"))
            .await
            .is_none());

        // main is never consulted once master answered
        let requested = resolver.fetcher().requested.lock().unwrap();
        assert!(!requested.iter().any(|u| u.contains("/main/")));
    }

    #[tokio::test]
    async fn test_resolve_twice_same_answer() {
        let fetcher = StaticFetcher::default().with(
            "https://raw.githubusercontent.com/o/n/master/README.md",
            "![a](https://x.com/a.png) https://x.com/b.gif",
        );
        let resolver = resolver(fetcher);
        let repo = RepositoryReference::new("o", "n");

        let first = resolver.resolve(&repo).await;
        let second = resolver.resolve(&repo).await;
        assert_eq!(first, second);
        assert_eq!(first.unwrap().url, "https://x.com/b.gif");
    }
}
