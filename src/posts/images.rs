// src/posts/images.rs
// =============================================================================
// Post images on disk.
//
// Posts point at `/images/posts/<file>`; the file lives in the images
// directory. A post whose file is absent needs a new picture: we resolve one
// from the README, download it, and - if the format changed, say .gif to
// .png - rename the post's image field to match.
// =============================================================================

use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use super::front_matter::PostRecord;
use crate::error::{Result, ScoutError};
use crate::resolver::ImageExtension;

/// Site path prefix of post images
pub const IMAGE_PREFIX: &str = "/images/posts/";

/// A post whose image file is absent
#[derive(Debug, Clone)]
pub struct MissingImage {
    pub post: PostRecord,
    /// File name from the front matter, e.g. "cloudy.gif"
    pub image_name: String,
}

impl MissingImage {
    /// File name to save under with the given format: "cloudy.gif" + Png -> "cloudy.png"
    pub fn file_name_for(&self, extension: ImageExtension) -> String {
        let stem = match self.image_name.rsplit_once('.') {
            Some((stem, _)) => stem,
            None => self.image_name.as_str(),
        };
        format!("{}.{}", stem, extension)
    }
}

/// Splits posts into (present image count, missing images)
///
/// Posts without an image field, or whose image is not under
/// /images/posts/, are not counted either way.
pub fn find_missing_images(posts: &[PostRecord], images_dir: &Path) -> (usize, Vec<MissingImage>) {
    let mut present = 0;
    let mut missing = Vec::new();

    for post in posts {
        let image_name = match post.image().and_then(|image| image.strip_prefix(IMAGE_PREFIX)) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        if images_dir.join(&image_name).exists() {
            present += 1;
        } else {
            missing.push(MissingImage {
                post: post.clone(),
                image_name,
            });
        }
    }

    (present, missing)
}

/// Downloads `url` into `dest`, creating the parent directory if needed
pub async fn download_image(client: &Client, url: &str, dest: &Path, timeout: Duration) -> Result<PathBuf> {
    let response = client.get(url).timeout(timeout).send().await?;
    if !response.status().is_success() {
        return Err(ScoutError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let bytes = response.bytes().await?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(dest, &bytes).await?;

    Ok(dest.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(name: &str, image: &str) -> PostRecord {
        PostRecord::new(name, format!("---\nimage: '{}'\n---\n", image))
    }

    #[test]
    fn test_find_missing_images() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("here.gif"), b"GIF89a").unwrap();

        let posts = vec![
            post("a.md", "/images/posts/here.gif"),
            post("b.md", "/images/posts/gone.gif"),
            post("c.md", "https://elsewhere.com/pic.png"),
        ];

        let (present, missing) = find_missing_images(&posts, dir.path());
        assert_eq!(present, 1);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].image_name, "gone.gif");
    }

    #[test]
    fn test_file_name_for_other_extension() {
        let missing = MissingImage {
            post: post("a.md", "/images/posts/Spring.Indicator.gif"),
            image_name: "Spring.Indicator.gif".to_string(),
        };
        assert_eq!(missing.file_name_for(ImageExtension::Png), "Spring.Indicator.png");
        assert_eq!(missing.file_name_for(ImageExtension::Gif), "Spring.Indicator.gif");
    }

    #[tokio::test]
    async fn test_download_image() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/demo.gif")
            .with_status(200)
            .with_body(b"GIF89a-data".to_vec())
            .create_async()
            .await;
        server
            .mock("GET", "/missing.gif")
            .with_status(404)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("posts").join("demo.gif");
        let client = Client::new();

        let saved = download_image(
            &client,
            &format!("{}/demo.gif", server.url()),
            &dest,
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert_eq!(std::fs::read(saved).unwrap(), b"GIF89a-data");

        let err = download_image(
            &client,
            &format!("{}/missing.gif", server.url()),
            &dir.path().join("missing.gif"),
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
