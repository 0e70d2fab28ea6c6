// src/resolver/image.rs
// =============================================================================
// Image candidates and URL resolution.
//
// A README refers to images in many shapes:
//   https://user-images.githubusercontent.com/1/demo.gif   (absolute)
//   //cdn.example.com/demo.png                             (protocol-relative)
//   /art/demo.gif                                          (repo-root-relative)
//   docs/demo.png, ./docs/demo.png                         (README-relative)
//   https://github.com/o/n/blob/main/art/demo.gif          (HTML page, not the file)
//
// resolve_target() turns all of them into a fetchable absolute URL.
// READMEs live at the repository root, so root-relative and README-relative
// paths resolve against the same base: {raw}/{owner}/{name}/{branch}/.
// =============================================================================

use serde::Serialize;
use std::fmt;
use url::Url;

/// Host that serves raw file contents for github.com blob/raw links
const RAW_GITHUB: &str = "https://raw.githubusercontent.com";

/// Image formats worth showing on a catalog card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageExtension {
    Gif,
    Png,
    Jpg,
    Jpeg,
    Webp,
}

impl ImageExtension {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageExtension::Gif => "gif",
            ImageExtension::Png => "png",
            ImageExtension::Jpg => "jpg",
            ImageExtension::Jpeg => "jpeg",
            ImageExtension::Webp => "webp",
        }
    }

    /// Matches a bare extension, case-insensitively
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "gif" => Some(ImageExtension::Gif),
            "png" => Some(ImageExtension::Png),
            "jpg" => Some(ImageExtension::Jpg),
            "jpeg" => Some(ImageExtension::Jpeg),
            "webp" => Some(ImageExtension::Webp),
            _ => None,
        }
    }

    /// Extension of the last path segment; query and fragment are ignored
    ///
    ///   "https://x.com/a/demo.GIF?raw=true" -> Some(Gif)
    ///   "https://x.com/badge.svg"           -> None
    ///   "https://x.com/assets/12345"        -> None
    pub fn from_path(target: &str) -> Option<Self> {
        let path = target
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or(target);
        let file = path.rsplit('/').next().unwrap_or(path);
        let (_, ext) = file.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    pub fn is_gif(&self) -> bool {
        matches!(self, ImageExtension::Gif)
    }
}

impl fmt::Display for ImageExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An absolute image URL plus its recognized format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageCandidate {
    pub url: String,
    pub extension: ImageExtension,
}

impl ImageCandidate {
    /// Builds a candidate from an absolute URL
    ///
    /// Returns None unless the URL is http(s) with a host and ends in a
    /// recognized image extension.
    pub fn from_absolute(url: &str) -> Option<Self> {
        let parsed = Url::parse(url).ok()?;
        if !is_web_url(&parsed) {
            return None;
        }
        let extension = ImageExtension::from_path(parsed.path())?;
        Some(Self {
            url: url.to_string(),
            extension,
        })
    }
}

fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
}

/// Turns a README image target into an absolute URL
///
/// `base` is the branch directory the README was fetched from and must end
/// with '/'. Returns None for anchors, data URIs and non-web schemes.
pub fn resolve_target(base: &Url, target: &str) -> Option<String> {
    let target = target.trim().trim_start_matches('<').trim_end_matches('>').trim();
    if target.is_empty() || target.starts_with('#') {
        return None;
    }

    let owned;
    let target = if target.starts_with("//") {
        owned = format!("https:{}", target);
        owned.as_str()
    } else {
        target
    };

    match Url::parse(target) {
        Ok(url) if is_web_url(&url) => Some(raw_github_url(&url).unwrap_or_else(|| target.to_string())),
        Ok(_) => None,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let mut relative = target;
            while let Some(rest) = relative.strip_prefix("./") {
                relative = rest;
            }
            let relative = relative.trim_start_matches('/');
            base.join(relative).ok().map(String::from)
        }
        Err(_) => None,
    }
}

// github.com/{o}/{n}/blob/{branch}/{path} (and /raw/) -> raw content URL
fn raw_github_url(url: &Url) -> Option<String> {
    if url.host_str()? != "github.com" {
        return None;
    }

    let segments: Vec<&str> = url.path_segments()?.collect();
    match segments.as_slice() {
        [owner, name, "blob" | "raw", branch, rest @ ..] if !rest.is_empty() => Some(format!(
            "{}/{}/{}/{}/{}",
            RAW_GITHUB,
            owner,
            name,
            branch,
            rest.join("/")
        )),
        _ => None,
    }
}
