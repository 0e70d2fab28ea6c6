// src/posts/front_matter.rs
// =============================================================================
// Reading and rewriting the few front-matter fields we care about.
//
// A post looks like:
//
//   ---
//   layout: post
//   title: cloudy
//   image: '/images/posts/cloudy.gif'
//   tag: [compose, blur, effect]
//   link: 'https://github.com/skydoves/cloudy'
//   ---
//
//   {% remote_markdown https://raw.githubusercontent.com/skydoves/cloudy/master/README.md %}
//
// Only single fields are touched, by regex, so the rest of the document -
// including any hand edits - is preserved byte for byte.
// =============================================================================

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::path::{Path, PathBuf};

use crate::github::RepositoryReference;

static LINK_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"link:\s*'([^']+)'").expect("valid regex"));
static IMAGE_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"image:\s*'([^']+)'").expect("valid regex"));
static TAG_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"tag:\s*\[([^\]]*)\]").expect("valid regex"));
static REMOTE_MARKDOWN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{%\s*remote_markdown\s+(https://raw\.githubusercontent\.com/\S+?)\s*%\}")
        .expect("valid regex")
});

/// One catalog entry: a Markdown file under the posts directory
#[derive(Debug, Clone)]
pub struct PostRecord {
    path: PathBuf,
    content: String,
}

impl PostRecord {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// File name, e.g. "2024-01-15-Cloudy.md"
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Title taken from the file name: "2016-09-27-Spring-Indicator.md" -> "Spring-Indicator"
    pub fn title(&self) -> String {
        let name = self.file_name();
        let stem = name.strip_suffix(".md").unwrap_or(&name);
        stem.splitn(4, '-').last().unwrap_or(stem).to_string()
    }

    pub fn link(&self) -> Option<&str> {
        field(&LINK_FIELD, &self.content)
    }

    pub fn image(&self) -> Option<&str> {
        field(&IMAGE_FIELD, &self.content)
    }

    /// URL inside the `{% remote_markdown ... %}` include
    pub fn remote_markdown(&self) -> Option<&str> {
        field(&REMOTE_MARKDOWN, &self.content)
    }

    /// Tags from `tag: [a, b, c]`
    pub fn tags(&self) -> Vec<String> {
        field(&TAG_FIELD, &self.content)
            .map(|list| {
                list.split(',')
                    .map(|tag| tag.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Repository behind this post
    ///
    /// Prefers the `link` field; falls back to any github.com path in the
    /// body.
    pub fn repository(&self) -> Option<RepositoryReference> {
        self.link()
            .and_then(RepositoryReference::find_in)
            .or_else(|| RepositoryReference::find_in(&self.content))
    }

    /// Replaces the tag list. Returns false when the post has no tag field.
    pub fn set_tags(&mut self, tags: &[String]) -> bool {
        let line = format!("tag: [{}]", tags.join(", "));
        self.replace_field(&TAG_FIELD, &line)
    }

    /// Replaces the image path. Returns false when the post has no image field.
    pub fn set_image(&mut self, image: &str) -> bool {
        let line = format!("image: '{}'", image);
        self.replace_field(&IMAGE_FIELD, &line)
    }

    /// Points the remote_markdown include at a new README URL
    pub fn set_remote_markdown(&mut self, url: &str) -> bool {
        let line = format!("{{% remote_markdown {} %}}", url);
        self.replace_field(&REMOTE_MARKDOWN, &line)
    }

    fn replace_field(&mut self, pattern: &Regex, replacement: &str) -> bool {
        if !pattern.is_match(&self.content) {
            return false;
        }
        self.content = pattern
            .replacen(&self.content, 1, NoExpand(replacement))
            .into_owned();
        true
    }
}

fn field<'a>(pattern: &Regex, content: &'a str) -> Option<&'a str> {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = "---
layout: post
title: cloudy
featured: true
image: '/images/posts/cloudy.gif'
tag: [compose, blur, effect]
link: 'https://github.com/skydoves/cloudy'
---

{% remote_markdown https://raw.githubusercontent.com/skydoves/cloudy/master/README.md %}
";

    fn post() -> PostRecord {
        PostRecord::new("_posts/2024-01-15-Cloudy.md", POST)
    }

    #[test]
    fn test_read_fields() {
        let post = post();
        assert_eq!(post.title(), "Cloudy");
        assert_eq!(post.link(), Some("https://github.com/skydoves/cloudy"));
        assert_eq!(post.image(), Some("/images/posts/cloudy.gif"));
        assert_eq!(post.tags(), vec!["compose", "blur", "effect"]);
        assert_eq!(
            post.remote_markdown(),
            Some("https://raw.githubusercontent.com/skydoves/cloudy/master/README.md")
        );
        assert_eq!(post.repository().unwrap().to_string(), "skydoves/cloudy");
    }

    #[test]
    fn test_title_keeps_dashes_after_date() {
        let post = PostRecord::new("_posts/2016-09-27-Spring-Indicator.md", "");
        assert_eq!(post.title(), "Spring-Indicator");
    }

    #[test]
    fn test_repository_from_body_when_link_missing() {
        let post = PostRecord::new(
            "x.md",
            "---\ntitle: x\n---\n{% remote_markdown https://raw.githubusercontent.com/o/n/main/README.md %}\nSee https://github.com/o/n/ for more",
        );
        assert_eq!(post.repository().unwrap().to_string(), "o/n");
    }

    #[test]
    fn test_set_tags() {
        let mut post = post();
        assert!(post.set_tags(&["view".to_string(), "blur".to_string()]));
        assert_eq!(post.tags(), vec!["view", "blur"]);
        assert!(post.content().contains("tag: [view, blur]\n"));
        assert!(post.content().contains("link: 'https://github.com/skydoves/cloudy'"));
    }

    #[test]
    fn test_set_image_and_remote_markdown() {
        let mut post = post();
        assert!(post.set_image("/images/posts/cloudy.png"));
        assert_eq!(post.image(), Some("/images/posts/cloudy.png"));

        let new_url = "https://raw.githubusercontent.com/skydoves/cloudy/main/README.md";
        assert!(post.set_remote_markdown(new_url));
        assert_eq!(post.remote_markdown(), Some(new_url));
        assert!(post.content().contains("{% remote_markdown https://raw.githubusercontent.com/skydoves/cloudy/main/README.md %}"));
    }

    #[test]
    fn test_missing_fields() {
        let mut post = PostRecord::new("x.md", "---\ntitle: x\n---\n");
        assert!(post.link().is_none());
        assert!(post.tags().is_empty());
        assert!(post.repository().is_none());
        assert!(!post.set_tags(&["view".to_string()]));
        assert_eq!(post.content(), "---\ntitle: x\n---\n");
    }
}
