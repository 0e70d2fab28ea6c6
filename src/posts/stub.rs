// src/posts/stub.rs
// =============================================================================
// Generating a new catalog post.
//
// File name: {date}-{TitleName}.md, where TitleName is the library name with
// '-' and '_' removed and each alphabetic run capitalised:
//   "compose-destinations"   -> "Composedestinations"
//   "material3-windowsize"   -> "Material3Windowsize"
// =============================================================================

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::github::RepositoryReference;

/// What the stub generator needs to know about a library
#[derive(Debug, Clone)]
pub struct NewPost {
    pub name: String,
    pub repository: RepositoryReference,
    pub tags: Vec<String>,
    /// YYYY-MM-DD
    pub date: String,
}

impl NewPost {
    pub fn file_name(&self) -> String {
        let squashed: String = self.name.chars().filter(|c| *c != '-' && *c != '_').collect();
        format!("{}-{}.md", self.date, title_case(&squashed))
    }

    /// Full post text
    pub fn render(&self, raw_base_url: &str) -> String {
        format!(
            "---
layout: post
title: {name}
featured: true
image: '/images/posts/{name}.gif'
tag: [{tags}]
link: '{link}'
---

{{% remote_markdown {raw}/{owner}/{repo}/master/README.md %}}
",
            name = self.name,
            tags = self.tags.join(", "),
            link = self.repository.html_url(),
            raw = raw_base_url.trim_end_matches('/'),
            owner = self.repository.owner(),
            repo = self.repository.name(),
        )
    }
}

/// Upper-cases the first letter of every alphabetic run, lower-cases the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_alphabetic = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            out.push(c);
            previous_alphabetic = false;
        }
    }

    out
}

/// Writes the post unless a file with the same name exists
///
/// Returns the path written, or None when skipped.
pub fn create_post(posts_dir: &Path, post: &NewPost, raw_base_url: &str) -> Result<Option<PathBuf>> {
    let path = posts_dir.join(post.file_name());
    if path.exists() {
        return Ok(None);
    }

    std::fs::create_dir_all(posts_dir)?;
    std::fs::write(&path, post.render(raw_base_url))?;
    Ok(Some(path))
}
