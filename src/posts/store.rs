// src/posts/store.rs
// =============================================================================
// Loading and saving post records from the posts directory.
// =============================================================================

use std::fs;
use std::path::Path;

use super::front_matter::PostRecord;
use crate::error::Result;

/// Loads every `*.md` post, sorted by file name (which sorts by date)
///
/// Posts whose file name starts with `skip_prefix` are left out; the
/// Compose batch (`2024-01-...`) is usually excluded from view sweeps.
pub fn load_posts(dir: &Path, skip_prefix: Option<&str>) -> Result<Vec<PostRecord>> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".md"))
        .filter(|name| skip_prefix.map_or(true, |prefix| !name.starts_with(prefix)))
        .collect();
    names.sort();

    names
        .into_iter()
        .map(|name| load_post(&dir.join(name)))
        .collect()
}

pub fn load_post(path: &Path) -> Result<PostRecord> {
    let content = fs::read_to_string(path)?;
    Ok(PostRecord::new(path, content))
}

/// Writes the post back to where it was loaded from
pub fn save_post(post: &PostRecord) -> Result<()> {
    fs::write(post.path(), post.content())?;
    Ok(())
}
