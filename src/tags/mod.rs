// src/tags/mod.rs
// =============================================================================
// Tag suggestion for catalog posts.
//
// Sources, merged into one sorted set:
// - `view`, always
// - a few existing tags worth keeping (material, material3, compose)
// - GitHub topics, normalised ("bottom-sheet" -> "bottomsheet")
// - the keyword dictionary in keywords.rs, matched against title+description
//
// Cards have room for six tags; when there are more, `view` and a short
// priority list go first.
// =============================================================================

mod keywords;

use std::collections::{BTreeSet, HashSet};

use crate::github::RepoMetadata;
use keywords::KEYWORD_TAGS;

/// Most tags a post can carry
pub const MAX_TAGS: usize = 6;

const BASE_TAG: &str = "view";

/// Existing tags that survive re-tagging
const PRESERVED_TAGS: [&str; 3] = ["material", "material3", "compose"];

/// Kept first (after `view`) when trimming to MAX_TAGS
const PRIORITY_TAGS: [&str; 5] = ["material", "animation", "loading", "navigation", "picker"];

/// Suggests tags from repository metadata and the post title
pub fn suggest_tags(meta: &RepoMetadata, title: &str, current: &[String]) -> Vec<String> {
    let mut tags: BTreeSet<String> = BTreeSet::new();
    tags.insert(BASE_TAG.to_string());

    for tag in current {
        if PRESERVED_TAGS.contains(&tag.as_str()) {
            tags.insert(tag.clone());
        }
    }

    tags.extend(meta.topics.iter().filter_map(|topic| normalize_topic(topic)));

    let text = format!(
        "{} {}",
        title.to_lowercase(),
        meta.description.as_deref().unwrap_or("").to_lowercase()
    );
    for (keywords, tag) in KEYWORD_TAGS {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            tags.insert(tag.to_string());
        }
    }

    limit_tags(tags.into_iter().collect())
}

/// "Bottom-Sheet" -> "bottomsheet"; Android-ish and very short topics dropped
fn normalize_topic(topic: &str) -> Option<String> {
    let clean: String = topic
        .to_lowercase()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect();

    if clean.contains("android") || clean.chars().count() <= 2 {
        None
    } else {
        Some(clean)
    }
}

// `sorted` is already in alphabetical order
fn limit_tags(sorted: Vec<String>) -> Vec<String> {
    if sorted.len() <= MAX_TAGS {
        return sorted;
    }

    let mut result = vec![BASE_TAG.to_string()];
    for tag in PRIORITY_TAGS {
        if result.len() < MAX_TAGS && sorted.iter().any(|t| t == tag) {
            result.push(tag.to_string());
        }
    }
    for tag in &sorted {
        if result.len() >= MAX_TAGS {
            break;
        }
        if !result.contains(tag) {
            result.push(tag.clone());
        }
    }
    result
}

/// Whether two tag lists differ as sets (order and duplicates ignored)
pub fn tags_changed(current: &[String], suggested: &[String]) -> bool {
    let current: HashSet<&String> = current.iter().collect();
    let suggested: HashSet<&String> = suggested.iter().collect();
    current != suggested
}
