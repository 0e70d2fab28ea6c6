// src/resolver/scan.rs
// =============================================================================
// Finding image references in README text.
//
// Passes, in priority order:
//   a. Markdown image syntax ![alt](target), via pulldown-cmark so titles,
//      <angle brackets> and reference-style images are handled
//   b. bare http(s) URLs ending in an image extension
//   c. ![alt](target.ext) by regex, for image syntax the Markdown parser
//      does not see (e.g. inside an HTML block)
//   d. <img src="..."> tags in embedded HTML, via scraper
//
// Every target is resolved to an absolute URL; targets without a gif/png/
// jpg/jpeg/webp extension (badges, extension-less assets) are dropped.
// Then the first GIF wins, otherwise the first still image.
// =============================================================================

use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Options, Parser, Tag};
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

use super::image::{resolve_target, ImageCandidate};

// b. https://host/path/demo.gif, optionally followed by ?query
static BARE_IMAGE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)https?://[^\s"'<>()\[\]]+\.(?:gif|png|jpe?g|webp)\b(?:\?[^\s"'<>()\[\]]*)?"#,
    )
    .expect("valid regex")
});

// c. ![alt](path/demo.png "title")
static MARKDOWN_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)!\[[^\]]*\]\(\s*<?([^)\s>]+\.(?:gif|png|jpe?g|webp)(?:\?[^)\s>]*)?)")
        .expect("valid regex")
});

/// Collects raw image targets in pass order, before resolution
pub fn extract_image_targets(readme: &str) -> Vec<String> {
    let mut targets = Vec::new();
    let mut html_chunks = String::new();

    // a. CommonMark images; HTML events are kept for pass d
    for event in Parser::new_ext(readme, Options::ENABLE_TABLES) {
        match event {
            Event::Start(Tag::Image(_link_type, dest_url, _title)) => {
                targets.push(dest_url.to_string());
            }
            Event::Html(html) => {
                html_chunks.push_str(&html);
                html_chunks.push('\n');
            }
            _ => {}
        }
    }

    // b. bare URLs anywhere in the text
    targets.extend(BARE_IMAGE_URL.find_iter(readme).map(|m| m.as_str().to_string()));

    // c. regex fallback for Markdown image syntax
    targets.extend(
        MARKDOWN_IMAGE
            .captures_iter(readme)
            .map(|caps| caps[1].to_string()),
    );

    // d. <img src> inside HTML
    targets.extend(extract_img_sources(&html_chunks));

    targets
}

fn extract_img_sources(html: &str) -> Vec<String> {
    if html.is_empty() {
        return Vec::new();
    }

    let selector = match Selector::parse("img[src]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    let fragment = Html::parse_fragment(html);
    fragment
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .map(|src| src.to_string())
        .collect()
}

/// Resolves and filters every image reference, keeping first occurrences
pub fn find_image_candidates(readme: &str, base: &Url) -> Vec<ImageCandidate> {
    let mut seen = HashSet::new();

    extract_image_targets(readme)
        .into_iter()
        .filter_map(|target| resolve_target(base, &target))
        .filter(|url| seen.insert(url.clone()))
        .filter_map(|url| ImageCandidate::from_absolute(&url))
        .collect()
}

/// Picks the illustrative image of a README: first GIF, else first image
///
/// Pure: the same text and base always give the same answer.
pub fn scan_readme(readme: &str, base: &Url) -> Option<ImageCandidate> {
    let candidates = find_image_candidates(readme, base);

    let first_gif = candidates.iter().position(|c| c.extension.is_gif());
    match first_gif {
        Some(index) => candidates.into_iter().nth(index),
        None => candidates.into_iter().next(),
    }
}
