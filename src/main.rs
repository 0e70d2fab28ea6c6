// src/main.rs
// =============================================================================
// Entry point of catalog-scout.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the config and set up logging
// 3. Dispatch to the subcommand handler
// 4. Exit with a meaningful code:
//      0 = everything is fine
//      1 = something needs a human (missing image, deleted repository, ...)
//      2 = internal error
// =============================================================================

mod batch;
mod cli;
mod config;
mod error;
mod github;
mod logging;
mod posts;
mod resolver;
mod tags;

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use tracing::{info, warn};

use cli::{Cli, Commands};
use config::Config;
use github::{check_repository, fetch_metadata, HttpFetcher, ReadmeLocator, RepoCheck, RepoStatus, RepositoryReference};
use posts::{MissingImage, PostRecord};
use resolver::{ImageCandidate, ImageResolver};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Image { repo, json } => handle_image(&config, &repo, json).await,
        Commands::Images { limit, dry_run } => handle_images(&config, limit, dry_run).await,
        Commands::Tags { skip_prefix, dry_run } => {
            handle_tags(&config, skip_prefix.as_deref(), dry_run).await
        }
        Commands::Check { repos, json, fix } => handle_check(&config, &repos, json, fix).await,
        Commands::New { name, url, tags, date } => handle_new(&config, name, &url, tags, date),
    }
}

fn build_resolver(config: &Config) -> Result<ImageResolver<HttpFetcher>> {
    let fetcher = HttpFetcher::from_config(config)?;
    Ok(ImageResolver::new(fetcher, ReadmeLocator::from_config(config)))
}

// Handles the 'image' subcommand
async fn handle_image(config: &Config, repo: &str, json: bool) -> Result<i32> {
    let repo: RepositoryReference = repo.parse()?;
    let resolver = build_resolver(config)?;

    let found = resolver.resolve(&repo).await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "repository": repo,
                "image": found,
            }))?
        );
    } else {
        match &found {
            Some(image) => println!("📷 {} ({})", image.url, image.extension),
            None => println!("❌ No image found for {} - manual image needed", repo),
        }
    }

    Ok(if found.is_some() { 0 } else { 1 })
}

// Handles the 'images' subcommand: find posts with a missing image file,
// resolve a picture for each, download it, fix the post's extension.
async fn handle_images(config: &Config, limit: Option<usize>, dry_run: bool) -> Result<i32> {
    let all_posts = posts::load_posts(&config.posts_dir, None)
        .with_context(|| format!("Failed to read posts from {}", config.posts_dir.display()))?;
    let (present, mut missing) = posts::find_missing_images(&all_posts, &config.images_dir);

    println!("📊 Images");
    println!("   ✅ Present: {}", present);
    println!("   ❌ Missing: {}", missing.len());

    if missing.is_empty() {
        println!("\n✨ Every post has its image");
        return Ok(0);
    }

    if let Some(limit) = limit {
        missing.truncate(limit);
    }
    println!("\n🔄 Resolving {} image(s)...\n", missing.len());

    let resolver = build_resolver(config)?;
    let resolver = &resolver;
    let keys: Vec<usize> = (0..missing.len()).collect();
    let missing_ref = &missing;

    let resolved = batch::run_bounded_map(keys, config.concurrency, |index| async move {
        match missing_ref[index].post.repository() {
            Some(repo) => resolver.resolve(&repo).await,
            None => None,
        }
    })
    .await;

    let mut found = 0;
    let mut fixed = 0;
    for (index, item) in missing.iter().enumerate() {
        println!("[{}/{}] {}", index + 1, missing.len(), item.post.file_name());

        match resolved.get(&index).cloned().flatten() {
            Some(image) => {
                println!("   📷 Found: {}", image.url);
                found += 1;
                if dry_run {
                    continue;
                }
                match save_image(config, resolver.fetcher(), item, &image).await {
                    Ok(name) => {
                        println!("   ✅ Saved {}", name);
                        fixed += 1;
                    }
                    Err(e) => println!("   ❌ Download failed: {:#}", e),
                }
            }
            None if item.post.repository().is_none() => {
                println!("   ⚠️  No GitHub repository in post");
            }
            None => println!("   ❌ No image found - manual image needed"),
        }
    }

    if dry_run {
        println!("\n✅ Dry run: {}/{} image(s) found", found, missing.len());
    } else {
        println!("\n✅ Done: {}/{} image(s) saved", fixed, missing.len());
    }
    Ok(images_exit_code(dry_run, found, fixed, missing.len()))
}

// A dry run succeeds when every image was found; a real run when every one was saved
fn images_exit_code(dry_run: bool, found: usize, fixed: usize, total: usize) -> i32 {
    let done = if dry_run { found } else { fixed };
    if done == total {
        0
    } else {
        1
    }
}

// Downloads one image and keeps the post's image field in sync
async fn save_image(
    config: &Config,
    fetcher: &HttpFetcher,
    item: &MissingImage,
    image: &ImageCandidate,
) -> Result<String> {
    let name = item.file_name_for(image.extension);
    let dest = config.images_dir.join(&name);

    posts::download_image(fetcher.client(), &image.url, &dest, config.download_timeout()).await?;

    if name != item.image_name {
        let mut post = item.post.clone();
        post.set_image(&format!("{}{}", posts::IMAGE_PREFIX, name));
        posts::save_post(&post)?;
        println!("   📝 Image renamed: {} → {}", item.image_name, name);
    }

    Ok(name)
}

// Handles the 'tags' subcommand. Sequential on purpose: the GitHub API
// allows 60 unauthenticated calls an hour, so we pause every few requests.
async fn handle_tags(config: &Config, skip_prefix: Option<&str>, dry_run: bool) -> Result<i32> {
    let all_posts = posts::load_posts(&config.posts_dir, skip_prefix)
        .with_context(|| format!("Failed to read posts from {}", config.posts_dir.display()))?;
    let fetcher = HttpFetcher::from_config(config)?;

    println!("🏷️  Updating tags for {} post(s)\n", all_posts.len());

    let mut updated = 0;
    let mut not_found = 0;
    let mut failed = 0;

    for (i, mut post) in all_posts.into_iter().enumerate() {
        let title = post.title();

        let repo = match post.repository() {
            Some(repo) => repo,
            None => {
                warn!("{}: no GitHub repository", post.file_name());
                failed += 1;
                continue;
            }
        };

        let meta = match fetch_metadata(&fetcher, &config.api_base_url, &repo).await {
            Ok(meta) => meta,
            Err(e) if e.is_not_found() => {
                println!("   ❌ {} ({}) - repository deleted", title, repo);
                not_found += 1;
                continue;
            }
            Err(e) => {
                warn!("{}: {}", repo, e);
                failed += 1;
                continue;
            }
        };

        let current = post.tags();
        let suggested = tags::suggest_tags(&meta, &title, &current);

        if tags::tags_changed(&current, &suggested) {
            println!("   ✏️  {}: [{}] → [{}]", title, current.join(", "), suggested.join(", "));
            if !dry_run {
                if !post.set_tags(&suggested) {
                    warn!("{}: no tag field to update", post.file_name());
                    failed += 1;
                } else if write_post(&post) {
                    updated += 1;
                } else {
                    failed += 1;
                }
            }
        }

        batch::courtesy_pause(i + 1, config.pause_every, config.pause()).await;
    }

    println!("\n✅ Tags updated");
    println!("   ✏️  Updated: {}", updated);
    println!("   ❌ Deleted repositories: {}", not_found);
    println!("   ⚠️  Failed: {}", failed);

    Ok(if not_found > 0 || failed > 0 { 1 } else { 0 })
}

// Handles the 'check' subcommand
async fn handle_check(config: &Config, repos: &[String], json: bool, fix: bool) -> Result<i32> {
    // repository -> posts that link to it (empty when given on the command line)
    let mut targets: BTreeMap<RepositoryReference, Vec<PostRecord>> = BTreeMap::new();

    if repos.is_empty() {
        let all_posts = posts::load_posts(&config.posts_dir, None)
            .with_context(|| format!("Failed to read posts from {}", config.posts_dir.display()))?;
        for post in all_posts {
            if let Some(repo) = post.repository() {
                targets.entry(repo).or_default().push(post);
            }
        }
    } else {
        for repo in repos {
            targets.entry(repo.parse::<RepositoryReference>()?).or_default();
        }
    }

    info!("Checking {} repositories", targets.len());

    let fetcher = HttpFetcher::from_config(config)?;
    let locator = ReadmeLocator::from_config(config);
    let (fetcher, locator) = (&fetcher, &locator);
    let api_base = config.api_base_url.as_str();

    let mut results: Vec<RepoCheck> = batch::run_bounded(
        targets.keys().cloned().collect(),
        config.concurrency,
        |repo| async move { check_repository(fetcher, api_base, locator, repo).await },
    )
    .await
    .into_iter()
    .map(|(_, check)| check)
    .collect();
    results.sort_by(|a, b| a.repository.cmp(&b.repository));

    print_results(&results, json)?;

    let mut unwritten = 0;
    if fix {
        let outcome = fix_readme_urls(&results, &targets);
        if !json {
            println!("\n🔧 Fixed remote_markdown in {} post(s)", outcome.fixed);
            if outcome.failed > 0 {
                println!("   ⚠️  Could not write {} post(s)", outcome.failed);
            }
        }
        unwritten = outcome.failed;
    }

    let attention = unwritten > 0 || results.iter().any(|r| r.status.needs_attention());
    Ok(if attention { 1 } else { 0 })
}

// Saves a post, reporting a failed write instead of ending the batch
fn write_post(post: &PostRecord) -> bool {
    match posts::save_post(post) {
        Ok(()) => true,
        Err(e) => {
            warn!("{}: could not write post: {}", post.path().display(), e);
            false
        }
    }
}

/// Posts rewritten and posts that could not be written by `fix_readme_urls`
#[derive(Debug, Default, PartialEq)]
struct FixOutcome {
    fixed: usize,
    failed: usize,
}

// Rewrites stale remote_markdown includes
fn fix_readme_urls(
    results: &[RepoCheck],
    targets: &BTreeMap<RepositoryReference, Vec<PostRecord>>,
) -> FixOutcome {
    let mut outcome = FixOutcome::default();

    for result in results {
        let readme_url = match &result.status {
            RepoStatus::Found { readme_url, .. } => readme_url,
            _ => continue,
        };

        for post in targets.get(&result.repository).into_iter().flatten() {
            if post.remote_markdown() == Some(readme_url.as_str()) {
                continue;
            }
            let mut post = post.clone();
            if !post.set_remote_markdown(readme_url) {
                continue;
            }
            if write_post(&post) {
                info!("{}: remote_markdown -> {}", post.file_name(), readme_url);
                outcome.fixed += 1;
            } else {
                outcome.failed += 1;
            }
        }
    }

    outcome
}

// Handles the 'new' subcommand
fn handle_new(config: &Config, name: String, url: &str, tags: Vec<String>, date: Option<String>) -> Result<i32> {
    let repository = RepositoryReference::from_url(url)?;
    let date = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

    let post = posts::NewPost {
        name,
        repository,
        tags,
        date,
    };

    match posts::create_post(&config.posts_dir, &post, &config.raw_base_url)? {
        Some(path) => println!("Created {}", path.display()),
        None => println!("Skipping {} - already exists", post.file_name()),
    }

    Ok(0)
}

// Prints check results either as a table or JSON
fn print_results(results: &[RepoCheck], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(results)?;
        println!("{}", json_output);
    } else {
        print_table(results);
    }
    Ok(())
}

// Prints results as a human-readable table in the terminal
fn print_table(results: &[RepoCheck]) {
    println!("{:<45} {:<15} {:<60}", "REPOSITORY", "STATUS", "DETAILS");
    println!("{}", "=".repeat(120));

    for result in results {
        let repo_display = truncate_display(&result.repository.to_string(), 42);

        println!(
            "{:<45} {:<15} {:<60}",
            repo_display,
            format_status(&result.status),
            format_details(&result.status)
        );
    }

    println!();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for result in results {
        *counts.entry(result.status.label()).or_default() += 1;
    }

    println!("📊 Summary:");
    for (label, count) in &counts {
        println!("   {}: {}", label, count);
    }
    println!("   📋 Total: {}", results.len());
}

// Shortens to `max` characters plus "..."; counts chars, not bytes
fn truncate_display(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

fn format_status(status: &RepoStatus) -> String {
    match status {
        RepoStatus::Found { archived: true, .. } => "🗄️  ARCHIVED".to_string(),
        RepoStatus::Found { .. } => "✅ FOUND".to_string(),
        RepoStatus::NoReadme { .. } => "📄 NO README".to_string(),
        RepoStatus::Private => "🔒 PRIVATE".to_string(),
        RepoStatus::NotFound => "❌ NOT FOUND".to_string(),
        RepoStatus::Error { .. } => "⚠️  ERROR".to_string(),
    }
}

fn format_details(status: &RepoStatus) -> String {
    match status {
        RepoStatus::Found { readme_url, note, .. } => match note {
            Some(note) => format!("{} ({})", readme_url, note),
            None => readme_url.clone(),
        },
        RepoStatus::NoReadme { .. } => "check repository manually".to_string(),
        RepoStatus::Private => String::new(),
        RepoStatus::NotFound => "consider removing the post".to_string(),
        RepoStatus::Error { message } => message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_status() {
        let found = RepoStatus::Found {
            readme_url: "https://raw.githubusercontent.com/o/n/main/README.md".to_string(),
            branch: "main".to_string(),
            archived: false,
            stars: 1,
            note: None,
        };
        assert_eq!(format_status(&found), "✅ FOUND");
        assert_eq!(
            format_details(&found),
            "https://raw.githubusercontent.com/o/n/main/README.md"
        );
        assert_eq!(format_status(&RepoStatus::NotFound), "❌ NOT FOUND");
    }

    #[test]
    fn test_truncate_display_multibyte() {
        assert_eq!(truncate_display("o/n", 42), "o/n");

        // 'é' is two bytes, so byte 42 lands inside a character
        let long = format!("o/{}", "é".repeat(45));
        let shown = truncate_display(&long, 42);
        assert_eq!(shown.chars().count(), 45);
        assert!(shown.ends_with("é..."));
    }

    #[test]
    fn test_images_exit_code() {
        // dry run: nothing saved, but everything was found
        assert_eq!(images_exit_code(true, 3, 0, 3), 0);
        assert_eq!(images_exit_code(true, 2, 0, 3), 1);
        assert_eq!(images_exit_code(false, 3, 0, 3), 1);
        assert_eq!(images_exit_code(false, 3, 3, 3), 0);
    }

    #[test]
    fn test_fix_readme_urls_rewrites_stale_posts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2016-09-27-SpringIndicator.md");
        std::fs::write(
            &path,
            "---\nlink: 'https://github.com/chenupt/SpringIndicator'\n---\n\n\
             {% remote_markdown https://raw.githubusercontent.com/chenupt/SpringIndicator/master/README.md %}\n",
        )
        .unwrap();

        let post = PostRecord::new(&path, std::fs::read_to_string(&path).unwrap());
        let repo = post.repository().unwrap();
        let mut targets = BTreeMap::new();
        targets.insert(repo.clone(), vec![post]);

        let new_url = "https://raw.githubusercontent.com/chenupt/SpringIndicator/main/readme.md";
        let results = vec![RepoCheck {
            repository: repo,
            status: RepoStatus::Found {
                readme_url: new_url.to_string(),
                branch: "main".to_string(),
                archived: false,
                stars: 0,
                note: None,
            },
        }];

        assert_eq!(fix_readme_urls(&results, &targets), FixOutcome { fixed: 1, failed: 0 });
        assert!(std::fs::read_to_string(&path).unwrap().contains(new_url));

        // Rewritten post is already current
        let fresh = PostRecord::new(&path, std::fs::read_to_string(&path).unwrap());
        targets.insert(results[0].repository.clone(), vec![fresh]);
        assert_eq!(fix_readme_urls(&results, &targets), FixOutcome::default());
    }

    fn found(repo: &RepositoryReference) -> RepoCheck {
        RepoCheck {
            repository: repo.clone(),
            status: RepoStatus::Found {
                readme_url: format!(
                    "https://raw.githubusercontent.com/{}/main/README.md",
                    repo
                ),
                branch: "main".to_string(),
                archived: false,
                stars: 0,
                note: None,
            },
        }
    }

    fn stale_post(path: &std::path::Path, repo: &str) -> PostRecord {
        PostRecord::new(
            path,
            format!(
                "---\nlink: 'https://github.com/{repo}'\n---\n\n\
                 {{% remote_markdown https://raw.githubusercontent.com/{repo}/master/README.md %}}\n"
            ),
        )
    }

    #[test]
    fn test_fix_readme_urls_continues_after_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let writable = dir.path().join("2020-01-01-B.md");
        std::fs::write(&writable, "").unwrap();

        // Parent directory does not exist, so saving this one fails
        let unwritable = dir.path().join("gone").join("2020-01-01-A.md");

        let repo_a = RepositoryReference::new("o", "a");
        let repo_b = RepositoryReference::new("o", "b");
        let mut targets = BTreeMap::new();
        targets.insert(repo_a.clone(), vec![stale_post(&unwritable, "o/a")]);
        targets.insert(repo_b.clone(), vec![stale_post(&writable, "o/b")]);

        let results = vec![found(&repo_a), found(&repo_b)];
        let outcome = fix_readme_urls(&results, &targets);

        assert_eq!(outcome, FixOutcome { fixed: 1, failed: 1 });
        assert!(std::fs::read_to_string(&writable)
            .unwrap()
            .contains("https://raw.githubusercontent.com/o/b/main/README.md"));
        assert!(!unwritable.exists());
    }

    #[test]
    fn test_write_post_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let post = PostRecord::new(dir.path().join("missing").join("x.md"), "---\n---\n");
        assert!(!write_post(&post));

        let post = PostRecord::new(dir.path().join("x.md"), "---\n---\n");
        assert!(write_post(&post));
    }
}
