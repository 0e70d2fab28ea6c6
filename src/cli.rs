// src/cli.rs
// =============================================================================
// Command-line interface, built with clap's derive API.
//
//   catalog-scout image skydoves/cloudy        one repository's README image
//   catalog-scout images --limit 10            fill in missing post images
//   catalog-scout tags --skip-prefix 2024-01   re-tag view library posts
//   catalog-scout check --fix                  find moved/deleted repositories
//   catalog-scout new cloudy https://github.com/skydoves/cloudy -t compose
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "catalog-scout",
    version,
    about = "Curate an Android UI library catalog: README images, tags and repository checks",
    long_about = "catalog-scout maintains the posts of a Jekyll catalog of Android UI libraries. \
                  It finds a representative GIF or screenshot in each library's README, \
                  suggests tags from GitHub metadata and flags repositories that moved or vanished."
)]
pub struct Cli {
    /// Path to a TOML config file (default: ./catalog-scout.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the illustrative image in one repository's README
    ///
    /// Example: catalog-scout image https://github.com/skydoves/cloudy
    Image {
        /// Repository as owner/name or GitHub URL
        repo: String,

        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download images for posts whose image file is missing
    Images {
        /// Process at most this many posts
        #[arg(long)]
        limit: Option<usize>,

        /// Resolve images but do not download or edit posts
        #[arg(long)]
        dry_run: bool,
    },

    /// Suggest and apply tags from GitHub metadata
    Tags {
        /// Skip posts whose file name starts with this (e.g. 2024-01)
        #[arg(long)]
        skip_prefix: Option<String>,

        /// Print suggestions without editing posts
        #[arg(long)]
        dry_run: bool,
    },

    /// Check that repositories exist and locate their README
    ///
    /// Without arguments, every repository linked from the posts is checked.
    Check {
        /// Repositories as owner/name or GitHub URL
        repos: Vec<String>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Rewrite posts' remote_markdown include to the README that was found
        #[arg(long)]
        fix: bool,
    },

    /// Create a post stub for a new library
    New {
        /// Library name, used for the title and image file
        name: String,

        /// GitHub repository URL
        url: String,

        /// Tags for the post (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Post date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
}
