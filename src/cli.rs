// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Two subcommands:
// - scan:    crawl a website and audit every page found
// - analyze: audit a single HTML file from disk (no network)
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "seo-scanner",
    version = "0.1.0",
    about = "Crawl a website and audit its on-page SEO health",
    long_about = "seo-scanner crawls a website breadth-first, extracts SEO signals from every page \
                  (title, meta description, headings, images, links, content, technical tags) \
                  and lists the issues to fix, most important first."
)]
pub struct Cli {
    /// Show debug logs (links queued, pages analyzed)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show warnings and errors in the logs
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and audit every page found
    ///
    /// Example: seo-scanner scan https://example.com --max-pages 20
    Scan {
        /// Website URL to scan. "https://" is added when no scheme is given
        ///
        /// Optional when the config file sets seed_url
        url: Option<String>,

        /// TOML config file. Command-line flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum number of pages to fetch
        #[arg(short, long)]
        max_pages: Option<usize>,

        /// Seconds to wait before each request
        #[arg(long)]
        delay: Option<f64>,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// How many issues to show in the priority list
        #[arg(long)]
        top: Option<usize>,

        /// Output the full report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Audit a single local HTML file
    ///
    /// Example: seo-scanner analyze index.html --url https://example.com/
    Analyze {
        /// Path to the HTML file
        file: PathBuf,

        /// URL the page is served from (used for link classification)
        #[arg(long, default_value = "https://localhost/")]
        url: String,

        /// Output the record and issues as JSON
        #[arg(long)]
        json: bool,
    },
}
