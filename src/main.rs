// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap, set up logging
// 2. Build the scan configuration (defaults < config file < flags)
// 3. Run the pipeline and print results (tables or JSON)
// 4. Exit with a code scripts can check:
//      0 = scan complete, no critical issues
//      1 = critical issues found
//      2 = error (invalid URL, bad config, ...)
//      3 = nothing to analyze (no page could be fetched)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use seo_scanner::issues::detect_page_issues;
use seo_scanner::report::{prioritize, PageScore};
use seo_scanner::{
    run_scan, scope, Issue, PageAnalyzer, ScanConfig, ScanError, ScanOutcome, ScanReport,
    Severity,
};

const EXIT_OK: i32 = 0;
const EXIT_CRITICAL: i32 = 1;
const EXIT_ERROR: i32 = 2;
const EXIT_NOTHING_TO_ANALYZE: i32 = 3;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}

/// Initialize logging. RUST_LOG still wins when set.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Scan {
            url,
            config,
            max_pages,
            delay,
            timeout,
            top,
            json,
        } => {
            let mut scan_config = load_config(config.as_deref())?;
            if let Some(url) = url {
                scan_config.seed_url = url;
            }
            if let Some(max_pages) = max_pages {
                scan_config.max_pages = max_pages;
            }
            if let Some(delay) = delay {
                scan_config.politeness_delay_secs = delay;
            }
            if let Some(timeout) = timeout {
                scan_config.timeout_secs = timeout;
            }
            if let Some(top) = top {
                scan_config.top_issues = top;
            }

            handle_scan(&scan_config, json).await
        }
        Commands::Analyze { file, url, json } => handle_analyze(&file, &url, json),
    }
}

// A config file that isn't there falls back to defaults, one that exists
// but doesn't parse is an error
fn load_config(path: Option<&Path>) -> Result<ScanConfig> {
    match path {
        Some(path) if !path.exists() => Ok(ScanConfig::load_or_default(path)),
        Some(path) => ScanConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(ScanConfig::default()),
    }
}

// Handles the 'scan' subcommand
async fn handle_scan(config: &ScanConfig, json: bool) -> Result<i32> {
    if config.seed_url.trim().is_empty() {
        eprintln!("❌ No URL given. Pass one on the command line or set seed_url in the config file.");
        return Ok(EXIT_ERROR);
    }

    // Keep stdout clean for JSON consumers
    if !json {
        println!("🔍 Scanning website: {}", config.seed_url);
        println!("📊 Max pages: {}", config.max_pages);
    }

    // Ctrl-C stops the crawl between two requests; pages fetched so far
    // are still analyzed
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, finishing with the pages fetched so far");
            flag.store(true, Ordering::Relaxed);
        }
    });

    let outcome = match run_scan(config, Some(cancel)).await {
        Ok(outcome) => outcome,
        Err(ScanError::InvalidSeedUrl { url, reason }) => {
            eprintln!("❌ Invalid URL '{}': {}", url, reason);
            return Ok(EXIT_ERROR);
        }
        Err(e) => return Err(e.into()),
    };

    match outcome {
        ScanOutcome::NothingToAnalyze { seed_url, failures } => {
            eprintln!("❌ No pages found to analyze at {}.", seed_url);
            for failure in &failures {
                eprintln!("   {}: {}", failure.url, failure.reason);
            }
            eprintln!("   Please check the URL and try again.");
            Ok(EXIT_NOTHING_TO_ANALYZE)
        }
        ScanOutcome::Completed(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report, config.top_issues);
            }

            if report.summary.critical > 0 {
                Ok(EXIT_CRITICAL)
            } else {
                Ok(EXIT_OK)
            }
        }
    }
}

// Handles the 'analyze' subcommand
fn handle_analyze(file: &Path, url: &str, json: bool) -> Result<i32> {
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let analyzer = PageAnalyzer::new(scope::authority_of(url));
    let record = analyzer.analyze_page(url, &html);
    let issues = detect_page_issues(&record);

    if json {
        let output = serde_json::json!({
            "page": record,
            "issues": issues,
            "score": PageScore::for_record(&record),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let score = PageScore::for_record(&record);
        println!("📄 {} ({} bytes)", file.display(), record.page_size_bytes);
        println!("   Title: {:?} ({} chars)", record.title, record.title_length);
        println!(
            "   Meta description: {} chars, H1: {}, words: {}, images without alt: {}/{}",
            record.meta_desc_length,
            record.h1_count,
            record.word_count,
            record.images_without_alt,
            record.total_images
        );
        println!("   Score: {:.0}/100 (grade {})\n", score.score, score.grade);
        print_issue_table(&issues.iter().collect::<Vec<_>>());
    }

    if issues.iter().any(|i| i.severity == Severity::Critical) {
        Ok(EXIT_CRITICAL)
    } else {
        Ok(EXIT_OK)
    }
}

// Prints a completed scan as human-readable tables
fn print_report(report: &ScanReport, top: usize) {
    let summary = &report.summary;

    println!(
        "\n📄 Fetched {} page(s) out of {} discovered ({} failed)\n",
        summary.pages_analyzed, summary.pages_discovered, summary.pages_failed
    );

    println!("🎯 Top {} issue(s) to fix first:\n", top.min(report.issues.len()));
    print_issue_table(&prioritize(&report.issues, top));

    println!("📈 Page scores:\n");
    println!("{:<70} {:>6} {:>6}", "URL", "SCORE", "GRADE");
    println!("{}", "=".repeat(84));
    for score in &report.scores {
        println!(
            "{:<70} {:>6.0} {:>6}",
            truncate(&score.url, 67),
            score.score,
            score.grade
        );
    }
    println!();

    println!("📊 Summary:");
    println!("   🔴 Critical: {}", summary.critical);
    println!("   🟡 Warnings: {}", summary.warnings);
    println!("   🔵 Info: {}", summary.info);
    println!("   📋 Total issues: {}", summary.total_issues);
    println!("   ⭐ Average score: {:.1}/100", summary.average_score);
}

fn print_issue_table(issues: &[&Issue]) {
    if issues.is_empty() {
        println!("✅ No issues found\n");
        return;
    }

    println!(
        "{:<10} {:<18} {:<45} {:<40}",
        "SEVERITY", "CATEGORY", "ISSUE", "URL"
    );
    println!("{}", "=".repeat(116));
    for issue in issues {
        println!(
            "{:<10} {:<18} {:<45} {:<40}",
            issue.severity.to_string(),
            issue.category.to_string(),
            truncate(&issue.message, 42),
            truncate(&issue.url, 37)
        );
        println!("{:<29} ↳ {}", "", issue.recommendation);
    }
    println!();
}

// Shortens a string to at most `max` characters, adding "..." when cut
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
