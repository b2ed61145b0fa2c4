use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::*;
use sitecount_core::report::{CrawlReport, ReportFormat, render_report, save_report};
use std::path::{Path, PathBuf};
use tracing::Level;

// Re-export crawl types and functions from sitecount-core
pub use sitecount_core::crawl::{CrawlOptions, execute_crawl};

/// Maps the verbosity flags to a log level. `--quiet` wins over `--verbose`.
pub fn log_level(quiet: bool, verbose: bool) -> Level {
    if quiet {
        Level::WARN
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Diagnostics go to stdout alongside the report, as the crawl proceeds.
pub fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Builds crawl options from parsed arguments.
pub fn crawl_options(args: &ArgMatches) -> Result<CrawlOptions> {
    let url = args
        .get_one::<String>("URL")
        .ok_or_else(|| anyhow!("a root URL is required"))?;

    Ok(CrawlOptions {
        max_pages: args.get_one::<usize>("max-pages").copied(),
        https_upgrade: !args.get_flag("keep-scheme"),
        ..CrawlOptions::new(url.as_str())
    })
}

pub fn report_format(args: &ArgMatches) -> Result<ReportFormat> {
    let format = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    ReportFormat::from_str(format).ok_or_else(|| anyhow!("unknown report format '{}'", format))
}

/// Prints the report, or writes it to `output` when given.
pub fn emit_report(report: &CrawlReport, format: ReportFormat, output: Option<&Path>) -> Result<()> {
    let content = render_report(report, format).context("failed to render report")?;

    match output {
        Some(path) => {
            save_report(&content, path)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            println!(
                "{} Report saved to {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None => print!("{}", content),
    }

    Ok(())
}

pub async fn handle_crawl(args: &ArgMatches) -> Result<()> {
    let options = crawl_options(args)?;
    let format = report_format(args)?;
    let output = args.get_one::<PathBuf>("output");

    let report = execute_crawl(options).await?;

    if report.summary.pages_failed > 0 {
        println!(
            "{} {} of {} pages could not be crawled",
            "⚠".yellow().bold(),
            report.summary.pages_failed,
            report.summary.pages_discovered
        );
    }
    if report.summary.dropped_by_limit > 0 {
        println!(
            "{} Page limit reached, {} links left unvisited",
            "⚠".yellow().bold(),
            report.summary.dropped_by_limit
        );
    }

    emit_report(&report, format, output.map(PathBuf::as_path))
}
