//! Sumi-Lens main entry point
//!
//! This is the command-line interface for the Sumi-Lens page scraper.

use anyhow::{bail, Context};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use sumi_lens::api::handle_request;
use sumi_lens::config::{load_config_with_hash, Config};
use sumi_lens::output::{
    generate_report_summary, generate_report_summary_with_hash, print_statistics,
    JsonOutputHandler, MarkdownOutputHandler, OutputHandler,
};
use sumi_lens::{validate_url, Scraper};
use tracing_subscriber::EnvFilter;

/// Sumi-Lens: web content extraction and quality scoring
///
/// Sumi-Lens fetches web pages, extracts their content, metadata and
/// structure, and scores them for content quality, SEO and accessibility.
#[derive(Parser, Debug)]
#[command(name = "sumi-lens")]
#[command(version = "1.0.0")]
#[command(about = "Web content extraction and quality scoring", long_about = None)]
struct Cli {
    /// URLs to scrape
    #[arg(value_name = "URLS")]
    urls: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read URLs from a file, one per line (`#` starts a comment)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write the JSON reports to this file
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Write the Markdown summary to this file
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Answer a JSON scrape request read from FILE (`-` for stdin)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["urls", "input", "validate_only"])]
    request: Option<String>,

    /// Validate the URLs without fetching them
    #[arg(long)]
    validate_only: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(source) = &cli.request {
        return handle_api_request(config, source).await;
    }

    let urls = collect_urls(&cli)?;
    if urls.is_empty() {
        bail!("No URLs given; pass them as arguments or with --input");
    }

    if cli.validate_only {
        return handle_validate_only(&urls);
    }

    handle_scrape(&cli, config, config_hash, &urls).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_lens=info,warn"),
            1 => EnvFilter::new("sumi_lens=debug,info"),
            2 => EnvFilter::new("sumi_lens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Gathers URLs from the positional arguments and the input file
fn collect_urls(cli: &Cli) -> anyhow::Result<Vec<String>> {
    let mut urls = cli.urls.clone();

    if let Some(path) = &cli.input {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        urls.extend(parse_url_list(&content));
    }

    Ok(urls)
}

/// Parses a URL list file: one URL per line, blank lines and `#` comments skipped
fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Handles --validate-only: prints validation results without fetching
fn handle_validate_only(urls: &[String]) -> anyhow::Result<()> {
    println!("=== Sumi-Lens URL Validation ===\n");

    let mut invalid = 0;
    for input in urls {
        let result = validate_url(input);
        if result.is_valid {
            println!("✓ {} -> {}", input, result.url);
        } else {
            invalid += 1;
            println!("✗ {}", input);
        }
        for error in &result.errors {
            println!("    error: {}", error);
        }
        for warning in &result.warnings {
            println!("    warning: {}", warning);
        }
    }

    println!("\n{} valid, {} invalid", urls.len() - invalid, invalid);
    Ok(())
}

/// Handles --request: answers a JSON scrape request on stdout
async fn handle_api_request(config: Config, source: &str) -> anyhow::Result<()> {
    let body = if source == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read request from stdin")?;
        body
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))?
    };

    let scraper = Scraper::new(config)?;
    let response = handle_request(&scraper, &body).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(
    cli: &Cli,
    config: Config,
    config_hash: Option<String>,
    urls: &[String],
) -> anyhow::Result<()> {
    let json_path = cli
        .json
        .clone()
        .or_else(|| config.output.report_path.as_ref().map(PathBuf::from));
    let summary_path = cli
        .summary
        .clone()
        .or_else(|| config.output.summary_path.as_ref().map(PathBuf::from));

    let scraper = Scraper::new(config)?;
    let reports = scraper.scrape_multiple_websites(urls).await;

    let summary = match config_hash {
        Some(hash) => generate_report_summary_with_hash(&reports, hash),
        None => generate_report_summary(&reports),
    };

    if let Some(path) = &json_path {
        write_output(&JsonOutputHandler::new(path), path, &reports, &summary)?;
    }
    if let Some(path) = &summary_path {
        write_output(&MarkdownOutputHandler::new(path), path, &reports, &summary)?;
    }

    if !cli.quiet {
        print_statistics(&summary, &reports);
    }

    Ok(())
}

fn write_output(
    handler: &dyn OutputHandler,
    path: &Path,
    reports: &[sumi_lens::ScrapingReport],
    summary: &sumi_lens::output::BatchSummary,
) -> anyhow::Result<()> {
    handler
        .write_reports(reports, summary)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("✓ Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_list() {
        let content = "# seeds\nhttps://example.com\n\n  example.org  \n# done\n";
        assert_eq!(
            parse_url_list(content),
            vec!["https://example.com", "example.org"]
        );
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "sumi-lens",
            "example.com",
            "https://example.org",
            "--json",
            "out.json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.urls.len(), 2);
        assert_eq!(cli.json, Some(PathBuf::from("out.json")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_request_conflicts_with_urls() {
        assert!(Cli::try_parse_from(["sumi-lens", "example.com", "--request", "-"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["sumi-lens", "-q", "-v", "example.com"]).is_err());
    }
}
