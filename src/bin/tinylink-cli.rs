//! Terminal client for the tinylink service.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts when arguments are missing)
//! tinylink-cli shorten https://example.com/some/long/page
//!
//! # Shorten under a custom alias and copy the result
//! tinylink-cli shorten https://example.com --alias docs-home --copy
//!
//! # Show click statistics
//! tinylink-cli stats docs-home
//!
//! # Measure redirect throughput
//! tinylink-cli bench docs-home --requests 2000 --concurrency 50
//! ```
//!
//! # Environment Variables
//!
//! - `TINYLINK_BASE_URL`: backend address (default `http://127.0.0.1:8000`)
//! - `RUST_LOG`: diagnostics on stderr (default `warn`)

use tinylink::client::load::{DEFAULT_LOAD_CONCURRENCY, DEFAULT_LOAD_REQUESTS};
use tinylink::client::{
    ClientError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, LoadPlan, Osc52Clipboard,
    ShortenerClient, StatsView, copy_link,
};
use tinylink::logging;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::time::Duration;

/// Shorten URLs and inspect their click statistics.
#[derive(Parser)]
#[command(name = "tinylink-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "TINYLINK_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// Long URL to shorten
        url: Option<String>,

        /// Custom alias for the short code
        #[arg(short, long)]
        alias: Option<String>,

        /// Copy the short link to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// Show click statistics for a short code
    Stats {
        /// Short code to look up
        code: Option<String>,
    },

    /// Load-test the redirect endpoint for an existing short code
    Bench {
        /// Short code to request
        code: String,

        /// Total number of requests
        #[arg(short = 'n', long, default_value_t = DEFAULT_LOAD_REQUESTS)]
        requests: usize,

        /// Requests in flight at once
        #[arg(short, long, default_value_t = DEFAULT_LOAD_CONCURRENCY)]
        concurrency: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init_tracing("warn", "text");

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e.to_string().red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = ShortenerClient::new(&cli.base_url, Duration::from_secs(cli.timeout))?;

    match cli.command {
        Commands::Shorten { url, alias, copy } => shorten(&client, url, alias, copy).await,
        Commands::Stats { code } => stats(&client, code).await,
        Commands::Bench {
            code,
            requests,
            concurrency,
        } => bench(&client, &code, LoadPlan { requests, concurrency }).await,
    }
}

/// Reads a line from the terminal, or returns an empty string when stdin is
/// not a terminal so the caller reports the missing value.
fn prompt(label: &str) -> Result<String> {
    if !io::stdin().is_terminal() {
        return Ok(String::new());
    }

    Ok(Input::<String>::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?)
}

/// Shortens a URL, prompting for whatever was not passed on the command line.
///
/// In interactive mode (URL prompted) the alias is prompted too and the user
/// is asked whether to copy the result.
async fn shorten(
    client: &ShortenerClient,
    url: Option<String>,
    alias: Option<String>,
    copy: bool,
) -> Result<()> {
    let interactive = url.is_none();

    let url = match url {
        Some(u) => u,
        None => prompt("Long URL")?,
    };

    if url.trim().is_empty() {
        return Err(ClientError::EmptyUrl.into());
    }

    let alias = match alias {
        Some(a) => a,
        None if interactive => prompt("Custom alias (optional)")?,
        None => String::new(),
    };

    let view = client.shorten(&url, &alias).await?;

    println!("{}", "✅ Short URL created".green().bold());
    println!("  {}", view.link_text.bright_cyan().underline());

    let copy = copy
        || (interactive
            && io::stdin().is_terminal()
            && Confirm::new()
                .with_prompt("Copy to clipboard?")
                .default(true)
                .interact()?);

    if copy {
        let mut clipboard = Osc52Clipboard::new(io::stdout());
        let ack = copy_link(&view, &mut clipboard)?;
        println!("{}", ack.green());
    }

    Ok(())
}

/// Prints click statistics for a short code.
///
/// # Output Format
///
/// ```text
/// 📊 Stats for docs-home
///
///   Clicks:        3
///   Original URL:  https://example.com/
///   Last accessed: 2024-01-15 10:30:00
/// ```
async fn stats(client: &ShortenerClient, code: Option<String>) -> Result<()> {
    let code = match code {
        Some(c) => c,
        None => prompt("Short code")?,
    };

    let remote = client.stats(&code).await?;
    let view = StatsView::new(
        remote.clicks,
        &remote.long_url,
        remote.last_accessed.as_deref(),
        &Local,
    );

    println!("{} {}", "📊 Stats for".bright_blue().bold(), code.trim().cyan());
    println!();
    println!(
        "  {:<15}{}",
        "Clicks:".bright_white(),
        view.clicks.to_string().bright_yellow()
    );
    println!("  {:<15}{}", "Original URL:".bright_white(), view.original_url);
    println!("  {:<15}{}", "Last accessed:".bright_white(), view.last_accessed);

    Ok(())
}

/// Runs the redirect load test and prints throughput.
///
/// # Output Format
///
/// ```text
/// 🚀 2000 requests to http://127.0.0.1:8000/docs-home, 50 concurrent
///
///   Time taken:    1.84 s
///   RPS:           1086.96 requests/second
///   Redirects:     2000
///   307:           2000
/// ```
async fn bench(client: &ShortenerClient, code: &str, plan: LoadPlan) -> Result<()> {
    println!(
        "{} {} requests to {}/{}, {} concurrent",
        "🚀".bright_blue(),
        plan.requests,
        client.base_url(),
        code.trim(),
        plan.concurrency
    );

    let report = client.redirect_load(code, plan).await?;

    println!();
    println!(
        "  {:<15}{:.2} s",
        "Time taken:".bright_white(),
        report.elapsed.as_secs_f64()
    );
    println!(
        "  {:<15}{} requests/second",
        "RPS:".bright_white(),
        format!("{:.2}", report.requests_per_second()).bright_yellow()
    );
    println!("  {:<15}{}", "Redirects:".bright_white(), report.redirects());
    for (status, count) in &report.statuses {
        println!("  {:<15}{}", format!("{status}:").bright_white(), count);
    }
    if report.failures > 0 {
        println!(
            "  {:<15}{}",
            "No response:".bright_white(),
            report.failures.to_string().red()
        );
    }

    Ok(())
}
