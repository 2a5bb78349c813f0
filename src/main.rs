//! Crawl-Console main entry point
//!
//! This is the command-line interface for the Crawl-Console crawl client.

use anyhow::{bail, Context};
use clap::Parser;
use crawl_console::config::{load_config, Config, MAX_DEPTH, MIN_DEPTH};
use crawl_console::history::{KeyValueStore, MemoryStore, SqliteStore};
use crawl_console::output::report::{print_error, print_history, print_progress, print_results};
use crawl_console::output::{write_csv, write_json};
use crawl_console::{HttpCrawlService, SessionController};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

type Controller = SessionController<HttpCrawlService, Box<dyn KeyValueStore>>;

/// Crawl-Console: submit crawl jobs and keep track of the results
///
/// Crawl-Console sends a URL and depth to a crawl service, shows the
/// progress and the pages it found, remembers the ten most recent crawls
/// and exports results as CSV or JSON.
#[derive(Parser, Debug)]
#[command(name = "crawl-console")]
#[command(version)]
#[command(about = "Client for a remote crawl service", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// URL to crawl
    #[arg(long, conflicts_with_all = ["replay", "history", "clear_history"])]
    url: Option<String>,

    /// Crawl depth (defaults to the configured depth)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(MIN_DEPTH as i64..=MAX_DEPTH as i64))]
    depth: Option<u8>,

    /// Re-run the N-th entry of the recent crawl list (1 = newest)
    #[arg(long, value_name = "N", conflicts_with_all = ["url", "history", "clear_history"])]
    replay: Option<usize>,

    /// List recent crawls and exit
    #[arg(long, conflicts_with_all = ["url", "replay", "clear_history"])]
    history: bool,

    /// Forget all recent crawls and exit
    #[arg(long, conflicts_with_all = ["url", "replay", "history"])]
    clear_history: bool,

    /// Write crawl_results.csv after a successful crawl
    #[arg(long)]
    export_csv: bool,

    /// Write crawl_results.json after a successful crawl
    #[arg(long)]
    export_json: bool,

    /// Directory for exports (overrides the configured output-dir)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Keep history in memory only for this run
    #[arg(long)]
    ephemeral: bool,

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

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let store: Box<dyn KeyValueStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        let path = Path::new(&config.history.database_path);
        Box::new(
            SqliteStore::new(path)
                .with_context(|| format!("failed to open history at {}", path.display()))?,
        )
    };

    let controller = SessionController::from_config(&config, store)?;
    if let Some(depth) = cli.depth {
        controller.set_depth(depth);
    }

    if cli.history {
        print_history(&controller.history());
    } else if cli.clear_history {
        controller.clear_history()?;
        println!("✓ History cleared");
    } else if let Some(n) = cli.replay {
        handle_replay(&controller, &config, &cli, n).await?;
    } else if let Some(url) = cli.url.as_deref() {
        let depth = controller.depth();
        handle_crawl(&controller, &config, &cli, url, depth).await?;
    } else {
        print_results(&[], "");
        print_history(&controller.history());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawl_console=warn,warn"),
            1 => EnvFilter::new("crawl_console=info,warn"),
            2 => EnvFilter::new("crawl_console=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `--replay N`: looks up the history entry and crawls it again
async fn handle_replay(
    controller: &Controller,
    config: &Config,
    cli: &Cli,
    n: usize,
) -> anyhow::Result<()> {
    let history = controller.history();
    let Some(entry) = n.checked_sub(1).and_then(|i| history.get(i)) else {
        bail!(
            "no history entry {} ({} recent crawls recorded)",
            n,
            history.len()
        );
    };

    tracing::info!("Replaying {}", entry.url);
    let outcome = controller.replay(&entry.url).await;
    report(controller, config, cli)?;
    outcome.context("crawl did not complete")?;
    Ok(())
}

/// Handles `--url`: runs one crawl
async fn handle_crawl(
    controller: &Controller,
    config: &Config,
    cli: &Cli,
    url: &str,
    depth: u8,
) -> anyhow::Result<()> {
    let outcome = controller.submit(url, depth).await;
    report(controller, config, cli)?;
    outcome.context("crawl did not complete")?;
    Ok(())
}

/// Prints the session and writes the requested exports
fn report(controller: &Controller, config: &Config, cli: &Cli) -> anyhow::Result<()> {
    print_progress(&controller.progress_log());
    println!();

    let error = controller.error();
    print_error(error.as_ref());
    if error.is_some() {
        println!();
    }

    let results = controller.results();
    print_results(&results, &controller.url());

    if controller.state().is_success() && (cli.export_csv || cli.export_json) {
        let dir = cli
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.export.output_dir));

        if cli.export_csv {
            let path = write_csv(&results, &dir)?;
            println!("✓ CSV exported to: {}", path.display());
        }
        if cli.export_json {
            let path = write_json(&results, &dir)?;
            println!("✓ JSON exported to: {}", path.display());
        }
    }

    Ok(())
}
