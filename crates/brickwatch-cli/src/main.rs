mod init_env;
mod notifier;
mod poll;
mod scheduler;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use brickwatch_core::{load_catalog, AppConfig, CatalogConfig, Category};
use brickwatch_scraper::{parse_price, CatalogScraper};
use brickwatch_store::CategoryStore;
use clap::{Parser, Subcommand};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::notifier::ActiveNotifier;
use crate::scheduler::PollState;

#[derive(Debug, Parser)]
#[command(name = "brickwatch")]
#[command(about = "Watch a storefront's category pages and announce new products")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Poll once now, then on every configured interval until interrupted
    Run {
        /// Log new products instead of posting them to Discord
        #[arg(long)]
        dry_run: bool,
    },
    /// Run a single poll cycle and print a summary
    Check {
        /// Restrict the cycle to one category (bestsellers, sale, exclusive, newArrivals)
        #[arg(long)]
        category: Option<String>,

        /// Log new products instead of posting them to Discord
        #[arg(long)]
        dry_run: bool,
    },
    /// Parse a raw price string and print the result as JSON
    ParsePrice {
        /// Raw price text, e.g. "PHP 3,360.00 PHP 4,199.00"
        raw: String,
    },
    /// Interactively write a .env file with the bot token and channel ids
    InitEnv {
        /// Where to write the file
        #[arg(long, default_value = ".env")]
        path: PathBuf,

        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::ParsePrice { raw }) => {
            println!("{}", serde_json::to_string_pretty(&parse_price(&raw))?);
        }
        Some(Commands::InitEnv { path, force }) => {
            let stdin = std::io::stdin();
            init_env::run_init_env(&path, force, &mut stdin.lock(), &mut std::io::stdout())?;
        }
        Some(Commands::Check { category, dry_run }) => {
            let config = init_config_and_tracing()?;
            run_check(&config, category.as_deref(), dry_run).await?;
        }
        Some(Commands::Run { dry_run }) => {
            let config = init_config_and_tracing()?;
            run_watch(&config, dry_run).await?;
        }
        None => {
            let config = init_config_and_tracing()?;
            run_watch(&config, false).await?;
        }
    }

    Ok(())
}

/// Loads `.env` and the env config, then installs the tracing subscriber,
/// filtered by `RUST_LOG` when set and the configured log level otherwise.
fn init_config_and_tracing() -> anyhow::Result<AppConfig> {
    let config = brickwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

fn load_catalog_for(config: &AppConfig) -> anyhow::Result<CatalogConfig> {
    load_catalog(&config.catalog_path)
        .with_context(|| format!("failed to load catalog {}", config.catalog_path.display()))
}

/// Runs one poll cycle over every configured category, or only `category`.
async fn run_check(
    config: &AppConfig,
    category: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog_for(config)?;
    let scraper = CatalogScraper::from_config(config)?;
    let notifier = ActiveNotifier::from_config(config, dry_run)?;
    let mut store = CategoryStore::new(catalog.configured_categories());

    let categories: Vec<Category> = match category {
        Some(key) => vec![key.parse()?],
        None => catalog.configured_categories().collect(),
    };

    tracing::info!(
        categories = categories.len(),
        notifier = notifier.label(),
        "running single poll cycle"
    );
    let summary =
        poll::poll_categories(&scraper, &catalog, &mut store, &notifier, &categories).await;
    println!("{summary}");
    Ok(())
}

/// Polls immediately, then every `poll_interval_minutes` until Ctrl-C or
/// SIGTERM.
async fn run_watch(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let catalog = load_catalog_for(config)?;
    let state = Arc::new(Mutex::new(PollState {
        scraper: CatalogScraper::from_config(config)?,
        store: CategoryStore::new(catalog.configured_categories()),
        catalog,
        notifier: ActiveNotifier::from_config(config, dry_run)?,
    }));

    tracing::info!(
        store = %config.store_name,
        interval_minutes = config.poll_interval_minutes,
        "starting watcher"
    );
    if let Some(summary) = scheduler::run_cycle(&state).await {
        tracing::info!(
            new = summary.total_new(),
            notified = summary.total_notified(),
            "initial poll cycle complete"
        );
    }

    let mut scheduler =
        scheduler::build_scheduler(Arc::clone(&state), config.poll_interval_minutes).await?;
    shutdown_signal().await;
    scheduler.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduler");
}
