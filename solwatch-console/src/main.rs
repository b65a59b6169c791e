//! Solwatch Console
//!
//! Terminal console for watching remotely-executed solutions: submit a
//! repository against a target server, watch the solution list, tail one
//! solution's log incrementally, request cancellation.
//!
//! Architecture:
//! - ConfigStore: the two endpoint URLs every request needs
//! - PollingScheduler: channel-keyed recurring fetches
//! - Controllers: list and detail view-state owners
//! - ViewRouter: exclusive toggle between the two views
//!
//! The backend executes the solutions; this binary only polls its HTTP
//! contract and renders.

mod config;
mod controller;
mod input;
mod scheduler;
#[cfg(test)]
mod testutil;
mod view;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigStore, EndpointConfig};
use crate::controller::detail::SolutionDetailController;
use crate::controller::list::SolutionListController;
use crate::controller::router::{ActiveView, ViewRouter};
use crate::input::Command;
use crate::scheduler::PollingScheduler;
use crate::view::{TermDetailView, TermListView};
use solwatch_client::{ConsoleClient, SolutionBackend};
use solwatch_core::domain::log::LogKind;

#[derive(Parser)]
#[command(name = "solwatch")]
#[command(about = "Console for watching remotely-executed solutions", long_about = None)]
struct Cli {
    /// Client-runner backend URL
    #[arg(
        long,
        env = "SOLWATCH_BACKEND_URL",
        default_value = "http://localhost:8080"
    )]
    backend_url: String,

    /// Override the config store location
    #[arg(long, env = "SOLWATCH_CONFIG")]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the two endpoint URLs every request needs
    Setup {
        /// Repository holding the solution sources
        #[arg(long)]
        repo_url: String,

        /// Target game server the solutions play against
        #[arg(long)]
        server_url: String,
    },
    /// Submit the configured repository for execution
    Send,
    /// Watch solutions interactively
    Watch {
        /// Poll period in milliseconds, shared by the list, status and log
        /// channels
        #[arg(long, default_value_t = 1500)]
        interval_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solwatch=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let store = match cli.config_path {
        Some(path) => ConfigStore::with_path(path),
        None => ConfigStore::open_default()?,
    };

    match cli.command {
        Commands::Setup {
            repo_url,
            server_url,
        } => setup(&store, repo_url, server_url),
        Commands::Send => send(&store, &cli.backend_url).await,
        Commands::Watch { interval_ms } => {
            watch(&store, &cli.backend_url, Duration::from_millis(interval_ms)).await
        }
    }
}

fn setup(store: &ConfigStore, repo_url: String, server_url: String) -> Result<()> {
    store.store(&EndpointConfig {
        repo_url,
        server_url,
    })?;
    println!("Configuration written to {}", store.path().display());
    Ok(())
}

/// Both endpoint URLs must exist before any network operation; otherwise
/// the user is sent to `setup` rather than running degraded.
fn require_config(store: &ConfigStore) -> Result<EndpointConfig> {
    match store.load()? {
        Some(config) => Ok(config),
        None => bail!(
            "endpoint URLs are not configured; run \
             `solwatch setup --repo-url <url> --server-url <url>` first"
        ),
    }
}

async fn send(store: &ConfigStore, backend_url: &str) -> Result<()> {
    let config = require_config(store)?;
    let client = ConsoleClient::new(backend_url);
    client
        .submit(&config.repo_url, &config.server_url)
        .await
        .context("failed to submit solution")?;
    println!("{}", "Solution submitted.".green());
    Ok(())
}

async fn watch(store: &ConfigStore, backend_url: &str, period: Duration) -> Result<()> {
    let config = require_config(store)?;

    let backend: Arc<dyn SolutionBackend> = Arc::new(ConsoleClient::new(backend_url));
    let scheduler = Arc::new(PollingScheduler::new());
    let list = Arc::new(SolutionListController::new(
        backend.clone(),
        config.clone(),
        scheduler.clone(),
        Arc::new(TermListView::new()),
        period,
    ));
    let detail = Arc::new(SolutionDetailController::new(
        backend.clone(),
        config.clone(),
        scheduler.clone(),
        Arc::new(TermDetailView::new()),
        period,
    ));
    let router = ViewRouter::new(list.clone(), detail.clone());

    println!(
        "{}  {}",
        format!("Watching {}", config.server_url).bold(),
        "(type `help` for commands)".dimmed()
    );
    router.show_list();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match input::parse(line) {
            Some(Command::Open(token)) => open(&router, &list, &token, LogKind::Runtime).await,
            Some(Command::Build(token)) => open(&router, &list, &token, LogKind::Build).await,
            Some(Command::Back) => router.show_list(),
            Some(Command::Send) => {
                // Fire-and-forget: the new solution shows up in the next
                // list poll.
                if let Err(e) = backend.submit(&config.repo_url, &config.server_url).await {
                    warn!("submit failed: {e}");
                }
            }
            Some(Command::Kill) => match router.active() {
                ActiveView::Detail(_) => detail.cancel().await,
                ActiveView::List => {
                    println!("{}", "Open a solution before `kill`.".yellow());
                }
            },
            Some(Command::Quit) => break,
            Some(Command::Help) | None => println!("{}", input::usage().dimmed()),
        }
    }

    scheduler.stop_all();
    Ok(())
}

async fn open(
    router: &ViewRouter,
    list: &Arc<SolutionListController>,
    token: &str,
    kind: LogKind,
) {
    match list.resolve_selection(token) {
        Some(id) => router.show_detail(id, kind).await,
        None => println!(
            "{}",
            format!("No solution matching `{token}` in the current list.").yellow()
        ),
    }
}
