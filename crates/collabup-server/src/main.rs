//! CollabUp Recommendation Server
//!
//! Serves ranked matches of student projects, startups, mentors and faculty
//! for free-text queries over HTTP.
//!
//! Endpoints:
//! - POST /recommend
//! - GET /health
//! - GET /debug-query
//! - GET /collections-info

use std::io;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use collabup_core::Storage;
use collabup_server::{serve, AppState, ServerConfig};

/// Filter from `RUST_LOG` directives, `info` when unset, blank or invalid
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn init_logging(json: bool) {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(false).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse before logging init so --help/--version print cleanly
    let config = ServerConfig::parse();
    init_logging(config.json_logs);

    info!("CollabUp server v{} starting...", env!("CARGO_PKG_VERSION"));

    let storage = Storage::new(config.db_path.clone()).context("Failed to initialize storage")?;
    for collection in storage.collections_info()? {
        info!(
            collection = collection.collection,
            count = collection.count,
            "Collection loaded"
        );
    }

    let state = AppState::new(Arc::new(storage));
    serve(&config, state).await?;

    Ok(())
}
