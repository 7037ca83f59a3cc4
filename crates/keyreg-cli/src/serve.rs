//! # Serve Subcommand
//!
//! Runs the HTTP surface and the periodic reconciliation scheduler in
//! one process. The scheduler is a fixed-interval tokio timer; a tick
//! that finds a cycle already in flight, or a cycle that defers on a
//! fetch failure, is logged and skipped — the process always continues
//! to the next tick.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use tokio::time::MissedTickBehavior;
use url::Url;

use keyreg_api::AppState;
use keyreg_sync::{
    CacheStore, FileCacheStore, InMemoryRemoteStore, JwksClient, KeyRegistry, MemoryCacheStore,
    Ready, ReconcileError,
};

/// Arguments for the serve subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// JWKS endpoint to watch; repeatable.
    #[arg(long = "jwks-url", required = true)]
    pub jwks_urls: Vec<Url>,

    /// Listen address for the HTTP surface.
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,

    /// Seconds between scheduled reconciliation cycles.
    #[arg(long, default_value_t = 300)]
    pub interval_secs: u64,

    /// Path for the accepted-set cache; omit to keep it in memory only.
    #[arg(long)]
    pub cache_path: Option<PathBuf>,
}

/// Run the daemon until interrupted.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let source = Arc::new(
        JwksClient::new(args.jwks_urls.clone()).context("failed to build JWKS client")?,
    );
    let store = Arc::new(InMemoryRemoteStore::new());
    let cache_store: Arc<dyn CacheStore> = match &args.cache_path {
        Some(path) => Arc::new(FileCacheStore::new(path)),
        None => Arc::new(MemoryCacheStore::new()),
    };

    let registry = Arc::new(
        KeyRegistry::new(source, store, cache_store)
            .initialize()
            .context("failed to load the accepted-set cache")?,
    );

    spawn_scheduler(registry.clone(), Duration::from_secs(args.interval_secs));

    let app = keyreg_api::app(AppState::new(registry));
    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("failed to bind {}", args.listen))?;
    tracing::info!(listen = %args.listen, interval_secs = args.interval_secs, "keyreg serving");
    axum::serve(listener, app).await?;
    Ok(())
}

fn spawn_scheduler(registry: Arc<KeyRegistry<Ready>>, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // A slow cycle must not cause a burst of catch-up ticks.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            match registry.reconcile().await {
                Ok(report) => {
                    tracing::info!(
                        added = report.added.len(),
                        removed = report.removed.len(),
                        failed = report.failed.len(),
                        skipped = report.skipped.len(),
                        "scheduled reconciliation settled"
                    );
                }
                Err(ReconcileError::InProgress) => {
                    tracing::debug!("cycle already in flight, skipping tick");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "scheduled reconciliation deferred");
                }
            }
        }
    });
}
