//! `lostfound-seeder` -- fills a Cosmos DB container with synthetic lost items.
//!
//! Reads `appsettings.json`, `appsettings.development.json` and the
//! environment (see [`lostfound_seeder::config`]), provisions the
//! `MaterializedViewsDB` / `LostItems` container, then asks the operator how
//! many records to write, batch after batch.
//!
//! Set `SEED_STORE=memory` for a dry run without an account.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lostfound_core::catalog::validate_catalog;
use lostfound_core::synthesizer::RecordSynthesizer;
use lostfound_db::{ensure_store, CosmosClient, DocumentStore, MemoryStore};
use lostfound_seeder::config::{SeederConfig, StoreBackend};
use lostfound_seeder::console::IoConsole;
use lostfound_seeder::seeding::{farewell, greet, SeedingLoop};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lostfound_seeder=info,lostfound_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        tracing::error!("Seeder failed: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    validate_catalog().context("Catalog validation failed")?;

    let cwd = std::env::current_dir().context("Cannot determine working directory")?;
    let config = SeederConfig::load(&cwd).context("Failed to load configuration")?;

    let store: Arc<dyn DocumentStore> = match &config.backend {
        StoreBackend::Cosmos { uri, key } => {
            tracing::info!(endpoint = %uri, "Using Cosmos DB store");
            Arc::new(CosmosClient::new(uri, key).context("Invalid Cosmos DB settings")?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; records will not be persisted");
            Arc::new(MemoryStore::new())
        }
    };

    let mut console = IoConsole::stdio();
    if !greet(&mut console, &config.store)? {
        tracing::info!("Input closed before start");
        return Ok(());
    }

    let handle = ensure_store(store, &config.store)
        .await
        .context("Failed to provision the store")?;

    let synthesizer = match config.seed {
        Some(seed) => {
            tracing::info!(seed, "Using fixed random seed");
            RecordSynthesizer::seeded(seed)
        }
        None => RecordSynthesizer::from_entropy(),
    };

    let report = SeedingLoop::new(synthesizer, handle)
        .run(&mut console)
        .await?;

    tracing::info!(
        batches = report.batches.len(),
        succeeded = report.total_succeeded(),
        failed = report.total_failed(),
        "Seeding session finished"
    );

    farewell(&mut console, &config.store)?;
    Ok(())
}
