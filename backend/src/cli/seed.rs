//! `vetpath-seed`: load the sample dataset into the document store.

use clap::Parser;
use tracing::info;

use crate::cli::sample_data::sample_documents;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::Collection;
use crate::storage::{DocumentStore, PostgresDocumentStore};

/// Seed the VetPath database with sample records
#[derive(Parser, Debug)]
#[command(name = "vetpath-seed")]
#[command(about = "Load sample users, courses, certifications and more", long_about = None)]
pub struct SeedCli {
    /// Database URL (can also be set via DATABASE_URL env var)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Clear every collection before inserting
    #[arg(long)]
    pub reset: bool,

    /// Skip running schema migrations
    #[arg(long)]
    pub skip_migrations: bool,
}

/// Per-collection outcome of a seeding run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub cleared: u64,
    pub inserted: Vec<(Collection, usize)>,
    /// Documents skipped because their id already existed
    pub skipped: usize,
}

impl SeedReport {
    pub fn total_inserted(&self) -> usize {
        self.inserted.iter().map(|(_, n)| n).sum()
    }

    pub fn inserted_into(&self, collection: Collection) -> usize {
        self.inserted
            .iter()
            .find(|(c, _)| *c == collection)
            .map_or(0, |(_, n)| *n)
    }
}

/// Insert the sample dataset into `store`.
///
/// With `reset`, every collection is emptied first. Without it, records
/// whose id already exists are left alone so the command can be re-run.
pub async fn seed_store(store: &dyn DocumentStore, reset: bool) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    if reset {
        for collection in Collection::ALL {
            let removed = store.clear(collection).await?;
            if removed > 0 {
                info!(collection = %collection, removed, "Cleared collection");
            }
            report.cleared += removed;
        }
    }

    for (collection, documents) in sample_documents() {
        let mut inserted = 0;
        for document in documents {
            match store.insert(collection, document).await {
                Ok(_) => inserted += 1,
                Err(AppError::Conflict(msg)) => {
                    tracing::debug!(collection = %collection, "{msg}");
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        info!(collection = %collection, inserted, "Seeded collection");
        report.inserted.push((collection, inserted));
    }

    Ok(report)
}

/// Run the seed command against Postgres.
pub async fn run(cli: SeedCli) -> Result<SeedReport> {
    let pool = db::create_pool(&cli.database_url).await?;
    if !cli.skip_migrations {
        db::run_migrations(&pool).await?;
    }

    let store = PostgresDocumentStore::new(pool.clone());
    let report = seed_store(&store, cli.reset).await?;
    pool.close().await;

    info!(
        inserted = report.total_inserted(),
        skipped = report.skipped,
        cleared = report.cleared,
        "Database seeded"
    );
    Ok(report)
}
