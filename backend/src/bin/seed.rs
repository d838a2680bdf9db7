//! Seed the VetPath database with sample data.

use clap::Parser;
use vetpath_backend::cli::{run_seed, SeedCli};
use vetpath_backend::config::Config;
use vetpath_backend::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = SeedCli::parse();

    let config = Config::from_env()?;
    telemetry::init_tracing(&config);

    let report = run_seed(cli).await?;
    for (collection, count) in &report.inserted {
        println!("Inserted {count} {collection}");
    }
    if report.skipped > 0 {
        println!("Skipped {} existing records", report.skipped);
    }
    println!("Database seeded successfully");

    Ok(())
}
