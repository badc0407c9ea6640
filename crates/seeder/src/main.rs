// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use diagnostics::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use seeder::config::{DEFAULT_BUCKET, DEFAULT_SENSORS_FILE, DEFAULT_WORKERS};
use seeder::{DEFAULT_YEARS, MemoryStore, S3Settings, S3Store, SeedConfig, SeedOutcome, SeedStore};
use std::path::PathBuf;
use std::sync::Arc;

/// Seed an S3-compatible bucket with placeholder sensor CSV files.
///
/// Connection settings come from MINIO_ENDPOINT, MINIO_ACCESS_KEY,
/// MINIO_SECRET_KEY, MINIO_SECURE and MINIO_REGION. Nothing is written
/// when the bucket already contains objects. Per-object progress is
/// logged to stderr at info level; set SEEDER_LOG=off to silence it.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// JSON array of sensor records; only `id` is read.
    #[arg(long, default_value = DEFAULT_SENSORS_FILE)]
    sensors: PathBuf,

    /// Target bucket, created when missing.
    #[arg(long, default_value = DEFAULT_BUCKET)]
    bucket: String,

    /// Years to seed, comma separated.
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_YEARS)]
    years: Vec<i32>,

    /// Number of concurrent uploads.
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Plan and upload into memory only; no network access.
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn seed_config(&self) -> SeedConfig {
        SeedConfig {
            sensors_path: self.sensors.clone(),
            bucket: self.bucket.clone(),
            years: self.years.clone(),
            workers: self.workers,
        }
    }
}

fn open_store(cli: &Cli) -> Result<Arc<dyn SeedStore>> {
    if cli.dry_run {
        let store: Arc<dyn SeedStore> = Arc::new(MemoryStore::new(cli.bucket.as_str()));
        return Ok(store);
    }

    let settings = S3Settings::from_env();
    let endpoint = settings.endpoint_url();
    debug!("Using object storage at {endpoint}", endpoint: endpoint.as_str());

    let store: Arc<dyn SeedStore> = Arc::new(
        S3Store::connect(&cli.bucket, &settings)
            .with_context(|| format!("Failed to configure bucket '{}'", cli.bucket))?,
    );
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    // One "Uploaded ..." line per object unless SEEDER_LOG says otherwise.
    init_with_default("info");

    let cli = Cli::parse();
    let config = cli.seed_config();
    let store = open_store(&cli)?;
    let mut rng = StdRng::from_entropy();

    let outcome = seeder::seed(store, &config, &mut rng)
        .await
        .with_context(|| format!("Seeding bucket '{}' failed", config.bucket))?;

    match outcome {
        SeedOutcome::AlreadySeeded { bucket } => {
            println!("Bucket '{bucket}' already contains data. Skipping upload.");
        }
        SeedOutcome::Completed { summary, .. } => {
            for failure in &summary.failures {
                eprintln!("Failed {}: {}", failure.key, failure.message);
            }
            println!("\n{summary}");
        }
    }

    Ok(())
}
