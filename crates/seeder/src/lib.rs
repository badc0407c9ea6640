// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Seeds an S3-compatible bucket with placeholder sensor files
//!
//! Every sensor listed in a JSON file gets a handful of monthly CSV
//! placeholders per year, named `{sensor}_{year}_{month:02}.csv`. A run is
//! a no-op when the bucket already holds any object, so seeding can be
//! repeated safely.
//!
//! # Architecture
//!
//! - **sensors**: reads the `id` of each record in the sensors file
//! - **plan**: picks 2-4 distinct random months per sensor and year
//! - **guard**: creates a missing bucket, refuses a non-empty one
//! - **upload**: writes placeholders through a fixed-size worker pool
//! - **store**: the bucket operations, backed by S3 or by memory
//!
//! # Usage
//!
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use rand::SeedableRng;
//! use seeder::{S3Settings, S3Store, SeedConfig, SeedOutcome, seed};
//! use std::sync::Arc;
//!
//! let config = SeedConfig::default();
//! let store = Arc::new(S3Store::connect(&config.bucket, &S3Settings::from_env())?);
//! let mut rng = rand::rngs::StdRng::from_entropy();
//!
//! if let SeedOutcome::Completed { summary, .. } = seed(store, &config, &mut rng).await? {
//!     println!("{summary}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
pub mod guard;
pub mod plan;
mod s3_store;
mod seed;
pub mod sensors;
pub mod store;
pub mod upload;

pub use config::{S3Settings, SeedConfig};
pub use error::SeedError;
pub use guard::{BucketState, check_bucket};
pub use plan::{DEFAULT_YEARS, UploadTask, plan_tasks};
pub use s3_store::S3Store;
pub use seed::{SeedOutcome, seed};
pub use sensors::{SensorId, load_sensors, parse_sensors};
pub use store::{MemoryStore, SeedStore};
pub use upload::{UploadFailure, UploadSummary, upload_all};

/// Result type for seeding operations
pub type Result<T> = std::result::Result<T, SeedError>;
