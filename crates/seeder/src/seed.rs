// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! One seeding run: load sensors, guard the bucket, plan, upload.

use crate::Result;
use crate::config::SeedConfig;
use crate::guard::{BucketState, check_bucket};
use crate::plan::plan_tasks;
use crate::sensors::load_sensors;
use crate::store::SeedStore;
use crate::upload::{UploadSummary, upload_all};
use diagnostics::*;
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The bucket already held objects; nothing was written.
    AlreadySeeded { bucket: String },
    /// Uploads ran against an empty or newly created bucket.
    Completed {
        bucket: String,
        state: BucketState,
        sensors: usize,
        summary: UploadSummary,
    },
}

/// Run the seeder against `store`.
///
/// Fails on invalid configuration, an unreadable sensors file, or a
/// storage error during the bucket check. Upload failures do not fail
/// the run; they are reported in the summary.
pub async fn seed<R>(
    store: Arc<dyn SeedStore>,
    config: &SeedConfig,
    rng: &mut R,
) -> Result<SeedOutcome>
where
    R: Rng + ?Sized,
{
    config.validate()?;

    let sensors = load_sensors(&config.sensors_path)?;
    let sensor_count = sensors.len();
    let sensors_file = config.sensors_path.display().to_string();
    debug!(
        "Loaded {sensor_count} sensors from {sensors_file}",
        sensor_count: sensor_count,
        sensors_file: sensors_file.as_str()
    );

    let guard_store = Arc::clone(&store);
    let state = tokio::task::spawn_blocking(move || check_bucket(guard_store.as_ref())).await??;

    let bucket = store.bucket().to_string();
    if !state.may_upload() {
        info!("Bucket {bucket} already contains data, skipping upload", bucket: bucket.as_str());
        return Ok(SeedOutcome::AlreadySeeded { bucket });
    }

    let tasks = plan_tasks(&sensors, &config.years, rng);
    let task_count = tasks.len();
    debug!(
        "Planned {task_count} uploads for {sensor_count} sensors",
        task_count: task_count,
        sensor_count: sensor_count
    );

    let summary = upload_all(store, tasks, config.workers).await?;
    Ok(SeedOutcome::Completed {
        bucket,
        state,
        sensors: sensor_count,
        summary,
    })
}
