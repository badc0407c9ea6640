// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Bounded parallel upload of placeholder objects
//!
//! Each task becomes one `put_object` call on a blocking worker. A
//! semaphore caps how many workers run at once. Failures are logged and
//! counted per object; they never stop the remaining uploads.

use crate::plan::UploadTask;
use crate::store::SeedStore;
use crate::{Result, SeedError};
use diagnostics::*;
use futures::stream::{FuturesUnordered, StreamExt};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Body written for every placeholder object.
pub const PLACEHOLDER_BODY: &[u8] = b"test";

pub const CONTENT_TYPE: &str = "text/csv";

/// An object that could not be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub key: String,
    pub message: String,
}

/// Result of an upload pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<UploadFailure>,
}

impl UploadSummary {
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

impl fmt::Display for UploadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Completed: {}/{} files uploaded",
            self.succeeded, self.attempted
        )
    }
}

/// Write one placeholder object, logging the outcome.
pub fn upload_one(store: &dyn SeedStore, key: &str) -> Result<()> {
    match store.put_object(key, PLACEHOLDER_BODY, CONTENT_TYPE) {
        Ok(()) => {
            info!("Uploaded {key}", key: key);
            Ok(())
        }
        Err(err) => {
            let reason = err.to_string();
            error!("Failed {key}: {reason}", key: key, reason: reason.as_str());
            Err(err)
        }
    }
}

/// Upload every task with at most `workers` concurrent writes.
///
/// Returns once every task has finished. Only a zero worker count is an
/// error; individual failures end up in [`UploadSummary::failures`].
pub async fn upload_all(
    store: Arc<dyn SeedStore>,
    tasks: Vec<UploadTask>,
    workers: usize,
) -> Result<UploadSummary> {
    if workers == 0 {
        return Err(SeedError::Configuration(
            "workers must be greater than 0".into(),
        ));
    }

    let attempted = tasks.len();
    debug!(
        "Uploading {attempted} objects with {workers} workers",
        attempted: attempted,
        workers: workers
    );

    let permits = Arc::new(Semaphore::new(workers));
    let mut pending: FuturesUnordered<_> = tasks
        .into_iter()
        .map(|task| {
            let key = task.object_name();
            let store = Arc::clone(&store);
            let permits = Arc::clone(&permits);
            async move {
                let outcome = run_worker(store, permits, key.clone()).await;
                (key, outcome)
            }
        })
        .collect();

    let mut summary = UploadSummary {
        attempted,
        ..UploadSummary::default()
    };
    while let Some((key, outcome)) = pending.next().await {
        match outcome {
            Ok(()) => summary.succeeded += 1,
            Err(message) => summary.failures.push(UploadFailure { key, message }),
        }
    }

    Ok(summary)
}

async fn run_worker(
    store: Arc<dyn SeedStore>,
    permits: Arc<Semaphore>,
    key: String,
) -> std::result::Result<(), String> {
    let permit = permits.acquire_owned().await.map_err(|e| e.to_string())?;

    let joined = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        upload_one(store.as_ref(), &key).map_err(|err| err.to_string())
    })
    .await;

    match joined {
        Ok(outcome) => outcome,
        Err(join) => {
            let reason = join.to_string();
            error!("Upload worker died: {reason}", reason: reason.as_str());
            Err(format!("upload worker failed: {reason}"))
        }
    }
}
