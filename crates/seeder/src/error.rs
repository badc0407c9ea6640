// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for seeding operations

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read sensors file {path}: {source}")]
    SensorsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse sensors file {path}: {source}")]
    SensorsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Object storage error: {0}")]
    Storage(#[from] s3::error::S3Error),

    #[error("Credentials error: {0}")]
    Credentials(#[from] s3::creds::error::CredentialsError),

    #[error("Bucket '{bucket}' could not be created: HTTP {status}")]
    CreateBucket { bucket: String, status: u16 },

    #[error("Upload of {key} rejected: HTTP {status}")]
    Rejected { key: String, status: u16 },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
