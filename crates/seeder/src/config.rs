// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Seeder configuration: object storage settings from the environment,
//! run settings from the command line.

use crate::plan::DEFAULT_YEARS;
use crate::{Result, SeedError};
use std::fmt;
use std::path::PathBuf;

pub const ENDPOINT_ENV: &str = "MINIO_ENDPOINT";
pub const ACCESS_KEY_ENV: &str = "MINIO_ACCESS_KEY";
pub const SECRET_KEY_ENV: &str = "MINIO_SECRET_KEY";
pub const SECURE_ENV: &str = "MINIO_SECURE";
pub const REGION_ENV: &str = "MINIO_REGION";

pub const DEFAULT_ENDPOINT: &str = "localhost:9000";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_BUCKET: &str = "paws";
pub const DEFAULT_SENSORS_FILE: &str = "sensors.json";
pub const DEFAULT_WORKERS: usize = 8;

/// Connection settings for an S3-compatible service
#[derive(Clone, PartialEq, Eq)]
pub struct S3Settings {
    /// `host:port`, or a full URL with scheme
    pub endpoint: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub secure: bool,
    pub region: String,
}

impl Default for S3Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key: None,
            secret_key: None,
            secure: false,
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl S3Settings {
    /// Read `MINIO_*` variables from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            endpoint: lookup(ENDPOINT_ENV).unwrap_or(defaults.endpoint),
            access_key: lookup(ACCESS_KEY_ENV),
            secret_key: lookup(SECRET_KEY_ENV),
            secure: lookup(SECURE_ENV).is_some_and(|v| v.eq_ignore_ascii_case("true")),
            region: lookup(REGION_ENV).unwrap_or(defaults.region),
        }
    }

    /// Endpoint with a scheme; `secure` picks https when none is given.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        if self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://") {
            return self.endpoint.clone();
        }
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}", self.endpoint)
    }
}

// Keys stay out of logs and error output.
impl fmt::Debug for S3Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("S3Settings")
            .field("endpoint", &self.endpoint)
            .field("access_key", &redact(&self.access_key))
            .field("secret_key", &redact(&self.secret_key))
            .field("secure", &self.secure)
            .field("region", &self.region)
            .finish()
    }
}

/// What to seed and how wide to fan out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    pub sensors_path: PathBuf,
    pub bucket: String,
    pub years: Vec<i32>,
    pub workers: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            sensors_path: PathBuf::from(DEFAULT_SENSORS_FILE),
            bucket: DEFAULT_BUCKET.to_string(),
            years: DEFAULT_YEARS.to_vec(),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl SeedConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bucket.is_empty() {
            return Err(SeedError::Configuration("bucket name cannot be empty".into()));
        }
        if self.workers == 0 {
            return Err(SeedError::Configuration(
                "workers must be greater than 0".into(),
            ));
        }
        if let Some(year) = self.years.iter().find(|y| !(0..=9999).contains(*y)) {
            return Err(SeedError::Configuration(format!(
                "year {year} is out of range"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = S3Settings::from_lookup(lookup_from(&[]));
        assert_eq!(settings, S3Settings::default());
        assert_eq!(settings.endpoint_url(), "http://localhost:9000");
        assert_eq!(settings.access_key, None);
    }

    #[test]
    fn test_secure_flag() {
        for (value, secure) in [("true", true), ("TRUE", true), ("false", false), ("1", false)] {
            let settings = S3Settings::from_lookup(lookup_from(&[(SECURE_ENV, value)]));
            assert_eq!(settings.secure, secure, "MINIO_SECURE={value}");
        }

        let settings = S3Settings::from_lookup(lookup_from(&[
            (ENDPOINT_ENV, "minio.example.org"),
            (SECURE_ENV, "true"),
        ]));
        assert_eq!(settings.endpoint_url(), "https://minio.example.org");
    }

    #[test]
    fn test_explicit_scheme_kept() {
        let settings = S3Settings::from_lookup(lookup_from(&[
            (ENDPOINT_ENV, "http://10.0.0.5:9000"),
            (SECURE_ENV, "true"),
        ]));
        assert_eq!(settings.endpoint_url(), "http://10.0.0.5:9000");
    }

    #[test]
    fn test_debug_redacts_keys() {
        let settings = S3Settings::from_lookup(lookup_from(&[
            (ACCESS_KEY_ENV, "minioadmin"),
            (SECRET_KEY_ENV, "supersecret"),
        ]));
        let text = format!("{settings:?}");
        assert!(!text.contains("minioadmin"));
        assert!(!text.contains("supersecret"));
        assert!(text.contains("[REDACTED]"));
    }

    #[test]
    fn test_seed_config_validation() {
        assert!(SeedConfig::default().validate().is_ok());

        let config = SeedConfig {
            workers: 0,
            ..SeedConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SeedConfig {
            bucket: String::new(),
            ..SeedConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SeedConfig {
            years: vec![2022, 12345],
            ..SeedConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
