// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Object storage seam used by the seeder
//!
//! The seeder needs four bucket operations. [`SeedStore`] names them so the
//! guard and uploader can run against S3 ([`crate::S3Store`]) or against the
//! in-memory [`MemoryStore`] used by tests and dry runs.
//!
//! Operations are blocking: the uploader calls them from
//! `tokio::task::spawn_blocking` workers.

use crate::{Result, SeedError};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

const INJECTED_STATUS: u16 = 503;

pub trait SeedStore: Send + Sync {
    /// Name of the bucket every operation targets.
    fn bucket(&self) -> &str;

    fn bucket_exists(&self) -> Result<bool>;

    fn create_bucket(&self) -> Result<()>;

    /// True if the bucket holds at least one object, at any depth.
    fn has_objects(&self) -> Result<bool>;

    fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<()>;
}

/// A stored object in [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
struct State {
    exists: bool,
    objects: BTreeMap<String, MemoryObject>,
    put_calls: usize,
}

/// In-memory bucket for testing and dry runs
pub struct MemoryStore {
    bucket: String,
    state: Mutex<State>,
    fail_keys: BTreeSet<String>,
}

impl MemoryStore {
    /// A store whose bucket does not exist yet.
    #[must_use]
    pub fn new<S: Into<String>>(bucket: S) -> Self {
        Self {
            bucket: bucket.into(),
            state: Mutex::new(State::default()),
            fail_keys: BTreeSet::new(),
        }
    }

    /// A store whose bucket exists and already holds `keys`.
    #[must_use]
    pub fn with_objects<S, I, K>(bucket: S, keys: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let store = Self::new(bucket);
        {
            let mut state = store.lock();
            state.exists = true;
            for key in keys {
                _ = state.objects.insert(
                    key.into(),
                    MemoryObject {
                        body: Vec::new(),
                        content_type: String::new(),
                    },
                );
            }
        }
        store
    }

    /// Make `put_object` fail for the given keys, as if the server
    /// answered 503.
    #[must_use]
    pub fn failing_on<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.fail_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Number of `put_object` calls, failed ones included.
    #[must_use]
    pub fn put_calls(&self) -> usize {
        self.lock().put_calls
    }

    #[must_use]
    pub fn object(&self, key: &str) -> Option<MemoryObject> {
        self.lock().objects.get(key).cloned()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.lock().objects.keys().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A panic while holding the lock leaves the maps consistent.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SeedStore for MemoryStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn bucket_exists(&self) -> Result<bool> {
        Ok(self.lock().exists)
    }

    fn create_bucket(&self) -> Result<()> {
        self.lock().exists = true;
        Ok(())
    }

    fn has_objects(&self) -> Result<bool> {
        Ok(!self.lock().objects.is_empty())
    }

    fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<()> {
        let mut state = self.lock();
        state.put_calls += 1;
        if !state.exists {
            return Err(SeedError::Configuration(format!(
                "bucket '{}' does not exist",
                self.bucket
            )));
        }
        if self.fail_keys.contains(key) {
            return Err(SeedError::Rejected {
                key: key.to_string(),
                status: INJECTED_STATUS,
            });
        }
        _ = state.objects.insert(
            key.to_string(),
            MemoryObject {
                body: body.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_has_no_bucket() {
        let store = MemoryStore::new("paws");
        assert_eq!(store.bucket(), "paws");
        assert!(!store.bucket_exists().expect("exists"));
        assert!(store.put_object("a.csv", b"test", "text/csv").is_err());
        assert_eq!(store.put_calls(), 1);
    }

    #[test]
    fn test_create_then_put() {
        let store = MemoryStore::new("paws");
        store.create_bucket().expect("create");
        assert!(!store.has_objects().expect("list"));

        store.put_object("a.csv", b"test", "text/csv").expect("put");
        assert!(store.has_objects().expect("list"));
        assert_eq!(
            store.object("a.csv"),
            Some(MemoryObject {
                body: b"test".to_vec(),
                content_type: "text/csv".to_string(),
            })
        );
    }

    #[test]
    fn test_failing_keys_are_rejected() {
        let store = MemoryStore::new("paws").failing_on(["bad.csv"]);
        store.create_bucket().expect("create");
        let err = store.put_object("bad.csv", b"test", "text/csv").expect_err("injected");
        assert!(matches!(err, SeedError::Rejected { ref key, status: 503 } if key == "bad.csv"));
        store.put_object("good.csv", b"test", "text/csv").expect("put");
        assert_eq!(store.keys(), vec!["good.csv".to_string()]);
        assert_eq!(store.put_calls(), 2);
    }

    #[test]
    fn test_with_objects() {
        let store = MemoryStore::with_objects("paws", ["nested/x.csv"]);
        assert!(store.bucket_exists().expect("exists"));
        assert!(store.has_objects().expect("list"));
    }
}
