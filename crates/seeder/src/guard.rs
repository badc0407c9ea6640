// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::Result;
use crate::store::SeedStore;
use diagnostics::*;

/// Bucket state found before seeding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketState {
    /// Bucket was missing and has been created.
    Created,
    /// Bucket existed with no objects.
    Empty,
    /// Bucket holds data; nothing may be written.
    AlreadySeeded,
}

impl BucketState {
    #[must_use]
    pub fn may_upload(self) -> bool {
        !matches!(self, BucketState::AlreadySeeded)
    }
}

/// Make sure the bucket exists and report whether seeding may proceed.
///
/// Any storage error here is fatal for the run.
pub fn check_bucket(store: &dyn SeedStore) -> Result<BucketState> {
    let bucket = store.bucket();
    if !store.bucket_exists()? {
        store.create_bucket()?;
        info!("Created bucket {bucket}", bucket: bucket);
        return Ok(BucketState::Created);
    }

    if store.has_objects()? {
        debug!("Bucket {bucket} already holds objects", bucket: bucket);
        return Ok(BucketState::AlreadySeeded);
    }

    debug!("Bucket {bucket} exists and is empty", bucket: bucket);
    Ok(BucketState::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_missing_bucket_is_created() {
        let store = MemoryStore::new("paws");
        assert_eq!(check_bucket(&store).expect("guard"), BucketState::Created);
        assert!(store.bucket_exists().expect("exists"));
        assert_eq!(store.put_calls(), 0);
    }

    #[test]
    fn test_empty_bucket_proceeds() {
        let store = MemoryStore::with_objects("paws", Vec::<String>::new());
        let state = check_bucket(&store).expect("guard");
        assert_eq!(state, BucketState::Empty);
        assert!(state.may_upload());
    }

    #[test]
    fn test_seeded_bucket_is_skipped() {
        let store = MemoryStore::with_objects("paws", ["s1_2022_01.csv"]);
        let state = check_bucket(&store).expect("guard");
        assert_eq!(state, BucketState::AlreadySeeded);
        assert!(!state.may_upload());
    }
}
