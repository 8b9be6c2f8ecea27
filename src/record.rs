//! Expected patch records
//!
//! A record pairs a patch key (`data/win32/<name>.pat`) with the last-write
//! time cached when that file was last verified. The caller creates the set
//! with every record pending; the directory scan may only mark records
//! satisfied, never the reverse.

use crate::file_time::FileTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cached expectation for one patch file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRecord {
    pub expected_last_write_time: FileTime,
    needs_update: bool,
}

/// Lifecycle of a record within one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Not yet proven up to date (initial)
    PendingUpdate,
    /// On-disk timestamp matched the cached expectation
    Satisfied,
}

impl PatchRecord {
    /// Create a record that still needs to be checked
    pub fn pending(expected_last_write_time: FileTime) -> Self {
        Self {
            expected_last_write_time,
            needs_update: true,
        }
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    pub fn state(&self) -> RecordState {
        if self.needs_update {
            RecordState::PendingUpdate
        } else {
            RecordState::Satisfied
        }
    }

    /// Mark the record as already up to date
    ///
    /// Returns true if this call changed the state.
    pub fn mark_satisfied(&mut self) -> bool {
        std::mem::replace(&mut self.needs_update, false)
    }
}

/// Mapping from patch key to its record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchRecordSet {
    records: HashMap<String, PatchRecord>,
}

impl PatchRecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: HashMap::with_capacity(capacity),
        }
    }

    /// Insert or replace the record for `key`
    pub fn insert(&mut self, key: impl Into<String>, record: PatchRecord) -> Option<PatchRecord> {
        self.records.insert(key.into(), record)
    }

    pub fn get(&self, key: &str) -> Option<&PatchRecord> {
        self.records.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut PatchRecord> {
        self.records.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PatchRecord)> {
        self.records.iter().map(|(key, record)| (key.as_str(), record))
    }

    /// Keys of records that still need an update
    pub fn pending_keys(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, record)| record.needs_update())
            .map(|(key, _)| key)
    }

    pub fn satisfied_count(&self) -> usize {
        self.records.values().filter(|r| !r.needs_update()).count()
    }
}

impl<K: Into<String>> FromIterator<(K, PatchRecord)> for PatchRecordSet {
    fn from_iter<I: IntoIterator<Item = (K, PatchRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().map(|(k, r)| (k.into(), r)).collect(),
        }
    }
}
