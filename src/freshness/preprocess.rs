//! Bulk pre-process pass over `data/win32`
//!
//! Most patch files live flat in `data/win32`, so one directory listing
//! settles the bulk of the cache before any per-file checks run. Every entry
//! whose last-write time still matches its cached record marks that record
//! satisfied.

use crate::error::{FreshnessError, Result};
use crate::freshness::source::{DirectorySource, FsDirectory};
use crate::record::PatchRecordSet;
use std::path::Path;
use tracing::debug;

/// Key prefix of patches stored in `data/win32`
pub const DATA_WIN32_PREFIX: &str = "data/win32/";

/// Suffix every patch key carries on top of the on-disk file name
pub const PATCH_SUFFIX: &str = ".pat";

/// Record key for a file found in `data/win32`
pub fn patch_key(file_name: &str) -> String {
    format!("{DATA_WIN32_PREFIX}{file_name}{PATCH_SUFFIX}")
}

/// What a pre-process pass saw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreprocessSummary {
    /// Entries returned by the directory listing
    pub entries_visited: usize,
    /// Directories, hidden entries and names that cannot form a key
    pub entries_skipped: usize,
    /// Entries that had a record in the set
    pub records_matched: usize,
    /// Records this pass moved from pending to satisfied
    pub records_satisfied: usize,
}

/// Scan `<base_directory>/data/win32` and mark records whose timestamps match
///
/// A missing or unreadable directory is not an error: nothing is marked and
/// an empty summary comes back. An OS failure after the listing started is
/// returned as [`FreshnessError::Scan`].
pub fn preprocess_patches(
    records: &mut PatchRecordSet,
    base_directory: impl AsRef<Path>,
) -> Result<PreprocessSummary> {
    preprocess_patches_with(&FsDirectory, records, base_directory)
}

/// [`preprocess_patches`] over any directory source
pub fn preprocess_patches_with<S: DirectorySource>(
    source: &S,
    records: &mut PatchRecordSet,
    base_directory: impl AsRef<Path>,
) -> Result<PreprocessSummary> {
    let directory = base_directory.as_ref().join("data").join("win32");
    let mut summary = PreprocessSummary::default();

    // The iterator owns the directory handle; it is dropped on every exit
    let entries = match source.open(&directory) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(
                "Skipping pre-process, cannot open {}: {}",
                crate::utils::display_path(&directory),
                e
            );
            return Ok(summary);
        }
    };

    for entry in entries {
        let entry = entry.map_err(|source| FreshnessError::Scan {
            directory: directory.clone(),
            source,
        })?;
        summary.entries_visited += 1;

        if !entry.is_candidate() {
            summary.entries_skipped += 1;
            continue;
        }

        // Record keys are strings; a name that isn't valid unicode has no record
        let Some(file_name) = entry.file_name.to_str() else {
            summary.entries_skipped += 1;
            continue;
        };

        let Some(record) = records.get_mut(&patch_key(file_name)) else {
            continue;
        };
        summary.records_matched += 1;

        if record.expected_last_write_time == entry.last_write_time && record.mark_satisfied() {
            summary.records_satisfied += 1;
        }
    }

    debug!(
        "Pre-processed {}: {} entries, {} matched, {} satisfied",
        crate::utils::display_path(&directory),
        summary.entries_visited,
        summary.records_matched,
        summary.records_satisfied
    );

    Ok(summary)
}
