//! Patch freshness library crate
//!
//! Decides which cached patch files are still current on disk by comparing
//! their last-write times against the values recorded when they were last
//! verified.

pub mod attributes;
pub mod compare_phase;
pub mod config;
pub mod error;
pub mod events;
pub mod file_time;
pub mod freshness;
pub mod metadata;
pub mod record;
pub mod utils;

pub use attributes::FileAttributes;
pub use compare_phase::{ComparePhase, PatchCache, PatchCacheEntry, PatchInfo};
pub use config::{CompareOptions, Config, InstallLayout};
pub use error::{FreshnessError, Result};
pub use events::CompareProgressEvent;
pub use file_time::FileTime;
pub use freshness::{
    compare_file_time, preprocess_patches, preprocess_patches_with, DirectoryEntry,
    DirectorySource, FsDirectory, PreprocessSummary,
};
pub use metadata::{query_metadata, FileMetadata};
pub use record::{PatchRecord, PatchRecordSet, RecordState};
