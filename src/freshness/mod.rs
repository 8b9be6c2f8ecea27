//! Patch freshness checks
//!
//! Two entry points decide whether cached patch timestamps still hold:
//! a bulk pass over `data/win32` ([`preprocess_patches`]) and a single-file
//! comparator ([`compare_file_time`]). Both are timestamp-only; no file
//! content is read.

pub mod compare;
pub mod preprocess;
pub mod source;

pub use compare::compare_file_time;
pub use preprocess::{
    patch_key, preprocess_patches, preprocess_patches_with, PreprocessSummary, DATA_WIN32_PREFIX,
    PATCH_SUFFIX,
};
pub use source::{DirectoryEntry, DirectorySource, FsDirectory, FsEntries};
