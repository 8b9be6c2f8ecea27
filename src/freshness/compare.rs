//! Single-file freshness check

use crate::file_time::FileTime;
use crate::metadata::query_metadata;
use std::path::Path;
use tracing::trace;

/// Returns true if the file's current last-write time equals `cached` exactly
///
/// Every failure answers false: a missing file, an access error, a directory,
/// or the invalid-attributes sentinel all look the same as a file whose
/// timestamp differs, so the caller treats them as "needs update".
pub fn compare_file_time(file_path: impl AsRef<Path>, cached: FileTime) -> bool {
    let file_path = file_path.as_ref();

    let metadata = match query_metadata(file_path) {
        Ok(metadata) => metadata,
        Err(e) => {
            trace!("No metadata for {}: {}", crate::utils::display_path(file_path), e);
            return false;
        }
    };

    if metadata.attributes.is_invalid() || metadata.attributes.is_directory() {
        return false;
    }

    metadata.last_write_time == cached
}
