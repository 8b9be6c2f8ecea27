//! Directory enumeration
//!
//! The scan only needs names, attributes and last-write times, so the
//! enumeration sits behind [`DirectorySource`]. The iterator returned by
//! `open` owns the OS handle and releases it on drop.

use crate::attributes::FileAttributes;
use crate::file_time::FileTime;
use crate::metadata::FileMetadata;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use tracing::trace;

/// One entry observed during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub file_name: OsString,
    pub attributes: FileAttributes,
    pub last_write_time: FileTime,
}

impl DirectoryEntry {
    /// Directories and hidden entries never take part in matching
    pub fn is_candidate(&self) -> bool {
        !self.attributes.is_directory() && !self.attributes.is_hidden()
    }
}

/// Something that can enumerate a single directory level
pub trait DirectorySource {
    type Entries: Iterator<Item = io::Result<DirectoryEntry>>;

    /// Open `directory` for iteration
    fn open(&self, directory: &Path) -> io::Result<Self::Entries>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectory;

impl DirectorySource for FsDirectory {
    type Entries = FsEntries;

    fn open(&self, directory: &Path) -> io::Result<FsEntries> {
        Ok(FsEntries {
            inner: crate::utils::safe_read_dir(directory)?,
        })
    }
}

/// Entries of one directory; the handle closes when this is dropped
#[derive(Debug)]
pub struct FsEntries {
    inner: std::fs::ReadDir,
}

impl Iterator for FsEntries {
    type Item = io::Result<DirectoryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e)),
            };
            let file_name = entry.file_name();

            // Windows serves this from the enumeration record itself; elsewhere
            // it is an lstat that can race with a concurrent delete
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    trace!("Entry vanished during scan: {:?}", file_name);
                    continue;
                }
                Err(e) => return Some(Err(e)),
            };

            let meta = match FileMetadata::from_std(&metadata, Some(file_name.as_os_str())) {
                Ok(meta) => meta,
                Err(e) => return Some(Err(e)),
            };
            return Some(Ok(DirectoryEntry {
                file_name,
                attributes: meta.attributes,
                last_write_time: meta.last_write_time,
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_fs_directory_lists_one_level() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("abc"), "patch").unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();
        fs::write(temp_dir.path().join("nested").join("deep"), "patch").unwrap();

        let mut entries: Vec<_> = FsDirectory
            .open(temp_dir.path())
            .unwrap()
            .collect::<io::Result<_>>()
            .unwrap();
        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file_name, "abc");
        assert!(entries[0].is_candidate());
        assert_eq!(entries[1].file_name, "nested");
        assert!(entries[1].attributes.is_directory());
        assert!(!entries[1].is_candidate());
    }

    #[test]
    fn test_fs_directory_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(FsDirectory.open(&temp_dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_hidden_entry_is_not_candidate() {
        let entry = DirectoryEntry {
            file_name: OsString::from("abc"),
            attributes: FileAttributes::NORMAL | FileAttributes::HIDDEN,
            last_write_time: FileTime::from_ticks(1),
        };
        assert!(!entry.is_candidate());
    }
}
