//! Filesystem metadata queries
//!
//! On Windows this asks `GetFileAttributesExW` directly, so the attribute
//! bitmask (including the INVALID_FILE_ATTRIBUTES sentinel) and the two
//! FILETIME halves arrive exactly as the OS reports them. Other platforms
//! translate `std::fs::Metadata` into the same attribute/time space.

use crate::attributes::FileAttributes;
use crate::file_time::FileTime;
use std::ffi::OsStr;
use std::io;
use std::path::Path;

/// The subset of file metadata the freshness checks care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    pub attributes: FileAttributes,
    pub last_write_time: FileTime,
}

impl FileMetadata {
    /// Build from std metadata (used for directory entries on every platform)
    #[cfg(windows)]
    pub fn from_std(metadata: &std::fs::Metadata, _file_name: Option<&OsStr>) -> io::Result<Self> {
        use std::os::windows::fs::MetadataExt;
        Ok(Self {
            attributes: FileAttributes::from_bits(metadata.file_attributes()),
            last_write_time: FileTime::from_ticks(metadata.last_write_time()),
        })
    }

    /// Build from std metadata (used for directory entries on every platform)
    #[cfg(not(windows))]
    pub fn from_std(metadata: &std::fs::Metadata, file_name: Option<&OsStr>) -> io::Result<Self> {
        let modified = metadata.modified()?;
        Ok(Self {
            attributes: FileAttributes::synthesize(metadata.is_dir(), file_name),
            last_write_time: FileTime::from_system_time(modified),
        })
    }
}

/// Query attributes and last-write time for a path
///
/// Follows symlinks, like the Win32 call it mirrors.
pub fn query_metadata(path: &Path) -> io::Result<FileMetadata> {
    #[cfg(windows)]
    {
        match query_win32(path) {
            Ok(meta) => Ok(meta),
            Err(e) if e.raw_os_error() == Some(crate::utils::ERROR_PATH_NOT_FOUND) => {
                query_win32(&crate::utils::to_long_path(path))
            }
            Err(e) => Err(e),
        }
    }

    #[cfg(not(windows))]
    {
        let metadata = std::fs::metadata(path)?;
        FileMetadata::from_std(&metadata, path.file_name())
    }
}

#[cfg(windows)]
fn query_win32(path: &Path) -> io::Result<FileMetadata> {
    use windows::core::{HSTRING, PCWSTR};
    use windows::Win32::Storage::FileSystem::{
        GetFileAttributesExW, GetFileExInfoStandard, WIN32_FILE_ATTRIBUTE_DATA,
    };

    let wide = HSTRING::from(path.as_os_str());
    let mut data = WIN32_FILE_ATTRIBUTE_DATA::default();

    // Safety: `wide` is NUL-terminated and outlives the call; `data` is the
    // structure GetFileExInfoStandard writes into.
    unsafe {
        GetFileAttributesExW(
            PCWSTR(wide.as_ptr()),
            GetFileExInfoStandard,
            &mut data as *mut WIN32_FILE_ATTRIBUTE_DATA as *mut std::ffi::c_void,
        )
    }
    // HRESULT_FROM_WIN32 keeps the Win32 code in the low word
    .map_err(|e| io::Error::from_raw_os_error(e.code().0 & 0xFFFF))?;

    Ok(FileMetadata {
        attributes: FileAttributes::from_bits(data.dwFileAttributes),
        last_write_time: FileTime::from_halves(
            data.ftLastWriteTime.dwHighDateTime,
            data.ftLastWriteTime.dwLowDateTime,
        ),
    })
}
