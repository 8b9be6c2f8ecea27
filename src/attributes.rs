//! Win32 file attribute flags

use std::fmt;

/// Attribute bitmask as reported by the Win32 metadata and enumeration calls
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileAttributes(u32);

impl FileAttributes {
    pub const HIDDEN: Self = Self(0x2);
    pub const DIRECTORY: Self = Self(0x10);
    pub const NORMAL: Self = Self(0x80);
    pub const REPARSE_POINT: Self = Self(0x400);

    /// INVALID_FILE_ATTRIBUTES: the query "succeeded" but the value is unusable
    pub const INVALID: Self = Self(u32::MAX);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID.0
    }

    pub const fn is_directory(self) -> bool {
        !self.is_invalid() && self.contains(Self::DIRECTORY)
    }

    pub const fn is_hidden(self) -> bool {
        !self.is_invalid() && self.contains(Self::HIDDEN)
    }

    /// Attributes for a portable (non-Windows) metadata read
    ///
    /// The hidden flag follows the dot-prefix convention since there is no
    /// attribute bit to read.
    pub fn synthesize(is_dir: bool, file_name: Option<&std::ffi::OsStr>) -> Self {
        let mut attrs = if is_dir { Self::DIRECTORY } else { Self::NORMAL };
        if file_name
            .map(|name| name.to_string_lossy().starts_with('.'))
            .unwrap_or(false)
        {
            attrs = attrs | Self::HIDDEN;
        }
        attrs
    }
}

impl std::ops::BitOr for FileAttributes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for FileAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            return write!(f, "FileAttributes(INVALID)");
        }
        write!(f, "FileAttributes({:#x}", self.0)?;
        if self.is_directory() {
            write!(f, " DIRECTORY")?;
        }
        if self.is_hidden() {
            write!(f, " HIDDEN")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_invalid_sentinel_is_minus_one() {
        assert_eq!(FileAttributes::INVALID.bits() as i32, -1);
        assert!(FileAttributes::from_bits(u32::MAX).is_invalid());
    }

    #[test]
    fn test_invalid_reports_no_flags() {
        // All bits are set, but the value must not read as a directory
        assert!(!FileAttributes::INVALID.is_directory());
        assert!(!FileAttributes::INVALID.is_hidden());
    }

    #[test]
    fn test_flags() {
        let attrs = FileAttributes::DIRECTORY | FileAttributes::HIDDEN;
        assert!(attrs.is_directory());
        assert!(attrs.is_hidden());
        assert!(!FileAttributes::NORMAL.is_directory());
        assert!(!FileAttributes::from_bits(0x20).is_hidden());
    }

    #[test]
    fn test_synthesize() {
        assert!(FileAttributes::synthesize(true, Some(OsStr::new("win32"))).is_directory());
        assert!(FileAttributes::synthesize(false, Some(OsStr::new(".hidden"))).is_hidden());
        let plain = FileAttributes::synthesize(false, Some(OsStr::new("abc123")));
        assert!(!plain.is_hidden());
        assert!(!plain.is_directory());
        assert!(!FileAttributes::synthesize(false, None).is_hidden());
    }
}
