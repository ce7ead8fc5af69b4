//! Error types for archive lookup and section comparison.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ElfDiffError`.
pub type Result<T> = std::result::Result<T, ElfDiffError>;

/// Errors that can occur while locating or decoding an input.
///
/// Every variant is terminal for the input it concerns: a section comparison
/// is meaningless without both tables, so callers abort instead of producing
/// a partial report. Non-fatal findings are reported as
/// [`SectionWarning`](crate::SectionWarning) instead.
#[derive(Error, Debug)]
pub enum ElfDiffError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input file could not be opened.
    #[error("cannot open {path}: {source}")]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file does not start with the `ar` magic string.
    #[error("{path} is not an ar archive")]
    NotAnArchive {
        /// Path of the offending file.
        path: PathBuf,
    },

    /// The archive structure is damaged.
    #[error("{path} is corrupt: {reason}")]
    CorruptArchive {
        /// Path of the archive.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// No member with the requested name exists in the archive.
    #[error("{archive}: no such member {member}")]
    MemberNotFound {
        /// Path of the archive that was scanned.
        archive: PathBuf,
        /// The member name that was looked up.
        member: String,
    },

    /// The bytes could not be decoded as an ELF object file.
    #[error("{input}: cannot decode object file: {reason}")]
    ObjectDecode {
        /// Input specifier the bytes came from.
        input: String,
        /// Why decoding failed.
        reason: String,
    },
}

impl ElfDiffError {
    /// Returns `true` if this error is a failure of the `ar` container
    /// itself, as opposed to I/O or object decoding.
    ///
    /// # Examples
    ///
    /// ```
    /// use elfdiff_core::ElfDiffError;
    /// use std::path::PathBuf;
    ///
    /// let err = ElfDiffError::NotAnArchive {
    ///     path: PathBuf::from("libfoo.a"),
    /// };
    /// assert!(err.is_archive_error());
    ///
    /// let err = ElfDiffError::Io(std::io::Error::other("boom"));
    /// assert!(!err.is_archive_error());
    /// ```
    #[must_use]
    pub const fn is_archive_error(&self) -> bool {
        matches!(
            self,
            Self::NotAnArchive { .. } | Self::CorruptArchive { .. } | Self::MemberNotFound { .. }
        )
    }

    pub(crate) fn open(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CorruptArchive {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ElfDiffError::NotAnArchive {
            path: PathBuf::from("libfoo.a"),
        };
        assert_eq!(err.to_string(), "libfoo.a is not an ar archive");

        let err = ElfDiffError::MemberNotFound {
            archive: PathBuf::from("libfoo.a"),
            member: "bar.o".to_string(),
        };
        assert_eq!(err.to_string(), "libfoo.a: no such member bar.o");

        let err = ElfDiffError::open(
            std::path::Path::new("gone.o"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.to_string(), "cannot open gone.o: not found");
        assert!(!err.is_archive_error());

        let err = ElfDiffError::corrupt("libfoo.a", "short header");
        assert_eq!(err.to_string(), "libfoo.a is corrupt: short header");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ElfDiffError = io_err.into();
        assert!(matches!(err, ElfDiffError::Io(_)));
        assert!(!err.is_archive_error());
    }

    #[test]
    fn test_is_archive_error() {
        assert!(ElfDiffError::corrupt("a", "b").is_archive_error());
        assert!(
            ElfDiffError::MemberNotFound {
                archive: PathBuf::from("a"),
                member: "b".to_string(),
            }
            .is_archive_error()
        );
    }
}
