//! Error conversion utilities for CLI.
//!
//! Converts elfdiff-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use elfdiff_core::ElfDiffError;

/// Converts `ElfDiffError` to user-friendly anyhow error with context
pub fn convert_diff_error(err: ElfDiffError) -> anyhow::Error {
    match err {
        ElfDiffError::Open { path, source } => {
            anyhow!("Cannot open '{}': {source}", path.display())
        }
        ElfDiffError::NotAnArchive { path } => {
            anyhow!(
                "'{}' is not an ar archive\n\
                 HINT: Drop the (MEMBER) suffix to compare a plain object file.",
                path.display()
            )
        }
        ElfDiffError::CorruptArchive { path, reason } => {
            anyhow!(
                "Archive '{}' is corrupt: {reason}\n\
                 HINT: The archive may be truncated or still being written.",
                path.display()
            )
        }
        ElfDiffError::MemberNotFound { archive, member } => {
            anyhow!(
                "Archive '{}' has no member '{member}'\n\
                 HINT: Run `ar t {}` to list the members.",
                archive.display(),
                archive.display()
            )
        }
        ElfDiffError::ObjectDecode { input, reason } => {
            anyhow!(
                "Cannot decode '{input}' as an object file: {reason}\n\
                 HINT: Only ELF relocatable objects and executables are supported."
            )
        }
        ElfDiffError::Io(io_err) => anyhow!("I/O error: {io_err}"),
    }
}

/// Adds context to a core result
pub fn add_diff_context<T>(result: Result<T, ElfDiffError>) -> anyhow::Result<T> {
    result.map_err(convert_diff_error)
}
