//! Input specifiers: a plain file or a member of an `ar` archive.

use std::fmt;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use crate::ElfDiffError;
use crate::Result;
use crate::archive::locate;
use crate::io::ByteWindow;

/// Where an object file comes from.
///
/// Parsed from `PATH` or `PATH(MEMBER)`, the notation used by linkers and
/// `ar` listings for archive members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputSpec {
    /// A standalone file.
    File {
        /// Path of the file.
        path: PathBuf,
    },
    /// A named member of an archive.
    ArchiveMember {
        /// Path of the archive.
        archive: PathBuf,
        /// Member name as stored in the archive.
        member: String,
    },
}

impl InputSpec {
    /// Parses an input specifier.
    ///
    /// The archive form is selected when the text ends with `)`, the last `(`
    /// is not the first character, and the member between them is non-empty
    /// and contains no `)`. Anything else is a plain path.
    ///
    /// # Examples
    ///
    /// ```
    /// use elfdiff_core::InputSpec;
    /// use std::path::PathBuf;
    ///
    /// assert_eq!(
    ///     InputSpec::parse("out/libfoo.a(foo.o)"),
    ///     InputSpec::ArchiveMember {
    ///         archive: PathBuf::from("out/libfoo.a"),
    ///         member: "foo.o".to_string(),
    ///     }
    /// );
    /// assert_eq!(
    ///     InputSpec::parse("out/foo.o"),
    ///     InputSpec::File {
    ///         path: PathBuf::from("out/foo.o"),
    ///     }
    /// );
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::split_member(text).map_or_else(
            || Self::File {
                path: PathBuf::from(text),
            },
            |(archive, member)| Self::ArchiveMember {
                archive: PathBuf::from(archive),
                member: member.to_string(),
            },
        )
    }

    fn split_member(text: &str) -> Option<(&str, &str)> {
        let body = text.strip_suffix(')')?;
        let open = body.rfind('(')?;
        let (archive, member) = (&body[..open], &body[open + 1..]);
        if archive.is_empty() || member.is_empty() || member.contains(')') {
            return None;
        }
        Some((archive, member))
    }

    /// The file that has to be opened for this input.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::File { path } => path,
            Self::ArchiveMember { archive, .. } => archive,
        }
    }

    /// Returns `true` for archive members.
    #[must_use]
    pub fn is_archive_member(&self) -> bool {
        matches!(self, Self::ArchiveMember { .. })
    }

    /// Opens the input as a random-access byte source.
    ///
    /// A plain file is exposed as a window over the whole file; an archive
    /// member as a window over its content.
    pub fn open(&self) -> Result<ByteWindow<File>> {
        match self {
            Self::File { path } => {
                let file = File::open(path).map_err(|e| ElfDiffError::open(path, e))?;
                Ok(ByteWindow::whole(file)?)
            }
            Self::ArchiveMember { archive, member } => locate(archive, member),
        }
    }
}

impl fmt::Display for InputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path } => write!(f, "{}", path.display()),
            Self::ArchiveMember { archive, member } => {
                write!(f, "{}({member})", archive.display())
            }
        }
    }
}

impl std::str::FromStr for InputSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
