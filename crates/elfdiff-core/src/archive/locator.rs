//! Member lookup inside an `ar` archive.

use std::fs::File;
use std::io;
use std::path::Path;

use super::header::HEADER_SIZE;
use super::header::MAGIC;
use super::header::MemberHeader;
use super::header::NAME_FIELD_LEN;
use super::header::align_even;
use crate::ElfDiffError;
use crate::Result;
use crate::io::ByteWindow;
use crate::io::ReadAt;

/// Terminates member names in both the header and the extended-name table.
const NAME_TERMINATOR: u8 = b'/';

/// Opens `archive_path` and returns a window over the content of `member`.
///
/// # Errors
///
/// - [`ElfDiffError::Open`] if the archive cannot be opened
/// - [`ElfDiffError::NotAnArchive`] if the magic string is missing
/// - [`ElfDiffError::CorruptArchive`] on a truncated header, a malformed size
///   field, a member running past the end of the file, or a long-name
///   reference without an extended-name table
/// - [`ElfDiffError::MemberNotFound`] if no header matches
///
/// # Examples
///
/// ```no_run
/// use elfdiff_core::archive::locate;
/// use elfdiff_core::io::ReadAt;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let member = locate("libfoo.a", "foo.o")?;
/// println!("foo.o is {} bytes", member.size()?);
/// # Ok(())
/// # }
/// ```
pub fn locate<P: AsRef<Path>>(archive_path: P, member: &str) -> Result<ByteWindow<File>> {
    let path = archive_path.as_ref();
    let file = File::open(path).map_err(|e| ElfDiffError::open(path, e))?;
    locate_in(file, path, member)
}

/// Looks up `member` in an archive read from `source`.
///
/// `path` is only used in error values. See [`locate`] for the error cases.
pub fn locate_in<R: ReadAt>(source: R, path: &Path, member: &str) -> Result<ByteWindow<R>> {
    let found = find_member(&source, path, member)?;
    Ok(ByteWindow::new(source, found.content_start, found.content_len))
}

#[derive(Debug, Clone, Copy)]
struct RawMember {
    header: MemberHeader,
    content_start: u64,
    content_len: u64,
}

/// Sequential walk over member headers.
struct MemberScanner<'a, R> {
    source: &'a R,
    path: &'a Path,
    archive_len: u64,
    next_header: u64,
}

impl<'a, R: ReadAt> MemberScanner<'a, R> {
    fn open(source: &'a R, path: &'a Path) -> Result<Self> {
        let mut magic = [0u8; MAGIC.len()];
        match source.read_exact_at(&mut magic, 0) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(not_an_archive(path));
            }
            Err(e) => return Err(e.into()),
        }
        if &magic != MAGIC {
            return Err(not_an_archive(path));
        }

        Ok(Self {
            source,
            path,
            archive_len: source.size()?,
            next_header: MAGIC.len() as u64,
        })
    }

    fn next_member(&mut self) -> Result<Option<RawMember>> {
        if self.next_header >= self.archive_len {
            return Ok(None);
        }
        let at = self.next_header;

        let mut bytes = [0u8; HEADER_SIZE];
        self.read_fully(&mut bytes, at, "member header")?;
        let header = MemberHeader::new(bytes);

        let content_len = header.content_size().ok_or_else(|| {
            ElfDiffError::corrupt(self.path, format!("invalid size field in header at offset {at}"))
        })?;
        let content_start = at + HEADER_SIZE as u64;
        let content_end = content_start
            .checked_add(content_len)
            .filter(|end| *end <= self.archive_len)
            .ok_or_else(|| {
                ElfDiffError::corrupt(
                    self.path,
                    format!("member at offset {at} extends past end of archive"),
                )
            })?;

        // Members are padded to even offsets; a missing final pad byte just
        // ends the scan.
        self.next_header = align_even(content_end).unwrap_or(u64::MAX);

        Ok(Some(RawMember {
            header,
            content_start,
            content_len,
        }))
    }

    fn read_content(&self, member: &RawMember) -> Result<Vec<u8>> {
        let len = usize::try_from(member.content_len).map_err(|_| {
            ElfDiffError::corrupt(self.path, "extended name table does not fit in memory")
        })?;
        let mut buf = vec![0u8; len];
        self.read_fully(&mut buf, member.content_start, "extended name table")?;
        Ok(buf)
    }

    fn read_fully(&self, buf: &mut [u8], at: u64, what: &str) -> Result<()> {
        let expected = buf.len();
        self.source.read_exact_at(buf, at).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                ElfDiffError::corrupt(
                    self.path,
                    format!("truncated {what} at offset {at}, expected {expected} bytes"),
                )
            } else {
                e.into()
            }
        })
    }
}

fn find_member<R: ReadAt>(source: &R, path: &Path, member: &str) -> Result<RawMember> {
    let mut scanner = MemberScanner::open(source, path)?;

    let mut key = Vec::with_capacity(member.len() + 1);
    key.extend_from_slice(member.as_bytes());
    key.push(NAME_TERMINATOR);

    let found = if member.is_empty() {
        None
    } else if key.len() <= NAME_FIELD_LEN {
        find_inline(&mut scanner, &key)?
    } else {
        find_extended(&mut scanner, &key)?
    };

    found.ok_or_else(|| ElfDiffError::MemberNotFound {
        archive: path.to_path_buf(),
        member: member.to_string(),
    })
}

fn find_inline<R: ReadAt>(
    scanner: &mut MemberScanner<'_, R>,
    key: &[u8],
) -> Result<Option<RawMember>> {
    while let Some(candidate) = scanner.next_member()? {
        if candidate.header.name_starts_with(key) {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// Resolves a name too long for the header through the `//` table.
///
/// The table normally precedes every member that references it. References
/// met before the table are kept in archive order and checked as soon as the
/// table shows up.
fn find_extended<R: ReadAt>(
    scanner: &mut MemberScanner<'_, R>,
    key: &[u8],
) -> Result<Option<RawMember>> {
    let mut names: Option<Vec<u8>> = None;
    let mut deferred: Vec<(u64, RawMember)> = Vec::new();

    while let Some(candidate) = scanner.next_member()? {
        if candidate.header.is_extended_names() {
            if names.is_none() {
                let table = scanner.read_content(&candidate)?;
                if let Some((_, hit)) = deferred
                    .iter()
                    .find(|(offset, _)| table_entry_matches(&table, *offset, key))
                {
                    return Ok(Some(*hit));
                }
                deferred.clear();
                names = Some(table);
            }
            continue;
        }

        let Some(offset) = candidate.header.extended_name_offset() else {
            continue;
        };
        match &names {
            Some(table) if table_entry_matches(table, offset, key) => return Ok(Some(candidate)),
            Some(_) => {}
            None => deferred.push((offset, candidate)),
        }
    }

    if !deferred.is_empty() {
        return Err(ElfDiffError::corrupt(
            scanner.path,
            "extended name table is missing",
        ));
    }
    Ok(None)
}

fn table_entry_matches(table: &[u8], offset: u64, key: &[u8]) -> bool {
    usize::try_from(offset)
        .ok()
        .and_then(|start| table.get(start..start.checked_add(key.len())?))
        .is_some_and(|entry| entry == key)
}

fn not_an_archive(path: &Path) -> ElfDiffError {
    ElfDiffError::NotAnArchive {
        path: path.to_path_buf(),
    }
}
