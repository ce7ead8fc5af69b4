//! `ar` member header layout.
//!
//! ```text
//! offset  len  field
//!      0   16  name
//!     16   12  modification time
//!     28    6  owner id
//!     34    6  group id
//!     40    8  mode
//!     48   10  size (decimal ASCII)
//!     58    2  terminator "`\n"
//! ```
//!
//! Only the name and size fields are interpreted.

/// Identification bytes at the start of every archive.
pub const MAGIC: &[u8; 8] = b"!<arch>\n";

/// Size of a member header in bytes.
pub const HEADER_SIZE: usize = 60;

/// Width of the inline name field.
pub const NAME_FIELD_LEN: usize = 16;

const SIZE_FIELD: std::ops::Range<usize> = 48..58;

/// Name of the GNU extended-name table member.
pub const EXTENDED_NAMES: &[u8] = b"//";

/// One raw member header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberHeader {
    bytes: [u8; HEADER_SIZE],
}

impl MemberHeader {
    /// Wraps raw header bytes.
    #[must_use]
    pub const fn new(bytes: [u8; HEADER_SIZE]) -> Self {
        Self { bytes }
    }

    /// The 16-byte name field, padding included.
    #[must_use]
    pub fn name_field(&self) -> &[u8] {
        &self.bytes[..NAME_FIELD_LEN]
    }

    /// Parses the declared content size.
    ///
    /// Returns `None` unless the whitespace-trimmed field is a non-empty run
    /// of decimal digits that fits in a `u64`.
    #[must_use]
    pub fn content_size(&self) -> Option<u64> {
        parse_decimal(&self.bytes[SIZE_FIELD])
    }

    /// Returns `true` for the extended-name table member (`//`).
    #[must_use]
    pub fn is_extended_names(&self) -> bool {
        self.bytes.starts_with(EXTENDED_NAMES)
    }

    /// Offset into the extended-name table, for headers named `/<digits>`.
    #[must_use]
    pub fn extended_name_offset(&self) -> Option<u64> {
        let rest = self.name_field().strip_prefix(b"/")?;
        parse_decimal(rest)
    }

    /// Returns `true` if `key` matches the start of the inline name field.
    #[must_use]
    pub fn name_starts_with(&self, key: &[u8]) -> bool {
        key.len() <= NAME_FIELD_LEN && self.name_field().starts_with(key)
    }
}

fn parse_decimal(field: &[u8]) -> Option<u64> {
    let text = std::str::from_utf8(field).ok()?.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Rounds a member end offset up to the even boundary where the next header
/// starts.
#[must_use]
pub const fn align_even(offset: u64) -> Option<u64> {
    offset.checked_add(offset & 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(name: &str, size: &str) -> MemberHeader {
        let mut bytes = [b' '; HEADER_SIZE];
        bytes[..name.len()].copy_from_slice(name.as_bytes());
        bytes[48..48 + size.len()].copy_from_slice(size.as_bytes());
        bytes[58..].copy_from_slice(b"`\n");
        MemberHeader::new(bytes)
    }

    #[test]
    fn test_content_size() {
        assert_eq!(header("foo.o/", "1234").content_size(), Some(1234));
        assert_eq!(header("foo.o/", "0").content_size(), Some(0));
        assert_eq!(header("foo.o/", "9999999999").content_size(), Some(9_999_999_999));
    }

    #[test]
    fn test_content_size_rejects_garbage() {
        assert_eq!(header("foo.o/", "").content_size(), None);
        assert_eq!(header("foo.o/", "-5").content_size(), None);
        assert_eq!(header("foo.o/", "+5").content_size(), None);
        assert_eq!(header("foo.o/", "12a").content_size(), None);
        assert_eq!(header("foo.o/", "1 2").content_size(), None);
    }

    #[test]
    fn test_extended_name_offset() {
        assert_eq!(header("/42", "1").extended_name_offset(), Some(42));
        assert_eq!(header("/0", "1").extended_name_offset(), Some(0));
        // Symbol table and the name table itself are not references.
        assert_eq!(header("/", "1").extended_name_offset(), None);
        assert_eq!(header("//", "1").extended_name_offset(), None);
        assert_eq!(header("/SYM64/", "1").extended_name_offset(), None);
        assert_eq!(header("foo.o/", "1").extended_name_offset(), None);
    }

    #[test]
    fn test_is_extended_names() {
        assert!(header("//", "10").is_extended_names());
        assert!(!header("/", "10").is_extended_names());
        assert!(!header("/12", "10").is_extended_names());
    }

    #[test]
    fn test_name_starts_with() {
        let h = header("foo.o/", "1");
        assert!(h.name_starts_with(b"foo.o/"));
        assert!(!h.name_starts_with(b"foo/"));
        assert!(!h.name_starts_with(b"fo.o/"));
        assert!(!h.name_starts_with(b"a-name-longer-than-16/"));
    }

    #[test]
    fn test_align_even() {
        assert_eq!(align_even(0), Some(0));
        assert_eq!(align_even(7), Some(8));
        assert_eq!(align_even(8), Some(8));
        assert_eq!(align_even(u64::MAX), None);
    }
}
