//! Test utilities for building `ar` archives in memory.
//!
//! The crate never writes archives itself; this builder exists so tests and
//! benchmarks can produce precise fixtures, including the GNU extended-name
//! table and deliberately malformed layouts.

use crate::archive::header::MAGIC;
use crate::archive::header::NAME_FIELD_LEN;

/// Where the `//` extended-name table is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamesTable {
    First,
    Last,
    Omitted,
}

/// Builder for GNU-style `ar` test archives.
///
/// Names whose `name + "/"` fits in 16 bytes are stored inline; longer names
/// go to the `//` table and the header holds `/<offset>`.
///
/// # Examples
///
/// ```
/// use elfdiff_core::test_utils::ArArchiveBuilder;
///
/// let archive = ArArchiveBuilder::new()
///     .member("foo.o", b"hello")
///     .member("a_long_member_name.o", b"world")
///     .build();
/// assert!(archive.starts_with(b"!<arch>\n"));
/// ```
#[derive(Debug, Clone)]
pub struct ArArchiveBuilder {
    members: Vec<(String, Vec<u8>)>,
    symbol_table: Option<Vec<u8>>,
    names_table: NamesTable,
}

impl ArArchiveBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            symbol_table: None,
            names_table: NamesTable::First,
        }
    }

    /// Appends a member.
    #[must_use]
    pub fn member(mut self, name: &str, data: &[u8]) -> Self {
        self.members.push((name.to_string(), data.to_vec()));
        self
    }

    /// Emits a `/` symbol table member with `data` before everything else.
    #[must_use]
    pub fn symbol_table(mut self, data: &[u8]) -> Self {
        self.symbol_table = Some(data.to_vec());
        self
    }

    /// Emits the extended-name table after all members instead of first.
    #[must_use]
    pub fn names_table_last(mut self) -> Self {
        self.names_table = NamesTable::Last;
        self
    }

    /// Leaves out the extended-name table, producing a broken archive when
    /// long names are present.
    #[must_use]
    pub fn without_names_table(mut self) -> Self {
        self.names_table = NamesTable::Omitted;
        self
    }

    /// Serializes the archive.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let mut names = Vec::new();
        let mut entries = Vec::with_capacity(self.members.len());
        for (name, data) in &self.members {
            let field = if name.len() < NAME_FIELD_LEN {
                format!("{name}/")
            } else {
                let field = format!("/{}", names.len());
                names.extend_from_slice(name.as_bytes());
                names.extend_from_slice(b"/\n");
                field
            };
            entries.push((field, data.as_slice()));
        }

        let mut out = MAGIC.to_vec();
        if let Some(symbols) = &self.symbol_table {
            write_member(&mut out, "/", symbols);
        }
        let emit_names = !names.is_empty() && self.names_table != NamesTable::Omitted;
        if emit_names && self.names_table == NamesTable::First {
            write_member(&mut out, "//", &names);
        }
        for (field, data) in entries {
            write_member(&mut out, &field, data);
        }
        if emit_names && self.names_table == NamesTable::Last {
            write_member(&mut out, "//", &names);
        }
        out
    }
}

impl Default for ArArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_member(out: &mut Vec<u8>, name_field: &str, data: &[u8]) {
    let header = format!(
        "{name_field:<16}{:<12}{:<6}{:<6}{:<8}{:<10}`\n",
        0,
        0,
        0,
        644,
        data.len()
    );
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(data);
    if data.len() % 2 == 1 {
        out.push(b'\n');
    }
}
