//! Allocatable section tables.
//!
//! Decoding is delegated to the `object` crate. This module only keeps the
//! sections that occupy memory at run time and indexes them by name.

use std::collections::HashMap;
use std::fmt;

use object::Object as _;
use object::ObjectSection as _;
use object::ReadCache;
use object::SectionFlags;
use object::elf;

use crate::ElfDiffError;
use crate::Result;
use crate::io::ReadAt;
use crate::io::ReadAtCursor;

/// One decoded section header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section name.
    pub name: String,
    /// Whether the section occupies memory at run time (`SHF_ALLOC`).
    pub allocatable: bool,
    /// Size in bytes as declared by the section header.
    pub size: u64,
}

impl Section {
    /// Creates a section from its ELF `sh_flags`.
    #[must_use]
    pub fn from_elf_flags(name: impl Into<String>, sh_flags: u64, size: u64) -> Self {
        Self {
            name: name.into(),
            allocatable: sh_flags & u64::from(elf::SHF_ALLOC) != 0,
            size,
        }
    }
}

/// Non-fatal findings recorded while building a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionWarning {
    /// A second allocatable section with an already-seen name was dropped.
    DuplicateSection {
        /// The repeated section name.
        name: String,
    },
}

impl fmt::Display for SectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSection { name } => write!(f, "duplicate section {name}, ignoring"),
        }
    }
}

/// Allocatable sections of one input, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct SectionTable {
    label: String,
    sections: HashMap<String, Section>,
    warnings: Vec<SectionWarning>,
}

impl SectionTable {
    /// Decodes `source` as an ELF object and builds its table.
    ///
    /// `label` names the input in warnings and errors.
    ///
    /// # Errors
    ///
    /// Returns [`ElfDiffError::ObjectDecode`] if `source` is not a parseable
    /// ELF file.
    pub fn build<R: ReadAt>(label: impl Into<String>, source: R) -> Result<Self> {
        let label = label.into();
        let sections = decode_sections(&label, source)?;
        Ok(Self::from_sections(label, sections))
    }

    /// Builds a table from already-decoded sections.
    ///
    /// Non-allocatable sections are skipped. For repeated names the first
    /// section wins and a [`SectionWarning::DuplicateSection`] is recorded.
    ///
    /// # Examples
    ///
    /// ```
    /// use elfdiff_core::Section;
    /// use elfdiff_core::SectionTable;
    ///
    /// let table = SectionTable::from_sections(
    ///     "foo.o",
    ///     [
    ///         Section::from_elf_flags(".text", 0x6, 100),
    ///         Section::from_elf_flags(".comment", 0x30, 20),
    ///         Section::from_elf_flags(".text", 0x6, 7),
    ///     ],
    /// );
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.get(".text").map(|s| s.size), Some(100));
    /// assert_eq!(table.warnings().len(), 1);
    /// ```
    pub fn from_sections<I>(label: impl Into<String>, sections: I) -> Self
    where
        I: IntoIterator<Item = Section>,
    {
        let mut table = Self {
            label: label.into(),
            ..Self::default()
        };
        for section in sections.into_iter().filter(|s| s.allocatable) {
            if table.sections.contains_key(&section.name) {
                table.warnings.push(SectionWarning::DuplicateSection {
                    name: section.name,
                });
                continue;
            }
            table.sections.insert(section.name.clone(), section);
        }
        table
    }

    /// The input this table was built from.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Looks up a section by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Section names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Number of allocatable sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the input had no allocatable sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total size of all allocatable sections.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.sections
            .values()
            .fold(0u64, |acc, s| acc.saturating_add(s.size))
    }

    /// Warnings recorded while building the table.
    #[must_use]
    pub fn warnings(&self) -> &[SectionWarning] {
        &self.warnings
    }
}

/// Decodes the section headers of an ELF file.
fn decode_sections<R: ReadAt>(label: &str, source: R) -> Result<Vec<Section>> {
    let decode_error = |reason: String| ElfDiffError::ObjectDecode {
        input: label.to_string(),
        reason,
    };

    let cache = ReadCache::new(ReadAtCursor::new(source));
    let file = object::File::parse(&cache).map_err(|e| decode_error(e.to_string()))?;
    let format = file.format();
    if format != object::BinaryFormat::Elf {
        return Err(decode_error(format!("{format:?} objects are not supported")));
    }

    let mut sections = Vec::new();
    for section in file.sections() {
        let name = section
            .name_bytes()
            .map_err(|e| decode_error(e.to_string()))?;
        let sh_flags = match section.flags() {
            SectionFlags::Elf { sh_flags } => sh_flags,
            _ => 0,
        };
        sections.push(Section::from_elf_flags(
            String::from_utf8_lossy(name),
            sh_flags,
            section.size(),
        ));
    }
    Ok(sections)
}
