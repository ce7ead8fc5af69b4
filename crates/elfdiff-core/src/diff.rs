//! Section table comparison.

use crate::DiffConfig;
use crate::SectionTable;
use crate::classify::classify;

/// A section present in both inputs with different sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeDelta {
    /// Section name.
    pub name: String,
    /// Size in the reference input.
    pub ref_size: u64,
    /// Size in the candidate input.
    pub our_size: u64,
    /// `our_size - ref_size`, saturated to the `i64` range.
    pub delta: i64,
}

impl SizeDelta {
    fn new(name: &str, ref_size: u64, our_size: u64) -> Self {
        let delta = if our_size >= ref_size {
            i64::try_from(our_size - ref_size).unwrap_or(i64::MAX)
        } else {
            i64::try_from(ref_size - our_size).map_or(i64::MIN, |d| -d)
        };
        Self {
            name: name.to_string(),
            ref_size,
            our_size,
            delta,
        }
    }
}

/// Differences between a reference and a candidate section table.
///
/// All sequences are sorted by section name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionDiffReport {
    /// Sections present only in the reference.
    pub missing: Vec<String>,
    /// Sections present only in the candidate.
    pub extra: Vec<String>,
    /// Common sections whose sizes differ.
    pub size_deltas: Vec<SizeDelta>,
}

impl SectionDiffReport {
    /// Returns `true` if the inputs are equivalent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.size_deltas.is_empty()
    }

    /// Returns `true` if any difference was found.
    #[must_use]
    pub fn has_differences(&self) -> bool {
        !self.is_empty()
    }

    /// Sum of all size deltas.
    #[must_use]
    pub fn net_size_delta(&self) -> i64 {
        self.size_deltas
            .iter()
            .fold(0i64, |acc, d| acc.saturating_add(d.delta))
    }
}

/// Compares the allocatable sections of two tables.
///
/// Names listed in `config.ignored_sections` are skipped entirely.
///
/// # Examples
///
/// ```
/// use elfdiff_core::DiffConfig;
/// use elfdiff_core::Section;
/// use elfdiff_core::SectionTable;
/// use elfdiff_core::diff_tables;
///
/// const ALLOC: u64 = 0x2;
/// let reference = SectionTable::from_sections(
///     "ref.o",
///     [
///         Section::from_elf_flags(".text", ALLOC, 1000),
///         Section::from_elf_flags(".data", ALLOC, 200),
///     ],
/// );
/// let candidate = SectionTable::from_sections(
///     "our.o",
///     [
///         Section::from_elf_flags(".text", ALLOC, 1000),
///         Section::from_elf_flags(".rodata", ALLOC, 50),
///     ],
/// );
///
/// let report = diff_tables(&reference, &candidate, &DiffConfig::default());
/// assert_eq!(report.missing, [".data"]);
/// assert_eq!(report.extra, [".rodata"]);
/// assert!(report.size_deltas.is_empty());
/// assert!(report.has_differences());
/// ```
pub fn diff_tables(
    reference: &SectionTable,
    ours: &SectionTable,
    config: &DiffConfig,
) -> SectionDiffReport {
    let parts = classify(reference.names(), ours.names(), |name| {
        !config.is_ignored(name)
    })
    .sorted();

    let size_deltas = parts
        .common
        .iter()
        .filter_map(|name| {
            let ref_size = reference.get(name)?.size;
            let our_size = ours.get(name)?.size;
            (ref_size != our_size).then(|| SizeDelta::new(name, ref_size, our_size))
        })
        .collect();

    SectionDiffReport {
        missing: parts.left_only.into_iter().map(str::to_string).collect(),
        extra: parts.right_only.into_iter().map(str::to_string).collect(),
        size_deltas,
    }
}
