//! High-level public API for comparing two object files.

use std::thread;

use crate::DiffConfig;
use crate::InputSpec;
use crate::Result;
use crate::SectionDiffReport;
use crate::SectionTable;
use crate::diff::diff_tables;

/// Outcome of [`compare_inputs`].
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Sections of the reference input.
    pub reference: SectionTable,
    /// Sections of the candidate input.
    pub candidate: SectionTable,
    /// Differences between the two.
    pub report: SectionDiffReport,
}

impl Comparison {
    /// Returns `true` if either table recorded warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.reference.warnings().is_empty() || !self.candidate.warnings().is_empty()
    }
}

/// Opens an input and builds its allocatable section table.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or read
/// - An archive member cannot be located (see
///   [`archive::locate`](crate::archive::locate))
/// - The bytes are not a valid ELF object
///
/// # Examples
///
/// ```no_run
/// use elfdiff_core::InputSpec;
/// use elfdiff_core::load_section_table;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let table = load_section_table(&InputSpec::parse("libfoo.a(foo.o)"))?;
/// println!("{} allocatable sections", table.len());
/// # Ok(())
/// # }
/// ```
pub fn load_section_table(spec: &InputSpec) -> Result<SectionTable> {
    let source = spec.open()?;
    SectionTable::build(spec.to_string(), source)
}

/// Compares the allocatable sections of two inputs.
///
/// Both inputs are loaded before diffing; an error on either side aborts the
/// comparison. With `config.parallel` the two inputs are decoded on separate
/// threads.
///
/// # Errors
///
/// Returns the first load error, checking the reference first.
///
/// # Examples
///
/// ```no_run
/// use elfdiff_core::DiffConfig;
/// use elfdiff_core::InputSpec;
/// use elfdiff_core::compare_inputs;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let comparison = compare_inputs(
///     &InputSpec::parse("ref/libfoo.a(foo.o)"),
///     &InputSpec::parse("out/libfoo.a(foo.o)"),
///     &DiffConfig::default(),
/// )?;
/// if comparison.report.has_differences() {
///     println!("{} sections missing", comparison.report.missing.len());
/// }
/// # Ok(())
/// # }
/// ```
pub fn compare_inputs(
    reference: &InputSpec,
    candidate: &InputSpec,
    config: &DiffConfig,
) -> Result<Comparison> {
    let (reference, candidate) = if config.parallel {
        thread::scope(|scope| {
            let pending = scope.spawn(|| load_section_table(reference));
            let candidate = load_section_table(candidate);
            let reference = pending
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            (reference, candidate)
        })
    } else {
        (load_section_table(reference), load_section_table(candidate))
    };
    let (reference, candidate) = (reference?, candidate?);

    let report = diff_tables(&reference, &candidate, config);
    Ok(Comparison {
        reference,
        candidate,
        report,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ElfDiffError;
    use crate::test_utils::ArArchiveBuilder;
    use object::SectionKind;
    use object::write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn elf_object(sections: &[(&str, SectionKind, usize)]) -> Vec<u8> {
        let mut obj = write::Object::new(
            object::BinaryFormat::Elf,
            object::Architecture::X86_64,
            object::Endianness::Little,
        );
        for (name, kind, size) in sections {
            let id = obj.add_section(Vec::new(), name.as_bytes().to_vec(), *kind);
            obj.append_section_data(id, &vec![0; *size], 1);
        }
        obj.write().unwrap()
    }

    fn write_file(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_compare_file_against_archive_member() {
        let temp = TempDir::new().unwrap();
        let reference = write_file(
            &temp,
            "ref.o",
            &elf_object(&[(".text", SectionKind::Text, 1000), (".data", SectionKind::Data, 200)]),
        );
        let member = elf_object(&[
            (".text", SectionKind::Text, 1000),
            (".rodata", SectionKind::ReadOnlyData, 50),
        ]);
        let archive = ArArchiveBuilder::new()
            .member("padding.o", b"not an object")
            .member("a_long_object_name.o", &member)
            .build();
        let archive = write_file(&temp, "libour.a", &archive);

        for parallel in [true, false] {
            let config = DiffConfig {
                parallel,
                ..Default::default()
            };
            let comparison = compare_inputs(
                &InputSpec::File {
                    path: reference.clone(),
                },
                &InputSpec::ArchiveMember {
                    archive: archive.clone(),
                    member: "a_long_object_name.o".to_string(),
                },
                &config,
            )
            .unwrap();

            assert_eq!(comparison.report.missing, [".data"]);
            assert_eq!(comparison.report.extra, [".rodata"]);
            assert!(comparison.report.size_deltas.is_empty());
            assert!(!comparison.has_warnings());
            assert!(comparison.candidate.label().ends_with("libour.a(a_long_object_name.o)"));
        }
    }

    #[test]
    fn test_compare_aborts_on_missing_member() {
        let temp = TempDir::new().unwrap();
        let object = write_file(&temp, "x.o", &elf_object(&[(".text", SectionKind::Text, 4)]));
        let archive = write_file(
            &temp,
            "lib.a",
            &ArArchiveBuilder::new().member("y.o", b"yy").build(),
        );

        let err = compare_inputs(
            &InputSpec::File { path: object },
            &InputSpec::ArchiveMember {
                archive,
                member: "missing.o".to_string(),
            },
            &DiffConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ElfDiffError::MemberNotFound { .. }));
    }

    #[test]
    fn test_load_rejects_non_object_member() {
        let temp = TempDir::new().unwrap();
        let archive = write_file(
            &temp,
            "lib.a",
            &ArArchiveBuilder::new().member("notes.txt", b"plain text").build(),
        );
        let err = load_section_table(&InputSpec::parse(&format!(
            "{}(notes.txt)",
            archive.display()
        )))
        .unwrap_err();
        assert!(matches!(err, ElfDiffError::ObjectDecode { .. }));
    }
}
