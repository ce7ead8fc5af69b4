//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use elfdiff_core::Comparison;
use elfdiff_core::SectionDiffReport;
use elfdiff_core::SectionTable;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    out: Term,
    err: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.use_colors {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn write_warnings(&self, table: &SectionTable) {
        for warning in table.warnings() {
            let line = format!("{}: {warning}", table.label());
            if self.use_colors {
                let _ = self
                    .err
                    .write_line(&format!("{} {line}", style("WARNING:").yellow().bold()));
            } else {
                let _ = self.err.write_line(&format!("WARNING: {line}"));
            }
        }
    }

    fn write_summary(&self, comparison: &Comparison) -> Result<()> {
        for (role, table) in [
            ("Reference", &comparison.reference),
            ("Candidate", &comparison.candidate),
        ] {
            self.out.write_line(&format!(
                "  {role} sections: {} ({} bytes)",
                table.len(),
                table.total_size()
            ))?;
        }
        self.out.write_line(&format!(
            "  Net size change: {:+} bytes",
            comparison.report.net_size_delta()
        ))?;
        Ok(())
    }
}

enum ReportLine {
    Heading(&'static str),
    Entry(String),
}

/// Renders the difference blocks.
///
/// Empty blocks are left out. Size entries read `name:refSize+delta`.
fn report_lines(report: &SectionDiffReport) -> Vec<ReportLine> {
    let mut lines = Vec::new();
    if !report.missing.is_empty() {
        lines.push(ReportLine::Heading("Missing sections:"));
        lines.extend(report.missing.iter().map(|name| ReportLine::Entry(format!("  {name}"))));
    }
    if !report.size_deltas.is_empty() {
        lines.push(ReportLine::Heading("Sections with different sizes:"));
        lines.extend(report.size_deltas.iter().map(|d| {
            ReportLine::Entry(format!("  {}:{}{:+}", d.name, d.ref_size, d.delta))
        }));
    }
    if !report.extra.is_empty() {
        lines.push(ReportLine::Heading("Extra sections:"));
        lines.extend(report.extra.iter().map(|name| ReportLine::Entry(format!("  {name}"))));
    }
    lines
}

impl OutputFormatter for HumanFormatter {
    fn format_comparison(&self, comparison: &Comparison) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_warnings(&comparison.reference);
        self.write_warnings(&comparison.candidate);

        let reference = comparison.reference.label();
        let candidate = comparison.candidate.label();

        if comparison.report.has_differences() {
            self.out
                .write_line(&self.heading(&format!("{candidate} differs from {reference}")))?;
            for line in report_lines(&comparison.report) {
                match line {
                    ReportLine::Heading(text) => self.out.write_line(&self.heading(text))?,
                    ReportLine::Entry(entry) => self.out.write_line(&entry)?,
                }
            }
        } else if self.verbose {
            if self.use_colors {
                self.out.write_line(&format!(
                    "{} {candidate} matches {reference}",
                    style("✓").green().bold()
                ))?;
            } else {
                self.out
                    .write_line(&format!("{candidate} matches {reference}"))?;
            }
        }

        if self.verbose {
            self.write_summary(comparison)?;
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err.write_line(&format!("ERROR: {error:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elfdiff_core::DiffConfig;
    use elfdiff_core::Section;
    use elfdiff_core::diff_tables;

    fn table(label: &str, sections: &[(&str, u64)]) -> SectionTable {
        SectionTable::from_sections(
            label,
            sections
                .iter()
                .map(|(name, size)| Section::from_elf_flags(*name, 0x2, *size)),
        )
    }

    fn rendered(report: &SectionDiffReport) -> Vec<String> {
        report_lines(report)
            .into_iter()
            .map(|line| match line {
                ReportLine::Heading(text) => text.to_string(),
                ReportLine::Entry(entry) => entry,
            })
            .collect()
    }

    #[test]
    fn test_report_lines_layout() {
        let reference = table("ref.o", &[(".text", 100), (".data", 200), (".bss", 8)]);
        let ours = table("our.o", &[(".text", 120), (".bss", 4), (".rodata", 50)]);
        let report = diff_tables(&reference, &ours, &DiffConfig::default());

        assert_eq!(
            rendered(&report),
            [
                "Missing sections:",
                "  .data",
                "Sections with different sizes:",
                "  .bss:8-4",
                "  .text:100+20",
                "Extra sections:",
                "  .rodata",
            ]
        );
    }

    #[test]
    fn test_report_lines_skip_empty_blocks() {
        let reference = table("ref.o", &[(".text", 1)]);
        let ours = table("our.o", &[(".text", 1), (".init", 4)]);
        let report = diff_tables(&reference, &ours, &DiffConfig::default());

        assert_eq!(rendered(&report), ["Extra sections:", "  .init"]);
    }

    #[test]
    fn test_report_lines_empty_when_equal() {
        let reference = table("ref.o", &[(".text", 1)]);
        let report = diff_tables(&reference, &reference, &DiffConfig::default());
        assert!(report_lines(&report).is_empty());
    }
}
