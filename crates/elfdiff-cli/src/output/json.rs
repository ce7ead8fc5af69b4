//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use elfdiff_core::Comparison;
use elfdiff_core::SectionTable;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct SizeDeltaOutput {
    name: String,
    ref_size: u64,
    our_size: u64,
    delta: i64,
}

#[derive(Debug, Serialize)]
struct WarningOutput {
    input: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct ComparisonOutput {
    reference: String,
    candidate: String,
    differs: bool,
    missing: Vec<String>,
    extra: Vec<String>,
    size_deltas: Vec<SizeDeltaOutput>,
    warnings: Vec<WarningOutput>,
}

impl ComparisonOutput {
    fn new(comparison: &Comparison) -> Self {
        let report = &comparison.report;
        Self {
            reference: comparison.reference.label().to_string(),
            candidate: comparison.candidate.label().to_string(),
            differs: report.has_differences(),
            missing: report.missing.clone(),
            extra: report.extra.clone(),
            size_deltas: report
                .size_deltas
                .iter()
                .map(|d| SizeDeltaOutput {
                    name: d.name.clone(),
                    ref_size: d.ref_size,
                    our_size: d.our_size,
                    delta: d.delta,
                })
                .collect(),
            warnings: [&comparison.reference, &comparison.candidate]
                .into_iter()
                .flat_map(warnings_of)
                .collect(),
        }
    }
}

fn warnings_of(table: &SectionTable) -> impl Iterator<Item = WarningOutput> + '_ {
    table.warnings().iter().map(|w| WarningOutput {
        input: table.label().to_string(),
        message: w.to_string(),
    })
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_comparison(&self, comparison: &Comparison) -> Result<()> {
        let output = JsonOutput::success("compare", ComparisonOutput::new(comparison));
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let _ = Term::stderr().write_line(&format!("ERROR: {error:?}"));
        let output = JsonOutput::error("compare", format!("{error:#}"));
        let _ = Self::output(&output);
    }
}
