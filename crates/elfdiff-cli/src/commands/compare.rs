//! Compare command implementation

use crate::cli::CompareArgs;
use crate::error::add_diff_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use elfdiff_core::DiffConfig;
use elfdiff_core::compare_inputs;

/// Runs the comparison and reports it.
///
/// Returns `true` if the inputs differ.
pub fn execute(args: &CompareArgs, formatter: &dyn OutputFormatter) -> Result<bool> {
    let reference = args
        .reference
        .as_ref()
        .context("missing REFERENCE input")?;
    let candidate = args
        .candidate
        .as_ref()
        .context("missing CANDIDATE input")?;

    let config = DiffConfig {
        ignored_sections: args.ignore_sections.clone(),
        parallel: !args.sequential,
    };

    let comparison = add_diff_context(compare_inputs(reference, candidate, &config))?;

    formatter.format_comparison(&comparison)?;

    Ok(comparison.report.has_differences())
}
