//! Locate object files inside `ar` archives and compare their sections.
//!
//! `elfdiff-core` reads two ELF object files, each either a standalone file
//! or a `path(member)` inside a Unix `ar` archive, collects their allocatable
//! sections and reports which section names and sizes differ.
//!
//! # Examples
//!
//! ```no_run
//! use elfdiff_core::DiffConfig;
//! use elfdiff_core::InputSpec;
//! use elfdiff_core::compare_inputs;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let comparison = compare_inputs(
//!     &InputSpec::parse("prebuilts/libc.a(printf.o)"),
//!     &InputSpec::parse("out/printf.o"),
//!     &DiffConfig::default(),
//! )?;
//! for delta in &comparison.report.size_deltas {
//!     println!("{}: {:+}", delta.name, delta.delta);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod classify;
pub mod config;
pub mod diff;
pub mod error;
pub mod input;
pub mod io;
pub mod sections;
pub mod test_utils;

// Re-export main API types
pub use api::Comparison;
pub use api::compare_inputs;
pub use api::load_section_table;
pub use classify::Classification;
pub use classify::classify;
pub use config::DiffConfig;
pub use diff::SectionDiffReport;
pub use diff::SizeDelta;
pub use diff::diff_tables;
pub use error::ElfDiffError;
pub use error::Result;
pub use input::InputSpec;
pub use sections::Section;
pub use sections::SectionTable;
pub use sections::SectionWarning;
