//! CLI argument parsing using clap.

use clap::Parser;
use clap_complete::Shell;
use elfdiff_core::InputSpec;

#[derive(Parser)]
#[command(name = "elfdiff")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Inputs are object files or archive members written as ARCHIVE(MEMBER).\n\n\
    Exit status: 0 if the allocatable sections match, 1 if they differ, 2 on error.")]
pub struct Cli {
    #[command(flatten)]
    pub compare: CompareArgs,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the report, only set the exit status
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", exclusive = true)]
    pub completions: Option<Shell>,
}

#[derive(clap::Args)]
pub struct CompareArgs {
    /// Reference object file or ARCHIVE(MEMBER)
    #[arg(
        value_name = "REFERENCE",
        required_unless_present = "completions",
        value_parser = parse_input
    )]
    pub reference: Option<InputSpec>,

    /// Candidate object file or ARCHIVE(MEMBER)
    #[arg(
        value_name = "CANDIDATE",
        required_unless_present = "completions",
        value_parser = parse_input
    )]
    pub candidate: Option<InputSpec>,

    /// Leave a section out of the comparison (can be repeated)
    #[arg(long = "ignore-section", short = 'i', value_name = "NAME")]
    pub ignore_sections: Vec<String>,

    /// Decode the two inputs one after the other
    #[arg(long)]
    pub sequential: bool,
}

fn parse_input(s: &str) -> Result<InputSpec, String> {
    if s.is_empty() {
        return Err("input must not be empty".to_string());
    }
    Ok(InputSpec::parse(s))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_two_inputs() {
        let cli = Cli::try_parse_from(["elfdiff", "ref.o", "lib.a(our.o)"]).unwrap();
        assert_eq!(
            cli.compare.reference,
            Some(InputSpec::File {
                path: PathBuf::from("ref.o")
            })
        );
        assert_eq!(
            cli.compare.candidate,
            Some(InputSpec::ArchiveMember {
                archive: PathBuf::from("lib.a"),
                member: "our.o".to_string(),
            })
        );
        assert!(!cli.compare.sequential);
        assert!(cli.compare.ignore_sections.is_empty());
    }

    #[test]
    fn test_parse_ignore_sections() {
        let cli = Cli::try_parse_from([
            "elfdiff",
            "--ignore-section",
            ".bss",
            "-i",
            ".tbss",
            "--sequential",
            "a.o",
            "b.o",
        ])
        .unwrap();
        assert_eq!(cli.compare.ignore_sections, [".bss", ".tbss"]);
        assert!(cli.compare.sequential);
    }

    #[test]
    fn test_inputs_required() {
        assert!(Cli::try_parse_from(["elfdiff", "a.o"]).is_err());
        assert!(Cli::try_parse_from(["elfdiff", "", "b.o"]).is_err());
    }

    #[test]
    fn test_completions_without_inputs() {
        let cli = Cli::try_parse_from(["elfdiff", "--completions", "bash"]).unwrap();
        assert_eq!(cli.completions, Some(Shell::Bash));
        assert!(cli.compare.reference.is_none());
    }

    #[test]
    fn test_completions_is_exclusive() {
        assert!(Cli::try_parse_from(["elfdiff", "--completions", "zsh", "a.o", "b.o"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["elfdiff", "-q", "-v", "a.o", "b.o"]).is_err());
    }
}
