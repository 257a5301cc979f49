//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Petition CLI - screen and file opinion requests.
#[derive(Debug, Parser)]
#[command(name = "petition")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database path
    #[arg(short, long, env = "PETITION_DB", default_value = "petition.db", global = true)]
    pub db: String,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Detection profile
    #[arg(short, long, value_enum, global = true)]
    pub profile: Option<Profile>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable output (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// Detection profile selecting a preset configuration.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Profile {
    /// Balanced defaults
    Default,
    /// Lower threshold, wider window
    Strict,
    /// Higher threshold, shorter window
    Lenient,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Screen a candidate for duplicates without storing it
    Check(CandidateArgs),

    /// Screen a candidate and store it if it is not a duplicate
    Submit(SubmitArgs),

    /// List recent submissions in a category
    List(ListArgs),
}

/// A candidate submission given on the command line.
#[derive(Debug, Parser)]
pub struct CandidateArgs {
    /// Title of the request
    #[arg(short, long)]
    pub title: String,

    /// Department / category the request is addressed to
    #[arg(short, long)]
    pub category: String,

    /// Free-text body
    #[arg(short, long)]
    pub body: String,
}

/// Arguments for the submit command.
#[derive(Debug, Parser)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub candidate: CandidateArgs,

    /// Store the submission even if it is flagged as a duplicate
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Category to list
    #[arg(short, long)]
    pub category: String,

    /// How many days back to look
    #[arg(long, default_value_t = 180)]
    pub days: u64,

    /// Maximum number of submissions to show
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_command_parses() {
        let cli = Cli::parse_from([
            "petition", "check", "--title", "Fix Elm St", "--category", "Transportation",
            "--body", "Potholes everywhere.",
        ]);
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.title, "Fix Elm St");
                assert_eq!(args.category, "Transportation");
            }
            other => panic!("expected check, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_force_flag() {
        let cli = Cli::parse_from([
            "petition", "submit", "--title", "t", "--category", "c", "--body", "b", "--force",
        ]);
        match cli.command {
            Command::Submit(args) => assert!(args.force),
            other => panic!("expected submit, got {:?}", other),
        }
    }

    #[test]
    fn test_list_defaults() {
        let cli = Cli::parse_from(["petition", "list", "--category", "Parks"]);
        match cli.command {
            Command::List(args) => {
                assert_eq!(args.days, 180);
                assert_eq!(args.limit, 20);
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "petition", "--db", "custom.db", "--profile", "strict", "list", "--category", "Parks",
        ]);
        assert_eq!(cli.db, "custom.db");
        assert!(matches!(cli.profile, Some(Profile::Strict)));
    }
}
