//! CLI argument definitions using clap
//!
//! Commands:
//! - nben902 show --file <path>
//! - nben902 validate --file <path>
//! - nben902 fields
//! - nben902 add [--file <path>] [--set "Field=value"]...
//! - nben902 set --file <path> --row <n> --field <name> --value <v>
//! - nben902 duplicate --file <path> --row <n>
//! - nben902 delete --file <path> --row <n>
//! - nben902 set-effective-date --file <path> --date <DD-MM-YYYY>
//! - nben902 merge --file <path> --from <path>
//! - nben902 import-members [--file <path>] --sheet <path> [--select 1,3]
//! - nben902 transmit --file <path> --drop-dir <dir>
//!
//! Row numbers on the command line start at 1.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Edit and validate fixed-width NBEN902 payroll deduction files
#[derive(Parser, Debug)]
#[command(name = "nben902")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Lowest log severity written to stderr (trace, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the rows of a record file
    Show {
        /// Record file
        #[arg(long)]
        file: PathBuf,
    },

    /// Check every row and report the first invalid field
    Validate {
        #[arg(long)]
        file: PathBuf,
    },

    /// Print the column layout and help text
    Fields,

    /// Append a row; the file is created if missing
    Add {
        /// Record file, defaults to the configured file name
        #[arg(long)]
        file: Option<PathBuf>,

        /// Field assignment, e.g. --set "Name=DOE JANE"
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        values: Vec<String>,
    },

    /// Change one field of one row
    Set {
        #[arg(long)]
        file: PathBuf,

        #[arg(long)]
        row: usize,

        #[arg(long)]
        field: String,

        #[arg(long)]
        value: String,
    },

    /// Copy a row below itself as a second deduction line
    Duplicate {
        #[arg(long)]
        file: PathBuf,

        #[arg(long)]
        row: usize,
    },

    /// Remove a row
    Delete {
        #[arg(long)]
        file: PathBuf,

        #[arg(long)]
        row: usize,
    },

    /// Apply one effective date to every row
    SetEffectiveDate {
        #[arg(long)]
        file: PathBuf,

        #[arg(long)]
        date: String,
    },

    /// Append the rows of another record file
    Merge {
        #[arg(long)]
        file: PathBuf,

        #[arg(long)]
        from: PathBuf,
    },

    /// Add rows for members picked from a member sheet
    ImportMembers {
        /// Record file, defaults to the configured file name
        #[arg(long)]
        file: Option<PathBuf>,

        /// Member sheet: JSON array of rows, header row first
        #[arg(long)]
        sheet: PathBuf,

        /// Member rows to import, e.g. 1,3; omit to list members
        #[arg(long, value_delimiter = ',')]
        select: Vec<usize>,
    },

    /// Save, then deliver the file under a drop directory
    Transmit {
        #[arg(long)]
        file: PathBuf,

        /// Local directory standing in for the remote side
        #[arg(long)]
        drop_dir: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_import_selection() {
        let cli = Cli::try_parse_from([
            "nben902",
            "import-members",
            "--file",
            "a.input",
            "--sheet",
            "m.json",
            "--select",
            "1,3",
        ])
        .unwrap();
        match cli.command {
            Command::ImportMembers { select, .. } => assert_eq!(select, vec![1, 3]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["nben902", "fields", "--log-level", "info"]).unwrap();
        assert_eq!(cli.log_level, "info");
        assert!(cli.config.is_none());
    }
}
