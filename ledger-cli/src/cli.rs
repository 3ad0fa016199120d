//! Command-line argument parsing

use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use simplelog::LevelFilter;

/// Print sorted, grouped, and paged views of exported records
#[derive(Parser, Debug)]
#[command(name = "ledger", version, about = "Print table views of exported records")]
pub struct CliArgs {
    /// JSON file holding an array of records
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Kind of records in the file
    #[arg(short, long, value_enum)]
    pub kind: Kind,

    /// Sort by this column
    #[arg(short, long, value_name = "KEY")]
    pub sort: Option<String>,

    /// Sort descending (used with --sort)
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Group rows by this field
    #[arg(short, long, value_name = "FIELD")]
    pub group_by: Option<String>,

    /// Show page N
    #[arg(short, long, value_name = "N")]
    pub page: Option<usize>,

    /// Rows (or groups) per page
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Expand the group with this key (repeatable)
    #[arg(short, long, value_name = "KEY")]
    pub expand: Vec<String>,

    /// Expand every group
    #[arg(long, conflicts_with = "expand")]
    pub expand_all: bool,

    /// Table config file (defaults to table.json in the config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    /// Log level for the verbosity flag count.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Record kinds the CLI can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    TimeEntries,
    Invoices,
    Clients,
    TaxPrepayments,
    Backups,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::TimeEntries => "time-entries",
            Kind::Invoices => "invoices",
            Kind::Clients => "clients",
            Kind::TaxPrepayments => "tax-prepayments",
            Kind::Backups => "backups",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_invocation() {
        let args = CliArgs::try_parse_from([
            "ledger",
            "entries.json",
            "--kind",
            "time-entries",
            "--sort",
            "hours",
            "--desc",
            "--group-by",
            "date",
            "--page",
            "2",
            "-e",
            "2024-03-04",
            "-e",
            "2024-03-05",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.kind, Kind::TimeEntries);
        assert_eq!(args.sort.as_deref(), Some("hours"));
        assert!(args.desc);
        assert_eq!(args.page, Some(2));
        assert_eq!(args.expand, vec!["2024-03-04", "2024-03-05"]);
        assert_eq!(args.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_desc_requires_sort() {
        let result = CliArgs::try_parse_from(["ledger", "x.json", "-k", "invoices", "--desc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_kind_names() {
        let args = CliArgs::try_parse_from(["ledger", "x.json", "-k", "tax-prepayments"]).unwrap();
        assert_eq!(args.kind.to_string(), "tax-prepayments");
        assert_eq!(args.log_level(), LevelFilter::Warn);
    }
}
