mod cli;
mod error;
mod paths;
mod render;

use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use ledger_lib::config::TableConfig;
use ledger_lib::model::Backup;
use ledger_lib::model::Client;
use ledger_lib::model::Invoice;
use ledger_lib::model::TaxPrepayment;
use ledger_lib::model::TimeEntry;
use ledger_lib::table::Column;
use ledger_lib::table::EventResult;
use ledger_lib::table::GroupBy;
use ledger_lib::table::Table;
use ledger_lib::table::TableRow;
use serde::de::DeserializeOwned;
use simplelog::ColorChoice;
use simplelog::Config;
use simplelog::TermLogger;
use simplelog::TerminalMode;

use crate::cli::CliArgs;
use crate::cli::Kind;
use crate::error::CliError;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(args: &CliArgs) -> Result<(), CliError> {
    TermLogger::init(
        args.log_level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let config = load_config(args.config.as_deref())?;
    let data = fs::read_to_string(&args.file).map_err(|e| CliError::read(&args.file, e))?;

    match args.kind {
        Kind::TimeEntries => show(&data, TimeEntry::columns(), args, config),
        Kind::Invoices => show(&data, Invoice::columns(), args, config),
        Kind::Clients => show(&data, Client::columns(), args, config),
        Kind::TaxPrepayments => show(&data, TaxPrepayment::columns(), args, config),
        Kind::Backups => show(&data, Backup::columns(), args, config),
    }
}

/// Load table defaults from `--config`, else the user config file, else
/// built-in defaults.
fn load_config(explicit: Option<&Path>) -> Result<TableConfig, CliError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match paths::table_config() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("No table config found, using defaults");
                return Ok(TableConfig::default());
            }
        },
    };

    let json = fs::read_to_string(&path).map_err(|e| CliError::read(&path, e))?;
    let config = TableConfig::from_json(&json)?;
    log::info!("Loaded table config from {}", path.display());
    Ok(config)
}

/// Parse records of one kind, run them through a table, and print the page.
fn show<T>(
    data: &str,
    columns: Vec<Column<T>>,
    args: &CliArgs,
    config: TableConfig,
) -> Result<(), CliError>
where
    T: TableRow + DeserializeOwned,
{
    let rows: Vec<T> = serde_json::from_str(data).map_err(|source| CliError::Records {
        kind: args.kind,
        source,
    })?;
    log::info!("Loaded {} {}", rows.len(), args.kind);

    let mut builder = Table::builder(columns)
        .rows(rows)
        .config(config)
        .expanded(args.expand.iter().cloned());
    if let Some(page_size) = args.page_size {
        builder = builder.page_size(page_size);
    }
    if let Some(field) = &args.group_by {
        if !T::FIELDS.contains(&field.as_str()) {
            return Err(CliError::unknown_field(args.kind, field, T::FIELDS));
        }
        builder = builder.group_by(GroupBy::field(field));
    }
    let mut table = builder.build()?;

    if let Some(key) = &args.sort {
        // One click sorts ascending, a second flips to descending.
        if table.on_header_click(key) == EventResult::Ignored {
            log::warn!("Column '{}' is not sortable, keeping input order", key);
        } else if args.desc {
            table.on_header_click(key);
        }
    }
    if args.expand_all {
        table.expand_all();
    }
    if let Some(page) = args.page {
        table.set_page(page);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::write_view(&mut out, &table.view())?;
    Ok(())
}
