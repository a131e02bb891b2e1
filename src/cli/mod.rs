//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the sheetsapi binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;

use crate::models::ValueInputOption;

/// Environment variable naming the default target spreadsheet.
pub const SPREADSHEET_ENV: &str = "SHEETS_SPREADSHEET_ID";

/// Google Sheets API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "sheetsapi", about = "Google Sheets API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Print the staged request instead of sending it.
    #[arg(long, global = true, default_value = "false")]
    pub dry_run: bool,

    /// Spreadsheet to operate on.
    #[arg(long, short = 's', global = true, env = SPREADSHEET_ENV)]
    pub spreadsheet: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show spreadsheet properties and its sheets.
    Get,

    /// Create a new spreadsheet.
    Create {
        /// Title of the new spreadsheet.
        title: String,

        /// Locale, e.g. `en_US`.
        #[arg(long)]
        locale: Option<String>,

        /// Time zone, e.g. `America/New_York`.
        #[arg(long)]
        time_zone: Option<String>,
    },

    /// Read or write cell values.
    #[command(subcommand)]
    Values(ValuesCommand),

    /// Copy a sheet into another spreadsheet.
    CopyTo {
        /// Id of the sheet to copy.
        sheet_id: i64,

        /// Spreadsheet receiving the copy.
        destination: String,
    },

    /// Read or search developer metadata.
    #[command(subcommand)]
    Metadata(MetadataCommand),
}

/// `values` subcommands.
#[derive(Subcommand, Debug)]
pub enum ValuesCommand {
    /// Read one range.
    Get {
        /// A1 range, e.g. `Sheet1!A1:B2`.
        range: String,
    },

    /// Overwrite a range. Each ROW is a comma-separated list of cells.
    Update {
        range: String,

        #[arg(required = true)]
        rows: Vec<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Append one row after the table found at RANGE.
    Append {
        range: String,

        #[arg(required = true)]
        cells: Vec<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Read several ranges at once.
    BatchGet {
        #[arg(required = true)]
        ranges: Vec<String>,
    },
}

/// `metadata` subcommands.
#[derive(Subcommand, Debug)]
pub enum MetadataCommand {
    /// Read one entry by id.
    Get { id: i64 },

    /// Search entries. Every given criterion is a separate lookup.
    Search {
        #[arg(long)]
        key: Option<String>,

        #[arg(long)]
        value: Option<String>,

        /// Entries attached to this sheet.
        #[arg(long)]
        sheet_id: Option<i64>,
    },
}

/// How written cells are interpreted.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    #[arg(long, value_enum, default_value = "raw")]
    pub input_option: InputOption,
}

/// Value input option as accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOption {
    /// Store input as-is.
    Raw,
    /// Parse input as if typed into the UI.
    #[value(alias = "user")]
    UserEntered,
}

impl From<InputOption> for ValueInputOption {
    fn from(option: InputOption) -> Self {
        match option {
            InputOption::Raw => ValueInputOption::Raw,
            InputOption::UserEntered => ValueInputOption::UserEntered,
        }
    }
}

/// Parse one cell: JSON scalars keep their type, anything else is a string.
pub fn parse_cell(input: &str) -> Value {
    match serde_json::from_str::<Value>(input) {
        Ok(value @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => value,
        _ => Value::String(input.to_string()),
    }
}

/// Parse a comma-separated row of cells.
pub fn parse_row(input: &str) -> Vec<Value> {
    input.split(',').map(|cell| parse_cell(cell.trim())).collect()
}
