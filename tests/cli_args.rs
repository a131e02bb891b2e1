//! CLI argument parsing tests.

use clap::Parser;
use serde_json::json;
use sheetsapi::cli::{
    parse_cell, parse_row, Cli, Command, InputOption, MetadataCommand, ValuesCommand,
};
use sheetsapi::ValueInputOption;

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["sheetsapi", "--spreadsheet", "abc", "get"]);

    assert!(!cli.json);
    assert!(!cli.dry_run);
    assert_eq!(cli.spreadsheet.as_deref(), Some("abc"));
    assert!(matches!(cli.command, Command::Get));
}

#[test]
fn test_cli_parses_values_append() {
    let cli = Cli::parse_from([
        "sheetsapi",
        "-s",
        "abc",
        "values",
        "append",
        "Sheet1!A1",
        "1",
        "two",
        "--input-option",
        "user-entered",
    ]);

    match cli.command {
        Command::Values(ValuesCommand::Append {
            range,
            cells,
            input,
        }) => {
            assert_eq!(range, "Sheet1!A1");
            assert_eq!(cells, vec!["1", "two"]);
            assert_eq!(input.input_option, InputOption::UserEntered);
            assert_eq!(
                ValueInputOption::from(input.input_option),
                ValueInputOption::UserEntered
            );
        }
        _ => panic!("Expected values append command"),
    }
}

#[test]
fn test_cli_parses_batch_get_ranges() {
    let cli = Cli::parse_from(["sheetsapi", "values", "batch-get", "A1:B2", "Sheet2!C3"]);

    match cli.command {
        Command::Values(ValuesCommand::BatchGet { ranges }) => {
            assert_eq!(ranges, vec!["A1:B2", "Sheet2!C3"]);
        }
        _ => panic!("Expected values batch-get command"),
    }
}

#[test]
fn test_cli_requires_append_cells() {
    let result = Cli::try_parse_from(["sheetsapi", "values", "append", "Sheet1!A1"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_copy_to() {
    let cli = Cli::parse_from(["sheetsapi", "copy-to", "42", "dest-id"]);

    match cli.command {
        Command::CopyTo {
            sheet_id,
            destination,
        } => {
            assert_eq!(sheet_id, 42);
            assert_eq!(destination, "dest-id");
        }
        _ => panic!("Expected copy-to command"),
    }
}

#[test]
fn test_cli_parses_metadata_search() {
    let cli = Cli::parse_from([
        "sheetsapi",
        "metadata",
        "search",
        "--key",
        "owner",
        "--sheet-id",
        "3",
    ]);

    match cli.command {
        Command::Metadata(MetadataCommand::Search {
            key,
            value,
            sheet_id,
        }) => {
            assert_eq!(key.as_deref(), Some("owner"));
            assert!(value.is_none());
            assert_eq!(sheet_id, Some(3));
        }
        _ => panic!("Expected metadata search command"),
    }
}

#[test]
fn test_cli_parses_create_options() {
    let cli = Cli::parse_from(["sheetsapi", "create", "Budget", "--locale", "en_GB"]);

    match cli.command {
        Command::Create {
            title,
            locale,
            time_zone,
        } => {
            assert_eq!(title, "Budget");
            assert_eq!(locale.as_deref(), Some("en_GB"));
            assert!(time_zone.is_none());
        }
        _ => panic!("Expected create command"),
    }
}

#[test]
fn test_global_flags() {
    // Flags before subcommand
    let cli = Cli::parse_from(["sheetsapi", "--json", "--dry-run", "get"]);
    assert!(cli.json);
    assert!(cli.dry_run);

    // Flags after subcommand (global)
    let cli = Cli::parse_from(["sheetsapi", "values", "get", "A1", "--json", "--dry-run"]);
    assert!(cli.json);
    assert!(cli.dry_run);
}

#[test]
fn test_parse_cell_keeps_scalars() {
    assert_eq!(parse_cell("42"), json!(42));
    assert_eq!(parse_cell("1.5"), json!(1.5));
    assert_eq!(parse_cell("true"), json!(true));
    assert_eq!(parse_cell("hello"), json!("hello"));
    // JSON strings and containers stay literal text
    assert_eq!(parse_cell("\"q\""), json!("\"q\""));
    assert_eq!(parse_cell("[1]"), json!("[1]"));
}

#[test]
fn test_parse_row_splits_cells() {
    assert_eq!(parse_row("a, 2,=A1"), vec![json!("a"), json!(2), json!("=A1")]);
}
