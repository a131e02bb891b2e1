//! Google Sheets API CLI binary.
//!
//! A command-line interface for staging and sending Sheets API requests.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sheetsapi::cli::{parse_cell, parse_row, Cli, Command, MetadataCommand, ValuesCommand};
use sheetsapi::output::{cell_text, PrettyPrint};
use sheetsapi::{
    AppendOptions, AppendValuesResponse, BatchGetOptions, BatchGetValuesResponse, CopyToOptions,
    DataFilterBuilder, MetadataEntry, Mixin, RecordingTransport, RequestBuilder, Service,
    SheetProperties, SheetsClient, SheetsEndpoints, SheetsError, SearchDeveloperMetadataResponse,
    Spreadsheet, SpreadsheetProperties, UpdateOptions, UpdateValuesResponse, ValueRange,
};
use tabled::builder::Builder;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let service: Service = if cli.dry_run {
        Arc::new(RecordingTransport::new())
    } else {
        match SheetsClient::from_env() {
            Ok(c) => c.into_service(),
            Err(e) => {
                eprintln!("Error: {e}");
                eprintln!("Hint: Set SHEETS_ACCESS_TOKEN environment variable, or use --dry-run");
                return ExitCode::FAILURE;
            }
        }
    };

    match run(service, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(&e, SheetsError::Configuration(msg) if msg.contains("spreadsheetId")) {
                eprintln!("Hint: Pass --spreadsheet <ID> or set SHEETS_SPREADSHEET_ID");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(service: Service, cli: Cli) -> sheetsapi::Result<()> {
    let endpoints = match cli.spreadsheet.as_deref() {
        Some(id) if !id.is_empty() => SheetsEndpoints::with_service(id, service),
        _ => SheetsEndpoints::blank_with_service(service),
    };
    let out = Output {
        json: cli.json,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Command::Get => {
            out.single::<Spreadsheet>(endpoints.spreadsheets().get()?)
                .await
        }
        Command::Create {
            title,
            locale,
            time_zone,
        } => {
            let properties = SpreadsheetProperties {
                locale,
                time_zone,
                ..SpreadsheetProperties::titled(title)
            };
            let request = endpoints.spreadsheets().create(properties)?;
            if let Some(response) = out.send(request).await? {
                out.value(&response, |v| {
                    let id = v.get("spreadsheetId").map(cell_text).unwrap_or_default();
                    format!("Created spreadsheet {id}")
                })?;
            }
            Ok(())
        }
        Command::Values(command) => handle_values(&endpoints, &out, command).await,
        Command::CopyTo {
            sheet_id,
            destination,
        } => {
            let request = endpoints
                .sheets()
                .copy_to(CopyToOptions::new(sheet_id, destination))?;
            out.single::<SheetProperties>(request).await
        }
        Command::Metadata(command) => handle_metadata(&endpoints, &out, command).await,
    }
}

async fn handle_values(
    endpoints: &SheetsEndpoints,
    out: &Output,
    command: ValuesCommand,
) -> sheetsapi::Result<()> {
    let values = endpoints.values();
    match command {
        ValuesCommand::Get { range } => {
            if let Some(response) = out.send(values.get(&range)?).await? {
                let range: ValueRange = serde_json::from_value(response)?;
                out.table(&range)?;
            }
            Ok(())
        }
        ValuesCommand::Update { range, rows, input } => {
            let rows = rows.iter().map(|r| parse_row(r)).collect();
            let options = UpdateOptions {
                value_input_option: input.input_option.into(),
                ..Default::default()
            };
            out.single::<UpdateValuesResponse>(values.update(&range, rows, options)?)
                .await
        }
        ValuesCommand::Append {
            range,
            cells,
            input,
        } => {
            let cells = cells.iter().map(|c| parse_cell(c)).collect();
            let options = AppendOptions {
                value_input_option: input.input_option.into(),
                ..AppendOptions::new(range, cells)
            };
            out.single::<AppendValuesResponse>(values.append(options)?)
                .await
        }
        ValuesCommand::BatchGet { ranges } => {
            let request = values.batch_get(BatchGetOptions {
                ranges,
                ..Default::default()
            })?;
            if let Some(response) = out.send(request.into_request()).await? {
                let batch: BatchGetValuesResponse = serde_json::from_value(response)?;
                if out.json {
                    println!("{}", serde_json::to_string_pretty(&batch.value_ranges)?);
                } else {
                    for range in &batch.value_ranges {
                        println!("{}\n", range.pretty_print());
                    }
                }
            }
            Ok(())
        }
    }
}

async fn handle_metadata(
    endpoints: &SheetsEndpoints,
    out: &Output,
    command: MetadataCommand,
) -> sheetsapi::Result<()> {
    let metadata = endpoints.developer_metadata();
    match command {
        MetadataCommand::Get { id } => out.single::<MetadataEntry>(metadata.get(id)?).await,
        MetadataCommand::Search {
            key,
            value,
            sheet_id,
        } => {
            let mut search = metadata.search()?;
            if let Some(key) = key {
                search = search.by_key(key);
            }
            if let Some(value) = value {
                search = search.by_value(value);
            }
            if let Some(sheet_id) = sheet_id {
                search = search.by_location().sheet_id(sheet_id);
            }
            if search.filters().is_empty() {
                return Err(SheetsError::Configuration(
                    "metadata search requires --key, --value or --sheet-id".to_string(),
                ));
            }

            if let Some(response) = out.send(search.into_request()).await? {
                let found: SearchDeveloperMetadataResponse = serde_json::from_value(response)?;
                if out.json {
                    println!("{}", serde_json::to_string_pretty(&found)?);
                } else {
                    let rows: Vec<MetadataRow> = found.entries().map(MetadataRow::from).collect();
                    let matched = rows.len();
                    println!("{}", Table::new(rows));
                    println!("\n{matched} matched");
                }
            }
            Ok(())
        }
    }
}

/// Output mode shared by every command.
struct Output {
    json: bool,
    dry_run: bool,
}

impl Output {
    /// Send `request`, or print it and return `None` on a dry run.
    async fn send(&self, request: RequestBuilder) -> sheetsapi::Result<Option<Value>> {
        if self.dry_run {
            let prepared = request.prepare()?;
            if self.json {
                println!("{}", serde_json::to_string_pretty(&prepared)?);
            } else {
                println!("{}", prepared.pretty_print());
            }
            return Ok(None);
        }
        Ok(Some(request.send().await?))
    }

    async fn single<T>(&self, request: RequestBuilder) -> sheetsapi::Result<()>
    where
        T: DeserializeOwned + PrettyPrint,
    {
        if let Some(response) = self.send(request).await? {
            if self.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                let item: T = serde_json::from_value(response)?;
                println!("{}", item.pretty_print());
            }
        }
        Ok(())
    }

    fn value(&self, response: &Value, text: impl Fn(&Value) -> String) -> sheetsapi::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(response)?);
        } else {
            println!("{}", text(response));
        }
        Ok(())
    }

    fn table(&self, range: &ValueRange) -> sheetsapi::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(range)?);
            return Ok(());
        }

        if let Some(ref name) = range.range {
            println!("{name}");
        }
        if range.is_empty() {
            println!("(no values)");
            return Ok(());
        }

        let width = range.width();
        let mut builder = Builder::default();
        for row in &range.values {
            let mut cells: Vec<String> = row.iter().map(cell_text).collect();
            cells.resize(width, String::new());
            builder.push_record(cells);
        }
        println!("{}", builder.build());
        Ok(())
    }
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct MetadataRow {
    id: String,
    key: String,
    value: String,
    location: String,
}

impl From<&MetadataEntry> for MetadataRow {
    fn from(m: &MetadataEntry) -> Self {
        let location = match &m.location {
            Some(l) => match (l.sheet_id, l.spreadsheet) {
                (Some(id), _) => format!("sheet {id}"),
                (None, Some(true)) => "spreadsheet".to_string(),
                _ => "range".to_string(),
            },
            None => String::new(),
        };
        Self {
            id: m.metadata_id.map(|id| id.to_string()).unwrap_or_default(),
            key: m.metadata_key.clone().unwrap_or_default(),
            value: m.metadata_value.clone().unwrap_or_default(),
            location,
        }
    }
}
