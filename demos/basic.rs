//! Basic example demonstrating the Sheets request builders.
//!
//! Run with:
//! ```
//! SHEETS_ACCESS_TOKEN=ya29... cargo run --example basic -- <spreadsheet-id>
//! ```

use serde_json::json;
use sheetsapi::{
    AppendOptions, AppendValuesResponse, BatchGetOptions, BatchGetValuesResponse, Mixin,
    RangeAccumulator, SearchDeveloperMetadataResponse, SheetsEndpoints, Spreadsheet,
};

#[tokio::main]
async fn main() -> sheetsapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let id = std::env::args().nth(1).unwrap_or_default();

    // Target the spreadsheet using a client configured from the environment
    println!("Targeting spreadsheet {id}...");
    let endpoints = SheetsEndpoints::from_id(id)?;

    // Spreadsheet properties and sheets
    println!("\n--- Spreadsheet ---");
    let spreadsheet: Spreadsheet = endpoints.spreadsheets().get()?.send_as().await?;
    println!("Title: {}", spreadsheet.title().unwrap_or("(untitled)"));
    for sheet in &spreadsheet.sheets {
        println!("  - [{}] {}", sheet.properties.sheet_id, sheet.properties.title);
    }

    let Some(first) = spreadsheet.sheets.first() else {
        println!("No sheets to work with");
        return Ok(());
    };
    let title = &first.properties.title;

    // Append one row to the first sheet
    println!("\n--- Appending a Row ---");
    let appended: AppendValuesResponse = endpoints
        .values()
        .append(AppendOptions::new(
            format!("{title}!A1"),
            vec![json!("example"), json!(1), json!(true)],
        ))?
        .send_as()
        .await?;
    if let Some(updates) = appended.updates {
        println!(
            "Updated {} cells in {}",
            updates.updated_cells,
            updates.updated_range.unwrap_or_default()
        );
    }

    // Read two ranges in one request
    println!("\n--- Reading Ranges ---");
    let batch: BatchGetValuesResponse = endpoints
        .values()
        .batch_get(BatchGetOptions::range(format!("{title}!A1:C1")))?
        .add_range(format!("{title}!A2:C5"))
        .into_request()
        .send_as()
        .await?;
    for range in &batch.value_ranges {
        println!(
            "{}: {} rows",
            range.range.as_deref().unwrap_or("?"),
            range.len()
        );
    }

    // Search developer metadata by key
    println!("\n--- Searching Metadata ---");
    let found: SearchDeveloperMetadataResponse = endpoints
        .developer_metadata()
        .search()?
        .by_key("owner")
        .by_location()
        .spreadsheet()
        .into_request()
        .send_as()
        .await?;
    println!("Found {} entries", found.entries().count());
    for entry in found.entries() {
        println!(
            "  - {} = {}",
            entry.metadata_key.as_deref().unwrap_or("?"),
            entry.metadata_value.as_deref().unwrap_or("")
        );
    }

    println!("\nDone!");
    Ok(())
}
