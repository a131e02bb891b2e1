//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use serde_json::Value;

use crate::models::{
    AppendValuesResponse, MetadataEntry, SheetProperties, Spreadsheet, UpdateValuesResponse,
    ValueRange,
};
use crate::transport::PreparedRequest;

/// Trait for human-readable key-value output.
///
/// Implemented by response types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

/// Cell text without JSON quoting for strings.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl PrettyPrint for Spreadsheet {
    fn pretty_print(&self) -> String {
        let header = format!("Spreadsheet: {}", self.spreadsheet_id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(title) = self.title() {
            lines.push(format!("Title:          {}", title));
        }

        if let Some(ref locale) = self.properties.locale {
            lines.push(format!("Locale:         {}", locale));
        }

        if let Some(ref time_zone) = self.properties.time_zone {
            lines.push(format!("Time Zone:      {}", time_zone));
        }

        if let Some(ref url) = self.spreadsheet_url {
            lines.push(format!("URL:            {}", url));
        }

        lines.push(format!("Sheets:         {}", self.sheets.len()));
        for sheet in &self.sheets {
            lines.push(format!(
                "  [{}] {} (id {})",
                sheet.properties.index, sheet.properties.title, sheet.properties.sheet_id
            ));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for SheetProperties {
    fn pretty_print(&self) -> String {
        let header = format!("Sheet: {}", self.title);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Sheet ID:       {}", self.sheet_id),
            format!("Index:          {}", self.index),
        ];

        if let Some(ref sheet_type) = self.sheet_type {
            lines.push(format!("Type:           {}", sheet_type));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for ValueRange {
    fn pretty_print(&self) -> String {
        let header = format!("Range: {}", self.range.as_deref().unwrap_or("(unknown)"));
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];
        if self.is_empty() {
            lines.push("(no values)".to_string());
        }
        for row in &self.values {
            let cells: Vec<String> = row.iter().map(cell_text).collect();
            lines.push(cells.join("\t"));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for UpdateValuesResponse {
    fn pretty_print(&self) -> String {
        let header = format!(
            "Updated: {}",
            self.updated_range.as_deref().unwrap_or("(unknown)")
        );
        let divider = "─".repeat(header.len().max(30));

        [
            header,
            divider,
            format!(
                "Cells:          {} ({} rows, {} columns)",
                self.updated_cells, self.updated_rows, self.updated_columns
            ),
        ]
        .join("\n")
    }
}

impl PrettyPrint for AppendValuesResponse {
    fn pretty_print(&self) -> String {
        let mut lines = Vec::new();

        if let Some(ref table) = self.table_range {
            lines.push(format!("Table:          {}", table));
        }

        match self.updates {
            Some(ref updates) => lines.push(updates.pretty_print()),
            None => lines.push("No cells updated".to_string()),
        }

        lines.join("\n")
    }
}

impl PrettyPrint for MetadataEntry {
    fn pretty_print(&self) -> String {
        let header = match self.metadata_id {
            Some(id) => format!("Metadata #{}", id),
            None => "Metadata".to_string(),
        };
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(ref key) = self.metadata_key {
            lines.push(format!("Key:            {}", key));
        }

        if let Some(ref value) = self.metadata_value {
            lines.push(format!("Value:          {}", value));
        }

        if let Some(ref location) = self.location {
            if let Some(sheet_id) = location.sheet_id {
                lines.push(format!("Location:       sheet {}", sheet_id));
            } else if location.spreadsheet == Some(true) {
                lines.push("Location:       spreadsheet".to_string());
            } else if location.dimension_range.is_some() {
                lines.push("Location:       dimension range".to_string());
            }
        }

        if let Some(visibility) = self.visibility {
            let visibility = serde_json::to_value(visibility).unwrap_or_default();
            lines.push(format!("Visibility:     {}", cell_text(&visibility)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for PreparedRequest {
    fn pretty_print(&self) -> String {
        let header = format!("{} {}", self.verb, self.path);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider, format!("Method:         {}", self.method_id)];

        for (key, value) in self.query_pairs() {
            lines.push(format!("Param:          {}={}", key, value));
        }

        if let Some(ref payload) = self.payload {
            let body = serde_json::to_string_pretty(payload).unwrap_or_default();
            lines.push(format!("Body:\n{}", body));
        }

        lines.join("\n")
    }
}
