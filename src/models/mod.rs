//! Sheets API model types.

mod filter;
mod metadata;
mod spreadsheet;
mod values;

pub use filter::*;
pub use metadata::*;
pub use spreadsheet::*;
pub use values::*;
