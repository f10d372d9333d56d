//! Quote document generator module.

mod sheet;

pub use sheet::{format_percent, render_quote_sheet, SheetWriter, SHEET_WIDTH};
