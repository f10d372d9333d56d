//! Saved quote storage and history.

mod history;
mod json_file;

pub use history::{search, sort_quotes, total_revenue, SortBy};
pub use json_file::{JsonFileStore, QuoteStore};
