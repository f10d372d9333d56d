//! Catalog file parser module.

mod catalog;
mod fields;

pub use catalog::{parse_catalog_file, parse_catalog_reader, parse_catalog_str, MIN_COLUMNS};
pub use fields::{parse_light_flag, parse_minimum_area, parse_price};
