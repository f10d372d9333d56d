//! In-memory catalog lookup.

mod index;

pub use index::{categories_for_type, group_by_type, variants_for_category, CatalogIndex};
