//! quote-core - Core library for sign catalog parsing and price quotation.
//!
//! This library loads a `;`-separated service catalog, lets callers narrow it
//! down by service type, category and thickness, and computes itemized price
//! quotes including conditional minimum charges, LED kits, custom color,
//! installation, discount and tax. Quotes can be rendered as a printable
//! sheet and kept in a JSON history.
//!
//! # Example
//!
//! ```no_run
//! use quote_core::{compose_quote, load_catalog, PricingConfig, QuoteRequest};
//! use std::path::Path;
//!
//! let catalog = load_catalog(Path::new("catalog.csv")).unwrap();
//! let variant = catalog.select("LETRAS RECORTADAS", "PVC", Some(0)).unwrap();
//! let request = QuoteRequest::new(20.0).with_custom_color();
//! let breakdown = compose_quote(Some(variant), &request, &PricingConfig::default()).unwrap();
//! println!("{:.2}", breakdown.total);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod pricing;
pub mod rules;
pub mod store;
pub mod validation;

// Re-exports for convenience
pub use catalog::CatalogIndex;
pub use config::{format_currency, PricingConfig};
pub use error::{ErrorCode, QuoteError, Result, ValidationError};
pub use generator::render_quote_sheet;
pub use model::{ClientInfo, LedKit, PriceBreakdown, PriceSchema, SavedQuote, ServiceVariant};
pub use parser::{parse_catalog_file, parse_catalog_str};
pub use pricing::{compose_quote, QuoteRequest};
pub use rules::{ConditionalRule, Directive};
pub use store::{JsonFileStore, QuoteStore, SortBy};
pub use validation::{validate_catalog, ValidationResult};

/// Load a catalog file into a lookup index.
///
/// Parses the file, runs catalog validation and logs its findings. Validation
/// warnings never block loading.
pub fn load_catalog(path: &std::path::Path) -> Result<CatalogIndex> {
    let variants = parse_catalog_file(path)?;

    let validation = validate_catalog(&variants);
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }
    for err in &validation.errors {
        tracing::error!("{}", err);
    }

    Ok(CatalogIndex::new(variants))
}
