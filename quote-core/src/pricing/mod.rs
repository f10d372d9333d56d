//! Price computation.

mod addons;
mod composer;

pub use addons::{custom_color_cost, installation_cost, led_kit, led_unit_count, transformer_count};
pub use composer::{apply_discount, compose_quote, QuoteRequest};
