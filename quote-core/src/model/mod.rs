//! Data model types for catalog variants and quotes.

mod breakdown;
mod quote;
mod variant;

pub use breakdown::{LedKit, PriceBreakdown};
pub use quote::{ClientInfo, SavedQuote};
pub use variant::{has_light_service, is_cut_letters, LightSource, PriceSchema, ServiceVariant};
