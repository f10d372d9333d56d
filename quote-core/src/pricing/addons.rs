//! Optional cost modules added on top of the subtotal.
//!
//! Each calculator is independent; the composer sums whatever they return.

use crate::config::PricingConfig;
use crate::model::LedKit;

/// One LED module per started square foot.
///
/// Areas are bounded by `validate_area` before pricing, so the count fits.
pub fn led_unit_count(area: f64) -> u32 {
    area.ceil().max(0.0) as u32
}

/// Transformers needed to light `area`, rounded up.
pub fn transformer_count(area: f64, coverage: f64) -> u32 {
    (area / coverage).ceil().max(0.0) as u32
}

/// LED kit for a lit service.
///
/// `units_override` is the module count entered by the user; without it the
/// count is derived from the area.
pub fn led_kit(area: f64, units_override: Option<u32>, config: &PricingConfig) -> LedKit {
    let units = units_override.unwrap_or_else(|| led_unit_count(area));
    let transformers = transformer_count(area, config.transformer_coverage);

    LedKit {
        units,
        units_overridden: units_override.is_some(),
        unit_price: config.led_unit_price,
        units_cost: f64::from(units) * config.led_unit_price,
        transformers,
        transformer_price: config.transformer_price,
        transformers_cost: f64::from(transformers) * config.transformer_price,
    }
}

/// Custom color surcharge. Only cut letters offer it, and only when chosen.
pub fn custom_color_cost(
    cut_letters: bool,
    opted_in: bool,
    area: f64,
    config: &PricingConfig,
) -> Option<f64> {
    (cut_letters && opted_in).then(|| area * config.custom_color_rate)
}

/// Installation passthrough. Off unless toggled on with a positive amount.
pub fn installation_cost(toggled: bool, amount: f64) -> Option<f64> {
    (toggled && amount > 0.0).then_some(amount)
}
