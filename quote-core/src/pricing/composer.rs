//! Price composition: base subtotal, conditional override, add-ons, tax, discount.

use crate::config::PricingConfig;
use crate::error::{Result, ValidationError};
use crate::model::{PriceBreakdown, ServiceVariant};
use crate::validation::{
    validate_area, validate_discount, validate_installation_cost, validate_minimum_area,
};
use serde::{Deserialize, Serialize};

use super::addons::{custom_color_cost, installation_cost, led_kit};

/// Everything the user chose besides the variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Area in ft².
    pub area: f64,
    /// LED module count entered by the user, if any.
    pub led_units: Option<u32>,
    /// Custom color toggle (cut letters only).
    pub custom_color: bool,
    /// Installation toggle.
    pub installation: bool,
    /// Flat installation cost, used only when `installation` is on.
    pub installation_cost: f64,
    /// Discount percentage (0-100).
    pub discount_percent: f64,
    /// Tax toggle.
    pub apply_tax: bool,
}

impl QuoteRequest {
    /// A request for `area` with every add-on off.
    pub fn new(area: f64) -> Self {
        Self {
            area,
            ..Default::default()
        }
    }

    /// Use an explicit LED module count.
    pub fn with_led_units(mut self, units: u32) -> Self {
        self.led_units = Some(units);
        self
    }

    /// Turn on the custom color add-on.
    pub fn with_custom_color(mut self) -> Self {
        self.custom_color = true;
        self
    }

    /// Turn on installation at a flat cost.
    pub fn with_installation(mut self, cost: f64) -> Self {
        self.installation = true;
        self.installation_cost = cost;
        self
    }

    /// Apply a percentage discount.
    pub fn with_discount(mut self, percent: f64) -> Self {
        self.discount_percent = percent;
        self
    }

    /// Turn on tax.
    pub fn with_tax(mut self) -> Self {
        self.apply_tax = true;
        self
    }
}

/// Reduce `amount` by `percent` percent.
pub fn apply_discount(amount: f64, percent: f64) -> f64 {
    amount - amount * (percent / 100.0)
}

/// Compute a full breakdown for the selected variant.
///
/// Stages run in a fixed order: validate, base subtotal, conditional override,
/// add-ons, tax, discount. The pricing config is checked along with the
/// request. Tax and discount are both taken on the subtotal
/// plus add-ons, so neither is charged on the other.
pub fn compose_quote(
    variant: Option<&ServiceVariant>,
    request: &QuoteRequest,
    config: &PricingConfig,
) -> Result<PriceBreakdown> {
    let variant = variant.ok_or(ValidationError::NoVariantSelected)?;
    let area = request.area;

    config.validate()?;
    validate_area(area)?;
    validate_minimum_area(area, variant.minimum_area)?;
    validate_discount(request.discount_percent)?;
    if request.installation {
        validate_installation_cost(request.installation_cost)?;
    }

    let base_subtotal = variant.schema.subtotal(area);

    let applied_directive = variant.rule.evaluate(area).cloned();
    let subtotal = match applied_directive
        .as_ref()
        .and_then(|d| d.override_value(area))
    {
        Some(value) => {
            tracing::debug!(
                "Conditional override for {} ft²: {} -> {}",
                area,
                base_subtotal,
                value
            );
            value
        }
        None => base_subtotal,
    };

    let led = variant
        .has_light
        .then(|| led_kit(area, request.led_units, config));
    let custom_color = custom_color_cost(
        variant.is_cut_letters(),
        request.custom_color,
        area,
        config,
    );
    let installation = installation_cost(request.installation, request.installation_cost);

    let addons_total = led.as_ref().map_or(0.0, |kit| kit.total())
        + custom_color.unwrap_or(0.0)
        + installation.unwrap_or(0.0);

    let total_before_discount = subtotal + addons_total;
    let tax = request
        .apply_tax
        .then(|| total_before_discount * config.tax_rate);
    let discounted = apply_discount(total_before_discount, request.discount_percent);
    let discount_amount = total_before_discount - discounted;
    let total = discounted + tax.unwrap_or(0.0);

    tracing::debug!(
        "Quote {} / {}: subtotal {} + add-ons {} = {}, total {}",
        variant.service_type,
        variant.category,
        subtotal,
        addons_total,
        total_before_discount,
        total
    );

    Ok(PriceBreakdown {
        service_type: variant.service_type.clone(),
        category: variant.category.clone(),
        thickness: variant.thickness(),
        area,
        schema: variant.schema,
        rate: variant.schema.rate(),
        base_subtotal,
        subtotal,
        override_applied: applied_directive.is_some(),
        applied_directive,
        advisories: variant.rule.advisories(area),
        note: variant.rule.note().map(str::to_string),
        led,
        custom_color_cost: custom_color,
        installation_cost: installation,
        addons_total,
        total_before_discount,
        tax,
        discount_percent: request.discount_percent,
        discount_amount,
        total,
    })
}
