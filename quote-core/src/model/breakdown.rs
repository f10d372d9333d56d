//! Itemized result of a price computation.

use super::PriceSchema;
use crate::rules::Directive;
use serde::{Deserialize, Serialize};

/// LED lighting kit: modules plus the transformers that power them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedKit {
    /// Number of LED modules.
    pub units: u32,
    /// True when the module count was entered by the user.
    pub units_overridden: bool,
    /// Price per module.
    pub unit_price: f64,
    /// `units * unit_price`.
    pub units_cost: f64,
    /// Number of transformers.
    pub transformers: u32,
    /// Price per transformer.
    pub transformer_price: f64,
    /// `transformers * transformer_price`.
    pub transformers_cost: f64,
}

impl LedKit {
    /// Combined cost of modules and transformers.
    pub fn total(&self) -> f64 {
        self.units_cost + self.transformers_cost
    }
}

/// Every intermediate value of one quote computation.
///
/// Built fresh by [`crate::pricing::compose_quote`]; nothing in the crate
/// modifies a breakdown after it is returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub service_type: String,
    pub category: String,
    /// Thickness label and description.
    pub thickness: String,
    /// Area in ft².
    pub area: f64,
    /// Schema the rate was taken from.
    pub schema: PriceSchema,
    /// Effective price per ft².
    pub rate: f64,
    /// Subtotal from the catalog formula.
    pub base_subtotal: f64,
    /// Subtotal after any conditional override.
    pub subtotal: f64,
    /// Whether a conditional directive replaced the subtotal.
    pub override_applied: bool,
    /// The directive that replaced the subtotal.
    pub applied_directive: Option<Directive>,
    /// Thickness advisories that apply to this area.
    #[serde(default)]
    pub advisories: Vec<String>,
    /// Conditional text to show the user.
    pub note: Option<String>,
    /// LED kit, for lit services.
    pub led: Option<LedKit>,
    /// Custom color surcharge.
    pub custom_color_cost: Option<f64>,
    /// Installation cost, when toggled on.
    pub installation_cost: Option<f64>,
    /// Sum of all add-ons.
    pub addons_total: f64,
    /// `subtotal + addons_total`.
    pub total_before_discount: f64,
    /// Tax on `total_before_discount`, when toggled on.
    pub tax: Option<f64>,
    /// Discount percentage (0-100).
    pub discount_percent: f64,
    /// Amount taken off by the discount.
    pub discount_amount: f64,
    /// Amount due.
    pub total: f64,
}

impl PriceBreakdown {
    /// LED module cost, or zero.
    pub fn led_cost(&self) -> f64 {
        self.led.as_ref().map_or(0.0, |kit| kit.units_cost)
    }

    /// Transformer count, or zero.
    pub fn transformer_quantity(&self) -> u32 {
        self.led.as_ref().map_or(0, |kit| kit.transformers)
    }

    /// Tax amount, or zero.
    pub fn tax_amount(&self) -> f64 {
        self.tax.unwrap_or(0.0)
    }

    /// Service label, e.g. "LETRAS RECORTADAS - ACRILICO CON LUZ".
    pub fn service_label(&self) -> String {
        format!("{} - {}", self.service_type, self.category)
    }
}
