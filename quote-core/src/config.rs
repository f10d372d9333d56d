//! Pricing constants and settings for the quotation core.

use crate::error::{QuoteError, Result};
use serde::{Deserialize, Serialize};

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Price of one LED module.
pub const LED_UNIT_PRICE: f64 = 1.25;

/// Price of one LED transformer.
pub const TRANSFORMER_PRICE: f64 = 34.95;

/// Square feet lit by a single transformer.
pub const TRANSFORMER_COVERAGE: f64 = 15.0;

/// Custom color surcharge per square foot (cut letters only).
pub const CUSTOM_COLOR_RATE: f64 = 2.0;

/// Largest area accepted for a quote, in ft².
pub const MAX_AREA: f64 = 100_000.0;

/// Sales tax rate applied when the tax toggle is on.
pub const TAX_RATE: f64 = 0.07;

/// Prefix used when formatting amounts.
pub const CURRENCY_PREFIX: &str = "B/.";

/// Catalog token meaning "no rule" or "no minimum".
pub const NOT_APPLICABLE: &str = "N/A";

/// Service type that accepts the custom color add-on.
pub const CUT_LETTERS_TYPE: &str = "LETRAS RECORTADAS";

/// Category marker for services that ship with lighting.
pub const LIGHT_MARKER: &str = "CON LUZ";

/// Unit prices and rates used by the add-on calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Price of one LED module.
    pub led_unit_price: f64,
    /// Price of one transformer.
    pub transformer_price: f64,
    /// Square feet covered per transformer.
    pub transformer_coverage: f64,
    /// Custom color surcharge per square foot.
    pub custom_color_rate: f64,
    /// Tax rate as a fraction (0.07 = 7%).
    pub tax_rate: f64,
    /// Currency prefix for rendered amounts.
    pub currency_prefix: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            led_unit_price: LED_UNIT_PRICE,
            transformer_price: TRANSFORMER_PRICE,
            transformer_coverage: TRANSFORMER_COVERAGE,
            custom_color_rate: CUSTOM_COLOR_RATE,
            tax_rate: TAX_RATE,
            currency_prefix: CURRENCY_PREFIX.to_string(),
        }
    }
}

impl PricingConfig {
    /// Load overrides from a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that prices and rates are usable.
    ///
    /// Prices and the tax rate must be finite and non-negative; transformer
    /// coverage must be positive.
    pub fn validate(&self) -> Result<()> {
        let amounts = [
            ("led_unit_price", self.led_unit_price),
            ("transformer_price", self.transformer_price),
            ("custom_color_rate", self.custom_color_rate),
            ("tax_rate", self.tax_rate),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(QuoteError::InvalidConfig {
                    reason: format!("{} must be a non-negative amount (got {})", name, value),
                });
            }
        }

        let coverage = self.transformer_coverage;
        if !coverage.is_finite() || coverage <= 0.0 {
            return Err(QuoteError::InvalidConfig {
                reason: format!("transformer_coverage must be greater than 0 (got {})", coverage),
            });
        }

        Ok(())
    }

    /// Format an amount with this configuration's currency prefix.
    pub fn format_currency(&self, amount: f64) -> String {
        format!("{} {:.2}", self.currency_prefix, amount)
    }
}

/// Format an amount with the default currency prefix, e.g. `B/. 144.90`.
pub fn format_currency(amount: f64) -> String {
    format!("{} {:.2}", CURRENCY_PREFIX, amount)
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if a float is approximately zero.
    #[inline]
    pub fn approx_zero(a: f64) -> bool {
        a.abs() < EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = PricingConfig::default();
        assert_eq!(config.led_unit_price, 1.25);
        assert_eq!(config.transformer_price, 34.95);
        assert_eq!(config.transformer_coverage, 15.0);
        assert_eq!(config.custom_color_rate, 2.0);
        assert_eq!(config.tax_rate, 0.07);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PricingConfig::from_json(r#"{ "tax_rate": 0.1 }"#).unwrap();
        assert_eq!(config.tax_rate, 0.1);
        assert_eq!(config.led_unit_price, LED_UNIT_PRICE);
        assert_eq!(config.currency_prefix, "B/.");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(144.9), "B/. 144.90");
        assert_eq!(format_currency(0.0), "B/. 0.00");

        let config = PricingConfig {
            currency_prefix: "$".to_string(),
            ..Default::default()
        };
        assert_eq!(config.format_currency(5.0), "$ 5.00");
    }

    #[test]
    fn test_zero_coverage_rejected() {
        let err = PricingConfig::from_json(r#"{ "transformer_coverage": 0 }"#).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidConfig { .. }));
        assert!(err.to_string().contains("transformer_coverage"));

        let config = PricingConfig {
            transformer_coverage: -15.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_prices_rejected() {
        for json in [
            r#"{ "tax_rate": -0.07 }"#,
            r#"{ "led_unit_price": -1.25 }"#,
            r#"{ "transformer_price": -34.95 }"#,
            r#"{ "custom_color_rate": -2 }"#,
        ] {
            let err = PricingConfig::from_json(json).unwrap_err();
            assert!(matches!(err, QuoteError::InvalidConfig { .. }), "{}", json);
        }
        assert!(PricingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_float_cmp() {
        assert!(float_cmp::approx_eq(130.41, 130.410_000_01));
        assert!(float_cmp::approx_zero(0.000_01));
        assert!(!float_cmp::approx_zero(0.01));
    }
}
