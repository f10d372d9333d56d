//! Validation of quote inputs and loaded catalogs.

use crate::config::float_cmp::approx_zero;
use crate::config::MAX_AREA;
use crate::error::ValidationError;
use crate::model::ServiceVariant;
use crate::rules::parse_decimal;

/// Catalog validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }
}

/// Check a loaded catalog for rows that will price oddly.
///
/// Only an empty catalog is an error; everything else is a warning.
pub fn validate_catalog(variants: &[ServiceVariant]) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if variants.is_empty() {
        result.add_error("Catalog has no usable rows");
        return result;
    }

    for (idx, variant) in variants.iter().enumerate() {
        let row = idx + 1;

        if approx_zero(variant.schema.rate()) {
            result.add_warning(format!(
                "Variant {} ({} / {} / {}): no price per ft²",
                row,
                variant.service_type,
                variant.category,
                variant.thickness()
            ));
        }

        if variant.rule.note().is_some() && !variant.rule.is_recognized() {
            result.add_warning(format!(
                "Variant {} ({} / {}): conditional shown as note only: {}",
                row,
                variant.service_type,
                variant.category,
                variant.rule.note().unwrap_or_default()
            ));
        }
    }

    result
}

/// Parse the area typed by the user. Accepts comma decimals.
pub fn parse_area(input: &str) -> Result<f64, ValidationError> {
    let area = parse_decimal(input).ok_or_else(|| ValidationError::InvalidArea {
        input: input.trim().to_string(),
    })?;
    validate_area(area)?;
    Ok(area)
}

/// Area must be a positive finite number no larger than [`MAX_AREA`].
pub fn validate_area(area: f64) -> Result<(), ValidationError> {
    if !area.is_finite() || area <= 0.0 {
        return Err(ValidationError::InvalidArea {
            input: area.to_string(),
        });
    }
    if area > MAX_AREA {
        return Err(ValidationError::AreaTooLarge {
            area,
            maximum: MAX_AREA,
        });
    }
    Ok(())
}

/// Area must not be below the variant's minimum. Never clamps.
pub fn validate_minimum_area(area: f64, minimum: Option<f64>) -> Result<(), ValidationError> {
    match minimum {
        Some(minimum) if area < minimum => {
            Err(ValidationError::BelowMinimumArea { area, minimum })
        }
        _ => Ok(()),
    }
}

/// Discount must lie in [0, 100].
pub fn validate_discount(percent: f64) -> Result<(), ValidationError> {
    if percent.is_finite() && (0.0..=100.0).contains(&percent) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDiscount { percent })
    }
}

/// Installation cost must be a non-negative finite amount.
pub fn validate_installation_cost(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidInstallationCost { amount })
    }
}
