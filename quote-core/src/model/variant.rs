//! Service variant definition: one priced row of the catalog.

use crate::config::{CUT_LETTERS_TYPE, LIGHT_MARKER};
use crate::rules::ConditionalRule;
use serde::{Deserialize, Serialize};

/// How a variant's per-area rate is expressed in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceSchema {
    /// Separate base and per-ft² components, charged as `(base + per_area) * area`.
    Split { base: f64, per_area: f64 },
    /// A single precomputed rate, charged as `total_per_area * area`.
    Combined { total_per_area: f64 },
}

impl Default for PriceSchema {
    fn default() -> Self {
        PriceSchema::Split {
            base: 0.0,
            per_area: 0.0,
        }
    }
}

impl PriceSchema {
    /// Pick the schema from the populated price columns.
    ///
    /// Split components win whenever either is non-zero; the combined rate is
    /// only used when both split components are empty.
    pub fn detect(base: f64, per_area: f64, total_per_area: f64) -> Self {
        if base > 0.0 || per_area > 0.0 {
            PriceSchema::Split { base, per_area }
        } else if total_per_area > 0.0 {
            PriceSchema::Combined { total_per_area }
        } else {
            PriceSchema::default()
        }
    }

    /// Effective price per square foot.
    pub fn rate(&self) -> f64 {
        match *self {
            PriceSchema::Split { base, per_area } => base + per_area,
            PriceSchema::Combined { total_per_area } => total_per_area,
        }
    }

    /// Base subtotal for the given area, before any conditional override.
    pub fn subtotal(&self, area: f64) -> f64 {
        match *self {
            PriceSchema::Split { base, per_area } => (base + per_area) * area,
            PriceSchema::Combined { total_per_area } => total_per_area * area,
        }
    }
}

/// Where a variant's light flag came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightSource {
    /// Derived from the category text containing "CON LUZ".
    #[default]
    CategoryText,
    /// Read from the explicit light column.
    Column,
}

/// One priceable catalog row (type + category + thickness combination).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceVariant {
    /// Top-level service type, e.g. "LETRAS RECORTADAS".
    pub service_type: String,
    /// Sub-category within the type.
    pub category: String,
    /// Thickness label (descriptive only).
    pub thickness_label: String,
    /// Thickness description (descriptive only).
    pub thickness_description: String,
    /// Pricing, normalized from whichever price columns the row filled in.
    pub schema: PriceSchema,
    /// Parsed conditional rule.
    pub rule: ConditionalRule,
    /// Minimum area in ft², if the service has one.
    pub minimum_area: Option<f64>,
    /// Whether the service includes lighting.
    pub has_light: bool,
    /// Which catalog field decided `has_light`.
    pub light_source: LightSource,
    /// Installation-included note, verbatim.
    pub installation_note: String,
}

impl ServiceVariant {
    /// Create a variant with only its identifying fields set.
    ///
    /// The light flag is derived from the category text.
    pub fn new(service_type: impl Into<String>, category: impl Into<String>) -> Self {
        let category = category.into();
        Self {
            service_type: service_type.into(),
            has_light: has_light_service(&category),
            category,
            ..Default::default()
        }
    }

    /// Set split pricing (`base` + `per_area`).
    pub fn with_split_price(mut self, base: f64, per_area: f64) -> Self {
        self.schema = PriceSchema::Split { base, per_area };
        self
    }

    /// Set a combined price per ft².
    pub fn with_total_price(mut self, total_per_area: f64) -> Self {
        self.schema = PriceSchema::Combined { total_per_area };
        self
    }

    /// Set the thickness label and description.
    pub fn with_thickness(mut self, label: impl Into<String>, description: impl Into<String>) -> Self {
        self.thickness_label = label.into();
        self.thickness_description = description.into();
        self
    }

    /// Attach conditional text, parsing it into directives.
    pub fn with_conditional(mut self, text: &str) -> Self {
        self.rule = ConditionalRule::parse(text);
        self
    }

    /// Set the minimum area.
    pub fn with_minimum_area(mut self, minimum: f64) -> Self {
        self.minimum_area = Some(minimum);
        self
    }

    /// Override the light flag as if read from the explicit column.
    pub fn with_light(mut self, has_light: bool) -> Self {
        self.has_light = has_light;
        self.light_source = LightSource::Column;
        self
    }

    /// Check if this variant belongs to the cut letters service type.
    pub fn is_cut_letters(&self) -> bool {
        is_cut_letters(&self.service_type)
    }

    /// Thickness text as shown on quotes, e.g. "3MM ACRILICO".
    pub fn thickness(&self) -> String {
        format!("{} {}", self.thickness_label, self.thickness_description)
            .trim()
            .to_string()
    }

    /// Label for a thickness picker, with the conditional appended when present.
    pub fn display_label(&self) -> String {
        match self.rule.note() {
            Some(note) => format!("{} - {}", self.thickness(), note),
            None => self.thickness(),
        }
    }
}

/// Check whether a category names a lit service.
pub fn has_light_service(category: &str) -> bool {
    category.to_uppercase().contains(LIGHT_MARKER)
}

/// Check whether a service type is the cut letters type.
pub fn is_cut_letters(service_type: &str) -> bool {
    service_type.to_uppercase().contains(CUT_LETTERS_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_split() {
        let schema = PriceSchema::detect(2.0, 8.0, 10.0);
        assert_eq!(
            schema,
            PriceSchema::Split {
                base: 2.0,
                per_area: 8.0
            }
        );
        assert_eq!(schema.subtotal(5.0), 50.0);
    }

    #[test]
    fn test_detect_combined() {
        let schema = PriceSchema::detect(0.0, 0.0, 12.5);
        assert_eq!(schema, PriceSchema::Combined { total_per_area: 12.5 });
        assert_eq!(schema.rate(), 12.5);
        assert_eq!(schema.subtotal(2.0), 25.0);
    }

    #[test]
    fn test_detect_empty() {
        assert_eq!(PriceSchema::detect(0.0, 0.0, 0.0).subtotal(10.0), 0.0);
    }

    #[test]
    fn test_price_builders_replace_schema() {
        let variant = ServiceVariant::new("VINIL", "IMPRESO")
            .with_split_price(2.0, 8.0)
            .with_total_price(12.5);
        assert_eq!(variant.schema, PriceSchema::Combined { total_per_area: 12.5 });
        assert_eq!(variant.schema.rate(), 12.5);

        let variant = variant.with_split_price(1.0, 4.0);
        assert_eq!(variant.schema.rate(), 5.0);
    }

    #[test]
    fn test_light_from_category() {
        let variant = ServiceVariant::new("LETRAS RECORTADAS", "Acrilico con luz");
        assert!(variant.has_light);
        assert_eq!(variant.light_source, LightSource::CategoryText);

        let variant = ServiceVariant::new("LETRAS RECORTADAS", "ACRILICO SIN LUZ");
        assert!(!variant.has_light);
    }

    #[test]
    fn test_light_override() {
        let variant = ServiceVariant::new("CAJAS", "CAJA SIMPLE").with_light(true);
        assert!(variant.has_light);
        assert_eq!(variant.light_source, LightSource::Column);
    }

    #[test]
    fn test_cut_letters() {
        assert!(is_cut_letters("letras recortadas"));
        assert!(!is_cut_letters("VINIL"));
    }

    #[test]
    fn test_display_label() {
        let variant = ServiceVariant::new("VINIL", "IMPRESO")
            .with_thickness("N/A", "VINIL MATE")
            .with_conditional("SI ES ≤ A 3 PIE2 REDONDEAR A 50");
        assert_eq!(
            variant.display_label(),
            "N/A VINIL MATE - SI ES ≤ A 3 PIE2 REDONDEAR A 50"
        );

        let plain = ServiceVariant::new("VINIL", "IMPRESO").with_thickness("3MM", "");
        assert_eq!(plain.display_label(), "3MM");
    }
}
