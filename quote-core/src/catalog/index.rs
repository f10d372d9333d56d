//! Lookup of catalog variants by service type and category.

use crate::error::ValidationError;
use crate::model::ServiceVariant;
use std::collections::HashMap;

/// Group variants by service type. Each list keeps catalog order and duplicates.
pub fn group_by_type(variants: &[ServiceVariant]) -> HashMap<String, Vec<ServiceVariant>> {
    let mut groups: HashMap<String, Vec<ServiceVariant>> = HashMap::new();
    for variant in variants {
        groups
            .entry(variant.service_type.clone())
            .or_default()
            .push(variant.clone());
    }
    groups
}

/// Distinct categories of a service type, in first-seen order.
pub fn categories_for_type<'a>(variants: &'a [ServiceVariant], service_type: &str) -> Vec<&'a str> {
    let mut categories: Vec<&str> = Vec::new();
    for variant in variants.iter().filter(|v| v.service_type == service_type) {
        if !categories.contains(&variant.category.as_str()) {
            categories.push(&variant.category);
        }
    }
    categories
}

/// Thickness variants for an exact (type, category) pair.
pub fn variants_for_category<'a>(
    variants: &'a [ServiceVariant],
    service_type: &str,
    category: &str,
) -> Vec<&'a ServiceVariant> {
    variants
        .iter()
        .filter(|v| v.service_type == service_type && v.category == category)
        .collect()
}

/// The loaded catalog. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    variants: Vec<ServiceVariant>,
}

impl CatalogIndex {
    /// Take ownership of a parsed variant list.
    pub fn new(variants: Vec<ServiceVariant>) -> Self {
        Self { variants }
    }

    /// All variants in catalog order.
    pub fn variants(&self) -> &[ServiceVariant] {
        &self.variants
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Check if the catalog has no variants.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Distinct service types, in first-seen order.
    pub fn service_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        for variant in &self.variants {
            if !types.contains(&variant.service_type.as_str()) {
                types.push(&variant.service_type);
            }
        }
        types
    }

    /// Variants grouped by service type.
    pub fn by_type(&self) -> HashMap<String, Vec<ServiceVariant>> {
        group_by_type(&self.variants)
    }

    /// Distinct categories of a service type, in first-seen order.
    pub fn categories(&self, service_type: &str) -> Vec<&str> {
        categories_for_type(&self.variants, service_type)
    }

    /// Thickness options for a (type, category) pair.
    pub fn options(&self, service_type: &str, category: &str) -> Vec<&ServiceVariant> {
        variants_for_category(&self.variants, service_type, category)
    }

    /// Resolve a thickness option.
    ///
    /// With `option` unset, a pair with exactly one option selects it; a pair
    /// with several options needs an explicit index.
    pub fn select(
        &self,
        service_type: &str,
        category: &str,
        option: Option<usize>,
    ) -> Result<&ServiceVariant, ValidationError> {
        let options = self.options(service_type, category);
        let selected = match option {
            Some(idx) => options.get(idx).copied(),
            None if options.len() == 1 => options.first().copied(),
            None => None,
        };
        selected.ok_or(ValidationError::NoVariantSelected)
    }
}
