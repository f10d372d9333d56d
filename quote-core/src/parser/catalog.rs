//! Catalog table parser.
//!
//! The catalog is a `;`-separated table with a header row. Columns map by
//! position:
//!
//! | # | Field                     |
//! |---|---------------------------|
//! | 0 | service type              |
//! | 1 | category                  |
//! | 2 | base price                |
//! | 3 | thickness label           |
//! | 4 | thickness description     |
//! | 5 | price per ft²             |
//! | 6 | total price per ft²       |
//! | 7 | conditional text          |
//! | 8 | minimum area              |
//! | 9 | installation note         |
//! | 10| light flag (optional)     |

use crate::error::{QuoteError, Result};
use crate::model::{has_light_service, LightSource, PriceSchema, ServiceVariant};
use crate::rules::ConditionalRule;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;

use super::fields::{parse_light_flag, parse_minimum_area, parse_price};

/// Rows with fewer columns than this are dropped.
pub const MIN_COLUMNS: usize = 10;

const COL_SERVICE_TYPE: usize = 0;
const COL_CATEGORY: usize = 1;
const COL_BASE_PRICE: usize = 2;
const COL_THICKNESS: usize = 3;
const COL_THICKNESS_DESCRIPTION: usize = 4;
const COL_PRICE_PER_AREA: usize = 5;
const COL_TOTAL_PRICE_PER_AREA: usize = 6;
const COL_CONDITIONAL: usize = 7;
const COL_MINIMUM_AREA: usize = 8;
const COL_INSTALLATION: usize = 9;
const COL_LIGHT: usize = 10;

/// Parse catalog rows from any reader.
pub fn parse_catalog_reader<R: Read>(reader: R) -> Result<Vec<ServiceVariant>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut variants = Vec::new();
    let mut dropped = 0usize;

    for record in csv_reader.records() {
        let record = record?;
        match variant_from_record(&record) {
            Some(variant) => variants.push(variant),
            None => {
                dropped += 1;
                tracing::debug!(
                    "Dropped catalog row at line {}: {:?}",
                    record.position().map_or(0, |p| p.line()),
                    record
                );
            }
        }
    }

    tracing::info!(
        "Loaded {} catalog variant(s), dropped {} row(s)",
        variants.len(),
        dropped
    );

    Ok(variants)
}

/// Parse catalog rows from in-memory text.
pub fn parse_catalog_str(content: &str) -> Result<Vec<ServiceVariant>> {
    parse_catalog_reader(content.as_bytes())
}

/// Parse a catalog file from a path.
pub fn parse_catalog_file(path: &Path) -> Result<Vec<ServiceVariant>> {
    if !path.exists() {
        return Err(QuoteError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(QuoteError::EmptyCatalog {
            path: path.to_path_buf(),
        });
    }

    parse_catalog_str(&content)
}

/// Build a variant from one data row, or `None` if the row is unusable.
fn variant_from_record(record: &StringRecord) -> Option<ServiceVariant> {
    if record.len() < MIN_COLUMNS {
        return None;
    }

    let cell = |idx: usize| cell_at(record, idx);

    let service_type = cell(COL_SERVICE_TYPE);
    let category = cell(COL_CATEGORY);
    if service_type.is_empty() || category.is_empty() {
        return None;
    }

    let schema = PriceSchema::detect(
        parse_price(cell(COL_BASE_PRICE)),
        parse_price(cell(COL_PRICE_PER_AREA)),
        parse_price(cell(COL_TOTAL_PRICE_PER_AREA)),
    );

    let (has_light, light_source) = match parse_light_flag(cell(COL_LIGHT)) {
        Some(flag) => (flag, LightSource::Column),
        None => (has_light_service(category), LightSource::CategoryText),
    };

    Some(ServiceVariant {
        service_type: service_type.to_string(),
        category: category.to_string(),
        thickness_label: cell(COL_THICKNESS).to_string(),
        thickness_description: cell(COL_THICKNESS_DESCRIPTION).to_string(),
        schema,
        rule: ConditionalRule::parse(cell(COL_CONDITIONAL)),
        minimum_area: parse_minimum_area(cell(COL_MINIMUM_AREA)),
        has_light,
        light_source,
        installation_note: cell(COL_INSTALLATION).to_string(),
    })
}

fn cell_at(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Directive;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "TIPO;CATEGORIA;PRECIO BASE;ESPESOR;DESCRIPCION;PRECIO X PIE2;PRECIO TOTAL X PIE2;CONDICIONALES;TAMANO MINIMO;INSTALACION";

    fn catalog(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_parse_split_row() {
        let text = catalog(&[
            "LETRAS RECORTADAS;ACRILICO CON LUZ;$2,00;3MM;ACRILICO BLANCO;$8,00;$10,00;N/A;N/A;NO INCLUYE",
        ]);
        let variants = parse_catalog_str(&text).unwrap();
        assert_eq!(variants.len(), 1);

        let v = &variants[0];
        assert_eq!(v.service_type, "LETRAS RECORTADAS");
        assert_eq!(v.category, "ACRILICO CON LUZ");
        assert_eq!(v.thickness_label, "3MM");
        assert_eq!(v.thickness_description, "ACRILICO BLANCO");
        assert_eq!(
            v.schema,
            PriceSchema::Split {
                base: 2.0,
                per_area: 8.0
            }
        );
        assert_eq!(v.schema.rate(), 10.0);
        assert_eq!(v.minimum_area, None);
        assert_eq!(v.rule.note(), None);
        assert!(v.has_light);
        assert_eq!(v.light_source, LightSource::CategoryText);
        assert_eq!(v.installation_note, "NO INCLUYE");
    }

    #[test]
    fn test_parse_combined_row_with_rule_and_minimum() {
        let text = catalog(&[
            "VINIL;IMPRESO;;N/A;MATE;;$4,50;SI ES ≤ A 3 PIE2 REDONDEAR A 50;1,5;SI",
        ]);
        let variants = parse_catalog_str(&text).unwrap();
        let v = &variants[0];
        assert_eq!(v.schema, PriceSchema::Combined { total_per_area: 4.5 });
        assert_eq!(v.minimum_area, Some(1.5));
        assert_eq!(
            v.rule.directives,
            vec![Directive::RoundIfAtMost {
                limit: 3.0,
                value: 50.0
            }]
        );
        assert!(!v.has_light);
    }

    #[test]
    fn test_explicit_light_column_wins() {
        let text = catalog(&[
            "CAJAS DE LUZ;CAJA SIMPLE;$5;N/A;N/A;$10;$15;N/A;N/A;NO;SI",
            "LETRAS RECORTADAS;PVC CON LUZ;$5;N/A;N/A;$10;$15;N/A;N/A;NO;NO",
        ]);
        let variants = parse_catalog_str(&text).unwrap();
        assert!(variants[0].has_light);
        assert_eq!(variants[0].light_source, LightSource::Column);
        assert!(!variants[1].has_light);
        assert_eq!(variants[1].light_source, LightSource::Column);
    }

    #[test]
    fn test_short_and_incomplete_rows_dropped() {
        let text = catalog(&[
            "VINIL;IMPRESO;$1;N/A",
            ";IMPRESO;$1;N/A;N/A;$1;$2;N/A;N/A;NO",
            "VINIL;;$1;N/A;N/A;$1;$2;N/A;N/A;NO",
            "",
            "VINIL;CORTE;$1;N/A;N/A;$1;$2;N/A;N/A;NO",
        ]);
        let variants = parse_catalog_str(&text).unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].category, "CORTE");
    }

    #[test]
    fn test_header_only() {
        assert!(parse_catalog_str(HEADER).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_prices_default_to_zero() {
        let text = catalog(&["VINIL;CORTE;abc;N/A;N/A;??;;N/A;N/A;NO"]);
        let variants = parse_catalog_str(&text).unwrap();
        assert_eq!(variants[0].schema.rate(), 0.0);
    }

    #[test]
    fn test_stray_quotes_are_literal() {
        let text = catalog(&["LETRAS RECORTADAS;PVC 1\" GRUESO;$0;N/A;N/A;$9;$9;N/A;N/A;NO"]);
        let variants = parse_catalog_str(&text).unwrap();
        assert_eq!(variants[0].category, "PVC 1\" GRUESO");
    }

    #[test]
    fn test_missing_file() {
        let err = parse_catalog_file(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, QuoteError::FileNotFound { .. }));
    }
}
