//! Field normalizers for catalog cells.

use crate::config::NOT_APPLICABLE;
use crate::rules::parse_decimal;

/// Parse a price cell such as `$12,50` into a plain number.
///
/// Malformed, non-finite and negative values become 0.
pub fn parse_price(cell: &str) -> f64 {
    let cleaned: String = cell
        .chars()
        .filter(|c| *c != '$' && !c.is_whitespace())
        .collect();

    match parse_decimal(&cleaned) {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

/// Parse a minimum-area cell. `N/A`, blanks and non-positive values mean no minimum.
pub fn parse_minimum_area(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case(NOT_APPLICABLE) {
        return None;
    }
    parse_decimal(cell).filter(|v| v.is_finite() && *v > 0.0)
}

/// Parse an explicit light column. Blank cells defer to the category text.
pub fn parse_light_flag(cell: &str) -> Option<bool> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    let flag = matches!(
        cell.to_uppercase().as_str(),
        "SI" | "SÍ" | "YES" | "TRUE" | "1" | "X" | "CON LUZ"
    );
    Some(flag)
}
