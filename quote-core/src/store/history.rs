//! Search, ordering and totals over saved quotes.

use crate::model::SavedQuote;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Ordering for the quote history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Newest first.
    #[default]
    Date,
    /// Highest total first.
    Total,
}

/// Quotes whose client name, company, service type or category contain
/// `term`, ignoring case. A blank term matches everything.
pub fn search<'a>(quotes: &'a [SavedQuote], term: &str) -> Vec<&'a SavedQuote> {
    let needle = term.trim().to_lowercase();
    quotes
        .iter()
        .filter(|q| needle.is_empty() || matches_term(q, &needle))
        .collect()
}

fn matches_term(quote: &SavedQuote, needle: &str) -> bool {
    let client_fields = quote
        .client
        .iter()
        .flat_map(|c| [Some(c.name.as_str()), c.company.as_deref()])
        .flatten();
    let service_fields = [
        quote.breakdown.service_type.as_str(),
        quote.breakdown.category.as_str(),
    ];

    client_fields
        .chain(service_fields)
        .any(|field| field.to_lowercase().contains(needle))
}

/// Sort quotes in place, descending by the chosen key.
pub fn sort_quotes(quotes: &mut [&SavedQuote], by: SortBy) {
    match by {
        SortBy::Date => quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Total => quotes.sort_by(|a, b| {
            b.total()
                .partial_cmp(&a.total())
                .unwrap_or(Ordering::Equal)
        }),
    }
}

/// Sum of totals across quotes.
pub fn total_revenue<'a>(quotes: impl IntoIterator<Item = &'a SavedQuote>) -> f64 {
    quotes.into_iter().map(SavedQuote::total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClientInfo, PriceBreakdown};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn quote(id: &str, day: u32, total: f64, client: Option<&str>, service: &str) -> SavedQuote {
        let breakdown = PriceBreakdown {
            service_type: service.to_string(),
            category: "GENERAL".to_string(),
            total,
            ..Default::default()
        };
        SavedQuote::with_identity(
            id,
            Utc.with_ymd_and_hms(2026, 5, day, 12, 0, 0).unwrap(),
            breakdown,
            client.map(ClientInfo::new),
            None,
        )
    }

    fn history() -> Vec<SavedQuote> {
        vec![
            quote("q3", 3, 40.0, Some("Rotulos Ana"), "VINIL"),
            quote("q2", 2, 150.0, None, "LETRAS RECORTADAS"),
            quote("q1", 1, 90.5, Some("Beto"), "CAJAS DE LUZ"),
        ]
    }

    fn ids(quotes: &[&SavedQuote]) -> Vec<String> {
        quotes.iter().map(|q| q.id.clone()).collect()
    }

    // ==================== search tests ====================

    #[test]
    fn test_search_by_client_and_service() {
        let quotes = history();
        assert_eq!(ids(&search(&quotes, "ana")), vec!["q3"]);
        assert_eq!(ids(&search(&quotes, "letras")), vec!["q2"]);
        assert_eq!(ids(&search(&quotes, "  ")).len(), 3);
        assert!(search(&quotes, "nadie").is_empty());
    }

    // ==================== sort_quotes tests ====================

    #[test]
    fn test_sort_by_total() {
        let quotes = history();
        let mut view = search(&quotes, "");
        sort_quotes(&mut view, SortBy::Total);
        assert_eq!(ids(&view), vec!["q2", "q1", "q3"]);
    }

    #[test]
    fn test_sort_by_date() {
        let quotes = history();
        let mut view: Vec<&SavedQuote> = quotes.iter().rev().collect();
        sort_quotes(&mut view, SortBy::Date);
        assert_eq!(ids(&view), vec!["q3", "q2", "q1"]);
    }

    // ==================== total_revenue tests ====================

    #[test]
    fn test_total_revenue() {
        let quotes = history();
        assert_eq!(total_revenue(&quotes), 280.5);
        assert_eq!(total_revenue(search(&quotes, "beto")), 90.5);
        assert_eq!(total_revenue(&Vec::<SavedQuote>::new()), 0.0);
    }
}
