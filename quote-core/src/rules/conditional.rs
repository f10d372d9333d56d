//! Interpreter for the free-text conditional column.
//!
//! Catalog authors write rules such as `SI ES ≤ A 3 PIE2 REDONDEAR A 50`.
//! A small closed set of shapes is recognized and turned into [`Directive`]s;
//! anything else is kept only as a note for display.

use crate::config::NOT_APPLICABLE;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// "if area ≤ / ≥ L ft², force total to V".
static ROUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"SI\s+ES\s*(≤|<=|=<|MENOR\s+O\s+IGUAL|≥|>=|=>|MAYOR\s+O\s+IGUAL)\s*A?\s*(\d+(?:[.,]\d+)?)\s*(?:PIES?2?|FT2?)\s*,?\s*REDOND[EI]AR\s+A\s*(\d+(?:[.,]\d+)?)",
    )
    .unwrap()
});

/// "if area ≥ L ft², recommended thickness is T mm".
static ADVISORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"SI\s+ES\s*(?:≥|>=|=>|MAYOR\s+O\s+IGUAL)\s*A?\s*(\d+(?:[.,]\d+)?)\s*(?:PIES?2?|FT2?)[^0-9]*?RECOMI?ENDA\w*[^0-9]*(\d+(?:[.,]\d+)?)\s*MM",
    )
    .unwrap()
});

/// Structured form of one recognized conditional clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    /// Replace the subtotal with `value` when `area <= limit`.
    RoundIfAtMost { limit: f64, value: f64 },
    /// Replace the subtotal with `value` when `area >= limit`.
    RoundIfAtLeast { limit: f64, value: f64 },
    /// Recommend a thickness when `area >= limit`. Never changes the price.
    ThicknessAdvisory { limit: f64, thickness_mm: f64 },
    /// Text present but no shape recognized.
    Unrecognized { text: String },
}

impl Directive {
    /// The forced subtotal for `area`, if this directive applies to it.
    pub fn override_value(&self, area: f64) -> Option<f64> {
        match *self {
            Directive::RoundIfAtMost { limit, value } if area <= limit => Some(value),
            Directive::RoundIfAtLeast { limit, value } if area >= limit => Some(value),
            _ => None,
        }
    }

    /// Advisory text for `area`, if this is an advisory that applies to it.
    pub fn advisory(&self, area: f64) -> Option<String> {
        match *self {
            Directive::ThicknessAdvisory {
                limit,
                thickness_mm,
            } if area >= limit => Some(format!(
                "For {} ft² or more, {} mm thickness is recommended",
                limit, thickness_mm
            )),
            _ => None,
        }
    }
}

/// A variant's conditional text together with its recognized directives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionalRule {
    /// Original text; `None` when the cell was empty or `N/A`.
    pub raw: Option<String>,
    /// Directives in text-scan order.
    pub directives: Vec<Directive>,
}

impl ConditionalRule {
    /// Parse a conditional cell.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case(NOT_APPLICABLE) {
            return Self::default();
        }

        let folded = fold(text);
        let mut found: Vec<(usize, Directive)> = Vec::new();

        for caps in ROUND_RE.captures_iter(&folded) {
            if let Some(directive) = round_directive(&caps) {
                found.push((start_of(&caps), directive));
            }
        }

        for caps in ADVISORY_RE.captures_iter(&folded) {
            if let (Some(limit), Some(thickness_mm)) =
                (capture_number(&caps, 1), capture_number(&caps, 2))
            {
                found.push((
                    start_of(&caps),
                    Directive::ThicknessAdvisory {
                        limit,
                        thickness_mm,
                    },
                ));
            }
        }

        found.sort_by_key(|(start, _)| *start);
        let mut directives: Vec<Directive> = found.into_iter().map(|(_, d)| d).collect();

        if directives.is_empty() {
            tracing::debug!("Unrecognized conditional kept as note: {}", text);
            directives.push(Directive::Unrecognized {
                text: text.to_string(),
            });
        }

        Self {
            raw: Some(text.to_string()),
            directives,
        }
    }

    /// Text to show the end user, whether or not it was recognized.
    pub fn note(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Check if at least one directive shape was recognized.
    pub fn is_recognized(&self) -> bool {
        self.directives
            .iter()
            .any(|d| !matches!(d, Directive::Unrecognized { .. }))
    }

    /// The numeric directive that decides the subtotal for `area`.
    ///
    /// When several match, the last one in text order wins. This mirrors how
    /// the catalog has always been priced, even where a stricter rule appears
    /// earlier in the text.
    pub fn evaluate(&self, area: f64) -> Option<&Directive> {
        self.directives
            .iter()
            .rev()
            .find(|d| d.override_value(area).is_some())
    }

    /// Advisory messages that apply to `area`.
    pub fn advisories(&self, area: f64) -> Vec<String> {
        self.directives
            .iter()
            .filter_map(|d| d.advisory(area))
            .collect()
    }
}

fn round_directive(caps: &Captures<'_>) -> Option<Directive> {
    let op = caps.get(1)?.as_str();
    let limit = capture_number(caps, 2)?;
    let value = capture_number(caps, 3)?;

    if op.contains('≤') || op.contains('<') || op.starts_with("MENOR") {
        Some(Directive::RoundIfAtMost { limit, value })
    } else {
        Some(Directive::RoundIfAtLeast { limit, value })
    }
}

fn start_of(caps: &Captures<'_>) -> usize {
    caps.get(0).map(|m| m.start()).unwrap_or(0)
}

fn capture_number(caps: &Captures<'_>, group: usize) -> Option<f64> {
    parse_decimal(caps.get(group)?.as_str())
}

/// Parse a decimal that may use a comma separator ("1,5" -> 1.5).
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse().ok()
}

/// Uppercase and strip the diacritics catalog authors use inconsistently.
fn fold(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .map(|c| match c {
            'Á' | 'À' | 'Â' | 'Ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'Ó' | 'Ò' | 'Ô' | 'Ö' => 'O',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'Ñ' => 'N',
            '²' => '2',
            _ => c,
        })
        .collect()
}
