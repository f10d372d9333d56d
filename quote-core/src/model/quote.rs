//! Saved quote records.

use super::PriceBreakdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer contact details attached to a quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ClientInfo {
    /// Create client info with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Check if the client has a non-blank name.
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Email and phone joined for display.
    pub fn contact_line(&self) -> Option<String> {
        let parts: Vec<&str> = [self.email.as_deref(), self.phone.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" • "))
        }
    }
}

/// A breakdown kept for later, with identity and client details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQuote {
    /// Unique quote number.
    pub id: String,
    /// When the quote was created.
    pub created_at: DateTime<Utc>,
    /// The computed prices.
    pub breakdown: PriceBreakdown,
    /// Client, when one was named.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientInfo>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SavedQuote {
    /// Wrap a breakdown with a fresh id and the current time.
    pub fn new(
        breakdown: PriceBreakdown,
        client: Option<ClientInfo>,
        notes: Option<String>,
    ) -> Self {
        Self::with_identity(
            Uuid::new_v4().to_string(),
            Utc::now(),
            breakdown,
            client,
            notes,
        )
    }

    /// Wrap a breakdown with an explicit id and timestamp.
    ///
    /// Unnamed clients and blank notes are dropped.
    pub fn with_identity(
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        breakdown: PriceBreakdown,
        client: Option<ClientInfo>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            created_at,
            breakdown,
            client: client.filter(ClientInfo::is_named),
            notes: notes.filter(|n| !n.trim().is_empty()),
        }
    }

    /// Amount due on this quote.
    pub fn total(&self) -> f64 {
        self.breakdown.total
    }
}
