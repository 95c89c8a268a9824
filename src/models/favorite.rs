use serde::{Deserialize, Serialize};

use super::card::CardRecord;

// ---------------------------------------------------------------------------
// FavoriteEntry — a favorited card plus the user's annotations
// ---------------------------------------------------------------------------

/// A catalog card the user has favorited, with free-text notes, condition
/// and market price.
///
/// Identity is the wrapped card's `id`. Serialized as
/// `{"card": {...}, "notes": "", "condition": "", "marketPrice": ""}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FavoriteEntry {
    pub card: CardRecord,
    pub notes: String,
    pub condition: String,
    pub market_price: String,
}

impl FavoriteEntry {
    /// Wrap a card with empty user fields.
    pub fn new(card: CardRecord) -> Self {
        Self {
            card,
            ..Self::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.card.id
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    pub fn with_market_price(mut self, market_price: impl Into<String>) -> Self {
        self.market_price = market_price.into();
        self
    }
}

impl From<CardRecord> for FavoriteEntry {
    fn from(card: CardRecord) -> Self {
        Self::new(card)
    }
}
