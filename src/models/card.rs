use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// CardImages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CardImages {
    #[serde(deserialize_with = "null_as_default")]
    pub small: String,
    #[serde(deserialize_with = "null_as_default")]
    pub large: String,
}

// ---------------------------------------------------------------------------
// CardRecord — read-only projection of a catalog card
// ---------------------------------------------------------------------------

/// A single card as returned by the catalog.
///
/// Every field is optional on the wire: a missing or `null` string becomes
/// `""` and a missing list becomes empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CardRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub supertype: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtypes: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub hp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: CardImages,
    #[serde(deserialize_with = "null_as_default")]
    pub rarity: String,
}

impl CardRecord {
    /// Best available image: the large one, falling back to the small one.
    pub fn image_url(&self) -> Option<&str> {
        [&self.images.large, &self.images.small]
            .into_iter()
            .find(|url| !url.is_empty())
            .map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// SearchResult — one page of a card search
// ---------------------------------------------------------------------------

/// A page of search results plus the catalog's pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    #[serde(rename = "data", deserialize_with = "null_as_default")]
    pub cards: Vec<CardRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub page_size: u32,
    /// Number of cards in this page.
    #[serde(deserialize_with = "null_as_default")]
    pub count: u32,
    /// Number of cards matching the query across all pages.
    #[serde(deserialize_with = "null_as_default")]
    pub total_count: u32,
}

impl SearchResult {
    /// An empty page for the given request, used when a search fails.
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            ..Self::default()
        }
    }
}

/// Envelope of `GET /cards/{id}`.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(crate) struct SingleCardResponse {
    pub data: Option<CardRecord>,
}
