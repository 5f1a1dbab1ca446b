//! Card database API response model.
//!
//! Mirrors the fields the tracker actually consumes: identity, images
//! (including double-faced cards), per-format legality, and prices.
//! Unknown response fields are ignored.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Image renditions for one card face.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUris {
    pub small: String,
    pub normal: String,
    pub large: String,
    pub png: String,
    pub art_crop: String,
    pub border_crop: String,
}

/// One face of a double-faced card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
}

/// Legality of a card in one format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Legality {
    Legal,
    NotLegal,
    Restricted,
    Banned,
}

/// Market prices, as the API reports them: decimal strings, absent when
/// a printing has no market data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prices {
    #[serde(default)]
    pub usd: Option<String>,
    #[serde(default)]
    pub usd_foil: Option<String>,
    #[serde(default)]
    pub eur: Option<String>,
    #[serde(default)]
    pub eur_foil: Option<String>,
    #[serde(default)]
    pub tix: Option<String>,
}

/// One card record from a search result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    /// Absent for double-faced cards, which carry images per face.
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
    #[serde(default)]
    pub card_faces: Option<Vec<CardFace>>,
    #[serde(default)]
    pub legalities: FxHashMap<String, Legality>,
    #[serde(default)]
    pub prices: Option<Prices>,
}

impl Card {
    /// The best image to display: the card's own border crop, falling
    /// back to the front face's for double-faced cards.
    #[must_use]
    pub fn display_image(&self) -> Option<&str> {
        if let Some(uris) = &self.image_uris {
            return Some(&uris.border_crop);
        }
        self.card_faces
            .as_deref()?
            .first()?
            .image_uris
            .as_ref()
            .map(|uris| uris.border_crop.as_str())
    }

    /// Legality in a named format, if the API reported it.
    #[must_use]
    pub fn legality(&self, format: &str) -> Option<Legality> {
        self.legalities.get(format).copied()
    }
}

/// One page of search results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<Card>,
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub total_cards: Option<u32>,
}
