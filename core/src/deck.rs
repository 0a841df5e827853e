//! Deck metadata and full decks.

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::card::{BlackCard, WhiteCard};
use crate::error::{ApiError, Resource};
use crate::payload::{check_not_found, lenient_f64, lenient_u32, lenient_u64};
use crate::timestamp;

/// The account that published a deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Author {
    pub username: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub id: u64,
}

/// Whether a deck's content belongs to a third party, and where to find it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Copyright {
    pub external: bool,
    pub holder_url: Option<String>,
}

#[derive(Deserialize)]
struct RawDeckInfo {
    code: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    category: String,
    #[serde(deserialize_with = "lenient_u32")]
    call_count: u32,
    #[serde(deserialize_with = "lenient_u32")]
    response_count: u32,
    #[serde(default)]
    sample_calls: Option<Value>,
    #[serde(default)]
    sample_responses: Option<Value>,
    #[serde(default)]
    unlisted: Option<bool>,
    author: Author,
    external_copyright: bool,
    #[serde(default)]
    copyright_holder_url: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    created_at: NaiveDateTime,
    #[serde(deserialize_with = "timestamp::deserialize")]
    updated_at: NaiveDateTime,
    #[serde(deserialize_with = "lenient_f64")]
    rating: f64,
}

/// Everything the API reports about a deck except its full card lists.
///
/// Search results additionally carry a few sample cards of each colour.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckInfo {
    /// Five-character code identifying the deck remotely.
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub blackcount: u32,
    pub whitecount: u32,
    pub blacksample: Option<Vec<BlackCard>>,
    pub whitesample: Option<Vec<WhiteCard>>,
    pub unlisted: bool,
    pub author: Author,
    pub copyright: Copyright,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
    /// Average user rating, 0 to 5.
    pub rating: f64,
}

impl DeckInfo {
    pub fn from_json(value: &Value) -> Result<Self, ApiError> {
        check_not_found(value, Resource::DeckInfo)?;
        let raw = RawDeckInfo::deserialize(value)?;

        let blacksample = raw
            .sample_calls
            .as_ref()
            .map(BlackCard::from_json_list)
            .transpose()?;
        let whitesample = raw
            .sample_responses
            .as_ref()
            .map(WhiteCard::from_json_list)
            .transpose()?;

        Ok(DeckInfo {
            code: raw.code,
            name: raw.name,
            description: raw.description,
            category: raw.category,
            blackcount: raw.call_count,
            whitecount: raw.response_count,
            blacksample,
            whitesample,
            unlisted: raw.unlisted.unwrap_or(false),
            author: raw.author,
            copyright: Copyright {
                external: raw.external_copyright,
                holder_url: raw.copyright_holder_url,
            },
            created: raw.created_at,
            updated: raw.updated_at,
            rating: raw.rating,
        })
    }
}

/// A deck with its metadata and every card.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub info: DeckInfo,
    pub blackcards: Vec<BlackCard>,
    pub whitecards: Vec<WhiteCard>,
}

impl Deck {
    pub fn new(info: DeckInfo, blackcards: Vec<BlackCard>, whitecards: Vec<WhiteCard>) -> Self {
        Deck {
            info,
            blackcards,
            whitecards,
        }
    }

    /// Combine a deck-info payload with a `/cards` payload.
    pub fn from_json(deck: &Value, cards: &Value) -> Result<Self, ApiError> {
        let info = DeckInfo::from_json(deck)?;
        let blackcards = BlackCard::from_cards_payload(cards)?;
        let whitecards = WhiteCard::from_cards_payload(cards)?;
        Ok(Deck::new(info, blackcards, whitecards))
    }
}
