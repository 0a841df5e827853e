//! Black (prompt) and white (response) cards.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, Resource};
use crate::payload::{check_not_found, map_list};
use crate::timestamp;

/// Marker inserted between the fragments of a black card's text.
pub const BLANK: &str = "_____";

/// Card identifier. The remote API uses strings, older payloads integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum CardId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardId::Number(n) => write!(f, "{n}"),
            CardId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Behaviour shared by both card colours.
pub trait Card {
    /// Creation time, UTC.
    fn created(&self) -> NaiveDateTime;
    fn cid(&self) -> &CardId;
    /// Never empty.
    fn text(&self) -> &str;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CardText {
    Single(String),
    Fragments(Vec<String>),
}

impl CardText {
    fn into_fragments(self) -> Vec<String> {
        match self {
            CardText::Single(text) => vec![text],
            CardText::Fragments(fragments) => fragments,
        }
    }
}

#[derive(Deserialize)]
struct RawCard {
    #[serde(alias = "created", deserialize_with = "timestamp::deserialize")]
    created_at: NaiveDateTime,
    #[serde(alias = "cid")]
    id: CardId,
    text: CardText,
    #[serde(default)]
    pick: Option<u32>,
}

impl RawCard {
    fn parse(value: &Value) -> Result<Self, ApiError> {
        check_not_found(value, Resource::Card)?;
        Ok(RawCard::deserialize(value)?)
    }
}

/// Read the card array stored under `key` in a `/cards` payload.
fn cards_under<T>(
    payload: &Value,
    key: &str,
    parse: impl Fn(&Value) -> Result<T, ApiError>,
) -> Result<Vec<T>, ApiError> {
    check_not_found(payload, Resource::Card)?;
    match payload.get(key) {
        Some(cards) => map_list(cards, parse),
        None => Ok(Vec::new()),
    }
}

fn non_empty(text: String, cid: &CardId) -> Result<String, ApiError> {
    if text.is_empty() {
        return Err(ApiError::DeserializationError(format!("card {cid} has no text")));
    }
    Ok(text)
}

/// A prompt card with one or more blanks to fill.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlackCard {
    created: NaiveDateTime,
    cid: CardId,
    text: String,
    pick: u32,
}

impl BlackCard {
    /// Assemble a prompt from the fragments surrounding its blanks.
    ///
    /// `pick` defaults to one less than the number of fragments received,
    /// and never below one.
    pub fn new(
        created: NaiveDateTime,
        cid: CardId,
        mut fragments: Vec<String>,
        pick: Option<u32>,
    ) -> Result<Self, ApiError> {
        let pick = match pick {
            Some(0) => {
                return Err(ApiError::DeserializationError(format!(
                    "card {cid} has a pick of zero"
                )))
            }
            Some(pick) => pick,
            None => u32::try_from(fragments.len()).unwrap_or(u32::MAX).saturating_sub(1).max(1),
        };

        // "foo?" followed by a lone trailing blank reads as "foo?_____".
        let dangling_blank = matches!(
            fragments.as_slice(),
            [.., before, last] if last.is_empty() && !before.ends_with(' ')
        );
        if dangling_blank {
            fragments.pop();
        }

        let text = fragments
            .iter()
            .filter(|fragment| !fragment.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(BLANK);

        Ok(BlackCard {
            text: non_empty(text, &cid)?,
            created,
            cid,
            pick,
        })
    }

    pub fn from_json(value: &Value) -> Result<Self, ApiError> {
        let raw = RawCard::parse(value)?;
        BlackCard::new(raw.created_at, raw.id, raw.text.into_fragments(), raw.pick)
    }

    /// Parse an array of cards in order; a lone object yields one card.
    pub fn from_json_list(value: &Value) -> Result<Vec<Self>, ApiError> {
        map_list(value, BlackCard::from_json)
    }

    /// Parse the `calls` array of a `/cards` payload.
    pub fn from_cards_payload(payload: &Value) -> Result<Vec<Self>, ApiError> {
        cards_under(payload, "calls", BlackCard::from_json)
    }

    /// Number of white cards needed to answer this prompt.
    pub fn pick(&self) -> u32 {
        self.pick
    }
}

impl Card for BlackCard {
    fn created(&self) -> NaiveDateTime {
        self.created
    }

    fn cid(&self) -> &CardId {
        &self.cid
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// A response card.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WhiteCard {
    created: NaiveDateTime,
    cid: CardId,
    text: String,
}

impl WhiteCard {
    pub fn new(created: NaiveDateTime, cid: CardId, text: impl Into<String>) -> Result<Self, ApiError> {
        Ok(WhiteCard {
            text: non_empty(text.into(), &cid)?,
            created,
            cid,
        })
    }

    pub fn from_json(value: &Value) -> Result<Self, ApiError> {
        let raw = RawCard::parse(value)?;
        WhiteCard::new(raw.created_at, raw.id, raw.text.into_fragments().concat())
    }

    pub fn from_json_list(value: &Value) -> Result<Vec<Self>, ApiError> {
        map_list(value, WhiteCard::from_json)
    }

    /// Parse the `responses` array of a `/cards` payload.
    pub fn from_cards_payload(payload: &Value) -> Result<Vec<Self>, ApiError> {
        cards_under(payload, "responses", WhiteCard::from_json)
    }
}

impl Card for WhiteCard {
    fn created(&self) -> NaiveDateTime {
        self.created
    }

    fn cid(&self) -> &CardId {
        &self.cid
    }

    fn text(&self) -> &str {
        &self.text
    }
}
