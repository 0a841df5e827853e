//! Deck search queries and result pages.

use serde::Deserialize;
use serde_json::Value;

use crate::deck::DeckInfo;
use crate::error::{ApiError, Resource};
use crate::payload::{check_not_found, lenient_u32};

/// Filters and paging for a deck search. Unset filters are left out of the
/// request entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub offset: u32,
    /// Page size; the client's configured default when `None`.
    pub limit: Option<u32>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Deserialize)]
struct RawResults {
    #[serde(deserialize_with = "lenient_u32")]
    count: u32,
    #[serde(deserialize_with = "lenient_u32")]
    offset: u32,
    data: Vec<Value>,
}

#[derive(Deserialize)]
struct RawSearch {
    #[serde(deserialize_with = "lenient_u32")]
    total: u32,
    results: RawResults,
}

/// One page of search results. A page with `count == 0` ends pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReturn {
    /// Matches across all pages.
    pub totaldecks: u32,
    pub count: u32,
    pub offset: u32,
    pub data: Vec<DeckInfo>,
}

impl SearchReturn {
    pub fn from_json(value: &Value) -> Result<Self, ApiError> {
        check_not_found(value, Resource::Search)?;
        let raw = RawSearch::deserialize(value)?;
        let data = raw
            .results
            .data
            .iter()
            .map(DeckInfo::from_json)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchReturn {
            totaldecks: raw.total,
            count: raw.results.count,
            offset: raw.results.offset,
            data,
        })
    }
}
