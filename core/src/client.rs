//! Stateless HTTP request builder and response parser for the Cardcast API.
//!
//! # Design
//! `CardcastClient` holds only its configuration and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Both backends share this one mapping from status codes
//! and bodies to entities and errors.

use std::env;
use std::num::ParseIntError;

use serde_json::Value;

use crate::card::{BlackCard, WhiteCard};
use crate::deck::DeckInfo;
use crate::error::{ApiError, Resource};
use crate::http::{HttpRequest, HttpResponse};
use crate::payload::not_found_message;
use crate::search::{SearchQuery, SearchReturn};

pub const DEFAULT_BASE_URL: &str = "https://api.cardcastgame.com";

/// Decks per search page when a query does not set `limit`.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

const DECKS_PATH: &str = "/v1/decks";

/// Where the API lives and how large search pages are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Read `CARDCAST_BASE_URL` and `CARDCAST_PAGE_SIZE`, falling back to the
    /// defaults for whichever is unset.
    pub fn from_env() -> Result<Self, ParseIntError> {
        Self::from_values(
            env::var("CARDCAST_BASE_URL").ok(),
            env::var("CARDCAST_PAGE_SIZE").ok(),
        )
    }

    fn from_values(base_url: Option<String>, page_size: Option<String>) -> Result<Self, ParseIntError> {
        let mut config = Self::new(base_url.as_deref().unwrap_or(DEFAULT_BASE_URL));
        if let Some(raw) = page_size {
            config = config.with_page_size(raw.trim().parse()?);
        }
        Ok(config)
    }
}

/// Stateless request builder and response parser.
#[derive(Debug, Clone)]
pub struct CardcastClient {
    base_url: String,
    page_size: u32,
}

impl Default for CardcastClient {
    fn default() -> Self {
        Self::with_config(ClientConfig::default())
    }
}

impl CardcastClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn build_deck_info(&self, code: &str) -> Result<HttpRequest, ApiError> {
        validate_code(code)?;
        Ok(self.get(format!("{}{DECKS_PATH}/{code}", self.base_url), Vec::new()))
    }

    /// The one request behind `white_cards`, `black_cards` and `cards`.
    pub fn build_cards(&self, code: &str) -> Result<HttpRequest, ApiError> {
        validate_code(code)?;
        Ok(self.get(format!("{}{DECKS_PATH}/{code}/cards", self.base_url), Vec::new()))
    }

    pub fn build_search(&self, query: &SearchQuery) -> HttpRequest {
        let mut params = Vec::new();
        let filters = [
            ("search", &query.name),
            ("author", &query.author),
            ("category", &query.category),
        ];
        for (key, value) in filters {
            if let Some(value) = value {
                params.push((key.to_string(), value.clone()));
            }
        }
        params.push(("offset".to_string(), query.offset.to_string()));
        params.push((
            "limit".to_string(),
            query.limit.unwrap_or(self.page_size).to_string(),
        ));
        self.get(format!("{}{DECKS_PATH}", self.base_url), params)
    }

    pub fn parse_deck_info(&self, code: &str, response: HttpResponse) -> Result<DeckInfo, ApiError> {
        let body = check_status(
            &response,
            Resource::DeckInfo,
            &format!("Deck not found: {code}"),
            &format!("Error retrieving deck: {code}"),
        )?;
        DeckInfo::from_json(&body)
    }

    pub fn parse_white_cards(&self, code: &str, response: HttpResponse) -> Result<Vec<WhiteCard>, ApiError> {
        let body = check_status(
            &response,
            Resource::Card,
            &format!("White cards not found: {code}"),
            &format!("Error retrieving white cards: {code}"),
        )?;
        WhiteCard::from_cards_payload(&body)
    }

    pub fn parse_black_cards(&self, code: &str, response: HttpResponse) -> Result<Vec<BlackCard>, ApiError> {
        let body = check_status(
            &response,
            Resource::Card,
            &format!("Black cards not found: {code}"),
            &format!("Error retrieving black cards: {code}"),
        )?;
        BlackCard::from_cards_payload(&body)
    }

    /// Both colours from a single `/cards` response, white first.
    pub fn parse_cards(
        &self,
        code: &str,
        response: HttpResponse,
    ) -> Result<(Vec<WhiteCard>, Vec<BlackCard>), ApiError> {
        let body = check_status(
            &response,
            Resource::Card,
            &format!("Cards not found: {code}"),
            &format!("Error retrieving cards: {code}"),
        )?;
        Ok((WhiteCard::from_cards_payload(&body)?, BlackCard::from_cards_payload(&body)?))
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<SearchReturn, ApiError> {
        let body = check_status(
            &response,
            Resource::Search,
            "Search query returned not found",
            "Error searching decks",
        )?;
        SearchReturn::from_json(&body)
    }

    fn get(&self, url: String, query: Vec<(String, String)>) -> HttpRequest {
        HttpRequest {
            url,
            query,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

/// Deck codes are spliced into the URL path, so only ASCII alphanumerics
/// are let through.
fn validate_code(code: &str) -> Result<(), ApiError> {
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::InvalidDeckCode(code.to_string()));
    }
    Ok(())
}

/// Map the status code to an error, or decode the 200 body as JSON.
///
/// A 404 whose body is a `not_found` payload keeps the server's message.
fn check_status(
    response: &HttpResponse,
    resource: Resource,
    not_found: &str,
    failure: &str,
) -> Result<Value, ApiError> {
    match response.status {
        200 => Ok(serde_json::from_str(&response.body)?),
        404 => {
            let message = serde_json::from_str::<Value>(&response.body)
                .ok()
                .and_then(|body| not_found_message(&body))
                .unwrap_or_else(|| not_found.to_string());
            Err(ApiError::not_found(resource, message))
        }
        status => Err(ApiError::retrieval(resource, Some(status), failure)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;

    fn client() -> CardcastClient {
        CardcastClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    const CARDS: &str = r#"{
        "calls": [{"id": "c1", "text": ["Why did", ""], "created_at": "2015-01-01T00:00:00+00:00"}],
        "responses": [{"id": "r1", "text": ["A lamp."], "created_at": "2015-01-01T00:00:00+00:00"}]
    }"#;

    #[test]
    fn build_deck_info_produces_correct_request() {
        let req = client().build_deck_info("JJDFG").unwrap();
        assert_eq!(req.url, "http://localhost:3000/v1/decks/JJDFG");
        assert!(req.query.is_empty());
    }

    #[test]
    fn build_cards_produces_correct_request() {
        let req = client().build_cards("JJDFG").unwrap();
        assert_eq!(req.url, "http://localhost:3000/v1/decks/JJDFG/cards");
    }

    #[test]
    fn build_rejects_bad_codes() {
        for code in ["", "AB/CD", "../x", "AB CD"] {
            let err = client().build_deck_info(code).unwrap_err();
            assert!(matches!(err, ApiError::InvalidDeckCode(_)), "{code:?}");
        }
        assert!(client().build_cards("").is_err());
    }

    #[test]
    fn build_search_omits_unset_filters() {
        let req = client().build_search(&SearchQuery::new());
        assert_eq!(req.url, "http://localhost:3000/v1/decks");
        assert_eq!(
            req.query,
            vec![
                ("offset".to_string(), "0".to_string()),
                ("limit".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn build_search_includes_set_filters() {
        let query = SearchQuery::new().name("cats").author("elizafox").category("community").offset(20).limit(10);
        let req = client().build_search(&query);
        assert_eq!(
            req.query,
            vec![
                ("search".to_string(), "cats".to_string()),
                ("author".to_string(), "elizafox".to_string()),
                ("category".to_string(), "community".to_string()),
                ("offset".to_string(), "20".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn configured_page_size_is_default_limit() {
        let client = CardcastClient::with_config(ClientConfig::new("http://x").with_page_size(25));
        let req = client.build_search(&SearchQuery::new());
        assert_eq!(req.query[1], ("limit".to_string(), "25".to_string()));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = CardcastClient::new("http://localhost:3000/");
        let req = client.build_deck_info("JJDFG").unwrap();
        assert_eq!(req.url, "http://localhost:3000/v1/decks/JJDFG");
    }

    #[test]
    fn parse_deck_info_not_found() {
        let err = client().parse_deck_info("ZZZZZ", response(404, "")).unwrap_err();
        assert_eq!(err, ApiError::not_found(Resource::DeckInfo, "Deck not found: ZZZZZ"));
    }

    #[test]
    fn parse_deck_info_not_found_keeps_server_message() {
        let body = r#"{"id":"not_found","message":"The deck you requested was not found."}"#;
        let err = client().parse_deck_info("ZZZZZ", response(404, body)).unwrap_err();
        assert_eq!(err.to_string(), "The deck you requested was not found.");
    }

    #[test]
    fn parse_deck_info_server_error() {
        let err = client().parse_deck_info("ZZZZZ", response(500, "oops")).unwrap_err();
        assert_eq!(
            err,
            ApiError::retrieval(Resource::DeckInfo, Some(500), "Error retrieving deck: ZZZZZ")
        );
    }

    #[test]
    fn parse_deck_info_bad_json() {
        let err = client().parse_deck_info("JJDFG", response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_cards_splits_colours() {
        let (white, black) = client().parse_cards("JJDFG", response(200, CARDS)).unwrap();
        assert_eq!(white.len(), 1);
        assert_eq!(white[0].text(), "A lamp.");
        assert_eq!(black.len(), 1);
        assert_eq!(black[0].text(), "Why did");
    }

    #[test]
    fn parse_single_colour() {
        let white = client().parse_white_cards("JJDFG", response(200, CARDS)).unwrap();
        assert_eq!(white[0].text(), "A lamp.");
        let black = client().parse_black_cards("JJDFG", response(200, CARDS)).unwrap();
        assert_eq!(black[0].pick(), 1);
    }

    #[test]
    fn parse_cards_errors_are_card_errors() {
        let err = client().parse_white_cards("JJDFG", response(404, "")).unwrap_err();
        assert_eq!(err.resource(), Some(Resource::Card));
        assert!(err.is_not_found());
        let err = client().parse_black_cards("JJDFG", response(503, "")).unwrap_err();
        assert_eq!(err.resource(), Some(Resource::Card));
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn parse_search_errors() {
        let err = client().parse_search(response(404, "")).unwrap_err();
        assert_eq!(err, ApiError::not_found(Resource::Search, "Search query returned not found"));
        let err = client().parse_search(response(502, "")).unwrap_err();
        assert_eq!(err, ApiError::retrieval(Resource::Search, Some(502), "Error searching decks"));
    }

    #[test]
    fn config_values_fall_back_to_defaults() {
        let config = ClientConfig::from_values(None, None).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn config_values_are_read() {
        let config =
            ClientConfig::from_values(Some("http://localhost:3000/".to_string()), Some(" 25 ".to_string())).unwrap();
        assert_eq!(config.base_url, "http://localhost:3000/");
        assert_eq!(config.page_size, 25);

        let client = CardcastClient::with_config(config);
        let req = client.build_search(&SearchQuery::new());
        assert_eq!(req.url, "http://localhost:3000/v1/decks");
        assert_eq!(req.query[1], ("limit".to_string(), "25".to_string()));
    }

    #[test]
    fn config_rejects_malformed_page_size() {
        assert!(ClientConfig::from_values(None, Some("fifty".to_string())).is_err());
        assert!(ClientConfig::from_values(None, Some("-5".to_string())).is_err());
    }

    #[test]
    fn config_clamps_zero_page_size() {
        let config = ClientConfig::from_values(None, Some("0".to_string())).unwrap();
        assert_eq!(config.page_size, 1);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let client = CardcastClient::with_config(ClientConfig::new("http://x").with_page_size(0));
        assert_eq!(client.page_size(), 1);
    }
}
