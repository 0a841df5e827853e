//! In-memory stand-in for the Cardcast `/v1/decks` API.
//!
//! Serves deck info, card lists and paginated search over a fixed `Catalog`,
//! using the same JSON shapes as the real service: counts and ratings as
//! strings, timestamps with a `+00:00` offset, card text as fragment lists,
//! and `{"id": "not_found", ...}` bodies on 404.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

const SAMPLE_SIZE: usize = 3;
const DEFAULT_LIMIT: usize = 50;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MockCard {
    pub id: String,
    pub text: Vec<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MockAuthor {
    pub id: u64,
    pub username: String,
}

#[derive(Clone, Debug)]
pub struct MockDeck {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub unlisted: bool,
    pub author: MockAuthor,
    pub external_copyright: bool,
    pub copyright_holder_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub rating: f64,
    pub calls: Vec<MockCard>,
    pub responses: Vec<MockCard>,
}

impl MockDeck {
    fn info_json(&self) -> Value {
        json!({
            "code": self.code,
            "name": self.name,
            "description": self.description,
            "category": self.category,
            "call_count": self.calls.len().to_string(),
            "response_count": self.responses.len().to_string(),
            "unlisted": self.unlisted,
            "author": self.author,
            "external_copyright": self.external_copyright,
            "copyright_holder_url": self.copyright_holder_url,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
            "rating": format!("{:.1}", self.rating),
        })
    }

    fn search_json(&self) -> Value {
        let mut info = self.info_json();
        info["sample_calls"] = json!(self.calls.iter().take(SAMPLE_SIZE).collect::<Vec<_>>());
        info["sample_responses"] = json!(self.responses.iter().take(SAMPLE_SIZE).collect::<Vec<_>>());
        info
    }

    fn cards_json(&self) -> Value {
        json!({"calls": self.calls, "responses": self.responses})
    }
}

/// The decks the server knows about, plus forced failures for chosen codes.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    decks: Vec<MockDeck>,
    failures: HashMap<String, u16>,
}

impl Catalog {
    pub fn new(decks: Vec<MockDeck>) -> Self {
        Self {
            decks,
            failures: HashMap::new(),
        }
    }

    /// Answer every request for `code` with `status` and an empty body.
    ///
    /// A `status` outside 100..=999 is served as 500.
    pub fn fail_with(mut self, code: &str, status: u16) -> Self {
        self.failures.insert(code.to_string(), status);
        self
    }

    /// Two hand-written decks by different authors.
    pub fn sample() -> Self {
        let stamp = "2015-01-01T00:00:00+00:00";
        let card = |id: &str, text: &[&str]| MockCard {
            id: id.to_string(),
            text: text.iter().map(|s| s.to_string()).collect(),
            created_at: stamp.to_string(),
        };
        Self::new(vec![
            MockDeck {
                code: "JJDFG".to_string(),
                name: "Ridiculous Extras".to_string(),
                description: Some("Cards for the brave.".to_string()),
                category: "community".to_string(),
                unlisted: false,
                author: MockAuthor {
                    id: 3301,
                    username: "elizafox".to_string(),
                },
                external_copyright: false,
                copyright_holder_url: None,
                created_at: "2014-08-23T17:05:42+00:00".to_string(),
                updated_at: "2015-02-01T09:30:00+00:00".to_string(),
                rating: 4.5,
                calls: vec![
                    card("c1", &["Why did", ""]),
                    card("c2", &["A", "B", "C"]),
                    card("c3", &["I drink to forget ", "."]),
                ],
                responses: vec![
                    card("r1", &["A lamp."]),
                    card("r2", &["Two lamps."]),
                    card("r3", &["A disappointing birthday party."]),
                    card("r4", &["Cats."]),
                ],
            },
            MockDeck {
                code: "CAT42".to_string(),
                name: "Cat Pack".to_string(),
                description: None,
                category: "other".to_string(),
                unlisted: true,
                author: MockAuthor {
                    id: 7,
                    username: "whiskers".to_string(),
                },
                external_copyright: true,
                copyright_holder_url: Some("https://example.org/cats".to_string()),
                created_at: stamp.to_string(),
                updated_at: stamp.to_string(),
                rating: 3.0,
                calls: vec![card("k1", &["Meow ", "."])],
                responses: vec![card("k2", &["A hairball."])],
            },
        ])
    }

    /// `count` near-identical decks with codes `D0000`, `D0001`, ...
    pub fn generated(count: usize) -> Self {
        let stamp = "2015-01-01T00:00:00+00:00";
        let decks = (0..count)
            .map(|i| MockDeck {
                code: format!("D{i:04}"),
                name: format!("Generated deck {i}"),
                description: None,
                category: "community".to_string(),
                unlisted: false,
                author: MockAuthor {
                    id: 1,
                    username: "generator".to_string(),
                },
                external_copyright: false,
                copyright_holder_url: None,
                created_at: stamp.to_string(),
                updated_at: stamp.to_string(),
                rating: 2.5,
                calls: vec![MockCard {
                    id: format!("c{i}"),
                    text: vec![format!("Prompt {i} "), String::new()],
                    created_at: stamp.to_string(),
                }],
                responses: Vec::new(),
            })
            .collect();
        Self::new(decks)
    }

    fn lookup(&self, code: &str) -> Result<&MockDeck, Response> {
        if let Some(status) = self.failures.get(code) {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return Err(status.into_response());
        }
        self.decks.iter().find(|deck| deck.code == code).ok_or_else(not_found)
    }
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

type Db = Arc<Catalog>;

pub fn app(catalog: Catalog) -> Router {
    Router::new()
        .route("/v1/decks", get(search_decks))
        .route("/v1/decks/{code}", get(deck_info))
        .route("/v1/decks/{code}/cards", get(deck_cards))
        .with_state(Arc::new(catalog))
}

pub async fn run(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    axum::serve(listener, app(catalog)).await
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"id": "not_found", "message": "The deck you requested was not found."})),
    )
        .into_response()
}

async fn deck_info(State(db): State<Db>, Path(code): Path<String>) -> Response {
    match db.lookup(&code) {
        Ok(deck) => Json(deck.info_json()).into_response(),
        Err(response) => response,
    }
}

async fn deck_cards(State(db): State<Db>, Path(code): Path<String>) -> Response {
    match db.lookup(&code) {
        Ok(deck) => Json(deck.cards_json()).into_response(),
        Err(response) => response,
    }
}

async fn search_decks(State(db): State<Db>, Query(params): Query<SearchParams>) -> Json<Value> {
    let needle = params.search.as_deref().map(str::to_lowercase);
    let matches: Vec<&MockDeck> = db
        .decks
        .iter()
        .filter(|deck| {
            needle
                .as_deref()
                .map_or(true, |n| deck.name.to_lowercase().contains(n))
        })
        .filter(|deck| params.author.as_deref().map_or(true, |a| deck.author.username == a))
        .filter(|deck| params.category.as_deref().map_or(true, |c| deck.category == c))
        .collect();

    let offset = params.offset.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let page: Vec<Value> = matches
        .iter()
        .skip(offset)
        .take(limit)
        .map(|deck| deck.search_json())
        .collect();

    Json(json!({
        "total": matches.len(),
        "results": {"count": page.len(), "offset": offset, "data": page},
    }))
}
