//! Transport-agnostic client core for the Cardcast deck API.
//!
//! # Overview
//! Maps the remote `/v1/decks` endpoints onto typed entities (`DeckInfo`,
//! `Deck`, `BlackCard`, `WhiteCard`, `SearchReturn`) and a small error
//! taxonomy. The network round-trip itself is supplied by a `Transport`
//! or `AsyncTransport` implementation (host-does-IO pattern), so this crate
//! stays deterministic and testable without a server.
//!
//! # Design
//! - `CardcastClient` is stateless: it builds `HttpRequest`s and parses
//!   `HttpResponse`s, holding only the base URL and page size.
//! - `CardcastApi` / `AsyncCardcastApi` define the operations; `cards`,
//!   `deck` and pagination are default methods written once.
//! - `Cardcast` / `AsyncCardcast` implement those traits over any transport.

pub mod api;
pub mod backend;
pub mod card;
pub mod client;
pub mod deck;
pub mod error;
pub mod http;
mod payload;
pub mod search;
pub mod timestamp;

pub use api::{AsyncCardcastApi, CardcastApi, SearchPages};
pub use backend::{AsyncCardcast, Cardcast};
pub use card::{BlackCard, Card, CardId, WhiteCard, BLANK};
pub use client::{CardcastClient, ClientConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
pub use deck::{Author, Copyright, Deck, DeckInfo};
pub use error::{ApiError, Resource};
pub use http::{AsyncTransport, HttpRequest, HttpResponse, Transport, TransportError};
pub use search::{SearchQuery, SearchReturn};
pub use timestamp::parse_utc_timestamp;
