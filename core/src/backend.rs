//! Client implementations generic over a transport.
//!
//! `Cardcast` blocks the calling thread on each request; `AsyncCardcast`
//! suspends instead. Both hand request building and response mapping to the
//! same `CardcastClient`, and both fetch `/cards` once for `cards()`.

use crate::api::{AsyncCardcastApi, CardcastApi};
use crate::card::{BlackCard, WhiteCard};
use crate::client::CardcastClient;
use crate::deck::DeckInfo;
use crate::error::{ApiError, Resource};
use crate::http::{AsyncTransport, HttpRequest, HttpResponse, Transport, TransportError};
use crate::search::{SearchQuery, SearchReturn};

fn transport_failure(resource: Resource, err: TransportError) -> ApiError {
    ApiError::retrieval(resource, None, err.to_string())
}

/// Blocking client over any [`Transport`].
#[derive(Debug, Clone)]
pub struct Cardcast<T> {
    client: CardcastClient,
    transport: T,
}

impl<T: Transport> Cardcast<T> {
    pub fn new(client: CardcastClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &CardcastClient {
        &self.client
    }

    fn fetch(&self, request: HttpRequest, resource: Resource) -> Result<HttpResponse, ApiError> {
        self.transport
            .execute(&request)
            .map_err(|e| transport_failure(resource, e))
    }
}

impl<T: Transport> CardcastApi for Cardcast<T> {
    fn deck_info(&self, code: &str) -> Result<DeckInfo, ApiError> {
        let request = self.client.build_deck_info(code)?;
        let response = self.fetch(request, Resource::DeckInfo)?;
        self.client.parse_deck_info(code, response)
    }

    fn white_cards(&self, code: &str) -> Result<Vec<WhiteCard>, ApiError> {
        let request = self.client.build_cards(code)?;
        let response = self.fetch(request, Resource::Card)?;
        self.client.parse_white_cards(code, response)
    }

    fn black_cards(&self, code: &str) -> Result<Vec<BlackCard>, ApiError> {
        let request = self.client.build_cards(code)?;
        let response = self.fetch(request, Resource::Card)?;
        self.client.parse_black_cards(code, response)
    }

    fn search(&self, query: &SearchQuery) -> Result<SearchReturn, ApiError> {
        let request = self.client.build_search(query);
        let response = self.fetch(request, Resource::Search)?;
        self.client.parse_search(response)
    }

    fn cards(&self, code: &str) -> Result<(Vec<WhiteCard>, Vec<BlackCard>), ApiError> {
        let request = self.client.build_cards(code)?;
        let response = self.fetch(request, Resource::Card)?;
        self.client.parse_cards(code, response)
    }
}

/// Non-blocking client over any [`AsyncTransport`].
#[derive(Debug, Clone)]
pub struct AsyncCardcast<T> {
    client: CardcastClient,
    transport: T,
}

impl<T: AsyncTransport> AsyncCardcast<T> {
    pub fn new(client: CardcastClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &CardcastClient {
        &self.client
    }

    async fn fetch(&self, request: HttpRequest, resource: Resource) -> Result<HttpResponse, ApiError> {
        self.transport
            .execute(&request)
            .await
            .map_err(|e| transport_failure(resource, e))
    }
}

impl<T: AsyncTransport> AsyncCardcastApi for AsyncCardcast<T> {
    async fn deck_info(&self, code: &str) -> Result<DeckInfo, ApiError> {
        let request = self.client.build_deck_info(code)?;
        let response = self.fetch(request, Resource::DeckInfo).await?;
        self.client.parse_deck_info(code, response)
    }

    async fn white_cards(&self, code: &str) -> Result<Vec<WhiteCard>, ApiError> {
        let request = self.client.build_cards(code)?;
        let response = self.fetch(request, Resource::Card).await?;
        self.client.parse_white_cards(code, response)
    }

    async fn black_cards(&self, code: &str) -> Result<Vec<BlackCard>, ApiError> {
        let request = self.client.build_cards(code)?;
        let response = self.fetch(request, Resource::Card).await?;
        self.client.parse_black_cards(code, response)
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchReturn, ApiError> {
        let request = self.client.build_search(query);
        let response = self.fetch(request, Resource::Search).await?;
        self.client.parse_search(response)
    }

    async fn cards(&self, code: &str) -> Result<(Vec<WhiteCard>, Vec<BlackCard>), ApiError> {
        let request = self.client.build_cards(code)?;
        let response = self.fetch(request, Resource::Card).await?;
        self.client.parse_cards(code, response)
    }
}
