//! The operations every backend offers.
//!
//! # Design
//! Backends implement four primitives: `deck_info`, `white_cards`,
//! `black_cards` and `search`. `cards`, `deck` and search pagination are
//! written once here against those primitives. A backend may still override
//! `cards` when it can fetch both colours in one round-trip.

use std::iter::FusedIterator;

use futures::stream::{self, Stream};

use crate::card::{BlackCard, WhiteCard};
use crate::deck::{Deck, DeckInfo};
use crate::error::ApiError;
use crate::search::{SearchQuery, SearchReturn};

/// Blocking client operations.
pub trait CardcastApi {
    fn deck_info(&self, code: &str) -> Result<DeckInfo, ApiError>;

    fn white_cards(&self, code: &str) -> Result<Vec<WhiteCard>, ApiError>;

    fn black_cards(&self, code: &str) -> Result<Vec<BlackCard>, ApiError>;

    fn search(&self, query: &SearchQuery) -> Result<SearchReturn, ApiError>;

    /// White and black cards of a deck, in that order.
    fn cards(&self, code: &str) -> Result<(Vec<WhiteCard>, Vec<BlackCard>), ApiError> {
        Ok((self.white_cards(code)?, self.black_cards(code)?))
    }

    fn deck(&self, code: &str) -> Result<Deck, ApiError> {
        let info = self.deck_info(code)?;
        let (whitecards, blackcards) = self.cards(code)?;
        Ok(Deck::new(info, blackcards, whitecards))
    }

    /// Lazily page through every result of `query`, starting at its offset.
    fn search_iter(&self, query: SearchQuery) -> SearchPages<'_, Self>
    where
        Self: Sized,
    {
        SearchPages::new(self, query)
    }
}

/// Iterator over search pages, see [`CardcastApi::search_iter`].
///
/// Each page is requested only when the previous one has been consumed.
/// The first empty page ends iteration without being yielded; an error is
/// yielded once and also ends it, as does a page whose `count` would push
/// the offset past `u32::MAX`. Nothing guards against the remote result
/// set changing between pages.
#[derive(Debug)]
pub struct SearchPages<'a, C: ?Sized> {
    api: &'a C,
    query: SearchQuery,
    done: bool,
}

impl<'a, C: CardcastApi + ?Sized> SearchPages<'a, C> {
    pub fn new(api: &'a C, query: SearchQuery) -> Self {
        Self {
            api,
            query,
            done: false,
        }
    }
}

impl<C: CardcastApi + ?Sized> Iterator for SearchPages<'_, C> {
    type Item = Result<SearchReturn, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.api.search(&self.query) {
            Ok(page) if page.count == 0 => {
                self.done = true;
                None
            }
            Ok(page) => {
                match self.query.offset.checked_add(page.count) {
                    Some(next) => self.query.offset = next,
                    None => self.done = true,
                }
                Some(Ok(page))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<C: CardcastApi + ?Sized> FusedIterator for SearchPages<'_, C> {}

/// Non-blocking client operations. Every method is a suspension point.
#[allow(async_fn_in_trait)]
pub trait AsyncCardcastApi {
    async fn deck_info(&self, code: &str) -> Result<DeckInfo, ApiError>;

    async fn white_cards(&self, code: &str) -> Result<Vec<WhiteCard>, ApiError>;

    async fn black_cards(&self, code: &str) -> Result<Vec<BlackCard>, ApiError>;

    async fn search(&self, query: &SearchQuery) -> Result<SearchReturn, ApiError>;

    async fn cards(&self, code: &str) -> Result<(Vec<WhiteCard>, Vec<BlackCard>), ApiError> {
        Ok((self.white_cards(code).await?, self.black_cards(code).await?))
    }

    async fn deck(&self, code: &str) -> Result<Deck, ApiError> {
        let info = self.deck_info(code).await?;
        let (whitecards, blackcards) = self.cards(code).await?;
        Ok(Deck::new(info, blackcards, whitecards))
    }

    /// Stream of search pages with the same termination rules as
    /// [`SearchPages`]. Each page's request is awaited before the page is
    /// produced.
    fn search_stream(&self, query: SearchQuery) -> impl Stream<Item = Result<SearchReturn, ApiError>> + '_ {
        stream::unfold(Some(query), move |state| async move {
            let query = state?;
            match self.search(&query).await {
                Ok(page) if page.count == 0 => None,
                Ok(page) => {
                    let next = query
                        .offset
                        .checked_add(page.count)
                        .map(|offset| SearchQuery { offset, ..query });
                    Some((Ok(page), next))
                }
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}
