//! Ready-to-use Cardcast API clients.
//!
//! # Overview
//! `cardcast-core` maps requests and responses; this crate plugs real HTTP
//! into it. `BlockingClient` performs each call on the calling thread via
//! `ureq`. `AsyncClient` suspends at each call via `reqwest` and must be
//! polled from a tokio runtime.
//!
//! ```no_run
//! use cardcast::{blocking_client, CardcastApi, ClientConfig};
//!
//! let api = blocking_client(ClientConfig::default());
//! let deck = api.deck("JJDFG")?;
//! println!("{} has {} black cards", deck.info.name, deck.blackcards.len());
//! # Ok::<(), cardcast::ApiError>(())
//! ```

pub mod blocking;
pub mod nonblocking;

pub use blocking::{blocking_client, BlockingClient, UreqTransport};
pub use nonblocking::{async_client, AsyncClient, ReqwestTransport};

pub use cardcast_core::*;
