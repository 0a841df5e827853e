//! Error types for the Cardcast API client.
//!
//! # Design
//! The remote failures form an is-a chain: every not-found is also a
//! retrieval failure. Rather than one type per entity, both variants carry a
//! `Resource` tag naming what was being fetched, and the chain is exposed
//! through `is_not_found` / `is_retrieval`. Payload problems and rejected
//! deck codes sit outside that chain because the remote status is not at
//! fault.

use std::fmt;

/// What an operation was trying to retrieve when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    DeckInfo,
    Card,
    Search,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::DeckInfo => write!(f, "deck info"),
            Resource::Card => write!(f, "cards"),
            Resource::Search => write!(f, "search"),
        }
    }
}

/// Errors returned by every client operation and `from_json` factory.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The remote returned 404, or a payload whose `id` is `"not_found"`.
    NotFound { resource: Resource, message: String },

    /// Any other non-200 status. `status` is `None` when the transport
    /// failed before a status was received.
    Retrieval {
        resource: Resource,
        status: Option<u16>,
        message: String,
    },

    /// The body was not valid JSON, lacked a required field, or carried a
    /// value (timestamp, number) that could not be interpreted.
    DeserializationError(String),

    /// The deck code was rejected before any request was made.
    InvalidDeckCode(String),
}

impl ApiError {
    pub fn not_found(resource: Resource, message: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource,
            message: message.into(),
        }
    }

    pub fn retrieval(resource: Resource, status: Option<u16>, message: impl Into<String>) -> Self {
        ApiError::Retrieval {
            resource,
            status,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// True for every remote failure, including not-found.
    pub fn is_retrieval(&self) -> bool {
        matches!(self, ApiError::NotFound { .. } | ApiError::Retrieval { .. })
    }

    pub fn resource(&self) -> Option<Resource> {
        match self {
            ApiError::NotFound { resource, .. } | ApiError::Retrieval { resource, .. } => Some(*resource),
            _ => None,
        }
    }

    /// HTTP status that caused the failure, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Retrieval { status, .. } => *status,
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { message, .. } => write!(f, "{message}"),
            ApiError::Retrieval {
                status: Some(status),
                message,
                ..
            } => write!(f, "{message} (HTTP {status})"),
            ApiError::Retrieval { message, .. } => write!(f, "{message}"),
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::InvalidDeckCode(code) => write!(f, "invalid deck code: {code:?}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::DeserializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_also_retrieval() {
        let err = ApiError::not_found(Resource::DeckInfo, "Deck not found: ZZZZZ");
        assert!(err.is_not_found());
        assert!(err.is_retrieval());
        assert_eq!(err.resource(), Some(Resource::DeckInfo));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn retrieval_is_not_not_found() {
        let err = ApiError::retrieval(Resource::Search, Some(500), "Error searching decks");
        assert!(!err.is_not_found());
        assert!(err.is_retrieval());
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Error searching decks (HTTP 500)");
    }

    #[test]
    fn payload_errors_sit_outside_retrieval() {
        let err = ApiError::DeserializationError("missing field `code`".to_string());
        assert!(!err.is_retrieval());
        assert_eq!(err.resource(), None);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn not_found_displays_message_verbatim() {
        let err = ApiError::not_found(Resource::Card, "The deck you requested was not found.");
        assert_eq!(err.to_string(), "The deck you requested was not found.");
    }
}
