//! Client error types and the panel's structured error payload.
//!
//! [`ClientError`] is the central error type for the SDK. REST wrappers map
//! HTTP status codes onto it through a single shared helper; the WebSocket
//! session uses the connection-oriented variants.

use serde::Deserialize;

/// Structured JSON error payload returned by the panel.
///
/// All non-2xx responses that are neither 404 nor 500 carry this shape:
/// ```json
/// {
///   "errors": [
///     {
///       "code": "ValidationException",
///       "status": "422",
///       "detail": "The given data was invalid."
///     }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct ApiErrors {
    /// Error entries; the first entry's `detail` is surfaced to the caller.
    pub errors: Vec<ApiErrorDetail>,
}

/// A single error entry from the panel's error payload.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code (e.g. `ValidationException`).
    pub code: String,
    /// HTTP status the panel associates with this entry, as a string.
    pub status: String,
    /// Human-readable detail message.
    pub detail: String,
}

/// Client-side error enum for every SDK operation.
///
/// The REST status mapping is uniform across all wrappers:
///
/// | HTTP status | Variant |
/// |-------------|----------------|
/// | 404 | [`ClientError::NotFound`] |
/// | 500 | [`ClientError::ServerError`] |
/// | other non-2xx | [`ClientError::Remote`] with the first error detail |
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The requested resource does not exist on the panel (404).
    #[error("the requested resource could not be found")]
    NotFound,

    /// The panel reported an internal server error (500).
    #[error("an internal server error occurred on the panel")]
    ServerError,

    /// Any other non-2xx status; carries the panel's first error detail.
    #[error("panel error: {detail}")]
    Remote {
        /// Detail string from the first entry of the error payload.
        detail: String,
    },

    /// Fetching a WebSocket session token from the panel failed.
    #[error("could not obtain a websocket session token")]
    TokenUnavailable(#[source] Box<ClientError>),

    /// A send was attempted with no live WebSocket connection.
    #[error("no live websocket connection")]
    NotConnected,

    /// HTTP transport failure (connect, TLS, body read, JSON decode).
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// WebSocket transport failure.
    #[error("websocket transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// A frame could not be serialized for the wire.
    #[error("frame serialization error: {0}")]
    Frame(#[from] serde_json::Error),
}

impl ClientError {
    /// Builds a [`ClientError::Remote`] from a parsed error payload, taking
    /// the detail of the first entry.
    #[must_use]
    pub fn from_api(payload: ApiErrors) -> Self {
        let detail = payload
            .errors
            .into_iter()
            .next()
            .map_or_else(|| "an unknown error occurred".to_string(), |e| e.detail);
        Self::Remote { detail }
    }

    /// Wraps a token-provider failure as [`ClientError::TokenUnavailable`].
    #[must_use]
    pub fn token_unavailable(source: Self) -> Self {
        Self::TokenUnavailable(Box::new(source))
    }
}
