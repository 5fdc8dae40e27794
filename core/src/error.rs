//! Error types for the Lockstep SDK.
//!
//! # Design
//! A non-2xx status is not an error: it comes back inside the
//! `LockstepResponse` envelope and the caller inspects `status`. `ApiError`
//! only covers the things that stop a call from producing an envelope at all:
//! a bad URL, an unusable header value, a failed transport, a body that could
//! not be encoded or decoded, or an upload file that could not be read.

use std::path::PathBuf;

/// Errors raised by `LockstepApi` before or during an HTTP exchange.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The base URL or a path joined onto it is not a valid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header value (usually from a hook or a credential) cannot be sent.
    #[error("invalid value for header {name}")]
    InvalidHeader { name: String },

    /// Connection, DNS, TLS or timeout failure from the HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A successful response body did not match the expected type.
    #[error("deserialization of HTTP {status} response failed: {source}")]
    Deserialization {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The file passed to an upload call could not be read.
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
