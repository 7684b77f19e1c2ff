//! Error types

use thiserror::Error;

/// Errors surfaced by request execution
///
/// Every failure is returned as data; nothing in this crate panics. No
/// partial result accompanies an error.
#[derive(Debug, Error)]
pub enum Error {
    /// Request URL was empty
    #[error("url cannot be empty")]
    MissingUrl,
    /// Method outside the supported set (GET, POST, PUT, DELETE, PATCH)
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
    /// JSON body could not be serialized before send
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Request construction or network exchange failed
    #[error("transport error: {0}")]
    Transport(String),
    /// Response body could not be fully read
    #[error("read error: {0}")]
    Read(String),
    /// Strict JSON decode of the response failed
    #[error("decode error: {0}")]
    Decode(String),
}
