//! Normalized response types

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::Error;

/// Normalized response body
///
/// The body is decoded as a JSON object when possible; anything else is
/// kept as literal text. The two branches are explicit so callers never
/// have to sniff content types.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBody {
    /// Body parsed as a JSON object
    Json(Map<String, Value>),
    /// Body was not a JSON object; kept as text
    Text(String),
}

impl DecodedBody {
    /// The parsed object, if the body decoded as JSON
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            DecodedBody::Json(object) => Some(object),
            DecodedBody::Text(_) => None,
        }
    }

    /// The literal body text, if the body did not decode as JSON
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DecodedBody::Json(_) => None,
            DecodedBody::Text(text) => Some(text),
        }
    }
}

/// Result of a successfully executed request
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status of the final response
    pub status: u16,
    /// Raw response bytes
    pub raw: Vec<u8>,
    /// Normalized body
    pub decoded: DecodedBody,
    /// URLs visited while following redirects, in hop order; empty unless
    /// the default policy followed at least one redirect
    pub redirects: Vec<String>,
}

impl Response {
    /// Check if the response status is a success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response status is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the response status is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// The raw body as text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.raw).into_owned()
    }

    /// Strictly decode the raw body into `T`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.raw).map_err(|e| Error::Decode(e.to_string()))
    }
}
