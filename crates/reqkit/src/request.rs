//! Declarative request description

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::client;
use crate::error::Error;
use crate::redirect::RedirectPolicy;
use crate::response::Response;

/// Method label for GET requests
pub const GET: &str = "GET";
/// Method label for POST requests
pub const POST: &str = "POST";
/// Method label for PUT requests
pub const PUT: &str = "PUT";
/// Method label for DELETE requests
pub const DELETE: &str = "DELETE";
/// Method label for PATCH requests
pub const PATCH: &str = "PATCH";

/// Timeout applied when a request does not set its own
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Declarative description of a single HTTP exchange
///
/// Every field except `url` is optional; `Request::default()` describes a
/// bare GET. The description is not mutated by execution, so one value can
/// be sent repeatedly.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Target URL; must be non-empty
    pub url: String,
    /// Method label, one of [`GET`], [`POST`], [`PUT`], [`DELETE`] or
    /// [`PATCH`]; `None` or empty defaults to GET, anything else fails
    /// validation
    pub method: Option<String>,
    /// Query parameters, appended to the URL as a `?key=value&...` string
    pub query: HashMap<String, String>,
    /// Request headers, one per entry
    pub headers: HashMap<String, String>,
    /// Request cookies, folded into the `Cookie` header
    pub cookies: HashMap<String, String>,
    /// Form fields; a POST with form data sends them urlencoded and
    /// ignores `json`
    pub form: HashMap<String, String>,
    /// JSON body, sent on POST (when `form` is empty), PUT, DELETE and
    /// PATCH; forces `Content-Type: application/json` when non-empty
    pub json: Map<String, Value>,
    /// Whole-exchange timeout; [`DEFAULT_TIMEOUT`] when unset or zero
    pub timeout: Option<Duration>,
    /// Require the body to decode as a JSON object; a body that does not
    /// becomes [`Error::Decode`] instead of the text fallback
    pub expect_json: bool,
    /// Replaces default redirect handling entirely when set; no hops are
    /// recorded and the hook's decisions are authoritative
    pub redirect: Option<RedirectPolicy>,
}

impl Request {
    /// Execute the request
    ///
    /// Builds a fresh transport client for this call, sends the request,
    /// reads the whole body and normalizes it. Every failure comes back as
    /// an [`Error`].
    pub async fn send(&self) -> Result<Response, Error> {
        client::execute(self).await
    }

    /// Execute the request and strictly decode the body into `T`
    ///
    /// The decode runs against the raw bytes regardless of how the default
    /// normalization went; a mismatch fails the whole call with
    /// [`Error::Decode`].
    pub async fn send_as<T: DeserializeOwned>(&self) -> Result<(Response, T), Error> {
        let response = client::execute(self).await?;
        let parsed = response.json()?;
        Ok((response, parsed))
    }
}
