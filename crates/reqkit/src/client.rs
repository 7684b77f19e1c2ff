//! Per-call transport construction and the request execution routine

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::redirect::{self, RedirectLog};
use crate::request::{Request, DEFAULT_TIMEOUT, DELETE, GET, PATCH, POST, PUT};
use crate::response::{DecodedBody, Response};

/// Execute a declarative request against a fresh transport client
///
/// The client, its timeout and its redirect policy live for this call only;
/// the connection is released once the body has been fully read, on every
/// exit path.
pub(crate) async fn execute(request: &Request) -> Result<Response, Error> {
    if request.url.is_empty() {
        return Err(Error::MissingUrl);
    }
    let method = parse_method(request.method.as_deref())?;

    // Serialize the JSON body up front so a bad body never reaches the wire.
    let json_body = if request.json.is_empty() {
        None
    } else {
        Some(serde_json::to_vec(&request.json).map_err(|e| Error::Serialization(e.to_string()))?)
    };

    let url = match build_query(&request.query)? {
        Some(query) => format!("{}?{}", request.url, query),
        None => request.url.clone(),
    };

    let redirects: RedirectLog = Arc::new(Mutex::new(Vec::new()));
    let policy = match &request.redirect {
        Some(custom) => custom.to_policy(),
        None => redirect::recording_policy(&redirects),
    };

    let client = reqwest::Client::builder()
        .timeout(resolve_timeout(request.timeout))
        .redirect(policy)
        .build()
        .map_err(|e| Error::Transport(e.to_string()))?;

    let form_body = method == Method::POST && !request.form.is_empty();
    let json_used = !form_body && method != Method::GET && json_body.is_some();

    let mut headers = header_map(&request.headers)?;
    if json_used {
        // Inserted after the caller's headers so the JSON content type wins
        // over a conflicting custom value.
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    apply_cookies(&mut headers, &request.cookies)?;

    let mut builder = client.request(method.clone(), url.as_str()).headers(headers);
    if form_body {
        builder = builder.form(&request.form);
    } else if json_used {
        builder = builder.body(json_body.unwrap_or_default());
    }

    tracing::debug!(method = %method, %url, "sending request");
    let response = builder
        .send()
        .await
        .map_err(|e| Error::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Read(e.to_string()))?;
    tracing::trace!(status, bytes = bytes.len(), "response read");

    let decoded = decode_body(&bytes, request.expect_json)?;
    let redirects = redirects.lock().map(|hops| hops.clone()).unwrap_or_default();

    Ok(Response {
        status,
        raw: bytes.to_vec(),
        decoded,
        redirects,
    })
}

/// Resolve the whole-exchange timeout; a zero timeout counts as unset,
/// like the rest of the optional fields
fn resolve_timeout(timeout: Option<Duration>) -> Duration {
    timeout
        .filter(|timeout| !timeout.is_zero())
        .unwrap_or(DEFAULT_TIMEOUT)
}

/// Resolve a method label; labels are exact, so `"get"` is rejected
fn parse_method(label: Option<&str>) -> Result<Method, Error> {
    match label.unwrap_or_default() {
        "" | GET => Ok(Method::GET),
        POST => Ok(Method::POST),
        PUT => Ok(Method::PUT),
        DELETE => Ok(Method::DELETE),
        PATCH => Ok(Method::PATCH),
        other => Err(Error::UnsupportedMethod(other.to_string())),
    }
}

/// Build the `key=value&...` query string, `None` when there is nothing
/// to append; pair order follows map iteration and is not part of the
/// contract
fn build_query(params: &HashMap<String, String>) -> Result<Option<String>, Error> {
    if params.is_empty() {
        return Ok(None);
    }
    let query =
        serde_urlencoded::to_string(params).map_err(|e| Error::Serialization(e.to_string()))?;
    Ok(Some(query))
}

/// Collect caller headers into a `HeaderMap`, one entry per key
fn header_map(entries: &HashMap<String, String>) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::with_capacity(entries.len());
    for (name, value) in entries {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::Transport(format!("invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::Transport(format!("invalid header value for {name}: {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Fold cookies into the `Cookie` header, appending to a caller-supplied
/// value when one is present
fn apply_cookies(headers: &mut HeaderMap, cookies: &HashMap<String, String>) -> Result<(), Error> {
    if cookies.is_empty() {
        return Ok(());
    }
    let mut value = cookies
        .iter()
        .map(|(name, content)| format!("{name}={content}"))
        .collect::<Vec<_>>()
        .join("; ");
    if let Some(existing) = headers.get(COOKIE).and_then(|v| v.to_str().ok()) {
        value = format!("{existing}; {value}");
    }
    let value = HeaderValue::from_str(&value)
        .map_err(|e| Error::Transport(format!("invalid cookie value: {e}")))?;
    headers.insert(COOKIE, value);
    Ok(())
}

/// Normalize the response body
///
/// With `expect_json` the body must be a JSON object; otherwise a body
/// that is not one falls back to text and never errors.
fn decode_body(bytes: &[u8], expect_json: bool) -> Result<DecodedBody, Error> {
    if expect_json {
        let object: Map<String, Value> =
            serde_json::from_slice(bytes).map_err(|e| Error::Decode(e.to_string()))?;
        return Ok(DecodedBody::Json(object));
    }
    match serde_json::from_slice::<Map<String, Value>>(bytes) {
        Ok(object) => Ok(DecodedBody::Json(object)),
        Err(_) => Ok(DecodedBody::Text(
            String::from_utf8_lossy(bytes).into_owned(),
        )),
    }
}
