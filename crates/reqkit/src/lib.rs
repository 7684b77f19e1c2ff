//! Declarative HTTP request execution
//!
//! This crate is a thin convenience layer over reqwest: a request is
//! described as plain data ([`Request`]), executed in one call, and the
//! response is normalized into either a decoded JSON object or a raw-text
//! fallback ([`DecodedBody`]), with the chain of redirect URLs recorded
//! along the way.
//!
//! # Example
//!
//! ```no_run
//! use reqkit::{DecodedBody, Request};
//!
//! async fn example() -> Result<(), reqkit::Error> {
//!     let response = Request {
//!         url: "https://api.example.com/data".to_string(),
//!         ..Request::default()
//!     }
//!     .send()
//!     .await?;
//!
//!     match response.decoded {
//!         DecodedBody::Json(object) => println!("got {} fields", object.len()),
//!         DecodedBody::Text(text) => println!("got text: {text}"),
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod redirect;
mod request;
mod response;
pub mod typegen;

pub use error::Error;
pub use redirect::RedirectPolicy;
pub use request::{Request, DEFAULT_TIMEOUT, DELETE, GET, PATCH, POST, PUT};
pub use response::{DecodedBody, Response};
