//! Request adapter module
//!
//! The seam between page traversal and the transport that performs requests.
//!
//! # Overview
//!
//! - [`RequestAdapter`] executes a [`RequestInformation`] and deserializes the
//!   body with a [`ResponseParser`]
//! - [`RequestOption`] carries per-request transport settings
//! - [`JsonResponseParser`] is the serde-based parser for JSON APIs
//!
//! [`crate::http::HttpClient`] is the reqwest-backed adapter.

mod parser;
mod types;

pub use parser::{JsonResponseParser, ResponseParser};
pub use types::{RequestInformation, RequestOption};

use crate::error::Result;
use async_trait::async_trait;

/// Transport that executes requests for subsequent pages
///
/// Implementations send the request as described, without adding retries of
/// their own beyond what the request options ask for, and hand the response
/// body to `parser`. `Ok(None)` means the response carried no body.
#[async_trait]
pub trait RequestAdapter: Send + Sync {
    /// Execute a request and parse its response body
    async fn send<P>(
        &self,
        request: RequestInformation,
        parser: &dyn ResponseParser<P>,
    ) -> Result<Option<P>>
    where
        P: Send + 'static;
}
