//! Response parsers
//!
//! A parser builds the typed page response out of a raw body. It is chosen
//! once per traversal and must match the schema of the paginated resource.

use crate::error::Result;
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;

/// Turns a raw response body into a typed response
pub trait ResponseParser<P>: Send + Sync {
    /// Parse a body; `Ok(None)` when the body holds no response
    fn parse(&self, body: &[u8]) -> Result<Option<P>>;
}

/// JSON parser backed by serde
///
/// An empty (or whitespace-only) body and a JSON `null` both parse to `None`.
pub struct JsonResponseParser<P> {
    _marker: PhantomData<fn() -> P>,
}

impl<P> JsonResponseParser<P> {
    /// Create a JSON parser for `P`
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<P> Default for JsonResponseParser<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for JsonResponseParser<P> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for JsonResponseParser<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonResponseParser")
            .field("target", &std::any::type_name::<P>())
            .finish()
    }
}

impl<P: DeserializeOwned> ResponseParser<P> for JsonResponseParser<P> {
    fn parse(&self, body: &[u8]) -> Result<Option<P>> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(serde_json::from_slice::<Option<P>>(body)?)
    }
}
