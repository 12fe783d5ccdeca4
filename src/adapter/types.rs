//! Request description types

use crate::types::{Method, StringMap};
use std::time::Duration;
use url::Url;

/// Transport setting applied to a single request
///
/// Options form an ordered sequence; when the same kind appears more than
/// once the last one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOption {
    /// Override the request timeout
    Timeout(Duration),
    /// Let the transport retry this request up to n times
    MaxRetries(u32),
    /// Send `Authorization: Bearer <token>`
    BearerToken(String),
    /// Override the `Accept` header
    Accept(String),
}

/// Description of a request to execute
#[derive(Debug, Clone)]
pub struct RequestInformation {
    /// HTTP method
    pub method: Method,
    /// Target URL
    pub url: Url,
    /// Request headers
    pub headers: StringMap,
    /// Transport options, in order
    pub options: Vec<RequestOption>,
}

impl RequestInformation {
    /// Create a GET request for a URL
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: StringMap::new(),
            options: Vec::new(),
        }
    }

    /// Set the request headers
    #[must_use]
    pub fn with_headers(mut self, headers: StringMap) -> Self {
        self.headers = headers;
        self
    }

    /// Append request options
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = RequestOption>) -> Self {
        self.options.extend(options);
        self
    }

    /// Effective timeout override
    pub fn timeout(&self) -> Option<Duration> {
        self.options.iter().rev().find_map(|option| match option {
            RequestOption::Timeout(timeout) => Some(*timeout),
            _ => None,
        })
    }

    /// Effective retry override
    pub fn max_retries(&self) -> Option<u32> {
        self.options.iter().rev().find_map(|option| match option {
            RequestOption::MaxRetries(retries) => Some(*retries),
            _ => None,
        })
    }

    /// Effective bearer token
    pub fn bearer_token(&self) -> Option<&str> {
        self.options.iter().rev().find_map(|option| match option {
            RequestOption::BearerToken(token) => Some(token.as_str()),
            _ => None,
        })
    }

    /// Effective `Accept` header override
    pub fn accept(&self) -> Option<&str> {
        self.options.iter().rev().find_map(|option| match option {
            RequestOption::Accept(accept) => Some(accept.as_str()),
            _ => None,
        })
    }
}
