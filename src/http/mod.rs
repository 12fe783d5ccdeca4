//! HTTP client module
//!
//! reqwest-backed [`RequestAdapter`](crate::adapter::RequestAdapter) for
//! fetching pages.
//!
//! # Features
//!
//! - **Opt-in Retries**: Off by default, enabled per client or per request
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Request Options**: Timeout, retries, bearer token and `Accept` per page request

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
