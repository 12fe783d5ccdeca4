// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # linkpager
//!
//! Pull-based, pausable traversal of link-paginated HTTP collections.
//!
//! ## Features
//!
//! - **Lazy Paging**: The next page is fetched only once the current one is used up
//! - **Pause & Resume**: The callback stops the traversal; the next call picks up right after
//! - **Any Response Shape**: Typed responses implement [`Page`]; raw JSON works out of the box
//! - **Pluggable Transport**: Anything implementing [`RequestAdapter`], reqwest included
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use linkpager::{CollectionResponse, HttpClient, JsonResponseParser, PageIterator, Result};
//! use std::sync::Arc;
//!
//! #[derive(serde::Deserialize)]
//! struct User {
//!     id: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Arc::new(HttpClient::new());
//!     let first: Option<CollectionResponse<User>> =
//!         client.get_json("https://graph.example.com/v1.0/users").await?;
//!
//!     let mut users = PageIterator::new(first, client, JsonResponseParser::new())?;
//!
//!     // Stop after the first 100 users
//!     let mut seen = 0;
//!     users
//!         .iterate(|user| {
//!             println!("{}", user.id);
//!             seen += 1;
//!             seen < 100
//!         })
//!         .await?;
//!
//!     // ...and carry on later from user 101
//!     users.iterate(|_| true).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      PageIterator                        │
//! │  iterate(callback)   set_headers()   set_request_options()│
//! └──────────────────────────────────────────────────────────┘
//!          │                     │                    │
//! ┌────────┴───────┬─────────────┴──────┬─────────────┴──────┐
//! │     Page       │   Page builder     │  RequestAdapter    │
//! ├────────────────┼────────────────────┼────────────────────┤
//! │ value()        │ convert_to_page    │ HttpClient         │
//! │ next_link()    │ InvalidResponse    │ RequestOption      │
//! │ Collection/JSON│ MissingValueField  │ ResponseParser     │
//! └────────────────┴────────────────────┴────────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Page capability and page builder
pub mod page;

/// Request adapter seam
pub mod adapter;

/// reqwest-backed request adapter
pub mod http;

/// Pausable page iterator
pub mod iterator;

/// Traversal configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

pub use adapter::{
    JsonResponseParser, RequestAdapter, RequestInformation, RequestOption, ResponseParser,
};
pub use http::{HttpClient, HttpClientConfig};
pub use iterator::PageIterator;
pub use page::{convert_to_page, CollectionResponse, Page, PageResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
