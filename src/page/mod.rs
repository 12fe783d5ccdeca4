//! Page module
//!
//! A page is one response of a link-paginated collection: an ordered list of
//! items plus an optional link to the next page.
//!
//! # Overview
//!
//! Every response type that can start or continue a traversal implements
//! [`Page`]. The builder ([`convert_to_page`]) turns such a response into the
//! uniform [`PageResult`] the iterator works on.
//!
//! Provided shapes:
//! - [`CollectionResponse`] for `{"value": [...], "@odata.nextLink": "..."}`
//! - `serde_json::Value`, read structurally by field name

mod builder;
mod types;

pub use builder::convert_to_page;
pub use types::{CollectionResponse, Page, PageResult, NEXT_LINK_FIELDS, VALUE_FIELD};
