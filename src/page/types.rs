//! Page types and traits
//!
//! Defines the page capability every paginated response provides and the
//! uniform page representation the iterator consumes.

use serde::{Deserialize, Serialize};
use crate::types::JsonValue;

/// Field holding the items of a page
pub const VALUE_FIELD: &str = "value";

/// Fields that may hold the link to the next page, in lookup order
pub const NEXT_LINK_FIELDS: [&str; 2] = ["@odata.nextLink", "nextLink"];

/// Capability of a response that is one page of a paginated collection
///
/// Each resource response type implements this to be traversable. `value`
/// returning `None` means the response has no items field at all, which is
/// different from an empty page.
pub trait Page {
    /// Item type of the collection
    type Item;

    /// Items on this page, if the response has an items field
    fn value(&self) -> Option<&[Self::Item]>;

    /// Link to the next page, if any
    fn next_link(&self) -> Option<&str>;

    /// Take ownership of the items on this page
    fn into_value(self) -> Option<Vec<Self::Item>>;
}

/// Uniform page produced by the page builder
///
/// Immutable once built. Items are never absent; a page without items is
/// an empty `Vec`. An empty next link is normalized to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    value: Vec<T>,
    next_link: Option<String>,
}

impl<T> PageResult<T> {
    pub(crate) fn new(value: Vec<T>, next_link: Option<String>) -> Self {
        Self { value, next_link }
    }

    /// Items on this page
    pub fn items(&self) -> &[T] {
        &self.value
    }

    /// Item at `index`, if present
    pub fn get(&self, index: usize) -> Option<&T> {
        self.value.get(index)
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Check if the page holds no items
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Link to the next page
    pub fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    /// Check if this is the last page
    pub fn is_last(&self) -> bool {
        self.next_link.is_none()
    }
}

impl<T> Page for PageResult<T> {
    type Item = T;

    fn value(&self) -> Option<&[T]> {
        Some(&self.value)
    }

    fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    fn into_value(self) -> Option<Vec<T>> {
        Some(self.value)
    }
}

// ============================================================================
// Collection Response
// ============================================================================

/// Typed collection response in the common OData shape
///
/// ```json
/// { "value": [ ... ], "@odata.nextLink": "https://..." }
/// ```
///
/// `nextLink` without the annotation prefix is accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionResponse<T> {
    /// Items of this page
    pub value: Option<Vec<T>>,

    /// Link to the next page
    #[serde(
        rename = "@odata.nextLink",
        alias = "nextLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_link: Option<String>,
}

impl<T> CollectionResponse<T> {
    /// Create a response with items and an optional next link
    pub fn new(value: Vec<T>, next_link: Option<String>) -> Self {
        Self {
            value: Some(value),
            next_link,
        }
    }

    /// Create the last page of a collection
    pub fn last(value: Vec<T>) -> Self {
        Self::new(value, None)
    }
}

impl<T> Page for CollectionResponse<T> {
    type Item = T;

    fn value(&self) -> Option<&[T]> {
        self.value.as_deref()
    }

    fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    fn into_value(self) -> Option<Vec<T>> {
        self.value
    }
}

// ============================================================================
// Dynamic JSON pages
// ============================================================================

/// Structural page view over an arbitrary JSON document
///
/// The items are the `value` member when it is an array; anything else
/// (absent, `null`, another type, or a non-object document) counts as a
/// missing items field. The next link is the first string found under
/// [`NEXT_LINK_FIELDS`].
impl Page for JsonValue {
    type Item = JsonValue;

    fn value(&self) -> Option<&[JsonValue]> {
        self.get(VALUE_FIELD)
            .and_then(JsonValue::as_array)
            .map(Vec::as_slice)
    }

    fn next_link(&self) -> Option<&str> {
        NEXT_LINK_FIELDS
            .iter()
            .find_map(|field| self.get(field).and_then(JsonValue::as_str))
    }

    fn into_value(self) -> Option<Vec<JsonValue>> {
        match self {
            JsonValue::Object(mut map) => match map.remove(VALUE_FIELD) {
                Some(JsonValue::Array(items)) => Some(items),
                _ => None,
            },
            _ => None,
        }
    }
}
