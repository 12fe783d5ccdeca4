//! Page builder
//!
//! Converts any [`Page`] response into a [`PageResult`].

use super::types::{Page, PageResult};
use crate::error::{Error, Result};

/// Convert a response into the uniform page representation
///
/// `None` stands for an absent response (an empty body, or JSON `null`) and
/// fails with [`Error::InvalidResponse`]. A response without an items field
/// fails with [`Error::MissingValueField`]. Items are moved, in order.
pub fn convert_to_page<P: Page>(response: Option<P>) -> Result<PageResult<P::Item>> {
    let response = response.ok_or(Error::InvalidResponse)?;

    let next_link = response
        .next_link()
        .filter(|link| !link.is_empty())
        .map(ToOwned::to_owned);

    let value = response.into_value().ok_or(Error::MissingValueField)?;

    Ok(PageResult::new(value, next_link))
}
