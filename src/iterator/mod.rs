//! Page iterator module
//!
//! Callback-driven traversal over every item of a link-paginated collection.
//!
//! # Overview
//!
//! A [`PageIterator`] starts from a first page the caller already fetched.
//! [`PageIterator::iterate`] hands each item to a callback, page after page,
//! fetching the next page through the [`RequestAdapter`] only when the
//! current one is used up. The callback pauses the traversal by returning
//! `false`; the next call to `iterate` resumes right after the paused item.
//!
//! ```rust,ignore
//! use linkpager::{CollectionResponse, HttpClient, JsonResponseParser, PageIterator};
//! use std::sync::Arc;
//!
//! let client = Arc::new(HttpClient::new());
//! let first: Option<CollectionResponse<User>> = client.get_json(url).await?;
//! let mut users = PageIterator::new(first, client, JsonResponseParser::new())?;
//!
//! users
//!     .iterate(|user| {
//!         println!("{}", user.display_name);
//!         true
//!     })
//!     .await?;
//! ```

mod state;

use self::state::{enumerate, Enumeration, IteratorState};
use crate::adapter::{RequestAdapter, RequestInformation, RequestOption, ResponseParser};
use crate::error::{Error, Result};
use crate::page::{convert_to_page, Page, PageResult};
use crate::types::StringMap;
use futures::stream::{self, Stream};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Pausable iterator over the items of a paginated collection
pub struct PageIterator<P: Page, A> {
    /// Current page and resume cursor
    state: IteratorState<P::Item>,
    /// Transport for subsequent pages
    adapter: Arc<A>,
    /// Builds typed responses for subsequent pages
    parser: Box<dyn ResponseParser<P>>,
    /// Headers sent with subsequent page requests
    headers: StringMap,
    /// Options sent with subsequent page requests
    options: Vec<RequestOption>,
    /// Base for relative next links
    base_url: Option<Url>,
    /// Number of pages fetched so far (the initial page excluded)
    pages_fetched: usize,
}

impl<P, A> PageIterator<P, A>
where
    P: Page + Send + 'static,
    A: RequestAdapter,
{
    /// Create an iterator from the first page of a collection
    ///
    /// `parser` builds the typed response of every following page and must
    /// match the collection's response schema. No request is made here.
    pub fn new(
        initial_response: Option<P>,
        adapter: Arc<A>,
        parser: impl ResponseParser<P> + 'static,
    ) -> Result<Self> {
        let page = convert_to_page(initial_response)?;

        Ok(Self {
            state: IteratorState::start(page),
            adapter,
            parser: Box::new(parser),
            headers: StringMap::new(),
            options: Vec::new(),
            base_url: None,
            pages_fetched: 0,
        })
    }

    /// Resolve relative next links of the initial page against `url`
    ///
    /// Usually the URL the initial page was fetched from. Links of fetched
    /// pages resolve against the URL of the page that carried them.
    #[must_use]
    pub fn with_base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Replace the headers sent with subsequent page requests
    ///
    /// The request for the initial page is not affected.
    pub fn set_headers(&mut self, headers: StringMap) {
        self.headers = headers;
    }

    /// Replace the options sent with subsequent page requests
    pub fn set_request_options(&mut self, options: Vec<RequestOption>) {
        self.options = options;
    }

    /// Headers sent with subsequent page requests
    pub fn headers(&self) -> &StringMap {
        &self.headers
    }

    /// Options sent with subsequent page requests
    pub fn request_options(&self) -> &[RequestOption] {
        &self.options
    }

    /// Deliver items to `callback` until it returns `false` or every page
    /// has been traversed
    ///
    /// Returning `false` pauses: this call returns `Ok(())` and the next
    /// call resumes with the item after the one that paused. A failed page
    /// fetch leaves the iterator where it was, so calling `iterate` again
    /// repeats that fetch without delivering any item twice.
    pub async fn iterate<F>(&mut self, mut callback: F) -> Result<()>
    where
        F: FnMut(&P::Item) -> bool,
    {
        loop {
            let IteratorState::Active { page, resume_index } = &mut self.state else {
                return Ok(());
            };

            if enumerate(page, resume_index, &mut callback) == Enumeration::Paused {
                return Ok(());
            }

            let Some(link) = page.next_link().map(ToOwned::to_owned) else {
                debug!(pages_fetched = self.pages_fetched, "Reached last page");
                self.state = IteratorState::Exhausted;
                return Ok(());
            };

            let (next_page, url) = self.fetch_next_page(&link).await?;

            self.state = IteratorState::start(next_page);
            self.base_url = Some(url);
            self.pages_fetched += 1;
        }
    }

    /// Check if another page can be fetched
    pub fn has_next(&self) -> bool {
        self.current_page()
            .is_some_and(|page| page.next_link().is_some())
    }

    /// Page currently being delivered, `None` once exhausted
    pub fn current_page(&self) -> Option<&PageResult<P::Item>> {
        match &self.state {
            IteratorState::Active { page, .. } => Some(page),
            IteratorState::Exhausted => None,
        }
    }

    /// Index in the current page of the next item to deliver
    pub fn resume_index(&self) -> usize {
        match &self.state {
            IteratorState::Active { resume_index, .. } => *resume_index,
            IteratorState::Exhausted => 0,
        }
    }

    /// Check if every item of every page has been delivered
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, IteratorState::Exhausted)
    }

    /// Number of pages fetched so far, the initial page excluded
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Turn the iterator into a stream of owned items
    ///
    /// Each item is pulled with a single pausing `iterate` call. The stream
    /// ends after the last item or after yielding the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<P::Item>>
    where
        P::Item: Clone,
    {
        stream::unfold(Some(self), |iterator| async move {
            let Some(mut iterator) = iterator else {
                return None;
            };
            let mut next = None;

            let result = iterator
                .iterate(|item| {
                    next = Some(item.clone());
                    false
                })
                .await;

            match result {
                Ok(()) => next.map(|item| (Ok(item), Some(iterator))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    /// Fetch and build the page behind `link`
    ///
    /// Returns the page together with the URL it was fetched from. Does not
    /// touch the iterator state.
    async fn fetch_next_page(&self, link: &str) -> Result<(PageResult<P::Item>, Url)> {
        let url = self.resolve_next_link(link)?;

        debug!(url = %url, "Fetching next page");

        let request = RequestInformation::get(url.clone())
            .with_headers(self.headers.clone())
            .with_options(self.options.iter().cloned());

        let response = self
            .adapter
            .send(request, &*self.parser)
            .await
            .map_err(|e| Error::fetch_failed(url.as_str(), e))?;

        let page = convert_to_page(response)?;
        Ok((page, url))
    }

    /// Parse a next link, relative to the base URL when one is known
    fn resolve_next_link(&self, link: &str) -> Result<Url> {
        let parsed = match &self.base_url {
            Some(base) => base.join(link),
            None => Url::parse(link),
        };
        parsed.map_err(|e| Error::invalid_next_link(link, e))
    }
}

impl<P: Page, A> fmt::Debug for PageIterator<P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (page_len, resume_index, next_link) = match &self.state {
            IteratorState::Active { page, resume_index } => {
                (Some(page.len()), *resume_index, page.next_link())
            }
            IteratorState::Exhausted => (None, 0, None),
        };

        f.debug_struct("PageIterator")
            .field("page_len", &page_len)
            .field("resume_index", &resume_index)
            .field("next_link", &next_link)
            .field("headers", &self.headers)
            .field("options", &self.options)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}
