//! Traversal state machine
//!
//! An iterator is either `Active` on a page with a resume cursor, or
//! `Exhausted` once the last page has been fully delivered.

use crate::page::PageResult;

/// Position of a traversal
#[derive(Debug, Clone)]
pub(crate) enum IteratorState<T> {
    /// Delivering items of `page`, starting at `resume_index`
    ///
    /// `0 <= resume_index <= page.len()`; reset to 0 whenever `page` is
    /// replaced.
    Active {
        page: PageResult<T>,
        resume_index: usize,
    },
    /// No page left to deliver
    Exhausted,
}

impl<T> IteratorState<T> {
    pub(crate) fn start(page: PageResult<T>) -> Self {
        Self::Active {
            page,
            resume_index: 0,
        }
    }
}

/// Outcome of delivering one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Enumeration {
    /// The callback asked to pause
    Paused,
    /// Every remaining item was delivered (or none remained)
    Completed,
}

/// Deliver the items of `page` from `resume_index` on
///
/// Stops at the first `false` from the callback and records the position
/// after that item. On completion the cursor is left at the end of the
/// page, so a later pass delivers nothing twice.
pub(crate) fn enumerate<T, F>(
    page: &PageResult<T>,
    resume_index: &mut usize,
    callback: &mut F,
) -> Enumeration
where
    F: FnMut(&T) -> bool,
{
    while let Some(item) = page.get(*resume_index) {
        *resume_index += 1;
        if !callback(item) {
            return Enumeration::Paused;
        }
    }

    Enumeration::Completed
}
