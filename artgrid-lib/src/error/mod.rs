//! Error types

mod api;
mod page;

pub use api::*;
pub use page::*;

use std::time::Duration;

/// Crate-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The data source failed to deliver a page.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A page request was invalid for the loader's current state.
    #[error(transparent)]
    Page(#[from] PageError),

    /// The data source kept answering 429 after all retries were spent.
    #[error("Rate limited (retry after {retry_after:?})")]
    RateLimit {
        /// Value of the `Retry-After` header, if the server sent one.
        retry_after: Option<Duration>,
    },
}

impl Error {
    /// Returns `true` if this error came from an invalid page request
    /// rather than from the data source.
    pub fn is_page_error(&self) -> bool {
        matches!(self, Self::Page(_))
    }

    /// Returns the page error, if this is one.
    pub fn as_page_error(&self) -> Option<&PageError> {
        match self {
            Self::Page(e) => Some(e),
            _ => None,
        }
    }
}
