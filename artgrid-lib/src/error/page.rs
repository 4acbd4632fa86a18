//! Page request errors

/// Errors raised by the page loader before any fetch is issued.
///
/// None of these change loader state: the visible batch, the loading flag and
/// the requested page all stay as they were.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// Page numbers start at 1.
    #[error("Page numbers start at 1")]
    ZeroPage,

    /// The requested page is past the last page of a known total.
    #[error("Page {requested} is out of range (1..={page_count})")]
    OutOfRange {
        /// The page that was asked for.
        requested: u32,
        /// Number of pages for the current total.
        page_count: u32,
    },

    /// The initial page-1 load was already issued.
    #[error("Loader is already initialized")]
    AlreadyInitialized,

    /// Page size must be positive.
    #[error("Page size must be greater than zero")]
    InvalidPageSize,
}
