//! Remote listing access
//!
//! The loader only ever talks to a [`PageSource`]. [`ArticClient`](crate::ArticClient)
//! is the HTTP implementation; tests plug in scripted sources.

mod artic;
mod memory;
mod page;

pub use memory::*;
pub use page::*;

use async_trait::async_trait;

use crate::error::Error;

/// A request for one page of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    /// Number of records per page.
    pub page_size: u32,
}

impl PageRequest {
    /// Creates a new page request.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }
}

/// A remote, paged record listing.
///
/// Implementations fetch exactly the requested page. They must not retain
/// state between calls that would change which records a page contains.
///
/// # Example
///
/// ```ignore
/// use artgrid_lib::api::{Page, PageRequest, PageSource};
///
/// struct Fixed(Vec<Record>);
///
/// #[async_trait]
/// impl PageSource for Fixed {
///     async fn fetch_page(&self, request: PageRequest) -> Result<Page, Error> {
///         let start = ((request.page - 1) * request.page_size) as usize;
///         let records = self.0.iter().skip(start).take(request.page_size as usize).cloned();
///         Ok(Page::new(records.collect()).with_total_count(self.0.len() as u64))
///     }
/// }
/// ```
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches one page of records along with the listing's total size.
    async fn fetch_page(&self, request: PageRequest) -> Result<Page, Error>;
}
