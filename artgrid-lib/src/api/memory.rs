//! In-memory listing backed by a vector

use async_trait::async_trait;

use super::Page;
use super::PageRequest;
use super::PageSource;
use crate::error::Error;
use crate::model::Record;

/// A listing held entirely in memory.
///
/// Useful for demos and tests. Pages are cut from the record vector exactly
/// as a server would cut them: page `n` holds records
/// `(n - 1) * page_size .. n * page_size`.
///
/// # Example
///
/// ```
/// use artgrid_lib::api::MemorySource;
/// use artgrid_lib::model::Record;
///
/// let source = MemorySource::new((1..=25i64).map(Record::new).collect());
/// assert_eq!(source.len(), 25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<Record>,
}

impl MemorySource {
    /// Creates a listing over `records`, in order.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Returns the total number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the listing is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cuts one page out of the listing.
    pub fn page(&self, request: PageRequest) -> Page {
        let size = request.page_size as usize;
        let start = (request.page.saturating_sub(1) as usize).saturating_mul(size);
        let records = self.records.iter().skip(start).take(size).cloned().collect();
        Page::new(records).with_total_count(self.records.len() as u64)
    }
}

#[async_trait]
impl PageSource for MemorySource {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page, Error> {
        Ok(self.page(request))
    }
}
