//! Page type for listing responses.

use crate::model::Record;
use crate::model::RecordId;

/// One page of listing results.
///
/// Carries the records of the page in source order together with the total
/// size of the remote listing, which the loader needs to bound page numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    records: Vec<Record>,
    /// Total record count of the whole listing.
    total_count: u64,
}

impl Page {
    /// Creates a new page with records and a zero total.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            total_count: 0,
        }
    }

    /// Sets the total record count.
    pub fn with_total_count(mut self, count: u64) -> Self {
        self.total_count = count;
        self
    }

    /// Returns a reference to the records in this page.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Returns the total record count of the listing.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns the ids of the records in this page, in order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(Record::id).collect()
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
