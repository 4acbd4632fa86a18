//! The batch of records currently on screen

use chrono::DateTime;
use chrono::Utc;

use crate::model::Record;
use crate::model::RecordId;

/// The records of the currently loaded page plus listing metadata.
///
/// A batch is replaced wholesale by each applied load; records from
/// different fetches are never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleBatch {
    /// Page these records belong to, `0` before the first successful load.
    pub(crate) page: u32,
    pub(crate) records: Vec<Record>,
    /// Size of the whole remote listing, `None` until a load succeeds.
    pub(crate) total_records: Option<u64>,
    /// `true` while the most recently requested page is in flight.
    pub(crate) loading: bool,
    pub(crate) loaded_at: Option<DateTime<Utc>>,
}

impl VisibleBatch {
    /// Returns the page number the records belong to.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the records, in source order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the visible record ids, in source order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(Record::id).collect()
    }

    /// Returns the size of the whole remote listing, if known.
    pub fn total_records(&self) -> Option<u64> {
        self.total_records
    }

    /// Returns `true` while a fetch for the latest requested page is pending.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns when the records were fetched.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Returns `true` if no records are visible.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of visible records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
