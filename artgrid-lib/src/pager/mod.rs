//! Page loading and the visible batch
//!
//! [`PageLoader`] drives fetches against a [`PageSource`] and owns the
//! [`VisibleBatch`]. Loads take `&self`, so several may be pending at once;
//! each request is tagged with a sequence number and only the response to the
//! most recent request is allowed to replace the batch.

mod batch;

pub use batch::*;

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use chrono::Utc;

use crate::api::Page;
use crate::api::PageRequest;
use crate::api::PageSource;
use crate::error::Error;
use crate::error::PageError;
use crate::model::Record;
use crate::model::RecordId;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Configuration for a [`PageLoader`].
///
/// # Example
///
/// ```
/// use artgrid_lib::pager::LoaderConfig;
///
/// let config = LoaderConfig::default().with_page_size(25);
/// assert_eq!(config.page_size, 25);
/// ```
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Number of records per page.
    ///
    /// Default: 10
    pub page_size: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl LoaderConfig {
    /// Creates a new loader config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

/// What happened to the response of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page is now the visible batch.
    Applied {
        /// The page that was loaded.
        page: u32,
    },
    /// A newer request was issued while this one was in flight, so its
    /// response was dropped.
    Superseded {
        /// The page this request was for.
        page: u32,
        /// The page most recently requested.
        latest: u32,
    },
}

impl LoadOutcome {
    /// Returns `true` if the response became the visible batch.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Owns the current page, the loading flag and the visible batch.
///
/// Page numbers outside `1..=page_count` are rejected with
/// [`PageError`], never clamped. Until a load has succeeded the total is
/// unknown and only page `0` is rejected; once the total is known to be zero,
/// only page 1 is accepted.
///
/// # Example
///
/// ```ignore
/// let loader = PageLoader::new(source, LoaderConfig::default())?;
/// loader.initialize().await?;
///
/// for record in loader.batch().records() {
///     println!("{}", record.id());
/// }
/// ```
pub struct PageLoader<S> {
    source: S,
    page_size: u32,
    state: Mutex<LoaderState>,
}

#[derive(Debug, Default)]
struct LoaderState {
    batch: VisibleBatch,
    initialized: bool,
    /// Sequence number of the most recently issued request.
    latest_seq: u64,
    /// Page of the most recently issued request, or the visible page when the
    /// latest request failed.
    requested_page: u32,
    last_error: Option<String>,
}

impl<S: PageSource> PageLoader<S> {
    /// Creates a loader with an empty batch. No fetch is issued.
    pub fn new(source: S, config: LoaderConfig) -> Result<Self, PageError> {
        if config.page_size == 0 {
            return Err(PageError::InvalidPageSize);
        }

        Ok(Self {
            source,
            page_size: config.page_size,
            state: Mutex::new(LoaderState::default()),
        })
    }

    /// Issues the initial load of page 1.
    ///
    /// Succeeds at most once per loader; later calls are rejected with
    /// [`PageError::AlreadyInitialized`] without fetching. If the initial
    /// fetch fails, retry it with [`load`](Self::load).
    pub async fn initialize(&self) -> Result<LoadOutcome, Error> {
        {
            let mut state = self.state();
            if state.initialized {
                return Err(PageError::AlreadyInitialized.into());
            }
            state.initialized = true;
        }

        self.load(1).await
    }

    /// Fetches `page` and makes it the visible batch.
    ///
    /// The previous batch stays readable while the fetch is pending. On
    /// failure the batch is left untouched, `loading` is cleared, the error
    /// message is kept for [`last_error`](Self::last_error) and the error is
    /// returned. A response that arrives after a newer request was issued is
    /// discarded, whether it succeeded or not.
    pub async fn load(&self, page: u32) -> Result<LoadOutcome, Error> {
        let seq = self.begin(page)?;
        let request = PageRequest::new(page, self.page_size);
        let result = self.source.fetch_page(request).await;
        self.finish(seq, page, result)
    }

    /// Loads the page after the most recently requested one.
    pub async fn next_page(&self) -> Result<LoadOutcome, Error> {
        let page = self.state().requested_page.saturating_add(1);
        self.load(page).await
    }

    /// Loads the page before the most recently requested one.
    ///
    /// From page 1 this is rejected with [`PageError::ZeroPage`].
    pub async fn previous_page(&self) -> Result<LoadOutcome, Error> {
        let page = self.state().requested_page.saturating_sub(1);
        self.load(page).await
    }

    fn begin(&self, page: u32) -> Result<u64, PageError> {
        let mut state = self.state();
        self.check_range(&state.batch, page)?;

        state.latest_seq += 1;
        state.requested_page = page;
        state.batch.loading = true;
        Ok(state.latest_seq)
    }

    fn finish(&self, seq: u64, page: u32, result: Result<Page, Error>) -> Result<LoadOutcome, Error> {
        let mut state = self.state();

        if seq != state.latest_seq {
            let latest = state.requested_page;
            match &result {
                Ok(_) => log::debug!("Discarding stale page {} (latest request is page {})", page, latest),
                Err(e) => log::debug!("Ignoring failure of stale page {}: {}", page, e),
            }
            return Ok(LoadOutcome::Superseded { page, latest });
        }

        state.batch.loading = false;

        match result {
            Ok(fetched) => {
                log::info!(
                    "Loaded page {} ({} records of {})",
                    page,
                    fetched.len(),
                    fetched.total_count()
                );
                state.batch.total_records = Some(fetched.total_count());
                state.batch.records = fetched.into_records();
                state.batch.page = page;
                state.batch.loaded_at = Some(Utc::now());
                state.last_error = None;
                Ok(LoadOutcome::Applied { page })
            }
            Err(e) => {
                log::warn!("Failed to load page {}: {}", page, e);
                state.requested_page = state.batch.page;
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn check_range(&self, batch: &VisibleBatch, page: u32) -> Result<(), PageError> {
        if page == 0 {
            return Err(PageError::ZeroPage);
        }

        if let Some(total) = batch.total_records {
            let page_count = page_count(total, self.page_size);
            if page > page_count.max(1) {
                return Err(PageError::OutOfRange {
                    requested: page,
                    page_count,
                });
            }
        }

        Ok(())
    }
}

impl<S> PageLoader<S> {
    fn state(&self) -> MutexGuard<'_, LoaderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a snapshot of the visible batch.
    pub fn batch(&self) -> VisibleBatch {
        self.state().batch.clone()
    }

    /// Returns a copy of the visible records.
    pub fn records(&self) -> Vec<Record> {
        self.state().batch.records.clone()
    }

    /// Returns the visible record ids, in order.
    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.state().batch.ids()
    }

    /// Returns `true` while the most recently requested page is in flight.
    pub fn is_loading(&self) -> bool {
        self.state().batch.loading
    }

    /// Returns the page whose records are visible, `0` before the first load.
    pub fn current_page(&self) -> u32 {
        self.state().batch.page
    }

    /// Returns the page of the most recent request that has not failed.
    pub fn requested_page(&self) -> u32 {
        self.state().requested_page
    }

    /// Returns the number of records per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the size of the remote listing, if a load has succeeded.
    pub fn total_records(&self) -> Option<u64> {
        self.state().batch.total_records
    }

    /// Returns `ceil(total_records / page_size)`, or `0` when the total is
    /// zero or unknown.
    pub fn page_count(&self) -> u32 {
        self.total_records()
            .map(|total| page_count(total, self.page_size))
            .unwrap_or(0)
    }

    /// Returns the message of the latest fetch failure, cleared by the next
    /// successful load.
    pub fn last_error(&self) -> Option<String> {
        self.state().last_error.clone()
    }

    /// Returns a reference to the data source.
    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Number of pages needed for `total` records.
pub fn page_count(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}
