//! The controller a rendering layer drives
//!
//! [`GridController`] composes one [`PageLoader`] with one [`SelectionStore`].
//! The two only meet here, where per-row and header checkbox state are
//! derived from the visible ids; neither component reads the other's state.

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::api::PageSource;
use crate::error::Error;
use crate::error::PageError;
use crate::model::Record;
use crate::model::RecordId;
use crate::pager::LoadOutcome;
use crate::pager::LoaderConfig;
use crate::pager::PageLoader;
use crate::pager::page_count;
use crate::selection::SelectionMap;
use crate::selection::SelectionStore;

/// One visible row as the renderer sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub record: Record,
    pub selected: bool,
}

/// Pagination control state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    /// Page whose records are visible, `0` before the first load.
    pub current_page: u32,
    /// Number of pages, `0` while the total is zero or unknown.
    pub page_count: u32,
    pub page_size: u32,
    pub total_records: Option<u64>,
    pub loading: bool,
}

impl PaginationView {
    /// Returns `true` if a page after the current one exists.
    pub fn has_next(&self) -> bool {
        self.current_page < self.page_count
    }

    /// Returns `true` if a page before the current one exists.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// Paged listing with persistent, cross-page row selection.
///
/// # Example
///
/// ```ignore
/// let controller = GridController::new(ArticClient::builder().build()?, LoaderConfig::default())?;
/// controller.initialize().await?;
///
/// controller.on_toggle(RecordId(27992), true);
/// controller.submit_bulk_selection("129884, 16568");
/// controller.on_page_change(2).await?;
///
/// for row in controller.rows() {
///     println!("[{}] {}", if row.selected { "x" } else { " " }, row.record.get("title"));
/// }
/// ```
pub struct GridController<S> {
    loader: PageLoader<S>,
    selection: Mutex<SelectionStore>,
}

impl<S: PageSource> GridController<S> {
    /// Creates a controller with an empty selection. No fetch is issued until
    /// [`initialize`](Self::initialize).
    pub fn new(source: S, config: LoaderConfig) -> Result<Self, PageError> {
        Ok(Self {
            loader: PageLoader::new(source, config)?,
            selection: Mutex::new(SelectionStore::new()),
        })
    }

    /// Loads page 1. Call once when the view is first shown.
    pub async fn initialize(&self) -> Result<LoadOutcome, Error> {
        self.loader.initialize().await
    }

    /// Loads `page`. Selection is unaffected.
    pub async fn on_page_change(&self, page: u32) -> Result<LoadOutcome, Error> {
        self.loader.load(page).await
    }

    /// Loads the next page.
    pub async fn next_page(&self) -> Result<LoadOutcome, Error> {
        self.loader.next_page().await
    }

    /// Loads the previous page.
    pub async fn previous_page(&self) -> Result<LoadOutcome, Error> {
        self.loader.previous_page().await
    }
}

impl<S> GridController<S> {
    fn selection(&self) -> MutexGuard<'_, SelectionStore> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the visible rows with their checked state.
    pub fn rows(&self) -> Vec<RowView> {
        let records = self.loader.records();
        let selection = self.selection();
        records
            .into_iter()
            .map(|record| RowView {
                selected: selection.is_selected(record.id()),
                record,
            })
            .collect()
    }

    /// Returns the pagination control state.
    pub fn pagination(&self) -> PaginationView {
        let batch = self.loader.batch();
        let page_size = self.loader.page_size();
        PaginationView {
            current_page: batch.page(),
            page_count: batch
                .total_records()
                .map(|total| page_count(total, page_size))
                .unwrap_or(0),
            page_size,
            total_records: batch.total_records(),
            loading: batch.is_loading(),
        }
    }

    /// Returns the header checkbox state: every visible row is selected.
    pub fn header_checked(&self) -> bool {
        let visible = self.loader.visible_ids();
        self.selection().is_all_visible_selected(&visible)
    }

    /// Checks or unchecks one row.
    pub fn on_toggle(&self, id: RecordId, checked: bool) -> SelectionMap {
        self.selection().toggle(id, checked).clone()
    }

    /// Checks or unchecks every visible row.
    pub fn on_select_all(&self, checked: bool) -> SelectionMap {
        let visible = self.loader.visible_ids();
        self.selection().select_all_visible(&visible, checked).clone()
    }

    /// Selects the ids typed into the bulk-selection box.
    pub fn submit_bulk_selection(&self, raw_text: &str) -> SelectionMap {
        self.selection().bulk_select_by_ids(raw_text).clone()
    }

    /// Returns `true` if `id` is selected, visible or not.
    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selection().is_selected(id)
    }

    /// Returns a snapshot of the selection.
    pub fn selection_map(&self) -> SelectionMap {
        self.selection().map().clone()
    }

    /// Returns every selected id in ascending order, across all pages.
    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.selection().selected_ids()
    }

    /// Returns the latest fetch failure for display.
    pub fn last_error(&self) -> Option<String> {
        self.loader.last_error()
    }

    /// Returns the underlying loader.
    pub fn loader(&self) -> &PageLoader<S> {
        &self.loader
    }
}
