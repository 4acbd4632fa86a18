//! End-to-end behaviour of the grid controller against in-process sources.

use std::collections::HashMap;
use std::sync::Mutex;

use artgrid_lib::GridController;
use artgrid_lib::api::MemorySource;
use artgrid_lib::api::Page;
use artgrid_lib::api::PageRequest;
use artgrid_lib::api::PageSource;
use artgrid_lib::error::ApiError;
use artgrid_lib::error::Error;
use artgrid_lib::error::PageError;
use artgrid_lib::model::Record;
use artgrid_lib::model::RecordId;
use artgrid_lib::pager::LoadOutcome;
use artgrid_lib::pager::LoaderConfig;
use async_trait::async_trait;
use tokio::sync::oneshot;

fn artworks(total: i64) -> MemorySource {
    MemorySource::new(
        (1..=total)
            .map(|id| {
                Record::new(id)
                    .set("title", format!("Artwork {id}"))
                    .set("date_start", 1800 + id)
            })
            .collect(),
    )
}

fn ids(range: std::ops::RangeInclusive<i64>) -> Vec<RecordId> {
    range.map(RecordId).collect()
}

fn visible_ids<S>(controller: &GridController<S>) -> Vec<RecordId> {
    controller.rows().iter().map(|row| row.record.id()).collect()
}

/// Holds back pages until the test releases them.
struct GatedSource {
    inner: MemorySource,
    gates: Mutex<HashMap<u32, oneshot::Receiver<()>>>,
}

impl GatedSource {
    fn new(inner: MemorySource) -> Self {
        Self {
            inner,
            gates: Mutex::new(HashMap::new()),
        }
    }

    fn gate(&self, page: u32) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(page, rx);
        tx
    }
}

#[async_trait]
impl PageSource for GatedSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page, Error> {
        let gate = self.gates.lock().unwrap().remove(&request.page);
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        Ok(self.inner.page(request))
    }
}

/// Fails pages listed in `failing`; serves the rest from memory.
struct FailingSource {
    inner: MemorySource,
    failing: Mutex<Vec<u32>>,
}

#[async_trait]
impl PageSource for FailingSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page, Error> {
        if self.failing.lock().unwrap().contains(&request.page) {
            return Err(ApiError::parse("unexpected end of input").into());
        }
        Ok(self.inner.page(request))
    }
}

async fn settle<F: Fn() -> bool>(done: F) {
    for _ in 0..100 {
        if done() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition never became true");
}

#[tokio::test]
async fn test_selection_survives_page_round_trip() {
    let controller = GridController::new(artworks(45), LoaderConfig::default()).unwrap();
    controller.initialize().await.unwrap();
    let page_one = controller.rows();

    controller.on_toggle(RecordId(3), true);
    controller.on_page_change(2).await.unwrap();
    assert_eq!(visible_ids(&controller), ids(11..=20));

    controller.on_toggle(RecordId(12), true);
    controller.on_select_all(true);
    controller.on_toggle(RecordId(15), false);

    controller.on_page_change(1).await.unwrap();
    let rows = controller.rows();
    assert_eq!(
        rows.iter().map(|row| &row.record).collect::<Vec<_>>(),
        page_one.iter().map(|row| &row.record).collect::<Vec<_>>()
    );
    assert!(rows.iter().find(|row| row.record.id() == RecordId(3)).unwrap().selected);

    let mut expected = ids(11..=20);
    expected.retain(|id| *id != RecordId(15));
    expected.insert(0, RecordId(3));
    assert_eq!(controller.selected_ids(), expected);
}

#[tokio::test]
async fn test_bulk_selection_reaches_pages_not_yet_loaded() {
    let controller = GridController::new(artworks(45), LoaderConfig::default()).unwrap();
    controller.initialize().await.unwrap();
    controller.on_toggle(RecordId(1), true);

    let map = controller.submit_bulk_selection("2, 33, x, 41abc");
    assert_eq!(map.selected_ids(), vec![RecordId(1), RecordId(2), RecordId(33), RecordId(41)]);
    assert!(!controller.header_checked());

    controller.on_page_change(4).await.unwrap();
    let selected: Vec<RecordId> = controller
        .rows()
        .into_iter()
        .filter(|row| row.selected)
        .map(|row| row.record.id())
        .collect();
    assert_eq!(selected, vec![RecordId(33)]);

    controller.on_page_change(5).await.unwrap();
    assert_eq!(visible_ids(&controller), ids(41..=45));
    assert!(controller.is_selected(RecordId(41)));
}

#[tokio::test]
async fn test_only_latest_page_becomes_visible() {
    let source = GatedSource::new(artworks(50));
    let release_two = source.gate(2);
    let release_three = source.gate(3);
    let controller = GridController::new(source, LoaderConfig::default()).unwrap();
    controller.initialize().await.unwrap();

    let (two, three, ()) = tokio::join!(
        controller.on_page_change(2),
        controller.on_page_change(3),
        async {
            settle(|| controller.pagination().loading).await;
            // both requests are pending; the old page is still readable
            assert_eq!(visible_ids(&controller), ids(1..=10));

            release_three.send(()).unwrap();
            settle(|| controller.pagination().current_page == 3).await;
            assert!(!controller.pagination().loading);

            release_two.send(()).unwrap();
        }
    );

    assert_eq!(three.unwrap(), LoadOutcome::Applied { page: 3 });
    assert_eq!(two.unwrap(), LoadOutcome::Superseded { page: 2, latest: 3 });
    assert_eq!(controller.pagination().current_page, 3);
    assert_eq!(visible_ids(&controller), ids(21..=30));
}

#[tokio::test]
async fn test_selection_is_usable_while_a_fetch_is_pending() {
    let source = GatedSource::new(artworks(30));
    let release = source.gate(2);
    let controller = GridController::new(source, LoaderConfig::default()).unwrap();
    controller.initialize().await.unwrap();

    let (loaded, ()) = tokio::join!(controller.on_page_change(2), async {
        settle(|| controller.pagination().loading).await;
        controller.on_select_all(true);
        controller.submit_bulk_selection("25");
        assert!(controller.header_checked());
        release.send(()).unwrap();
    });

    loaded.unwrap();
    assert_eq!(controller.selected_ids().len(), 11);
    assert!(!controller.header_checked());
    assert!(controller.is_selected(RecordId(25)));
}

#[tokio::test]
async fn test_out_of_range_page_is_rejected() {
    let controller = GridController::new(artworks(50), LoaderConfig::default()).unwrap();
    controller.initialize().await.unwrap();
    assert_eq!(controller.pagination().page_count, 5);

    let before_rows = controller.rows();
    let before_view = controller.pagination();

    let err = controller.on_page_change(6).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Page(PageError::OutOfRange {
            requested: 6,
            page_count: 5
        })
    ));
    assert_eq!(controller.rows(), before_rows);
    assert_eq!(controller.pagination(), before_view);
    assert_eq!(controller.last_error(), None);
}

#[tokio::test]
async fn test_fetch_failure_is_reported_not_applied() {
    let source = FailingSource {
        inner: artworks(30),
        failing: Mutex::new(vec![2]),
    };
    let controller = GridController::new(source, LoaderConfig::default()).unwrap();
    controller.initialize().await.unwrap();
    controller.on_toggle(RecordId(4), true);

    let err = controller.on_page_change(2).await.unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Parse { .. })));
    assert_eq!(visible_ids(&controller), ids(1..=10));
    assert!(!controller.pagination().loading);
    assert!(controller.last_error().is_some());
    assert!(controller.is_selected(RecordId(4)));

    controller.loader().source().failing.lock().unwrap().clear();
    controller.next_page().await.unwrap();
    assert_eq!(controller.pagination().current_page, 2);
    assert_eq!(controller.last_error(), None);
}

#[tokio::test]
async fn test_initialize_only_once() {
    let controller = GridController::new(artworks(5), LoaderConfig::default()).unwrap();
    controller.initialize().await.unwrap();

    let err = controller.initialize().await.unwrap_err();
    assert!(matches!(err, Error::Page(PageError::AlreadyInitialized)));
    assert_eq!(controller.pagination().current_page, 1);
}

#[tokio::test]
async fn test_custom_page_size() {
    let config = LoaderConfig::default().with_page_size(4);
    let controller = GridController::new(artworks(10), config).unwrap();
    controller.initialize().await.unwrap();

    assert_eq!(controller.pagination().page_count, 3);
    controller.on_page_change(3).await.unwrap();
    assert_eq!(visible_ids(&controller), ids(9..=10));
}
