//! Browser callbacks as a table front end would drive them.

mod common;

use std::collections::HashSet;

use artworks_lib::error::FetchError;
use artworks_lib::selection::SelectionController;
use artworks_lib::Browser;
use common::MemorySource;
use tokio_util::sync::CancellationToken;

async fn open(source: MemorySource) -> Browser<MemorySource> {
    let mut browser = Browser::new(source, SelectionController::new(), 8);
    browser.on_page_change(1).await.unwrap();
    browser
}

#[tokio::test]
async fn test_view_reports_page_metadata() {
    let browser = open(MemorySource::sequential(20, 8)).await;
    let view = browser.view();

    assert_eq!(view.page_number, 1);
    assert_eq!(view.page_size, 8);
    assert_eq!(view.total_records, 20);
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.records.len(), 8);
    assert!(!view.loading);
    assert!(!view.has_previous());
    assert!(view.has_next());
    assert!(view.selected_in_view.is_empty());
}

#[tokio::test]
async fn test_selection_survives_navigation() {
    let mut browser = open(MemorySource::sequential(40, 8)).await;
    browser.on_toggle(3).unwrap();

    browser.on_page_change(5).await.unwrap();
    let view = browser.view();
    assert!(!view.is_checked(3));
    assert!(view.selected_in_view.is_empty());
    assert!(browser.controller().contains(3));

    browser.on_page_change(1).await.unwrap();
    assert!(browser.view().is_checked(3));
}

#[tokio::test]
async fn test_selection_diff_scoped_to_page_in_view() {
    let mut browser = open(MemorySource::sequential(40, 8)).await;

    browser.on_page_change(2).await.unwrap();
    let visible = browser.visible_ids();
    assert_eq!(visible, (9..=16).collect::<HashSet<_>>());
    browser
        .on_selection_diff(&visible, &HashSet::from([12]))
        .unwrap();

    browser.on_page_change(1).await.unwrap();
    let visible = browser.visible_ids();
    browser
        .on_selection_diff(&visible, &HashSet::from([1, 2, 30]))
        .unwrap();
    browser
        .on_selection_diff(&visible, &HashSet::from([1]))
        .unwrap();

    assert_eq!(browser.controller().snapshot().to_sorted_vec(), vec![1, 12]);
    assert_eq!(browser.view().selected_in_view, HashSet::from([1]));
}

#[tokio::test]
async fn test_failed_navigation_shows_empty_page() {
    let mut browser = open(MemorySource::sequential(40, 8).fail_on(3)).await;
    browser.on_toggle(2).unwrap();

    let err = browser.on_page_change(3).await.unwrap_err();
    assert!(matches!(err, FetchError::Http { status: 503, .. }));

    let view = browser.view();
    assert_eq!(view.page_number, 3);
    assert!(view.records.is_empty());
    assert_eq!(view.total_records, 40);
    assert!(!view.loading);
    assert!(browser.controller().contains(2));

    browser.on_page_change(4).await.unwrap();
    assert_eq!(browser.view().records.len(), 8);
}

#[tokio::test]
async fn test_bulk_select_from_page_in_view() {
    let browser = open(MemorySource::sequential(40, 8)).await;

    let outcome = browser
        .on_bulk_select_request(10, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.added, 10);
    let view = browser.view();
    assert_eq!(view.page_number, 1);
    assert_eq!(view.selected_in_view.len(), 8);
    assert!(!view.loading);
    assert_eq!(browser.controller().len(), 10);
    assert_eq!(browser.source().requested(), vec![1, 2]);
}

#[tokio::test]
async fn test_loading_flag_set_during_bulk_select() {
    let browser = open(MemorySource::sequential(40, 8).stall_on(2)).await;
    let loading = browser.loading_flag();
    let cancel = CancellationToken::new();

    let (result, ()) = tokio::join!(
        browser.on_bulk_select_request(10, &cancel),
        async {
            tokio::task::yield_now().await;
            assert!(loading.is_loading());
            assert!(browser.view().loading);
            cancel.cancel();
        }
    );

    assert!(result.is_err());
    assert!(!loading.is_loading());
    assert_eq!(browser.controller().len(), 8);
}

#[tokio::test]
async fn test_bulk_select_after_failed_navigation() {
    let mut browser = open(MemorySource::sequential(40, 8).fail_on(3)).await;
    assert!(browser.on_page_change(3).await.is_err());

    let outcome = browser
        .on_bulk_select_request(5, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.added, 5);
    assert!(!outcome.exhausted);
    assert_eq!(outcome.pages_fetched, 1);
    assert_eq!(
        browser.controller().snapshot().to_sorted_vec(),
        (25..=29).collect::<Vec<_>>()
    );
    assert_eq!(browser.source().requested(), vec![1, 3, 4]);
}

#[tokio::test]
async fn test_failed_first_load_still_allows_next() {
    let mut browser = Browser::new(
        MemorySource::sequential(40, 8).fail_on(1),
        SelectionController::new(),
        8,
    );
    assert!(browser.on_page_change(1).await.is_err());

    let view = browser.view();
    assert_eq!(view.total_records, 0);
    assert!(view.has_next());
    assert!(browser.has_next_page());

    browser.on_page_change(2).await.unwrap();
    assert_eq!(browser.view().records.len(), 8);
}

#[tokio::test]
async fn test_last_page_has_no_next() {
    let mut browser = open(MemorySource::sequential(20, 8)).await;
    browser.on_page_change(3).await.unwrap();

    let view = browser.view();
    assert_eq!(view.records.len(), 4);
    assert!(!view.has_next());
}

#[tokio::test]
async fn test_reported_page_size_drives_page_count() {
    let source = MemorySource::sequential(40, 8).report_page_size(8);
    let mut browser = Browser::new(source, SelectionController::new(), 100);
    browser.on_page_change(1).await.unwrap();

    let view = browser.view();
    assert_eq!(view.page_size, 8);
    assert_eq!(view.total_pages, 5);
    assert_eq!(browser.total_pages(), 5);
}

#[tokio::test]
async fn test_configured_page_size_without_report() {
    let browser = open(MemorySource::sequential(40, 8)).await;
    assert_eq!(browser.page_size(), 8);
    assert_eq!(browser.view().total_pages, 5);
}
