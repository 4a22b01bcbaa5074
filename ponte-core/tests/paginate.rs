use std::sync::atomic::{AtomicU32, Ordering};

use ponte_core::{Page, PageConfig, PonteError, paginate, paginate_cursor};

/// Serves `total` sequential item ids through offset/limit windows.
fn window(total: u32, offset: u32, limit: u32) -> Vec<u32> {
    (offset..total.min(offset + limit)).collect()
}

#[tokio::test(start_paused = true)]
async fn concatenates_until_the_first_short_page() {
    let fetches = AtomicU32::new(0);
    let delays = AtomicU32::new(0);

    let items = paginate(
        &PageConfig::default(),
        || {
            delays.fetch_add(1, Ordering::SeqCst);
        },
        |offset, limit| {
            fetches.fetch_add(1, Ordering::SeqCst);
            async move { Ok(window(137, offset, limit)) }
        },
    )
    .await
    .unwrap();

    // Pages of 50, 50, 37.
    assert_eq!(items.len(), 137);
    assert_eq!(items, (0..137).collect::<Vec<_>>());
    assert_eq!(fetches.load(Ordering::SeqCst), 3);
    assert_eq!(delays.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn single_short_page_never_delays() {
    let fetches = AtomicU32::new(0);
    let delays = AtomicU32::new(0);

    let items = paginate(
        &PageConfig::default(),
        || {
            delays.fetch_add(1, Ordering::SeqCst);
        },
        |offset, limit| {
            fetches.fetch_add(1, Ordering::SeqCst);
            async move { Ok(window(3, offset, limit)) }
        },
    )
    .await
    .unwrap();

    assert_eq!(items, vec![0, 1, 2]);
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert_eq!(delays.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn exact_page_multiple_needs_one_empty_fetch() {
    let fetches = AtomicU32::new(0);

    let items = paginate(
        &PageConfig::default(),
        || {},
        |offset, limit| {
            fetches.fetch_add(1, Ordering::SeqCst);
            async move { Ok(window(50, offset, limit)) }
        },
    )
    .await
    .unwrap();

    assert_eq!(items.len(), 50);
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn mid_stream_errors_propagate() {
    let fetches = AtomicU32::new(0);

    let result: Result<Vec<u32>, _> = paginate(&PageConfig::default(), || {}, |offset, limit| {
        let n = fetches.fetch_add(1, Ordering::SeqCst);
        async move {
            if n == 0 {
                Ok(window(200, offset, limit))
            } else {
                Err(PonteError::status(500, "page store down"))
            }
        }
    })
    .await;

    assert!(matches!(
        result.unwrap_err(),
        PonteError::Status { status: 500, .. }
    ));
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn cursor_pagination_follows_tokens_to_the_end() {
    let delays = AtomicU32::new(0);

    let items = paginate_cursor(
        &PageConfig::default(),
        || {
            delays.fetch_add(1, Ordering::SeqCst);
        },
        |cursor: Option<String>| async move {
            let page = match cursor.as_deref() {
                None => Page {
                    items: vec!["a", "b"],
                    next_cursor: Some("c1".to_string()),
                },
                Some("c1") => Page {
                    items: vec!["c"],
                    next_cursor: Some("c2".to_string()),
                },
                Some("c2") => Page {
                    items: vec!["d"],
                    next_cursor: None,
                },
                Some(other) => return Err(PonteError::data(format!("bad cursor {other}"))),
            };
            Ok(page)
        },
    )
    .await
    .unwrap();

    assert_eq!(items, vec!["a", "b", "c", "d"]);
    assert_eq!(delays.load(Ordering::SeqCst), 2);
}
