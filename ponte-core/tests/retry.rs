use std::sync::atomic::{AtomicU32, Ordering};

use ponte_core::{PonteError, RetryPolicy, with_retry};

#[tokio::test(start_paused = true)]
async fn recovers_after_transient_failures() {
    let calls = AtomicU32::new(0);
    let result = with_retry(&RetryPolicy::default(), || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if n < 2 {
                Err(PonteError::transport("connection reset"))
            } else {
                Ok(42u32)
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn permanent_errors_are_not_retried() {
    let calls = AtomicU32::new(0);
    let result: Result<u32, _> = with_retry(&RetryPolicy::default(), || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(PonteError::provider("offer_no_longer_available", "expired")) }
    })
    .await;

    match result.unwrap_err() {
        PonteError::Provider { code, .. } => assert_eq!(code, "offer_no_longer_available"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn exhaustion_rethrows_the_last_error_unchanged() {
    let calls = AtomicU32::new(0);
    let result: Result<u32, _> = with_retry(&RetryPolicy::default(), || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move { Err(PonteError::status(503, format!("outage {n}"))) }
    })
    .await;

    match result.unwrap_err() {
        PonteError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "outage 2");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn rate_limit_status_is_retried() {
    let calls = AtomicU32::new(0);
    let result = with_retry(&RetryPolicy::default(), || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if n == 0 {
                Err(PonteError::status(429, "slow down"))
            } else {
                Ok("ok")
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), "ok");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn client_error_status_is_permanent() {
    let calls = AtomicU32::new(0);
    let result: Result<u32, _> = with_retry(&RetryPolicy::default(), || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(PonteError::status(404, "no such order")) }
    })
    .await;

    assert!(matches!(
        result.unwrap_err(),
        PonteError::Status { status: 404, .. }
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
