//! Tests for the list combinators.
//!
//! Verifies the first-error and all-errors policies for lists and tuples, and
//! that asynchronous combination reports errors by input index regardless of
//! the order in which inputs settle.

use resultant::async_result::{AsyncResult, err_async, ok_async};
use resultant::combine::{
    Combine, combine, combine_async, combine_async_with_all_errors, combine_with_all_errors,
};
use resultant::result::{ResultExt, err, ok};
use rstest::rstest;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn settle_after<T: Send + 'static>(
    result: Result<T, String>,
    millis: u64,
    log: &Arc<Mutex<Vec<u64>>>,
) -> AsyncResult<T, String> {
    let log = Arc::clone(log);
    AsyncResult::from_result_future(async move {
        tokio::time::sleep(Duration::from_millis(millis)).await;
        log.lock().unwrap().push(millis);
        result
    })
}

// =============================================================================
// Synchronous Lists
// =============================================================================

#[rstest]
fn test_combine_all_ok() {
    let combined = combine(vec![ok::<i32, String>(1), ok(2), ok(3)]);
    assert_eq!(combined.unsafe_unwrap(), vec![1, 2, 3]);
}

#[rstest]
fn test_combine_returns_first_error() {
    let combined = combine(vec![ok(1), err("a"), ok(2), err("b")]);
    assert_eq!(combined.unsafe_unwrap_err(), "a");
}

#[rstest]
fn test_combine_with_all_errors_collects_in_order() {
    let combined = combine_with_all_errors(vec![ok(1), err("a"), ok(2), err("b")]);
    assert_eq!(combined.unsafe_unwrap_err(), vec!["a", "b"]);
}

#[rstest]
fn test_combine_with_all_errors_all_ok() {
    let combined = combine_with_all_errors(vec![ok::<_, ()>("x"), ok("y")]);
    assert_eq!(combined, Ok(vec!["x", "y"]));
}

#[rstest]
#[case::first(vec![err("e"), ok(1), ok(2)], "e")]
#[case::middle(vec![ok(1), err("e"), ok(2)], "e")]
#[case::last(vec![ok(1), ok(2), err("e")], "e")]
fn test_combine_error_position(#[case] results: Vec<Result<i32, &str>>, #[case] expected: &str) {
    assert_eq!(combine(results), Err(expected));
}

#[rstest]
fn test_combine_empty() {
    assert_eq!(combine(Vec::<Result<u8, String>>::new()).unsafe_unwrap(), Vec::<u8>::new());
}

// =============================================================================
// Tuples
// =============================================================================

#[rstest]
fn test_tuple_combine_heterogeneous_ok() {
    let combined = (ok::<_, String>(1_u8), ok("two"), ok(vec![3]), ok(4.5_f64)).combine();
    assert_eq!(combined, Ok((1_u8, "two", vec![3], 4.5_f64)));
}

#[rstest]
fn test_tuple_combine_with_all_errors() {
    let combined = (
        ok::<i32, String>(1),
        err::<bool, _>("second".to_string()),
        ok::<&str, _>("third"),
        err::<char, _>("fourth".to_string()),
    )
        .combine_with_all_errors();
    assert_eq!(
        combined,
        Err(vec!["second".to_string(), "fourth".to_string()])
    );
}

#[rstest]
fn test_tuple_of_eight() {
    let combined = (
        ok::<_, ()>(1),
        ok(2),
        ok(3),
        ok(4),
        ok(5),
        ok(6),
        ok(7),
        ok(8),
    )
        .combine();
    assert_eq!(combined, Ok((1, 2, 3, 4, 5, 6, 7, 8)));
}

// =============================================================================
// Asynchronous Lists
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_combine_async_all_ok() {
    let combined = combine_async(vec![ok_async::<i32, String>(1), ok_async(2), ok_async(3)]).await;
    assert_eq!(combined, Ok(vec![1, 2, 3]));
}

#[rstest]
#[tokio::test]
async fn test_combine_async_empty() {
    let combined = combine_async(Vec::<AsyncResult<i32, String>>::new()).await;
    assert_eq!(combined, Ok(vec![]));
}

#[rstest]
#[tokio::test]
async fn test_combine_async_accepts_plain_results() {
    let combined = combine_async(vec![ok::<i32, String>(1), err("bad".to_string())]).await;
    assert_eq!(combined, Err("bad".to_string()));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_combine_async_reports_error_by_index_not_completion() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let combined = combine_async(vec![
        settle_after(Ok(1), 30, &log),
        settle_after(Err("slow".to_string()), 20, &log),
        settle_after(Err("fast".to_string()), 10, &log),
    ])
    .await;

    assert_eq!(combined, Err("slow".to_string()));
    assert_eq!(*log.lock().unwrap(), vec![10, 20, 30], "every input settles");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_combine_async_runs_inputs_concurrently() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let started = tokio::time::Instant::now();

    let combined = combine_async(vec![
        settle_after(Ok(1), 50, &log),
        settle_after(Ok(2), 50, &log),
        settle_after(Ok(3), 50, &log),
    ])
    .await;

    assert_eq!(combined, Ok(vec![1, 2, 3]));
    assert!(started.elapsed() < Duration::from_millis(100));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_combine_async_with_all_errors_keeps_input_order() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let combined = combine_async_with_all_errors(vec![
        settle_after(Err("a".to_string()), 30, &log),
        settle_after(Ok(1), 5, &log),
        settle_after(Err("b".to_string()), 10, &log),
    ])
    .await;

    assert_eq!(combined, Err(vec!["a".to_string(), "b".to_string()]));
}

#[rstest]
#[tokio::test]
async fn test_async_tuple_combine() {
    let combined = (
        ok_async::<_, String>(1),
        AsyncResult::from_safe_future(async { "two" }),
    )
        .combine()
        .await;
    assert_eq!(combined, Ok((1, "two")));

    let failed = (
        err_async::<i32, _>("first".to_string()),
        err_async::<u8, _>("second".to_string()),
    )
        .combine_with_all_errors()
        .await;
    assert_eq!(failed, Err(vec!["first".to_string(), "second".to_string()]));
}
