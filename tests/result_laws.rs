//! Property-based tests for the algebraic laws of `Result` and `AsyncResult`.
//!
//! - **Functor Identity**: `r.map(|x| x) == r`
//! - **Functor Composition**: `r.map(f).map(g) == r.map(|x| g(f(x)))`
//! - **Left Identity**: `ok(a).and_then(f) == f(a)`
//! - **Right Identity**: `r.and_then(ok) == r`
//! - **Associativity**: `r.and_then(f).and_then(g) == r.and_then(|x| f(x).and_then(g))`
//! - **Channel independence**: `map` and `map_err` commute

use proptest::prelude::*;
use resultant::async_result::AsyncResult;
use resultant::combine::{combine, combine_with_all_errors};
use resultant::result::{ResultExt, ok};

fn any_result() -> impl Strategy<Value = Result<i32, String>> {
    prop_oneof![
        any::<i32>().prop_map(Ok),
        "[a-z]{0,8}".prop_map(Err),
    ]
}

fn half(value: i32) -> Result<i32, String> {
    if value % 2 == 0 {
        Ok(value / 2)
    } else {
        Err(format!("{value} is odd"))
    }
}

fn positive(value: i32) -> Result<i32, String> {
    if value > 0 {
        Ok(value)
    } else {
        Err(format!("{value} is not positive"))
    }
}

// =============================================================================
// Result Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_functor_identity(result in any_result()) {
        prop_assert_eq!(result.clone().map(|x| x), result);
    }

    #[test]
    fn prop_functor_composition(result in any_result()) {
        let function1 = |n: i32| n.wrapping_add(1);
        let function2 = |n: i32| n.wrapping_mul(2);

        let left = result.clone().map(function1).map(function2);
        let right = result.map(|x| function2(function1(x)));

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_map_applies_function(value: i32) {
        let function = |n: i32| i64::from(n) * 3;
        prop_assert_eq!(ok::<i32, String>(value).map(function).unwrap_or(0), function(value));
    }

    #[test]
    fn prop_monad_left_identity(value: i32) {
        prop_assert_eq!(ok::<i32, String>(value).and_then(half), half(value));
    }

    #[test]
    fn prop_monad_right_identity(result in any_result()) {
        prop_assert_eq!(result.clone().and_then(ok), result);
    }

    #[test]
    fn prop_monad_associativity(result in any_result()) {
        let left = result.clone().and_then(half).and_then(positive);
        let right = result.and_then(|x| half(x).and_then(positive));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_map_and_map_err_commute(result in any_result()) {
        let on_ok = |n: i32| n.wrapping_sub(5);
        let on_err = |error: String| error.len();

        let left = result.clone().map(on_ok).map_err(on_err);
        let right = result.map_err(on_err).map(on_ok);

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_fold_agrees_with_unwrap_or(result in any_result(), default in any::<i32>()) {
        let folded = result.clone().fold(|value| value, |_| default);
        prop_assert_eq!(folded, result.unwrap_or(default));
    }

    #[test]
    fn prop_combine_first_error_is_lowest_index(results in prop::collection::vec(any_result(), 0..16)) {
        let expected = results.iter().find_map(|result| result.clone().err());
        match combine(results.clone()) {
            Ok(values) => {
                prop_assert!(expected.is_none());
                prop_assert_eq!(values.len(), results.len());
            }
            Err(error) => prop_assert_eq!(Some(error), expected),
        }
    }

    #[test]
    fn prop_combine_with_all_errors_keeps_every_error_in_order(
        results in prop::collection::vec(any_result(), 0..16)
    ) {
        let expected: Vec<String> = results.iter().filter_map(|result| result.clone().err()).collect();
        match combine_with_all_errors(results) {
            Ok(_) => prop_assert!(expected.is_empty()),
            Err(errors) => prop_assert_eq!(errors, expected),
        }
    }
}

// =============================================================================
// AsyncResult Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_async_left_identity(value: i32) {
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left = runtime.block_on(AsyncResult::<i32, String>::ok(value).and_then(half));
        prop_assert_eq!(left, half(value));
    }

    #[test]
    fn prop_async_right_identity(result in any_result()) {
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let pending = AsyncResult::from_result_future(futures::future::ready(result.clone()));
        let left = runtime.block_on(pending.and_then(AsyncResult::ok));
        prop_assert_eq!(left, result);
    }

    #[test]
    fn prop_async_associativity(result in any_result()) {
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let left = runtime.block_on(
            AsyncResult::from(result.clone()).and_then(half).and_then(positive),
        );
        let right = runtime.block_on(
            AsyncResult::from(result).and_then(|x| AsyncResult::from(half(x)).and_then(positive)),
        );

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_async_matches_sync_chain(result in any_result()) {
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let expected = result.clone().map(|n| n.wrapping_add(1)).and_then(half).map_err(|e| e.len());
        let pending = AsyncResult::from_result_future(futures::future::ready(result))
            .map(|n| n.wrapping_add(1))
            .and_then(half)
            .map_err(|e| e.len());

        prop_assert_eq!(runtime.block_on(pending), expected);
    }
}
