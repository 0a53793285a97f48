//! Reducing many results into one.
//!
//! Two error policies are provided:
//!
//! - **first error** ([`combine`], [`combine_async`], [`Combine::combine`]):
//!   the lowest-index `Err` wins; later entries are not inspected.
//! - **all errors** ([`combine_with_all_errors`],
//!   [`combine_async_with_all_errors`], [`Combine::combine_with_all_errors`]):
//!   every `Err` is collected, in input order.
//!
//! An empty input combines to `Ok(vec![])` under both policies.
//!
//! Homogeneous inputs go through the free functions; tuples of results with
//! differing success types go through the [`Combine`] trait.
//!
//! # Examples
//!
//! ```rust
//! use resultant::combine::{Combine, combine, combine_with_all_errors};
//! use resultant::result::{err, ok};
//!
//! assert_eq!(combine(vec![ok::<_, &str>(1), ok(2), ok(3)]), Ok(vec![1, 2, 3]));
//! assert_eq!(combine(vec![ok(1), err("a"), ok(2), err("b")]), Err("a"));
//! assert_eq!(
//!     combine_with_all_errors(vec![ok(1), err("a"), ok(2), err("b")]),
//!     Err(vec!["a", "b"])
//! );
//!
//! let tuple = (ok::<_, String>(1), ok("two"), ok(3.0)).combine();
//! assert_eq!(tuple, Ok((1, "two", 3.0)));
//! ```

use crate::async_result::{AsyncResult, IntoAsyncResult};

// =============================================================================
// Synchronous
// =============================================================================

/// Combines results, keeping the first error.
///
/// Iterates in order and stops at the first `Err`; the remaining entries are
/// never pulled from the iterator.
pub fn combine<I, T, E>(results: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = Result<T, E>>,
{
    // `FromIterator for Result` stops pulling at the first `Err`.
    results.into_iter().collect()
}

/// Combines results, collecting every error in input order.
pub fn combine_with_all_errors<I, T, E>(results: I) -> Result<Vec<T>, Vec<E>>
where
    I: IntoIterator<Item = Result<T, E>>,
{
    let mut values = Vec::new();
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(value) if errors.is_empty() => values.push(value),
            Ok(_) => {}
            Err(error) => errors.push(error),
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

// =============================================================================
// Asynchronous
// =============================================================================

/// Combines asynchronous results, keeping the first error by index.
///
/// All inputs are polled concurrently and the aggregate waits for every one
/// of them to settle. The reduction then runs over the settled results in
/// input order, so the reported error does not depend on completion order.
///
/// # Examples
///
/// ```rust
/// use resultant::async_result::AsyncResult;
/// use resultant::combine::combine_async;
///
/// # futures::executor::block_on(async {
/// let combined = combine_async(vec![
///     AsyncResult::<_, String>::ok(1),
///     AsyncResult::from_safe_future(async { 2 }),
/// ])
/// .await;
/// assert_eq!(combined, Ok(vec![1, 2]));
/// # });
/// ```
pub fn combine_async<I, R, T, E>(results: I) -> AsyncResult<Vec<T>, E>
where
    I: IntoIterator<Item = R>,
    R: IntoAsyncResult<Ok = T, Err = E>,
    T: Send + 'static,
    E: Send + 'static,
{
    let pending = settle_all(results);
    AsyncResult::from_result_future(async move { combine(pending.await) })
}

/// Combines asynchronous results, collecting every error in input order.
///
/// Like [`combine_async`], all inputs run concurrently and the errors are
/// reported by index, not by completion order.
pub fn combine_async_with_all_errors<I, R, T, E>(results: I) -> AsyncResult<Vec<T>, Vec<E>>
where
    I: IntoIterator<Item = R>,
    R: IntoAsyncResult<Ok = T, Err = E>,
    T: Send + 'static,
    E: Send + 'static,
{
    let pending = settle_all(results);
    AsyncResult::from_result_future(async move { combine_with_all_errors(pending.await) })
}

fn settle_all<I, R>(results: I) -> futures::future::JoinAll<AsyncResult<R::Ok, R::Err>>
where
    I: IntoIterator<Item = R>,
    R: IntoAsyncResult,
{
    futures::future::join_all(results.into_iter().map(IntoAsyncResult::into_async_result))
}

// =============================================================================
// Heterogeneous tuples
// =============================================================================

/// Combination of a fixed-size, heterogeneous group of results.
///
/// Implemented for tuples of `Result<_, E>` and tuples of `AsyncResult<_, E>`
/// of arity 1 to 8. Every position shares the error type `E`; the success
/// types may differ and are combined into a tuple.
///
/// # Examples
///
/// ```rust
/// use resultant::async_result::AsyncResult;
/// use resultant::combine::Combine;
///
/// let sync = (Ok::<i32, &str>(1), Err::<(), _>("bad"), Err::<u8, _>("worse")).combine_with_all_errors();
/// assert_eq!(sync, Err(vec!["bad", "worse"]));
///
/// # futures::executor::block_on(async {
/// let pending = (
///     AsyncResult::<_, String>::ok(1),
///     AsyncResult::from_safe_future(async { "two" }),
/// )
///     .combine()
///     .await;
/// assert_eq!(pending, Ok((1, "two")));
/// # });
/// ```
pub trait Combine {
    /// Result of the first-error policy.
    type Output;
    /// Result of the all-errors policy.
    type AllErrors;

    /// Combines the group, keeping the first error by position.
    fn combine(self) -> Self::Output;

    /// Combines the group, collecting every error by position.
    fn combine_with_all_errors(self) -> Self::AllErrors;
}

macro_rules! impl_combine_for_tuple {
    ($($value:ident : $type:ident),+) => {
        impl<Error, $($type),+> Combine for ($(Result<$type, Error>,)+) {
            type Output = Result<($($type,)+), Error>;
            type AllErrors = Result<($($type,)+), Vec<Error>>;

            fn combine(self) -> Self::Output {
                let ($($value,)+) = self;
                Ok(($($value?,)+))
            }

            fn combine_with_all_errors(self) -> Self::AllErrors {
                let ($($value,)+) = self;
                let mut errors = Vec::new();
                $(
                    let $value = match $value {
                        Ok(value) => Some(value),
                        Err(error) => {
                            errors.push(error);
                            None
                        }
                    };
                )+
                match ($($value,)+) {
                    ($(Some($value),)+) => Ok(($($value,)+)),
                    _ => Err(errors),
                }
            }
        }

        impl<Error, $($type),+> Combine for ($(AsyncResult<$type, Error>,)+)
        where
            Error: Send + 'static,
            $($type: Send + 'static,)+
        {
            type Output = AsyncResult<($($type,)+), Error>;
            type AllErrors = AsyncResult<($($type,)+), Vec<Error>>;

            fn combine(self) -> Self::Output {
                let ($($value,)+) = self;
                AsyncResult::from_result_future(async move {
                    let settled = futures::join!($($value),+);
                    settled.combine()
                })
            }

            fn combine_with_all_errors(self) -> Self::AllErrors {
                let ($($value,)+) = self;
                AsyncResult::from_result_future(async move {
                    let settled = futures::join!($($value),+);
                    settled.combine_with_all_errors()
                })
            }
        }
    };
}

impl_combine_for_tuple!(first: A);
impl_combine_for_tuple!(first: A, second: B);
impl_combine_for_tuple!(first: A, second: B, third: C);
impl_combine_for_tuple!(first: A, second: B, third: C, fourth: D);
impl_combine_for_tuple!(first: A, second: B, third: C, fourth: D, fifth: F);
impl_combine_for_tuple!(first: A, second: B, third: C, fourth: D, fifth: F, sixth: G);
impl_combine_for_tuple!(first: A, second: B, third: C, fourth: D, fifth: F, sixth: G, seventh: H);
impl_combine_for_tuple!(
    first: A,
    second: B,
    third: C,
    fourth: D,
    fifth: F,
    sixth: G,
    seventh: H,
    eighth: I
);
