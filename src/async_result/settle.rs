//! The settle adapter shared by the sync and async combinators.

use super::AsyncResult;

/// Conversion into an [`AsyncResult`].
///
/// Callbacks handed to the async combinators may return either a plain
/// [`Result`] or an [`AsyncResult`]. Both implement this trait, so a chain can
/// mix synchronous and asynchronous steps without wrapping them by hand. A
/// plain `Result` becomes an already-settled `AsyncResult` and costs no
/// allocation.
///
/// # Examples
///
/// ```rust
/// use resultant::async_result::{AsyncResult, IntoAsyncResult};
///
/// # futures::executor::block_on(async {
/// let settled: AsyncResult<i32, String> = Ok(1).into_async_result();
/// assert_eq!(settled.await, Ok(1));
///
/// let pending = AsyncResult::<i32, String>::ok(2).into_async_result();
/// assert_eq!(pending.await, Ok(2));
/// # });
/// ```
pub trait IntoAsyncResult {
    /// The success type of the settled result.
    type Ok;
    /// The error type of the settled result.
    type Err;

    /// Lifts `self` into an [`AsyncResult`].
    fn into_async_result(self) -> AsyncResult<Self::Ok, Self::Err>;
}

impl<T, E> IntoAsyncResult for Result<T, E> {
    type Ok = T;
    type Err = E;

    #[inline]
    fn into_async_result(self) -> AsyncResult<T, E> {
        AsyncResult::settled(self)
    }
}

impl<T, E> IntoAsyncResult for AsyncResult<T, E> {
    type Ok = T;
    type Err = E;

    #[inline]
    fn into_async_result(self) -> Self {
        self
    }
}
