//! Early return over results without explicit chaining.
//!
//! A safe-try body is an `async` block: a coroutine the compiler builds for
//! us. The body receives a [`TryScope`] and unwraps results through it with
//! [`SafeUnwrap::safe_unwrap`]. Unwrapping an `Ok` resumes the body at once
//! with the payload. Unwrapping an `Err` records the error in the scope and
//! suspends the body for good. The driver notices the recorded error and
//! finishes with it, never resuming the body again.
//!
//! - [`safe_try`] drives the body synchronously and returns a `Result`.
//! - [`safe_try_async`] returns an [`AsyncResult`]; the body may await real
//!   asynchronous work between unwraps.
//!
//! # Examples
//!
//! ```rust
//! use resultant::result::{err, ok};
//! use resultant::safe_try::{SafeUnwrap, safe_try};
//!
//! fn parse_pair(left: &str, right: &str) -> Result<(i32, i32), String> {
//!     safe_try(|scope| async move {
//!         let left = left.parse::<i32>().map_err(|e| e.to_string()).safe_unwrap(&scope).await;
//!         let right = right.parse::<i32>().map_err(|e| e.to_string()).safe_unwrap(&scope).await;
//!         ok((left, right))
//!     })
//! }
//!
//! assert_eq!(parse_pair("1", "2"), Ok((1, 2)));
//! assert_eq!(parse_pair("1", "x"), Err("invalid digit found in string".to_string()));
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};

use parking_lot::Mutex;
use pin_project_lite::pin_project;

use crate::async_result::{AsyncResult, IntoAsyncResult};

// =============================================================================
// TryScope
// =============================================================================

/// Handle through which a safe-try body unwraps results.
///
/// The scope remembers the first error unwrapped inside the body. Cloning a
/// scope yields a handle to the same record.
pub struct TryScope<E> {
    failure: Arc<Mutex<Option<E>>>,
}

impl<E> TryScope<E> {
    fn new() -> Self {
        Self {
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Records `error` unless an earlier failure is already recorded.
    fn fail(&self, error: E) {
        let mut failure = self.failure.lock();
        if failure.is_none() {
            *failure = Some(error);
        }
    }

    fn take_failure(&self) -> Option<E> {
        self.failure.lock().take()
    }

    /// Decides the outcome of one poll of the body.
    ///
    /// A recorded failure wins even when the body has already returned, e.g.
    /// after racing a failed unwrap against other work.
    fn settle<T>(&self, polled: Poll<Result<T, E>>, driver: &'static str) -> Poll<Result<T, E>> {
        match self.take_failure() {
            Some(error) => {
                tracing::trace!(driver, "short-circuited on a failed unwrap");
                Poll::Ready(Err(error))
            }
            None => polled,
        }
    }

    /// Checks `result` inside the body, resuming with its `Ok` payload.
    ///
    /// Equivalent to `result.safe_unwrap(self)`.
    pub fn check<R>(&self, result: R) -> Unwrapping<R::Ok, R::Err, E>
    where
        R: IntoAsyncResult,
        R::Err: Into<E>,
    {
        Unwrapping {
            source: result.into_async_result(),
            scope: self.clone(),
            failed: false,
        }
    }
}

impl<E> Clone for TryScope<E> {
    fn clone(&self) -> Self {
        Self {
            failure: Arc::clone(&self.failure),
        }
    }
}

impl<E> std::fmt::Debug for TryScope<E> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TryScope")
            .field("failed", &self.failure.lock().is_some())
            .finish()
    }
}

// =============================================================================
// SafeUnwrap
// =============================================================================

/// Unwrap-or-suspend adapter for `Result` and `AsyncResult`.
pub trait SafeUnwrap: IntoAsyncResult + Sized {
    /// Yields the `Ok` payload to the body, or ends the safe-try run with the
    /// error converted into the scope's error type.
    fn safe_unwrap<E>(self, scope: &TryScope<E>) -> Unwrapping<Self::Ok, Self::Err, E>
    where
        Self::Err: Into<E>,
    {
        scope.check(self)
    }
}

impl<R: IntoAsyncResult> SafeUnwrap for R {}

pin_project! {
    /// Future returned by [`SafeUnwrap::safe_unwrap`].
    ///
    /// Resolves to the `Ok` payload. On `Err` it records the error in its
    /// scope and stays pending forever.
    #[must_use = "safe_unwrap does nothing unless awaited"]
    pub struct Unwrapping<T, F, E> {
        #[pin]
        source: AsyncResult<T, F>,
        scope: TryScope<E>,
        failed: bool,
    }
}

impl<T, F, E> Future for Unwrapping<T, F, E>
where
    F: Into<E>,
{
    type Output = T;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<T> {
        let this = self.project();
        if *this.failed {
            return Poll::Pending;
        }

        match ready!(this.source.poll(context)) {
            Ok(value) => Poll::Ready(value),
            Err(error) => {
                *this.failed = true;
                this.scope.fail(error.into());
                Poll::Pending
            }
        }
    }
}

// =============================================================================
// Drivers
// =============================================================================

/// Runs a safe-try body to completion synchronously.
///
/// Returns the body's own result, or the first error unwrapped through the
/// scope. Steps before the failing unwrap have run; nothing after it runs.
///
/// # Panics
///
/// Panics if the body suspends on something other than a failed unwrap,
/// e.g. a pending `AsyncResult`. Use [`safe_try_async`] for such bodies.
pub fn safe_try<T, E, B, Fut>(body: B) -> Result<T, E>
where
    B: FnOnce(TryScope<E>) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let scope = TryScope::new();
    let mut body = std::pin::pin!(body(scope.clone()));
    let mut context = Context::from_waker(futures::task::noop_waker_ref());

    match scope.settle(body.as_mut().poll(&mut context), "safe_try") {
        Poll::Ready(result) => result,
        Poll::Pending => panic!(
            "safe_try body suspended without a failed unwrap; \
             use safe_try_async for bodies that await pending work"
        ),
    }
}

/// Runs a safe-try body as an [`AsyncResult`].
///
/// The body may await arbitrary asynchronous work between unwraps.
///
/// # Examples
///
/// ```rust
/// use resultant::async_result::AsyncResult;
/// use resultant::safe_try::{SafeUnwrap, TryScope, safe_try_async};
///
/// # futures::executor::block_on(async {
/// let total = safe_try_async(|scope: TryScope<String>| async move {
///     let first = AsyncResult::<i32, String>::from_safe_future(async { 20 })
///         .safe_unwrap(&scope)
///         .await;
///     let second = Ok::<_, String>(22).safe_unwrap(&scope).await;
///     Ok(first + second)
/// })
/// .await;
/// assert_eq!(total, Ok(42));
/// # });
/// ```
pub fn safe_try_async<T, E, B, Fut>(body: B) -> AsyncResult<T, E>
where
    B: FnOnce(TryScope<E>) -> Fut,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let scope = TryScope::new();
    let body = body(scope.clone());
    AsyncResult::from_result_future(SafeTry::Running { body, scope })
}

pin_project! {
    /// Driver state for [`safe_try_async`].
    ///
    /// - `Running` -> `Running` while the body awaits real work
    /// - `Running` -> `Completed` when the body returns or a failed unwrap is
    ///   recorded
    #[project = SafeTryProj]
    enum SafeTry<Fut, E> {
        Running {
            #[pin]
            body: Fut,
            scope: TryScope<E>,
        },
        Completed,
    }
}

impl<T, E, Fut> Future for SafeTry<Fut, E>
where
    Fut: Future<Output = Result<T, E>>,
{
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let output = match self.as_mut().project() {
            SafeTryProj::Running { body, scope } => {
                ready!(scope.settle(body.poll(context), "safe_try_async"))
            }
            SafeTryProj::Completed => panic!("SafeTry polled after completion"),
        };

        self.set(Self::Completed);
        Poll::Ready(output)
    }
}
