//! `AsyncResult` - a pending computation that settles to a `Result`.
//!
//! `AsyncResult<T, E>` wraps an asynchronous operation whose eventual output is
//! a `Result<T, E>`. It re-exposes the combinator surface of the result core
//! (`map`, `map_err`, `and_then`, `or_else`, taps, `fold`, `unwrap_or`) over the
//! pending value.
//!
//! # impl `Future`
//!
//! `AsyncResult` implements `Future<Output = Result<T, E>>` via
//! `pin_project_lite`, so awaiting it yields a plain `Result`:
//!
//! ```rust
//! use resultant::async_result::{err_async, ok_async};
//!
//! # futures::executor::block_on(async {
//! assert_eq!(ok_async::<i32, String>(12).await, Ok(12));
//! assert_eq!(err_async::<i32, _>("x").await, Err("x"));
//! # });
//! ```
//!
//! # Mixing sync and async steps
//!
//! Callbacks passed to `and_then`, `or_else` and `and_through` may return
//! either a `Result` or an `AsyncResult` (see [`IntoAsyncResult`]):
//!
//! ```rust
//! use resultant::async_result::AsyncResult;
//!
//! # futures::executor::block_on(async {
//! let result = AsyncResult::<i32, String>::ok(1)
//!     .and_then(|value| Ok(value + 1))
//!     .and_then(|value| AsyncResult::from_safe_future(async move { value * 10 }))
//!     .map(|value| value.to_string())
//!     .await;
//! assert_eq!(result, Ok("20".to_string()));
//! # });
//! ```
//!
//! # Evaluation
//!
//! Combinators never run their callbacks when the chain is built. An
//! `AsyncResult` built from a value that is already known (`ok`, `err`, a
//! lifted `Result`) is *settled*; a combinator on it stores the continuation
//! and runs it on the first poll, inside the awaiting task. Combinators on a
//! pending `AsyncResult` box a continuation that runs once the underlying
//! computation settles. Either way, continuations of one chain run in chain
//! order, and a chain that is dropped without being awaited runs none of them.
//!
//! # Failure channels
//!
//! Logical failures travel as `Err`. The only way an `AsyncResult` can fail
//! without producing a `Result` is a panic inside a future given to
//! [`AsyncResult::from_safe_future`], which by contract must not fail; that
//! panic unwinds through the awaiting task.

mod settle;

pub use settle::IntoAsyncResult;

use std::fmt;
use std::future::Future;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};

use futures::FutureExt;
use futures::future::BoxFuture;
use pin_project_lite::pin_project;

use crate::result::{ResultExt, Thrown, discard_panic, guard};

// =============================================================================
// AsyncResult Struct Definition
// =============================================================================

pin_project! {
    /// A pending computation that settles to a `Result<T, E>`.
    ///
    /// Construct one with [`AsyncResult::ok`], [`AsyncResult::err`],
    /// [`AsyncResult::from_future`], [`AsyncResult::from_safe_future`],
    /// [`AsyncResult::from_throwable`] or from a `Result` via
    /// [`IntoAsyncResult`].
    ///
    /// # Monad Laws
    ///
    /// 1. **Left Identity**: `AsyncResult::ok(a).and_then(f) == f(a)`
    /// 2. **Right Identity**: `m.and_then(AsyncResult::ok) == m`
    /// 3. **Associativity**: `m.and_then(f).and_then(g) == m.and_then(|x| f(x).and_then(g))`
    #[must_use = "an AsyncResult does nothing unless it is awaited"]
    pub struct AsyncResult<T, E> {
        #[pin]
        state: AsyncResultState<T, E>,
    }
}

pin_project! {
    /// Internal state machine for `AsyncResult`.
    ///
    /// - `Settled` -> `Completed` (first poll hands out the result)
    /// - `Deferred` -> any state (first poll runs the stored continuation and
    ///   takes over the state of the `AsyncResult` it returns)
    /// - `Pending` -> `Completed` (when the boxed future completes)
    #[project = AsyncResultStateProj]
    enum AsyncResultState<T, E> {
        Settled {
            result: Option<Result<T, E>>,
        },
        Deferred {
            continuation: Option<Box<dyn FnOnce() -> AsyncResult<T, E> + Send>>,
        },
        Pending {
            #[pin]
            future: BoxFuture<'static, Result<T, E>>,
        },
        Completed,
    }
}

// =============================================================================
// Future Implementation
// =============================================================================

impl<T, E> Future for AsyncResult<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            let output = match this.state.as_mut().project() {
                AsyncResultStateProj::Settled { result } => result
                    .take()
                    .expect("AsyncResult internal error: settled result was already taken"),
                AsyncResultStateProj::Deferred { continuation } => {
                    let continuation = continuation
                        .take()
                        .expect("AsyncResult internal error: continuation was already consumed");
                    let next = continuation();
                    this.state.set(next.state);
                    continue;
                }
                AsyncResultStateProj::Pending { future } => ready!(future.poll(context)),
                AsyncResultStateProj::Completed => {
                    panic!("AsyncResult polled after completion")
                }
            };

            this.state.set(AsyncResultState::Completed);
            return Poll::Ready(output);
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

impl<T, E> AsyncResult<T, E> {
    /// Creates an already-settled `AsyncResult` from a `Result`.
    #[inline]
    pub(crate) const fn settled(result: Result<T, E>) -> Self {
        Self {
            state: AsyncResultState::Settled {
                result: Some(result),
            },
        }
    }

    /// Creates an already-succeeded `AsyncResult`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::async_result::AsyncResult;
    ///
    /// # futures::executor::block_on(async {
    /// let result = AsyncResult::<_, String>::ok(42).await;
    /// assert_eq!(result, Ok(42));
    /// # });
    /// ```
    #[inline]
    pub const fn ok(value: T) -> Self {
        Self::settled(Ok(value))
    }

    /// Creates an already-failed `AsyncResult`.
    #[inline]
    pub const fn err(error: E) -> Self {
        Self::settled(Err(error))
    }
}

impl<T: Send + 'static, E: Send + 'static> AsyncResult<T, E> {
    /// Wraps a future that already produces a `Result<T, E>`.
    pub fn from_result_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            state: AsyncResultState::Pending {
                future: Box::pin(future),
            },
        }
    }

    /// Wraps a future that cannot fail logically.
    ///
    /// The output of `future` becomes the `Ok` value. A panic inside `future`
    /// is not translated into `Err`: it unwinds through whoever awaits the
    /// `AsyncResult`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::async_result::AsyncResult;
    ///
    /// # futures::executor::block_on(async {
    /// let result = AsyncResult::<_, String>::from_safe_future(async { 7 }).await;
    /// assert_eq!(result, Ok(7));
    /// # });
    /// ```
    pub fn from_safe_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = T> + Send + 'static,
    {
        Self::from_result_future(future.map(Ok))
    }

    /// Wraps a future that may fail, mapping its error with `error_function`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::async_result::AsyncResult;
    ///
    /// # futures::executor::block_on(async {
    /// let failing = async { "nope".parse::<i32>() };
    /// let result = AsyncResult::from_future(failing, |error| error.to_string()).await;
    /// assert_eq!(result, Err("invalid digit found in string".to_string()));
    /// # });
    /// ```
    pub fn from_future<X, Fut, G>(future: Fut, error_function: G) -> Self
    where
        Fut: Future<Output = Result<T, X>> + Send + 'static,
        G: FnOnce(X) -> E + Send + 'static,
        X: 'static,
    {
        Self::from_result_future(async move { future.await.map_err(error_function) })
    }

    /// Wraps an asynchronous function that may panic, mapping the panic with
    /// `error_function`.
    ///
    /// Both a panic raised while calling `function` and a panic raised while
    /// its future runs end up as `Err(error_function(thrown))`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::async_result::AsyncResult;
    ///
    /// # futures::executor::block_on(async {
    /// let fetch = AsyncResult::from_throwable_with(
    ///     |id: u32| async move {
    ///         assert!(id != 0, "unknown id");
    ///         format!("user-{id}")
    ///     },
    ///     |thrown| thrown.message().unwrap_or_default().to_string(),
    /// );
    ///
    /// assert_eq!(fetch(3).await, Ok("user-3".to_string()));
    /// assert_eq!(fetch(0).await, Err("unknown id".to_string()));
    /// # });
    /// ```
    pub fn from_throwable_with<A, Fut, F, G>(function: F, error_function: G) -> impl Fn(A) -> Self
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
        G: Fn(Thrown) -> E + Send + Sync + 'static,
    {
        let error_function = Arc::new(error_function);
        move |argument| match catch_unwind(AssertUnwindSafe(|| function(argument))) {
            Ok(future) => {
                let error_function = Arc::clone(&error_function);
                Self::from_result_future(async move {
                    AssertUnwindSafe(future)
                        .catch_unwind()
                        .await
                        .map_err(|payload| {
                            let thrown = Thrown::new(payload);
                            tracing::debug!(panic = %thrown, "converted async panic into Err");
                            error_function(thrown)
                        })
                })
            }
            Err(payload) => {
                let thrown = Thrown::new(payload);
                tracing::debug!(panic = %thrown, "converted panic into Err");
                Self::err(error_function(thrown))
            }
        }
    }
}

impl<T: Send + 'static> AsyncResult<T, Thrown> {
    /// Wraps an asynchronous function that may panic.
    ///
    /// The caught panic payload becomes the error as-is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::async_result::AsyncResult;
    ///
    /// # futures::executor::block_on(async {
    /// let halve = AsyncResult::from_throwable(|value: i32| async move {
    ///     assert!(value % 2 == 0, "odd input");
    ///     value / 2
    /// });
    ///
    /// assert_eq!(halve(8).await.ok(), Some(4));
    /// assert_eq!(halve(3).await.unwrap_err().message(), Some("odd input"));
    /// # });
    /// ```
    pub fn from_throwable<A, Fut, F>(function: F) -> impl Fn(A) -> Self
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self::from_throwable_with(function, |thrown| thrown)
    }
}

/// Creates an already-succeeded [`AsyncResult`].
#[inline]
pub const fn ok_async<T, E>(value: T) -> AsyncResult<T, E> {
    AsyncResult::ok(value)
}

/// Creates an already-failed [`AsyncResult`].
#[inline]
pub const fn err_async<T, E>(error: E) -> AsyncResult<T, E> {
    AsyncResult::err(error)
}

// =============================================================================
// Combinators
// =============================================================================

impl<T: Send + 'static, E: Send + 'static> AsyncResult<T, E> {
    /// Stores `continuation` to run on the first poll.
    fn deferred<F>(continuation: F) -> Self
    where
        F: FnOnce() -> Self + Send + 'static,
    {
        Self {
            state: AsyncResultState::Deferred {
                continuation: Some(Box::new(continuation)),
            },
        }
    }

    /// Registers `continuation` to run on the settled result.
    ///
    /// Settled and deferred values get a deferred continuation that runs on
    /// the first poll without spawning a future; pending ones get a boxed
    /// future that runs it once the underlying computation completes.
    fn then_settle<R, F>(self, continuation: F) -> AsyncResult<R::Ok, R::Err>
    where
        F: FnOnce(Result<T, E>) -> R + Send + 'static,
        R: IntoAsyncResult,
        R::Ok: Send + 'static,
        R::Err: Send + 'static,
    {
        match self.state {
            AsyncResultState::Settled {
                result: Some(result),
            } => AsyncResult::deferred(move || continuation(result).into_async_result()),
            AsyncResultState::Deferred {
                continuation: Some(upstream),
            } => AsyncResult::deferred(move || upstream().then_settle(continuation)),
            state => AsyncResult::from_result_future(async move {
                let result = Self { state }.await;
                let next = continuation(result).into_async_result();
                next.await
            }),
        }
    }

    /// Maps the `Ok` value.
    ///
    /// `function` is never called on `Err`.
    pub fn map<U, F>(self, function: F) -> AsyncResult<U, E>
    where
        F: FnOnce(T) -> U + Send + 'static,
        U: Send + 'static,
    {
        self.then_settle(move |result| result.map(function))
    }

    /// Maps the `Ok` value with an asynchronous function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::async_result::AsyncResult;
    ///
    /// # futures::executor::block_on(async {
    /// let result = AsyncResult::<i32, ()>::ok(2)
    ///     .async_map(|value| async move { value * 3 })
    ///     .await;
    /// assert_eq!(result, Ok(6));
    /// # });
    /// ```
    pub fn async_map<U, F, Fut>(self, function: F) -> AsyncResult<U, E>
    where
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
        U: Send + 'static,
    {
        self.then_settle(move |result| result.async_map(function))
    }

    /// Maps the `Err` value.
    ///
    /// `function` is never called on `Ok`.
    pub fn map_err<F2, G>(self, function: G) -> AsyncResult<T, F2>
    where
        G: FnOnce(E) -> F2 + Send + 'static,
        F2: Send + 'static,
    {
        self.then_settle(move |result| result.map_err(function))
    }

    /// Chains a step that may fail.
    ///
    /// `function` may return a `Result` or an `AsyncResult`. On `Err` it is
    /// not called and the error passes through.
    pub fn and_then<U, R, F>(self, function: F) -> AsyncResult<U, E>
    where
        F: FnOnce(T) -> R + Send + 'static,
        R: IntoAsyncResult<Ok = U, Err = E>,
        U: Send + 'static,
    {
        self.then_settle(move |result| result.async_and_then(function))
    }

    /// Recovers from an `Err`.
    ///
    /// `function` may return a `Result` or an `AsyncResult`. On `Ok` it is not
    /// called and the value passes through.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::async_result::AsyncResult;
    ///
    /// # futures::executor::block_on(async {
    /// let recovered = AsyncResult::<i32, &str>::err("missing")
    ///     .or_else(|_| Ok::<_, String>(0))
    ///     .await;
    /// assert_eq!(recovered, Ok(0));
    /// # });
    /// ```
    pub fn or_else<F2, R, G>(self, function: G) -> AsyncResult<T, F2>
    where
        G: FnOnce(E) -> R + Send + 'static,
        R: IntoAsyncResult<Ok = T, Err = F2>,
        F2: Send + 'static,
    {
        self.then_settle(move |result| match result {
            Ok(value) => AsyncResult::ok(value),
            Err(error) => function(error).into_async_result(),
        })
    }

    /// Runs a fallible step on the `Ok` value and keeps the original value.
    ///
    /// If the step fails, the chain becomes that `Err`; its success value is
    /// discarded. A panic while calling `function` or while its step runs is
    /// caught and discarded, and the original `Ok` passes through.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::async_result::AsyncResult;
    ///
    /// # futures::executor::block_on(async {
    /// let kept = AsyncResult::<i32, String>::ok(5)
    ///     .and_through(|_| AsyncResult::<(), String>::from_safe_future(async { panic!("audit failed") }))
    ///     .await;
    /// assert_eq!(kept, Ok(5));
    /// # });
    /// ```
    pub fn and_through<U, R, F>(self, function: F) -> Self
    where
        F: FnOnce(&T) -> R + Send + 'static,
        R: IntoAsyncResult<Ok = U, Err = E>,
        U: Send + 'static,
    {
        self.then_settle(move |result| match result {
            Ok(value) => match guard(|| function(&value).into_async_result(), "and_through") {
                Some(step) => AsyncResult::from_result_future(async move {
                    match AssertUnwindSafe(step).catch_unwind().await {
                        Ok(Err(error)) => Err(error),
                        Ok(Ok(_)) => Ok(value),
                        Err(payload) => {
                            discard_panic(payload, "and_through");
                            Ok(value)
                        }
                    }
                }),
                None => AsyncResult::ok(value),
            },
            Err(error) => AsyncResult::err(error),
        })
    }

    /// Runs an infallible side effect on the `Ok` value.
    ///
    /// A panic inside `function` is caught and discarded.
    pub fn and_tee<F>(self, function: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.then_settle(move |result| result.and_tee(function))
    }

    /// Runs an infallible side effect on the `Err` value.
    ///
    /// A panic inside `function` is caught and discarded.
    pub fn or_tee<F>(self, function: F) -> Self
    where
        F: FnOnce(&E) + Send + 'static,
    {
        self.then_settle(move |result| result.or_tee(function))
    }
}

// =============================================================================
// Elimination
// =============================================================================

impl<T, E> AsyncResult<T, E> {
    /// Waits for the result and calls exactly one of the two functions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::async_result::AsyncResult;
    ///
    /// # futures::executor::block_on(async {
    /// let label = AsyncResult::<i32, String>::ok(5)
    ///     .fold(|value| format!("value {value}"), |error| error)
    ///     .await;
    /// assert_eq!(label, "value 5");
    /// # });
    /// ```
    pub async fn fold<X, OnOk, OnErr>(self, on_ok: OnOk, on_err: OnErr) -> X
    where
        OnOk: FnOnce(T) -> X,
        OnErr: FnOnce(E) -> X,
    {
        self.await.fold(on_ok, on_err)
    }

    /// Waits for the result and returns the `Ok` value or `default`.
    pub async fn unwrap_or(self, default: T) -> T {
        self.await.unwrap_or(default)
    }
}

impl<T, E> From<Result<T, E>> for AsyncResult<T, E> {
    #[inline]
    fn from(result: Result<T, E>) -> Self {
        Self::settled(result)
    }
}

impl<T, E> fmt::Debug for AsyncResult<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            AsyncResultState::Settled { .. } => "settled",
            AsyncResultState::Deferred { .. } => "deferred",
            AsyncResultState::Pending { .. } => "pending",
            AsyncResultState::Completed => "completed",
        };
        formatter.debug_tuple("AsyncResult").field(&state).finish()
    }
}

static_assertions::assert_impl_all!(AsyncResult<i32, String>: Send, Unpin);
