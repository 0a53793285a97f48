//! The synchronous result core.
//!
//! The two-variant container is the standard [`Result`]: it is already a
//! closed sum type with structural equality, and it already provides `is_ok`,
//! `is_err`, `map`, `map_err`, `and_then`, `or_else` and `unwrap_or`. This
//! module adds what the standard type lacks:
//!
//! - [`ok`] / [`err`]: variant constructors usable as plain functions
//! - [`ResultExt`]: taps (`and_through`, `and_tee`, `or_tee`), `fold`,
//!   bridges into [`AsyncResult`], and the `unsafe_unwrap` escape hatches
//! - [`from_throwable`] / [`from_throwable_with`]: turn a panicking function
//!   into one returning `Result`
//!
//! # Examples
//!
//! ```rust
//! use resultant::result::{ResultExt, err, ok};
//!
//! let total = ok::<i32, String>(20)
//!     .map(|value| value + 1)
//!     .and_then(|value| if value > 0 { ok(value * 2) } else { err("negative".to_string()) })
//!     .fold(|value| value, |_| 0);
//! assert_eq!(total, 42);
//! ```

mod thrown;
mod unwrap;

pub use thrown::Thrown;
pub use unwrap::{UnwrapConfig, UnwrapData, UnwrapError, Variant};

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::async_result::{AsyncResult, IntoAsyncResult};

// =============================================================================
// Constructors
// =============================================================================

/// Creates an `Ok` result.
///
/// # Examples
///
/// ```rust
/// use resultant::result::ok;
///
/// let value = ok::<_, String>(42);
/// assert!(value.is_ok());
/// assert_eq!(value.unwrap_or(0), 42);
///
/// // Unit success values need no payload of their own.
/// let done: Result<(), String> = ok(());
/// assert!(done.is_ok());
/// ```
#[inline]
pub const fn ok<T, E>(value: T) -> Result<T, E> {
    Ok(value)
}

/// Creates an `Err` result.
///
/// # Examples
///
/// ```rust
/// use resultant::result::err;
///
/// let failure = err::<i32, _>("Yolo");
/// assert!(failure.is_err());
/// assert_eq!(failure.unwrap_or(7), 7);
/// ```
#[inline]
pub const fn err<T, E>(error: E) -> Result<T, E> {
    Err(error)
}

// =============================================================================
// ResultExt
// =============================================================================

/// Combinators on [`Result`] beyond those of the standard library.
///
/// All combinators consume `self` and return a fresh value; nothing is
/// mutated in place.
pub trait ResultExt<T, E>: Sized {
    /// Runs a fallible side effect on the `Ok` value and keeps the original
    /// value.
    ///
    /// If `function` returns `Err`, the chain becomes that `Err`. Its `Ok`
    /// payload is discarded. On `Err`, `function` is not called. A panic inside
    /// `function` is caught and discarded, and the original `Ok` passes
    /// through.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::result::{ResultExt, err, ok};
    ///
    /// let validated = ok::<i32, &str>(5).and_through(|value| if *value > 0 { ok(()) } else { err("zero") });
    /// assert_eq!(validated, Ok(5));
    ///
    /// let rejected = ok::<i32, &str>(0).and_through(|value| if *value > 0 { ok(()) } else { err("zero") });
    /// assert_eq!(rejected, Err("zero"));
    /// ```
    fn and_through<U, F>(self, function: F) -> Result<T, E>
    where
        F: FnOnce(&T) -> Result<U, E>;

    /// Runs an infallible side effect on the `Ok` value.
    ///
    /// The result passes through unchanged. A panic inside `function` is
    /// caught and discarded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::result::{ResultExt, ok};
    ///
    /// let mut seen = Vec::new();
    /// let value = ok::<i32, ()>(3).and_tee(|value| seen.push(*value));
    /// assert_eq!(value, Ok(3));
    /// assert_eq!(seen, vec![3]);
    /// ```
    fn and_tee<F>(self, function: F) -> Result<T, E>
    where
        F: FnOnce(&T);

    /// Runs an infallible side effect on the `Err` value.
    ///
    /// The result passes through unchanged. A panic inside `function` is
    /// caught and discarded.
    fn or_tee<F>(self, function: F) -> Result<T, E>
    where
        F: FnOnce(&E);

    /// Eliminates the result, calling exactly one of the two functions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::result::{ResultExt, err};
    ///
    /// let message = err::<i32, _>("bad input").fold(|value| value.to_string(), |error| format!("failed: {error}"));
    /// assert_eq!(message, "failed: bad input");
    /// ```
    fn fold<X, OnOk, OnErr>(self, on_ok: OnOk, on_err: OnErr) -> X
    where
        OnOk: FnOnce(T) -> X,
        OnErr: FnOnce(E) -> X;

    /// Maps the `Ok` value with an asynchronous function.
    ///
    /// On `Err`, `function` is not called and an already-failed
    /// [`AsyncResult`] is returned.
    fn async_map<U, F, Fut>(self, function: F) -> AsyncResult<U, E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U> + Send + 'static,
        U: Send + 'static,
        E: Send + 'static;

    /// Chains an asynchronous step that may fail.
    ///
    /// `function` may return either a `Result` or an [`AsyncResult`]. On
    /// `Err`, `function` is not called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resultant::async_result::AsyncResult;
    /// use resultant::result::{ResultExt, ok};
    ///
    /// # futures::executor::block_on(async {
    /// let doubled = ok::<i32, String>(21)
    ///     .async_and_then(|value| AsyncResult::ok(value * 2))
    ///     .await;
    /// assert_eq!(doubled, Ok(42));
    /// # });
    /// ```
    fn async_and_then<U, R, F>(self, function: F) -> AsyncResult<U, E>
    where
        F: FnOnce(T) -> R,
        R: IntoAsyncResult<Ok = U, Err = E>;

    /// Returns the `Ok` value.
    ///
    /// Intended for tests and tooling only.
    ///
    /// # Panics
    ///
    /// Panics with an [`UnwrapError`] payload when called on an `Err`.
    fn unsafe_unwrap(self) -> T
    where
        E: fmt::Debug,
    {
        self.unsafe_unwrap_with(UnwrapConfig::default())
    }

    /// Like [`unsafe_unwrap`](Self::unsafe_unwrap), with explicit diagnostic
    /// configuration.
    ///
    /// # Panics
    ///
    /// Panics with an [`UnwrapError`] payload when called on an `Err`.
    fn unsafe_unwrap_with(self, config: UnwrapConfig) -> T
    where
        E: fmt::Debug;

    /// Returns the `Err` value.
    ///
    /// Intended for tests and tooling only.
    ///
    /// # Panics
    ///
    /// Panics with an [`UnwrapError`] payload when called on an `Ok`.
    fn unsafe_unwrap_err(self) -> E
    where
        T: fmt::Debug,
    {
        self.unsafe_unwrap_err_with(UnwrapConfig::default())
    }

    /// Like [`unsafe_unwrap_err`](Self::unsafe_unwrap_err), with explicit
    /// diagnostic configuration.
    ///
    /// # Panics
    ///
    /// Panics with an [`UnwrapError`] payload when called on an `Ok`.
    fn unsafe_unwrap_err_with(self, config: UnwrapConfig) -> E
    where
        T: fmt::Debug;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    #[inline]
    fn and_through<U, F>(self, function: F) -> Self
    where
        F: FnOnce(&T) -> Result<U, E>,
    {
        match self {
            Ok(value) => match guard(|| function(&value), "and_through") {
                Some(Err(error)) => Err(error),
                Some(Ok(_)) | None => Ok(value),
            },
            Err(error) => Err(error),
        }
    }

    fn and_tee<F>(self, function: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Ok(value) = &self {
            guard(|| function(value), "and_tee");
        }
        self
    }

    fn or_tee<F>(self, function: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Err(error) = &self {
            guard(|| function(error), "or_tee");
        }
        self
    }

    #[inline]
    fn fold<X, OnOk, OnErr>(self, on_ok: OnOk, on_err: OnErr) -> X
    where
        OnOk: FnOnce(T) -> X,
        OnErr: FnOnce(E) -> X,
    {
        match self {
            Ok(value) => on_ok(value),
            Err(error) => on_err(error),
        }
    }

    fn async_map<U, F, Fut>(self, function: F) -> AsyncResult<U, E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U> + Send + 'static,
        U: Send + 'static,
        E: Send + 'static,
    {
        match self {
            Ok(value) => AsyncResult::from_safe_future(function(value)),
            Err(error) => AsyncResult::err(error),
        }
    }

    fn async_and_then<U, R, F>(self, function: F) -> AsyncResult<U, E>
    where
        F: FnOnce(T) -> R,
        R: IntoAsyncResult<Ok = U, Err = E>,
    {
        match self {
            Ok(value) => function(value).into_async_result(),
            Err(error) => AsyncResult::err(error),
        }
    }

    fn unsafe_unwrap_with(self, config: UnwrapConfig) -> T
    where
        E: fmt::Debug,
    {
        match self {
            Ok(value) => value,
            Err(error) => UnwrapError::new(
                Variant::Err,
                &error,
                "called `unsafe_unwrap` on an `Err` value",
                config,
            )
            .raise(),
        }
    }

    fn unsafe_unwrap_err_with(self, config: UnwrapConfig) -> E
    where
        T: fmt::Debug,
    {
        match self {
            Ok(value) => UnwrapError::new(
                Variant::Ok,
                &value,
                "called `unsafe_unwrap_err` on an `Ok` value",
                config,
            )
            .raise(),
            Err(error) => error,
        }
    }
}

/// Runs a tapped callback, swallowing any panic it raises.
///
/// Returns `None` when the callback panicked.
pub(crate) fn guard<X, F: FnOnce() -> X>(function: F, operation: &'static str) -> Option<X> {
    catch_unwind(AssertUnwindSafe(function))
        .map_err(|payload| discard_panic(payload, operation))
        .ok()
}

/// Logs and drops a panic payload caught from a tapped callback.
pub(crate) fn discard_panic(payload: Box<dyn Any + Send>, operation: &'static str) {
    let thrown = Thrown::new(payload);
    tracing::debug!(operation, panic = %thrown, "discarded panic from tapped callback");
}

// =============================================================================
// fromThrowable
// =============================================================================

/// Wraps a function that may panic into one that returns a `Result`.
///
/// A panic raised by `function` is caught and returned as `Err(Thrown)`,
/// carrying the panic payload unchanged. Functions of several arguments take
/// a tuple.
///
/// # Examples
///
/// ```rust
/// use resultant::result::from_throwable;
///
/// let divide = from_throwable(|(left, right): (i32, i32)| {
///     if right == 0 {
///         panic!("division by zero");
///     }
///     left / right
/// });
///
/// assert_eq!(divide((10, 2)).ok(), Some(5));
/// assert_eq!(divide((1, 0)).unwrap_err().message(), Some("division by zero"));
/// ```
pub fn from_throwable<A, T, F>(function: F) -> impl Fn(A) -> Result<T, Thrown>
where
    F: Fn(A) -> T,
{
    from_throwable_with(function, |thrown| thrown)
}

/// Wraps a function that may panic into one that returns a `Result`, mapping
/// the caught panic through `error_function`.
///
/// # Examples
///
/// ```rust
/// use resultant::result::from_throwable_with;
///
/// let parse = from_throwable_with(
///     |input: String| input.parse::<u8>().expect("not a byte"),
///     |thrown| thrown.message().unwrap_or_default().to_string(),
/// );
///
/// assert_eq!(parse("12".to_string()), Ok(12));
/// assert!(parse("1200".to_string()).unwrap_err().starts_with("not a byte"));
/// ```
pub fn from_throwable_with<A, T, E, F, G>(
    function: F,
    error_function: G,
) -> impl Fn(A) -> Result<T, E>
where
    F: Fn(A) -> T,
    G: Fn(Thrown) -> E,
{
    move |argument| {
        catch_unwind(AssertUnwindSafe(|| function(argument))).map_err(|payload| {
            let thrown = Thrown::new(payload);
            tracing::debug!(panic = %thrown, "converted panic into Err");
            error_function(thrown)
        })
    }
}
