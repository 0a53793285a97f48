//! # resultant
//!
//! Composable fallible values for Rust, synchronous and asynchronous.
//!
//! ## Overview
//!
//! Failures should be visible in a function's signature and composed as
//! values. The standard [`Result`] already gives the two-variant container;
//! this library builds the rest of the toolkit around it:
//!
//! - **Result core** ([`result`]): `ok`/`err` constructors, taps
//!   (`and_through`, `and_tee`, `or_tee`), `fold`, bridges into async chains,
//!   `unsafe_unwrap` diagnostics, and `from_throwable` for panicking code
//! - **Async results** ([`async_result`]): `AsyncResult<T, E>`, a future that
//!   settles to a `Result<T, E>` and re-exposes the same combinators, mixing
//!   sync and async steps freely
//! - **List combinators** ([`combine`]): first-error and all-errors reduction
//!   of lists and heterogeneous tuples, sync and async
//! - **Early return** ([`safe_try`]): `safe_try` / `safe_try_async` bodies
//!   that stop at the first failed unwrap
//!
//! ## Example
//!
//! ```rust
//! use resultant::prelude::*;
//!
//! fn parse(input: &str) -> Result<i32, String> {
//!     input.parse::<i32>().map_err(|error| error.to_string())
//! }
//!
//! # futures::executor::block_on(async {
//! let total = parse("20")
//!     .and_tee(|value| println!("parsed {value}"))
//!     .async_and_then(|value| AsyncResult::from_safe_future(async move { value + 22 }))
//!     .await;
//! assert_eq!(total, Ok(42));
//!
//! assert_eq!(combine(vec![parse("1"), parse("x"), parse("y")]), Err("invalid digit found in string".to_string()));
//! # });
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for the unwrap diagnostics

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types, traits and functions.
///
/// # Usage
///
/// ```rust
/// use resultant::prelude::*;
/// ```
pub mod prelude {
    pub use crate::async_result::{AsyncResult, IntoAsyncResult, err_async, ok_async};
    pub use crate::combine::{
        Combine, combine, combine_async, combine_async_with_all_errors, combine_with_all_errors,
    };
    pub use crate::result::{
        ResultExt, Thrown, UnwrapConfig, UnwrapError, err, from_throwable, from_throwable_with, ok,
    };
    pub use crate::safe_try::{SafeUnwrap, TryScope, safe_try, safe_try_async};
}

pub mod async_result;
pub mod combine;
pub mod result;
pub mod safe_try;
