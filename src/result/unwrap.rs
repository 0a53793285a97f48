//! Diagnostics for the `unsafe_unwrap` escape hatches.
//!
//! `unsafe_unwrap` and friends exist for tests and tooling. Calling one on the
//! wrong variant is programmer misuse, and it is the only place where this
//! crate panics on purpose. The panic payload is an [`UnwrapError`] so a test
//! harness can recover the structured diagnostic with
//! [`UnwrapError::from_panic`].
//!
//! # Examples
//!
//! ```rust
//! use resultant::result::{ResultExt, UnwrapError, Variant, err};
//!
//! let outcome = std::panic::catch_unwind(|| err::<i32, _>("boom").unsafe_unwrap());
//! let error = UnwrapError::from_panic(outcome.unwrap_err()).unwrap();
//!
//! assert_eq!(error.data.variant, Variant::Err);
//! assert_eq!(error.data.value, "\"boom\"");
//! assert!(error.stack.is_none());
//! ```

use std::any::Any;
use std::backtrace::Backtrace;
use std::fmt;

/// Configuration for the `unsafe_unwrap_with` family.
///
/// # Examples
///
/// ```rust
/// use resultant::result::UnwrapConfig;
///
/// assert!(!UnwrapConfig::default().with_stack_trace);
/// assert!(UnwrapConfig::with_stack_trace().with_stack_trace);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UnwrapConfig {
    /// Capture a stack trace into [`UnwrapError::stack`] when the unwrap fails.
    pub with_stack_trace: bool,
}

impl UnwrapConfig {
    /// Returns a configuration that captures a stack trace on failure.
    #[must_use]
    pub const fn with_stack_trace() -> Self {
        Self {
            with_stack_trace: true,
        }
    }
}

/// Which variant a failed unwrap actually found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    /// The value was an `Ok`.
    Ok,
    /// The value was an `Err`.
    Err,
}

impl fmt::Display for Variant {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(formatter, "Ok"),
            Self::Err => write!(formatter, "Err"),
        }
    }
}

/// The value found by a failed unwrap, rendered with its `Debug` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnwrapData {
    /// The variant that was found.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub variant: Variant,
    /// `Debug` rendering of the payload that was found.
    pub value: String,
}

/// Structured diagnostic raised when an `unsafe_unwrap` escape hatch is
/// called on the wrong variant.
///
/// # Examples
///
/// ```rust
/// use resultant::result::{UnwrapConfig, UnwrapError, Variant};
///
/// let error = UnwrapError::new(Variant::Ok, &42, "called `unsafe_unwrap_err` on an `Ok` value", UnwrapConfig::default());
/// assert_eq!(error.data.value, "42");
/// assert_eq!(
///     format!("{error}"),
///     "called `unsafe_unwrap_err` on an `Ok` value: Ok(42)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnwrapError {
    /// What the unwrap actually found.
    pub data: UnwrapData,
    /// Human readable description of the misuse.
    pub message: String,
    /// Stack trace captured at the failure site, when requested.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub stack: Option<String>,
}

impl UnwrapError {
    /// Builds a diagnostic for `value`, found in `variant`.
    pub fn new<V: fmt::Debug + ?Sized>(
        variant: Variant,
        value: &V,
        message: impl Into<String>,
        config: UnwrapConfig,
    ) -> Self {
        let stack = config
            .with_stack_trace
            .then(|| Backtrace::force_capture().to_string());
        Self {
            data: UnwrapData {
                variant,
                value: format!("{value:?}"),
            },
            message: message.into(),
            stack,
        }
    }

    /// Recovers the diagnostic from a panic payload produced by an
    /// `unsafe_unwrap` call.
    ///
    /// Returns `None` when the payload came from some other panic.
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Option<Self> {
        payload.downcast::<Self>().ok().map(|error| *error)
    }

    /// Panics with `self` as the payload.
    pub(crate) fn raise(self) -> ! {
        std::panic::panic_any(self)
    }
}

impl fmt::Display for UnwrapError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}: {}({})",
            self.message, self.data.variant, self.data.value
        )
    }
}

impl std::error::Error for UnwrapError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_default_config_omits_stack() {
        let error = UnwrapError::new(Variant::Err, "x", "message", UnwrapConfig::default());
        assert!(error.stack.is_none());
    }

    #[rstest]
    fn test_stack_trace_is_captured_when_requested() {
        let error = UnwrapError::new(Variant::Err, "x", "message", UnwrapConfig::with_stack_trace());
        assert!(error.stack.is_some());
    }

    #[rstest]
    fn test_from_panic_ignores_foreign_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("plain panic");
        assert!(UnwrapError::from_panic(payload).is_none());
    }

    #[rstest]
    #[case(Variant::Ok, "Ok")]
    #[case(Variant::Err, "Err")]
    fn test_variant_display(#[case] variant: Variant, #[case] expected: &str) {
        assert_eq!(variant.to_string(), expected);
    }
}
