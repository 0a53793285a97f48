//! Panic payloads captured by the `from_throwable` family.

use std::any::Any;
use std::fmt;

/// A panic caught while running a wrapped function.
///
/// `Thrown` is the error type produced by `from_throwable` when no error
/// mapping function is supplied: the panic payload is kept as-is.
///
/// # Examples
///
/// ```rust
/// use resultant::result::from_throwable;
///
/// let parse = from_throwable(|input: &str| input.parse::<i32>().unwrap());
///
/// assert_eq!(parse("42").ok(), Some(42));
///
/// let thrown = parse("forty-two").unwrap_err();
/// assert!(thrown.message().unwrap().contains("ParseIntError"));
/// ```
pub struct Thrown {
    payload: Box<dyn Any + Send>,
}

impl Thrown {
    /// Wraps a panic payload, as returned by `std::panic::catch_unwind`.
    #[must_use]
    pub fn new(payload: Box<dyn Any + Send>) -> Self {
        Self { payload }
    }

    /// Returns the panic message when the payload is a `&str` or a `String`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| self.payload.downcast_ref::<String>().map(String::as_str))
    }

    /// Returns a reference to the payload if it is of type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref()
    }

    /// Recovers the payload as a `T`, or gives `self` back when it is not one.
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` if the payload is not a `T`.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        self.payload
            .downcast::<T>()
            .map(|value| *value)
            .map_err(Self::new)
    }

    /// Returns the raw payload, e.g. to resume unwinding with
    /// `std::panic::resume_unwind`.
    #[must_use]
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }
}

impl fmt::Debug for Thrown {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Thrown")
            .field("message", &self.message())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Thrown {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(formatter, "panicked: {message}"),
            None => write!(formatter, "panicked with a non-string payload"),
        }
    }
}

impl std::error::Error for Thrown {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_message_from_static_str() {
        let thrown = Thrown::new(Box::new("static"));
        assert_eq!(thrown.message(), Some("static"));
        assert_eq!(thrown.to_string(), "panicked: static");
    }

    #[rstest]
    fn test_message_from_string() {
        let thrown = Thrown::new(Box::new(String::from("owned")));
        assert_eq!(thrown.message(), Some("owned"));
    }

    #[rstest]
    fn test_downcast_custom_payload() {
        let thrown = Thrown::new(Box::new(7_u8));
        assert_eq!(thrown.message(), None);
        assert_eq!(thrown.downcast_ref::<u8>(), Some(&7));
        assert_eq!(thrown.downcast::<u8>().ok(), Some(7));
    }

    #[rstest]
    fn test_downcast_wrong_type_returns_self() {
        let thrown = Thrown::new(Box::new("text"));
        let thrown = thrown.downcast::<u32>().unwrap_err();
        assert_eq!(thrown.message(), Some("text"));
    }
}
