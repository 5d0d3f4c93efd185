//! Error types for the fallible edges of the library.
//!
//! Every conversion in [`coerce`](crate::coerce), [`text`](crate::text) and
//! [`array`](crate::array) is total and never fails. Errors only come from:
//!
//! - **Strict extraction**: `TryFrom<Value>` when the variant is not the one asked for
//! - **Transform parsing**: an unknown op name or a bad argument in the compact
//!   `op:arg` form accepted by [`Transform`](crate::Transform) and
//!   [`Pipeline`](crate::Pipeline)
//! - **Serde plumbing**: messages raised through `serde::de::Error` / `serde::ser::Error`
//!
//! ## Examples
//!
//! ```rust
//! use varconv::{Error, Transform};
//!
//! let result: Result<Transform, Error> = "shout".parse();
//! assert!(matches!(result, Err(Error::UnknownTransform(_))));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Strict extraction found a different variant than the one requested
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Transform op name that does not exist
    #[error("Unknown transform: {0}")]
    UnknownTransform(String),

    /// Missing or unparsable transform argument
    #[error("Invalid argument for `{op}`: {msg}")]
    InvalidArgument { op: String, msg: String },

    /// Message raised through serde
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error for strict extraction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use varconv::Error;
    ///
    /// let err = Error::type_mismatch("integer", "string");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unknown transform error.
    pub fn unknown_transform(name: &str) -> Self {
        Error::UnknownTransform(name.to_string())
    }

    /// Creates an invalid argument error for the given transform op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use varconv::Error;
    ///
    /// let err = Error::invalid_argument("to_minimum", "expected a number");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid argument for `to_minimum`: expected a number"
    /// );
    /// ```
    pub fn invalid_argument<T: fmt::Display>(op: &str, msg: T) -> Self {
        Error::InvalidArgument {
            op: op.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
