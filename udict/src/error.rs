//! Errors raised by [`UDict`](crate::UDict) operations.

use std::fmt::Debug;

/// An error that occurred while reading, writing or combining a [`UDict`](crate::UDict).
///
/// Keys are rendered with their `Debug` representation so that the error type
/// doesn't depend on the key type of the dictionary that produced it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("key `{key}` not found and no default value is set")]
    MissingKey { key: String },

    #[error("position {position} is out of range for a dictionary of {len} keys")]
    PositionOutOfRange { position: isize, len: usize },

    #[error("range step cannot be zero")]
    ZeroStep,

    #[error("cannot assign {values} values to {keys} keys")]
    LengthMismatch { keys: usize, values: usize },

    #[error("a dictionary is built either from a mapping or from key/value pairs, not both")]
    ConflictingSources,

    #[error("arithmetic on key `{key}` failed")]
    Arith {
        key: String,
        #[source]
        source: ArithError,
    },
}

impl Error {
    pub(crate) fn missing_key<K: Debug + ?Sized>(key: &K) -> Self {
        Error::MissingKey {
            key: format!("{key:?}"),
        }
    }

    pub(crate) fn arith<K: Debug + ?Sized>(key: &K, source: ArithError) -> Self {
        Error::Arith {
            key: format!("{key:?}"),
            source,
        }
    }
}

/// The ways elementwise multiplication or division of two values can fail.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow")]
    Overflow,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
