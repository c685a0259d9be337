use thiserror::Error;

/// Errors returned by the fallible positional and insertion operations of
/// [`OrderedMap`](crate::OrderedMap).
///
/// Lookups never fail with an error; they return `None` instead.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The key passed to [`try_insert`](crate::OrderedMap::try_insert) is
    /// already present.
    #[error("key is already present at position {position}")]
    Occupied {
        /// Where the existing entry lives in iteration order.
        position: usize,
    },

    /// A signed position did not resolve inside `[-len, len)`.
    #[error("position {index} is out of bounds for a collection of length {len}")]
    OutOfBounds {
        /// The position as supplied, after conversion to `isize`.
        index: isize,
        /// The collection length at the time of the call.
        len: usize,
    },
}

/// Shorthand for results whose error type defaults to [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
