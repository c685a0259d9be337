//! Insertion-ordered maps with array-like algorithms.
//!
//! This crate provides [`OrderedMap`], a hash map that remembers the order in
//! which its keys were inserted, and the [`Collection`] trait, which layers
//! sequence-style operations on top of it:
//!
//! - [`at`](Collection::at) - Get the value at a position, counting from the back with negative indices
//! - [`random`](Collection::random) / [`random_many`](Collection::random_many) - Uniform sampling without replacement
//! - [`find`](Collection::find), [`find_last`](Collection::find_last),
//!   [`find_key`](Collection::find_key), [`find_last_key`](Collection::find_last_key) - Directional search
//! - [`reverse`](Collection::reverse) - In-place reversal of the iteration order
//! - [`filter`](Collection::filter) - Filtering that returns the receiver's own type
//!
//! # Example
//!
//! ```
//! use ordered_collection::{Collection, OrderedMap, Position};
//!
//! let mut scores = OrderedMap::new();
//! scores.insert("Carol", 92);
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//!
//! // Standard map operations work as expected
//! assert_eq!(scores.get("Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Iteration and positions follow insertion order
//! assert_eq!(scores.at(0), Some(&92));
//! assert_eq!(scores.at(-1), Some(&85));
//! assert_eq!(scores[Position(1)], 100);
//!
//! // Directional search
//! assert_eq!(scores.find_key(|&s, _, _| s > 90), Some(&"Carol"));
//! assert_eq!(scores.find_last_key(|&s, _, _| s > 90), Some(&"Alice"));
//!
//! // Filtering builds a new map and leaves the original alone
//! let honours = scores.filter(|&s, _, _| s >= 90);
//! assert_eq!(honours.len(), 2);
//! assert_eq!(scores.len(), 3);
//! ```
//!
//! # Specialized collections
//!
//! Any type that wraps an [`OrderedMap`] can implement [`Collection`] by
//! exposing the map and a constructor for an empty instance of itself. The
//! trait's operations then work on the wrapper, and `filter` returns the
//! wrapper type. See the [`Collection`] documentation for an example.
//!
//! # Concurrency
//!
//! The collections are plain in-memory values. Mutation needs `&mut`, so
//! sharing one across threads requires the usual external synchronization.

// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod collection;
mod error;
mod position;

pub mod ordered_map;

pub use collection::Collection;
pub use error::{Error, Result};
pub use ordered_map::OrderedMap;
pub use position::{IntoPosition, Position};
