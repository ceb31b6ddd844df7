//! This crate provides [`UDict`], an insertion-ordered dictionary with a few
//! conveniences layered on top of [`IndexMap`](indexmap::IndexMap):
//!
//! - entries can be read and written by key, by 1-based position, or by
//!   inclusive ranges of positions (see [`KeySelector`]);
//! - reads that miss can fall back to a default value;
//! - dictionaries combine like numbers: `+` merges, `-` removes matching
//!   entries, and values can be multiplied or divided elementwise or by a
//!   scalar (see [`Arith`]).
//!
//! ```rust
//! # use ufpy_udict::{KeySelector, Selection, UDict};
//! let dict = UDict::from_pairs([("x", 1), ("y", 2), ("z", 3)]);
//! assert_eq!(dict.get(&KeySelector::Position(2)), Ok(Selection::One(&2)));
//! assert_eq!(dict.reversed().to_string(), r#"u{"z": 3, "y": 2, "x": 1}"#);
//! ```

// Not yet implemented (do we need them?)
// - attribute-style access to string keys

pub mod arith;
pub mod error;
pub mod selector;
pub mod udict;

pub use arith::Arith;
pub use error::{ArithError, Error, Result};
pub use selector::KeySelector;
pub use udict::{Selection, UDict, UDictBuilder};
