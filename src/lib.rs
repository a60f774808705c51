//! # byte-trie
//!
//! An in-memory map indexed by the bytes of its keys.
//!
//! Keys may be fixed-width integers (`u8` through `i64`), strings, or slices
//! of those integers. Each key is turned into a canonical byte stream by a
//! [`Converter`] chosen once per trie, optionally normalized byte by byte
//! through a pipeline of [`Transform`]s, and stored along a path of sparse
//! nodes whose children are kept sorted for bisection.
//!
//! ## Example
//!
//! ```rust
//! use byte_trie::Trie;
//!
//! let mut trie: Trie<str, u64> = Trie::new()?;
//! trie.add("hello", 1);
//! trie.add("world", 2);
//!
//! assert_eq!(trie.find("hello"), Some(&1));
//! assert_eq!(trie.find("help"), None);
//!
//! let mut paths: Trie<[u32], &str> = Trie::new()?;
//! paths.add(&[1, 2, 3, 4], "leaf");
//! assert_eq!(paths.find(&[1, 2, 3, 4]), Some(&"leaf"));
//! assert_eq!(paths.find(&[1, 2, 3]), None);
//!
//! // Keys without a byte encoding are rejected up front.
//! assert!(Trie::<f64, u64>::new().is_err());
//! # Ok::<(), byte_trie::TrieError>(())
//! ```
//!
//! ## Byte order
//!
//! Integers are encoded big-endian and signed integers by their two's
//! complement bit pattern, so negative keys sort after positive ones at the
//! byte level. Nothing in the crate depends on key order.

#![warn(clippy::all)]

pub mod converter;
pub mod error;
pub mod key;
mod node;
pub mod trie;

#[cfg(test)]
mod proptests;

pub use converter::{ByteStream, Converter, Transform};
pub use error::{Result, TrieError};
pub use key::{KeyKind, KeyRef, ScalarKey, SliceItem, TrieKey};
pub use node::TrieStats;
pub use trie::{Config, Trie};
