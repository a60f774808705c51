//! Error types for trie construction and key loading.

use thiserror::Error;

use crate::key::KeyKind;

/// Result type alias using [`TrieError`].
pub type Result<T> = std::result::Result<T, TrieError>;

/// Errors raised while selecting or loading a key converter.
///
/// Both variants are a bad key: one rejected when the trie is built, the
/// other when a key of the wrong shape reaches a converter. Their messages
/// share the `bad trie key:` prefix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// The key type has no registered byte encoding.
    #[error("bad trie key: no converter is defined for type {type_name}")]
    UnsupportedKey {
        /// Name of the rejected key type.
        type_name: &'static str,
    },

    /// A key of one shape was handed to a converter built for another.
    #[error("bad trie key: unable to load a {found} key into a {expected} converter")]
    KeyMismatch {
        /// Shape the converter was selected for.
        expected: KeyKind,
        /// Shape of the key that was loaded.
        found: KeyKind,
    },
}

impl TrieError {
    /// Create an unsupported-key error for `K`.
    pub fn unsupported<K: ?Sized>() -> Self {
        TrieError::UnsupportedKey {
            type_name: std::any::type_name::<K>(),
        }
    }
}
