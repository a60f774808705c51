//! The trie facade: a converter bound to a root node.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, error};

use crate::converter::{ByteStream, Converter, Transform};
use crate::error::Result;
use crate::key::{KeyKind, ScalarKey, TrieKey};
use crate::node::{Node, TrieStats};

/// Construction options for a [`Trie`].
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Byte transforms applied, in order, to every key before storage or
    /// lookup.
    pub transforms: Vec<Transform>,
    /// Children pre-reserved at the root.
    pub root_capacity: usize,
    /// Children pre-reserved in every newly created node.
    pub child_capacity: usize,
}

impl Config {
    /// Append a transform to the pipeline.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Set the number of children pre-reserved at the root.
    pub fn with_root_capacity(mut self, capacity: usize) -> Self {
        self.root_capacity = capacity;
        self
    }

    /// Set the number of children pre-reserved in each new node.
    pub fn with_child_capacity(mut self, capacity: usize) -> Self {
        self.child_capacity = capacity;
        self
    }
}

/// A map from keys of type `K` to values of type `V`, indexed by the bytes
/// of each key.
///
/// `K` is one of the 8/16/32/64-bit integers, `str`/`String`, or a slice or
/// vector of those integers. The key's byte encoding is chosen once, when the
/// trie is built; unsupported key types are rejected there.
///
/// Lookups take `&self` and insertions `&mut self`: any number of readers,
/// or a single writer with no concurrent readers. The trie holds no locks;
/// callers sharing one across threads provide their own.
///
/// ```rust
/// use byte_trie::{Transform, Trie};
///
/// let mut trie: Trie<str, u32> =
///     Trie::with_transforms([Transform::strip(b"-_"), Transform::ascii_lowercase()])?;
/// trie.add("Hello", 1);
///
/// assert_eq!(trie.find("-H-e-l-lo-"), Some(&1));
/// assert_eq!(trie.find("hellO"), Some(&1));
/// assert_eq!(trie.find("help"), None);
/// # Ok::<(), byte_trie::TrieError>(())
/// ```
pub struct Trie<K: ?Sized, V> {
    converter: Converter,
    root: Node<V>,
    len: usize,
    child_capacity: usize,
    _key: PhantomData<fn(&K)>,
}

impl<K: ?Sized + 'static, V> Trie<K, V> {
    /// Create an empty trie.
    ///
    /// Fails with [`TrieError::UnsupportedKey`](crate::TrieError::UnsupportedKey)
    /// if `K` has no byte encoding.
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create an empty trie normalizing keys through `transforms`.
    pub fn with_transforms<I>(transforms: I) -> Result<Self>
    where
        I: IntoIterator<Item = Transform>,
    {
        Self::with_config(Config {
            transforms: transforms.into_iter().collect(),
            ..Config::default()
        })
    }

    /// Create an empty trie from a [`Config`].
    pub fn with_config(config: Config) -> Result<Self> {
        let converter = Converter::for_type::<K>()?.with_transforms(config.transforms);
        debug!(
            key_kind = %converter.kind(),
            transforms = converter.transforms().len(),
            "selected key converter"
        );

        Ok(Self {
            converter,
            root: Node::new(0, config.root_capacity),
            len: 0,
            child_capacity: config.child_capacity,
            _key: PhantomData,
        })
    }

    /// The key shape selected for `K`.
    pub fn key_kind(&self) -> KeyKind {
        self.converter.kind()
    }

    /// Number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the trie holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every entry, keeping the converter and its transforms.
    pub fn clear(&mut self) {
        self.root.clear();
        self.len = 0;
    }

    /// Node-level statistics.
    pub fn stats(&self) -> TrieStats {
        self.root.stats()
    }

    #[cfg(test)]
    pub(crate) fn root_node(&self) -> &Node<V> {
        &self.root
    }
}

impl<K: ?Sized + ScalarKey, V> Trie<K, V> {
    /// Build a trie holding every pair of `mapped`.
    ///
    /// Pairs are added in iteration order; keys that collapse onto one entry
    /// keep the last value seen.
    pub fn from_map<Q, I>(mapped: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Q, V)>,
        Q: Borrow<K>,
    {
        Self::from_map_with(mapped, Config::default())
    }

    /// [`Trie::from_map`] with an explicit [`Config`].
    pub fn from_map_with<Q, I>(mapped: I, config: Config) -> Result<Self>
    where
        I: IntoIterator<Item = (Q, V)>,
        Q: Borrow<K>,
    {
        let mut trie = Self::with_config(config)?;
        trie.extend(mapped);
        debug!(entries = trie.len, "bulk loaded trie");
        Ok(trie)
    }
}

impl<K: ?Sized + TrieKey, V> Trie<K, V> {
    /// Associate `value` with `key`, replacing any existing value.
    ///
    /// Returns `true` if this created a new entry, `false` if it replaced an
    /// existing one.
    pub fn add(&mut self, key: &K, value: V) -> bool {
        let Some(bytes) = load_key(&self.converter, key) else {
            return false;
        };
        let expanded = self.root.add(bytes, value, self.child_capacity);
        if expanded {
            self.len += 1;
        }
        expanded
    }

    /// Look up the value stored for `key`.
    pub fn find(&self, key: &K) -> Option<&V> {
        self.root.find(load_key(&self.converter, key)?)
    }

    /// Look up the value stored for `key` for modification.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let bytes = load_key(&self.converter, key)?;
        self.root.find_mut(bytes)
    }

    /// Look up `key`, returning a clone of its value and `true`, or the
    /// default value and `false` if it is absent.
    pub fn find_or_default(&self, key: &K) -> (V, bool)
    where
        V: Clone + Default,
    {
        match self.find(key) {
            Some(value) => (value.clone(), true),
            None => (V::default(), false),
        }
    }

    /// Whether `key` has a stored value.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// The byte sequence `key` is stored under, after transforms.
    pub fn encoded_key(&self, key: &K) -> Option<Vec<u8>> {
        Some(load_key(&self.converter, key)?.collect())
    }
}

/// Load `key` into the converter. Shape mismatches cannot be produced by the
/// sealed key impls; if one ever is, it is logged and the key treated as
/// absent.
fn load_key<'k, K>(converter: &'k Converter, key: &'k K) -> Option<ByteStream<'k>>
where
    K: ?Sized + TrieKey,
{
    match converter.load(key.as_key()) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            error!(%err, "key rejected by converter");
            None
        }
    }
}

impl<K, V, Q> Extend<(Q, V)> for Trie<K, V>
where
    K: ?Sized + TrieKey,
    Q: Borrow<K>,
{
    fn extend<I: IntoIterator<Item = (Q, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key.borrow(), value);
        }
    }
}

impl<K: ?Sized, V: Clone> Clone for Trie<K, V> {
    fn clone(&self) -> Self {
        Self {
            converter: self.converter.clone(),
            root: self.root.clone(),
            len: self.len,
            child_capacity: self.child_capacity,
            _key: PhantomData,
        }
    }
}

impl<K: ?Sized, V> fmt::Debug for Trie<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("key_kind", &self.converter.kind())
            .field("transforms", &self.converter.transforms().len())
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
