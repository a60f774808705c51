//! Per-byte key normalization.
//!
//! A transform sees one raw byte at a time with no surrounding context and
//! either maps it to an output byte or drops it from the key entirely.
//! Dropping bytes lets keys with different literal content share one entry.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

/// Ordered transform pipeline. Most tries carry zero to a few transforms.
pub(crate) type Transforms = SmallVec<[Transform; 4]>;

/// A byte filter/mapping applied to every raw key byte.
///
/// `Some(byte)` keeps the (possibly remapped) byte; `None` drops it.
#[derive(Clone)]
pub struct Transform(Arc<dyn Fn(u8) -> Option<u8> + Send + Sync>);

impl Transform {
    /// Wrap an arbitrary byte function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(u8) -> Option<u8> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Fold `A`-`Z` onto `a`-`z`.
    pub fn ascii_lowercase() -> Self {
        Self::new(|byte| Some(byte.to_ascii_lowercase()))
    }

    /// Fold `a`-`z` onto `A`-`Z`.
    pub fn ascii_uppercase() -> Self {
        Self::new(|byte| Some(byte.to_ascii_uppercase()))
    }

    /// Drop every byte listed in `ignored`.
    pub fn strip(ignored: &[u8]) -> Self {
        let mut dropped = [false; 256];
        for &byte in ignored {
            dropped[byte as usize] = true;
        }
        Self::new(move |byte| (!dropped[byte as usize]).then_some(byte))
    }

    /// Run this transform on one byte.
    #[inline]
    pub fn apply(&self, byte: u8) -> Option<u8> {
        (self.0)(byte)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

/// Run `byte` through `pipeline` left to right, stopping at the first drop.
#[inline]
pub(crate) fn apply_all(pipeline: &[Transform], mut byte: u8) -> Option<u8> {
    for transform in pipeline {
        byte = transform.apply(byte)?;
    }
    Some(byte)
}
