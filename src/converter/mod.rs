//! Key to byte-stream conversion.
//!
//! A [`Converter`] is selected once per trie from the key's static type.
//! Each call loads one key and gets back a [`ByteStream`]: a lazy, pull-based
//! iterator over the key's canonical bytes with the transform pipeline
//! applied. Streams live on the stack and borrow both the key and the
//! converter, so scalar and string keys are converted without allocating.
//!
//! | Key shape | Bytes |
//! |---|---|
//! | `u8` / `i8` | the single byte (two's complement for `i8`) |
//! | 16/32/64-bit integers | big-endian, signed reinterpreted as unsigned |
//! | strings | the UTF-8 bytes, none for `""` |
//! | `[u8]` / `[i8]` | one byte per element |
//! | wider integer slices | each element's big-endian bytes, concatenated |

mod fixed;
mod slice;
mod transform;

use std::iter::FusedIterator;

use crate::error::{Result, TrieError};
use crate::key::{KeyKind, KeyRef};

use fixed::Fixed;
use slice::WideSlice;
pub use transform::Transform;
use transform::{apply_all, Transforms};

/// Byte encoder for one key shape plus an optional transform pipeline.
#[derive(Debug, Clone)]
pub struct Converter {
    kind: KeyKind,
    transforms: Transforms,
}

impl Converter {
    /// Select the converter for keys of type `K`.
    pub fn for_type<K: ?Sized + 'static>() -> Result<Self> {
        let kind = KeyKind::of::<K>()?;
        Ok(Self::for_kind(kind))
    }

    /// Converter for an already selected key shape.
    pub fn for_kind(kind: KeyKind) -> Self {
        Self {
            kind,
            transforms: Transforms::new(),
        }
    }

    /// Wrap this converter with additional transforms, applied after any
    /// already present.
    pub fn with_transforms<I>(mut self, transforms: I) -> Self
    where
        I: IntoIterator<Item = Transform>,
    {
        self.transforms.extend(transforms);
        self
    }

    /// The key shape this converter accepts.
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// The transform pipeline, in application order.
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Load a key, producing a fresh cursor over its bytes.
    ///
    /// Fails with [`TrieError::KeyMismatch`] if `key` is not of the shape this
    /// converter was selected for.
    pub fn load<'k>(&'k self, key: KeyRef<'k>) -> Result<ByteStream<'k>> {
        if key.kind() != self.kind {
            return Err(TrieError::KeyMismatch {
                expected: self.kind,
                found: key.kind(),
            });
        }

        let raw = match key {
            KeyRef::U8(v) => RawBytes::Fixed(Fixed::of(v)),
            KeyRef::I8(v) => RawBytes::Fixed(Fixed::of(v)),
            KeyRef::U16(v) => RawBytes::Fixed(Fixed::of(v)),
            KeyRef::I16(v) => RawBytes::Fixed(Fixed::of(v)),
            KeyRef::U32(v) => RawBytes::Fixed(Fixed::of(v)),
            KeyRef::I32(v) => RawBytes::Fixed(Fixed::of(v)),
            KeyRef::U64(v) => RawBytes::Fixed(Fixed::of(v)),
            KeyRef::I64(v) => RawBytes::Fixed(Fixed::of(v)),
            KeyRef::Str(s) => RawBytes::Bytes(s.as_bytes().iter()),
            KeyRef::U8Slice(items) => RawBytes::Bytes(items.iter()),
            KeyRef::I8Slice(items) => RawBytes::Signed(items.iter()),
            KeyRef::U16Slice(items) => RawBytes::U16(WideSlice::new(items)),
            KeyRef::I16Slice(items) => RawBytes::I16(WideSlice::new(items)),
            KeyRef::U32Slice(items) => RawBytes::U32(WideSlice::new(items)),
            KeyRef::I32Slice(items) => RawBytes::I32(WideSlice::new(items)),
            KeyRef::U64Slice(items) => RawBytes::U64(WideSlice::new(items)),
            KeyRef::I64Slice(items) => RawBytes::I64(WideSlice::new(items)),
        };

        Ok(ByteStream {
            raw,
            transforms: &self.transforms,
        })
    }

    /// Collect the full transformed encoding of `key`.
    pub fn encode(&self, key: KeyRef<'_>) -> Result<Vec<u8>> {
        Ok(self.load(key)?.collect())
    }
}

/// Untransformed bytes of one key.
#[derive(Debug, Clone)]
enum RawBytes<'k> {
    Fixed(Fixed),
    Bytes(std::slice::Iter<'k, u8>),
    Signed(std::slice::Iter<'k, i8>),
    U16(WideSlice<'k, u16>),
    I16(WideSlice<'k, i16>),
    U32(WideSlice<'k, u32>),
    I32(WideSlice<'k, i32>),
    U64(WideSlice<'k, u64>),
    I64(WideSlice<'k, i64>),
}

impl Iterator for RawBytes<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        match self {
            RawBytes::Fixed(cursor) => cursor.next(),
            RawBytes::Bytes(bytes) => bytes.next().copied(),
            RawBytes::Signed(bytes) => bytes.next().map(|&b| b as u8),
            RawBytes::U16(items) => items.next(),
            RawBytes::I16(items) => items.next(),
            RawBytes::U32(items) => items.next(),
            RawBytes::I32(items) => items.next(),
            RawBytes::U64(items) => items.next(),
            RawBytes::I64(items) => items.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            RawBytes::Fixed(cursor) => cursor.size_hint(),
            RawBytes::Bytes(bytes) => bytes.size_hint(),
            RawBytes::Signed(bytes) => bytes.size_hint(),
            RawBytes::U16(items) => items.size_hint(),
            RawBytes::I16(items) => items.size_hint(),
            RawBytes::U32(items) => items.size_hint(),
            RawBytes::I32(items) => items.size_hint(),
            RawBytes::U64(items) => items.size_hint(),
            RawBytes::I64(items) => items.size_hint(),
        }
    }
}

/// Lazy byte encoding of one loaded key.
///
/// Raw bytes are pulled one at a time and run through the transform
/// pipeline; dropped bytes are skipped by pulling the next raw byte. Once
/// exhausted the stream keeps returning `None`.
#[derive(Debug, Clone)]
pub struct ByteStream<'k> {
    raw: RawBytes<'k>,
    transforms: &'k [Transform],
}

impl Iterator for ByteStream<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        loop {
            let byte = self.raw.next()?;
            if let Some(byte) = apply_all(self.transforms, byte) {
                return Some(byte);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.raw.size_hint();
        if self.transforms.is_empty() {
            (lower, upper)
        } else {
            (0, upper)
        }
    }
}

impl FusedIterator for ByteStream<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::TrieKey;

    fn encode<K: TrieKey + ?Sized>(key: &K) -> Vec<u8> {
        let converter = Converter::for_type::<K>().unwrap();
        converter.encode(key.as_key()).unwrap()
    }

    #[test]
    fn test_scalar_encodings() {
        assert_eq!(encode(&23u8), vec![23]);
        assert_eq!(encode(&-1i8), vec![0xFF]);
        assert_eq!(encode(&0x0A0Bu16), vec![0x0A, 0x0B]);
        assert_eq!(encode(&-1i16), vec![0xFF, 0xFF]);
        assert_eq!(encode(&1u32), vec![0, 0, 0, 1]);
        assert_eq!(encode(&100i32), vec![0, 0, 0, 100]);
        assert_eq!(encode(&1u64), vec![0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(encode(&i64::MIN), vec![0x80, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_dynamic_encodings() {
        assert_eq!(encode("Hey"), b"Hey".to_vec());
        assert_eq!(encode(""), Vec::<u8>::new());
        assert_eq!(encode(&String::from("é")), vec![0xC3, 0xA9]);
        assert_eq!(encode(&b"ab"[..]), vec![b'a', b'b']);
        assert_eq!(encode(&vec![-1i8, 1]), vec![0xFF, 0x01]);
        assert_eq!(encode(&vec![1u16, 2]), vec![0, 1, 0, 2]);
        assert_eq!(encode(&Vec::<i64>::new()), Vec::<u8>::new());
        assert_eq!(
            encode(&vec![1u64, 2]),
            vec![0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 2]
        );
    }

    #[test]
    fn test_load_rejects_other_shapes() {
        let converter = Converter::for_type::<u32>().unwrap();
        let err = converter.load(KeyRef::Str("nope")).unwrap_err();
        assert_eq!(
            err,
            TrieError::KeyMismatch {
                expected: KeyKind::U32,
                found: KeyKind::Str,
            }
        );

        let converter = Converter::for_type::<[u16]>().unwrap();
        assert!(converter.load(KeyRef::U32Slice(&[1])).is_err());
        assert!(converter.load(KeyRef::U16Slice(&[1])).is_ok());
    }

    #[test]
    fn test_unsupported_type() {
        assert_eq!(
            Converter::for_type::<f64>().unwrap_err(),
            TrieError::unsupported::<f64>()
        );
    }

    #[test]
    fn test_transforms_filter_lazily() {
        let converter = Converter::for_kind(KeyKind::Str).with_transforms([
            Transform::strip(b"-_"),
            Transform::ascii_lowercase(),
        ]);

        let mut stream = converter.load(KeyRef::Str("-H_i-")).unwrap();
        assert_eq!(stream.next(), Some(b'h'));
        assert_eq!(stream.next(), Some(b'i'));
        assert_eq!(stream.next(), None);
        assert_eq!(stream.next(), None);

        assert_eq!(
            converter.encode(KeyRef::Str("_-_--_")).unwrap(),
            Vec::<u8>::new()
        );
    }

    #[test]
    fn test_transforms_apply_to_integer_bytes() {
        let converter = Converter::for_kind(KeyKind::U16Slice)
            .with_transforms([Transform::new(|byte| (byte != 0).then_some(byte))]);
        assert_eq!(
            converter.encode(KeyRef::U16Slice(&[1, 0x0200])).unwrap(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_reload_resets_cursor() {
        let converter = Converter::for_type::<str>().unwrap();
        let mut first = converter.load(KeyRef::Str("abc")).unwrap();
        assert_eq!(first.next(), Some(b'a'));

        let second = converter.load(KeyRef::Str("xyz")).unwrap();
        assert_eq!(second.collect::<Vec<_>>(), b"xyz".to_vec());
        assert_eq!(first.collect::<Vec<_>>(), b"bc".to_vec());
    }
}
