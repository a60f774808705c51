//! Key shapes understood by the trie.
//!
//! Every key is viewed as one of a closed family of shapes ([`KeyKind`]):
//! fixed-width integers, strings, or slices of integers. The shape is picked
//! once from the key's static type and a borrowed view of each key
//! ([`KeyRef`]) is handed to the converter on every call.

use std::any::TypeId;
use std::fmt;

use crate::error::{Result, TrieError};

/// The encodable key shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// `u8`
    U8,
    /// `i8`
    I8,
    /// `u16`
    U16,
    /// `i16`
    I16,
    /// `u32`
    U32,
    /// `i32`
    I32,
    /// `u64`
    U64,
    /// `i64`
    I64,
    /// `str` or `String`
    Str,
    /// `[u8]` or `Vec<u8>`
    U8Slice,
    /// `[i8]` or `Vec<i8>`
    I8Slice,
    /// `[u16]` or `Vec<u16>`
    U16Slice,
    /// `[i16]` or `Vec<i16>`
    I16Slice,
    /// `[u32]` or `Vec<u32>`
    U32Slice,
    /// `[i32]` or `Vec<i32>`
    I32Slice,
    /// `[u64]` or `Vec<u64>`
    U64Slice,
    /// `[i64]` or `Vec<i64>`
    I64Slice,
}

impl KeyKind {
    /// Select the key shape for the static type `K`.
    ///
    /// Fails with [`TrieError::UnsupportedKey`] for any type outside the
    /// supported family (floats, `u128`, `usize`, user types, ...).
    pub fn of<K: ?Sized + 'static>() -> Result<Self> {
        let id = TypeId::of::<K>();
        let table: [(TypeId, TypeId, KeyKind); 17] = [
            (TypeId::of::<u8>(), TypeId::of::<u8>(), KeyKind::U8),
            (TypeId::of::<i8>(), TypeId::of::<i8>(), KeyKind::I8),
            (TypeId::of::<u16>(), TypeId::of::<u16>(), KeyKind::U16),
            (TypeId::of::<i16>(), TypeId::of::<i16>(), KeyKind::I16),
            (TypeId::of::<u32>(), TypeId::of::<u32>(), KeyKind::U32),
            (TypeId::of::<i32>(), TypeId::of::<i32>(), KeyKind::I32),
            (TypeId::of::<u64>(), TypeId::of::<u64>(), KeyKind::U64),
            (TypeId::of::<i64>(), TypeId::of::<i64>(), KeyKind::I64),
            (TypeId::of::<str>(), TypeId::of::<String>(), KeyKind::Str),
            (TypeId::of::<[u8]>(), TypeId::of::<Vec<u8>>(), KeyKind::U8Slice),
            (TypeId::of::<[i8]>(), TypeId::of::<Vec<i8>>(), KeyKind::I8Slice),
            (TypeId::of::<[u16]>(), TypeId::of::<Vec<u16>>(), KeyKind::U16Slice),
            (TypeId::of::<[i16]>(), TypeId::of::<Vec<i16>>(), KeyKind::I16Slice),
            (TypeId::of::<[u32]>(), TypeId::of::<Vec<u32>>(), KeyKind::U32Slice),
            (TypeId::of::<[i32]>(), TypeId::of::<Vec<i32>>(), KeyKind::I32Slice),
            (TypeId::of::<[u64]>(), TypeId::of::<Vec<u64>>(), KeyKind::U64Slice),
            (TypeId::of::<[i64]>(), TypeId::of::<Vec<i64>>(), KeyKind::I64Slice),
        ];

        table
            .iter()
            .find(|(borrowed, owned, _)| *borrowed == id || *owned == id)
            .map(|(_, _, kind)| *kind)
            .ok_or_else(TrieError::unsupported::<K>)
    }

    /// Width in bytes of a scalar integer shape, `None` for strings and slices.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            KeyKind::U8 | KeyKind::I8 => Some(1),
            KeyKind::U16 | KeyKind::I16 => Some(2),
            KeyKind::U32 | KeyKind::I32 => Some(4),
            KeyKind::U64 | KeyKind::I64 => Some(8),
            _ => None,
        }
    }

    /// Whether keys of this shape have a length decided by the key itself.
    pub fn is_dynamic(self) -> bool {
        self.fixed_width().is_none()
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyKind::U8 => "u8",
            KeyKind::I8 => "i8",
            KeyKind::U16 => "u16",
            KeyKind::I16 => "i16",
            KeyKind::U32 => "u32",
            KeyKind::I32 => "i32",
            KeyKind::U64 => "u64",
            KeyKind::I64 => "i64",
            KeyKind::Str => "string",
            KeyKind::U8Slice => "[u8]",
            KeyKind::I8Slice => "[i8]",
            KeyKind::U16Slice => "[u16]",
            KeyKind::I16Slice => "[i16]",
            KeyKind::U32Slice => "[u32]",
            KeyKind::I32Slice => "[i32]",
            KeyKind::U64Slice => "[u64]",
            KeyKind::I64Slice => "[i64]",
        };
        f.write_str(name)
    }
}

/// A borrowed key viewed as one of the supported shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRef<'k> {
    /// An unsigned 8-bit integer.
    U8(u8),
    /// A signed 8-bit integer.
    I8(i8),
    /// An unsigned 16-bit integer.
    U16(u16),
    /// A signed 16-bit integer.
    I16(i16),
    /// An unsigned 32-bit integer.
    U32(u32),
    /// A signed 32-bit integer.
    I32(i32),
    /// An unsigned 64-bit integer.
    U64(u64),
    /// A signed 64-bit integer.
    I64(i64),
    /// A string, encoded as its UTF-8 bytes.
    Str(&'k str),
    /// A slice of unsigned bytes.
    U8Slice(&'k [u8]),
    /// A slice of signed bytes.
    I8Slice(&'k [i8]),
    /// A slice of unsigned 16-bit integers.
    U16Slice(&'k [u16]),
    /// A slice of signed 16-bit integers.
    I16Slice(&'k [i16]),
    /// A slice of unsigned 32-bit integers.
    U32Slice(&'k [u32]),
    /// A slice of signed 32-bit integers.
    I32Slice(&'k [i32]),
    /// A slice of unsigned 64-bit integers.
    U64Slice(&'k [u64]),
    /// A slice of signed 64-bit integers.
    I64Slice(&'k [i64]),
}

impl KeyRef<'_> {
    /// The shape of this key.
    pub fn kind(&self) -> KeyKind {
        match self {
            KeyRef::U8(_) => KeyKind::U8,
            KeyRef::I8(_) => KeyKind::I8,
            KeyRef::U16(_) => KeyKind::U16,
            KeyRef::I16(_) => KeyKind::I16,
            KeyRef::U32(_) => KeyKind::U32,
            KeyRef::I32(_) => KeyKind::I32,
            KeyRef::U64(_) => KeyKind::U64,
            KeyRef::I64(_) => KeyKind::I64,
            KeyRef::Str(_) => KeyKind::Str,
            KeyRef::U8Slice(_) => KeyKind::U8Slice,
            KeyRef::I8Slice(_) => KeyKind::I8Slice,
            KeyRef::U16Slice(_) => KeyKind::U16Slice,
            KeyRef::I16Slice(_) => KeyKind::I16Slice,
            KeyRef::U32Slice(_) => KeyKind::U32Slice,
            KeyRef::I32Slice(_) => KeyKind::I32Slice,
            KeyRef::U64Slice(_) => KeyKind::U64Slice,
            KeyRef::I64Slice(_) => KeyKind::I64Slice,
        }
    }
}

mod private {
    pub trait Sealed {}
}

/// Types usable as trie keys.
///
/// Implemented for the 8/16/32/64-bit integers, `str`, `String`, and slices
/// or vectors of any of those integers. Sealed.
pub trait TrieKey: private::Sealed + 'static {
    /// View this key as one of the supported shapes.
    fn as_key(&self) -> KeyRef<'_>;
}

/// Keys accepted by bulk loading from a mapping: integers and strings.
pub trait ScalarKey: TrieKey {}

/// Integers that may appear as slice elements.
pub trait SliceItem: private::Sealed + Copy + 'static {
    #[doc(hidden)]
    fn slice_ref(items: &[Self]) -> KeyRef<'_>;
}

macro_rules! integer_keys {
    ($($ty:ty => $scalar:ident, $slice:ident;)*) => {
        $(
            impl private::Sealed for $ty {}

            impl TrieKey for $ty {
                #[inline]
                fn as_key(&self) -> KeyRef<'_> {
                    KeyRef::$scalar(*self)
                }
            }

            impl ScalarKey for $ty {}

            impl SliceItem for $ty {
                #[inline]
                fn slice_ref(items: &[Self]) -> KeyRef<'_> {
                    KeyRef::$slice(items)
                }
            }
        )*
    };
}

integer_keys! {
    u8 => U8, U8Slice;
    i8 => I8, I8Slice;
    u16 => U16, U16Slice;
    i16 => I16, I16Slice;
    u32 => U32, U32Slice;
    i32 => I32, I32Slice;
    u64 => U64, U64Slice;
    i64 => I64, I64Slice;
}

impl private::Sealed for str {}
impl private::Sealed for String {}

impl TrieKey for str {
    #[inline]
    fn as_key(&self) -> KeyRef<'_> {
        KeyRef::Str(self)
    }
}

impl TrieKey for String {
    #[inline]
    fn as_key(&self) -> KeyRef<'_> {
        KeyRef::Str(self.as_str())
    }
}

impl ScalarKey for str {}
impl ScalarKey for String {}

impl<T: SliceItem> private::Sealed for [T] {}
impl<T: SliceItem> private::Sealed for Vec<T> {}

impl<T: SliceItem> TrieKey for [T] {
    #[inline]
    fn as_key(&self) -> KeyRef<'_> {
        T::slice_ref(self)
    }
}

impl<T: SliceItem> TrieKey for Vec<T> {
    #[inline]
    fn as_key(&self) -> KeyRef<'_> {
        T::slice_ref(self.as_slice())
    }
}
