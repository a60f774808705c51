//! Fixed-width integer encoding.
//!
//! Integers are written big-endian into an 8-byte buffer. Signed values are
//! reinterpreted as the unsigned bit pattern of the same width, so negative
//! keys land after positive ones in byte order.

/// Integers with a fixed big-endian byte encoding.
pub(crate) trait FixedWidth: Copy {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Write the big-endian encoding into the front of `buf`.
    fn write_be(self, buf: &mut [u8; 8]);
}

macro_rules! fixed_width {
    ($($ty:ty),*) => {
        $(
            impl FixedWidth for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn write_be(self, buf: &mut [u8; 8]) {
                    buf[..Self::WIDTH].copy_from_slice(&self.to_be_bytes());
                }
            }
        )*
    };
}

fixed_width!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Cursor over one encoded integer.
///
/// Used directly for scalar keys and as the per-element sub-cursor of
/// wide-integer slices.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fixed {
    buf: [u8; 8],
    pos: u8,
    len: u8,
}

impl Fixed {
    /// An exhausted cursor.
    pub(crate) const EMPTY: Fixed = Fixed {
        buf: [0; 8],
        pos: 0,
        len: 0,
    };

    #[inline]
    pub(crate) fn of<T: FixedWidth>(value: T) -> Self {
        let mut cursor = Self::EMPTY;
        cursor.load(value);
        cursor
    }

    /// Reset the cursor onto `value`.
    #[inline]
    pub(crate) fn load<T: FixedWidth>(&mut self, value: T) {
        value.write_be(&mut self.buf);
        self.pos = 0;
        self.len = T::WIDTH as u8;
    }

    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        (self.len - self.pos) as usize
    }
}

impl Iterator for Fixed {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        if self.pos >= self.len {
            return None;
        }
        let byte = self.buf[self.pos as usize];
        self.pos += 1;
        Some(byte)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}
