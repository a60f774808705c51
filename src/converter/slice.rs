//! Slices of multi-byte integers.

use std::slice;

use super::fixed::{Fixed, FixedWidth};

/// Concatenated encoding of every element of a wide-integer slice.
///
/// A [`Fixed`] sub-cursor is loaded with one element at a time; once it runs
/// dry the next element is loaded, so no buffer for the whole key is built.
#[derive(Debug, Clone)]
pub(crate) struct WideSlice<'k, T> {
    items: slice::Iter<'k, T>,
    element: Fixed,
}

impl<'k, T: FixedWidth> WideSlice<'k, T> {
    pub(crate) fn new(items: &'k [T]) -> Self {
        let mut items = items.iter();
        let element = match items.next() {
            Some(&first) => Fixed::of(first),
            None => Fixed::EMPTY,
        };
        Self { items, element }
    }
}

impl<T: FixedWidth> Iterator for WideSlice<'_, T> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        loop {
            if let Some(byte) = self.element.next() {
                return Some(byte);
            }
            let &item = self.items.next()?;
            self.element.load(item);
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.element.remaining() + self.items.len() * T::WIDTH;
        (len, Some(len))
    }
}
