//! Row-major traversal of strided views.

use crate::{Buffer, Element, Metadata};
use std::cell::Cell;
use std::fmt;
use std::iter::FusedIterator;

/// Odometer over the coordinates of a [`Metadata`].
///
/// Yields the flat buffer offset of each element in logical (row-major,
/// last-axis-fastest) order. The offset is updated incrementally, so negative
/// strides (reversed axes) and zero strides (broadcast axes) need no special
/// handling. A cursor only moves forward; a new traversal needs a new cursor.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    meta: &'a Metadata,
    coord: Vec<usize>,
    offset: isize,
    position: usize,
    size: usize,
}

impl<'a> Cursor<'a> {
    /// Start a traversal at the first element of `meta`.
    pub fn new(meta: &'a Metadata) -> Self {
        Self {
            meta,
            coord: vec![0; meta.ndim()],
            offset: meta.offset(),
            position: 0,
            size: meta.size(),
        }
    }

    /// Coordinate of the element the cursor points at.
    #[inline]
    pub fn index(&self) -> &[usize] {
        &self.coord
    }

    /// Flat buffer offset of the element the cursor points at.
    #[inline]
    pub fn offset(&self) -> isize {
        self.offset
    }

    /// Number of elements already passed.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// True once every element has been visited.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.position >= self.size
    }

    fn advance(&mut self) {
        self.position += 1;
        if self.is_done() {
            return;
        }
        let shape = self.meta.shape().as_slice();
        let stride = self.meta.stride();
        for axis in (0..self.coord.len()).rev() {
            self.coord[axis] += 1;
            self.offset += stride[axis];
            if self.coord[axis] < shape[axis] {
                return;
            }
            // carry: rewind this axis to 0
            self.offset -= stride[axis] * shape[axis] as isize;
            self.coord[axis] = 0;
        }
    }
}

impl Iterator for Cursor<'_> {
    type Item = isize;

    fn next(&mut self) -> Option<isize> {
        if self.is_done() {
            return None;
        }
        let offset = self.offset;
        self.advance();
        Some(offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.size.saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cursor<'_> {}

impl FusedIterator for Cursor<'_> {}

/// Two cursors are equal when they walk the same layout and stand at the same
/// position.
impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        (std::ptr::eq(self.meta, other.meta) || self.meta == other.meta)
            && self.position.min(self.size) == other.position.min(other.size)
    }
}

/// Iterator over the values of a view, in logical order.
#[derive(Clone)]
pub struct Iter<'a, T> {
    buffer: &'a Buffer<T>,
    cursor: Cursor<'a>,
}

impl<'a, T: Element> Iter<'a, T> {
    pub(crate) fn new(buffer: &'a Buffer<T>, meta: &'a Metadata) -> Self {
        Self {
            buffer,
            cursor: Cursor::new(meta),
        }
    }
}

impl<T: Element> Iterator for Iter<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.cursor.next().map(|pos| self.buffer.get(pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

impl<T: Element> ExactSizeIterator for Iter<'_, T> {}

/// Iterator over `(coordinate, value)` pairs of a view, in logical order.
///
/// The coordinate tells *where* an element sits, which e.g. pivot selection
/// needs after finding an extreme value.
#[derive(Clone)]
pub struct IndexedIter<'a, T> {
    buffer: &'a Buffer<T>,
    cursor: Cursor<'a>,
}

impl<'a, T: Element> IndexedIter<'a, T> {
    pub(crate) fn new(buffer: &'a Buffer<T>, meta: &'a Metadata) -> Self {
        Self {
            buffer,
            cursor: Cursor::new(meta),
        }
    }
}

impl<T: Element> Iterator for IndexedIter<'_, T> {
    type Item = (Vec<usize>, T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_done() {
            return None;
        }
        let index = self.cursor.index().to_vec();
        let pos = self.cursor.next()?;
        Some((index, self.buffer.get(pos)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

impl<T: Element> ExactSizeIterator for IndexedIter<'_, T> {}

/// Iterator over the cells of a view, for reading and writing in place.
#[derive(Clone)]
pub struct Cells<'a, T> {
    buffer: &'a Buffer<T>,
    cursor: Cursor<'a>,
}

impl<'a, T: Element> Cells<'a, T> {
    pub(crate) fn new(buffer: &'a Buffer<T>, meta: &'a Metadata) -> Self {
        Self {
            buffer,
            cursor: Cursor::new(meta),
        }
    }
}

impl<'a, T: Element> Iterator for Cells<'a, T> {
    type Item = &'a Cell<T>;

    #[inline]
    fn next(&mut self) -> Option<&'a Cell<T>> {
        let buffer = self.buffer;
        self.cursor.next().map(|pos| buffer.cell(pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

impl<T: Element> ExactSizeIterator for Cells<'_, T> {}

/// `Debug` for the buffer-backed iterators.
macro_rules! impl_iter_debug {
    ($($iter:ident),*) => {
        $(
            impl<T: Element> fmt::Debug for $iter<'_, T> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($iter))
                        .field("buffer", self.buffer)
                        .field("cursor", &self.cursor)
                        .finish()
                }
            }
        )*
    };
}

impl_iter_debug!(Iter, IndexedIter, Cells);
