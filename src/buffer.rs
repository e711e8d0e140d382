//! Buffer abstraction for array data storage.

use crate::Element;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Flat, contiguous element storage.
///
/// Buffers are reference-counted and shared between every view derived
/// without a copy. Elements sit in [`Cell`]s, so any view may read or write
/// through a shared handle; the storage is freed when the last view drops.
#[derive(Clone)]
pub struct Buffer<T> {
    inner: Rc<[Cell<T>]>,
}

impl<T: Element> Buffer<T> {
    /// Take ownership of `data` as a new buffer.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            inner: data.into_iter().map(Cell::new).collect(),
        }
    }

    /// A new buffer of `len` copies of `value`.
    pub fn filled(value: T, len: usize) -> Self {
        Self {
            inner: (0..len).map(|_| Cell::new(value)).collect(),
        }
    }

    /// A new buffer filled with `T::default()` (zero for numbers).
    pub fn zeros(len: usize) -> Self {
        Self::filled(T::default(), len)
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True if the buffer holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Read the element at flat position `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the buffer.
    #[inline]
    pub fn get(&self, pos: isize) -> T {
        self.cell(pos).get()
    }

    /// Write the element at flat position `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the buffer.
    #[inline]
    pub fn set(&self, pos: isize, value: T) {
        self.cell(pos).set(value)
    }

    /// The cell at flat position `pos`.
    #[inline]
    pub fn cell(&self, pos: isize) -> &Cell<T> {
        &self.inner[pos as usize]
    }

    /// Copy the whole buffer out, in storage order.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.iter().map(Cell::get).collect()
    }

    /// Number of live handles sharing this buffer.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }
}

impl<T> Buffer<T> {
    /// Address of the allocation; two handles with the same address share
    /// storage.
    #[inline]
    pub fn as_ptr(&self) -> *const () {
        self.inner.as_ptr() as *const ()
    }

    /// True if both handles refer to the same allocation.
    #[inline]
    pub fn same_as<U>(&self, other: &Buffer<U>) -> bool {
        self.as_ptr() == other.as_ptr()
    }
}

impl<T: Element> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("dtype", &T::DTYPE)
            .field("len", &self.len())
            .finish()
    }
}
