//! Core Array type for n-dimensional strided views.

use crate::error::{Error, Result};
use crate::index::Index;
use crate::iter::{Cells, Cursor, IndexedIter, Iter};
use crate::{Buffer, DType, Element, Metadata, Shape};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// A multidimensional array: a strided view over a shared buffer.
///
/// # Memory Model
///
/// Arrays hold their data through a reference-counted [`Buffer`], so cloning
/// an array clones the *handle* and every slice, transpose or broadcast is a
/// zero-copy view. Writes through any view are visible through all views of
/// the same buffer. When the last view is dropped the storage is freed.
///
/// Buffers are not thread-safe, so `Array` is neither `Send` nor `Sync`.
///
/// # Examples
///
/// ```
/// # use ndufunc::{s, Array};
/// let a = Array::from_vec((0..6).collect::<Vec<i32>>(), [2, 3]).unwrap();
/// let row = a.index(&s![1]).unwrap();
/// row.fill(0);
/// assert_eq!(a.to_vec(), vec![0, 1, 2, 0, 0, 0]);
/// ```
#[derive(Clone)]
pub struct Array<T> {
    /// Underlying data buffer
    buffer: Buffer<T>,
    /// Layout of this view over the buffer
    meta: Metadata,
    /// Layout of the array that created the buffer, if this is a view
    base: Option<Rc<Metadata>>,
}

impl<T: Element> Array<T> {
    /// Create an array from row-major data and a shape.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::Array;
    /// let a = Array::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [2, 3]).unwrap();
    /// assert_eq!(a.shape().as_slice(), &[2, 3]);
    /// assert!(Array::from_vec(vec![1.0, 2.0], [3]).is_err());
    /// ```
    pub fn from_vec(data: Vec<T>, shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        if data.len() != shape.size() {
            return Err(Error::DataLength {
                len: data.len(),
                shape: shape.to_string(),
            });
        }
        Ok(Self::from_buffer(Buffer::from_vec(data), shape))
    }

    /// Create an array by copying a range of values.
    pub fn from_slice(data: &[T], shape: impl Into<Shape>) -> Result<Self> {
        Self::from_vec(data.to_vec(), shape)
    }

    /// Create a 0-dimensional array holding `value`.
    pub fn scalar(value: T) -> Self {
        Self::from_buffer(Buffer::from_vec(vec![value]), Shape::scalar())
    }

    /// Create a view from an existing buffer and an explicit layout.
    ///
    /// Fails with [`Error::OutOfBuffer`] if the layout reaches outside the
    /// buffer. The result is a view: it does not own its data.
    pub fn from_parts(buffer: Buffer<T>, meta: Metadata) -> Result<Self> {
        meta.check_within(buffer.len())?;
        let base = Rc::new(Metadata::contiguous([buffer.len()]));
        Ok(Self {
            buffer,
            meta,
            base: Some(base),
        })
    }

    /// Create an owning, contiguous array over a fresh buffer.
    pub(crate) fn from_buffer(buffer: Buffer<T>, shape: Shape) -> Self {
        debug_assert_eq!(buffer.len(), shape.size());
        Self {
            buffer,
            meta: Metadata::contiguous(shape),
            base: None,
        }
    }

    /// A new view of the same buffer with layout `meta`.
    pub(crate) fn view(&self, meta: Metadata) -> Self {
        let base = match &self.base {
            Some(base) => Rc::clone(base),
            None => Rc::new(self.meta.clone()),
        };
        Self {
            buffer: self.buffer.clone(),
            meta,
            base: Some(base),
        }
    }

    /// Get the shape of the array.
    #[inline]
    pub fn shape(&self) -> &Shape {
        self.meta.shape()
    }

    /// Get the data type of the array.
    #[inline]
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Get the per-axis strides, in elements.
    #[inline]
    pub fn stride(&self) -> &[isize] {
        self.meta.stride()
    }

    /// Get the flat buffer position of the first element.
    #[inline]
    pub fn offset(&self) -> isize {
        self.meta.offset()
    }

    /// Get the full layout of this view.
    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.meta
    }

    /// Get the buffer this view reads.
    #[inline]
    pub fn buffer(&self) -> &Buffer<T> {
        &self.buffer
    }

    /// Get the number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.meta.ndim()
    }

    /// Get the total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.meta.size()
    }

    /// Check if this is a scalar (0-dimensional array).
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.shape().is_scalar()
    }

    /// Check if the view is laid out in row-major order without gaps.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.meta.is_contiguous()
    }

    /// True if this array created its buffer; false for every view.
    #[inline]
    pub fn owns_data(&self) -> bool {
        self.base.is_none()
    }

    /// The array that owns the data this view reads, or `None` if this
    /// array owns its data.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::{s, Array};
    /// let a = Array::from_vec(vec![1, 2, 3, 4], [2, 2]).unwrap();
    /// let col = a.index(&s![.., 1]).unwrap();
    /// assert!(a.base().is_none());
    /// assert_eq!(col.base().unwrap().shape(), a.shape());
    /// ```
    pub fn base(&self) -> Option<Array<T>> {
        self.base.as_ref().map(|meta| Array {
            buffer: self.buffer.clone(),
            meta: (**meta).clone(),
            base: None,
        })
    }

    /// True if both arrays read the same buffer.
    pub fn is_view_of(&self, other: &Array<T>) -> bool {
        self.buffer.same_as(&other.buffer)
    }

    /// Apply index tokens and return the selected view.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::{s, Array};
    /// let a = Array::from_vec((0..12).collect::<Vec<i64>>(), [3, 4]).unwrap();
    /// let v = a.index(&s![1.., ..;-2]).unwrap();
    /// assert_eq!(v.to_vec(), vec![7, 5, 11, 9]);
    /// ```
    pub fn index(&self, indices: &[Index]) -> Result<Array<T>> {
        Ok(self.view(self.meta.index(indices)?))
    }

    /// View of a single element (or a sub-array, with fewer coordinates than
    /// axes). Negative coordinates count from the end.
    pub fn at(&self, coord: &[isize]) -> Result<Array<T>> {
        let tokens: Vec<Index> = coord.iter().map(|&i| Index::Int(i)).collect();
        self.index(&tokens)
    }

    fn element_offset(&self, coord: &[usize]) -> Result<isize> {
        let tokens: Vec<Index> = coord.iter().map(|&i| Index::Int(i as isize)).collect();
        let meta = self.meta.index(&tokens)?;
        if meta.ndim() != 0 {
            return Err(Error::Rank {
                op: "get",
                expected: "one coordinate per axis",
                ndim: self.ndim(),
            });
        }
        Ok(meta.offset())
    }

    /// Read the element at a full coordinate.
    pub fn get(&self, coord: &[usize]) -> Result<T> {
        Ok(self.buffer.get(self.element_offset(coord)?))
    }

    /// Write the element at a full coordinate.
    pub fn set(&self, coord: &[usize], value: T) -> Result<()> {
        self.buffer.set(self.element_offset(coord)?, value);
        Ok(())
    }

    /// The single element of a size-1 array.
    pub fn item(&self) -> Result<T> {
        if self.size() != 1 {
            return Err(Error::NotScalar(self.size()));
        }
        Ok(self.buffer.get(self.offset()))
    }

    /// Materialize the view into a fresh, contiguous, owning array.
    ///
    /// The new buffer holds the elements in logical order, whatever the
    /// strides of `self`.
    pub fn copy(&self) -> Array<T> {
        Array::from_buffer(Buffer::from_vec(self.to_vec()), self.shape().clone())
    }

    /// Give the array a new shape with the same number of elements.
    ///
    /// Contiguous views are reshaped in place and share the buffer; any other
    /// view is copied first.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::Array;
    /// let a = Array::from_vec((0..6).collect::<Vec<i32>>(), [2, 3]).unwrap();
    /// let r = a.reshape([3, 2]).unwrap();
    /// assert!(r.may_share_memory(&a));
    /// let t = a.t().reshape([6]).unwrap();
    /// assert!(!t.may_share_memory(&a));
    /// assert_eq!(t.to_vec(), vec![0, 3, 1, 4, 2, 5]);
    /// ```
    pub fn reshape(&self, shape: impl Into<Shape>) -> Result<Array<T>> {
        let shape = shape.into();
        if shape.size() != self.size() {
            return Err(Error::ReshapeSize {
                size: self.size(),
                shape: shape.to_string(),
            });
        }
        if self.is_contiguous() {
            let stride = shape.default_strides();
            return Ok(self.view(Metadata::new(shape, stride, self.offset())));
        }
        log::debug!(
            "reshape {} -> {}: view is not contiguous, copying",
            self.shape(),
            shape
        );
        self.copy().reshape(shape)
    }

    /// Permute the axes; `axes[i]` is the source axis of axis `i`.
    pub fn transpose(&self, axes: &[usize]) -> Result<Array<T>> {
        Ok(self.view(self.meta.transpose(axes)?))
    }

    /// Reverse the order of the axes.
    pub fn t(&self) -> Array<T> {
        self.view(self.meta.reversed())
    }

    /// Copy the elements out in logical (row-major) order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Set every element of the view to `value`.
    pub fn fill(&self, value: T) {
        self.cells().for_each(|cell| cell.set(value));
    }

    /// Copy `src` into this view elementwise, broadcasting `src` to the
    /// shape of `self`.
    ///
    /// Overlapping source and destination are handled: the result is as if
    /// `src` had been copied first.
    pub fn assign(&self, src: &Array<T>) -> Result<()> {
        crate::ufunc::unary_into(&crate::ufunc::Identity, src, self)
    }

    /// Iterate over the values in logical order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.buffer, &self.meta)
    }

    /// Iterate over `(coordinate, value)` pairs in logical order.
    pub fn indexed_iter(&self) -> IndexedIter<'_, T> {
        IndexedIter::new(&self.buffer, &self.meta)
    }

    /// Iterate over the cells of the view, for in-place updates.
    pub fn cells(&self) -> Cells<'_, T> {
        Cells::new(&self.buffer, &self.meta)
    }

    /// True if the two views can reach a common buffer element.
    ///
    /// See [`may_share_memory`].
    pub fn may_share_memory<U: Element>(&self, other: &Array<U>) -> bool {
        may_share_memory(self, other)
    }
}

/// True if `a` and `b` reach at least one common element of the same buffer.
///
/// The answer is exact: interleaved views such as `x[::2]` and `x[1::2]`
/// do not share memory even though their offset ranges overlap. Empty views
/// never share memory.
///
/// # Examples
///
/// ```
/// # use ndufunc::{s, Array, may_share_memory};
/// let x = Array::from_vec((0..8).collect::<Vec<i32>>(), [8]).unwrap();
/// let even = x.index(&s![..;2]).unwrap();
/// let odd = x.index(&s![1..;2]).unwrap();
/// assert!(!may_share_memory(&even, &odd));
/// assert!(may_share_memory(&even, &x));
/// ```
pub fn may_share_memory<A: Element, B: Element>(a: &Array<A>, b: &Array<B>) -> bool {
    if !a.buffer.same_as(&b.buffer) {
        return false;
    }
    let (ra, rb) = match (a.meta.offset_range(), b.meta.offset_range()) {
        (Some(ra), Some(rb)) => (ra, rb),
        _ => return false,
    };
    if ra.1 < rb.0 || rb.1 < ra.0 {
        return false;
    }
    let (small, large) = if a.size() <= b.size() {
        (&a.meta, &b.meta)
    } else {
        (&b.meta, &a.meta)
    };
    let reachable: HashSet<isize> = Cursor::new(small).collect();
    Cursor::new(large).any(|pos| reachable.contains(&pos))
}

impl<T: Element> From<Vec<T>> for Array<T> {
    fn from(data: Vec<T>) -> Self {
        let len = data.len();
        Array::from_buffer(Buffer::from_vec(data), Shape::from([len]))
    }
}

impl<T: Element> PartialEq for Array<T> {
    /// Equal shapes and equal elements, regardless of layout.
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.iter().eq(other.iter())
    }
}

impl<T: Element> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("dtype", &T::DTYPE)
            .field("shape", &self.shape().as_slice())
            .field("data", &self.to_vec())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s;

    fn arange(n: i32, shape: &[usize]) -> Array<i32> {
        Array::from_vec((0..n).collect(), shape).unwrap()
    }

    #[test]
    fn test_from_vec() {
        let a = Array::from_vec(vec![1.0f32, 2.0, 3.0, 4.0], [2, 2]).unwrap();
        assert_eq!(a.shape().as_slice(), &[2, 2]);
        assert_eq!(a.dtype(), DType::Float32);
        assert_eq!(a.size(), 4);
        assert_eq!(a.stride(), &[2, 1]);
        assert!(a.owns_data());
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let err = Array::from_vec(vec![1, 2, 3], [2, 2]).unwrap_err();
        assert_eq!(err, Error::DataLength { len: 3, shape: "(2, 2)".into() });
    }

    #[test]
    fn test_scalar() {
        let a = Array::scalar(5u8);
        assert_eq!(a.ndim(), 0);
        assert_eq!(a.size(), 1);
        assert_eq!(a.item().unwrap(), 5);
        assert_eq!(a.to_vec(), vec![5]);
    }

    #[test]
    fn test_from_parts_checks_bounds() {
        let buffer = Buffer::from_vec(vec![0i32; 6]);
        let ok = Array::from_parts(buffer.clone(), Metadata::new([3], vec![-2], 4)).unwrap();
        assert!(!ok.owns_data());
        let err = Array::from_parts(buffer, Metadata::new([3], vec![2], 2)).unwrap_err();
        assert_eq!(err, Error::OutOfBuffer { min: 2, max: 6, len: 6 });
    }

    #[test]
    fn test_index_is_a_live_alias() {
        let a = arange(6, &[2, 3]);
        let col = a.index(&s![.., 1]).unwrap();
        assert_eq!(col.to_vec(), vec![1, 4]);
        col.set(&[0], 100).unwrap();
        assert_eq!(a.get(&[0, 1]).unwrap(), 100);
        assert!(!col.owns_data());
        assert!(col.is_view_of(&a));
    }

    #[test]
    fn test_at_and_get() {
        let a = arange(6, &[2, 3]);
        assert_eq!(a.at(&[-1, -1]).unwrap().item().unwrap(), 5);
        assert_eq!(a.at(&[1]).unwrap().to_vec(), vec![3, 4, 5]);
        assert!(a.get(&[2, 0]).is_err());
        assert!(a.get(&[1]).is_err());
        assert_eq!(a.item(), Err(Error::NotScalar(6)));
    }

    #[test]
    fn test_copy_is_independent() {
        let a = arange(6, &[2, 3]);
        let c = a.t().copy();
        assert!(c.owns_data());
        assert!(c.is_contiguous());
        assert_eq!(c.to_vec(), vec![0, 3, 1, 4, 2, 5]);
        c.fill(0);
        assert_eq!(a.to_vec(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reshape_contiguous_shares_buffer() {
        let a = arange(6, &[2, 3]);
        let r = a.reshape([3, 2]).unwrap();
        r.set(&[2, 1], -1).unwrap();
        assert_eq!(a.get(&[1, 2]).unwrap(), -1);
    }

    #[test]
    fn test_reshape_offset_view() {
        let a = arange(12, &[3, 4]);
        let tail = a.index(&s![1..]).unwrap();
        let r = tail.reshape([8]).unwrap();
        assert!(r.may_share_memory(&a));
        assert_eq!(r.to_vec(), (4..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_reshape_non_contiguous_copies() {
        let a = arange(6, &[2, 3]);
        let r = a.t().reshape([6]).unwrap();
        assert!(!r.may_share_memory(&a));
        assert_eq!(r.to_vec(), vec![0, 3, 1, 4, 2, 5]);
        assert_eq!(
            a.reshape([4]),
            Err(Error::ReshapeSize { size: 6, shape: "(4,)".into() })
        );
    }

    #[test]
    fn test_transpose_round_trip() {
        let a = arange(24, &[2, 3, 4]);
        let t = a.transpose(&[2, 0, 1]).unwrap();
        assert_eq!(t.shape().as_slice(), &[4, 2, 3]);
        assert_eq!(t.get(&[3, 1, 2]).unwrap(), a.get(&[1, 2, 3]).unwrap());
        assert_eq!(a.t().t(), a);
        assert_eq!(a.t().t().metadata(), a.metadata());
    }

    #[test]
    fn test_base_points_at_owner() {
        let a = arange(6, &[2, 3]);
        let v = a.index(&s![1..]).unwrap().t();
        let base = v.base().unwrap();
        assert!(base.owns_data());
        assert_eq!(base.shape(), a.shape());
        assert_eq!(base.to_vec(), a.to_vec());
    }

    #[test]
    fn test_may_share_memory_exact() {
        let x = arange(12, &[12]);
        let even = x.index(&s![..;2]).unwrap();
        let odd = x.index(&s![1..;2]).unwrap();
        assert!(!may_share_memory(&even, &odd));
        assert!(may_share_memory(&x, &odd));

        let rev = x.index(&s![..;-1]).unwrap();
        let head = x.index(&s![..1]).unwrap();
        assert!(may_share_memory(&rev, &head));

        let m = arange(6, &[2, 3]);
        assert!(may_share_memory(&m, &m.t()));
        assert!(!may_share_memory(&m, &m.copy()));

        let empty = x.index(&s![3..3]).unwrap();
        assert!(!may_share_memory(&empty, &x));
    }

    #[test]
    fn test_equality_ignores_layout() {
        let a = arange(4, &[2, 2]);
        let b = Array::from_vec(vec![0, 2, 1, 3], [2, 2]).unwrap().t();
        assert_eq!(a, b);
        assert_ne!(a, a.reshape([4]).unwrap());
    }

    #[test]
    fn test_from_vec_conversion() {
        let a: Array<f64> = vec![1.0, 2.0].into();
        assert_eq!(a.shape().as_slice(), &[2]);
    }

    #[test]
    fn test_debug() {
        let a = Array::from_vec(vec![1i8, 2], [2]).unwrap();
        assert_eq!(
            format!("{:?}", a),
            "Array { dtype: Int8, shape: [2], data: [1, 2] }"
        );
    }
}
