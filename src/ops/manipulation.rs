//! Array manipulation operations.
//!
//! Everything here except [`Array::ravel`] on a non-contiguous input returns
//! a view sharing the buffer of its source.

use crate::broadcast::broadcast;
use crate::error::{Error, Result};
use crate::{Array, Buffer, Element, Metadata, Shape};

impl<T: Element> Array<T> {
    fn check_axis(&self, axis: usize) -> Result<()> {
        if axis >= self.ndim() {
            return Err(Error::InvalidAxes {
                axes: vec![axis],
                ndim: self.ndim(),
            });
        }
        Ok(())
    }

    /// Insert a length-1 axis at position `axis`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::Array;
    /// let a = Array::from(vec![1, 2, 3]);
    /// assert_eq!(a.expand_dims(0).unwrap().shape().as_slice(), &[1, 3]);
    /// assert_eq!(a.expand_dims(1).unwrap().shape().as_slice(), &[3, 1]);
    /// ```
    pub fn expand_dims(&self, axis: usize) -> Result<Array<T>> {
        Ok(self.view(self.metadata().expand_dims(axis)?))
    }

    /// Remove every length-1 axis.
    pub fn squeeze(&self) -> Array<T> {
        self.view(self.metadata().squeeze())
    }

    /// Flatten to one dimension.
    ///
    /// A contiguous input is viewed, anything else is copied.
    pub fn ravel(&self) -> Array<T> {
        let shape = Shape::from([self.size()]);
        if self.is_contiguous() {
            let stride = shape.default_strides();
            return self.view(Metadata::new(shape, stride, self.offset()));
        }
        Array::from_buffer(Buffer::from_vec(self.to_vec()), shape)
    }

    /// Reverse the order of elements along `axis`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::Array;
    /// let a = Array::from_vec((0..6).collect::<Vec<i32>>(), [2, 3]).unwrap();
    /// assert_eq!(a.flip(1).unwrap().to_vec(), vec![2, 1, 0, 5, 4, 3]);
    /// assert_eq!(a.flip(0).unwrap().to_vec(), vec![3, 4, 5, 0, 1, 2]);
    /// ```
    pub fn flip(&self, axis: usize) -> Result<Array<T>> {
        self.check_axis(axis)?;
        let dim = self.shape().as_slice()[axis];
        let mut stride = self.stride().to_vec();
        let mut offset = self.offset();
        if dim > 0 {
            offset += (dim as isize - 1) * stride[axis];
        }
        stride[axis] = -stride[axis];
        Ok(self.view(Metadata::new(self.shape().clone(), stride, offset)))
    }

    /// Interchange two axes.
    pub fn swapaxes(&self, axis1: usize, axis2: usize) -> Result<Array<T>> {
        self.check_axis(axis1)?;
        self.check_axis(axis2)?;
        let mut axes: Vec<usize> = (0..self.ndim()).collect();
        axes.swap(axis1, axis2);
        self.transpose(&axes)
    }

    /// View the array as `shape` under the broadcasting rules.
    ///
    /// Stretched axes have stride 0, so writing through the result touches
    /// the same element several times.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::Array;
    /// let a = Array::from(vec![1, 2, 3]);
    /// let b = a.broadcast_to([2, 3]).unwrap();
    /// assert_eq!(b.to_vec(), vec![1, 2, 3, 1, 2, 3]);
    /// assert_eq!(b.stride(), &[0, 1]);
    /// ```
    pub fn broadcast_to(&self, shape: impl Into<Shape>) -> Result<Array<T>> {
        let shape = shape.into();
        Ok(self.view(self.metadata().broadcast_to(&shape)?))
    }
}

/// Broadcast arrays against each other, returning views of the common shape.
///
/// # Examples
///
/// ```
/// # use ndufunc::{broadcast_arrays, Array};
/// let a = Array::from_vec(vec![1, 2, 3, 4], [4, 1]).unwrap();
/// let b = Array::from_vec(vec![10, 20, 30], [1, 3]).unwrap();
/// let views = broadcast_arrays(&[&a, &b]).unwrap();
/// assert_eq!(views[0].shape().as_slice(), &[4, 3]);
/// assert_eq!(views[1].to_vec()[3..6], [10, 20, 30]);
/// ```
pub fn broadcast_arrays<T: Element>(arrays: &[&Array<T>]) -> Result<Vec<Array<T>>> {
    let metas: Vec<&Metadata> = arrays.iter().map(|a| a.metadata()).collect();
    let (_, views) = broadcast(&metas)?;
    Ok(arrays
        .iter()
        .zip(views)
        .map(|(a, meta)| a.view(meta))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s;

    fn grid() -> Array<i32> {
        Array::from_vec((0..6).collect(), [2, 3]).unwrap()
    }

    #[test]
    fn test_expand_dims_and_squeeze() {
        let a = grid();
        let e = a.expand_dims(2).unwrap();
        assert_eq!(e.shape().as_slice(), &[2, 3, 1]);
        assert!(e.is_view_of(&a));
        assert_eq!(e.squeeze().shape().as_slice(), &[2, 3]);
        let err = a.expand_dims(3).unwrap_err();
        assert_eq!(err, Error::InvalidAxes { axes: vec![3], ndim: 3 });
        assert_eq!(err.kind(), crate::ErrorKind::Value);
        let one = Array::from_vec(vec![7], [1, 1]).unwrap();
        assert_eq!(one.squeeze().ndim(), 0);
        assert_eq!(one.squeeze().item().unwrap(), 7);
    }

    #[test]
    fn test_ravel() {
        let a = grid();
        let r = a.ravel();
        assert!(r.may_share_memory(&a));
        assert_eq!(r.to_vec(), vec![0, 1, 2, 3, 4, 5]);
        let t = a.t().ravel();
        assert!(!t.may_share_memory(&a));
        assert_eq!(t.to_vec(), vec![0, 3, 1, 4, 2, 5]);
    }

    #[test]
    fn test_flip_is_a_view() {
        let a = grid();
        let f = a.flip(1).unwrap();
        f.set(&[0, 0], 9).unwrap();
        assert_eq!(a.get(&[0, 2]).unwrap(), 9);
        assert_eq!(f.flip(1).unwrap(), a);
        assert_eq!(
            a.flip(2).unwrap_err(),
            Error::InvalidAxes { axes: vec![2], ndim: 2 }
        );
        let empty = Array::<f64>::zeros([0]);
        assert_eq!(empty.flip(0).unwrap().size(), 0);
    }

    #[test]
    fn test_flip_matches_negative_slice() {
        let a = grid();
        assert_eq!(a.flip(0).unwrap(), a.index(&s![..;-1]).unwrap());
        assert_eq!(a.flip(0).unwrap().metadata(), a.index(&s![..;-1]).unwrap().metadata());
    }

    #[test]
    fn test_swapaxes() {
        let a = Array::from_vec((0..24).collect::<Vec<i64>>(), [2, 3, 4]).unwrap();
        let s = a.swapaxes(0, 2).unwrap();
        assert_eq!(s.shape().as_slice(), &[4, 3, 2]);
        assert_eq!(s.get(&[3, 1, 0]).unwrap(), a.get(&[0, 1, 3]).unwrap());
        assert!(a.swapaxes(0, 3).is_err());
    }

    #[test]
    fn test_broadcast_to() {
        let a = Array::from_vec(vec![1.0, 2.0], [2, 1]).unwrap();
        let b = a.broadcast_to([2, 2]).unwrap();
        assert_eq!(b.to_vec(), vec![1.0, 1.0, 2.0, 2.0]);
        assert!(b.is_view_of(&a));
        assert!(matches!(a.broadcast_to([3, 2]), Err(Error::Broadcast(_))));
    }

    #[test]
    fn test_broadcast_arrays() {
        let a = Array::from(vec![1u8, 2, 3]);
        let b = Array::scalar(5u8);
        let views = broadcast_arrays(&[&a, &b]).unwrap();
        assert_eq!(views[1].to_vec(), vec![5, 5, 5]);
        assert_eq!(views[1].stride(), &[0]);
        let c = Array::from(vec![1u8, 2]);
        assert!(broadcast_arrays(&[&a, &c]).is_err());
    }
}
