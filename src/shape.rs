//! Array shapes: dimension lists, row-major strides and shape broadcasting.

use std::fmt;

/// Extent of each axis of an array.
///
/// A shape with no axes describes a 0-dimensional array holding one element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Build a shape from its axis lengths.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::Shape;
    /// let shape = Shape::new(vec![4, 1, 3]);
    /// assert_eq!(shape.ndim(), 3);
    /// assert_eq!(shape.size(), 12);
    /// ```
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// The shape of a 0-dimensional array.
    pub fn scalar() -> Self {
        Self::default()
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Number of elements: the product of the axis lengths.
    ///
    /// The empty product makes a 0-dimensional shape hold one element.
    pub fn size(&self) -> usize {
        self.dims.iter().product()
    }

    /// Axis lengths, outermost first.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.dims
    }

    /// Whether the shape has no axes.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }

    pub(crate) fn remove(&mut self, axis: usize) -> usize {
        self.dims.remove(axis)
    }

    pub(crate) fn insert(&mut self, axis: usize, dim: usize) {
        self.dims.insert(axis, dim)
    }

    pub(crate) fn set(&mut self, axis: usize, dim: usize) {
        self.dims[axis] = dim;
    }

    /// Element strides of a freshly allocated row-major buffer of this shape.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::Shape;
    /// assert_eq!(Shape::new(vec![4, 1, 3]).default_strides(), vec![3, 3, 1]);
    /// ```
    pub fn default_strides(&self) -> Vec<isize> {
        let mut stride = 1isize;
        let mut strides: Vec<isize> = self
            .dims
            .iter()
            .rev()
            .map(|&dim| {
                let current = stride;
                stride *= dim.max(1) as isize;
                current
            })
            .collect();
        strides.reverse();
        strides
    }

    /// Broadcast two shapes together, or `None` if some aligned pair of axes
    /// has unequal lengths neither of which is 1.
    ///
    /// Axes are aligned from the right; a missing leading axis counts as 1.
    pub fn broadcast_with(&self, other: &Shape) -> Option<Shape> {
        let ndim = self.ndim().max(other.ndim());
        let pad = |shape: &Shape, axis: usize| {
            (axis + shape.ndim())
                .checked_sub(ndim)
                .map_or(1, |i| shape.dims[i])
        };

        (0..ndim)
            .map(|axis| match (pad(self, axis), pad(other, axis)) {
                (a, b) if a == b || b == 1 => Some(a),
                (1, b) => Some(b),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Shape::new)
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape::new(dims.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Shape::new(dims.to_vec())
    }
}

impl From<&Shape> for Shape {
    fn from(shape: &Shape) -> Self {
        shape.clone()
    }
}

impl AsRef<[usize]> for Shape {
    fn as_ref(&self) -> &[usize] {
        &self.dims
    }
}

impl PartialEq<[usize]> for Shape {
    fn eq(&self, other: &[usize]) -> bool {
        self.dims == other
    }
}

impl<const N: usize> PartialEq<[usize; N]> for Shape {
    fn eq(&self, other: &[usize; N]) -> bool {
        self.dims == other
    }
}

/// Python tuple notation: `(2, 3)`, `(5,)`, `()`.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = self.dims.iter().map(usize::to_string).collect();
        match dims.as_slice() {
            [single] => write!(f, "({},)", single),
            _ => write!(f, "({})", dims.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_and_rank() {
        let shape = Shape::from([2, 3, 4]);
        assert_eq!(shape.ndim(), 3);
        assert_eq!(shape.size(), 24);
        assert_eq!(shape, [2, 3, 4]);
        assert!(!shape.is_scalar());

        let scalar = Shape::scalar();
        assert_eq!(scalar.ndim(), 0);
        assert_eq!(scalar.size(), 1);
        assert!(scalar.is_scalar());

        assert_eq!(Shape::from([3, 0, 2]).size(), 0);
    }

    #[test]
    fn test_default_strides() {
        assert_eq!(Shape::from([2, 3, 4]).default_strides(), vec![12, 4, 1]);
        assert_eq!(Shape::from([5]).default_strides(), vec![1]);
        assert_eq!(Shape::scalar().default_strides(), Vec::<isize>::new());
        // zero-length axes keep the strides of the non-empty layout
        assert_eq!(Shape::from([2, 0, 3]).default_strides(), vec![3, 3, 1]);
    }

    #[test]
    fn test_broadcast_with() {
        let col = Shape::from([4, 1]);
        let row = Shape::from([1, 3]);
        assert_eq!(col.broadcast_with(&row), Some(Shape::from([4, 3])));
        assert_eq!(Shape::from([2, 3]).broadcast_with(&Shape::from([3])), Some(Shape::from([2, 3])));
        assert_eq!(Shape::scalar().broadcast_with(&row), Some(row.clone()));
        assert_eq!(Shape::from([4, 2]).broadcast_with(&row), None);

        // a zero-length axis broadcasts against 1 but not against 3
        let empty = Shape::from([0]);
        assert_eq!(empty.broadcast_with(&Shape::from([1])), Some(empty.clone()));
        assert_eq!(Shape::from([1]).broadcast_with(&empty), Some(empty.clone()));
        assert_eq!(empty.broadcast_with(&Shape::from([3])), None);
    }

    #[test]
    fn test_tuple_display() {
        assert_eq!(Shape::from([2, 3, 4]).to_string(), "(2, 3, 4)");
        assert_eq!(Shape::from([5]).to_string(), "(5,)");
        assert_eq!(Shape::scalar().to_string(), "()");
    }
}
