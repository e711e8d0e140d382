//! View metadata: how a strided view lays out elements over a flat buffer.

use crate::error::{Error, Result};
use crate::index::Index;
use crate::Shape;
use std::fmt;

/// Shape, per-axis strides and base offset of a view, all counted in
/// elements.
///
/// The element at coordinate `c` lives at flat position
/// `offset + Σ c[i] * stride[i]` in the owning buffer. Strides may be
/// negative (reversed axes) or zero (broadcast axes).
///
/// Every structural operation returns a fresh `Metadata`; an existing value is
/// never mutated once handed out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Metadata {
    shape: Shape,
    stride: Vec<isize>,
    offset: isize,
}

impl Metadata {
    /// Row-major contiguous layout of `shape` starting at offset 0.
    pub fn contiguous(shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        let stride = shape.default_strides();
        Self { shape, stride, offset: 0 }
    }

    /// Layout from explicit parts.
    ///
    /// # Panics
    ///
    /// Panics if `stride` and `shape` differ in length.
    pub fn new(shape: impl Into<Shape>, stride: Vec<isize>, offset: isize) -> Self {
        let shape = shape.into();
        assert_eq!(
            shape.ndim(),
            stride.len(),
            "Stride and shape must have the same length"
        );
        Self { shape, stride, offset }
    }

    /// The shape of the view.
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Per-axis strides, in elements.
    #[inline]
    pub fn stride(&self) -> &[isize] {
        &self.stride
    }

    /// Flat position of the first element.
    #[inline]
    pub fn offset(&self) -> isize {
        self.offset
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.shape.size()
    }

    /// Flat position of a full coordinate, without bounds checks.
    #[inline]
    pub fn flat_offset(&self, coord: &[usize]) -> isize {
        self.offset
            + coord
                .iter()
                .zip(&self.stride)
                .map(|(&c, &s)| c as isize * s)
                .sum::<isize>()
    }

    /// Apply a sequence of index tokens, one axis per token.
    ///
    /// Integer tokens remove their axis, slice tokens keep it with a new
    /// extent and stride. Axes past the last token are left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::{s, Metadata};
    /// let meta = Metadata::contiguous([2, 3, 4]);
    /// let view = meta.index(&s![.., -1, ..;-1]).unwrap();
    /// assert_eq!(view.shape().as_slice(), &[2, 4]);
    /// assert_eq!(view.stride(), &[12, -1]);
    /// assert_eq!(view.offset(), 11);
    /// ```
    pub fn index(&self, indices: &[Index]) -> Result<Metadata> {
        if indices.len() > self.ndim() {
            return Err(Error::TooManyIndices {
                ndim: self.ndim(),
                given: indices.len(),
            });
        }

        let mut out = self.clone();
        // position in `out`; integer tokens remove axes so it lags the token count
        let mut axis = 0;
        for (source_axis, token) in indices.iter().enumerate() {
            let len = out.shape.as_slice()[axis];
            match *token {
                Index::Int(value) => {
                    let wrapped = if value < 0 { value + len as isize } else { value };
                    if wrapped < 0 || wrapped >= len as isize {
                        return Err(Error::IndexOutOfBounds {
                            index: value,
                            axis: source_axis,
                            size: len,
                        });
                    }
                    out.offset += wrapped * out.stride[axis];
                    out.shape.remove(axis);
                    out.stride.remove(axis);
                }
                Index::Slice(slice) => {
                    let (start, size) = slice.resolve(len)?;
                    if size > 0 {
                        out.offset += start * out.stride[axis];
                    }
                    out.shape.set(axis, size);
                    // a single position never advances, whatever the step
                    if size > 1 {
                        out.stride[axis] *= slice.step;
                    }
                    axis += 1;
                }
            }
        }
        Ok(out)
    }

    /// Permute the axes.
    ///
    /// `axes[i]` names the source axis that becomes axis `i`; it must be a
    /// permutation of `0..ndim`.
    pub fn transpose(&self, axes: &[usize]) -> Result<Metadata> {
        let ndim = self.ndim();
        let invalid = || Error::InvalidAxes {
            axes: axes.to_vec(),
            ndim,
        };
        if axes.len() != ndim {
            return Err(invalid());
        }
        let mut seen = vec![false; ndim];
        for &axis in axes {
            if axis >= ndim || seen[axis] {
                return Err(invalid());
            }
            seen[axis] = true;
        }

        let dims = self.shape.as_slice();
        Ok(Metadata {
            shape: Shape::new(axes.iter().map(|&a| dims[a]).collect()),
            stride: axes.iter().map(|&a| self.stride[a]).collect(),
            offset: self.offset,
        })
    }

    /// Reverse the order of all axes.
    pub fn reversed(&self) -> Metadata {
        let mut dims = self.shape.as_slice().to_vec();
        dims.reverse();
        let mut stride = self.stride.clone();
        stride.reverse();
        Metadata {
            shape: Shape::new(dims),
            stride,
            offset: self.offset,
        }
    }

    /// Insert a length-1 axis at `axis`.
    pub(crate) fn expand_dims(&self, axis: usize) -> Result<Metadata> {
        if axis > self.ndim() {
            return Err(Error::InvalidAxes {
                axes: vec![axis],
                ndim: self.ndim() + 1,
            });
        }
        let mut out = self.clone();
        out.shape.insert(axis, 1);
        out.stride.insert(axis, 0);
        Ok(out)
    }

    /// Drop every length-1 axis.
    pub(crate) fn squeeze(&self) -> Metadata {
        let keep: Vec<usize> = (0..self.ndim())
            .filter(|&a| self.shape.as_slice()[a] != 1)
            .collect();
        Metadata {
            shape: Shape::new(keep.iter().map(|&a| self.shape.as_slice()[a]).collect()),
            stride: keep.iter().map(|&a| self.stride[a]).collect(),
            offset: self.offset,
        }
    }

    /// True when the view walks its elements in row-major order with unit
    /// spacing, so that it can be re-laid out without moving data.
    ///
    /// Axes of extent 0 or 1 never move the position and are ignored.
    pub fn is_contiguous(&self) -> bool {
        let mut expected = 1isize;
        for (&dim, &stride) in self.shape.as_slice().iter().zip(&self.stride).rev() {
            if dim == 0 {
                return true;
            }
            if dim == 1 {
                continue;
            }
            if stride != expected {
                return false;
            }
            expected *= dim as isize;
        }
        true
    }

    /// Smallest and largest flat position the view can reach, or `None` for an
    /// empty view.
    pub fn offset_range(&self) -> Option<(isize, isize)> {
        if self.size() == 0 {
            return None;
        }
        let mut min = self.offset;
        let mut max = self.offset;
        for (&dim, &stride) in self.shape.as_slice().iter().zip(&self.stride) {
            let span = (dim as isize - 1) * stride;
            if span < 0 {
                min += span;
            } else {
                max += span;
            }
        }
        Some((min, max))
    }

    /// Check that every reachable position lies inside a buffer of `len`
    /// elements.
    pub(crate) fn check_within(&self, len: usize) -> Result<()> {
        match self.offset_range() {
            Some((min, max)) if min < 0 || max >= len as isize => {
                Err(Error::OutOfBuffer { min, max, len })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Metadata(shape={}, size={}, ndim={}, offset={}, stride=(",
            self.shape,
            self.size(),
            self.ndim(),
            self.offset
        )?;
        for (i, s) in self.stride.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", s)?;
        }
        if self.stride.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, "))")
    }
}
