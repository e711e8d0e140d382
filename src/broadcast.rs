//! Broadcasting: aligning views of different shapes without copying.
//!
//! Shapes are aligned from the trailing axis. Equal extents pass through, an
//! extent of 1 is stretched to match the other side, and missing leading axes
//! count as 1. Stretched axes get stride 0, so a single source element is
//! repeated by the iterator instead of being duplicated in memory.

use crate::error::{Error, Result};
use crate::{Metadata, Shape};

fn render(shapes: &[&[usize]]) -> String {
    shapes
        .iter()
        .map(|s| Shape::from(*s).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Common shape of several shapes under the broadcasting rules.
///
/// # Examples
///
/// ```
/// # use ndufunc::broadcast::broadcast_shapes;
/// let shape = broadcast_shapes(&[&[4, 1], &[1, 3]]).unwrap();
/// assert_eq!(shape.as_slice(), &[4, 3]);
/// assert!(broadcast_shapes(&[&[4, 2], &[1, 3]]).is_err());
/// ```
pub fn broadcast_shapes(shapes: &[&[usize]]) -> Result<Shape> {
    let mut result = Shape::scalar();
    for &shape in shapes {
        result = result
            .broadcast_with(&Shape::from(shape))
            .ok_or_else(|| Error::Broadcast(render(shapes)))?;
    }
    Ok(result)
}

impl Metadata {
    /// View this layout as `shape`, stretching size-1 and missing leading
    /// axes with stride 0. The offset is untouched.
    ///
    /// Fails if any axis of `self` is neither 1 nor equal to the target extent.
    pub fn broadcast_to(&self, shape: &Shape) -> Result<Metadata> {
        let src = self.shape().as_slice();
        let dst = shape.as_slice();
        let mismatch = || Error::Broadcast(render(&[src, dst]));
        if src.len() > dst.len() {
            return Err(mismatch());
        }

        let lead = dst.len() - src.len();
        let mut stride = vec![0isize; dst.len()];
        for (i, (&from, &s)) in src.iter().zip(self.stride()).enumerate() {
            let to = dst[lead + i];
            if from == to {
                stride[lead + i] = s;
            } else if from != 1 {
                return Err(mismatch());
            }
        }
        Ok(Metadata::new(shape.clone(), stride, self.offset()))
    }
}

/// Broadcast several layouts against each other.
///
/// Returns the common shape and, for each input, a layout of that shape that
/// reads the input's buffer with stride 0 on stretched axes.
pub fn broadcast(metas: &[&Metadata]) -> Result<(Shape, Vec<Metadata>)> {
    let shapes: Vec<&[usize]> = metas.iter().map(|m| m.shape().as_slice()).collect();
    let shape = broadcast_shapes(&shapes)?;
    let views = metas
        .iter()
        .map(|m| m.broadcast_to(&shape))
        .collect::<Result<Vec<_>>>()?;
    Ok((shape, views))
}
