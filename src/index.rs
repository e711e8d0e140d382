//! Index tokens: integers and Python-style slices.
//!
//! An index expression is a sequence of [`Index`] tokens, consumed one axis at
//! a time by [`Metadata::index`](crate::Metadata::index). The [`s!`](crate::s)
//! macro builds such a sequence from Rust integers and ranges.

use crate::error::{Error, Result};
use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};
use std::str::FromStr;

/// A `start:stop:step` slice with Python semantics.
///
/// `None` bounds default to the full extent in the direction of `step`;
/// negative bounds count from the end of the axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Slice {
    /// First position, or `None` for the natural start.
    pub start: Option<isize>,
    /// One past the last position, or `None` for the natural end.
    pub stop: Option<isize>,
    /// Distance between positions; must not be zero.
    pub step: isize,
}

impl Slice {
    /// Create a slice from its three components.
    pub const fn new(start: Option<isize>, stop: Option<isize>, step: isize) -> Self {
        Self { start, stop, step }
    }

    /// The slice `::`, selecting a whole axis.
    pub const fn full() -> Self {
        Self::new(None, None, 1)
    }

    /// Replace the step.
    pub const fn step_by(self, step: isize) -> Self {
        Self { step, ..self }
    }

    /// Resolve against an axis of length `len`.
    ///
    /// Returns the absolute start position and the number of selected
    /// positions, following `slice.indices(len)` in Python.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::Slice;
    /// let reversed: Slice = "::-1".parse().unwrap();
    /// assert_eq!(reversed.resolve(5).unwrap(), (4, 5));
    /// let tail: Slice = "-2:".parse().unwrap();
    /// assert_eq!(tail.resolve(5).unwrap(), (3, 2));
    /// ```
    pub fn resolve(&self, len: usize) -> Result<(isize, usize)> {
        let step = self.step;
        if step == 0 {
            return Err(Error::ZeroStep);
        }
        let len = len as isize;
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
        let clamp = |v: isize| {
            if v < 0 {
                (v + len).max(lower)
            } else {
                v.min(upper)
            }
        };

        let start = self
            .start
            .map(clamp)
            .unwrap_or(if step < 0 { upper } else { lower });
        let stop = self
            .stop
            .map(clamp)
            .unwrap_or(if step < 0 { lower } else { upper });

        let forward = (step > 0 && stop > start) || (step < 0 && start > stop);
        let size = if forward {
            (stop.abs_diff(start) - 1) / step.unsigned_abs() + 1
        } else {
            0
        };
        Ok((start, size))
    }
}

impl Default for Slice {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{}", start)?;
        }
        write!(f, ":")?;
        if let Some(stop) = self.stop {
            write!(f, "{}", stop)?;
        }
        if self.step != 1 {
            write!(f, ":{}", self.step)?;
        }
        Ok(())
    }
}

impl FromStr for Slice {
    type Err = Error;

    /// Parse `start:stop[:step]`, where every component may be empty.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(Error::ParseSlice(s.to_string()));
        }
        let bound = |part: &str| -> Result<Option<isize>> {
            if part.is_empty() {
                Ok(None)
            } else {
                part.parse::<isize>()
                    .map(Some)
                    .map_err(|_| Error::ParseSlice(s.to_string()))
            }
        };
        let start = bound(parts[0])?;
        let stop = bound(parts[1])?;
        let step = match parts.get(2) {
            Some(part) => bound(part)?.unwrap_or(1),
            None => 1,
        };
        Ok(Slice::new(start, stop, step))
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Slice::full()
    }
}

/// A single index token: an integer that removes its axis, or a slice that
/// keeps it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Index {
    /// Select one position; negative values count from the end.
    Int(isize),
    /// Select a strided range of positions.
    Slice(Slice),
}

impl Index {
    /// True for [`Index::Int`].
    pub fn is_int(&self) -> bool {
        matches!(self, Index::Int(_))
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Int(i) => write!(f, "{}", i),
            Index::Slice(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for Index {
    type Err = Error;

    /// Parse either an integer (`"-1"`) or a slice literal (`"1::2"`).
    fn from_str(s: &str) -> Result<Self> {
        if s.contains(':') {
            s.parse().map(Index::Slice)
        } else {
            s.trim()
                .parse::<isize>()
                .map(Index::Int)
                .map_err(|_| Error::ParseSlice(s.to_string()))
        }
    }
}

impl From<Slice> for Index {
    fn from(slice: Slice) -> Self {
        Index::Slice(slice)
    }
}

impl From<RangeFull> for Index {
    fn from(_: RangeFull) -> Self {
        Index::Slice(Slice::full())
    }
}

macro_rules! impl_index_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Index {
                fn from(i: $ty) -> Self {
                    Index::Int(i as isize)
                }
            }

            impl From<Range<$ty>> for Slice {
                fn from(r: Range<$ty>) -> Self {
                    Slice::new(Some(r.start as isize), Some(r.end as isize), 1)
                }
            }

            impl From<RangeFrom<$ty>> for Slice {
                fn from(r: RangeFrom<$ty>) -> Self {
                    Slice::new(Some(r.start as isize), None, 1)
                }
            }

            impl From<RangeTo<$ty>> for Slice {
                fn from(r: RangeTo<$ty>) -> Self {
                    Slice::new(None, Some(r.end as isize), 1)
                }
            }

            impl From<Range<$ty>> for Index {
                fn from(r: Range<$ty>) -> Self {
                    Index::Slice(r.into())
                }
            }

            impl From<RangeFrom<$ty>> for Index {
                fn from(r: RangeFrom<$ty>) -> Self {
                    Index::Slice(r.into())
                }
            }

            impl From<RangeTo<$ty>> for Index {
                fn from(r: RangeTo<$ty>) -> Self {
                    Index::Slice(r.into())
                }
            }
        )*
    };
}

impl_index_from_int!(i32, i64, isize, usize);

/// Build an array of [`Index`] tokens from integers and ranges.
///
/// `range;step` attaches a step to a range, so `s![..;-1]` reverses an axis.
///
/// # Examples
///
/// ```
/// # use ndufunc::{s, Index, Slice};
/// let idx = s![0, 1.., ..;-1];
/// assert_eq!(idx[0], Index::Int(0));
/// assert_eq!(idx[1], Index::Slice(Slice::new(Some(1), None, 1)));
/// assert_eq!(idx[2], Index::Slice(Slice::new(None, None, -1)));
/// ```
#[macro_export]
macro_rules! s {
    (@token $e:expr; $step:expr) => {
        $crate::Index::Slice($crate::Slice::from($e).step_by($step))
    };
    (@token $e:expr) => {
        $crate::Index::from($e)
    };
    ($($e:expr $(; $step:expr)?),* $(,)?) => {
        [$($crate::s!(@token $e $(; $step)?)),*]
    };
}
