//! Array creation functions.

use crate::error::{Error, Result};
use crate::{Array, Buffer, Element, Metadata, Numeric, Shape};
use num_traits::{Float, NumCast, One, ToPrimitive, Zero};

impl<T: Element> Array<T> {
    /// Create a new array filled with zeros (`T::default()`).
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::{Array, DType};
    /// let a = Array::<f32>::zeros([2, 3]);
    /// assert_eq!(a.shape().as_slice(), &[2, 3]);
    /// assert_eq!(a.dtype(), DType::Float32);
    /// ```
    pub fn zeros(shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        Array::from_buffer(Buffer::zeros(shape.size()), shape)
    }

    /// Create a new array filled with a specific value.
    pub fn full(shape: impl Into<Shape>, value: T) -> Self {
        let shape = shape.into();
        Array::from_buffer(Buffer::filled(value, shape.size()), shape)
    }

    /// Create a new array without meaningful contents.
    ///
    /// Storage is always initialized; the elements start at zero.
    pub fn empty(shape: impl Into<Shape>) -> Self {
        Self::zeros(shape)
    }

    /// Create a zero-filled array with the shape of `other`.
    pub fn zeros_like<U: Element>(other: &Array<U>) -> Self {
        Self::zeros(other.shape().clone())
    }

    /// Create an array with the shape of `other`, filled with `value`.
    pub fn full_like<U: Element>(other: &Array<U>, value: T) -> Self {
        Self::full(other.shape().clone(), value)
    }

    /// Extract a diagonal or construct a diagonal array.
    ///
    /// A 1-D input becomes the diagonal of a square matrix; a 2-D input
    /// yields a copy of its main diagonal.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::Array;
    /// let m = Array::diag(&Array::from(vec![1, 2])).unwrap();
    /// assert_eq!(m.to_vec(), vec![1, 0, 0, 2]);
    /// assert_eq!(Array::diag(&m).unwrap().to_vec(), vec![1, 2]);
    /// ```
    pub fn diag(v: &Array<T>) -> Result<Self> {
        match v.ndim() {
            1 => {
                let n = v.size();
                let out = Self::zeros([n, n]);
                // the diagonal of a contiguous n x n matrix has stride n + 1
                let diagonal = out.view(Metadata::new([n], vec![n as isize + 1], 0));
                diagonal.assign(v)?;
                Ok(out)
            }
            2 => {
                let dims = v.shape().as_slice();
                let n = dims[0].min(dims[1]);
                let stride = v.stride()[0] + v.stride()[1];
                Ok(v.view(Metadata::new([n], vec![stride], v.offset())).copy())
            }
            ndim => Err(Error::Rank {
                op: "diag",
                expected: "a 1-D or 2-D array",
                ndim,
            }),
        }
    }

    /// Convert every element to `U`.
    ///
    /// Fails with [`Error::Cast`] on the first value that `U` cannot
    /// represent (out-of-range integers, NaN to integer).
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::Array;
    /// let a = Array::from(vec![1.7, -2.2]);
    /// assert_eq!(a.astype::<i32>().unwrap().to_vec(), vec![1, -2]);
    /// assert!(Array::from(vec![300]).astype::<u8>().is_err());
    /// ```
    pub fn astype<U>(&self) -> Result<Array<U>>
    where
        T: ToPrimitive,
        U: Element + NumCast,
    {
        let data = self
            .iter()
            .map(|v| {
                <U as NumCast>::from(v).ok_or_else(|| Error::Cast {
                    value: format!("{:?}", v),
                    from: T::DTYPE.name(),
                    to: U::DTYPE.name(),
                })
            })
            .collect::<Result<Vec<U>>>()?;
        Array::from_vec(data, self.shape().clone())
    }
}

impl<T: Element + One> Array<T> {
    /// Create a new array filled with ones.
    pub fn ones(shape: impl Into<Shape>) -> Self {
        Self::full(shape, T::one())
    }

    /// Create a new array of ones with the shape of `other`.
    pub fn ones_like<U: Element>(other: &Array<U>) -> Self {
        Self::ones(other.shape().clone())
    }
}

impl<T: Element + Zero + One> Array<T> {
    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let out = Self::zeros([n, n]);
        for i in 0..n {
            out.buffer().set((i * n + i) as isize, T::one());
        }
        out
    }
}

impl<T: Numeric + NumCast + ToPrimitive> Array<T> {
    /// Evenly spaced values in `[start, stop)`.
    ///
    /// The length is `ceil((stop - start) / step)`, and element `i` is
    /// `start + i * step`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::Array;
    /// assert_eq!(Array::arange(0, 10, 3).unwrap().to_vec(), vec![0, 3, 6, 9]);
    /// assert_eq!(Array::arange(1.0, 0.0, -0.25).unwrap().to_vec(), vec![1.0, 0.75, 0.5, 0.25]);
    /// assert!(Array::arange(0, 1, 0).is_err());
    /// ```
    pub fn arange(start: T, stop: T, step: T) -> Result<Self> {
        if step.is_zero() {
            return Err(Error::ZeroStep);
        }
        let span = |v: T| v.to_f64().unwrap_or(f64::NAN);
        let len = ((span(stop) - span(start)) / span(step)).ceil();
        let len = if len.is_finite() && len > 0.0 { len as usize } else { 0 };
        let data = (0..len)
            .map(|i| {
                <T as NumCast>::from(i)
                    .map(|i| start.modular_add(i.modular_mul(step)))
                    .ok_or_else(|| Error::Cast {
                        value: i.to_string(),
                        from: "uint64",
                        to: T::DTYPE.name(),
                    })
            })
            .collect::<Result<Vec<T>>>()?;
        Array::from_vec(data, [len])
    }
}

impl<T: Element + Float> Array<T> {
    /// `num` evenly spaced samples over `[start, stop]`, or over
    /// `[start, stop)` when `endpoint` is false.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::Array;
    /// let a = Array::linspace(0.0, 1.0, 5, true);
    /// assert_eq!(a.to_vec(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    /// let b = Array::linspace(0.0, 1.0, 4, false);
    /// assert_eq!(b.to_vec(), vec![0.0, 0.25, 0.5, 0.75]);
    /// ```
    pub fn linspace(start: T, stop: T, num: usize, endpoint: bool) -> Self {
        let divisions = if endpoint { num.saturating_sub(1) } else { num };
        let count = |n: usize| <T as NumCast>::from(n).unwrap_or_else(T::nan);
        let step = if divisions == 0 {
            T::zero()
        } else {
            (stop - start) / count(divisions)
        };
        let mut data: Vec<T> = (0..num).map(|i| start + count(i) * step).collect();
        if endpoint && num > 1 {
            data[num - 1] = stop;
        }
        Array::from_buffer(Buffer::from_vec(data), Shape::from([num]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s;

    #[test]
    fn test_zeros_ones_full() {
        assert_eq!(Array::<i64>::zeros([2, 2]).to_vec(), vec![0; 4]);
        assert_eq!(Array::<f32>::ones([3]).to_vec(), vec![1.0; 3]);
        assert_eq!(Array::full([2], 7u8).to_vec(), vec![7, 7]);
        assert_eq!(Array::<bool>::empty([2]).to_vec(), vec![false, false]);
        let z = Array::<f64>::zeros(Shape::scalar());
        assert_eq!(z.ndim(), 0);
        assert_eq!(z.size(), 1);
    }

    #[test]
    fn test_like() {
        let a = Array::from_vec(vec![1i32; 6], [2, 3]).unwrap();
        assert_eq!(Array::<f64>::zeros_like(&a).shape().as_slice(), &[2, 3]);
        assert_eq!(Array::full_like(&a, 2.5).to_vec(), vec![2.5; 6]);
        assert_eq!(Array::<u8>::ones_like(&a).to_vec(), vec![1; 6]);
    }

    #[test]
    fn test_arange() {
        assert_eq!(Array::arange(0, 5, 1).unwrap().to_vec(), vec![0, 1, 2, 3, 4]);
        assert_eq!(Array::arange(5, 0, -2).unwrap().to_vec(), vec![5, 3, 1]);
        assert_eq!(Array::arange(0.0, 1.0, 0.5).unwrap().to_vec(), vec![0.0, 0.5]);
        assert_eq!(Array::arange(3, 1, 1).unwrap().size(), 0);
        assert_eq!(Array::arange(0u8, 4, 2).unwrap().to_vec(), vec![0, 2]);
        // intermediate products wrap, the values themselves fit
        assert_eq!(Array::arange(-100i8, 100, 50).unwrap().to_vec(), vec![-100, -50, 0, 50]);
        assert_eq!(Array::arange(0.0, 1.0, 0.0).unwrap_err(), Error::ZeroStep);
    }

    #[test]
    fn test_linspace() {
        assert_eq!(Array::linspace(2.0, 3.0, 1, true).to_vec(), vec![2.0]);
        assert_eq!(Array::<f64>::linspace(0.0, 1.0, 0, true).size(), 0);
        let a = Array::linspace(-1.0f32, 1.0, 3, true);
        assert_eq!(a.to_vec(), vec![-1.0, 0.0, 1.0]);
        let b = Array::linspace(0.0, 0.3, 4, true);
        assert_eq!(b.to_vec()[3], 0.3);
    }

    #[test]
    fn test_identity() {
        let eye = Array::<f64>::identity(3);
        assert_eq!(eye.to_vec(), vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Array::<i32>::identity(0).size(), 0);
    }

    #[test]
    fn test_diag() {
        let m = Array::diag(&Array::from(vec![1, 2, 3])).unwrap();
        assert_eq!(m.shape().as_slice(), &[3, 3]);
        assert_eq!(m.get(&[2, 2]).unwrap(), 3);
        assert_eq!(m.get(&[0, 1]).unwrap(), 0);

        let a = Array::from_vec((0..6).collect::<Vec<i32>>(), [2, 3]).unwrap();
        assert_eq!(Array::diag(&a).unwrap().to_vec(), vec![0, 4]);
        // diagonal of a transposed, reversed view
        let v = a.t().index(&s![..;-1]).unwrap();
        assert_eq!(v.to_vec(), vec![2, 5, 1, 4, 0, 3]);
        assert_eq!(Array::diag(&v).unwrap().to_vec(), vec![2, 4]);

        let cube = Array::<i32>::zeros([2, 2, 2]);
        assert!(matches!(Array::diag(&cube), Err(Error::Rank { ndim: 3, .. })));
    }

    #[test]
    fn test_astype() {
        let a = Array::from_vec(vec![1i32, -2, 300], [3]).unwrap();
        assert_eq!(a.astype::<f64>().unwrap().to_vec(), vec![1.0, -2.0, 300.0]);
        assert_eq!(a.astype::<i16>().unwrap().to_vec(), vec![1, -2, 300]);
        let err = a.astype::<u8>().unwrap_err();
        assert_eq!(
            err,
            Error::Cast { value: "-2".into(), from: "int32", to: "uint8" }
        );
        let nan = Array::from(vec![f64::NAN]);
        assert!(nan.astype::<i64>().is_err());
        // casting materializes the logical order of a view
        let m = Array::from_vec(vec![1.5f32, 2.5, 3.5, 4.5], [2, 2]).unwrap();
        assert_eq!(m.t().astype::<f64>().unwrap().to_vec(), vec![1.5, 3.5, 2.5, 4.5]);
    }
}
