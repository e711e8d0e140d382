//! Linear algebra operations.
//!
//! [`matmul`] for vectors and matrices, and an LU factorization with partial
//! pivoting built entirely from views and elementwise ufuncs.

use crate::error::{Error, Result};
use crate::ops::binary::{multiply, multiply_into, subtract_into};
use crate::{s, Array, Element, Metadata, Numeric, Shape};
use num_traits::Float;

/// Matrix product of two arrays of rank 1 or 2.
///
/// A 1-D left operand is a row vector and a 1-D right operand a column
/// vector; the axis added for them is removed from the result, so two
/// vectors give a 0-d array.
///
/// # Examples
///
/// ```
/// # use ndufunc::{matmul, Array};
/// let a = Array::from_vec(vec![1, 2, 3, 4], [2, 2]).unwrap();
/// let b = Array::from_vec(vec![5, 6, 7, 8], [2, 2]).unwrap();
/// assert_eq!(matmul(&a, &b).unwrap().to_vec(), vec![19, 22, 43, 50]);
/// let v = Array::from(vec![1, 1]);
/// assert_eq!(matmul(&a, &v).unwrap().to_vec(), vec![3, 7]);
/// assert_eq!(matmul(&v, &v).unwrap().item().unwrap(), 2);
/// ```
pub fn matmul<T: Numeric>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>> {
    for x in [a, b] {
        if !matches!(x.ndim(), 1 | 2) {
            return Err(Error::Rank {
                op: "matmul",
                expected: "a 1-D or 2-D array",
                ndim: x.ndim(),
            });
        }
    }
    let lhs = if a.ndim() == 1 { a.expand_dims(0)? } else { a.clone() };
    let rhs = if b.ndim() == 1 { b.expand_dims(1)? } else { b.clone() };
    let (n, k) = (lhs.shape().as_slice()[0], lhs.shape().as_slice()[1]);
    let m = rhs.shape().as_slice()[1];
    if rhs.shape().as_slice()[0] != k {
        return Err(Error::Broadcast(format!("{} {}", a.shape(), b.shape())));
    }

    let out = Array::<T>::zeros([n, m]);
    for i in 0..n {
        let row = lhs.index(&s![i, ..])?;
        for j in 0..m {
            let col = rhs.index(&s![.., j])?;
            let dot = row
                .iter()
                .zip(col.iter())
                .fold(T::zero(), |acc, (x, y)| acc.modular_add(x.modular_mul(y)));
            out.set(&[i, j], dot)?;
        }
    }

    match (a.ndim(), b.ndim()) {
        (1, 1) => out.reshape(Shape::scalar()),
        (1, _) => out.reshape([m]),
        (_, 1) => out.reshape([n]),
        _ => Ok(out),
    }
}

/// Reject right-hand sides whose leading axis does not match `n` rows.
fn check_rhs<T: Element>(n: usize, b: &Array<T>) -> Result<()> {
    if !matches!(b.ndim(), 1 | 2) {
        return Err(Error::Rank {
            op: "solve",
            expected: "a 1-D or 2-D right-hand side",
            ndim: b.ndim(),
        });
    }
    if b.shape().as_slice()[0] != n {
        return Err(Error::Broadcast(format!("({}, {}) {}", n, n, b.shape())));
    }
    Ok(())
}

/// Exchange the leading row of `a` with row `row`.
fn swap_rows<T: Element>(a: &Array<T>, row: usize) -> Result<()> {
    let first = a.at(&[0])?;
    let other = a.at(&[row as isize])?;
    let saved = first.copy();
    first.assign(&other)?;
    other.assign(&saved)
}

/// One step of elimination in column `col` of `rows`, the full-width tail of
/// the matrix starting at the pivot row, with `perm` the matching tail of the
/// row permutation. Returns whether rows were swapped.
///
/// Pivot swaps exchange whole rows, carrying the multipliers already stored
/// left of `col`; the update itself only touches the trailing block.
fn eliminate<T: Numeric + Float>(rows: &Array<T>, col: usize, perm: &Array<i64>) -> Result<bool> {
    let a = rows.index(&s![.., col..])?;
    let (row, pivot) = a
        .index(&s![.., 0])?
        .indexed_iter()
        .fold((0, T::zero()), |best, (coord, v)| {
            if v.abs() > best.1.abs() {
                (coord[0], v)
            } else {
                best
            }
        });
    if pivot == T::zero() {
        return Err(Error::Singular);
    }
    log::debug!(
        "pivot {:?} in row {} of a {} block",
        pivot,
        row,
        a.shape()
    );

    let swapped = row != 0;
    if swapped {
        swap_rows(rows, row)?;
        swap_rows(perm, row)?;
    }

    let factors = a.index(&s![1.., 0])?;
    multiply_into(&factors, Array::scalar(T::one() / pivot), &factors)?;

    let trailing = a.index(&s![1.., 1..])?;
    let update = multiply(a.index(&s![0, 1..])?, a.index(&s![1.., 0..1])?)?;
    subtract_into(&trailing, &update, &trailing)?;
    Ok(swapped)
}

/// LU factorization with partial pivoting, `P·A = L·U`.
///
/// `L` is unit lower triangular and `U` upper triangular; both are stored
/// packed in one matrix.
///
/// # Examples
///
/// ```
/// # use ndufunc::{Array, LuDecomposition};
/// let a = Array::from_vec(vec![4.0f64, 3.0, 6.0, 3.0], [2, 2]).unwrap();
/// let lu = LuDecomposition::new(&a).unwrap();
/// let x = lu.solve(&Array::from(vec![10.0, 12.0])).unwrap();
/// assert!((x.get(&[0]).unwrap() - 1.0).abs() < 1e-12);
/// assert!((x.get(&[1]).unwrap() - 2.0).abs() < 1e-12);
/// assert!((lu.det() + 6.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LuDecomposition<T: Element> {
    lu: Array<T>,
    perm: Array<i64>,
    swaps: usize,
}

impl<T: Numeric + Float> LuDecomposition<T> {
    /// Factorize the square matrix `a`. The input is not modified.
    pub fn new(a: &Array<T>) -> Result<Self> {
        if a.ndim() != 2 {
            return Err(Error::Rank {
                op: "lu",
                expected: "a 2-D array",
                ndim: a.ndim(),
            });
        }
        let n = a.shape().as_slice()[0];
        if a.shape().as_slice()[1] != n {
            return Err(Error::NotSquare(a.shape().to_string()));
        }

        let lu = a.copy();
        let perm = Array::arange(0, n as i64, 1)?;
        let mut swaps = 0;
        for i in 0..n {
            if eliminate(&lu.index(&s![i.., ..])?, i, &perm.index(&s![i..])?)? {
                swaps += 1;
            }
        }
        Ok(Self { lu, perm, swaps })
    }

    fn order(&self) -> usize {
        self.lu.shape().as_slice()[0]
    }

    /// The unit lower triangular factor.
    pub fn l(&self) -> Array<T> {
        let l = Array::identity(self.order());
        for ((coord, v), cell) in self.lu.indexed_iter().zip(l.cells()) {
            if coord[1] < coord[0] {
                cell.set(v);
            }
        }
        l
    }

    /// The upper triangular factor.
    pub fn u(&self) -> Array<T> {
        let u = Array::zeros_like(&self.lu);
        for ((coord, v), cell) in self.lu.indexed_iter().zip(u.cells()) {
            if coord[1] >= coord[0] {
                cell.set(v);
            }
        }
        u
    }

    /// The row order: row `i` of `P·A` is row `pivots()[i]` of `A`.
    pub fn pivots(&self) -> &Array<i64> {
        &self.perm
    }

    /// The permutation matrix `P`.
    pub fn permutation(&self) -> Array<T> {
        let n = self.order();
        let p = Array::zeros([n, n]);
        for (i, &row) in self.perm.to_vec().iter().enumerate() {
            p.buffer().set((i * n) as isize + row as isize, T::one());
        }
        p
    }

    /// Reorder the rows of `b` as `P·b`.
    pub fn permute(&self, b: &Array<T>) -> Result<Array<T>> {
        check_rhs(self.order(), b)?;
        let out = b.copy();
        for (i, row) in self.perm.iter().enumerate() {
            out.at(&[i as isize])?.assign(&b.at(&[row as isize])?)?;
        }
        Ok(out)
    }

    /// Solve `A·x = b` for a vector or for each column of a matrix `b`.
    pub fn solve(&self, b: &Array<T>) -> Result<Array<T>> {
        let n = self.order();
        let x = self.permute(b)?;

        // L·y = P·b, unit diagonal
        for i in 1..n {
            let row = x.at(&[i as isize])?;
            let solved = x.index(&s![..i])?.copy();
            let dot = matmul(&self.lu.index(&s![i, ..i])?, &solved)?;
            subtract_into(&row, &dot, &row)?;
        }

        // U·x = y
        for i in (0..n).rev() {
            let row = x.at(&[i as isize])?;
            if i + 1 < n {
                let solved = x.index(&s![i + 1..])?.copy();
                let dot = matmul(&self.lu.index(&s![i, i + 1..])?, &solved)?;
                subtract_into(&row, &dot, &row)?;
            }
            let diagonal = self.lu.get(&[i, i])?;
            multiply_into(&row, Array::scalar(T::one() / diagonal), &row)?;
        }
        Ok(x)
    }

    /// The inverse of `A`.
    pub fn inverse(&self) -> Result<Array<T>> {
        self.solve(&Array::identity(self.order()))
    }

    /// The determinant of `A`.
    pub fn det(&self) -> T {
        let n = self.order();
        let diagonal = self.lu.view(Metadata::new([n], vec![n as isize + 1], 0));
        let det = diagonal.iter().fold(T::one(), |acc, v| acc * v);
        if self.swaps % 2 == 1 {
            -det
        } else {
            det
        }
    }
}

/// Solve the square system `a·x = b`.
///
/// # Examples
///
/// ```
/// # use ndufunc::{ops::linalg, Array};
/// let a = Array::from_vec(vec![0.0, 1.0, 1.0, 0.0], [2, 2]).unwrap();
/// let x = linalg::solve(&a, &Array::from(vec![2.0, 3.0])).unwrap();
/// assert_eq!(x.to_vec(), vec![3.0, 2.0]);
/// ```
pub fn solve<T: Numeric + Float>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>> {
    LuDecomposition::new(a)?.solve(b)
}

/// The determinant of the square matrix `a`.
///
/// A singular matrix has determinant zero.
pub fn det<T: Numeric + Float>(a: &Array<T>) -> Result<T> {
    match LuDecomposition::new(a) {
        Ok(lu) => Ok(lu.det()),
        Err(Error::Singular) => Ok(T::zero()),
        Err(err) => Err(err),
    }
}

/// The inverse of the square matrix `a`.
pub fn inv<T: Numeric + Float>(a: &Array<T>) -> Result<Array<T>> {
    LuDecomposition::new(a)?.inverse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn system() -> Array<f64> {
        Array::from_vec(vec![2.0, 1.0, 1.0, 4.0, -6.0, 0.0, -2.0, 7.0, 2.0], [3, 3]).unwrap()
    }

    fn assert_close(a: &Array<f64>, b: &Array<f64>) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_abs_diff_eq!(x, y, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_matmul_ranks() {
        let a = Array::from_vec(vec![1, 2, 3, 4, 5, 6], [2, 3]).unwrap();
        let b = Array::from_vec(vec![1, 0, 0, 1, 1, 1], [3, 2]).unwrap();
        let c = matmul(&a, &b).unwrap();
        assert_eq!(c.shape().as_slice(), &[2, 2]);
        assert_eq!(c.to_vec(), vec![4, 5, 10, 11]);

        let v = Array::from(vec![1, 2, 3]);
        let w = Array::from(vec![4, 5, 6]);
        let dot = matmul(&v, &w).unwrap();
        assert_eq!(dot.ndim(), 0);
        assert_eq!(dot.item().unwrap(), 32);

        assert_eq!(matmul(&a, &v).unwrap().to_vec(), vec![14, 32]);
        let u = Array::from(vec![1, 1]);
        assert_eq!(matmul(&u, &a).unwrap().to_vec(), vec![5, 7, 9]);
    }

    #[test]
    fn test_matmul_strided_operands() {
        let a = Array::from_vec(vec![1.0, 2.0, 3.0, 4.0], [2, 2]).unwrap();
        let at = a.t();
        assert_eq!(matmul(&at, &a).unwrap().to_vec(), vec![10.0, 14.0, 14.0, 20.0]);
        let reversed = a.index(&s![..;-1]).unwrap();
        assert_eq!(matmul(&reversed, &a).unwrap().to_vec(), vec![15.0, 22.0, 7.0, 10.0]);
    }

    #[test]
    fn test_matmul_errors() {
        let a = Array::<f64>::zeros([2, 3]);
        assert_eq!(
            matmul(&a, &a).unwrap_err(),
            Error::Broadcast("(2, 3) (2, 3)".into())
        );
        let cube = Array::<f64>::zeros([2, 2, 2]);
        assert!(matches!(matmul(&cube, &a), Err(Error::Rank { op: "matmul", ndim: 3, .. })));
    }

    #[test]
    fn test_lu_reconstructs() {
        let a = system();
        let lu = LuDecomposition::new(&a).unwrap();
        let pa = matmul(&lu.permutation(), &a).unwrap();
        let l_u = matmul(&lu.l(), &lu.u()).unwrap();
        assert_close(&pa, &l_u);
        // input untouched
        assert_eq!(a, system());
        // first pivot is the largest entry of column 0
        assert_eq!(lu.pivots().get(&[0]).unwrap(), 1);
        assert_eq!(lu.u().get(&[0, 0]).unwrap(), 4.0);
    }

    #[test]
    fn test_lu_solve_vector_and_matrix() {
        let a = system();
        let b = Array::from(vec![5.0, -2.0, 9.0]);
        let x = solve(&a, &b).unwrap();
        assert_close(&x, &Array::from(vec![1.0, 1.0, 2.0]));

        let rhs = Array::from_vec(vec![5.0, 10.0, -2.0, -4.0, 9.0, 18.0], [3, 2]).unwrap();
        let xs = solve(&a, &rhs).unwrap();
        assert_close(&xs, &Array::from_vec(vec![1.0, 2.0, 1.0, 2.0, 2.0, 4.0], [3, 2]).unwrap());
    }

    #[test]
    fn test_det_and_inverse() {
        let a = system();
        assert_abs_diff_eq!(det(&a).unwrap(), -16.0, epsilon = 1e-12);
        let inverse = inv(&a).unwrap();
        assert_close(&matmul(&a, &inverse).unwrap(), &Array::identity(3));
        let singular = Array::from_vec(vec![1.0, 2.0, 2.0, 4.0], [2, 2]).unwrap();
        assert_eq!(det(&singular).unwrap(), 0.0);
    }

    #[test]
    fn test_lu_errors() {
        let singular = Array::from_vec(vec![1.0, 2.0, 2.0, 4.0], [2, 2]).unwrap();
        assert_eq!(LuDecomposition::new(&singular).unwrap_err(), Error::Singular);
        let wide = Array::<f32>::zeros([2, 3]);
        assert_eq!(
            LuDecomposition::new(&wide).unwrap_err(),
            Error::NotSquare("(2, 3)".into())
        );
        let vector = Array::<f32>::zeros([3]);
        assert!(matches!(LuDecomposition::new(&vector), Err(Error::Rank { ndim: 1, .. })));
        let lu = LuDecomposition::new(&system()).unwrap();
        assert!(matches!(lu.solve(&Array::zeros([2])), Err(Error::Broadcast(_))));
    }

    #[test]
    fn test_lu_of_strided_view() {
        let big = Array::from_vec((0..16).map(f64::from).collect(), [4, 4]).unwrap();
        let block = big.index(&s![..;2, 1..;2]).unwrap();
        // [[1, 3], [9, 11]]
        let lu = LuDecomposition::new(&block).unwrap();
        assert_abs_diff_eq!(lu.det(), 11.0 - 27.0, epsilon = 1e-12);
        assert_eq!(big.get(&[0, 1]).unwrap(), 1.0);
    }

    #[test]
    fn test_lu_pivot_swap_after_first_column() {
        // column 1 of the trailing block pivots on its last row
        let a = Array::from_vec(vec![3.0, 1.0, 2.0, 1.0, 1.0, 1.0, 2.0, 5.0, 1.0], [3, 3]).unwrap();
        let lu = LuDecomposition::new(&a).unwrap();
        assert_eq!(lu.pivots().to_vec(), vec![0, 2, 1]);

        let pa = matmul(&lu.permutation(), &a).unwrap();
        assert_close(&pa, &matmul(&lu.l(), &lu.u()).unwrap());
        assert_abs_diff_eq!(lu.l().get(&[1, 0]).unwrap(), 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(lu.l().get(&[2, 0]).unwrap(), 1.0 / 3.0, epsilon = 1e-12);

        let x = lu.solve(&Array::from(vec![6.0, 3.0, 8.0])).unwrap();
        assert_close(&x, &Array::from(vec![1.0, 1.0, 1.0]));
        assert_abs_diff_eq!(lu.det(), -5.0, epsilon = 1e-12);
        assert_close(&matmul(&a, &lu.inverse().unwrap()).unwrap(), &Array::identity(3));
    }

    #[test]
    fn test_matmul_integer_wraps() {
        let a = Array::from_vec(vec![100u8, 100], [1, 2]).unwrap();
        let b = Array::from_vec(vec![2u8, 1], [2, 1]).unwrap();
        // 100 * 2 + 100 = 300 = 44 (mod 256)
        assert_eq!(matmul(&a, &b).unwrap().to_vec(), vec![44]);
    }
}
