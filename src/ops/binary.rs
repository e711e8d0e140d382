//! Binary ufuncs, and the arithmetic operators built on them.
//!
//! Every operator has a fallible twin here: `&a + &b` is [`add`]`(&a, &b)`
//! and `a += &b` is [`add_into`]`(&a, &b, &a)`. The operators panic where the
//! functions return an error.

use crate::error::Result;
use crate::ops::unary::Negative;
use crate::ufunc::{self, BinaryKernel, IntoOperand, UnaryKernel};
use crate::{Array, Element, Numeric};
use num_complex::{Complex32, Complex64};
use num_traits::{Float, One, Zero};

/// Free function and `_into` variant for a binary kernel.
macro_rules! binary_fns {
    ($kernel:ident, $name:ident, $into:ident) => {
        #[doc = concat!("Apply `", stringify!($name), "` over the broadcast of `x1` and `x2`.")]
        pub fn $name<A: Element, B: Element>(
            x1: impl IntoOperand<A>,
            x2: impl IntoOperand<B>,
        ) -> Result<Array<<$kernel as BinaryKernel<A, B>>::Output>>
        where
            $kernel: BinaryKernel<A, B>,
        {
            ufunc::binary(&$kernel, x1, x2)
        }

        #[doc = concat!("Apply `", stringify!($name), "` over the broadcast of `x1` and `x2`, writing through `out`.")]
        pub fn $into<A: Element, B: Element, O: Element>(
            x1: impl IntoOperand<A>,
            x2: impl IntoOperand<B>,
            out: &Array<O>,
        ) -> Result<()>
        where
            $kernel: BinaryKernel<A, B>,
        {
            ufunc::binary_into(&$kernel, x1, x2, out)
        }
    };
}

/// A same-type kernel built from a [`Numeric`] operation.
macro_rules! arithmetic_kernel {
    ($(#[$doc:meta])* $kernel:ident, $name:ident, $into:ident, $method:ident) => {
        $(#[$doc])*
        #[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
        pub struct $kernel;

        impl<T: Numeric> BinaryKernel<T, T> for $kernel {
            type Output = T;
            const NAME: &'static str = stringify!($name);

            #[inline]
            fn call(&self, a: T, b: T) -> T {
                a.$method(b)
            }
        }

        binary_fns!($kernel, $name, $into);
    };
}

/// A kernel on the promoted real floating-point type.
macro_rules! real_float_kernel {
    ($(#[$doc:meta])* $kernel:ident, $name:ident, $into:ident, |$a:ident, $b:ident| $body:expr) => {
        $(#[$doc])*
        #[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
        pub struct $kernel;

        impl<T> BinaryKernel<T, T> for $kernel
        where
            T: Element,
            T::Float: Float,
        {
            type Output = T::Float;
            const NAME: &'static str = stringify!($name);

            #[inline]
            fn call(&self, a: T, b: T) -> T::Float {
                let ($a, $b) = (a.to_float(), b.to_float());
                $body
            }
        }

        binary_fns!($kernel, $name, $into);
    };
}

arithmetic_kernel!(
    /// `a + b`; integers wrap on overflow.
    Add, add, add_into, modular_add
);
arithmetic_kernel!(
    /// `a - b`; integers wrap on overflow.
    Subtract, subtract, subtract_into, modular_sub
);
arithmetic_kernel!(
    /// `a * b`; integers wrap on overflow.
    Multiply, multiply, multiply_into, modular_mul
);

/// True division, on the promoted floating-point type.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Divide;

impl<T> BinaryKernel<T, T> for Divide
where
    T: Element,
    T::Float: std::ops::Div<Output = T::Float>,
{
    type Output = T::Float;
    const NAME: &'static str = "divide";

    #[inline]
    fn call(&self, a: T, b: T) -> T::Float {
        a.to_float() / b.to_float()
    }
}

binary_fns!(Divide, divide, divide_into);

pub use divide as true_divide;
pub use divide_into as true_divide_into;

/// `a` raised to the power `b`.
///
/// Integer powers stay integers; a negative exponent truncates `1 / a^|b|`
/// toward zero.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Power;

macro_rules! impl_signed_power {
    ($($ty:ty),*) => {
        $(
            impl BinaryKernel<$ty, $ty> for Power {
                type Output = $ty;
                const NAME: &'static str = "power";

                #[inline]
                fn call(&self, a: $ty, b: $ty) -> $ty {
                    if b >= 0 {
                        a.wrapping_pow(b as u32)
                    } else {
                        match a {
                            1 => 1,
                            -1 if b % 2 == 0 => 1,
                            -1 => -1,
                            _ => 0,
                        }
                    }
                }
            }
        )*
    };
}

macro_rules! impl_unsigned_power {
    ($($ty:ty),*) => {
        $(
            impl BinaryKernel<$ty, $ty> for Power {
                type Output = $ty;
                const NAME: &'static str = "power";

                #[inline]
                fn call(&self, a: $ty, b: $ty) -> $ty {
                    a.wrapping_pow(u32::try_from(b).unwrap_or(u32::MAX))
                }
            }
        )*
    };
}

macro_rules! impl_float_power {
    ($($ty:ty => $method:ident),*) => {
        $(
            impl BinaryKernel<$ty, $ty> for Power {
                type Output = $ty;
                const NAME: &'static str = "power";

                #[inline]
                fn call(&self, a: $ty, b: $ty) -> $ty {
                    a.$method(b)
                }
            }
        )*
    };
}

impl_signed_power!(i8, i16, i32, i64);
impl_unsigned_power!(u8, u16, u32, u64);
impl_float_power!(f32 => powf, f64 => powf, Complex32 => powc, Complex64 => powc);

binary_fns!(Power, power, power_into);

/// Elementwise maximum; a NaN in either input wins.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Maximum;

impl<T: Element + PartialOrd> BinaryKernel<T, T> for Maximum {
    type Output = T;
    const NAME: &'static str = "maximum";

    #[inline]
    #[allow(clippy::eq_op)]
    fn call(&self, a: T, b: T) -> T {
        if a != a || a >= b {
            a
        } else {
            b
        }
    }
}

binary_fns!(Maximum, maximum, maximum_into);

/// Elementwise minimum; a NaN in either input wins.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Minimum;

impl<T: Element + PartialOrd> BinaryKernel<T, T> for Minimum {
    type Output = T;
    const NAME: &'static str = "minimum";

    #[inline]
    #[allow(clippy::eq_op)]
    fn call(&self, a: T, b: T) -> T {
        if a != a || a <= b {
            a
        } else {
            b
        }
    }
}

binary_fns!(Minimum, minimum, minimum_into);

/// Remainder with the sign of the dividend, as C `fmod`.
///
/// Integer division by zero yields 0; floating-point yields NaN.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Fmod;

impl<T: Numeric + PartialOrd> BinaryKernel<T, T> for Fmod {
    type Output = T;
    const NAME: &'static str = "fmod";

    #[inline]
    fn call(&self, a: T, b: T) -> T {
        a.modular_rem(b)
    }
}

binary_fns!(Fmod, fmod, fmod_into);

/// Largest integer not greater than `a / b`, keeping the input type.
///
/// Integer division by zero yields 0; floating-point follows IEEE 754.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FloorDivide;

macro_rules! impl_signed_floor_divide {
    ($($ty:ty),*) => {
        $(
            impl BinaryKernel<$ty, $ty> for FloorDivide {
                type Output = $ty;
                const NAME: &'static str = "floor_divide";

                #[inline]
                fn call(&self, a: $ty, b: $ty) -> $ty {
                    if b == 0 {
                        return 0;
                    }
                    let q = a.wrapping_div(b);
                    if a.wrapping_rem(b) != 0 && (a < 0) != (b < 0) {
                        q - 1
                    } else {
                        q
                    }
                }
            }
        )*
    };
}

macro_rules! impl_unsigned_floor_divide {
    ($($ty:ty),*) => {
        $(
            impl BinaryKernel<$ty, $ty> for FloorDivide {
                type Output = $ty;
                const NAME: &'static str = "floor_divide";

                #[inline]
                fn call(&self, a: $ty, b: $ty) -> $ty {
                    a.checked_div(b).unwrap_or(0)
                }
            }
        )*
    };
}

macro_rules! impl_float_floor_divide {
    ($($ty:ty),*) => {
        $(
            impl BinaryKernel<$ty, $ty> for FloorDivide {
                type Output = $ty;
                const NAME: &'static str = "floor_divide";

                #[inline]
                fn call(&self, a: $ty, b: $ty) -> $ty {
                    (a / b).floor()
                }
            }
        )*
    };
}

impl_signed_floor_divide!(i8, i16, i32, i64);
impl_unsigned_floor_divide!(u8, u16, u32, u64);
impl_float_floor_divide!(f32, f64);

binary_fns!(FloorDivide, floor_divide, floor_divide_into);

/// Greatest common divisor of `|a|` and `|b|`; `gcd(0, 0)` is 0.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Gcd;

/// Lowest common multiple of `|a|` and `|b|`; 0 if either is 0.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Lcm;

fn euclid(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

macro_rules! impl_gcd_lcm {
    ($($ty:ty),*) => {
        $(
            impl BinaryKernel<$ty, $ty> for Gcd {
                type Output = $ty;
                const NAME: &'static str = "gcd";

                #[inline]
                fn call(&self, a: $ty, b: $ty) -> $ty {
                    euclid((a as i128).unsigned_abs(), (b as i128).unsigned_abs()) as $ty
                }
            }

            impl BinaryKernel<$ty, $ty> for Lcm {
                type Output = $ty;
                const NAME: &'static str = "lcm";

                #[inline]
                fn call(&self, a: $ty, b: $ty) -> $ty {
                    let (x, y) = ((a as i128).unsigned_abs(), (b as i128).unsigned_abs());
                    if x == 0 || y == 0 {
                        0
                    } else {
                        (x / euclid(x, y) * y) as $ty
                    }
                }
            }
        )*
    };
}

impl_gcd_lcm!(i8, i16, i32, i64, u8, u16, u32, u64);

binary_fns!(Gcd, gcd, gcd_into);
binary_fns!(Lcm, lcm, lcm_into);

real_float_kernel!(
    /// `a` raised to the power `b`, always on the promoted floating-point
    /// type, so negative integer exponents give fractions.
    FloatPower, float_power, float_power_into, |a, b| a.powf(b)
);
real_float_kernel!(
    /// `sqrt(a² + b²)` without intermediate overflow.
    Hypot, hypot, hypot_into, |a, b| a.hypot(b)
);
real_float_kernel!(
    /// Arc tangent of `a / b` in the quadrant of the point `(b, a)`.
    Arctan2, arctan2, arctan2_into, |a, b| a.atan2(b)
);
real_float_kernel!(
    /// `ln(e^a + e^b)` without overflow.
    Logaddexp, logaddexp, logaddexp_into, |a, b| {
        if a == b {
            a + (T::Float::one() + T::Float::one()).ln()
        } else {
            let hi = if a > b { a } else { b };
            hi + (-(a - b).abs()).exp().ln_1p()
        }
    }
);
real_float_kernel!(
    /// `log2(2^a + 2^b)` without overflow.
    Logaddexp2, logaddexp2, logaddexp2_into, |a, b| {
        if a == b {
            a + T::Float::one()
        } else {
            let hi = if a > b { a } else { b };
            let ln2 = (T::Float::one() + T::Float::one()).ln();
            hi + (-(a - b).abs()).exp2().ln_1p() / ln2
        }
    }
);
real_float_kernel!(
    /// Heaviside step: 0 below zero, `b` at zero, 1 above.
    Heaviside, heaviside, heaviside_into, |a, b| {
        if a.is_nan() {
            a
        } else if a < T::Float::zero() {
            T::Float::zero()
        } else if a > T::Float::zero() {
            T::Float::one()
        } else {
            b
        }
    }
);

impl<T: Element> Array<T> {
    /// Elementwise `self + other`, broadcasting.
    pub fn add(
        &self,
        other: impl IntoOperand<T>,
    ) -> Result<Array<<Add as BinaryKernel<T, T>>::Output>>
    where
        Add: BinaryKernel<T, T>,
    {
        add(self, other)
    }

    /// Elementwise `self - other`, broadcasting.
    pub fn sub(
        &self,
        other: impl IntoOperand<T>,
    ) -> Result<Array<<Subtract as BinaryKernel<T, T>>::Output>>
    where
        Subtract: BinaryKernel<T, T>,
    {
        subtract(self, other)
    }

    /// Elementwise `self * other`, broadcasting.
    pub fn mul(
        &self,
        other: impl IntoOperand<T>,
    ) -> Result<Array<<Multiply as BinaryKernel<T, T>>::Output>>
    where
        Multiply: BinaryKernel<T, T>,
    {
        multiply(self, other)
    }

    /// Elementwise true division `self / other`, broadcasting.
    pub fn div(
        &self,
        other: impl IntoOperand<T>,
    ) -> Result<Array<<Divide as BinaryKernel<T, T>>::Output>>
    where
        Divide: BinaryKernel<T, T>,
    {
        divide(self, other)
    }
}

fn expect<T>(result: Result<T>) -> T {
    result.unwrap_or_else(|err| panic!("{}", err))
}

/// `&a ⊕ &b`, `a ⊕ b`, `a ⊕ &b`, `&a ⊕ b`, `&a ⊕ s`, `a ⊕ s`, and the
/// compound assignments `a ⊕= &b`, `a ⊕= b`, `a ⊕= s`.
macro_rules! impl_operator {
    ($kernel:ident, $op:ident, $method:ident, $op_assign:ident, $method_assign:ident) => {
        /// # Panics
        ///
        /// Panics if the shapes cannot be broadcast together.
        impl<T> std::ops::$op<&Array<T>> for &Array<T>
        where
            T: Element,
            $kernel: BinaryKernel<T, T>,
        {
            type Output = Array<<$kernel as BinaryKernel<T, T>>::Output>;

            fn $method(self, rhs: &Array<T>) -> Self::Output {
                expect(ufunc::binary(&$kernel, self, rhs))
            }
        }

        impl<T> std::ops::$op<Array<T>> for Array<T>
        where
            T: Element,
            $kernel: BinaryKernel<T, T>,
        {
            type Output = Array<<$kernel as BinaryKernel<T, T>>::Output>;

            fn $method(self, rhs: Array<T>) -> Self::Output {
                expect(ufunc::binary(&$kernel, &self, &rhs))
            }
        }

        impl<T> std::ops::$op<&Array<T>> for Array<T>
        where
            T: Element,
            $kernel: BinaryKernel<T, T>,
        {
            type Output = Array<<$kernel as BinaryKernel<T, T>>::Output>;

            fn $method(self, rhs: &Array<T>) -> Self::Output {
                expect(ufunc::binary(&$kernel, &self, rhs))
            }
        }

        impl<T> std::ops::$op<Array<T>> for &Array<T>
        where
            T: Element,
            $kernel: BinaryKernel<T, T>,
        {
            type Output = Array<<$kernel as BinaryKernel<T, T>>::Output>;

            fn $method(self, rhs: Array<T>) -> Self::Output {
                expect(ufunc::binary(&$kernel, self, &rhs))
            }
        }

        impl<T> std::ops::$op<T> for &Array<T>
        where
            T: Element,
            $kernel: BinaryKernel<T, T>,
        {
            type Output = Array<<$kernel as BinaryKernel<T, T>>::Output>;

            fn $method(self, rhs: T) -> Self::Output {
                expect(ufunc::binary(&$kernel, self, Array::scalar(rhs)))
            }
        }

        impl<T> std::ops::$op<T> for Array<T>
        where
            T: Element,
            $kernel: BinaryKernel<T, T>,
        {
            type Output = Array<<$kernel as BinaryKernel<T, T>>::Output>;

            fn $method(self, rhs: T) -> Self::Output {
                expect(ufunc::binary(&$kernel, &self, Array::scalar(rhs)))
            }
        }

        /// In-place update through the view. Overlap between `rhs` and
        /// `self` is resolved before anything is written.
        ///
        /// # Panics
        ///
        /// Panics if `rhs` does not broadcast to the shape of `self`.
        impl<T> std::ops::$op_assign<&Array<T>> for Array<T>
        where
            T: Element,
            $kernel: BinaryKernel<T, T, Output = T>,
        {
            fn $method_assign(&mut self, rhs: &Array<T>) {
                expect(ufunc::binary_into(&$kernel, &*self, rhs, &*self))
            }
        }

        impl<T> std::ops::$op_assign<Array<T>> for Array<T>
        where
            T: Element,
            $kernel: BinaryKernel<T, T, Output = T>,
        {
            fn $method_assign(&mut self, rhs: Array<T>) {
                expect(ufunc::binary_into(&$kernel, &*self, &rhs, &*self))
            }
        }

        impl<T> std::ops::$op_assign<T> for Array<T>
        where
            T: Element,
            $kernel: BinaryKernel<T, T, Output = T>,
        {
            fn $method_assign(&mut self, rhs: T) {
                expect(ufunc::binary_into(&$kernel, &*self, Array::scalar(rhs), &*self))
            }
        }
    };
}

impl_operator!(Add, Add, add, AddAssign, add_assign);
impl_operator!(Subtract, Sub, sub, SubAssign, sub_assign);
impl_operator!(Multiply, Mul, mul, MulAssign, mul_assign);
impl_operator!(Divide, Div, div, DivAssign, div_assign);

/// `s ⊕ &a` and `s ⊕ a` for a scalar on the left.
macro_rules! impl_scalar_lhs {
    ($($ty:ty),*) => {
        $(
            impl_scalar_lhs!(@op $ty, Add, Add, add);
            impl_scalar_lhs!(@op $ty, Subtract, Sub, sub);
            impl_scalar_lhs!(@op $ty, Multiply, Mul, mul);
            impl_scalar_lhs!(@op $ty, Divide, Div, div);
        )*
    };
    (@op $ty:ty, $kernel:ident, $op:ident, $method:ident) => {
        impl std::ops::$op<&Array<$ty>> for $ty {
            type Output = Array<<$kernel as BinaryKernel<$ty, $ty>>::Output>;

            fn $method(self, rhs: &Array<$ty>) -> Self::Output {
                expect(ufunc::binary(&$kernel, self, rhs))
            }
        }

        impl std::ops::$op<Array<$ty>> for $ty {
            type Output = Array<<$kernel as BinaryKernel<$ty, $ty>>::Output>;

            fn $method(self, rhs: Array<$ty>) -> Self::Output {
                expect(ufunc::binary(&$kernel, self, &rhs))
            }
        }
    };
}

impl_scalar_lhs!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, Complex32, Complex64);

impl<T> std::ops::Neg for &Array<T>
where
    T: Element,
    Negative: UnaryKernel<T>,
{
    type Output = Array<<Negative as UnaryKernel<T>>::Output>;

    fn neg(self) -> Self::Output {
        expect(ufunc::unary(&Negative, self))
    }
}

impl<T> std::ops::Neg for Array<T>
where
    T: Element,
    Negative: UnaryKernel<T>,
{
    type Output = Array<<Negative as UnaryKernel<T>>::Output>;

    fn neg(self) -> Self::Output {
        expect(ufunc::unary(&Negative, &self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::s;
    use approx::assert_abs_diff_eq;

    fn arange(n: i32, shape: &[usize]) -> Array<i32> {
        Array::from_vec((0..n).collect(), shape).unwrap()
    }

    #[test]
    fn test_add() {
        let a = Array::from_vec(vec![1.0, 2.0, 3.0], [3]).unwrap();
        let b = Array::from_vec(vec![4.0, 5.0, 6.0], [3]).unwrap();
        assert_eq!((&a + &b).to_vec(), vec![5.0, 7.0, 9.0]);
        assert_eq!(add(&a, &b).unwrap().to_vec(), vec![5.0, 7.0, 9.0]);
        assert_eq!(a.add(1.0).unwrap().to_vec(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sub_mul() {
        let a = arange(4, &[4]);
        assert_eq!((&a - 1).to_vec(), vec![-1, 0, 1, 2]);
        assert_eq!((10 - &a).to_vec(), vec![10, 9, 8, 7]);
        assert_eq!((&a * &a).to_vec(), vec![0, 1, 4, 9]);
        assert_eq!((2 * a).to_vec(), vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_true_division_promotes() {
        let a = Array::from_vec(vec![1, 2, 3], [3]).unwrap();
        let q = &a / 2;
        assert_eq!(q.dtype(), crate::DType::Float64);
        assert_eq!(q.to_vec(), vec![0.5, 1.0, 1.5]);
        let z = divide(&a, 0).unwrap().to_vec();
        assert!(z.iter().all(|v: &f64| v.is_infinite()));
    }

    #[test]
    fn test_broadcast_row_col() {
        let col = Array::from_vec(vec![0.0, 10.0, 20.0, 30.0], [4, 1]).unwrap();
        let row = Array::from_vec(vec![1.0, 2.0, 3.0], [1, 3]).unwrap();
        let sum = &col + &row;
        assert_eq!(sum.shape().as_slice(), &[4, 3]);
        assert_eq!(sum.get(&[2, 1]).unwrap(), 22.0);
    }

    #[test]
    #[should_panic(expected = "could not be broadcast")]
    fn test_operator_panics_on_mismatch() {
        let _ = &arange(6, &[2, 3]) + &arange(2, &[2]);
    }

    #[test]
    fn test_compound_assign_through_view() {
        let a = arange(6, &[2, 3]);
        let mut row = a.index(&s![1]).unwrap();
        row += 10;
        assert_eq!(a.to_vec(), vec![0, 1, 2, 13, 14, 15]);
        let mut col = a.index(&s![.., 0]).unwrap();
        col *= &Array::from(vec![2, 3]);
        assert_eq!(a.to_vec(), vec![0, 1, 2, 39, 14, 15]);
    }

    #[test]
    fn test_compound_assign_transposed_alias() {
        let mut x = Array::from_vec((0..9).map(f64::from).collect(), [3, 3]).unwrap();
        let expected = &x + &x.t();
        let xt = x.t();
        x += &xt;
        assert_eq!(x, expected);
    }

    #[test]
    fn test_compound_assign_never_stretches() {
        let a = arange(3, &[3]);
        let b = arange(6, &[2, 3]);
        let err = add_into(&a, &b, &a).unwrap_err();
        assert!(matches!(err, Error::Broadcast(_)));
        assert_eq!(a.to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_neg() {
        let a = Array::from_vec(vec![1.0, -2.0], [2]).unwrap();
        assert_eq!((-&a).to_vec(), vec![-1.0, 2.0]);
        assert_eq!((-a).to_vec(), vec![-1.0, 2.0]);
    }

    #[test]
    fn test_power() {
        let a = Array::from_vec(vec![2i32, -1, 3], [3]).unwrap();
        assert_eq!(power(&a, 3).unwrap().to_vec(), vec![8, -1, 27]);
        assert_eq!(power(&a, -1).unwrap().to_vec(), vec![0, -1, 0]);
        assert_eq!(power(&Array::from(vec![2u8]), 7).unwrap().to_vec(), vec![128]);
        let f = power(&Array::from(vec![4.0]), 0.5).unwrap();
        assert_eq!(f.to_vec(), vec![2.0]);
    }

    #[test]
    fn test_minimum_maximum() {
        let a = Array::from_vec(vec![1.0, 5.0, f64::NAN], [3]).unwrap();
        let b = Array::from_vec(vec![3.0, 2.0, 0.0], [3]).unwrap();
        let hi = maximum(&a, &b).unwrap().to_vec();
        let lo = minimum(&a, &b).unwrap().to_vec();
        assert_eq!(&hi[..2], &[3.0, 5.0]);
        assert_eq!(&lo[..2], &[1.0, 2.0]);
        assert!(hi[2].is_nan() && lo[2].is_nan());
        assert!(maximum(&b, &a).unwrap().to_vec()[2].is_nan());
    }

    #[test]
    fn test_fmod() {
        let a = Array::from_vec(vec![-7, 7, 5], [3]).unwrap();
        assert_eq!(fmod(&a, 3).unwrap().to_vec(), vec![-1, 1, 2]);
        assert_eq!(fmod(&a, 0).unwrap().to_vec(), vec![0, 0, 0]);
        assert!(fmod(1.0f64, 0.0).unwrap().item().unwrap().is_nan());
        assert_eq!(fmod(-7.5f64, 2.0).unwrap().item().unwrap(), -1.5);
    }

    #[test]
    fn test_hypot_arctan2() {
        assert_eq!(hypot(3.0f64, 4.0).unwrap().item().unwrap(), 5.0);
        let angle = arctan2(1.0f64, -1.0).unwrap().item().unwrap();
        assert_abs_diff_eq!(angle, 3.0 * std::f64::consts::FRAC_PI_4, epsilon = 1e-12);
        assert_eq!(hypot(&Array::from(vec![3i32]), 4).unwrap().to_vec(), vec![5.0]);
    }

    #[test]
    fn test_logaddexp() {
        let v = logaddexp(1000.0f64, 1000.0).unwrap().item().unwrap();
        assert_abs_diff_eq!(v, 1000.0 + std::f64::consts::LN_2, epsilon = 1e-9);
        let v = logaddexp(0.0f64, 0.5).unwrap().item().unwrap();
        assert_abs_diff_eq!(v, (1.0f64 + 0.5f64.exp()).ln(), epsilon = 1e-12);
        let v = logaddexp2(3.0f64, 3.0).unwrap().item().unwrap();
        assert_eq!(v, 4.0);
        let v = logaddexp2(1.0f64, 2.0).unwrap().item().unwrap();
        assert_abs_diff_eq!(v, 6.0f64.log2(), epsilon = 1e-12);
        assert_eq!(logaddexp(f64::NEG_INFINITY, 0.0).unwrap().item().unwrap(), 0.0);
    }

    #[test]
    fn test_heaviside() {
        let x = Array::from_vec(vec![-1.5, 0.0, 2.0], [3]).unwrap();
        assert_eq!(heaviside(&x, 0.5).unwrap().to_vec(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_into_output_type_checked() {
        let a = arange(3, &[3]);
        let out = Array::<i32>::zeros([3]);
        let err = divide_into(&a, &a, &out).unwrap_err();
        assert_eq!(
            err,
            Error::OutputType { ufunc: "divide", expected: "float64", found: "int32" }
        );
        let out = Array::<f64>::zeros([3]);
        divide_into(&a, 2, &out).unwrap();
        assert_eq!(out.to_vec(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_integer_arithmetic_wraps() {
        let a = Array::from(vec![200u8, 255]);
        assert_eq!(add(&a, 100u8).unwrap().to_vec(), vec![44, 99]);
        assert_eq!((&a * 2u8).to_vec(), vec![144, 254]);
        assert_eq!(subtract(0u8, &a).unwrap().to_vec(), vec![56, 1]);
        let b = Array::from(vec![i32::MAX, i32::MIN]);
        assert_eq!((&b + 1).to_vec(), vec![i32::MIN, i32::MIN + 1]);
        assert_eq!((-&b).to_vec(), vec![-i32::MAX, i32::MIN]);
        assert_eq!(fmod(&b, -1).unwrap().to_vec(), vec![0, 0]);
    }

    #[test]
    fn test_floor_divide() {
        let a = Array::from(vec![7, -7, 7, -7, 6]);
        let b = Array::from(vec![2, 2, -2, -2, 0]);
        assert_eq!(floor_divide(&a, &b).unwrap().to_vec(), vec![3, -4, -4, 3, 0]);
        assert_eq!(floor_divide(&Array::from(vec![7u16, 9]), 2u16).unwrap().to_vec(), vec![3, 4]);
        assert_eq!(floor_divide(&Array::from(vec![i8::MIN]), -1i8).unwrap().to_vec(), vec![i8::MIN]);
        let f = floor_divide(&Array::from(vec![-7.5f64, 7.5]), 2.0).unwrap();
        assert_eq!(f.dtype(), crate::DType::Float64);
        assert_eq!(f.to_vec(), vec![-4.0, 3.0]);
    }

    #[test]
    fn test_gcd_lcm() {
        let a = Array::from(vec![12i64, -12, 0, 0, 7]);
        let b = Array::from(vec![18i64, 18, 5, 0, 13]);
        assert_eq!(gcd(&a, &b).unwrap().to_vec(), vec![6, 6, 5, 0, 1]);
        assert_eq!(lcm(&a, &b).unwrap().to_vec(), vec![36, 36, 0, 0, 91]);
        assert_eq!(gcd(&Array::from(vec![u64::MAX]), 3u64).unwrap().to_vec(), vec![3]);
        assert_eq!(lcm(&Array::from(vec![4u8, 6]), 6u8).unwrap().to_vec(), vec![12, 6]);
    }

    #[test]
    fn test_float_power_promotes() {
        let p = float_power(&Array::from(vec![2i32, 4]), -1).unwrap();
        assert_eq!(p.dtype(), crate::DType::Float64);
        assert_eq!(p.to_vec(), vec![0.5, 0.25]);
        assert_eq!(float_power(9.0f32, 0.5).unwrap().item().unwrap(), 3.0);
    }

    #[test]
    fn test_true_divide_alias() {
        let a = Array::from(vec![1, 3]);
        assert_eq!(true_divide(&a, 2).unwrap(), divide(&a, 2).unwrap());
        let out = Array::<f64>::zeros([2]);
        true_divide_into(&a, 4, &out).unwrap();
        assert_eq!(out.to_vec(), vec![0.25, 0.75]);
    }
}
