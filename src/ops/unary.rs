//! Unary ufuncs: kernels and their free functions.
//!
//! Transcendental functions promote their input to [`Element::Float`], so
//! `sqrt` of an `i32` array is an `f64` array. Kernels marked *complex-aware*
//! also accept complex input; the rest need a real floating-point type.

use crate::error::Result;
use crate::ufunc::{self, IntoOperand, UnaryKernel};
use crate::{Array, Element, Numeric};
use num_complex::{Complex32, Complex64, ComplexFloat};
use num_traits::{Float, Num, Signed};

/// Free function and `_into` variant for a unary kernel.
macro_rules! unary_fns {
    ($kernel:ident, $name:ident, $into:ident) => {
        #[doc = concat!("Apply `", stringify!($name), "` elementwise, returning a new array.")]
        pub fn $name<T: Element>(
            x: impl IntoOperand<T>,
        ) -> Result<Array<<$kernel as UnaryKernel<T>>::Output>>
        where
            $kernel: UnaryKernel<T>,
        {
            ufunc::unary(&$kernel, x)
        }

        #[doc = concat!("Apply `", stringify!($name), "` elementwise, writing through `out`.")]
        pub fn $into<T: Element, O: Element>(x: impl IntoOperand<T>, out: &Array<O>) -> Result<()>
        where
            $kernel: UnaryKernel<T>,
        {
            ufunc::unary_into(&$kernel, x, out)
        }
    };
}

/// A kernel calling a `ComplexFloat` method on the promoted input.
macro_rules! complex_float_kernel {
    ($(#[$doc:meta])* $kernel:ident, $name:ident, $into:ident, $method:ident) => {
        $(#[$doc])*
        #[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
        pub struct $kernel;

        impl<T> UnaryKernel<T> for $kernel
        where
            T: Element,
            T::Float: ComplexFloat,
        {
            type Output = T::Float;
            const NAME: &'static str = stringify!($name);

            #[inline]
            fn call(&self, x: T) -> T::Float {
                x.to_float().$method()
            }
        }

        unary_fns!($kernel, $name, $into);
    };
}

/// A kernel calling a real `Float` method on the promoted input.
macro_rules! real_float_kernel {
    ($(#[$doc:meta])* $kernel:ident, $name:ident, $into:ident, $method:ident) => {
        $(#[$doc])*
        #[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
        pub struct $kernel;

        impl<T> UnaryKernel<T> for $kernel
        where
            T: Element,
            T::Float: Float,
        {
            type Output = T::Float;
            const NAME: &'static str = stringify!($name);

            #[inline]
            fn call(&self, x: T) -> T::Float {
                x.to_float().$method()
            }
        }

        unary_fns!($kernel, $name, $into);
    };
}

/// Numerical negative; integers wrap, so unsigned `x` maps to `0 - x`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Negative;

impl<T: Numeric> UnaryKernel<T> for Negative {
    type Output = T;
    const NAME: &'static str = "negative";

    #[inline]
    fn call(&self, x: T) -> T {
        x.modular_neg()
    }
}

unary_fns!(Negative, negative, negative_into);

/// Numerical positive: a copy of the input.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Positive;

impl<T: Element + Num> UnaryKernel<T> for Positive {
    type Output = T;
    const NAME: &'static str = "positive";

    #[inline]
    fn call(&self, x: T) -> T {
        x
    }
}

unary_fns!(Positive, positive, positive_into);

/// Absolute value, keeping the input type. The most negative integer maps
/// to itself.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Absolute;

impl<T: Numeric + Signed + PartialOrd> UnaryKernel<T> for Absolute {
    type Output = T;
    const NAME: &'static str = "absolute";

    #[inline]
    fn call(&self, x: T) -> T {
        if T::DTYPE.is_int() && x < T::zero() {
            x.modular_neg()
        } else {
            x.abs()
        }
    }
}

unary_fns!(Absolute, absolute, absolute_into);

/// `-1`, `0` or `1` by the sign of the input; NaN stays NaN.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Sign;

impl<T: Element + Signed + PartialOrd> UnaryKernel<T> for Sign {
    type Output = T;
    const NAME: &'static str = "sign";

    #[inline]
    fn call(&self, x: T) -> T {
        if x > T::zero() {
            T::one()
        } else if x < T::zero() {
            -T::one()
        } else {
            x
        }
    }
}

unary_fns!(Sign, sign, sign_into);

/// `x * x`, keeping the input type; integers wrap on overflow.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Square;

impl<T: Numeric> UnaryKernel<T> for Square {
    type Output = T;
    const NAME: &'static str = "square";

    #[inline]
    fn call(&self, x: T) -> T {
        x.modular_mul(x)
    }
}

unary_fns!(Square, square, square_into);

/// Complex conjugate; the identity on real types.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Conjugate;

macro_rules! impl_real_conjugate {
    ($($ty:ty),*) => {
        $(
            impl UnaryKernel<$ty> for Conjugate {
                type Output = $ty;
                const NAME: &'static str = "conjugate";

                #[inline]
                fn call(&self, x: $ty) -> $ty {
                    x
                }
            }
        )*
    };
}

impl_real_conjugate!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl UnaryKernel<Complex32> for Conjugate {
    type Output = Complex32;
    const NAME: &'static str = "conjugate";

    #[inline]
    fn call(&self, x: Complex32) -> Complex32 {
        x.conj()
    }
}

impl UnaryKernel<Complex64> for Conjugate {
    type Output = Complex64;
    const NAME: &'static str = "conjugate";

    #[inline]
    fn call(&self, x: Complex64) -> Complex64 {
        x.conj()
    }
}

unary_fns!(Conjugate, conjugate, conjugate_into);

pub use conjugate as conj;
pub use conjugate_into as conj_into;

/// Round to the nearest integer, halves to even.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Rint;

fn round_half_even<F: Float>(x: F) -> F {
    let two = F::one() + F::one();
    let r = x.round();
    if (r - x).abs() == two.recip() && r % two != F::zero() {
        r - x.signum()
    } else {
        r
    }
}

impl<T> UnaryKernel<T> for Rint
where
    T: Element,
    T::Float: Float,
{
    type Output = T::Float;
    const NAME: &'static str = "rint";

    #[inline]
    fn call(&self, x: T) -> T::Float {
        round_half_even(x.to_float())
    }
}

unary_fns!(Rint, rint, rint_into);

complex_float_kernel!(
    /// `1 / x`. Complex-aware.
    Reciprocal, reciprocal, reciprocal_into, recip
);
complex_float_kernel!(
    /// Principal square root. Complex-aware.
    Sqrt, sqrt, sqrt_into, sqrt
);
complex_float_kernel!(
    /// `e^x`. Complex-aware.
    Exp, exp, exp_into, exp
);
complex_float_kernel!(
    /// `2^x`. Complex-aware.
    Exp2, exp2, exp2_into, exp2
);
complex_float_kernel!(
    /// Natural logarithm. Complex-aware.
    Log, log, log_into, ln
);
complex_float_kernel!(
    /// Base-2 logarithm. Complex-aware.
    Log2, log2, log2_into, log2
);
complex_float_kernel!(
    /// Base-10 logarithm. Complex-aware.
    Log10, log10, log10_into, log10
);
complex_float_kernel!(
    /// Sine. Complex-aware.
    Sin, sin, sin_into, sin
);
complex_float_kernel!(
    /// Cosine. Complex-aware.
    Cos, cos, cos_into, cos
);
complex_float_kernel!(
    /// Tangent. Complex-aware.
    Tan, tan, tan_into, tan
);
complex_float_kernel!(
    /// Inverse sine. Complex-aware.
    Arcsin, arcsin, arcsin_into, asin
);
complex_float_kernel!(
    /// Inverse cosine. Complex-aware.
    Arccos, arccos, arccos_into, acos
);
complex_float_kernel!(
    /// Inverse tangent. Complex-aware.
    Arctan, arctan, arctan_into, atan
);
complex_float_kernel!(
    /// Hyperbolic sine. Complex-aware.
    Sinh, sinh, sinh_into, sinh
);
complex_float_kernel!(
    /// Hyperbolic cosine. Complex-aware.
    Cosh, cosh, cosh_into, cosh
);
complex_float_kernel!(
    /// Hyperbolic tangent. Complex-aware.
    Tanh, tanh, tanh_into, tanh
);
complex_float_kernel!(
    /// Inverse hyperbolic sine. Complex-aware.
    Arcsinh, arcsinh, arcsinh_into, asinh
);
complex_float_kernel!(
    /// Inverse hyperbolic cosine. Complex-aware.
    Arccosh, arccosh, arccosh_into, acosh
);
complex_float_kernel!(
    /// Inverse hyperbolic tangent. Complex-aware.
    Arctanh, arctanh, arctanh_into, atanh
);

real_float_kernel!(
    /// Absolute value as a float.
    Fabs, fabs, fabs_into, abs
);
real_float_kernel!(
    /// Real cube root.
    Cbrt, cbrt, cbrt_into, cbrt
);
real_float_kernel!(
    /// `e^x - 1`, accurate near zero.
    Expm1, expm1, expm1_into, exp_m1
);
real_float_kernel!(
    /// `ln(1 + x)`, accurate near zero.
    Log1p, log1p, log1p_into, ln_1p
);
real_float_kernel!(
    /// Radians to degrees.
    Degrees, degrees, degrees_into, to_degrees
);
real_float_kernel!(
    /// Degrees to radians.
    Radians, radians, radians_into, to_radians
);
pub use degrees as rad2deg;
pub use degrees_into as rad2deg_into;
pub use radians as deg2rad;
pub use radians_into as deg2rad_into;

real_float_kernel!(
    /// Largest integer not greater than the input.
    Floor, floor, floor_into, floor
);
real_float_kernel!(
    /// Smallest integer not less than the input.
    Ceil, ceil, ceil_into, ceil
);
