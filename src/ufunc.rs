//! Elementwise operation ("ufunc") dispatch.
//!
//! A ufunc is a stateless kernel type plus the two engines in this module:
//! [`unary_into`] and [`binary_into`] apply a kernel across broadcast views
//! and write the results through an output view, [`unary`] and [`binary`]
//! allocate that output first.
//!
//! The engines are safe against aliasing. Before any element is written,
//! every input that may share memory with the output is replaced by a copy,
//! so `x += x.t()` computes the same values as `y = x + x.t()`.

use crate::broadcast::broadcast_shapes;
use crate::error::{Error, Result};
use crate::iter::Iter;
use crate::{Array, Buffer, Element};
use num_complex::{Complex32, Complex64};
use std::any::Any;

/// An elementwise function of one argument.
///
/// `Output` is the result-type rule of the ufunc for input type `T`.
pub trait UnaryKernel<T: Element> {
    /// Element type of the result.
    type Output: Element;

    /// Name of the ufunc, as listed by [`registry`].
    const NAME: &'static str;

    /// Apply the function to one element.
    fn call(&self, x: T) -> Self::Output;
}

/// An elementwise function of two arguments.
pub trait BinaryKernel<A: Element, B: Element> {
    /// Element type of the result.
    type Output: Element;

    /// Name of the ufunc, as listed by [`registry`].
    const NAME: &'static str;

    /// Apply the function to one pair of elements.
    fn call(&self, a: A, b: B) -> Self::Output;
}

/// Elementwise copy, used by [`Array::assign`].
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Identity;

impl<T: Element> UnaryKernel<T> for Identity {
    type Output = T;
    const NAME: &'static str = "assign";

    #[inline]
    fn call(&self, x: T) -> T {
        x
    }
}

/// Anything that can stand as an input operand of a ufunc.
///
/// Arrays are passed by handle; scalars become 0-dimensional arrays and
/// broadcast against the other operands.
pub trait IntoOperand<T: Element> {
    /// Convert into an array handle.
    fn into_operand(self) -> Array<T>;
}

impl<T: Element> IntoOperand<T> for Array<T> {
    fn into_operand(self) -> Array<T> {
        self
    }
}

impl<T: Element> IntoOperand<T> for &Array<T> {
    fn into_operand(self) -> Array<T> {
        self.clone()
    }
}

macro_rules! impl_scalar_operand {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoOperand<$ty> for $ty {
                fn into_operand(self) -> Array<$ty> {
                    Array::scalar(self)
                }
            }
        )*
    };
}

impl_scalar_operand!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, Complex32, Complex64);

/// Check that `out` can receive a result of type `R` and return it with
/// that type.
fn typed_output<'a, R: Element, O: Element>(
    ufunc: &'static str,
    out: &'a Array<O>,
) -> Result<&'a Array<R>> {
    (out as &dyn Any)
        .downcast_ref::<Array<R>>()
        .ok_or(Error::OutputType {
            ufunc,
            expected: R::DTYPE.name(),
            found: O::DTYPE.name(),
        })
}

/// Check that `inputs` broadcast to exactly the shape of `out`.
fn check_output_shape<O: Element>(out: &Array<O>, inputs: &[&[usize]]) -> Result<()> {
    let mut shapes = vec![out.shape().as_slice()];
    shapes.extend_from_slice(inputs);
    let shape = broadcast_shapes(&shapes)?;
    if &shape != out.shape() {
        return Err(Error::Broadcast(
            shapes
                .iter()
                .map(|s| crate::Shape::from(*s).to_string())
                .collect::<Vec<_>>()
                .join(" "),
        ));
    }
    Ok(())
}

/// Replace `x` by a private copy if it can reach memory `out` writes.
fn detach<T: Element, O: Element>(ufunc: &'static str, x: Array<T>, out: &Array<O>) -> Array<T> {
    if x.may_share_memory(out) {
        log::trace!("{}: operand {} overlaps output, copying", ufunc, x.shape());
        x.copy()
    } else {
        x
    }
}

fn allocate<T: Element>(shape: crate::Shape) -> Array<T> {
    Array::from_buffer(Buffer::zeros(shape.size()), shape)
}

/// Apply `kernel` to every element of `x`, returning a new array.
///
/// # Examples
///
/// ```
/// # use ndufunc::{ufunc, Array};
/// # use ndufunc::ops::unary::Sqrt;
/// let x = Array::from_vec(vec![1.0, 4.0, 9.0], [3]).unwrap();
/// let y = ufunc::unary(&Sqrt, &x).unwrap();
/// assert_eq!(y.to_vec(), vec![1.0, 2.0, 3.0]);
/// ```
pub fn unary<T, K>(kernel: &K, x: impl IntoOperand<T>) -> Result<Array<K::Output>>
where
    T: Element,
    K: UnaryKernel<T>,
{
    let x = x.into_operand();
    let out = allocate(x.shape().clone());
    unary_into(kernel, &x, &out)?;
    Ok(out)
}

/// Apply `kernel` to every element of `x`, writing through `out`.
///
/// `x` is broadcast to the shape of `out`; the element type of `out` must be
/// the kernel's output type. On error nothing is written.
pub fn unary_into<T, K, O>(kernel: &K, x: impl IntoOperand<T>, out: &Array<O>) -> Result<()>
where
    T: Element,
    K: UnaryKernel<T>,
    O: Element,
{
    let x = x.into_operand();
    check_output_shape(out, &[x.shape().as_slice()])?;
    let out = typed_output::<K::Output, O>(K::NAME, out)?;
    let x = detach(K::NAME, x, out);

    let src = x.metadata().broadcast_to(out.shape())?;
    for (cell, value) in out.cells().zip(Iter::new(x.buffer(), &src)) {
        cell.set(kernel.call(value));
    }
    Ok(())
}

/// Apply `kernel` pairwise over the broadcast of `x1` and `x2`, returning a
/// new array.
///
/// # Examples
///
/// ```
/// # use ndufunc::{ufunc, Array};
/// # use ndufunc::ops::binary::Add;
/// let col = Array::from_vec(vec![0, 10], [2, 1]).unwrap();
/// let row = Array::from_vec(vec![1, 2, 3], [1, 3]).unwrap();
/// let sum = ufunc::binary(&Add, &col, &row).unwrap();
/// assert_eq!(sum.shape().as_slice(), &[2, 3]);
/// assert_eq!(sum.to_vec(), vec![1, 2, 3, 11, 12, 13]);
/// ```
pub fn binary<A, B, K>(
    kernel: &K,
    x1: impl IntoOperand<A>,
    x2: impl IntoOperand<B>,
) -> Result<Array<K::Output>>
where
    A: Element,
    B: Element,
    K: BinaryKernel<A, B>,
{
    let x1 = x1.into_operand();
    let x2 = x2.into_operand();
    let shape = broadcast_shapes(&[x1.shape().as_slice(), x2.shape().as_slice()])?;
    let out = allocate(shape);
    binary_into(kernel, &x1, &x2, &out)?;
    Ok(out)
}

/// Apply `kernel` pairwise over the broadcast of `x1` and `x2`, writing
/// through `out`.
///
/// The broadcast of `out`, `x1` and `x2` must be the shape of `out`, so the
/// output is never stretched. On error nothing is written.
pub fn binary_into<A, B, K, O>(
    kernel: &K,
    x1: impl IntoOperand<A>,
    x2: impl IntoOperand<B>,
    out: &Array<O>,
) -> Result<()>
where
    A: Element,
    B: Element,
    K: BinaryKernel<A, B>,
    O: Element,
{
    let x1 = x1.into_operand();
    let x2 = x2.into_operand();
    check_output_shape(out, &[x1.shape().as_slice(), x2.shape().as_slice()])?;
    let out = typed_output::<K::Output, O>(K::NAME, out)?;
    let x1 = detach(K::NAME, x1, out);
    let x2 = detach(K::NAME, x2, out);

    let m1 = x1.metadata().broadcast_to(out.shape())?;
    let m2 = x2.metadata().broadcast_to(out.shape())?;
    let pairs = Iter::new(x1.buffer(), &m1).zip(Iter::new(x2.buffer(), &m2));
    for (cell, (a, b)) in out.cells().zip(pairs) {
        cell.set(kernel.call(a, b));
    }
    Ok(())
}

/// Descriptor of a named ufunc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UfuncInfo {
    /// Name, as used by the free function in [`crate::ops`].
    pub name: &'static str,
    /// Number of input operands.
    pub arity: usize,
    /// One-line description.
    pub doc: &'static str,
}

const fn info(name: &'static str, arity: usize, doc: &'static str) -> UfuncInfo {
    UfuncInfo { name, arity, doc }
}

static REGISTRY: &[UfuncInfo] = &[
    info("add", 2, "Add arguments element-wise."),
    info("subtract", 2, "Subtract arguments, element-wise."),
    info("multiply", 2, "Multiply arguments element-wise."),
    info("divide", 2, "Divide arguments element-wise (true division)."),
    info("true_divide", 2, "Alias of divide."),
    info("floor_divide", 2, "Largest integer smaller or equal to the division of the inputs."),
    info("power", 2, "First array elements raised to powers from second array, element-wise."),
    info("float_power", 2, "Power computed in floating point, element-wise."),
    info("maximum", 2, "Element-wise maximum of array elements, propagating NaNs."),
    info("minimum", 2, "Element-wise minimum of array elements, propagating NaNs."),
    info("fmod", 2, "Element-wise remainder of division, with the sign of the dividend."),
    info("hypot", 2, "Given the legs of a right triangle, return its hypotenuse."),
    info("arctan2", 2, "Element-wise arc tangent of x1/x2 choosing the quadrant correctly."),
    info("logaddexp", 2, "Logarithm of the sum of exponentiations of the inputs."),
    info("logaddexp2", 2, "Logarithm of the sum of exponentiations of the inputs in base-2."),
    info("heaviside", 2, "Compute the Heaviside step function."),
    info("gcd", 2, "Greatest common divisor of the absolute values of the inputs."),
    info("lcm", 2, "Lowest common multiple of the absolute values of the inputs."),
    info("negative", 1, "Numerical negative, element-wise."),
    info("positive", 1, "Numerical positive, element-wise."),
    info("absolute", 1, "Calculate the absolute value element-wise."),
    info("fabs", 1, "Compute the absolute values element-wise, as floats."),
    info("sign", 1, "Returns an element-wise indication of the sign of a number."),
    info("square", 1, "Return the element-wise square of the input."),
    info("reciprocal", 1, "Return the reciprocal of the argument, element-wise."),
    info("sqrt", 1, "Return the non-negative square-root of an array, element-wise."),
    info("cbrt", 1, "Return the cube-root of an array, element-wise."),
    info("exp", 1, "Calculate the exponential of all elements in the input array."),
    info("exp2", 1, "Calculate 2**p for all p in the input array."),
    info("expm1", 1, "Calculate exp(x) - 1 for all elements in the array."),
    info("log", 1, "Natural logarithm, element-wise."),
    info("log2", 1, "Base-2 logarithm of x."),
    info("log10", 1, "Return the base 10 logarithm of the input array, element-wise."),
    info("log1p", 1, "Return the natural logarithm of one plus the input array, element-wise."),
    info("sin", 1, "Trigonometric sine, element-wise."),
    info("cos", 1, "Cosine element-wise."),
    info("tan", 1, "Compute tangent element-wise."),
    info("arcsin", 1, "Inverse sine, element-wise."),
    info("arccos", 1, "Trigonometric inverse cosine, element-wise."),
    info("arctan", 1, "Trigonometric inverse tangent, element-wise."),
    info("sinh", 1, "Hyperbolic sine, element-wise."),
    info("cosh", 1, "Hyperbolic cosine, element-wise."),
    info("tanh", 1, "Compute hyperbolic tangent element-wise."),
    info("arcsinh", 1, "Inverse hyperbolic sine element-wise."),
    info("arccosh", 1, "Inverse hyperbolic cosine, element-wise."),
    info("arctanh", 1, "Inverse hyperbolic tangent element-wise."),
    info("degrees", 1, "Convert angles from radians to degrees."),
    info("rad2deg", 1, "Alias of degrees."),
    info("radians", 1, "Convert angles from degrees to radians."),
    info("deg2rad", 1, "Alias of radians."),
    info("rint", 1, "Round elements of the array to the nearest integer, halves to even."),
    info("floor", 1, "Return the floor of the input, element-wise."),
    info("ceil", 1, "Return the ceiling of the input, element-wise."),
    info("conjugate", 1, "Return the complex conjugate, element-wise."),
    info("conj", 1, "Alias of conjugate."),
];

/// Descriptors of every named ufunc.
pub fn registry() -> &'static [UfuncInfo] {
    REGISTRY
}

/// Find the descriptor of the ufunc called `name`.
///
/// # Examples
///
/// ```
/// # use ndufunc::ufunc;
/// assert_eq!(ufunc::lookup("hypot").unwrap().arity, 2);
/// assert!(ufunc::lookup("frobnicate").is_none());
/// ```
pub fn lookup(name: &str) -> Option<&'static UfuncInfo> {
    REGISTRY.iter().find(|info| info.name == name)
}
