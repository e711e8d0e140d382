//! Data type definitions and the [`Element`] trait.

use num_complex::{Complex32, Complex64};
use num_traits::Num;
use std::fmt;

/// Numerical data type of array contents.
///
/// Every [`Element`] type reports one of these through [`Element::DTYPE`];
/// it is the runtime tag used in error messages and output-type checks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DType {
    /// Boolean (stored as a `bool`)
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    Uint8,
    /// 16-bit unsigned integer
    Uint16,
    /// 32-bit unsigned integer
    Uint32,
    /// 64-bit unsigned integer
    Uint64,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point
    Float64,
    /// Complex number made of two 32-bit floats
    Complex64,
    /// Complex number made of two 64-bit floats
    Complex128,
}

impl DType {
    /// Returns the byte width of this dtype.
    #[inline]
    pub const fn byte_width(self) -> usize {
        match self {
            DType::Bool | DType::Int8 | DType::Uint8 => 1,
            DType::Int16 | DType::Uint16 => 2,
            DType::Float32 | DType::Int32 | DType::Uint32 => 4,
            DType::Float64 | DType::Int64 | DType::Uint64 | DType::Complex64 => 8,
            DType::Complex128 => 16,
        }
    }

    /// Returns true if this is a real floating-point dtype.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, DType::Float32 | DType::Float64)
    }

    /// Returns true if this is a complex dtype.
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, DType::Complex64 | DType::Complex128)
    }

    /// Returns true if this is an integer dtype.
    #[inline]
    pub const fn is_int(self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    /// Returns true if this is a signed integer dtype.
    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(self, DType::Int8 | DType::Int16 | DType::Int32 | DType::Int64)
    }

    /// Returns true if this is an unsigned integer dtype.
    #[inline]
    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            DType::Uint8 | DType::Uint16 | DType::Uint32 | DType::Uint64
        )
    }

    /// NumPy name of the dtype.
    pub const fn name(self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::Uint8 => "uint8",
            DType::Uint16 => "uint16",
            DType::Uint32 => "uint32",
            DType::Uint64 => "uint64",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Complex64 => "complex64",
            DType::Complex128 => "complex128",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bool" | "bool_" | "bool8" => Ok(DType::Bool),
            "int8" | "i8" | "byte" => Ok(DType::Int8),
            "int16" | "i16" | "short" => Ok(DType::Int16),
            "int32" | "i32" | "intc" => Ok(DType::Int32),
            "int64" | "i64" | "int_" => Ok(DType::Int64),
            "uint8" | "u8" | "ubyte" => Ok(DType::Uint8),
            "uint16" | "u16" | "ushort" => Ok(DType::Uint16),
            "uint32" | "u32" | "uintc" => Ok(DType::Uint32),
            "uint64" | "u64" | "uint" => Ok(DType::Uint64),
            "float32" | "f32" | "single" => Ok(DType::Float32),
            "float64" | "f64" | "double" | "float_" => Ok(DType::Float64),
            "complex64" | "csingle" => Ok(DType::Complex64),
            "complex128" | "cdouble" | "complex_" => Ok(DType::Complex128),
            _ => Err(format!("Unknown dtype: {}", s)),
        }
    }
}

/// A scalar type that can be stored in an [`Array`](crate::Array).
///
/// `Float` is the type an element is promoted to by true division and the
/// transcendental ufuncs: integers and booleans go to `f64`, floating-point
/// and complex types stay as they are.
pub trait Element: Copy + Default + PartialEq + fmt::Debug + 'static {
    /// Runtime tag of this type.
    const DTYPE: DType;

    /// Promotion target for true division and transcendental functions.
    type Float: Element;

    /// Convert to [`Element::Float`].
    fn to_float(self) -> Self::Float;

    /// Render a single element the way NumPy's `str` does, using `precision`
    /// fractional digits for floating-point parts.
    fn format(&self, precision: usize) -> String;
}

fn format_real(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".into() } else { "-inf".into() };
    }
    let s = format!("{:.*}", precision, value);
    if s.contains('.') {
        s.trim_end_matches('0').to_string()
    } else {
        // precision 0 still marks the value as floating point
        s + "."
    }
}

impl Element for bool {
    const DTYPE: DType = DType::Bool;
    type Float = f64;

    #[inline]
    fn to_float(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }

    fn format(&self, _precision: usize) -> String {
        if *self { "True" } else { "False" }.to_string()
    }
}

macro_rules! impl_int_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;
                type Float = f64;

                #[inline]
                fn to_float(self) -> f64 {
                    self as f64
                }

                fn format(&self, _precision: usize) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_int_element!(
    i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64,
    u8 => Uint8, u16 => Uint16, u32 => Uint32, u64 => Uint64,
);

macro_rules! impl_float_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;
                type Float = $ty;

                #[inline]
                fn to_float(self) -> $ty {
                    self
                }

                fn format(&self, precision: usize) -> String {
                    format_real(*self as f64, precision)
                }
            }
        )*
    };
}

impl_float_element!(f32 => Float32, f64 => Float64);

macro_rules! impl_complex_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;
                type Float = $ty;

                #[inline]
                fn to_float(self) -> $ty {
                    self
                }

                fn format(&self, precision: usize) -> String {
                    let re = format_real(self.re as f64, precision);
                    let im = format_real(self.im as f64, precision);
                    if im.starts_with('-') {
                        format!("{}{}j", re, im)
                    } else {
                        format!("{}+{}j", re, im)
                    }
                }
            }
        )*
    };
}

impl_complex_element!(Complex32 => Complex64, Complex64 => Complex128);

/// Elements closed under arithmetic, with the overflow rule of their dtype.
///
/// Integers compute modulo `2^bits`, so `200u8 + 100u8 == 44` in every build
/// profile. Floating-point and complex types follow IEEE 754.
pub trait Numeric: Element + Num {
    /// `self + rhs`.
    fn modular_add(self, rhs: Self) -> Self;

    /// `self - rhs`.
    fn modular_sub(self, rhs: Self) -> Self;

    /// `self * rhs`.
    fn modular_mul(self, rhs: Self) -> Self;

    /// `-self`; for unsigned integers this is `0 - self`.
    fn modular_neg(self) -> Self;

    /// Remainder with the sign of `self`. Integer division by zero gives 0.
    fn modular_rem(self, rhs: Self) -> Self;
}

macro_rules! impl_int_numeric {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                #[inline]
                fn modular_add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline]
                fn modular_sub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                #[inline]
                fn modular_mul(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }

                #[inline]
                fn modular_neg(self) -> Self {
                    self.wrapping_neg()
                }

                #[inline]
                fn modular_rem(self, rhs: Self) -> Self {
                    if rhs == 0 {
                        0
                    } else {
                        self.wrapping_rem(rhs)
                    }
                }
            }
        )*
    };
}

impl_int_numeric!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! impl_ieee_numeric {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                #[inline]
                fn modular_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn modular_sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline]
                fn modular_mul(self, rhs: Self) -> Self {
                    self * rhs
                }

                #[inline]
                fn modular_neg(self) -> Self {
                    -self
                }

                #[inline]
                fn modular_rem(self, rhs: Self) -> Self {
                    self % rhs
                }
            }
        )*
    };
}

impl_ieee_numeric!(f32, f64, Complex32, Complex64);
