//! # ndufunc: strided N-dimensional arrays with aliasing-safe ufuncs
//!
//! A NumPy-style array core: a reference-counted buffer, strided views of it,
//! broadcasting, and elementwise "universal functions" that stay correct when
//! inputs and outputs overlap in memory.
//!
//! ## Key Features
//!
//! - **Views, not copies**: slicing, transposing, broadcasting and integer
//!   indexing return live aliases of the same buffer
//! - **Python slice semantics**: negative indices, negative steps and
//!   clamping behave as in NumPy
//! - **Aliasing-safe in-place updates**: `x += &x.t()` gives the same result
//!   as `x.assign(&(&x + &x.t()))`
//! - **Typed ufuncs**: every kernel declares its result type, and explicit
//!   outputs of the wrong type are rejected before anything is written
//! - **Linear algebra**: `matmul` and an LU factorization written entirely in
//!   terms of views and ufuncs
//!
//! ## Quick Start
//!
//! ```rust
//! use ndufunc::{s, Array};
//!
//! let x = Array::from_vec((0..9).map(f64::from).collect(), [3, 3]).unwrap();
//!
//! // Slices are views: writes through them are visible in `x`
//! let corner = x.index(&s![1.., 1..]).unwrap();
//! corner.fill(0.0);
//! assert_eq!(x.get(&[2, 2]).unwrap(), 0.0);
//!
//! // In-place updates read every input before it is overwritten
//! let mut y = x.copy();
//! let expected = &y + &y.t();
//! y += &y.t();
//! assert_eq!(y, expected);
//! ```
//!
//! Arrays are single-threaded: the buffer is an `Rc<[Cell<T>]>`, so `Array`
//! is neither `Send` nor `Sync`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod array;
pub mod broadcast;
mod buffer;
mod config;
mod dtype;
pub mod error;
mod fmt;
mod index;
pub mod iter;
mod metadata;
pub mod ops;
mod shape;
pub mod ufunc;

// Public exports
pub use array::{may_share_memory, Array};
pub use broadcast::broadcast_shapes;
pub use buffer::Buffer;
pub use config::{print_options, set_print_options, with_print_options, PrintOptions};
pub use dtype::{DType, Element, Numeric};
pub use error::{Error, ErrorKind, Result};
pub use index::{Index, Slice};
pub use metadata::Metadata;
pub use ops::linalg::{matmul, LuDecomposition};
pub use ops::manipulation::broadcast_arrays;
pub use shape::Shape;
