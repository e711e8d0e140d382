//! Error types for array operations.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`], mirroring NumPy's exception classes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Indexing past the rank or the extent of an axis.
    Index,
    /// A well-typed argument with an unacceptable value (shapes, axes, steps).
    Value,
    /// An element type that does not fit the operation.
    Type,
}

/// An error raised by an array operation.
///
/// Every error is raised before the failing operation writes anything, so the
/// operands of a failed call are left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// More index tokens than the array has axes.
    #[error("too many indices for array: array is {ndim}-dimensional, but {given} were indexed")]
    TooManyIndices {
        /// Rank of the indexed array.
        ndim: usize,
        /// Number of tokens supplied.
        given: usize,
    },

    /// An integer index outside the extent of its axis.
    #[error("index {index} is out of bounds for axis {axis} with size {size}")]
    IndexOutOfBounds {
        /// The index as supplied (before wrapping).
        index: isize,
        /// The axis being indexed.
        axis: usize,
        /// The extent of that axis.
        size: usize,
    },

    /// A slice (or range) step of zero.
    #[error("slice step cannot be zero")]
    ZeroStep,

    /// A slice literal that could not be parsed.
    #[error("invalid slice literal {0:?}")]
    ParseSlice(String),

    /// Reshape to a shape holding a different number of elements.
    #[error("cannot reshape array of size {size} into shape {shape}")]
    ReshapeSize {
        /// Size of the source array.
        size: usize,
        /// Requested shape, rendered as a tuple.
        shape: String,
    },

    /// Transpose axes that are not a permutation of the array's axes, or an
    /// axis argument outside the array's rank.
    #[error("axes {axes:?} don't match array of rank {ndim}")]
    InvalidAxes {
        /// The requested axis order.
        axes: Vec<usize>,
        /// Rank of the array.
        ndim: usize,
    },

    /// Shapes that cannot be broadcast together.
    #[error("operands could not be broadcast together with shapes {0}")]
    Broadcast(String),

    /// Initializer length that does not match the requested shape.
    #[error("data of length {len} does not fit shape {shape}")]
    DataLength {
        /// Number of elements supplied.
        len: usize,
        /// Requested shape, rendered as a tuple.
        shape: String,
    },

    /// A view whose reachable offsets fall outside its buffer.
    #[error("view reaches offsets {min}..={max} of a buffer of length {len}")]
    OutOfBuffer {
        /// Smallest reachable offset.
        min: isize,
        /// Largest reachable offset.
        max: isize,
        /// Length of the buffer.
        len: usize,
    },

    /// An operation that requires arrays of a particular rank.
    #[error("{op} expects {expected}, got an array of rank {ndim}")]
    Rank {
        /// Name of the operation.
        op: &'static str,
        /// Human-readable description of the accepted ranks.
        expected: &'static str,
        /// Rank that was supplied.
        ndim: usize,
    },

    /// A factorization that needs a square matrix.
    #[error("expected a square matrix, got shape {0}")]
    NotSquare(String),

    /// A zero pivot during elimination.
    #[error("matrix is singular")]
    Singular,

    /// `item()` on an array with more than one element.
    #[error("can only convert an array of size 1 to a scalar, got size {0}")]
    NotScalar(usize),

    /// A value that cannot be represented in the target element type.
    #[error("cannot cast {value} from {from} to {to}")]
    Cast {
        /// The offending value, formatted.
        value: String,
        /// Source type name.
        from: &'static str,
        /// Target type name.
        to: &'static str,
    },

    /// An explicit output operand whose element type differs from the
    /// operation's result type.
    #[error("output operand of invalid type for {ufunc}: expected {expected}, found {found}")]
    OutputType {
        /// Name of the ufunc.
        ufunc: &'static str,
        /// Result type the ufunc produces.
        expected: &'static str,
        /// Element type of the supplied output.
        found: &'static str,
    },
}

impl Error {
    /// The NumPy exception class this error corresponds to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TooManyIndices { .. } | Error::IndexOutOfBounds { .. } => ErrorKind::Index,
            Error::Cast { .. } | Error::OutputType { .. } => ErrorKind::Type,
            _ => ErrorKind::Value,
        }
    }
}
