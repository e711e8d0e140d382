//! Array operations: the ufunc catalogue, creation, manipulation and linear
//! algebra.

pub mod binary;
pub mod creation;
pub mod linalg;
pub mod manipulation;
pub mod unary;
