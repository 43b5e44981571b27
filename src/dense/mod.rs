//! Dense tropical matrices and their core algebra.
//!
//! [`Matrix`] owns a row-major, stride-aligned `i32` buffer; [`MatrixView`]
//! wraps a caller-provided slice without taking ownership. The arithmetic
//! (`add`, `matmul`, `matvec`, `pow`, `iterate`, `dot`) and the closure
//! engine (`closure`, `transitive_closure`) all reduce over a caller-chosen
//! [`Semiring`](crate::semiring::Semiring).

mod closure;
mod matrix;
mod ops;

pub use matrix::{Matrix, MatrixView};
pub use ops::{dot, iterate};
