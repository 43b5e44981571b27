//! Sparse tropical matrices in Compressed Sparse Row (CSR) format.
//!
//! CSR stores only the entries that differ from the attached semiring's ε:
//! `values` and `col_idx` hold the stored entries row by row, and
//! `row_ptr[i]..row_ptr[i+1]` indexes row `i`'s slice of both. Memory is
//! O(nnz + rows) instead of O(rows · cols).
//!
//! A [`SparseMatrix`] carries its [`Semiring`](crate::semiring::Semiring)
//! so "zero" is unambiguous: compression drops ε entries, and reads of
//! transiently stored ε behave as ε through absorption.

mod convert;
mod csr;
mod ops;

pub use csr::SparseMatrix;
