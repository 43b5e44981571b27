//! Matrix file formats: CSV, binary, COO CSV, and GraphViz DOT export.
//!
//! - Dense CSV: comma-separated signed integers, `inf`/`-inf` for ±∞,
//!   `#`-comment and blank lines skipped on load.
//! - Dense binary: little-endian `u32` header (magic `0x504C4D41`,
//!   version, rows, cols) followed by the row-major `i32` payload.
//! - Sparse CSV: COO triplets after a `rows,cols,nnz` dimension line.
//! - DOT: a GraphViz digraph of the matrix viewed as a weighted graph.

mod binary;
mod csv;
mod dot;

pub use binary::{load_matrix_binary, save_matrix_binary};
pub use csv::{load_matrix_csv, load_sparse_csv, save_matrix_csv, save_sparse_csv};
pub use dot::export_dot;
