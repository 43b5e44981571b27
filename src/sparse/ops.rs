//! Sparse semiring algebra: spmv, spgemm, closure.

use super::csr::SparseMatrix;
use crate::error::{track, Error, Result};
use crate::semiring::Val;

impl SparseMatrix {
    /// Sparse matrix-vector product `y = A ⊗ x`, allocating the result.
    ///
    /// O(nnz): only stored entries contribute; transiently stored ε entries
    /// are absorbed by ⊗ and vanish in the reduction.
    pub fn matvec(&self, x: &[Val]) -> Result<Vec<Val>> {
        let mut y = vec![self.semiring.zero(); self.rows];
        self.matvec_into(x, &mut y)?;
        Ok(y)
    }

    /// Sparse matrix-vector product into a pre-allocated `y`.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless `x.len() == cols` and `y.len() == rows`.
    pub fn matvec_into(&self, x: &[Val], y: &mut [Val]) -> Result<()> {
        if x.len() != self.cols {
            return Err(Error::shape_mismatch(&[self.cols], &[x.len()]));
        }
        if y.len() != self.rows {
            return Err(Error::shape_mismatch(&[self.rows], &[y.len()]));
        }
        let s = self.semiring;
        for (i, slot) in y.iter_mut().enumerate() {
            let (cols, vals) = self.row_entries(i);
            let mut acc = s.zero();
            for (&j, &v) in cols.iter().zip(vals) {
                acc = s.add(acc, s.mul(v, x[j as usize]));
            }
            *slot = acc;
        }
        Ok(())
    }

    /// Sparse matrix multiplication `C = A ⊗ B`.
    ///
    /// Row-wise expand-accumulate: each output row is built in a dense
    /// length-`p` accumulator initialised to ε, then its non-ε entries are
    /// emitted in ascending column order, so the result is compressed.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless `A.cols == B.rows`; `InvalidArgument` unless
    /// both operands carry the same semiring.
    pub fn matmul(&self, other: &SparseMatrix) -> Result<SparseMatrix> {
        track(self.matmul_inner(other))
    }

    fn matmul_inner(&self, other: &SparseMatrix) -> Result<SparseMatrix> {
        if self.cols != other.rows {
            return Err(Error::shape_mismatch(&[self.cols], &[other.rows]));
        }
        if self.semiring != other.semiring {
            return Err(Error::invalid_argument(
                "other",
                format!(
                    "semiring mismatch: {} vs {}",
                    self.semiring, other.semiring
                ),
            ));
        }

        let s = self.semiring;
        let zero = s.zero();
        let p = other.cols;

        let est = (self.nnz() + other.nnz()).min(self.rows * p).max(1);
        let mut out = SparseMatrix::with_capacity(self.rows, p, est, s)?;

        let mut acc = vec![zero; p];
        for i in 0..self.rows {
            acc.fill(zero);

            let (a_cols, a_vals) = self.row_entries(i);
            for (&k, &a_ik) in a_cols.iter().zip(a_vals) {
                let (b_cols, b_vals) = other.row_entries(k as usize);
                for (&j, &b_kj) in b_cols.iter().zip(b_vals) {
                    let j = j as usize;
                    acc[j] = s.add(acc[j], s.mul(a_ik, b_kj));
                }
            }

            for (j, &v) in acc.iter().enumerate() {
                if v != zero {
                    out.values.push(v);
                    out.col_idx.push(j as u32);
                }
            }
            out.row_ptr[i + 1] = out.values.len() as u32;
        }
        Ok(out)
    }

    /// Kleene star `A*` of a square sparse matrix.
    ///
    /// Densifies, runs the dense closure, and re-sparsifies; closures are
    /// usually dense, so a sparse Floyd–Warshall would not pay for itself.
    ///
    /// # Errors
    ///
    /// `NotSquare` unless the matrix is square.
    pub fn closure(&self) -> Result<SparseMatrix> {
        track(self.closure_inner())
    }

    fn closure_inner(&self) -> Result<SparseMatrix> {
        if self.rows != self.cols {
            return Err(Error::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let dense = self.to_dense()?;
        let star = dense.closure(self.semiring)?;
        SparseMatrix::from_dense(&star, self.semiring)
    }
}
