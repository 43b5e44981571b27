//! Dense↔CSR conversion and bulk COO construction.

use super::csr::SparseMatrix;
use crate::dense::Matrix;
use crate::error::{track, Error, Result};
use crate::semiring::{Semiring, Val};

impl SparseMatrix {
    /// Build a CSR matrix from a dense one: exactly one entry per position
    /// whose dense value differs from ε.
    ///
    /// Entries land in row-major, ascending-column order, so the result is
    /// already compressed.
    pub fn from_dense(dense: &Matrix, semiring: Semiring) -> Result<Self> {
        track(Self::from_dense_inner(dense, semiring))
    }

    fn from_dense_inner(dense: &Matrix, semiring: Semiring) -> Result<Self> {
        let zero = semiring.zero();
        let nnz: usize = (0..dense.rows())
            .map(|i| dense.row(i).iter().filter(|&&v| v != zero).count())
            .sum();

        let mut sp = Self::with_capacity_raw(dense.rows(), dense.cols(), nnz, semiring)?;
        for i in 0..dense.rows() {
            for (j, &v) in dense.row(i).iter().enumerate() {
                if v != zero {
                    sp.values.push(v);
                    sp.col_idx.push(j as u32);
                }
            }
            sp.row_ptr[i + 1] = sp.values.len() as u32;
        }
        Ok(sp)
    }

    /// Expand to a dense matrix: ε everywhere, stored values at their
    /// positions.
    pub fn to_dense(&self) -> Result<Matrix> {
        track(self.to_dense_inner())
    }

    fn to_dense_inner(&self) -> Result<Matrix> {
        let mut dense = Matrix::zeros(self.rows, self.cols, self.semiring)?;
        for i in 0..self.rows {
            let (cols, vals) = self.row_entries(i);
            for (&j, &v) in cols.iter().zip(vals) {
                dense.set(i, j as usize, v);
            }
        }
        Ok(dense)
    }

    /// Bulk-build a CSR matrix from (row, col, value) triplets.
    ///
    /// Triplets may arrive in any order; duplicates for a position are
    /// ⊕-combined and entries equal to ε are dropped, so the result is
    /// compressed. This is the fast path for construction — O(nnz log nnz)
    /// instead of O(nnz²) repeated [`set`](SparseMatrix::set) calls.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` on a zero dimension, `IndexOutOfBounds` if any
    /// triplet indexes outside the matrix.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: &[(usize, usize, Val)],
        semiring: Semiring,
    ) -> Result<Self> {
        track(Self::from_triplets_inner(rows, cols, triplets, semiring))
    }

    fn from_triplets_inner(
        rows: usize,
        cols: usize,
        triplets: &[(usize, usize, Val)],
        semiring: Semiring,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        for &(r, c, _) in triplets {
            if r >= rows {
                return Err(Error::IndexOutOfBounds { index: r, size: rows });
            }
            if c >= cols {
                return Err(Error::IndexOutOfBounds { index: c, size: cols });
            }
        }

        let mut perm: Vec<usize> = (0..triplets.len()).collect();
        perm.sort_by_key(|&k| (triplets[k].0, triplets[k].1));

        let zero = semiring.zero();
        let mut sp = Self::with_capacity_raw(rows, cols, triplets.len(), semiring)?;
        let mut counts = vec![0u32; rows];

        let mut iter = perm.into_iter().peekable();
        while let Some(k) = iter.next() {
            let (r, c, mut v) = triplets[k];
            // Fold duplicate positions with ⊕.
            while let Some(&next) = iter.peek() {
                let (nr, nc, nv) = triplets[next];
                if nr == r && nc == c {
                    v = semiring.add(v, nv);
                    iter.next();
                } else {
                    break;
                }
            }
            if v != zero {
                sp.values.push(v);
                sp.col_idx.push(c as u32);
                counts[r] += 1;
            }
        }

        for r in 0..rows {
            sp.row_ptr[r + 1] = sp.row_ptr[r] + counts[r];
        }
        Ok(sp)
    }

    /// Allocation helper shared by the bulk builders: empty structure with
    /// exact entry capacity, no default coercion.
    fn with_capacity_raw(
        rows: usize,
        cols: usize,
        capacity: usize,
        semiring: Semiring,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let mut values = Vec::new();
        values
            .try_reserve_exact(capacity)
            .map_err(|_| Error::OutOfMemory {
                bytes: capacity * std::mem::size_of::<Val>(),
            })?;
        let mut col_idx = Vec::new();
        col_idx
            .try_reserve_exact(capacity)
            .map_err(|_| Error::OutOfMemory {
                bytes: capacity * std::mem::size_of::<u32>(),
            })?;
        Ok(Self {
            rows,
            cols,
            semiring,
            values,
            col_idx,
            row_ptr: vec![0; rows + 1],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semiring::NEG_INF;

    #[test]
    fn test_from_dense_skips_zeros() {
        let mut dense = Matrix::zeros(3, 3, Semiring::MaxPlus).unwrap();
        dense.set(0, 0, 1);
        dense.set(0, 2, 2);
        dense.set(1, 2, 3);
        dense.set(2, 0, 4);
        dense.set(2, 1, 5);

        let sp = SparseMatrix::from_dense(&dense, Semiring::MaxPlus).unwrap();
        assert_eq!(sp.nnz(), 5);
        assert_eq!(sp.get(0, 2), 2);
        assert_eq!(sp.get(1, 0), NEG_INF);
        sp.validate().unwrap();
    }

    #[test]
    fn test_dense_roundtrip() {
        let mut dense = Matrix::zeros(2, 3, Semiring::MinPlus).unwrap();
        dense.set(0, 1, 5);
        dense.set(1, 0, -2);
        dense.set(1, 2, 0);

        let sp = SparseMatrix::from_dense(&dense, Semiring::MinPlus).unwrap();
        assert_eq!(sp.to_dense().unwrap(), dense);
    }

    #[test]
    fn test_sparse_roundtrip_after_compress() {
        let mut sp = SparseMatrix::with_capacity(3, 3, 4, Semiring::MaxPlus).unwrap();
        sp.set(0, 1, 7).unwrap();
        sp.set(2, 2, -1).unwrap();
        sp.set(1, 1, NEG_INF).unwrap();
        sp.compress();

        let back = SparseMatrix::from_dense(&sp.to_dense().unwrap(), Semiring::MaxPlus).unwrap();
        assert_eq!(back.nnz(), sp.nnz());
        assert_eq!(back.row_ptr, sp.row_ptr);
        assert_eq!(back.col_idx, sp.col_idx);
        assert_eq!(back.values, sp.values);
    }

    #[test]
    fn test_from_triplets_sorts_and_combines() {
        let triplets = [(1, 2, 4), (0, 1, 3), (1, 0, 2), (1, 2, 9), (0, 1, 1)];
        let sp = SparseMatrix::from_triplets(2, 3, &triplets, Semiring::MaxPlus).unwrap();

        assert_eq!(sp.nnz(), 3);
        assert_eq!(sp.get(0, 1), 3); // max(3, 1)
        assert_eq!(sp.get(1, 2), 9); // max(4, 9)
        assert_eq!(sp.get(1, 0), 2);
        sp.validate().unwrap();
    }

    #[test]
    fn test_from_triplets_drops_zero() {
        let sp =
            SparseMatrix::from_triplets(2, 2, &[(0, 0, NEG_INF), (1, 1, 5)], Semiring::MaxPlus)
                .unwrap();
        assert_eq!(sp.nnz(), 1);
        assert_eq!(sp.get(1, 1), 5);
    }

    #[test]
    fn test_from_triplets_bounds() {
        assert!(matches!(
            SparseMatrix::from_triplets(2, 2, &[(2, 0, 1)], Semiring::MaxPlus),
            Err(Error::IndexOutOfBounds { index: 2, size: 2 })
        ));
    }
}
