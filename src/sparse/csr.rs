//! Core CSR implementation: structure, point access, compression.

use crate::error::{track, Error, Result};
use crate::semiring::{Semiring, Val};

/// Default entry capacity when a requested capacity of zero is coerced.
const DEFAULT_CAPACITY: usize = 16;

/// Sparse tropical matrix in CSR format.
///
/// Invariants maintained by every mutating operation:
/// - `row_ptr.len() == rows + 1`, `row_ptr[0] == 0`,
///   `row_ptr[rows] == nnz`;
/// - column indices are strictly ascending within each row;
/// - after [`compress`](SparseMatrix::compress), no stored value equals the
///   attached semiring's ε. Between a bulk edit and compression ε entries
///   may be present; reads treat them as ε through absorption anyway.
#[derive(Debug, Clone)]
pub struct SparseMatrix {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) semiring: Semiring,
    pub(crate) values: Vec<Val>,
    pub(crate) col_idx: Vec<u32>,
    pub(crate) row_ptr: Vec<u32>,
}

impl SparseMatrix {
    /// Create an empty sparse matrix with room for `capacity` entries.
    ///
    /// A capacity of 0 is coerced to a small default. Entry storage grows
    /// by doubling when exhausted.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` on a zero dimension, `OutOfMemory` if the
    /// buffers cannot be allocated.
    pub fn with_capacity(
        rows: usize,
        cols: usize,
        capacity: usize,
        semiring: Semiring,
    ) -> Result<Self> {
        track(Self::with_capacity_inner(rows, cols, capacity, semiring))
    }

    fn with_capacity_inner(
        rows: usize,
        cols: usize,
        capacity: usize,
        semiring: Semiring,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let capacity = if capacity == 0 { DEFAULT_CAPACITY } else { capacity };

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

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The semiring this matrix stores non-ε entries for.
    #[inline]
    pub fn semiring(&self) -> Semiring {
        self.semiring
    }

    /// Number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Number of stored entries in row `row`.
    #[inline]
    pub fn row_nnz(&self, row: usize) -> usize {
        debug_assert!(row < self.rows);
        (self.row_ptr[row + 1] - self.row_ptr[row]) as usize
    }

    /// Fraction of positions not stored: `1 - nnz / (rows * cols)`.
    pub fn sparsity(&self) -> f64 {
        1.0 - self.nnz() as f64 / (self.rows * self.cols) as f64
    }

    /// The stored entries of row `row` as parallel (columns, values) slices.
    #[inline]
    pub(crate) fn row_entries(&self, row: usize) -> (&[u32], &[Val]) {
        let start = self.row_ptr[row] as usize;
        let end = self.row_ptr[row + 1] as usize;
        (&self.col_idx[start..end], &self.values[start..end])
    }

    /// Element (row, col): the stored value, or ε if the position is not
    /// stored. Binary search within the row, O(log nnz_row).
    ///
    /// Indices must be in range; bounds are checked only in debug builds.
    pub fn get(&self, row: usize, col: usize) -> Val {
        debug_assert!(row < self.rows && col < self.cols);
        let (cols, vals) = self.row_entries(row);
        match cols.binary_search(&(col as u32)) {
            Ok(pos) => vals[pos],
            Err(_) => self.semiring.zero(),
        }
    }

    /// Set element (row, col), inserting or overwriting the stored entry.
    ///
    /// Setting a value to ε does not remove the entry; call
    /// [`compress`](SparseMatrix::compress) after bulk modifications.
    /// Insertion shifts the stored tail, O(nnz) worst case; prefer
    /// [`from_triplets`](SparseMatrix::from_triplets) for bulk
    /// construction.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if either index is out of range, `OutOfMemory`
    /// if entry storage cannot grow.
    pub fn set(&mut self, row: usize, col: usize, value: Val) -> Result<()> {
        if row >= self.rows {
            return Err(Error::IndexOutOfBounds {
                index: row,
                size: self.rows,
            });
        }
        if col >= self.cols {
            return Err(Error::IndexOutOfBounds {
                index: col,
                size: self.cols,
            });
        }

        let start = self.row_ptr[row] as usize;
        let end = self.row_ptr[row + 1] as usize;
        match self.col_idx[start..end].binary_search(&(col as u32)) {
            Ok(pos) => {
                self.values[start + pos] = value;
            }
            Err(pos) => {
                let at = start + pos;
                self.values.try_reserve(1).map_err(|_| Error::OutOfMemory {
                    bytes: std::mem::size_of::<Val>(),
                })?;
                self.col_idx.try_reserve(1).map_err(|_| Error::OutOfMemory {
                    bytes: std::mem::size_of::<u32>(),
                })?;
                self.values.insert(at, value);
                self.col_idx.insert(at, col as u32);
                for ptr in &mut self.row_ptr[row + 1..] {
                    *ptr += 1;
                }
            }
        }
        Ok(())
    }

    /// Drop stored entries equal to ε and rebuild the row pointers.
    ///
    /// Column order within each row is preserved, so the strictly-ascending
    /// invariant survives.
    pub fn compress(&mut self) {
        let zero = self.semiring.zero();
        let mut write = 0usize;

        for row in 0..self.rows {
            let start = self.row_ptr[row] as usize;
            let end = self.row_ptr[row + 1] as usize;
            self.row_ptr[row] = write as u32;

            for k in start..end {
                if self.values[k] != zero {
                    self.values[write] = self.values[k];
                    self.col_idx[write] = self.col_idx[k];
                    write += 1;
                }
            }
        }
        self.row_ptr[self.rows] = write as u32;
        self.values.truncate(write);
        self.col_idx.truncate(write);
    }

    /// Verify the CSR structural invariants.
    ///
    /// # Errors
    ///
    /// `InvalidSparseFormat` describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.row_ptr.len() != self.rows + 1 {
            return Err(Error::InvalidSparseFormat {
                reason: format!(
                    "row_ptr length {} for {} rows",
                    self.row_ptr.len(),
                    self.rows
                ),
            });
        }
        if self.row_ptr[0] != 0 {
            return Err(Error::InvalidSparseFormat {
                reason: format!("row_ptr[0] = {}", self.row_ptr[0]),
            });
        }
        if self.row_ptr[self.rows] as usize != self.nnz() {
            return Err(Error::InvalidSparseFormat {
                reason: format!(
                    "row_ptr[rows] = {} but nnz = {}",
                    self.row_ptr[self.rows],
                    self.nnz()
                ),
            });
        }
        for row in 0..self.rows {
            if self.row_ptr[row] > self.row_ptr[row + 1] {
                return Err(Error::InvalidSparseFormat {
                    reason: format!("row_ptr decreases at row {}", row),
                });
            }
            let (cols, _) = self.row_entries(row);
            for pair in cols.windows(2) {
                if pair[0] >= pair[1] {
                    return Err(Error::InvalidSparseFormat {
                        reason: format!("columns not strictly ascending in row {}", row),
                    });
                }
            }
            if let Some(&last) = cols.last() {
                if last as usize >= self.cols {
                    return Err(Error::InvalidSparseFormat {
                        reason: format!("column {} out of range in row {}", last, row),
                    });
                }
            }
        }
        Ok(())
    }
}
