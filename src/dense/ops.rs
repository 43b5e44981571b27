//! Dense semiring algebra: add, matmul, matvec, power, iterate, dot.

use super::matrix::Matrix;
use crate::error::{track, Error, Result};
use crate::semiring::{Semiring, Val};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

impl Matrix {
    /// Element-wise tropical addition `C = A ⊕ B`.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless both operands have identical dimensions.
    pub fn add(&self, other: &Matrix, semiring: Semiring) -> Result<Matrix> {
        track(self.add_inner(other, semiring))
    }

    fn add_inner(&self, other: &Matrix, semiring: Semiring) -> Result<Matrix> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(Error::shape_mismatch(
                &[self.rows, self.cols],
                &[other.rows, other.cols],
            ));
        }
        let mut out = Matrix::filled(self.rows, self.cols, semiring.zero())?;
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.set(i, j, semiring.add(self.get(i, j), other.get(i, j)));
            }
        }
        Ok(out)
    }

    /// Tropical matrix multiplication `C = A ⊗ B`:
    /// `C[i,j] = ⊕_k (A[i,k] ⊗ B[k,j])`.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless `A.cols == B.rows`.
    pub fn matmul(&self, other: &Matrix, semiring: Semiring) -> Result<Matrix> {
        track(self.matmul_inner(other, semiring))
    }

    fn matmul_inner(&self, other: &Matrix, semiring: Semiring) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(Error::shape_mismatch(
                &[self.cols],
                &[other.rows],
            ));
        }
        let mut out = Matrix::filled(self.rows, other.cols, semiring.zero())?;
        matmul_kernel(self, other, &mut out, semiring);
        Ok(out)
    }

    /// In-place tropical matrix multiplication into a pre-allocated `out`.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless `A.cols == B.rows` and `out` is
    /// `A.rows × B.cols`.
    pub fn matmul_into(&self, other: &Matrix, out: &mut Matrix, semiring: Semiring) -> Result<()> {
        if self.cols != other.rows {
            return Err(Error::shape_mismatch(&[self.cols], &[other.rows]));
        }
        if out.rows != self.rows || out.cols != other.cols {
            return Err(Error::shape_mismatch(
                &[self.rows, other.cols],
                &[out.rows, out.cols],
            ));
        }
        matmul_kernel(self, other, out, semiring);
        Ok(())
    }

    /// Matrix-vector product `y = A ⊗ x`, allocating the result.
    pub fn matvec(&self, x: &[Val], semiring: Semiring) -> Result<Vec<Val>> {
        let mut y = vec![semiring.zero(); self.rows];
        self.matvec_into(x, &mut y, semiring)?;
        Ok(y)
    }

    /// Matrix-vector product into a pre-allocated `y` of length `rows`.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless `x.len() == cols` and `y.len() == rows`.
    pub fn matvec_into(&self, x: &[Val], y: &mut [Val], semiring: Semiring) -> Result<()> {
        if x.len() != self.cols {
            return Err(Error::shape_mismatch(&[self.cols], &[x.len()]));
        }
        if y.len() != self.rows {
            return Err(Error::shape_mismatch(&[self.rows], &[y.len()]));
        }
        for i in 0..self.rows {
            let mut acc = semiring.zero();
            for (j, &xj) in x.iter().enumerate() {
                acc = semiring.add(acc, semiring.mul(self.get(i, j), xj));
            }
            y[i] = acc;
        }
        Ok(())
    }

    /// Tropical matrix power `A^n` by binary exponentiation.
    ///
    /// `A^0` is the tropical identity. Costs O(log n) multiplies.
    ///
    /// # Errors
    ///
    /// `NotSquare` unless the matrix is square.
    pub fn pow(&self, n: u32, semiring: Semiring) -> Result<Matrix> {
        track(self.pow_inner(n, semiring))
    }

    fn pow_inner(&self, mut n: u32, semiring: Semiring) -> Result<Matrix> {
        if !self.is_square() {
            return Err(Error::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let mut result = Matrix::identity(self.rows, semiring)?;
        if n == 0 {
            return Ok(result);
        }
        let mut base = self.clone();
        while n > 0 {
            if n & 1 == 1 {
                result = result.matmul_inner(&base, semiring)?;
            }
            n >>= 1;
            if n > 0 {
                base = base.matmul_inner(&base, semiring)?;
            }
        }
        Ok(result)
    }
}

/// Row-parallel semiring matmul kernel.
///
/// Each output row reduces independently left to right, so the rayon split
/// is bit-identical to the sequential loop.
fn matmul_kernel(a: &Matrix, b: &Matrix, out: &mut Matrix, semiring: Semiring) {
    let inner = a.cols;
    let cols = out.cols;
    let stride = out.stride;

    let row_task = |i: usize, out_row: &mut [Val]| {
        for (j, slot) in out_row.iter_mut().enumerate().take(cols) {
            let mut acc = semiring.zero();
            for k in 0..inner {
                acc = semiring.add(acc, semiring.mul(a.get(i, k), b.get(k, j)));
                // OR saturates; nothing later in the reduction can change it.
                if semiring == Semiring::Boolean && acc == 1 {
                    break;
                }
            }
            *slot = acc;
        }
    };

    #[cfg(feature = "rayon")]
    {
        out.data
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(i, out_row)| row_task(i, out_row));
    }
    #[cfg(not(feature = "rayon"))]
    {
        for (i, out_row) in out.data.chunks_mut(stride).enumerate() {
            row_task(i, out_row);
        }
    }
}

/// Iterate the system `x ← A ⊗ x` for `steps` steps, overwriting `x`.
///
/// # Errors
///
/// `NotSquare` unless `A` is square; `ShapeMismatch` unless `x.len()`
/// matches the order of `A`.
pub fn iterate(a: &Matrix, x: &mut [Val], steps: u32, semiring: Semiring) -> Result<()> {
    if !a.is_square() {
        return Err(Error::NotSquare {
            rows: a.rows(),
            cols: a.cols(),
        });
    }
    if x.len() != a.rows() {
        return Err(Error::shape_mismatch(&[a.rows()], &[x.len()]));
    }
    let mut y = vec![semiring.zero(); a.rows()];
    for _ in 0..steps {
        a.matvec_into(x, &mut y, semiring)?;
        x.copy_from_slice(&y);
    }
    Ok(())
}

/// Tropical dot product `⊕_i (x[i] ⊗ y[i])`.
///
/// # Errors
///
/// `ShapeMismatch` unless the vectors have equal length.
pub fn dot(x: &[Val], y: &[Val], semiring: Semiring) -> Result<Val> {
    if x.len() != y.len() {
        return Err(Error::shape_mismatch(&[x.len()], &[y.len()]));
    }
    let mut acc = semiring.zero();
    for (&a, &b) in x.iter().zip(y) {
        acc = semiring.add(acc, semiring.mul(a, b));
    }
    Ok(acc)
}
