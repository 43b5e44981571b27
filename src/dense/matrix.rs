//! Dense matrix storage: layout, allocation, element access.

use crate::error::{track, Error, Result};
use crate::semiring::{Semiring, Val};

/// Round a column count up to the 4-element row alignment boundary.
#[inline]
fn align_stride(cols: usize) -> usize {
    (cols + 3) & !3
}

/// Dense tropical matrix.
///
/// Row-major storage with a row stride rounded up to a multiple of four
/// elements; element (i, j) lives at `data[i * stride + j]`. Padding lanes
/// between `cols` and `stride` hold ε and are never compared or written by
/// the arithmetic kernels. Cloning is deep; two matrices never share a
/// buffer.
#[derive(Debug, Clone)]
pub struct Matrix {
    pub(crate) data: Vec<Val>,
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) stride: usize,
}

impl Matrix {
    /// Create a matrix with every element (padding included) set to `value`.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` on a zero dimension, `OutOfMemory` if the buffer
    /// cannot be allocated.
    pub fn filled(rows: usize, cols: usize, value: Val) -> Result<Self> {
        track(Self::filled_inner(rows, cols, value))
    }

    fn filled_inner(rows: usize, cols: usize, value: Val) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let stride = align_stride(cols);
        let len = rows * stride;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| Error::OutOfMemory {
            bytes: len * std::mem::size_of::<Val>(),
        })?;
        data.resize(len, value);
        Ok(Self {
            data,
            rows,
            cols,
            stride,
        })
    }

    /// Create a matrix filled with the semiring zero ε.
    pub fn zeros(rows: usize, cols: usize, semiring: Semiring) -> Result<Self> {
        Self::filled(rows, cols, semiring.zero())
    }

    /// Create the n×n tropical identity: ε everywhere, e on the diagonal.
    pub fn identity(n: usize, semiring: Semiring) -> Result<Self> {
        let mut mat = Self::zeros(n, n, semiring)?;
        let one = semiring.one();
        for i in 0..n {
            mat.set(i, i, one);
        }
        Ok(mat)
    }

    /// Create a matrix from a row-major slice of `rows * cols` values.
    ///
    /// The values are copied into freshly aligned storage.
    pub fn from_slice(values: &[Val], rows: usize, cols: usize) -> Result<Self> {
        track(Self::from_slice_inner(values, rows, cols))
    }

    fn from_slice_inner(values: &[Val], rows: usize, cols: usize) -> Result<Self> {
        if values.len() != rows * cols {
            return Err(Error::shape_mismatch(&[rows * cols], &[values.len()]));
        }
        let mut mat = Self::filled_inner(rows, cols, 0)?;
        for i in 0..rows {
            mat.data[i * mat.stride..i * mat.stride + cols]
                .copy_from_slice(&values[i * cols..(i + 1) * cols]);
        }
        Ok(mat)
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

    /// Row stride of the backing buffer (≥ `cols`, 4-aligned).
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Element (row, col).
    ///
    /// Indices must be in range; bounds are checked only in debug builds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Val {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.stride + col]
    }

    /// Set element (row, col).
    ///
    /// Indices must be in range; bounds are checked only in debug builds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Val) {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.stride + col] = value;
    }

    /// Bounds-checked element access.
    pub fn get_checked(&self, row: usize, col: usize) -> Result<Val> {
        self.check_bounds(row, col)?;
        Ok(self.get(row, col))
    }

    /// Bounds-checked element update.
    pub fn set_checked(&mut self, row: usize, col: usize, value: Val) -> Result<()> {
        self.check_bounds(row, col)?;
        self.set(row, col, value);
        Ok(())
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
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
        Ok(())
    }

    /// The `cols` live elements of row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[Val] {
        debug_assert!(i < self.rows);
        &self.data[i * self.stride..i * self.stride + self.cols]
    }

    /// Mutable access to the live elements of row `i`.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [Val] {
        debug_assert!(i < self.rows);
        &mut self.data[i * self.stride..i * self.stride + self.cols]
    }

    /// A borrowed view of this matrix.
    pub fn as_view(&self) -> MatrixView<'_> {
        MatrixView {
            data: &self.data,
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
        }
    }
}

/// Logical equality: same shape and same live elements. Stride padding is
/// ignored, so matrices with different strides can compare equal.
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && (0..self.rows).all(|i| self.row(i) == other.row(i))
    }
}

impl Eq for Matrix {}

/// Non-owning view over caller-provided row-major storage.
///
/// A view borrows its buffer for `'a`; dropping the view leaves the buffer
/// untouched. Use [`MatrixView::to_matrix`] for an owned deep copy.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a> {
    data: &'a [Val],
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<'a> MatrixView<'a> {
    /// Wrap an existing buffer as a `rows`×`cols` matrix with the given
    /// row stride.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` on a zero dimension, `InvalidArgument` if
    /// `stride < cols` or the buffer is too short for the footprint
    /// `(rows - 1) * stride + cols`.
    pub fn wrap(data: &'a [Val], rows: usize, cols: usize, stride: usize) -> Result<Self> {
        track(Self::wrap_inner(data, rows, cols, stride))
    }

    fn wrap_inner(data: &'a [Val], rows: usize, cols: usize, stride: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        if stride < cols {
            return Err(Error::invalid_argument(
                "stride",
                format!("stride {} is smaller than cols {}", stride, cols),
            ));
        }
        let needed = (rows - 1) * stride + cols;
        if data.len() < needed {
            return Err(Error::invalid_argument(
                "data",
                format!("buffer holds {} values, footprint needs {}", data.len(), needed),
            ));
        }
        Ok(Self {
            data,
            rows,
            cols,
            stride,
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

    /// Element (row, col); bounds checked only in debug builds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Val {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.stride + col]
    }

    /// Bounds-checked element access.
    pub fn get_checked(&self, row: usize, col: usize) -> Result<Val> {
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
        Ok(self.get(row, col))
    }

    /// Deep-copy the viewed data into an owned [`Matrix`].
    pub fn to_matrix(&self) -> Result<Matrix> {
        let mut mat = Matrix::filled(self.rows, self.cols, 0)?;
        for i in 0..self.rows {
            let src = &self.data[i * self.stride..i * self.stride + self.cols];
            mat.row_mut(i).copy_from_slice(src);
        }
        Ok(mat)
    }
}
