//! Error taxonomy and the thread-local last-error slot.

use crate::semiring::Semiring;
use std::cell::Cell;
use thiserror::Error;

/// Result type alias using tropal's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tropal operations.
///
/// Arithmetic itself is total (saturation replaces overflow); errors arise
/// from shape and argument validation, iteration limits, and file I/O.
#[derive(Error, Debug)]
pub enum Error {
    /// Operand shapes are incompatible for the requested operation.
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape.
        expected: Vec<usize>,
        /// Actual shape.
        got: Vec<usize>,
    },

    /// A matrix dimension is invalid (zero rows or columns).
    #[error("invalid matrix dimensions {rows}x{cols}")]
    InvalidDimensions {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// Memory allocation failed.
    #[error("out of memory: failed to allocate {bytes} bytes")]
    OutOfMemory {
        /// Requested size in bytes.
        bytes: usize,
    },

    /// Invalid argument provided to an operation.
    #[error("invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name.
        arg: &'static str,
        /// Reason for invalidity.
        reason: String,
    },

    /// The operation requires a square matrix.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Actual rows.
        rows: usize,
        /// Actual columns.
        cols: usize,
    },

    /// An iterative algorithm did not converge within its bound.
    #[error("did not converge within {iterations} iterations")]
    NotConverged {
        /// Iterations performed.
        iterations: usize,
    },

    /// An underlying file open/read/write failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The file content does not match the expected format.
    #[error("invalid file format: {reason}")]
    FileFormat {
        /// What was malformed.
        reason: String,
    },

    /// Index out of bounds.
    #[error("index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index.
        index: usize,
        /// Size of the dimension.
        size: usize,
    },

    /// The CSR structure is internally inconsistent.
    #[error("invalid sparse matrix format: {reason}")]
    InvalidSparseFormat {
        /// What was inconsistent.
        reason: String,
    },

    /// The operation is not defined for the given semiring.
    #[error("unsupported operation '{op}' for {semiring} semiring")]
    Unsupported {
        /// The operation name.
        op: &'static str,
        /// The offending semiring.
        semiring: Semiring,
    },
}

impl Error {
    /// Create a shape mismatch error.
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a file format error.
    pub fn file_format(reason: impl Into<String>) -> Self {
        Self::FileFormat {
            reason: reason.into(),
        }
    }

    /// The lightweight kind of this error, as stored in the last-error slot.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            Error::InvalidDimensions { .. } => ErrorKind::InvalidDimensions,
            Error::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Error::NotSquare { .. } => ErrorKind::NotSquare,
            Error::NotConverged { .. } => ErrorKind::NotConverged,
            Error::Io(_) => ErrorKind::Io,
            Error::FileFormat { .. } => ErrorKind::FileFormat,
            Error::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            Error::InvalidSparseFormat { .. } => ErrorKind::InvalidSparseFormat,
            Error::Unsupported { .. } => ErrorKind::Unsupported,
        }
    }
}

/// Discriminant-only error kind, recorded in the per-thread last-error slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ErrorKind {
    ShapeMismatch,
    InvalidDimensions,
    OutOfMemory,
    InvalidArgument,
    NotSquare,
    NotConverged,
    Io,
    FileFormat,
    IndexOutOfBounds,
    InvalidSparseFormat,
    Unsupported,
}

thread_local! {
    static LAST_ERROR: Cell<Option<ErrorKind>> = const { Cell::new(None) };
}

/// The kind of the most recent failure on this thread, if any.
///
/// Allocating operations record their failure kind here and clear the slot
/// on success; the slot is never shared between threads.
pub fn last_error() -> Option<ErrorKind> {
    LAST_ERROR.with(|slot| slot.get())
}

/// Record an error kind in this thread's last-error slot.
pub fn set_last_error(kind: ErrorKind) {
    LAST_ERROR.with(|slot| slot.set(Some(kind)));
}

/// Reset this thread's last-error slot.
pub fn clear_last_error() {
    LAST_ERROR.with(|slot| slot.set(None));
}

/// Route a result through the last-error slot: failures record their kind,
/// successes clear the slot.
pub(crate) fn track<T>(result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => clear_last_error(),
        Err(e) => set_last_error(e.kind()),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semiring::Semiring;

    #[test]
    fn test_kind_mapping() {
        let err = Error::shape_mismatch(&[2, 2], &[3, 2]);
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        let err = Error::NotSquare { rows: 2, cols: 3 };
        assert_eq!(err.kind(), ErrorKind::NotSquare);
    }

    #[test]
    fn test_last_error_slot() {
        clear_last_error();
        assert_eq!(last_error(), None);

        let r: Result<()> = track(Err(Error::NotConverged { iterations: 10 }));
        assert!(r.is_err());
        assert_eq!(last_error(), Some(ErrorKind::NotConverged));

        let r: Result<i32> = track(Ok(1));
        assert!(r.is_ok());
        assert_eq!(last_error(), None);
    }

    #[test]
    fn test_slot_is_per_thread() {
        set_last_error(ErrorKind::OutOfMemory);
        let handle = std::thread::spawn(last_error);
        assert_eq!(handle.join().unwrap(), None);
        assert_eq!(last_error(), Some(ErrorKind::OutOfMemory));
        clear_last_error();
    }

    #[test]
    fn test_display() {
        let err = Error::Unsupported {
            op: "eigenvalue",
            semiring: Semiring::Boolean,
        };
        assert_eq!(
            err.to_string(),
            "unsupported operation 'eigenvalue' for (OR, AND) semiring"
        );
    }
}
