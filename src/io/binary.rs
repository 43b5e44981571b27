//! Binary dense-matrix format.
//!
//! Little-endian layout: `u32` magic `0x504C4D41` ("PLMA"), `u32` version,
//! `u32` rows, `u32` cols, then `rows * cols` signed 32-bit values in
//! row-major order with no stride padding.

use crate::dense::Matrix;
use crate::error::{track, Error, Result};
use crate::semiring::Val;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

const MAGIC: u32 = 0x504C_4D41;
const VERSION: u32 = 1;

/// Save a dense matrix in the binary format.
pub fn save_matrix_binary<P: AsRef<Path>>(mat: &Matrix, path: P) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for header in [MAGIC, VERSION, mat.rows() as u32, mat.cols() as u32] {
        out.write_all(&header.to_le_bytes())?;
    }
    for i in 0..mat.rows() {
        for &v in mat.row(i) {
            out.write_all(&v.to_le_bytes())?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Load a dense matrix from the binary format.
///
/// # Errors
///
/// `FileFormat` on a magic mismatch or impossible dimensions, `Io` on a
/// truncated payload.
pub fn load_matrix_binary<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    track(load_matrix_binary_inner(path.as_ref()))
}

fn load_matrix_binary_inner(path: &Path) -> Result<Matrix> {
    let mut reader = BufReader::new(File::open(path)?);

    let mut word = [0u8; 4];
    let mut read_u32 = |reader: &mut BufReader<File>| -> Result<u32> {
        reader.read_exact(&mut word)?;
        Ok(u32::from_le_bytes(word))
    };

    let magic = read_u32(&mut reader)?;
    if magic != MAGIC {
        return Err(Error::file_format(format!(
            "bad magic 0x{:08X}, expected 0x{:08X}",
            magic, MAGIC
        )));
    }
    let _version = read_u32(&mut reader)?;
    let rows = read_u32(&mut reader)? as usize;
    let cols = read_u32(&mut reader)? as usize;
    if rows == 0 || cols == 0 {
        return Err(Error::file_format(format!(
            "zero dimension {}x{}",
            rows, cols
        )));
    }

    let mut values = vec![0 as Val; rows * cols];
    let mut buf = [0u8; 4];
    for v in &mut values {
        reader.read_exact(&mut buf)?;
        *v = Val::from_le_bytes(buf);
    }
    Matrix::from_slice(&values, rows, cols)
}
