//! CSV formats: dense matrices and COO sparse triplets.

use crate::dense::Matrix;
use crate::error::{track, Error, Result};
use crate::semiring::{Semiring, Val, NEG_INF, POS_INF};
use crate::sparse::SparseMatrix;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

fn format_val(v: Val) -> String {
    match v {
        NEG_INF => "-inf".to_string(),
        POS_INF => "inf".to_string(),
        _ => v.to_string(),
    }
}

fn parse_val(field: &str) -> Result<Val> {
    let field = field.trim();
    match field {
        "inf" | "Inf" => Ok(POS_INF),
        "-inf" | "-Inf" => Ok(NEG_INF),
        _ => field
            .parse::<Val>()
            .map_err(|_| Error::file_format(format!("unparseable value '{}'", field))),
    }
}

fn skip_line(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

/// Save a dense matrix as CSV with a descriptive `#` header line.
pub fn save_matrix_csv<P: AsRef<Path>>(mat: &Matrix, path: P, semiring: Semiring) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(
        out,
        "# PALMA matrix {}x{}, semiring={}",
        mat.rows(),
        mat.cols(),
        semiring.name()
    )?;
    for i in 0..mat.rows() {
        let line: Vec<String> = mat.row(i).iter().map(|&v| format_val(v)).collect();
        writeln!(out, "{}", line.join(","))?;
    }
    out.flush()?;
    Ok(())
}

/// Load a dense matrix from CSV.
///
/// `#`-comment and blank lines are skipped; the column count comes from
/// the first data line and the row count is inferred. Fields are signed
/// decimal integers or `inf`/`Inf`/`-inf`/`-Inf`.
pub fn load_matrix_csv<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    track(load_matrix_csv_inner(path.as_ref()))
}

fn load_matrix_csv_inner(path: &Path) -> Result<Matrix> {
    let reader = BufReader::new(File::open(path)?);
    let mut rows: Vec<Vec<Val>> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if skip_line(line) {
            continue;
        }
        let parsed: Result<Vec<Val>> = line.split(',').map(parse_val).collect();
        let parsed = parsed?;
        if let Some(first) = rows.first() {
            if parsed.len() != first.len() {
                return Err(Error::file_format(format!(
                    "row {} has {} fields, expected {}",
                    rows.len(),
                    parsed.len(),
                    first.len()
                )));
            }
        }
        rows.push(parsed);
    }

    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, |r| r.len());
    if n_rows == 0 || n_cols == 0 {
        return Err(Error::file_format("no data rows"));
    }

    let flat: Vec<Val> = rows.into_iter().flatten().collect();
    Matrix::from_slice(&flat, n_rows, n_cols)
}

/// Save a sparse matrix as COO CSV: a `rows,cols,nnz` dimension line
/// followed by one `row,col,value` line per stored entry.
pub fn save_sparse_csv<P: AsRef<Path>>(sp: &SparseMatrix, path: P) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(
        out,
        "# PALMA sparse matrix {}x{}, nnz={}, semiring={}",
        sp.rows(),
        sp.cols(),
        sp.nnz(),
        sp.semiring().name()
    )?;
    writeln!(out, "# Format: row,col,value (COO format)")?;
    writeln!(out, "{},{},{}", sp.rows(), sp.cols(), sp.nnz())?;

    for i in 0..sp.rows() {
        let (cols, vals) = sp.row_entries(i);
        for (&j, &v) in cols.iter().zip(vals) {
            writeln!(out, "{},{},{}", i, j, v)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Load a sparse matrix from COO CSV.
///
/// Comment and blank lines are allowed anywhere; the first data line is
/// `rows,cols,nnz` and triplets may arrive in any order.
pub fn load_sparse_csv<P: AsRef<Path>>(path: P, semiring: Semiring) -> Result<SparseMatrix> {
    track(load_sparse_csv_inner(path.as_ref(), semiring))
}

fn load_sparse_csv_inner(path: &Path, semiring: Semiring) -> Result<SparseMatrix> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = reader.lines();

    let (rows, cols, nnz) = loop {
        let line = match lines.next() {
            Some(line) => line?,
            None => return Err(Error::file_format("missing dimension line")),
        };
        let line = line.trim();
        if skip_line(line) {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 3 {
            return Err(Error::file_format(format!(
                "dimension line '{}' needs rows,cols,nnz",
                line
            )));
        }
        let dims: Result<Vec<usize>> = fields
            .iter()
            .map(|f| {
                f.trim()
                    .parse::<usize>()
                    .map_err(|_| Error::file_format(format!("unparseable dimension '{}'", f)))
            })
            .collect();
        let dims = dims?;
        break (dims[0], dims[1], dims[2]);
    };

    let mut triplets = Vec::with_capacity(nnz);
    for line in lines {
        let line = line?;
        let line = line.trim();
        if skip_line(line) {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 3 {
            return Err(Error::file_format(format!(
                "entry line '{}' needs row,col,value",
                line
            )));
        }
        let row: usize = fields[0]
            .trim()
            .parse()
            .map_err(|_| Error::file_format(format!("unparseable row '{}'", fields[0])))?;
        let col: usize = fields[1]
            .trim()
            .parse()
            .map_err(|_| Error::file_format(format!("unparseable col '{}'", fields[1])))?;
        let value = parse_val(fields[2])?;
        triplets.push((row, col, value));
    }

    SparseMatrix::from_triplets(rows, cols, &triplets, semiring)
}
