//! GraphViz DOT export of a matrix viewed as a weighted digraph.

use crate::dense::Matrix;
use crate::error::Result;
use crate::semiring::{Semiring, NEG_INF, POS_INF};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export a matrix as a GraphViz digraph.
///
/// Nodes are indexed 0..n-1, labelled from `node_names` when provided.
/// Every non-ε off-diagonal entry `A[i,j]` becomes an edge `j -> i`
/// labelled with its value — the system-matrix convention where column j
/// is the source. Infinite weights render as `∞` / `-∞`.
pub fn export_dot<P: AsRef<Path>>(
    mat: &Matrix,
    path: P,
    semiring: Semiring,
    node_names: Option<&[&str]>,
) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let zero = semiring.zero();

    writeln!(out, "digraph {{")?;
    writeln!(out, "  rankdir=LR;")?;
    writeln!(out, "  node [shape=circle];")?;
    writeln!(out)?;

    for i in 0..mat.rows() {
        match node_names.and_then(|names| names.get(i)) {
            Some(name) => writeln!(out, "  {} [label=\"{}\"];", i, name)?,
            None => writeln!(out, "  {};", i)?,
        }
    }
    writeln!(out)?;

    for i in 0..mat.rows() {
        for j in 0..mat.cols() {
            let v = mat.get(i, j);
            if v == zero || i == j {
                continue;
            }
            let label = match v {
                NEG_INF => "-∞".to_string(),
                POS_INF => "∞".to_string(),
                _ => v.to_string(),
            };
            writeln!(out, "  {} -> {} [label=\"{}\"];", j, i, label)?;
        }
    }

    writeln!(out, "}}")?;
    out.flush()?;
    Ok(())
}
