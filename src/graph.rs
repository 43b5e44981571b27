//! Graph algorithms as thin bindings over the closure engine.
//!
//! An adjacency matrix `A[i,j]` holds the weight of edge i→j, with ε for
//! "no edge". Choosing the semiring chooses the path problem: `MinPlus`
//! gives shortest paths, `MaxPlus` longest, `MaxMin` widest-bottleneck,
//! `Boolean` plain reachability.

use crate::dense::{iterate, Matrix};
use crate::error::{track, Error, Result};
use crate::semiring::{Semiring, Val, NEG_INF, POS_INF};

/// All-pairs optimal path weights: the Kleene closure of the adjacency
/// matrix. `MinPlus` for shortest paths, `MaxPlus` for longest (on DAGs).
pub fn all_pairs_paths(adj: &Matrix, semiring: Semiring) -> Result<Matrix> {
    adj.closure(semiring)
}

/// Single-source optimal path weights, Bellman–Ford style.
///
/// Starts from dist = ε with dist[source] = e and iterates `x ← A ⊗ x`
/// n times — enough for any simple path. Graphs whose distances would
/// keep improving past n iterations are outside the contract.
///
/// # Errors
///
/// `IndexOutOfBounds` for a bad source, `NotSquare` for a rectangular
/// adjacency matrix.
pub fn single_source_paths(adj: &Matrix, source: usize, semiring: Semiring) -> Result<Vec<Val>> {
    let mut dist = vec![semiring.zero(); adj.rows()];
    single_source_paths_into(adj, source, &mut dist, semiring)?;
    Ok(dist)
}

/// In-place variant of [`single_source_paths`]; `dist` must have length n.
pub fn single_source_paths_into(
    adj: &Matrix,
    source: usize,
    dist: &mut [Val],
    semiring: Semiring,
) -> Result<()> {
    if source >= adj.rows() {
        return Err(Error::IndexOutOfBounds {
            index: source,
            size: adj.rows(),
        });
    }
    if dist.len() != adj.rows() {
        return Err(Error::shape_mismatch(&[adj.rows()], &[dist.len()]));
    }
    dist.fill(semiring.zero());
    dist[source] = semiring.one();
    iterate(adj, dist, adj.rows() as u32, semiring)
}

/// Reachability matrix under the Boolean semiring: entry (i, j) is 1 iff
/// a (possibly empty) path i→j exists.
///
/// The adjacency matrix is first recoded: every finite entry — and every
/// diagonal position — becomes 1, ±∞ become 0. The Boolean closure of the
/// recoding is returned.
pub fn reachability(adj: &Matrix) -> Result<Matrix> {
    track(reachability_inner(adj))
}

fn reachability_inner(adj: &Matrix) -> Result<Matrix> {
    let mut recoded = Matrix::zeros(adj.rows(), adj.cols(), Semiring::Boolean)?;
    for i in 0..adj.rows() {
        for j in 0..adj.cols() {
            let v = adj.get(i, j);
            let is_edge = (v != NEG_INF && v != POS_INF) || i == j;
            recoded.set(i, j, is_edge as Val);
        }
    }
    recoded.closure(Semiring::Boolean)
}

/// Widest-path (bottleneck) weights: the (max, min) closure. Entry (i, j)
/// is the best achievable minimum edge capacity over paths i→j.
pub fn bottleneck_paths(adj: &Matrix) -> Result<Matrix> {
    adj.closure(Semiring::MaxMin)
}
