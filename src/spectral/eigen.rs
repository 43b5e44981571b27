//! Karp maximum-cycle-mean and power-iteration eigenvectors.

use crate::dense::Matrix;
use crate::error::{set_last_error, track, Error, ErrorKind, Result};
use crate::semiring::{Semiring, Val, NEG_INF, POS_INF};

/// Default iteration bound for the power iteration.
const DEFAULT_MAX_ITER: usize = 1000;

/// Default tolerance when comparing cycle means against λ.
const DEFAULT_TOL: Val = 1;

/// Options for [`eigenvector`].
#[derive(Debug, Clone, Copy)]
pub struct EigenOptions {
    /// Maximum power-iteration steps. 0 selects the default (1000).
    pub max_iter: usize,
}

impl Default for EigenOptions {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

/// Result of [`eigenvector`].
#[derive(Debug, Clone)]
pub struct EigenResult {
    /// The final iterate (an eigenvector when `converged` is true).
    pub vector: Vec<Val>,
    /// The tropical eigenvalue λ.
    pub value: Val,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the iteration reached a fixed point.
    pub converged: bool,
}

/// Tropical eigenvalue: the maximum cycle mean, by Karp's algorithm.
///
/// Builds the table `D[k][v]` = optimal weight over paths of exactly `k`
/// edges ending at `v` (with `D[0][v] = e`), then evaluates
///
/// ```text
/// λ = max_v min_{0 ≤ k < n} (D[n][v] - D[k][v]) / (n - k)
/// ```
///
/// skipping ε entries in both extrema. The division truncates toward zero.
/// Returns [`NEG_INF`] when the graph is acyclic (every `D[n][v]` is ε).
/// O(n³) time, O(n²) space.
///
/// # Errors
///
/// `NotSquare` unless the matrix is square; `Unsupported` for semirings
/// other than `MaxPlus`/`MinPlus`, whose cycle mean has no meaningful
/// difference quotient.
pub fn eigenvalue(a: &Matrix, semiring: Semiring) -> Result<Val> {
    track(eigenvalue_inner(a, semiring))
}

fn eigenvalue_inner(a: &Matrix, semiring: Semiring) -> Result<Val> {
    if !a.is_square() {
        return Err(Error::NotSquare {
            rows: a.rows(),
            cols: a.cols(),
        });
    }
    if !matches!(semiring, Semiring::MaxPlus | Semiring::MinPlus) {
        return Err(Error::Unsupported {
            op: "eigenvalue",
            semiring,
        });
    }

    let n = a.rows();
    let zero = semiring.zero();
    let one = semiring.one();

    // D[k][v]: best k-edge path weight ending at v.
    let mut table: Vec<Vec<Val>> = Vec::with_capacity(n + 1);
    table.push(vec![one; n]);
    for k in 1..=n {
        let prev = &table[k - 1];
        let mut row = vec![zero; n];
        for (v, slot) in row.iter_mut().enumerate() {
            let mut best = zero;
            for u in 0..n {
                let edge = a.get(u, v);
                if edge != zero && prev[u] != zero {
                    best = semiring.add(best, semiring.mul(prev[u], edge));
                }
            }
            *slot = best;
        }
        table.push(row);
    }

    let last = &table[n];
    let mut max_mean = NEG_INF;
    for v in 0..n {
        if last[v] == zero {
            continue;
        }
        let mut min_for_v = POS_INF;
        for k in 0..n {
            if table[k][v] == zero {
                continue;
            }
            let diff = last[v] as i64 - table[k][v] as i64;
            let mean = (diff / (n - k) as i64) as Val;
            if mean < min_for_v {
                min_for_v = mean;
            }
        }
        if min_for_v != POS_INF && min_for_v > max_mean {
            max_mean = min_for_v;
        }
    }
    Ok(max_mean)
}

/// Tropical eigenvector by normalised power iteration.
///
/// Starting from the all-e vector, repeats `y ← A ⊗ x`, subtracts λ from
/// each non-ε component (the tropical analogue of dividing by the
/// eigenvalue), and stops at the first element-wise fixed point. On a
/// critical circuit whose means do not align, the iterates are periodic
/// and the bound is reached instead; the last iterate is still returned.
///
/// Convergence failure is non-fatal: the result carries
/// `converged = false` and the thread-local slot records
/// [`ErrorKind::NotConverged`]. An acyclic matrix (λ = [`NEG_INF`]) yields
/// the all-ε vector, also unconverged.
///
/// # Errors
///
/// `NotSquare` and `Unsupported` as for [`eigenvalue`].
pub fn eigenvector(a: &Matrix, semiring: Semiring, options: EigenOptions) -> Result<EigenResult> {
    let lambda = eigenvalue(a, semiring)?;
    let n = a.rows();
    let max_iter = if options.max_iter == 0 {
        DEFAULT_MAX_ITER
    } else {
        options.max_iter
    };

    if lambda == NEG_INF {
        set_last_error(ErrorKind::NotConverged);
        return Ok(EigenResult {
            vector: vec![semiring.zero(); n],
            value: lambda,
            iterations: 0,
            converged: false,
        });
    }

    let zero = semiring.zero();
    let mut x = vec![semiring.one(); n];
    let mut y = vec![zero; n];

    for iter in 0..max_iter {
        a.matvec_into(&x, &mut y, semiring)?;
        for slot in &mut y {
            if *slot != zero {
                *slot = semiring.mul(*slot, -lambda);
            }
        }
        let converged = x == y;
        x.copy_from_slice(&y);
        if converged {
            return Ok(EigenResult {
                vector: x,
                value: lambda,
                iterations: iter + 1,
                converged: true,
            });
        }
    }

    set_last_error(ErrorKind::NotConverged);
    Ok(EigenResult {
        vector: x,
        value: lambda,
        iterations: max_iter,
        converged: false,
    })
}

/// Mark the nodes lying on a short cycle whose mean achieves λ.
///
/// A node is marked when it carries a self-loop of weight within tol of λ,
/// or sits on a 2-cycle (i, j) whose mean `(A[i,j] ⊗ A[j,i]) / 2`
/// (truncating division) is within tol of λ; with the default tol of 1
/// that admits exactly the cycles whose integer mean equals λ. Longer
/// critical cycles are not examined by this routine.
///
/// Returns one flag per node; an acyclic matrix marks nothing.
///
/// # Errors
///
/// `NotSquare` and `Unsupported` as for [`eigenvalue`].
pub fn critical_nodes(a: &Matrix, semiring: Semiring) -> Result<Vec<bool>> {
    track(critical_nodes_inner(a, semiring))
}

fn critical_nodes_inner(a: &Matrix, semiring: Semiring) -> Result<Vec<bool>> {
    let lambda = eigenvalue_inner(a, semiring)?;
    let n = a.rows();
    let mut critical = vec![false; n];

    if lambda == NEG_INF {
        return Ok(critical);
    }

    let zero = semiring.zero();
    let threshold = lambda.saturating_sub(DEFAULT_TOL);

    for i in 0..n {
        for j in 0..n {
            let a_ij = a.get(i, j);
            let a_ji = a.get(j, i);
            if a_ij != zero && a_ji != zero {
                let mean = semiring.mul(a_ij, a_ji) / 2;
                if mean > threshold {
                    critical[i] = true;
                    critical[j] = true;
                }
            }
        }
        let diag = a.get(i, i);
        if diag != zero && diag > threshold {
            critical[i] = true;
        }
    }
    Ok(critical)
}
