//! Integration tests for the spectral engine, including a brute-force
//! cross-check of Karp's algorithm against cycle enumeration.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tropal::prelude::*;

/// Brute-force maximum cycle mean: enumerate every simple cycle by DFS
/// and take the best truncated mean. Exponential; fine for n ≤ 5.
fn brute_force_cycle_mean(a: &Matrix) -> Val {
    let n = a.rows();
    let zero = Semiring::MaxPlus.zero();
    let mut best = NEG_INF;

    fn dfs(
        a: &Matrix,
        zero: Val,
        start: usize,
        current: usize,
        weight: i64,
        len: usize,
        visited: &mut Vec<bool>,
        best: &mut Val,
    ) {
        for next in 0..a.rows() {
            let edge = a.get(current, next);
            if edge == zero {
                continue;
            }
            if next == start {
                let mean = ((weight + edge as i64) / (len + 1) as i64) as Val;
                if mean > *best {
                    *best = mean;
                }
            } else if !visited[next] && next > start {
                // Only enumerate cycles from their smallest node.
                visited[next] = true;
                dfs(a, zero, start, next, weight + edge as i64, len + 1, visited, best);
                visited[next] = false;
            }
        }
    }

    let mut visited = vec![false; n];
    for start in 0..n {
        visited[start] = true;
        dfs(a, zero, start, start, 0, 0, &mut visited, &mut best);
        visited[start] = false;
    }
    best
}

#[test]
fn test_three_cycle_eigenvalue() {
    // Cycle 0→1→2→0 with weights 5, 3, 4 as A[to, from]: mean 4.
    let mut a = Matrix::zeros(3, 3, Semiring::MaxPlus).unwrap();
    a.set(1, 0, 5);
    a.set(2, 1, 3);
    a.set(0, 2, 4);
    assert_eq!(eigenvalue(&a, Semiring::MaxPlus).unwrap(), 4);
}

#[test]
fn test_two_cycles_eigenvalue_and_critical_nodes() {
    let mut a = Matrix::zeros(3, 3, Semiring::MaxPlus).unwrap();
    a.set(1, 0, 3);
    a.set(0, 1, 5);
    a.set(2, 0, 2);
    a.set(0, 2, 4);

    assert_eq!(eigenvalue(&a, Semiring::MaxPlus).unwrap(), 4);
    let critical = critical_nodes(&a, Semiring::MaxPlus).unwrap();
    assert_eq!(critical, vec![true, true, false]);
}

#[test]
fn test_karp_matches_brute_force_on_random_graphs() {
    let mut rng = StdRng::seed_from_u64(0x7201);
    for case in 0..50 {
        let n = rng.gen_range(2..=5);
        let mut a = Matrix::zeros(n, n, Semiring::MaxPlus).unwrap();
        for i in 0..n {
            for j in 0..n {
                if rng.gen_bool(0.5) {
                    a.set(i, j, rng.gen_range(-20..=20));
                }
            }
        }
        assert_eq!(
            eigenvalue(&a, Semiring::MaxPlus).unwrap(),
            brute_force_cycle_mean(&a),
            "case {} (n = {})",
            case,
            n
        );
    }
}

#[test]
fn test_eigenvector_fixed_point_property() {
    // Symmetric 2-cycle: the iteration fixes immediately and
    // A ⊗ v = λ ⊗ v holds exactly.
    let mut a = Matrix::zeros(2, 2, Semiring::MaxPlus).unwrap();
    a.set(0, 1, 2);
    a.set(1, 0, 2);

    let result = eigenvector(&a, Semiring::MaxPlus, EigenOptions::default()).unwrap();
    assert!(result.converged);
    assert_eq!(result.value, 2);

    let av = a.matvec(&result.vector, Semiring::MaxPlus).unwrap();
    let lifted: Vec<Val> = result.vector.iter().map(|&v| v + result.value).collect();
    assert_eq!(av, lifted);
}

#[test]
fn test_eigenvector_strongly_connected_converges() {
    // Fully connected 3-node graph dominated by a self-loop at node 0.
    let mut a = Matrix::zeros(3, 3, Semiring::MaxPlus).unwrap();
    a.set(0, 0, 6);
    a.set(1, 0, 2);
    a.set(2, 1, 1);
    a.set(0, 2, 0);
    let result = eigenvector(&a, Semiring::MaxPlus, EigenOptions::default()).unwrap();
    assert_eq!(result.value, 6);
    assert!(result.converged);

    let av = a.matvec(&result.vector, Semiring::MaxPlus).unwrap();
    for (avi, vi) in av.iter().zip(&result.vector) {
        if *vi != NEG_INF {
            assert_eq!(*avi, vi + 6);
        }
    }
}

#[test]
fn test_unsupported_semirings_refuse() {
    for s in [Semiring::MaxMin, Semiring::MinMax, Semiring::Boolean] {
        let a = Matrix::zeros(2, 2, s).unwrap();
        assert!(matches!(
            eigenvalue(&a, s),
            Err(Error::Unsupported { .. })
        ));
        assert_eq!(last_error(), Some(ErrorKind::Unsupported));
    }
}

#[test]
fn test_acyclic_spectrum() {
    let mut a = Matrix::zeros(4, 4, Semiring::MaxPlus).unwrap();
    a.set(1, 0, 3);
    a.set(2, 1, 1);
    a.set(3, 2, 2);

    assert_eq!(eigenvalue(&a, Semiring::MaxPlus).unwrap(), NEG_INF);
    let result = eigenvector(&a, Semiring::MaxPlus, EigenOptions::default()).unwrap();
    assert!(!result.converged);
    assert!(result.vector.iter().all(|&v| v == NEG_INF));
    assert_eq!(critical_nodes(&a, Semiring::MaxPlus).unwrap(), vec![false; 4]);
}
