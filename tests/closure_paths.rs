//! Integration tests for the closure engine and graph facade.

use tropal::prelude::*;

/// Scenario: 4-node line graph 0→1→2→3 with weights 5, 3, 2, zero
/// diagonal, min-plus.
fn line_graph() -> Matrix {
    let mut adj = Matrix::zeros(4, 4, Semiring::MinPlus).unwrap();
    for i in 0..4 {
        adj.set(i, i, 0);
    }
    adj.set(0, 1, 5);
    adj.set(1, 2, 3);
    adj.set(2, 3, 2);
    adj
}

#[test]
fn test_shortest_paths_line_graph() {
    let dist = all_pairs_paths(&line_graph(), Semiring::MinPlus).unwrap();
    assert_eq!(dist.get(0, 3), 10);
    assert_eq!(dist.get(0, 1), 5);
    assert_eq!(dist.get(1, 3), 5);
    assert_eq!(dist.get(3, 0), POS_INF);
    assert_eq!(dist.get(2, 1), POS_INF);
}

#[test]
fn test_closure_equals_power_series() {
    // A* must agree with the truncated series I ⊕ A ⊕ A² ⊕ A³ on a
    // 4-node graph (longer powers add nothing on an acyclic reach).
    let adj = line_graph();
    let s = Semiring::MinPlus;

    let mut series = Matrix::identity(4, s).unwrap();
    for k in 1..4 {
        series = series.add(&adj.pow(k, s).unwrap(), s).unwrap();
    }
    assert_eq!(adj.closure(s).unwrap(), series);
}

#[test]
fn test_closure_idempotent() {
    let s = Semiring::MinPlus;
    let star = line_graph().closure(s).unwrap();
    assert_eq!(star.closure(s).unwrap(), star);

    let s = Semiring::MaxMin;
    let mut adj = Matrix::zeros(3, 3, s).unwrap();
    adj.set(0, 1, 4);
    adj.set(1, 2, 9);
    adj.set(2, 0, 2);
    let star = adj.closure(s).unwrap();
    assert_eq!(star.closure(s).unwrap(), star);
}

#[test]
fn test_bottleneck_scenario() {
    // 3-node line with capacities 100 and 20 in both directions.
    let mut adj = Matrix::zeros(3, 3, Semiring::MaxMin).unwrap();
    for i in 0..3 {
        adj.set(i, i, POS_INF);
    }
    adj.set(0, 1, 100);
    adj.set(1, 0, 100);
    adj.set(1, 2, 20);
    adj.set(2, 1, 20);

    let widest = bottleneck_paths(&adj).unwrap();
    assert_eq!(widest.get(0, 2), 20);
}

#[test]
fn test_reachability_chain_is_upper_triangular() {
    let mut adj = Matrix::zeros(4, 4, Semiring::MaxPlus).unwrap();
    adj.set(0, 1, 1);
    adj.set(1, 2, 1);
    adj.set(2, 3, 1);

    let reach = reachability(&adj).unwrap();
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(reach.get(i, j), (j >= i) as Val, "({}, {})", i, j);
        }
    }
}

#[test]
fn test_single_source_matches_all_pairs() {
    let adj = line_graph();
    let s = Semiring::MinPlus;
    let all = all_pairs_paths(&adj, s).unwrap();
    for src in 0..4 {
        let dist = single_source_paths(&adj, src, s).unwrap();
        for v in 0..4 {
            assert_eq!(dist[v], all.get(src, v), "src {} v {}", src, v);
        }
    }
}

#[test]
fn test_longest_paths_max_plus() {
    // Diamond 0→{1,2}→3; the longer arm wins under max-plus.
    let mut adj = Matrix::zeros(4, 4, Semiring::MaxPlus).unwrap();
    adj.set(0, 1, 1);
    adj.set(0, 2, 5);
    adj.set(1, 3, 10);
    adj.set(2, 3, 2);

    let longest = all_pairs_paths(&adj, Semiring::MaxPlus).unwrap();
    assert_eq!(longest.get(0, 3), 11);
}
