//! Spectral theory of tropical matrices.
//!
//! The (max,+) eigenvalue of a square matrix equals the maximum cycle mean
//! of the matrix viewed as a weighted digraph; it is the growth rate of
//! `A^k` and the cycle time of the discrete-event system `x ← A ⊗ x`.
//! [`eigenvalue`] computes it with Karp's algorithm, [`eigenvector`] runs a
//! normalised power iteration, and [`critical_nodes`] marks the nodes on
//! short cycles achieving the mean.

mod eigen;

pub use eigen::{critical_nodes, eigenvalue, eigenvector, EigenOptions, EigenResult};
