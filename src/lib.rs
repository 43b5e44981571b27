//! # tropal
//!
//! **Tropical (idempotent semiring) linear algebra for Rust.**
//!
//! tropal re-interprets matrix arithmetic over five idempotent semirings —
//! (max,+), (min,+), (max,min), (min,max), and Boolean (OR,AND) — so that
//! one set of routines expresses shortest and longest paths, bottleneck
//! paths, reachability, Kleene closure, maximum cycle means (tropical
//! eigenvalues), eigenvectors, and discrete-event scheduling.
//!
//! ## Why tropical algebra?
//!
//! Replacing (+, ×) with (max, +) turns many combinatorial optimisation
//! problems into linear ones: `C[i,j] = ⊕_k (A[i,k] ⊗ B[k,j])` over
//! (min, +) *is* the shortest-path relaxation, the Kleene star `A*` *is*
//! all-pairs distances, and the eigenvalue of a scheduling matrix *is*
//! the cycle time of the system.
//!
//! ## Features
//!
//! - **Semiring kernel**: saturating `i32` arithmetic with ±∞ sentinels
//! - **Dense matrices**: aligned row-major storage, views, full algebra
//! - **Sparse CSR matrices**: binary-search access, bulk COO construction
//! - **Closure engine**: `A*` and `A⁺` over any semiring
//! - **Spectral engine**: Karp maximum cycle mean, power-iteration
//!   eigenvectors, critical-node detection
//! - **Graph facade**: SSSP, APSP, reachability, bottleneck paths
//! - **Scheduler**: fixed-point solving, cycle time, critical paths
//! - **File I/O**: CSV, binary, COO CSV, GraphViz DOT export
//!
//! ## Quick start
//!
//! ```
//! use tropal::prelude::*;
//!
//! // Shortest paths on a 4-node line graph.
//! let mut adj = Matrix::zeros(4, 4, Semiring::MinPlus)?;
//! for i in 0..4 {
//!     adj.set(i, i, 0);
//! }
//! adj.set(0, 1, 5);
//! adj.set(1, 2, 3);
//! adj.set(2, 3, 2);
//!
//! let dist = adj.closure(Semiring::MinPlus)?;
//! assert_eq!(dist.get(0, 3), 10);
//! # Ok::<(), tropal::error::Error>(())
//! ```
//!
//! ## Feature flags
//!
//! - `rayon` (default): row-parallel dense multiplication. Reductions stay
//!   per-row, so results are bit-identical with and without it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dense;
pub mod error;
pub mod graph;
pub mod io;
pub mod scheduler;
pub mod semiring;
pub mod sparse;
pub mod spectral;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::dense::{dot, iterate, Matrix, MatrixView};
    pub use crate::error::{last_error, Error, ErrorKind, Result};
    pub use crate::graph::{
        all_pairs_paths, bottleneck_paths, reachability, single_source_paths,
    };
    pub use crate::scheduler::Scheduler;
    pub use crate::semiring::{Semiring, Val, NEG_INF, POS_INF};
    pub use crate::sparse::SparseMatrix;
    pub use crate::spectral::{critical_nodes, eigenvalue, eigenvector, EigenOptions, EigenResult};
}
