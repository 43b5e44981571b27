//! Discrete-event scheduling on the (max,+) system `x ← A ⊗ x ⊕ b`.
//!
//! Precedence-constrained scheduling linearises over max-plus: `A[to,
//! from]` holds the duration of `from` when `from` must finish before `to`
//! starts, `b` holds external ready times, and the least solution of
//! `x = A ⊗ x ⊕ b` assigns each task its completion time. A min-plus
//! scheduler computes earliest-start instead of latest-completion times.

use crate::dense::Matrix;
use crate::error::{track, Error, Result};
use crate::semiring::{Semiring, Val, NEG_INF};
use crate::spectral;

/// Precedence-constrained task scheduler over an additive-tropical
/// semiring.
#[derive(Debug, Clone)]
pub struct Scheduler {
    system: Matrix,
    state: Vec<Val>,
    input: Vec<Val>,
    semiring: Semiring,
    task_names: Vec<Option<String>>,
}

impl Scheduler {
    /// Create a scheduler for `n_tasks` tasks.
    ///
    /// The system matrix starts ε-filled (no constraints), as do the state
    /// and input vectors (no task ready).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless the semiring is `MaxPlus` or `MinPlus`;
    /// `InvalidDimensions` for zero tasks.
    pub fn new(n_tasks: usize, semiring: Semiring) -> Result<Self> {
        track(Self::new_inner(n_tasks, semiring))
    }

    fn new_inner(n_tasks: usize, semiring: Semiring) -> Result<Self> {
        if !matches!(semiring, Semiring::MaxPlus | Semiring::MinPlus) {
            return Err(Error::invalid_argument(
                "semiring",
                format!("scheduling requires max-plus or min-plus, got {}", semiring),
            ));
        }
        let system = Matrix::zeros(n_tasks, n_tasks, semiring)?;
        Ok(Self {
            system,
            state: vec![semiring.zero(); n_tasks],
            input: vec![semiring.zero(); n_tasks],
            semiring,
            task_names: vec![None; n_tasks],
        })
    }

    /// Number of tasks.
    pub fn n_tasks(&self) -> usize {
        self.state.len()
    }

    /// The scheduler's semiring.
    pub fn semiring(&self) -> Semiring {
        self.semiring
    }

    /// The system matrix A.
    pub fn system(&self) -> &Matrix {
        &self.system
    }

    /// The current state vector x (completion times after
    /// [`solve`](Scheduler::solve)).
    pub fn state(&self) -> &[Val] {
        &self.state
    }

    /// Attach a display name to a task.
    pub fn set_name(&mut self, task: usize, name: &str) -> Result<()> {
        self.check_task(task)?;
        self.task_names[task] = Some(name.to_string());
        Ok(())
    }

    /// The display name of a task, if set.
    pub fn name(&self, task: usize) -> Option<&str> {
        self.task_names.get(task).and_then(|n| n.as_deref())
    }

    /// Add the precedence constraint "`from` must complete before `to`
    /// starts", where `duration` is the processing time of `from`.
    ///
    /// Encoded as `A[to, from] ⊕= duration`, so repeated constraints on
    /// the same edge combine monotonically and the solved state satisfies
    /// `x[to] ≥ x[from] ⊗ duration`.
    pub fn add_constraint(&mut self, from: usize, to: usize, duration: Val) -> Result<()> {
        self.check_task(from)?;
        self.check_task(to)?;
        let current = self.system.get(to, from);
        self.system
            .set(to, from, self.semiring.add(current, duration));
        Ok(())
    }

    /// ⊕-merge an external ready time into a task's input and its seeded
    /// state.
    pub fn set_ready_time(&mut self, task: usize, ready_time: Val) -> Result<()> {
        self.check_task(task)?;
        self.input[task] = self.semiring.add(self.input[task], ready_time);
        self.state[task] = self.semiring.add(self.state[task], ready_time);
        Ok(())
    }

    /// Solve the schedule by fixed-point iteration of
    /// `x ← A ⊗ x ⊕ b ⊕ x`.
    ///
    /// The trailing `⊕ x` keeps the iteration monotone. Convergence is
    /// element-wise equality with the previous state; the return value is
    /// the number of iterations used. `max_iter` of 0 selects the default
    /// bound of `n_tasks`, which suffices for any acyclic precedence
    /// graph. A graph with a positive-mean cycle never converges: the
    /// bound is reached and returned without error, and
    /// [`cycle_time`](Scheduler::cycle_time) tells the caller why.
    pub fn solve(&mut self, max_iter: usize) -> Result<usize> {
        track(self.solve_inner(max_iter))
    }

    fn solve_inner(&mut self, max_iter: usize) -> Result<usize> {
        let n = self.n_tasks();
        let max_iter = if max_iter == 0 { n } else { max_iter };
        let s = self.semiring;

        let mut prev = vec![s.zero(); n];
        let mut tmp = vec![s.zero(); n];

        for iter in 0..max_iter {
            prev.copy_from_slice(&self.state);
            self.system.matvec_into(&prev, &mut tmp, s)?;

            for i in 0..n {
                let advanced = s.add(tmp[i], self.input[i]);
                self.state[i] = s.add(advanced, prev[i]);
            }

            if self.state == prev {
                return Ok(iter + 1);
            }
        }
        Ok(max_iter)
    }

    /// Completion time of a task, valid after [`solve`](Scheduler::solve).
    pub fn completion(&self, task: usize) -> Result<Val> {
        self.check_task(task)?;
        Ok(self.state[task])
    }

    /// Cycle time of the system: the tropical eigenvalue of A.
    ///
    /// [`NEG_INF`] for an acyclic precedence graph.
    pub fn cycle_time(&self) -> Result<Val> {
        spectral::eigenvalue(&self.system, self.semiring)
    }

    /// Steady-state throughput `1 / cycle_time`, or 0.0 when the cycle
    /// time is zero or infinite.
    pub fn throughput(&self) -> f64 {
        match self.cycle_time() {
            Ok(cycle) if cycle != NEG_INF && cycle != 0 => 1.0 / cycle as f64,
            _ => 0.0,
        }
    }

    /// Critical path through the solved schedule, in root-to-end order.
    ///
    /// Starts from the task with the greatest completion time and walks
    /// backwards: at each step the predecessor is the smallest index `j`
    /// with `x[current] = x[j] ⊗ A[current, j]`. The walk stops when no
    /// predecessor exists or `n_tasks` entries have been visited; the
    /// output is truncated to `max_len` entries from the root end.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `max_len` is 0.
    pub fn critical_path(&self, max_len: usize) -> Result<Vec<usize>> {
        track(self.critical_path_inner(max_len))
    }

    fn critical_path_inner(&self, max_len: usize) -> Result<Vec<usize>> {
        if max_len == 0 {
            return Err(Error::invalid_argument("max_len", "must be positive"));
        }
        let n = self.n_tasks();
        if n == 0 {
            return Ok(Vec::new());
        }
        let s = self.semiring;
        let zero = s.zero();

        let mut end_task = 0;
        let mut max_time = NEG_INF;
        for (i, &t) in self.state.iter().enumerate() {
            if t > max_time {
                max_time = t;
                end_task = i;
            }
        }

        // Backtrack end → root.
        let mut reversed = vec![end_task];
        let mut current = end_task;
        while reversed.len() < n {
            let mut predecessor = None;
            for j in 0..n {
                let edge = self.system.get(current, j);
                if edge != zero && s.mul(self.state[j], edge) == self.state[current] {
                    predecessor = Some(j);
                    break;
                }
            }
            match predecessor {
                Some(j) if j != current => {
                    reversed.push(j);
                    current = j;
                }
                _ => break,
            }
        }

        let keep = reversed.len().min(max_len);
        Ok(reversed.iter().rev().take(keep).copied().collect())
    }

    /// Export the system matrix as a GraphViz digraph, labelling nodes
    /// with their task names where set.
    pub fn export_dot<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        if self.task_names.iter().any(|n| n.is_some()) {
            let owned: Vec<String> = self
                .task_names
                .iter()
                .enumerate()
                .map(|(i, n)| n.clone().unwrap_or_else(|| i.to_string()))
                .collect();
            let refs: Vec<&str> = owned.iter().map(String::as_str).collect();
            crate::io::export_dot(&self.system, path, self.semiring, Some(&refs))
        } else {
            crate::io::export_dot(&self.system, path, self.semiring, None)
        }
    }

    fn check_task(&self, task: usize) -> Result<()> {
        if task >= self.n_tasks() {
            return Err(Error::IndexOutOfBounds {
                index: task,
                size: self.n_tasks(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Six-task boot sequence: 0 feeds 1, which fans out to 2, 3, 4, all
    /// joining at 5.
    fn boot_schedule() -> Scheduler {
        let mut sched = Scheduler::new(6, Semiring::MaxPlus).unwrap();
        sched.add_constraint(0, 1, 10).unwrap();
        sched.add_constraint(1, 2, 20).unwrap();
        sched.add_constraint(1, 3, 20).unwrap();
        sched.add_constraint(1, 4, 20).unwrap();
        sched.add_constraint(2, 5, 15).unwrap();
        sched.add_constraint(3, 5, 25).unwrap();
        sched.add_constraint(4, 5, 30).unwrap();
        sched.set_ready_time(0, 0).unwrap();
        sched
    }

    #[test]
    fn test_boot_schedule_completion_times() {
        let mut sched = boot_schedule();
        let iterations = sched.solve(0).unwrap();
        assert!(iterations <= 6);
        assert_eq!(sched.state(), &[0, 10, 30, 30, 30, 60]);
        assert_eq!(sched.completion(5).unwrap(), 60);
    }

    #[test]
    fn test_constraint_encoding() {
        let mut sched = Scheduler::new(3, Semiring::MaxPlus).unwrap();
        sched.add_constraint(0, 1, 4).unwrap();
        assert_eq!(sched.system().get(1, 0), 4);
        // Constraints on the same edge merge with ⊕.
        sched.add_constraint(0, 1, 7).unwrap();
        assert_eq!(sched.system().get(1, 0), 7);
        sched.add_constraint(0, 1, 5).unwrap();
        assert_eq!(sched.system().get(1, 0), 7);
    }

    #[test]
    fn test_ready_time_merges() {
        let mut sched = Scheduler::new(2, Semiring::MaxPlus).unwrap();
        sched.set_ready_time(0, 3).unwrap();
        sched.set_ready_time(0, 8).unwrap();
        sched.solve(0).unwrap();
        assert_eq!(sched.completion(0).unwrap(), 8);
    }

    #[test]
    fn test_critical_path() {
        let mut sched = boot_schedule();
        sched.solve(0).unwrap();
        // Only 4's constraint (30 + 30 = 60) is tight into 5.
        assert_eq!(sched.critical_path(6).unwrap(), vec![0, 1, 4, 5]);
        // Truncation keeps the root end.
        assert_eq!(sched.critical_path(2).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_cycle_time_acyclic() {
        let sched = boot_schedule();
        assert_eq!(sched.cycle_time().unwrap(), NEG_INF);
        assert_eq!(sched.throughput(), 0.0);
    }

    #[test]
    fn test_cycle_time_periodic() {
        // Two machines handing work back and forth: 3 + 5 per round.
        let mut sched = Scheduler::new(2, Semiring::MaxPlus).unwrap();
        sched.add_constraint(0, 1, 3).unwrap();
        sched.add_constraint(1, 0, 5).unwrap();
        assert_eq!(sched.cycle_time().unwrap(), 4);
        assert!((sched.throughput() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_positive_cycle_hits_iteration_bound() {
        let mut sched = Scheduler::new(2, Semiring::MaxPlus).unwrap();
        sched.add_constraint(0, 1, 3).unwrap();
        sched.add_constraint(1, 0, 5).unwrap();
        sched.set_ready_time(0, 0).unwrap();
        // Positive-mean cycle: never converges, bound returned as-is.
        assert_eq!(sched.solve(7).unwrap(), 7);
    }

    #[test]
    fn test_rejects_non_plus_semiring() {
        assert!(matches!(
            Scheduler::new(2, Semiring::Boolean),
            Err(Error::InvalidArgument { arg: "semiring", .. })
        ));
    }

    #[test]
    fn test_task_bounds() {
        let mut sched = Scheduler::new(2, Semiring::MaxPlus).unwrap();
        assert!(matches!(
            sched.add_constraint(0, 2, 1),
            Err(Error::IndexOutOfBounds { index: 2, size: 2 })
        ));
        assert!(matches!(
            sched.set_ready_time(9, 1),
            Err(Error::IndexOutOfBounds { index: 9, size: 2 })
        ));
    }

    #[test]
    fn test_task_names() {
        let mut sched = Scheduler::new(2, Semiring::MaxPlus).unwrap();
        sched.set_name(0, "kernel").unwrap();
        assert_eq!(sched.name(0), Some("kernel"));
        assert_eq!(sched.name(1), None);
    }

    #[test]
    fn test_min_plus_earliest_times() {
        let mut sched = Scheduler::new(2, Semiring::MinPlus).unwrap();
        sched.add_constraint(0, 1, 10).unwrap();
        sched.set_ready_time(0, 0).unwrap();
        sched.solve(0).unwrap();
        assert_eq!(sched.completion(0).unwrap(), 0);
        assert_eq!(sched.completion(1).unwrap(), 10);
    }
}
