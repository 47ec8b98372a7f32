//! Cooperative time limits for root solving and simplification.

use std::time::{Duration, Instant};
use tracing::warn;

/// Signals that a [`Budget`] ran out. Converts into the timeout variant of
/// [`SolveError`](crate::error::SolveError) and [`SimplifyError`](crate::error::SimplifyError).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout;

/// A deadline shared by every step of one computation.
///
/// Long loops call [`Budget::check`] periodically; there is no preemption, so a single step that
/// never returns is not interrupted.
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    deadline: Option<Instant>,
}

impl Budget {
    /// Creates a budget that runs out `limit` from now.
    pub fn new(limit: Duration) -> Self {
        Self { deadline: Instant::now().checked_add(limit) }
    }

    /// Creates a budget that never runs out.
    pub fn unlimited() -> Self {
        Self { deadline: None }
    }

    /// Returns true if the deadline has passed.
    pub fn exhausted(&self) -> bool {
        self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }

    /// Returns [`Timeout`] if the deadline has passed. `op` names the step being checked, for the
    /// log.
    pub fn check(&self, op: &'static str) -> Result<(), Timeout> {
        if self.exhausted() {
            warn!(target: "solve", op, "time budget exhausted");
            Err(Timeout)
        } else {
            Ok(())
        }
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::unlimited()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_never_runs_out() {
        assert_eq!(Budget::unlimited().check("test"), Ok(()));
    }

    #[test]
    fn zero_budget_runs_out() {
        let budget = Budget::new(Duration::ZERO);
        assert!(budget.exhausted());
        assert_eq!(budget.check("test"), Err(Timeout));
    }
}
