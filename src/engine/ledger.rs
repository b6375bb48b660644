//! Historical fitness ledger and annealing acceptance.
//!
//! The ledger records every new global best in order of discovery, which is
//! also ascending order under [`Fitness::is_better_than`]. When a lineage has
//! exhausted its age budget, a worse child is accepted with probability
//! `exp(-proximity)`, where proximity measures how far below the historical
//! bests the child falls:
//!
//! ```text
//! i         = first ledger position whose entry is not worse than the child
//! proximity = (len - i) / len        // 0 = near the best, 1 = below all
//! ```

use super::types::Fitness;
use rand::Rng;

/// Append-only, ascending record of best-ever fitness values.
#[derive(Debug, Clone)]
pub struct FitnessLedger<F> {
    entries: Vec<F>,
}

impl<F: Fitness> FitnessLedger<F> {
    pub(crate) fn new(first: F) -> Self {
        Self {
            entries: vec![first],
        }
    }

    /// Appends a new global best. Callers only push values better than the
    /// last entry, which keeps the ledger sorted.
    pub(crate) fn push(&mut self, fitness: F) {
        debug_assert!(self
            .entries
            .last()
            .is_none_or(|last| fitness.is_better_than(last)));
        self.entries.push(fitness);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[F] {
        &self.entries
    }

    /// Binary search for the leftmost insertion position of `fitness`,
    /// using the shared fitness order.
    pub fn insertion_index(&self, fitness: &F) -> usize {
        self.entries
            .partition_point(|entry| fitness.is_better_than(entry))
    }

    /// Distance of `fitness` below the historical bests, in `[0, 1]`.
    pub fn proximity(&self, fitness: &F) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let len = self.entries.len();
        (len - self.insertion_index(fitness)) as f64 / len as f64
    }
}

/// Outcome of the annealing rule for a worse child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Annealing {
    /// Age budget not spent: keep the parent.
    Keep,
    /// Install the worse child.
    Accept,
    /// Restart the lineage from the global best.
    Restart,
}

/// Decides the fate of a worse child once its parent has aged to `age`.
pub(crate) fn anneal<F: Fitness, R: Rng + ?Sized>(
    age: usize,
    max_age: usize,
    ledger: &FitnessLedger<F>,
    child: &F,
    rng: &mut R,
) -> Annealing {
    if age < max_age {
        return Annealing::Keep;
    }
    let proximity = ledger.proximity(child);
    if rng.random_range(0.0..1.0) < (-proximity).exp() {
        Annealing::Accept
    } else {
        Annealing::Restart
    }
}
