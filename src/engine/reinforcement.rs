//! Adaptive strategy weights.
//!
//! Each strategy keeps an integer weight; a draw picks a strategy with
//! probability proportional to its weight (roulette wheel). Weights only
//! grow: a strategy whose child replaces its slot with an improving or
//! tying outcome gains one unit, biasing later draws toward it.

use super::types::Strategy;
use rand::Rng;

/// Per-strategy success counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyWeights {
    weights: [u64; 3],
}

impl StrategyWeights {
    /// Weights for a run: Mutate always, Crossover only when a crossover
    /// combinator is configured. Create starts at zero and is reinforced by
    /// the search for the seed and each improving warm-up candidate.
    pub fn seeded(crossover: bool) -> Self {
        let mut weights = [0u64; 3];
        weights[Strategy::Mutate.index()] = 1;
        if crossover {
            weights[Strategy::Crossover.index()] = 1;
        }
        Self { weights }
    }

    pub fn weight(&self, strategy: Strategy) -> u64 {
        self.weights[strategy.index()]
    }

    pub fn total(&self) -> u64 {
        self.weights.iter().sum()
    }

    /// Records one success for `strategy`.
    pub fn reinforce(&mut self, strategy: Strategy) {
        let w = &mut self.weights[strategy.index()];
        *w = w.saturating_add(1);
    }

    /// Roulette-wheel draw over the current weights.
    ///
    /// Falls back to [`Strategy::Mutate`] if every weight is zero.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Strategy {
        let total = self.total();
        if total == 0 {
            return Strategy::Mutate;
        }

        let mut roll = rng.random_range(0..total);
        for strategy in Strategy::ALL {
            let w = self.weight(strategy);
            if roll < w {
                return strategy;
            }
            roll -= w;
        }
        Strategy::Mutate
    }

    /// Snapshot as `(strategy, weight)` pairs.
    pub fn to_vec(&self) -> Vec<(Strategy, u64)> {
        Strategy::ALL.iter().map(|&s| (s, self.weight(s))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Strategy;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeded_without_crossover() {
        let w = StrategyWeights::seeded(false);
        assert_eq!(w.weight(Strategy::Create), 0);
        assert_eq!(w.weight(Strategy::Mutate), 1);
        assert_eq!(w.weight(Strategy::Crossover), 0);
    }

    #[test]
    fn test_seeded_with_crossover() {
        let w = StrategyWeights::seeded(true);
        assert_eq!(w.weight(Strategy::Crossover), 1);
        assert_eq!(w.total(), 2);
    }

    #[test]
    fn test_reinforce_biases_selection() {
        let mut w = StrategyWeights::seeded(true);
        for _ in 0..98 {
            w.reinforce(Strategy::Crossover);
        }
        // Crossover 99, Mutate 1
        let mut rng = StdRng::seed_from_u64(42);
        let crossovers = (0..1000)
            .filter(|_| w.select(&mut rng) == Strategy::Crossover)
            .count();
        assert!(
            crossovers > 950,
            "expected crossover to dominate, got {crossovers}/1000"
        );
    }

    proptest! {
        #[test]
        fn prop_zero_weight_never_selected(
            mutate_hits in 0u64..20,
            crossover_hits in 0u64..20,
            seed in any::<u64>(),
        ) {
            let mut w = StrategyWeights::seeded(false);
            for _ in 0..mutate_hits {
                w.reinforce(Strategy::Mutate);
            }
            for _ in 0..crossover_hits {
                w.reinforce(Strategy::Crossover);
            }
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..50 {
                let s = w.select(&mut rng);
                prop_assert!(w.weight(s) > 0);
            }
        }
    }
}
