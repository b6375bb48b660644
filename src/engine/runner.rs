//! The improvement loop.
//!
//! [`Search`] is a pull-based state machine: every [`step`](Search::step)
//! performs one unit of work (one warm-up creation or one main-loop
//! iteration) and reports whether it produced an event. Its [`Iterator`]
//! implementation skips quiet steps and yields only events:
//!
//! ```text
//! seed ─▶ warm-up (pool_size - 1 creates) ─▶ loop {
//!     timeout?  ─▶ TimedOut(best), finish
//!     parent  = pool[cursor--]
//!     child   = strategy(parent)
//!     worse   ─▶ reject | age + anneal
//!     tie     ─▶ replace, age + 1
//!     better  ─▶ replace, age 0; new global best ─▶ Improved(child)
//!     optimal ─▶ finish
//! }
//! ```

use super::builder::Engine;
use super::ledger::{anneal, Annealing, FitnessLedger};
use super::pool::ParentPool;
use super::reinforcement::StrategyWeights;
use super::types::{is_tie, Candidate, Fitness, Strategy};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Something the caller should see.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<G, F> {
    /// A new global best.
    Improved(Candidate<G, F>),
    /// The time bound elapsed; carries the best candidate so far.
    TimedOut(Candidate<G, F>),
}

impl<G, F> Event<G, F> {
    pub fn candidate(&self) -> &Candidate<G, F> {
        match self {
            Event::Improved(c) | Event::TimedOut(c) => c,
        }
    }

    pub fn into_candidate(self) -> Candidate<G, F> {
        match self {
            Event::Improved(c) | Event::TimedOut(c) => c,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Event::TimedOut(_))
    }
}

/// Outcome of a single [`Search::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step<G, F> {
    Emitted(Event<G, F>),
    /// Work was done but nothing visible changed.
    Quiet,
    /// The search has terminated; further steps do nothing.
    Finished,
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// An emitted candidate reached the optimum.
    Optimal,
    /// The time bound elapsed first.
    TimedOut,
}

/// Counters collected during a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Main-loop iterations (warm-up excluded).
    pub iterations: usize,
    /// Improvement events emitted, including the seed.
    pub improvements: usize,
    /// Children worse than their parent.
    pub worse_children: usize,
    /// Children tying their parent.
    pub ties: usize,
    /// Worse children that reached the annealing test.
    pub annealing_trials: usize,
    /// Annealing tests that installed the worse child.
    pub annealing_accepts: usize,
    /// Lineages restarted from the global best.
    pub restarts: usize,
}

/// Final state of a finished search.
#[derive(Debug, Clone)]
pub struct SearchResult<G, F> {
    /// Best candidate found: the optimal one, or the best at timeout.
    pub best: Candidate<G, F>,

    pub termination: Termination,

    pub stats: SearchStats,

    /// Every global best fitness, in discovery order.
    pub fitness_history: Vec<F>,

    /// Strategy weights when the search stopped.
    pub strategy_weights: Vec<(Strategy, u64)>,

    pub elapsed: Duration,
}

impl<G, F> SearchResult<G, F> {
    pub fn is_optimal(&self) -> bool {
        self.termination == Termination::Optimal
    }
}

/// Pool, ledger and best of a seeded search.
struct Lineages<G, F> {
    pool: ParentPool<G, F>,
    ledger: FitnessLedger<F>,
    best: Candidate<G, F>,
    termination: Option<Termination>,
}

/// One invocation of the engine.
///
/// Created by [`Engine::search`]. Owns its RNG, pool, ledger and strategy
/// weights; borrows the engine's callbacks.
pub struct Search<'e, 'a, G, F> {
    engine: &'e mut Engine<'a, G, F>,
    rng: StdRng,
    started: Instant,
    lineages: Option<Lineages<G, F>>,
    weights: StrategyWeights,
    stats: SearchStats,
}

impl<'e, 'a, G: Clone + PartialEq, F: Fitness> Search<'e, 'a, G, F> {
    pub(crate) fn new(engine: &'e mut Engine<'a, G, F>) -> Self {
        let seed = engine.config.seed.unwrap_or_else(rand::random);
        debug!(
            seed,
            pool_size = engine.config.pool_size,
            max_age = ?engine.config.max_age,
            crossover = engine.has_crossover(),
            "search started"
        );
        let weights = StrategyWeights::seeded(engine.has_crossover());
        Self {
            engine,
            rng: StdRng::seed_from_u64(seed),
            started: Instant::now(),
            lineages: None,
            weights,
            stats: SearchStats::default(),
        }
    }

    /// Performs one warm-up creation or one main-loop iteration.
    pub fn step(&mut self) -> Step<G, F> {
        let Some(mut lineages) = self.lineages.take() else {
            return self.seed();
        };
        let step = if lineages.termination.is_some() {
            Step::Finished
        } else if lineages.pool.len() < self.engine.config.pool_size {
            self.warm_up(&mut lineages)
        } else {
            self.iterate(&mut lineages)
        };
        self.lineages = Some(lineages);
        step
    }

    /// Runs to termination and returns the final state.
    pub fn finish(mut self) -> SearchResult<G, F> {
        loop {
            match self.lineages.take() {
                Some(Lineages {
                    termination: Some(termination),
                    ledger,
                    best,
                    ..
                }) => {
                    return SearchResult {
                        best,
                        termination,
                        stats: self.stats,
                        fitness_history: ledger.entries().to_vec(),
                        strategy_weights: self.weights.to_vec(),
                        elapsed: self.started.elapsed(),
                    };
                }
                lineages => {
                    self.lineages = lineages;
                    self.step();
                }
            }
        }
    }

    /// Current global best, once seeded.
    pub fn best(&self) -> Option<&Candidate<G, F>> {
        self.lineages.as_ref().map(|l| &l.best)
    }

    pub fn pool(&self) -> Option<&ParentPool<G, F>> {
        self.lineages.as_ref().map(|l| &l.pool)
    }

    pub fn ledger(&self) -> Option<&FitnessLedger<F>> {
        self.lineages.as_ref().map(|l| &l.ledger)
    }

    pub fn weights(&self) -> &StrategyWeights {
        &self.weights
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// `Some` once the search has stopped.
    pub fn termination(&self) -> Option<Termination> {
        self.lineages.as_ref().and_then(|l| l.termination)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn timed_out(&self) -> bool {
        self.engine
            .config
            .time_limit
            .is_some_and(|limit| self.started.elapsed() >= limit)
    }

    fn seed(&mut self) -> Step<G, F> {
        let first = self.engine.operators.create(&mut self.rng);
        let mut lineages = Lineages {
            pool: ParentPool::seeded(first.clone(), self.engine.config.pool_size),
            ledger: FitnessLedger::new(first.fitness().clone()),
            best: first.clone(),
            termination: None,
        };
        self.weights.reinforce(Strategy::Create);
        let step = if self.timed_out() {
            self.time_out(&mut lineages)
        } else {
            self.emit(&mut lineages, first)
        };
        self.lineages = Some(lineages);
        step
    }

    fn warm_up(&mut self, lineages: &mut Lineages<G, F>) -> Step<G, F> {
        let candidate = self.engine.operators.create(&mut self.rng);
        let improved = candidate.fitness().is_better_than(lineages.best.fitness());
        if improved {
            lineages.ledger.push(candidate.fitness().clone());
            lineages.best = candidate.clone();
            self.weights.reinforce(Strategy::Create);
        }
        lineages.pool.push(candidate);

        if self.timed_out() {
            return self.time_out(lineages);
        }
        if improved {
            let best = lineages.best.clone();
            return self.emit(lineages, best);
        }
        Step::Quiet
    }

    fn iterate(&mut self, lineages: &mut Lineages<G, F>) -> Step<G, F> {
        if self.timed_out() {
            return self.time_out(lineages);
        }
        self.stats.iterations += 1;

        let index = lineages.pool.advance();
        let strategy = if self.engine.operators.has_crossover() {
            self.weights.select(&mut self.rng)
        } else {
            Strategy::Mutate
        };
        let child = self
            .engine
            .operators
            .produce(strategy, index, &mut lineages.pool, &mut self.rng);
        let parent = lineages.pool.slot(index);

        if parent.fitness().is_better_than(child.fitness()) {
            self.stats.worse_children += 1;
            self.decline(lineages, index, child);
            return Step::Quiet;
        }

        self.weights.reinforce(child.strategy());

        if is_tie(child.fitness(), parent.fitness()) {
            self.stats.ties += 1;
            let age = parent.age() + 1;
            lineages.pool.replace(index, child.with_age(age));
            return Step::Quiet;
        }

        if !child.fitness().is_better_than(lineages.best.fitness()) {
            lineages.pool.replace(index, child);
            return Step::Quiet;
        }

        lineages.ledger.push(child.fitness().clone());
        lineages.best = child.clone();
        lineages.pool.replace(index, child.clone());
        self.emit(lineages, child)
    }

    /// Handles a child worse than its parent.
    fn decline(
        &mut self,
        lineages: &mut Lineages<G, F>,
        index: usize,
        child: Candidate<G, F>,
    ) {
        let Some(max_age) = self.engine.config.max_age else {
            return;
        };
        let age = lineages.pool.slot_mut(index).grow_older();
        let verdict = anneal(
            age,
            max_age,
            &lineages.ledger,
            child.fitness(),
            &mut self.rng,
        );
        trace!(index, age, ?verdict, "worse child");
        match verdict {
            Annealing::Keep => {}
            Annealing::Accept => {
                self.stats.annealing_trials += 1;
                self.stats.annealing_accepts += 1;
                lineages.pool.replace(index, child);
            }
            Annealing::Restart => {
                self.stats.annealing_trials += 1;
                self.stats.restarts += 1;
                lineages.pool.replace(index, lineages.best.clone().with_age(0));
            }
        }
    }

    fn emit(
        &mut self,
        lineages: &mut Lineages<G, F>,
        candidate: Candidate<G, F>,
    ) -> Step<G, F> {
        self.stats.improvements += 1;
        debug!(
            iteration = self.stats.iterations,
            strategy = candidate.strategy().name(),
            fitness = ?candidate.fitness(),
            "improvement"
        );
        if let Some(display) = self.engine.display.as_mut() {
            display(&candidate);
        }
        if !self.engine.optimal.is_better_than(candidate.fitness()) {
            info!(
                iterations = self.stats.iterations,
                elapsed_ms = self.started.elapsed().as_millis() as u64,
                "optimum reached"
            );
            lineages.termination = Some(Termination::Optimal);
        }
        Step::Emitted(Event::Improved(candidate))
    }

    fn time_out(&mut self, lineages: &mut Lineages<G, F>) -> Step<G, F> {
        info!(
            iterations = self.stats.iterations,
            best = ?lineages.best.fitness(),
            "time limit reached"
        );
        lineages.termination = Some(Termination::TimedOut);
        let best = lineages.best.clone();
        if let Some(display) = self.engine.display.as_mut() {
            display(&best);
        }
        Step::Emitted(Event::TimedOut(best))
    }
}

impl<G: Clone + PartialEq, F: Fitness> Iterator for Search<'_, '_, G, F> {
    type Item = Event<G, F>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.step() {
                Step::Emitted(event) => return Some(event),
                Step::Quiet => continue,
                Step::Finished => return None,
            }
        }
    }
}
