//! Engine setup.
//!
//! [`EngineBuilder`] collects the problem callbacks and checks that they
//! describe a usable strategy set. Every setup error is reported by
//! [`EngineBuilder::build`], before any random number is drawn, so seeded
//! runs stay reproducible.

use super::config::EngineConfig;
use super::operators::{
    CreateFn, Creator, CrossoverFn, FitnessFn, MutateFn, Mutator, Operators,
};
use super::runner::{Search, SearchResult};
use super::types::{Candidate, Fitness};
use crate::error::{EvolveError, EvolveResult};
use rand::RngCore;

/// Observer called with every emitted candidate.
pub type DisplayFn<'a, G, F> = Box<dyn FnMut(&Candidate<G, F>) + 'a>;

/// A validated search setup.
///
/// Each call to [`search`](Engine::search) or [`run`](Engine::run) starts
/// an independent invocation with its own pool, ledger, weights and RNG.
///
/// # Examples
///
/// ```
/// use u_evolve::engine::{Engine, EngineConfig, Termination};
///
/// let target: Vec<char> = "hello".chars().collect();
/// let mut engine = Engine::builder(
///     |genes: &[char]| genes.iter().zip(&target).filter(|(a, b)| a == b).count(),
///     target.len(),
/// )
/// .alphabet(" abcdefghijklmnopqrstuvwxyz".chars())
/// .target_length(target.len())
/// .config(EngineConfig::default().with_seed(7))
/// .build()
/// .unwrap();
///
/// let result = engine.run();
/// assert_eq!(result.termination, Termination::Optimal);
/// assert_eq!(result.best.genes(), target.as_slice());
/// ```
pub struct Engine<'a, G, F> {
    pub(crate) operators: Operators<'a, G, F>,
    pub(crate) optimal: F,
    pub(crate) config: EngineConfig,
    pub(crate) display: Option<DisplayFn<'a, G, F>>,
}

impl<'a, G: Clone + PartialEq, F: Fitness> Engine<'a, G, F> {
    /// Starts a setup from the fitness evaluator and the optimum to reach.
    pub fn builder(
        fitness: impl Fn(&[G]) -> F + 'a,
        optimal: F,
    ) -> EngineBuilder<'a, G, F> {
        EngineBuilder::new(Box::new(fitness), optimal)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn optimal(&self) -> &F {
        &self.optimal
    }

    pub fn has_crossover(&self) -> bool {
        self.operators.has_crossover()
    }

    /// Starts a lazy search. Nothing runs until the first `next`/`step`.
    pub fn search(&mut self) -> Search<'_, 'a, G, F> {
        Search::new(self)
    }

    /// Runs a search to termination.
    ///
    /// Without a time limit this only returns once the optimum is reached.
    pub fn run(&mut self) -> SearchResult<G, F> {
        self.search().finish()
    }
}

/// Collects callbacks and configuration for an [`Engine`].
pub struct EngineBuilder<'a, G, F> {
    fitness: FitnessFn<'a, G, F>,
    optimal: F,
    alphabet: Option<Vec<G>>,
    target_length: Option<usize>,
    create: Option<CreateFn<'a, G>>,
    mutate: Option<MutateFn<'a, G>>,
    crossover: Option<CrossoverFn<'a, G>>,
    display: Option<DisplayFn<'a, G, F>>,
    config: EngineConfig,
}

impl<'a, G: Clone + PartialEq, F: Fitness> EngineBuilder<'a, G, F> {
    fn new(fitness: FitnessFn<'a, G, F>, optimal: F) -> Self {
        Self {
            fitness,
            optimal,
            alphabet: None,
            target_length: None,
            create: None,
            mutate: None,
            crossover: None,
            display: None,
            config: EngineConfig::default(),
        }
    }

    /// Symbol set for the default create and mutate operators.
    ///
    /// Repeated symbols are ignored.
    pub fn alphabet(mut self, symbols: impl IntoIterator<Item = G>) -> Self {
        self.alphabet = Some(symbols.into_iter().collect());
        self
    }

    /// Gene count for the default create operator.
    pub fn target_length(mut self, length: usize) -> Self {
        self.target_length = Some(length);
        self
    }

    /// Replaces the default create operator.
    pub fn create(mut self, create: impl FnMut(&mut dyn RngCore) -> Vec<G> + 'a) -> Self {
        self.create = Some(Box::new(create));
        self
    }

    /// Replaces the default mutate operator. The hook edits a copy of the
    /// parent's genes.
    pub fn mutate(mut self, mutate: impl FnMut(&mut Vec<G>, &mut dyn RngCore) + 'a) -> Self {
        self.mutate = Some(Box::new(mutate));
        self
    }

    /// Enables the Crossover strategy.
    ///
    /// The combinator receives `(parent, donor)` genes and returns the
    /// child's genes, or `None` when the two are indistinguishable.
    pub fn crossover(
        mut self,
        crossover: impl FnMut(&[G], &[G], &mut dyn RngCore) -> Option<Vec<G>> + 'a,
    ) -> Self {
        self.crossover = Some(Box::new(crossover));
        self
    }

    /// Observer for every emitted event: each improvement, and the best
    /// candidate when the time limit ends the search.
    pub fn display(mut self, display: impl FnMut(&Candidate<G, F>) + 'a) -> Self {
        self.display = Some(Box::new(display));
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates the setup and builds the engine.
    ///
    /// # Errors
    ///
    /// - [`EvolveError::Configuration`] for missing or contradictory setup
    /// - [`EvolveError::ExhaustedAlphabet`] when the default operators need
    ///   more distinct symbols than the alphabet has
    pub fn build(self) -> EvolveResult<Engine<'a, G, F>> {
        self.config.validate()?;

        if self.crossover.is_some() && self.config.pool_size < 2 {
            return Err(EvolveError::config(
                "crossover requires pool_size of at least 2",
            ));
        }

        let alphabet = self.alphabet.map(distinct);

        let creator = match (self.create, self.target_length) {
            (Some(_), Some(_)) => {
                return Err(EvolveError::config(
                    "target_length cannot be combined with a custom create hook",
                ));
            }
            (Some(create), None) => Creator::Custom(create),
            (None, length) => {
                let Some(alphabet) = alphabet.clone() else {
                    return Err(EvolveError::config(
                        "an alphabet or a custom create hook is required",
                    ));
                };
                let Some(length) = length else {
                    return Err(EvolveError::config(
                        "the default create operator requires a target_length",
                    ));
                };
                if alphabet.is_empty() && length > 0 {
                    return Err(EvolveError::ExhaustedAlphabet {
                        required: 1,
                        available: 0,
                    });
                }
                Creator::Sample { alphabet, length }
            }
        };

        let mutator = match self.mutate {
            Some(mutate) => Mutator::Custom(mutate),
            None => {
                let Some(alphabet) = alphabet else {
                    return Err(EvolveError::config(
                        "the default mutate operator requires an alphabet",
                    ));
                };
                if alphabet.len() < 2 {
                    return Err(EvolveError::ExhaustedAlphabet {
                        required: 2,
                        available: alphabet.len(),
                    });
                }
                Mutator::Replace { alphabet }
            }
        };

        Ok(Engine {
            operators: Operators {
                fitness: self.fitness,
                creator,
                mutator,
                crossover: self.crossover,
            },
            optimal: self.optimal,
            config: self.config,
            display: self.display,
        })
    }
}

/// Drops repeated symbols, keeping first occurrences in order.
fn distinct<G: PartialEq>(symbols: Vec<G>) -> Vec<G> {
    let mut unique: Vec<G> = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        if !unique.contains(&symbol) {
            unique.push(symbol);
        }
    }
    unique
}
