//! Steady-state evolutionary search.
//!
//! A fixed pool of lineages is visited round-robin. Each visit produces one
//! child through a strategy drawn from reinforced weights (create, mutate,
//! or crossover with a donor lineage). Improving or tying children replace
//! their parent; worse children are handled by an age budget and an
//! annealing rule that compares them against the history of global bests.
//!
//! The search is a lazy iterator of [`Event`]s: each strictly better
//! candidate is yielded once, and a time limit ends the run with a final
//! [`Event::TimedOut`] carrying the best found so far.
//!
//! # References
//!
//! - Whitley (1989), "The GENITOR Algorithm and Selection Pressure"
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Ropke & Pisinger (2006), "An Adaptive Large Neighborhood Search Heuristic"

mod builder;
mod config;
mod ledger;
mod operators;
mod pool;
mod reinforcement;
mod runner;
mod types;

pub use builder::{DisplayFn, Engine, EngineBuilder};
pub use config::EngineConfig;
pub use ledger::FitnessLedger;
pub use operators::{CreateFn, CrossoverFn, FitnessFn, MutateFn};
pub use pool::ParentPool;
pub use reinforcement::StrategyWeights;
pub use runner::{Event, Search, SearchResult, SearchStats, Step, Termination};
pub use types::{Candidate, Fitness, Strategy};
