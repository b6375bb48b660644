//! Domain-agnostic steady-state evolutionary search.
//!
//! The caller supplies a fitness evaluator, the optimum to reach, and
//! either an alphabet of gene symbols or custom operators. The engine
//! does the rest:
//!
//! - **Engine**: a lazy stream of strictly improving candidates produced
//!   by round-robin lineages, reinforced strategy selection, age-bounded
//!   stagnation and annealing restarts.
//! - **Benchmark**: repeated timing of a whole search with periodic mean
//!   and standard deviation reports.
//!
//! # Architecture
//!
//! The crate contains no problem-specific concepts. Genes are any
//! `Clone + PartialEq` type and fitness is any type implementing
//! [`engine::Fitness`], so password guessing, knapsack packing, tour
//! ordering and so on are all defined by consumers.
//!
//! # Examples
//!
//! ```
//! use u_evolve::engine::{Engine, EngineConfig};
//!
//! let mut engine = Engine::builder(
//!     |genes: &[u8]| genes.iter().filter(|&&g| g == 1).count(),
//!     16,
//! )
//! .alphabet([0u8, 1])
//! .target_length(16)
//! .config(EngineConfig::default().with_seed(3))
//! .build()
//! .unwrap();
//!
//! let result = engine.run();
//! assert!(result.is_optimal());
//! assert_eq!(*result.best.fitness(), 16);
//! ```

pub mod benchmark;
pub mod engine;
pub mod error;

pub use error::{EvolveError, EvolveResult};
