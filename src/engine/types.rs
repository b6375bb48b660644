//! Core value types shared by the engine.
//!
//! [`Fitness`] is the contract between the generic engine and
//! problem-specific code: the engine never looks at genes, it only asks
//! whether one fitness is better than another.

use std::cmp::Reverse;
use std::fmt::Debug;

/// A strictly ordered quality measure.
///
/// `is_better_than` must be a strict weak order (irreflexive, transitive)
/// and stay consistent for a whole run. Two values where neither is better
/// than the other form a tie.
///
/// Primitive numbers are implemented with "greater is better". Wrap a
/// fitness in [`Reverse`] for minimization.
///
/// # Composite fitness
///
/// ```
/// use u_evolve::engine::Fitness;
///
/// // Fewer duplicates first, then a smaller difference.
/// #[derive(Debug, Clone, PartialEq)]
/// struct CardFitness {
///     duplicates: usize,
///     difference: i64,
/// }
///
/// impl Fitness for CardFitness {
///     fn is_better_than(&self, other: &Self) -> bool {
///         if self.duplicates != other.duplicates {
///             return self.duplicates < other.duplicates;
///         }
///         self.difference < other.difference
///     }
/// }
///
/// let a = CardFitness { duplicates: 0, difference: 12 };
/// let b = CardFitness { duplicates: 1, difference: 0 };
/// assert!(a.is_better_than(&b));
/// ```
pub trait Fitness: Clone + Debug {
    /// Returns `true` when `self` is strictly better than `other`.
    fn is_better_than(&self, other: &Self) -> bool;
}

macro_rules! greater_is_better {
    ($($t:ty),*) => {
        $(
            impl Fitness for $t {
                fn is_better_than(&self, other: &Self) -> bool {
                    self > other
                }
            }
        )*
    };
}

greater_is_better!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: Fitness> Fitness for Reverse<T> {
    fn is_better_than(&self, other: &Self) -> bool {
        other.0.is_better_than(&self.0)
    }
}

/// Returns `true` when neither fitness is better than the other.
pub(crate) fn is_tie<F: Fitness>(a: &F, b: &F) -> bool {
    !a.is_better_than(b) && !b.is_better_than(a)
}

/// The way a candidate was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Built from scratch by the create operator.
    Create,
    /// A perturbed copy of its parent.
    Mutate,
    /// A combination of its parent and a donor lineage.
    Crossover,
}

impl Strategy {
    /// All strategies, in weight-table order.
    pub const ALL: [Strategy; 3] = [Strategy::Create, Strategy::Mutate, Strategy::Crossover];

    pub(crate) fn index(self) -> usize {
        match self {
            Strategy::Create => 0,
            Strategy::Mutate => 1,
            Strategy::Crossover => 2,
        }
    }

    /// Lower-case name, for logs and display hooks.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Create => "create",
            Strategy::Mutate => "mutate",
            Strategy::Crossover => "crossover",
        }
    }
}

/// One proposed solution.
///
/// Genes and fitness are fixed at construction; lineages evolve by
/// replacing candidates, never by editing them. Age counts how many
/// non-improving children the candidate's slot has seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<G, F> {
    genes: Vec<G>,
    fitness: F,
    age: usize,
    strategy: Strategy,
}

impl<G, F> Candidate<G, F> {
    /// Wraps already-evaluated genes.
    pub fn new(genes: Vec<G>, fitness: F, strategy: Strategy) -> Self {
        Self {
            genes,
            fitness,
            age: 0,
            strategy,
        }
    }

    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    pub fn fitness(&self) -> &F {
        &self.fitness
    }

    pub fn age(&self) -> usize {
        self.age
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Consumes the candidate, returning its genes.
    pub fn into_genes(self) -> Vec<G> {
        self.genes
    }

    pub(crate) fn with_age(mut self, age: usize) -> Self {
        self.age = age;
        self
    }

    pub(crate) fn grow_older(&mut self) -> usize {
        self.age += 1;
        self.age
    }
}
