//! Candidate-producing strategies.
//!
//! Each [`Strategy`] is backed by an operator variant that holds only the
//! collaborators it needs:
//!
//! - [`Creator`]: default alphabet sampler or a custom create hook
//! - [`Mutator`]: default single-gene replacement or a custom mutate hook
//! - crossover: an optional combinator that may report "indistinguishable"
//!
//! [`Operators`] bundles them with the fitness evaluator and dispatches on
//! the strategy tag.

use super::pool::ParentPool;
use super::types::{Candidate, Strategy};
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use tracing::trace;

/// Fitness evaluator: genes to fitness.
pub type FitnessFn<'a, G, F> = Box<dyn Fn(&[G]) -> F + 'a>;

/// Custom create hook producing a full gene sequence.
pub type CreateFn<'a, G> = Box<dyn FnMut(&mut dyn RngCore) -> Vec<G> + 'a>;

/// Custom mutate hook perturbing a copy of the parent's genes in place.
pub type MutateFn<'a, G> = Box<dyn FnMut(&mut Vec<G>, &mut dyn RngCore) + 'a>;

/// Crossover combinator: `(parent, donor)` to child genes, or `None` when
/// the two are indistinguishable.
pub type CrossoverFn<'a, G> =
    Box<dyn FnMut(&[G], &[G], &mut dyn RngCore) -> Option<Vec<G>> + 'a>;

/// Builds whole gene sequences for the Create strategy.
pub enum Creator<'a, G> {
    /// Samples the alphabet without immediate repetition up to `length`.
    Sample { alphabet: Vec<G>, length: usize },
    Custom(CreateFn<'a, G>),
}

/// Perturbs gene sequences for the Mutate strategy.
pub enum Mutator<'a, G> {
    /// Replaces one random gene with a different alphabet symbol.
    Replace { alphabet: Vec<G> },
    Custom(MutateFn<'a, G>),
}

impl<G: Clone + PartialEq> Creator<'_, G> {
    fn genes(&mut self, rng: &mut dyn RngCore) -> Vec<G> {
        match self {
            Creator::Sample { alphabet, length } => sample_genes(alphabet, *length, rng),
            Creator::Custom(create) => create(rng),
        }
    }
}

impl<G: Clone + PartialEq> Mutator<'_, G> {
    fn apply(&mut self, genes: &mut Vec<G>, rng: &mut dyn RngCore) {
        match self {
            Mutator::Replace { alphabet } => replace_gene(genes, alphabet, rng),
            Mutator::Custom(mutate) => mutate(genes, rng),
        }
    }
}

/// Draws `length` genes in chunks of distinct symbols.
///
/// Within a chunk no symbol repeats; a sequence longer than the alphabet
/// starts a fresh chunk once the alphabet is used up.
pub(crate) fn sample_genes<G: Clone>(
    alphabet: &[G],
    length: usize,
    rng: &mut dyn RngCore,
) -> Vec<G> {
    let mut genes = Vec::with_capacity(length);
    while genes.len() < length {
        let chunk = (length - genes.len()).min(alphabet.len());
        if chunk == 0 {
            break;
        }
        genes.extend(alphabet.choose_multiple(rng, chunk).cloned());
    }
    genes
}

/// Replaces one random gene with a symbol different from it.
///
/// Two distinct symbols are drawn; the second is used when the first equals
/// the current gene.
pub(crate) fn replace_gene<G: Clone + PartialEq>(
    genes: &mut [G],
    alphabet: &[G],
    rng: &mut dyn RngCore,
) {
    if genes.is_empty() {
        return;
    }
    let index = rng.random_range(0..genes.len());
    let mut drawn = alphabet.choose_multiple(rng, 2);
    let (Some(first), alternate) = (drawn.next(), drawn.next()) else {
        return;
    };
    genes[index] = match alternate {
        Some(alternate) if *first == genes[index] => alternate.clone(),
        _ => first.clone(),
    };
}

/// The strategy set of one engine.
pub struct Operators<'a, G, F> {
    pub(crate) fitness: FitnessFn<'a, G, F>,
    pub(crate) creator: Creator<'a, G>,
    pub(crate) mutator: Mutator<'a, G>,
    pub(crate) crossover: Option<CrossoverFn<'a, G>>,
}

impl<G: Clone + PartialEq, F> Operators<'_, G, F> {
    pub fn has_crossover(&self) -> bool {
        self.crossover.is_some()
    }

    /// Evaluates genes and wraps them as a fresh candidate.
    pub(crate) fn evaluate(&self, genes: Vec<G>, strategy: Strategy) -> Candidate<G, F> {
        let fitness = (self.fitness)(&genes);
        Candidate::new(genes, fitness, strategy)
    }

    pub(crate) fn create(&mut self, rng: &mut dyn RngCore) -> Candidate<G, F> {
        let genes = self.creator.genes(rng);
        self.evaluate(genes, Strategy::Create)
    }

    pub(crate) fn mutate(
        &mut self,
        parent: &Candidate<G, F>,
        rng: &mut dyn RngCore,
    ) -> Candidate<G, F> {
        let mut genes = parent.genes().to_vec();
        self.mutator.apply(&mut genes, rng);
        self.evaluate(genes, Strategy::Mutate)
    }

    /// Combines the parent at `parent_index` with a random donor.
    ///
    /// An indistinguishable pair replaces the donor slot with a fresh
    /// candidate and falls back to mutating the parent.
    pub(crate) fn crossover(
        &mut self,
        parent_index: usize,
        pool: &mut ParentPool<G, F>,
        rng: &mut dyn RngCore,
    ) -> Candidate<G, F> {
        let donor_index = pool.donor_index(parent_index, rng);
        let (Some(combine), Some(donor_index)) = (self.crossover.as_mut(), donor_index) else {
            return self.mutate(pool.slot(parent_index), rng);
        };

        match combine(
            pool.slot(parent_index).genes(),
            pool.slot(donor_index).genes(),
            &mut *rng,
        ) {
            Some(genes) => self.evaluate(genes, Strategy::Crossover),
            None => {
                trace!(parent_index, donor_index, "indistinguishable donor replaced");
                let fresh = self.create(rng);
                pool.replace(donor_index, fresh);
                self.mutate(pool.slot(parent_index), rng)
            }
        }
    }

    /// Produces a child for the parent at `parent_index` with `strategy`.
    pub(crate) fn produce(
        &mut self,
        strategy: Strategy,
        parent_index: usize,
        pool: &mut ParentPool<G, F>,
        rng: &mut dyn RngCore,
    ) -> Candidate<G, F> {
        match strategy {
            Strategy::Create => self.create(rng),
            Strategy::Mutate => self.mutate(pool.slot(parent_index), rng),
            Strategy::Crossover => self.crossover(parent_index, pool, rng),
        }
    }
}
