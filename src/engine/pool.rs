//! Rotating pool of parent lineages.

use super::types::Candidate;
use rand::Rng;

/// Fixed set of lineages plus a cursor that visits them round-robin.
///
/// Every slot is occupied once the pool is seeded. The cursor starts at
/// slot 0 and moves downward, wrapping from 0 to the last slot, so each
/// lineage acts as parent once per `len()` iterations.
#[derive(Debug, Clone)]
pub struct ParentPool<G, F> {
    slots: Vec<Candidate<G, F>>,
    cursor: usize,
}

impl<G, F> ParentPool<G, F> {
    /// Starts a pool from its first candidate.
    pub(crate) fn seeded(first: Candidate<G, F>, capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.max(1));
        slots.push(first);
        Self { slots, cursor: 0 }
    }

    pub(crate) fn push(&mut self, candidate: Candidate<G, F>) {
        self.slots.push(candidate);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`: a pool is never empty once seeded.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index the next call to `advance` will return.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn get(&self, index: usize) -> Option<&Candidate<G, F>> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate<G, F>> {
        self.slots.iter()
    }

    /// Returns the acting slot and moves the cursor one lineage down.
    pub(crate) fn advance(&mut self) -> usize {
        let index = self.cursor;
        self.cursor = if index == 0 {
            self.slots.len() - 1
        } else {
            index - 1
        };
        index
    }

    pub(crate) fn slot(&self, index: usize) -> &Candidate<G, F> {
        &self.slots[index]
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut Candidate<G, F> {
        &mut self.slots[index]
    }

    pub(crate) fn replace(&mut self, index: usize, candidate: Candidate<G, F>) {
        self.slots[index] = candidate;
    }

    /// Draws a donor slot uniformly among all slots except `parent`.
    ///
    /// Returns `None` for a single-slot pool.
    pub(crate) fn donor_index<R: Rng + ?Sized>(&self, parent: usize, rng: &mut R) -> Option<usize> {
        if self.slots.len() < 2 {
            return None;
        }
        let drawn = rng.random_range(0..self.slots.len() - 1);
        Some(if drawn >= parent { drawn + 1 } else { drawn })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Strategy;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool_of(n: usize) -> ParentPool<u8, usize> {
        let mut pool = ParentPool::seeded(Candidate::new(vec![0], 0, Strategy::Create), n);
        for i in 1..n {
            pool.push(Candidate::new(vec![i as u8], i, Strategy::Create));
        }
        pool
    }

    #[test]
    fn test_rotation_order() {
        let mut pool = pool_of(4);
        let order: Vec<usize> = (0..8).map(|_| pool.advance()).collect();
        assert_eq!(order, vec![0, 3, 2, 1, 0, 3, 2, 1]);
    }

    #[test]
    fn test_single_slot_rotation() {
        let mut pool = pool_of(1);
        assert_eq!(pool.advance(), 0);
        assert_eq!(pool.advance(), 0);
        assert_eq!(pool.cursor(), 0);
    }

    #[test]
    fn test_single_slot_has_no_donor() {
        let pool = pool_of(1);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pool.donor_index(0, &mut rng), None);
    }

    #[test]
    fn test_replace_and_age() {
        let mut pool = pool_of(2);
        pool.replace(1, Candidate::new(vec![9], 9, Strategy::Mutate));
        assert_eq!(*pool.slot(1).fitness(), 9);
        assert_eq!(pool.slot_mut(1).grow_older(), 1);
        assert_eq!(pool.get(1).map(|c| c.age()), Some(1));
    }

    proptest! {
        #[test]
        fn prop_rotation_fairness(n in 1usize..12, k in 1usize..6) {
            let mut pool = pool_of(n);
            let mut hits = vec![0usize; n];
            for _ in 0..k * n {
                let i = pool.advance();
                prop_assert!(i < n);
                hits[i] += 1;
            }
            for &h in &hits {
                prop_assert!(h + 1 >= k);
            }
        }

        #[test]
        fn prop_donor_never_parent(n in 2usize..10, seed in any::<u64>()) {
            let pool = pool_of(n);
            let mut rng = StdRng::seed_from_u64(seed);
            for parent in 0..n {
                let donor = pool.donor_index(parent, &mut rng);
                prop_assert!(matches!(donor, Some(d) if d != parent && d < n));
            }
        }
    }
}
