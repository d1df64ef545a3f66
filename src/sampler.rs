//! Random selection helpers used for question order and choice order.
//!
//! Both take the RNG as a parameter: the browser passes an entropy-seeded
//! `StdRng`, tests pass a seeded one.

use log::debug;
use rand::Rng;
use rand::seq::{SliceRandom, index};

/// Uniform in-place permutation (Fisher–Yates).
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// `count` distinct indices in `0..population`, in random order. Asking for
/// more than the population truncates to the whole population.
pub fn pick_distinct_indices<R: Rng + ?Sized>(
    population: usize,
    count: usize,
    rng: &mut R,
) -> Vec<usize> {
    if count > population {
        debug!("requested {count} distinct indices from {population}, truncating");
    }
    let count = count.min(population);
    index::sample(rng, population, count).into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn shuffle_preserves_multiset() {
        let mut rng = StdRng::seed_from_u64(7);
        let original = vec![1, 1, 2, 3, 5, 8, 13, 21, 21, 34];
        let mut items = original.clone();
        shuffle(&mut items, &mut rng);
        let mut a = items.clone();
        let mut b = original.clone();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_handles_tiny_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());
        let mut one = vec!["only"];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec!["only"]);
    }

    #[test]
    fn shuffle_permutations_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<[u8; 3], usize> = HashMap::new();
        for _ in 0..6000 {
            let mut items = [0u8, 1, 2];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        // 1000 expected per order
        for (perm, n) in &counts {
            assert!((850..=1150).contains(n), "{perm:?} drawn {n} times");
        }
    }

    #[test]
    fn distinct_indices_are_distinct_and_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let picked = pick_distinct_indices(10, 4, &mut rng);
            assert_eq!(picked.len(), 4);
            let unique: HashSet<_> = picked.iter().copied().collect();
            assert_eq!(unique.len(), 4);
            assert!(picked.iter().all(|&i| i < 10));
        }
    }

    #[test]
    fn distinct_indices_truncate_to_population() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut picked = pick_distinct_indices(3, 8, &mut rng);
        picked.sort_unstable();
        assert_eq!(picked, vec![0, 1, 2]);
        assert!(pick_distinct_indices(0, 2, &mut rng).is_empty());
    }
}
