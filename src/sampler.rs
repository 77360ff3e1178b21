//! Sampler
//!
//! Strategies for partitioning rows into a training set and a held out set
//! before fitting.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub enum SampleMethod {
    None,
    Shuffle,
}

// A sampler partitions the data prior to fitting a tree.
pub trait Sampler {
    /// Sample the data, returning a tuple, where the first item is the samples
    /// chosen for training, and the second are the samples held out.
    fn sample(&mut self, rng: &mut StdRng, index: &[usize]) -> (Vec<usize>, Vec<usize>);
}

/// Shuffles the rows and holds out `ceil(test_size * n)` of them.
pub struct ShuffleSampler {
    test_size: f64,
}

impl ShuffleSampler {
    pub fn new(test_size: f64) -> Self {
        ShuffleSampler { test_size }
    }

    /// Number of held out rows for `n` rows, at least one row is always kept for training.
    pub fn n_test(&self, n: usize) -> usize {
        let n_test = (self.test_size * n as f64).ceil() as usize;
        n_test.min(n.saturating_sub(1))
    }
}

impl Sampler for ShuffleSampler {
    fn sample(&mut self, rng: &mut StdRng, index: &[usize]) -> (Vec<usize>, Vec<usize>) {
        let n_test = self.n_test(index.len());
        let mut shuffled = index.to_vec();
        shuffled.shuffle(rng);
        let chosen = shuffled.split_off(n_test);
        (chosen, shuffled)
    }
}

/// Keeps every row for training.
pub struct NoSampler;

impl Sampler for NoSampler {
    fn sample(&mut self, _rng: &mut StdRng, index: &[usize]) -> (Vec<usize>, Vec<usize>) {
        (index.to_vec(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_shuffle_sampler() {
        let mut rng = StdRng::seed_from_u64(42);
        let index = vec![0, 1, 2, 3, 4, 5];
        let mut sampler = ShuffleSampler::new(0.2);
        let (chosen, excluded) = sampler.sample(&mut rng, &index);

        assert_eq!(excluded.len(), 2);
        assert_eq!(chosen.len(), 4);

        let mut all: Vec<usize> = chosen.iter().chain(excluded.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, index);
    }

    #[test]
    fn test_shuffle_sampler_is_seeded() {
        let index: Vec<usize> = (0..20).collect();
        let mut sampler = ShuffleSampler::new(0.25);
        let first = sampler.sample(&mut StdRng::seed_from_u64(7), &index);
        let second = sampler.sample(&mut StdRng::seed_from_u64(7), &index);
        assert_eq!(first, second);
    }

    #[test]
    fn test_n_test_bounds() {
        assert_eq!(ShuffleSampler::new(0.0).n_test(6), 0);
        assert_eq!(ShuffleSampler::new(0.2).n_test(6), 2);
        assert_eq!(ShuffleSampler::new(1.0).n_test(6), 5);
        assert_eq!(ShuffleSampler::new(0.5).n_test(0), 0);
    }

    #[test]
    fn test_no_sampler() {
        let mut rng = StdRng::seed_from_u64(0);
        let (chosen, excluded) = NoSampler.sample(&mut rng, &[3, 1, 2]);
        assert_eq!(chosen, vec![3, 1, 2]);
        assert!(excluded.is_empty());
    }
}
