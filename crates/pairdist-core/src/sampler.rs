//! Random pair sampling over a [`PointSet`].
//!
//! Two index sequences of length N are drawn independently and uniformly over
//! `[0, num_points)` and zipped into pairs. Pairs whose indices coincide are
//! discarded without being redrawn, so the realized sample is usually a little
//! smaller than the request (about `N / num_points` pairs are lost). The
//! number of discarded pairs is reported alongside the distances.
//!
//! # Example
//!
//! ```
//! use pairdist_core::{PointSet, sampler::PairSampler};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let points = PointSet::from_rows([[0.0, 0.0], [3.0, 4.0]]).unwrap();
//! let sampler = PairSampler::new(&points).unwrap();
//! let mut rng = Pcg32::seed_from_u64(7);
//! let sample = sampler.sample_distances(10, &mut rng, |_, _| {});
//! assert!(sample.distances.iter().all(|&d| d == 5.0));
//! assert_eq!(sample.distances.len() + sample.discarded_self_pairs, 10);
//! ```

use rand::Rng;

use crate::{PointSet, SampleError, distance};

/// A sampled pair of point indices with the distance between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairDistance {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
}

/// Distances computed for one sampling run.
#[derive(Debug, Clone, Default)]
pub struct DistanceSample {
    /// One distance per surviving pair, in draw order.
    pub distances: Vec<f32>,
    /// Number of pairs that were requested.
    pub requested: usize,
    /// Number of drawn pairs dropped because both indices were equal.
    pub discarded_self_pairs: usize,
}

impl DistanceSample {
    /// Number of distances actually computed.
    #[must_use]
    pub fn realized(&self) -> usize {
        self.distances.len()
    }
}

/// Draws random point pairs and measures their Euclidean distance.
#[derive(Debug, Clone, Copy)]
pub struct PairSampler<'a> {
    points: &'a PointSet,
}

impl<'a> PairSampler<'a> {
    /// Creates a sampler over `points`.
    ///
    /// Fails with [`SampleError::InsufficientData`] when fewer than two points
    /// are available.
    pub fn new(points: &'a PointSet) -> Result<Self, SampleError> {
        let num_points = points.num_points();
        if num_points < 2 {
            return Err(SampleError::InsufficientData { num_points });
        }
        Ok(Self { points })
    }

    /// Draws `count` index pairs, self-pairs included.
    ///
    /// The first index of every pair is drawn before any second index, so a
    /// seeded generator yields the same pairs regardless of later filtering.
    pub fn draw_pairs<R>(&self, count: usize, rng: &mut R) -> Vec<(usize, usize)>
    where
        R: Rng,
    {
        let num_points = self.points.num_points();
        let first = (0..count)
            .map(|_| rng.random_range(0..num_points))
            .collect::<Vec<_>>();
        let second = (0..count).map(|_| rng.random_range(0..num_points));
        first.into_iter().zip(second).collect()
    }

    /// Samples `count` pairs and returns the surviving pairs with their distances.
    ///
    /// `on_progress(done, total)` is called once per surviving pair, where
    /// `total` is the number of surviving pairs.
    pub fn sample_pairs<R, F>(
        &self,
        count: usize,
        rng: &mut R,
        mut on_progress: F,
    ) -> Vec<PairDistance>
    where
        R: Rng,
        F: FnMut(usize, usize),
    {
        let pairs = self
            .draw_pairs(count, rng)
            .into_iter()
            .filter(|(a, b)| a != b)
            .collect::<Vec<_>>();
        let total = pairs.len();
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (a, b))| {
                let distance = distance::euclidean(self.points.point(a), self.points.point(b));
                on_progress(i + 1, total);
                PairDistance { a, b, distance }
            })
            .collect()
    }

    /// Samples `count` pairs and returns only the distances.
    pub fn sample_distances<R, F>(&self, count: usize, rng: &mut R, on_progress: F) -> DistanceSample
    where
        R: Rng,
        F: FnMut(usize, usize),
    {
        let pairs = self.sample_pairs(count, rng, on_progress);
        DistanceSample {
            discarded_self_pairs: count - pairs.len(),
            distances: pairs.into_iter().map(|pair| pair.distance).collect(),
            requested: count,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_distr::{Distribution as _, StandardNormal};
    use rand_pcg::Pcg32;

    use super::*;

    fn random_points(num_points: usize, dimensions: usize, seed: u64) -> PointSet {
        let mut rng = Pcg32::seed_from_u64(seed);
        let rows = (0..num_points)
            .map(|_| {
                (0..dimensions)
                    .map(|_| StandardNormal.sample(&mut rng))
                    .collect::<Vec<f32>>()
            })
            .collect::<Vec<_>>();
        PointSet::from_rows(rows).unwrap()
    }

    #[test]
    fn test_insufficient_data() {
        let empty = PointSet::from_rows(Vec::<Vec<f32>>::new()).unwrap();
        let err = PairSampler::new(&empty).unwrap_err();
        assert!(matches!(err, SampleError::InsufficientData { num_points: 0 }));

        let single = PointSet::from_rows([[1.0, 2.0]]).unwrap();
        let err = PairSampler::new(&single).unwrap_err();
        assert!(err.is_insufficient_data());
        assert!(err.to_string().contains("fewer than 2 points"));
    }

    #[test]
    fn test_two_points_always_five() {
        let points = PointSet::from_rows([[0.0, 0.0], [3.0, 4.0]]).unwrap();
        let sampler = PairSampler::new(&points).unwrap();
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let sample = sampler.sample_distances(10, &mut rng, |_, _| {});
            assert!(sample.realized() <= 10);
            assert!(sample.distances.iter().all(|&d| d == 5.0));
        }
    }

    #[test]
    fn test_zero_samples() {
        let points = random_points(5, 3, 1);
        let sampler = PairSampler::new(&points).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut calls = 0;
        let sample = sampler.sample_distances(0, &mut rng, |_, _| calls += 1);
        assert!(sample.distances.is_empty());
        assert_eq!(sample.requested, 0);
        assert_eq!(sample.discarded_self_pairs, 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_pairs_match_recomputed_distances() {
        let points = random_points(40, 16, 2);
        let sampler = PairSampler::new(&points).unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        let pairs = sampler.sample_pairs(500, &mut rng, |_, _| {});
        assert!(pairs.len() <= 500);
        assert!(!pairs.is_empty());
        for pair in &pairs {
            assert_ne!(pair.a, pair.b);
            assert!(pair.a < 40 && pair.b < 40);
            assert!(pair.distance >= 0.0);
            let expected = distance::euclidean(points.point(pair.a), points.point(pair.b));
            assert_eq!(pair.distance, expected);
        }
    }

    #[test]
    fn test_discarded_pairs_account_for_request() {
        let points = random_points(3, 2, 4);
        let sampler = PairSampler::new(&points).unwrap();
        let mut rng = Pcg32::seed_from_u64(5);
        let sample = sampler.sample_distances(3000, &mut rng, |_, _| {});
        assert_eq!(sample.requested, 3000);
        assert_eq!(sample.realized() + sample.discarded_self_pairs, 3000);
        // With 3 points about a third of the draws are self-pairs
        assert!(sample.discarded_self_pairs > 700 && sample.discarded_self_pairs < 1300);
    }

    #[test]
    fn test_draw_order_and_filtering_agree() {
        let points = random_points(4, 2, 6);
        let sampler = PairSampler::new(&points).unwrap();
        let drawn = sampler.draw_pairs(200, &mut Pcg32::seed_from_u64(9));
        let sampled = sampler.sample_pairs(200, &mut Pcg32::seed_from_u64(9), |_, _| {});
        let expected = drawn
            .into_iter()
            .filter(|(a, b)| a != b)
            .collect::<Vec<_>>();
        let actual = sampled.iter().map(|p| (p.a, p.b)).collect::<Vec<_>>();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let points = random_points(25, 8, 7);
        let sampler = PairSampler::new(&points).unwrap();
        let a = sampler.sample_distances(300, &mut Pcg32::seed_from_u64(11), |_, _| {});
        let b = sampler.sample_distances(300, &mut Pcg32::seed_from_u64(11), |_, _| {});
        assert_eq!(a.distances, b.distances);
    }

    #[test]
    fn test_progress_reports_every_pair() {
        let points = random_points(10, 2, 8);
        let sampler = PairSampler::new(&points).unwrap();
        let mut last = (0, 0);
        let mut calls = 0;
        let sample = sampler.sample_distances(100, &mut Pcg32::seed_from_u64(1), |done, total| {
            calls += 1;
            last = (done, total);
        });
        assert_eq!(calls, sample.realized());
        assert_eq!(last, (sample.realized(), sample.realized()));
    }
}
