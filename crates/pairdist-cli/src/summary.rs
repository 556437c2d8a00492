use chrono::{DateTime, Utc};
use pairdist_core::{PointSet, sampler::DistanceSample};
use pairdist_stats::{
    descriptive::DescriptiveStats,
    percentiles::{self, PercentilePoint},
};
use serde::Serialize;

/// Percentiles reported next to the descriptive statistics.
const SUMMARY_PERCENTILES: [f32; 4] = [5.0, 25.0, 75.0, 95.0];

/// Machine-readable record of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct DistanceSummary {
    pub dataset: String,
    pub points: usize,
    pub dimensions: usize,
    pub requested_samples: usize,
    pub realized_samples: usize,
    pub discarded_self_pairs: usize,
    pub seed: u64,
    pub generated_at: DateTime<Utc>,
    pub stats: SummaryStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f32,
    pub median: f32,
    pub std_dev: f32,
    pub min: f32,
    pub max: f32,
    pub percentiles: Vec<PercentilePoint>,
}

impl DistanceSummary {
    pub fn new(
        dataset: String,
        points: &PointSet,
        sample: &DistanceSample,
        seed: u64,
        stats: &DescriptiveStats,
    ) -> Self {
        let mut sorted = sample.distances.clone();
        sorted.sort_by(f32::total_cmp);
        let percentiles = percentiles::percentile_points(&sorted, &SUMMARY_PERCENTILES);
        Self {
            dataset,
            points: points.num_points(),
            dimensions: points.dimensions(),
            requested_samples: sample.requested,
            realized_samples: sample.realized(),
            discarded_self_pairs: sample.discarded_self_pairs,
            seed,
            generated_at: Utc::now(),
            stats: SummaryStats {
                count: stats.count,
                mean: stats.mean,
                median: stats.median,
                std_dev: stats.std_dev,
                min: stats.min,
                max: stats.max,
                percentiles,
            },
        }
    }
}
