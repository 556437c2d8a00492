use std::path::PathBuf;

use pairdist_core::synthetic::{CoordinateDistribution, SyntheticDataset};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Directory to write nodes.txt into
    pub(super) dataset_dir: PathBuf,
    /// Number of points to generate
    #[arg(long, default_value_t = 10_000)]
    pub(super) points: usize,
    /// Number of coordinates per point
    #[arg(long, default_value_t = 128)]
    pub(super) dims: usize,
    /// Distribution of each coordinate (uniform or normal)
    #[arg(long, default_value = "uniform")]
    pub(super) distribution: CoordinateDistribution,
    /// Seed for the generator (random when omitted)
    #[arg(long)]
    pub(super) seed: Option<u64>,
    /// Replace an existing nodes.txt
    #[arg(long)]
    pub(super) force: bool,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        dataset_dir,
        points,
        dims,
        distribution,
        seed,
        force,
    } = arg;
    let dataset = SyntheticDataset {
        num_points: *points,
        dimensions: *dims,
        distribution: *distribution,
    };
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg32::seed_from_u64(seed);

    println!(
        "Generating {points} points with {dims} dimensions ({distribution}, seed: {seed})..."
    );
    let path = dataset.write_to_dir(dataset_dir, *force, &mut rng)?;
    println!("Dataset written to '{}'", path.display());
    Ok(())
}
