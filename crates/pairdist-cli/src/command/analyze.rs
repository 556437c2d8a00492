use std::{
    num::{NonZeroU32, NonZeroUsize},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use pairdist_core::{PointSet, sampler::PairSampler};
use pairdist_plot::PlotStyle;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    summary::DistanceSummary,
    util::{Output, Progress},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Directory containing nodes.txt
    #[arg(required = true)]
    pub(super) dataset_dir: Option<PathBuf>,
    /// Number of random pairs to sample
    #[arg(short, long, default_value_t = 100_000)]
    pub(super) samples: usize,
    /// Path of the output image
    #[arg(short, long, default_value = "distance_distribution.png")]
    pub(super) output: PathBuf,
    /// Number of histogram bins
    #[arg(long, default_value = "50")]
    pub(super) bins: NonZeroUsize,
    /// Image resolution in dots per inch
    #[arg(long, default_value = "300")]
    pub(super) dpi: NonZeroU32,
    /// Seed for pair selection (random when omitted)
    #[arg(long)]
    pub(super) seed: Option<u64>,
    /// Also write a JSON summary to this path (`-` for stdout)
    #[arg(long)]
    pub(super) summary: Option<PathBuf>,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let AnalyzeArg {
        dataset_dir,
        samples,
        output,
        bins,
        dpi,
        seed,
        summary,
    } = arg;
    let dataset_dir = dataset_dir
        .as_deref()
        .context("A dataset directory is required")?;

    println!(
        "Loading data from: {}",
        PointSet::data_file_path(dataset_dir).display()
    );
    let points = PointSet::load_from_dir(dataset_dir)?;
    println!(
        "Successfully loaded {} points with {} dimensions.",
        points.num_points(),
        points.dimensions()
    );

    let sampler = PairSampler::new(&points)?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg32::seed_from_u64(seed);
    println!("Calculating distances for {samples} random pairs (seed: {seed})...");
    let mut progress = Progress::new("Computing distances");
    let sample = sampler.sample_distances(*samples, &mut rng, |done, total| {
        progress.update(done, total);
    });
    if sample.discarded_self_pairs > 0 {
        eprintln!(
            "Discarded {} self-pairs; {} distances computed.",
            sample.discarded_self_pairs,
            sample.realized()
        );
    }

    println!("Generating plot...");
    let style = PlotStyle {
        bins: bins.get(),
        dpi: dpi.get(),
        ..PlotStyle::default()
    };
    let dataset = dataset_label(dataset_dir);
    let stats =
        pairdist_plot::render_distance_distribution(&sample.distances, output, &dataset, &style)
            .with_context(|| format!("Failed to render plot to {}", output.display()))?;
    println!("Plot saved successfully to '{}'", output.display());

    if let Some(summary_path) = summary {
        let summary = DistanceSummary::new(dataset, &points, &sample, seed, &stats);
        if summary_path == Path::new("-") {
            Output::save_json(&summary, None)?;
        } else {
            Output::save_json(&summary, Some(summary_path.clone()))?;
            println!("Summary saved to '{}'", summary_path.display());
        }
    }

    Ok(())
}

/// Name shown in the plot title: the last component of the dataset path.
fn dataset_label(dataset_dir: &Path) -> String {
    let name = match dataset_dir.file_name() {
        Some(name) => Some(name.to_owned()),
        None => dataset_dir
            .canonicalize()
            .ok()
            .and_then(|path| path.file_name().map(ToOwned::to_owned)),
    };
    name.map_or_else(
        || dataset_dir.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
