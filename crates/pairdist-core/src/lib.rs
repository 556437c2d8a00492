//! Loading point datasets and sampling pairwise Euclidean distances.
//!
//! # Overview
//!
//! 1. **Load** ([`PointSet::load_from_dir`]): read `<dataset_dir>/nodes.txt`, a
//!    whitespace-delimited matrix with one point per line
//! 2. **Sample** ([`sampler::PairSampler`]): draw random index pairs, drop
//!    self-pairs, compute the L2 distance of each remaining pair
//! 3. **Generate** ([`synthetic::SyntheticDataset`]): write random datasets for
//!    trying the analysis out
//!
//! # Example
//!
//! ```
//! use pairdist_core::{PointSet, sampler::PairSampler};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let points = PointSet::parse("0 0\n3 4\n6 8\n".as_bytes())?;
//! let sampler = PairSampler::new(&points)?;
//! let sample = sampler.sample_distances(1000, &mut Pcg32::seed_from_u64(42), |_, _| {});
//! assert!(sample.distances.iter().all(|&d| d == 5.0 || d == 10.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{io, num::ParseFloatError, path::PathBuf};

pub use self::point_set::PointSet;

pub mod distance;
pub mod point_set;
pub mod sampler;
pub mod synthetic;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum LoadError {
    #[display("nodes.txt not found in '{}'", dir.display())]
    MissingInputFile { dir: PathBuf },
    #[display("failed to open {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to read dataset")]
    Read { source: io::Error },
    #[display("invalid number {token:?} at line {line}, column {column}")]
    Parse {
        line: usize,
        column: usize,
        token: String,
        source: ParseFloatError,
    },
    #[display("non-finite value {token:?} at line {line}, column {column}")]
    NonFinite {
        line: usize,
        column: usize,
        token: String,
    },
    #[display("line {line} has {found} values, expected {expected}")]
    InconsistentDimensions {
        line: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum SampleError {
    #[display("cannot sample pairs from a dataset with fewer than 2 points (found {num_points})")]
    InsufficientData { num_points: usize },
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum GenerateError {
    #[display("{} already exists", path.display())]
    AlreadyExists { path: PathBuf },
    #[display("failed to write {}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{
        fs,
        path::{Path, PathBuf},
        sync::atomic::{AtomicUsize, Ordering},
    };

    static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

    /// A scratch directory removed on drop.
    pub(crate) struct TempDir(PathBuf);

    impl TempDir {
        pub(crate) fn new(label: &str) -> Self {
            let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
            let path = std::env::temp_dir().join(format!(
                "pairdist-core-{label}-{}-{id}",
                std::process::id()
            ));
            let _ = fs::remove_dir_all(&path);
            fs::create_dir_all(&path).unwrap();
            Self(path)
        }

        pub(crate) fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }
}
