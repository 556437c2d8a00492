//! Synthetic dataset generation.
//!
//! Writes a `nodes.txt` filled with random points so the analysis can be tried
//! on data with a known distance structure.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use rand::Rng;
use rand_distr::{Distribution as _, StandardNormal};

use crate::{GenerateError, PointSet};

/// Upper bound (exclusive) of uniformly drawn coordinates.
pub const UNIFORM_UPPER: f32 = 100.0;

/// Distribution every coordinate is drawn from.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display,
)]
pub enum CoordinateDistribution {
    /// Uniform over `[0, 100)`.
    #[default]
    Uniform,
    /// Standard normal, `N(0, 1)`.
    Normal,
}

impl CoordinateDistribution {
    fn sample<R>(self, rng: &mut R) -> f32
    where
        R: Rng,
    {
        match self {
            Self::Uniform => rng.random_range(0.0..UNIFORM_UPPER),
            Self::Normal => StandardNormal.sample(rng),
        }
    }
}

/// Shape and distribution of a generated dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticDataset {
    pub num_points: usize,
    pub dimensions: usize,
    pub distribution: CoordinateDistribution,
}

impl SyntheticDataset {
    /// Generates the points in memory, drawing values in the same order as
    /// [`Self::write_to`].
    #[cfg(test)]
    pub(crate) fn generate<R>(&self, rng: &mut R) -> PointSet
    where
        R: Rng,
    {
        let values = (0..self.num_points * self.dimensions)
            .map(|_| self.distribution.sample(rng))
            .collect();
        PointSet::from_parts(values, self.num_points, self.dimensions)
    }

    /// Writes the points as whitespace-separated text, one point per line.
    pub fn write_to<W, R>(&self, writer: &mut W, rng: &mut R) -> io::Result<()>
    where
        W: io::Write,
        R: Rng,
    {
        for _ in 0..self.num_points {
            for dim in 0..self.dimensions {
                if dim > 0 {
                    write!(writer, " ")?;
                }
                write!(writer, "{}", self.distribution.sample(rng))?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Writes `nodes.txt` into `dataset_dir`, creating the directory if needed.
    ///
    /// Refuses to replace an existing data file unless `overwrite` is set.
    pub fn write_to_dir<P, R>(
        &self,
        dataset_dir: P,
        overwrite: bool,
        rng: &mut R,
    ) -> Result<PathBuf, GenerateError>
    where
        P: AsRef<Path>,
        R: Rng,
    {
        let dataset_dir = dataset_dir.as_ref();
        let path = PointSet::data_file_path(dataset_dir);
        if path.exists() && !overwrite {
            return Err(GenerateError::AlreadyExists { path });
        }
        fs::create_dir_all(dataset_dir).map_err(|source| GenerateError::Io {
            path: dataset_dir.to_owned(),
            source,
        })?;

        let write = |path: &Path, rng: &mut R| -> io::Result<()> {
            let mut writer = BufWriter::new(File::create(path)?);
            self.write_to(&mut writer, rng)?;
            writer.flush()
        };
        write(&path, rng).map_err(|source| GenerateError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
