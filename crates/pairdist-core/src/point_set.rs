use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::LoadError;

/// An immutable table of points, one row per point.
///
/// All rows share the same dimensionality. Values are stored row-major in a
/// single buffer.
///
/// # Example
///
/// ```
/// use pairdist_core::PointSet;
///
/// let points = PointSet::parse("0 0\n3 4\n".as_bytes()).unwrap();
/// assert_eq!(points.num_points(), 2);
/// assert_eq!(points.dimensions(), 2);
/// assert_eq!(points.point(1), &[3.0, 4.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    values: Vec<f32>,
    num_points: usize,
    dimensions: usize,
}

impl PointSet {
    /// Name of the data file expected inside a dataset directory.
    pub const FILE_NAME: &'static str = "nodes.txt";

    /// Path of the data file inside `dataset_dir`.
    #[must_use]
    pub fn data_file_path<P>(dataset_dir: P) -> PathBuf
    where
        P: AsRef<Path>,
    {
        dataset_dir.as_ref().join(Self::FILE_NAME)
    }

    /// Loads `nodes.txt` from a dataset directory.
    ///
    /// Fails with [`LoadError::MissingInputFile`] before reading anything if
    /// the directory has no data file.
    pub fn load_from_dir<P>(dataset_dir: P) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let dataset_dir = dataset_dir.as_ref();
        let path = Self::data_file_path(dataset_dir);
        if !path.is_file() {
            return Err(LoadError::MissingInputFile {
                dir: dataset_dir.to_owned(),
            });
        }
        let file = File::open(&path).map_err(|source| LoadError::Open { path, source })?;
        Self::parse(BufReader::new(file))
    }

    /// Parses a whitespace-delimited numeric matrix.
    ///
    /// Each non-blank line is one point; blank lines are skipped. Every row
    /// must have as many values as the first one, and every value must be
    /// finite (`nan` and `inf` are rejected).
    pub fn parse<R>(reader: R) -> Result<Self, LoadError>
    where
        R: BufRead,
    {
        let mut values = vec![];
        let mut num_points = 0;
        let mut dimensions = None;

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| LoadError::Read { source })?;
            let line_no = line_idx + 1;
            let row_start = values.len();
            for (column_idx, token) in line.split_whitespace().enumerate() {
                let value = token
                    .parse::<f32>()
                    .map_err(|source| LoadError::Parse {
                        line: line_no,
                        column: column_idx + 1,
                        token: token.to_owned(),
                        source,
                    })?;
                if !value.is_finite() {
                    return Err(LoadError::NonFinite {
                        line: line_no,
                        column: column_idx + 1,
                        token: token.to_owned(),
                    });
                }
                values.push(value);
            }
            let found = values.len() - row_start;
            if found == 0 {
                continue;
            }
            match dimensions {
                None => dimensions = Some(found),
                Some(expected) if expected != found => {
                    return Err(LoadError::InconsistentDimensions {
                        line: line_no,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            num_points += 1;
        }

        Ok(Self {
            values,
            num_points,
            dimensions: dimensions.unwrap_or(0),
        })
    }

    /// Builds a point set from in-memory rows.
    ///
    /// Row numbers in [`LoadError::InconsistentDimensions`] and
    /// [`LoadError::NonFinite`] are 1-based row indices.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f32]>,
    {
        let mut values = vec![];
        let mut num_points = 0;
        let mut dimensions = None;
        for (idx, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let expected = *dimensions.get_or_insert(row.len());
            if row.len() != expected {
                return Err(LoadError::InconsistentDimensions {
                    line: idx + 1,
                    expected,
                    found: row.len(),
                });
            }
            if let Some(column) = row.iter().position(|v| !v.is_finite()) {
                return Err(LoadError::NonFinite {
                    line: idx + 1,
                    column: column + 1,
                    token: row[column].to_string(),
                });
            }
            values.extend_from_slice(row);
            num_points += 1;
        }
        Ok(Self {
            values,
            num_points,
            dimensions: dimensions.unwrap_or(0),
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(values: Vec<f32>, num_points: usize, dimensions: usize) -> Self {
        debug_assert_eq!(values.len(), num_points * dimensions);
        Self {
            values,
            num_points,
            dimensions,
        }
    }

    /// Number of points (rows).
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Dimensionality of every point (columns).
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// `(num_points, dimensions)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.num_points, self.dimensions)
    }

    /// Returns the coordinates of point `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_points()`.
    #[must_use]
    pub fn point(&self, index: usize) -> &[f32] {
        assert!(
            index < self.num_points,
            "point index {index} out of range for {} points",
            self.num_points
        );
        let start = index * self.dimensions;
        &self.values[start..start + self.dimensions]
    }

    /// Iterates over all points in file order.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        (0..self.num_points).map(|i| self.point(i))
    }
}
