/// Squared Euclidean distance: `Σ (a[i] - b[i])²`.
///
/// # Panics
///
/// Panics in debug builds if the slices differ in length.
#[must_use]
pub fn euclidean_squared(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "euclidean_squared: dimension mismatch");
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum()
}

/// Euclidean (L2) distance between two points of equal dimensionality.
///
/// ```
/// use pairdist_core::distance::euclidean;
///
/// assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
/// ```
#[must_use]
pub fn euclidean(a: &[f32], b: &[f32]) -> f32 {
    euclidean_squared(a, b).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_identical_points() {
        assert_eq!(euclidean(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_known_3d() {
        let expected = 27.0_f32.sqrt();
        assert!((euclidean(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]) - expected).abs() < EPS);
    }

    #[test]
    fn test_symmetry() {
        let a = [0.5, -1.5, 2.0];
        let b = [3.0, 4.0, -1.0];
        assert_eq!(euclidean(&a, &b), euclidean(&b, &a));
    }

    #[test]
    fn test_zero_dimensional_points() {
        assert_eq!(euclidean(&[], &[]), 0.0);
    }
}
