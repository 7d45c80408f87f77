use rand::Rng;

/// A random element of `sequence`, where each element is weighted by the
/// corresponding entry in `weights`.
///
/// `sequence` must be non-empty and the same length as `weights`. If every
/// weight is zero, the last element is returned.
pub(crate) fn weighted_choice<'a, T, R: Rng + ?Sized>(rng: &mut R, sequence: &'a [T], weights: &[usize]) -> &'a T {
    assert!(!sequence.is_empty(), "sequence must be non-empty");
    assert_eq!(sequence.len(), weights.len(), "sequence and weights must have the same length");

    let total: usize = weights.iter().sum();
    if total == 0 {
        return sequence.last().unwrap();
    }

    let mut remaining = rng.random_range(0..total) as isize;
    for (element, &weight) in sequence.iter().zip(weights) {
        remaining -= weight as isize;
        if remaining < 0 {
            return element;
        }
    }
    // the draw is strictly below the weight total, so some element absorbs it
    unreachable!()
}

/// The value of `n` clamped to the range `[smallest, largest]`.
pub(crate) fn clamp<T: Ord>(n: T, smallest: T, largest: T) -> T {
    smallest.max(n.min(largest))
}

/// A sample from the normal distribution with the given mean and standard
/// deviation, via the Box-Muller transform.
pub(crate) fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.random();
    mean + std_dev * (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::{clamp, gaussian, weighted_choice};

    #[test]
    fn weighted_choice_skips_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for _ in 0..32 {
            assert_eq!(*weighted_choice(&mut rng, &[1, 2], &[1, 0]), 1);
        }
    }

    #[test]
    fn weighted_choice_degenerates_to_the_last_element() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(*weighted_choice(&mut rng, &[1, 2], &[0, 0]), 2);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(1, 4, 10), 4);
        assert_eq!(clamp(12, 4, 10), 10);
        assert_eq!(clamp(7, 4, 10), 7);
    }

    #[test]
    fn gaussian_concentrates_around_the_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let samples = 1000;
        let total: f64 = (0..samples).map(|_| gaussian(&mut rng, 10.0, 2.0)).sum();
        let sample_mean = total / samples as f64;
        assert!((sample_mean - 10.0).abs() < 1.0, "sample mean was {sample_mean}");
    }
}
