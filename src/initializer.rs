//! Random initialization of the weight vector.
use anyhow::{anyhow, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Sample `len` weights independently from Normal(`mean`, `std_dev`).
pub fn normal_weights<R: Rng + ?Sized>(
    len: usize,
    mean: f64,
    std_dev: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let normal = Normal::new(mean, std_dev)
        .map_err(|e| anyhow!("Invalid normal distribution ({}, {}): {}", mean, std_dev, e))?;
    Ok((0..len).map(|_| normal.sample(rng)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn same_seed_same_weights() {
        let a = normal_weights(3, 0.0, 1.2, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = normal_weights(3, 0.0, 1.2, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(a, b);
    }

    #[test]
    fn sample_mean_is_near_mean() {
        let mut rng = StdRng::seed_from_u64(1);
        let w = normal_weights(20_000, 0.0, 1.2, &mut rng).unwrap();
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        assert!(mean.abs() < 0.05, "mean was {}", mean);
    }

    #[test]
    fn rejects_bad_std_dev() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(normal_weights(2, 0.0, f64::NAN, &mut rng).is_err());
    }
}
