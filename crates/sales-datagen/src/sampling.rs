//! Distribution sampling on top of a plain `Rng`.

use rand::Rng;

/// Pick one element uniformly. `items` must not be empty.
pub(crate) fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Poisson-distributed count (Knuth's method). Fine for small `lambda`.
pub(crate) fn poisson<R: Rng>(rng: &mut R, lambda: f64) -> u64 {
    let limit = (-lambda).exp();
    let mut k = 0;
    let mut p: f64 = rng.gen();
    while p > limit {
        k += 1;
        p *= rng.gen::<f64>();
    }
    k
}

/// Normally distributed value (Box-Muller).
pub(crate) fn normal<R: Rng>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // 1 - u keeps the log argument in (0, 1]
    let u1 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

/// Exponentially distributed value with the given mean.
pub(crate) fn exponential<R: Rng>(rng: &mut R, mean: f64) -> f64 {
    let u = 1.0 - rng.gen::<f64>();
    -mean * u.ln()
}

/// FNV-1a. Stable across runs and platforms, unlike `DefaultHasher`.
pub(crate) fn stable_hash(s: &str) -> u64 {
    s.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_poisson_mean() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let total: u64 = (0..n).map(|_| poisson(&mut rng, 3.0)).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 3.0).abs() < 0.1, "mean {mean}");
    }

    #[test]
    fn test_normal_moments() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| normal(&mut rng, 1.0, 0.1)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean - 1.0).abs() < 0.01);
        assert!((var.sqrt() - 0.1).abs() < 0.01);
    }

    #[test]
    fn test_exponential_is_positive() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!((0..1000).all(|_| exponential(&mut rng, 365.0) >= 0.0));
    }

    #[test]
    fn test_stable_hash() {
        assert_eq!(stable_hash(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(stable_hash("PRD_100"), stable_hash("PRD_100"));
        assert_ne!(stable_hash("PRD_100"), stable_hash("PRD_101"));
    }
}
