//! Streaming moments against seeded synthetic distributions

use approx::assert_abs_diff_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal, Normal};
use robust_spread::{LogNormalMoments, MomentAccumulator, OnlineMoments};

#[test]
fn gaussian_has_zero_skewness_and_excess_kurtosis() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let normal = Normal::new(100.0, 5.0).unwrap();

    let mut moments = OnlineMoments::new();
    for _ in 0..200_000 {
        moments.push(normal.sample(&mut rng));
    }

    assert_abs_diff_eq!(moments.mean(), 100.0, epsilon = 0.1);
    assert_abs_diff_eq!(moments.std(1), 5.0, epsilon = 0.1);
    assert_abs_diff_eq!(moments.skewness(), 0.0, epsilon = 0.05);
    assert_abs_diff_eq!(moments.kurtosis(), 0.0, epsilon = 0.1);
}

#[test]
fn log_normal_recovers_parameters() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let (mu, sigma) = (3.0, 0.25);
    let dist = LogNormal::new(mu, sigma).unwrap();

    let mut moments = LogNormalMoments::new();
    let mut raw = OnlineMoments::new();
    for _ in 0..100_000 {
        let x = dist.sample(&mut rng);
        moments.push(x);
        raw.push(x);
    }

    assert_abs_diff_eq!(moments.mu(), mu, epsilon = 0.01);
    assert_abs_diff_eq!(moments.sigma2().sqrt(), sigma, epsilon = 0.01);
    // Both summaries estimate the same population mean
    let relative = (MomentAccumulator::mean(&moments) - raw.mean()).abs() / raw.mean();
    assert!(relative < 0.01, "relative difference {relative}");
    assert!(moments.mode() < moments.median());
    assert!(moments.median() < moments.mean());
}

#[test]
fn chunked_merge_equals_single_pass() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let data: Vec<f64> = (0..10_000).map(|_| normal.sample(&mut rng)).collect();

    let whole = OnlineMoments::from_slice(&data);
    let merged = data
        .chunks(997)
        .map(OnlineMoments::from_slice)
        .fold(OnlineMoments::new(), |mut acc, part| {
            acc.merge(&part);
            acc
        });

    assert_eq!(merged.count(), whole.count());
    assert_abs_diff_eq!(merged.mean(), whole.mean(), epsilon = 1e-12);
    assert_abs_diff_eq!(merged.variance(1), whole.variance(1), epsilon = 1e-10);
    assert_abs_diff_eq!(merged.skewness(), whole.skewness(), epsilon = 1e-9);
    assert_abs_diff_eq!(merged.kurtosis(), whole.kurtosis(), epsilon = 1e-9);
}
