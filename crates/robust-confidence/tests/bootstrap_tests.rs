//! Coverage and determinism of the studentized bootstrap

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal, Normal};
use robust_confidence::{Smoothing, StudentizedBootstrap};
use robust_core::utils::{mean, median_sorted, sorted};

fn draw<D: Distribution<f64>>(dist: &D, rng: &mut ChaCha8Rng, n: usize) -> Vec<f64> {
    (0..n).map(|_| dist.sample(rng)).collect()
}

fn median(sample: &[f64]) -> f64 {
    median_sorted(&sorted(sample))
}

#[test]
fn same_seed_reproduces_interval() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let sample = draw(&LogNormal::new(3.0, 0.4).unwrap(), &mut rng, 60);
    let bootstrap = StudentizedBootstrap::new()
        .with_resamples(150)
        .with_inner_resamples(15)
        .with_seed(99);

    let a = bootstrap.confidence_interval(&sample, &median).unwrap();
    let b = bootstrap.confidence_interval(&sample, &median).unwrap();
    assert_eq!(a, b);

    let other = bootstrap.with_seed(100).confidence_interval(&sample, &median).unwrap();
    assert_ne!(a, other);
}

#[test]
fn mean_interval_covers_true_mean() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let dist = Normal::new(100.0, 10.0).unwrap();
    let trials = 60;
    let covered = (0..trials)
        .filter(|&t| {
            let sample = draw(&dist, &mut rng, 40);
            StudentizedBootstrap::new()
                .with_resamples(200)
                .with_inner_resamples(20)
                .with_seed(t)
                .confidence_interval(&sample, &mean)
                .unwrap()
                .contains(100.0)
        })
        .count();
    assert!(covered >= 50, "covered {covered} of {trials}");
}

#[test]
fn interval_narrows_with_sample_size() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let dist = Normal::new(10.0, 2.0).unwrap();
    let small = draw(&dist, &mut rng, 20);
    let large = draw(&dist, &mut rng, 500);
    let bootstrap = StudentizedBootstrap::new().with_resamples(200).with_inner_resamples(10);

    let wide = bootstrap.confidence_interval(&small, &mean).unwrap();
    let narrow = bootstrap.confidence_interval(&large, &mean).unwrap();
    assert!(narrow.width() < wide.width());
}

#[test]
fn percentile_interval_brackets_estimate() {
    let sample: Vec<f64> = (1..=100).map(f64::from).collect();
    let ci = StudentizedBootstrap::new()
        .with_resamples(500)
        .percentile_interval(&sample, &mean)
        .unwrap();
    assert_eq!(ci.estimate, 50.5);
    assert!(ci.lower < 50.5 && 50.5 < ci.upper);
    assert!(ci.lower > 40.0 && ci.upper < 61.0);
}

#[test]
fn difference_test_detects_shift() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let a = draw(&Normal::new(100.0, 5.0).unwrap(), &mut rng, 40);
    let b = draw(&Normal::new(110.0, 5.0).unwrap(), &mut rng, 40);
    let test = StudentizedBootstrap::new()
        .with_resamples(200)
        .with_inner_resamples(15)
        .difference_test(&a, &b, &mean)
        .unwrap();

    assert!(test.significant);
    assert!(test.interval.lower > 0.0);
    assert!(test.p_value < 0.05);
    assert!(test.relative_difference > 0.05 && test.relative_difference < 0.15);
}

#[test]
fn difference_test_of_identical_samples() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let a = draw(&Normal::new(50.0, 3.0).unwrap(), &mut rng, 30);
    let test = StudentizedBootstrap::new()
        .with_resamples(200)
        .with_inner_resamples(15)
        .difference_test(&a, &a, &median)
        .unwrap();

    assert_eq!(test.difference, 0.0);
    assert_eq!(test.relative_difference, 0.0);
    assert!(!test.significant);
    assert!(test.p_value > 0.5);
}

#[test]
fn smoothing_keeps_interval_near_estimate() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let sample = draw(&Normal::new(20.0, 1.0).unwrap(), &mut rng, 50);
    let ci = StudentizedBootstrap::new()
        .with_resamples(200)
        .with_inner_resamples(10)
        .with_smoothing(Smoothing::Gaussian(0.2))
        .confidence_interval(&sample, &median)
        .unwrap();
    assert!(ci.lower < ci.estimate + 0.5 && ci.upper > ci.estimate - 0.5);
    assert!(ci.width() < 2.0);
}
