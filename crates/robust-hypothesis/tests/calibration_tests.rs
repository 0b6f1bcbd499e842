//! Null-hypothesis calibration of the rank and normality tests

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp, Normal};
use robust_hypothesis::{kruskal_wallis, mann_whitney, shapiro_wilk};

fn draw<D: Distribution<f64>>(dist: &D, rng: &mut ChaCha8Rng, n: usize) -> Vec<f64> {
    (0..n).map(|_| dist.sample(rng)).collect()
}

#[test]
fn mann_whitney_rejection_rate_matches_alpha() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let dist = Normal::new(50.0, 4.0).unwrap();
    let trials = 2_000;
    let rejections = (0..trials)
        .filter(|_| {
            let a = draw(&dist, &mut rng, 30);
            let b = draw(&dist, &mut rng, 25);
            mann_whitney(&a, &b).is_significant(0.05)
        })
        .count();
    let rate = rejections as f64 / trials as f64;
    assert!((0.03..0.07).contains(&rate), "rejection rate {rate}");
}

#[test]
fn mann_whitney_detects_shift() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let a = draw(&Normal::new(50.0, 1.0).unwrap(), &mut rng, 40);
    let b = draw(&Normal::new(53.0, 1.0).unwrap(), &mut rng, 40);
    let test = mann_whitney(&a, &b);
    assert!(test.effect_size > 0.95);
    assert!(test.p_value < 1e-6);
}

#[test]
fn kruskal_wallis_rejection_rate_matches_alpha() {
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    let dist = Exp::new(0.1).unwrap();
    let trials = 2_000;
    let rejections = (0..trials)
        .filter(|_| {
            let groups: Vec<Vec<f64>> = (0..4).map(|_| draw(&dist, &mut rng, 12)).collect();
            kruskal_wallis(&groups).is_significant(0.05)
        })
        .count();
    let rate = rejections as f64 / trials as f64;
    assert!((0.03..0.07).contains(&rate), "rejection rate {rate}");
}

#[test]
fn shapiro_wilk_separates_normal_from_skewed() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let normal = draw(&Normal::new(0.0, 1.0).unwrap(), &mut rng, 200);
    let skewed = draw(&Exp::new(1.0).unwrap(), &mut rng, 200);

    let sw = shapiro_wilk(&normal);
    assert!(sw.w > 0.98);
    assert!(shapiro_wilk(&skewed).p_value < 1e-6);

    let trials = 1_000;
    let rejections = (0..trials)
        .filter(|_| !shapiro_wilk(&draw(&Normal::new(0.0, 1.0).unwrap(), &mut rng, 30)).is_normal(0.05))
        .count();
    let rate = rejections as f64 / trials as f64;
    assert!((0.025..0.075).contains(&rate), "rejection rate {rate}");
}
