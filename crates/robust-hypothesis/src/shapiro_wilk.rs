//! Shapiro-Wilk normality test
//!
//! Royston's algorithm AS R94: approximate order-statistic coefficients from
//! normal scores, the W statistic, and a normalizing transformation of `1 - W`
//! for the p-value. Valid for 3 to 5000 observations.

use robust_core::math::distributions::normal;
use robust_core::utils::sorted;
use std::f64::consts::PI;

/// Smallest supported sample size
pub const MIN_SAMPLE_SIZE: usize = 3;
/// Largest supported sample size
pub const MAX_SAMPLE_SIZE: usize = 5000;

const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// Result of the Shapiro-Wilk test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    /// W statistic in `(0, 1]`; values near 1 are consistent with normality
    pub w: f64,
    /// Probability of a W this small under normality
    pub p_value: f64,
}

impl ShapiroWilk {
    /// Whether normality is not rejected at significance level `alpha`
    pub fn is_normal(&self, alpha: f64) -> bool {
        self.p_value >= alpha
    }
}

// c[0] + c[1] x + c[2] x^2 + ...
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

/// Coefficients `a_1..a_{n/2}` for the lower half of the order statistics
fn coefficients(n: usize) -> Vec<f64> {
    let half = n / 2;
    let mut a = vec![0.0; half];
    if n == 3 {
        a[0] = 0.5f64.sqrt();
        return a;
    }

    let an25 = n as f64 + 0.25;
    let m: Vec<f64> = (1..=half)
        .map(|i| normal::ppf((i as f64 - 0.375) / an25))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;

    let (first, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        a[1] = a2;
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
            .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
        (1, fac)
    };
    a[0] = a1;
    for i in first..half {
        a[i] = -m[i] / fac;
    }
    a
}

/// Shapiro-Wilk test of the hypothesis that `sample` is normally distributed
///
/// # Panics
/// Panics unless `3 <= N <= 5000` and the sample range is positive.
pub fn shapiro_wilk(sample: &[f64]) -> ShapiroWilk {
    let n = sample.len();
    assert!(
        (MIN_SAMPLE_SIZE..=MAX_SAMPLE_SIZE).contains(&n),
        "Shapiro-Wilk needs between {MIN_SAMPLE_SIZE} and {MAX_SAMPLE_SIZE} observations, got {n}"
    );
    let x = sorted(sample);
    let range = x[n - 1] - x[0];
    assert!(range > 0.0, "Shapiro-Wilk needs a sample with non-zero range");

    // Antisymmetric weight vector over the full sample
    let a = coefficients(n);
    let weights: Vec<f64> = (0..n)
        .map(|i| {
            let j = n - 1 - i;
            match i.cmp(&j) {
                std::cmp::Ordering::Less => -a[i],
                std::cmp::Ordering::Greater => a[j],
                std::cmp::Ordering::Equal => 0.0,
            }
        })
        .collect();

    // Correlation between weights and range-scaled data
    let nf = n as f64;
    let sa = weights.iter().sum::<f64>() / nf;
    let sx = x.iter().map(|v| v / range).sum::<f64>() / nf;
    let (mut ssa, mut ssx, mut sax) = (0.0, 0.0, 0.0);
    for (w, v) in weights.iter().zip(&x) {
        let asa = w - sa;
        let xsx = v / range - sx;
        ssa += asa * asa;
        ssx += xsx * xsx;
        sax += asa * xsx;
    }
    let ssassx = (ssa * ssx).sqrt();
    let w1 = ((ssassx - sax) * (ssassx + sax) / (ssa * ssx)).max(0.0);
    let w = 1.0 - w1;

    ShapiroWilk {
        w,
        p_value: p_value(n, w, w1),
    }
}

fn p_value(n: usize, w: f64, w1: f64) -> f64 {
    if n == 3 {
        let p = 6.0 / PI * (w.sqrt().asin() - PI / 3.0);
        return p.clamp(0.0, 1.0);
    }
    if w1 <= 0.0 {
        return 1.0;
    }

    let nf = n as f64;
    let mut y = w1.ln();
    let (m, s) = if n <= 11 {
        let gamma = poly(&G, nf);
        if y >= gamma {
            return 1e-99;
        }
        y = -(gamma - y).ln();
        (poly(&C3, nf), poly(&C4, nf).exp())
    } else {
        let xx = nf.ln();
        (poly(&C5, xx), poly(&C6, xx).exp())
    };
    normal::sf((y - m) / s)
}
