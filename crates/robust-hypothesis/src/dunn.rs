//! Dunn's post-hoc test after Kruskal-Wallis

use crate::kruskal_wallis::KruskalWallis;
use robust_core::math::distributions::normal;

/// Pairwise comparison of groups `i < j`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DunnComparison {
    /// Index of the first group
    pub i: usize,
    /// Index of the second group
    pub j: usize,
    /// `(mean_rank_i - mean_rank_j) / sigma_ij`
    pub z: f64,
    /// Unadjusted two-sided p-value
    pub p_value: f64,
    /// Šidák-adjusted p-value `1 - (1 - p)^m` over `m` comparisons
    pub adjusted_p_value: f64,
}

impl DunnComparison {
    /// Whether the pair differs at family-wise level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.adjusted_p_value < alpha
    }
}

/// All pairwise comparisons of a Kruskal-Wallis test
#[derive(Debug, Clone, PartialEq)]
pub struct Dunn {
    groups: usize,
    comparisons: Vec<DunnComparison>,
}

impl Dunn {
    /// Comparisons in `(0, 1), (0, 2), ..., (k - 2, k - 1)` order
    pub fn comparisons(&self) -> &[DunnComparison] {
        &self.comparisons
    }

    /// Comparison between groups `a` and `b` in either order
    pub fn get(&self, a: usize, b: usize) -> Option<&DunnComparison> {
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        self.comparisons.iter().find(|c| c.i == i && c.j == j)
    }

    /// Number of groups whose difference from `group` is not significant
    pub fn peers(&self, group: usize, alpha: f64) -> usize {
        (0..self.groups)
            .filter(|&other| other != group)
            .filter(|&other| self.get(group, other).is_some_and(|c| !c.is_significant(alpha)))
            .count()
    }
}

/// Dunn's test with the pooled tie-corrected rank variance
///
/// `sigma_ij^2 = (N (N + 1) / 12 - sum(t^3 - t) / (12 (N - 1))) * (1/n_i + 1/n_j)`.
/// A zero variance (all values tied) yields `z = 0`, `p = 1`.
pub fn dunn(test: &KruskalWallis) -> Dunn {
    let k = test.groups();
    let n = test.total() as f64;
    let pooled = n * (n + 1.0) / 12.0 - test.tie_sum / (12.0 * (n - 1.0));
    let m = (k * (k - 1) / 2) as i32;

    let mut comparisons = Vec::with_capacity(m as usize);
    for i in 0..k {
        for j in i + 1..k {
            let variance = pooled * (1.0 / test.sizes[i] as f64 + 1.0 / test.sizes[j] as f64);
            let (z, p_value) = if variance > 0.0 {
                let z = (test.mean_ranks[i] - test.mean_ranks[j]) / variance.sqrt();
                (z, (2.0 * normal::sf(z.abs())).min(1.0))
            } else {
                (0.0, 1.0)
            };
            let adjusted_p_value = (1.0 - (1.0 - p_value).powi(m)).clamp(0.0, 1.0);
            comparisons.push(DunnComparison {
                i,
                j,
                z,
                p_value,
                adjusted_p_value,
            });
        }
    }

    Dunn {
        groups: k,
        comparisons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kruskal_wallis::kruskal_wallis;
    use approx::assert_relative_eq;

    #[test]
    fn test_pairwise_statistics() {
        let kw = kruskal_wallis(&[[1.0, 2.0, 3.0], [10.0, 11.0, 12.0], [20.0, 21.0, 22.0]]);
        let dunn = dunn(&kw);
        assert_eq!(dunn.comparisons().len(), 3);

        // N = 9, no ties: pooled variance 7.5, sigma = sqrt(7.5 * 2 / 3)
        let sigma = (7.5f64 * 2.0 / 3.0).sqrt();
        let first = dunn.get(1, 0).unwrap();
        assert_eq!((first.i, first.j), (0, 1));
        assert_relative_eq!(first.z, -3.0 / sigma, epsilon = 1e-12);
        let far = dunn.get(0, 2).unwrap();
        assert_relative_eq!(far.z, -6.0 / sigma, epsilon = 1e-12);

        let p = far.p_value;
        assert_relative_eq!(far.adjusted_p_value, 1.0 - (1.0 - p).powi(3), epsilon = 1e-15);
        assert!(far.adjusted_p_value >= far.p_value);
    }

    #[test]
    fn test_peers() {
        let kw = kruskal_wallis(&[
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            vec![1.5, 2.5, 3.5, 4.5, 5.5, 6.5],
            vec![100.0, 101.0, 102.0, 103.0, 104.0, 105.0],
        ]);
        let dunn = dunn(&kw);
        assert_eq!(dunn.peers(0, 0.05), 1);
        assert_eq!(dunn.peers(1, 0.05), 1);
        assert_eq!(dunn.peers(2, 0.05), 0);
    }

    #[test]
    fn test_all_tied() {
        let kw = kruskal_wallis(&[vec![2.0, 2.0], vec![2.0, 2.0], vec![2.0]]);
        let dunn = dunn(&kw);
        for c in dunn.comparisons() {
            assert_eq!(c.z, 0.0);
            assert_eq!(c.p_value, 1.0);
            assert_eq!(c.adjusted_p_value, 1.0);
        }
    }
}
