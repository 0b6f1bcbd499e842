//! Kruskal-Wallis H test

use crate::ranks::rank;
use robust_core::math::distributions::chi_squared;

/// Result of a Kruskal-Wallis H test over `k` groups
#[derive(Debug, Clone, PartialEq)]
pub struct KruskalWallis {
    /// Tie-corrected H statistic
    pub h: f64,
    /// Degrees of freedom `k - 1`
    pub dof: usize,
    /// Upper chi-squared tail probability of `h`
    pub p_value: f64,
    /// Epsilon-squared `H / (N - 1)`
    pub effect_size: f64,
    /// Mean rank of each group in the pooled ranking
    pub mean_ranks: Vec<f64>,
    /// Size of each group
    pub sizes: Vec<usize>,
    /// `sum(t^3 - t)` over tied groups of the pooled sample
    pub tie_sum: f64,
}

impl KruskalWallis {
    /// Total number of observations
    pub fn total(&self) -> usize {
        self.sizes.iter().sum()
    }

    /// Number of groups
    pub fn groups(&self) -> usize {
        self.sizes.len()
    }

    /// Whether at least one group differs at significance level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Test whether `groups` come from the same distribution
///
/// H is divided by the tie correction `1 - sum(t^3 - t) / (N^3 - N)`; when
/// every observation is tied the test reports `H = 0`, `p = 1`.
///
/// # Panics
/// Panics with fewer than two groups or if any group is empty.
pub fn kruskal_wallis<G: AsRef<[f64]>>(groups: &[G]) -> KruskalWallis {
    assert!(groups.len() >= 2, "Kruskal-Wallis needs at least two groups");
    assert!(
        groups.iter().all(|g| !g.as_ref().is_empty()),
        "Kruskal-Wallis groups must be non-empty"
    );

    let sizes: Vec<usize> = groups.iter().map(|g| g.as_ref().len()).collect();
    let pooled: Vec<f64> = groups.iter().flat_map(|g| g.as_ref().iter().copied()).collect();
    let ranking = rank(&pooled);
    let n = pooled.len() as f64;

    let mut offset = 0;
    let mut mean_ranks = Vec::with_capacity(groups.len());
    let mut between = 0.0;
    for &size in &sizes {
        let rank_sum = ranking.rank_sum(offset..offset + size);
        between += rank_sum * rank_sum / size as f64;
        mean_ranks.push(rank_sum / size as f64);
        offset += size;
    }

    let correction = ranking.tie_correction();
    let h = if correction > 0.0 {
        let raw = 12.0 / (n * (n + 1.0)) * between - 3.0 * (n + 1.0);
        (raw / correction).max(0.0)
    } else {
        0.0
    };
    let dof = groups.len() - 1;

    KruskalWallis {
        h,
        dof,
        p_value: chi_squared::sf(h, dof),
        effect_size: h / (n - 1.0),
        mean_ranks,
        sizes,
        tie_sum: ranking.tie_sum,
    }
}
