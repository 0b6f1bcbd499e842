//! Tie-averaged ranks

/// Ranks of a sample together with its tie statistics
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// 1-based ranks in input order; tied values share the average rank
    pub ranks: Vec<f64>,
    /// `sum(t^3 - t)` over groups of `t` tied values
    pub tie_sum: f64,
}

impl Ranking {
    /// Number of ranked values
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether no values were ranked
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Sum of the ranks of `range` (positions in input order)
    pub fn rank_sum(&self, range: std::ops::Range<usize>) -> f64 {
        self.ranks[range].iter().sum()
    }

    /// Tie correction factor `1 - sum(t^3 - t) / (N^3 - N)`
    ///
    /// Zero when every value is tied; 1.0 for fewer than two values.
    pub fn tie_correction(&self) -> f64 {
        let n = self.len() as f64;
        if self.len() < 2 {
            return 1.0;
        }
        1.0 - self.tie_sum / (n * n * n - n)
    }
}

/// Rank `values`, averaging the ranks of ties
pub fn rank(values: &[f64]) -> Ranking {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut tie_sum = 0.0;
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end hold ranks start+1..=end
        let average = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = average;
        }
        let t = (end - start) as f64;
        tie_sum += t * t * t - t;
        start = end;
    }

    Ranking { ranks, tie_sum }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distinct_values() {
        let ranking = rank(&[30.0, 10.0, 20.0]);
        assert_eq!(ranking.ranks, vec![3.0, 1.0, 2.0]);
        assert_eq!(ranking.tie_sum, 0.0);
        assert_eq!(ranking.tie_correction(), 1.0);
    }

    #[test]
    fn test_ties_share_average_rank() {
        let ranking = rank(&[2.0, 1.0, 2.0, 3.0, 2.0]);
        assert_eq!(ranking.ranks, vec![3.0, 1.0, 3.0, 5.0, 3.0]);
        assert_eq!(ranking.tie_sum, 24.0);
        assert_eq!(ranking.tie_correction(), 1.0 - 24.0 / 120.0);
    }

    #[test]
    fn test_all_tied() {
        let ranking = rank(&[4.0; 4]);
        assert_eq!(ranking.ranks, vec![2.5; 4]);
        assert_eq!(ranking.tie_correction(), 0.0);
    }

    #[test]
    fn test_empty() {
        let ranking = rank(&[]);
        assert!(ranking.is_empty());
        assert_eq!(ranking.tie_correction(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_rank_sum_is_triangular(values in prop::collection::vec(0u8..20, 0..80)) {
            let values: Vec<f64> = values.into_iter().map(f64::from).collect();
            let ranking = rank(&values);
            let n = values.len() as f64;
            prop_assert_eq!(ranking.rank_sum(0..values.len()), n * (n + 1.0) / 2.0);
        }
    }
}
