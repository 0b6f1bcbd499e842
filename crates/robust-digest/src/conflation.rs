//! Rank-based conflation of whole samples
//!
//! The older strategy for deciding which runs agree: instead of reducing
//! each run to a point estimate it compares the retained observations of
//! every run at once with a Kruskal-Wallis test, then uses Dunn's post-hoc
//! comparisons to pick the largest cluster of mutually compatible runs.

use crate::status::Status;
use robust_hypothesis::{dunn, kruskal_wallis, KruskalWallis};
use robust_sample::SampleId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Kruskal-Wallis plus Dunn conflation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConflation {
    /// Significance level of both tests
    pub alpha: f64,
    /// Smallest epsilon-squared treated as a real difference
    pub min_effect: f64,
}

impl Default for RankConflation {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            min_effect: 0.0,
        }
    }
}

/// Outcome of a conflation
#[derive(Debug, Clone, PartialEq)]
pub struct Conflation {
    pub statuses: BTreeMap<SampleId, Status>,
    /// Omnibus test, absent with fewer than two samples
    pub test: Option<KruskalWallis>,
    /// Sample anchoring the consistent cluster when the runs disagree
    pub anchor: Option<SampleId>,
}

impl Conflation {
    pub fn consistent(&self) -> Vec<SampleId> {
        self.statuses
            .iter()
            .filter(|&(_, &s)| s == Status::Consistent)
            .map(|(&id, _)| id)
            .collect()
    }

    pub fn outliers(&self) -> Vec<SampleId> {
        self.statuses
            .iter()
            .filter(|&(_, &s)| s == Status::Outlier)
            .map(|(&id, _)| id)
            .collect()
    }
}

impl RankConflation {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// Panics unless `0 < alpha < 1`.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha < 1.0, "alpha must be in (0, 1)");
        self.alpha = alpha;
        self
    }

    /// # Panics
    /// Panics if `min_effect` is negative.
    pub fn with_min_effect(mut self, min_effect: f64) -> Self {
        assert!(min_effect >= 0.0, "min_effect must be non-negative");
        self.min_effect = min_effect;
        self
    }

    /// Classify each sample by whether its observations agree with the
    /// largest compatible cluster
    ///
    /// # Panics
    /// Panics if two or more samples are given and any of them is empty.
    #[instrument(skip(self, samples), fields(k = samples.len(), alpha = self.alpha))]
    pub fn conflate<S: AsRef<[f64]>>(&self, samples: &[(SampleId, S)]) -> Conflation {
        let all_consistent = |test: Option<KruskalWallis>| Conflation {
            statuses: samples
                .iter()
                .map(|(id, _)| (*id, Status::Consistent))
                .collect(),
            test,
            anchor: None,
        };

        if samples.len() < 2 {
            return all_consistent(None);
        }

        let groups: Vec<&[f64]> = samples.iter().map(|(_, s)| s.as_ref()).collect();
        let test = kruskal_wallis(&groups);
        debug!(h = test.h, p = test.p_value, effect = test.effect_size, "kruskal-wallis");
        if !test.is_significant(self.alpha) || test.effect_size < self.min_effect {
            return all_consistent(Some(test));
        }

        let post_hoc = dunn(&test);
        let mut anchor = 0;
        let mut best = post_hoc.peers(0, self.alpha);
        for group in 1..samples.len() {
            let peers = post_hoc.peers(group, self.alpha);
            if peers > best {
                anchor = group;
                best = peers;
            }
        }
        debug!(anchor, peers = best, "dunn anchor");

        let statuses = samples
            .iter()
            .enumerate()
            .map(|(group, (id, _))| {
                let agrees = group == anchor
                    || post_hoc
                        .get(anchor, group)
                        .is_some_and(|c| !c.is_significant(self.alpha));
                let status = if agrees {
                    Status::Consistent
                } else {
                    Status::Outlier
                };
                (*id, status)
            })
            .collect();

        Conflation {
            statuses,
            test: Some(test),
            anchor: Some(samples[anchor].0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(groups: Vec<Vec<f64>>) -> Vec<(SampleId, Vec<f64>)> {
        groups.into_iter().map(|g| (SampleId::new(), g)).collect()
    }

    #[test]
    fn test_single_sample_is_consistent() {
        let samples = labelled(vec![vec![1.0, 2.0]]);
        let result = RankConflation::new().conflate(&samples);
        assert!(result.test.is_none());
        assert_eq!(result.consistent(), vec![samples[0].0]);
    }

    #[test]
    fn test_similar_samples_are_consistent() {
        let samples = labelled(vec![
            vec![2.9, 3.0, 2.5, 2.6, 3.2],
            vec![3.8, 2.7, 4.0, 2.4],
            vec![2.8, 3.4, 3.7, 2.2, 2.0],
        ]);
        let result = RankConflation::new().conflate(&samples);
        let test = result.test.as_ref().unwrap();
        assert!(!test.is_significant(0.05));
        assert_eq!(result.consistent().len(), 3);
        assert!(result.anchor.is_none());
    }

    #[test]
    fn test_distant_sample_is_outlier() {
        let shifted = |offset: f64| -> Vec<f64> {
            (0..10).map(|i| 100.0 + offset + 0.3 * i as f64).collect()
        };
        let samples = labelled(vec![
            shifted(0.0),
            shifted(0.1),
            shifted(0.2),
            (0..10).map(|i| 200.0 + i as f64).collect(),
        ]);
        let result = RankConflation::new().conflate(&samples);

        assert_eq!(result.anchor, Some(samples[0].0));
        assert_eq!(result.outliers(), vec![samples[3].0]);
        assert_eq!(result.consistent().len(), 3);
    }

    #[test]
    fn test_min_effect_suppresses_small_differences() {
        let samples = labelled(vec![
            (0..10).map(|i| i as f64).collect(),
            (0..10).map(|i| 100.0 + i as f64).collect(),
        ]);
        assert_eq!(RankConflation::new().conflate(&samples).outliers().len(), 1);

        let lenient = RankConflation::new().with_min_effect(0.99).conflate(&samples);
        assert!(lenient.outliers().is_empty());
    }
}
