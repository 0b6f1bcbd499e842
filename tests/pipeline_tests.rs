//! Baseline workflow across crates: collect runs, digest them, persist the
//! digest, and compare a new run against the baseline

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::LogNormal;
use robust_bench::prelude::*;
use std::collections::BTreeMap;
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Endless log-normal timings around `median` microseconds
fn source(median: f64, seed: u64) -> impl Iterator<Item = Duration> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = LogNormal::new((median * 1_000.0).ln(), 0.1).unwrap();
    std::iter::repeat_with(move || Duration::from_nanos(dist.sample(&mut rng) as u64))
}

#[test]
fn baseline_survives_persistence_and_flags_regressions() -> anyhow::Result<()> {
    init_tracing();
    let options = SampleOptions::new()
        .with_capacity(400)
        .with_max_samples(400)
        .with_min_samples(50)
        .with_max_relative_error(0.0);

    let mut store: BTreeMap<SampleId, Annotations> = BTreeMap::new();
    let mut ids = Vec::new();
    for run in 0..6 {
        let mut timings = source(100.0, run);
        let sample = DurationSample::collect(&mut timings, &options.with_seed(run));
        assert_eq!(sample.count(), 400);
        let record = sample.record(&[EstimatorKey::Hsm, EstimatorKey::Median]);
        ids.push(record.id);
        store.insert(record.id, record.annotations);
    }

    let digest_options = DigestOptions::new().with_sizes(3, 5).with_threshold(0.1);
    let digest = Digest::from_annotations(&ids, &store, EstimatorKey::Median, digest_options)?;
    assert_eq!(digest.stat().len(), 5);
    assert!(digest.is_ready());

    let json = digest.to_json()?;
    let restored = Digest::from_json(&json, &store, EstimatorKey::Median, digest_options)?;
    assert_eq!(restored.stat(), digest.stat());

    let baseline = DurationSample::collect(&mut source(100.0, 100), &options.with_seed(100));
    let regressed = DurationSample::collect(&mut source(110.0, 101), &options.with_seed(101));
    let bootstrap = StudentizedBootstrap::new().with_resamples(300).with_seed(5);
    let statistic = |s: &[f64]| EstimatorKey::Median.estimate(s).value;
    let test = bootstrap.difference_test(baseline.values(), regressed.values(), &statistic)?;

    assert!(test.significant, "{test}");
    assert!(test.difference > 0.0);
    assert!((0.03..0.2).contains(&test.relative_difference));
    Ok(())
}

#[test]
fn unrelated_store_cannot_restore_a_digest() {
    init_tracing();
    let estimates: Vec<PointEstimate> = [10.0, 10.2, 9.8]
        .into_iter()
        .map(|v| PointEstimate::new(v, SampleId::new(), EstimatorKey::Hsm))
        .collect();
    let digest = Digest::new(estimates, DigestOptions::new());
    let record = digest.to_wire();

    let empty: BTreeMap<SampleId, Annotations> = BTreeMap::new();
    let err = Digest::from_wire(&record, &empty, EstimatorKey::Hsm, DigestOptions::new())
        .unwrap_err();
    assert!(matches!(err, DigestError::UnresolvedReference(_)));
}
