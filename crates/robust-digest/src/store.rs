//! Lookup of stored per-sample annotation bags

use robust_sample::{Annotations, SampleId, SampleRecord};
use std::collections::{BTreeMap, HashMap};

/// Maps a sample to the annotations recorded for it
///
/// Implemented by the snapshot collaborator; plain maps work for tests and
/// in-memory use.
pub trait AnnotationStore {
    fn annotations(&self, sample: &SampleId) -> Option<&Annotations>;
}

impl AnnotationStore for BTreeMap<SampleId, Annotations> {
    fn annotations(&self, sample: &SampleId) -> Option<&Annotations> {
        self.get(sample)
    }
}

impl<S: std::hash::BuildHasher> AnnotationStore for HashMap<SampleId, Annotations, S> {
    fn annotations(&self, sample: &SampleId) -> Option<&Annotations> {
        self.get(sample)
    }
}

impl AnnotationStore for [SampleRecord] {
    fn annotations(&self, sample: &SampleId) -> Option<&Annotations> {
        self.iter().find(|r| r.id == *sample).map(|r| &r.annotations)
    }
}

impl AnnotationStore for Vec<SampleRecord> {
    fn annotations(&self, sample: &SampleId) -> Option<&Annotations> {
        self.as_slice().annotations(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_stores() {
        let id = SampleId::new();
        let bag: Annotations = [("hsm".to_string(), 4.0)].into_iter().collect();

        let btree: BTreeMap<SampleId, Annotations> = [(id, bag.clone())].into_iter().collect();
        assert_eq!(btree.annotations(&id).map(|b| b["hsm"]), Some(4.0));
        assert!(btree.annotations(&SampleId::new()).is_none());

        let hash: HashMap<SampleId, Annotations> = [(id, bag)].into_iter().collect();
        assert!(hash.annotations(&id).is_some());
    }
}
