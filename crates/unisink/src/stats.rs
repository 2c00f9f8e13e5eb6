//! Count summaries over resolved annotations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{Annotation, Origin, SourceOrSink};

/// Counts over a resolved record set.
///
/// Computed from a read-only view of the final records; maps keep
/// first-seen order for categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationStats {
    pub total: usize,
    pub by_source_or_sink: IndexMap<SourceOrSink, usize>,
    pub categories_by_source_or_sink: IndexMap<SourceOrSink, IndexMap<String, usize>>,
    pub categories: IndexMap<String, usize>,
    pub by_origin: IndexMap<Origin, usize>,
    pub categories_by_origin: IndexMap<Origin, IndexMap<String, usize>>,
    pub source_or_sink_by_origin: IndexMap<Origin, IndexMap<SourceOrSink, usize>>,
}

impl AnnotationStats {
    pub fn from_annotations(annotations: &[Annotation]) -> Self {
        let mut stats = Self::empty();

        for ann in annotations {
            let kind = ann.source_or_sink();
            let origin = ann.origin();
            let category = ann.category();

            stats.total += 1;
            *stats.by_source_or_sink.entry(kind).or_insert(0) += 1;
            bump(stats.categories_by_source_or_sink.entry(kind).or_default(), category);
            bump(&mut stats.categories, category);
            *stats.by_origin.entry(origin).or_insert(0) += 1;
            bump(stats.categories_by_origin.entry(origin).or_default(), category);
            *stats
                .source_or_sink_by_origin
                .entry(origin)
                .or_default()
                .entry(kind)
                .or_insert(0) += 1;
        }

        stats
    }

    /// Stats with every kind and origin present at zero.
    fn empty() -> Self {
        Self {
            total: 0,
            by_source_or_sink: SourceOrSink::ALL.iter().map(|k| (*k, 0)).collect(),
            categories_by_source_or_sink: SourceOrSink::ALL
                .iter()
                .map(|k| (*k, IndexMap::new()))
                .collect(),
            categories: IndexMap::new(),
            by_origin: Origin::ALL.iter().map(|o| (*o, 0)).collect(),
            categories_by_origin: Origin::ALL.iter().map(|o| (*o, IndexMap::new())).collect(),
            source_or_sink_by_origin: Origin::ALL.iter().map(|o| (*o, IndexMap::new())).collect(),
        }
    }

    pub fn count(&self, kind: SourceOrSink) -> usize {
        self.by_source_or_sink.get(&kind).copied().unwrap_or(0)
    }

    pub fn origin_count(&self, origin: Origin) -> usize {
        self.by_origin.get(&origin).copied().unwrap_or(0)
    }

    /// Category counts for one kind, empty if the kind never occurs.
    pub fn categories_for(&self, kind: SourceOrSink) -> impl Iterator<Item = (&str, usize)> {
        self.categories_by_source_or_sink
            .get(&kind)
            .into_iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), *v)))
    }

    /// Category counts for one origin, empty if the origin never occurs.
    pub fn categories_from(&self, origin: Origin) -> impl Iterator<Item = (&str, usize)> {
        self.categories_by_origin
            .get(&origin)
            .into_iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), *v)))
    }
}

fn bump(counts: &mut IndexMap<String, usize>, key: &str) {
    match counts.get_mut(key) {
        Some(n) => *n += 1,
        None => {
            counts.insert(key.to_string(), 1);
        }
    }
}
