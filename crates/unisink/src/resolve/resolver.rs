//! The duplicate resolver.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::conflict::{Conflict, ConflictField, Outcome};
use super::overrides::OverrideTable;
use crate::model::{is_unspecified_category, Annotation, MethodKey, SourceOrSink};

/// Output of a resolution pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resolution {
    /// One record per method, in first-seen order.
    pub annotations: Vec<Annotation>,
    /// Disagreements that the specificity policy could not settle.
    pub conflicts: Vec<Conflict>,
    /// Number of records merged away.
    pub merged: usize,
}

/// Merges records that describe the same method.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    overrides: OverrideTable,
}

impl Resolver {
    /// Resolver with the default override table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: OverrideTable) -> Self {
        Self { overrides }
    }

    /// Resolve a batch of records.
    ///
    /// Resolving the output again changes nothing.
    pub fn resolve(&self, annotations: impl IntoIterator<Item = Annotation>) -> Resolution {
        let mut best: IndexMap<MethodKey, Annotation> = IndexMap::new();
        let mut conflicts = Vec::new();
        let mut merged = 0;

        for ann in annotations {
            match best.entry(ann.identity_key()) {
                Entry::Vacant(slot) => {
                    slot.insert(ann);
                }
                Entry::Occupied(mut slot) => {
                    let next = self.merge(slot.key(), slot.get(), &ann, &mut conflicts);
                    slot.insert(next);
                    merged += 1;
                }
            }
        }

        tracing::debug!(
            unique = best.len(),
            merged,
            conflicts = conflicts.len(),
            "resolved duplicates"
        );

        Resolution {
            annotations: best.into_values().collect(),
            conflicts,
            merged,
        }
    }

    /// Merge `challenger` into `current`, returning the new best record.
    fn merge(
        &self,
        key: &MethodKey,
        current: &Annotation,
        challenger: &Annotation,
        conflicts: &mut Vec<Conflict>,
    ) -> Annotation {
        let replace = if current.source_or_sink() != challenger.source_or_sink() {
            if current.source_or_sink().is_unclaimed() {
                true
            } else if challenger.source_or_sink() != SourceOrSink::Unannotated {
                let overridden = self.overrides.forced_origin(key) == Some(challenger.origin());
                let outcome = if overridden {
                    Outcome::Overridden
                } else {
                    Outcome::Retained
                };
                report(
                    conflicts,
                    Conflict::between(key, ConflictField::SourceOrSink, current, challenger, outcome),
                );
                overridden
            } else {
                false
            }
        } else if current.category() != challenger.category() {
            if is_unspecified_category(current.category()) {
                true
            } else if !is_unspecified_category(challenger.category()) {
                report(
                    conflicts,
                    Conflict::between(
                        key,
                        ConflictField::Category,
                        current,
                        challenger,
                        Outcome::Retained,
                    ),
                );
                false
            } else {
                false
            }
        } else {
            false
        };

        let (winner, loser) = if replace {
            (challenger, current)
        } else {
            (current, challenger)
        };

        // A longer return type is the more qualified spelling.
        if loser.returns().chars().count() > winner.returns().chars().count() {
            winner.with_returns(loser.returns())
        } else {
            winner.clone()
        }
    }
}

fn report(conflicts: &mut Vec<Conflict>, conflict: Conflict) {
    tracing::warn!(
        key = %conflict.key,
        field = conflict.field.label(),
        current = %conflict.current,
        challenger = %conflict.challenger,
        outcome = ?conflict.outcome,
        "conflicting annotations"
    );
    conflicts.push(conflict);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Origin;

    fn ann(
        method: &str,
        params: &[&str],
        returns: &str,
        category: &str,
        origin: Origin,
        kind: SourceOrSink,
    ) -> Annotation {
        Annotation::new(
            "",
            method,
            params.iter().map(|p| p.to_string()).collect(),
            returns,
            category,
            origin,
            kind,
        )
    }

    #[test]
    fn test_unique_records_pass_through() {
        let input = vec![
            ann("a.B.x", &[""], "int", "NETWORK", Origin::Catalog, SourceOrSink::Source),
            ann("a.B.y", &[""], "int", "NETWORK", Origin::Catalog, SourceOrSink::Source),
        ];
        let out = Resolver::new().resolve(input.clone());
        assert_eq!(out.annotations, input);
        assert!(out.conflicts.is_empty());
        assert_eq!(out.merged, 0);
    }

    #[test]
    fn test_parameters_compared_by_simple_name() {
        let input = vec![
            ann("a.B.m", &["java.lang.String"], "void", "unannotated", Origin::PermissionMap, SourceOrSink::Unannotated),
            ann("a.B.m", &["String"], "void", "SMS_MMS", Origin::Catalog, SourceOrSink::Sink),
        ];
        let out = Resolver::new().resolve(input);
        assert_eq!(out.annotations.len(), 1);
        assert_eq!(out.annotations[0].source_or_sink(), SourceOrSink::Sink);
    }

    #[test]
    fn test_specific_kind_wins_in_either_order() {
        let unannotated = ann("a.B.m", &["int"], "void", "unannotated", Origin::PermissionMap, SourceOrSink::Unannotated);
        let sink = ann("a.B.m", &["int"], "void", "NETWORK", Origin::Catalog, SourceOrSink::Sink);

        let forward = Resolver::new().resolve(vec![unannotated.clone(), sink.clone()]);
        let backward = Resolver::new().resolve(vec![sink, unannotated]);

        for out in [forward, backward] {
            assert_eq!(out.annotations.len(), 1);
            assert_eq!(out.annotations[0].source_or_sink(), SourceOrSink::Sink);
            assert_eq!(out.annotations[0].category(), "NETWORK");
            assert!(out.conflicts.is_empty());
        }
    }

    #[test]
    fn test_none_yields_to_claim() {
        let none = ann("a.B.m", &["int"], "void", "NO_CATEGORY", Origin::FrameworkScan, SourceOrSink::Neither);
        let source = ann("a.B.m", &["int"], "void", "LOCATION", Origin::Catalog, SourceOrSink::Source);
        let out = Resolver::new().resolve(vec![none, source]);
        assert_eq!(out.annotations[0].source_or_sink(), SourceOrSink::Source);
        assert_eq!(out.annotations[0].origin(), Origin::Catalog);
    }

    #[test]
    fn test_concrete_disagreement_is_reported_and_first_kept() {
        let source = ann("a.B.m", &["int"], "void", "LOCATION", Origin::Catalog, SourceOrSink::Source);
        let sink = ann("a.B.m", &["int"], "void", "NETWORK", Origin::FrameworkScan, SourceOrSink::Sink);
        let out = Resolver::new().resolve(vec![source, sink]);

        assert_eq!(out.annotations[0].source_or_sink(), SourceOrSink::Source);
        assert_eq!(out.conflicts.len(), 1);
        let conflict = &out.conflicts[0];
        assert_eq!(conflict.field, ConflictField::SourceOrSink);
        assert_eq!(conflict.current.value, "source");
        assert_eq!(conflict.current.origin, Origin::Catalog);
        assert_eq!(conflict.challenger.value, "sink");
        assert_eq!(conflict.challenger.origin, Origin::FrameworkScan);
        assert_eq!(conflict.outcome, Outcome::Retained);
        assert_eq!(conflict.key.to_string(), "a.B.m(int)");
    }

    #[test]
    fn test_none_challenging_a_claim_is_reported() {
        let sink = ann("a.B.m", &["int"], "void", "NETWORK", Origin::Catalog, SourceOrSink::Sink);
        let none = ann("a.B.m", &["int"], "void", "NO_CATEGORY", Origin::FrameworkScan, SourceOrSink::Neither);
        let out = Resolver::new().resolve(vec![sink, none]);

        assert_eq!(out.annotations[0].source_or_sink(), SourceOrSink::Sink);
        assert_eq!(out.conflicts.len(), 1);
    }

    #[test]
    fn test_override_lets_framework_scan_win() {
        let method = "android.content.ContextWrapper.openFileInput";
        let catalog = ann(method, &["java.lang.String"], "java.io.FileInputStream", "FILE", Origin::Catalog, SourceOrSink::Source);
        let scan = ann(method, &["String"], "FileInputStream", "FILE", Origin::FrameworkScan, SourceOrSink::Sink);

        let out = Resolver::new().resolve(vec![catalog, scan]);
        let merged = &out.annotations[0];
        assert_eq!(merged.source_or_sink(), SourceOrSink::Sink);
        assert_eq!(merged.origin(), Origin::FrameworkScan);
        assert_eq!(merged.returns(), "java.io.FileInputStream");
        assert_eq!(out.conflicts[0].outcome, Outcome::Overridden);
    }

    #[test]
    fn test_override_ignored_without_table_entry() {
        let method = "android.content.ContextWrapper.openFileInput";
        let catalog = ann(method, &["String"], "FileInputStream", "FILE", Origin::Catalog, SourceOrSink::Source);
        let scan = ann(method, &["String"], "FileInputStream", "FILE", Origin::FrameworkScan, SourceOrSink::Sink);

        let out = Resolver::with_overrides(OverrideTable::empty()).resolve(vec![catalog, scan]);
        assert_eq!(out.annotations[0].source_or_sink(), SourceOrSink::Source);
        assert_eq!(out.conflicts[0].outcome, Outcome::Retained);
    }

    #[test]
    fn test_category_specificity() {
        let vague = ann("a.B.m", &["int"], "void", "NO_CATEGORY", Origin::FrameworkScan, SourceOrSink::Sink);
        let specific = ann("a.B.m", &["int"], "void", "NETWORK", Origin::Catalog, SourceOrSink::Sink);
        let out = Resolver::new().resolve(vec![vague, specific]);
        assert_eq!(out.annotations[0].category(), "NETWORK");
        assert!(out.conflicts.is_empty());
    }

    #[test]
    fn test_category_disagreement_is_reported() {
        let a = ann("a.B.m", &["int"], "void", "NETWORK", Origin::Catalog, SourceOrSink::Sink);
        let b = ann("a.B.m", &["int"], "void", "SMS_MMS", Origin::FrameworkScan, SourceOrSink::Sink);
        let out = Resolver::new().resolve(vec![a, b]);
        assert_eq!(out.annotations[0].category(), "NETWORK");
        assert_eq!(out.conflicts.len(), 1);
        assert_eq!(out.conflicts[0].field, ConflictField::Category);
    }

    #[test]
    fn test_longer_returns_kept() {
        let short = ann("a.B.m", &["int"], "String", "NETWORK", Origin::Catalog, SourceOrSink::Sink);
        let long = ann("a.B.m", &["int"], "java.lang.String", "NETWORK", Origin::FrameworkScan, SourceOrSink::Sink);
        let out = Resolver::new().resolve(vec![short, long]);
        assert_eq!(out.annotations[0].returns(), "java.lang.String");
        assert_eq!(out.annotations[0].origin(), Origin::Catalog);
    }

    #[test]
    fn test_replacement_keeps_longer_returns() {
        let long = ann("a.B.m", &["int"], "java.lang.String", "unannotated", Origin::PermissionMap, SourceOrSink::Unannotated);
        let short = ann("a.B.m", &["int"], "String", "NETWORK", Origin::Catalog, SourceOrSink::Sink);
        let out = Resolver::new().resolve(vec![long, short]);
        let merged = &out.annotations[0];
        assert_eq!(merged.source_or_sink(), SourceOrSink::Sink);
        assert_eq!(merged.returns(), "java.lang.String");
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let input = vec![
            ann("a.B.x", &[""], "int", "unannotated", Origin::PermissionMap, SourceOrSink::Unannotated),
            ann("a.B.y", &[""], "int", "NETWORK", Origin::Catalog, SourceOrSink::Source),
            ann("a.B.x", &[""], "int", "NETWORK", Origin::Catalog, SourceOrSink::Sink),
        ];
        let out = Resolver::new().resolve(input);
        let names: Vec<_> = out.annotations.iter().map(|a| a.method_name()).collect();
        assert_eq!(names, vec!["x", "y"]);
        assert_eq!(out.annotations[0].source_or_sink(), SourceOrSink::Sink);
    }

    #[test]
    fn test_idempotent() {
        let input = vec![
            ann("a.B.x", &[""], "int", "unannotated", Origin::PermissionMap, SourceOrSink::Unannotated),
            ann("a.B.x", &[""], "java.lang.Integer", "NETWORK", Origin::Catalog, SourceOrSink::Sink),
            ann("a.B.x", &[""], "int", "LOCATION", Origin::FrameworkScan, SourceOrSink::Source),
        ];
        let resolver = Resolver::new();
        let once = resolver.resolve(input);
        let twice = resolver.resolve(once.annotations.clone());
        assert_eq!(once.annotations, twice.annotations);
        assert!(twice.conflicts.is_empty());
    }
}
