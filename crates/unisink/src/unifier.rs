//! Main Unifier struct and public API.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::collect::Collector;
use crate::error::{Result, UnisinkError};
use crate::input::{load_lines, load_rows, SourceMetadata};
use crate::model::{Annotation, Origin, SourceOrSink};
use crate::normalize::CategoryNormalizer;
use crate::parse::{CatalogParser, FrameworkScanParser, PermissionMapParser};
use crate::resolve::{Conflict, OverrideTable, Resolver};
use crate::stats::AnnotationStats;

/// Configuration for a unification run.
#[derive(Debug, Clone)]
pub struct UnifyConfig {
    /// Manually adjudicated conflicts.
    pub overrides: OverrideTable,
    /// Category cleanup applied before resolution (None = keep categories as read).
    pub normalizer: Option<CategoryNormalizer>,
    /// Reject catalog files whose name implies neither sources nor sinks.
    pub strict_catalog_kind: bool,
}

impl Default for UnifyConfig {
    fn default() -> Self {
        Self {
            overrides: OverrideTable::default(),
            normalizer: Some(CategoryNormalizer::default()),
            strict_catalog_kind: false,
        }
    }
}

/// Input files, grouped by format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnifyInputs {
    /// DroidSafe scan files.
    pub framework_scan: Vec<PathBuf>,
    /// SuSi catalog files; the file name says whether they list sources or sinks.
    pub catalog: Vec<PathBuf>,
    /// Permission-map CSV files.
    pub permission_map: Vec<PathBuf>,
}

impl UnifyInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_framework_scan(mut self, path: impl Into<PathBuf>) -> Self {
        self.framework_scan.push(path.into());
        self
    }

    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog.push(path.into());
        self
    }

    pub fn with_permission_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.permission_map.push(path.into());
        self
    }

    /// Every input path, in collection order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.framework_scan
            .iter()
            .chain(&self.catalog)
            .chain(&self.permission_map)
            .map(PathBuf::as_path)
    }

    /// At least one annotated dataset (scan or catalog) is required; the
    /// permission map only adds unannotated signatures.
    pub fn validate(&self) -> Result<()> {
        if self.framework_scan.is_empty() && self.catalog.is_empty() {
            return Err(UnisinkError::EmptyInput(
                "at least one framework-scan or catalog file is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a unification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifyResult {
    /// One record per method, in first-seen order.
    pub annotations: Vec<Annotation>,
    /// Conflicts found while resolving duplicates.
    pub conflicts: Vec<Conflict>,
    /// Metadata for every input file.
    pub sources: Vec<SourceMetadata>,
    /// Counts over `annotations`.
    pub stats: AnnotationStats,
    pub summary: UnifySummary,
}

/// Totals for a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnifySummary {
    /// Records before duplicate resolution.
    pub collected: usize,
    /// Records after duplicate resolution.
    pub unique: usize,
    /// Records merged into an earlier one.
    pub merged: usize,
    pub conflicts: usize,
}

/// The unification pipeline: read, parse, normalize, resolve.
pub struct Unifier {
    config: UnifyConfig,
    resolver: Resolver,
}

impl Unifier {
    /// Create a Unifier with default configuration.
    pub fn new() -> Self {
        Self::with_config(UnifyConfig::default())
    }

    /// Create a Unifier with custom configuration.
    pub fn with_config(config: UnifyConfig) -> Self {
        let resolver = Resolver::with_overrides(config.overrides.clone());
        Self { config, resolver }
    }

    pub fn config(&self) -> &UnifyConfig {
        &self.config
    }

    /// Read every input file and produce the unified record set.
    pub fn unify(&self, inputs: &UnifyInputs) -> Result<UnifyResult> {
        inputs.validate()?;

        // Catalog kinds come from file names, so a strict run fails before any reading.
        let catalog_parsers = inputs
            .catalog
            .iter()
            .map(|path| self.catalog_parser(path))
            .collect::<Result<Vec<_>>>()?;

        let mut sources: Vec<SourceMetadata> = Vec::new();
        let mut collector = Collector::new();

        collector.collect(
            &inputs.framework_scan,
            |path| {
                let (lines, meta) = load_lines(path, Origin::FrameworkScan)?;
                sources.push(meta);
                Ok(lines)
            },
            |_| FrameworkScanParser,
        )?;

        for (path, parser) in inputs.catalog.iter().zip(&catalog_parsers) {
            let (lines, meta) = load_lines(path, Origin::Catalog)?;
            sources.push(meta);
            collector.collect_entries(&path.display().to_string(), parser, &lines)?;
        }

        collector.collect(
            &inputs.permission_map,
            |path| {
                let (rows, meta) = load_rows(path, Origin::PermissionMap)?;
                sources.push(meta);
                Ok(rows)
            },
            |_| PermissionMapParser,
        )?;

        let (annotations, summaries) = collector.finish();
        for (meta, summary) in sources.iter_mut().zip(&summaries) {
            meta.record_count = summary.records;
        }

        let mut result = self.unify_records(annotations);
        result.sources = sources;
        Ok(result)
    }

    /// Normalize and resolve records that are already in memory.
    pub fn unify_records(&self, annotations: Vec<Annotation>) -> UnifyResult {
        let collected = annotations.len();

        let annotations = match &self.config.normalizer {
            Some(normalizer) => normalizer.apply(annotations),
            None => annotations,
        };

        let resolution = self.resolver.resolve(annotations);
        let stats = AnnotationStats::from_annotations(&resolution.annotations);

        let summary = UnifySummary {
            collected,
            unique: resolution.annotations.len(),
            merged: resolution.merged,
            conflicts: resolution.conflicts.len(),
        };

        tracing::info!(
            collected = summary.collected,
            unique = summary.unique,
            conflicts = summary.conflicts,
            "unified annotations"
        );

        UnifyResult {
            annotations: resolution.annotations,
            conflicts: resolution.conflicts,
            sources: Vec::new(),
            stats,
            summary,
        }
    }

    /// Catalog parser for one file, honoring `strict_catalog_kind`.
    fn catalog_parser(&self, path: &Path) -> Result<CatalogParser> {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        match SourceOrSink::from_file_name(&name) {
            Some(kind) => Ok(CatalogParser::new(kind)),
            None if self.config.strict_catalog_kind => Err(UnisinkError::Config(format!(
                "cannot tell whether catalog file '{}' lists sources or sinks",
                path.display()
            ))),
            None => {
                tracing::warn!(
                    file = %path.display(),
                    "catalog file name implies neither sources nor sinks, records are unannotated"
                );
                Ok(CatalogParser::new(SourceOrSink::Unannotated))
            }
        }
    }
}

impl Default for Unifier {
    fn default() -> Self {
        Self::new()
    }
}
