//! Drives the format parsers over raw input and builds the unresolved
//! record list.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::Row;
use crate::model::{Annotation, Origin};
use crate::parse::AnnotationFormat;

/// A raw entry as handed to a parser.
pub trait SourceEntry<Raw: ?Sized> {
    fn raw(&self) -> &Raw;

    /// 1-based line in the source, when it differs from the entry's position.
    fn line(&self) -> Option<u64> {
        None
    }
}

impl SourceEntry<str> for String {
    fn raw(&self) -> &str {
        self
    }
}

impl SourceEntry<str> for &str {
    fn raw(&self) -> &str {
        self
    }
}

impl SourceEntry<[String]> for Vec<String> {
    fn raw(&self) -> &[String] {
        self
    }
}

impl SourceEntry<[String]> for Row {
    fn raw(&self) -> &[String] {
        &self.cells
    }

    fn line(&self) -> Option<u64> {
        Some(self.line)
    }
}

/// Counts for one collected input source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    /// Source identifier, usually a file path.
    pub source: String,
    pub origin: Origin,
    /// Raw lines or rows seen.
    pub entries: usize,
    /// Records produced.
    pub records: usize,
}

impl SourceSummary {
    /// Entries skipped as headers or out-of-scope methods.
    pub fn skipped(&self) -> usize {
        self.entries - self.records
    }
}

/// Accumulates records from any number of sources, in collection order.
#[derive(Debug, Default)]
pub struct Collector {
    annotations: Vec<Annotation>,
    summaries: Vec<SourceSummary>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every source of one format.
    ///
    /// `extract` yields the raw entries of a source. `make_parser` is called
    /// once per source, so per-file settings (the catalog's source/sink kind)
    /// are derived from the identifier rather than from each line.
    pub fn collect<P, I, R, E, F>(
        &mut self,
        sources: &[I],
        mut extract: E,
        make_parser: F,
    ) -> Result<&mut Self>
    where
        P: AnnotationFormat,
        I: AsRef<Path>,
        R: SourceEntry<P::Raw>,
        E: FnMut(&Path) -> Result<Vec<R>>,
        F: Fn(&Path) -> P,
    {
        for source in sources {
            let path = source.as_ref();
            let parser = make_parser(path);
            let entries = extract(path)?;
            self.collect_entries(&path.display().to_string(), &parser, &entries)?;
        }
        Ok(self)
    }

    /// Collect already-extracted entries of a single source.
    ///
    /// Returns the number of records produced. A malformed entry aborts the
    /// whole batch with its `source:line` location; entries without a line of
    /// their own are numbered by position.
    pub fn collect_entries<P, R>(&mut self, source: &str, parser: &P, entries: &[R]) -> Result<usize>
    where
        P: AnnotationFormat,
        R: SourceEntry<P::Raw>,
    {
        let before = self.annotations.len();

        for (index, entry) in entries.iter().enumerate() {
            let parsed = parser.parse(entry.raw()).map_err(|e| {
                let line = entry.line().unwrap_or(index as u64 + 1);
                e.at(format!("{}:{}", source, line))
            })?;
            if let Some(fields) = parsed {
                self.annotations.push(fields.into_annotation(P::ORIGIN));
            }
        }

        let records = self.annotations.len() - before;
        let origin = P::ORIGIN;
        tracing::debug!(
            source,
            origin = %origin,
            entries = entries.len(),
            records,
            "collected annotations"
        );
        self.summaries.push(SourceSummary {
            source: source.to_string(),
            origin,
            entries: entries.len(),
            records,
        });

        Ok(records)
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn summaries(&self) -> &[SourceSummary] {
        &self.summaries
    }

    /// Consume the collector, returning the unresolved records and per-source counts.
    pub fn finish(self) -> (Vec<Annotation>, Vec<SourceSummary>) {
        (self.annotations, self.summaries)
    }
}
