//! unisink: unifies Android source/sink annotation datasets.
//!
//! Three datasets describe Android API methods as sources, sinks or
//! neither, each in its own format: the DroidSafe framework scan, the SuSi
//! catalog and a permission-to-method map. unisink parses all three into
//! one canonical [`Annotation`] record, merges records that describe the
//! same method, and reports the disagreements it cannot settle.
//!
//! # Core Principles
//!
//! - **Specificity wins**: `unannotated`, `none` and `NO_CATEGORY` yield to any concrete claim
//! - **No silent arbitration**: conflicting concrete claims are reported, never hidden
//! - **Deterministic**: output order is first-seen order of each method
//!
//! # Example
//!
//! ```no_run
//! use unisink::{Unifier, UnifyInputs};
//!
//! let inputs = UnifyInputs::new()
//!     .with_framework_scan("scanning_2014-02-10.txt")
//!     .with_catalog("Ouput_CatSources_v0_9.txt")
//!     .with_catalog("Ouput_CatSinks_v0_9.txt")
//!     .with_permission_map("perm_map.csv");
//!
//! let result = Unifier::new().unify(&inputs).unwrap();
//!
//! println!("Methods: {}", result.annotations.len());
//! println!("Conflicts: {}", result.conflicts.len());
//! ```

pub mod collect;
pub mod error;
pub mod export;
pub mod input;
pub mod model;
pub mod normalize;
pub mod parse;
pub mod resolve;
pub mod stats;

mod unifier;

pub use crate::unifier::{Unifier, UnifyConfig, UnifyInputs, UnifyResult, UnifySummary};
pub use collect::{Collector, SourceEntry, SourceSummary};
pub use error::{Result, UnisinkError};
pub use export::{write_annotations, write_annotations_to, DEFAULT_OUTPUT};
pub use input::{Row, SourceMetadata};
pub use model::{Annotation, MethodKey, Origin, SourceOrSink};
pub use normalize::CategoryNormalizer;
pub use parse::{AnnotationFormat, ParsedFields};
pub use resolve::{Conflict, ConflictField, Outcome, OverrideTable, Resolution, Resolver};
pub use stats::AnnotationStats;
