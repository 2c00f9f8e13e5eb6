//! Canonical annotation model.
//!
//! Every input format is translated into [`Annotation`] records. Two records
//! describe the same method when their [`MethodKey`]s are equal.

mod annotation;
mod key;
mod kind;

pub use annotation::{simplify_type, Annotation, FIELD_SEPARATOR};
pub use key::MethodKey;
pub use kind::{is_unspecified_category, Origin, SourceOrSink, NO_CATEGORY, UNANNOTATED};
