//! Duplicate resolution.
//!
//! Records describing the same method are merged into one. When two
//! records disagree, the more specific claim wins: `unannotated`, `none`
//! and `NO_CATEGORY` yield to any concrete value. Disagreements between
//! two concrete claims are reported as [`Conflict`]s and the first record
//! is kept, unless the [`OverrideTable`] names the challenger's origin.

mod conflict;
mod overrides;
mod resolver;

pub use conflict::{Claim, Conflict, ConflictField, Outcome};
pub use overrides::OverrideTable;
pub use resolver::{Resolution, Resolver};
