//! Manual conflict overrides.

use indexmap::IndexMap;

use crate::error::{Result, UnisinkError};
use crate::model::{MethodKey, Origin};

/// Methods whose source/sink conflicts were adjudicated by hand.
///
/// Each entry maps a method to the origin whose claim wins when it
/// challenges a conflicting record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideTable {
    entries: IndexMap<MethodKey, Origin>,
}

impl OverrideTable {
    /// Table with no overrides.
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Force `origin` to win conflicts on `key`.
    pub fn with_override(mut self, key: MethodKey, origin: Origin) -> Self {
        self.entries.insert(key, origin);
        self
    }

    /// Add an override from `METHOD=ORIGIN`, e.g.
    /// `android.content.ContextWrapper.openFileInput(String)=dsafe`.
    pub fn with_entry(self, entry: &str) -> Result<Self> {
        let (method, origin) = entry.rsplit_once('=').ok_or_else(|| {
            UnisinkError::Config(format!("Override '{}' must look like METHOD=ORIGIN", entry))
        })?;
        let key = MethodKey::parse(method).ok_or_else(|| {
            UnisinkError::Config(format!(
                "Override method '{}' must look like pkg.Class.method(Type,...)",
                method
            ))
        })?;
        let origin = origin.trim().parse::<Origin>().map_err(UnisinkError::Config)?;
        Ok(self.with_override(key, origin))
    }

    /// The origin forced to win for `key`, if any.
    pub fn forced_origin(&self, key: &MethodKey) -> Option<Origin> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MethodKey, &Origin)> {
        self.entries.iter()
    }
}

impl Default for OverrideTable {
    /// `ContextWrapper.openFileInput(String)`: checked by hand, the
    /// framework scan's annotation is the correct one.
    fn default() -> Self {
        Self::empty().with_override(
            MethodKey::new(
                "android.content.ContextWrapper",
                "openFileInput",
                &["String"],
            ),
            Origin::FrameworkScan,
        )
    }
}
