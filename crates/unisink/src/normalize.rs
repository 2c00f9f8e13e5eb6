//! Category string normalization.

use serde::{Deserialize, Serialize};

use crate::model::Annotation;

/// Suffix removed from categories by default. The catalog appends it to
/// categories the framework scan spells without it (`NETWORK_INFORMATION`
/// vs `NETWORK`).
pub const DEFAULT_STRIPPED_SUFFIX: &str = "_INFORMATION";

/// Removes configured fragments from category strings.
///
/// Runs before duplicate resolution so that two spellings of the same
/// category never look like a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNormalizer {
    fragments: Vec<String>,
}

impl CategoryNormalizer {
    /// Normalizer that removes every occurrence of each fragment.
    pub fn new<S: Into<String>>(fragments: impl IntoIterator<Item = S>) -> Self {
        Self {
            fragments: fragments
                .into_iter()
                .map(Into::into)
                .filter(|f: &String| !f.is_empty())
                .collect(),
        }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Normalize one category string.
    pub fn normalize(&self, category: &str) -> String {
        self.fragments
            .iter()
            .fold(category.to_string(), |acc, fragment| acc.replace(fragment.as_str(), ""))
    }

    /// Normalize the category of every record, keeping order.
    pub fn apply(&self, annotations: Vec<Annotation>) -> Vec<Annotation> {
        if self.fragments.is_empty() {
            return annotations;
        }

        annotations
            .into_iter()
            .map(|ann| {
                let category = self.normalize(ann.category());
                if category == ann.category() {
                    ann
                } else {
                    ann.with_category(category)
                }
            })
            .collect()
    }
}

impl Default for CategoryNormalizer {
    fn default() -> Self {
        Self::new([DEFAULT_STRIPPED_SUFFIX])
    }
}
