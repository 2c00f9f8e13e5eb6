//! Annotation kinds, origins and category sentinels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category sentinel meaning "this origin makes no claim".
pub const UNANNOTATED: &str = "unannotated";

/// Category sentinel used by the framework scan for unclassified methods.
pub const NO_CATEGORY: &str = "NO_CATEGORY";

/// Whether a category string carries no specific classification.
pub fn is_unspecified_category(category: &str) -> bool {
    category == UNANNOTATED || category.contains(NO_CATEGORY)
}

/// Source/sink classification of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOrSink {
    /// Produces sensitive data.
    Source,
    /// Consumes or transmits sensitive data.
    Sink,
    /// Annotated as neither.
    #[serde(rename = "none")]
    Neither,
    /// The origin makes no claim at all.
    Unannotated,
}

impl SourceOrSink {
    /// All values, in reporting order.
    pub const ALL: [SourceOrSink; 4] = [
        SourceOrSink::Sink,
        SourceOrSink::Source,
        SourceOrSink::Neither,
        SourceOrSink::Unannotated,
    ];

    /// The canonical string for this value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceOrSink::Source => "source",
            SourceOrSink::Sink => "sink",
            SourceOrSink::Neither => "none",
            SourceOrSink::Unannotated => UNANNOTATED,
        }
    }

    /// True for values that yield to any other claim.
    pub fn is_unclaimed(&self) -> bool {
        matches!(self, SourceOrSink::Neither | SourceOrSink::Unannotated)
    }

    /// Infer the kind from a catalog file name.
    ///
    /// `Source`/`source` wins over `Sink`/`sink` when both appear.
    pub fn from_file_name(name: &str) -> Option<SourceOrSink> {
        if name.contains("source") || name.contains("Source") {
            Some(SourceOrSink::Source)
        } else if name.contains("sink") || name.contains("Sink") {
            Some(SourceOrSink::Sink)
        } else {
            None
        }
    }
}

impl fmt::Display for SourceOrSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which input dataset a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Origin {
    /// DroidSafe framework scan (`dsafe`).
    #[serde(rename = "dsafe")]
    FrameworkScan,
    /// SuSi source/sink catalog (`susi`).
    #[serde(rename = "susi")]
    Catalog,
    /// Permission-to-method mapping (`perm_map`).
    #[serde(rename = "perm_map")]
    PermissionMap,
}

impl Origin {
    /// All origins, in collection order.
    pub const ALL: [Origin; 3] = [Origin::FrameworkScan, Origin::Catalog, Origin::PermissionMap];

    /// Tag written to the output file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::FrameworkScan => "dsafe",
            Origin::Catalog => "susi",
            Origin::PermissionMap => "perm_map",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Origin::FrameworkScan => "DroidSafe",
            Origin::Catalog => "SuSi",
            Origin::PermissionMap => "permission map",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "dsafe" | "droidsafe" | "framework_scan" => Ok(Origin::FrameworkScan),
            "susi" | "catalog" => Ok(Origin::Catalog),
            "perm_map" | "permission_map" => Ok(Origin::PermissionMap),
            _ => Err(format!(
                "Unknown origin: {}. Use dsafe, susi, or perm_map.",
                s
            )),
        }
    }
}
