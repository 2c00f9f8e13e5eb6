//! Unresolvable annotation conflicts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Annotation, MethodKey, Origin};

/// Which field two records disagreed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictField {
    SourceOrSink,
    Category,
}

impl ConflictField {
    pub fn label(&self) -> &'static str {
        match self {
            ConflictField::SourceOrSink => "source/sink",
            ConflictField::Category => "category",
        }
    }
}

/// How a conflict was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The record seen first was kept.
    Retained,
    /// An override forced the challenger's origin to win.
    Overridden,
}

/// One side of a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub value: String,
    pub origin: Origin,
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value, self.origin)
    }
}

/// Two records for the same method making different concrete claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub key: MethodKey,
    pub field: ConflictField,
    /// The record that was current when the challenger arrived.
    pub current: Claim,
    pub challenger: Claim,
    pub outcome: Outcome,
}

impl Conflict {
    pub(crate) fn between(
        key: &MethodKey,
        field: ConflictField,
        current: &Annotation,
        challenger: &Annotation,
        outcome: Outcome,
    ) -> Self {
        let claim = |ann: &Annotation| Claim {
            value: match field {
                ConflictField::SourceOrSink => ann.source_or_sink().to_string(),
                ConflictField::Category => ann.category().to_string(),
            },
            origin: ann.origin(),
        };

        Self {
            key: key.clone(),
            field,
            current: claim(current),
            challenger: claim(challenger),
            outcome,
        }
    }

    /// The claim that survived.
    pub fn winner(&self) -> &Claim {
        match self.outcome {
            Outcome::Retained => &self.current,
            Outcome::Overridden => &self.challenger,
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} vs {}, using {}",
            self.key,
            self.field.label(),
            self.current,
            self.challenger,
            self.winner()
        )?;
        if self.outcome == Outcome::Overridden {
            f.write_str(" (override)")?;
        }
        Ok(())
    }
}
