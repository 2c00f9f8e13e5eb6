//! The canonical annotation record.

use serde::{Deserialize, Serialize};

use super::key::MethodKey;
use super::kind::{Origin, SourceOrSink};

/// Separator between the four fields of a serialized record.
pub const FIELD_SEPARATOR: &str = "|||";

/// Keep only the last `.`-delimited token of a type name.
pub fn simplify_type(type_name: &str) -> &str {
    type_name
        .rsplit_once('.')
        .map_or(type_name, |(_, simple)| simple)
}

/// A method annotation in canonical form.
///
/// Fields are private so `method_name` is always unqualified. Merging
/// produces new records through [`Annotation::with_returns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    class_name: String,
    method_name: String,
    parameters: Vec<String>,
    returns: String,
    category: String,
    source_or_sink: SourceOrSink,
    origin: Origin,
}

impl Annotation {
    /// Create a record.
    ///
    /// `method_name` may be fully qualified. When `class_name` is empty it is
    /// derived from the qualification of `method_name`.
    pub fn new(
        class_name: impl Into<String>,
        method_name: &str,
        parameters: Vec<String>,
        returns: impl Into<String>,
        category: impl Into<String>,
        origin: Origin,
        source_or_sink: SourceOrSink,
    ) -> Self {
        let class_name = class_name.into();
        let (qualifier, simple_name) = match method_name.rsplit_once('.') {
            Some((qualifier, simple)) => (qualifier, simple),
            None => ("", method_name),
        };
        let class_name = if class_name.is_empty() {
            qualifier.to_string()
        } else {
            class_name
        };

        Self {
            class_name,
            method_name: simple_name.to_string(),
            parameters,
            returns: returns.into(),
            category: category.into(),
            source_or_sink,
            origin,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn returns(&self) -> &str {
        &self.returns
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn source_or_sink(&self) -> SourceOrSink {
        self.source_or_sink
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Identity of the method this record describes.
    pub fn identity_key(&self) -> MethodKey {
        MethodKey::new(
            self.class_name.as_str(),
            self.method_name.as_str(),
            self.parameters.as_slice(),
        )
    }

    /// Copy of this record with a different return type.
    pub fn with_returns(&self, returns: impl Into<String>) -> Self {
        Self {
            returns: returns.into(),
            ..self.clone()
        }
    }

    /// Copy of this record with a different category.
    pub fn with_category(&self, category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..self.clone()
        }
    }

    /// Human-readable signature: `<Class: Ret method(P1,P2)>` with simple type names.
    pub fn signature(&self) -> String {
        let params: Vec<&str> = self.parameters.iter().map(|p| simplify_type(p)).collect();
        format!(
            "<{}: {} {}({})>",
            self.class_name,
            simplify_type(&self.returns),
            self.method_name,
            params.join(",")
        )
    }

    /// The four output fields: signature, origin, source/sink, category.
    pub fn to_row(&self) -> [String; 4] {
        [
            self.signature(),
            self.origin.to_string(),
            self.source_or_sink.to_string(),
            self.category.clone(),
        ]
    }

    /// Serialized form, the four output fields joined by [`FIELD_SEPARATOR`].
    pub fn to_record_string(&self) -> String {
        self.to_row().join(FIELD_SEPARATOR)
    }
}
