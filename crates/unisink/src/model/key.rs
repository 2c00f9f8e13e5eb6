//! Method identity keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::annotation::simplify_type;

/// Identity of a method across datasets: class, method name and the simple
/// names of its parameter types. The return type is not part of identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodKey {
    pub class_name: String,
    pub method_name: String,
    pub parameters: Vec<String>,
}

impl MethodKey {
    /// Build a key, simplifying each parameter type.
    pub fn new<S: AsRef<str>>(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        parameters: &[S],
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            parameters: parameters
                .iter()
                .map(|p| simplify_type(p.as_ref()).to_string())
                .collect(),
        }
    }

    /// Parse a key from its display form, e.g. `android.content.ContextWrapper.openFileInput(String)`.
    pub fn parse(text: &str) -> Option<Self> {
        let (qualified, rest) = text.trim().split_once('(')?;
        let params = rest.strip_suffix(')')?;
        let (class_name, method_name) = qualified.rsplit_once('.')?;
        if class_name.is_empty() || method_name.is_empty() {
            return None;
        }
        let parameters: Vec<&str> = params.split(',').map(str::trim).collect();
        Some(Self::new(class_name, method_name, &parameters))
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({})",
            self.class_name,
            self.method_name,
            self.parameters.join(",")
        )
    }
}
