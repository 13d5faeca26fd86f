//! Type-substitution rules applied before filters see a static type.
//!
//! Handlers wrap their real payload types in extractors and responders
//! (`Json<Pet>`, `Result<Json<Pet>, Error>`). The configuration says which
//! wrappers to peel off, which raw names to document under another name,
//! and which parameter types are framework plumbing rather than API input.

use crate::error::{Error, Result};
use crate::model::TypeRef;
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Configuration of a documentation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocumentationConfig {
    /// Raw names replaced by their first generic argument
    pub unwrapped_types: Vec<String>,
    /// Raw names documented under another name
    pub alternate_types: BTreeMap<String, String>,
    /// Raw parameter types that never produce parameter documentation
    pub ignorable_parameter_types: Vec<String>,
}

impl Default for DocumentationConfig {
    fn default() -> Self {
        let names = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            unwrapped_types: names(&["Json", "Path", "Query", "Form", "Data", "Result", "Box", "Arc"]),
            alternate_types: BTreeMap::new(),
            ignorable_parameter_types: names(&[
                "HttpRequest",
                "Request",
                "State",
                "Extension",
                "HeaderMap",
                "Payload",
            ]),
        }
    }
}

impl DocumentationConfig {
    /// Loads a configuration file, picking JSON or YAML by extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!("Loading documentation config from {}", path.display());
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            other => Err(Error::ConfigError(format!(
                "unsupported config format {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    /// Returns the type to document in place of `ty`.
    pub fn maybe_alternate_type(&self, ty: &TypeRef) -> TypeRef {
        let mut current = ty;
        while self.unwrapped_types.iter().any(|n| n == current.raw_name()) {
            match current.first_arg() {
                Some(inner) => current = inner,
                None => break,
            }
        }

        match self.alternate_types.get(current.raw_name()) {
            Some(alternate) => {
                debug!("Documenting {} as {}", current.raw_name(), alternate);
                TypeRef {
                    name: alternate.clone(),
                    ..current.clone()
                }
            }
            None => current.clone(),
        }
    }

    pub fn is_ignorable(&self, ty: &TypeRef) -> bool {
        self.ignorable_parameter_types
            .iter()
            .any(|n| n == ty.raw_name())
    }
}
