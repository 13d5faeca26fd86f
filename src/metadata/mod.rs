//! Declared documentation metadata of a controller and its handlers.
//!
//! The pipeline only talks to [`MetadataProvider`]. Two sources are
//! available:
//!
//! - [`ControllerMetadata`]: plain data assembled in memory
//! - [`attributes::AttributeMetadataProvider`]: attributes read from a
//!   controller `impl` block parsed with `syn`

pub mod attributes;

use crate::model::{HttpMethod, TypeRef};

/// Source of "what is declared on this controller".
pub trait MetadataProvider {
    /// Simple name of the controller type
    fn controller_name(&self) -> String;

    /// Class-level path templates in declaration order
    fn path_templates(&self) -> Vec<String>;

    /// Handler methods in declaration order
    fn handlers(&self) -> Vec<HandlerMetadata>;
}

/// Operation-level documentation declared on a handler.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationMetadata {
    pub summary: String,
    pub notes: String,
    /// Documented response type override, empty when not given
    pub response_class: String,
    pub multi_value_response: bool,
    /// Raw comma-separated tags
    pub tags: String,
}

/// Parameter-level documentation declared on a handler argument.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParamMetadata {
    /// Explicit name override, empty when not given
    pub name: String,
    pub description: String,
    pub internal_description: String,
    pub default_value: String,
    pub required: bool,
    pub allow_multiple: bool,
    /// Raw allowable-values expression
    pub allowable_values: String,
}

/// An explicit model declaration on a handler or argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDeclaration {
    /// Declared model name, may be empty
    pub name: String,
    pub ty: TypeRef,
    /// Whether the documented name is derived from the type
    pub implicit: bool,
}

impl ModelDeclaration {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            name: String::new(),
            ty,
            implicit: true,
        }
    }

    pub fn named(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            implicit: false,
        }
    }

    /// Name the model is registered under
    pub fn simple_name(&self) -> &str {
        self.ty.raw_name()
    }

    /// Type name written into the documentation
    pub fn documented_type(&self) -> String {
        if self.implicit || self.name.is_empty() {
            self.ty.to_string()
        } else {
            self.name.clone()
        }
    }
}

/// A declared handler argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    /// Declared identifier
    pub name: String,
    /// Static type as written, before type substitution
    pub ty: TypeRef,
    pub metadata: Option<ParamMetadata>,
    pub model: Option<ModelDeclaration>,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            metadata: None,
            model: None,
        }
    }
}

/// A handler method and everything declared on it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HandlerMetadata {
    pub name: String,
    pub http_method: HttpMethod,
    /// Method-level path templates in declaration order
    pub path_templates: Vec<String>,
    /// Static return type as written; `None` for handlers returning `()`
    pub return_type: Option<TypeRef>,
    pub operation: Option<OperationMetadata>,
    pub model: Option<ModelDeclaration>,
    pub parameters: Vec<ParameterInfo>,
}

impl HandlerMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// In-memory controller description.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControllerMetadata {
    pub name: String,
    pub path_templates: Vec<String>,
    pub handlers: Vec<HandlerMetadata>,
}

impl ControllerMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl MetadataProvider for ControllerMetadata {
    fn controller_name(&self) -> String {
        self.name.clone()
    }

    fn path_templates(&self) -> Vec<String> {
        self.path_templates.clone()
    }

    fn handlers(&self) -> Vec<HandlerMetadata> {
        self.handlers.clone()
    }
}
