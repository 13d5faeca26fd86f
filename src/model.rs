//! Documentation model mutated by the filter pipeline.
//!
//! One [`ControllerDocumentation`] accumulates everything documented for a
//! controller: its operations grouped by route, the models they reference
//! and the diagnostics raised along the way.

use crate::diagnostics::Diagnostics;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;

/// Raw type names documented as `Array[T]`.
const SEQUENCE_TYPES: &[&str] = &["Vec", "VecDeque", "LinkedList", "HashSet", "BTreeSet"];

/// Static type information for a return value or parameter.
///
/// `name` is the raw type: the last path segment without generic
/// arguments, so `std::vec::Vec<models::Pet>` has the raw name `Vec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// The raw type name (e.g. "Pet", "Vec", "i64")
    pub name: String,
    /// Generic type arguments in declaration order
    pub generic_args: Vec<TypeRef>,
    /// Whether the concrete type is hidden (`impl Trait`, `_`)
    pub is_erased: bool,
}

impl TypeRef {
    /// Create a TypeRef for a simple type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_args: Vec::new(),
            is_erased: false,
        }
    }

    /// Create a TypeRef for a generic type such as `Vec<T>`
    pub fn generic(name: impl Into<String>, generic_args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            generic_args,
            is_erased: false,
        }
    }

    /// Create a TypeRef whose concrete type cannot be known statically
    pub fn erased(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_args: Vec::new(),
            is_erased: true,
        }
    }

    pub fn raw_name(&self) -> &str {
        &self.name
    }

    pub fn first_arg(&self) -> Option<&TypeRef> {
        self.generic_args.first()
    }

    pub fn is_option(&self) -> bool {
        self.name == "Option"
    }

    pub fn is_sequence(&self) -> bool {
        SEQUENCE_TYPES.contains(&self.name.as_str())
    }
}

/// Renders the documented name: sequences become `Array[T]` and
/// `Option<T>` documents as `T`.
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_arg() {
            Some(inner) if self.is_sequence() => write!(f, "Array[{}]", inner),
            Some(inner) if self.is_option() => write!(f, "{}", inner),
            None => f.write_str(&self.name),
            Some(_) => {
                write!(f, "{}<", self.name)?;
                for (i, arg) in self.generic_args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
        }
    }
}

/// HTTP methods a handler can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Parse an HTTP method name, ignoring case
    pub fn parse(method: &str) -> Option<Self> {
        match method.to_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            "options" => Some(HttpMethod::Options),
            "head" => Some(HttpMethod::Head),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

/// Where a parameter value is taken from in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamLocation {
    Path,
    #[default]
    Query,
    Header,
    Body,
    Form,
}

impl ParamLocation {
    /// Infers the location from the extractor wrapping a parameter type
    /// (`Path<T>`, `Json<T>`, ...). Unwrapped types are query parameters.
    pub fn infer(ty: &TypeRef) -> Self {
        match ty.raw_name() {
            "Path" => ParamLocation::Path,
            "Json" | "Bytes" => ParamLocation::Body,
            "Form" => ParamLocation::Form,
            "Header" | "TypedHeader" => ParamLocation::Header,
            _ => ParamLocation::Query,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Body => "body",
            ParamLocation::Form => "form",
        }
    }
}

/// Allowable values attached to a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueConstraint {
    List(Vec<String>),
    Range {
        lower: String,
        upper: String,
        lower_inclusive: bool,
        upper_inclusive: bool,
    },
}

impl fmt::Display for ValueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueConstraint::List(values) => write!(f, "{}", values.join(",")),
            ValueConstraint::Range {
                lower,
                upper,
                lower_inclusive,
                upper_inclusive,
            } => write!(
                f,
                "{}{},{}{}",
                if *lower_inclusive { '[' } else { '(' },
                lower,
                upper,
                if *upper_inclusive { ']' } else { ')' }
            ),
        }
    }
}

/// Documentation for one handler method.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationDoc {
    /// Handler function name
    pub nickname: String,
    pub http_method: HttpMethod,
    /// Composed route of the handler
    pub path: String,
    pub summary: String,
    pub notes: String,
    /// Ordered, de-duplicated tags
    pub tags: Vec<String>,
    /// Documented response type, e.g. `Pet` or `Array[Pet]`
    pub response_class: Option<String>,
    pub parameters: Vec<ParameterDoc>,
}

impl OperationDoc {
    pub fn new(nickname: impl Into<String>, http_method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            http_method,
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterDoc> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Documentation for one handler parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterDoc {
    pub name: String,
    pub description: String,
    /// Internal notes, not meant for API consumers
    pub notes: String,
    pub default_value: String,
    pub required: bool,
    pub allow_multiple: bool,
    pub allowable_values: Option<ValueConstraint>,
    pub data_type: Option<String>,
    pub param_type: ParamLocation,
}

impl ParameterDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A documented data type referenced by an operation or parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    pub name: String,
    pub ty: TypeRef,
    pub is_response_model: bool,
}

impl ModelEntry {
    pub fn new(name: impl Into<String>, ty: TypeRef, is_response_model: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            is_response_model,
        }
    }
}

/// Models registered for a controller, keyed by name.
///
/// Writes are serialized; a later registration under the same name
/// replaces the earlier one.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: Mutex<BTreeMap<String, ModelEntry>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model, returning the entry it replaced.
    pub fn put(&self, entry: ModelEntry) -> Option<ModelEntry> {
        let mut models = self
            .models
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = models.insert(entry.name.clone(), entry);
        if let Some(ref previous) = previous {
            debug!("Model {} registered again, replacing earlier entry", previous.name);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<ModelEntry> {
        self.models
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned()
    }

    /// All models ordered by name
    pub fn entries(&self) -> Vec<ModelEntry> {
        self.models
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.models
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything documented for one controller.
#[derive(Debug)]
pub struct ControllerDocumentation {
    controller: String,
    resource_path: String,
    /// Operations grouped by route
    apis: BTreeMap<String, Vec<OperationDoc>>,
    models: ModelRegistry,
    diagnostics: Diagnostics,
}

impl ControllerDocumentation {
    pub fn new(controller: impl Into<String>, resource_path: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            resource_path: resource_path.into(),
            apis: BTreeMap::new(),
            models: ModelRegistry::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    pub fn set_resource_path(&mut self, resource_path: impl Into<String>) {
        self.resource_path = resource_path.into();
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn put_model(&self, entry: ModelEntry) -> Option<ModelEntry> {
        self.models.put(entry)
    }

    /// Adds a finished operation under its route.
    pub fn add_operation(&mut self, operation: OperationDoc) {
        self.apis
            .entry(operation.path.clone())
            .or_default()
            .push(operation);
    }

    pub fn apis(&self) -> &BTreeMap<String, Vec<OperationDoc>> {
        &self.apis
    }

    pub fn operations(&self) -> impl Iterator<Item = &OperationDoc> {
        self.apis.values().flatten()
    }

    /// Finds an operation by its handler name
    pub fn operation(&self, nickname: &str) -> Option<&OperationDoc> {
        self.operations().find(|op| op.nickname == nickname)
    }
}
