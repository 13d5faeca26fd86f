//! Filter abstraction shared by every documentation enrichment rule.
//!
//! A [`Filter`] receives a [`FilterContext`]: exactly one mutable subject
//! (the [`OperationDoc`] or [`ParameterDoc`] being documented) and a
//! read-only, statically typed environment describing where the subject
//! came from. Filters never replace the subject, they only mutate its
//! fields, and running a filter twice over the same context leaves the
//! subject unchanged the second time.

use crate::config::DocumentationConfig;
use crate::metadata::{HandlerMetadata, ParameterInfo};
use crate::model::{ControllerDocumentation, OperationDoc, ParameterDoc, TypeRef};

/// A unit of documentation enrichment for subjects of type `S`, reading
/// an environment of type `E`.
pub trait Filter<S, E>: Send + Sync {
    /// Short identifier, used to inspect pipeline ordering
    fn name(&self) -> &'static str;

    /// Mutates the context subject. Absent metadata means nothing to
    /// contribute, never an error.
    fn apply(&self, context: &mut FilterContext<'_, S, E>);
}

/// Filters over operations, for any borrow of the environment
pub type OperationFilter = dyn for<'a> Filter<OperationDoc, OperationContext<'a>>;

/// Filters over parameters, for any borrow of the environment
pub type ParameterFilter = dyn for<'a> Filter<ParameterDoc, ParameterContext<'a>>;

/// The mutable subject plus its read-only environment.
pub struct FilterContext<'c, S, E> {
    subject: &'c mut S,
    env: &'c E,
}

impl<'c, S, E> FilterContext<'c, S, E> {
    pub fn new(subject: &'c mut S, env: &'c E) -> Self {
        Self { subject, env }
    }

    pub fn subject(&self) -> &S {
        &*self.subject
    }

    pub fn subject_mut(&mut self) -> &mut S {
        &mut *self.subject
    }

    /// The environment outlives the context, so it can be held while the
    /// subject is borrowed mutably.
    pub fn env(&self) -> &'c E {
        self.env
    }
}

/// Environment of an operation filter.
#[derive(Debug, Clone, Copy)]
pub struct OperationContext<'a> {
    pub handler: &'a HandlerMetadata,
    /// Static return type after type substitution
    pub return_type: Option<&'a TypeRef>,
    pub controller: &'a ControllerDocumentation,
    pub config: &'a DocumentationConfig,
}

impl<'a> OperationContext<'a> {
    /// The return type, unless it is unknown or erased
    pub fn known_return_type(&self) -> Option<&'a TypeRef> {
        self.return_type.filter(|ty| !ty.is_erased)
    }
}

/// Environment of a parameter filter.
#[derive(Debug, Clone, Copy)]
pub struct ParameterContext<'a> {
    pub handler: &'a HandlerMetadata,
    pub parameter: &'a ParameterInfo,
    /// Static parameter type after type substitution
    pub parameter_type: &'a TypeRef,
    pub controller: &'a ControllerDocumentation,
    pub config: &'a DocumentationConfig,
}
