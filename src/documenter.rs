//! Documentation pipeline for one controller.
//!
//! The pipeline owns the type-substitution configuration and two ordered
//! filter lists. For every handler it seeds an [`OperationDoc`] from the
//! static signature, runs the operation filters in order, then seeds and
//! filters one [`ParameterDoc`] per documented argument.

use crate::config::DocumentationConfig;
use crate::filter::{
    FilterContext, OperationContext, OperationFilter, ParameterContext, ParameterFilter,
};
use crate::metadata::{HandlerMetadata, MetadataProvider, ParameterInfo};
use crate::model::{ControllerDocumentation, OperationDoc, ParamLocation, ParameterDoc};
use crate::resolver::{OperationResolver, ParameterResolver};
use crate::route::RouteResolver;
use log::debug;

/// Runs ordered filter chains over a controller's handlers.
pub struct DocumentationPipeline {
    config: DocumentationConfig,
    operation_filters: Vec<Box<OperationFilter>>,
    parameter_filters: Vec<Box<ParameterFilter>>,
}

impl DocumentationPipeline {
    /// Pipeline with the standard resolvers
    pub fn new(config: DocumentationConfig) -> Self {
        Self::empty(config)
            .with_operation_filter(Box::new(OperationResolver))
            .with_parameter_filter(Box::new(ParameterResolver))
    }

    /// Pipeline without any filters
    pub fn empty(config: DocumentationConfig) -> Self {
        Self {
            config,
            operation_filters: Vec::new(),
            parameter_filters: Vec::new(),
        }
    }

    /// Appends an operation filter; filters run in insertion order.
    pub fn with_operation_filter(mut self, filter: Box<OperationFilter>) -> Self {
        self.operation_filters.push(filter);
        self
    }

    /// Appends a parameter filter; filters run in insertion order.
    pub fn with_parameter_filter(mut self, filter: Box<ParameterFilter>) -> Self {
        self.parameter_filters.push(filter);
        self
    }

    pub fn config(&self) -> &DocumentationConfig {
        &self.config
    }

    pub fn operation_filter_names(&self) -> Vec<&'static str> {
        self.operation_filters.iter().map(|f| f.name()).collect()
    }

    pub fn parameter_filter_names(&self) -> Vec<&'static str> {
        self.parameter_filters.iter().map(|f| f.name()).collect()
    }

    /// Documents every handler of a controller.
    pub fn document(&self, provider: &dyn MetadataProvider) -> ControllerDocumentation {
        let controller = provider.controller_name();
        debug!("Documenting controller {}", controller);

        let mut documentation = ControllerDocumentation::new(controller, "");
        let resource_path = RouteResolver::resolve_class_route(provider, documentation.diagnostics());
        documentation.set_resource_path(resource_path);

        for handler in provider.handlers() {
            let path = RouteResolver::resolve_method_route(
                provider,
                &handler,
                documentation.diagnostics(),
            );
            let operation = self.document_operation(&documentation, &handler, path);
            documentation.add_operation(operation);
        }

        debug!(
            "Documented {} operations and {} models for {}",
            documentation.operations().count(),
            documentation.models().len(),
            documentation.controller()
        );
        documentation
    }

    fn document_operation(
        &self,
        controller: &ControllerDocumentation,
        handler: &HandlerMetadata,
        path: String,
    ) -> OperationDoc {
        debug!("Adding operation: {} {}", handler.http_method.as_str(), path);

        let return_type = handler
            .return_type
            .as_ref()
            .map(|ty| self.config.maybe_alternate_type(ty));

        let mut operation = OperationDoc::new(handler.name.clone(), handler.http_method, path);
        operation.response_class = return_type
            .as_ref()
            .filter(|ty| !ty.is_erased)
            .map(ToString::to_string);

        let env = OperationContext {
            handler,
            return_type: return_type.as_ref(),
            controller,
            config: &self.config,
        };
        for filter in &self.operation_filters {
            filter.apply(&mut FilterContext::new(&mut operation, &env));
        }

        for parameter in &handler.parameters {
            if self.config.is_ignorable(&parameter.ty) {
                debug!("Skipping {} parameter {}", parameter.ty.raw_name(), parameter.name);
                continue;
            }
            let doc = self.document_parameter(controller, handler, parameter);
            operation.parameters.push(doc);
        }

        operation
    }

    fn document_parameter(
        &self,
        controller: &ControllerDocumentation,
        handler: &HandlerMetadata,
        parameter: &ParameterInfo,
    ) -> ParameterDoc {
        let parameter_type = self.config.maybe_alternate_type(&parameter.ty);

        let mut doc = ParameterDoc::new(parameter.name.clone());
        doc.data_type = Some(parameter_type.to_string());
        doc.param_type = ParamLocation::infer(&parameter.ty);
        doc.required = !parameter_type.is_option();

        let env = ParameterContext {
            handler,
            parameter,
            parameter_type: &parameter_type,
            controller,
            config: &self.config,
        };
        for filter in &self.parameter_filters {
            filter.apply(&mut FilterContext::new(&mut doc, &env));
        }
        doc
    }
}

impl Default for DocumentationPipeline {
    fn default() -> Self {
        Self::new(DocumentationConfig::default())
    }
}
