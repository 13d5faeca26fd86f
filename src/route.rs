use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::metadata::{HandlerMetadata, MetadataProvider};
use crate::path::PathComposer;
use log::info;

/// Computes the documented routes of a controller and its handlers.
///
/// Only the first path template of each level is documented. A controller
/// without one is documented under a route derived from its name, while
/// its handlers are routed from the root. Ignored class-level templates are
/// reported by [`RouteResolver::resolve_class_route`] only, so documenting
/// many handlers does not repeat the same diagnostic.
pub struct RouteResolver;

impl RouteResolver {
    /// Route under which the controller's documentation is published.
    pub fn resolve_class_route(provider: &dyn MetadataProvider, diagnostics: &Diagnostics) -> String {
        let controller = provider.controller_name();
        let fragment = first_template(&controller, provider.path_templates(), Some(diagnostics))
            .unwrap_or_else(|| PathComposer::default_fragment(&controller));
        PathComposer::compose(&[fragment])
    }

    /// Route of one handler: class-level fragment plus method-level fragment.
    pub fn resolve_method_route(
        provider: &dyn MetadataProvider,
        handler: &HandlerMetadata,
        diagnostics: &Diagnostics,
    ) -> String {
        let controller = provider.controller_name();
        let class_fragment =
            first_template(&controller, provider.path_templates(), None).unwrap_or_default();
        let owner = format!("{}::{}", controller, handler.name);
        let method_fragment =
            first_template(&owner, handler.path_templates.clone(), Some(diagnostics))
                .unwrap_or_default();
        PathComposer::compose(&[class_fragment, method_fragment])
    }
}

/// First declared template, if any. Reports the rest as ignored when a
/// sink is given.
fn first_template(
    owner: &str,
    templates: Vec<String>,
    diagnostics: Option<&Diagnostics>,
) -> Option<String> {
    let mut templates = templates.into_iter();
    let Some(first) = templates.next().filter(|t| !t.is_empty()) else {
        if diagnostics.is_some() {
            info!("{} has no usable path template", owner);
        }
        return None;
    };

    let ignored: Vec<String> = templates.collect();
    if let (Some(diagnostics), false) = (diagnostics, ignored.is_empty()) {
        diagnostics.emit(Diagnostic::AmbiguousRouteTemplate {
            owner: owner.to_string(),
            used: first.clone(),
            ignored,
        });
    }
    Some(first)
}
