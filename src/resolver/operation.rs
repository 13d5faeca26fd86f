use crate::diagnostics::Diagnostic;
use crate::filter::{Filter, FilterContext, OperationContext};
use crate::metadata::{ModelDeclaration, OperationMetadata};
use crate::model::{ModelEntry, OperationDoc, TypeRef};
use log::debug;

/// Applies `#[api_operation]` and `#[api_model]` declarations to an operation.
pub struct OperationResolver;

impl<'a> Filter<OperationDoc, OperationContext<'a>> for OperationResolver {
    fn name(&self) -> &'static str {
        "operation-resolver"
    }

    fn apply(&self, context: &mut FilterContext<'_, OperationDoc, OperationContext<'a>>) {
        let env = context.env();
        let operation = context.subject_mut();

        match &env.handler.operation {
            Some(metadata) => document_operation(operation, metadata, env.known_return_type()),
            None => debug!("{} has no operation documentation", env.handler.name),
        }

        if let Some(model) = &env.handler.model {
            apply_model(operation, model, *env);
        }
    }
}

fn document_operation(
    operation: &mut OperationDoc,
    metadata: &OperationMetadata,
    return_type: Option<&TypeRef>,
) {
    operation.summary = metadata.summary.clone();
    operation.notes = metadata.notes.clone();

    if !metadata.response_class.is_empty() && return_type.is_some() {
        operation.response_class = Some(if metadata.multi_value_response {
            format!("Array[{}]", metadata.response_class)
        } else {
            metadata.response_class.clone()
        });
    }

    operation.tags = split_tags(&metadata.tags);
}

fn apply_model(operation: &mut OperationDoc, model: &ModelDeclaration, env: OperationContext<'_>) {
    if let Some(inferred) = env.known_return_type() {
        if inferred.raw_name() != model.ty.raw_name() {
            env.controller.diagnostics().emit(Diagnostic::ModelTypeMismatch {
                subject: env.handler.name.clone(),
                declared: model.ty.to_string(),
                inferred: inferred.to_string(),
            });
            return;
        }
    }

    operation.response_class = Some(model.documented_type());
    env.controller.put_model(ModelEntry::new(
        model.simple_name(),
        model.ty.clone(),
        true,
    ));
}

/// Splits a comma-separated tag list, dropping empty tokens and repeats.
///
/// Tokens are not trimmed: `"a,,b, c"` yields `["a", "b", " c"]`.
pub fn split_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').filter(|tag| !tag.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
