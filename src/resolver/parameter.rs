use crate::constraint::parse_constraint;
use crate::diagnostics::Diagnostic;
use crate::filter::{Filter, FilterContext, ParameterContext};
use crate::metadata::{ModelDeclaration, ParamMetadata};
use crate::model::{ModelEntry, ParameterDoc};

/// Applies `#[api_param]` and `#[api_model]` declarations to a parameter.
pub struct ParameterResolver;

impl<'a> Filter<ParameterDoc, ParameterContext<'a>> for ParameterResolver {
    fn name(&self) -> &'static str {
        "parameter-resolver"
    }

    fn apply(&self, context: &mut FilterContext<'_, ParameterDoc, ParameterContext<'a>>) {
        let env = context.env();
        let parameter = context.subject_mut();
        let subject = format!("{}({})", env.handler.name, env.parameter.name);

        let Some(metadata) = &env.parameter.metadata else {
            env.controller.diagnostics().emit(Diagnostic::MissingMetadata {
                subject,
                detail: "no parameter documentation; falling back to defaults".to_string(),
            });
            return;
        };

        document_parameter(parameter, metadata, *env, &subject);

        if let Some(model) = &env.parameter.model {
            apply_model(parameter, model, *env, subject);
        }
    }
}

fn document_parameter(
    parameter: &mut ParameterDoc,
    metadata: &ParamMetadata,
    env: ParameterContext<'_>,
    subject: &str,
) {
    let name = select_parameter_name(metadata, &env.parameter.name);
    if !name.is_empty() {
        parameter.name = name.to_string();
    }
    if !metadata.description.is_empty() {
        parameter.description = metadata.description.clone();
    }
    parameter.notes = metadata.internal_description.clone();
    parameter.default_value = metadata.default_value.clone();
    parameter.required = metadata.required;
    parameter.allow_multiple = metadata.allow_multiple;

    match parse_constraint(&metadata.allowable_values) {
        Ok(constraint) => parameter.allowable_values = constraint,
        Err(e) => env.controller.diagnostics().emit(Diagnostic::MalformedConstraint {
            parameter: subject.to_string(),
            raw: metadata.allowable_values.clone(),
            reason: e.to_string(),
        }),
    }
}

/// Explicit name override first, then the declared identifier.
fn select_parameter_name<'m>(metadata: &'m ParamMetadata, declared: &'m str) -> &'m str {
    if metadata.name.is_empty() {
        declared
    } else {
        &metadata.name
    }
}

fn apply_model(
    parameter: &mut ParameterDoc,
    model: &ModelDeclaration,
    env: ParameterContext<'_>,
    subject: String,
) {
    if env.parameter_type.raw_name() != model.ty.raw_name() {
        env.controller.diagnostics().emit(Diagnostic::ModelTypeMismatch {
            subject,
            declared: model.ty.to_string(),
            inferred: env.parameter_type.to_string(),
        });
        return;
    }

    parameter.data_type = Some(model.documented_type());
    env.controller.put_model(ModelEntry::new(
        model.simple_name(),
        model.ty.clone(),
        false,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DocumentationConfig;
    use crate::metadata::{HandlerMetadata, ParameterInfo};
    use crate::model::{ControllerDocumentation, TypeRef, ValueConstraint};

    fn run(
        parameter_info: &ParameterInfo,
        parameter_type: &TypeRef,
        controller: &ControllerDocumentation,
        parameter: &mut ParameterDoc,
    ) {
        let handler = HandlerMetadata::new("find_pet");
        let config = DocumentationConfig::default();
        let env = ParameterContext {
            handler: &handler,
            parameter: parameter_info,
            parameter_type,
            controller,
            config: &config,
        };
        ParameterResolver.apply(&mut FilterContext::new(parameter, &env));
    }

    fn documented(name: &str, metadata: ParamMetadata) -> ParameterInfo {
        let mut info = ParameterInfo::new(name, TypeRef::new("u32"));
        info.metadata = Some(metadata);
        info
    }

    #[test]
    fn test_missing_metadata_keeps_defaults() {
        let info = ParameterInfo::new("id", TypeRef::new("u32"));
        let controller = ControllerDocumentation::new("PetController", "/pets");
        let mut parameter = ParameterDoc::new("id");
        parameter.data_type = Some("u32".to_string());
        let before = parameter.clone();

        run(&info, &TypeRef::new("u32"), &controller, &mut parameter);

        assert_eq!(parameter, before);
        assert!(matches!(
            controller.diagnostics().entries()[0],
            Diagnostic::MissingMetadata { .. }
        ));
    }

    #[test]
    fn test_explicit_name_wins() {
        let info = documented(
            "id",
            ParamMetadata {
                name: "petId".to_string(),
                ..ParamMetadata::default()
            },
        );
        let controller = ControllerDocumentation::new("PetController", "/pets");
        let mut parameter = ParameterDoc::new("id");

        run(&info, &TypeRef::new("u32"), &controller, &mut parameter);
        assert_eq!(parameter.name, "petId");
    }

    #[test]
    fn test_declared_name_is_fallback() {
        let info = documented("id", ParamMetadata::default());
        let controller = ControllerDocumentation::new("PetController", "/pets");
        let mut parameter = ParameterDoc::new("seeded");

        run(&info, &TypeRef::new("u32"), &controller, &mut parameter);
        assert_eq!(parameter.name, "id");
    }

    #[test]
    fn test_empty_names_never_applied() {
        let info = documented("", ParamMetadata::default());
        let controller = ControllerDocumentation::new("PetController", "/pets");
        let mut parameter = ParameterDoc::new("arg0");

        run(&info, &TypeRef::new("u32"), &controller, &mut parameter);
        assert_eq!(parameter.name, "arg0");
    }

    #[test]
    fn test_copies_parameter_fields() {
        let info = documented(
            "status",
            ParamMetadata {
                description: "Status filter".to_string(),
                internal_description: "indexed column".to_string(),
                default_value: "available".to_string(),
                required: true,
                allow_multiple: true,
                allowable_values: "available,pending,sold".to_string(),
                ..ParamMetadata::default()
            },
        );
        let controller = ControllerDocumentation::new("PetController", "/pets");
        let mut parameter = ParameterDoc::new("status");

        run(&info, &TypeRef::new("String"), &controller, &mut parameter);

        assert_eq!(parameter.description, "Status filter");
        assert_eq!(parameter.notes, "indexed column");
        assert_eq!(parameter.default_value, "available");
        assert!(parameter.required);
        assert!(parameter.allow_multiple);
        assert_eq!(
            parameter.allowable_values,
            Some(ValueConstraint::List(vec![
                "available".to_string(),
                "pending".to_string(),
                "sold".to_string()
            ]))
        );
    }

    #[test]
    fn test_empty_description_keeps_existing() {
        let info = documented("id", ParamMetadata::default());
        let controller = ControllerDocumentation::new("PetController", "/pets");
        let mut parameter = ParameterDoc::new("id");
        parameter.description = "from upstream".to_string();

        run(&info, &TypeRef::new("u32"), &controller, &mut parameter);
        assert_eq!(parameter.description, "from upstream");
        assert_eq!(parameter.allowable_values, None);
    }

    #[test]
    fn test_malformed_constraint_skips_only_the_constraint() {
        let info = documented(
            "id",
            ParamMetadata {
                description: "Pet id".to_string(),
                required: true,
                allowable_values: "range[1,".to_string(),
                ..ParamMetadata::default()
            },
        );
        let controller = ControllerDocumentation::new("PetController", "/pets");
        let mut parameter = ParameterDoc::new("id");

        run(&info, &TypeRef::new("u32"), &controller, &mut parameter);

        assert_eq!(parameter.description, "Pet id");
        assert!(parameter.required);
        assert_eq!(parameter.allowable_values, None);
        match &controller.diagnostics().entries()[0] {
            Diagnostic::MalformedConstraint { raw, parameter, .. } => {
                assert_eq!(raw, "range[1,");
                assert_eq!(parameter, "find_pet(id)");
            }
            other => panic!("unexpected diagnostic: {:?}", other),
        }
    }

    #[test]
    fn test_matching_model_overrides_data_type() {
        let mut info = documented("body", ParamMetadata::default());
        info.model = Some(ModelDeclaration::named("NewPet", TypeRef::new("PetForm")));
        let controller = ControllerDocumentation::new("PetController", "/pets");
        let mut parameter = ParameterDoc::new("body");

        run(&info, &TypeRef::new("PetForm"), &controller, &mut parameter);

        assert_eq!(parameter.data_type.as_deref(), Some("NewPet"));
        let model = controller.models().get("PetForm").unwrap();
        assert!(!model.is_response_model);
    }

    #[test]
    fn test_mismatched_model_is_rejected() {
        let mut info = documented("body", ParamMetadata::default());
        info.model = Some(ModelDeclaration::new(TypeRef::new("Owner")));
        let controller = ControllerDocumentation::new("PetController", "/pets");
        let mut parameter = ParameterDoc::new("body");
        parameter.data_type = Some("PetForm".to_string());

        run(&info, &TypeRef::new("PetForm"), &controller, &mut parameter);

        assert_eq!(parameter.data_type.as_deref(), Some("PetForm"));
        assert!(controller.models().is_empty());
        assert!(matches!(
            controller.diagnostics().entries()[0],
            Diagnostic::ModelTypeMismatch { .. }
        ));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut info = documented(
            "id",
            ParamMetadata {
                name: "petId".to_string(),
                description: "Pet id".to_string(),
                allowable_values: "rangeexclusive[0,100]".to_string(),
                ..ParamMetadata::default()
            },
        );
        info.model = Some(ModelDeclaration::new(TypeRef::new("u32")));
        let controller = ControllerDocumentation::new("PetController", "/pets");
        let mut parameter = ParameterDoc::new("id");

        run(&info, &TypeRef::new("u32"), &controller, &mut parameter);
        let first = parameter.clone();
        run(&info, &TypeRef::new("u32"), &controller, &mut parameter);

        assert_eq!(parameter, first);
    }
}
