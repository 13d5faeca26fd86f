use crate::metadata::{
    HandlerMetadata, MetadataProvider, ModelDeclaration, OperationMetadata, ParamMetadata,
    ParameterInfo,
};
use crate::model::{HttpMethod, TypeRef};
use log::{debug, warn};
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{
    Attribute, FnArg, GenericArgument, Ident, ImplItem, ImplItemFn, ItemImpl, LitBool, LitStr,
    Meta, Pat, PathArguments, ReturnType, Token, Type, TypeParamBound,
};

const REQUEST_MAPPING: &str = "request_mapping";
const API_OPERATION: &str = "api_operation";
const API_PARAM: &str = "api_param";
const API_MODEL: &str = "api_model";

/// Reads documentation attributes from a controller `impl` block.
///
/// ```ignore
/// #[request_mapping("/pets")]
/// impl PetController {
///     #[request_mapping("/{id}", method = "GET")]
///     #[api_operation(value = "Find a pet", tags = "pets")]
///     async fn find_pet(
///         #[api_param(name = "petId", allowable_values = "range[1,100]")] id: Path<u32>,
///     ) -> Json<Pet> { .. }
/// }
/// ```
///
/// A method is a handler when it carries `request_mapping`. Attribute
/// arguments that fail to parse are logged and treated as absent.
pub struct AttributeMetadataProvider<'a> {
    item: &'a ItemImpl,
}

impl<'a> AttributeMetadataProvider<'a> {
    pub fn new(item: &'a ItemImpl) -> Self {
        Self { item }
    }

    fn handler(&self, method: &ImplItemFn) -> Option<HandlerMetadata> {
        let mapping = find_attr(&method.attrs, REQUEST_MAPPING)?;
        let name = method.sig.ident.to_string();
        debug!("Reading handler metadata for {}", name);

        let mapping_args = parse_args(mapping).unwrap_or_default();
        let http_method = match mapping_args.string("method") {
            Some(raw) => HttpMethod::parse(&raw).unwrap_or_else(|| {
                warn!("{}: unknown HTTP method {}, documenting as GET", name, raw);
                HttpMethod::Get
            }),
            None => HttpMethod::Get,
        };

        let return_type = match &method.sig.output {
            ReturnType::Default => None,
            ReturnType::Type(_, ty) => Some(type_ref(ty)).filter(|t| t.name != "()"),
        };

        let parameters = method
            .sig
            .inputs
            .iter()
            .enumerate()
            .filter_map(|(index, input)| match input {
                FnArg::Typed(pat_type) => {
                    let mut info = ParameterInfo::new(
                        binding_name(&pat_type.pat).unwrap_or_else(|| format!("arg{}", index)),
                        type_ref(&pat_type.ty),
                    );
                    info.metadata = find_attr(&pat_type.attrs, API_PARAM)
                        .and_then(parse_args)
                        .map(|args| args.param_metadata());
                    info.model = find_attr(&pat_type.attrs, API_MODEL).and_then(model_declaration);
                    Some(info)
                }
                FnArg::Receiver(_) => None,
            })
            .collect();

        Some(HandlerMetadata {
            name,
            http_method,
            path_templates: mapping_args.templates(),
            return_type,
            operation: find_attr(&method.attrs, API_OPERATION)
                .and_then(parse_args)
                .map(|args| args.operation_metadata()),
            model: find_attr(&method.attrs, API_MODEL).and_then(model_declaration),
            parameters,
        })
    }
}

impl MetadataProvider for AttributeMetadataProvider<'_> {
    fn controller_name(&self) -> String {
        match type_ref(&self.item.self_ty) {
            ty if ty.is_erased => "Controller".to_string(),
            ty => ty.name,
        }
    }

    fn path_templates(&self) -> Vec<String> {
        find_attr(&self.item.attrs, REQUEST_MAPPING)
            .and_then(parse_args)
            .map(|args| args.templates())
            .unwrap_or_default()
    }

    fn handlers(&self) -> Vec<HandlerMetadata> {
        self.item
            .items
            .iter()
            .filter_map(|item| match item {
                ImplItem::Fn(method) => self.handler(method),
                _ => None,
            })
            .collect()
    }
}

/// Converts a `syn` type into static type information.
///
/// References and parentheses are looked through; slices and arrays are
/// treated as `Vec`; `impl Trait` and `_` produce erased types.
pub fn type_ref(ty: &Type) -> TypeRef {
    match ty {
        Type::Path(type_path) => match type_path.path.segments.last() {
            Some(segment) => {
                let args = match &segment.arguments {
                    PathArguments::AngleBracketed(args) => args
                        .args
                        .iter()
                        .filter_map(|arg| match arg {
                            GenericArgument::Type(inner) => Some(type_ref(inner)),
                            _ => None,
                        })
                        .collect(),
                    _ => Vec::new(),
                };
                TypeRef::generic(segment.ident.to_string(), args)
            }
            None => TypeRef::erased("unknown"),
        },
        Type::Reference(reference) => type_ref(&reference.elem),
        Type::Paren(paren) => type_ref(&paren.elem),
        Type::Group(group) => type_ref(&group.elem),
        Type::Slice(slice) => TypeRef::generic("Vec", vec![type_ref(&slice.elem)]),
        Type::Array(array) => TypeRef::generic("Vec", vec![type_ref(&array.elem)]),
        Type::Tuple(tuple) if tuple.elems.is_empty() => TypeRef::new("()"),
        Type::ImplTrait(impl_trait) => {
            let name = impl_trait
                .bounds
                .iter()
                .find_map(|bound| match bound {
                    TypeParamBound::Trait(trait_bound) => trait_bound
                        .path
                        .segments
                        .last()
                        .map(|segment| segment.ident.to_string()),
                    _ => None,
                })
                .unwrap_or_else(|| "unknown".to_string());
            TypeRef::erased(name)
        }
        _ => TypeRef::erased("unknown"),
    }
}

/// Identifier bound by a parameter pattern, looking into `Path(id)` style
/// destructuring.
fn binding_name(pat: &Pat) -> Option<String> {
    match pat {
        Pat::Ident(pat_ident) => Some(pat_ident.ident.to_string()),
        Pat::TupleStruct(tuple_struct) => tuple_struct.elems.first().and_then(binding_name),
        Pat::Type(pat_type) => binding_name(&pat_type.pat),
        _ => None,
    }
}

fn find_attr<'b>(attrs: &'b [Attribute], name: &str) -> Option<&'b Attribute> {
    attrs.iter().find(|attr| {
        attr.path()
            .segments
            .last()
            .is_some_and(|segment| segment.ident == name)
    })
}

fn model_declaration(attr: &Attribute) -> Option<ModelDeclaration> {
    let args = parse_args(attr)?;
    let Some(ty) = args.ty() else {
        warn!("#[{}] without a type is ignored", API_MODEL);
        return None;
    };
    let name = args.string("name").unwrap_or_default();
    let implicit = args.boolean("implicit").unwrap_or(name.is_empty());
    Some(ModelDeclaration {
        name,
        ty: type_ref(ty),
        implicit,
    })
}

fn parse_args(attr: &Attribute) -> Option<AttrArgs> {
    if let Meta::Path(_) = attr.meta {
        return Some(AttrArgs::default());
    }
    match attr.parse_args_with(Punctuated::<AttrArg, Token![,]>::parse_terminated) {
        Ok(args) => Some(AttrArgs(args.into_iter().collect())),
        Err(e) => {
            warn!(
                "Ignoring unparseable #[{}] arguments: {}",
                attr.path()
                    .segments
                    .last()
                    .map(|s| s.ident.to_string())
                    .unwrap_or_default(),
                e
            );
            None
        }
    }
}

/// One attribute argument: `"literal"` or `key = value`.
enum AttrArg {
    Positional(String),
    Named(String, AttrValue),
}

enum AttrValue {
    Str(String),
    Bool(bool),
    Type(Type),
}

impl Parse for AttrArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            return Ok(AttrArg::Positional(lit.value()));
        }

        // parse_any accepts keywords, so `type = Pet` works
        let key = input.call(Ident::parse_any)?;
        input.parse::<Token![=]>()?;
        let value = if input.peek(LitStr) {
            AttrValue::Str(input.parse::<LitStr>()?.value())
        } else if input.peek(LitBool) {
            AttrValue::Bool(input.parse::<LitBool>()?.value)
        } else {
            AttrValue::Type(input.parse()?)
        };
        Ok(AttrArg::Named(key.unraw().to_string(), value))
    }
}

#[derive(Default)]
struct AttrArgs(Vec<AttrArg>);

impl AttrArgs {
    fn named(&self, key: &str) -> Option<&AttrValue> {
        self.0.iter().find_map(|arg| match arg {
            AttrArg::Named(name, value) if name == key => Some(value),
            _ => None,
        })
    }

    fn string(&self, key: &str) -> Option<String> {
        match self.named(key)? {
            AttrValue::Str(value) => Some(value.clone()),
            _ => None,
        }
    }

    fn boolean(&self, key: &str) -> Option<bool> {
        match self.named(key)? {
            AttrValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    fn ty(&self) -> Option<&Type> {
        match self.named("type").or_else(|| self.named("ty"))? {
            AttrValue::Type(ty) => Some(ty),
            _ => None,
        }
    }

    fn positional(&self) -> impl Iterator<Item = &String> {
        self.0.iter().filter_map(|arg| match arg {
            AttrArg::Positional(value) => Some(value),
            _ => None,
        })
    }

    /// Path templates: positional literals, then `value`/`path` keys
    fn templates(&self) -> Vec<String> {
        let mut templates: Vec<String> = self.positional().cloned().collect();
        templates.extend(self.string("value"));
        templates.extend(self.string("path"));
        templates
    }

    fn operation_metadata(&self) -> OperationMetadata {
        OperationMetadata {
            summary: self
                .string("value")
                .or_else(|| self.string("summary"))
                .or_else(|| self.positional().next().cloned())
                .unwrap_or_default(),
            notes: self.string("notes").unwrap_or_default(),
            response_class: self.string("response_class").unwrap_or_default(),
            multi_value_response: self.boolean("multi_value_response").unwrap_or(false),
            tags: self.string("tags").unwrap_or_default(),
        }
    }

    fn param_metadata(&self) -> ParamMetadata {
        ParamMetadata {
            name: self.string("name").unwrap_or_default(),
            description: self
                .string("value")
                .or_else(|| self.positional().next().cloned())
                .unwrap_or_default(),
            internal_description: self.string("internal_description").unwrap_or_default(),
            default_value: self.string("default_value").unwrap_or_default(),
            required: self.boolean("required").unwrap_or(false),
            allow_multiple: self.boolean("allow_multiple").unwrap_or(false),
            allowable_values: self.string("allowable_values").unwrap_or_default(),
        }
    }
}
