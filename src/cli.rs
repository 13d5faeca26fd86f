use crate::config::DocumentationConfig;
use crate::documenter::DocumentationPipeline;
use crate::error::Error;
use crate::metadata::attributes::AttributeMetadataProvider;
use crate::model::ControllerDocumentation;
use crate::parser::AstParser;
use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::fmt::Write;
use std::path::PathBuf;

/// Documents the handlers of an annotated controller
#[derive(Parser, Debug)]
#[command(name = "handler-doc-filters")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Rust source file containing the controller
    #[arg(value_name = "FILE")]
    pub source_path: PathBuf,

    /// Name of the controller type whose impl block is documented
    #[arg(short = 'c', long = "controller", value_name = "NAME")]
    pub controller: String,

    /// Type-substitution config (YAML or JSON)
    #[arg(long = "config", value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.source_path.is_file() {
        anyhow::bail!("Source file does not exist: {}", args.source_path.display());
    }

    info!("Source file: {}", args.source_path.display());
    info!("Controller: {}", args.controller);
    match args.config_path {
        Some(ref config) => info!("Config: {}", config.display()),
        None => info!("Config: defaults"),
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    let config = match &args.config_path {
        Some(path) => DocumentationConfig::from_path(path)?,
        None => DocumentationConfig::default(),
    };

    info!("Parsing {}...", args.source_path.display());
    let parsed = AstParser::parse_file(&args.source_path)?;
    let item = parsed
        .find_controller(&args.controller)
        .ok_or_else(|| Error::ControllerNotFound(args.controller.clone()))?;

    info!("Documenting {}...", args.controller);
    let provider = AttributeMetadataProvider::new(item);
    let documentation = DocumentationPipeline::new(config).document(&provider);

    print!("{}", render_report(&documentation)?);

    info!("Summary:");
    info!("  - Operations: {}", documentation.operations().count());
    info!("  - Models: {}", documentation.models().len());
    info!("  - Diagnostics: {}", documentation.diagnostics().len());

    Ok(())
}

/// Plain-text summary of a documented controller.
pub fn render_report(documentation: &ControllerDocumentation) -> Result<String> {
    let mut out = String::new();
    write_report(&mut out, documentation)?;
    Ok(out)
}

fn write_report(out: &mut String, documentation: &ControllerDocumentation) -> std::fmt::Result {
    writeln!(
        out,
        "{} ({})",
        documentation.controller(),
        documentation.resource_path()
    )?;

    for (path, operations) in documentation.apis() {
        writeln!(out, "\n{}", path)?;
        for operation in operations {
            writeln!(
                out,
                "  {} {} -> {}",
                operation.http_method.as_str(),
                operation.nickname,
                operation.response_class.as_deref().unwrap_or("void")
            )?;
            if !operation.summary.is_empty() {
                writeln!(out, "    summary: {}", operation.summary)?;
            }
            if !operation.notes.is_empty() {
                writeln!(out, "    notes: {}", operation.notes)?;
            }
            if !operation.tags.is_empty() {
                writeln!(out, "    tags: {}", operation.tags.join(", "))?;
            }
            for parameter in &operation.parameters {
                write!(
                    out,
                    "    param {} [{}] {}",
                    parameter.name,
                    parameter.param_type.as_str(),
                    parameter.data_type.as_deref().unwrap_or("?")
                )?;
                if parameter.required {
                    write!(out, " required")?;
                }
                if parameter.allow_multiple {
                    write!(out, " multiple")?;
                }
                if let Some(ref allowable) = parameter.allowable_values {
                    write!(out, " allowable={}", allowable)?;
                }
                if !parameter.default_value.is_empty() {
                    write!(out, " default={}", parameter.default_value)?;
                }
                writeln!(out)?;
                if !parameter.description.is_empty() {
                    writeln!(out, "      {}", parameter.description)?;
                }
            }
        }
    }

    let models = documentation.models().entries();
    if !models.is_empty() {
        writeln!(out, "\nModels")?;
        for model in models {
            let role = if model.is_response_model { "response" } else { "request" };
            writeln!(out, "  {} = {} ({})", model.name, model.ty, role)?;
        }
    }

    let diagnostics = documentation.diagnostics().entries();
    if !diagnostics.is_empty() {
        writeln!(out, "\nDiagnostics")?;
        for diagnostic in diagnostics {
            writeln!(out, "  {}", diagnostic)?;
        }
    }

    Ok(())
}
