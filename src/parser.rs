use crate::error::Error;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use syn::visit::Visit;
use syn::{ItemImpl, Type};

/// AST parser for controller source files.
///
/// Reads a Rust source file with `syn` and locates controller `impl`
/// blocks by the name of their self type. Controllers are named by the
/// caller; nothing is discovered automatically.
///
/// # Example
///
/// ```no_run
/// use handler_doc_filters::parser::AstParser;
/// use std::path::Path;
///
/// let parsed = AstParser::parse_file(Path::new("src/controllers.rs")).unwrap();
/// let controller = parsed.find_controller("PetController");
/// println!("found: {}", controller.is_some());
/// ```
pub struct AstParser;

/// A successfully parsed Rust file with its abstract syntax tree.
#[derive(Debug)]
pub struct ParsedFile {
    /// Path to the source file
    pub path: PathBuf,
    /// The parsed abstract syntax tree
    pub syntax_tree: syn::File,
}

impl AstParser {
    /// Parses a single Rust source file into an AST.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file contains invalid Rust syntax
    pub fn parse_file(path: &Path) -> Result<ParsedFile> {
        debug!("Parsing file: {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let syntax_tree = syn::parse_file(&content)
            .map_err(|e| Error::ParseError {
                file: path.to_path_buf(),
                message: e.to_string(),
            })
            .with_context(|| format!("Failed to parse Rust syntax in file: {}", path.display()))?;

        debug!("Successfully parsed file: {}", path.display());

        Ok(ParsedFile {
            path: path.to_path_buf(),
            syntax_tree,
        })
    }
}

impl ParsedFile {
    /// Finds the inherent `impl` block of the named controller, looking
    /// into inline modules. The first match wins.
    pub fn find_controller(&self, name: &str) -> Option<&ItemImpl> {
        let mut locator = ControllerLocator { name, found: None };
        locator.visit_file(&self.syntax_tree);
        locator.found
    }
}

struct ControllerLocator<'n, 'ast> {
    name: &'n str,
    found: Option<&'ast ItemImpl>,
}

impl<'ast> Visit<'ast> for ControllerLocator<'_, 'ast> {
    fn visit_item_impl(&mut self, node: &'ast ItemImpl) {
        if self.found.is_some() || node.trait_.is_some() {
            return;
        }
        if let Type::Path(type_path) = node.self_ty.as_ref() {
            if type_path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == self.name)
            {
                self.found = Some(node);
            }
        }
    }
}
