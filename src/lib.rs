//! Handler documentation filters - API documentation for annotated controllers.
//!
//! This library builds machine-readable documentation for the request
//! handlers of a controller: operations, parameters, the models they
//! reference and the route of every handler. Declared metadata is applied
//! through an ordered pipeline of independent filters that each enrich a
//! shared documentation subject.
//!
//! # Architecture
//!
//! 1. [`metadata`] - What is declared on a controller, behind the [`metadata::MetadataProvider`] trait
//! 2. [`config`] - Type-substitution rules applied to static types
//! 3. [`filter`] - The [`filter::Filter`] abstraction and its typed contexts
//! 4. [`resolver`] - Operation and parameter resolvers
//! 5. [`constraint`] - Parser for allowable-values expressions
//! 6. [`path`] and [`route`] - Route composition for controllers and handlers
//! 7. [`documenter`] - The pipeline tying everything together
//! 8. [`model`] - The documentation model the filters mutate
//!
//! # Example Usage
//!
//! ```no_run
//! use handler_doc_filters::{
//!     config::DocumentationConfig,
//!     documenter::DocumentationPipeline,
//!     metadata::attributes::AttributeMetadataProvider,
//!     parser::AstParser,
//! };
//! use std::path::Path;
//!
//! let parsed = AstParser::parse_file(Path::new("src/controllers/pets.rs")).unwrap();
//! let item = parsed.find_controller("PetController").unwrap();
//!
//! let pipeline = DocumentationPipeline::new(DocumentationConfig::default());
//! let documentation = pipeline.document(&AttributeMetadataProvider::new(item));
//!
//! for operation in documentation.operations() {
//!     println!("{} {}", operation.http_method.as_str(), operation.path);
//! }
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod config;
pub mod constraint;
pub mod diagnostics;
pub mod documenter;
pub mod error;
pub mod filter;
pub mod metadata;
pub mod model;
pub mod parser;
pub mod path;
pub mod resolver;
pub mod route;
