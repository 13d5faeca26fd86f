//! Command-line tool for documenting an annotated controller.
//!
//! # Usage
//!
//! ```bash
//! handler-doc-filters [OPTIONS] --controller <NAME> <FILE>
//! ```
//!
//! # Examples
//!
//! Document a controller with the default type substitutions:
//! ```bash
//! handler-doc-filters src/controllers/pets.rs -c PetController
//! ```
//!
//! Use a custom configuration and verbose logging:
//! ```bash
//! handler-doc-filters src/controllers/pets.rs -c PetController --config docs.yaml -v
//! ```

use anyhow::Result;
use clap::Parser;
use handler_doc_filters::cli;
use log::info;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("handler-doc-filters starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("Controller documentation completed successfully");

    Ok(())
}
