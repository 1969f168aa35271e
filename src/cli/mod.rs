//! The Scaffold Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::io::{self, Write};
use std::path::Path;
use std::{fs, process};

use clap::Parser;
use serde::{Deserialize, Serialize};
use termcolor::Color;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Command, InputArgs, ScaffoldArgs};
use crate::config::{load_document, ScaffoldConfig};
use crate::context::GenerationContext;
use crate::errors::{print_error, ScaffoldError};
use crate::trace::ExecutionRecord;
use crate::Scaffolder;

pub mod args;
pub mod output;

/// Everything recorded about one generation run: the execution records, the
/// context snapshot and an optional security exception override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunManifest {
    pub results: Vec<ExecutionRecord>,
    pub security_exception: bool,
    pub context: GenerationContext,
}

/// Configuration and manifest resolved from the command line.
struct Inputs {
    config: ScaffoldConfig,
    manifest: RunManifest,
}

impl Inputs {
    fn load(args: &InputArgs) -> Result<Self, ScaffoldError> {
        let config = match &args.config {
            Some(path) => ScaffoldConfig::load(path)?,
            None => ScaffoldConfig::default(),
        };
        let mut manifest: RunManifest = match &args.manifest {
            Some(path) => load_document(path)?,
            None => RunManifest::default(),
        };
        manifest.security_exception |= args.security_exception;
        debug!(?config, records = manifest.results.len(), "loaded inputs");
        Ok(Self { config, manifest })
    }

    fn scaffolder(&self) -> Scaffolder<'_> {
        Scaffolder::new(&self.config, &self.manifest.context)
    }
}

/// The main entry point for the CLI.
pub fn run() {
    let args = ScaffoldArgs::parse();
    init_logging(args.verbose);

    // Dispatch to the appropriate subcommand handler.
    let result = match args.command {
        Command::Generate { input, name, out } => handle_generate(&input, &name, out.as_deref()),
        Command::Plan { input, json } => handle_plan(&input, json),
        Command::Check { input, name, file } => handle_check(&input, &name, &file),
    };

    if let Err(e) = result {
        print_error(e);
        process::exit(1);
    }
}

/// Installs a stderr `tracing` subscriber; `RUST_LOG` overrides the level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Handles the `generate` subcommand.
fn handle_generate(input: &InputArgs, name: &str, out: Option<&Path>) -> Result<(), ScaffoldError> {
    let inputs = Inputs::load(input)?;
    let manifest = &inputs.manifest;
    let artifact =
        inputs
            .scaffolder()
            .generate(name, &manifest.results, manifest.security_exception)?;

    match out {
        Some(dir) => {
            let path = dir.join(artifact.file_name());
            fs::create_dir_all(dir).map_err(|e| ScaffoldError::io(dir.display().to_string(), &e))?;
            fs::write(&path, artifact.as_str())
                .map_err(|e| ScaffoldError::io(path.display().to_string(), &e))?;
            output::print_status(Color::Green, &format!("wrote {}", path.display()));
        }
        None => print!("{}", artifact),
    }
    Ok(())
}

/// Handles the `plan` subcommand.
fn handle_plan(input: &InputArgs, json: bool) -> Result<(), ScaffoldError> {
    let inputs = Inputs::load(input)?;
    let manifest = &inputs.manifest;
    let plan = inputs
        .scaffolder()
        .plan(&manifest.results, manifest.security_exception);

    if json {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &plan)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(stdout))
            .map_err(|e| ScaffoldError::io("<stdout>", &e))?;
    } else {
        output::print_plan(&plan);
    }
    Ok(())
}

/// Handles the `check` subcommand.
fn handle_check(input: &InputArgs, name: &str, file: &Path) -> Result<(), ScaffoldError> {
    let inputs = Inputs::load(input)?;
    let manifest = &inputs.manifest;
    let artifact =
        inputs
            .scaffolder()
            .generate(name, &manifest.results, manifest.security_exception)?;
    let display = file.display().to_string();
    let existing = fs::read_to_string(file).map_err(|e| ScaffoldError::io(&display, &e))?;

    if output::print_drift(&existing, artifact.as_str()) {
        return Err(ScaffoldError::drift(display));
    }
    output::print_status(Color::Green, &format!("{} is up to date", display));
    Ok(())
}
