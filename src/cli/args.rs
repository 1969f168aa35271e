//! Defines the command-line arguments and subcommands for the Scaffold CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "scaffold",
    version,
    about = "Synthesizes lifecycle scaffolding for generated JUnit test suites."
)]
pub struct ScaffoldArgs {
    /// Log decisions and emitted fragments to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Inputs shared by every subcommand.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Configuration file (YAML, or JSON by extension).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run manifest with execution records and context (YAML or JSON).
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Treat the run as having raised a security exception.
    #[arg(long)]
    pub security_exception: bool,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the scaffolding file for a test class.
    Generate {
        #[command(flatten)]
        input: InputArgs,
        /// Name of the generated test class, e.g. `Foo_ESTest`.
        #[arg(short, long)]
        name: String,
        /// Directory to write `<name>_<suffix>.java` into; stdout if omitted.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show which fragments and steps the inputs enable.
    Plan {
        #[command(flatten)]
        input: InputArgs,
        /// Print the decision table as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Regenerate and compare against an existing scaffolding file.
    Check {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long)]
        name: String,
        /// The scaffolding file to compare.
        #[arg(short, long)]
        file: PathBuf,
    },
}
