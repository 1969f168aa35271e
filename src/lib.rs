//! Scaffold: deterministic synthesis of lifecycle scaffolding for generated
//! JUnit test suites.
//!
//! Given the isolation features a suite needs (call replacement, virtual
//! filesystem, static state reset, stream reset, sandboxing) and the execution
//! records of its tests, the engine emits the minimal, self-consistent set of
//! fields, before/after hooks and helper routines that wire those features
//! around every test.
//!
//! ```rust
//! use scaffold::{generate_scaffolding, GenerationContext, ScaffoldConfig};
//!
//! let config = ScaffoldConfig { reset_static_fields: true, ..Default::default() };
//! let context = GenerationContext::default().with_reset_order(["a.B", "a.C"]);
//! let artifact = generate_scaffolding("Foo_ESTest", &[], false, &config, &context).unwrap();
//! assert!(artifact.as_str().contains("resetClasses();"));
//! ```

pub use crate::assembler::{file_name, generate_scaffolding, ScaffoldArtifact, Scaffolder};
pub use crate::config::{SandboxMode, ScaffoldConfig, TestFramework};
pub use crate::context::{GenerationContext, InstrumentationPolicy, PrefixPolicy};
pub use crate::errors::{ErrorKind, ScaffoldError};
pub use crate::plan::LifecyclePlan;
pub use crate::trace::{ExecutionRecord, TraceSummary};

pub mod assembler;
pub mod cli;
pub mod config;
pub mod context;
pub mod errors;
pub mod escape;
pub mod fragments;
pub mod framework;
pub mod imports;
pub mod plan;
pub mod trace;
