//! # Fragment Generators
//!
//! One generator per lifecycle phase. Each generator is a small decision
//! table: an `emit_when` gate deciding whether the fragment exists at all, a
//! [`Shell`] describing the method wrapper around it, and an ordered list of
//! [`Step`]s, each gated independently on the [`LifecyclePlan`].
//!
//! ## Phases (canonical order)
//!
//! - **`Fields`**: stream holders, executor, property snapshot
//! - **`ClassSetup`** / **`ClassTeardown`**: before-all / after-all hooks
//! - **`TestSetup`** / **`TestTeardown`**: before-each / after-each hooks
//! - **`PropertyRoutine`**: `setSystemProperties()`
//! - **`ClassInitRoutine`** / **`ClassResetRoutine`**: static state handling

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::config::TestFramework;
use crate::context::{GenerationContext, InstrumentationPolicy};
use crate::framework::Hook;
use crate::imports::Import;
use crate::plan::LifecyclePlan;
use crate::trace::TraceSummary;

pub mod class_hooks;
pub mod fields;
pub mod routines;
pub mod runtime;
pub mod test_hooks;

// ============================================================================
// FRAGMENT MODEL
// ============================================================================

/// Lifecycle phase tag; declaration order is the canonical artifact order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Phase {
    Fields,
    ClassSetup,
    ClassTeardown,
    TestSetup,
    TestTeardown,
    PropertyRoutine,
    ClassInitRoutine,
    ClassResetRoutine,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Fields => "FIELDS",
            Phase::ClassSetup => "CLASS_SETUP",
            Phase::ClassTeardown => "CLASS_TEARDOWN",
            Phase::TestSetup => "TEST_SETUP",
            Phase::TestTeardown => "TEST_TEARDOWN",
            Phase::PropertyRoutine => "PROPERTY_ROUTINE",
            Phase::ClassInitRoutine => "CLASS_INIT_ROUTINE",
            Phase::ClassResetRoutine => "CLASS_RESET_ROUTINE",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields the scaffolding class may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    SystemOut,
    SystemErr,
    LogStream,
    Executor,
    DefaultProperties,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::SystemOut => "systemOut",
            Field::SystemErr => "systemErr",
            Field::LogStream => "logStream",
            Field::Executor => "executor",
            Field::DefaultProperties => "defaultProperties",
        }
    }
}

/// Helper methods the hooks call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Routine {
    SetSystemProperties,
    InitializeClasses,
    ResetClasses,
}

impl Routine {
    pub fn name(&self) -> &'static str {
        match self {
            Routine::SetSystemProperties => "setSystemProperties",
            Routine::InitializeClasses => "initializeClasses",
            Routine::ResetClasses => "resetClasses",
        }
    }

    pub fn signature(&self) -> &'static str {
        match self {
            Routine::SetSystemProperties => "public void setSystemProperties()",
            Routine::InitializeClasses => "private static void initializeClasses()",
            Routine::ResetClasses => "private static void resetClasses()",
        }
    }
}

/// Something a fragment refers to that another fragment must declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Dependency {
    Field(Field),
    Routine(Routine),
}

/// One generated hook, routine or field block plus its dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub phase: Phase,
    pub body: String,
    pub imports: BTreeSet<Import>,
    pub requires: BTreeSet<Dependency>,
    pub provides: BTreeSet<Dependency>,
}

// ============================================================================
// FRAGMENT BUILDER
// ============================================================================

/// Indentation of class members.
pub const METHOD_SPACE: &str = "  ";
/// Indentation of statements inside a member.
pub const BLOCK_SPACE: &str = "    ";
/// Indentation of continuation lines (call arguments).
pub const INNER_BLOCK_SPACE: &str = "      ";

/// Accumulates the text and declared dependencies of one fragment.
#[derive(Debug)]
pub struct FragmentBuilder {
    phase: Phase,
    body: String,
    imports: BTreeSet<Import>,
    requires: BTreeSet<Dependency>,
    provides: BTreeSet<Dependency>,
}

impl FragmentBuilder {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            body: String::new(),
            imports: BTreeSet::new(),
            requires: BTreeSet::new(),
            provides: BTreeSet::new(),
        }
    }

    fn line(&mut self, indent: &str, text: &str) {
        self.body.push_str(indent);
        self.body.push_str(text);
        self.body.push('\n');
    }

    pub fn member(&mut self, text: &str) {
        self.line(METHOD_SPACE, text);
    }

    pub fn statement(&mut self, text: &str) {
        self.line(BLOCK_SPACE, text);
    }

    pub fn blank(&mut self) {
        self.body.push('\n');
    }

    pub fn import(&mut self, import: Import) {
        self.imports.insert(import);
    }

    pub fn declare_field(&mut self, field: Field) {
        self.provides.insert(Dependency::Field(field));
    }

    pub fn use_field(&mut self, field: Field) {
        self.requires.insert(Dependency::Field(field));
    }

    /// Emits a call to `routine` and records the dependency.
    pub fn call(&mut self, routine: Routine) {
        self.requires.insert(Dependency::Routine(routine));
        self.statement(&format!("{}();", routine.name()));
    }

    /// Emits `callee(arg, ...);` with one argument per continuation line.
    pub fn batch_call(&mut self, callee: &str, args: &[String]) {
        self.statement(&format!("{}(", callee));
        let last = args.len().saturating_sub(1);
        for (i, arg) in args.iter().enumerate() {
            let separator = if i < last { "," } else { "" };
            self.line(INNER_BLOCK_SPACE, &format!("{}{}", arg, separator));
        }
        self.statement(");");
    }

    pub fn finish(self) -> Fragment {
        Fragment {
            phase: self.phase,
            body: self.body,
            imports: self.imports,
            requires: self.requires,
            provides: self.provides,
        }
    }
}

// ============================================================================
// GENERATOR TABLES
// ============================================================================

/// Everything a step may read while emitting.
pub struct FragmentContext<'a> {
    pub plan: LifecyclePlan,
    pub class_name: &'a str,
    pub framework: TestFramework,
    pub summary: &'a TraceSummary,
    pub context: &'a GenerationContext,
    pub policy: &'a dyn InstrumentationPolicy,
}

/// Gate evaluated against the decision table.
pub type Gate = fn(&LifecyclePlan) -> bool;

/// Emits the statements of one step.
pub type Emit = fn(&mut FragmentBuilder, &FragmentContext<'_>);

/// One independently gated sub-step of a fragment.
pub struct Step {
    pub label: &'static str,
    pub when: Gate,
    pub emit: Emit,
}

/// Wrapper around a fragment's steps.
#[derive(Debug, Clone, Copy)]
pub enum Shell {
    /// Bare class members (field declarations).
    Members,
    /// An annotated lifecycle hook.
    Hook(Hook),
    /// A helper routine called from the hooks.
    Routine(Routine),
}

impl Shell {
    fn open(&self, b: &mut FragmentBuilder, framework: TestFramework) {
        match self {
            Shell::Members => {}
            Shell::Hook(hook) => {
                b.import(Import::Annotation(*hook));
                b.member(&format!("@{}", framework.annotation(*hook)));
                b.member(&format!("{} {{", hook.method_signature()));
            }
            Shell::Routine(routine) => {
                b.provides.insert(Dependency::Routine(*routine));
                b.member(&format!("{} {{", routine.signature()));
            }
        }
    }

    fn close(&self, b: &mut FragmentBuilder) {
        if !matches!(self, Shell::Members) {
            b.member("}");
        }
        b.blank();
    }
}

/// Decision table for one lifecycle phase.
pub struct PhaseGenerator {
    pub phase: Phase,
    pub emit_when: Gate,
    pub shell: Shell,
    pub steps: &'static [Step],
}

impl PhaseGenerator {
    /// Runs the table; `None` when the fragment does not exist.
    pub fn generate(&self, cx: &FragmentContext<'_>) -> Option<Fragment> {
        if !(self.emit_when)(&cx.plan) {
            return None;
        }
        let mut b = FragmentBuilder::new(self.phase);
        self.shell.open(&mut b, cx.framework);
        for step in self.steps {
            if (step.when)(&cx.plan) {
                (step.emit)(&mut b, cx);
            }
        }
        self.shell.close(&mut b);
        Some(b.finish())
    }

    /// Labels of the steps that fire under `plan`, in emission order.
    pub fn active_steps(&self, plan: &LifecyclePlan) -> Vec<&'static str> {
        if !(self.emit_when)(plan) {
            return Vec::new();
        }
        self.steps
            .iter()
            .filter(|step| (step.when)(plan))
            .map(|step| step.label)
            .collect()
    }
}

/// All generators in canonical phase order.
pub static GENERATORS: [&PhaseGenerator; 8] = [
    &fields::FIELDS,
    &class_hooks::CLASS_SETUP,
    &class_hooks::CLASS_TEARDOWN,
    &test_hooks::TEST_SETUP,
    &test_hooks::TEST_TEARDOWN,
    &routines::PROPERTY_ROUTINE,
    &routines::CLASS_INIT_ROUTINE,
    &routines::CLASS_RESET_ROUTINE,
];

/// Runs every generator and keeps the fragments that exist.
pub fn generate_all(cx: &FragmentContext<'_>) -> Vec<Fragment> {
    GENERATORS
        .iter()
        .filter_map(|generator| generator.generate(cx))
        .collect()
}
