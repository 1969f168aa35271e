//! Scaffolding assembly.
//!
//! [`Scaffolder`] is the entry point: it aggregates the traces, resolves the
//! decision table, runs every fragment generator and writes the artifact in a
//! single canonical layout: header, package, imports, class declaration,
//! fragments in phase order, closing brace.

use std::fmt;

use tracing::{debug, debug_span, info};

use crate::config::ScaffoldConfig;
use crate::context::{GenerationContext, InstrumentationPolicy, PrefixPolicy};
use crate::errors::ScaffoldError;
use crate::fragments::{self, Fragment, FragmentContext, Phase};
use crate::imports;
use crate::plan::LifecyclePlan;
use crate::trace::{ExecutionRecord, TraceSummary};

const HEADER_BANNER: &str = "/**\n * Scaffolding file used to store all the setups needed to run\n * tests automatically generated by EvoSuite\n */\n";

/// Name of the scaffolding class (and file stem) for `test_name`.
pub fn file_name(test_name: &str, config: &ScaffoldConfig) -> Result<String, ScaffoldError> {
    if test_name.is_empty() {
        return Err(ScaffoldError::invalid_argument("test_name", "Empty test name")
            .with_help("pass the name of the generated test class, e.g. `Foo_ESTest`"));
    }
    Ok(format!("{}_{}", test_name, config.scaffolding_suffix))
}

/// A generated scaffolding source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldArtifact {
    pub class_name: String,
    pub plan: LifecyclePlan,
    pub imports: Vec<String>,
    pub fragments: Vec<Fragment>,
    text: String,
}

impl ScaffoldArtifact {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// `<class_name>.java`
    pub fn file_name(&self) -> String {
        format!("{}.java", self.class_name)
    }

    pub fn fragment(&self, phase: Phase) -> Option<&Fragment> {
        self.fragments.iter().find(|fragment| fragment.phase == phase)
    }
}

impl fmt::Display for ScaffoldArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ============================================================================
// SCAFFOLDER
// ============================================================================

/// Generates scaffolding for one configuration and context snapshot.
pub struct Scaffolder<'a> {
    config: &'a ScaffoldConfig,
    context: &'a GenerationContext,
    policy: Box<dyn InstrumentationPolicy + 'a>,
}

impl<'a> Scaffolder<'a> {
    /// Uses [`PrefixPolicy::default`] to decide instrumentability.
    pub fn new(config: &'a ScaffoldConfig, context: &'a GenerationContext) -> Self {
        Self {
            config,
            context,
            policy: Box::new(PrefixPolicy::default()),
        }
    }

    pub fn with_policy(mut self, policy: impl InstrumentationPolicy + 'a) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// The decision table for these traces, without generating text.
    pub fn plan(&self, results: &[ExecutionRecord], security_exception: bool) -> LifecyclePlan {
        let summary = TraceSummary::aggregate(results, security_exception);
        LifecyclePlan::decide(self.config, &summary, self.context)
    }

    /// Full scaffolding source for `test_name`.
    pub fn generate(
        &self,
        test_name: &str,
        results: &[ExecutionRecord],
        security_exception: bool,
    ) -> Result<ScaffoldArtifact, ScaffoldError> {
        let class_name = file_name(test_name, self.config)?;
        let span = debug_span!("scaffolding", class = %class_name);
        let _guard = span.enter();

        let summary = TraceSummary::aggregate(results, security_exception);
        let plan = LifecyclePlan::decide(self.config, &summary, self.context);
        let cx = FragmentContext {
            plan,
            class_name: &class_name,
            framework: self.config.test_framework,
            summary: &summary,
            context: self.context,
            policy: &*self.policy,
        };

        let fragments = fragments::generate_all(&cx);
        for fragment in &fragments {
            debug!(phase = %fragment.phase, lines = fragment.body.lines().count(), "emitted fragment");
        }
        let imports = imports::resolve(&fragments, self.config.test_framework);
        let text = self.render(&class_name, &imports, &fragments);
        info!(
            class = %class_name,
            fragments = fragments.len(),
            imports = imports.len(),
            bytes = text.len(),
            "generated scaffolding"
        );

        Ok(ScaffoldArtifact {
            class_name,
            plan,
            imports,
            fragments,
            text,
        })
    }

    /// Import list the scaffolding for these traces needs.
    pub fn scaffolding_imports(
        &self,
        test_name: &str,
        results: &[ExecutionRecord],
        security_exception: bool,
    ) -> Result<Vec<String>, ScaffoldError> {
        Ok(self.generate(test_name, results, security_exception)?.imports)
    }

    fn render(&self, class_name: &str, imports: &[String], fragments: &[Fragment]) -> String {
        let mut out = String::from(HEADER_BANNER);
        out.push('\n');

        if !self.config.class_prefix.is_empty() {
            out.push_str(&format!("package {};\n\n", self.config.class_prefix));
        }

        if !imports.is_empty() {
            for import in imports {
                out.push_str(&format!("import {};\n", import));
            }
            out.push('\n');
        }

        out.push_str(&self.config.test_framework.class_definition(class_name));
        out.push_str(" {\n\n");
        for fragment in fragments {
            out.push_str(&fragment.body);
        }
        out.push_str("}\n");
        out
    }
}

/// One-shot convenience wrapper around [`Scaffolder::generate`].
pub fn generate_scaffolding(
    test_name: &str,
    results: &[ExecutionRecord],
    security_exception: bool,
    config: &ScaffoldConfig,
    context: &GenerationContext,
) -> Result<ScaffoldArtifact, ScaffoldError> {
    Scaffolder::new(config, context).generate(test_name, results, security_exception)
}
