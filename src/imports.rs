//! Import resolution.
//!
//! Fragments declare the simple names they use unqualified; the resolver
//! unions those declarations and renders them in a fixed canonical order.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::TestFramework;
use crate::fragments::Fragment;
use crate::framework::Hook;

/// A symbol a fragment refers to by its simple name.
///
/// Variant order is the order imports appear in the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Import {
    Annotation(Hook),
    PrintStream,
    DebugGraphics,
    Sandbox,
    ExecutorService,
    Executors,
}

impl Import {
    pub fn path(&self, framework: TestFramework) -> String {
        match self {
            Import::Annotation(hook) => framework.annotation_import(*hook),
            Import::PrintStream => "java.io.PrintStream".to_string(),
            Import::DebugGraphics => "javax.swing.DebugGraphics".to_string(),
            Import::Sandbox => "org.evosuite.runtime.sandbox.Sandbox".to_string(),
            Import::ExecutorService => "java.util.concurrent.ExecutorService".to_string(),
            Import::Executors => "java.util.concurrent.Executors".to_string(),
        }
    }
}

/// Minimal import list required by `fragments`, canonically ordered.
pub fn resolve(fragments: &[Fragment], framework: TestFramework) -> Vec<String> {
    let imports: BTreeSet<Import> = fragments
        .iter()
        .flat_map(|fragment| fragment.imports.iter().copied())
        .collect();
    imports.iter().map(|import| import.path(framework)).collect()
}
