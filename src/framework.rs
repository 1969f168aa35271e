//! Test framework adapter.
//!
//! Maps the four lifecycle hooks onto the annotation names and import paths
//! of the target framework, and renders the enclosing class definition.

use std::fmt;

use serde::Serialize;

use crate::config::TestFramework;

/// Lifecycle hook kinds, in import order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Hook {
    BeforeAll,
    BeforeEach,
    AfterEach,
    AfterAll,
}

impl Hook {
    /// Signature of the generated hook method, without the opening brace.
    pub fn method_signature(&self) -> &'static str {
        match self {
            Hook::BeforeAll => "public static void initEvoSuiteFramework()",
            Hook::BeforeEach => "public void initTestCase()",
            Hook::AfterEach => "public void doneWithTestCase()",
            Hook::AfterAll => "public static void clearEvoSuiteFramework()",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hook::BeforeAll => "before-all",
            Hook::BeforeEach => "before-each",
            Hook::AfterEach => "after-each",
            Hook::AfterAll => "after-all",
        };
        write!(f, "{}", name)
    }
}

impl TestFramework {
    /// Simple name of the annotation marking `hook`.
    pub fn annotation(&self, hook: Hook) -> &'static str {
        match (self, hook) {
            (TestFramework::Junit4, Hook::BeforeAll) => "BeforeClass",
            (TestFramework::Junit4, Hook::BeforeEach) => "Before",
            (TestFramework::Junit4, Hook::AfterEach) => "After",
            (TestFramework::Junit4, Hook::AfterAll) => "AfterClass",
            (TestFramework::Junit5, Hook::BeforeAll) => "BeforeAll",
            (TestFramework::Junit5, Hook::BeforeEach) => "BeforeEach",
            (TestFramework::Junit5, Hook::AfterEach) => "AfterEach",
            (TestFramework::Junit5, Hook::AfterAll) => "AfterAll",
        }
    }

    /// Fully qualified name of the annotation marking `hook`.
    pub fn annotation_import(&self, hook: Hook) -> String {
        let package = match self {
            TestFramework::Junit4 => "org.junit",
            TestFramework::Junit5 => "org.junit.jupiter.api",
        };
        format!("{}.{}", package, self.annotation(hook))
    }

    pub fn class_definition(&self, class_name: &str) -> String {
        format!("public class {}", class_name)
    }
}
