//! Configuration snapshot for one generation run.
//!
//! A [`ScaffoldConfig`] is loaded once (YAML or JSON) and then only ever read.
//! Every isolation flag defaults to off, so an empty file describes a test
//! suite that needs no scaffolding at all.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ScaffoldError, SourceContext};

/// Security-manager policy the sandbox applies to SUT code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SandboxMode {
    Off,
    #[default]
    Recommended,
    Io,
}

impl SandboxMode {
    /// Name of the matching constant in the runtime's `SandboxMode` enum.
    pub fn as_str(&self) -> &'static str {
        match self {
            SandboxMode::Off => "OFF",
            SandboxMode::Recommended => "RECOMMENDED",
            SandboxMode::Io => "IO",
        }
    }
}

impl fmt::Display for SandboxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Test framework whose lifecycle annotations the artifact uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    #[default]
    Junit4,
    Junit5,
}

/// Immutable set of flags describing the isolation features to wire in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaffoldConfig {
    /// Replace nondeterministic JVM calls (time, random, properties, ...).
    pub replace_calls: bool,
    /// Route file access through the virtual filesystem.
    pub virtual_fs: bool,
    /// Reinitialize static state of SUT classes between tests.
    pub reset_static_fields: bool,
    /// Save and restore `System.out`/`System.err` around each test.
    pub reset_standard_streams: bool,
    /// Mock `System.in` when instrumentation is active.
    pub replace_system_in: bool,
    pub sandbox_mode: SandboxMode,
    /// Package of the generated tests; empty means the default package.
    pub class_prefix: String,
    pub scaffolding_suffix: String,
    pub test_framework: TestFramework,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            replace_calls: false,
            virtual_fs: false,
            reset_static_fields: false,
            reset_standard_streams: false,
            replace_system_in: false,
            sandbox_mode: SandboxMode::Recommended,
            class_prefix: String::new(),
            scaffolding_suffix: "scaffolding".to_string(),
            test_framework: TestFramework::Junit4,
        }
    }
}

impl ScaffoldConfig {
    /// Load a configuration file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self, ScaffoldError> {
        load_document(path)
    }
}

// ============================================================================
// DOCUMENT LOADING - shared by configuration and run manifests
// ============================================================================

/// Reads `path` and deserializes it as JSON (`.json`) or YAML (anything else).
pub fn load_document<T>(path: &Path) -> Result<T, ScaffoldError>
where
    T: for<'de> Deserialize<'de>,
{
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| ScaffoldError::io(&display, &e))?;
    let source = SourceContext::from_file(display, content);
    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_json(&source)
    } else {
        parse_yaml(&source)
    }
}

pub fn parse_yaml<T>(source: &SourceContext) -> Result<T, ScaffoldError>
where
    T: for<'de> Deserialize<'de>,
{
    // An empty YAML document is a valid "all defaults" file.
    let text = if source.content.trim().is_empty() {
        "{}"
    } else {
        source.content.as_str()
    };
    serde_yaml::from_str(text).map_err(|e| {
        let offset = e.location().map(|loc| loc.index());
        ScaffoldError::malformed("yaml", e.to_string(), source, offset)
    })
}

pub fn parse_json<T>(source: &SourceContext) -> Result<T, ScaffoldError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_str(&source.content).map_err(|e| {
        let offset = line_column_offset(&source.content, e.line(), e.column());
        ScaffoldError::malformed("json", e.to_string(), source, offset)
    })
}

/// Byte offset of a 1-based line/column pair, if it lies inside `text` or
/// at its very end (where end-of-input errors point).
fn line_column_offset(text: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut line_start = 0;
    for (index, segment) in text.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            break;
        }
        line_start += segment.len();
    }
    let preceding = text[..line_start].matches('\n').count();
    if preceding + 1 < line {
        return None;
    }
    let offset = line_start + column.saturating_sub(1);
    (offset <= text.len()).then_some(offset)
}
