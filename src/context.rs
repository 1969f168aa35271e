//! Read-only snapshot of the generation context.
//!
//! The generator never consults process-wide state. Everything it would
//! otherwise query from singletons (the class reset order, the classes the
//! SUT loader already instrumented, whether `System.in` was used, the current
//! value of system properties) is captured into a [`GenerationContext`] by the
//! caller and passed in explicitly.

use im::HashMap;
use serde::{Deserialize, Serialize};

/// Explicit inputs taken from the surrounding test generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationContext {
    /// Classes whose static state must be reset, topologically sorted.
    pub reset_order: Vec<String>,
    /// Every class the SUT class loader has instrumented so far.
    pub instrumented_classes: Vec<String>,
    /// Whether any test read from the mocked `System.in`.
    pub stdin_used: bool,
    /// Current system property values, captured at generation time.
    pub property_values: HashMap<String, String>,
}

impl GenerationContext {
    /// Current value of property `key`, if it had one.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.property_values.get(key).map(String::as_str)
    }

    pub fn with_reset_order<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reset_order = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_instrumented_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instrumented_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.property_values.insert(key.into(), value.into());
        self
    }

    pub fn with_stdin_used(mut self, used: bool) -> Self {
        self.stdin_used = used;
        self
    }
}

// ============================================================================
// INSTRUMENTABILITY - which reset-plan classes may be initialized eagerly
// ============================================================================

/// Predicate deciding whether a class can be instrumented.
pub trait InstrumentationPolicy {
    fn can_instrument(&self, class_name: &str) -> bool;
}

/// Packages that are never instrumented: the JDK, test frameworks,
/// mocking libraries, logging facades and the runtime library itself.
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &[
    "java.",
    "javax.",
    "jdk.",
    "sun.",
    "com.sun.",
    "org.junit.",
    "junit.",
    "org.mockito.",
    "org.hamcrest.",
    "org.objectweb.asm.",
    "org.slf4j.",
    "ch.qos.logback.",
    "org.apache.log4j.",
    "org.evosuite.",
];

/// Class-name fragments marking runtime-generated proxies.
const GENERATED_CLASS_MARKERS: &[&str] = &["$$EnhancerByMockito", "$$EnhancerByCGLIB", "$$Lambda$"];

/// Prefix-based [`InstrumentationPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixPolicy {
    excluded: Vec<String>,
}

impl PrefixPolicy {
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    /// Adds one more excluded prefix.
    pub fn exclude(mut self, prefix: impl Into<String>) -> Self {
        self.excluded.push(prefix.into());
        self
    }
}

impl Default for PrefixPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_PREFIXES.iter().copied())
    }
}

impl InstrumentationPolicy for PrefixPolicy {
    fn can_instrument(&self, class_name: &str) -> bool {
        if self
            .excluded
            .iter()
            .any(|prefix| class_name.starts_with(prefix.as_str()))
        {
            return false;
        }
        !GENERATED_CLASS_MARKERS
            .iter()
            .any(|marker| class_name.contains(marker))
    }
}

impl<F> InstrumentationPolicy for F
where
    F: Fn(&str) -> bool,
{
    fn can_instrument(&self, class_name: &str) -> bool {
        self(class_name)
    }
}
