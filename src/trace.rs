//! Execution trace aggregation.
//!
//! Each generated test was executed once during search; its [`ExecutionRecord`]
//! remembers which system properties it touched and whether the sandbox
//! stopped it. [`TraceSummary::aggregate`] folds those records into the few
//! facts the fragment generators need.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Read-only view of one test execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionRecord {
    /// Property keys read, in the order they were first read.
    pub read_properties: Vec<String>,
    /// Property keys written.
    pub written_properties: Vec<String>,
    pub security_exception: bool,
}

impl ExecutionRecord {
    pub fn wrote_any_property(&self) -> bool {
        !self.written_properties.is_empty()
    }
}

/// Facts derived once per generation call from all execution records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceSummary {
    /// Union of read keys, first-seen order.
    pub read_properties: Vec<String>,
    pub needs_property_restore: bool,
    pub had_security_exception: bool,
}

impl TraceSummary {
    /// Merge `records`; `security_override` forces `had_security_exception`.
    pub fn aggregate(records: &[ExecutionRecord], security_override: bool) -> Self {
        let mut read_properties: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut any_written = false;
        let mut any_security = false;

        for record in records {
            for key in &record.read_properties {
                if seen.insert(key.as_str()) {
                    read_properties.push(key.clone());
                }
            }
            any_written |= record.wrote_any_property();
            any_security |= record.security_exception;
        }

        Self {
            needs_property_restore: !read_properties.is_empty() || any_written,
            read_properties,
            had_security_exception: any_security || security_override,
        }
    }
}
