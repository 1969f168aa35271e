//! The lifecycle decision table.
//!
//! Every gate in every fragment generator is a pure function of one
//! [`LifecyclePlan`], evaluated once per generation call. Because the field
//! declarations, the routines and the statements that reference them all read
//! the same booleans, a reference can never be emitted without its target.

use serde::Serialize;

use crate::config::{SandboxMode, ScaffoldConfig};
use crate::context::GenerationContext;
use crate::trace::TraceSummary;

/// Flags driving fragment emission, resolved from config, traces and context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LifecyclePlan {
    pub reset_streams: bool,
    /// A security exception was seen, so tests run inside the sandbox.
    pub sandbox: bool,
    pub sandbox_mode: SandboxMode,
    pub replace_calls: bool,
    pub virtual_fs: bool,
    pub mock_system_in: bool,
    pub reset_static_fields: bool,
    /// Some execution read or wrote a system property.
    pub needs_property_restore: bool,
    pub stdin_used: bool,
}

impl LifecyclePlan {
    pub fn decide(
        config: &ScaffoldConfig,
        summary: &TraceSummary,
        context: &GenerationContext,
    ) -> Self {
        Self {
            reset_streams: config.reset_standard_streams,
            sandbox: summary.had_security_exception,
            sandbox_mode: config.sandbox_mode,
            replace_calls: config.replace_calls,
            virtual_fs: config.virtual_fs,
            mock_system_in: config.replace_system_in,
            reset_static_fields: config.reset_static_fields,
            needs_property_restore: summary.needs_property_restore,
            stdin_used: context.stdin_used,
        }
    }

    /// Any flag that needs the instrumenting agent.
    pub fn instrumentation(&self) -> bool {
        self.replace_calls || self.virtual_fs || self.reset_static_fields
    }

    /// The snapshot is re-applied before each test. The routine doing so
    /// only exists under call replacement.
    pub fn reapply_properties(&self) -> bool {
        self.replace_calls && self.needs_property_restore
    }

    pub fn has_fields(&self) -> bool {
        self.reset_streams || self.sandbox || self.needs_property_restore
    }

    pub fn has_class_setup(&self) -> bool {
        self.sandbox || self.instrumentation()
    }

    pub fn has_class_teardown(&self) -> bool {
        self.sandbox || self.needs_property_restore
    }

    pub fn has_test_setup(&self) -> bool {
        self.reset_streams
            || self.needs_property_restore
            || self.sandbox
            || self.instrumentation()
            || self.stdin_used
    }

    /// Same as test setup minus property restoration.
    pub fn has_test_teardown(&self) -> bool {
        self.reset_streams || self.sandbox || self.instrumentation() || self.stdin_used
    }

    pub fn has_property_routine(&self) -> bool {
        self.replace_calls
    }

    pub fn has_class_routines(&self) -> bool {
        self.reset_static_fields
    }

    /// Gate for steps that run whenever their fragment exists.
    pub fn always(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::ExecutionRecord;

    fn plan_for(config: &ScaffoldConfig, records: &[ExecutionRecord], security: bool) -> LifecyclePlan {
        let summary = TraceSummary::aggregate(records, security);
        LifecyclePlan::decide(config, &summary, &GenerationContext::default())
    }

    #[test]
    fn all_off_emits_nothing() {
        let plan = plan_for(&ScaffoldConfig::default(), &[], false);
        assert!(!plan.has_fields());
        assert!(!plan.has_class_setup());
        assert!(!plan.has_class_teardown());
        assert!(!plan.has_test_setup());
        assert!(!plan.has_test_teardown());
        assert!(!plan.has_property_routine());
        assert!(!plan.has_class_routines());
    }

    #[test]
    fn property_snapshot_does_not_need_call_replacement() {
        let records = vec![ExecutionRecord {
            written_properties: vec!["y".into()],
            ..Default::default()
        }];
        let plan = plan_for(&ScaffoldConfig::default(), &records, false);
        assert!(plan.needs_property_restore);
        assert!(plan.has_fields());
        assert!(plan.has_class_teardown());
        assert!(plan.has_test_setup());
        assert!(!plan.has_test_teardown());
        assert!(!plan.has_property_routine());
        assert!(!plan.reapply_properties());
    }

    #[test]
    fn reapplying_properties_needs_both_gates() {
        let records = vec![ExecutionRecord {
            read_properties: vec!["x".into()],
            ..Default::default()
        }];
        let config = ScaffoldConfig {
            replace_calls: true,
            ..Default::default()
        };
        assert!(plan_for(&config, &records, false).reapply_properties());
        assert!(!plan_for(&config, &[], false).reapply_properties());
        assert!(plan_for(&config, &[], false).has_property_routine());
    }

    #[test]
    fn streams_alone_need_only_per_test_hooks() {
        let config = ScaffoldConfig {
            reset_standard_streams: true,
            ..Default::default()
        };
        let plan = plan_for(&config, &[], false);
        assert!(plan.has_fields());
        assert!(plan.has_test_setup());
        assert!(plan.has_test_teardown());
        assert!(!plan.has_class_setup());
        assert!(!plan.has_class_teardown());
    }

    #[test]
    fn stdin_usage_comes_from_context() {
        let summary = TraceSummary::default();
        let context = GenerationContext::default().with_stdin_used(true);
        let plan = LifecyclePlan::decide(&ScaffoldConfig::default(), &summary, &context);
        assert!(plan.has_test_setup());
        assert!(plan.has_test_teardown());
        assert!(!plan.has_class_setup());
    }
}
