//! Before-each and after-each hooks.
//!
//! Teardown mirrors setup: whatever setup activates, teardown deactivates
//! under the same flags. Teardown never re-applies properties; that happens
//! only in setup and at class teardown.

use super::runtime::{
    reset_runtime_statement, GUI_SUPPORT, INSTRUMENTING_AGENT, SANDBOX, SYSTEM_IN_UTIL,
};
use super::{Field, FragmentBuilder, FragmentContext, Phase, PhaseGenerator, Routine, Shell, Step};
use crate::framework::Hook;
use crate::imports::Import;
use crate::plan::LifecyclePlan;

pub static TEST_SETUP: PhaseGenerator = PhaseGenerator {
    phase: Phase::TestSetup,
    emit_when: LifecyclePlan::has_test_setup,
    shell: Shell::Hook(Hook::BeforeEach),
    steps: &[
        Step {
            label: "save standard streams",
            when: |plan| plan.reset_streams,
            emit: save_streams,
        },
        Step {
            label: "set system properties",
            when: LifecyclePlan::reapply_properties,
            emit: |b, _cx| b.call(Routine::SetSystemProperties),
        },
        // GUI is not mocked, so tests always run headless once hooks exist.
        Step {
            label: "set headless mode",
            when: LifecyclePlan::always,
            emit: |b, _cx| b.statement(&format!("{}.setHeadless();", GUI_SUPPORT)),
        },
        Step {
            label: "enter sandbox",
            when: |plan| plan.sandbox,
            emit: |b, _cx| b.statement(&format!("{}.goingToExecuteSUTCode();", SANDBOX)),
        },
        Step {
            label: "reset runtime and activate agent",
            when: LifecyclePlan::instrumentation,
            emit: activate_agent,
        },
        Step {
            label: "initialize mocked stdin",
            when: |plan| plan.stdin_used,
            emit: |b, _cx| {
                b.statement(&format!("{}.getInstance().initForTestCase();", SYSTEM_IN_UTIL))
            },
        },
    ],
};

pub static TEST_TEARDOWN: PhaseGenerator = PhaseGenerator {
    phase: Phase::TestTeardown,
    emit_when: LifecyclePlan::has_test_teardown,
    shell: Shell::Hook(Hook::AfterEach),
    steps: &[
        Step {
            label: "restore standard streams",
            when: |plan| plan.reset_streams,
            emit: restore_streams,
        },
        Step {
            label: "reset classes",
            when: |plan| plan.reset_static_fields,
            emit: |b, _cx| b.call(Routine::ResetClasses),
        },
        Step {
            label: "exit sandbox",
            when: |plan| plan.sandbox,
            emit: |b, _cx| b.statement(&format!("{}.doneWithExecutingSUTCode();", SANDBOX)),
        },
        Step {
            label: "deactivate agent",
            when: LifecyclePlan::instrumentation,
            emit: |b, _cx| b.statement(&format!("{}.deactivate();", INSTRUMENTING_AGENT)),
        },
        Step {
            label: "restore headless mode",
            when: LifecyclePlan::always,
            emit: |b, _cx| b.statement(&format!("{}.restoreHeadlessMode();", GUI_SUPPORT)),
        },
    ],
};

fn save_streams(b: &mut FragmentBuilder, _cx: &FragmentContext<'_>) {
    b.import(Import::DebugGraphics);
    b.use_field(Field::SystemErr);
    b.use_field(Field::SystemOut);
    b.use_field(Field::LogStream);
    b.statement("systemErr = java.lang.System.err;");
    b.statement("systemOut = java.lang.System.out;");
    b.statement("logStream = DebugGraphics.logStream();");
}

fn restore_streams(b: &mut FragmentBuilder, _cx: &FragmentContext<'_>) {
    b.import(Import::DebugGraphics);
    b.use_field(Field::SystemErr);
    b.use_field(Field::SystemOut);
    b.use_field(Field::LogStream);
    b.statement("java.lang.System.setErr(systemErr);");
    b.statement("java.lang.System.setOut(systemOut);");
    b.statement("DebugGraphics.setLogStream(logStream);");
}

fn activate_agent(b: &mut FragmentBuilder, _cx: &FragmentContext<'_>) {
    b.statement(&reset_runtime_statement());
    b.statement(&format!("{}.activate();", INSTRUMENTING_AGENT));
}
