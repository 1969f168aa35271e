//! Before-all and after-all hooks.
//!
//! Class setup order matters: the runtime toggles must be set before the
//! agent initializes (it reads them once), the sandbox must exist before any
//! SUT class is initialized under it, and the runtime reset comes last so it
//! sees the fully initialized class set.

use super::runtime::{
    reset_runtime_statement, restore_properties_statement, GUI_SUPPORT, INSTRUMENTING_AGENT,
    RUNTIME_SETTINGS, SANDBOX, SANDBOX_MODE,
};
use super::{Field, FragmentBuilder, FragmentContext, Phase, PhaseGenerator, Routine, Shell, Step};
use crate::framework::Hook;
use crate::imports::Import;
use crate::plan::LifecyclePlan;

pub static CLASS_SETUP: PhaseGenerator = PhaseGenerator {
    phase: Phase::ClassSetup,
    emit_when: LifecyclePlan::has_class_setup,
    shell: Shell::Hook(Hook::BeforeAll),
    steps: &[
        Step {
            label: "initialize GUI support",
            when: LifecyclePlan::always,
            emit: init_gui_support,
        },
        Step {
            label: "set runtime toggles and initialize agent",
            when: LifecyclePlan::instrumentation,
            emit: init_instrumentation,
        },
        Step {
            label: "initialize sandbox",
            when: |plan| plan.sandbox,
            emit: init_sandbox,
        },
        Step {
            label: "initialize classes",
            when: |plan| plan.reset_static_fields,
            emit: |b, _cx| b.call(Routine::InitializeClasses),
        },
        Step {
            label: "reset runtime",
            when: LifecyclePlan::instrumentation,
            emit: |b, _cx| b.statement(&reset_runtime_statement()),
        },
    ],
};

pub static CLASS_TEARDOWN: PhaseGenerator = PhaseGenerator {
    phase: Phase::ClassTeardown,
    emit_when: LifecyclePlan::has_class_teardown,
    shell: Shell::Hook(Hook::AfterAll),
    steps: &[
        Step {
            label: "shut down sandbox",
            when: |plan| plan.sandbox,
            emit: shutdown_sandbox,
        },
        Step {
            label: "restore system properties",
            when: |plan| plan.needs_property_restore,
            emit: restore_properties,
        },
    ],
};

fn init_gui_support(b: &mut FragmentBuilder, _cx: &FragmentContext<'_>) {
    b.statement(&format!("{}.initialize();", GUI_SUPPORT));
}

fn init_instrumentation(b: &mut FragmentBuilder, cx: &FragmentContext<'_>) {
    let plan = &cx.plan;
    let toggles = [
        (plan.replace_calls, "mockJVMNonDeterminism"),
        (plan.virtual_fs, "useVFS"),
        (plan.mock_system_in, "mockSystemIn"),
        (plan.reset_static_fields, "resetStaticState"),
    ];
    for (enabled, setting) in toggles {
        if enabled {
            b.statement(&format!("{}.{} = true;", RUNTIME_SETTINGS, setting));
        }
    }
    b.statement(&format!("{}.initialize();", INSTRUMENTING_AGENT));
}

fn init_sandbox(b: &mut FragmentBuilder, cx: &FragmentContext<'_>) {
    b.import(Import::Executors);
    b.use_field(Field::Executor);
    b.statement(&format!(
        "{}.sandboxMode = {}.{};",
        RUNTIME_SETTINGS, SANDBOX_MODE, cx.plan.sandbox_mode
    ));
    b.statement(&format!("{}.initializeSecurityManagerForSUT();", SANDBOX));
    b.statement(&format!(
        "{} = Executors.newCachedThreadPool();",
        Field::Executor.name()
    ));
}

fn shutdown_sandbox(b: &mut FragmentBuilder, _cx: &FragmentContext<'_>) {
    b.import(Import::Sandbox);
    b.use_field(Field::Executor);
    b.statement(&format!("{}.shutdownNow();", Field::Executor.name()));
    b.statement("Sandbox.resetDefaultSecurityManager();");
}

fn restore_properties(b: &mut FragmentBuilder, _cx: &FragmentContext<'_>) {
    b.use_field(Field::DefaultProperties);
    b.statement(&restore_properties_statement());
}
