//! Field declarations shared by the hooks.

use super::{Field, FragmentBuilder, FragmentContext, PhaseGenerator, Phase, Shell, Step};
use crate::imports::Import;
use crate::plan::LifecyclePlan;

pub static FIELDS: PhaseGenerator = PhaseGenerator {
    phase: Phase::Fields,
    emit_when: LifecyclePlan::has_fields,
    shell: Shell::Members,
    steps: &[
        Step {
            label: "declare standard stream holders",
            when: |plan| plan.reset_streams,
            emit: stream_holders,
        },
        Step {
            label: "declare sandbox executor",
            when: |plan| plan.sandbox,
            emit: executor,
        },
        Step {
            label: "snapshot system properties",
            when: |plan| plan.needs_property_restore,
            emit: default_properties,
        },
    ],
};

fn stream_holders(b: &mut FragmentBuilder, _cx: &FragmentContext<'_>) {
    b.import(Import::PrintStream);
    for field in [Field::SystemOut, Field::SystemErr, Field::LogStream] {
        b.declare_field(field);
        b.member(&format!("private PrintStream {} = null;", field.name()));
    }
}

fn executor(b: &mut FragmentBuilder, _cx: &FragmentContext<'_>) {
    b.import(Import::ExecutorService);
    b.declare_field(Field::Executor);
    b.member(&format!(
        "protected static ExecutorService {};",
        Field::Executor.name()
    ));
}

/// Captured at class-load time so every test starts from the same table.
fn default_properties(b: &mut FragmentBuilder, _cx: &FragmentContext<'_>) {
    b.declare_field(Field::DefaultProperties);
    b.member(&format!(
        "private static final java.util.Properties {} = (java.util.Properties) java.lang.System.getProperties().clone();",
        Field::DefaultProperties.name()
    ));
}
