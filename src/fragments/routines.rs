//! Helper routines called from the hooks: property restoration, class
//! initialization and class reset.

use super::runtime::{restore_properties_statement, CLASS_STATE_SUPPORT};
use super::{Field, FragmentBuilder, FragmentContext, Phase, PhaseGenerator, Routine, Shell, Step};
use crate::escape::{escape_java, java_literal};
use crate::plan::LifecyclePlan;

pub static PROPERTY_ROUTINE: PhaseGenerator = PhaseGenerator {
    phase: Phase::PropertyRoutine,
    emit_when: LifecyclePlan::has_property_routine,
    shell: Shell::Routine(Routine::SetSystemProperties),
    steps: &[
        Step {
            label: "restore property snapshot",
            when: |plan| plan.reapply_properties(),
            emit: restore_snapshot,
        },
        Step {
            label: "set observed property values",
            when: |plan| plan.reapply_properties(),
            emit: set_read_properties,
        },
        Step {
            label: "no properties to set",
            when: |plan| !plan.reapply_properties(),
            emit: |b, _cx| b.statement("/*No java.lang.System property to set*/"),
        },
    ],
};

pub static CLASS_INIT_ROUTINE: PhaseGenerator = PhaseGenerator {
    phase: Phase::ClassInitRoutine,
    emit_when: LifecyclePlan::has_class_routines,
    shell: Shell::Routine(Routine::InitializeClasses),
    steps: &[
        Step {
            label: "initialize instrumentable reset-plan classes",
            when: LifecyclePlan::always,
            emit: initialize_classes,
        },
        // Must follow initialization: classes are loaded in reset-plan order first.
        Step {
            label: "retransform instrumented classes",
            when: LifecyclePlan::always,
            emit: retransform_classes,
        },
    ],
};

pub static CLASS_RESET_ROUTINE: PhaseGenerator = PhaseGenerator {
    phase: Phase::ClassResetRoutine,
    emit_when: LifecyclePlan::has_class_routines,
    shell: Shell::Routine(Routine::ResetClasses),
    steps: &[Step {
        label: "reset reset-plan classes",
        when: LifecyclePlan::always,
        emit: reset_classes,
    }],
};

fn restore_snapshot(b: &mut FragmentBuilder, _cx: &FragmentContext<'_>) {
    b.use_field(Field::DefaultProperties);
    b.statement(&restore_properties_statement());
}

/// Keys without a current value are not cleared: the snapshot restore has
/// already reset them, and SUTs that write properties from their inputs
/// would otherwise produce thousands of clear statements.
fn set_read_properties(b: &mut FragmentBuilder, cx: &FragmentContext<'_>) {
    for key in &cx.summary.read_properties {
        if let Some(value) = cx.context.property(key) {
            b.statement(&format!(
                "java.lang.System.setProperty(\"{}\", \"{}\");",
                escape_java(key),
                escape_java(value)
            ));
        }
    }
}

fn class_loader_expr(cx: &FragmentContext<'_>) -> String {
    format!("{}.class.getClassLoader()", cx.class_name)
}

fn initialize_classes(b: &mut FragmentBuilder, cx: &FragmentContext<'_>) {
    let classes: Vec<String> = cx
        .context
        .reset_order
        .iter()
        .filter(|name| cx.policy.can_instrument(name))
        .map(|name| java_literal(name))
        .collect();
    if classes.is_empty() {
        return;
    }
    let mut args = vec![class_loader_expr(cx)];
    args.extend(classes);
    b.batch_call(&format!("{}.initializeClasses", CLASS_STATE_SUPPORT), &args);
}

fn retransform_classes(b: &mut FragmentBuilder, cx: &FragmentContext<'_>) {
    let instrumented = &cx.context.instrumented_classes;
    if instrumented.is_empty() {
        return;
    }
    let mut args = vec![class_loader_expr(cx)];
    args.extend(instrumented.iter().map(|name| java_literal(name)));
    b.batch_call(&format!("{}.retransformIfNeeded", CLASS_STATE_SUPPORT), &args);
}

fn reset_classes(b: &mut FragmentBuilder, cx: &FragmentContext<'_>) {
    let classes: Vec<String> = cx
        .context
        .reset_order
        .iter()
        .map(|name| java_literal(name))
        .collect();
    if classes.is_empty() {
        return;
    }
    b.batch_call(&format!("{}.resetClasses", CLASS_STATE_SUPPORT), &classes);
}
