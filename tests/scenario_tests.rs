//! End-to-end scaffolding scenarios.
//!
//! Each test drives the public API with a configuration, a set of execution
//! records and a context snapshot, then checks the emitted artifact.

use scaffold::fragments::{Dependency, Field, Phase};
use scaffold::{
    generate_scaffolding, ErrorKind, ExecutionRecord, GenerationContext, SandboxMode,
    ScaffoldArtifact, ScaffoldConfig, Scaffolder, TestFramework,
};

const TEST_NAME: &str = "Foo_ESTest";

fn generate(
    config: &ScaffoldConfig,
    context: &GenerationContext,
    records: &[ExecutionRecord],
    security: bool,
) -> ScaffoldArtifact {
    generate_scaffolding(TEST_NAME, records, security, config, context)
        .expect("generation should succeed")
}

fn body(artifact: &ScaffoldArtifact, phase: Phase) -> &str {
    artifact
        .fragment(phase)
        .map(|f| f.body.as_str())
        .unwrap_or_else(|| panic!("missing {} fragment", phase))
}

fn record(read: &[&str], written: &[&str]) -> ExecutionRecord {
    ExecutionRecord {
        read_properties: read.iter().map(|s| s.to_string()).collect(),
        written_properties: written.iter().map(|s| s.to_string()).collect(),
        security_exception: false,
    }
}

/// Position of `needle` in `haystack`; panics when absent.
fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("'{}' not found in:\n{}", needle, haystack))
}

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn all_flags_off_is_only_the_class_declaration() {
        let artifact = generate(&ScaffoldConfig::default(), &GenerationContext::default(), &[], false);
        assert!(artifact.fragments.is_empty());
        assert!(artifact.imports.is_empty());
        assert!(!artifact.as_str().contains("import "));
        assert!(!artifact.as_str().contains('@'));
        assert!(artifact
            .as_str()
            .ends_with("public class Foo_ESTest_scaffolding {\n\n}\n"));
    }

    #[test]
    fn static_reset_wires_initialize_and_reset_routines() {
        let config = ScaffoldConfig {
            reset_static_fields: true,
            ..Default::default()
        };
        let context = GenerationContext::default().with_reset_order(["a.B", "a.C"]);
        let artifact = generate(&config, &context, &[], false);

        assert!(body(&artifact, Phase::ClassSetup).contains("    initializeClasses();\n"));
        assert!(body(&artifact, Phase::TestTeardown).contains("    resetClasses();\n"));
        assert_eq!(
            body(&artifact, Phase::ClassInitRoutine),
            "  private static void initializeClasses() {\n    \
             org.evosuite.runtime.ClassStateSupport.initializeClasses(\n      \
             Foo_ESTest_scaffolding.class.getClassLoader(),\n      \"a.B\",\n      \"a.C\"\n    );\n  }\n\n"
        );
        assert!(body(&artifact, Phase::ClassResetRoutine)
            .contains("resetClasses(\n      \"a.B\",\n      \"a.C\"\n    );"));
    }

    #[test]
    fn class_initialization_lists_only_instrumentable_classes() {
        let config = ScaffoldConfig {
            reset_static_fields: true,
            ..Default::default()
        };
        let context = GenerationContext::default().with_reset_order(["a.B", "a.C"]);
        let artifact = Scaffolder::new(&config, &context)
            .with_policy(|name: &str| name != "a.C")
            .generate(TEST_NAME, &[], false)
            .unwrap();

        let init = body(&artifact, Phase::ClassInitRoutine);
        assert!(init.contains("\"a.B\""));
        assert!(!init.contains("\"a.C\""));
        // Reset uses the full plan.
        let reset = body(&artifact, Phase::ClassResetRoutine);
        assert!(reset.contains("\"a.B\",\n      \"a.C\""));
    }

    #[test]
    fn read_properties_get_explicit_values_written_ones_do_not() {
        let config = ScaffoldConfig {
            replace_calls: true,
            ..Default::default()
        };
        let context = GenerationContext::default()
            .with_property("x", "1")
            .with_property("y", "2");
        let artifact = generate(&config, &context, &[record(&["x"], &["y"])], false);

        assert_eq!(
            body(&artifact, Phase::PropertyRoutine),
            "  public void setSystemProperties() {\n    \
             java.lang.System.setProperties((java.util.Properties) defaultProperties.clone());\n    \
             java.lang.System.setProperty(\"x\", \"1\");\n  }\n\n"
        );
        assert!(body(&artifact, Phase::Fields).contains("defaultProperties"));
        assert!(body(&artifact, Phase::TestSetup).contains("setSystemProperties();"));
        assert!(body(&artifact, Phase::ClassTeardown).contains("defaultProperties.clone()"));
    }

    #[test]
    fn sandbox_only_matches_golden_file() {
        let artifact = generate(&ScaffoldConfig::default(), &GenerationContext::default(), &[], true);
        assert_eq!(artifact.as_str(), include_str!("golden/sandbox_only.java"));

        let teardown = body(&artifact, Phase::ClassTeardown);
        assert!(!teardown.contains("Properties"));
        assert!(!artifact.as_str().contains("InstrumentingAgent"));
    }

    #[test]
    fn full_isolation_matches_golden_file() {
        let config = ScaffoldConfig {
            replace_calls: true,
            virtual_fs: true,
            reset_static_fields: true,
            reset_standard_streams: true,
            replace_system_in: true,
            sandbox_mode: SandboxMode::Io,
            class_prefix: "com.example".into(),
            ..Default::default()
        };
        let context = GenerationContext::default()
            .with_reset_order(["com.example.Foo", "java.util.Locale", "com.example.Bar"])
            .with_instrumented_classes(["com.example.Foo", "com.example.Bar", "com.example.Baz"])
            .with_property("user.dir", r#"C:\work\"proj""#)
            .with_property("x", "1")
            .with_stdin_used(true);
        let records = vec![record(&["user.dir", "x"], &[]), record(&["x", "missing"], &[])];
        let artifact = generate(&config, &context, &records, true);
        assert_eq!(artifact.as_str(), include_str!("golden/full_isolation.java"));
    }
}

#[cfg(test)]
mod invariants {
    use super::*;

    #[test]
    fn empty_test_name_fails() {
        let err = generate_scaffolding(
            "",
            &[],
            false,
            &ScaffoldConfig::default(),
            &GenerationContext::default(),
        )
        .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidArgument { .. }));
    }

    #[test]
    fn headless_init_precedes_sandbox_init() {
        let config = ScaffoldConfig {
            virtual_fs: true,
            ..Default::default()
        };
        let artifact = generate(&config, &GenerationContext::default(), &[], true);
        let setup = body(&artifact, Phase::ClassSetup);
        assert!(position(setup, "GuiSupport.initialize()") < position(setup, "initializeSecurityManagerForSUT"));
        assert!(position(setup, "InstrumentingAgent.initialize()") < position(setup, "sandboxMode"));
        assert!(position(setup, "sandboxMode") < position(setup, "resetRuntime()"));
    }

    #[test]
    fn toggles_precede_agent_initialization() {
        let config = ScaffoldConfig {
            replace_calls: true,
            replace_system_in: true,
            ..Default::default()
        };
        let artifact = generate(&config, &GenerationContext::default(), &[], false);
        let setup = body(&artifact, Phase::ClassSetup);
        assert!(position(setup, "mockJVMNonDeterminism = true") < position(setup, "InstrumentingAgent.initialize()"));
        assert!(position(setup, "mockSystemIn = true") < position(setup, "InstrumentingAgent.initialize()"));
        assert!(!setup.contains("useVFS"));
        assert!(!setup.contains("initializeClasses"));
    }

    #[test]
    fn system_in_toggle_needs_instrumentation() {
        let config = ScaffoldConfig {
            replace_system_in: true,
            ..Default::default()
        };
        let artifact = generate(&config, &GenerationContext::default(), &[], false);
        assert!(artifact.fragment(Phase::ClassSetup).is_none());
    }

    #[test]
    fn executor_field_implies_shutdown() {
        let artifact = generate(&ScaffoldConfig::default(), &GenerationContext::default(), &[], true);
        assert!(body(&artifact, Phase::Fields).contains("ExecutorService executor"));
        assert!(body(&artifact, Phase::ClassTeardown).contains("executor.shutdownNow();"));
    }

    #[test]
    fn instrumentation_calls_are_symmetric() {
        let config = ScaffoldConfig {
            virtual_fs: true,
            ..Default::default()
        };
        let artifact = generate(&config, &GenerationContext::default(), &[], false);
        assert!(body(&artifact, Phase::TestSetup).contains("InstrumentingAgent.activate();"));
        assert!(body(&artifact, Phase::TestTeardown).contains("InstrumentingAgent.deactivate();"));
    }

    #[test]
    fn property_routine_without_reads_is_a_comment() {
        let config = ScaffoldConfig {
            replace_calls: true,
            ..Default::default()
        };
        let artifact = generate(&config, &GenerationContext::default(), &[], false);
        let routine = body(&artifact, Phase::PropertyRoutine);
        assert!(routine.contains("/*No java.lang.System property to set*/"));
        assert!(!routine.contains("defaultProperties"));
        assert!(artifact.fragment(Phase::Fields).is_none());
        assert!(!body(&artifact, Phase::TestSetup).contains("setSystemProperties"));
    }

    #[test]
    fn property_traffic_without_call_replacement_still_snapshots() {
        let artifact = generate(
            &ScaffoldConfig::default(),
            &GenerationContext::default(),
            &[record(&["x"], &["y"])],
            false,
        );
        let phases: Vec<Phase> = artifact.fragments.iter().map(|f| f.phase).collect();
        assert_eq!(phases, vec![Phase::Fields, Phase::ClassTeardown, Phase::TestSetup]);
        assert!(body(&artifact, Phase::Fields).contains(
            "private static final java.util.Properties defaultProperties = \
             (java.util.Properties) java.lang.System.getProperties().clone();"
        ));
        assert!(body(&artifact, Phase::ClassTeardown).contains(
            "java.lang.System.setProperties((java.util.Properties) defaultProperties.clone());"
        ));

        // No routine to call without call replacement.
        let setup = body(&artifact, Phase::TestSetup);
        assert!(!setup.contains("setSystemProperties"));
        assert!(setup.contains("GuiSupport.setHeadless();"));
        assert!(artifact.fragment(Phase::PropertyRoutine).is_none());
    }

    #[test]
    fn every_requirement_is_provided() {
        let config = ScaffoldConfig {
            replace_calls: true,
            reset_static_fields: true,
            reset_standard_streams: true,
            ..Default::default()
        };
        let artifact = generate(&config, &GenerationContext::default(), &[record(&["a"], &[])], true);
        let provided: Vec<Dependency> = artifact
            .fragments
            .iter()
            .flat_map(|f| f.provides.iter().copied())
            .collect();
        for fragment in &artifact.fragments {
            for dep in &fragment.requires {
                assert!(provided.contains(dep), "{:?} required by {} is not provided", dep, fragment.phase);
            }
        }
        assert!(provided.contains(&Dependency::Field(Field::DefaultProperties)));
    }

    #[test]
    fn stdin_only_emits_headless_pair() {
        let context = GenerationContext::default().with_stdin_used(true);
        let artifact = generate(&ScaffoldConfig::default(), &context, &[], false);
        let phases: Vec<Phase> = artifact.fragments.iter().map(|f| f.phase).collect();
        assert_eq!(phases, vec![Phase::TestSetup, Phase::TestTeardown]);
        assert!(body(&artifact, Phase::TestSetup).contains("SystemInUtil.getInstance().initForTestCase();"));
        assert!(body(&artifact, Phase::TestTeardown).contains("restoreHeadlessMode();"));
    }

    #[test]
    fn empty_reset_plan_leaves_bare_routines() {
        let config = ScaffoldConfig {
            reset_static_fields: true,
            ..Default::default()
        };
        let artifact = generate(&config, &GenerationContext::default(), &[], false);
        assert_eq!(
            body(&artifact, Phase::ClassInitRoutine),
            "  private static void initializeClasses() {\n  }\n\n"
        );
        assert_eq!(
            body(&artifact, Phase::ClassResetRoutine),
            "  private static void resetClasses() {\n  }\n\n"
        );
    }

    #[test]
    fn junit5_uses_jupiter_annotations() {
        let config = ScaffoldConfig {
            virtual_fs: true,
            test_framework: TestFramework::Junit5,
            ..Default::default()
        };
        let artifact = generate(&config, &GenerationContext::default(), &[], false);
        assert_eq!(
            artifact.imports,
            vec![
                "org.junit.jupiter.api.BeforeAll",
                "org.junit.jupiter.api.BeforeEach",
                "org.junit.jupiter.api.AfterEach",
            ]
        );
        assert!(artifact.as_str().contains("  @BeforeAll\n  public static void initEvoSuiteFramework() {\n"));
        assert!(!artifact.as_str().contains("@AfterAll"));
    }

    #[test]
    fn imports_query_matches_artifact() {
        let config = ScaffoldConfig {
            reset_standard_streams: true,
            ..Default::default()
        };
        let context = GenerationContext::default();
        let scaffolder = Scaffolder::new(&config, &context);
        let imports = scaffolder.scaffolding_imports(TEST_NAME, &[], false).unwrap();
        assert_eq!(
            imports,
            vec![
                "org.junit.Before",
                "org.junit.After",
                "java.io.PrintStream",
                "javax.swing.DebugGraphics",
            ]
        );
    }
}
