//! Names from the companion runtime library referenced by generated code.

pub const GUI_SUPPORT: &str = "org.evosuite.runtime.GuiSupport";
pub const RUNTIME_SETTINGS: &str = "org.evosuite.runtime.RuntimeSettings";
pub const RUNTIME: &str = "org.evosuite.runtime.Runtime";
pub const INSTRUMENTING_AGENT: &str = "org.evosuite.runtime.agent.InstrumentingAgent";
pub const SANDBOX: &str = "org.evosuite.runtime.sandbox.Sandbox";
pub const SANDBOX_MODE: &str = "org.evosuite.runtime.sandbox.Sandbox.SandboxMode";
pub const CLASS_STATE_SUPPORT: &str = "org.evosuite.runtime.ClassStateSupport";
pub const SYSTEM_IN_UTIL: &str = "org.evosuite.runtime.util.SystemInUtil";

/// `java.lang.System.setProperties(<snapshot clone>)`.
pub fn restore_properties_statement() -> String {
    format!(
        "java.lang.System.setProperties((java.util.Properties) {}.clone());",
        super::Field::DefaultProperties.name()
    )
}

pub fn reset_runtime_statement() -> String {
    format!("{}.getInstance().resetRuntime();", RUNTIME)
}
