//! Scaffold Error Handling - Unified Encapsulated API
//!
//! Generation itself has a single failure mode (an empty test name). Everything
//! else in here serves the loaders and the CLI: malformed configuration files,
//! unreadable manifests and drift detected in check mode.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// Named source text an error points into, e.g. a configuration file.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

/// The single error type for the crate.
#[derive(Debug)]
pub struct ScaffoldError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Where it happened, when the error is tied to an input file
    pub source_info: Option<SourceInfo>,
    /// How to help
    pub diagnostic_info: DiagnosticInfo,
}

/// All error types as a clean enum
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error("cannot access '{path}': {message}")]
    Io { path: String, message: String },

    #[error("malformed {format} input: {message}")]
    MalformedInput { format: String, message: String },

    #[error("'{path}' is out of date with the generated scaffolding")]
    Drift { path: String },
}

/// Source file and span for a located error
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
}

/// Diagnostic enhancement data
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

impl ErrorKind {
    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::Io { .. } => "io",
            Self::MalformedInput { .. } => "malformed_input",
            Self::Drift { .. } => "drift",
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid value",
            Self::Io { .. } => "here",
            Self::MalformedInput { .. } => "cannot parse here",
            Self::Drift { .. } => "differs from regenerated output",
        }
    }
}

impl ScaffoldError {
    /// Creates an error for `phase` with no source location.
    pub fn new(phase: &str, kind: ErrorKind) -> Self {
        let error_code = format!("scaffold::{}::{}", phase, kind.code_suffix());
        Self {
            kind,
            source_info: None,
            diagnostic_info: DiagnosticInfo {
                help: None,
                error_code,
            },
        }
    }

    pub fn invalid_argument(argument: &str, reason: impl Into<String>) -> Self {
        Self::new(
            "generate",
            ErrorKind::InvalidArgument {
                argument: argument.into(),
                reason: reason.into(),
            },
        )
    }

    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::new(
            "io",
            ErrorKind::Io {
                path: path.into(),
                message: err.to_string(),
            },
        )
    }

    /// A parse failure at byte `offset` of `source`.
    pub fn malformed(
        format: &str,
        message: impl Into<String>,
        source: &SourceContext,
        offset: Option<usize>,
    ) -> Self {
        let mut error = Self::new(
            "load",
            ErrorKind::MalformedInput {
                format: format.into(),
                message: message.into(),
            },
        );
        if let Some(offset) = offset {
            let offset = offset.min(source.content.len());
            error.source_info = Some(SourceInfo {
                source: source.to_named_source(),
                primary_span: SourceSpan::from(offset..offset),
            });
        }
        error
    }

    pub fn drift(path: impl Into<String>) -> Self {
        Self::new("check", ErrorKind::Drift { path: path.into() })
            .with_help("re-run `scaffold generate` to refresh the file")
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic_info.help = Some(help.into());
        self
    }
}

impl std::error::Error for ScaffoldError {}

impl fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Diagnostic for ScaffoldError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let info = self.source_info.as_ref()?;
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.kind.primary_label().to_string()),
            info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source_info
            .as_ref()
            .map(|info| &*info.source as &dyn miette::SourceCode)
    }
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints a ScaffoldError with full miette diagnostics
pub fn print_error(error: ScaffoldError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
