//! stylegen Error Handling - Unified Encapsulated API
//!
//! Every failure in the pipeline is a [`StyleGenError`]. Errors are created
//! through an [`ErrorReporting`] context that knows the source file and the
//! phase, so each one carries a span and a diagnostic code that `miette` can
//! render at the invocation site.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::ast::{MacroName, Span};

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// Represents source context for error reporting with explicit hierarchy
/// between real sources (preferred) and fallbacks (tolerated when necessary)
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    /// Create a source context from real file content
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Create a fallback when real source is unavailable, e.g. when the
    /// engine is driven with hand-built declarations.
    pub fn fallback(context: &str) -> Self {
        Self {
            name: "fallback".to_string(),
            content: format!("// {}", context),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

impl Default for SourceContext {
    fn default() -> Self {
        Self::fallback("no source")
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// The single error type - what went wrong, where, and how to help.
#[derive(Debug)]
pub struct StyleGenError {
    pub kind: ErrorKind,
    pub source_info: SourceInfo,
    pub diagnostic_info: DiagnosticInfo,
}

/// All error types as a clean enum - no duplicate fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// The source file does not match the declaration grammar.
    #[error("Parse error: {construct}")]
    Parse { construct: String },

    /// The macro is attached to something that is not a classifiable
    /// type declaration.
    #[error("Malformed declaration for {macro_name}: {reason}")]
    MalformedDeclaration { macro_name: MacroName, reason: String },

    /// An argument is not a plain string or string-list literal.
    #[error("Malformed argument for {macro_name}: {reason}")]
    MalformedArgument { macro_name: MacroName, reason: String },

    /// Wrong declaration kind, wrong arity or shape, or an invalid name.
    #[error("{message}")]
    Validation { macro_name: MacroName, message: String },

    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ErrorKind {
    /// Get the error category for test assertions
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse { .. } => ErrorCategory::Parse,
            Self::MalformedDeclaration { .. } | Self::Validation { .. } => {
                ErrorCategory::Validation
            }
            Self::MalformedArgument { .. } => ErrorCategory::Argument,
            Self::Io { .. } | Self::Config { .. } => ErrorCategory::Tool,
        }
    }

    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "parse",
            Self::MalformedDeclaration { .. } => "malformed_declaration",
            Self::MalformedArgument { .. } => "malformed_argument",
            Self::Validation { .. } => "validation",
            Self::Io { .. } => "io",
            Self::Config { .. } => "config",
        }
    }

    /// The macro the error is attributed to, if any.
    pub fn macro_name(&self) -> Option<MacroName> {
        match self {
            Self::MalformedDeclaration { macro_name, .. }
            | Self::MalformedArgument { macro_name, .. }
            | Self::Validation { macro_name, .. } => Some(*macro_name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Validation,
    Argument,
    Tool,
}

/// Context-specific source information
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
    pub phase: String,
}

/// Diagnostic enhancement data
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

impl StyleGenError {
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// The human-readable message without the category prefix, as a host
    /// compiler would show it at the attribute.
    pub fn message(&self) -> String {
        match &self.kind {
            ErrorKind::Validation { message, .. } => message.clone(),
            ErrorKind::MalformedDeclaration { reason, .. }
            | ErrorKind::MalformedArgument { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic_info.help = Some(help.into());
        self
    }

    fn primary_label(&self) -> String {
        match &self.kind {
            ErrorKind::Parse { .. } => "malformed syntax".into(),
            ErrorKind::MalformedDeclaration { .. } => "not a type declaration".into(),
            ErrorKind::MalformedArgument { .. } => "not a literal".into(),
            ErrorKind::Validation { .. } => "invalid macro use".into(),
            ErrorKind::Io { .. } => "i/o failure".into(),
            ErrorKind::Config { .. } => "invalid configuration".into(),
        }
    }
}

impl std::error::Error for StyleGenError {}

impl fmt::Display for StyleGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl Diagnostic for StyleGenError {
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
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

// ============================================================================
// ERROR CREATION
// ============================================================================

/// Context-aware error creation - each context knows how to create appropriate errors
pub trait ErrorReporting {
    /// Create an error with context-appropriate enhancements
    fn report(&self, kind: ErrorKind, span: Span) -> StyleGenError;

    fn parse_error(&self, construct: &str, span: Span) -> StyleGenError {
        self.report(
            ErrorKind::Parse {
                construct: construct.into(),
            },
            span,
        )
    }

    fn malformed_declaration(&self, macro_name: MacroName, reason: &str, span: Span) -> StyleGenError {
        self.report(
            ErrorKind::MalformedDeclaration {
                macro_name,
                reason: reason.into(),
            },
            span,
        )
    }

    fn malformed_argument(&self, macro_name: MacroName, reason: &str, span: Span) -> StyleGenError {
        self.report(
            ErrorKind::MalformedArgument {
                macro_name,
                reason: reason.into(),
            },
            span,
        )
    }

    fn validation_error(&self, macro_name: MacroName, message: &str, span: Span) -> StyleGenError {
        self.report(
            ErrorKind::Validation {
                macro_name,
                message: message.into(),
            },
            span,
        )
    }
}

/// General-purpose error creation context used throughout the codebase
/// for creating properly contextualized StyleGenError instances
#[derive(Debug, Clone)]
pub struct ValidationContext {
    pub source: SourceContext,
    pub phase: String,
}

impl ValidationContext {
    pub fn new(source: SourceContext, phase: impl Into<String>) -> Self {
        Self {
            source,
            phase: phase.into(),
        }
    }
}

impl ErrorReporting for ValidationContext {
    fn report(&self, kind: ErrorKind, span: Span) -> StyleGenError {
        build_error(&self.source, &self.phase, kind, span)
    }
}

pub(crate) fn build_error(
    source: &SourceContext,
    phase: &str,
    kind: ErrorKind,
    span: Span,
) -> StyleGenError {
    let error_code = format!("stylegen::{}::{}", phase, kind.code_suffix());

    StyleGenError {
        kind,
        source_info: SourceInfo {
            source: source.to_named_source(),
            primary_span: to_source_span(span),
            phase: phase.to_string(),
        },
        diagnostic_info: DiagnosticInfo {
            help: None,
            error_code,
        },
    }
}

/// Error for failures not tied to a source location, such as reading an
/// input file or loading the configuration.
pub fn tool_error(kind: ErrorKind) -> StyleGenError {
    let phase = match kind {
        ErrorKind::Config { .. } => "config",
        _ => "io",
    };
    build_error(&SourceContext::fallback(phase), phase, kind, Span::default())
}

pub fn io_error(path: impl fmt::Display, error: std::io::Error) -> StyleGenError {
    tool_error(ErrorKind::Io {
        path: path.to_string(),
        message: error.to_string(),
    })
}

/// Converts an AST Span to a miette SourceSpan.
pub fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::from(span.start..span.end)
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints a StyleGenError with full miette diagnostics to stderr.
pub fn print_error(error: StyleGenError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
