//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;

use super::Span;

/// Semantic analysis error with source location
///
/// One variant per violated contract. The first error encountered in
/// traversal order aborts the whole analysis; there is no multi-error
/// reporting and no recovery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("Identifier {name} not declared")]
    UndeclaredIdentifier { name: String, span: Span },

    #[error("Identifier {name} already declared")]
    AlreadyDeclared { name: String, span: Span },

    /// Covers assignment, operator, return-type, parameter, array-index,
    /// and conditional-arm type errors; distinguished by message text only.
    #[error("{message}")]
    TypeMismatch { message: String, span: Span },

    #[error("Not all elements have the same type")]
    ArrayElementTypeMismatch { span: Span },

    #[error("Break can only appear in a loop")]
    IllegalBreak { span: Span },

    #[error("Return can only appear in a function")]
    IllegalReturn { span: Span },

    #[error("{message}")]
    ReturnValueMismatch { message: String, span: Span },

    #[error("Call of non-function")]
    CallOfNonFunction { span: Span },

    #[error("{required} argument(s) required but {passed} passed")]
    ArityMismatch {
        required: usize,
        passed: usize,
        span: Span,
    },

    #[error("Type expected")]
    TypeExpected { span: Span },
}

impl AnalyzeError {
    pub fn undeclared(name: impl Into<String>, span: Span) -> Self {
        Self::UndeclaredIdentifier {
            name: name.into(),
            span,
        }
    }

    pub fn already_declared(name: impl Into<String>, span: Span) -> Self {
        Self::AlreadyDeclared {
            name: name.into(),
            span,
        }
    }

    pub fn type_mismatch(message: impl Into<String>, span: Span) -> Self {
        Self::TypeMismatch {
            message: message.into(),
            span,
        }
    }

    pub fn return_value_mismatch(message: impl Into<String>, span: Span) -> Self {
        Self::ReturnValueMismatch {
            message: message.into(),
            span,
        }
    }

    /// Source position of the offending construct
    pub fn span(&self) -> Span {
        match self {
            Self::UndeclaredIdentifier { span, .. }
            | Self::AlreadyDeclared { span, .. }
            | Self::TypeMismatch { span, .. }
            | Self::ArrayElementTypeMismatch { span }
            | Self::IllegalBreak { span }
            | Self::IllegalReturn { span }
            | Self::ReturnValueMismatch { span, .. }
            | Self::CallOfNonFunction { span }
            | Self::ArityMismatch { span, .. }
            | Self::TypeExpected { span } => *span,
        }
    }
}

pub type AnalyzeResult<T> = Result<T, AnalyzeError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    pub fn report_error(&self, file_id: usize, error: &AnalyzeError) {
        let header = match error {
            AnalyzeError::TypeMismatch { .. }
            | AnalyzeError::ArrayElementTypeMismatch { .. }
            | AnalyzeError::ReturnValueMismatch { .. } => "Type error",
            _ => "Semantic error",
        };

        let span = error.span();
        let diagnostic = Diagnostic::error().with_message(header).with_labels(vec![
            Label::primary(file_id, span.start..span.end).with_message(error.to_string()),
        ]);

        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_text() {
        let err = AnalyzeError::undeclared("x", Span::new(0, 1));
        assert_eq!(err.to_string(), "Identifier x not declared");

        let err = AnalyzeError::ArityMismatch {
            required: 1,
            passed: 2,
            span: Span::default(),
        };
        assert_eq!(err.to_string(), "1 argument(s) required but 2 passed");
    }

    #[test]
    fn test_span_accessor() {
        let span = Span::new(4, 9);
        let err = AnalyzeError::type_mismatch("Cannot assign a boolean to a int", span);
        assert_eq!(err.span(), span);
    }
}
