//! Common infrastructure shared across the front end

mod error;
mod span;

pub use error::{AnalyzeError, AnalyzeResult, DiagnosticReporter};
pub use span::Span;
