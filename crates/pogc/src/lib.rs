//! Pogscript front end - semantic analysis for a small statically-typed language
//!
//! This library takes the untyped parse tree produced by the grammar stage and
//! produces a fully resolved, type-checked program graph, or rejects the input
//! with a single precise diagnostic.
//!
//! ## Architecture
//!
//! The front end is organized into:
//! - **AST** (`ast/`): untyped, span-annotated parse-tree nodes (the input contract)
//! - **Types** (`types/`): the static type model and its equivalence rules
//! - **Graph** (`graph/`): the resolved, typed program graph (the output artifact)
//! - **Sema** (`sema/`): the scope chain and the analyzer traversal
//! - **Common** (`common/`): shared infrastructure (errors, spans)

pub mod ast;
pub mod common;
pub mod graph;
pub mod sema;
pub mod types;

// Re-exports for convenience
pub use common::{AnalyzeError, AnalyzeResult, DiagnosticReporter, Span};
pub use sema::{analyze, Analyzer};
pub use types::Type;
