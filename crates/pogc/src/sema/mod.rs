//! Semantic analysis: the context chain and the analyzer traversal

mod analyzer;
mod scope;

pub use analyzer::{analyze, Analyzer};
pub use scope::Context;
