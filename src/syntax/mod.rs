//! Regular-expression grammar.
//!
//! Turns expression text into the typed [`ast::Root`] tree that the renderer walks.

/// Syntax tree types.
pub mod ast;
/// Structured syntax diagnostics.
pub mod error;
/// Recursive-descent parser.
pub mod parser;
