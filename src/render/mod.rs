//! Rendering orchestration.
//!
//! [`orchestrator::render_tree`] walks a syntax tree pre-order through
//! [`context::RenderContext::render_child`], which is the single place where cancellation is
//! checked, progress is counted and control is yielded back to the executor.

/// Per-traversal handle passed to every node.
pub mod context;
/// Diagram spacing and framing helpers.
pub mod layout;
/// Render capability trait and drawn-element handle.
pub mod node;
/// Node implementations for the syntax tree.
pub mod nodes;
/// Tree entry point and canvas sizing.
pub mod orchestrator;
/// Progress sinks.
pub mod progress;
/// Session render state and cancellation token.
pub mod state;
