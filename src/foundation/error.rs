use crate::syntax::error::SyntaxError;

/// Convenience result type used across railyard.
pub type RailyardResult<T> = Result<T, RailyardError>;

/// Top-level error taxonomy used by parse and render APIs.
#[derive(thiserror::Error, Debug)]
pub enum RailyardError {
    /// Malformed expression text.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// A node failed while drawing itself.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid user-provided options, or an operation called in the wrong session phase.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Traversal stopped at a cancellation checkpoint.
    ///
    /// Only travels inside the render traversal; sessions report it as
    /// [`RenderOutcome::Cancelled`](crate::RenderOutcome::Cancelled), never as an error.
    #[error("render cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RailyardError {
    /// Build a [`RailyardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`RailyardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RailyardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for the internal cancellation marker.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
