use std::fmt;

/// Structured diagnostic for malformed expression text.
///
/// `position` is a byte offset into the (newline-normalized) expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Byte offset where parsing stopped.
    pub position: usize,
    /// Human-readable description.
    pub message: String,
    /// Tokens that would have been accepted at `position`, if known.
    pub expected: Vec<String>,
}

impl SyntaxError {
    pub(crate) fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
            expected: Vec::new(),
        }
    }

    pub(crate) fn expecting(mut self, token: impl Into<String>) -> Self {
        self.expected.push(token.into());
        self
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.message, self.position)?;
        if !self.expected.is_empty() {
            write!(f, " (expected {})", self.expected.join(" or "))?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {}
