use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::foundation::error::{RailyardError, RailyardResult};

/// Shareable, one-way cancellation flag.
///
/// Clones observe the same flag. Once cancelled, a token never resets.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Per-session traversal state.
///
/// Threaded by `&mut` through every node render call. Counters only move forward and warnings are
/// only appended.
#[derive(Clone, Debug)]
pub struct RenderState {
    group_counter: u32,
    render_counter: u64,
    max_counter: u64,
    cancel: CancellationToken,
    warnings: Vec<String>,
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new(CancellationToken::new())
    }
}

impl RenderState {
    /// Initial state observing `cancel`.
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            group_counter: 1,
            render_counter: 0,
            max_counter: 0,
            cancel,
            warnings: Vec::new(),
        }
    }

    /// Number the next capturing group will get.
    pub fn group_counter(&self) -> u32 {
        self.group_counter
    }

    /// Accumulated weight of completed nodes.
    pub fn render_counter(&self) -> u64 {
        self.render_counter
    }

    /// Total weight of the tree being rendered.
    pub fn max_counter(&self) -> u64 {
        self.max_counter
    }

    /// Whether cancellation has been requested for this session.
    pub fn cancel_requested(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token observed by this state.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Warnings in the order nodes reported them.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// `render_counter / max_counter`, or 0 before a traversal starts.
    pub fn progress(&self) -> f64 {
        if self.max_counter == 0 {
            0.0
        } else {
            self.render_counter as f64 / self.max_counter as f64
        }
    }

    pub(crate) fn begin(&mut self, max_counter: u64) {
        self.max_counter = max_counter;
        self.render_counter = 0;
    }

    pub(crate) fn next_group(&mut self) -> u32 {
        let n = self.group_counter;
        self.group_counter += 1;
        n
    }

    pub(crate) fn advance(&mut self, weight: u64) -> RailyardResult<f64> {
        let next = self.render_counter + weight;
        if next > self.max_counter {
            return Err(RailyardError::render(format!(
                "render counter {next} exceeds tree weight {}",
                self.max_counter
            )));
        }
        self.render_counter = next;
        Ok(self.progress())
    }

    pub(crate) fn warn(&mut self, warning: String) {
        tracing::warn!(%warning, "construct flagged");
        self.warnings.push(warning);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/state.rs"]
mod tests;
