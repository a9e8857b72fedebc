use futures::channel::mpsc::UnboundedSender;

/// Receiver of progress fractions during a render.
///
/// Ordering contract: fractions arrive in node completion order, lie in `[0, 1]`, and never
/// decrease within one render.
pub trait ProgressSink {
    /// Called after a node with non-zero weight completes.
    fn progress(&mut self, fraction: f64);
}

impl<F: FnMut(f64)> ProgressSink for F {
    fn progress(&mut self, fraction: f64) {
        self(fraction);
    }
}

/// Forwards fractions into a channel; a closed receiver is ignored.
impl ProgressSink for UnboundedSender<f64> {
    fn progress(&mut self, fraction: f64) {
        let _ = self.unbounded_send(fraction);
    }
}

/// Sink that drops every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn progress(&mut self, _fraction: f64) {}
}

/// In-memory sink for tests and debugging.
#[derive(Clone, Debug, Default)]
pub struct ProgressLog {
    values: Vec<f64>,
}

impl ProgressLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded fractions in arrival order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Last recorded fraction.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

impl ProgressSink for ProgressLog {
    fn progress(&mut self, fraction: f64) {
        self.values.push(fraction);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/progress.rs"]
mod tests;
