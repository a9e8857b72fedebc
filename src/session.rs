//! Parse-then-render lifecycle for one expression.

use crate::foundation::error::{RailyardError, RailyardResult};
use crate::render::node::RenderedElement;
use crate::render::orchestrator::render_tree;
use crate::render::progress::ProgressSink;
use crate::render::state::{CancellationToken, RenderState};
use crate::surface::Surface;
use crate::surface::metrics::TextMetrics;
use crate::surface::svg::{SvgDocument, SvgSurface};
use crate::syntax::ast::Root;
use crate::syntax::parser::{normalize_newlines, parse_expression};

/// Lifecycle phase of a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SessionState {
    /// Text stored, nothing parsed yet.
    Created,
    /// Parse scheduled or running.
    Parsing,
    /// Tree available, ready to render.
    Parsed,
    /// Traversal in progress.
    Rendering,
    /// Diagram complete.
    Rendered,
    /// A node failed to draw.
    RenderFailed,
    /// Cancellation observed at a checkpoint.
    Cancelled,
    /// The text is not a valid expression.
    ParseFailed,
}

impl SessionState {
    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Rendered | Self::RenderFailed | Self::Cancelled | Self::ParseFailed
        )
    }
}

/// How a render ended when it did not fail.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutcome<T = SvgDocument> {
    /// The traversal completed.
    Rendered(T),
    /// Cancellation was observed; nothing is attached.
    Cancelled,
}

impl<T> RenderOutcome<T> {
    /// The rendered value, if any.
    pub fn rendered(&self) -> Option<&T> {
        match self {
            Self::Rendered(v) => Some(v),
            Self::Cancelled => None,
        }
    }

    /// Whether the render was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Options controlling how a [`Session`] draws.
#[derive(Clone, Debug, Default)]
pub struct SessionOpts {
    /// Metrics used to measure text on the built-in surface.
    pub metrics: TextMetrics,
}

/// One expression on its way to a diagram.
///
/// A session owns the source text, the parsed tree and the [`RenderState`] of exactly one
/// render. It is not reused: create a new one per expression.
#[derive(Debug)]
pub struct Session {
    source: String,
    tree: Option<Root>,
    state: RenderState,
    phase: SessionState,
    opts: SessionOpts,
}

impl Session {
    /// New session in [`SessionState::Created`].
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_opts(text, SessionOpts::default())
    }

    /// New session with explicit options.
    pub fn with_opts(text: impl Into<String>, opts: SessionOpts) -> Self {
        Self {
            source: text.into(),
            tree: None,
            state: RenderState::default(),
            phase: SessionState::Created,
            opts,
        }
    }

    /// Text as given by the caller.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Current lifecycle phase.
    pub fn state(&self) -> SessionState {
        self.phase
    }

    /// Parsed tree, once available.
    pub fn tree(&self) -> Option<&Root> {
        self.tree.as_ref()
    }

    /// Counters, warnings and cancellation flag.
    pub fn render_state(&self) -> &RenderState {
        &self.state
    }

    /// Warnings collected so far.
    pub fn warnings(&self) -> &[String] {
        self.state.warnings()
    }

    /// Request cancellation. Idempotent; observed at the next checkpoint.
    pub fn cancel(&self) {
        self.state.cancel_token().cancel();
    }

    /// Shareable handle for cancelling while the session is borrowed elsewhere.
    pub fn cancel_token(&self) -> CancellationToken {
        self.state.cancel_token().clone()
    }

    /// Parse the source text.
    ///
    /// The grammar runs after one scheduling tick so callers can show a loading state first.
    /// A cancellation requested before that tick ends the session in
    /// [`SessionState::Cancelled`] without parsing.
    #[tracing::instrument(skip_all, fields(len = self.source.len()))]
    pub async fn parse(&mut self) -> RailyardResult<()> {
        if self.phase != SessionState::Created {
            return Err(RailyardError::validation(format!(
                "cannot parse a session in state {:?}",
                self.phase
            )));
        }
        self.set_phase(SessionState::Parsing);
        let text = normalize_newlines(&self.source);

        tokio::task::yield_now().await;
        if self.state.cancel_requested() {
            self.set_phase(SessionState::Cancelled);
            return Ok(());
        }

        match parse_expression(&text) {
            Ok(root) => {
                self.tree = Some(root);
                self.set_phase(SessionState::Parsed);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(%err, "parse failed");
                self.set_phase(SessionState::ParseFailed);
                Err(err.into())
            }
        }
    }

    /// Render onto a fresh [`SvgSurface`] and return the finished document.
    pub async fn render(
        &mut self,
        progress: &mut dyn ProgressSink,
    ) -> RailyardResult<RenderOutcome> {
        let mut surface = SvgSurface::new(self.opts.metrics);
        Ok(match self.render_onto(&mut surface, progress).await? {
            RenderOutcome::Rendered(_) => RenderOutcome::Rendered(surface.into_document()),
            RenderOutcome::Cancelled => RenderOutcome::Cancelled,
        })
    }

    /// Render onto a caller-provided surface.
    ///
    /// A cancelled session yields [`RenderOutcome::Cancelled`], never an error. Any other
    /// phase than [`SessionState::Parsed`] is rejected without side effects.
    #[tracing::instrument(skip_all)]
    pub async fn render_onto(
        &mut self,
        surface: &mut dyn Surface,
        progress: &mut dyn ProgressSink,
    ) -> RailyardResult<RenderOutcome<RenderedElement>> {
        match self.phase {
            SessionState::Cancelled => return Ok(RenderOutcome::Cancelled),
            SessionState::Parsed => {}
            other => {
                return Err(RailyardError::validation(format!(
                    "cannot render a session in state {other:?}"
                )));
            }
        }
        let Some(tree) = self.tree.as_ref() else {
            return Err(RailyardError::validation("parsed session has no tree"));
        };

        self.phase = SessionState::Rendering;
        tracing::debug!(phase = ?self.phase, "session phase");
        let result = render_tree(tree, &mut self.state, surface, progress).await;
        match result {
            Ok(element) => {
                self.set_phase(SessionState::Rendered);
                Ok(RenderOutcome::Rendered(element))
            }
            Err(RailyardError::Cancelled) => {
                self.set_phase(SessionState::Cancelled);
                Ok(RenderOutcome::Cancelled)
            }
            Err(err) => {
                self.set_phase(SessionState::RenderFailed);
                Err(err)
            }
        }
    }

    /// [`Session::render`] driven to completion on the current thread.
    pub fn render_blocking(
        &mut self,
        progress: &mut dyn ProgressSink,
    ) -> RailyardResult<RenderOutcome> {
        pollster::block_on(self.render(progress))
    }

    fn set_phase(&mut self, phase: SessionState) {
        tracing::debug!(from = ?self.phase, to = ?phase, "session phase");
        self.phase = phase;
    }
}

/// Create a session for `text` and parse it.
pub async fn parse(text: impl Into<String>) -> RailyardResult<Session> {
    let mut session = Session::new(text);
    session.parse().await?;
    Ok(session)
}

/// [`parse`] driven to completion on the current thread.
pub fn parse_blocking(text: impl Into<String>) -> RailyardResult<Session> {
    pollster::block_on(parse(text))
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
