use futures::FutureExt as _;
use futures::future::LocalBoxFuture;

use crate::foundation::error::{RailyardError, RailyardResult};
use crate::render::node::{RenderNode, RenderedElement};
use crate::render::progress::ProgressSink;
use crate::render::state::RenderState;
use crate::surface::{ElementId, Surface};

/// Everything a node may touch while rendering.
pub struct RenderContext<'a> {
    state: &'a mut RenderState,
    surface: &'a mut dyn Surface,
    progress: &'a mut dyn ProgressSink,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(
        state: &'a mut RenderState,
        surface: &'a mut dyn Surface,
        progress: &'a mut dyn ProgressSink,
    ) -> Self {
        Self {
            state,
            surface,
            progress,
        }
    }

    /// Drawing surface.
    pub fn surface(&mut self) -> &mut dyn Surface {
        &mut *self.surface
    }

    /// Read-only view of the session state.
    pub fn state(&self) -> &RenderState {
        &*self.state
    }

    /// Take the next capturing-group number.
    pub fn next_group(&mut self) -> u32 {
        self.state.next_group()
    }

    /// Record a non-fatal warning.
    pub fn warn(&mut self, warning: impl Into<String>) {
        self.state.warn(warning.into());
    }

    /// Fail with [`RailyardError::Cancelled`] if cancellation was requested.
    pub fn checkpoint(&self) -> RailyardResult<()> {
        if self.state.cancel_requested() {
            tracing::debug!("cancellation observed at node boundary");
            return Err(RailyardError::Cancelled);
        }
        Ok(())
    }

    /// Render `node` into a fresh group inside `parent`.
    ///
    /// Checks for cancellation before touching the surface, then lets the node draw, then
    /// yields once and accounts the node's weight.
    pub fn render_child<'b>(
        &'b mut self,
        node: &'b dyn RenderNode,
        parent: ElementId,
    ) -> LocalBoxFuture<'b, RailyardResult<RenderedElement>> {
        async move {
            self.checkpoint()?;
            let id = self.surface.group(parent)?;
            self.surface.add_class(id, node.kind())?;
            let anchor = node.draw(self, id).await?;
            tokio::task::yield_now().await;
            self.complete(node.kind(), node.weight())?;
            Ok(RenderedElement { id, anchor })
        }
        .boxed_local()
    }

    fn complete(&mut self, kind: &'static str, weight: u64) -> RailyardResult<()> {
        if weight == 0 {
            return Ok(());
        }
        let fraction = self.state.advance(weight)?;
        tracing::trace!(
            kind,
            render_counter = self.state.render_counter(),
            max_counter = self.state.max_counter(),
            fraction,
            "node rendered"
        );
        self.progress.progress(fraction);
        Ok(())
    }
}
