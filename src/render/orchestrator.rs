use crate::foundation::core::Vec2;
use crate::foundation::error::{RailyardError, RailyardResult};
use crate::render::context::RenderContext;
use crate::render::node::{RenderNode, RenderedElement};
use crate::render::progress::ProgressSink;
use crate::render::state::RenderState;
use crate::surface::Surface;
use crate::surface::svg::num;
use crate::syntax::ast::Root;

/// Distance between the canvas edge and the diagram on every side.
pub const CANVAS_MARGIN: f64 = 10.0;

/// Render `root` onto `surface` and size the canvas around it.
///
/// Fails with [`RailyardError::Cancelled`] when the state's token is cancelled, either before
/// the first surface mutation or at the next node boundary. Any node failure aborts the whole
/// traversal.
#[tracing::instrument(skip_all, fields(max_counter = tracing::field::Empty))]
pub async fn render_tree(
    root: &Root,
    state: &mut RenderState,
    surface: &mut dyn Surface,
    progress: &mut dyn ProgressSink,
) -> RailyardResult<RenderedElement> {
    if state.cancel_requested() {
        tracing::debug!("cancelled before traversal");
        return Err(RailyardError::Cancelled);
    }

    let max_counter = root.total_weight();
    tracing::Span::current().record("max_counter", max_counter);
    state.begin(max_counter);

    let canvas = surface.root();
    let element = {
        let mut ctx = RenderContext::new(state, surface, progress);
        ctx.render_child(root, canvas).await?
    };

    let b = element.bbox(surface)?;
    surface.translate(
        element.id,
        Vec2::new(CANVAS_MARGIN - b.x0, CANVAS_MARGIN - b.y0),
    )?;
    let width = b.width() + 2.0 * CANVAS_MARGIN;
    let height = b.height() + 2.0 * CANVAS_MARGIN;
    surface.set_attr(canvas, "width", num(width))?;
    surface.set_attr(canvas, "height", num(height))?;
    tracing::debug!(width, height, "canvas sized");
    Ok(element)
}

#[cfg(test)]
#[path = "../../tests/unit/render/orchestrator.rs"]
mod tests;
