use futures::future::LocalBoxFuture;

use crate::foundation::core::{Anchor, Rect};
use crate::foundation::error::RailyardResult;
use crate::render::context::RenderContext;
use crate::surface::{ElementId, Surface};

/// Render capability shared by every syntax-tree node.
///
/// A node draws itself into the group it is given and returns its connection anchor in that
/// group's coordinate space. Children are rendered through
/// [`RenderContext::render_child`], which owns cancellation checkpoints and progress accounting.
pub trait RenderNode {
    /// Short node kind name used in logs and element classes.
    fn kind(&self) -> &'static str;

    /// Countable drawing steps this node performs itself.
    fn weight(&self) -> u64;

    /// Direct children in document order.
    fn children(&self) -> Vec<&dyn RenderNode>;

    /// Weight of this node and all of its descendants.
    fn total_weight(&self) -> u64 {
        self.weight()
            + self
                .children()
                .into_iter()
                .map(|c| c.total_weight())
                .sum::<u64>()
    }

    /// Draw this node into `group`.
    fn draw<'a>(
        &'a self,
        ctx: &'a mut RenderContext<'_>,
        group: ElementId,
    ) -> LocalBoxFuture<'a, RailyardResult<Anchor>>;
}

/// A drawn subtree: its group plus the anchor the node reported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderedElement {
    /// Group holding the subtree.
    pub id: ElementId,
    /// Anchor in the group's own (untransformed) space.
    pub anchor: Anchor,
}

impl RenderedElement {
    /// Bounds in the parent's space.
    pub fn bbox(&self, surface: &dyn Surface) -> RailyardResult<Rect> {
        surface.bbox(self.id)
    }

    /// Anchor mapped into the parent's space.
    pub fn placed_anchor(&self, surface: &dyn Surface) -> RailyardResult<Anchor> {
        Ok(self.anchor.transformed(surface.transform(self.id)?))
    }
}
