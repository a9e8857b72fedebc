use crate::foundation::core::{Anchor, BezPath, Point, Rect, Vec2};
use crate::foundation::error::RailyardResult;
use crate::render::node::RenderedElement;
use crate::surface::{ElementId, Surface, Text};

/// Padding between a label's text and its rectangle.
pub const LABEL_PADDING: f64 = 5.0;
/// Corner radius of label rectangles.
pub const LABEL_RADIUS: f64 = 3.0;
/// Horizontal gap between sequence items.
pub const SEQUENCE_GAP: f64 = 10.0;
/// Vertical gap between stacked items.
pub const STACK_GAP: f64 = 5.0;
/// Connector space around and between alternation branches.
pub const BRANCH_SPACE: f64 = 20.0;
/// Indent and clearance around repeated content.
pub const REPEAT_SPACE: f64 = 10.0;

/// Draw `text` inside a rounded rectangle filling `group`.
///
/// The rectangle goes into a background group created before the text so it paints behind it.
pub fn render_label(
    surface: &mut dyn Surface,
    group: ElementId,
    text: Text,
) -> RailyardResult<Anchor> {
    let bg = surface.group(group)?;
    let label = surface.text(group, Point::new(LABEL_PADDING, LABEL_PADDING), text)?;
    let tb = surface.bbox(label)?;
    let rect = Rect::new(
        0.0,
        0.0,
        tb.width() + 2.0 * LABEL_PADDING,
        tb.height() + 2.0 * LABEL_PADDING,
    );
    surface.rect(bg, rect, LABEL_RADIUS)?;
    Ok(Anchor::centered(rect))
}

/// Lay `items` out left to right with `gap` between them, aligning their anchors on one line.
///
/// Returns each item's anchor in the shared parent space.
pub fn space_horizontally(
    surface: &mut dyn Surface,
    items: &[RenderedElement],
    gap: f64,
) -> RailyardResult<Vec<Anchor>> {
    let mut measured = Vec::with_capacity(items.len());
    for item in items {
        measured.push((item.bbox(surface)?, item.placed_anchor(surface)?));
    }
    let above = measured
        .iter()
        .map(|(b, a)| a.y - b.y0)
        .fold(0.0, f64::max);

    let mut x = 0.0;
    let mut anchors = Vec::with_capacity(items.len());
    for (item, (b, a)) in items.iter().zip(&measured) {
        let offset = Vec2::new(x - b.x0, above - a.y);
        surface.translate(item.id, offset)?;
        anchors.push(Anchor {
            x1: a.x1 + offset.x,
            x2: a.x2 + offset.x,
            y: above,
        });
        x += b.width() + gap;
    }
    Ok(anchors)
}

/// Stack `items` top to bottom with `gap` between them, centred on the widest item.
pub fn space_vertically(
    surface: &mut dyn Surface,
    items: &[RenderedElement],
    gap: f64,
) -> RailyardResult<()> {
    let mut boxes = Vec::with_capacity(items.len());
    for item in items {
        boxes.push(item.bbox(surface)?);
    }
    let width = boxes.iter().map(|b| b.width()).fold(0.0, f64::max);

    let mut y = 0.0;
    for (item, b) in items.iter().zip(&boxes) {
        let x = (width - b.width()) / 2.0;
        surface.translate(item.id, Vec2::new(x - b.x0, y - b.y0))?;
        y += b.height() + gap;
    }
    Ok(())
}

/// Frame `content` in a box with a caption above it.
///
/// `bg` must be a group created before `content` inside the same parent, so the box paints
/// behind the content. Class names are `{class}-label` and `{class}-box`.
pub fn labeled_box(
    surface: &mut dyn Surface,
    bg: ElementId,
    content: &RenderedElement,
    label: String,
    class: &str,
    padding: f64,
) -> RailyardResult<Anchor> {
    let caption = surface.text(bg, Point::ORIGIN, Text::caption(label))?;
    surface.add_class(caption, &format!("{class}-label"))?;
    let lb = surface.bbox(caption)?;

    let cb = content.bbox(surface)?;
    let width = (cb.width() + 2.0 * padding).max(lb.width());
    let frame = Rect::new(0.0, lb.height(), width, lb.height() + cb.height() + 2.0 * padding);
    let rect = surface.rect(bg, frame, LABEL_RADIUS)?;
    surface.add_class(rect, &format!("{class}-box"))?;

    surface.translate(
        content.id,
        Vec2::new(
            (width - cb.width()) / 2.0 - cb.x0,
            frame.y0 + padding - cb.y0,
        ),
    )?;
    let a = content.placed_anchor(surface)?;
    Ok(Anchor {
        x1: 0.0,
        x2: width,
        y: a.y,
    })
}

/// Append a straight horizontal connector.
pub fn hline(p: &mut BezPath, from: Point, to_x: f64) {
    p.move_to(from);
    p.line_to((to_x, from.y));
}

/// S-shaped connector between two heights, `from.x < to.x`.
pub fn bend(p: &mut BezPath, from: Point, to: Point) {
    let mid = (from.x + to.x) / 2.0;
    p.move_to(from);
    p.curve_to(Point::new(mid, from.y), Point::new(mid, to.y), to);
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
