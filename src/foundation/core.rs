pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Horizontal connection line of a drawn element.
///
/// Railroad connectors enter an element at `(x1, y)` and leave it at `(x2, y)`. Coordinates are
/// in the element's own (untransformed) space until [`Anchor::transformed`] maps them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Entry x coordinate.
    pub x1: f64,
    /// Exit x coordinate.
    pub x2: f64,
    /// Shared y coordinate of entry and exit.
    pub y: f64,
}

impl Anchor {
    /// Anchor spanning the full width of `bbox` at its vertical centre.
    pub fn centered(bbox: Rect) -> Self {
        Self {
            x1: bbox.x0,
            x2: bbox.x1,
            y: bbox.center().y,
        }
    }

    /// Map both connection points through `t`.
    pub fn transformed(self, t: Affine) -> Self {
        let a = t * Point::new(self.x1, self.y);
        let b = t * Point::new(self.x2, self.y);
        Self {
            x1: a.x,
            x2: b.x,
            y: a.y,
        }
    }

    /// Entry point.
    pub fn start(self) -> Point {
        Point::new(self.x1, self.y)
    }

    /// Exit point.
    pub fn end(self) -> Point {
        Point::new(self.x2, self.y)
    }
}

/// Union of all rectangles, or `None` for an empty iterator.
pub fn union_rects(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().reduce(|acc, r| acc.union(r))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
