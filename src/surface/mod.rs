//! Drawing surface seam.
//!
//! The renderer only creates shapes, groups them, moves them and measures them. [`Surface`]
//! captures exactly that capability set; [`svg::SvgSurface`] is the built-in implementation.

use crate::foundation::core::{Affine, BezPath, Point, Rect, Vec2};
use crate::foundation::error::RailyardResult;

/// Fixed font metrics used for text measurement.
pub mod metrics;
/// In-memory SVG surface and document.
pub mod svg;

/// Handle to an element created on a [`Surface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct ElementId(pub(crate) usize);

/// A run of text with an optional class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSpan {
    /// Characters drawn.
    pub text: String,
    /// Class applied to the run (`<tspan class="...">`).
    pub class: Option<&'static str>,
}

impl TextSpan {
    /// Unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    /// Run with a class.
    pub fn styled(text: impl Into<String>, class: &'static str) -> Self {
        Self {
            text: text.into(),
            class: Some(class),
        }
    }
}

/// A single line of text at one font size.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    /// Runs in drawing order.
    pub spans: Vec<TextSpan>,
    /// Font size in user units.
    pub size: f64,
}

impl Text {
    /// Body text size.
    pub const BODY_SIZE: f64 = 12.0;
    /// Size of box and loop captions.
    pub const CAPTION_SIZE: f64 = 10.0;

    /// Single unstyled run at body size.
    pub fn body(text: impl Into<String>) -> Self {
        Self {
            spans: vec![TextSpan::plain(text)],
            size: Self::BODY_SIZE,
        }
    }

    /// Single unstyled run at caption size.
    pub fn caption(text: impl Into<String>) -> Self {
        Self {
            spans: vec![TextSpan::plain(text)],
            size: Self::CAPTION_SIZE,
        }
    }

    /// Number of characters across all runs.
    pub fn char_count(&self) -> usize {
        self.spans.iter().map(|s| s.text.chars().count()).sum()
    }
}

/// Capability set the renderer needs from a drawing backend.
///
/// Shapes are created inside a parent group and positioned in that group's coordinate space.
/// [`Surface::bbox`] reports an element's bounds in its parent's space, i.e. after the element's
/// own transform.
pub trait Surface {
    /// The top-level canvas element.
    fn root(&self) -> ElementId;

    /// Create an empty group inside `parent`.
    fn group(&mut self, parent: ElementId) -> RailyardResult<ElementId>;

    /// Create a rectangle with rounded corners.
    fn rect(&mut self, parent: ElementId, rect: Rect, radius: f64) -> RailyardResult<ElementId>;

    /// Create a circle.
    fn circle(&mut self, parent: ElementId, center: Point, radius: f64)
    -> RailyardResult<ElementId>;

    /// Create an unfilled path.
    fn path(&mut self, parent: ElementId, path: BezPath) -> RailyardResult<ElementId>;

    /// Create a text line whose top-left corner sits at `origin`.
    fn text(&mut self, parent: ElementId, origin: Point, text: Text) -> RailyardResult<ElementId>;

    /// Add a class to an element.
    fn add_class(&mut self, id: ElementId, class: &str) -> RailyardResult<()>;

    /// Set (or replace) an attribute.
    fn set_attr(&mut self, id: ElementId, name: &str, value: String) -> RailyardResult<()>;

    /// Current transform of an element.
    fn transform(&self, id: ElementId) -> RailyardResult<Affine>;

    /// Replace the transform of an element.
    fn set_transform(&mut self, id: ElementId, transform: Affine) -> RailyardResult<()>;

    /// Bounds of an element in its parent's coordinate space.
    fn bbox(&self, id: ElementId) -> RailyardResult<Rect>;

    /// Move an element by `offset` in its parent's coordinate space.
    fn translate(&mut self, id: ElementId, offset: Vec2) -> RailyardResult<()> {
        let t = self.transform(id)?;
        self.set_transform(id, Affine::translate(offset) * t)
    }
}
