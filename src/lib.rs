//! Railyard turns regular expressions into railroad diagrams.
//!
//! Text goes through a [`Session`]: it is parsed into a typed syntax tree, then rendered by a
//! recursive, cooperative traversal that reports progress, honours cancellation and finally sizes
//! the canvas around the drawing.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: `text -> Root` after one scheduling tick ([`Session::parse`])
//! 2. **Render**: `Root -> Surface` node by node ([`render_tree`]), one yield per node
//! 3. **Attach** (optional): place the finished [`SvgDocument`] into a host [`Container`]
//!    through a [`Renderer`]
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Explicit state**: traversal state lives in a [`RenderState`] threaded by `&mut`, never on
//!   the tree.
//! - **Cooperative cancellation**: a shareable [`CancellationToken`] is checked before every
//!   node; a cancelled render is an outcome, not an error.
//! - **Deterministic layout**: text is measured with fixed [`TextMetrics`], so the same input
//!   always yields the same document.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod host;
mod render;
mod session;
mod surface;
mod syntax;

pub use foundation::core::{Affine, Anchor, BezPath, Point, Rect, Vec2, union_rects};
pub use foundation::error::{RailyardError, RailyardResult};
pub use host::container::{ChildId, Container, Element, HtmlContainer};
pub use host::options::RenderOptions;
pub use host::renderer::{CONTAINER_CLASS, LOADING_CLASS, Mount, Renderer, attach_container};
pub use render::context::RenderContext;
pub use render::node::{RenderNode, RenderedElement};
pub use render::orchestrator::{CANVAS_MARGIN, render_tree};
pub use render::progress::{NoProgress, ProgressLog, ProgressSink};
pub use render::state::{CancellationToken, RenderState};
pub use session::{RenderOutcome, Session, SessionOpts, SessionState, parse, parse_blocking};
pub use surface::metrics::TextMetrics;
pub use surface::svg::{DIAGRAM_STYLE, SvgDocument, SvgSurface};
pub use surface::{ElementId, Surface, Text, TextSpan};
pub use syntax::ast::{
    AnchorKind, Charset, CharsetItem, Content, Escape, Flag, Literal, Match, MatchFragment,
    RedundantEscape, Regexp, Repeat, Root, SetChar, SetCharKind, Span, Subexp, SubexpKind,
};
pub use syntax::error::SyntaxError;
pub use syntax::parser::{MAX_NESTING, normalize_newlines, parse_expression};
