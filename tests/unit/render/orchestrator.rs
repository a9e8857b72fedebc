use super::*;
use crate::foundation::core::{Affine, BezPath, Point, Rect};
use crate::render::progress::{NoProgress, ProgressLog};
use crate::render::state::CancellationToken;
use crate::surface::svg::SvgSurface;
use crate::surface::{ElementId, Text};
use crate::syntax::parser::parse_expression;

/// Delegates to an [`SvgSurface`] but refuses to draw text.
struct TextlessSurface(SvgSurface);

impl Surface for TextlessSurface {
    fn root(&self) -> ElementId {
        self.0.root()
    }
    fn group(&mut self, parent: ElementId) -> RailyardResult<ElementId> {
        self.0.group(parent)
    }
    fn rect(&mut self, parent: ElementId, rect: Rect, radius: f64) -> RailyardResult<ElementId> {
        self.0.rect(parent, rect, radius)
    }
    fn circle(
        &mut self,
        parent: ElementId,
        center: Point,
        radius: f64,
    ) -> RailyardResult<ElementId> {
        self.0.circle(parent, center, radius)
    }
    fn path(&mut self, parent: ElementId, path: BezPath) -> RailyardResult<ElementId> {
        self.0.path(parent, path)
    }
    fn text(
        &mut self,
        _parent: ElementId,
        _origin: Point,
        _text: Text,
    ) -> RailyardResult<ElementId> {
        Err(RailyardError::render("no fonts"))
    }
    fn add_class(&mut self, id: ElementId, class: &str) -> RailyardResult<()> {
        self.0.add_class(id, class)
    }
    fn set_attr(&mut self, id: ElementId, name: &str, value: String) -> RailyardResult<()> {
        self.0.set_attr(id, name, value)
    }
    fn transform(&self, id: ElementId) -> RailyardResult<Affine> {
        self.0.transform(id)
    }
    fn set_transform(&mut self, id: ElementId, transform: Affine) -> RailyardResult<()> {
        self.0.set_transform(id, transform)
    }
    fn bbox(&self, id: ElementId) -> RailyardResult<Rect> {
        self.0.bbox(id)
    }
}

#[tokio::test]
async fn canvas_is_content_plus_margins() {
    for src in ["a", "abc", "a|b", "(a)*[^x-z]{2,4}?", "/^$/m"] {
        let root = parse_expression(src).unwrap();
        let mut state = RenderState::default();
        let mut surface = SvgSurface::default();
        let el = render_tree(&root, &mut state, &mut surface, &mut NoProgress)
            .await
            .unwrap();

        let content = el.bbox(&surface).unwrap();
        assert!((content.x0 - CANVAS_MARGIN).abs() < 1e-9, "{src}");
        assert!((content.y0 - CANVAS_MARGIN).abs() < 1e-9, "{src}");

        let doc = surface.into_document();
        assert!((doc.width() - (content.width() + 20.0)).abs() < 1e-3, "{src}");
        assert!((doc.height() - (content.height() + 20.0)).abs() < 1e-3, "{src}");
    }
}

#[tokio::test]
async fn counter_reaches_tree_weight_with_monotonic_progress() {
    let root = parse_expression("^(?:a|b(c))+\\d[ab-]{3,}$").unwrap();
    let mut state = RenderState::default();
    let mut surface = SvgSurface::default();
    let mut log = ProgressLog::new();
    render_tree(&root, &mut state, &mut surface, &mut log)
        .await
        .unwrap();

    assert_eq!(state.render_counter(), state.max_counter());
    assert_eq!(state.max_counter(), root.total_weight());
    assert!(log.values().windows(2).all(|w| w[0] <= w[1]));
    assert!(log.values().iter().all(|v| (0.0..=1.0).contains(v)));
    assert_eq!(log.last(), Some(1.0));
}

#[tokio::test]
async fn cancelled_state_leaves_surface_untouched() {
    let root = parse_expression("abc").unwrap();
    let token = CancellationToken::new();
    token.cancel();
    let mut state = RenderState::new(token);
    let mut surface = SvgSurface::default();

    let err = render_tree(&root, &mut state, &mut surface, &mut NoProgress)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert!(surface.is_empty());
    assert_eq!(state.max_counter(), 0);
    assert_eq!(surface.attr(surface.root(), "width").unwrap(), None);
}

#[tokio::test]
async fn cancel_from_progress_stops_at_next_node() {
    let root = parse_expression("a|b|c|d").unwrap();
    let token = CancellationToken::new();
    let mut state = RenderState::new(token.clone());
    let mut surface = SvgSurface::default();
    let mut calls = 0;
    let mut sink = |_: f64| {
        calls += 1;
        token.cancel();
    };

    let err = render_tree(&root, &mut state, &mut surface, &mut sink)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(calls, 1);
    assert_eq!(state.render_counter(), 1);
    assert!(state.render_counter() < state.max_counter());
}

#[tokio::test]
async fn node_failure_aborts_traversal() {
    let root = parse_expression("a|b").unwrap();
    let mut state = RenderState::default();
    let mut surface = TextlessSurface(SvgSurface::default());
    let mut log = ProgressLog::new();

    let err = render_tree(&root, &mut state, &mut surface, &mut log)
        .await
        .unwrap_err();
    assert!(matches!(err, RailyardError::Render(_)));
    assert!(log.values().is_empty());
    assert_eq!(state.render_counter(), 0);
}

#[test]
fn blocks_without_a_runtime() {
    let root = parse_expression("x+").unwrap();
    let mut state = RenderState::default();
    let mut surface = SvgSurface::default();
    pollster::block_on(render_tree(&root, &mut state, &mut surface, &mut NoProgress)).unwrap();
    assert_eq!(state.render_counter(), 3);
}
