use super::*;
use crate::render::orchestrator::render_tree;
use crate::render::progress::NoProgress;
use crate::render::state::RenderState;
use crate::surface::Surface;
use crate::surface::svg::SvgSurface;
use crate::syntax::parser::parse_expression;

struct Rendered {
    surface: SvgSurface,
    state: RenderState,
    element: RenderedElement,
}

impl Rendered {
    fn markup(self) -> String {
        self.surface.into_document().markup().to_owned()
    }
}

async fn render(src: &str) -> Rendered {
    let root = parse_expression(src).unwrap();
    let mut state = RenderState::default();
    let mut surface = SvgSurface::default();
    let element = render_tree(&root, &mut state, &mut surface, &mut NoProgress)
        .await
        .unwrap();
    Rendered {
        surface,
        state,
        element,
    }
}

fn weight(src: &str) -> u64 {
    parse_expression(src).unwrap().total_weight()
}

#[test]
fn tree_weights() {
    assert_eq!(weight("abc"), 2);
    assert_eq!(weight("a|b"), 4);
    assert_eq!(weight("a*"), 3);
    assert_eq!(weight("^a$"), 5);
    assert_eq!(weight("[aab]"), 4);
    assert_eq!(weight("(?:a)"), 2);
    assert_eq!(weight("(a)"), 3);
    assert_eq!(weight("(?=a)"), 3);
}

#[test]
fn content_kind_follows_variant() {
    let root = parse_expression("a.\\d\\1^[x](y)").unwrap();
    let kinds: Vec<_> = root.regexp.alternatives[0]
        .fragments
        .iter()
        .map(|f| f.content.kind())
        .collect();
    assert_eq!(
        kinds,
        [
            "literal",
            "any-character",
            "escape",
            "back-reference",
            "anchor",
            "charset",
            "subexp"
        ]
    );
}

#[tokio::test]
async fn groups_are_numbered_pre_order() {
    let r = render("((a)(?:b)(?<n>c))").await;
    assert_eq!(r.state.group_counter(), 4);
    let markup = r.markup();
    assert!(markup.contains("group #1<"));
    assert!(markup.contains("group #2<"));
    assert!(markup.contains("group #3 \u{201c}n\u{201d}"));
    assert!(!markup.contains("group #4"));
}

#[tokio::test]
async fn lookarounds_take_no_group_number() {
    let r = render("(?=a)(?<!b)").await;
    assert_eq!(r.state.group_counter(), 1);
    let markup = r.markup();
    assert!(markup.contains("positive lookahead"));
    assert!(markup.contains("negative lookbehind"));
}

#[tokio::test]
async fn warnings_for_dubious_constructs() {
    assert!(render("abc").await.state.warnings().is_empty());

    let cases = [
        ("()", "Empty group at position 0"),
        ("a(?:)", "Empty group at position 1"),
        ("\\q", "Redundant escape of \"q\" at position 0"),
        ("[\\q]", "Redundant escape of \"q\" at position 1"),
        ("[]", "Empty character set at position 0 never matches"),
        ("[^]", "Empty character set at position 0 matches any character"),
    ];
    for (src, warning) in cases {
        let r = render(src).await;
        assert_eq!(r.state.warnings(), [warning.to_owned()], "{src}");
    }
}

#[tokio::test]
async fn repeat_label_only_when_shape_is_ambiguous() {
    let markup = render("a{3}").await.markup();
    assert!(markup.contains("class=\"repeat-label\""));
    assert!(markup.contains(">2 times<"));

    let markup = render("a*").await.markup();
    assert!(!markup.contains("class=\"repeat-label\""));
}

#[tokio::test]
async fn charset_captions_and_deduplication() {
    let r = render("[^aa\\d]").await;
    assert_eq!(r.state.max_counter(), 1 + 1 + 2);
    let markup = r.markup();
    assert!(markup.contains("None of:"));
    assert_eq!(markup.matches("class=\"literal\"").count(), 1);
    assert_eq!(markup.matches("class=\"charset-escape\"").count(), 1);
}

#[tokio::test]
async fn flags_caption_sits_above_the_diagram() {
    let r = render("/a/gi").await;
    let root = r.element.id;
    let children = r.surface.children(root).unwrap().to_vec();
    let flags = r.surface.bbox(children[0]).unwrap();
    let content = r.surface.bbox(children[1]).unwrap();
    assert!(content.y0 >= flags.y1);
    assert!(r.markup().contains("Flags: global, ignore case"));
}

#[tokio::test]
async fn alternatives_sit_side_by_side_with_a_gap() {
    let r = render("a|bb").await;
    let s = &r.surface;
    let regexp = s.children(r.element.id).unwrap()[0];
    let branches = s.children(regexp).unwrap().to_vec();
    assert_eq!(branches.len(), 3);

    let first = s.bbox(branches[0]).unwrap();
    let second = s.bbox(branches[1]).unwrap();
    assert!((second.x0 - first.x1 - BRANCH_SPACE).abs() < 1e-9);
    assert!((first.center().y - second.center().y).abs() < 1e-9);

    let whole = s.bbox(regexp).unwrap();
    assert!(whole.width() > first.width() + second.width() + 3.0 * BRANCH_SPACE - 1e-9);
    assert!(whole.y0 < first.y0);
    assert!(whole.y1 > first.y1);
}

#[tokio::test]
async fn sequence_items_share_an_anchor_line() {
    let r = render("a(b)").await;
    let s = &r.surface;
    let regexp = s.children(r.element.id).unwrap()[0];
    let m = s.children(regexp).unwrap()[0];
    let items = s.children(m).unwrap().to_vec();
    assert_eq!(items.len(), 3);
    let a = s.bbox(items[0]).unwrap();
    let b = s.bbox(items[1]).unwrap();
    assert!((b.x0 - a.x1 - SEQUENCE_GAP).abs() < 1e-9);
}
