use super::*;
use crate::surface::svg::SvgSurface;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn boxed(s: &mut SvgSurface, w: f64, h: f64) -> RenderedElement {
    let id = s.group(s.root()).unwrap();
    let rect = Rect::new(0.0, 0.0, w, h);
    s.rect(id, rect, 0.0).unwrap();
    RenderedElement {
        id,
        anchor: Anchor::centered(rect),
    }
}

#[test]
fn label_pads_text_on_every_side() {
    let mut s = SvgSurface::default();
    let g = s.group(s.root()).unwrap();
    let a = render_label(&mut s, g, Text::body("ab")).unwrap();

    let b = s.bbox(g).unwrap();
    assert!(close(b.width(), 2.0 * 7.2 + 10.0));
    assert!(close(b.height(), 14.4 + 10.0));
    assert!(close(a.x1, 0.0));
    assert!(close(a.x2, b.width()));
    assert!(close(a.y, b.height() / 2.0));
}

#[test]
fn label_background_precedes_text() {
    let mut s = SvgSurface::default();
    let g = s.group(s.root()).unwrap();
    render_label(&mut s, g, Text::body("x")).unwrap();
    let children = s.children(g).unwrap().to_vec();
    assert_eq!(children.len(), 2);
    assert_eq!(s.children(children[0]).unwrap().len(), 1);
}

#[test]
fn horizontal_spacing_aligns_anchors() {
    let mut s = SvgSurface::default();
    let items = [boxed(&mut s, 20.0, 10.0), boxed(&mut s, 30.0, 30.0)];
    let anchors = space_horizontally(&mut s, &items, SEQUENCE_GAP).unwrap();

    assert_eq!(
        anchors,
        vec![
            Anchor {
                x1: 0.0,
                x2: 20.0,
                y: 15.0
            },
            Anchor {
                x1: 30.0,
                x2: 60.0,
                y: 15.0
            },
        ]
    );
    assert_eq!(s.bbox(items[0].id).unwrap(), Rect::new(0.0, 10.0, 20.0, 20.0));
    assert_eq!(s.bbox(items[1].id).unwrap(), Rect::new(30.0, 0.0, 60.0, 30.0));
}

#[test]
fn vertical_spacing_centres_items() {
    let mut s = SvgSurface::default();
    let items = [boxed(&mut s, 20.0, 10.0), boxed(&mut s, 40.0, 10.0)];
    space_vertically(&mut s, &items, STACK_GAP).unwrap();

    assert_eq!(s.bbox(items[0].id).unwrap(), Rect::new(10.0, 0.0, 30.0, 10.0));
    assert_eq!(s.bbox(items[1].id).unwrap(), Rect::new(0.0, 15.0, 40.0, 25.0));
}

#[test]
fn labeled_box_centres_content_under_caption() {
    let mut s = SvgSurface::default();
    let parent = s.group(s.root()).unwrap();
    let bg = s.group(parent).unwrap();
    let content = {
        let id = s.group(parent).unwrap();
        let rect = Rect::new(0.0, 0.0, 20.0, 10.0);
        s.rect(id, rect, 0.0).unwrap();
        RenderedElement {
            id,
            anchor: Anchor::centered(rect),
        }
    };

    let a = labeled_box(&mut s, bg, &content, "group #1".to_owned(), "subexp", 10.0).unwrap();

    let caption_w = 8.0 * 6.0;
    let cb = s.bbox(content.id).unwrap();
    assert!(close(cb.x0, (caption_w - 20.0) / 2.0));
    assert!(close(cb.y0, 12.0 + 10.0));
    assert!(close(a.x2, caption_w));
    assert!(close(a.y, 27.0));

    let pb = s.bbox(parent).unwrap();
    assert!(close(pb.height(), 12.0 + 10.0 + 20.0));
    let classes: Vec<_> = s
        .children(bg)
        .unwrap()
        .iter()
        .flat_map(|&c| s.classes(c).unwrap().to_vec())
        .collect();
    assert_eq!(classes, ["subexp-label", "subexp-box"]);
}

#[test]
fn connectors_append_to_one_path() {
    let mut p = BezPath::new();
    hline(&mut p, Point::new(0.0, 5.0), 10.0);
    bend(&mut p, Point::new(10.0, 5.0), Point::new(20.0, 15.0));
    assert_eq!(p.elements().len(), 4);
    assert_eq!(
        p.elements()[3],
        kurbo::PathEl::CurveTo(
            Point::new(15.0, 5.0),
            Point::new(15.0, 15.0),
            Point::new(20.0, 15.0)
        )
    );
}
