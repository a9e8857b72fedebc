use super::*;

#[test]
fn centered_anchor_spans_box() {
    let a = Anchor::centered(Rect::new(2.0, 4.0, 12.0, 24.0));
    assert_eq!(a.x1, 2.0);
    assert_eq!(a.x2, 12.0);
    assert_eq!(a.y, 14.0);
}

#[test]
fn anchor_follows_translation() {
    let a = Anchor {
        x1: 0.0,
        x2: 10.0,
        y: 5.0,
    };
    let moved = a.transformed(Affine::translate(Vec2::new(3.0, -1.0)));
    assert_eq!(moved.start(), Point::new(3.0, 4.0));
    assert_eq!(moved.end(), Point::new(13.0, 4.0));
}

#[test]
fn union_of_nothing_is_none() {
    assert_eq!(union_rects(std::iter::empty()), None);
    let u = union_rects([
        Rect::new(0.0, 0.0, 1.0, 1.0),
        Rect::new(5.0, -2.0, 6.0, 0.5),
    ])
    .unwrap();
    assert_eq!(u, Rect::new(0.0, -2.0, 6.0, 1.0));
}
