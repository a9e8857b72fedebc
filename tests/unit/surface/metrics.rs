use super::*;

#[test]
fn width_scales_with_characters_and_size() {
    let m = TextMetrics::default();
    let r = m.bounds(Point::new(1.0, 2.0), &Text::body("abcd"));
    assert!((r.width() - 0.6 * 12.0 * 4.0).abs() < 1e-9);
    assert!((r.height() - 1.2 * 12.0).abs() < 1e-9);
    assert_eq!(r.origin(), Point::new(1.0, 2.0));

    let small = m.bounds(Point::ORIGIN, &Text::caption("abcd"));
    assert!(small.width() < r.width());
}

#[test]
fn empty_text_has_zero_width() {
    let m = TextMetrics::default();
    assert_eq!(m.bounds(Point::ORIGIN, &Text::body("")).width(), 0.0);
}

#[test]
fn baseline_sits_below_top() {
    let m = TextMetrics::default();
    assert!(m.baseline(10.0, 12.0) > 10.0);
}
