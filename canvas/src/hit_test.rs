use super::*;

fn square(x: f64, y: f64, size: f64) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x + size, y),
        Point::new(x + size, y + size),
        Point::new(x, y + size),
    ]
}

fn shape(points: Vec<Point>) -> PlacedShape {
    PlacedShape::new(points, "#fff", "#000", String::new())
}

// --- point_in_polygon ---

#[test]
fn inside_square() {
    assert!(point_in_polygon(Point::new(5.0, 5.0), &square(0.0, 0.0, 10.0)));
}

#[test]
fn outside_square() {
    assert!(!point_in_polygon(Point::new(15.0, 5.0), &square(0.0, 0.0, 10.0)));
    assert!(!point_in_polygon(Point::new(5.0, -1.0), &square(0.0, 0.0, 10.0)));
}

#[test]
fn concave_notch_is_outside() {
    // A "U": the notch between the arms is not part of the fill.
    let u = vec![
        Point::new(0.0, 0.0),
        Point::new(3.0, 0.0),
        Point::new(3.0, 7.0),
        Point::new(7.0, 7.0),
        Point::new(7.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ];
    assert!(!point_in_polygon(Point::new(5.0, 3.0), &u));
    assert!(point_in_polygon(Point::new(1.5, 3.0), &u));
    assert!(point_in_polygon(Point::new(5.0, 9.0), &u));
}

#[test]
fn degenerate_outline_never_hits() {
    assert!(!point_in_polygon(Point::new(0.0, 0.0), &[]));
    assert!(!point_in_polygon(Point::new(0.0, 0.0), &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]));
}

// --- hits_shape ---

#[test]
fn hits_shape_accounts_for_translate() {
    let mut s = shape(square(0.0, 0.0, 10.0));
    s.tx = 20.0;
    s.ty = 5.0;
    assert!(hits_shape(Point::new(25.0, 10.0), &s));
    assert!(!hits_shape(Point::new(5.0, 5.0), &s));
}

// --- hit_test ---

#[test]
fn hit_test_empty_layer() {
    assert!(hit_test(Point::new(0.0, 0.0), &ShapeLayer::new()).is_none());
}

#[test]
fn hit_test_prefers_top_most() {
    let mut layer = ShapeLayer::new();
    let bottom = shape(square(0.0, 0.0, 10.0));
    let top = shape(square(5.0, 5.0, 10.0));
    let top_id = top.id;
    let bottom_id = bottom.id;
    layer.push(bottom);
    layer.push(top);
    assert_eq!(hit_test(Point::new(7.0, 7.0), &layer), Some(top_id));
    assert_eq!(hit_test(Point::new(2.0, 2.0), &layer), Some(bottom_id));
    assert!(hit_test(Point::new(30.0, 30.0), &layer).is_none());
}
