#![allow(clippy::float_cmp)]

use super::*;

fn tri() -> Vec<Point> {
    vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 6.0)]
}

fn shape() -> PlacedShape {
    PlacedShape::new(tri(), "#abcdef", "#012345", "0,0 10,0 0,6".into())
}

// --- PlacedShape ---

#[test]
fn new_shape_has_zero_translate_and_unique_id() {
    let a = shape();
    let b = shape();
    assert_eq!((a.tx, a.ty), (0.0, 0.0));
    assert_ne!(a.id, b.id);
    assert_eq!(a.fill, "#abcdef");
}

#[test]
fn blank_colors_fall_back_to_defaults() {
    let s = PlacedShape::new(tri(), "", "  ", String::new());
    assert_eq!(s.fill, DEFAULT_FILL);
    assert_eq!(s.stroke, DEFAULT_STROKE);
}

#[test]
fn world_geometry_follows_translate() {
    let mut s = shape();
    s.tx = 5.0;
    s.ty = -1.0;
    let bb = s.world_bounds();
    assert_eq!((bb.min_x, bb.min_y, bb.max_x, bb.max_y), (5.0, -1.0, 15.0, 5.0));
    assert_eq!(s.world_points()[1], Point::new(15.0, -1.0));
    let c = s.world_centroid();
    assert!((c.x - (10.0 / 3.0 + 5.0)).abs() < 1e-9);
    assert!((c.y - 1.0).abs() < 1e-9);
    // The stored outline never moves.
    assert_eq!(s.local_bounds().min_x, 0.0);
}

#[test]
fn clamp_into_pulls_shape_back_inside() {
    let view = ViewRect::new(0.0, 0.0, 100.0, 60.0);
    let mut s = shape();
    s.tx = 95.0;
    s.ty = -10.0;
    s.clamp_into(&view);
    assert_eq!(s.tx, 90.0);
    assert_eq!(s.ty, 0.0);
}

#[test]
fn clamp_into_leaves_inside_shape_alone() {
    let view = ViewRect::new(-50.0, -50.0, 200.0, 120.0);
    let mut s = shape();
    s.tx = 12.5;
    s.ty = 7.25;
    s.clamp_into(&view);
    assert_eq!((s.tx, s.ty), (12.5, 7.25));
}

#[test]
fn clamp_into_centers_oversized_axis() {
    let view = ViewRect::new(0.0, 0.0, 8.0, 60.0);
    let mut s = shape();
    s.tx = 30.0;
    s.ty = 100.0;
    s.clamp_into(&view);
    // 10 wide in an 8 wide view: centered on x, clamped on y.
    assert_eq!(s.world_bounds().center().x, 4.0);
    assert_eq!(s.ty, 54.0);
}

// --- ShapeLayer ---

#[test]
fn layer_starts_empty() {
    let layer = ShapeLayer::new();
    assert!(layer.is_empty());
    assert_eq!(layer.len(), 0);
}

#[test]
fn push_appends_on_top() {
    let mut layer = ShapeLayer::new();
    let a = shape();
    let b = shape();
    let (ida, idb) = (a.id, b.id);
    layer.push(a);
    layer.push(b);
    assert_eq!(layer.index_of(&ida), Some(0));
    assert_eq!(layer.index_of(&idb), Some(1));
    assert_eq!(layer.iter().last().map(|s| s.id), Some(idb));
}

#[test]
fn remove_reports_slot_and_insert_restores_it() {
    let mut layer = ShapeLayer::new();
    let shapes: Vec<PlacedShape> = (0..3).map(|_| shape()).collect();
    let middle = shapes[1].id;
    for s in shapes {
        layer.push(s);
    }
    let (slot, removed) = layer.remove(&middle).expect("present");
    assert_eq!(slot, 1);
    assert_eq!(layer.len(), 2);
    assert!(layer.get(&middle).is_none());

    layer.insert_at(slot, removed);
    assert_eq!(layer.index_of(&middle), Some(1));
}

#[test]
fn insert_past_end_goes_on_top() {
    let mut layer = ShapeLayer::new();
    layer.push(shape());
    let s = shape();
    let id = s.id;
    layer.insert_at(42, s);
    assert_eq!(layer.index_of(&id), Some(1));
}

#[test]
fn remove_missing_is_none() {
    let mut layer = ShapeLayer::new();
    layer.push(shape());
    assert!(layer.remove(&uuid::Uuid::new_v4()).is_none());
    assert_eq!(layer.len(), 1);
}

#[test]
fn get_mut_edits_in_place() {
    let mut layer = ShapeLayer::new();
    let s = shape();
    let id = s.id;
    layer.push(s);
    if let Some(s) = layer.get_mut(&id) {
        s.tx = 3.0;
    }
    assert_eq!(layer.get(&id).map(|s| s.tx), Some(3.0));
}

#[test]
fn replace_all_and_clear() {
    let mut layer = ShapeLayer::new();
    layer.push(shape());
    layer.replace_all(vec![shape(), shape(), shape()]);
    assert_eq!(layer.len(), 3);
    layer.clear();
    assert!(layer.is_empty());
}
