#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::{PlacedShape, ShapeId, ShapeLayer};

/// Even-odd point-in-polygon test against a closed outline.
#[must_use]
pub fn point_in_polygon(pt: Point, outline: &[Point]) -> bool {
    if outline.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = outline.len() - 1;
    for i in 0..outline.len() {
        let a = outline[i];
        let b = outline[j];
        if (a.y > pt.y) != (b.y > pt.y) {
            let x_cross = a.x + (pt.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if pt.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Whether `world_pt` falls in the fill of `shape` at its current translate.
#[must_use]
pub fn hits_shape(world_pt: Point, shape: &PlacedShape) -> bool {
    let local = Point::new(world_pt.x - shape.tx, world_pt.y - shape.ty);
    shape.local_bounds().contains(local) && point_in_polygon(local, &shape.points)
}

/// Top-most shape whose fill contains `world_pt`.
#[must_use]
pub fn hit_test(world_pt: Point, layer: &ShapeLayer) -> Option<ShapeId> {
    layer.iter().rev().find(|s| hits_shape(world_pt, s)).map(|s| s.id)
}
