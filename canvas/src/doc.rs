//! Document model: shapes placed on the work canvas and the ordered layer
//! that owns them.
//!
//! A [`PlacedShape`] keeps its outline in untranslated coordinates plus a
//! translate offset; the world position of each vertex is `point + (tx, ty)`.
//! Dragging only ever touches the offset, so the outline string written to
//! storage stays stable while a shape moves around.
//!
//! [`ShapeLayer`] order is draw order: later shapes paint over earlier ones
//! and win hit tests.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use uuid::Uuid;

use crate::camera::{Point, ViewRect};
use crate::consts::{DEFAULT_FILL, DEFAULT_STROKE};
use crate::geometry::{self, Bounds, clamp_axis};

/// Unique identifier for a placed shape.
pub type ShapeId = Uuid;

/// A shape living on the work canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedShape {
    pub id: ShapeId,
    /// Outline in untranslated world coordinates.
    pub points: Vec<Point>,
    pub tx: f64,
    pub ty: f64,
    pub fill: String,
    pub stroke: String,
    /// Palette-form point string the shape was created from.
    pub canonical: String,
}

impl PlacedShape {
    /// New shape with zero translate. Blank colors fall back to the defaults.
    #[must_use]
    pub fn new(points: Vec<Point>, fill: &str, stroke: &str, canonical: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            tx: 0.0,
            ty: 0.0,
            fill: color_or(fill, DEFAULT_FILL),
            stroke: color_or(stroke, DEFAULT_STROKE),
            canonical,
        }
    }

    /// Bounding box of the untranslated outline.
    #[must_use]
    pub fn local_bounds(&self) -> Bounds {
        Bounds::from_points(&self.points)
    }

    /// Bounding box of the outline at its current translate.
    #[must_use]
    pub fn world_bounds(&self) -> Bounds {
        self.local_bounds().translated(self.tx, self.ty)
    }

    /// Outline vertices at their current translate.
    #[must_use]
    pub fn world_points(&self) -> Vec<Point> {
        self.points
            .iter()
            .map(|p| Point::new(p.x + self.tx, p.y + self.ty))
            .collect()
    }

    /// Vertex centroid at the current translate.
    #[must_use]
    pub fn world_centroid(&self) -> Point {
        let c = geometry::centroid(&self.points);
        Point::new(c.x + self.tx, c.y + self.ty)
    }

    /// Clamp the translate so the world bounds stay inside `view`.
    ///
    /// Each axis is clamped on its own. When the outline is larger than the
    /// view on an axis the shape is centered on that axis instead.
    pub fn clamp_into(&mut self, view: &ViewRect) {
        let bb = self.local_bounds();
        self.tx = clamp_axis(self.tx, view.x - bb.min_x, view.right() - bb.max_x);
        self.ty = clamp_axis(self.ty, view.y - bb.min_y, view.bottom() - bb.max_y);
    }
}

fn color_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}

/// Ordered collection of placed shapes.
#[derive(Debug, Clone, Default)]
pub struct ShapeLayer {
    shapes: Vec<PlacedShape>,
}

impl ShapeLayer {
    /// Create an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Append a shape on top of the stack.
    pub fn push(&mut self, shape: PlacedShape) {
        self.shapes.push(shape);
    }

    /// Insert a shape at `index`, or on top when `index` is past the end.
    pub fn insert_at(&mut self, index: usize, shape: PlacedShape) {
        let index = index.min(self.shapes.len());
        self.shapes.insert(index, shape);
    }

    /// Remove a shape, returning it with the slot it occupied.
    pub fn remove(&mut self, id: &ShapeId) -> Option<(usize, PlacedShape)> {
        let index = self.index_of(id)?;
        Some((index, self.shapes.remove(index)))
    }

    #[must_use]
    pub fn index_of(&self, id: &ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == *id)
    }

    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&PlacedShape> {
        self.shapes.iter().find(|s| s.id == *id)
    }

    pub fn get_mut(&mut self, id: &ShapeId) -> Option<&mut PlacedShape> {
        self.shapes.iter_mut().find(|s| s.id == *id)
    }

    /// Shapes in draw order (bottom first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PlacedShape> {
        self.shapes.iter()
    }

    /// Replace every shape.
    pub fn replace_all(&mut self, shapes: Vec<PlacedShape>) {
        self.shapes = shapes;
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
