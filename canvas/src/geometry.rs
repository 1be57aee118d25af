//! Pure polygon helpers: bounding boxes, centroids, point-string codec, and
//! the random blob generator behind the "create" command.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::f64::consts::TAU;

use rand::Rng;

use crate::camera::Point;
use crate::error::DeskError;

/// Axis-aligned bounding box. Also used for screen-space rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Bounding box of `points`.
    ///
    /// Starts from `+∞/−∞` sentinels, so an empty slice yields an inverted
    /// box whose width and height are `−∞`.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        let mut b = Self::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        b
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.min_x + dx, self.min_y + dy, self.max_x + dx, self.max_y + dy)
    }
}

/// Vertex average. An empty slice yields NaN coordinates.
#[must_use]
pub fn centroid(points: &[Point]) -> Point {
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Clamp `v` into `[lo, hi]`, or return the midpoint when the range is
/// inverted (the box being clamped is larger than the box it must fit in).
#[must_use]
pub fn clamp_axis(v: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        return (lo + hi) * 0.5;
    }
    v.max(lo).min(hi)
}

/// Parse a whitespace-separated list of `x,y` pairs.
///
/// # Errors
///
/// Returns [`DeskError::EmptyPoints`] for blank input and
/// [`DeskError::InvalidPoint`] for any pair that is not two finite numbers.
pub fn parse_points(raw: &str) -> Result<Vec<Point>, DeskError> {
    let points = raw
        .split_whitespace()
        .map(parse_pair)
        .collect::<Result<Vec<_>, _>>()?;
    if points.is_empty() {
        return Err(DeskError::EmptyPoints);
    }
    Ok(points)
}

fn parse_pair(pair: &str) -> Result<Point, DeskError> {
    let invalid = || DeskError::InvalidPoint(pair.to_owned());
    let (x, y) = pair.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.parse().map_err(|_| invalid())?;
    let y: f64 = y.parse().map_err(|_| invalid())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok(Point::new(x, y))
}

/// Encode points as `"x,y x,y ..."` with one decimal place.
#[must_use]
pub fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.1},{:.1}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Irregular star-convex polygon around `center`.
///
/// Vertex angles are evenly spaced with up to `ang_jit` of a step of jitter
/// (then sorted so the outline never crosses itself); each radius varies by
/// up to `rad_jit` of `radius`.
pub fn random_blob<R: Rng + ?Sized>(
    rng: &mut R,
    center: Point,
    radius: f64,
    n: usize,
    ang_jit: f64,
    rad_jit: f64,
) -> Vec<Point> {
    #[allow(clippy::cast_precision_loss)]
    let step = TAU / n as f64;
    #[allow(clippy::cast_precision_loss)]
    let mut angles = (0..n)
        .map(|i| (i as f64) * step + jitter(rng, ang_jit) * step)
        .collect::<Vec<_>>();
    angles.sort_by(f64::total_cmp);

    angles
        .into_iter()
        .map(|a| {
            let r = radius * (1.0 + jitter(rng, rad_jit));
            Point::new(center.x + a.cos() * r, center.y + a.sin() * r)
        })
        .collect()
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f64) -> f64 {
    if amount <= 0.0 {
        return 0.0;
    }
    rng.random_range(-amount..amount)
}
