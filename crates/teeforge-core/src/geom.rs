//! Geometry primitives for canvas-space layout and hit testing.

use serde::{Deserialize, Serialize};

/// A point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Rotates this point around `center` by `degrees` (counter-clockwise
    /// negative in canvas coordinates, matching screen-space convention).
    pub fn rotated_around(&self, center: Point, degrees: f64) -> Point {
        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point::new(
            cos * dx - sin * dy + center.x,
            sin * dx + cos * dy + center.y,
        )
    }
}

/// An axis-aligned rectangle in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether a point lies inside the rectangle (inclusive edges).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Pixel-space placement bounds, resolved from a fractional print area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Clamps the origin of a `width`×`height` box so the box stays inside.
    pub fn clamp_origin(&self, x: f64, y: f64, width: f64, height: f64) -> Point {
        Point::new(
            x.clamp(self.min_x, (self.max_x - width).max(self.min_x)),
            y.clamp(self.min_y, (self.max_y - height).max(self.min_y)),
        )
    }

    /// Whether a rectangle is fully contained, within tolerance `eps`.
    pub fn contains_rect(&self, rect: &Rect, eps: f64) -> bool {
        rect.x >= self.min_x - eps
            && rect.y >= self.min_y - eps
            && rect.x + rect.width <= self.max_x + eps
            && rect.y + rect.height <= self.max_y + eps
    }
}
