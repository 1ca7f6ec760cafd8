//! Surface-local geometry: points and normalized rectangles.
//!
//! Annotations store a fixed anchor plus a *signed* width and height, so a box
//! dragged up or to the left has negative extents. Every overlap and hit test
//! goes through [`Bounds`], which holds the min/max corners regardless of the
//! drag direction.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A point in surface-local CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle expressed as its min (`start`) and max (`end`) corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub start: Point,
    pub end: Point,
}

impl Bounds {
    /// Normalize an anchor plus signed extents into min/max corners.
    #[must_use]
    pub fn from_anchor(x: f64, y: f64, width: f64, height: f64) -> Self {
        let (x0, x1) = (x, x + width);
        let (y0, y1) = (y, y + height);
        Self {
            start: Point::new(x0.min(x1), y0.min(y1)),
            end: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Square of side `2 * half` centred on `center`.
    #[must_use]
    pub fn around(center: Point, half: f64) -> Self {
        Self {
            start: Point::new(center.x - half, center.y - half),
            end: Point::new(center.x + half, center.y + half),
        }
    }

    /// Half-open overlap on both axes. Rectangles that only share an edge do
    /// not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        if self.start.x >= other.end.x || other.start.x >= self.end.x {
            return false;
        }
        if self.start.y >= other.end.y || other.start.y >= self.end.y {
            return false;
        }
        true
    }

    /// Inclusive containment: points on the border count as inside.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.start.x <= p.x && p.x <= self.end.x && self.start.y <= p.y && p.y <= self.end.y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.end.x - self.start.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.end.y - self.start.y
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.start.x + self.end.x) * 0.5, (self.start.y + self.end.y) * 0.5)
    }
}
