//! Integer pixel geometry shared by every entity in the arena.
//!
//! Coordinates use a top-left origin with the y axis pointing down. Edges are
//! inclusive: a rectangle at `x = 0` with `width = 16` spans columns `0..=15`.

use serde::{Deserialize, Serialize};

/// Location expressed in arena pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate, growing downwards.
    pub y: i32,
}

impl Point {
    /// Creates a point at the provided coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with inclusive edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent in pixels.
    pub width: i32,
    /// Vertical extent in pixels.
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle anchored at `(x, y)`.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a square of side `size` anchored at `origin`.
    #[must_use]
    pub const fn square(origin: Point, size: i32) -> Self {
        Self::new(origin.x, origin.y, size, size)
    }

    /// Creates a square of side `size` whose center sits at `center`.
    #[must_use]
    pub const fn centered(center: Point, size: i32) -> Self {
        Self::new(center.x - size / 2, center.y - size / 2, size, size)
    }

    /// Left-most column covered by the rectangle.
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Right-most column covered by the rectangle.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    /// Top-most row covered by the rectangle.
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Bottom-most row covered by the rectangle.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    /// Upper-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Center point, rounded towards the origin.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Returns the same rectangle moved so its upper-left corner is `origin`.
    #[must_use]
    pub const fn moved_to(self, origin: Point) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }

    /// Reports whether the two rectangles share at least one pixel.
    #[must_use]
    pub const fn intersects(&self, other: &Rect) -> bool {
        !(self.left() > other.right()
            || self.right() < other.left()
            || self.top() > other.bottom()
            || self.bottom() < other.top())
    }

    /// Reports whether `other` lies entirely inside this rectangle.
    #[must_use]
    pub const fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }
}
