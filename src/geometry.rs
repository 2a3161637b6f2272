//! Points, segments and rectangles in chart pixel space.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Point at (`x`, `y`).
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a line from coordinates.
    #[must_use]
    pub const fn from_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Scale both endpoints.
    #[must_use]
    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        Self::from_coords(self.start.x * sx, self.start.y * sy, self.end.x * sx, self.end.y * sy)
    }
}

/// A rectangle defined by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Translate by an offset.
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Scale position and size independently per axis.
    #[must_use]
    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        Self::new(self.x * sx, self.y * sy, self.width * sx, self.height * sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_line_scaled() {
        let line = Line::from_coords(1.0, 2.0, 3.0, 4.0).scaled(2.0, 0.5);
        assert_eq!(line, Line::from_coords(2.0, 1.0, 6.0, 2.0));
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_relative_eq!(rect.right(), 40.0);
        assert_relative_eq!(rect.bottom(), 60.0);
    }

    #[test]
    fn test_rect_translated_and_scaled() {
        let rect = Rect::new(0.0, 0.0, 10.0, 5.0).translated(40.0, 30.0).scaled(2.0, 2.0);
        assert_eq!(rect, Rect::new(80.0, 60.0, 20.0, 10.0));
    }

    #[test]
    fn test_line_endpoints() {
        let line = Line::new(Point::new(0.0, 1.0), Point::new(2.0, 3.0));
        assert_eq!(line, Line::from_coords(0.0, 1.0, 2.0, 3.0));
    }
}
