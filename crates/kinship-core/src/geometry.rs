//! Geometric primitives for tree layout.
//!
//! - [`Point`] - the center of a placed member
//! - [`Size`] - the box drawn for every member
//! - [`Bounds`] - an axis-aligned box, used for member boxes and the canvas
//! - [`Insets`] - margin added around a box
//!
//! Coordinates follow SVG: +X to the right, +Y downward. The root of a tree
//! sits at y = 0 and each generation lies further down. A finished layout is
//! centered on x = 0, so x-coordinates can be negative.

/// A position in layout space.
///
/// # Examples
///
/// ```
/// # use kinship_core::geometry::Point;
/// let father = Point::new(-70.0, 120.0);
/// let mother = Point::new(70.0, 120.0);
///
/// let child_anchor = father.midpoint(mother);
/// assert_eq!(child_anchor, Point::new(0.0, 120.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the point moved horizontally to `x`.
    pub fn with_x(self, x: f32) -> Self {
        Self { x, ..self }
    }

    /// Returns the point offset by `offset`.
    pub fn add_point(self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }

    /// Returns the point halfway between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Returns the box of `size` centered on this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }
}

/// An axis-aligned box given by its minimum and maximum corners.
///
/// # Examples
///
/// ```
/// # use kinship_core::geometry::{Bounds, Point, Size};
/// let parent = Point::new(0.0, 0.0).to_bounds(Size::new(120.0, 40.0));
/// let child = Point::new(160.0, 120.0).to_bounds(Size::new(120.0, 40.0));
///
/// let tree = parent.merge(&child);
/// assert_eq!(tree.min_point(), Point::new(-60.0, -20.0));
/// assert_eq!(tree.width(), 280.0);
/// assert_eq!(tree.height(), 160.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner.
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn center(self) -> Point {
        Point::new(self.min_x, self.min_y).midpoint(Point::new(self.max_x, self.max_y))
    }

    /// Returns the smallest box containing both boxes.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the box outward by `insets` on each side.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left,
            min_y: self.min_y - insets.top,
            max_x: self.max_x + insets.right,
            max_y: self.max_y + insets.bottom,
        }
    }
}

/// Spacing on the four sides of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same spacing on every side.
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_x_keeps_y() {
        assert_eq!(Point::new(1.0, 2.0).with_x(-8.0), Point::new(-8.0, 2.0));
    }

    #[test]
    fn test_spouse_offset() {
        let member = Point::new(-70.0, 120.0);
        assert_eq!(member.add_point(Point::new(140.0, 0.0)), Point::new(70.0, 120.0));
    }

    #[test]
    fn test_node_box_around_center() {
        let bounds = Point::new(10.0, 20.0).to_bounds(Size::new(120.0, 40.0));
        assert_eq!(bounds.min_point(), Point::new(-50.0, 0.0));
        assert_eq!(bounds.max_x(), 70.0);
        assert_eq!(bounds.max_y(), 40.0);
        assert_eq!(bounds.center(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_top_left_box() {
        let bounds = Bounds::new_from_top_left(Point::default(), Size::new(320.0, 80.0));
        assert_eq!(bounds.width(), 320.0);
        assert_eq!(bounds.height(), 80.0);
        assert_eq!(bounds.center(), Point::new(160.0, 40.0));
    }

    #[test]
    fn test_uneven_padding() {
        let bounds = Bounds::new_from_top_left(Point::default(), Size::new(10.0, 10.0));
        let padded = bounds.add_padding(Insets::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(padded.min_point(), Point::new(-4.0, -1.0));
        assert_eq!(padded.max_x(), 12.0);
        assert_eq!(padded.max_y(), 13.0);
    }
}
