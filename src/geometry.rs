//! Points and boxes in page space
//!
//! All coordinates are PDF points with a top-left origin and y growing
//! downwards. Backends that need a bottom-left origin flip on output.

/// A 2D point in page space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Build a box from two opposite corners, in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Grow the box by `amount` on every side
    pub fn inflate(&self, amount: f64) -> BoundingBox {
        BoundingBox::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let b = BoundingBox::from_corners(Point::new(10.0, 20.0), Point::new(0.0, 5.0));
        assert_eq!(b, BoundingBox::new(0.0, 5.0, 10.0, 15.0));
    }

    #[test]
    fn test_union_and_inflate() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(20.0, 5.0, 5.0, 20.0);
        let u = a.union(&b);
        assert_eq!(u, BoundingBox::new(0.0, 0.0, 25.0, 25.0));
        assert_eq!(u.inflate(1.0), BoundingBox::new(-1.0, -1.0, 27.0, 27.0));
    }

    #[test]
    fn test_contains_edges() {
        let b = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains(Point::new(10.0, 10.0)));
        assert!(!b.contains(Point::new(10.1, 5.0)));
        assert_eq!(b.center(), Point::new(5.0, 5.0));
    }
}
