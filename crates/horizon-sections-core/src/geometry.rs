//! Layout geometry value types.
//!
//! Section controllers report item sizes, section insets, and spacing in
//! these units. All values are logical points as `f64`.

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin point.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns `true` if either dimension is NaN.
    #[inline]
    pub fn has_nan(&self) -> bool {
        self.width.is_nan() || self.height.is_nan()
    }
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Self { width, height }
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// A zero-sized rectangle at the origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    #[inline]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Returns a copy of this rectangle moved by `(dx, dy)`.
    #[inline]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: self.size,
        }
    }
}

/// Insets applied around the content of a section.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    /// Create insets from each edge.
    #[inline]
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same inset on every edge.
    #[inline]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// No insets.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Total horizontal inset (left + right).
    #[inline]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical inset (top + bottom).
    #[inline]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Returns `true` if any edge is NaN.
    #[inline]
    pub fn has_nan(&self) -> bool {
        self.top.is_nan() || self.left.is_nan() || self.bottom.is_nan() || self.right.is_nan()
    }
}

static_assertions::assert_impl_all!(Size: Copy, Send, Sync);
static_assertions::assert_impl_all!(EdgeInsets: Copy, Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_nan() {
        assert!(!Size::new(10.0, 20.0).has_nan());
        assert!(Size::new(f64::NAN, 20.0).has_nan());
        assert!(Size::new(10.0, f64::NAN).has_nan());
        // Infinity is a valid (if unusual) dimension
        assert!(!Size::new(f64::INFINITY, 1.0).has_nan());
    }

    #[test]
    fn test_size_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10.0, 0.0).is_empty());
        assert!(!Size::from((1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_insets() {
        let insets = EdgeInsets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets.horizontal(), 6.0);
        assert_eq!(insets.vertical(), 4.0);
        assert!(!insets.has_nan());
        assert!(EdgeInsets::new(0.0, f64::NAN, 0.0, 0.0).has_nan());
        assert_eq!(EdgeInsets::ZERO, EdgeInsets::uniform(0.0));
    }

    #[test]
    fn test_rect_translate() {
        let rect = Rect::new(1.0, 2.0, 10.0, 20.0).translate(5.0, -2.0);
        assert_eq!(rect.origin, Point::new(6.0, 0.0));
        assert_eq!(rect.width(), 10.0);
        assert_eq!(rect.height(), 20.0);
    }
}
