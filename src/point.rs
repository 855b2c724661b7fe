use crate::error::{KdTreeError, Result};

/// An immutable point in the plane.
///
/// Equality is exact coordinate equality, there is no tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate on the given axis (0 for x, 1 for y).
    #[inline]
    pub fn coord(&self, axis: usize) -> f64 {
        if axis == 0 { self.x } else { self.y }
    }

    /// Rejects points with a NaN or infinite coordinate.
    pub fn validate(&self) -> Result<()> {
        if self.x.is_finite() && self.y.is_finite() {
            Ok(())
        } else {
            Err(KdTreeError::InvalidPoint { x: self.x, y: self.y })
        }
    }

    pub fn distance_squared_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        self.distance_squared_to(other).sqrt()
    }
}

impl From<[f64; 2]> for Point {
    fn from(c: [f64; 2]) -> Self {
        Point::new(c[0], c[1])
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_equality() {
        assert_eq!(Point::new(0.5, 0.5), Point::new(0.5, 0.5));
        assert_ne!(Point::new(0.5, 0.5), Point::new(0.5, 0.5 + f64::EPSILON));
    }

    #[test]
    fn test_distances() {
        let a = Point::new(0.6, 0.6);
        let b = Point::new(0.5, 0.5);
        assert!((a.distance_squared_to(&b) - 0.02).abs() < 1e-12);
        assert!((a.distance_to(&b) - 0.02f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        assert!(Point::new(0.0, 1.0).validate().is_ok());
        assert!(Point::new(-3.0, 12.5).validate().is_ok());
        assert!(Point::new(f64::NAN, 0.0).validate().is_err());
        assert!(Point::new(0.0, f64::INFINITY).validate().is_err());
    }
}
