use crate::error::{KdTreeError, Result};
use crate::point::Point;

/// Axis index of the x-coordinate.
pub const AXIS_X: usize = 0;
/// Axis index of the y-coordinate.
pub const AXIS_Y: usize = 1;

/// Axis-aligned rectangle in the plane, inclusive of its boundary.
///
/// Used both as a range query shape and as the region a k-d tree node's
/// subtree is confined to. Bounds may be infinite, which describes a
/// half-plane or the whole plane.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl BoundingBox {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    /// The unit square `[0, 1] x [0, 1]`.
    pub fn unit() -> Self {
        Self::new([0.0, 0.0], [1.0, 1.0])
    }

    /// The whole plane.
    pub fn unbounded() -> Self {
        Self::new([f64::NEG_INFINITY; 2], [f64::INFINITY; 2])
    }

    pub fn xmin(&self) -> f64 { self.min[AXIS_X] }
    pub fn ymin(&self) -> f64 { self.min[AXIS_Y] }
    pub fn xmax(&self) -> f64 { self.max[AXIS_X] }
    pub fn ymax(&self) -> f64 { self.max[AXIS_Y] }

    pub fn width(&self) -> f64 {
        self.max[AXIS_X] - self.min[AXIS_X]
    }

    pub fn height(&self) -> f64 {
        self.max[AXIS_Y] - self.min[AXIS_Y]
    }

    /// Rejects boxes with a NaN bound or with `min > max` on some axis.
    pub fn validate(&self) -> Result<()> {
        for axis in [AXIS_X, AXIS_Y] {
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if lo.is_nan() || hi.is_nan() || lo > hi {
                return Err(KdTreeError::InvalidRectangle { min: self.min, max: self.max });
            }
        }
        Ok(())
    }

    /// True when the box covers no point at all.
    pub fn is_empty(&self) -> bool {
        self.min[AXIS_X] > self.max[AXIS_X] || self.min[AXIS_Y] > self.max[AXIS_Y]
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min[AXIS_X]
            && p.x <= self.max[AXIS_X]
            && p.y >= self.min[AXIS_Y]
            && p.y <= self.max[AXIS_Y]
    }

    /// Boundary-inclusive overlap test, so boxes sharing only an edge intersect.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.max[AXIS_X] >= other.min[AXIS_X]
            && self.min[AXIS_X] <= other.max[AXIS_X]
            && self.max[AXIS_Y] >= other.min[AXIS_Y]
            && self.min[AXIS_Y] <= other.max[AXIS_Y]
    }

    /// Squared Euclidean distance from `p` to the closest point of the box.
    /// Zero when `p` lies inside or on the boundary.
    pub fn distance_squared_to(&self, p: &Point) -> f64 {
        let dx = (self.min[AXIS_X] - p.x).max(0.0).max(p.x - self.max[AXIS_X]);
        let dy = (self.min[AXIS_Y] - p.y).max(0.0).max(p.y - self.max[AXIS_Y]);
        dx * dx + dy * dy
    }

    /// Overlap of two boxes. The result is empty (see [`BoundingBox::is_empty`])
    /// when they do not intersect.
    pub fn intersection(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: [self.min[0].max(other.min[0]), self.min[1].max(other.min[1])],
            max: [self.max[0].min(other.max[0]), self.max[1].min(other.max[1])],
        }
    }

    /// Half of the box strictly below `value` on `axis` (left for x, bottom for y).
    pub fn lower_half(&self, axis: usize, value: f64) -> BoundingBox {
        let mut half = *self;
        half.max[axis] = value;
        half
    }

    /// Half of the box at or above `value` on `axis` (right for x, top for y).
    pub fn upper_half(&self, axis: usize, value: f64) -> BoundingBox {
        let mut half = *self;
        half.min[axis] = value;
        half
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::unit()
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}] x [{}, {}]", self.min[0], self.max[0], self.min[1], self.max[1])
    }
}
