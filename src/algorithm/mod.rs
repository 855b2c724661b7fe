use crate::bounds::BoundingBox;
use crate::error::Result;
use crate::point::Point;

pub mod kdtree;
pub mod point_set;

/// Trait defining a dynamic set of points in the plane with spatial queries.
/// This allows swapping between the pruning `KdTree` and the linear-scan `PointSet`.
pub trait SpatialIndex: Send + Sync {
    /// Add a point. Returns `false` when an equal point is already stored,
    /// in which case nothing changes.
    fn insert(&mut self, point: Point) -> Result<bool>;

    /// Check whether an equal point is stored.
    fn contains(&self, point: Point) -> Result<bool>;

    /// All stored points inside `rect`, boundary inclusive, in no particular order.
    fn range(&self, rect: &BoundingBox) -> Result<Vec<Point>>;

    /// The stored point closest to `query`, or `None` if the index is empty.
    fn nearest(&self, query: Point) -> Result<Option<Point>>;

    /// Number of distinct stored points.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
