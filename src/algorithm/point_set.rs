use crate::algorithm::SpatialIndex;
use crate::bounds::BoundingBox;
use crate::error::Result;
use crate::point::Point;

/// Brute-force point set: every query scans all stored points.
///
/// Serves as the reference answer when checking `KdTree`.
#[derive(Clone, Debug, Default)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    pub fn new() -> Self {
        PointSet { points: Vec::new() }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl SpatialIndex for PointSet {
    fn insert(&mut self, point: Point) -> Result<bool> {
        point.validate()?;
        if self.points.contains(&point) {
            return Ok(false);
        }
        self.points.push(point);
        Ok(true)
    }

    fn contains(&self, point: Point) -> Result<bool> {
        point.validate()?;
        Ok(self.points.contains(&point))
    }

    fn range(&self, rect: &BoundingBox) -> Result<Vec<Point>> {
        rect.validate()?;
        Ok(self.points.iter().copied().filter(|p| rect.contains(p)).collect())
    }

    fn nearest(&self, query: Point) -> Result<Option<Point>> {
        query.validate()?;
        let mut best: Option<(f64, Point)> = None;
        for p in &self.points {
            let d2 = p.distance_squared_to(&query);
            if best.map_or(true, |(bd, _)| d2 < bd) {
                best = Some((d2, *p));
            }
        }
        Ok(best.map(|(_, p)| p))
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}
