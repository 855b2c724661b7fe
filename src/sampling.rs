use crate::algorithm::kdtree::KdTree;
use crate::bounds::BoundingBox;
use crate::error::{KdTreeError, Result};
use crate::point::Point;
use rand::Rng;
use tracing::debug;

/// Consecutive duplicate draws after which sampling gives up.
const MAX_REDRAWS: usize = 10_000;

/// Generates up to `count` distinct points uniformly distributed in `domain`.
///
/// Duplicates drawn by the generator are rejected and redrawn. A domain that
/// collapses to a single point yields at most one point. A domain with only a
/// handful of representable coordinates yields fewer than `count` points once
/// `MAX_REDRAWS` draws in a row add nothing new.
pub fn random_points<R: Rng>(rng: &mut R, count: usize, domain: &BoundingBox) -> Result<Vec<Point>> {
    domain.validate()?;
    if !(domain.width().is_finite() && domain.height().is_finite()) {
        return Err(KdTreeError::InvalidRectangle { min: domain.min, max: domain.max });
    }

    let count = if domain.width() == 0.0 && domain.height() == 0.0 { count.min(1) } else { count };

    let mut seen = KdTree::with_domain(*domain)?;
    let mut points = Vec::with_capacity(count);
    let mut redraws = 0;
    while points.len() < count {
        let p = Point::new(
            rng.gen_range(domain.xmin()..=domain.xmax()),
            rng.gen_range(domain.ymin()..=domain.ymax()),
        );
        if seen.insert(p)? {
            points.push(p);
            redraws = 0;
        } else {
            redraws += 1;
            if redraws == MAX_REDRAWS {
                debug!(requested = count, produced = points.len(), %domain, "domain exhausted");
                break;
            }
        }
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_points_distinct_and_inside() {
        let mut rng = StdRng::seed_from_u64(7);
        let domain = BoundingBox::new([-2.0, 3.0], [5.0, 4.0]);
        let points = random_points(&mut rng, 500, &domain).unwrap();
        assert_eq!(points.len(), 500);
        for (i, p) in points.iter().enumerate() {
            assert!(domain.contains(p));
            assert!(!points[..i].contains(p));
        }
    }

    #[test]
    fn test_random_points_degenerate_domain() {
        let mut rng = StdRng::seed_from_u64(1);
        let domain = BoundingBox::new([0.5, 0.5], [0.5, 0.5]);
        let points = random_points(&mut rng, 10, &domain).unwrap();
        assert_eq!(points, vec![Point::new(0.5, 0.5)]);

        assert!(random_points(&mut rng, 10, &BoundingBox::unbounded()).is_err());
    }

    #[test]
    fn test_random_points_tiny_domain_terminates() {
        let mut rng = StdRng::seed_from_u64(3);
        // Only y = 0 and y = 5e-324 are representable.
        let domain = BoundingBox::new([0.0, 0.0], [0.0, 5e-324]);
        let points = random_points(&mut rng, 3, &domain).unwrap();
        assert!(!points.is_empty() && points.len() <= 2);
        for (i, p) in points.iter().enumerate() {
            assert!(domain.contains(p));
            assert!(!points[..i].contains(p));
        }
    }
}
