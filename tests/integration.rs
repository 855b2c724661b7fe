use kdplane::{BoundingBox, KdTree, KdTreeError, Point};

fn three_points() -> KdTree {
    let mut tree = KdTree::new();
    tree.insert(Point::new(0.5, 0.5)).unwrap();
    tree.insert(Point::new(0.25, 0.75)).unwrap();
    tree.insert(Point::new(0.75, 0.25)).unwrap();
    tree
}

#[test]
fn test_insert_builds_alternating_regions() {
    let tree = three_points();
    assert_eq!(tree.len(), 3);
    assert!(!tree.is_empty());

    let root = tree.root().expect("Should have a root");
    assert_eq!(root.point(), Point::new(0.5, 0.5));
    assert_eq!(root.region(), BoundingBox::new([0.0, 0.0], [1.0, 1.0]));

    let lb = root.left_bottom().expect("Should have a left/bottom child");
    assert_eq!(lb.point(), Point::new(0.25, 0.75));
    assert_eq!(lb.region(), BoundingBox::new([0.0, 0.0], [0.5, 1.0]));

    let rt = root.right_top().expect("Should have a right/top child");
    assert_eq!(rt.point(), Point::new(0.75, 0.25));
    assert_eq!(rt.region(), BoundingBox::new([0.5, 0.0], [1.0, 1.0]));
}

#[test]
fn test_range_workflow() {
    let tree = three_points();
    let found = tree.range(&BoundingBox::new([0.1, 0.1], [0.6, 0.8])).unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.contains(&Point::new(0.5, 0.5)));
    assert!(found.contains(&Point::new(0.25, 0.75)));

    // Boundary points count as inside
    let edge = tree.range(&BoundingBox::new([0.75, 0.25], [0.75, 0.25])).unwrap();
    assert_eq!(edge, vec![Point::new(0.75, 0.25)]);
}

#[test]
fn test_nearest_workflow() {
    let tree = three_points();
    let q = Point::new(0.6, 0.6);
    let nearest = tree.nearest(q).unwrap().expect("Should find a point");
    assert_eq!(nearest, Point::new(0.5, 0.5));

    let d = nearest.distance_to(&q);
    assert!((d - 0.141421).abs() < 1e-5, "Expected distance ~0.1414, got {}", d);
    assert!((Point::new(0.25, 0.75).distance_to(&q) - 0.380789).abs() < 1e-5);
    assert!((Point::new(0.75, 0.25).distance_to(&q) - 0.380789).abs() < 1e-5);
}

#[test]
fn test_duplicate_insert_keeps_size() {
    let mut tree = KdTree::new();
    tree.insert(Point::new(0.5, 0.5)).unwrap();
    tree.insert(Point::new(0.5, 0.5)).unwrap();
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_empty_tree_queries() {
    let tree = KdTree::default();
    for q in [Point::new(0.0, 0.0), Point::new(0.5, 0.5), Point::new(3.0, -2.0)] {
        assert_eq!(tree.nearest(q).unwrap(), None);
    }
    assert!(tree.range(&BoundingBox::unit()).unwrap().is_empty());
    assert!(tree.range(&BoundingBox::unbounded()).unwrap().is_empty());
}

#[test]
fn test_increasing_x_chain() {
    let points: Vec<Point> = (0..1000)
        .map(|i| Point::new((i as f64 + 0.5) / 1000.0, ((i * 7) % 1000) as f64 / 1000.0))
        .collect();
    let tree = KdTree::from_points(points.iter().copied()).unwrap();
    assert_eq!(tree.len(), 1000);

    for p in &points {
        assert!(tree.contains(*p).unwrap(), "Tree should contain {}", p);
    }

    // Every x-level sends the next point right; check the x-levels of the chain
    let mut node = tree.root();
    let mut visited = 0;
    while let Some(n) = node {
        if n.axis() == 0 {
            assert!(n.left_bottom().is_none(), "x-level node {} has a left child", n.point());
        }
        visited += 1;
        node = n.right_top().or(n.left_bottom());
    }
    assert!(visited > 1);

    for i in 0..50 {
        let q = Point::new(i as f64 / 50.0, 0.5);
        let got = tree.nearest(q).unwrap().unwrap();
        let best = points
            .iter()
            .map(|p| p.distance_squared_to(&q))
            .fold(f64::INFINITY, f64::min);
        assert_eq!(got.distance_squared_to(&q), best);
    }
}

#[test]
fn test_invalid_arguments_rejected() {
    let mut tree = three_points();

    let err = tree.insert(Point::new(f64::NAN, 0.5)).unwrap_err();
    assert!(matches!(err, KdTreeError::InvalidPoint { .. }));

    let err = tree.range(&BoundingBox::new([0.6, 0.1], [0.1, 0.8])).unwrap_err();
    assert!(matches!(err, KdTreeError::InvalidRectangle { .. }));

    assert!(tree.nearest(Point::new(0.0, f64::NEG_INFINITY)).is_err());
    assert!(tree.contains(Point::new(f64::NAN, f64::NAN)).is_err());

    // Nothing changed
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.height(), 2);
}

#[test]
fn test_error_messages() {
    let err = KdTreeError::InvalidPoint { x: f64::NAN, y: 1.0 };
    assert!(err.to_string().contains("finite"));
    let err = KdTreeError::InvalidRectangle { min: [1.0, 0.0], max: [0.0, 1.0] };
    assert!(err.to_string().contains("rectangle"));
}
