#![cfg(feature = "serde")]

use kdplane::{BoundingBox, KdTree, Point};

#[test]
fn test_points_from_json() {
    let json = r#"[{"x":0.5,"y":0.5},{"x":0.25,"y":0.75},{"x":0.75,"y":0.25}]"#;
    let points: Vec<Point> = serde_json::from_str(json).expect("Failed to parse points");
    let tree = KdTree::from_points(points).unwrap();
    assert_eq!(tree.len(), 3);

    let rect: BoundingBox = serde_json::from_str(r#"{"min":[0.1,0.1],"max":[0.6,0.8]}"#).expect("Failed to parse rectangle");
    assert_eq!(tree.range(&rect).unwrap().len(), 2);
}

#[test]
fn test_region_to_json() {
    let tree = KdTree::from_points([Point::new(0.5, 0.5), Point::new(0.25, 0.75)]).unwrap();
    let region = tree.root().unwrap().left_bottom().unwrap().region();
    let value = serde_json::to_value(region).unwrap();
    assert_eq!(value, serde_json::json!({"min": [0.0, 0.0], "max": [0.5, 1.0]}));
}
