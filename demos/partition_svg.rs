use plotters::prelude::*;
use kdplane::sampling::random_points;
use kdplane::{BoundingBox, KdTree, NodeRef, Point};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let filename = "kdtree_partition.svg";
    let root = SVGBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)?;

    let mut rng = rand::thread_rng();
    let points = random_points(&mut rng, 200, &BoundingBox::unit())?;
    let tree = KdTree::from_points(points.iter().copied())?;
    tracing::info!(points = tree.len(), height = tree.height(), "built tree");

    // Draw bounding box
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)],
        BLACK.stroke_width(2),
    )))?;

    // Draw splits: red for x-levels, blue for y-levels
    let mut stack: Vec<NodeRef<'_>> = tree.root().into_iter().collect();
    while let Some(node) = stack.pop() {
        let (a, b) = node.split_segment();
        let color = if node.axis() == 0 { RED } else { BLUE };
        chart.draw_series(std::iter::once(PathElement::new(vec![(a.x, a.y), (b.x, b.y)], color.mix(0.7))))?;
        stack.extend(node.left_bottom());
        stack.extend(node.right_top());
    }

    // Draw points
    chart.draw_series(points.iter().map(|p| Circle::new((p.x, p.y), 3, BLACK.filled())))?;

    // Draw a nearest-neighbour query
    let query = Point::new(0.2142, 0.57986);
    if let Some(nearest) = tree.nearest(query)? {
        chart.draw_series(std::iter::once(Circle::new((query.x, query.y), 4, GREEN.filled())))?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(query.x, query.y), (nearest.x, nearest.y)],
            GREEN.stroke_width(2),
        )))?;
    }

    // Draw a range query
    let rect = BoundingBox::new([0.1, 0.2], [0.5, 0.7]);
    chart.draw_series(std::iter::once(Rectangle::new(
        [(rect.xmin(), rect.ymin()), (rect.xmax(), rect.ymax())],
        MAGENTA.mix(0.1).filled(),
    )))?;
    let inside = tree.range(&rect)?;
    chart.draw_series(inside.iter().map(|p| Circle::new((p.x, p.y), 3, MAGENTA.filled())))?;
    tracing::info!(count = inside.len(), rect = %rect, "range query");

    root.present()?;
    println!("Output saved to {}", filename);
    Ok(())
}
