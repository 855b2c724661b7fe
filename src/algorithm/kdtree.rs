use crate::algorithm::SpatialIndex;
use crate::bounds::{BoundingBox, AXIS_X};
use crate::error::Result;
use crate::point::Point;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Sentinel for an absent child link.
const NIL: u32 = u32::MAX;

#[derive(Clone, Copy, Debug)]
struct KdNode {
    point: Point,
    // Intersection of the half-planes cut by all ancestors. The public region
    // is this cell clipped to the domain.
    cell: BoundingBox,
    left: u32, // NIL if absent
    right: u32,
}

/// Split axis for a node at `depth`: x on even levels, y on odd levels.
#[inline]
fn axis_at(depth: usize) -> usize {
    depth % 2
}

/// Tie-break shared by every traversal: strictly smaller on the split axis
/// goes left/bottom, anything else (including equal) goes right/top.
#[inline]
fn goes_lower(p: &Point, pivot: &Point, axis: usize) -> bool {
    p.coord(axis) < pivot.coord(axis)
}

/// A 2D k-d tree over a dynamic set of points.
///
/// Nodes live in an arena and are never moved or removed; each node index is
/// referenced by exactly one parent link, the root is always index 0. The
/// split axis is not stored, it follows from the depth of the node.
///
/// The tree does not rebalance: inserting points sorted along x produces a
/// chain and every operation degrades to linear time.
#[derive(Clone, Debug)]
pub struct KdTree {
    domain: BoundingBox,
    nodes: Vec<KdNode>,
}

struct Nearest {
    dist_sq: f64,
    index: u32,
}

impl KdTree {
    /// Creates an empty tree whose root region is the unit square.
    pub fn new() -> Self {
        KdTree {
            domain: BoundingBox::unit(),
            nodes: Vec::new(),
        }
    }

    /// Creates an empty tree whose root region is `domain`.
    ///
    /// The domain only seeds the region subdivision; points outside of it can
    /// still be inserted and queried.
    pub fn with_domain(domain: BoundingBox) -> Result<Self> {
        domain.validate()?;
        Ok(KdTree {
            domain,
            nodes: Vec::new(),
        })
    }

    /// Builds a tree by inserting `points` in order. Duplicates are skipped.
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut tree = KdTree::new();
        tree.extend_points(points)?;
        Ok(tree)
    }

    /// Inserts `points` in order and returns how many were new.
    ///
    /// Stops at the first invalid point; the points before it stay inserted.
    pub fn extend_points<I>(&mut self, points: I) -> Result<usize>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut added = 0;
        for p in points {
            if self.insert(p)? {
                added += 1;
            }
        }
        Ok(added)
    }

    pub fn domain(&self) -> &BoundingBox {
        &self.domain
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stored points in insertion order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.nodes.iter().map(|n| n.point)
    }

    /// Read-only view of the root node.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeRef { tree: self, index: 0, depth: 0 })
        }
    }

    /// Number of nodes on the longest root-to-leaf path, 0 when empty.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = Vec::new();
        if !self.nodes.is_empty() {
            stack.push((0u32, 1usize));
        }
        while let Some((idx, level)) = stack.pop() {
            height = height.max(level);
            let node = &self.nodes[idx as usize];
            for child in [node.left, node.right] {
                if child != NIL {
                    stack.push((child, level + 1));
                }
            }
        }
        height
    }

    /// Adds `point`. Returns `Ok(false)` without touching the tree when an
    /// equal point is already stored.
    pub fn insert(&mut self, point: Point) -> Result<bool> {
        if let Err(e) = point.validate() {
            debug!(error = %e, "rejected insert");
            return Err(e);
        }

        if self.nodes.is_empty() {
            self.nodes.push(KdNode {
                point,
                cell: BoundingBox::unbounded(),
                left: NIL,
                right: NIL,
            });
            trace!(x = point.x, y = point.y, depth = 0, "inserted root");
            return Ok(true);
        }

        let mut idx = 0usize;
        let mut depth = 0usize;
        loop {
            let node = self.nodes[idx];
            if node.point == point {
                trace!(x = point.x, y = point.y, "duplicate insert ignored");
                return Ok(false);
            }

            let axis = axis_at(depth);
            let lower = goes_lower(&point, &node.point, axis);
            let child = if lower { node.left } else { node.right };

            if child != NIL {
                idx = child as usize;
                depth += 1;
                continue;
            }

            let split = node.point.coord(axis);
            let cell = if lower {
                node.cell.lower_half(axis, split)
            } else {
                node.cell.upper_half(axis, split)
            };
            let new_idx = self.nodes.len() as u32;
            self.nodes.push(KdNode { point, cell, left: NIL, right: NIL });

            let parent = &mut self.nodes[idx];
            if lower {
                parent.left = new_idx;
            } else {
                parent.right = new_idx;
            }
            trace!(x = point.x, y = point.y, depth = depth + 1, "inserted point");
            return Ok(true);
        }
    }

    /// Checks whether `point` is stored, following the same path as `insert`.
    pub fn contains(&self, point: Point) -> Result<bool> {
        if let Err(e) = point.validate() {
            debug!(error = %e, "rejected contains");
            return Err(e);
        }

        let mut idx = if self.nodes.is_empty() { NIL } else { 0 };
        let mut depth = 0usize;
        while idx != NIL {
            let node = &self.nodes[idx as usize];
            if node.point == point {
                return Ok(true);
            }
            idx = if goes_lower(&point, &node.point, axis_at(depth)) {
                node.left
            } else {
                node.right
            };
            depth += 1;
        }
        Ok(false)
    }

    /// All stored points inside `rect`, boundary inclusive.
    ///
    /// Subtrees whose region does not intersect `rect` are skipped.
    pub fn range(&self, rect: &BoundingBox) -> Result<Vec<Point>> {
        if let Err(e) = rect.validate() {
            debug!(error = %e, "rejected range");
            return Err(e);
        }
        Ok(self.range_unchecked(rect))
    }

    fn range_unchecked(&self, rect: &BoundingBox) -> Vec<Point> {
        let mut found = Vec::new();
        let mut stack = Vec::new();
        if !self.nodes.is_empty() {
            stack.push(0u32);
        }
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx as usize];
            if !node.cell.intersects(rect) {
                continue;
            }
            if rect.contains(&node.point) {
                found.push(node.point);
            }
            if node.right != NIL {
                stack.push(node.right);
            }
            if node.left != NIL {
                stack.push(node.left);
            }
        }
        found
    }

    /// The stored point closest to `query`, or `None` if the tree is empty.
    ///
    /// Among equidistant points the first one met in traversal order wins, so
    /// the answer is stable for a given insertion history.
    pub fn nearest(&self, query: Point) -> Result<Option<Point>> {
        if let Err(e) = query.validate() {
            debug!(error = %e, "rejected nearest");
            return Err(e);
        }
        Ok(self.nearest_unchecked(&query))
    }

    fn nearest_unchecked(&self, query: &Point) -> Option<Point> {
        if self.nodes.is_empty() {
            return None;
        }
        // Points may lie outside the domain, so the domain diagonal is not a
        // valid initial bound.
        let mut best = Nearest { dist_sq: f64::INFINITY, index: NIL };
        self.nearest_recursive(0, 0, query, &mut best);
        if best.index == NIL {
            None
        } else {
            Some(self.nodes[best.index as usize].point)
        }
    }

    fn nearest_recursive(&self, idx: u32, depth: usize, query: &Point, best: &mut Nearest) {
        if idx == NIL {
            return;
        }
        let node = &self.nodes[idx as usize];

        // Pruning: nothing in this region can beat the current best.
        if best.index != NIL && node.cell.distance_squared_to(query) >= best.dist_sq {
            return;
        }

        // The first node is always taken; squared distances may overflow to inf.
        let d2 = node.point.distance_squared_to(query);
        if best.index == NIL || d2 < best.dist_sq {
            best.dist_sq = d2;
            best.index = idx;
        }

        // Visit the side of the split containing the query first
        let (first, second) = if goes_lower(query, &node.point, axis_at(depth)) {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        self.nearest_recursive(first, depth + 1, query, best);
        self.nearest_recursive(second, depth + 1, query, best);
    }

    /// Answers many nearest-neighbour queries in parallel.
    ///
    /// All queries are validated before any search runs.
    pub fn nearest_batch(&self, queries: &[Point]) -> Result<Vec<Option<Point>>> {
        for q in queries {
            if let Err(e) = q.validate() {
                debug!(error = %e, "rejected nearest batch");
                return Err(e);
            }
        }
        debug!(queries = queries.len(), points = self.len(), "nearest batch");
        Ok(queries.par_iter().map(|q| self.nearest_unchecked(q)).collect())
    }

    /// Answers many range queries in parallel.
    pub fn range_batch(&self, rects: &[BoundingBox]) -> Result<Vec<Vec<Point>>> {
        for r in rects {
            if let Err(e) = r.validate() {
                debug!(error = %e, "rejected range batch");
                return Err(e);
            }
        }
        debug!(queries = rects.len(), points = self.len(), "range batch");
        Ok(rects.par_iter().map(|r| self.range_unchecked(r)).collect())
    }
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialIndex for KdTree {
    fn insert(&mut self, point: Point) -> Result<bool> {
        KdTree::insert(self, point)
    }

    fn contains(&self, point: Point) -> Result<bool> {
        KdTree::contains(self, point)
    }

    fn range(&self, rect: &BoundingBox) -> Result<Vec<Point>> {
        KdTree::range(self, rect)
    }

    fn nearest(&self, query: Point) -> Result<Option<Point>> {
        KdTree::nearest(self, query)
    }

    fn len(&self) -> usize {
        KdTree::len(self)
    }
}

/// Borrowed view of a node, carrying its depth so the split axis is known.
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a> {
    tree: &'a KdTree,
    index: u32,
    depth: usize,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a KdNode {
        &self.tree.nodes[self.index as usize]
    }

    fn child(&self, index: u32) -> Option<NodeRef<'a>> {
        if index == NIL {
            None
        } else {
            Some(NodeRef { tree: self.tree, index, depth: self.depth + 1 })
        }
    }

    pub fn point(&self) -> Point {
        self.node().point
    }

    /// The rectangle this node's subtree is confined to: the domain bisected
    /// at every ancestor. Empty for nodes placed outside the domain.
    pub fn region(&self) -> BoundingBox {
        self.node().cell.intersection(&self.tree.domain)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Split axis of this node (0 for x, 1 for y).
    pub fn axis(&self) -> usize {
        axis_at(self.depth)
    }

    pub fn left_bottom(&self) -> Option<NodeRef<'a>> {
        self.child(self.node().left)
    }

    pub fn right_top(&self) -> Option<NodeRef<'a>> {
        self.child(self.node().right)
    }

    /// Segment along which this node cuts its region: vertical through the
    /// point on x-levels, horizontal on y-levels.
    pub fn split_segment(&self) -> (Point, Point) {
        let p = self.point();
        let r = self.region();
        if self.axis() == AXIS_X {
            (Point::new(p.x, r.ymin()), Point::new(p.x, r.ymax()))
        } else {
            (Point::new(r.xmin(), p.y), Point::new(r.xmax(), p.y))
        }
    }
}
