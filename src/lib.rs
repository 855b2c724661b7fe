//! # kdplane
//!
//! `kdplane` is a Rust library for 2D k-d trees, designed to be used in Rust
//! as well as compiled to WebAssembly (WASM). It manages a dynamic set of points
//! in the plane and answers membership, rectangular range and nearest-neighbour
//! queries by recursive bisection of a domain along alternating axes.
//!
//! ## Features
//!
//! - **Pruned queries**: Range queries skip subtrees whose region misses the rectangle,
//!   nearest-neighbour queries skip regions farther away than the best point found so far.
//! - **Dynamic insertion**: Points are inserted one at a time; duplicates are ignored.
//! - **Reference implementation**: [`PointSet`] answers the same queries by linear scan.
//! - **Parallel batches**: Many read-only queries can be answered at once with `rayon`.
//! - **WASM-ready**: Built with `wasm-bindgen` for use from JavaScript and TypeScript.
//!
//! ## Example
//!
//! ```
//! use kdplane::{BoundingBox, KdTree, Point};
//!
//! let mut tree = KdTree::new();
//! tree.insert(Point::new(0.5, 0.5))?;
//! tree.insert(Point::new(0.25, 0.75))?;
//! tree.insert(Point::new(0.75, 0.25))?;
//!
//! let inside = tree.range(&BoundingBox::new([0.1, 0.1], [0.6, 0.8]))?;
//! assert_eq!(inside.len(), 2);
//! assert_eq!(tree.nearest(Point::new(0.6, 0.6))?, Some(Point::new(0.5, 0.5)));
//! # Ok::<(), kdplane::KdTreeError>(())
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is the [`KdTree`] struct; both it and [`PointSet`]
//! implement the [`SpatialIndex`] trait.

mod algorithm;
mod bounds;
mod error;
mod point;
pub mod sampling;
pub mod wasm;

pub use algorithm::SpatialIndex;
pub use algorithm::kdtree::KdTree;
pub use algorithm::kdtree::NodeRef;
pub use algorithm::point_set::PointSet;
pub use bounds::BoundingBox;
pub use bounds::AXIS_X;
pub use bounds::AXIS_Y;
pub use error::KdTreeError;
pub use error::Result;
pub use point::Point;
