use crate::algorithm::kdtree::{KdTree, NodeRef};
use crate::bounds::BoundingBox;
use crate::point::Point;
use crate::sampling::random_points;
use js_sys::Array;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

// --- Bounding Box ---

#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[wasm_bindgen]
impl BoundingBox2D {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox2D {
        BoundingBox2D { min_x, min_y, max_x, max_y }
    }
}

impl From<BoundingBox2D> for BoundingBox {
    fn from(b: BoundingBox2D) -> Self {
        Self { min: [b.min_x, b.min_y], max: [b.max_x, b.max_y] }
    }
}

/// Reads an `[x, y]` JavaScript array.
fn parse_js_point(val: &JsValue) -> Option<Point> {
    let arr = val.dyn_ref::<Array>()?;
    if arr.length() < 2 {
        return None;
    }
    Some(Point::new(arr.get(0).as_f64()?, arr.get(1).as_f64()?))
}

fn flatten(points: impl IntoIterator<Item = Point>) -> Vec<f64> {
    points.into_iter().flat_map(|p| [p.x, p.y]).collect()
}

// --- Tree ---

/// JavaScript handle to a [`KdTree`]. Point lists cross the boundary as flat
/// `[x0, y0, x1, y1, ...]` arrays.
#[wasm_bindgen(js_name = KdTree2D)]
pub struct KdTree2D {
    inner: KdTree,
}

#[wasm_bindgen(js_class = KdTree2D)]
impl KdTree2D {
    #[wasm_bindgen(constructor)]
    pub fn new() -> KdTree2D {
        KdTree2D { inner: KdTree::new() }
    }

    #[wasm_bindgen(js_name = withDomain)]
    pub fn with_domain(domain: BoundingBox2D) -> Result<KdTree2D, JsError> {
        Ok(KdTree2D { inner: KdTree::with_domain(domain.into())? })
    }

    pub fn insert(&mut self, x: f64, y: f64) -> Result<bool, JsError> {
        Ok(self.inner.insert(Point::new(x, y))?)
    }

    /// Inserts an `[x, y]` array.
    #[wasm_bindgen(js_name = insertPoint)]
    pub fn insert_point(&mut self, point: JsValue) -> Result<bool, JsError> {
        let p = parse_js_point(&point).ok_or_else(|| JsError::new("expected an [x, y] array"))?;
        Ok(self.inner.insert(p)?)
    }

    /// Inserts a flat coordinate array and returns how many points were new.
    pub fn extend(&mut self, coords: &[f64]) -> Result<usize, JsError> {
        if coords.len() % 2 != 0 {
            return Err(JsError::new("coordinate array length must be even"));
        }
        Ok(self.inner.extend_points(coords.chunks(2).map(|c| Point::new(c[0], c[1])))?)
    }

    /// Inserts `count` distinct random points drawn from the tree's domain.
    pub fn random_points(&mut self, count: usize) -> Result<usize, JsError> {
        let mut rng = rand::thread_rng();
        let points = random_points(&mut rng, count, self.inner.domain())?;
        Ok(self.inner.extend_points(points)?)
    }

    pub fn contains(&self, x: f64, y: f64) -> Result<bool, JsError> {
        Ok(self.inner.contains(Point::new(x, y))?)
    }

    pub fn range(&self, rect: BoundingBox2D) -> Result<Vec<f64>, JsError> {
        Ok(flatten(self.inner.range(&rect.into())?))
    }

    /// Nearest stored point as `[x, y]`, or `undefined` when the tree is empty.
    pub fn nearest(&self, x: f64, y: f64) -> Result<JsValue, JsError> {
        Ok(match self.inner.nearest(Point::new(x, y))? {
            Some(p) => Array::of2(&p.x.into(), &p.y.into()).into(),
            None => JsValue::UNDEFINED,
        })
    }

    /// Nearest stored point for every query in a flat coordinate array.
    /// Each answer is an `[x, y]` array, or `null` when the tree is empty.
    #[wasm_bindgen(js_name = nearestBatch)]
    pub fn nearest_batch(&self, coords: &[f64]) -> Result<Array, JsError> {
        if coords.len() % 2 != 0 {
            return Err(JsError::new("coordinate array length must be even"));
        }
        let queries: Vec<Point> = coords.chunks(2).map(|c| Point::new(c[0], c[1])).collect();
        let answers = self.inner.nearest_batch(&queries)?;
        Ok(answers
            .into_iter()
            .map(|a| match a {
                Some(p) => Array::of2(&p.x.into(), &p.y.into()).into(),
                None => JsValue::NULL,
            })
            .collect())
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize { self.inner.len() }
    #[wasm_bindgen(getter, js_name = isEmpty)]
    pub fn is_empty(&self) -> bool { self.inner.is_empty() }
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize { self.inner.height() }
    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Vec<f64> { flatten(self.inner.points()) }

    /// Split segments of all nodes as `[x0, y0, x1, y1, axis, ...]`, for drawing the partition.
    pub fn splits(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.inner.len() * 5);
        let mut stack: Vec<NodeRef<'_>> = self.inner.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            let (a, b) = node.split_segment();
            out.extend_from_slice(&[a.x, a.y, b.x, b.y, node.axis() as f64]);
            stack.extend(node.left_bottom());
            stack.extend(node.right_top());
        }
        out
    }
}

impl Default for KdTree2D {
    fn default() -> Self {
        Self::new()
    }
}
