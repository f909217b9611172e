//! Union, subtract and intersect composed from BSP primitives.
//!
//! Clipping removes the polygons of one solid that lie inside the other.
//! Inverting a tree swaps inside and outside, which lets the single clipping
//! primitive express all three set operations. Inputs are cloned first and
//! the result is a tree freshly rebuilt from the working tree's polygons.

use crate::mesh::bsp::node::BspTree;
use crate::traits::CSGOps;
use log::debug;

/// Return a new tree representing the union of two solids.
///
/// ```text
/// let c = union(&a, &b);
///     +-------+            +-------+
///     |       |            |       |
///     |   a   |            |   c   |
///     |    +--+----+   =   |       +----+
///     +----+--+    |       +----+       |
///          |   b   |            |   c   |
///          |       |            |       |
///          +-------+            +-------+
/// ```
pub fn union<S: Clone>(a: &BspTree<S>, b: &BspTree<S>) -> BspTree<S> {
    let mut a = a.clone();
    let mut b = b.clone();

    a.clip_to(&b);
    b.clip_to(&a);
    b.invert();
    b.clip_to(&a);
    b.invert();
    a.build(&b.all_polygons());

    rebuild("union", &a)
}

/// Return a new tree representing `a` with the space of `b` removed.
///
/// ```text
/// let c = subtract(&a, &b);
///     +-------+            +-------+
///     |       |            |       |
///     |   a   |            |   c   |
///     |    +--+----+   =   |    +--+
///     +----+--+    |       +----+
///          |   b   |
///          |       |
///          +-------+
/// ```
pub fn subtract<S: Clone>(a: &BspTree<S>, b: &BspTree<S>) -> BspTree<S> {
    let mut a = a.clone();
    let mut b = b.clone();

    a.invert();
    a.clip_to(&b);
    b.clip_to(&a);
    b.invert();
    b.clip_to(&a);
    b.invert();
    a.build(&b.all_polygons());
    a.invert();

    rebuild("subtract", &a)
}

/// Return a new tree representing the space shared by both solids.
///
/// ```text
/// let c = intersect(&a, &b);
///     +-------+
///     |       |
///     |   a   |
///     |    +--+----+   =   +--+
///     +----+--+    |       +--+
///          |   b   |
///          |       |
///          +-------+
/// ```
pub fn intersect<S: Clone>(a: &BspTree<S>, b: &BspTree<S>) -> BspTree<S> {
    let mut a = a.clone();
    let mut b = b.clone();

    a.invert();
    b.clip_to(&a);
    b.invert();
    a.clip_to(&b);
    b.clip_to(&a);
    a.build(&b.all_polygons());
    a.invert();

    rebuild("intersect", &a)
}

fn rebuild<S: Clone>(operation: &str, working: &BspTree<S>) -> BspTree<S> {
    let result = BspTree::from_polygons(&working.all_polygons(), working.epsilon());
    debug!(
        "{operation}: {} polygons, {} nodes, depth {}",
        result.polygon_count(),
        result.node_count(),
        result.depth()
    );
    result
}

impl<S: Clone> CSGOps for BspTree<S> {
    fn union(&self, other: &Self) -> Self {
        union(self, other)
    }

    fn difference(&self, other: &Self) -> Self {
        subtract(self, other)
    }

    fn intersection(&self, other: &Self) -> Self {
        intersect(self, other)
    }
}
