//! BSP tree node storage

use crate::float_types::{Real, tolerance};
use crate::mesh::plane::Plane;
use crate::mesh::polygon::Polygon;

/// Index of a [`Node`] inside the arena of its [`BspTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Which child slot of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Front,
    Back,
}

/// A BSP tree node, containing polygons plus optional front/back subtrees
#[derive(Debug, Clone)]
pub struct Node<S: Clone> {
    /// Splitting plane for this node *or* **None** before the first build.
    /// Once set from a valid polygon plane it is never recomputed.
    pub plane: Option<Plane>,

    /// Subtree of the *front* half-space.
    pub front: Option<NodeId>,

    /// Subtree of the *back* half-space.
    pub back: Option<NodeId>,

    /// Polygons that lie on `plane` (either orientation).
    pub polygons: Vec<Polygon<S>>,
}

impl<S: Clone> Default for Node<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone> Node<S> {
    /// Create a new empty BSP node
    pub const fn new() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    /// The plane if it can split space
    pub fn valid_plane(&self) -> Option<&Plane> {
        self.plane.as_ref().filter(|plane| plane.is_valid())
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Front => &mut self.front,
            Side::Back => &mut self.back,
        }
    }
}

/// A BSP tree whose nodes live in one arena owned by the tree.
///
/// Children are referenced by [`NodeId`], so `clone()` is a deep copy and two
/// trees never share mutable state. The root is always the first node.
/// The tree also carries the classification tolerance used by every split
/// performed through it.
#[derive(Debug, Clone)]
pub struct BspTree<S: Clone> {
    pub(crate) nodes: Vec<Node<S>>,
    pub(crate) epsilon: Real,
}

impl<S: Clone> Default for BspTree<S> {
    fn default() -> Self {
        Self::new(tolerance())
    }
}

impl<S: Clone> BspTree<S> {
    /// An empty tree: a single root node without a plane
    pub fn new(epsilon: Real) -> Self {
        Self {
            nodes: vec![Node::new()],
            epsilon,
        }
    }

    /// Creates a new BSP tree from polygons
    pub fn from_polygons(polygons: &[Polygon<S>], epsilon: Real) -> Self {
        let mut tree = Self::new(epsilon);
        tree.build(polygons);
        tree
    }

    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub const fn epsilon(&self) -> Real {
        self.epsilon
    }

    /// Look up a node; `None` if `id` belongs to another tree
    pub fn node(&self, id: NodeId) -> Option<&Node<S>> {
        self.nodes.get(id.0)
    }

    pub fn root_node(&self) -> &Node<S> {
        // The arena is created with its root and never shrinks.
        &self.nodes[0]
    }

    /// Number of nodes in the arena, all reachable from the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of polygons stored across all nodes
    pub fn polygon_count(&self) -> usize {
        self.nodes.iter().map(|node| node.polygons.len()).sum()
    }

    /// Length of the longest root-to-leaf path, counted in nodes
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root(), 1)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[id.0];
            stack.extend(
                node.front
                    .iter()
                    .chain(node.back.iter())
                    .map(|&child| (child, depth + 1)),
            );
        }
        deepest
    }

    /// Child in `side`, allocated empty if missing
    pub(crate) fn child_or_insert(&mut self, id: NodeId, side: Side) -> NodeId {
        if let Some(child) = *self.nodes[id.0].child_mut(side) {
            return child;
        }
        let child = NodeId(self.nodes.len());
        self.nodes.push(Node::new());
        *self.nodes[id.0].child_mut(side) = Some(child);
        child
    }
}
