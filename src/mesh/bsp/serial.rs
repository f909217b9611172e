//! Serial implementation of BSP operations
//!
//! Every walk uses an explicit work stack, so native stack usage stays flat
//! however unbalanced the tree gets (the first polygon of each partition
//! always becomes the splitting plane; there is no balancing heuristic).

use crate::mesh::bsp::node::{BspTree, NodeId, Side};
use crate::mesh::polygon::Polygon;
use log::trace;

impl<S: Clone> BspTree<S> {
    /// Insert polygons into the tree.
    ///
    /// A node without a valid plane adopts the plane of the first polygon it
    /// receives. Coplanar polygons stay in the node; the rest are pushed down
    /// into front/back children, which are created on demand.
    pub fn build(&mut self, polygons: &[Polygon<S>]) {
        let epsilon = self.epsilon;
        let mut stack: Vec<(NodeId, Vec<Polygon<S>>)> = vec![(self.root(), polygons.to_vec())];

        while let Some((id, polygons)) = stack.pop() {
            let Some(first) = polygons.first() else {
                continue;
            };

            let node = &mut self.nodes[id.0];
            let plane = match node.valid_plane().copied() {
                Some(plane) => plane,
                None => {
                    if !first.plane.is_valid() {
                        trace!("node {} adopts a degenerate plane", id.0);
                    }
                    node.plane = Some(first.plane);
                    first.plane
                },
            };

            let mut front = Vec::with_capacity(polygons.len() / 2);
            let mut back = Vec::with_capacity(polygons.len() / 2);

            for polygon in &polygons {
                let (coplanar_front, coplanar_back, front_parts, back_parts) =
                    plane.split_polygon(polygon, epsilon);

                node.polygons.extend(coplanar_front);
                node.polygons.extend(coplanar_back);
                front.extend(front_parts);
                back.extend(back_parts);
            }

            if !front.is_empty() {
                let child = self.child_or_insert(id, Side::Front);
                stack.push((child, front));
            }
            if !back.is_empty() {
                let child = self.child_or_insert(id, Side::Back);
                stack.push((child, back));
            }
        }
    }

    /// Recursively remove all polygons that are inside this BSP tree.
    ///
    /// Polygons reaching a node without a valid plane pass through untouched.
    /// Polygons that end up behind a node with no back child are inside solid
    /// space and are discarded. Output order is front subtree then back subtree.
    pub fn clip_polygons(&self, polygons: &[Polygon<S>]) -> Vec<Polygon<S>> {
        let mut result = Vec::with_capacity(polygons.len());
        // Everything still on the stack belongs after what is already in
        // `result`, so back tasks are pushed before front tasks.
        let mut stack: Vec<(NodeId, Vec<Polygon<S>>)> = vec![(self.root(), polygons.to_vec())];

        while let Some((id, polygons)) = stack.pop() {
            if polygons.is_empty() {
                continue;
            }

            let node = &self.nodes[id.0];
            let Some(plane) = node.valid_plane() else {
                result.extend(polygons);
                continue;
            };

            let mut front_polys = Vec::with_capacity(polygons.len());
            let mut back_polys = Vec::with_capacity(polygons.len());

            for polygon in &polygons {
                let (coplanar_front, coplanar_back, front_parts, back_parts) =
                    plane.split_polygon(polygon, self.epsilon);

                front_polys.extend(coplanar_front);
                back_polys.extend(coplanar_back);
                front_polys.extend(front_parts);
                back_polys.extend(back_parts);
            }

            if let Some(back) = node.back {
                stack.push((back, back_polys));
            }

            match node.front {
                Some(front) => stack.push((front, front_polys)),
                None => result.extend(front_polys),
            }
        }

        result
    }

    /// Remove all polygons in this BSP tree that are inside the other BSP tree
    pub fn clip_to(&mut self, other: &BspTree<S>) {
        for node in &mut self.nodes {
            if !node.polygons.is_empty() {
                node.polygons = other.clip_polygons(&node.polygons);
            }
        }
    }

    /// Convert solid space to empty space and empty space to solid space.
    pub fn invert(&mut self) {
        for node in &mut self.nodes {
            node.polygons.iter_mut().for_each(|p| p.flip());
            if let Some(ref mut plane) = node.plane {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);
        }
    }

    /// Return all polygons in this BSP tree: a node's own polygons, then its
    /// front subtree, then its back subtree.
    pub fn all_polygons(&self) -> Vec<Polygon<S>> {
        let mut result = Vec::with_capacity(self.polygon_count());
        let mut stack = vec![self.root()];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            result.extend_from_slice(&node.polygons);
            stack.extend(node.back);
            stack.extend(node.front);
        }
        result
    }
}
