//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Nodes live in a flat arena and refer to each other by index. Leaves hold
//! the index of one primitive in the scene's primitive list, so the tree
//! never owns geometry and can be shared read-only across render threads.

use crate::rng::XoshiroRng;
use crate::{HitRecord, Hittable, Primitive, Ray};
use lumen_math::{Aabb, Axis, Interval};
use std::cmp::Ordering;

/// Index of a node in [`Bvh::nodes`].
pub type NodeId = usize;

/// BVH node - either a branch with two children or a leaf with one primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BvhNode {
    /// Internal node; `bbox` is the union of both children's boxes.
    Branch {
        left: NodeId,
        right: NodeId,
        bbox: Aabb,
    },
    /// Leaf wrapping a single primitive.
    Leaf { primitive: usize, bbox: Aabb },
}

impl BvhNode {
    #[inline]
    pub fn bbox(&self) -> Aabb {
        match self {
            BvhNode::Branch { bbox, .. } | BvhNode::Leaf { bbox, .. } => *bbox,
        }
    }
}

/// Binary tree over a primitive list, built once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    root: Option<NodeId>,
}

impl Bvh {
    /// Build a BVH over every primitive in `primitives`.
    ///
    /// Each subtree splits on an axis drawn from `rng`; randomising the axis
    /// keeps trees balanced in expectation without a surface area heuristic.
    /// An empty list yields an empty tree that never reports a hit.
    pub fn build(primitives: &[Primitive], rng: &mut XoshiroRng) -> Self {
        let mut bvh = Bvh {
            nodes: Vec::with_capacity(primitives.len().saturating_mul(2)),
            root: None,
        };
        if primitives.is_empty() {
            return bvh;
        }

        let mut indices: Vec<usize> = (0..primitives.len()).collect();
        let root = bvh.build_range(primitives, &mut indices, rng);
        bvh.root = Some(root);

        log::debug!(
            "BVH built: {} primitives, {} nodes, depth {}",
            primitives.len(),
            bvh.nodes.len(),
            bvh.depth()
        );
        bvh
    }

    /// Recursive construction over a non-empty slice of primitive indices.
    fn build_range(
        &mut self,
        primitives: &[Primitive],
        indices: &mut [usize],
        rng: &mut XoshiroRng,
    ) -> NodeId {
        let axis = Axis::from_index(rng.gen_i32(0, 2) as usize);
        let by_axis = |a: &usize, b: &usize| box_compare(&primitives[*a], &primitives[*b], axis);

        match indices.len() {
            0 => unreachable!("BVH range must not be empty"),
            1 => self.push_leaf(primitives, indices[0]),
            2 => {
                let (first, second) = match by_axis(&indices[0], &indices[1]) {
                    Ordering::Greater => (indices[1], indices[0]),
                    _ => (indices[0], indices[1]),
                };
                let left = self.push_leaf(primitives, first);
                let right = self.push_leaf(primitives, second);
                self.push_branch(left, right)
            }
            n => {
                indices.sort_unstable_by(by_axis);
                let (lower, upper) = indices.split_at_mut(n / 2);
                let left = self.build_range(primitives, lower, rng);
                let right = self.build_range(primitives, upper, rng);
                self.push_branch(left, right)
            }
        }
    }

    fn push_leaf(&mut self, primitives: &[Primitive], primitive: usize) -> NodeId {
        self.nodes.push(BvhNode::Leaf {
            primitive,
            bbox: primitives[primitive].bounding_box(),
        });
        self.nodes.len() - 1
    }

    fn push_branch(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let bbox = Aabb::surrounding(&self.nodes[left].bbox(), &self.nodes[right].bbox());
        self.nodes.push(BvhNode::Branch { left, right, bbox });
        self.nodes.len() - 1
    }

    /// Nearest hit among `primitives` (the same list the tree was built over).
    ///
    /// `rec` is overwritten by every closer hit; the right subtree is only
    /// searched up to the left subtree's hit distance.
    pub fn hit(
        &self,
        primitives: &[Primitive],
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord,
    ) -> bool {
        match self.root {
            Some(root) => self.hit_node(root, primitives, ray, ray_t, rec),
            None => false,
        }
    }

    fn hit_node(
        &self,
        node: NodeId,
        primitives: &[Primitive],
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord,
    ) -> bool {
        match self.nodes[node] {
            BvhNode::Leaf { primitive, .. } => primitives[primitive].hit(ray, ray_t, rec),
            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = self.hit_node(left, primitives, ray, ray_t, rec);

                // Only check right up to closest hit
                let right_t = if hit_left { ray_t.with_max(rec.t) } else { ray_t };
                let hit_right = self.hit_node(right, primitives, ray, right_t, rec);

                hit_left || hit_right
            }
        }
    }

    /// Box around everything in the tree, or [`Aabb::EMPTY`] for an empty tree.
    pub fn bounding_box(&self) -> Aabb {
        self.root
            .map(|root| self.nodes[root].bbox())
            .unwrap_or(Aabb::EMPTY)
    }

    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[BvhNode], node: NodeId) -> usize {
            match nodes[node] {
                BvhNode::Leaf { .. } => 1,
                BvhNode::Branch { left, right, .. } => 1 + walk(nodes, left).max(walk(nodes, right)),
            }
        }
        self.root.map(|root| walk(&self.nodes, root)).unwrap_or(0)
    }
}

fn box_compare(a: &Primitive, b: &Primitive, axis: Axis) -> Ordering {
    a.bounding_box()
        .axis_min(axis)
        .partial_cmp(&b.bounding_box().axis_min(axis))
        .unwrap_or(Ordering::Equal)
}
