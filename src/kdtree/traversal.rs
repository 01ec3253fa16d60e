//! Utilities to traverse the KDTree structure.

use std::fmt;

use crate::kdtree::KDTree;
use crate::r#type::{IndexableNum, Point};

/// The axis a node splits its children over.
///
/// Axes are never stored on nodes. They are derived from the depth of the node (x at even depths,
/// y at odd depths) and handed down through every recursive call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    X,
    Y,
}

impl Axis {
    /// The axis of a node at `depth` below the root.
    pub(crate) fn from_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            Axis::X
        } else {
            Axis::Y
        }
    }

    /// The axis used one level further down the tree.
    #[inline]
    pub(crate) fn next(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// The coordinate of `point` on this axis.
    #[inline]
    pub(crate) fn coord<N: IndexableNum>(self, point: &Point<N>) -> f64 {
        match self {
            Axis::X => point.x.as_f64(),
            Axis::Y => point.y.as_f64(),
        }
    }
}

/// A node in the KDTree.
///
/// This is a cheap handle onto one slot of the tree, and it cannot outlive the tree it borrows.
/// Two handles are equal only if they refer to the same slot of the same tree; nodes holding
/// equal points are still distinct.
#[derive(Clone, Copy)]
pub struct Node<'a, N: IndexableNum> {
    /// The tree that this node is a reference onto
    pub(crate) tree: &'a KDTree<N>,
    /// Arena slot
    pub(crate) index: u32,
}

impl<'a, N: IndexableNum> Node<'a, N> {
    #[inline]
    pub(crate) fn new(tree: &'a KDTree<N>, index: u32) -> Self {
        Self { tree, index }
    }

    /// The point stored in this node.
    #[inline]
    pub fn point(&self) -> Point<N> {
        self.tree.data(self.index).point
    }

    /// The insertion index of this node's point, i.e. the order in which it was added to the
    /// builder.
    #[inline]
    pub fn item(&self) -> u32 {
        self.tree.data(self.index).item
    }

    /// The child node holding points on the low side of this node's split.
    pub fn left(&self) -> Option<Node<'a, N>> {
        self.tree
            .data(self.index)
            .left
            .map(|index| Node::new(self.tree, index))
    }

    /// The child node holding points on the high side of this node's split.
    pub fn right(&self) -> Option<Node<'a, N>> {
        self.tree
            .data(self.index)
            .right
            .map(|index| Node::new(self.tree, index))
    }

    /// Returns `true` if this node has a left child.
    #[inline]
    pub fn has_left(&self) -> bool {
        self.tree.data(self.index).left.is_some()
    }

    /// Returns `true` if this node has a right child.
    #[inline]
    pub fn has_right(&self) -> bool {
        self.tree.data(self.index).right.is_some()
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        !self.has_left() && !self.has_right()
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }

    /// Euclidean distance between the points of two nodes.
    #[inline]
    pub fn distance(&self, other: &Node<'_, N>) -> f64 {
        self.point().distance(&other.point())
    }

    /// Euclidean distance from this node's point to `point`.
    #[inline]
    pub fn distance_to(&self, point: &Point<N>) -> f64 {
        self.point().distance(point)
    }

    /// Of the two candidates `a` and `b`, the one closer to this node.
    ///
    /// `b` is returned only if it is strictly closer; on a tie `a` wins.
    pub fn closer(&self, a: Node<'a, N>, b: Node<'a, N>) -> Node<'a, N> {
        if self.distance(&b) < self.distance(&a) {
            b
        } else {
            a
        }
    }

    #[inline]
    pub(crate) fn belongs_to(&self, tree: &KDTree<N>) -> bool {
        std::ptr::eq(self.tree, tree)
    }
}

impl<N: IndexableNum> PartialEq for Node<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl<N: IndexableNum> Eq for Node<'_, N> {}

impl<N: IndexableNum> fmt::Debug for Node<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("item", &self.item())
            .field("point", &self.point())
            .finish()
    }
}
