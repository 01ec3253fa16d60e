use tinyvec::TinyVec;

use crate::error::{KdIndexError, Result};
use crate::kdtree::builder::check_num_items;
use crate::kdtree::{KDTreeBuilder, Node};
use crate::r#type::{IndexableNum, Point};

/// The stored record of one node in the tree arena.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeData<N: IndexableNum> {
    pub(crate) point: Point<N>,
    /// Insertion index of the point
    pub(crate) item: u32,
    pub(crate) left: Option<u32>,
    pub(crate) right: Option<u32>,
}

/// An immutable 2D K-D Tree.
///
/// Nodes are stored in a single arena in pre-order, so the root lives at slot 0 and each node
/// owns its children through their slot indices. The split axis of a node is not stored: it is
/// the x axis at even depths and the y axis at odd depths.
///
/// Usually this will be created from scratch via [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder]
/// or [`KDTree::try_new`].
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<N: IndexableNum> {
    pub(crate) nodes: Vec<NodeData<N>>,
}

impl<N: IndexableNum> KDTree<N> {
    /// Build a tree from a collection of points.
    ///
    /// Fails with [`KdIndexError::TooManyItems`] instead of panicking when there are more points
    /// than `u32` can index.
    ///
    /// ```
    /// use kd_index::kdtree::KDTree;
    ///
    /// let tree = KDTree::<i32>::try_new([(10, 10), (20, 20), (30, 30)]).unwrap();
    /// assert_eq!(tree.num_items(), 3);
    /// assert_eq!(tree.root().point().x, 20);
    /// ```
    pub fn try_new<P, I>(points: I) -> Result<Self>
    where
        P: Into<Point<N>>,
        I: IntoIterator<Item = P>,
    {
        let points: Vec<Point<N>> = points.into_iter().map(Into::into).collect();
        check_num_items(points.len())?;
        let mut builder = KDTreeBuilder::new(points.len());
        for point in points {
            builder.add_point(&point);
        }
        builder.finish()
    }

    /// Build a tree from interleaved coordinates `[x0, y0, x1, y1, ...]`.
    pub fn from_interleaved(coords: &[N]) -> Result<Self> {
        if coords.len() % 2 != 0 {
            return Err(KdIndexError::InterleavedLength(coords.len()));
        }
        check_num_items(coords.len() / 2)?;

        let mut builder = KDTreeBuilder::new(coords.len() / 2);
        builder.add_interleaved(coords);
        builder.finish()
    }

    /// The number of points in this tree.
    pub fn num_items(&self) -> u32 {
        self.nodes.len() as u32
    }

    /// The root node of the tree, at depth 0.
    pub fn root(&self) -> Node<'_, N> {
        Node::new(self, 0)
    }

    /// The number of levels of the tree. A tree holding a single point has height 1.
    pub fn height(&self) -> usize {
        // Use TinyVec to avoid heap allocations
        let mut stack: TinyVec<[(u32, usize); 32]> = TinyVec::new();
        stack.push((0, 1));

        let mut height = 0;
        while let Some((index, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[index as usize];
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
        }
        height
    }

    /// Iterate over every node of the tree in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = Node<'_, N>> + '_ {
        (0..self.nodes.len() as u32).map(move |index| Node::new(self, index))
    }

    #[inline]
    pub(crate) fn data(&self, index: u32) -> &NodeData<N> {
        &self.nodes[index as usize]
    }
}
