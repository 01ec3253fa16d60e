use std::cmp::Ordering;

use geo_traits::CoordTrait;
use tracing::debug;

use crate::error::{KdIndexError, Result};
use crate::kdtree::index::NodeData;
use crate::kdtree::{Axis, KDTree};
use crate::r#type::{IndexableNum, Point};

/// A builder to create a [`KDTree`].
///
/// ```
/// use kd_index::kdtree::KDTreeBuilder;
///
/// let mut builder = KDTreeBuilder::<f64>::new(3);
/// builder.add(0., 0.);
/// builder.add(1., 1.);
/// builder.add(2., 2.);
/// let tree = builder.finish().unwrap();
/// assert_eq!(tree.num_items(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<N: IndexableNum> {
    /// Points paired with their insertion index
    items: Vec<(u32, Point<N>)>,
    num_items: usize,
}

impl<N: IndexableNum> KDTreeBuilder<N> {
    /// Create a new builder with the provided number of items.
    ///
    /// Panics if `num_items` exceeds `u32::MAX`. [`KDTree::try_new`] reports that case as an
    /// error instead.
    pub fn new(num_items: usize) -> Self {
        assert!(num_items <= u32::MAX as usize);

        Self {
            items: Vec::with_capacity(num_items),
            num_items,
        }
    }

    /// Add a point to the index, returning its insertion index.
    #[inline]
    pub fn add(&mut self, x: N, y: N) -> u32 {
        let index = self.items.len() as u32;
        self.items.push((index, Point::new(x, y)));
        index
    }

    /// Add a coordinate to the index, returning its insertion index.
    #[inline]
    pub fn add_point(&mut self, coord: &impl CoordTrait<T = N>) -> u32 {
        self.add(coord.x(), coord.y())
    }

    /// Add interleaved coordinates `[x0, y0, x1, y1, ...]` to the index.
    ///
    /// A trailing unpaired value is ignored.
    pub fn add_interleaved(&mut self, coords: &[N]) {
        for xy in coords.chunks_exact(2) {
            self.add(xy[0], xy[1]);
        }
    }

    /// Consume this builder, partitioning the points into a balanced tree ready for queries.
    pub fn finish(mut self) -> Result<KDTree<N>> {
        if self.items.len() != self.num_items {
            return Err(KdIndexError::ItemCountMismatch {
                expected: self.num_items,
                added: self.items.len(),
            });
        }
        if self.items.is_empty() {
            return Err(KdIndexError::EmptyInput);
        }
        if let Some((item, _)) = self.items.iter().find(|(_, point)| point.has_nan()) {
            return Err(KdIndexError::NaNCoordinate { item: *item });
        }

        let mut nodes = Vec::with_capacity(self.items.len());
        build(&mut nodes, &mut self.items, Axis::from_depth(0));

        let tree = KDTree { nodes };
        debug!(
            num_items = tree.num_items(),
            height = tree.height(),
            "built KDTree"
        );
        Ok(tree)
    }
}

/// Check that `num_items` points fit the `u32` slots and insertion indices of a tree.
pub(crate) fn check_num_items(num_items: usize) -> Result<()> {
    if num_items > u32::MAX as usize {
        return Err(KdIndexError::TooManyItems(num_items));
    }
    Ok(())
}

/// Recursively place the median of `items` on `axis` into `nodes`, then build its left half and
/// right half on the other axis. Returns the arena slot of the new node.
///
/// Nodes are appended in pre-order, so the first call places the root at slot 0.
fn build<N: IndexableNum>(
    nodes: &mut Vec<NodeData<N>>,
    items: &mut [(u32, Point<N>)],
    axis: Axis,
) -> u32 {
    // lower middle for even lengths
    let m = items.len() >> 1;

    // Partition around the middle index so that the halves lie either left/right or
    // bottom/top correspondingly. Ties on the coordinate fall back to insertion order, which
    // picks the same median a stable sort would.
    if items.len() > 1 {
        items.select_nth_unstable_by(m, |a, b| compare_items(a, b, axis));
    }

    let (item, point) = items[m];
    let slot = nodes.len() as u32;
    nodes.push(NodeData {
        point,
        item,
        left: None,
        right: None,
    });

    let (left_items, rest) = items.split_at_mut(m);
    let right_items = &mut rest[1..];

    if !left_items.is_empty() {
        let left = build(nodes, left_items, axis.next());
        nodes[slot as usize].left = Some(left);
    }
    if !right_items.is_empty() {
        let right = build(nodes, right_items, axis.next());
        nodes[slot as usize].right = Some(right);
    }

    slot
}

#[inline]
fn compare_items<N: IndexableNum>(
    a: &(u32, Point<N>),
    b: &(u32, Point<N>),
    axis: Axis,
) -> Ordering {
    axis.coord(&a.1)
        .total_cmp(&axis.coord(&b.1))
        .then(a.0.cmp(&b.0))
}
