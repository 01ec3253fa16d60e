//! Recursive nearest, radius and k-nearest searches, run from any node of the tree.

use crate::kdtree::{Axis, Node};
use crate::r#type::{IndexableNum, Point};

/// A candidate result: a node and its distance to the query point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Neighbor<'a, N: IndexableNum> {
    pub(crate) node: Node<'a, N>,
    pub(crate) distance: f64,
}

/// The query point, plus an optional arena slot that must never be matched (a query node
/// searching for its own neighbors).
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchQuery<N: IndexableNum> {
    pub(crate) point: Point<N>,
    pub(crate) exclude: Option<u32>,
}

impl<N: IndexableNum> SearchQuery<N> {
    pub(crate) fn from_point(point: Point<N>) -> Self {
        Self {
            point,
            exclude: None,
        }
    }

    pub(crate) fn from_node(node: &Node<'_, N>) -> Self {
        Self {
            point: node.point(),
            exclude: Some(node.index),
        }
    }
}

impl<'a, N: IndexableNum> Node<'a, N> {
    /// This node as a result candidate, unless it is the excluded query node.
    #[inline]
    fn candidate(self, query: &SearchQuery<N>) -> Option<Neighbor<'a, N>> {
        if query.exclude == Some(self.index) {
            return None;
        }
        Some(Neighbor {
            node: self,
            distance: self.distance_to(&query.point),
        })
    }

    /// The child on the query's side of this node's split, the child on the other side, and the
    /// distance from the query to the splitting plane.
    #[inline]
    fn split(self, query: &Point<N>, axis: Axis) -> (Option<Self>, Option<Self>, f64) {
        let q = axis.coord(query);
        let s = axis.coord(&self.point());
        let plane_dist = (q - s).abs();
        if q <= s {
            (self.left(), self.right(), plane_dist)
        } else {
            (self.right(), self.left(), plane_dist)
        }
    }

    /// The closest node to the query in the subtree rooted at this node, which splits on `axis`.
    ///
    /// Returns `None` only if the subtree holds nothing but the excluded node.
    pub(crate) fn nearest_recurse(
        self,
        query: &SearchQuery<N>,
        axis: Axis,
    ) -> Option<Neighbor<'a, N>> {
        let own = self.candidate(query);
        if self.is_leaf() {
            return own;
        }

        let (near, far, plane_dist) = self.split(&query.point, axis);

        let near_best = near.and_then(|child| child.nearest_recurse(query, axis.next()));
        let mut best = closer_of(near_best, own);

        // The far side can only hold a closer point if the splitting plane itself is closer
        // than the best candidate so far.
        if let Some(far) = far {
            if best.map_or(true, |best| plane_dist < best.distance) {
                best = closer_of(best, far.nearest_recurse(query, axis.next()));
            }
        }

        best
    }

    /// Collect every node within `r` of the query into `results`, kept sorted by distance.
    pub(crate) fn within_recurse(
        self,
        query: &SearchQuery<N>,
        r: f64,
        axis: Axis,
        results: &mut Vec<Neighbor<'a, N>>,
    ) {
        if let Some(candidate) = self.candidate(query) {
            if candidate.distance <= r {
                insert_sorted(results, candidate);
            }
        }

        let q = axis.coord(&query.point);
        let s = axis.coord(&self.point());

        // search the halves that intersect the query circle
        if let Some(left) = self.left() {
            if q - r <= s {
                left.within_recurse(query, r, axis.next(), results);
            }
        }
        if let Some(right) = self.right() {
            if q + r >= s {
                right.within_recurse(query, r, axis.next(), results);
            }
        }
    }

    /// Merge the `k` closest nodes of this subtree into `results`, which holds at most `k`
    /// neighbors sorted by distance.
    pub(crate) fn k_nearest_recurse(
        self,
        query: &SearchQuery<N>,
        k: usize,
        axis: Axis,
        results: &mut Vec<Neighbor<'a, N>>,
    ) {
        if let Some(candidate) = self.candidate(query) {
            let admit = results.len() < k
                || results
                    .last()
                    .is_some_and(|worst| candidate.distance < worst.distance);
            if admit {
                insert_sorted(results, candidate);
                results.truncate(k);
            }
        }

        let (near, far, plane_dist) = self.split(&query.point, axis);

        if let Some(near) = near {
            near.k_nearest_recurse(query, k, axis.next(), results);
        }

        if let Some(far) = far {
            // Until k neighbors are held, every subtree could still contribute.
            let prune = results.len() == k
                && results
                    .last()
                    .is_some_and(|worst| plane_dist > worst.distance);
            if !prune {
                far.k_nearest_recurse(query, k, axis.next(), results);
            }
        }
    }
}

/// The closer of two optional candidates. `second` wins only if strictly closer.
#[inline]
fn closer_of<'a, N: IndexableNum>(
    first: Option<Neighbor<'a, N>>,
    second: Option<Neighbor<'a, N>>,
) -> Option<Neighbor<'a, N>> {
    match (first, second) {
        (Some(first), Some(second)) if second.distance < first.distance => Some(second),
        (Some(first), _) => Some(first),
        (None, second) => second,
    }
}

/// Insert after every neighbor at the same or a smaller distance, so equal distances keep the
/// order in which they were found.
#[inline]
fn insert_sorted<'a, N: IndexableNum>(
    results: &mut Vec<Neighbor<'a, N>>,
    neighbor: Neighbor<'a, N>,
) {
    let pos = results.partition_point(|other| other.distance <= neighbor.distance);
    results.insert(pos, neighbor);
}
