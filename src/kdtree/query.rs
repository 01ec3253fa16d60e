//! Public queries on a [`KDTree`], each a thin delegation to a recursive search from the root.

use geo_traits::CoordTrait;
#[cfg(feature = "rayon")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::trace;

use crate::error::{KdIndexError, Result};
use crate::kdtree::search::{Neighbor, SearchQuery};
use crate::kdtree::{Axis, KDTree, Node};
use crate::r#type::{IndexableNum, Point};

impl<N: IndexableNum> KDTree<N> {
    /// Search for the node closest to the point `(x, y)`.
    ///
    /// When several nodes are equally close, the one found first wins: the nearer subtree is
    /// searched before the node itself, and the node itself before the farther subtree.
    ///
    /// ```
    /// use kd_index::kdtree::KDTree;
    ///
    /// let tree = KDTree::<i32>::try_new([(10, 10), (20, 20), (40, 40), (80, 80), (160, 160)])
    ///     .unwrap();
    /// let nearest = tree.nearest(50, 50).unwrap();
    /// assert_eq!((nearest.point().x, nearest.point().y), (40, 40));
    /// ```
    ///
    /// A query point with a NaN coordinate fails with [`KdIndexError::NaNQuery`]; the same holds
    /// for every other point query.
    pub fn nearest(&self, x: N, y: N) -> Result<Node<'_, N>> {
        let point = Point::new(x, y);
        check_query(&point)?;
        Ok(self.nearest_point(&point))
    }

    /// Search for the node closest to the given coordinate.
    pub fn nearest_coord(&self, coord: &impl CoordTrait<T = N>) -> Result<Node<'_, N>> {
        self.nearest(coord.x(), coord.y())
    }

    /// Search for the node closest to `node`, never returning `node` itself.
    ///
    /// Other nodes holding the same point as `node` are valid results, at distance zero.
    pub fn nearest_to_node(&self, node: Node<'_, N>) -> Result<Node<'_, N>> {
        self.check_owned(&node)?;
        self.root()
            .nearest_recurse(&SearchQuery::from_node(&node), Axis::from_depth(0))
            .map(|best| best.node)
            .ok_or(KdIndexError::NoNeighbor)
    }

    /// Search for all nodes within distance `r` of the point `(x, y)`, sorted by distance.
    ///
    /// Nodes at equal distance are returned in tree order. A radius of zero returns exact
    /// matches only.
    ///
    /// ```
    /// use kd_index::kdtree::KDTree;
    ///
    /// let tree = KDTree::<i32>::try_new([(10, 0), (20, 0), (40, 0), (80, 0), (160, 0)]).unwrap();
    /// let xs: Vec<i32> = tree
    ///     .within(70, 0, 30.)
    ///     .unwrap()
    ///     .iter()
    ///     .map(|node| node.point().x)
    ///     .collect();
    /// assert_eq!(xs, vec![80, 40]);
    /// ```
    pub fn within(&self, x: N, y: N, r: f64) -> Result<Vec<Node<'_, N>>> {
        let point = Point::new(x, y);
        check_query(&point)?;
        check_radius(r)?;
        Ok(self.within_point(&SearchQuery::from_point(point), r))
    }

    /// Search for all nodes within distance `r` of the given coordinate, sorted by distance.
    pub fn within_coord(
        &self,
        coord: &impl CoordTrait<T = N>,
        r: f64,
    ) -> Result<Vec<Node<'_, N>>> {
        self.within(coord.x(), coord.y(), r)
    }

    /// Search for all nodes within distance `r` of `node`, other than `node` itself, sorted by
    /// distance.
    pub fn within_node(&self, node: Node<'_, N>, r: f64) -> Result<Vec<Node<'_, N>>> {
        self.check_owned(&node)?;
        check_radius(r)?;
        Ok(self.within_point(&SearchQuery::from_node(&node), r))
    }

    /// Search for the `k` nodes closest to the point `(x, y)`, sorted by distance.
    ///
    /// If the tree holds fewer than `k` points, all of them are returned.
    ///
    /// ```
    /// use kd_index::kdtree::KDTree;
    ///
    /// let tree = KDTree::<i32>::try_new([(10, 0), (20, 0), (40, 0), (80, 0), (160, 0)]).unwrap();
    /// let xs: Vec<i32> = tree
    ///     .k_nearest(70, 0, 3)
    ///     .unwrap()
    ///     .iter()
    ///     .map(|node| node.point().x)
    ///     .collect();
    /// assert_eq!(xs, vec![80, 40, 20]);
    /// ```
    pub fn k_nearest(&self, x: N, y: N, k: usize) -> Result<Vec<Node<'_, N>>> {
        let point = Point::new(x, y);
        check_query(&point)?;
        check_k(k)?;
        Ok(self.k_nearest_point(&SearchQuery::from_point(point), k))
    }

    /// Search for the `k` nodes closest to the given coordinate, sorted by distance.
    pub fn k_nearest_coord(
        &self,
        coord: &impl CoordTrait<T = N>,
        k: usize,
    ) -> Result<Vec<Node<'_, N>>> {
        self.k_nearest(coord.x(), coord.y(), k)
    }

    /// Search for the `k` nodes closest to `node`, other than `node` itself, sorted by distance.
    pub fn k_nearest_node(&self, node: Node<'_, N>, k: usize) -> Result<Vec<Node<'_, N>>> {
        self.check_owned(&node)?;
        check_k(k)?;
        Ok(self.k_nearest_point(&SearchQuery::from_node(&node), k))
    }

    /// [`nearest`][Self::nearest] for each query point.
    ///
    /// Every query point is checked before any search runs.
    ///
    /// With the `rayon` feature, queries run in parallel.
    pub fn nearest_batch(&self, queries: &[Point<N>]) -> Result<Vec<Node<'_, N>>> {
        check_queries(queries)?;
        Ok(map_queries(queries, |query| self.nearest_point(query)))
    }

    /// [`within`][Self::within] for each query point, with a shared radius.
    ///
    /// With the `rayon` feature, queries run in parallel.
    pub fn within_batch(&self, queries: &[Point<N>], r: f64) -> Result<Vec<Vec<Node<'_, N>>>> {
        check_queries(queries)?;
        check_radius(r)?;
        Ok(map_queries(queries, |query| {
            self.within_point(&SearchQuery::from_point(*query), r)
        }))
    }

    /// [`k_nearest`][Self::k_nearest] for each query point, with a shared `k`.
    ///
    /// With the `rayon` feature, queries run in parallel.
    pub fn k_nearest_batch(
        &self,
        queries: &[Point<N>],
        k: usize,
    ) -> Result<Vec<Vec<Node<'_, N>>>> {
        check_queries(queries)?;
        check_k(k)?;
        Ok(map_queries(queries, |query| {
            self.k_nearest_point(&SearchQuery::from_point(*query), k)
        }))
    }

    fn nearest_point(&self, point: &Point<N>) -> Node<'_, N> {
        let root = self.root();
        // Nothing is excluded, so the search always has a candidate
        root.nearest_recurse(&SearchQuery::from_point(*point), Axis::from_depth(0))
            .map_or(root, |best| best.node)
    }

    fn within_point(&self, query: &SearchQuery<N>, r: f64) -> Vec<Node<'_, N>> {
        let mut results = vec![];
        self.root()
            .within_recurse(query, r, Axis::from_depth(0), &mut results);
        into_nodes(results)
    }

    fn k_nearest_point(&self, query: &SearchQuery<N>, k: usize) -> Vec<Node<'_, N>> {
        let mut results = Vec::with_capacity(k.min(self.num_items() as usize) + 1);
        self.root()
            .k_nearest_recurse(query, k, Axis::from_depth(0), &mut results);
        into_nodes(results)
    }

    fn check_owned(&self, node: &Node<'_, N>) -> Result<()> {
        if node.belongs_to(self) {
            Ok(())
        } else {
            trace!(item = node.item(), "rejected query node from another tree");
            Err(KdIndexError::ForeignNode)
        }
    }
}

fn check_query<N: IndexableNum>(point: &Point<N>) -> Result<()> {
    if point.has_nan() {
        trace!(?point, "rejected NaN query point");
        return Err(KdIndexError::NaNQuery);
    }
    Ok(())
}

fn check_queries<N: IndexableNum>(queries: &[Point<N>]) -> Result<()> {
    queries.iter().try_for_each(check_query)
}

fn check_radius(r: f64) -> Result<()> {
    if r.is_nan() || r < 0.0 {
        trace!(r, "rejected radius");
        return Err(KdIndexError::InvalidRadius(r));
    }
    Ok(())
}

fn check_k(k: usize) -> Result<()> {
    if k == 0 {
        trace!("rejected k = 0");
        return Err(KdIndexError::InvalidK);
    }
    Ok(())
}

#[inline]
fn into_nodes<N: IndexableNum>(neighbors: Vec<Neighbor<'_, N>>) -> Vec<Node<'_, N>> {
    neighbors.into_iter().map(|neighbor| neighbor.node).collect()
}

#[cfg(feature = "rayon")]
fn map_queries<N, T, F>(queries: &[Point<N>], f: F) -> Vec<T>
where
    N: IndexableNum,
    T: Send,
    F: Fn(&Point<N>) -> T + Sync + Send,
{
    queries.par_iter().map(f).collect()
}

#[cfg(not(feature = "rayon"))]
fn map_queries<N, T, F>(queries: &[Point<N>], f: F) -> Vec<T>
where
    N: IndexableNum,
    F: Fn(&Point<N>) -> T,
{
    queries.iter().map(f).collect()
}
