use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KdIndexError {
    /// A tree cannot be built from zero points.
    #[error("Cannot build a KDTree from zero points.")]
    EmptyInput,

    /// The builder was finished with a different number of points than it was created for.
    #[error("Added {added} items when expected {expected}.")]
    ItemCountMismatch {
        /// Number of items the builder was created for
        expected: usize,
        /// Number of items actually added
        added: usize,
    },

    /// Node slots are `u32`, so a tree holds at most `u32::MAX` points.
    #[error("Cannot index {0} points, the maximum is {max}.", max = u32::MAX)]
    TooManyItems(usize),

    /// An interleaved coordinate buffer must hold an even number of values.
    #[error("Interleaved coordinates must have an even length, got {0}.")]
    InterleavedLength(usize),

    /// A point has a NaN coordinate and cannot be placed on either side of a split.
    #[error("Item {item} has a NaN coordinate.")]
    NaNCoordinate {
        /// Insertion index of the offending point
        item: u32,
    },

    /// A query point has a NaN coordinate, so it has no distance to any point in the tree.
    #[error("Query point has a NaN coordinate.")]
    NaNQuery,

    /// k-nearest-neighbor queries need `k >= 1`.
    #[error("k must be at least 1.")]
    InvalidK,

    /// Radius queries need a non-negative radius.
    #[error("Radius must be non-negative, got {0}.")]
    InvalidRadius(f64),

    /// A node from a different tree was passed as the query node.
    #[error("Query node does not belong to this tree.")]
    ForeignNode,

    /// The only point in the tree is the query node itself.
    #[error("No neighbor exists other than the query node.")]
    NoNeighbor,
}

pub type Result<T> = std::result::Result<T, KdIndexError>;
