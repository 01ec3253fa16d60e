//! An implementation of an immutable, balanced 2D K-D Tree.

#![warn(missing_docs)]

mod builder;
mod index;
mod query;
mod search;
mod traversal;

pub use builder::KDTreeBuilder;
pub use index::KDTree;
pub(crate) use traversal::Axis;
pub use traversal::Node;
