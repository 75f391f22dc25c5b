#![warn(missing_docs)]

//! This crate provides dynamic forests built on splay trees: collections of rooted trees whose
//! edges can be inserted and deleted at any time, while queries about paths, subtrees and
//! ancestors are answered in amortized logarithmic time.
//!
//! # Data structures
//!  - [Link-cut tree][LinkCutTree] for root-path aggregates, optionally with re-rooting.
//!  - [Euler-tour tree][EulerTourTree] for subtree aggregates and lowest common ancestors,
//!    optionally with re-rooting.
//!  - [Ordered splay tree][SplayTree], a multiset with rank selection and prefix aggregates.
//!
//! Both forests implement [`DynamicForest`]. Vertices are addressed by [`NodeId`] handles that are
//! returned when a vertex is added.
//!
//! # Statistics
//! Every splay node carries an aggregate [statistic][statistic::Statistic] of its subtree, which
//! is kept up to date through all restructuring. The statistic is a type parameter of each
//! structure, so it costs nothing if unused ([`Count`](statistic::Count) is the default).
//! Custom aggregates are added by implementing the trait.
//!
//! # Search
//! The ordered tree can be searched by [navigators][navigator::Navigator], which inspect the
//! statistics of one node at a time and steer the search towards their target.
//!
//! # Amortization
//! All operations rely on splaying and their bounds are amortized: a single call may take linear
//! time, while any sequence of `m` calls on `n` vertices takes O((n + m) log n) in total. For the
//! same reason, queries need mutable access to the structure.
//!
//! # Logging
//! Structural changes to the forests are reported at trace level through the [`log`] facade, and
//! rejected operations at debug level. No logger is installed by this crate.

pub use crate::error::ForestError;
pub use crate::splay::ordered::SplayTree;
pub use crate::trees::euler::EulerTourTree;
pub use crate::trees::link_cut::LinkCutTree;
pub use crate::trees::{DynamicForest, Edge, NodeId};

pub mod error;
pub mod navigator;
pub mod splay;
pub mod statistic;
pub mod trees;
