//! Binary Space Partitioning (BSP) tree implementation
//!
//! Trees are arena-backed ([`BspTree`]) and every operation walks them with an
//! explicit stack. The boolean compositions built on top live in [`boolean`].

pub mod boolean;
pub mod node;
pub mod serial;

pub use boolean::{intersect, subtract, union};
pub use node::{BspTree, Node, NodeId};
