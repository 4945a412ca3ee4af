//! Hit testing: world point → node lookup.
//!
//! Nodes are walked newest-first so that, where discs overlap, the most recently created node
//! wins. Newer nodes are drawn last and are the ones the user expects to grab.

use crate::foundation::core::Point;
use crate::scene::node::{Node, NodeId};

/// Find the topmost node whose disc strictly contains `p`.
/// Returns `None` if no node is hit (background).
pub fn find_node_at(nodes: &[Node], p: Point) -> Option<NodeId> {
    nodes.iter().rev().find(|n| n.contains(p)).map(|n| n.id)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/hit.rs"]
mod tests;
