use std::fmt;

use crate::foundation::core::Point;

/// Display radius of every node, in world units.
pub const NODE_RADIUS: f64 = 15.0;

/// Stable node identity.
///
/// Ids are assigned as `node count + 1` at creation time and survive undo by value, so paths
/// always refer to nodes through their id rather than through a borrowed node.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An addressable point in world space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub pos: Point,
    pub radius: f64,
}

impl Node {
    pub fn new(id: NodeId, pos: Point) -> Self {
        Self {
            id,
            pos,
            radius: NODE_RADIUS,
        }
    }

    /// `true` when `p` lies strictly inside the node's disc.
    pub fn contains(&self, p: Point) -> bool {
        self.pos.distance(p) < self.radius
    }
}
