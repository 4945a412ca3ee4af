//! Node/path data model with snapshot undo.

mod grid;
mod history;
mod hit;
mod node;
mod store;

pub use grid::GridConfig;
pub use history::{History, Snapshot};
pub use hit::find_node_at;
pub use node::{NODE_RADIUS, Node, NodeId};
pub use store::SceneStore;
