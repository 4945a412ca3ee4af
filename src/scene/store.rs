use crate::foundation::core::Point;
use crate::scene::grid::GridConfig;
use crate::scene::history::{History, Snapshot};
use crate::scene::hit;
use crate::scene::node::{Node, NodeId};

/// Owns the nodes, the ordered path and the undo history.
#[derive(Clone, Debug, Default)]
pub struct SceneStore {
    nodes: Vec<Node>,
    path: Vec<NodeId>,
    history: History,
    grid: GridConfig,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridConfig {
        &mut self.grid
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Path node ids in traversal order.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Path positions in traversal order.
    pub fn path_points(&self) -> Vec<Point> {
        self.path
            .iter()
            .filter_map(|id| self.node(*id).map(|n| n.pos))
            .collect()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Push a snapshot of the current state.
    pub fn checkpoint(&mut self) {
        self.history.push(Snapshot::capture(&self.nodes, &self.path));
    }

    /// Snapshot, then append a node at `p` (snapped when the grid says so).
    pub fn add_node(&mut self, p: Point) -> NodeId {
        self.checkpoint();
        let id = NodeId(self.nodes.len() as u32 + 1);
        let pos = self.grid.snap_point(p);
        self.nodes.push(Node::new(id, pos));
        tracing::debug!(%id, x = pos.x, y = pos.y, "node added");
        id
    }

    /// Record the single undo step that covers a whole drag gesture.
    pub fn begin_move(&mut self) {
        self.checkpoint();
    }

    /// Move a node in place. Does not touch history; see [`SceneStore::begin_move`].
    ///
    /// Returns `false` when no node has this id.
    pub fn move_node(&mut self, id: NodeId, p: Point) -> bool {
        let pos = self.grid.snap_point(p);
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                node.pos = pos;
                true
            }
            None => false,
        }
    }

    /// Append a node to the path unless it is already part of it.
    ///
    /// Returns `true` when the path changed.
    pub fn append_to_path(&mut self, id: NodeId) -> bool {
        if self.path.contains(&id) || self.node(id).is_none() {
            return false;
        }
        self.checkpoint();
        self.path.push(id);
        tracing::debug!(%id, len = self.path.len(), "path extended");
        true
    }

    /// Truncate the path; used when path editing (re)starts.
    pub fn clear_path(&mut self) {
        self.path.clear();
    }

    /// Restore the most recent snapshot. Empty history is a no-op.
    ///
    /// Returns `true` when a snapshot was restored.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        let (nodes, path) = snapshot.restore();
        self.nodes = nodes;
        self.path = path;
        tracing::debug!(
            nodes = self.nodes.len(),
            path = self.path.len(),
            remaining = self.history.len(),
            "undo"
        );
        true
    }

    pub fn find_node_at(&self, p: Point) -> Option<NodeId> {
        hit::find_node_at(&self.nodes, p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;
