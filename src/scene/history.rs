use crate::scene::node::{Node, NodeId};

/// Immutable copy of the scene taken before a structural mutation.
///
/// The path is stored as ids, never as node references; restoring re-resolves it against the
/// restored node list.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    nodes: Vec<Node>,
    path: Vec<NodeId>,
}

impl Snapshot {
    pub(crate) fn capture(nodes: &[Node], path: &[NodeId]) -> Self {
        Self {
            nodes: nodes.to_vec(),
            path: path.to_vec(),
        }
    }

    /// Consume the snapshot, returning nodes and the path with unresolvable ids dropped.
    pub(crate) fn restore(self) -> (Vec<Node>, Vec<NodeId>) {
        let Self { nodes, path } = self;
        let path = path
            .into_iter()
            .filter(|id| nodes.iter().any(|n| n.id == *id))
            .collect();
        (nodes, path)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn path(&self) -> &[NodeId] {
        &self.path
    }
}

/// Undo stack. Grows by one per structural mutation, shrinks only by [`History::pop`].
#[derive(Clone, Debug, Default)]
pub struct History {
    stack: Vec<Snapshot>,
}

impl History {
    pub fn push(&mut self, snapshot: Snapshot) {
        self.stack.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
