//! Board history arena. Nodes point at their parent by index and keep
//! the move segment that led to them; boards themselves are not stored.

use hatetris_core::{Move, Trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    segment: Vec<Move>,
}

#[derive(Clone, Debug)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    /// New arena holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                segment: Vec::new(),
            }],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn push(&mut self, parent: NodeId, segment: Vec<Move>) -> NodeId {
        debug_assert!(parent.index() < self.nodes.len());
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            segment,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Walk from `id` up to the root and return the segments root-first.
    pub fn trace(&self, id: NodeId) -> Trace {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(node_id) = cursor {
            let node = &self.nodes[node_id.index()];
            if node.parent.is_some() {
                segments.push(node.segment.clone());
            }
            cursor = node.parent;
        }
        segments.reverse();
        Trace::from_segments(segments)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}
