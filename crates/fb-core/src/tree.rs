//! The form component tree.
//!
//! Nodes live in a `StableDiGraph` arena; edges go parent → child and form
//! each parent's membership set. Sibling display order is kept separately as
//! an ordered sequence of child ids per parent, so reordering never touches
//! the graph. A node's parent is its single incoming edge, a lookup rather
//! than an owning pointer.
//!
//! Tree shape is only ever changed through the construction APIs here and
//! through [`relocate`](crate::relocate::relocate).

use crate::error::TreeError;
use crate::id::NodeId;
use crate::model::{ComponentKind, FormNode, Nesting};
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

/// Ordered child ids of one parent.
pub type ChildOrder = SmallVec<[NodeId; 4]>;

#[derive(Debug, Clone)]
pub struct FormTree {
    graph: StableDiGraph<FormNode, ()>,
    root: NodeIndex,

    /// Index from NodeId → NodeIndex for fast lookup.
    id_index: HashMap<NodeId, NodeIndex>,

    /// Display order of each parent's children.
    order: HashMap<NodeIndex, ChildOrder>,
}

impl FormTree {
    /// Create a tree holding only a root at level 0.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_level(0)
    }

    /// Create a tree whose root sits at `level`. The root gets a generated
    /// id, so any component name stays available to the form.
    #[must_use]
    pub fn with_base_level(level: u32) -> Self {
        Self::with_root(NodeId::generate(ComponentKind::Root), level)
    }

    /// Create a tree whose root is named `id` and sits at `level`.
    #[must_use]
    pub fn with_root(id: NodeId, level: u32) -> Self {
        let mut graph = StableDiGraph::new();
        let mut root_node = FormNode::new(id, ComponentKind::Root);
        root_node.level = level;
        let root = graph.add_node(root_node);

        let mut id_index = HashMap::new();
        id_index.insert(id, root);

        Self {
            graph,
            root,
            id_index,
            order: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.graph[self.root].id
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// True when only the root is present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_index.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&FormNode> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    pub fn level(&self, id: NodeId) -> Option<u32> {
        self.get(id).map(|n| n.level)
    }

    /// The parent of `id`, or `None` for the root and unknown ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.index_of(id)?;
        self.parent_index(idx).map(|p| self.graph[p].id)
    }

    /// Children of `id` in display order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.index_of(id)
            .and_then(|idx| self.order.get(&idx))
            .map(|o| o.as_slice())
            .unwrap_or(&[])
    }

    /// Position of `id` among its siblings.
    pub fn position_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Check if `ancestor` is a parent/grandparent/etc. of `descendant`.
    pub fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        if ancestor == descendant {
            return false;
        }
        let mut current = descendant;
        while let Some(parent) = self.parent(current) {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    /// All nodes below `id` in pre-order (excluding `id`).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Change whether a container currently accepts nested children.
    pub fn set_nesting(&mut self, id: NodeId, nesting: Nesting) -> Result<(), TreeError> {
        let idx = self.index_of(id).ok_or(TreeError::UnknownNode(id))?;
        self.graph[idx].nesting = nesting;
        Ok(())
    }

    // ─── Construction ────────────────────────────────────────────────────

    /// Append `node` as the last child of `parent`.
    pub fn add_node(&mut self, parent: NodeId, node: FormNode) -> Result<NodeId, TreeError> {
        let end = self.children(parent).len();
        self.insert_node(parent, end, node)
    }

    /// Insert `node` among `parent`'s children at `position` (clamped to the end).
    pub fn insert_node(
        &mut self,
        parent: NodeId,
        position: usize,
        node: FormNode,
    ) -> Result<NodeId, TreeError> {
        let parent_idx = self.index_of(parent).ok_or(TreeError::UnknownNode(parent))?;
        let id = node.id;
        if self.contains(id) {
            return Err(TreeError::DuplicateNode(id));
        }
        let idx = self.graph.add_node(node);
        self.id_index.insert(id, idx);
        self.link(idx, parent_idx, position);
        Ok(id)
    }

    /// Remove `id` and its whole subtree. Returns the removed node.
    pub fn remove_node(&mut self, id: NodeId) -> Result<FormNode, TreeError> {
        let idx = self.index_of(id).ok_or(TreeError::UnknownNode(id))?;
        if idx == self.root {
            return Err(TreeError::RootRemoval);
        }
        self.detach(id);
        for below in self.descendants(id) {
            if let Some(below_idx) = self.id_index.remove(&below) {
                self.order.remove(&below_idx);
                self.graph.remove_node(below_idx);
            }
        }
        self.id_index.remove(&id);
        self.order.remove(&idx);
        self.graph.remove_node(idx).ok_or(TreeError::UnknownNode(id))
    }

    // ─── Structural primitives (relocation engine only) ──────────────────

    /// Unlink `id` from its parent's membership and order.
    /// Returns the former parent and position. Nothing changes unless both
    /// the edge and the order entry are found.
    pub(crate) fn detach(&mut self, id: NodeId) -> Option<(NodeId, usize)> {
        let idx = self.index_of(id)?;
        let parent_idx = self.parent_index(idx)?;
        let edge = self.graph.find_edge(parent_idx, idx)?;
        let siblings = self.order.get_mut(&parent_idx)?;
        let position = siblings.iter().position(|&c| c == id)?;
        siblings.remove(position);
        self.graph.remove_edge(edge);
        Some((self.graph[parent_idx].id, position))
    }

    /// Link a detached `id` under `parent` at `position` and re-level its subtree.
    pub(crate) fn attach(&mut self, id: NodeId, parent: NodeId, position: usize) -> Option<()> {
        let idx = self.index_of(id)?;
        let parent_idx = self.index_of(parent)?;
        self.link(idx, parent_idx, position);
        Some(())
    }

    /// Swap two siblings in their parent's order. Both must share `parent`.
    pub(crate) fn swap_siblings(&mut self, parent: NodeId, a: NodeId, b: NodeId) -> Option<()> {
        let parent_idx = self.index_of(parent)?;
        let siblings = self.order.get_mut(&parent_idx)?;
        let first = siblings.iter().position(|&c| c == a)?;
        let second = siblings.iter().position(|&c| c == b)?;
        siblings.swap(first, second);
        Some(())
    }

    fn link(&mut self, idx: NodeIndex, parent_idx: NodeIndex, position: usize) {
        self.graph.add_edge(parent_idx, idx, ());
        let siblings = self.order.entry(parent_idx).or_default();
        let position = position.min(siblings.len());
        siblings.insert(position, self.graph[idx].id);
        let level = self.graph[parent_idx].level + 1;
        self.relevel(idx, level);
    }

    fn relevel(&mut self, idx: NodeIndex, level: u32) {
        let mut stack = vec![(idx, level)];
        while let Some((next, level)) = stack.pop() {
            self.graph[next].level = level;
            stack.extend(
                self.graph
                    .neighbors_directed(next, Direction::Outgoing)
                    .map(|child| (child, level + 1)),
            );
        }
    }

    fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    fn parent_index(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
    }

    // ─── Validation & debugging ──────────────────────────────────────────

    /// Verify the structural invariants: one parent per non-root node,
    /// order sequences matching membership exactly, and
    /// `level == parent.level + 1` everywhere.
    pub fn check_consistency(&self) -> Result<(), TreeError> {
        for idx in self.graph.node_indices() {
            let node = &self.graph[idx];
            let parents = self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .count();
            let expected_parents = usize::from(idx != self.root);
            if parents != expected_parents {
                return Err(TreeError::ParentMismatch(node.id));
            }

            if let Some(parent_idx) = self.parent_index(idx) {
                let expected = self.graph[parent_idx].level + 1;
                if node.level != expected {
                    return Err(TreeError::LevelMismatch {
                        id: node.id,
                        expected,
                        found: node.level,
                    });
                }
            }

            let members: HashSet<NodeId> = self
                .graph
                .neighbors_directed(idx, Direction::Outgoing)
                .map(|c| self.graph[c].id)
                .collect();
            let order = self.order.get(&idx).map(|o| o.as_slice()).unwrap_or(&[]);
            let ordered: HashSet<NodeId> = order.iter().copied().collect();
            if ordered.len() != order.len() || ordered != members {
                return Err(TreeError::OrderMismatch { parent: node.id });
            }
        }
        Ok(())
    }

    /// Indented dump of the tree in display order, one node per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        let root = self.root();
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            if let Some(node) = self.get(id) {
                let _ = writeln!(
                    out,
                    "{:indent$}{} {:?} L{}",
                    "",
                    id,
                    node.kind,
                    node.level,
                    indent = depth * 2
                );
            }
            stack.extend(self.children(id).iter().rev().map(|&c| (c, depth + 1)));
        }
        out
    }
}

impl Default for FormTree {
    fn default() -> Self {
        Self::new()
    }
}
