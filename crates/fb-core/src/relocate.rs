//! Relocation engine: where does a dragged component land?
//!
//! Given the dragged node and the neighbour it was dragged across, exactly
//! one of four cases applies (or none), checked in priority order:
//!
//! | # | Case | Precondition | Effect |
//! |---|------|--------------|--------|
//! | 1 | [`PopUp`](RelocationCase::PopUp) | target is dragged's parent | move up one level, just before the old parent |
//! | 2 | [`Nest`](RelocationCase::Nest) | target accepts nested children | become target's first child |
//! | 3 | [`SiblingSwap`](RelocationCase::SiblingSwap) | same parent | swap positions |
//! | 4 | [`Adopt`](RelocationCase::Adopt) | target is a leaf on another level | join target's parent right after target |
//!
//! No case means no mutation. Reparenting cases never move a node into its
//! own subtree.

use crate::id::NodeId;
use crate::model::Nesting;
use crate::render::Renderable;
use crate::tree::FormTree;
use smallvec::{SmallVec, smallvec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationCase {
    PopUp,
    Nest,
    SiblingSwap,
    Adopt,
}

/// A committed relocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub case: RelocationCase,
    pub dragged: NodeId,
    pub target: NodeId,
    /// Nodes whose subtrees must be redrawn, in notification order.
    pub rerender: SmallVec<[NodeId; 2]>,
}

impl Relocation {
    /// Ask the rendering layer to redraw every affected subtree.
    pub fn notify<R: Renderable + ?Sized>(&self, renderer: &mut R) {
        for &id in &self.rerender {
            renderer.rerender(id);
        }
    }
}

/// Decide which case applies to dropping `dragged` onto `target`, without
/// touching the tree.
pub fn classify(tree: &FormTree, dragged: NodeId, target: NodeId) -> Option<RelocationCase> {
    if dragged == target {
        return None;
    }
    let dragged_node = tree.get(dragged)?;
    let target_node = tree.get(target)?;
    let dragged_parent = tree.parent(dragged)?;
    let target_parent = tree.parent(target);
    // Also covers `target.parent == dragged`.
    let target_inside_dragged = tree.is_ancestor_of(dragged, target);

    if dragged_parent == target && target_parent.is_some() {
        return Some(RelocationCase::PopUp);
    }
    if target_node.nesting.accepts_children()
        && dragged_parent != target
        && !target_inside_dragged
    {
        return Some(RelocationCase::Nest);
    }
    if target_parent == Some(dragged_parent) {
        return Some(RelocationCase::SiblingSwap);
    }
    if target_node.nesting == Nesting::Unsupported
        && dragged_node.level != target_node.level
        && target_parent.is_some()
        && !target_inside_dragged
    {
        return Some(RelocationCase::Adopt);
    }
    None
}

/// Classify and apply. Returns `None`, leaving the tree untouched, when no
/// case matches.
pub fn relocate(tree: &mut FormTree, dragged: NodeId, target: NodeId) -> Option<Relocation> {
    let case = classify(tree, dragged, target)?;
    let rerender = match case {
        RelocationCase::PopUp => pop_up(tree, dragged, target),
        RelocationCase::Nest => nest(tree, dragged, target),
        RelocationCase::SiblingSwap => swap(tree, dragged, target),
        RelocationCase::Adopt => adopt(tree, dragged, target),
    }?;
    log::debug!("relocated {dragged} onto {target}: {case:?}");
    Some(Relocation {
        case,
        dragged,
        target,
        rerender,
    })
}

/// Case 1: leave `parent` and take its slot in the grandparent.
fn pop_up(tree: &mut FormTree, dragged: NodeId, parent: NodeId) -> Option<SmallVec<[NodeId; 2]>> {
    let grandparent = tree.parent(parent)?;
    let position = tree.position_in_parent(parent)?;
    tree.detach(dragged)?;
    tree.attach(dragged, grandparent, position)?;
    Some(smallvec![grandparent])
}

/// Case 2: become the first child of `target`.
fn nest(tree: &mut FormTree, dragged: NodeId, target: NodeId) -> Option<SmallVec<[NodeId; 2]>> {
    let (former, _) = tree.detach(dragged)?;
    tree.attach(dragged, target, 0)?;
    Some(smallvec![former, target])
}

/// Case 3: swap with a sibling.
fn swap(tree: &mut FormTree, dragged: NodeId, target: NodeId) -> Option<SmallVec<[NodeId; 2]>> {
    let parent = tree.parent(dragged)?;
    tree.swap_siblings(parent, dragged, target)?;
    Some(smallvec![parent])
}

/// Case 4: join `target`'s parent, right after `target`.
fn adopt(tree: &mut FormTree, dragged: NodeId, target: NodeId) -> Option<SmallVec<[NodeId; 2]>> {
    let new_parent = tree.parent(target)?;
    let (former, _) = tree.detach(dragged)?;
    let position = tree.position_in_parent(target)? + 1;
    tree.attach(dragged, new_parent, position)?;
    let mut rerender = smallvec![former];
    if former != new_parent {
        rerender.push(new_parent);
    }
    Some(rerender)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentKind, FormNode};
    use pretty_assertions::assert_eq;

    fn add(tree: &mut FormTree, parent: NodeId, name: &str, kind: ComponentKind) -> NodeId {
        tree.add_node(parent, FormNode::new(NodeId::intern(name), kind))
            .unwrap()
    }

    #[test]
    fn dragging_onto_self_or_root_is_ignored() {
        let mut tree = FormTree::new();
        let root = tree.root();
        let a = add(&mut tree, root, "r_self", ComponentKind::Input);
        assert_eq!(classify(&tree, a, a), None);
        assert_eq!(classify(&tree, root, a), None);
        assert_eq!(classify(&tree, a, NodeId::intern("r_nowhere")), None);
    }

    #[test]
    fn pop_up_lands_before_old_parent() {
        let mut tree = FormTree::new();
        let root = tree.root();
        let head = add(&mut tree, root, "p_head", ComponentKind::Label);
        let card = add(&mut tree, root, "p_card", ComponentKind::Card);
        let inner = add(&mut tree, card, "p_inner", ComponentKind::Input);

        let moved = relocate(&mut tree, inner, card).unwrap();
        assert_eq!(moved.case, RelocationCase::PopUp);
        assert_eq!(moved.rerender.as_slice(), &[root]);
        assert_eq!(tree.children(root), &[head, inner, card]);
        assert!(tree.children(card).is_empty());
        assert_eq!(tree.level(inner), Some(1));
        tree.check_consistency().unwrap();
    }

    #[test]
    fn nest_moves_whole_subtree_and_relevels() {
        let mut tree = FormTree::new();
        let root = tree.root();
        let group = add(&mut tree, root, "n_group", ComponentKind::Container);
        let field = add(&mut tree, group, "n_field", ComponentKind::Input);
        let card = add(&mut tree, root, "n_card", ComponentKind::Card);
        let existing = add(&mut tree, card, "n_existing", ComponentKind::Label);

        let moved = relocate(&mut tree, group, card).unwrap();
        assert_eq!(moved.case, RelocationCase::Nest);
        assert_eq!(moved.rerender.as_slice(), &[root, card]);
        assert_eq!(tree.children(card), &[group, existing]);
        assert_eq!(tree.level(group), Some(2));
        assert_eq!(tree.level(field), Some(3));
        tree.check_consistency().unwrap();
    }

    #[test]
    fn disabled_container_does_not_nest_or_adopt() {
        let mut tree = FormTree::new();
        let root = tree.root();
        let outer = add(&mut tree, root, "d_outer", ComponentKind::Container);
        let deep = add(&mut tree, outer, "d_deep", ComponentKind::Input);
        let locked = add(&mut tree, root, "d_locked", ComponentKind::Card);
        tree.set_nesting(locked, Nesting::Disabled).unwrap();

        assert_eq!(classify(&tree, deep, locked), None);
        assert!(relocate(&mut tree, deep, locked).is_none());
        assert_eq!(tree.parent(deep), Some(outer));
    }

    #[test]
    fn never_nests_into_own_subtree() {
        let mut tree = FormTree::new();
        let root = tree.root();
        let outer = add(&mut tree, root, "c_outer", ComponentKind::Container);
        let mid = add(&mut tree, outer, "c_mid", ComponentKind::Container);
        let inner = add(&mut tree, mid, "c_inner", ComponentKind::Card);
        let leaf = add(&mut tree, inner, "c_leaf", ComponentKind::Input);

        // Grandchild container and deep leaf are both inside `outer`.
        assert_eq!(classify(&tree, outer, inner), None);
        assert_eq!(classify(&tree, outer, leaf), None);
        // The direct child is also refused.
        assert_eq!(classify(&tree, outer, mid), None);
        tree.check_consistency().unwrap();
    }

    #[test]
    fn adopt_notifies_both_parents() {
        let mut tree = FormTree::new();
        let root = tree.root();
        let card = add(&mut tree, root, "a_card", ComponentKind::Card);
        let deep = add(&mut tree, card, "a_deep", ComponentKind::Input);
        let flat = add(&mut tree, root, "a_flat", ComponentKind::Button);
        let tail = add(&mut tree, root, "a_tail", ComponentKind::Button);

        let moved = relocate(&mut tree, deep, flat).unwrap();
        assert_eq!(moved.case, RelocationCase::Adopt);
        assert_eq!(moved.rerender.as_slice(), &[card, root]);
        assert_eq!(tree.children(root), &[card, flat, deep, tail]);
        tree.check_consistency().unwrap();
    }

    #[test]
    fn same_level_leaf_in_other_parent_is_a_no_op() {
        let mut tree = FormTree::new();
        let root = tree.root();
        let left = add(&mut tree, root, "s_left", ComponentKind::Container);
        let right = add(&mut tree, root, "s_right", ComponentKind::Container);
        let a = add(&mut tree, left, "s_a", ComponentKind::Input);
        let b = add(&mut tree, right, "s_b", ComponentKind::Input);

        assert_eq!(classify(&tree, a, b), None);
    }

    #[derive(Default)]
    struct Recorder(Vec<NodeId>);

    impl Renderable for Recorder {
        fn rerender(&mut self, node: NodeId) {
            self.0.push(node);
        }
    }

    #[test]
    fn notify_forwards_every_affected_node() {
        let mut tree = FormTree::new();
        let root = tree.root();
        let a = add(&mut tree, root, "nf_a", ComponentKind::Input);
        let b = add(&mut tree, root, "nf_b", ComponentKind::Input);

        let moved = relocate(&mut tree, a, b).unwrap();
        let mut recorder = Recorder::default();
        moved.notify(&mut recorder);
        assert_eq!(recorder.0, vec![root]);
    }
}
