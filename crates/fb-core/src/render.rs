use crate::id::NodeId;

/// Capability of the rendering layer to redraw one component's subtree.
///
/// Called whenever a node gains or loses children or its children change
/// order. Fire-and-forget: the core never waits on the redraw.
pub trait Renderable {
    fn rerender(&mut self, node: NodeId);
}
