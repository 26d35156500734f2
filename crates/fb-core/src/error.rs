use crate::id::NodeId;
use thiserror::Error;

/// Errors raised while building or validating a [`FormTree`](crate::tree::FormTree).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("unknown component {0}")]
    UnknownNode(NodeId),

    #[error("component {0} is already in the tree")]
    DuplicateNode(NodeId),

    #[error("the root component cannot be removed")]
    RootRemoval,

    #[error("child order of {parent} does not match its children")]
    OrderMismatch { parent: NodeId },

    #[error("component {id} has level {found}, expected {expected}")]
    LevelMismatch { id: NodeId, expected: u32, found: u32 },

    #[error("component {0} does not have exactly one parent")]
    ParentMismatch(NodeId),
}
