//! Input abstraction layer.
//!
//! The pointer-drag primitive lives in the host. It reports each gesture as
//! a `Start`, zero or more `Move`s, and an `End`, tagged with the drag
//! source that produced them.

use fb_core::Point;

/// Identity of one mounted drag source. A remounted component gets a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u64);

/// Identity of a host element that can be measured and highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// The draggable wrapper of one component as mounted by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragSource {
    pub id: SourceId,
    /// Element measured for geometry and highlighted on selection.
    pub element: ElementId,
}

impl DragSource {
    pub fn new(id: u64, element: u64) -> Self {
        Self {
            id: SourceId(id),
            element: ElementId(element),
        }
    }
}

/// A drag event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// Pointer pressed on a draggable and drag threshold passed.
    Start { x: f64, y: f64 },

    /// Pointer moved while dragging.
    Move { x: f64, y: f64 },

    /// Pointer released or gesture cancelled.
    End,
}

/// The three event streams a drag source exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragEventKind {
    Start,
    Move,
    End,
}

impl DragEventKind {
    pub const ALL: [DragEventKind; 3] = [Self::Start, Self::Move, Self::End];
}

impl DragEvent {
    pub fn start(x: f64, y: f64) -> Self {
        Self::Start { x, y }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::Move { x, y }
    }

    pub fn kind(&self) -> DragEventKind {
        match self {
            Self::Start { .. } => DragEventKind::Start,
            Self::Move { .. } => DragEventKind::Move,
            Self::End => DragEventKind::End,
        }
    }

    /// Extract the pointer position, if this event carries one.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Start { x, y } | Self::Move { x, y } => Some(Point::new(*x, *y)),
            Self::End => None,
        }
    }
}
