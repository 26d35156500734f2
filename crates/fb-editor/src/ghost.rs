//! Floating ghost that follows the pointer during a drag.
//!
//! The ghost keeps the grab offset captured at drag start, so the element
//! stays under the pointer at the spot where it was picked up. It is
//! attached lazily on the first move and detached when the gesture ends.

use crate::host::Host;
use crate::input::SourceId;
use fb_core::{Point, Rect, Vec2};

#[derive(Debug, Default)]
pub struct GhostOverlay {
    source: Option<SourceId>,
    grab_offset: Vec2,
    attached: bool,
}

impl GhostOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn source(&self) -> Option<SourceId> {
        self.source
    }

    /// Offset from the element's top-left corner to the grab point.
    pub fn grab_offset(&self) -> Vec2 {
        self.grab_offset
    }

    /// Record where `source`'s element was grabbed.
    pub fn begin(&mut self, source: SourceId, element: Option<Rect>, pointer: Point) {
        self.source = Some(source);
        self.attached = false;
        self.grab_offset = element.map_or(Vec2::ZERO, |rect| pointer - rect.origin());
    }

    /// Attach on first use, then move the ghost under the pointer.
    pub fn follow<H: Host + ?Sized>(&mut self, host: &mut H, pointer: Point) {
        let Some(source) = self.source else {
            return;
        };
        if !self.attached {
            host.attach_ghost(source);
            self.attached = true;
        }
        host.place_ghost(source, pointer - self.grab_offset);
    }

    /// Hand the ghost over to a remounted source, keeping the grab offset.
    pub fn retarget<H: Host + ?Sized>(&mut self, host: &mut H, source: SourceId) {
        if self.source.is_none() {
            return;
        }
        if self.attached
            && let Some(previous) = self.source
        {
            host.detach_ghost(previous);
        }
        self.attached = false;
        self.source = Some(source);
    }

    /// Detach the ghost, if any, and forget the gesture.
    pub fn end<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.attached
            && let Some(source) = self.source
        {
            host.detach_ghost(source);
        }
        *self = Self::default();
    }
}
