//! Interface to the rendering layer.
//!
//! The host owns the actual widgets: it measures them, toggles CSS-like
//! classes, floats the ghost overlay, and redraws subtrees. [`TreeControl`]
//! drives it from inside event handling, so implementations must not call
//! back into the control synchronously. Remounts triggered by
//! [`Renderable::rerender`] are reported later through
//! [`TreeControl::register`].
//!
//! [`TreeControl`]: crate::control::TreeControl
//! [`TreeControl::register`]: crate::control::TreeControl::register

use crate::input::{ElementId, SourceId};
use fb_core::{Point, Rect, Renderable};

pub trait Host: Renderable {
    /// Current client-space bounds of `element`, or `None` if it is not
    /// mounted.
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Mark a drag source as mid-gesture (or not).
    fn set_dragging(&mut self, source: SourceId, dragging: bool);

    /// Float a copy of the source's element above the canvas.
    fn attach_ghost(&mut self, source: SourceId);

    /// Move the floating ghost so its top-left corner sits at `top_left`.
    fn place_ghost(&mut self, source: SourceId, top_left: Point);

    fn detach_ghost(&mut self, source: SourceId);
}
