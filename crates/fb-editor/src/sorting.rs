//! Reorder decisions: which neighbour has the pointer just crossed?
//!
//! Neighbours are ranked by distance from the dragged element's snapshot
//! and tested one at a time; the first one whose center the pointer has
//! passed wins. Only one relocation can come out of a single move event.

use fb_core::geometry::{distance, horizontal_center, vertical_center};
use fb_core::{Point, Rect};

/// Axis along which a neighbour is compared with the dragged element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Same top edge: neighbours in a row.
    Horizontal,
    Vertical,
}

impl Axis {
    fn between(candidate: &Rect, dragged: &Rect) -> Self {
        if candidate.y0 == dragged.y0 {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}

/// Whether the pointer has crossed the center of `candidate`, moving away
/// from the dragged element's snapshot position.
pub fn crosses(candidate: &Rect, dragged: &Rect, pointer: Point) -> bool {
    let (candidate_start, dragged_start, position, center) = match Axis::between(candidate, dragged) {
        Axis::Horizontal => (candidate.x0, dragged.x0, pointer.x, horizontal_center(candidate)),
        Axis::Vertical => (candidate.y0, dragged.y0, pointer.y, vertical_center(candidate)),
    };
    let is_before = candidate_start < dragged_start;
    let move_back = is_before && position < center;
    let move_forward = !is_before && position > center;
    move_back || move_forward
}

/// Pick the item the dragged item at `current` should relocate against.
///
/// `rects` is the index-aligned geometry snapshot; unmeasured slots are
/// skipped. An empty snapshot or an unmeasured dragged item yields `None`.
pub fn detect_sorting(rects: &[Option<Rect>], current: usize, pointer: Point) -> Option<usize> {
    let dragged = (*rects.get(current)?)?;

    let mut candidates: Vec<(usize, Rect, f64)> = rects
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != current)
        .filter_map(|(index, rect)| rect.map(|r| (index, r, distance(&r, &dragged))))
        .collect();
    // Stable: equally distant neighbours keep registry order.
    candidates.sort_by(|a, b| a.2.total_cmp(&b.2));

    let hit = candidates
        .into_iter()
        .find(|(_, rect, _)| crosses(rect, &dragged, pointer))
        .map(|(index, _, _)| index);
    log::trace!("sorting item {current} at {pointer:?}: {hit:?}");
    hit
}
