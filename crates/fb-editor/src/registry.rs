//! Tree item registry: which drag source belongs to which component, and
//! where every registered element sat when the current drag began.
//!
//! Geometry is kept in a vector index-aligned with the items. It is either
//! empty (nothing measured yet) or exactly as long as the item list.

use crate::host::Host;
use crate::input::{DragEventKind, DragSource, ElementId, SourceId};
use fb_core::{NodeId, Rect};
use smallvec::SmallVec;

/// The event streams one tree item listens to. Owned by its [`TreeItem`],
/// so replacing or removing the item releases all of them at once.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscriptions {
    source: SourceId,
    kinds: SmallVec<[DragEventKind; 3]>,
}

impl Subscriptions {
    fn acquire(source: SourceId) -> Self {
        log::trace!("subscribe {source:?}");
        Self {
            source,
            kinds: DragEventKind::ALL.into_iter().collect(),
        }
    }

    pub fn covers(&self, source: SourceId, kind: DragEventKind) -> bool {
        self.source == source && self.kinds.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        log::trace!("unsubscribe {:?}", self.source);
    }
}

/// A mounted drag source bound to its component.
#[derive(Debug)]
pub struct TreeItem {
    pub source: DragSource,
    pub node: NodeId,
    subscriptions: Subscriptions,
}

impl TreeItem {
    fn new(source: DragSource, node: NodeId) -> Self {
        Self {
            source,
            node,
            subscriptions: Subscriptions::acquire(source.id),
        }
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }
}

/// Result of [`Registry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    /// The component was already registered; the previous source was released.
    Replaced { previous: DragSource },
}

#[derive(Debug, Default)]
pub struct Registry {
    items: Vec<TreeItem>,
    rects: Vec<Option<Rect>>,
    selected: Option<ElementId>,
    float: Option<NodeId>,
    /// Source the host currently shows as dragging.
    dragging: Option<SourceId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[TreeItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&TreeItem> {
        self.items.get(index)
    }

    /// Geometry captured by the last [`snapshot`](Self::snapshot).
    pub fn rects(&self) -> &[Option<Rect>] {
        &self.rects
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// The component currently being relocated by a drag.
    pub fn float(&self) -> Option<NodeId> {
        self.float
    }

    pub fn set_float(&mut self, node: NodeId) {
        self.float = Some(node);
    }

    pub fn clear_float(&mut self) {
        self.float = None;
    }

    pub fn dragging(&self) -> Option<SourceId> {
        self.dragging
    }

    /// Record `source` as the one carrying the active gesture.
    pub fn begin_drag(&mut self, source: SourceId) {
        self.dragging = Some(source);
    }

    /// Clear the dragging flag of the active gesture's source, if any.
    pub fn end_drag<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(source) = self.dragging.take() {
            host.set_dragging(source, false);
        }
    }

    pub fn index_of_node(&self, node: NodeId) -> Option<usize> {
        self.items.iter().position(|item| item.node == node)
    }

    /// Index of the item subscribed to `kind` events from `source`.
    pub fn subscriber(&self, source: SourceId, kind: DragEventKind) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.subscriptions.covers(source, kind))
    }

    pub fn is_subscribed(&self, source: SourceId, kind: DragEventKind) -> bool {
        self.subscriber(source, kind).is_some()
    }

    /// Total number of live event subscriptions across all items.
    pub fn live_subscriptions(&self) -> usize {
        self.items.iter().map(|item| item.subscriptions.len()).sum()
    }

    /// Move the highlight to `element`. Returns false if it already had it.
    /// Clears the float component.
    pub fn select<H: Host + ?Sized>(&mut self, element: ElementId, class: &str, host: &mut H) -> bool {
        if self.selected == Some(element) {
            return false;
        }
        if let Some(previous) = self.selected {
            host.remove_class(previous, class);
        }
        host.add_class(element, class);
        self.selected = Some(element);
        self.float = None;
        true
    }

    /// Bind `source` to `node`, replacing any source the node already had.
    ///
    /// When the replaced node is the one being relocated, the new source
    /// takes over the highlight. If the replaced source carried the active
    /// gesture, the new one is marked dragging so the gesture survives the
    /// remount.
    pub fn register<H: Host + ?Sized>(
        &mut self,
        source: DragSource,
        node: NodeId,
        class: &str,
        host: &mut H,
    ) -> Registration {
        let Some(index) = self.index_of_node(node) else {
            log::debug!("register {node} with {:?}", source.id);
            self.items.push(TreeItem::new(source, node));
            if !self.rects.is_empty() {
                self.rects.push(host.bounding_rect(source.element));
            }
            return Registration::Added;
        };

        let item = &mut self.items[index];
        let previous = item.source;
        log::debug!("re-register {node}: {:?} -> {:?}", previous.id, source.id);
        item.source = source;
        // Drops the previous source's subscriptions.
        item.subscriptions = Subscriptions::acquire(source.id);
        if let Some(rect) = self.rects.get_mut(index) {
            *rect = host.bounding_rect(source.element);
        }

        if self.float == Some(node) {
            self.select(source.element, class, host);
            if self.dragging == Some(previous.id) {
                host.set_dragging(source.id, true);
                self.dragging = Some(source.id);
            }
        }
        Registration::Replaced { previous }
    }

    /// Remove the item for `node` if `source` still owns it.
    ///
    /// Unknown nodes and sources that were already replaced are ignored.
    pub fn unregister(&mut self, source: DragSource, node: NodeId) -> bool {
        let Some(index) = self.index_of_node(node) else {
            return false;
        };
        if self.items[index].source.id != source.id {
            log::debug!("stale unregister of {node} from {:?}", source.id);
            return false;
        }
        log::debug!("unregister {node}");
        self.items.remove(index);
        if index < self.rects.len() {
            self.rects.remove(index);
        }
        true
    }

    /// Re-measure every registered element.
    pub fn snapshot<H: Host + ?Sized>(&mut self, host: &H) {
        self.rects = self
            .items
            .iter()
            .map(|item| {
                let rect = host.bounding_rect(item.source.element);
                if rect.is_none() {
                    log::warn!("{} has no measurable element", item.node);
                }
                rect
            })
            .collect();
        log::trace!("snapshot of {} rects", self.rects.len());
    }

    /// Swap two items together with their geometry.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a >= self.items.len() || b >= self.items.len() {
            return;
        }
        self.items.swap(a, b);
        if self.rects.len() == self.items.len() {
            self.rects.swap(a, b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fb_core::{Point, Renderable};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Add(ElementId),
        Remove(ElementId),
        Dragging(SourceId, bool),
    }

    #[derive(Default)]
    struct FakeHost {
        rects: HashMap<ElementId, Rect>,
        calls: Vec<Call>,
    }

    impl Renderable for FakeHost {
        fn rerender(&mut self, _node: NodeId) {}
    }

    impl Host for FakeHost {
        fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
            self.rects.get(&element).copied()
        }
        fn add_class(&mut self, element: ElementId, _class: &str) {
            self.calls.push(Call::Add(element));
        }
        fn remove_class(&mut self, element: ElementId, _class: &str) {
            self.calls.push(Call::Remove(element));
        }
        fn set_dragging(&mut self, source: SourceId, dragging: bool) {
            self.calls.push(Call::Dragging(source, dragging));
        }
        fn attach_ghost(&mut self, _source: SourceId) {}
        fn place_ghost(&mut self, _source: SourceId, _top_left: Point) {}
        fn detach_ghost(&mut self, _source: SourceId) {}
    }

    #[test]
    fn select_is_idempotent() {
        let mut host = FakeHost::default();
        let mut registry = Registry::new();
        registry.set_float(NodeId::intern("reg_sel"));

        assert!(registry.select(ElementId(1), "selected", &mut host));
        assert!(!registry.select(ElementId(1), "selected", &mut host));
        assert!(registry.select(ElementId(2), "selected", &mut host));

        assert_eq!(
            host.calls,
            vec![
                Call::Add(ElementId(1)),
                Call::Remove(ElementId(1)),
                Call::Add(ElementId(2)),
            ]
        );
        assert_eq!(registry.float(), None);
        assert_eq!(registry.selected(), Some(ElementId(2)));
    }

    #[test]
    fn register_twice_replaces() {
        let mut host = FakeHost::default();
        let mut registry = Registry::new();
        let node = NodeId::intern("reg_twice");
        let first = DragSource::new(1, 10);
        let second = DragSource::new(2, 20);

        assert_eq!(
            registry.register(first, node, "selected", &mut host),
            Registration::Added
        );
        assert_eq!(
            registry.register(second, node, "selected", &mut host),
            Registration::Replaced { previous: first }
        );

        assert_eq!(registry.items().len(), 1);
        assert_eq!(registry.live_subscriptions(), 3);
        assert!(!registry.is_subscribed(first.id, DragEventKind::Move));
        assert!(registry.is_subscribed(second.id, DragEventKind::Start));
        // Not the float component: no highlight or dragging change.
        assert!(host.calls.is_empty());
    }

    #[test]
    fn remounting_the_float_component_keeps_it_dragging() {
        let mut host = FakeHost::default();
        let mut registry = Registry::new();
        let node = NodeId::intern("reg_float");
        let old = DragSource::new(1, 10);
        let new = DragSource::new(2, 20);

        registry.register(old, node, "selected", &mut host);
        registry.select(old.element, "selected", &mut host);
        registry.set_float(node);
        registry.begin_drag(old.id);
        host.calls.clear();

        registry.register(new, node, "selected", &mut host);
        assert_eq!(
            host.calls,
            vec![
                Call::Remove(ElementId(10)),
                Call::Add(ElementId(20)),
                Call::Dragging(SourceId(2), true),
            ]
        );
        assert_eq!(registry.selected(), Some(ElementId(20)));
        assert_eq!(registry.dragging(), Some(new.id));

        host.calls.clear();
        registry.end_drag(&mut host);
        registry.end_drag(&mut host);
        assert_eq!(host.calls, vec![Call::Dragging(SourceId(2), false)]);
    }

    #[test]
    fn remounting_the_float_component_after_its_drag_stays_idle() {
        let mut host = FakeHost::default();
        let mut registry = Registry::new();
        let node = NodeId::intern("reg_float_idle");
        let old = DragSource::new(1, 10);
        let new = DragSource::new(2, 20);

        registry.register(old, node, "selected", &mut host);
        registry.set_float(node);
        registry.begin_drag(old.id);
        registry.end_drag(&mut host);
        host.calls.clear();

        registry.register(new, node, "selected", &mut host);
        assert_eq!(host.calls, vec![Call::Add(ElementId(20))]);
        assert_eq!(registry.dragging(), None);
    }

    #[test]
    fn unregister_tolerates_unknown_and_stale() {
        let mut host = FakeHost::default();
        host.rects.insert(ElementId(10), Rect::new(0.0, 0.0, 10.0, 10.0));
        host.rects.insert(ElementId(20), Rect::new(0.0, 20.0, 10.0, 30.0));
        let mut registry = Registry::new();
        let a = NodeId::intern("reg_un_a");
        let b = NodeId::intern("reg_un_b");
        let source_a = DragSource::new(1, 10);
        let source_b = DragSource::new(2, 20);
        registry.register(source_a, a, "selected", &mut host);
        registry.register(source_b, b, "selected", &mut host);
        registry.snapshot(&host);

        assert!(!registry.unregister(source_a, NodeId::intern("reg_un_missing")));
        assert!(!registry.unregister(DragSource::new(9, 90), a));
        assert!(registry.unregister(source_a, a));
        assert!(!registry.unregister(source_a, a));

        assert_eq!(registry.items().len(), 1);
        assert_eq!(registry.rects(), &[host.rects.get(&ElementId(20)).copied()]);
        assert_eq!(registry.live_subscriptions(), 3);
    }

    #[test]
    fn geometry_stays_index_aligned() {
        let mut host = FakeHost::default();
        host.rects.insert(ElementId(10), Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut registry = Registry::new();
        registry.register(DragSource::new(1, 10), NodeId::intern("reg_geo_a"), "selected", &mut host);
        assert!(registry.rects().is_empty());

        registry.snapshot(&host);
        registry.register(DragSource::new(2, 20), NodeId::intern("reg_geo_b"), "selected", &mut host);
        assert_eq!(registry.rects().len(), 2);
        assert_eq!(registry.rects()[1], None);

        registry.swap(0, 1);
        assert_eq!(registry.items()[0].node, NodeId::intern("reg_geo_b"));
        assert_eq!(registry.rects()[0], None);
        registry.swap(0, 7);
        assert_eq!(registry.items()[0].node, NodeId::intern("reg_geo_b"));
    }
}
