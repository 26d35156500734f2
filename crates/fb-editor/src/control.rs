//! Tree control: turns drag gestures into tree relocations.
//!
//! ## Gesture lifecycle
//!
//! | Event | State | Effect |
//! |-------|-------|--------|
//! | `Start` | Idle → Dragging | snapshot geometry, record ghost grab offset |
//! | `Move` | Dragging | move ghost, maybe relocate (then re-render + re-snapshot) |
//! | `End` | Dragging → Idle | detach ghost, clear dragging flag |
//!
//! Events are routed through the registry's subscriptions, so a source that
//! was unregistered or replaced by a remount is ignored.

use crate::config::ControlConfig;
use crate::ghost::GhostOverlay;
use crate::host::Host;
use crate::input::{DragEvent, DragSource, ElementId, SourceId};
use crate::registry::{Registration, Registry};
use crate::sorting::detect_sorting;
use fb_core::{FormTree, NodeId, Point, Relocation, relocate};

/// Drag state of the whole canvas. Only one gesture is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Idle,
    Dragging {
        source: SourceId,
        /// Relocations committed so far in this gesture.
        relocations: usize,
    },
}

pub struct TreeControl<H: Host> {
    tree: FormTree,
    registry: Registry,
    ghost: GhostOverlay,
    gesture: Gesture,
    config: ControlConfig,
    host: H,
}

impl<H: Host> TreeControl<H> {
    /// Create a control over an empty tree rooted at `config.base_level`.
    pub fn new(host: H, config: ControlConfig) -> Self {
        let tree = FormTree::with_base_level(config.base_level);
        Self::with_tree(tree, host, config)
    }

    pub fn with_tree(tree: FormTree, host: H, config: ControlConfig) -> Self {
        Self {
            tree,
            registry: Registry::new(),
            ghost: GhostOverlay::new(),
            gesture: Gesture::Idle,
            config,
            host,
        }
    }

    pub fn tree(&self) -> &FormTree {
        &self.tree
    }

    /// Mutable tree access for building the initial form. Drags mutate the
    /// tree only through relocation.
    pub fn tree_mut(&mut self) -> &mut FormTree {
        &mut self.tree
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn ghost(&self) -> &GhostOverlay {
        &self.ghost
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// The component being relocated, until the selection changes or a drag
    /// starts on another component.
    pub fn float_component(&self) -> Option<NodeId> {
        self.registry.float()
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.registry.selected()
    }

    // ─── Lifecycle hooks called by the rendering layer ───────────────────

    /// Highlight `element`. Returns false if it was already selected.
    pub fn select(&mut self, element: ElementId) -> bool {
        self.registry
            .select(element, &self.config.highlight_class, &mut self.host)
    }

    /// A draggable component mounted (or remounted).
    pub fn register(&mut self, source: DragSource, node: NodeId) -> Registration {
        let outcome =
            self.registry
                .register(source, node, &self.config.highlight_class, &mut self.host);
        if let Registration::Replaced { previous } = outcome
            && let Gesture::Dragging {
                source: active,
                relocations,
            } = self.gesture
            && active == previous.id
        {
            log::debug!("gesture continues on {:?}", source.id);
            self.gesture = Gesture::Dragging {
                source: source.id,
                relocations,
            };
            self.ghost.retarget(&mut self.host, source.id);
        }
        outcome
    }

    /// A draggable component unmounted.
    pub fn unregister(&mut self, source: DragSource, node: NodeId) -> bool {
        self.registry.unregister(source, node)
    }

    /// Re-measure all registered elements, e.g. once an asynchronous
    /// re-render has settled.
    pub fn refresh_geometry(&mut self) {
        self.registry.snapshot(&self.host);
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    /// Feed one event from the drag source `source`. Returns the relocation
    /// it committed, if any.
    pub fn handle(&mut self, source: SourceId, event: DragEvent) -> Option<Relocation> {
        let Some(index) = self.registry.subscriber(source, event.kind()) else {
            log::trace!("no subscriber for {event:?} from {source:?}");
            return None;
        };
        match event {
            DragEvent::Start { x, y } => {
                self.start(source, index, Point::new(x, y));
                None
            }
            DragEvent::Move { x, y } => self.drag(source, index, Point::new(x, y)),
            DragEvent::End => {
                self.end(source);
                None
            }
        }
    }

    fn start(&mut self, source: SourceId, index: usize, pointer: Point) {
        if let Gesture::Dragging { source: other, .. } = self.gesture
            && other != source
        {
            log::debug!("drag from {source:?} supersedes {other:?}");
            self.ghost.end(&mut self.host);
            self.registry.end_drag(&mut self.host);
        }
        if let Some(item) = self.registry.item(index)
            && self.registry.float() != Some(item.node)
        {
            self.registry.clear_float();
        }
        self.registry.begin_drag(source);
        self.registry.snapshot(&self.host);
        self.gesture = Gesture::Dragging {
            source,
            relocations: 0,
        };
        if self.config.ghost {
            let element = self.registry.rects().get(index).copied().flatten();
            self.ghost.begin(source, element, pointer);
        }
    }

    fn drag(&mut self, source: SourceId, index: usize, pointer: Point) -> Option<Relocation> {
        let Gesture::Dragging {
            source: active,
            relocations,
        } = self.gesture
        else {
            log::trace!("move from {source:?} before start");
            return None;
        };
        if active != source {
            log::trace!("move from {source:?} while {active:?} is dragging");
            return None;
        }
        if self.config.ghost {
            self.ghost.follow(&mut self.host, pointer);
        }

        let target_index = detect_sorting(self.registry.rects(), index, pointer)?;
        let dragged = self.registry.item(index)?.node;
        let target = self.registry.item(target_index)?.node;
        let Some(relocation) = relocate(&mut self.tree, dragged, target) else {
            log::debug!("{dragged} crossed {target}: no relocation applies");
            return None;
        };

        self.registry.set_float(dragged);
        relocation.notify(&mut self.host);
        self.registry.swap(index, target_index);
        // Positions changed: the old snapshot must not drive the next move.
        self.registry.snapshot(&self.host);
        self.gesture = Gesture::Dragging {
            source,
            relocations: relocations + 1,
        };
        Some(relocation)
    }

    fn end(&mut self, source: SourceId) {
        if let Gesture::Dragging { relocations, .. } = self.gesture {
            log::debug!("drag from {source:?} ended after {relocations} relocation(s)");
        }
        self.ghost.end(&mut self.host);
        self.registry.end_drag(&mut self.host);
        self.gesture = Gesture::Idle;
    }
}
