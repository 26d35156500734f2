//! Form component data model.
//!
//! A form is a tree of components. Containers (cards, generic containers)
//! may hold nested children; leaf widgets (inputs, labels, buttons) never do.
//! Whether a node may receive nested children during a drag is captured by
//! [`Nesting`], separately from its kind, because a container can have its
//! nesting switched off by the user.

use crate::id::NodeId;

// ─── Component kinds ─────────────────────────────────────────────────────

/// What a node renders as. The core never renders; the kind only drives the
/// default nesting capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// Root of the form canvas.
    Root,
    /// Generic layout container.
    Container,
    /// Material-style card.
    Card,
    /// Labelled form field wrapper.
    FormField,
    Input,
    Label,
    Button,
    Select,
    Checkbox,
}

impl ComponentKind {
    /// Nesting capability a freshly created component of this kind has.
    pub fn default_nesting(self) -> Nesting {
        match self {
            Self::Root | Self::Container | Self::Card => Nesting::Enabled,
            _ => Nesting::Unsupported,
        }
    }

    /// Lowercase prefix used for generated ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Container => "container",
            Self::Card => "card",
            Self::FormField => "form_field",
            Self::Input => "input",
            Self::Label => "label",
            Self::Button => "button",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
        }
    }
}

/// Whether a node accepts nested children when something is dragged onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nesting {
    /// Container with nesting switched on.
    Enabled,
    /// Container type with nesting switched off.
    Disabled,
    /// Not a container at all.
    #[default]
    Unsupported,
}

impl Nesting {
    pub fn accepts_children(self) -> bool {
        matches!(self, Self::Enabled)
    }

    pub fn is_container(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// A single component in the form tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FormNode {
    pub id: NodeId,
    pub kind: ComponentKind,

    /// Depth in the tree. Maintained by [`FormTree`](crate::tree::FormTree);
    /// any value set before insertion is overwritten.
    pub level: u32,

    pub nesting: Nesting,
}

impl FormNode {
    pub fn new(id: NodeId, kind: ComponentKind) -> Self {
        Self {
            id,
            kind,
            level: 0,
            nesting: kind.default_nesting(),
        }
    }

    /// Create a node with a generated id (`input-4`, `card-9`, ...).
    pub fn anonymous(kind: ComponentKind) -> Self {
        Self::new(NodeId::generate(kind), kind)
    }

    #[must_use]
    pub fn with_nesting(mut self, nesting: Nesting) -> Self {
        self.nesting = nesting;
        self
    }
}
