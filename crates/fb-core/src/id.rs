//! Component identity.
//!
//! Ids arrive from the rendering layer as names (`email_field`) or are
//! generated for components created on the canvas (`input-3`). Both are
//! interned into one process-wide table, so a `NodeId` is a 4-byte `Copy`
//! handle that hashes and compares without touching the string.

use crate::model::ComponentKind;
use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU32, Ordering};

static NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Sequence shared by all generated ids.
static NEXT_GENERATED: AtomicU32 = AtomicU32::new(1);

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Spur);

impl NodeId {
    /// The id named `name`. Equal names give equal ids.
    pub fn intern(name: &str) -> Self {
        NodeId(NAMES.get_or_intern(name))
    }

    /// A fresh id for a component of `kind`, e.g. `card-12`.
    pub fn generate(kind: ComponentKind) -> Self {
        let n = NEXT_GENERATED.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{}-{n}", kind.id_prefix()))
    }

    pub fn as_str(&self) -> &'static str {
        NAMES.resolve(&self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_same_id() {
        let a = NodeId::intern("email_field");
        assert_eq!(a, NodeId::intern("email_field"));
        assert_ne!(a, NodeId::intern("email_label"));
        assert_eq!(a.to_string(), "email_field");
        assert_eq!(format!("{a:?}"), "#email_field");
    }

    #[test]
    fn generated_ids_carry_the_kind() {
        let a = NodeId::generate(ComponentKind::Input);
        let b = NodeId::generate(ComponentKind::Input);
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("input-"));
        assert!(NodeId::generate(ComponentKind::Root).as_str().starts_with("root-"));
    }
}
