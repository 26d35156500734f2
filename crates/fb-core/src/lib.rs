pub mod error;
pub mod geometry;
pub mod id;
pub mod model;
pub mod relocate;
pub mod render;
pub mod tree;

pub use error::TreeError;
pub use id::NodeId;
pub use model::*;
pub use relocate::{Relocation, RelocationCase, classify, relocate};
pub use render::Renderable;
pub use tree::{ChildOrder, FormTree};

// Re-export kurbo geometry so downstream crates share one version.
pub use kurbo::{Point, Rect, Vec2};
