pub mod config;
pub mod control;
pub mod ghost;
pub mod host;
pub mod input;
pub mod registry;
pub mod sorting;

pub use config::ControlConfig;
pub use control::{Gesture, TreeControl};
pub use host::Host;
pub use input::{DragEvent, DragEventKind, DragSource, ElementId, SourceId};
pub use registry::{Registration, Registry, TreeItem};
