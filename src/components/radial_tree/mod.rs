mod component;
pub mod config;
pub mod error;
pub mod layout;
mod render;
pub mod scale;
pub mod scene;
pub mod state;
mod style;
mod types;

pub use component::RadialDiagram;
pub use types::{HierarchyData, HierarchyNode, NodeIdx, NodeKind};
