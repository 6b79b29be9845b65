mod component;
pub mod projection;
mod registry;
mod render;
pub mod selection;
mod state;
mod types;

pub use component::MeshMapCanvas;
pub use types::{MeshData, Node, NodeId, NodeStatus};
