pub mod gallery;
pub mod mesh_map;
pub mod node_detail;
pub mod stats;
