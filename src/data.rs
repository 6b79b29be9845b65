//! Mesh dataset bundled with the app.

use std::collections::HashSet;

use log::{info, warn};

use crate::components::mesh_map::{MeshData, NodeId};

const BUNDLED: &str = include_str!("../data/mesh.json");

#[derive(Debug, thiserror::Error)]
pub enum DataError {
	#[error("invalid mesh data: {0}")]
	Decode(#[from] serde_json::Error),

	#[error("duplicate node id {0}")]
	DuplicateNode(NodeId),
}

pub type Result<T> = std::result::Result<T, DataError>;

/// Decode a mesh dataset. Links whose endpoints are not known nodes are kept
/// and only reported.
pub fn parse(json: &str) -> Result<MeshData> {
	let data: MeshData = serde_json::from_str(json)?;

	let mut ids = HashSet::new();
	for node in &data.nodes {
		if !ids.insert(node.id) {
			return Err(DataError::DuplicateNode(node.id));
		}
	}
	for link in &data.links {
		if !ids.contains(&link.from) || !ids.contains(&link.to) {
			warn!("Link {} has an unknown endpoint", link.key());
		}
	}
	info!(
		"Loaded {} nodes, {} links, {} kiosks",
		data.nodes.len(),
		data.links.len(),
		data.kiosks.len()
	);
	Ok(data)
}

pub fn load_bundled() -> Result<MeshData> {
	parse(BUNDLED)
}
