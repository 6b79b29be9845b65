//! Paths the app navigates between.

use crate::components::mesh_map::NodeId;

pub const ROOT: &str = "/";

pub fn node_path(id: NodeId) -> String {
	format!("/nodes/{id}")
}

pub fn panorama_path(id: NodeId, index: usize) -> String {
	format!("/nodes/{id}/panoramas/{index}")
}

/// Selected node id for a location path such as `/nodes/42` or
/// `/nodes/42/panoramas/0`. Anything else selects nothing.
pub fn selected_node(path: &str) -> Option<NodeId> {
	let mut segments = path.trim_matches('/').split('/');
	match (segments.next(), segments.next()) {
		(Some("nodes"), Some(id)) => leading_id(id),
		_ => None,
	}
}

/// Parse the leading decimal digits of `segment`, ignoring anything after
/// them, so `42abc` reads as 42.
pub fn leading_id(segment: &str) -> Option<NodeId> {
	let digits = segment.trim_start();
	let end = digits
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(digits.len());
	digits[..end].parse().ok()
}
