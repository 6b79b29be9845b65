use std::collections::BTreeMap;

use super::selection::{EntityKey, VisibilityBatch};
use super::types::{Link, LinkKey, Node, NodeId, Visibility};

/// A rendered node marker.
#[derive(Clone, Debug)]
pub struct Marker {
	pub node: Node,
	visibility: Visibility,
}

impl Marker {
	pub fn visibility(&self) -> Visibility {
		self.visibility
	}

	pub fn set_visibility(&mut self, visibility: Visibility) {
		self.visibility = visibility;
	}
}

/// A rendered link polyline.
#[derive(Clone, Debug)]
pub struct Line {
	pub link: Link,
	visibility: Visibility,
}

impl Line {
	pub fn visibility(&self) -> Visibility {
		self.visibility
	}

	pub fn set_visibility(&mut self, visibility: Visibility) {
		self.visibility = visibility;
	}
}

/// Markers and lines currently on the map, keyed by stable entity keys.
///
/// Entries are only ever added; re-registering a key replaces the data but
/// keeps the current visibility.
#[derive(Clone, Debug, Default)]
pub struct Registry {
	markers: BTreeMap<NodeId, Marker>,
	lines: BTreeMap<LinkKey, Line>,
}

impl Registry {
	pub fn register_node(&mut self, node: Node) {
		match self.markers.get_mut(&node.id) {
			Some(marker) => marker.node = node,
			None => {
				self.markers.insert(
					node.id,
					Marker {
						node,
						visibility: Visibility::Default,
					},
				);
			}
		}
	}

	pub fn register_link(&mut self, link: Link) {
		let key = link.key();
		match self.lines.get_mut(&key) {
			Some(line) => line.link = link,
			None => {
				self.lines.insert(
					key,
					Line {
						link,
						visibility: Visibility::Default,
					},
				);
			}
		}
	}

	pub fn marker(&self, id: NodeId) -> Option<&Marker> {
		self.markers.get(&id)
	}

	pub fn line(&self, key: &LinkKey) -> Option<&Line> {
		self.lines.get(key)
	}

	pub fn markers(&self) -> impl Iterator<Item = &Marker> {
		self.markers.values()
	}

	pub fn lines(&self) -> impl Iterator<Item = &Line> {
		self.lines.values()
	}

	pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
		self.markers.keys().copied()
	}

	pub fn link_keys(&self) -> impl Iterator<Item = &LinkKey> {
		self.lines.keys()
	}

	/// Apply every update of `batch` in one pass. Keys without a registered
	/// entity are skipped.
	pub fn apply(&mut self, batch: &VisibilityBatch) {
		for (key, visibility) in batch.iter() {
			match key {
				EntityKey::Node(id) => {
					if let Some(marker) = self.markers.get_mut(id) {
						marker.set_visibility(visibility);
					}
				}
				EntityKey::Link(link_key) => {
					if let Some(line) = self.lines.get_mut(link_key) {
						line.set_visibility(visibility);
					}
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mesh_map::types::{LinkStatus, NodeStatus};

	fn node(id: NodeId) -> Node {
		Node {
			id,
			status: NodeStatus::Installed,
			coordinates: [-73.95, 40.7],
			name: None,
			notes: None,
			connected_nodes: Vec::new(),
			links: Vec::new(),
			panoramas: Vec::new(),
		}
	}

	fn link(from: NodeId, to: NodeId) -> Link {
		Link {
			from,
			to,
			coordinates: vec![[-73.95, 40.7], [-73.96, 40.71]],
			status: LinkStatus::Active,
		}
	}

	#[test]
	fn identical_links_register_once() {
		let mut registry = Registry::default();
		registry.register_link(link(1, 2));
		registry.register_link(link(1, 2));
		registry.register_link(link(2, 1));
		assert_eq!(registry.lines().count(), 2);
		assert!(registry.line(&link(1, 2).key()).is_some());
	}

	#[test]
	fn apply_skips_unknown_keys() {
		let mut registry = Registry::default();
		registry.register_node(node(1));
		registry.register_link(link(1, 2));

		let mut batch = VisibilityBatch::default();
		batch.set(EntityKey::Node(1), Visibility::Highlight);
		batch.set(EntityKey::Node(99), Visibility::Dim);
		batch.set(EntityKey::Link(link(1, 2).key()), Visibility::Dim);
		batch.set(EntityKey::Link(link(3, 4).key()), Visibility::Highlight);
		registry.apply(&batch);

		assert_eq!(registry.marker(1).unwrap().visibility(), Visibility::Highlight);
		assert!(registry.marker(99).is_none());
		assert_eq!(
			registry.line(&link(1, 2).key()).unwrap().visibility(),
			Visibility::Dim
		);
		assert_eq!(registry.lines().count(), 1);
	}

	#[test]
	fn reregistering_keeps_visibility() {
		let mut registry = Registry::default();
		registry.register_node(node(1));
		let mut batch = VisibilityBatch::default();
		batch.set(EntityKey::Node(1), Visibility::Dim);
		registry.apply(&batch);

		let mut renamed = node(1);
		renamed.name = Some("Rooftop".into());
		registry.register_node(renamed);

		let marker = registry.marker(1).unwrap();
		assert_eq!(marker.visibility(), Visibility::Dim);
		assert_eq!(marker.node.name.as_deref(), Some("Rooftop"));
	}
}
