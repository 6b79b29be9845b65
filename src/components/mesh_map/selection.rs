//! Highlight propagation for the selected node.
//!
//! Given the previous and next selection, [`resolve`] decides the visibility
//! of every registered marker and line and where the camera should pan. It
//! never touches the registry; the caller applies the returned batch.

use std::collections::BTreeMap;

use super::registry::Registry;
use super::types::{LatLng, LinkKey, NodeId, Visibility};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKey {
	Node(NodeId),
	Link(LinkKey),
}

/// Visibility updates collected before being applied together. Setting the
/// same key twice keeps the last value, so each entity ends up with one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibilityBatch {
	updates: BTreeMap<EntityKey, Visibility>,
}

impl VisibilityBatch {
	pub fn set(&mut self, key: EntityKey, visibility: Visibility) {
		self.updates.insert(key, visibility);
	}

	pub fn get(&self, key: &EntityKey) -> Option<Visibility> {
		self.updates.get(key).copied()
	}

	pub fn node(&self, id: NodeId) -> Option<Visibility> {
		self.get(&EntityKey::Node(id))
	}

	pub fn link(&self, key: &LinkKey) -> Option<Visibility> {
		self.get(&EntityKey::Link(key.clone()))
	}

	pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, Visibility)> {
		self.updates.iter().map(|(key, visibility)| (key, *visibility))
	}

	pub fn len(&self) -> usize {
		self.updates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.updates.is_empty()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
	pub batch: VisibilityBatch,
	pub pan_to: Option<LatLng>,
}

/// Compute the visibility changes for a selection transition.
///
/// Returns `None` when there is nothing to do: no selection before or after,
/// or a selected id without a registered marker.
pub fn resolve(
	previous: Option<NodeId>,
	next: Option<NodeId>,
	registry: &Registry,
) -> Option<Resolution> {
	let Some(selected_id) = next else {
		previous?;
		return Some(reset_all(registry));
	};
	let selected = &registry.marker(selected_id)?.node;

	let mut batch = VisibilityBatch::default();

	for marker in registry.markers() {
		let node = &marker.node;
		let visibility = if node.id == selected.id {
			Visibility::Highlight
		} else if selected.connected_nodes.contains(&node.id) {
			Visibility::Dim
		} else if selected.is_installed() || !node.is_installed() {
			Visibility::Dim
		} else {
			Visibility::Default
		};
		batch.set(EntityKey::Node(node.id), visibility);
	}

	for key in registry.link_keys() {
		batch.set(EntityKey::Link(key.clone()), Visibility::Dim);
	}
	for link in &selected.links {
		let key = link.key();
		if registry.line(&key).is_some() {
			batch.set(EntityKey::Link(key), Visibility::Highlight);
		}
	}

	Some(Resolution {
		batch,
		pan_to: Some(LatLng::from(selected.coordinates)),
	})
}

fn reset_all(registry: &Registry) -> Resolution {
	let mut batch = VisibilityBatch::default();
	for id in registry.node_ids() {
		batch.set(EntityKey::Node(id), Visibility::Default);
	}
	for key in registry.link_keys() {
		batch.set(EntityKey::Link(key.clone()), Visibility::Default);
	}
	Resolution {
		batch,
		pan_to: None,
	}
}
