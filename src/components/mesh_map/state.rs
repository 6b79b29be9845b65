use std::collections::HashSet;

use log::{debug, info};

use super::projection::Camera;
use super::registry::{Marker, Registry};
use super::selection::resolve;
use super::types::{Kiosk, LatLng, MeshData, NodeId, NodeStatus};

pub const NODE_RADIUS: f64 = 5.0;
pub const HIGHLIGHT_RADIUS: f64 = 8.0;
pub const KIOSK_SIZE: f64 = 7.0;
pub const HIT_RADIUS: f64 = 10.0;
/// Pointer travel, in pixels, below which a press counts as a click.
pub const CLICK_SLOP: f64 = 4.0;

pub const DEFAULT_CENTER: LatLng = LatLng {
	lat: 40.7001809,
	lng: -73.9595798,
};
pub const DEFAULT_ZOOM: f64 = 13.0;

/// Pan animation speed, in animation progress per second.
const PAN_SPEED: f64 = 2.5;

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub last_x: f64,
	pub last_y: f64,
}

#[derive(Clone, Debug)]
pub struct PanAnimation {
	pub from: LatLng,
	pub to: LatLng,
	pub t: f64,
}

/// What a press-and-release without dragging landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapClick {
	Node(NodeId),
	Background,
}

pub struct MapState {
	pub registry: Registry,
	pub kiosks: Vec<Kiosk>,
	pub camera: Camera,
	pub drag: DragState,
	pub hover: Option<NodeId>,
	pub width: f64,
	pub height: f64,
	hidden: HashSet<NodeStatus>,
	selection: Option<NodeId>,
	pan: Option<PanAnimation>,
}

impl MapState {
	pub fn new(data: &MeshData, width: f64, height: f64) -> Self {
		let mut registry = Registry::default();
		for node in &data.nodes {
			registry.register_node(node.clone());
		}
		for link in &data.links {
			registry.register_link(link.clone());
		}
		info!(
			"Registered {} node markers, {} link lines, {} kiosks",
			registry.markers().count(),
			registry.lines().count(),
			data.kiosks.len()
		);

		Self {
			registry,
			kiosks: data.kiosks.clone(),
			camera: Camera {
				center: DEFAULT_CENTER,
				zoom: DEFAULT_ZOOM,
			},
			drag: DragState::default(),
			hover: None,
			width,
			height,
			hidden: HashSet::new(),
			selection: None,
			pan: None,
		}
	}

	#[cfg(test)]
	pub fn selection(&self) -> Option<NodeId> {
		self.selection
	}

	/// Re-derive marker and line visibility if `next` differs from the last
	/// applied selection. Returns whether anything was recomputed.
	pub fn apply_selection(&mut self, next: Option<NodeId>) -> bool {
		if next == self.selection {
			return false;
		}
		self.resolve_selection(next);
		true
	}

	/// Re-derive visibility for `next` regardless of the last applied selection.
	pub fn resolve_selection(&mut self, next: Option<NodeId>) {
		let previous = self.selection;
		self.selection = next;
		let Some(resolution) = resolve(previous, next, &self.registry) else {
			debug!("Selection {:?} -> {:?}: nothing to update", previous, next);
			return;
		};
		debug!(
			"Selection {:?} -> {:?}: {} visibility updates",
			previous,
			next,
			resolution.batch.len()
		);
		self.registry.apply(&resolution.batch);
		if let Some(target) = resolution.pan_to {
			self.pan_to(target);
		}
	}

	pub fn pan_to(&mut self, target: LatLng) {
		self.pan = Some(PanAnimation {
			from: self.camera.center,
			to: target,
			t: 0.0,
		});
	}

	#[cfg(test)]
	pub fn is_panning(&self) -> bool {
		self.pan.is_some()
	}

	pub fn set_hidden(&mut self, hidden: HashSet<NodeStatus>) {
		self.hidden = hidden;
		if self
			.hover
			.and_then(|id| self.registry.marker(id))
			.is_some_and(|marker| !self.is_shown(marker))
		{
			self.hover = None;
		}
	}

	pub fn is_shown(&self, marker: &Marker) -> bool {
		!self.hidden.contains(&marker.node.status)
	}

	/// Whether a node with this id is registered and not filtered out. Link
	/// endpoints that were never registered count as shown.
	pub fn is_node_shown(&self, id: NodeId) -> bool {
		self.registry
			.marker(id)
			.is_none_or(|marker| self.is_shown(marker))
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		let mut found = None;
		let mut best = HIT_RADIUS;
		for marker in self.registry.markers() {
			if !self.is_shown(marker) {
				continue;
			}
			let (x, y) = self
				.camera
				.project(marker.node.coordinates, self.width, self.height);
			let dist = ((x - sx).powi(2) + (y - sy).powi(2)).sqrt();
			if dist < best {
				best = dist;
				found = Some(marker.node.id);
			}
		}
		found
	}

	/// CSS cursor for the current drag and hover state.
	pub fn cursor(&self) -> &'static str {
		if self.drag.moved {
			"grabbing"
		} else if self.hover.is_some() {
			"pointer"
		} else {
			"grab"
		}
	}

	pub fn set_hover(&mut self, node: Option<NodeId>) {
		self.hover = node;
	}

	pub fn begin_drag(&mut self, x: f64, y: f64) {
		self.drag = DragState {
			active: true,
			moved: false,
			start_x: x,
			start_y: y,
			last_x: x,
			last_y: y,
		};
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			return;
		}
		if !self.drag.moved
			&& ((x - self.drag.start_x).powi(2) + (y - self.drag.start_y).powi(2)).sqrt()
				>= CLICK_SLOP
		{
			self.drag.moved = true;
			self.pan = None;
		}
		if self.drag.moved {
			self.camera
				.pan_by(x - self.drag.last_x, y - self.drag.last_y);
		}
		self.drag.last_x = x;
		self.drag.last_y = y;
	}

	/// End a drag; a release without movement is reported as a click.
	pub fn end_drag(&mut self, x: f64, y: f64) -> Option<MapClick> {
		if !self.drag.active {
			return None;
		}
		let clicked = !self.drag.moved;
		self.drag = DragState::default();
		clicked.then(|| match self.node_at_position(x, y) {
			Some(id) => MapClick::Node(id),
			None => MapClick::Background,
		})
	}

	pub fn cancel_drag(&mut self) {
		self.drag = DragState::default();
		self.hover = None;
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta: f64) {
		self.pan = None;
		self.camera
			.zoom_at(sx, sy, delta, self.width, self.height);
	}

	pub fn tick(&mut self, dt: f64) {
		let Some(pan) = self.pan.as_mut() else {
			return;
		};
		pan.t = (pan.t + dt * PAN_SPEED).min(1.0);
		let e = ease_out_cubic(pan.t);
		self.camera.center = LatLng {
			lat: pan.from.lat + (pan.to.lat - pan.from.lat) * e,
			lng: pan.from.lng + (pan.to.lng - pan.from.lng) * e,
		};
		if pan.t >= 1.0 {
			self.pan = None;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mesh_map::types::{Link, LinkStatus, Node, Visibility};

	fn node(id: NodeId, status: NodeStatus, lng: f64) -> Node {
		Node {
			id,
			status,
			coordinates: [lng, DEFAULT_CENTER.lat],
			name: None,
			notes: None,
			connected_nodes: Vec::new(),
			links: Vec::new(),
			panoramas: Vec::new(),
		}
	}

	fn sample() -> MeshData {
		let link = Link {
			from: 1,
			to: 2,
			coordinates: vec![[DEFAULT_CENTER.lng, DEFAULT_CENTER.lat], [-73.95, 40.7]],
			status: LinkStatus::Active,
		};
		let mut first = node(1, NodeStatus::Installed, DEFAULT_CENTER.lng);
		first.connected_nodes = vec![2];
		first.links = vec![link.clone()];
		MeshData {
			nodes: vec![first, node(2, NodeStatus::Planned, -73.95)],
			links: vec![link],
			kiosks: Vec::new(),
		}
	}

	#[test]
	fn repeated_selection_is_skipped() {
		let mut state = MapState::new(&sample(), 800.0, 600.0);
		assert!(!state.apply_selection(None));
		assert!(state.apply_selection(Some(1)));
		assert!(!state.apply_selection(Some(1)));
		assert_eq!(state.selection(), Some(1));
	}

	#[test]
	fn clearing_selection_leaves_no_stale_highlight() {
		let mut state = MapState::new(&sample(), 800.0, 600.0);
		state.apply_selection(Some(1));
		assert_eq!(
			state.registry.marker(1).unwrap().visibility(),
			Visibility::Highlight
		);
		state.apply_selection(None);
		assert!(
			state
				.registry
				.markers()
				.all(|marker| marker.visibility() == Visibility::Default)
		);
		assert!(
			state
				.registry
				.lines()
				.all(|line| line.visibility() == Visibility::Default)
		);
	}

	#[test]
	fn selection_pans_camera_to_node() {
		let mut state = MapState::new(&sample(), 800.0, 600.0);
		state.apply_selection(Some(2));
		assert!(state.is_panning());
		for _ in 0..100 {
			state.tick(0.016);
		}
		assert!(!state.is_panning());
		assert!((state.camera.center.lng + 73.95).abs() < 1e-9);
		assert!((state.camera.center.lat - DEFAULT_CENTER.lat).abs() < 1e-9);
	}

	#[test]
	fn click_versus_drag() {
		let mut state = MapState::new(&sample(), 800.0, 600.0);
		state.begin_drag(400.0, 300.0);
		assert_eq!(state.end_drag(401.0, 300.0), Some(MapClick::Node(1)));

		state.begin_drag(10.0, 10.0);
		assert_eq!(state.end_drag(10.0, 10.0), Some(MapClick::Background));

		state.begin_drag(400.0, 300.0);
		state.drag_to(450.0, 300.0);
		assert_eq!(state.end_drag(450.0, 300.0), None);
		assert!(state.camera.center.lng < DEFAULT_CENTER.lng);
	}

	#[test]
	fn cursor_follows_hover_and_drag() {
		let mut state = MapState::new(&sample(), 800.0, 600.0);
		assert_eq!(state.cursor(), "grab");

		let hovered = state.node_at_position(400.0, 300.0);
		state.set_hover(hovered);
		assert_eq!(state.cursor(), "pointer");

		state.begin_drag(400.0, 300.0);
		assert_eq!(state.cursor(), "pointer");
		state.drag_to(420.0, 300.0);
		assert_eq!(state.cursor(), "grabbing");

		state.end_drag(420.0, 300.0);
		state.set_hover(None);
		assert_eq!(state.cursor(), "grab");
	}

	#[test]
	fn hidden_statuses_are_not_hit() {
		let mut state = MapState::new(&sample(), 800.0, 600.0);
		assert_eq!(state.node_at_position(400.0, 300.0), Some(1));
		state.set_hidden(HashSet::from([NodeStatus::Installed]));
		assert_eq!(state.node_at_position(400.0, 300.0), None);
		assert!(!state.is_node_shown(1));
		assert!(state.is_node_shown(2));
		assert!(state.is_node_shown(77));
	}
}
