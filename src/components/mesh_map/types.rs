use std::fmt;

use serde::Deserialize;

/// Unique identifier of a mesh node, as carried in `/nodes/:node_id`.
pub type NodeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum NodeStatus {
	Installed,
	Planned,
	Potential,
	Abandoned,
	#[serde(other)]
	Unknown,
}

impl NodeStatus {
	pub const ALL: [NodeStatus; 5] = [
		NodeStatus::Installed,
		NodeStatus::Planned,
		NodeStatus::Potential,
		NodeStatus::Abandoned,
		NodeStatus::Unknown,
	];

	pub fn label(self) -> &'static str {
		match self {
			NodeStatus::Installed => "Installed",
			NodeStatus::Planned => "Planned",
			NodeStatus::Potential => "Potential",
			NodeStatus::Abandoned => "Abandoned",
			NodeStatus::Unknown => "Unknown",
		}
	}

	pub fn color(self) -> &'static str {
		match self {
			NodeStatus::Installed => "#007aff",
			NodeStatus::Planned => "#ff9500",
			NodeStatus::Potential => "#8e8e93",
			NodeStatus::Abandoned => "#c7c7cc",
			NodeStatus::Unknown => "#aeaeb2",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
	Active,
	Planned,
	Dead,
	#[serde(other)]
	Unknown,
}

impl LinkStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			LinkStatus::Active => "active",
			LinkStatus::Planned => "planned",
			LinkStatus::Dead => "dead",
			LinkStatus::Unknown => "unknown",
		}
	}
}

/// Geographic position as stored in the dataset: `[longitude, latitude]`.
pub type LngLat = [f64; 2];

/// Camera target, in the order the map expects it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLng {
	pub lat: f64,
	pub lng: f64,
}

impl From<LngLat> for LatLng {
	fn from([lng, lat]: LngLat) -> Self {
		Self { lat, lng }
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Link {
	pub from: NodeId,
	pub to: NodeId,
	pub coordinates: Vec<LngLat>,
	pub status: LinkStatus,
}

impl Link {
	pub fn key(&self) -> LinkKey {
		LinkKey::new(self)
	}
}

/// Composite identity of a link over `(from, to, coordinates, status)`.
///
/// Coordinates are written with `f64`'s shortest round-trip formatting, so two
/// links produce the same key exactly when all four parts are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkKey(String);

impl LinkKey {
	pub fn new(link: &Link) -> Self {
		let coordinates = link
			.coordinates
			.iter()
			.flat_map(|[lng, lat]| [lng.to_string(), lat.to_string()])
			.collect::<Vec<_>>()
			.join(",");
		Self(format!(
			"{}-{} {} {}",
			link.from,
			link.to,
			coordinates,
			link.status.as_str()
		))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for LinkKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	pub id: NodeId,
	pub status: NodeStatus,
	pub coordinates: LngLat,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub notes: Option<String>,
	#[serde(default)]
	pub connected_nodes: Vec<NodeId>,
	#[serde(default)]
	pub links: Vec<Link>,
	#[serde(default)]
	pub panoramas: Vec<String>,
}

impl Node {
	pub fn is_installed(&self) -> bool {
		self.status == NodeStatus::Installed
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Kiosk {
	pub id: String,
	pub coordinates: LngLat,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MeshData {
	pub nodes: Vec<Node>,
	pub links: Vec<Link>,
	#[serde(default)]
	pub kiosks: Vec<Kiosk>,
}

impl MeshData {
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.iter().find(|node| node.id == id)
	}
}

/// Rendering emphasis of a node marker or link line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
	#[default]
	Default,
	Dim,
	Highlight,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn link(from: NodeId, to: NodeId, status: LinkStatus) -> Link {
		Link {
			from,
			to,
			coordinates: vec![[-73.98, 40.71], [-73.95, 40.69]],
			status,
		}
	}

	#[test]
	fn identical_links_share_a_key() {
		assert_eq!(
			link(5, 6, LinkStatus::Active).key(),
			link(5, 6, LinkStatus::Active).key()
		);
	}

	#[test]
	fn key_distinguishes_every_component() {
		let base = link(5, 6, LinkStatus::Active);
		let mut moved = base.clone();
		moved.coordinates[1][0] = -73.951;
		assert_ne!(base.key(), link(6, 5, LinkStatus::Active).key());
		assert_ne!(base.key(), link(5, 6, LinkStatus::Planned).key());
		assert_ne!(base.key(), moved.key());
	}

	#[test]
	fn key_format() {
		assert_eq!(
			link(5, 6, LinkStatus::Active).key().as_str(),
			"5-6 -73.98,40.71,-73.95,40.69 active"
		);
	}

	#[test]
	fn lng_lat_swaps_into_lat_lng() {
		let target = LatLng::from([-73.9595798, 40.7001809]);
		assert_eq!(target.lat, 40.7001809);
		assert_eq!(target.lng, -73.9595798);
	}

	#[test]
	fn unknown_statuses_deserialize() {
		let node: Node =
			serde_json::from_str(r#"{"id": 1, "status": "Decommissioned", "coordinates": [0.0, 0.0]}"#)
				.unwrap();
		assert_eq!(node.status, NodeStatus::Unknown);
		assert!(node.connected_nodes.is_empty());

		let link: Link = serde_json::from_str(
			r#"{"from": 1, "to": 2, "coordinates": [], "status": "vpn"}"#,
		)
		.unwrap();
		assert_eq!(link.status, LinkStatus::Unknown);
	}
}
