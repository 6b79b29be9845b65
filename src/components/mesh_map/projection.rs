use std::f64::consts::PI;

use super::types::{LatLng, LngLat};

pub const TILE_SIZE: f64 = 256.0;
pub const MIN_ZOOM: f64 = 3.0;
pub const MAX_ZOOM: f64 = 20.0;
pub const MERCATOR_MAX_LAT_DEG: f64 = 85.05112878;

/// Longitude to normalized Web Mercator x in `[0, 1]`.
pub fn mercator_x(lng: f64) -> f64 {
	(lng + 180.0) / 360.0
}

/// Latitude to normalized Web Mercator y in `[0, 1]`, north at 0.
pub fn mercator_y(lat: f64) -> f64 {
	let lat = lat
		.clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG)
		.to_radians();
	(1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0
}

pub fn inverse_mercator_lng(x: f64) -> f64 {
	x * 360.0 - 180.0
}

pub fn inverse_mercator_lat(y: f64) -> f64 {
	(PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
	pub center: LatLng,
	pub zoom: f64,
}

impl Camera {
	pub fn world_size(&self) -> f64 {
		TILE_SIZE * 2f64.powf(self.zoom)
	}

	/// Screen position of a dataset coordinate for a viewport of `width` x `height`.
	pub fn project(&self, [lng, lat]: LngLat, width: f64, height: f64) -> (f64, f64) {
		let size = self.world_size();
		(
			(mercator_x(lng) - mercator_x(self.center.lng)) * size + width / 2.0,
			(mercator_y(lat) - mercator_y(self.center.lat)) * size + height / 2.0,
		)
	}

	pub fn unproject(&self, sx: f64, sy: f64, width: f64, height: f64) -> LatLng {
		let size = self.world_size();
		let x = mercator_x(self.center.lng) + (sx - width / 2.0) / size;
		let y = mercator_y(self.center.lat) + (sy - height / 2.0) / size;
		LatLng {
			lat: inverse_mercator_lat(y.clamp(0.0, 1.0)),
			lng: inverse_mercator_lng(x),
		}
	}

	/// Move the center by a screen-space delta, as when dragging the map.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		let size = self.world_size();
		let x = mercator_x(self.center.lng) - dx / size;
		let y = (mercator_y(self.center.lat) - dy / size).clamp(0.0, 1.0);
		self.center = LatLng {
			lat: inverse_mercator_lat(y),
			lng: inverse_mercator_lng(x),
		};
	}

	/// Zoom by `delta` levels keeping the geographic point under `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta: f64, width: f64, height: f64) {
		let anchor = self.unproject(sx, sy, width, height);
		self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
		let (ax, ay) = self.project([anchor.lng, anchor.lat], width, height);
		self.pan_by(sx - ax, sy - ay);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const NYC: LatLng = LatLng {
		lat: 40.7001809,
		lng: -73.9595798,
	};

	#[test]
	fn mercator_roundtrip() {
		assert!((inverse_mercator_lng(mercator_x(-73.95)) + 73.95).abs() < 1e-9);
		assert!((inverse_mercator_lat(mercator_y(40.7)) - 40.7).abs() < 1e-9);
		assert!((mercator_y(0.0) - 0.5).abs() < 1e-12);
	}

	#[test]
	fn center_projects_to_viewport_middle() {
		let camera = Camera {
			center: NYC,
			zoom: 13.0,
		};
		let (x, y) = camera.project([NYC.lng, NYC.lat], 800.0, 600.0);
		assert!((x - 400.0).abs() < 1e-6);
		assert!((y - 300.0).abs() < 1e-6);
	}

	#[test]
	fn north_is_up() {
		let camera = Camera {
			center: NYC,
			zoom: 13.0,
		};
		let (_, north) = camera.project([NYC.lng, NYC.lat + 0.01], 800.0, 600.0);
		let (east, _) = camera.project([NYC.lng + 0.01, NYC.lat], 800.0, 600.0);
		assert!(north < 300.0);
		assert!(east > 400.0);
	}

	#[test]
	fn zoom_keeps_anchor_fixed() {
		let mut camera = Camera {
			center: NYC,
			zoom: 13.0,
		};
		let anchor = camera.unproject(100.0, 120.0, 800.0, 600.0);
		camera.zoom_at(100.0, 120.0, 1.0, 800.0, 600.0);
		let (x, y) = camera.project([anchor.lng, anchor.lat], 800.0, 600.0);
		assert_eq!(camera.zoom, 14.0);
		assert!((x - 100.0).abs() < 1e-3);
		assert!((y - 120.0).abs() < 1e-3);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut camera = Camera {
			center: NYC,
			zoom: MAX_ZOOM,
		};
		camera.zoom_at(0.0, 0.0, 5.0, 800.0, 600.0);
		assert_eq!(camera.zoom, MAX_ZOOM);
	}
}
