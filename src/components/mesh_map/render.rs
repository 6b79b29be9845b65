use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::registry::Marker;
use super::state::{HIGHLIGHT_RADIUS, KIOSK_SIZE, MapState, NODE_RADIUS};
use super::types::{LinkStatus, Visibility};

const BACKGROUND: &str = "#f5f5f5";
const LINK_COLOR: (u8, u8, u8) = (0, 122, 255);
const KIOSK_COLOR: &str = "#ff2d55";

fn link_style(visibility: Visibility) -> (f64, f64) {
	// (alpha, width)
	match visibility {
		Visibility::Default => (0.6, 2.0),
		Visibility::Dim => (0.12, 1.5),
		Visibility::Highlight => (1.0, 4.0),
	}
}

pub fn render(state: &MapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_links(state, ctx);
	draw_kiosks(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_links(state: &MapState, ctx: &CanvasRenderingContext2d) {
	let (r, g, b) = LINK_COLOR;
	// Highlighted lines go last so they sit on top.
	let mut lines: Vec<_> = state
		.registry
		.lines()
		.filter(|line| state.is_node_shown(line.link.from) && state.is_node_shown(line.link.to))
		.collect();
	lines.sort_by_key(|line| line.visibility() == Visibility::Highlight);

	for line in lines {
		let mut points = line
			.link
			.coordinates
			.iter()
			.map(|&c| state.camera.project(c, state.width, state.height));
		let Some((x0, y0)) = points.next() else {
			continue;
		};

		let (alpha, width) = link_style(line.visibility());
		ctx.set_stroke_style_str(&format!("rgba({r}, {g}, {b}, {alpha})"));
		ctx.set_line_width(width);
		let dash = match line.link.status {
			LinkStatus::Planned => js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0)),
			_ => js_sys::Array::new(),
		};
		let _ = ctx.set_line_dash(&dash);

		ctx.begin_path();
		ctx.move_to(x0, y0);
		for (x, y) in points {
			ctx.line_to(x, y);
		}
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_kiosks(state: &MapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(KIOSK_COLOR);
	for kiosk in &state.kiosks {
		let (x, y) = state
			.camera
			.project(kiosk.coordinates, state.width, state.height);
		ctx.fill_rect(
			x - KIOSK_SIZE / 2.0,
			y - KIOSK_SIZE / 2.0,
			KIOSK_SIZE,
			KIOSK_SIZE,
		);
	}
}

fn draw_nodes(state: &MapState, ctx: &CanvasRenderingContext2d) {
	let mut markers: Vec<&Marker> = state
		.registry
		.markers()
		.filter(|marker| state.is_shown(marker))
		.collect();
	markers.sort_by_key(|marker| match marker.visibility() {
		Visibility::Dim => 0,
		Visibility::Default => 1,
		Visibility::Highlight => 2,
	});

	for marker in markers {
		let node = &marker.node;
		let (x, y) = state
			.camera
			.project(node.coordinates, state.width, state.height);
		let hovered = state.hover == Some(node.id);
		let (alpha, radius) = match marker.visibility() {
			Visibility::Default => (1.0, NODE_RADIUS),
			Visibility::Dim => (0.3, NODE_RADIUS * 0.85),
			Visibility::Highlight => (1.0, HIGHLIGHT_RADIUS),
		};
		let radius = if hovered { radius + 1.5 } else { radius };

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.status.color());
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if marker.visibility() == Visibility::Highlight {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 3.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(0, 0, 0, 0.6)");
			ctx.set_line_width(2.0);
			ctx.stroke();
		}

		if hovered || marker.visibility() == Visibility::Highlight {
			let label = node
				.name
				.clone()
				.unwrap_or_else(|| format!("Node {}", node.id));
			ctx.set_fill_style_str("#1c1c1e");
			ctx.set_font("12px sans-serif");
			let _ = ctx.fill_text(&label, x + radius + 5.0, y + 4.0);
		}
	}
}
