use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use crate::routes;

use super::render;
use super::state::{MapClick, MapState};
use super::types::{MeshData, NodeId, NodeStatus};

/// Delay before the selection present at mount is re-checked.
const INITIAL_SELECTION_DELAY: Duration = Duration::from_millis(500);
/// Zoom levels per wheel notch.
const WHEEL_ZOOM_STEP: f64 = 0.25;

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|w| w.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|h| h.as_f64())
			.unwrap_or(600.0),
	)
}

/// Animation frame loop and window resize listener of one mounted map.
///
/// `stop` cancels the pending frame, removes the resize listener and drops
/// both callbacks; dropping the loop stops it too.
#[derive(Default)]
struct FrameLoop {
	frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	handle: Rc<Cell<Option<i32>>>,
	resize: Option<Closure<dyn FnMut()>>,
}

impl FrameLoop {
	fn start(&mut self, window: &Window, mut tick: impl FnMut() + 'static) {
		self.cancel_frame();
		let (frame, handle) = (self.frame.clone(), self.handle.clone());
		*self.frame.borrow_mut() = Some(Closure::new(move || {
			tick();
			if let (Some(win), Some(cb)) = (web_sys::window(), frame.borrow().as_ref()) {
				handle.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(cb) = self.frame.borrow().as_ref() {
			self.handle
				.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	}

	fn listen_resize(&mut self, window: &Window, on_resize: impl FnMut() + 'static) {
		self.remove_resize();
		let cb = Closure::<dyn FnMut()>::new(on_resize);
		let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		self.resize = Some(cb);
	}

	fn is_running(&self) -> bool {
		self.frame.borrow().is_some()
	}

	fn stop(&mut self) {
		self.remove_resize();
		if self.cancel_frame() {
			debug!("Map frame loop stopped");
		}
	}

	/// Cancel the pending frame and drop the frame callback. Returns whether a
	/// loop was running.
	fn cancel_frame(&mut self) -> bool {
		if let Some(id) = self.handle.take() {
			if let Some(win) = web_sys::window() {
				let _ = win.cancel_animation_frame(id);
			}
		}
		self.frame.borrow_mut().take().is_some()
	}

	fn remove_resize(&mut self) {
		if let Some(cb) = self.resize.take() {
			if let Some(win) = web_sys::window() {
				let _ = win
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.stop();
	}
}

fn local_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Canvas map of mesh nodes, kiosks and links.
///
/// `selected` is the node id taken from the route. Clicking a node navigates to
/// it; clicking the background or pressing Escape navigates back to `/`.
#[component]
pub fn MeshMapCanvas(
	#[prop(into)] data: Signal<MeshData>,
	#[prop(into)] selected: Signal<Option<NodeId>>,
	#[prop(into)] hidden: Signal<HashSet<NodeStatus>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let navigate = use_navigate();
	let state: Rc<RefCell<Option<MapState>>> = Rc::new(RefCell::new(None));
	let frames: Rc<RefCell<FrameLoop>> = Rc::new(RefCell::new(FrameLoop::default()));
	let (state_init, frames_init) = (state.clone(), frames.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("No window available for the map canvas");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("Canvas 2d context unavailable");
				return;
			}
		};

		let mut map_state = MapState::new(&data.get(), w, h);
		map_state.set_hidden(hidden.get_untracked());
		*state_init.borrow_mut() = Some(map_state);

		if selected.get_untracked().is_some() {
			let state_deferred = state_init.clone();
			let scheduled = set_timeout_with_handle(
				move || {
					let current = selected.get_untracked();
					debug!("Initial selection check: {:?}", current);
					if let Some(ref mut s) = *state_deferred.borrow_mut() {
						s.resolve_selection(current);
					}
				},
				INITIAL_SELECTION_DELAY,
			);
			if let Err(err) = scheduled {
				error!("Initial selection check not scheduled: {:?}", err);
			}
		}

		let mut frame_loop = frames_init.borrow_mut();
		frame_loop.stop();
		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			frame_loop.listen_resize(&window, move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
				debug!("Map resized to {}x{}", nw, nh);
			});
		}

		let state_anim = state_init.clone();
		frame_loop.start(&window, move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
		});
	});

	let state_sel = state.clone();
	Effect::new(move |_| {
		let next = selected.get();
		if let Some(ref mut s) = *state_sel.borrow_mut() {
			s.apply_selection(next);
		}
	});

	let state_filter = state.clone();
	Effect::new(move |_| {
		let statuses = hidden.get();
		if let Some(ref mut s) = *state_filter.borrow_mut() {
			s.set_hidden(statuses);
		}
	});

	let navigate_key = navigate.clone();
	let escape = window_event_listener(ev::keydown, move |ev: KeyboardEvent| {
		if ev.key() == "Escape" {
			navigate_key(routes::ROOT, Default::default());
		}
	});
	on_cleanup(move || escape.remove());

	let frames_cleanup = StoredValue::new_local(frames.clone());
	on_cleanup(move || {
		frames_cleanup.try_with_value(|frames| frames.borrow_mut().stop());
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_drag(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.active {
				s.drag_to(x, y);
			} else {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}
			if let Some(canvas) = canvas_ref.get() {
				let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", s.cursor());
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		let click = match *state_mu.borrow_mut() {
			Some(ref mut s) => s.end_drag(x, y),
			None => None,
		};
		match click {
			Some(MapClick::Node(id)) => navigate(&routes::node_path(id), Default::default()),
			Some(MapClick::Background) => navigate(routes::ROOT, Default::default()),
			None => {}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.cancel_drag();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let delta = if ev.delta_y() > 0.0 {
				-WHEEL_ZOOM_STEP
			} else {
				WHEEL_ZOOM_STEP
			};
			s.zoom_at(x, y, delta);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="mesh-map-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use super::*;
	use wasm_bindgen_test::*;

	wasm_bindgen_test_configure!(run_in_browser);

	#[wasm_bindgen_test]
	fn stopping_releases_frame_and_resize_callbacks() {
		let window = web_sys::window().unwrap();
		let mut frames = FrameLoop::default();
		frames.listen_resize(&window, || {});
		frames.start(&window, || {});
		assert!(frames.is_running());
		assert!(frames.handle.get().is_some());

		frames.stop();
		assert!(!frames.is_running());
		assert!(frames.handle.get().is_none());
		assert!(frames.resize.is_none());
	}

	#[wasm_bindgen_test]
	fn restarting_keeps_the_resize_listener() {
		let window = web_sys::window().unwrap();
		let mut frames = FrameLoop::default();
		frames.listen_resize(&window, || {});
		frames.start(&window, || {});
		frames.start(&window, || {});
		assert!(frames.is_running());
		assert!(frames.resize.is_some());
		frames.stop();
		assert!(!frames.is_running());
	}
}
