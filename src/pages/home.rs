use std::collections::HashSet;

use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_location;

use crate::components::mesh_map::{MeshMapCanvas, NodeStatus};
use crate::components::stats::StatsPanel;
use crate::data;
use crate::routes;

/// Map page. Child routes (node detail, gallery) render through the outlet
/// on top of the map so the canvas stays mounted while the selection changes.
#[component]
pub fn Home() -> impl IntoView {
	let location = use_location();
	let selected = Signal::derive(move || routes::selected_node(&location.pathname.get()));
	let hidden = RwSignal::new(HashSet::<NodeStatus>::new());

	let loaded = data::load_bundled().map(Signal::stored);
	if let Ok(mesh) = &loaded {
		provide_context(*mesh);
	}

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{loaded
				.map(|mesh| {
					let nodes = Signal::derive(move || mesh.with(|data| data.nodes.clone()));
					view! {
						<div class="fullscreen-map">
							<MeshMapCanvas data=mesh selected=selected hidden=hidden fullscreen=true />
							<div class="map-overlay">
								<h1>"NYC Mesh"</h1>
								<p class="subtitle">"Click a node for details. Esc or click the map to deselect."</p>
								<StatsPanel nodes=nodes hidden=hidden />
							</div>
							<Outlet />
						</div>
					}
				})}
		</ErrorBoundary>
	}
}
