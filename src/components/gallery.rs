use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use super::mesh_map::{MeshData, NodeId};
use crate::routes;

/// Previous and next panorama index, wrapping around `len`.
fn adjacent(index: usize, len: usize) -> (usize, usize) {
	if len == 0 {
		return (0, 0);
	}
	((index + len - 1) % len, (index + 1) % len)
}

/// Full-screen panorama viewer for `/nodes/:node_id/panoramas/:pano_id`.
#[component]
pub fn Gallery() -> impl IntoView {
	let params = use_params_map();
	let mesh = use_context::<Signal<MeshData>>();
	let selection = move || {
		let map = params.read();
		let id: NodeId = map.get("node_id")?.parse().ok()?;
		let index: usize = map.get("pano_id")?.parse().ok()?;
		let panoramas = mesh?.with(|data| data.node(id).map(|node| node.panoramas.clone()))?;
		(index < panoramas.len()).then_some((id, index, panoramas))
	};

	view! {
		{move || {
			selection()
				.map(|(id, index, panoramas)| {
					let (prev, next) = adjacent(index, panoramas.len());
					let multiple = panoramas.len() > 1;
					view! {
						<div class="gallery">
							<A href=routes::node_path(id) attr:class="close">"×"</A>
							<img src=panoramas[index].clone() alt=format!("Node {} panorama {}", id, index + 1) />
							{multiple
								.then(|| {
									view! {
										<A href=routes::panorama_path(id, prev) attr:class="prev">"‹"</A>
										<A href=routes::panorama_path(id, next) attr:class="next">"›"</A>
									}
								})}
							<p class="caption">{format!("{} / {}", index + 1, panoramas.len())}</p>
						</div>
					}
				})
		}}
	}
}
