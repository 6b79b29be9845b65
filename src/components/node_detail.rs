use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use super::mesh_map::{MeshData, Node, NodeId};
use crate::routes;

/// Gallery route and image URL for each of the node's panoramas.
fn panorama_links(node: &Node) -> Vec<(String, String)> {
	node.panoramas
		.iter()
		.enumerate()
		.map(|(index, url)| (routes::panorama_path(node.id, index), url.clone()))
		.collect()
}

fn display_name(node: &Node) -> String {
	node.name
		.clone()
		.unwrap_or_else(|| format!("Node {}", node.id))
}

/// Side panel for the node in the `:node_id` route parameter.
#[component]
pub fn NodeDetail() -> impl IntoView {
	let params = use_params_map();
	let mesh = use_context::<Signal<MeshData>>();
	let raw_id = move || params.read().get("node_id").unwrap_or_default();
	let node = move || {
		let id: NodeId = routes::leading_id(&raw_id())?;
		mesh?.with(|data| data.node(id).cloned())
	};

	view! {
		<Title text=move || format!("Node {} - NYC Mesh", raw_id()) />
		<aside class="node-detail">
			<A href=routes::ROOT attr:class="close">"×"</A>
			{move || match node() {
				Some(node) => view! { <NodeSummary node=node /> }.into_any(),
				None => view! { <p>{format!("Node {} not found", raw_id())}</p> }.into_any(),
			}}
		</aside>
	}
}

#[component]
fn NodeSummary(node: Node) -> impl IntoView {
	let id = node.id;
	let connected = node
		.connected_nodes
		.iter()
		.map(|&other| {
			view! {
				<li>
					<A href=routes::node_path(other)>{format!("Node {other}")}</A>
				</li>
			}
		})
		.collect_view();
	let links = node
		.links
		.iter()
		.map(|link| {
			let other = if link.from == id { link.to } else { link.from };
			view! { <li>{format!("{} → {} ({})", id, other, link.status.as_str())}</li> }
		})
		.collect_view();
	let panoramas = panorama_links(&node)
		.into_iter()
		.enumerate()
		.map(|(index, (href, url))| {
			view! {
				<A href=href>
					<img class="panorama-thumb" src=url alt=format!("Panorama {}", index + 1) />
				</A>
			}
		})
		.collect_view();

	view! {
		<h2>{display_name(&node)}</h2>
		<p class="status">
			<span class="status-dot" style:background-color=node.status.color()></span>
			{node.status.label()}
		</p>
		{node.notes.clone().map(|notes| view! { <p class="notes">{notes}</p> })}
		<h3>{format!("{} connected nodes", node.connected_nodes.len())}</h3>
		<ul class="connected">{connected}</ul>
		<h3>"Links"</h3>
		<ul class="links">{links}</ul>
		<div class="panoramas">{panoramas}</div>
	}
}
