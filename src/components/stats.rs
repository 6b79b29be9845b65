use std::collections::{BTreeMap, HashSet};

use leptos::prelude::*;

use super::mesh_map::{Node, NodeStatus};

/// Number of nodes per status, in [`NodeStatus::ALL`] order.
pub fn status_counts(nodes: &[Node]) -> BTreeMap<NodeStatus, usize> {
	let mut counts: BTreeMap<NodeStatus, usize> =
		NodeStatus::ALL.iter().map(|&status| (status, 0)).collect();
	for node in nodes {
		*counts.entry(node.status).or_default() += 1;
	}
	counts
}

/// Node counts by status, each row toggling whether that status is drawn.
#[component]
pub fn StatsPanel(
	#[prop(into)] nodes: Signal<Vec<Node>>,
	hidden: RwSignal<HashSet<NodeStatus>>,
) -> impl IntoView {
	let counts = Memo::new(move |_| nodes.with(|nodes| status_counts(nodes)));

	view! {
		<div class="stats-panel">
			<ul>
				{move || {
					counts
						.get()
						.into_iter()
						.filter(|(_, count)| *count > 0)
						.map(|(status, count)| {
							let shown = move || !hidden.with(|h| h.contains(&status));
							view! {
								<li>
									<label>
										<input
											type="checkbox"
											prop:checked=shown
											on:change=move |_| {
												hidden
													.update(|h| {
														if !h.remove(&status) {
															h.insert(status);
														}
													})
											}
										/>
										<span class="status-dot" style:background-color=status.color()></span>
										{format!("{} {}", count, status.label())}
									</label>
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: u32, status: NodeStatus) -> Node {
		Node {
			id,
			status,
			coordinates: [0.0, 0.0],
			name: None,
			notes: None,
			connected_nodes: Vec::new(),
			links: Vec::new(),
			panoramas: Vec::new(),
		}
	}

	#[test]
	fn counts_every_status() {
		let counts = status_counts(&[
			node(1, NodeStatus::Installed),
			node(2, NodeStatus::Installed),
			node(3, NodeStatus::Planned),
		]);
		assert_eq!(counts[&NodeStatus::Installed], 2);
		assert_eq!(counts[&NodeStatus::Planned], 1);
		assert_eq!(counts[&NodeStatus::Abandoned], 0);
		assert_eq!(counts.len(), NodeStatus::ALL.len());
	}
}
