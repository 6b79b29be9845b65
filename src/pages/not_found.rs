use leptos::prelude::*;
use leptos_router::components::A;

use crate::routes;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"Page not found"</h1>
			<A href=routes::ROOT>"Back to the map"</A>
		</div>
	}
}
