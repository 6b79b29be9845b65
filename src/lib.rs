//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod components;
mod data;
mod pages;
mod routes;

// Top-Level pages
use crate::components::gallery::Gallery;
use crate::components::node_detail::NodeDetail;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the mesh map, node details and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="NYC Mesh" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<ParentRoute path=path!("") view=Home>
					<Route path=path!("") view=|| () />
					<Route path=path!("nodes/:node_id") view=NodeDetail />
					<Route
						path=path!("nodes/:node_id/panoramas/:pano_id")
						view=|| view! { <NodeDetail /> <Gallery /> }
					/>
				</ParentRoute>
			</Routes>
		</Router>
	}
}
