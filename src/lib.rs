//! spatial-graph: Viewport-driven explorer for very large node/edge graphs.
//!
//! This crate provides a WASM-based visualization component that fetches
//! the visible slice of a graph from a remote service, clusters distant
//! structure, and lays out nearby nodes with a force simulation.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::spatial_graph::{SpatialGraphCanvas, ViewerConfig};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("spatial-graph: logging initialized");
}

/// Load viewer settings from a script element with id="viewer-config".
/// Missing or malformed settings fall back to defaults.
fn load_viewer_config() -> ViewerConfig {
	let Some(json_text) = viewer_config_text() else {
		return ViewerConfig::default();
	};

	match ViewerConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"spatial-graph: service at {}, initial zoom {}",
				config.api_base_url, config.initial_zoom
			);
			config
		}
		Err(e) => {
			warn!("spatial-graph: failed to parse viewer config: {}", e);
			ViewerConfig::default()
		}
	}
}

fn viewer_config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("viewer-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component.
/// Reads viewer settings from the DOM and renders the full-window explorer.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_viewer_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Spatial Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<SpatialGraphCanvas
				config=config
				fullscreen=true
				on_node_click=|id: String| info!("spatial-graph: node {} selected", id)
				on_cluster_click=|id: String| info!("spatial-graph: entering cluster {}", id)
			/>
			<div class="graph-overlay">
				<h1>"Spatial Graph"</h1>
				<p class="subtitle">"Drag to pan. Scroll to zoom. Click a cluster to dive in."</p>
			</div>
		</div>
	}
}
