//! Viewer configuration supplied by the host page.

use serde::Deserialize;

/// Host-supplied settings. Every field has a default so an empty object is
/// a valid configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
	/// Base URL of the graph-data service, without a trailing slash.
	pub api_base_url: String,
	pub initial_zoom: f64,
	/// Restrict viewport queries to one node type.
	pub type_filter: Option<String>,
	/// Node the service should keep in view.
	pub focus_node_id: Option<String>,
	/// Quiet period before a pan or wheel gesture issues its query.
	pub query_debounce_ms: u64,
}

impl Default for ViewerConfig {
	fn default() -> Self {
		Self {
			api_base_url: "/api".to_string(),
			initial_zoom: 1.0,
			type_filter: None,
			focus_node_id: None,
			query_debounce_ms: 120,
		}
	}
}

impl ViewerConfig {
	/// Parse a JSON config. Non-positive zoom falls back to the default.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		let mut config: Self = serde_json::from_str(text)?;
		if !(config.initial_zoom.is_finite() && config.initial_zoom > 0.0) {
			config.initial_zoom = Self::default().initial_zoom;
		}
		Ok(config)
	}
}
