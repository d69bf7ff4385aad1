//! Graph data structures exchanged with the graph-data service.
//!
//! Field names follow the service's camelCase JSON. Every collection and
//! counter is defaulted so partial responses still decode.

use serde::{Deserialize, Serialize};

/// Persistence tier of a node. Only used for color coding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
	/// Durable.
	#[serde(alias = "Ice", alias = "ICE")]
	Ice,
	/// Semi-durable.
	#[default]
	#[serde(alias = "Water", alias = "WATER")]
	Water,
	/// Transient.
	#[serde(alias = "Gas", alias = "GAS")]
	Gas,
}

impl LifecycleState {
	/// Human-readable name for tooltips.
	pub fn label(self) -> &'static str {
		match self {
			LifecycleState::Ice => "Ice",
			LifecycleState::Water => "Water",
			LifecycleState::Gas => "Gas",
		}
	}
}

/// A node as supplied by the service.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
	/// Stable unique identifier.
	pub id: String,
	/// Type tag (e.g. "concept", "news").
	#[serde(rename = "type", default)]
	pub node_type: String,
	/// Display title.
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub state: LifecycleState,
	/// Weight driving the render radius and label threshold.
	#[serde(default = "default_node_size")]
	pub size: f64,
	#[serde(default)]
	pub connection_count: u32,
}

fn default_node_size() -> f64 {
	1.0
}

/// A directed, labelled edge. Endpoints reference nodes by id.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
	#[serde(default)]
	pub id: String,
	#[serde(alias = "sourceId")]
	pub source: String,
	#[serde(alias = "targetId")]
	pub target: String,
	#[serde(default)]
	pub role: String,
}

/// A server-computed aggregate drawn as a single circle.
///
/// The centroid is in viewport pixels of the query that produced it
/// (origin at the top-left of the requested viewport).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCluster {
	pub id: String,
	#[serde(default)]
	pub title: String,
	pub center_x: f64,
	pub center_y: f64,
	#[serde(default)]
	pub member_count: usize,
}

/// Parameters describing the visible world region.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportQuery {
	pub zoom_factor: f64,
	pub center_x: f64,
	pub center_y: f64,
	pub viewport_width: f64,
	pub viewport_height: f64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub focus_node_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub type_filter: Option<String>,
}

/// Answer to a [`ViewportQuery`]. Replaces the previous snapshot wholesale.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialGraphResponse {
	#[serde(default)]
	pub viewport_nodes: Vec<GraphNode>,
	#[serde(default)]
	pub clusters: Vec<NodeCluster>,
	#[serde(default)]
	pub edges: Vec<Edge>,
	#[serde(default)]
	pub total_nodes_in_graph: usize,
	#[serde(default)]
	pub viewport_node_count: usize,
	#[serde(default)]
	pub cluster_count: usize,
}

/// A node's immediate neighborhood.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDrilldown {
	pub center_node: GraphNode,
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub outgoing_count: usize,
	#[serde(default)]
	pub incoming_count: usize,
}

/// Membership list of a cluster.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterMembers {
	#[serde(default)]
	pub count: usize,
	#[serde(default)]
	pub members: Vec<GraphNode>,
}
