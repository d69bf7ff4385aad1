//! Viewport-driven spatial graph explorer.
//!
//! Renders a potentially huge graph on an HTML canvas by fetching only the
//! slice visible through the current viewport:
//! - Viewport queries with last-request-wins sequencing
//! - Zoom tiers (galaxy, system, detail) driving clustering and emphasis
//! - Force-directed layout of the visible nodes
//! - Pan, zoom, hover, and click-to-drill interactions
//! - HUD overlays with node drilldown and cluster member panels
//!
//! # Example
//!
//! ```ignore
//! use spatial_graph::components::spatial_graph::{SpatialGraphCanvas, ViewerConfig};
//!
//! let config = ViewerConfig {
//!     api_base_url: "https://graph.example/api".into(),
//!     ..ViewerConfig::default()
//! };
//!
//! view! {
//!     <SpatialGraphCanvas
//!         config=config
//!         fullscreen=true
//!         on_node_click=|id: String| log::info!("clicked {id}")
//!     />
//! }
//! ```

mod component;
pub mod config;
mod frame;
mod hud;
pub mod interaction;
pub mod lod;
pub mod physics;
pub mod query;
mod render;
pub mod scale;
pub mod state;
pub mod theme;
pub mod types;

pub use component::SpatialGraphCanvas;
pub use config::ViewerConfig;
pub use query::{HttpGraphService, QueryError};
pub use theme::Theme;
pub use types::{
	ClusterMembers, Edge, GraphNode, LifecycleState, NodeCluster, NodeDrilldown,
	SpatialGraphResponse, ViewportQuery,
};
