//! DOM overlays drawn above the canvas: status bar, tooltip, zoom
//! buttons, and the drilldown and cluster side panels.

use leptos::prelude::*;

use super::lod::ZoomLevel;
use super::query::PanelState;
use super::state::{GraphStats, HoverDetails, HoverKind, SpatialGraphState};
use super::types::{ClusterMembers, GraphNode, NodeDrilldown};

/// Everything the status bar shows, copied out of the state each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HudStatus {
	pub level: ZoomLevel,
	pub zoom: f64,
	pub stats: Option<GraphStats>,
	pub loading: bool,
	pub error: Option<String>,
}

impl Default for HudStatus {
	fn default() -> Self {
		Self {
			level: ZoomLevel::System,
			zoom: 1.0,
			stats: None,
			loading: false,
			error: None,
		}
	}
}

impl HudStatus {
	pub fn from_state(state: &SpatialGraphState) -> Self {
		Self {
			level: state.level(),
			zoom: state.view.zoom,
			stats: state.stats(),
			loading: state.feed.is_loading(),
			error: state.feed.error().map(str::to_string),
		}
	}

	fn counts(&self) -> String {
		match self.stats {
			Some(s) => format!(
				"{} nodes · {} clusters · {} total",
				s.viewport_nodes, s.clusters, s.total_nodes
			),
			None => "no data".to_string(),
		}
	}
}

/// Status bar with the zoom controls.
#[component]
pub fn GraphHud(
	#[prop(into)] status: Signal<HudStatus>,
	on_zoom_in: Callback<()>,
	on_zoom_out: Callback<()>,
	on_reset: Callback<()>,
) -> impl IntoView {
	view! {
		<div class="graph-hud">
			<div class="graph-hud-status">
				<span class="graph-hud-tier">
					{move || {
						let s = status.get();
						format!("{} · {:.2}x", s.level.name(), s.zoom)
					}}
				</span>
				<span class="graph-hud-counts">{move || status.get().counts()}</span>
				<Show when=move || status.get().loading>
					<span class="graph-hud-loading">"Loading…"</span>
				</Show>
			</div>
			{move || {
				status.get().error.map(|e| view! { <div class="graph-hud-error">{e}</div> })
			}}
			<div class="graph-hud-zoom">
				<button title="Zoom in" on:click=move |_| on_zoom_in.run(())>"+"</button>
				<button title="Zoom out" on:click=move |_| on_zoom_out.run(())>"−"</button>
				<button title="Reset view" on:click=move |_| on_reset.run(())>"Reset"</button>
			</div>
		</div>
	}
}

/// Floating details for the hovered node or cluster.
#[component]
pub fn HoverTooltip(#[prop(into)] hover: Signal<Option<HoverDetails>>) -> impl IntoView {
	move || {
		hover.get().map(|h| {
			let style = format!("left: {:.0}px; top: {:.0}px;", h.x + 12.0, h.y + 12.0);
			let body = match h.kind {
				HoverKind::Node {
					title,
					node_type,
					state,
					connection_count,
					description,
				} => view! {
					<strong>{title}</strong>
					<div class="graph-tooltip-meta">
						{format!("{node_type} · {} · {connection_count} connections", state.label())}
					</div>
					{description.map(|d| view! { <p>{d}</p> })}
				}
				.into_any(),
				HoverKind::Cluster {
					title,
					member_count,
				} => view! {
					<strong>{title}</strong>
					<div class="graph-tooltip-meta">{format!("{member_count} members")}</div>
				}
				.into_any(),
			};
			view! { <div class="graph-tooltip" style=style>{body}</div> }
		})
	}
}

fn node_list(nodes: Vec<GraphNode>, on_select: Callback<String>) -> impl IntoView {
	view! {
		<ul class="graph-panel-list">
			{nodes
				.into_iter()
				.map(|n| {
					let id = n.id.clone();
					view! {
						<li class="graph-panel-item" on:click=move |_| on_select.run(id.clone())>
							<span class="graph-panel-title">{n.title}</span>
							<span class="graph-panel-meta">
								{format!("{} · {}", n.node_type, n.state.label())}
							</span>
						</li>
					}
				})
				.collect_view()}
		</ul>
	}
}

fn panel_frame(title: String, on_close: Callback<()>, body: AnyView) -> AnyView {
	view! {
		<aside class="graph-panel">
			<header>
				<h2>{title}</h2>
				<button class="graph-panel-close" on:click=move |_| on_close.run(())>"×"</button>
			</header>
			{body}
		</aside>
	}
	.into_any()
}

/// Neighborhood of the clicked node. Selecting a neighbor retargets it.
#[component]
pub fn DrilldownPanel(
	#[prop(into)] state: Signal<PanelState<NodeDrilldown>>,
	on_close: Callback<()>,
	on_select: Callback<String>,
) -> impl IntoView {
	move || match state.get() {
		PanelState::Closed => ().into_any(),
		PanelState::Loading(id) => panel_frame(
			id,
			on_close,
			view! { <p class="graph-panel-loading">"Loading…"</p> }.into_any(),
		),
		PanelState::Failed(e) => panel_frame(
			"Node".to_string(),
			on_close,
			view! { <p class="graph-panel-error">{e}</p> }.into_any(),
		),
		PanelState::Ready(d) => {
			let counts = format!(
				"{} outgoing · {} incoming",
				d.outgoing_count, d.incoming_count
			);
			let body = view! {
				<div class="graph-panel-meta">
					{format!("{} · {}", d.center_node.node_type, d.center_node.state.label())}
				</div>
				{d.center_node.description.map(|t| view! { <p>{t}</p> })}
				<div class="graph-panel-counts">{counts}</div>
				{node_list(d.nodes, on_select)}
			}
			.into_any();
			panel_frame(d.center_node.title, on_close, body)
		}
	}
}

/// Members of the clicked cluster.
#[component]
pub fn ClusterPanel(
	#[prop(into)] state: Signal<PanelState<ClusterMembers>>,
	on_close: Callback<()>,
	on_select: Callback<String>,
) -> impl IntoView {
	move || match state.get() {
		PanelState::Closed => ().into_any(),
		PanelState::Loading(id) => panel_frame(
			id,
			on_close,
			view! { <p class="graph-panel-loading">"Loading…"</p> }.into_any(),
		),
		PanelState::Failed(e) => panel_frame(
			"Cluster".to_string(),
			on_close,
			view! { <p class="graph-panel-error">{e}</p> }.into_any(),
		),
		PanelState::Ready(m) => {
			let title = format!("{} members", m.count);
			panel_frame(title, on_close, node_list(m.members, on_select).into_any())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::spatial_graph::config::ViewerConfig;
	use crate::components::spatial_graph::query::QueryError;
	use crate::components::spatial_graph::types::SpatialGraphResponse;

	#[test]
	fn status_follows_feed() {
		let mut s = SpatialGraphState::new(800.0, 600.0, &ViewerConfig::default());
		assert_eq!(HudStatus::from_state(&s), HudStatus::default());
		assert_eq!(HudStatus::default().counts(), "no data");

		let (t, _) = s.begin_query();
		assert!(HudStatus::from_state(&s).loading);

		let resp = SpatialGraphResponse {
			total_nodes_in_graph: 5000,
			viewport_node_count: 12,
			cluster_count: 3,
			..Default::default()
		};
		assert!(s.apply_viewport(t, Ok(resp)));
		let status = HudStatus::from_state(&s);
		assert!(!status.loading);
		assert_eq!(status.counts(), "12 nodes · 3 clusters · 5000 total");

		s.zoom_out();
		s.zoom_out();
		let (t, _) = s.begin_query();
		s.apply_viewport(t, Err(QueryError::Status { status: 503, body: String::new() }));
		let status = HudStatus::from_state(&s);
		assert_eq!(status.level, ZoomLevel::Galaxy);
		assert_eq!(status.error.as_deref(), Some("service returned HTTP 503: "));
		assert_eq!(status.stats.map(|s| s.total_nodes), Some(5000));
	}
}
