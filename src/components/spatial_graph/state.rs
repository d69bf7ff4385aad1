//! Graph session state and interaction tracking.
//!
//! Owns the current snapshot and its simulation, the pan/zoom view that
//! drives viewport queries, pointer state, hover highlight transitions, and
//! the bookkeeping for the three service queries. The snapshot is replaced
//! wholesale when a viewport query resolves; the simulation is the only
//! writer of node positions. Rendering and hit-testing read it through
//! [`FrameView`].

use std::collections::HashMap;

use log::info;

use super::config::ViewerConfig;
use super::interaction::{
	CLUSTER_ZOOM, ClickOutcome, HitTarget, PanState, Selection, ViewState, hit_test,
};
use super::lod::{LodThresholds, ZoomLevel};
use super::physics::{EdgeLink, PhysicsConfig, Simulation, ViewportNode};
use super::query::{
	FeedUpdate, IssuedQuery, PanelChannel, QueryError, RequestTicket, ViewportFeed,
};
use super::scale::ScaleConfig;
use super::types::{
	ClusterMembers, LifecycleState, NodeCluster, NodeDrilldown, SpatialGraphResponse,
	ViewportQuery,
};

/// Counters shown in the HUD.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
	pub total_nodes: usize,
	pub viewport_nodes: usize,
	pub clusters: usize,
	/// Edges dropped for referencing a node outside the snapshot.
	pub dangling_edges: usize,
}

/// One accepted viewport response plus the simulation laid over it.
pub struct GraphSnapshot {
	/// Ticket id of the query that produced it; also seeds the layout.
	pub id: u64,
	/// Pan origin and zoom the query was issued with.
	pub pan_origin: (f64, f64),
	pub zoom: f64,
	pub clusters: Vec<NodeCluster>,
	pub stats: GraphStats,
	simulation: Simulation,
}

impl GraphSnapshot {
	fn new(
		ticket: RequestTicket,
		issued: IssuedQuery,
		response: SpatialGraphResponse,
		width: f64,
		height: f64,
		physics: PhysicsConfig,
	) -> Self {
		let simulation = Simulation::new(
			&response.viewport_nodes,
			&response.edges,
			ticket.id(),
			width,
			height,
			physics,
		);
		let stats = GraphStats {
			total_nodes: response.total_nodes_in_graph,
			viewport_nodes: response.viewport_node_count,
			clusters: response.cluster_count,
			dangling_edges: simulation.edges().dangling(),
		};
		Self {
			id: ticket.id(),
			pan_origin: issued.pan,
			zoom: issued.query.zoom_factor,
			clusters: response.clusters,
			stats,
			simulation,
		}
	}

	pub fn nodes(&self) -> &[ViewportNode] {
		self.simulation.nodes()
	}

	pub fn links(&self) -> &[EdgeLink] {
		self.simulation.edges().links()
	}
}

/// Minimum time (seconds) a highlight must be held before it can fade out.
/// This prevents flashing when the mouse briefly touches a hover zone.
const MIN_HOLD_TIME: f64 = 0.12;

/// Smooth hover-outline transitions with per-element intensity tracking.
///
/// Each element has an intensity (0.0 to 1.0) that eases toward 1 while
/// hovered and back to 0 afterwards, using exponential smoothing.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	hovered: Option<HitTarget>,
	intensity: HashMap<HitTarget, f64>,
	hold_timer: HashMap<HitTarget, f64>,
}

impl HighlightState {
	/// Returns whether the hovered element changed.
	pub fn set_hover(&mut self, target: Option<HitTarget>) -> bool {
		if self.hovered == target {
			return false;
		}
		self.hovered = target;
		if let Some(t) = target {
			self.hold_timer.insert(t, MIN_HOLD_TIME);
		}
		true
	}

	pub fn hovered(&self) -> Option<HitTarget> {
		self.hovered
	}

	/// Exponential smoothing: value += (target - value) * (1 - e^(-speed * dt))
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		let fade_in_factor = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out_decay = (-FADE_OUT_SPEED * dt).exp();

		if let Some(t) = self.hovered {
			let value = self.intensity.entry(t).or_insert(0.0);
			*value += (1.0 - *value) * fade_in_factor;
		}

		let hovered = self.hovered;
		self.hold_timer.retain(|t, timer| {
			if hovered == Some(*t) {
				true
			} else {
				*timer -= dt;
				*timer > 0.0
			}
		});

		let holds = &self.hold_timer;
		self.intensity.retain(|t, value| {
			if hovered == Some(*t) {
				return true;
			}
			if holds.get(t).copied().unwrap_or(0.0) <= 0.0 {
				*value *= fade_out_decay;
			}
			*value > 0.005
		});
	}

	pub fn intensity(&self, target: HitTarget) -> f64 {
		self.intensity.get(&target).copied().unwrap_or(0.0)
	}

	/// Forget everything; slots are meaningless once the snapshot changes.
	pub fn clear(&mut self) {
		*self = Self::default();
	}
}

/// Read-only view of everything one frame draws.
pub struct FrameView<'a> {
	pub width: f64,
	pub height: f64,
	pub zoom: f64,
	pub level: ZoomLevel,
	/// Shift applied to snapshot coordinates while a pan is pending.
	pub offset: (f64, f64),
	pub nodes: &'a [ViewportNode],
	pub links: &'a [EdgeLink],
	pub clusters: &'a [NodeCluster],
	pub highlight: &'a HighlightState,
	pub selection: Option<&'a Selection>,
}

impl FrameView<'_> {
	pub fn is_selected(&self, target: HitTarget) -> bool {
		match (self.selection, target) {
			(Some(Selection::Node(id)), HitTarget::Node(i)) => {
				self.nodes.get(i).is_some_and(|n| &n.node.id == id)
			}
			(Some(Selection::Cluster(id)), HitTarget::Cluster(i)) => {
				self.clusters.get(i).is_some_and(|c| &c.id == id)
			}
			_ => false,
		}
	}
}

/// Tooltip content for the hovered element.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverDetails {
	/// Screen position of the element.
	pub x: f64,
	pub y: f64,
	pub kind: HoverKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HoverKind {
	Node {
		title: String,
		node_type: String,
		state: LifecycleState,
		connection_count: u32,
		description: Option<String>,
	},
	Cluster {
		title: String,
		member_count: usize,
	},
}

/// Result of a pointer move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerUpdate {
	pub hover_changed: bool,
	/// The pan origin moved; a viewport query is due.
	pub panned: bool,
}

/// Core graph state combining the snapshot, its simulation, and interaction.
///
/// Created once when the component mounts, then mutated by the animation
/// loop, pointer handlers, and resolved queries.
pub struct SpatialGraphState {
	snapshot: Option<GraphSnapshot>,
	pub view: ViewState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub selection: Option<Selection>,
	pub feed: ViewportFeed,
	pub drilldown: PanelChannel<NodeDrilldown>,
	pub cluster_panel: PanelChannel<ClusterMembers>,
	pub lod: LodThresholds,
	pub physics: PhysicsConfig,
	pub scale: ScaleConfig,
	pub width: f64,
	pub height: f64,
	pub focus_node_id: Option<String>,
	pub type_filter: Option<String>,
	initial_zoom: f64,
}

impl SpatialGraphState {
	pub fn new(width: f64, height: f64, config: &ViewerConfig) -> Self {
		Self {
			snapshot: None,
			view: ViewState::with_zoom(config.initial_zoom),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			selection: None,
			feed: ViewportFeed::default(),
			drilldown: PanelChannel::default(),
			cluster_panel: PanelChannel::default(),
			lod: LodThresholds::default(),
			physics: PhysicsConfig::default(),
			scale: ScaleConfig::default(),
			width,
			height,
			focus_node_id: config.focus_node_id.clone(),
			type_filter: config.type_filter.clone(),
			initial_zoom: config.initial_zoom,
		}
	}

	pub fn snapshot(&self) -> Option<&GraphSnapshot> {
		self.snapshot.as_ref()
	}

	pub fn level(&self) -> ZoomLevel {
		self.lod.level(self.view.zoom)
	}

	pub fn stats(&self) -> Option<GraphStats> {
		self.snapshot.as_ref().map(|s| s.stats)
	}

	/// Query describing the current view.
	pub fn query(&self) -> ViewportQuery {
		let (center_x, center_y) = self.view.center();
		ViewportQuery {
			zoom_factor: self.view.zoom,
			center_x,
			center_y,
			viewport_width: self.width,
			viewport_height: self.height,
			focus_node_id: self.focus_node_id.clone(),
			type_filter: self.type_filter.clone(),
		}
	}

	/// Issue a viewport query for the current view, superseding any other.
	pub fn begin_query(&mut self) -> (RequestTicket, ViewportQuery) {
		let query = self.query();
		let ticket = self.feed.begin(IssuedQuery {
			query: query.clone(),
			pan: (self.view.pan_x, self.view.pan_y),
		});
		(ticket, query)
	}

	/// Apply a resolved viewport query. Returns whether the snapshot changed.
	pub fn apply_viewport(
		&mut self,
		ticket: RequestTicket,
		result: Result<SpatialGraphResponse, QueryError>,
	) -> bool {
		match self.feed.resolve(ticket, result) {
			FeedUpdate::Applied {
				ticket,
				issued,
				response,
			} => {
				let snapshot = GraphSnapshot::new(
					ticket,
					issued,
					response,
					self.width,
					self.height,
					self.physics.clone(),
				);
				info!(
					"snapshot #{}: {} nodes, {} edges ({} dangling), {} clusters of {} total nodes",
					snapshot.id,
					snapshot.nodes().len(),
					snapshot.links().len(),
					snapshot.stats.dangling_edges,
					snapshot.clusters.len(),
					snapshot.stats.total_nodes
				);
				self.snapshot = Some(snapshot);
				self.highlight.clear();
				true
			}
			FeedUpdate::Failed | FeedUpdate::Stale => false,
		}
	}

	/// Advance one animation frame.
	pub fn tick(&mut self, dt: f64) {
		if let Some(snapshot) = self.snapshot.as_mut() {
			snapshot.simulation.step();
		}
		self.highlight.tick(dt);
	}

	/// Shift between the live pan origin and the one the snapshot was
	/// fetched for. Zero once the zoom has changed since.
	pub fn render_offset(&self) -> (f64, f64) {
		match &self.snapshot {
			Some(s) if (s.zoom - self.view.zoom).abs() < 1e-9 => (
				self.view.pan_x - s.pan_origin.0,
				self.view.pan_y - s.pan_origin.1,
			),
			_ => (0.0, 0.0),
		}
	}

	pub fn frame(&self) -> FrameView<'_> {
		let (nodes, links, clusters) = match &self.snapshot {
			Some(s) => (s.nodes(), s.links(), s.clusters.as_slice()),
			None => (&[][..], &[][..], &[][..]),
		};
		FrameView {
			width: self.width,
			height: self.height,
			zoom: self.view.zoom,
			level: self.level(),
			offset: self.render_offset(),
			nodes,
			links,
			clusters,
			highlight: &self.highlight,
			selection: self.selection.as_ref(),
		}
	}

	/// Hit-test screen coordinates against the drawn snapshot.
	pub fn hit_at(&self, sx: f64, sy: f64) -> Option<HitTarget> {
		let snapshot = self.snapshot.as_ref()?;
		let (ox, oy) = self.render_offset();
		hit_test(
			&snapshot.clusters,
			snapshot.nodes(),
			&self.scale,
			sx - ox,
			sy - oy,
		)
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		self.pan.begin(&self.view, x, y);
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) -> PointerUpdate {
		let panned = self.pan.drag_to(&mut self.view, x, y);
		let hover_changed = if self.pan.moved {
			false
		} else {
			let hovered = self.hit_at(x, y);
			self.highlight.set_hover(hovered)
		};
		PointerUpdate {
			hover_changed,
			panned,
		}
	}

	/// Ends a press; a press without travel is a click.
	pub fn pointer_up(&mut self, x: f64, y: f64) -> ClickOutcome {
		if self.pan.end() {
			self.click(x, y)
		} else {
			ClickOutcome::Empty
		}
	}

	/// Returns whether hover state changed.
	pub fn pointer_leave(&mut self) -> bool {
		self.pan.end();
		self.highlight.set_hover(None)
	}

	pub fn click(&mut self, x: f64, y: f64) -> ClickOutcome {
		let hit = self.hit_at(x, y);
		let Some(snapshot) = self.snapshot.as_ref() else {
			return ClickOutcome::Empty;
		};
		match hit {
			Some(HitTarget::Cluster(i)) => {
				let id = snapshot.clusters[i].id.clone();
				self.selection = Some(Selection::Cluster(id.clone()));
				self.view.zoom_by(CLUSTER_ZOOM);
				ClickOutcome::Cluster(id)
			}
			Some(HitTarget::Node(i)) => {
				let id = snapshot.nodes()[i].node.id.clone();
				self.selection = Some(Selection::Node(id.clone()));
				ClickOutcome::Node(id)
			}
			None => {
				self.selection = None;
				ClickOutcome::Empty
			}
		}
	}

	pub fn zoom_in(&mut self) {
		self.view.zoom_in();
	}

	pub fn zoom_out(&mut self) {
		self.view.zoom_out();
	}

	/// Restore the configured zoom and a zero pan origin.
	pub fn reset_view(&mut self) {
		self.view.reset(self.initial_zoom);
	}

	/// Zoom one step per wheel notch. Returns whether the zoom changed.
	pub fn wheel(&mut self, delta_y: f64) -> bool {
		let before = self.view.zoom;
		if delta_y > 0.0 {
			self.zoom_out();
		} else if delta_y < 0.0 {
			self.zoom_in();
		}
		self.view.zoom != before
	}

	/// Returns whether the filter changed; the caller re-queries if so.
	pub fn set_type_filter(&mut self, type_filter: Option<String>) -> bool {
		if self.type_filter == type_filter {
			return false;
		}
		self.type_filter = type_filter;
		true
	}

	/// Returns whether the focus node changed; the caller re-queries if so.
	pub fn set_focus_node(&mut self, focus_node_id: Option<String>) -> bool {
		if self.focus_node_id == focus_node_id {
			return false;
		}
		self.focus_node_id = focus_node_id;
		true
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		if let Some(s) = self.snapshot.as_mut() {
			s.simulation.resize(width, height);
		}
	}

	pub fn hover_details(&self) -> Option<HoverDetails> {
		let snapshot = self.snapshot.as_ref()?;
		let (ox, oy) = self.render_offset();
		match self.highlight.hovered()? {
			HitTarget::Cluster(i) => {
				let c = snapshot.clusters.get(i)?;
				Some(HoverDetails {
					x: c.center_x + ox,
					y: c.center_y + oy,
					kind: HoverKind::Cluster {
						title: c.title.clone(),
						member_count: c.member_count,
					},
				})
			}
			HitTarget::Node(i) => {
				let n = snapshot.nodes().get(i)?;
				Some(HoverDetails {
					x: n.x() + ox,
					y: n.y() + oy,
					kind: HoverKind::Node {
						title: n.node.title.clone(),
						node_type: n.node.node_type.clone(),
						state: n.node.state,
						connection_count: n.node.connection_count,
						description: n.node.description.clone(),
					},
				})
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::spatial_graph::physics::tests::{edge, node};

	fn state() -> SpatialGraphState {
		SpatialGraphState::new(800.0, 600.0, &ViewerConfig::default())
	}

	fn response(nodes: &[&str], clusters: Vec<NodeCluster>) -> SpatialGraphResponse {
		SpatialGraphResponse {
			viewport_nodes: nodes.iter().map(|id| node(id)).collect(),
			viewport_node_count: nodes.len(),
			cluster_count: clusters.len(),
			clusters,
			edges: vec![],
			total_nodes_in_graph: 1000,
		}
	}

	fn cluster(id: &str, x: f64, y: f64) -> NodeCluster {
		NodeCluster {
			id: id.into(),
			title: format!("Cluster {id}"),
			center_x: x,
			center_y: y,
			member_count: 40,
		}
	}

	fn loaded(resp: SpatialGraphResponse) -> SpatialGraphState {
		let mut s = state();
		let (t, _) = s.begin_query();
		assert!(s.apply_viewport(t, Ok(resp)));
		s
	}

	#[test]
	fn newer_query_wins_over_late_older_one() {
		let mut s = state();
		let (old, _) = s.begin_query();
		s.zoom_in();
		let (new, query) = s.begin_query();
		assert_eq!(query.zoom_factor, 1.5);

		assert!(s.apply_viewport(new, Ok(response(&["fresh"], vec![]))));
		assert!(!s.apply_viewport(old, Ok(response(&["stale"], vec![]))));

		let snap = s.snapshot().unwrap();
		assert_eq!(snap.id, new.id());
		assert_eq!(snap.nodes()[0].node.id, "fresh");
	}

	#[test]
	fn failure_keeps_last_good_snapshot() {
		let mut s = loaded(response(&["a", "b"], vec![]));
		let before = s.snapshot().unwrap().id;

		let (t, _) = s.begin_query();
		assert!(!s.apply_viewport(t, Err(QueryError::Transport("offline".into()))));
		assert_eq!(s.snapshot().unwrap().id, before);
		assert_eq!(s.snapshot().unwrap().nodes().len(), 2);
		assert!(s.feed.error().is_some());

		s.tick(0.016);
		assert_eq!(s.frame().nodes.len(), 2);
	}

	#[test]
	fn empty_state_frames_are_empty() {
		let mut s = state();
		s.tick(0.016);
		let frame = s.frame();
		assert!(frame.nodes.is_empty() && frame.links.is_empty() && frame.clusters.is_empty());
		assert_eq!(frame.offset, (0.0, 0.0));
		assert_eq!(s.click(10.0, 10.0), ClickOutcome::Empty);
	}

	#[test]
	fn dangling_edges_are_counted_not_linked() {
		let mut resp = response(&["a", "b"], vec![]);
		resp.edges = vec![edge("a", "b"), edge("a", "missing")];
		let s = loaded(resp);
		let snap = s.snapshot().unwrap();
		assert_eq!(snap.links().len(), 1);
		assert_eq!(snap.stats.dangling_edges, 1);
	}

	#[test]
	fn click_inside_cluster_prefers_cluster() {
		// First ticket seeds the layout with id 1; find where the node lands.
		let seeded = Simulation::new(&[node("n")], &[], 1, 800.0, 600.0, PhysicsConfig::default());
		let (nx, ny) = (seeded.nodes()[0].x(), seeded.nodes()[0].y());

		let mut s = loaded(response(&["n"], vec![cluster("c", nx + 2.0, ny + 1.0)]));
		assert_eq!((s.snapshot().unwrap().nodes()[0].x(), s.snapshot().unwrap().nodes()[0].y()), (nx, ny));

		s.pointer_down(nx, ny);
		assert_eq!(s.pointer_up(nx, ny), ClickOutcome::Cluster("c".into()));
		assert_eq!(s.selection, Some(Selection::Cluster("c".into())));
		assert_eq!(s.view.zoom, 2.0);
	}

	#[test]
	fn click_on_node_selects_it() {
		let mut s = loaded(response(&["n"], vec![]));
		let (x, y) = {
			let n = &s.snapshot().unwrap().nodes()[0];
			(n.x(), n.y())
		};
		s.pointer_down(x, y);
		assert_eq!(s.pointer_up(x, y), ClickOutcome::Node("n".into()));
		assert!(s.frame().is_selected(HitTarget::Node(0)));
		assert_eq!(s.view.zoom, 1.0);
	}

	#[test]
	fn drag_pans_and_shifts_old_content() {
		let mut s = loaded(response(&[], vec![cluster("c", 400.0, 300.0)]));

		s.pointer_down(100.0, 100.0);
		let update = s.pointer_move(160.0, 130.0);
		assert!(update.panned);
		assert_eq!(s.pointer_up(160.0, 130.0), ClickOutcome::Empty);

		assert_eq!(s.render_offset(), (60.0, 30.0));
		assert_eq!(s.hit_at(460.0, 330.0), Some(HitTarget::Cluster(0)));
		let q = s.query();
		assert_eq!((q.center_x, q.center_y), (-60.0, -30.0));

		let (t, _) = s.begin_query();
		assert!(s.apply_viewport(t, Ok(response(&[], vec![]))));
		assert_eq!(s.render_offset(), (0.0, 0.0));
	}

	#[test]
	fn hover_tracks_pointer_and_fades() {
		let mut s = loaded(response(&[], vec![cluster("c", 400.0, 300.0)]));
		let update = s.pointer_move(405.0, 300.0);
		assert!(update.hover_changed);
		assert!(!update.panned);

		for _ in 0..10 {
			s.tick(0.016);
		}
		let lit = s.highlight.intensity(HitTarget::Cluster(0));
		assert!(lit > 0.5);

		match s.hover_details().unwrap().kind {
			HoverKind::Cluster { member_count, .. } => assert_eq!(member_count, 40),
			other => panic!("unexpected {other:?}"),
		}

		assert!(s.pointer_leave());
		assert_eq!(s.hover_details(), None);
		for _ in 0..60 {
			s.tick(0.016);
		}
		assert!(s.highlight.intensity(HitTarget::Cluster(0)) < lit);
	}

	#[test]
	fn zoom_controls_and_reset() {
		let mut s = state();
		assert!(s.wheel(-1.0));
		assert_eq!(s.level(), ZoomLevel::System);
		s.zoom_in();
		assert_eq!(s.level(), ZoomLevel::Detail);
		s.view.pan_x = 40.0;
		s.reset_view();
		assert_eq!(s.view, ViewState::default());
		assert!(s.wheel(1.0));
		assert!(s.wheel(1.0));
		assert_eq!(s.level(), ZoomLevel::Galaxy);
	}

	#[test]
	fn sideways_wheel_leaves_zoom_alone() {
		let mut s = state();
		assert!(!s.wheel(0.0));
		assert_eq!(s.view, ViewState::default());

		for _ in 0..200 {
			s.wheel(-1.0);
		}
		assert!(!s.wheel(-1.0));
	}

	#[test]
	fn filter_change_issues_filtered_query() {
		let mut s = loaded(response(&["a"], vec![]));
		let (old, q) = s.begin_query();
		assert_eq!(q.type_filter, None);

		assert!(s.set_type_filter(Some("news".into())));
		assert!(!s.set_type_filter(Some("news".into())));
		assert!(s.set_focus_node(Some("n7".into())));

		let (new, q) = s.begin_query();
		assert_eq!(q.type_filter.as_deref(), Some("news"));
		assert_eq!(q.focus_node_id.as_deref(), Some("n7"));

		assert!(!s.apply_viewport(old, Ok(response(&["unfiltered"], vec![]))));
		assert!(s.apply_viewport(new, Ok(response(&["filtered"], vec![]))));
		assert_eq!(s.snapshot().unwrap().nodes()[0].node.id, "filtered");

		assert!(s.set_type_filter(None));
		assert_eq!(s.query().type_filter, None);
	}

	#[test]
	fn panels_are_independent() {
		let mut s = state();
		let d = s.drilldown.open("n1");
		let c = s.cluster_panel.open("c1");
		assert!(s.drilldown.state().is_open() && s.cluster_panel.state().is_open());

		s.cluster_panel.close();
		assert!(!s.cluster_panel.resolve(c, Ok(ClusterMembers::default())));
		assert!(s.drilldown.resolve(
			d,
			Ok(NodeDrilldown {
				center_node: node("n1"),
				nodes: vec![node("n2")],
				outgoing_count: 1,
				incoming_count: 0,
			})
		));
		assert!(s.drilldown.state().is_open());
		assert!(!s.cluster_panel.state().is_open());
	}

	#[test]
	fn query_carries_filters() {
		let config = ViewerConfig {
			type_filter: Some("news".into()),
			focus_node_id: Some("n7".into()),
			..ViewerConfig::default()
		};
		let s = SpatialGraphState::new(1024.0, 768.0, &config);
		let q = s.query();
		assert_eq!(q.type_filter.as_deref(), Some("news"));
		assert_eq!(q.focus_node_id.as_deref(), Some("n7"));
		assert_eq!((q.viewport_width, q.viewport_height), (1024.0, 768.0));
	}
}
