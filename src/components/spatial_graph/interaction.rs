//! Pointer hit-testing, pan/zoom view state, and selection tracking.

use super::physics::ViewportNode;
use super::scale::ScaleConfig;
use super::types::NodeCluster;

/// Multiplicative step of the zoom buttons and the wheel.
pub const ZOOM_STEP: f64 = 1.5;
/// Zoom applied when drilling into a cluster.
pub const CLUSTER_ZOOM: f64 = 2.0;
pub const DEFAULT_ZOOM: f64 = 1.0;
const MIN_ZOOM: f64 = 0.01;
const MAX_ZOOM: f64 = 100.0;
/// Pointer travel (px) beyond which a press is a drag, not a click.
const CLICK_SLOP: f64 = 4.0;

/// An element under the pointer, by slot in the current snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HitTarget {
	Cluster(usize),
	Node(usize),
}

fn nearest(hits: impl Iterator<Item = (usize, f64)>) -> Option<usize> {
	hits.fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
		Some((_, bd)) if bd <= d => best,
		_ => Some((i, d)),
	})
	.map(|(i, _)| i)
}

/// Find the element under `(x, y)`.
///
/// Clusters are tested first and win over any node. Within a kind, the
/// element whose center is nearest the pointer wins.
pub fn hit_test(
	clusters: &[NodeCluster],
	nodes: &[ViewportNode],
	config: &ScaleConfig,
	x: f64,
	y: f64,
) -> Option<HitTarget> {
	let cluster_hits = clusters.iter().enumerate().filter_map(|(i, c)| {
		let d = (c.center_x - x).hypot(c.center_y - y);
		(d < config.cluster_radius(c.member_count)).then_some((i, d))
	});
	if let Some(i) = nearest(cluster_hits) {
		return Some(HitTarget::Cluster(i));
	}

	let node_hits = nodes.iter().enumerate().filter_map(|(i, n)| {
		let d = (n.x() - x).hypot(n.y() - y);
		(d < config.node_hit_radius(n.node.size)).then_some((i, d))
	});
	nearest(node_hits).map(HitTarget::Node)
}

/// Zoom factor and pan origin driving the viewport query.
///
/// The pan origin is in screen pixels; the world point at the canvas center
/// is `-pan / zoom`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
	pub zoom: f64,
	pub pan_x: f64,
	pub pan_y: f64,
}

impl Default for ViewState {
	fn default() -> Self {
		Self::with_zoom(DEFAULT_ZOOM)
	}
}

impl ViewState {
	pub fn with_zoom(zoom: f64) -> Self {
		Self {
			zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
			pan_x: 0.0,
			pan_y: 0.0,
		}
	}

	/// World coordinates at the center of the viewport.
	pub fn center(&self) -> (f64, f64) {
		(-self.pan_x / self.zoom, -self.pan_y / self.zoom)
	}

	/// Multiply the zoom factor, keeping the same world center.
	pub fn zoom_by(&mut self, factor: f64) {
		let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_zoom / self.zoom;
		self.pan_x *= ratio;
		self.pan_y *= ratio;
		self.zoom = new_zoom;
	}

	pub fn zoom_in(&mut self) {
		self.zoom_by(ZOOM_STEP);
	}

	pub fn zoom_out(&mut self) {
		self.zoom_by(1.0 / ZOOM_STEP);
	}

	pub fn reset(&mut self, zoom: f64) {
		*self = Self::with_zoom(zoom);
	}
}

/// Tracks an in-progress canvas pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	/// Pointer minus pan origin at press time.
	pub offset_x: f64,
	pub offset_y: f64,
	pub start_x: f64,
	pub start_y: f64,
	/// Set once the pointer travels past the click slop.
	pub moved: bool,
}

impl PanState {
	pub fn begin(&mut self, view: &ViewState, x: f64, y: f64) {
		*self = Self {
			active: true,
			offset_x: x - view.pan_x,
			offset_y: y - view.pan_y,
			start_x: x,
			start_y: y,
			moved: false,
		};
	}

	/// Move the pan origin so the pressed world point stays under the
	/// pointer. Returns whether the view changed.
	pub fn drag_to(&mut self, view: &mut ViewState, x: f64, y: f64) -> bool {
		if !self.active {
			return false;
		}
		if !self.moved && (x - self.start_x).hypot(y - self.start_y) > CLICK_SLOP {
			self.moved = true;
		}
		if !self.moved {
			return false;
		}
		let (px, py) = (x - self.offset_x, y - self.offset_y);
		let changed = px != view.pan_x || py != view.pan_y;
		view.pan_x = px;
		view.pan_y = py;
		changed
	}

	/// Ends the pan; returns true when the press was a click.
	pub fn end(&mut self) -> bool {
		let was_click = self.active && !self.moved;
		self.active = false;
		self.moved = false;
		was_click
	}
}

/// A selected element, by id so it survives snapshot replacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
	Cluster(String),
	Node(String),
}

/// What a click asked for. The caller notifies listeners and starts the
/// matching side query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
	/// A cluster was clicked; the view has already zoomed in.
	Cluster(String),
	Node(String),
	Empty,
}
