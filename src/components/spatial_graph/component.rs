//! Leptos component wrapping the spatial graph canvas.
//!
//! The component creates an HTML canvas element, wires pointer and wheel
//! handlers, and runs an animation loop via `requestAnimationFrame` that steps
//! the simulation and redraws each frame. Viewport, drilldown, and cluster
//! queries run on the local executor and are applied through the request
//! sequencing in [`SpatialGraphState`], so the loop never waits on the network.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::config::ViewerConfig;
use super::frame::FrameLoop;
use super::hud::{ClusterPanel, DrilldownPanel, GraphHud, HoverTooltip, HudStatus};
use super::interaction::ClickOutcome;
use super::query::{HttpGraphService, PanelState};
use super::render;
use super::state::{HoverDetails, SpatialGraphState};
use super::theme::Theme;
use super::types::{ClusterMembers, NodeDrilldown};

/// Fixed simulation timestep per animation frame.
const FRAME_DT: f64 = 0.016;

/// Side query a click asks for once its listener has run.
#[derive(Clone, Debug, PartialEq, Eq)]
enum PanelRequest {
	Drilldown(String),
	ClusterMembers(String),
}

/// Fires the matching click listener and names the panel to open.
/// A cluster hit only reaches `on_cluster_click`; a node hit only reaches
/// `on_node_click`.
fn dispatch_click(
	outcome: ClickOutcome,
	on_node_click: Option<Callback<String>>,
	on_cluster_click: Option<Callback<String>>,
) -> Option<PanelRequest> {
	match outcome {
		ClickOutcome::Node(id) => {
			if let Some(cb) = on_node_click {
				cb.run(id.clone());
			}
			Some(PanelRequest::Drilldown(id))
		}
		ClickOutcome::Cluster(id) => {
			if let Some(cb) = on_cluster_click {
				cb.run(id.clone());
			}
			Some(PanelRequest::ClusterMembers(id))
		}
		ClickOutcome::Empty => None,
	}
}

/// Reactive mirrors of the state the DOM overlays show.
#[derive(Clone, Copy)]
struct Overlays {
	status: RwSignal<HudStatus>,
	hover: RwSignal<Option<HoverDetails>>,
	drilldown: RwSignal<PanelState<NodeDrilldown>>,
	cluster: RwSignal<PanelState<ClusterMembers>>,
}

impl Overlays {
	fn new() -> Self {
		Self {
			status: RwSignal::new(HudStatus::default()),
			hover: RwSignal::new(None),
			drilldown: RwSignal::new(PanelState::Closed),
			cluster: RwSignal::new(PanelState::Closed),
		}
	}

	/// Per-frame sync; only writes signals whose value changed.
	fn sync_frame(&self, state: &SpatialGraphState) {
		let status = HudStatus::from_state(state);
		if self.status.with_untracked(|s| *s != status) {
			self.status.set(status);
		}
		let hover = state.hover_details();
		if self.hover.with_untracked(|h| *h != hover) {
			self.hover.set(hover);
		}
	}
}

/// Cheap handle shared by event handlers, the frame loop, and async queries.
#[derive(Clone)]
struct Controller {
	state: Rc<RefCell<Option<SpatialGraphState>>>,
	service: HttpGraphService,
	overlays: Overlays,
	debounce_ms: i32,
	debounce_generation: Rc<Cell<u64>>,
	on_node_click: Option<Callback<String>>,
	on_cluster_click: Option<Callback<String>>,
}

impl Controller {
	fn with_state<R>(&self, f: impl FnOnce(&mut SpatialGraphState) -> R) -> Option<R> {
		self.state.borrow_mut().as_mut().map(f)
	}

	/// Drops the session state and voids any pending debounce, so timers
	/// and in-flight queries that outlive the canvas do nothing.
	fn teardown(&self) {
		self.state.borrow_mut().take();
		self.debounce_generation.set(self.debounce_generation.get() + 1);
	}

	fn is_current(&self, generation: u64) -> bool {
		self.debounce_generation.get() == generation
	}

	/// Issue a viewport query for the current view now.
	fn refresh(&self) {
		let Some((ticket, query)) = self.with_state(|s| s.begin_query()) else {
			return;
		};
		debug!("viewport query #{} issued", ticket.id());
		let this = self.clone();
		spawn_local(async move {
			let result = this.service.viewport(&query).await;
			this.with_state(|s| s.apply_viewport(ticket, result));
		});
	}

	/// Issue a viewport query once pointer or wheel input goes quiet.
	fn schedule_refresh(&self) {
		let generation = self.debounce_generation.get() + 1;
		self.debounce_generation.set(generation);

		let this = self.clone();
		let callback = Closure::once_into_js(move || {
			if this.is_current(generation) {
				this.refresh();
			}
		});
		let scheduled = web_sys::window().map(|w| {
			w.set_timeout_with_callback_and_timeout_and_arguments_0(
				callback.unchecked_ref(),
				self.debounce_ms,
			)
		});
		if !matches!(scheduled, Some(Ok(_))) {
			self.refresh();
		}
	}

	fn sync_panels(&self) {
		let Some((drilldown, cluster)) = self.with_state(|s| {
			(
				s.drilldown.state().clone(),
				s.cluster_panel.state().clone(),
			)
		}) else {
			return;
		};
		self.overlays.drilldown.set(drilldown);
		self.overlays.cluster.set(cluster);
	}

	fn open_drilldown(&self, node_id: String) {
		let Some(ticket) = self.with_state(|s| s.drilldown.open(&node_id)) else {
			return;
		};
		self.sync_panels();
		let this = self.clone();
		spawn_local(async move {
			let result = this.service.node_drilldown(&node_id).await;
			if this.with_state(|s| s.drilldown.resolve(ticket, result)) == Some(true) {
				this.sync_panels();
			}
		});
	}

	fn open_cluster(&self, cluster_id: String) {
		let Some(ticket) = self.with_state(|s| s.cluster_panel.open(&cluster_id)) else {
			return;
		};
		self.sync_panels();
		let this = self.clone();
		spawn_local(async move {
			let result = this.service.cluster_members(&cluster_id).await;
			if this.with_state(|s| s.cluster_panel.resolve(ticket, result)) == Some(true) {
				this.sync_panels();
			}
		});
	}

	fn close_drilldown(&self) {
		self.with_state(|s| s.drilldown.close());
		self.sync_panels();
	}

	fn close_cluster(&self) {
		self.with_state(|s| s.cluster_panel.close());
		self.sync_panels();
	}

	/// Listeners run before the side query starts.
	fn handle_click(&self, outcome: ClickOutcome) {
		match dispatch_click(outcome, self.on_node_click, self.on_cluster_click) {
			Some(PanelRequest::Drilldown(id)) => self.open_drilldown(id),
			Some(PanelRequest::ClusterMembers(id)) => {
				self.open_cluster(id);
				self.refresh();
			}
			None => {}
		}
	}

	/// Applies host filter props; re-queries only when one changed.
	fn apply_filters(&self, type_filter: Option<String>, focus_node_id: Option<String>) {
		let changed = self.with_state(|s| {
			let filter_changed = s.set_type_filter(type_filter);
			s.set_focus_node(focus_node_id) || filter_changed
		});
		if changed == Some(true) {
			self.refresh();
		}
	}
}

/// Lives for as long as the canvas is mounted.
struct Mounted {
	_frames: FrameLoop,
	resize: Option<Closure<dyn FnMut()>>,
}

impl Drop for Mounted {
	fn drop(&mut self) {
		if let (Some(cb), Some(window)) = (self.resize.as_ref(), web_sys::window()) {
			let _ =
				window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Pointer position relative to the canvas.
fn local_point(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders the spatial graph explorer: canvas, HUD, tooltip, and panels.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the window and re-query on resize. Explicit
/// `width`/`height` override automatic sizing. `on_node_click` and
/// `on_cluster_click` receive the clicked element's id. `type_filter` and
/// `focus_node_id` may be reactive; a change issues a new viewport query, and
/// an unset prop falls back to the value in `config`.
#[component]
pub fn SpatialGraphCanvas(
	#[prop(default = ViewerConfig::default())] config: ViewerConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional, into)] on_node_click: Option<Callback<String>>,
	#[prop(optional, into)] on_cluster_click: Option<Callback<String>>,
	#[prop(optional, into)] type_filter: MaybeProp<String>,
	#[prop(optional, into)] focus_node_id: MaybeProp<String>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let overlays = Overlays::new();
	let (config_filter, config_focus) = (config.type_filter.clone(), config.focus_node_id.clone());
	let filters = Signal::derive(move || {
		(
			type_filter.get().or_else(|| config_filter.clone()),
			focus_node_id.get().or_else(|| config_focus.clone()),
		)
	});
	let controller = Controller {
		state: Rc::new(RefCell::new(None)),
		service: HttpGraphService::new(config.api_base_url.clone()),
		overlays,
		debounce_ms: i32::try_from(config.query_debounce_ms).unwrap_or(i32::MAX),
		debounce_generation: Rc::new(Cell::new(0)),
		on_node_click,
		on_cluster_click,
	};
	let mounted = StoredValue::new_local(None::<Mounted>);

	let controller_init = controller.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			warn!("spatial-graph: no window; canvas left blank");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let surface: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("spatial-graph: 2d context has an unexpected type");
					return;
				}
			},
			_ => {
				warn!("spatial-graph: canvas 2d context unavailable");
				return;
			}
		};

		let mut state = SpatialGraphState::new(w, h, &config);
		let (filter, focus) = filters.get_untracked();
		state.set_type_filter(filter);
		state.set_focus_node(focus);
		*controller_init.state.borrow_mut() = Some(state);

		let resize = fullscreen.then(|| {
			let (controller_resize, canvas_resize) = (controller_init.clone(), canvas.clone());
			let cb = Closure::<dyn FnMut()>::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				controller_resize.with_state(|s| s.resize(nw, nh));
				controller_resize.schedule_refresh();
			});
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			cb
		});

		let controller_anim = controller_init.clone();
		let theme = Theme::default();
		let frames = FrameLoop::start(move || {
			if let Some(ref mut s) = *controller_anim.state.borrow_mut() {
				s.tick(FRAME_DT);
				render::render(&s.frame(), &surface, &s.scale, &theme);
				controller_anim.overlays.sync_frame(s);
			}
		});
		match frames {
			Ok(frames) => mounted.set_value(Some(Mounted {
				_frames: frames,
				resize,
			})),
			Err(e) => warn!("spatial-graph: could not start animation: {:?}", e),
		}

		controller_init.refresh();
	});

	let controller_filters = controller.clone();
	Effect::new(move |_| {
		let (filter, focus) = filters.get();
		controller_filters.apply_filters(filter, focus);
	});

	let controller_md = controller.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = local_point(canvas_ref, &ev) {
			controller_md.with_state(|s| s.pointer_down(x, y));
		}
	};

	let controller_mm = controller.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let update = controller_mm.with_state(|s| s.pointer_move(x, y));
		if update.is_some_and(|u| u.panned) {
			controller_mm.schedule_refresh();
		}
	};

	let controller_mu = controller.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(outcome) = controller_mu.with_state(|s| s.pointer_up(x, y)) {
			controller_mu.handle_click(outcome);
		}
	};

	let controller_ml = controller.clone();
	let on_mouseleave = move |_: MouseEvent| {
		controller_ml.with_state(|s| s.pointer_leave());
	};

	let controller_wh = controller.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let delta = ev.delta_y();
		if controller_wh.with_state(|s| s.wheel(delta)) == Some(true) {
			controller_wh.schedule_refresh();
		}
	};

	// Callbacks must be Send; reach the controller through local storage.
	let handle = StoredValue::new_local(controller);
	let on_zoom_in = Callback::new(move |()| {
		handle.with_value(|c| {
			c.with_state(|s| s.zoom_in());
			c.refresh();
		})
	});
	let on_zoom_out = Callback::new(move |()| {
		handle.with_value(|c| {
			c.with_state(|s| s.zoom_out());
			c.refresh();
		})
	});
	let on_reset = Callback::new(move |()| {
		handle.with_value(|c| {
			c.with_state(|s| s.reset_view());
			c.refresh();
		})
	});
	let on_select_node = Callback::new(move |id: String| handle.with_value(|c| c.open_drilldown(id)));
	let on_close_drilldown = Callback::new(move |()| handle.with_value(|c| c.close_drilldown()));
	let on_close_cluster = Callback::new(move |()| handle.with_value(|c| c.close_cluster()));

	on_cleanup(move || {
		let _ = mounted.try_update_value(|m| m.take());
		let _ = handle.try_with_value(|c| c.teardown());
	});

	view! {
		<div class="spatial-graph" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="spatial-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<GraphHud
				status=overlays.status
				on_zoom_in=on_zoom_in
				on_zoom_out=on_zoom_out
				on_reset=on_reset
			/>
			<HoverTooltip hover=overlays.hover />
			<DrilldownPanel
				state=overlays.drilldown
				on_close=on_close_drilldown
				on_select=on_select_node
			/>
			<ClusterPanel
				state=overlays.cluster
				on_close=on_close_cluster
				on_select=on_select_node
			/>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{Arc, Mutex};

	use super::*;
	use crate::components::spatial_graph::physics::tests::node;
	use crate::components::spatial_graph::types::{NodeCluster, SpatialGraphResponse};

	type Log = Arc<Mutex<Vec<String>>>;

	fn recorder(log: &Log, tag: &'static str) -> Callback<String> {
		let log = Arc::clone(log);
		Callback::new(move |id: String| log.lock().unwrap().push(format!("{tag}:{id}")))
	}

	fn controller() -> Controller {
		Controller {
			state: Rc::new(RefCell::new(Some(SpatialGraphState::new(
				800.0,
				600.0,
				&ViewerConfig::default(),
			)))),
			service: HttpGraphService::new("/api"),
			overlays: Overlays::new(),
			debounce_ms: 120,
			debounce_generation: Rc::new(Cell::new(0)),
			on_node_click: None,
			on_cluster_click: None,
		}
	}

	#[test]
	fn cluster_hit_reaches_only_cluster_listener() {
		let owner = Owner::new();
		owner.with(|| {
			let log = Log::default();
			let (on_node, on_cluster) = (recorder(&log, "node"), recorder(&log, "cluster"));

			let request = dispatch_click(
				ClickOutcome::Cluster("c1".into()),
				Some(on_node),
				Some(on_cluster),
			);
			assert_eq!(request, Some(PanelRequest::ClusterMembers("c1".into())));
			assert_eq!(*log.lock().unwrap(), ["cluster:c1"]);
		});
	}

	#[test]
	fn node_hit_fires_listener_before_drilldown_is_requested() {
		let owner = Owner::new();
		owner.with(|| {
			let log = Log::default();
			let (on_node, on_cluster) = (recorder(&log, "node"), recorder(&log, "cluster"));

			let request = dispatch_click(
				ClickOutcome::Node("n1".into()),
				Some(on_node),
				Some(on_cluster),
			);
			// The listener has already run by the time the caller sees the request.
			assert_eq!(*log.lock().unwrap(), ["node:n1"]);
			assert_eq!(request, Some(PanelRequest::Drilldown("n1".into())));
		});
	}

	#[test]
	fn empty_click_fires_nothing() {
		let owner = Owner::new();
		owner.with(|| {
			let log = Log::default();
			let request = dispatch_click(
				ClickOutcome::Empty,
				Some(recorder(&log, "node")),
				Some(recorder(&log, "cluster")),
			);
			assert_eq!(request, None);
			assert!(log.lock().unwrap().is_empty());

			assert_eq!(
				dispatch_click(ClickOutcome::Node("n2".into()), None, None),
				Some(PanelRequest::Drilldown("n2".into()))
			);
		});
	}

	#[test]
	fn click_on_cluster_over_node_reaches_cluster_listener() {
		let owner = Owner::new();
		owner.with(|| {
			// Clusters are hit-tested before nodes, wherever the node lands.
			let (nx, ny) = (400.0, 300.0);
			let resp = SpatialGraphResponse {
				viewport_nodes: vec![node("n")],
				viewport_node_count: 1,
				clusters: vec![NodeCluster {
					id: "c".into(),
					title: "Cluster c".into(),
					center_x: nx,
					center_y: ny,
					member_count: 40,
				}],
				cluster_count: 1,
				..Default::default()
			};
			let mut s = SpatialGraphState::new(800.0, 600.0, &ViewerConfig::default());
			let (t, _) = s.begin_query();
			assert!(s.apply_viewport(t, Ok(resp)));

			let log = Log::default();
			s.pointer_down(nx, ny);
			let outcome = s.pointer_up(nx, ny);
			let request = dispatch_click(
				outcome,
				Some(recorder(&log, "node")),
				Some(recorder(&log, "cluster")),
			);
			assert_eq!(request, Some(PanelRequest::ClusterMembers("c".into())));
			assert_eq!(*log.lock().unwrap(), ["cluster:c"]);
		});
	}

	#[test]
	fn teardown_silences_pending_work() {
		let owner = Owner::new();
		owner.with(|| {
			let c = controller();
			assert!(c.with_state(|s| s.begin_query()).is_some());

			let pending = c.debounce_generation.get();
			assert!(c.is_current(pending));
			c.teardown();

			assert!(!c.is_current(pending));
			assert!(c.with_state(|s| s.begin_query()).is_none());
			// No state, so neither path reaches the network.
			c.refresh();
			c.apply_filters(Some("news".into()), None);
		});
	}
}
