//! Canvas rendering for the spatial graph.
//!
//! One immediate-mode pass per animation frame, in fixed z-order:
//! 1. Clear and paint the background (screen space)
//! 2. Edges between current node positions
//! 3. Clusters as shaded discs with their member count
//! 4. Nodes colored by lifecycle state, outlines, then labels
//!
//! HUD overlays are ordinary DOM elements layered on top of the canvas.
//! Drawing goes through [`Surface`] so frames can be inspected off-browser.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::interaction::HitTarget;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::FrameView;
use super::theme::{Color, Theme};

/// Vertical placement of text relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
	Middle,
	Top,
}

/// The drawing primitives the renderer needs.
pub trait Surface {
	fn clear(&self, width: f64, height: f64);
	/// Fill the whole surface with a radial gradient from `center` to `outer`.
	fn fill_background(&self, width: f64, height: f64, center: Color, outer: Color);
	fn line(&self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
	fn disc(&self, x: f64, y: f64, radius: f64, fill: Color);
	/// Disc filled with a radial gradient from `core` to `rim`.
	fn shaded_disc(&self, x: f64, y: f64, radius: f64, core: Color, rim: Color);
	fn ring(&self, x: f64, y: f64, radius: f64, color: Color, width: f64);
	/// Horizontally centered text.
	fn text(&self, text: &str, x: f64, y: f64, font: &str, color: Color, baseline: Baseline);
}

/// Renders one complete frame.
pub fn render(frame: &FrameView<'_>, surface: &impl Surface, config: &ScaleConfig, theme: &Theme) {
	let scale = ScaledValues::new(config, frame.zoom, frame.level);

	surface.clear(frame.width, frame.height);
	surface.fill_background(
		frame.width,
		frame.height,
		theme.background.color_center,
		theme.background.color,
	);

	draw_edges(frame, surface, &scale, theme);
	draw_clusters(frame, surface, config, &scale, theme);
	draw_nodes(frame, surface, config, &scale, theme);
}

fn draw_edges(frame: &FrameView<'_>, surface: &impl Surface, scale: &ScaledValues, theme: &Theme) {
	let (ox, oy) = frame.offset;
	let color = theme.edge.color.fade(scale.edge_alpha);

	for link in frame.links {
		// Slots index the same snapshot the links came from.
		let (Some(a), Some(b)) = (frame.nodes.get(link.source), frame.nodes.get(link.target)) else {
			continue;
		};
		surface.line(
			(a.x() + ox, a.y() + oy),
			(b.x() + ox, b.y() + oy),
			color,
			scale.edge_line_width,
		);
	}
}

fn draw_clusters(
	frame: &FrameView<'_>,
	surface: &impl Surface,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let (ox, oy) = frame.offset;

	for (i, cluster) in frame.clusters.iter().enumerate() {
		let (x, y) = (cluster.center_x + ox, cluster.center_y + oy);
		let radius = config.cluster_radius(cluster.member_count);
		let target = HitTarget::Cluster(i);
		let lit = frame.highlight.intensity(target);

		surface.shaded_disc(
			x,
			y,
			radius,
			theme.cluster.core.lighten(0.25 * lit),
			theme.cluster.rim,
		);
		draw_outline(frame, surface, scale, theme, target, x, y, radius);
		surface.text(
			&cluster.member_count.to_string(),
			x,
			y,
			&scale.cluster_font,
			theme.cluster.label,
			Baseline::Middle,
		);
	}
}

fn draw_nodes(
	frame: &FrameView<'_>,
	surface: &impl Surface,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let (ox, oy) = frame.offset;

	for (i, vn) in frame.nodes.iter().enumerate() {
		let (x, y) = (vn.x() + ox, vn.y() + oy);
		let radius = config.node_radius(vn.node.size);
		let target = HitTarget::Node(i);

		surface.disc(x, y, radius, theme.node.fill(vn.node.state));
		draw_outline(frame, surface, scale, theme, target, x, y, radius);
	}

	// Labels last so they sit above neighbouring discs.
	for (i, vn) in frame.nodes.iter().enumerate() {
		let radius = config.node_radius(vn.node.size);
		let target = HitTarget::Node(i);
		let focused = frame.highlight.hovered() == Some(target) || frame.is_selected(target);
		if vn.node.title.is_empty() || !scale.shows_label(config, radius, focused) {
			continue;
		}
		surface.text(
			&vn.node.title,
			vn.x() + ox,
			vn.y() + oy + radius + 3.0,
			&scale.label_font,
			theme.node.label,
			Baseline::Top,
		);
	}
}

/// Selection ring at full strength, hover ring at its smoothed intensity.
#[allow(clippy::too_many_arguments)]
fn draw_outline(
	frame: &FrameView<'_>,
	surface: &impl Surface,
	scale: &ScaledValues,
	theme: &Theme,
	target: HitTarget,
	x: f64,
	y: f64,
	radius: f64,
) {
	let ring_radius = radius + scale.ring_offset;
	if frame.is_selected(target) {
		surface.ring(x, y, ring_radius, theme.node.selected_outline, scale.ring_width);
		return;
	}
	let lit = frame.highlight.intensity(target);
	if lit > 0.01 {
		surface.ring(
			x,
			y,
			ring_radius,
			theme.node.hover_outline.fade(lit),
			scale.ring_width,
		);
	}
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_background(&self, width: f64, height: f64, center: Color, outer: Color) {
		let (cx, cy) = (width / 2.0, height / 2.0);
		match radial_gradient(self, (cx, cy, 0.0), (cx, cy, width.max(height) * 0.8), center, outer) {
			Ok(gradient) => self.set_fill_style_canvas_gradient(&gradient),
			Err(_) => self.set_fill_style_str(&outer.to_css()),
		}
		self.fill_rect(0.0, 0.0, width, height);
	}

	fn line(&self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn disc(&self, x: f64, y: f64, radius: f64, fill: Color) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, 2.0 * PI);
		self.set_fill_style_str(&fill.to_css());
		self.fill();
	}

	fn shaded_disc(&self, x: f64, y: f64, radius: f64, core: Color, rim: Color) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, 2.0 * PI);
		match radial_gradient(self, (x, y, 0.0), (x, y, radius), core, rim) {
			Ok(gradient) => self.set_fill_style_canvas_gradient(&gradient),
			Err(_) => self.set_fill_style_str(&core.to_css()),
		}
		self.fill();
	}

	fn ring(&self, x: f64, y: f64, radius: f64, color: Color, width: f64) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, 2.0 * PI);
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.stroke();
	}

	fn text(&self, text: &str, x: f64, y: f64, font: &str, color: Color, baseline: Baseline) {
		self.set_font(font);
		self.set_text_align("center");
		self.set_text_baseline(match baseline {
			Baseline::Middle => "middle",
			Baseline::Top => "top",
		});
		self.set_fill_style_str(&color.to_css());
		let _ = self.fill_text(text, x, y);
	}
}

fn radial_gradient(
	ctx: &CanvasRenderingContext2d,
	(x0, y0, r0): (f64, f64, f64),
	(x1, y1, r1): (f64, f64, f64),
	inner: Color,
	outer: Color,
) -> Result<web_sys::CanvasGradient, JsValue> {
	let gradient = ctx.create_radial_gradient(x0, y0, r0, x1, y1, r1)?;
	gradient.add_color_stop(0.0, &inner.to_css())?;
	gradient.add_color_stop(1.0, &outer.to_css())?;
	Ok(gradient)
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;
	use crate::components::spatial_graph::config::ViewerConfig;
	use crate::components::spatial_graph::physics::tests::{edge, node};
	use crate::components::spatial_graph::state::SpatialGraphState;
	use crate::components::spatial_graph::types::{NodeCluster, SpatialGraphResponse};

	#[derive(Clone, Debug, PartialEq)]
	enum Op {
		Clear,
		Background,
		Line,
		Disc,
		ShadedDisc,
		Ring,
		Text(String),
	}

	#[derive(Default)]
	struct Recorder(RefCell<Vec<Op>>);

	impl Recorder {
		fn ops(&self) -> Vec<Op> {
			self.0.borrow().clone()
		}

		fn count(&self, op: &Op) -> usize {
			self.0.borrow().iter().filter(|o| *o == op).count()
		}
	}

	impl Surface for Recorder {
		fn clear(&self, _: f64, _: f64) {
			self.0.borrow_mut().push(Op::Clear);
		}
		fn fill_background(&self, _: f64, _: f64, _: Color, _: Color) {
			self.0.borrow_mut().push(Op::Background);
		}
		fn line(&self, _: (f64, f64), _: (f64, f64), _: Color, _: f64) {
			self.0.borrow_mut().push(Op::Line);
		}
		fn disc(&self, _: f64, _: f64, _: f64, _: Color) {
			self.0.borrow_mut().push(Op::Disc);
		}
		fn shaded_disc(&self, _: f64, _: f64, _: f64, _: Color, _: Color) {
			self.0.borrow_mut().push(Op::ShadedDisc);
		}
		fn ring(&self, _: f64, _: f64, _: f64, _: Color, _: f64) {
			self.0.borrow_mut().push(Op::Ring);
		}
		fn text(&self, text: &str, _: f64, _: f64, _: &str, _: Color, _: Baseline) {
			self.0.borrow_mut().push(Op::Text(text.to_string()));
		}
	}

	fn loaded(resp: SpatialGraphResponse, zoom: f64) -> SpatialGraphState {
		let config = ViewerConfig {
			initial_zoom: zoom,
			..ViewerConfig::default()
		};
		let mut s = SpatialGraphState::new(800.0, 600.0, &config);
		let (t, _) = s.begin_query();
		assert!(s.apply_viewport(t, Ok(resp)));
		s
	}

	fn draw(s: &SpatialGraphState) -> Recorder {
		let rec = Recorder::default();
		render(&s.frame(), &rec, &s.scale, &Theme::default());
		rec
	}

	#[test]
	fn empty_snapshot_draws_background_only() {
		let mut s = loaded(SpatialGraphResponse::default(), 1.0);
		s.tick(0.016);
		assert_eq!(draw(&s).ops(), vec![Op::Clear, Op::Background]);
	}

	#[test]
	fn no_snapshot_draws_background_only() {
		let s = SpatialGraphState::new(800.0, 600.0, &ViewerConfig::default());
		assert_eq!(draw(&s).ops(), vec![Op::Clear, Op::Background]);
	}

	#[test]
	fn dangling_edges_are_not_drawn() {
		let resp = SpatialGraphResponse {
			viewport_nodes: vec![node("a"), node("b")],
			edges: vec![edge("a", "b"), edge("b", "gone"), edge("gone", "a")],
			..Default::default()
		};
		let mut s = loaded(resp, 1.0);
		s.tick(0.016);
		let rec = draw(&s);
		assert_eq!(rec.count(&Op::Line), 1);
		assert_eq!(rec.count(&Op::Disc), 2);
	}

	#[test]
	fn layers_are_drawn_in_order() {
		let resp = SpatialGraphResponse {
			viewport_nodes: vec![node("a"), node("b")],
			edges: vec![edge("a", "b")],
			clusters: vec![NodeCluster {
				id: "c".into(),
				title: "C".into(),
				center_x: 100.0,
				center_y: 100.0,
				member_count: 17,
			}],
			..Default::default()
		};
		let rec = draw(&loaded(resp, 3.0));
		let ops = rec.ops();

		let pos = |op: &Op| ops.iter().position(|o| o == op).unwrap();
		assert!(pos(&Op::Background) < pos(&Op::Line));
		assert!(pos(&Op::Line) < pos(&Op::ShadedDisc));
		assert!(pos(&Op::Text("17".into())) < pos(&Op::Disc));
		// Detail tier labels every node.
		assert_eq!(rec.count(&Op::Text("A".into())), 1);
		assert_eq!(rec.count(&Op::Text("B".into())), 1);
	}

	#[test]
	fn galaxy_tier_labels_only_focused_nodes() {
		let resp = SpatialGraphResponse {
			viewport_nodes: vec![node("a"), node("b")],
			..Default::default()
		};
		let mut s = loaded(resp, 0.2);
		assert!(!draw(&s).ops().iter().any(|o| matches!(o, Op::Text(_))));

		let (x, y) = {
			let n = &s.snapshot().unwrap().nodes()[1];
			(n.x(), n.y())
		};
		s.pointer_down(x, y);
		s.pointer_up(x, y);
		let rec = draw(&s);
		assert_eq!(rec.count(&Op::Text("B".into())), 1);
		assert_eq!(rec.count(&Op::Text("A".into())), 0);
		assert_eq!(rec.count(&Op::Ring), 1);
	}
}
