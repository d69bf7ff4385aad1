//! Discrete-time force layout for the nodes of the current snapshot.
//!
//! Three additive forces act on every node each frame: a constant-magnitude
//! pull toward the canvas center, inverse-square repulsion from nodes within
//! a fixed radius, and a constant-magnitude pull along each outgoing edge.
//! Repulsion is O(n²); the service keeps `n` to a renderable subset.
//!
//! The simulator never settles on its own. It runs every frame until the
//! next snapshot replaces it.

use std::collections::HashMap;

use super::types::{Edge, GraphNode};

/// Force constants and integration parameters.
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
	/// Magnitude of the unit pull toward the canvas center.
	pub gravity: f64,
	/// Numerator of the inverse-square repulsion.
	pub repulsion: f64,
	/// Nodes farther apart than this do not repel.
	pub repulsion_radius: f64,
	/// Distances below this are treated as this, bounding the repulsion.
	pub min_distance: f64,
	/// Magnitude of the unit pull from an edge's source toward its target.
	pub edge_attraction: f64,
	pub step: f64,
	/// Multiplicative velocity decay per frame, in (0, 1).
	pub damping: f64,
	/// Distance kept between node centers and the canvas border.
	pub margin: f64,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			gravity: 0.05,
			repulsion: 200.0,
			repulsion_radius: 100.0,
			min_distance: 10.0,
			edge_attraction: 0.02,
			step: 1.0,
			damping: 0.85,
			margin: 20.0,
		}
	}
}

/// A [`GraphNode`] plus the simulation state the simulator alone writes.
#[derive(Clone, Debug)]
pub struct ViewportNode {
	pub node: GraphNode,
	x: f64,
	y: f64,
	vx: f64,
	vy: f64,
}

impl ViewportNode {
	pub fn x(&self) -> f64 {
		self.x
	}

	pub fn y(&self) -> f64 {
		self.y
	}

	pub fn velocity(&self) -> (f64, f64) {
		(self.vx, self.vy)
	}
}

/// An edge whose endpoints both resolved to node slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeLink {
	/// Position of the edge in the snapshot's edge list.
	pub edge: usize,
	pub source: usize,
	pub target: usize,
}

/// Edge endpoints resolved against the node list of one snapshot.
///
/// Built once per snapshot; edges with a missing endpoint are left out and
/// only counted.
#[derive(Clone, Debug, Default)]
pub struct EdgeIndex {
	links: Vec<EdgeLink>,
	outgoing: Vec<Vec<usize>>,
	dangling: usize,
}

impl EdgeIndex {
	pub fn build(nodes: &[GraphNode], edges: &[Edge]) -> Self {
		let slots: HashMap<&str, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();

		let mut index = Self {
			links: Vec::with_capacity(edges.len()),
			outgoing: vec![Vec::new(); nodes.len()],
			dangling: 0,
		};

		for (i, edge) in edges.iter().enumerate() {
			match (
				slots.get(edge.source.as_str()),
				slots.get(edge.target.as_str()),
			) {
				(Some(&source), Some(&target)) => {
					index.links.push(EdgeLink {
						edge: i,
						source,
						target,
					});
					index.outgoing[source].push(target);
				}
				_ => index.dangling += 1,
			}
		}
		index
	}

	pub fn links(&self) -> &[EdgeLink] {
		&self.links
	}

	/// Target slots of edges whose source is `slot`.
	pub fn outgoing(&self, slot: usize) -> &[usize] {
		self.outgoing.get(slot).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Number of edges skipped for referencing an absent node.
	pub fn dangling(&self) -> usize {
		self.dangling
	}
}

/// Deterministic pseudo-random value in `[0, 1)`.
fn pseudo_random(seed: f64) -> f64 {
	let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
	x - x.floor()
}

/// Clamp one coordinate into `[margin, extent - margin]`, collapsing to the
/// middle when the canvas is narrower than two margins.
fn clamp_axis(v: f64, margin: f64, extent: f64) -> f64 {
	let (lo, hi) = (margin, extent - margin);
	if hi < lo { extent / 2.0 } else { v.clamp(lo, hi) }
}

/// Position state for the nodes of one snapshot.
pub struct Simulation {
	nodes: Vec<ViewportNode>,
	edges: EdgeIndex,
	config: PhysicsConfig,
	width: f64,
	height: f64,
	forces: Vec<(f64, f64)>,
}

impl Simulation {
	/// Seeds every node at a pseudo-random position inside the clamped bounds.
	pub fn new(
		nodes: &[GraphNode],
		edges: &[Edge],
		seed: u64,
		width: f64,
		height: f64,
		config: PhysicsConfig,
	) -> Self {
		let base = seed as f64 * 7.31 + 0.5;
		let usable_w = (width - 2.0 * config.margin).max(0.0);
		let usable_h = (height - 2.0 * config.margin).max(0.0);

		let placed = nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let s = base + i as f64 * 1.7;
				ViewportNode {
					node: node.clone(),
					x: clamp_axis(
						config.margin + pseudo_random(s * 1.1) * usable_w,
						config.margin,
						width,
					),
					y: clamp_axis(
						config.margin + pseudo_random(s * 2.3) * usable_h,
						config.margin,
						height,
					),
					vx: 0.0,
					vy: 0.0,
				}
			})
			.collect();

		Self {
			nodes: placed,
			edges: EdgeIndex::build(nodes, edges),
			forces: vec![(0.0, 0.0); nodes.len()],
			config,
			width,
			height,
		}
	}

	pub fn nodes(&self) -> &[ViewportNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &EdgeIndex {
		&self.edges
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Advance every node by one time step.
	pub fn step(&mut self) {
		self.accumulate_forces();

		let c = &self.config;
		for (node, &(fx, fy)) in self.nodes.iter_mut().zip(&self.forces) {
			node.vx += fx * c.step;
			node.vy += fy * c.step;
			node.x += node.vx * c.step;
			node.y += node.vy * c.step;
			node.vx *= c.damping;
			node.vy *= c.damping;

			let (cx, cy) = (
				clamp_axis(node.x, c.margin, self.width),
				clamp_axis(node.y, c.margin, self.height),
			);
			if cx != node.x {
				node.x = cx;
				node.vx = 0.0;
			}
			if cy != node.y {
				node.y = cy;
				node.vy = 0.0;
			}
		}
	}

	fn accumulate_forces(&mut self) {
		let c = &self.config;
		let (center_x, center_y) = (self.width / 2.0, self.height / 2.0);
		let n = self.nodes.len();
		self.forces.clear();
		self.forces.resize(n, (0.0, 0.0));

		for i in 0..n {
			let (x, y) = (self.nodes[i].x, self.nodes[i].y);
			let (mut fx, mut fy) = (0.0, 0.0);

			let (dx, dy) = (center_x - x, center_y - y);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist > 1e-9 {
				fx += dx / dist * c.gravity;
				fy += dy / dist * c.gravity;
			}

			for (j, other) in self.nodes.iter().enumerate() {
				if i == j {
					continue;
				}
				let (dx, dy) = (x - other.x, y - other.y);
				let dist = (dx * dx + dy * dy).sqrt();
				if dist >= c.repulsion_radius {
					continue;
				}
				let (ux, uy) = if dist > 1e-9 {
					(dx / dist, dy / dist)
				} else {
					// Coincident nodes: split along a per-pair angle.
					let angle = (i as f64 * 0.618_034 + j as f64 * 0.414_214) * std::f64::consts::TAU;
					(angle.cos(), angle.sin())
				};
				let d = dist.max(c.min_distance);
				let magnitude = c.repulsion / (d * d);
				fx += ux * magnitude;
				fy += uy * magnitude;
			}

			for &target in self.edges.outgoing(i) {
				let (dx, dy) = (self.nodes[target].x - x, self.nodes[target].y - y);
				let dist = (dx * dx + dy * dy).sqrt();
				if dist > 1e-9 {
					fx += dx / dist * c.edge_attraction;
					fy += dy / dist * c.edge_attraction;
				}
			}

			self.forces[i] = (fx, fy);
		}
	}

	#[cfg(test)]
	pub(super) fn place(&mut self, slot: usize, x: f64, y: f64) {
		let node = &mut self.nodes[slot];
		node.x = x;
		node.y = y;
		node.vx = 0.0;
		node.vy = 0.0;
	}
}
