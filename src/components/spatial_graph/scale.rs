//! Size and emphasis tables for rendered elements.
//!
//! This module centralizes the parameters that turn node weights, cluster
//! member counts, and the current detail tier into on-canvas sizes, label
//! policies, and edge opacity.
//!
//! # Sizing
//!
//! - Node radius grows with the square root of the node's `size`, clamped to
//!   `[min_radius, max_radius]`.
//! - Cluster radius grows with the logarithm of the member count and is
//!   strictly increasing, so larger clusters are always drawn larger.
//!
//! # Emphasis
//!
//! The [`ZoomLevel`] picks a [`LabelPolicy`] and scales edge opacity through
//! an [`AlphaFade`] on the raw zoom factor.

use super::lod::ZoomLevel;

/// Alpha that fades with the zoom factor.
/// Fully visible at `full_alpha_k`, fades to `floor` at `zero_alpha_k`.
#[derive(Clone, Debug)]
pub struct AlphaFade {
	pub zero_alpha_k: f64,
	pub full_alpha_k: f64,
	pub floor: f64,
}

impl AlphaFade {
	/// Compute alpha multiplier for a given zoom factor.
	pub fn apply(&self, k: f64) -> f64 {
		if self.zero_alpha_k == self.full_alpha_k {
			return 1.0;
		}
		let t = ((k - self.zero_alpha_k) / (self.full_alpha_k - self.zero_alpha_k)).clamp(0.0, 1.0);
		self.floor + (1.0 - self.floor) * t
	}
}

/// Which node labels are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPolicy {
	/// Only hovered or selected nodes. Used at the Galaxy tier, where nodes
	/// above `label_min_radius` also go unlabeled unless focused.
	FocusedOnly,
	/// Nodes whose radius exceeds the label threshold, plus focused ones.
	LargeNodes,
	/// Every node.
	All,
}

/// Configuration for node sizing and labels.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Radius of a node with `size == 0`.
	pub base_radius: f64,
	/// Added radius per square root of size.
	pub size_factor: f64,
	pub min_radius: f64,
	pub max_radius: f64,
	/// Radius above which a node's title is drawn under [`LabelPolicy::LargeNodes`].
	pub label_min_radius: f64,
	/// Label font size in pixels.
	pub label_size: f64,
	/// Extra hit slop around the drawn radius, in pixels.
	pub hit_slop: f64,
}

/// Configuration for cluster sizing.
#[derive(Clone, Debug)]
pub struct ClusterScaleConfig {
	/// Radius of an empty cluster.
	pub base_radius: f64,
	/// Added radius per natural log of `1 + member_count`.
	pub count_factor: f64,
	/// Member-count font size in pixels.
	pub label_size: f64,
}

/// Configuration for edge strokes.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	pub line_width: f64,
	/// Edge opacity as a function of the zoom factor.
	pub alpha: AlphaFade,
}

/// Configuration for the hover/selection outline.
#[derive(Clone, Debug)]
pub struct OutlineScaleConfig {
	pub ring_width: f64,
	/// Gap between the element edge and the ring.
	pub ring_offset: f64,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub cluster: ClusterScaleConfig,
	pub edge: EdgeScaleConfig,
	pub outline: OutlineScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				base_radius: 4.0,
				size_factor: 2.5,
				min_radius: 4.0,
				max_radius: 28.0,
				label_min_radius: 9.0,
				label_size: 11.0,
				hit_slop: 2.0,
			},
			cluster: ClusterScaleConfig {
				base_radius: 14.0,
				count_factor: 6.0,
				label_size: 12.0,
			},
			edge: EdgeScaleConfig {
				line_width: 1.2,
				alpha: AlphaFade {
					zero_alpha_k: 0.25,
					full_alpha_k: 1.0,
					floor: 0.25,
				},
			},
			outline: OutlineScaleConfig {
				ring_width: 2.0,
				ring_offset: 2.5,
			},
		}
	}
}

impl ScaleConfig {
	/// Drawn radius of a node with the given weight.
	pub fn node_radius(&self, size: f64) -> f64 {
		let c = &self.node;
		(c.base_radius + c.size_factor * size.max(0.0).sqrt()).clamp(c.min_radius, c.max_radius)
	}

	/// Radius used for pointer hits on a node.
	pub fn node_hit_radius(&self, size: f64) -> f64 {
		self.node_radius(size) + self.node.hit_slop
	}

	/// Drawn radius of a cluster, strictly increasing in `member_count`.
	pub fn cluster_radius(&self, member_count: usize) -> f64 {
		let c = &self.cluster;
		c.base_radius + c.count_factor * (1.0 + member_count as f64).ln()
	}
}

/// Pre-computed values for one frame.
///
/// Create this once per frame and pass it to rendering functions.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub labels: LabelPolicy,
	pub label_font: String,
	pub cluster_font: String,
	pub edge_line_width: f64,
	/// Edge opacity multiplier [0, 1].
	pub edge_alpha: f64,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, zoom: f64, level: ZoomLevel) -> Self {
		let labels = match level {
			ZoomLevel::Galaxy => LabelPolicy::FocusedOnly,
			ZoomLevel::System => LabelPolicy::LargeNodes,
			ZoomLevel::Detail => LabelPolicy::All,
		};
		let edge_alpha = match level {
			ZoomLevel::Galaxy => config.edge.alpha.apply(zoom) * 0.6,
			_ => config.edge.alpha.apply(zoom),
		};

		Self {
			labels,
			label_font: format!("{}px sans-serif", config.node.label_size),
			cluster_font: format!("bold {}px sans-serif", config.cluster.label_size),
			edge_line_width: config.edge.line_width,
			edge_alpha,
			ring_width: config.outline.ring_width,
			ring_offset: config.outline.ring_offset,
		}
	}

	/// Whether a node with the given radius gets its title drawn.
	pub fn shows_label(&self, config: &ScaleConfig, radius: f64, focused: bool) -> bool {
		focused
			|| match self.labels {
				LabelPolicy::FocusedOnly => false,
				LabelPolicy::LargeNodes => radius > config.node.label_min_radius,
				LabelPolicy::All => true,
			}
	}
}
