//! Visual theming for the spatial graph.
//!
//! Colors for the background, edges, lifecycle-coded nodes, clusters, and
//! the hover/selection outline.

use super::types::LifecycleState;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Scale the current alpha by `factor`.
	pub fn fade(self, factor: f64) -> Self {
		Self {
			a: self.a * factor.clamp(0.0, 1.0),
			..self
		}
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Outer background color
	pub color: Color,
	/// Center color of the radial gradient
	pub color_center: Color,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub ice: Color,
	pub water: Color,
	pub gas: Color,
	pub label: Color,
	/// Ring drawn around the hovered element
	pub hover_outline: Color,
	/// Ring drawn around the selected element
	pub selected_outline: Color,
}

impl NodeStyle {
	pub fn fill(&self, state: LifecycleState) -> Color {
		match state {
			LifecycleState::Ice => self.ice,
			LifecycleState::Water => self.water,
			LifecycleState::Gas => self.gas,
		}
	}
}

/// Cluster visual style.
#[derive(Clone, Debug)]
pub struct ClusterStyle {
	/// Gradient center
	pub core: Color,
	/// Gradient rim
	pub rim: Color,
	pub label: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub cluster: ClusterStyle,
}

impl Theme {
	/// Deep-space dark theme (default)
	pub fn deep_space() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(10, 12, 22),
				color_center: Color::rgb(24, 28, 46),
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 190, 0.45),
			},
			node: NodeStyle {
				ice: Color::rgb(120, 190, 235),
				water: Color::rgb(64, 132, 214),
				gas: Color::rgb(196, 140, 230),
				label: Color::rgba(235, 240, 250, 0.9),
				hover_outline: Color::rgb(255, 255, 255),
				selected_outline: Color::rgb(255, 206, 84),
			},
			cluster: ClusterStyle {
				core: Color::rgba(170, 150, 255, 0.85),
				rim: Color::rgba(70, 60, 160, 0.15),
				label: Color::rgb(255, 255, 255),
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::deep_space()
	}
}
