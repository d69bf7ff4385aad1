//! Level-of-detail tiers selected from the zoom factor.
//!
//! The tier only picks a label and biases rendering emphasis. Whether a
//! region shows clusters or individual nodes is decided by the service.

/// Discrete detail tier, ordered from most to least aggregated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ZoomLevel {
	/// Structure collapsed into clusters.
	Galaxy,
	/// Major nodes visible, minor structure clustered.
	System,
	/// Full node and edge fidelity.
	Detail,
}

impl ZoomLevel {
	pub fn name(self) -> &'static str {
		match self {
			ZoomLevel::Galaxy => "Galaxy",
			ZoomLevel::System => "System",
			ZoomLevel::Detail => "Detail",
		}
	}
}

/// Breakpoints on the zoom factor.
///
/// `zoom < galaxy_below` is Galaxy, `zoom >= detail_from` is Detail,
/// everything in between is System.
#[derive(Clone, Copy, Debug)]
pub struct LodThresholds {
	pub galaxy_below: f64,
	pub detail_from: f64,
}

impl Default for LodThresholds {
	fn default() -> Self {
		Self {
			galaxy_below: 0.5,
			detail_from: 2.0,
		}
	}
}

impl LodThresholds {
	pub fn level(&self, zoom_factor: f64) -> ZoomLevel {
		if zoom_factor < self.galaxy_below {
			ZoomLevel::Galaxy
		} else if zoom_factor >= self.detail_from {
			ZoomLevel::Detail
		} else {
			ZoomLevel::System
		}
	}
}
