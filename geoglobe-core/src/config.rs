/// Tuning constants shared by tessellation, arc construction and the front-ends
use serde::{Deserialize, Serialize};

/// Globe configuration.
///
/// Every field has a default matching the look the globe was tuned for, so a
/// partial JSON document only needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Sphere radius in scene units.
    pub radius: f64,
    /// Height of country outlines above the fill surface, keeps the two
    /// primitives from z-fighting.
    pub outline_offset: f64,
    /// Interior sampling grid spacing, in degrees.
    pub grid_spacing: f64,
    /// How far an arc's midpoint bows out per radian of angular distance.
    pub bulge_coefficient: f64,
    /// Fraction of an arc's angular span drawn as the moving flight head.
    pub head_fraction: f64,
    /// Number of divisions used when sampling an arc path.
    pub arc_divisions: usize,
    /// Seconds for the flight head to travel from source to target.
    pub animation_duration_secs: f64,
    /// Reject rings with fewer than three points instead of tessellating them.
    pub strict_rings: bool,
}

impl GlobeConfig {
    pub fn with_radius(radius: f64) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Radius the outline loops are projected at.
    pub fn outline_radius(&self) -> f64 {
        self.radius + self.outline_offset
    }

    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: 120.0,
            outline_offset: 0.1,
            grid_spacing: 2.0,
            bulge_coefficient: 0.2,
            head_fraction: 1.0 / 7.0,
            arc_divisions: 200,
            animation_duration_secs: 8.0,
            strict_rings: false,
        }
    }
}
