/// Polygon rings in geographic space: inclusion test and interior sampling
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::projection::GeoPoint;

/// A closed contour of geographic vertices.
///
/// The last vertex connects back to the first; a repeated closing vertex is
/// not required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring {
    pub points: Vec<GeoPoint>,
}

/// The rings of one logical entity, tessellated independently and then merged
pub type Polygon = Vec<Ring>;

/// Whole-degree bounding box of a ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl GeoBounds {
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.lon_min..=self.lon_max).contains(&point.lon)
            && (self.lat_min..=self.lat_max).contains(&point.lat)
    }
}

impl Ring {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Check the ring has enough vertices to enclose an area.
    /// `index` is the ring's position within its polygon, used for reporting.
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.points.len() < 3 {
            return Err(GeometryError::MalformedPolygon {
                ring: index,
                points: self.points.len(),
            });
        }
        Ok(())
    }

    /// Even-odd ray casting test.
    ///
    /// An edge crosses the horizontal ray toward +x when exactly one of its
    /// endpoints lies strictly above the point. Points on the boundary may be
    /// classified either way.
    pub fn contains(&self, point: Point2<f64>) -> bool {
        let (x, y) = (point.x, point.y);
        let n = self.points.len();
        let mut inside = false;

        let mut j = n.wrapping_sub(1);
        for i in 0..n {
            let (xi, yi) = (self.points[i].lon, self.points[i].lat);
            let (xj, yj) = (self.points[j].lon, self.points[j].lat);

            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }

        inside
    }

    /// Bounding box with the minimums floored and the maximums ceiled
    pub fn bounding_box(&self) -> Option<GeoBounds> {
        let first = self.points.first()?;
        let mut bounds = GeoBounds {
            lon_min: first.lon,
            lon_max: first.lon,
            lat_min: first.lat,
            lat_max: first.lat,
        };
        for p in &self.points[1..] {
            bounds.lon_min = bounds.lon_min.min(p.lon);
            bounds.lon_max = bounds.lon_max.max(p.lon);
            bounds.lat_min = bounds.lat_min.min(p.lat);
            bounds.lat_max = bounds.lat_max.max(p.lat);
        }

        Some(GeoBounds {
            lon_min: bounds.lon_min.floor(),
            lon_max: bounds.lon_max.ceil(),
            lat_min: bounds.lat_min.floor(),
            lat_max: bounds.lat_max.ceil(),
        })
    }

    /// Sample a uniform grid over the bounding box, keeping the points inside
    /// the ring. Points are produced longitude-major.
    pub fn sample_interior(&self, spacing: f64) -> Vec<GeoPoint> {
        let Some(bounds) = self.bounding_box() else {
            return Vec::new();
        };
        if !(spacing > 0.0) {
            log::warn!("ignoring non-positive grid spacing {spacing}");
            return Vec::new();
        }

        let rows = ((bounds.lon_max - bounds.lon_min) / spacing).ceil() as usize;
        let cols = ((bounds.lat_max - bounds.lat_min) / spacing).ceil() as usize;

        let mut interior = Vec::new();
        for i in 0..=rows {
            for j in 0..=cols {
                let candidate = GeoPoint::new(
                    bounds.lon_min + i as f64 * spacing,
                    bounds.lat_min + j as f64 * spacing,
                );
                if self.contains(candidate.planar()) {
                    interior.push(candidate);
                }
            }
        }

        interior
    }
}

impl From<Vec<GeoPoint>> for Ring {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }
}

impl FromIterator<GeoPoint> for Ring {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
