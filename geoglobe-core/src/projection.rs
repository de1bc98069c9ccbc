/// Geographic to sphere projection
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Position on a sphere of the given radius
    pub fn to_xyz(&self, radius: f64) -> Point3<f64> {
        lon_lat_to_xyz(radius, self.lon, self.lat, 1.0)
    }

    /// The coordinate as a planar point, longitude on x
    pub fn planar(&self) -> Point2<f64> {
        Point2::new(self.lon, self.lat)
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

/// Convert longitude/latitude (degrees) to a point on a sphere.
///
/// Longitude is negated so that 0° sits on +X and 90°E on -Z, which is the
/// orientation of a right-handed, Y-up scene looking down -Z.
pub fn lon_lat_to_xyz(radius: f64, longitude: f64, latitude: f64, scale: f64) -> Point3<f64> {
    let lon = -longitude.to_radians();
    let lat = latitude.to_radians();
    let r = radius * scale;

    Point3::new(
        r * lat.cos() * lon.cos(),
        r * lat.sin(),
        r * lat.cos() * lon.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const R: f64 = 120.0;

    #[test]
    fn test_equator_axes() {
        assert_abs_diff_eq!(lon_lat_to_xyz(R, 0.0, 0.0, 1.0), Point3::new(R, 0.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(lon_lat_to_xyz(R, 90.0, 0.0, 1.0), Point3::new(0.0, 0.0, -R), epsilon = 1e-9);
        assert_abs_diff_eq!(lon_lat_to_xyz(R, 180.0, 0.0, 1.0), Point3::new(-R, 0.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(lon_lat_to_xyz(R, -90.0, 0.0, 1.0), Point3::new(0.0, 0.0, R), epsilon = 1e-9);
    }

    #[test]
    fn test_poles() {
        assert_abs_diff_eq!(lon_lat_to_xyz(R, 37.0, 90.0, 1.0), Point3::new(0.0, R, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(lon_lat_to_xyz(R, -12.0, -90.0, 1.0), Point3::new(0.0, -R, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_scale_multiplies_radius() {
        let p = lon_lat_to_xyz(R, 23.5, -41.0, 1.5);
        assert!((p.coords.norm() - R * 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_geo_point_helpers() {
        let p = GeoPoint::from([10.0, 20.0]);
        assert_eq!(p.planar(), Point2::new(10.0, 20.0));
        assert_abs_diff_eq!(p.to_xyz(R), lon_lat_to_xyz(R, 10.0, 20.0, 1.0), epsilon = 1e-12);
    }
}
