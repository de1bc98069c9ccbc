/// Rotation into the plane spanned by two sphere points and the sphere center
use nalgebra::{Point2, Point3, Unit, UnitQuaternion, Vector3};

use crate::error::{GeometryError, Result};

/// Cross products shorter than this (for unit inputs) mark the endpoints as
/// coincident or antipodal
const DEGENERATE_SINE: f64 = 1e-9;

/// Two sphere points expressed in a frame where they, and the sphere center,
/// lie in the z = 0 plane with their midpoint direction on +Y
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcFrame {
    /// World to aligned frame
    pub rotation: UnitQuaternion<f64>,
    /// Aligned frame to world
    pub rotation_inverse: UnitQuaternion<f64>,
    pub source: Point2<f64>,
    pub target: Point2<f64>,
}

impl ArcFrame {
    /// Map a point of the aligned plane back to world space
    pub fn to_world(&self, point: Point2<f64>) -> Point3<f64> {
        self.rotation_inverse * Point3::new(point.x, point.y, 0.0)
    }
}

/// Build the aligned frame for `source` and `target`, both measured from the
/// sphere center at the origin.
pub fn align(source: &Point3<f64>, target: &Point3<f64>) -> Result<ArcFrame> {
    let a = source.coords.try_normalize(f64::EPSILON).ok_or(GeometryError::DegenerateArc)?;
    let b = target.coords.try_normalize(f64::EPSILON).ok_or(GeometryError::DegenerateArc)?;
    let normal = a
        .cross(&b)
        .try_normalize(DEGENERATE_SINE)
        .ok_or(GeometryError::DegenerateArc)?;

    let to_plane = rotation_between(&Unit::new_unchecked(normal), &Vector3::z_axis());
    let source_xoy = to_plane * source;
    let target_xoy = to_plane * target;

    let middle = ((source_xoy.coords + target_xoy.coords) * 0.5)
        .try_normalize(f64::EPSILON)
        .ok_or(GeometryError::DegenerateArc)?;
    let to_vertical = rotation_between(&Unit::new_unchecked(middle), &Vector3::y_axis());

    let rotation = to_vertical * to_plane;
    let source_aligned = to_vertical * source_xoy;
    let target_aligned = to_vertical * target_xoy;

    Ok(ArcFrame {
        rotation,
        rotation_inverse: to_plane.inverse() * to_vertical.inverse(),
        source: source_aligned.xy(),
        target: target_aligned.xy(),
    })
}

/// Shortest rotation taking unit vector `from` onto unit vector `to`.
///
/// Opposite vectors have no unique shortest rotation; a half turn about an
/// axis perpendicular to `from` is used, picked from its dominant component.
pub fn rotation_between(
    from: &Unit<Vector3<f64>>,
    to: &Unit<Vector3<f64>>,
) -> UnitQuaternion<f64> {
    if let Some(rotation) = UnitQuaternion::rotation_between_axis(from, to) {
        return rotation;
    }

    let axis = if from.x.abs() > from.z.abs() {
        Vector3::new(-from.y, from.x, 0.0)
    } else {
        Vector3::new(0.0, -from.z, from.y)
    };
    UnitQuaternion::from_axis_angle(&Unit::new_normalize(axis), std::f64::consts::PI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::lon_lat_to_xyz;
    use approx::assert_abs_diff_eq;

    const R: f64 = 120.0;

    #[test]
    fn test_round_trip() {
        let pairs = [
            ((-23.0075, 50.4296), (26.1223, -7.8756)),
            ((142.8123, -58.9813), (157.0064, 10.7816)),
            ((-175.6286, 72.8359), (-39.071, -35.438)),
            ((178.7439, 25.8303), (137.19, 17.118)),
            ((0.0, 0.0), (90.0, 0.0)),
        ];
        for ((lon1, lat1), (lon2, lat2)) in pairs {
            let a = lon_lat_to_xyz(R, lon1, lat1, 1.0);
            let b = lon_lat_to_xyz(R, lon2, lat2, 1.0);
            let frame = align(&a, &b).unwrap();

            assert_abs_diff_eq!(frame.to_world(frame.source), a, epsilon = 1e-9);
            assert_abs_diff_eq!(frame.to_world(frame.target), b, epsilon = 1e-9);
            assert_abs_diff_eq!(frame.rotation * a, Point3::new(frame.source.x, frame.source.y, 0.0), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_aligned_points_are_symmetric_about_y() {
        let a = lon_lat_to_xyz(R, 10.0, 20.0, 1.0);
        let b = lon_lat_to_xyz(R, 70.0, -15.0, 1.0);
        let frame = align(&a, &b).unwrap();

        assert_abs_diff_eq!(frame.source.x, -frame.target.x, epsilon = 1e-9);
        assert_abs_diff_eq!(frame.source.y, frame.target.y, epsilon = 1e-9);
        assert!(frame.source.y > 0.0);
        // Counterclockwise travel from source to target puts the source on the right
        assert!(frame.source.x > 0.0);
        assert_abs_diff_eq!(frame.source.coords.norm(), R, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_pairs() {
        let a = lon_lat_to_xyz(R, 30.0, 10.0, 1.0);
        assert_eq!(align(&a, &a), Err(GeometryError::DegenerateArc));
        assert_eq!(align(&a, &Point3::from(-a.coords)), Err(GeometryError::DegenerateArc));
        assert_eq!(align(&Point3::origin(), &a), Err(GeometryError::DegenerateArc));
    }

    #[test]
    fn test_rotation_between_opposite_vectors() {
        let down = Unit::new_normalize(Vector3::new(0.0, -1.0, 0.0));
        let q = rotation_between(&down, &Vector3::y_axis());
        assert_abs_diff_eq!(q * down.into_inner(), Vector3::y(), epsilon = 1e-12);
        // Stays a rotation about z, so the z = 0 plane is preserved
        assert_abs_diff_eq!(q * Vector3::z(), Vector3::z(), epsilon = 1e-12);

        let back = Unit::new_normalize(Vector3::new(0.0, 0.0, -1.0));
        let q = rotation_between(&back, &Vector3::z_axis());
        assert_abs_diff_eq!(q * back.into_inner(), Vector3::z(), epsilon = 1e-12);
    }
}
