/// Fly-line arcs in the aligned plane
use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::{Point2, Vector2};

/// Signed-area magnitude below which three points are treated as collinear
const COLLINEAR_EPSILON: f64 = 1e-12;

/// Angle in [0, π] between the directions O→A and O→B
pub fn radian_aob(a: &Point2<f64>, b: &Point2<f64>, o: &Point2<f64>) -> f64 {
    let dir1 = (a - o).normalize();
    let dir2 = (b - o).normalize();
    dir1.dot(&dir2).clamp(-1.0, 1.0).acos()
}

/// Center of the circle through three points, `None` when they are collinear
pub fn circumcenter(p1: &Point2<f64>, p2: &Point2<f64>, p3: &Point2<f64>) -> Option<Point2<f64>> {
    let (x1, y1, x2, y2, x3, y3) = (p1.x, p1.y, p2.x, p2.y, p3.x, p3.y);
    let l1 = p1.coords.norm_squared();
    let l2 = p2.coords.norm_squared();
    let l3 = p3.coords.norm_squared();

    let s = x1 * y2 + x2 * y3 + x3 * y1 - x1 * y3 - x2 * y1 - x3 * y2;
    if s.abs() < COLLINEAR_EPSILON {
        return None;
    }

    let x = (l2 * y3 + l1 * y2 + l3 * y1 - l2 * y1 - l3 * y2 - l1 * y3) / s / 2.0;
    let y = (l3 * x2 + l2 * x1 + l1 * x3 - l1 * x2 - l2 * x3 - l3 * x1) / s / 2.0;
    Some(Point2::new(x, y))
}

/// Counterclockwise circular arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArc {
    pub center: Point2<f64>,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl CircularArc {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn point_at_angle(&self, angle: f64) -> Point2<f64> {
        self.center + Vector2::new(angle.cos(), angle.sin()) * self.radius
    }
}

/// Path of a fly line in the aligned plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcPath {
    Circle(CircularArc),
    /// Fallback for collinear input
    Segment { start: Point2<f64>, end: Point2<f64> },
}

impl ArcPath {
    /// Point at `t` in [0, 1] from source to target
    pub fn point_at(&self, t: f64) -> Point2<f64> {
        match self {
            ArcPath::Circle(arc) => arc.point_at_angle(arc.start_angle + arc.span() * t),
            ArcPath::Segment { start, end } => start + (end - start) * t,
        }
    }

    /// `divisions + 1` points evenly spaced from source to target
    pub fn spaced_points(&self, divisions: usize) -> Vec<Point2<f64>> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f64 / divisions as f64))
            .collect()
    }

    /// Points of the flight head: a window covering `head_fraction` of the
    /// path that starts at `phase` (0 at the source). Window positions past
    /// the target are clamped to it.
    pub fn head_points(&self, phase: f64, head_fraction: f64, divisions: usize) -> Vec<Point2<f64>> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| {
                let t = phase + head_fraction * i as f64 / divisions as f64;
                self.point_at(t.min(1.0))
            })
            .collect()
    }

    pub fn as_circle(&self) -> Option<&CircularArc> {
        match self {
            ArcPath::Circle(arc) => Some(arc),
            ArcPath::Segment { .. } => None,
        }
    }
}

/// Build the arc between two aligned-frame points on a sphere of
/// `sphere_radius`.
///
/// The arc passes through both endpoints and through the midpoint direction
/// pushed out to `sphere_radius * (1 + bulge * s)`, where `s` is the angular
/// distance between the endpoints, so longer flights rise higher.
pub fn build_arc(
    source: &Point2<f64>,
    target: &Point2<f64>,
    sphere_radius: f64,
    bulge: f64,
) -> ArcPath {
    let origin = Point2::origin();
    let middle = Point2::from((source.coords + target.coords) * 0.5);
    let segment = ArcPath::Segment {
        start: *source,
        end: *target,
    };

    let Some(dir) = middle.coords.try_normalize(f64::EPSILON) else {
        return segment;
    };
    let s = radian_aob(source, target, &origin);
    let middle_pos = Point2::from(dir * (sphere_radius + s * sphere_radius * bulge));

    let Some(center) = circumcenter(source, target, &middle_pos) else {
        return segment;
    };
    let radius = (middle_pos - center).norm();

    let start_angle = -FRAC_PI_2 + radian_aob(source, &Point2::new(0.0, -1.0), &center);
    let end_angle = PI - start_angle;

    ArcPath::Circle(CircularArc {
        center,
        radius,
        start_angle,
        end_angle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_radian_aob() {
        let o = Point2::new(1.0, 1.0);
        assert_abs_diff_eq!(radian_aob(&Point2::new(2.0, 1.0), &Point2::new(1.0, 5.0), &o), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(radian_aob(&Point2::new(2.0, 1.0), &Point2::new(-3.0, 1.0), &o), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(radian_aob(&Point2::new(2.0, 2.0), &Point2::new(3.0, 3.0), &o), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_circumcenter_recovers_known_circle() {
        let center = Point2::new(3.0, -2.0);
        let r = 7.5;
        let on_circle = |angle: f64| center + Vector2::new(angle.cos(), angle.sin()) * r;
        let (p1, p2, p3) = (on_circle(0.3), on_circle(2.1), on_circle(4.4));

        let found = circumcenter(&p1, &p2, &p3).unwrap();
        assert_abs_diff_eq!(found, center, epsilon = 1e-9);
        assert_abs_diff_eq!((p2 - found).norm(), r, epsilon = 1e-9);
    }

    #[test]
    fn test_circumcenter_collinear() {
        let p = [Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(3.0, 3.0)];
        assert!(circumcenter(&p[0], &p[1], &p[2]).is_none());
    }

    #[test]
    fn test_quarter_turn_arc() {
        // Endpoints 90 degrees apart in the aligned frame
        let r = 120.0;
        let h = r / 2f64.sqrt();
        let source = Point2::new(h, h);
        let target = Point2::new(-h, h);

        let path = build_arc(&source, &target, r, 0.2);
        let arc = path.as_circle().copied().unwrap();

        let m = r * (1.0 + 0.2 * FRAC_PI_2);
        let cy = (m * m - r * r) / (2.0 * m - 2.0 * h);
        assert_abs_diff_eq!(arc.center, Point2::new(0.0, cy), epsilon = 1e-9);
        assert_abs_diff_eq!(arc.radius, m - cy, epsilon = 1e-9);

        let expected_start = (h - cy).atan2(h);
        assert_abs_diff_eq!(arc.start_angle, expected_start, epsilon = 1e-9);
        assert_abs_diff_eq!(arc.start_angle + arc.end_angle, PI, epsilon = 1e-12);
        assert_abs_diff_eq!(arc.span(), PI - 2.0 * expected_start, epsilon = 1e-9);

        assert_abs_diff_eq!(path.point_at(0.0), source, epsilon = 1e-9);
        assert_abs_diff_eq!(path.point_at(1.0), target, epsilon = 1e-9);
        assert_abs_diff_eq!(path.point_at(0.5), Point2::new(0.0, m), epsilon = 1e-9);
    }

    #[test]
    fn test_longer_flights_rise_higher() {
        let r = 1.0;
        let apex = |angle: f64| {
            let source = Point2::new((angle / 2.0).sin(), (angle / 2.0).cos()) * r;
            let target = Point2::new(-source.x, source.y);
            build_arc(&source, &target, r, 0.2).point_at(0.5).y
        };
        assert!(apex(0.5) < apex(1.5));
        assert!(apex(1.5) < apex(3.0));
    }

    #[test]
    fn test_collinear_falls_back_to_segment() {
        let source = Point2::new(1.0, 0.0);
        let target = Point2::new(-1.0, 0.0);
        let path = build_arc(&source, &target, 1.0, 0.2);
        assert_eq!(path, ArcPath::Segment { start: source, end: target });
        assert_abs_diff_eq!(path.point_at(0.25), Point2::new(0.5, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_spaced_and_head_points() {
        let arc = ArcPath::Circle(CircularArc {
            center: Point2::origin(),
            radius: 2.0,
            start_angle: 0.0,
            end_angle: PI,
        });
        let points = arc.spaced_points(200);
        assert_eq!(points.len(), 201);
        assert_abs_diff_eq!(points[100], Point2::new(0.0, 2.0), epsilon = 1e-12);

        let head = arc.head_points(0.0, 0.5, 10);
        assert_eq!(head.len(), 11);
        assert_abs_diff_eq!(head[10], Point2::new(0.0, 2.0), epsilon = 1e-12);

        let clamped = arc.head_points(0.9, 0.5, 10);
        assert_abs_diff_eq!(clamped[10], Point2::new(-2.0, 0.0), epsilon = 1e-12);
    }
}
