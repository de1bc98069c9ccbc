/// Delaunay triangulation of a ring and its interior samples, filtered to the
/// ring's shape
use delaunator::Point;
use nalgebra::Point2;

use crate::polygon::Ring;
use crate::projection::GeoPoint;

/// Triangulate `points` (ring vertices followed by interior samples) in the
/// lon/lat plane and keep the triangles whose centroid lies inside `ring`.
///
/// Delaunay triangulation covers the convex hull of the input, so triangles
/// spanning concavities or bays are dropped by the centroid test. Output keeps
/// the triangulator's order.
pub fn triangulate(points: &[GeoPoint], ring: &Ring) -> Vec<[u32; 3]> {
    if points.len() < 3 {
        return Vec::new();
    }

    let planar: Vec<Point> = points.iter().map(|p| Point { x: p.lon, y: p.lat }).collect();
    let triangulation = delaunator::triangulate(&planar);

    triangulation
        .triangles
        .chunks_exact(3)
        .filter(|tri| {
            let (a, b, c) = (&points[tri[0]], &points[tri[1]], &points[tri[2]]);
            let centroid = Point2::new((a.lon + b.lon + c.lon) / 3.0, (a.lat + b.lat + c.lat) / 3.0);
            ring.contains(centroid)
        })
        .map(|tri| [tri[0] as u32, tri[1] as u32, tri[2] as u32])
        .collect()
}

/// Boundary vertices followed by interior grid samples, the point set the
/// triangulation and the fill mesh are built over
pub fn combined_points(ring: &Ring, spacing: f64) -> Vec<GeoPoint> {
    let mut points = ring.points.clone();
    points.extend(ring.sample_interior(spacing));
    points
}
