/// Polygon tessellation onto the sphere
use crate::config::GlobeConfig;
use crate::error::Result;
use crate::geometry::{LineLoop, TriangleMesh};
use crate::polygon::Ring;
use crate::triangulate::{combined_points, triangulate};

/// Fill surface and outlines of one polygon or multipolygon
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tessellation {
    /// One loop per ring, in ring order, at the outline radius
    pub outlines: Vec<LineLoop>,
    /// All rings merged into a single surface at the sphere radius
    pub fill: TriangleMesh,
}

/// Fill mesh and outline of a single ring
pub fn tessellate_ring(ring: &Ring, config: &GlobeConfig) -> (LineLoop, TriangleMesh) {
    let outline = LineLoop::new(
        ring.points
            .iter()
            .map(|p| p.to_xyz(config.outline_radius()))
            .collect(),
    );

    let points = combined_points(ring, config.grid_spacing);
    let indices = triangulate(&points, ring);
    let vertices = points.iter().map(|p| p.to_xyz(config.radius)).collect();

    log::trace!(
        "ring of {} vertices: {} samples, {} triangles",
        ring.len(),
        points.len() - ring.len(),
        indices.len()
    );

    (outline, TriangleMesh::from_parts(vertices, indices))
}

/// Tessellate every ring of `polygon` and merge the fill meshes.
///
/// Empty rings are skipped. With `strict_rings` set, a ring with fewer than
/// three points is an error; otherwise it simply contributes whatever the
/// triangulation yields.
pub fn tessellate(polygon: &[Ring], config: &GlobeConfig) -> Result<Tessellation> {
    let mut outlines = Vec::with_capacity(polygon.len());
    let mut fills = Vec::with_capacity(polygon.len());

    for (index, ring) in polygon.iter().enumerate() {
        if ring.is_empty() {
            continue;
        }
        if config.strict_rings {
            ring.validate(index)?;
        }

        let (outline, fill) = tessellate_ring(ring, config);
        outlines.push(outline);
        fills.push(fill);
    }

    Ok(Tessellation {
        outlines,
        fill: TriangleMesh::merge(fills),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use crate::projection::GeoPoint;

    fn ring(coords: &[(f64, f64)]) -> Ring {
        coords.iter().map(|&(lon, lat)| GeoPoint::new(lon, lat)).collect()
    }

    fn square(lon: f64, lat: f64, size: f64) -> Ring {
        ring(&[(lon, lat), (lon + size, lat), (lon + size, lat + size), (lon, lat + size)])
    }

    #[test]
    fn test_single_ring_outline_and_fill() {
        let config = GlobeConfig::default();
        let result = tessellate(&[square(0.0, 0.0, 10.0)], &config).unwrap();

        assert_eq!(result.outlines.len(), 1);
        assert_eq!(result.outlines[0].len(), 4);
        for p in &result.outlines[0].points {
            assert!((p.coords.norm() - config.outline_radius()).abs() < 1e-9);
        }

        // 4 boundary vertices followed by the 25 interior samples
        assert_eq!(result.fill.vertex_count(), 29);
        assert!(!result.fill.is_empty());
        for p in &result.fill.vertices {
            assert!((p.coords.norm() - config.radius).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_ring_fill_matches_ring_mesh() {
        let config = GlobeConfig::default();
        let r = square(20.0, -5.0, 6.0);
        let (_, mesh) = tessellate_ring(&r, &config);
        assert_eq!(tessellate(&[r], &config).unwrap().fill, mesh);
    }

    #[test]
    fn test_multipolygon_merge_offsets_indices() {
        let config = GlobeConfig::default();
        let rings = vec![square(0.0, 0.0, 6.0), square(30.0, 30.0, 4.0)];
        let (_, first) = tessellate_ring(&rings[0], &config);
        let (_, second) = tessellate_ring(&rings[1], &config);

        let result = tessellate(&rings, &config).unwrap();
        assert_eq!(result.outlines.len(), 2);
        assert_eq!(result.fill.vertex_count(), first.vertex_count() + second.vertex_count());
        assert_eq!(result.fill.triangle_count(), first.triangle_count() + second.triangle_count());

        let base = first.vertex_count() as u32;
        let tail = &result.fill.indices[first.triangle_count()..];
        for (merged, local) in tail.iter().zip(&second.indices) {
            assert_eq!(*merged, local.map(|i| i + base));
        }
    }

    #[test]
    fn test_empty_rings_are_skipped() {
        let config = GlobeConfig::default();
        let result = tessellate(&[Ring::default(), square(0.0, 0.0, 4.0)], &config).unwrap();
        assert_eq!(result.outlines.len(), 1);
        assert!(tessellate(&[], &config).unwrap().fill.is_empty());
    }

    #[test]
    fn test_short_ring_lenient_and_strict() {
        let sliver = ring(&[(0.0, 0.0), (5.0, 5.0)]);
        let lenient = tessellate(&[sliver.clone()], &GlobeConfig::default()).unwrap();
        assert!(lenient.fill.is_empty());
        assert_eq!(lenient.outlines[0].len(), 2);

        let strict = GlobeConfig {
            strict_rings: true,
            ..GlobeConfig::default()
        };
        assert_eq!(
            tessellate(&[square(0.0, 0.0, 4.0), sliver], &strict),
            Err(GeometryError::MalformedPolygon { ring: 1, points: 2 })
        );
    }
}
