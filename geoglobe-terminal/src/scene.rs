/// Globe contents prepared for rendering
use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use geoglobe_core::{
    build_fly_lines, flyline::parse_fly_lines, lon_lat_to_xyz, parse_countries, tessellate_world,
    CountryMesh, FlyLine, FlyLineEndpoint, FlyLinePath, GlobeConfig, TriangleMesh,
};
use nalgebra::Vector3;

/// The ocean sits just under the country fills so they win the depth test
const OCEAN_SCALE: f64 = 0.995;

/// A country mesh with its shading normals
pub struct ShadedCountry {
    pub mesh: CountryMesh,
    pub normals: Vec<Vector3<f64>>,
}

pub struct GlobeScene {
    pub config: GlobeConfig,
    pub ocean: TriangleMesh,
    pub ocean_normals: Vec<Vector3<f64>>,
    pub countries: Vec<ShadedCountry>,
    pub fly_lines: Vec<FlyLinePath>,
}

impl GlobeScene {
    pub fn new(countries: Vec<CountryMesh>, fly_lines: Vec<FlyLinePath>, config: GlobeConfig) -> Self {
        let ocean = ocean_sphere(config.radius * OCEAN_SCALE, 36, 18);
        let ocean_normals = ocean.vertex_normals();
        let countries = countries
            .into_iter()
            .map(|mesh| ShadedCountry {
                normals: mesh.fill.vertex_normals(),
                mesh,
            })
            .collect();

        Self {
            config,
            ocean,
            ocean_normals,
            countries,
            fly_lines,
        }
    }

    /// Load world and fly-line files; without a fly-line file the built-in
    /// sample routes are used.
    pub fn load(world: Option<&Path>, fly_lines: Option<&Path>, config: GlobeConfig) -> Result<Self> {
        let countries = match world {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .wrap_err_with(|| format!("failed to read world file {}", path.display()))?;
                let countries = parse_countries(&text)
                    .wrap_err_with(|| format!("failed to load countries from {}", path.display()))?;
                tessellate_world(&countries, &config)?
            }
            None => Vec::new(),
        };

        let lines = match fly_lines {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .wrap_err_with(|| format!("failed to read fly-line file {}", path.display()))?;
                parse_fly_lines(&text)
                    .wrap_err_with(|| format!("failed to load fly lines from {}", path.display()))?
            }
            None => sample_fly_lines(),
        };
        let paths = build_fly_lines(&lines, &config);

        Ok(Self::new(countries, paths, config))
    }
}

/// Latitude/longitude sphere built through the same projection as the
/// country meshes
pub fn ocean_sphere(radius: f64, segments: u32, rings: u32) -> TriangleMesh {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut mesh = TriangleMesh::with_capacity(
        ((segments + 1) * (rings + 1)) as usize,
        (segments * rings * 2) as usize,
    );

    for r in 0..=rings {
        let lat = -90.0 + 180.0 * r as f64 / rings as f64;
        for s in 0..=segments {
            let lon = -180.0 + 360.0 * s as f64 / segments as f64;
            mesh.vertices.push(lon_lat_to_xyz(radius, lon, lat, 1.0));
        }
    }

    let stride = segments + 1;
    for r in 0..rings {
        for s in 0..segments {
            let a = r * stride + s;
            let b = a + stride;
            mesh.add_triangle([a, a + 1, b]);
            mesh.add_triangle([a + 1, b + 1, b]);
        }
    }
    mesh
}

/// Routes shown when no fly-line file is given
pub fn sample_fly_lines() -> Vec<FlyLine> {
    [
        ((-23.0075, 50.4296), (26.1223, -7.8756)),
        ((142.8123, -58.9813), (157.0064, 10.7816)),
        ((-175.6286, 72.8359), (-39.071, -35.438)),
        ((178.7439, 25.8303), (137.19, 17.118)),
        ((-162.6725, 37.277), (-37.1681, 38.5162)),
        ((-7.5945, 37.2754), (41.4114, 41.5946)),
    ]
    .into_iter()
    .map(|((from_lon, from_lat), (to_lon, to_lat))| {
        FlyLine::new(
            FlyLineEndpoint::new(from_lon, from_lat),
            FlyLineEndpoint::new(to_lon, to_lat),
        )
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ocean_sphere() {
        let sphere = ocean_sphere(2.0, 12, 6);
        assert_eq!(sphere.vertex_count(), 13 * 7);
        assert_eq!(sphere.triangle_count(), 12 * 6 * 2);
        assert!(sphere.indices_flat().iter().all(|&i| (i as usize) < sphere.vertex_count()));
        assert!(sphere.vertices.iter().all(|v| (v.coords.norm() - 2.0).abs() < 1e-9));
    }

    #[test]
    fn test_sample_scene() {
        let scene = GlobeScene::load(None, None, GlobeConfig::default()).unwrap();
        assert!(scene.countries.is_empty());
        assert_eq!(scene.fly_lines.len(), 6);
        assert_eq!(scene.ocean_normals.len(), scene.ocean.vertex_count());
    }

    #[test]
    fn test_missing_world_file_is_reported() {
        let result = GlobeScene::load(Some(Path::new("/nonexistent/world.geojson")), None, GlobeConfig::default());
        let message = format!("{:#}", result.err().unwrap());
        assert!(message.contains("world.geojson"));
    }
}
