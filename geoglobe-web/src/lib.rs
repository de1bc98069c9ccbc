/// geoglobe web - WASM bindings for the globe geometry
///
/// Exposes country meshes and fly-line arcs as flat typed arrays ready to be
/// uploaded to WebGL buffers. Rendering itself stays on the JavaScript side.
use std::error::Error;

use geoglobe_core::{
    build_fly_lines, flyline::parse_fly_lines, parse_countries, tessellate_world, ArcPath,
    CountryMesh, FlyLinePath, GlobeConfig, LineLoop,
};
use wasm_bindgen::prelude::*;

type BuildResult<T> = Result<T, Box<dyn Error>>;

fn to_js(err: Box<dyn Error>) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("logger was already initialized");
    }
}

/// Geometry builder bound to one globe configuration
#[wasm_bindgen]
pub struct Globe {
    config: GlobeConfig,
}

#[wasm_bindgen]
impl Globe {
    #[wasm_bindgen(constructor)]
    pub fn new(radius: f64) -> Globe {
        Globe {
            config: GlobeConfig::with_radius(radius),
        }
    }

    /// Globe from a JSON object overriding any of the default settings
    pub fn with_config_json(json: &str) -> Result<Globe, JsValue> {
        GlobeConfig::from_json_str(json)
            .map(|config| Globe { config })
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn radius(&self) -> f64 {
        self.config.radius
    }

    /// Tessellate every country of a GeoJSON FeatureCollection
    pub fn countries(&self, geojson: &str) -> Result<Vec<CountryBuffers>, JsValue> {
        country_buffers(geojson, &self.config).map_err(to_js)
    }

    /// Build the arcs for a JSON array of fly lines
    pub fn fly_lines(&self, json: &str) -> Result<Vec<FlyLineBuffers>, JsValue> {
        fly_line_buffers(json, &self.config).map_err(to_js)
    }
}

fn country_buffers(geojson: &str, config: &GlobeConfig) -> BuildResult<Vec<CountryBuffers>> {
    let countries = parse_countries(geojson)?;
    let meshes = tessellate_world(&countries, config)?;
    Ok(meshes.into_iter().map(CountryBuffers::from).collect())
}

fn fly_line_buffers(json: &str, config: &GlobeConfig) -> BuildResult<Vec<FlyLineBuffers>> {
    let lines = parse_fly_lines(json)?;
    let paths = build_fly_lines(&lines, config);
    log::info!("built {} of {} fly lines", paths.len(), lines.len());
    Ok(paths
        .iter()
        .map(|path| FlyLineBuffers::new(path, config))
        .collect())
}

/// Fill and outline buffers of one country
#[wasm_bindgen]
pub struct CountryBuffers {
    name: Option<String>,
    positions: Vec<f32>,
    indices: Vec<u32>,
    outlines: Vec<Vec<f32>>,
}

impl From<CountryMesh> for CountryBuffers {
    fn from(mesh: CountryMesh) -> Self {
        Self {
            name: mesh.name,
            positions: mesh.fill.positions_f32(),
            indices: mesh.fill.indices_flat(),
            outlines: mesh.outlines.iter().map(LineLoop::positions_f32).collect(),
        }
    }
}

#[wasm_bindgen]
impl CountryBuffers {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> Option<String> {
        self.name.clone()
    }

    /// Fill vertices as `x, y, z` triples
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> Vec<f32> {
        self.positions.clone()
    }

    /// Fill triangles as index triples into `positions`
    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> Vec<u32> {
        self.indices.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn outline_count(&self) -> usize {
        self.outlines.len()
    }

    /// Closed outline `index` as `x, y, z` triples; empty when out of range
    pub fn outline(&self, index: usize) -> Vec<f32> {
        self.outlines.get(index).cloned().unwrap_or_default()
    }
}

/// One fly line in its aligned frame.
///
/// The arc lies in the z = 0 plane; applying `rotation` places it on the
/// globe. Straight lines have zero start and end angles, their center is the
/// midpoint and their radius half the length.
#[wasm_bindgen]
pub struct FlyLineBuffers {
    id: String,
    straight: bool,
    center: [f64; 2],
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    rotation: [f64; 4],
    head_span: f64,
    path: Vec<f32>,
}

impl FlyLineBuffers {
    fn new(line: &FlyLinePath, config: &GlobeConfig) -> Self {
        let q = line.frame.rotation_inverse.coords;
        let path = line
            .path
            .spaced_points(config.arc_divisions)
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32])
            .collect();

        let (straight, center, radius, start_angle, end_angle) = match &line.path {
            ArcPath::Circle(arc) => (false, arc.center, arc.radius, arc.start_angle, arc.end_angle),
            ArcPath::Segment { start, end } => {
                (true, nalgebra::center(start, end), (end - start).norm() / 2.0, 0.0, 0.0)
            }
        };

        Self {
            id: line.id.clone(),
            straight,
            center: [center.x, center.y],
            radius,
            start_angle,
            end_angle,
            rotation: [q.x, q.y, q.z, q.w],
            head_span: (end_angle - start_angle) * config.head_fraction,
            path,
        }
    }
}

#[wasm_bindgen]
impl FlyLineBuffers {
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> String {
        self.id.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn straight(&self) -> bool {
        self.straight
    }

    #[wasm_bindgen(getter)]
    pub fn center(&self) -> Vec<f64> {
        self.center.to_vec()
    }

    #[wasm_bindgen(getter)]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[wasm_bindgen(getter)]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    #[wasm_bindgen(getter)]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Aligned frame to world quaternion as `[x, y, z, w]`
    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> Vec<f64> {
        self.rotation.to_vec()
    }

    /// Angle covered by the animated head
    #[wasm_bindgen(getter)]
    pub fn head_span(&self) -> f64 {
        self.head_span
    }

    /// Evenly spaced path samples as `x, y` pairs in the aligned frame
    #[wasm_bindgen(getter)]
    pub fn path(&self) -> Vec<f32> {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Quaternion, UnitQuaternion};

    const WORLD: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "name": "Square" },
            "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]] }
        }]
    }"#;

    #[test]
    fn test_country_buffers() {
        let buffers = country_buffers(WORLD, &GlobeConfig::default()).unwrap();
        assert_eq!(buffers.len(), 1);
        let square = &buffers[0];
        assert_eq!(square.name().as_deref(), Some("Square"));
        assert_eq!(square.positions().len() % 3, 0);
        assert_eq!(square.indices().len() % 3, 0);
        let vertex_count = (square.positions().len() / 3) as u32;
        assert!(square.indices().iter().all(|&i| i < vertex_count));
        assert_eq!(square.outline_count(), 1);
        assert_eq!(square.outline(0).len(), 4 * 3);
        assert!(square.outline(1).is_empty());
    }

    #[test]
    fn test_fly_line_buffers() {
        let config = GlobeConfig::default();
        let json = r#"[{ "from": { "id": 1, "lon": 0, "lat": 0 }, "to": { "id": 2, "lon": 90, "lat": 0 } }]"#;
        let buffers = fly_line_buffers(json, &config).unwrap();
        assert_eq!(buffers.len(), 1);

        let line = &buffers[0];
        assert_eq!(line.id(), "1-2");
        assert!(!line.straight());
        assert!((line.start_angle() + line.end_angle() - std::f64::consts::PI).abs() < 1e-9);
        assert!((line.head_span() - (line.end_angle() - line.start_angle()) / 7.0).abs() < 1e-9);
        assert_eq!(line.path().len(), (config.arc_divisions + 1) * 2);

        // The first path sample maps back onto the source on the globe
        let [x, y, z, w] = line.rotation;
        let rotation = UnitQuaternion::from_quaternion(Quaternion::new(w, x, y, z));
        let path = line.path();
        let first = rotation * Point3::new(path[0] as f64, path[1] as f64, 0.0);
        assert!((first - Point3::new(config.radius, 0.0, 0.0)).norm() < 1e-3);
    }
}
