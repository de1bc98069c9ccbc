/// Fly lines: animated arcs between two geographic endpoints
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::arc::{build_arc, ArcPath};
use crate::config::GlobeConfig;
use crate::error::{ImportError, Result};
use crate::projection::{lon_lat_to_xyz, GeoPoint};
use crate::transform::{align, ArcFrame};

/// One end of a fly line. `style` is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyLineEndpoint {
    pub lon: f64,
    pub lat: f64,
    #[serde(default, deserialize_with = "id_from_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub style: Option<Value>,
}

impl FlyLineEndpoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            id: None,
            style: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn geo_point(&self) -> GeoPoint {
        GeoPoint::new(self.lon, self.lat)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyLine {
    pub from: FlyLineEndpoint,
    pub to: FlyLineEndpoint,
    #[serde(default)]
    pub style: Option<Value>,
}

impl FlyLine {
    pub fn new(from: FlyLineEndpoint, to: FlyLineEndpoint) -> Self {
        Self {
            from,
            to,
            style: None,
        }
    }

    /// `"{from}-{to}"` from the endpoint ids, or from the concatenated
    /// coordinates when either id is missing
    pub fn id(&self) -> String {
        match (&self.from.id, &self.to.id) {
            (Some(from), Some(to)) => format!("{from}-{to}"),
            _ => format!(
                "{}{}-{}{}",
                self.from.lon, self.from.lat, self.to.lon, self.to.lat
            ),
        }
    }
}

/// A fly line resolved into an arc in its aligned frame
#[derive(Debug, Clone, PartialEq)]
pub struct FlyLinePath {
    pub id: String,
    pub frame: ArcFrame,
    pub path: ArcPath,
}

impl FlyLinePath {
    /// Aligned-frame point `t` in [0, 1] of the way along the path, in world space
    pub fn world_point(&self, t: f64) -> Point3<f64> {
        self.frame.to_world(self.path.point_at(t))
    }

    /// `divisions + 1` world-space points from source to target
    pub fn world_points(&self, divisions: usize) -> Vec<Point3<f64>> {
        self.to_world(self.path.spaced_points(divisions))
    }

    /// World-space flight head at `phase` in [0, 1]
    pub fn head_world_points(&self, phase: f64, config: &GlobeConfig) -> Vec<Point3<f64>> {
        let divisions = (config.arc_divisions as f64 * config.head_fraction).ceil() as usize;
        self.to_world(self.path.head_points(phase, config.head_fraction, divisions))
    }

    fn to_world(&self, points: Vec<Point2<f64>>) -> Vec<Point3<f64>> {
        points.into_iter().map(|p| self.frame.to_world(p)).collect()
    }
}

/// Animation phase in [0, 1) of a looping flight `elapsed_secs` after it started
pub fn animation_phase(elapsed_secs: f64, duration_secs: f64) -> f64 {
    if duration_secs <= 0.0 {
        return 0.0;
    }
    elapsed_secs.rem_euclid(duration_secs) / duration_secs
}

/// Project both endpoints onto the globe and build the arc between them
pub fn build_fly_line(line: &FlyLine, config: &GlobeConfig) -> Result<FlyLinePath> {
    let source = lon_lat_to_xyz(config.radius, line.from.lon, line.from.lat, 1.0);
    let target = lon_lat_to_xyz(config.radius, line.to.lon, line.to.lat, 1.0);

    let frame = align(&source, &target)?;
    let path = build_arc(&frame.source, &frame.target, config.radius, config.bulge_coefficient);

    Ok(FlyLinePath {
        id: line.id(),
        frame,
        path,
    })
}

/// Build every fly line in input order, skipping degenerate ones
pub fn build_fly_lines(lines: &[FlyLine], config: &GlobeConfig) -> Vec<FlyLinePath> {
    let paths: Vec<FlyLinePath> = lines
        .iter()
        .filter_map(|line| match build_fly_line(line, config) {
            Ok(path) => {
                log::debug!("fly line {}: {:?}", path.id, path.path);
                Some(path)
            }
            Err(err) => {
                log::warn!("skipping fly line {}: {err}", line.id());
                None
            }
        })
        .collect();

    log::info!("built {} of {} fly lines", paths.len(), lines.len());
    paths
}

/// Parse a JSON array of fly lines
pub fn parse_fly_lines(json: &str) -> std::result::Result<Vec<FlyLine>, ImportError> {
    Ok(serde_json::from_str(json)?)
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "fly-line id must be a string or a number, got {other}"
        ))),
    }
}
