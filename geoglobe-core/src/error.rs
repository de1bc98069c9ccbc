use thiserror::Error;

/// Geometric failures in tessellation and arc construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("ring {ring} has {points} points, at least 3 are required")]
    MalformedPolygon { ring: usize, points: usize },
    #[error("arc endpoints are coincident, antipodal or at the sphere center")]
    DegenerateArc,
}

pub type Result<T> = std::result::Result<T, GeometryError>;

/// Failures reading world or fly-line data
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("failed to parse GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("expected a FeatureCollection or Feature, found a bare geometry")]
    NotAFeatureCollection,
    #[error("failed to parse fly-line data: {0}")]
    FlyLines(#[from] serde_json::Error),
}
