/// Country polygons from GeoJSON and their tessellated meshes
use geojson::{Feature, GeoJson, Value};
use serde_json::Map;

use crate::config::GlobeConfig;
use crate::error::{ImportError, Result};
use crate::geometry::{LineLoop, TriangleMesh};
use crate::polygon::{Polygon, Ring};
use crate::projection::GeoPoint;
use crate::tessellate::tessellate;

/// A named polygon or multipolygon
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub name: Option<String>,
    pub properties: Map<String, serde_json::Value>,
    /// Outer ring of every member polygon, in source order
    pub polygon: Polygon,
}

/// Renderable geometry of one country
#[derive(Debug, Clone, PartialEq)]
pub struct CountryMesh {
    pub name: Option<String>,
    pub fill: TriangleMesh,
    pub outlines: Vec<LineLoop>,
}

/// Parse a GeoJSON document into countries, keeping feature order.
///
/// Only Polygon and MultiPolygon features are kept, and of each polygon only
/// its outer ring; holes are ignored.
pub fn parse_countries(geojson: &str) -> std::result::Result<Vec<Country>, ImportError> {
    let features = match geojson.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => return Err(ImportError::NotAFeatureCollection),
    };

    let total = features.len();
    let countries: Vec<Country> = features.into_iter().filter_map(country_from_feature).collect();
    log::info!("imported {} countries from {} features", countries.len(), total);

    Ok(countries)
}

fn country_from_feature(feature: Feature) -> Option<Country> {
    let properties = feature.properties.unwrap_or_default();
    let name = properties
        .get("name")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let polygon = match feature.geometry.map(|g| g.value) {
        Some(Value::Polygon(rings)) => rings.first().map(|r| vec![ring_from_positions(r)]).unwrap_or_default(),
        Some(Value::MultiPolygon(polygons)) => polygons
            .iter()
            .filter_map(|rings| rings.first())
            .map(|r| ring_from_positions(r))
            .collect(),
        Some(other) => {
            log::warn!(
                "skipping feature {}: unsupported geometry {}",
                name.as_deref().unwrap_or("<unnamed>"),
                other.type_name()
            );
            return None;
        }
        None => {
            log::warn!("skipping feature {}: no geometry", name.as_deref().unwrap_or("<unnamed>"));
            return None;
        }
    };

    Some(Country {
        name,
        properties,
        polygon,
    })
}

/// GeoJSON rings repeat their first position at the end; rings here are
/// implicitly closed, so the duplicate is dropped.
fn ring_from_positions(positions: &[Vec<f64>]) -> Ring {
    let mut points: Vec<GeoPoint> = positions
        .iter()
        .filter(|p| p.len() >= 2)
        .map(|p| GeoPoint::new(p[0], p[1]))
        .collect();

    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    Ring::new(points)
}

/// Tessellate one country
pub fn tessellate_country(country: &Country, config: &GlobeConfig) -> Result<CountryMesh> {
    let tessellation = tessellate(&country.polygon, config)?;
    log::debug!(
        "country {}: {} rings, {} vertices, {} triangles",
        country.name.as_deref().unwrap_or("<unnamed>"),
        tessellation.outlines.len(),
        tessellation.fill.vertex_count(),
        tessellation.fill.triangle_count()
    );

    Ok(CountryMesh {
        name: country.name.clone(),
        fill: tessellation.fill,
        outlines: tessellation.outlines,
    })
}

/// Tessellate every country in input order
pub fn tessellate_world(countries: &[Country], config: &GlobeConfig) -> Result<Vec<CountryMesh>> {
    let meshes = countries
        .iter()
        .map(|country| tessellate_country(country, config))
        .collect::<Result<Vec<_>>>()?;

    let triangles: usize = meshes.iter().map(|m| m.fill.triangle_count()).sum();
    log::info!("tessellated {} countries into {} triangles", meshes.len(), triangles);
    Ok(meshes)
}
