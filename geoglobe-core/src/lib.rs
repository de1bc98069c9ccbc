/// geoglobe core - geometry for an interactive globe
///
/// Projects geographic coordinates onto a sphere, tessellates country polygons
/// into fill meshes and outlines, and builds the arcs fly lines travel along.
/// Everything here is pure and synchronous; rendering is left to the caller.

pub mod arc;
pub mod config;
pub mod error;
pub mod flyline;
pub mod geometry;
pub mod polygon;
pub mod projection;
pub mod tessellate;
pub mod transform;
pub mod triangulate;
pub mod world;

// Re-export commonly used types
pub use arc::{build_arc, circumcenter, ArcPath, CircularArc};
pub use config::GlobeConfig;
pub use error::{GeometryError, ImportError};
pub use flyline::{build_fly_line, build_fly_lines, FlyLine, FlyLineEndpoint, FlyLinePath};
pub use geometry::{LineLoop, TriangleMesh};
pub use polygon::{Polygon, Ring};
pub use projection::{lon_lat_to_xyz, GeoPoint};
pub use tessellate::{tessellate, Tessellation};
pub use transform::{align, ArcFrame};
pub use world::{parse_countries, tessellate_world, Country, CountryMesh};
