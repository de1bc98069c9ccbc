/// Mesh buffers handed to rendering collaborators
use nalgebra::{Point3, Vector3};

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3<f64>>,
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(triangles),
        }
    }

    pub fn from_parts(vertices: Vec<Point3<f64>>, indices: Vec<[u32; 3]>) -> Self {
        debug_assert!(indices.iter().flatten().all(|&i| (i as usize) < vertices.len()));
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn add_triangle(&mut self, indices: [u32; 3]) {
        self.indices.push(indices);
    }

    /// Corner positions of triangle `index`
    pub fn triangle(&self, index: usize) -> [Point3<f64>; 3] {
        self.indices[index].map(|i| self.vertices[i as usize])
    }

    /// Append `other`, shifting its indices past the vertices already present
    pub fn append(&mut self, other: &TriangleMesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices
            .extend(other.indices.iter().map(|tri| tri.map(|i| i + base)));
    }

    /// Merge several meshes into one. A single mesh is returned unchanged.
    pub fn merge(meshes: Vec<TriangleMesh>) -> TriangleMesh {
        if meshes.len() == 1 {
            return meshes.into_iter().next().unwrap_or_default();
        }

        let vertices = meshes.iter().map(TriangleMesh::vertex_count).sum();
        let triangles = meshes.iter().map(TriangleMesh::triangle_count).sum();
        let mut merged = TriangleMesh::with_capacity(vertices, triangles);
        for mesh in &meshes {
            merged.append(mesh);
        }
        merged
    }

    /// Smooth per-vertex normals, each the normalized sum of the unnormalized
    /// face normals of the triangles sharing the vertex. Unreferenced vertices
    /// get a zero normal.
    pub fn vertex_normals(&self) -> Vec<Vector3<f64>> {
        let mut normals = vec![Vector3::zeros(); self.vertices.len()];
        for tri in &self.indices {
            let [a, b, c] = tri.map(|i| self.vertices[i as usize]);
            let face = (b - a).cross(&(c - a));
            for &i in tri {
                normals[i as usize] += face;
            }
        }

        for normal in &mut normals {
            *normal = normal.try_normalize(1e-12).unwrap_or_else(Vector3::zeros);
        }
        normals
    }

    /// Flat xyz position buffer
    pub fn positions_f32(&self) -> Vec<f32> {
        flatten_points(&self.vertices)
    }

    /// Flat index buffer
    pub fn indices_flat(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }
}

/// Closed polyline; the last point connects back to the first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineLoop {
    pub points: Vec<Point3<f64>>,
}

impl LineLoop {
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs including the closing segment
    pub fn segments(&self) -> impl Iterator<Item = (Point3<f64>, Point3<f64>)> + '_ {
        let n = self.points.len();
        (0..if n > 1 { n } else { 0 }).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    pub fn positions_f32(&self) -> Vec<f32> {
        flatten_points(&self.points)
    }
}

pub(crate) fn flatten_points(points: &[Point3<f64>]) -> Vec<f32> {
    points
        .iter()
        .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
        .collect()
}
