/// ASCII rasterizer for the globe
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use geoglobe_core::TriangleMesh;
use nalgebra::{Matrix4, Point3, Vector3};
use std::io::Write;

use crate::camera::Camera;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Lines are drawn this far in front of what they lie on
const LINE_DEPTH_BIAS: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    character: ' ',
    color: Color::Reset,
};

/// Per-frame projection state shared by every primitive
pub struct Frame<'a> {
    camera: &'a Camera,
    view_projection: Matrix4<f64>,
    eye: Point3<f64>,
}

impl<'a> Frame<'a> {
    pub fn new(camera: &'a Camera) -> Self {
        Self {
            camera,
            view_projection: camera.view_projection(),
            eye: camera.eye(),
        }
    }
}

/// ASCII renderer that converts globe geometry to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![EMPTY; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(EMPTY);
    }

    /// Character at cell `(x, y)`, mainly for inspection
    pub fn char_at(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x].character
    }

    /// Shade and rasterize a mesh lying on the globe.
    ///
    /// `normals` are per-vertex; they are flipped to face away from the globe
    /// center so either triangle winding lights the same way.
    pub fn render_mesh(&mut self, mesh: &TriangleMesh, normals: &[Vector3<f64>], frame: &Frame, color: Color) {
        for tri in &mesh.indices {
            let corners = tri.map(|i| mesh.vertices[i as usize]);

            let [Some(a), Some(b), Some(c)] = corners.map(|corner| self.project(frame, &corner)) else {
                continue; // Behind the camera
            };

            let center = Point3::from((corners[0].coords + corners[1].coords + corners[2].coords) / 3.0);
            let mut normal: Vector3<f64> = tri.iter().map(|&i| normals[i as usize]).sum();
            if normal.dot(&center.coords) < 0.0 {
                normal = -normal;
            }
            let to_eye = (frame.eye - center).normalize();
            let brightness = normal.try_normalize(1e-12).map_or(0.0, |n| n.dot(&to_eye).max(0.0));

            let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f64).round() as usize;
            let character = LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)];
            self.rasterize_triangle(&[a, b, c], Cell { character, color });
        }
    }

    /// Draw a polyline; with `closed` the last point connects to the first
    pub fn render_polyline(&mut self, points: &[Point3<f64>], closed: bool, frame: &Frame, character: char, color: Color) {
        let cell = Cell { character, color };
        for pair in points.windows(2) {
            self.render_segment(&pair[0], &pair[1], frame, cell);
        }
        if closed && points.len() > 2 {
            self.render_segment(&points[points.len() - 1], &points[0], frame, cell);
        }
    }

    /// Draw single points, each with its own character
    pub fn render_points(&mut self, points: &[(Point3<f64>, char)], frame: &Frame, color: Color) {
        for (point, character) in points {
            if let Some((x, y, depth)) = self.project(frame, point) {
                self.plot(x, y, depth - LINE_DEPTH_BIAS, Cell { character: *character, color });
            }
        }
    }

    fn project(&self, frame: &Frame, point: &Point3<f64>) -> Option<(f32, f32, f32)> {
        frame
            .camera
            .project_to_screen(&frame.view_projection, point, self.width as u32, self.height as u32)
    }

    fn render_segment(&mut self, a: &Point3<f64>, b: &Point3<f64>, frame: &Frame, cell: Cell) {
        let (Some(start), Some(end)) = (self.project(frame, a), self.project(frame, b)) else {
            return;
        };

        let steps = (end.0 - start.0).abs().max((end.1 - start.1).abs()).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let x = start.0 + (end.0 - start.0) * t;
            let y = start.1 + (end.1 - start.1) * t;
            let depth = start.2 + (end.2 - start.2) * t;
            self.plot(x, y, depth - LINE_DEPTH_BIAS, cell);
        }
    }

    fn plot(&mut self, x: f32, y: f32, depth: f32, cell: Cell) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = y * self.width + x;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.cells[idx] = cell;
        }
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], cell: Cell) {
        let [v0, v1, v2] = *coords;

        // Bounding box clipped to the screen
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) = barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py)) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot(px, py, depth, cell);
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for cell in row {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.character))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(v0: (f32, f32), v1: (f32, f32), v2: (f32, f32), p: (f32, f32)) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
