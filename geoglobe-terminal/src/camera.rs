/// Orbit camera looking at the globe center
use nalgebra::{Matrix4, Point3, Vector3};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 0.5;

/// Camera orbiting the origin at a fixed distance
pub struct Camera {
    pub yaw: f64,
    pub pitch: f64,
    pub distance: f64,
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    /// Camera framing a globe of `radius` in a `width` x `height` cell grid
    pub fn new(width: u32, height: u32, radius: f64) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.35,
            distance: radius * 3.2,
            fov: std::f64::consts::PI / 4.0, // 45 degrees
            aspect: width as f64 / height.max(1) as f64 * CELL_ASPECT,
            near: radius * 0.01,
            far: radius * 20.0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f64 / height.max(1) as f64 * CELL_ASPECT;
    }

    /// Orbit by the given yaw/pitch deltas, keeping clear of the poles
    pub fn orbit(&mut self, d_yaw: f64, d_pitch: f64) {
        let limit = std::f64::consts::FRAC_PI_2 - 0.05;
        self.yaw = (self.yaw + d_yaw).rem_euclid(std::f64::consts::TAU);
        self.pitch = (self.pitch + d_pitch).clamp(-limit, limit);
    }

    /// Scale the orbit distance, never entering the near plane of the globe
    pub fn zoom(&mut self, factor: f64, min_distance: f64) {
        self.distance = (self.distance * factor).clamp(min_distance, self.far * 0.5);
    }

    pub fn eye(&self) -> Point3<f64> {
        Point3::new(
            self.distance * self.pitch.cos() * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            self.distance * self.pitch.cos() * self.yaw.cos(),
        )
    }

    /// View matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.eye(), &Point3::origin(), &Vector3::y())
    }

    pub fn projection_matrix(&self) -> Matrix4<f64> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    pub fn view_projection(&self) -> Matrix4<f64> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to screen cells.
    ///
    /// Returns `(x, y, depth)` with depth the distance along the view axis, or
    /// `None` for points behind the near plane. Points outside the viewport are
    /// still returned so primitives crossing the edge can be clipped per cell.
    pub fn project_to_screen(
        &self,
        view_projection: &Matrix4<f64>,
        point: &Point3<f64>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = view_projection * point.to_homogeneous();
        if clip.w < self.near {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;

        let screen_x = (ndc_x + 1.0) * 0.5 * width as f64;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f64;

        Some((screen_x as f32, screen_y as f32, clip.w as f32))
    }
}
