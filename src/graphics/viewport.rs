use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};

use crate::config::ParticleConfig;
use crate::simulation::SurfaceSize;

/// A projected point in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Distance in front of the camera along its view axis.
    pub depth: f32,
}

/// Perspective camera on the +z axis looking at the origin.
#[derive(Debug, Clone)]
pub struct Viewport {
    pub position: Vector3<f32>,
    fov: f32,
    near: f32,
    far: f32,
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(config: &ParticleConfig, size: SurfaceSize) -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, config.camera_distance),
            fov: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
            width: size.width as f32,
            height: size.height as f32,
        }
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.width = size.width as f32;
        self.height = size.height as f32;
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(self.aspect_ratio(), self.fov, self.near, self.far)
    }

    fn view(&self) -> Isometry3<f32> {
        Isometry3::translation(-self.position.x, -self.position.y, -self.position.z)
    }

    pub fn get_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection().as_matrix() * self.view().to_homogeneous()
    }

    /// Projects a world point to surface pixels; `None` if it falls outside
    /// the view frustum.
    pub fn world_to_screen(&self, world_pos: &Point3<f32>) -> Option<ScreenPoint> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }

        // w of the clip position is the distance along the view axis.
        let clip = self.get_view_projection_matrix() * world_pos.to_homogeneous();
        let depth = clip.w;
        if depth <= self.near || depth >= self.far {
            return None;
        }

        let ndc = clip.xyz() / depth;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
            return None;
        }

        Some(ScreenPoint {
            x: (ndc.x + 1.0) * self.width / 2.0,
            y: (1.0 - ndc.y) * self.height / 2.0,
            depth,
        })
    }
}
