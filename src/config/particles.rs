use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;
use crate::color::Color;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: u32,
    /// Edge length of the cube the particles are scattered in.
    pub spread: f32,
    /// Rotation added around the x and y axes every frame, in radians.
    pub spin_x: f32,
    pub spin_y: f32,
    /// Vertical offset per pixel scrolled.
    pub parallax: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_distance: f32,
    pub point_size: f32,
    pub color: Color,
    pub background: Color,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 100,
            spread: 200.0,
            spin_x: 0.0001,
            spin_y: 0.0002,
            parallax: 0.05,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 50.0,
            point_size: 0.5,
            color: Color::rgb(0x4F, 0x46, 0xE5).with_alpha(0.3),
            background: Color::rgb(0xFA, 0xFA, 0xF9),
        }
    }
}

impl Validate for ParticleConfig {
    fn validate(&self) -> Result<()> {
        if self.spread <= 0.0 {
            return Err(anyhow!("Particle spread must be positive"));
        }

        if self.fov_degrees <= 0.0 || self.fov_degrees >= 180.0 {
            return Err(anyhow!("Field of view must be in range (0, 180) degrees"));
        }

        if self.near <= 0.0 || self.near >= self.far {
            return Err(anyhow!("Clip planes must satisfy 0 < near < far"));
        }

        if self.camera_distance <= self.near {
            return Err(anyhow!("Camera distance must be beyond the near plane"));
        }

        if self.point_size <= 0.0 {
            return Err(anyhow!("Point size must be positive"));
        }

        Ok(())
    }
}
