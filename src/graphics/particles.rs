use super::{Canvas, Paint, Rect, Viewport};
use crate::config::ParticleConfig;
use crate::simulation::{ParticleField, Point};

pub struct ParticleRenderer {
    config: ParticleConfig,
}

impl ParticleRenderer {
    pub fn new(config: ParticleConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, field: &ParticleField, viewport: &Viewport, canvas: &mut dyn Canvas) {
        let size = canvas.size();
        canvas.fill_rect(
            Rect::new(0.0, 0.0, size.width as f32, size.height as f32),
            &Paint::Solid(self.config.background),
        );

        // Point sprites shrink with distance: diameter = size * (height / 2) / depth.
        let scale = viewport.height() / 2.0;
        for point in field.world_points() {
            if let Some(screen) = viewport.world_to_screen(&point) {
                let radius = (self.config.point_size * scale / screen.depth / 2.0).max(0.5);
                canvas.fill_circle(Point::new(screen.x, screen.y), radius, self.config.color);
            }
        }
    }
}
