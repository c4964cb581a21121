use nalgebra::{Point3, Rotation3, Vector3};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Uniform};

use crate::config::ParticleConfig;

/// A fixed cloud of points that slowly spins and follows the scroll position.
#[derive(Debug, Clone)]
pub struct ParticleField {
    points: Vec<Point3<f32>>,
    /// Accumulated rotation around the x and y axes.
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub offset_y: f32,
    spin_x: f32,
    spin_y: f32,
    parallax: f32,
    scroll_y: f32,
}

impl ParticleField {
    pub fn new(config: &ParticleConfig, seed: Option<u64>) -> Self {
        let mut rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        let half = config.spread / 2.0;
        let coordinate = Uniform::new_inclusive(-half, half);
        let points = (0..config.count)
            .map(|_| {
                Point3::new(
                    coordinate.sample(&mut rng),
                    coordinate.sample(&mut rng),
                    coordinate.sample(&mut rng),
                )
            })
            .collect();

        Self {
            points,
            rotation_x: 0.0,
            rotation_y: 0.0,
            offset_y: 0.0,
            spin_x: config.spin_x,
            spin_y: config.spin_y,
            parallax: config.parallax,
            scroll_y: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Local (unrotated) positions.
    pub fn points(&self) -> &[Point3<f32>] {
        &self.points
    }

    pub fn set_scroll(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y;
    }

    pub fn update(&mut self) {
        self.rotation_x += self.spin_x;
        self.rotation_y += self.spin_y;
        self.offset_y = self.scroll_y * self.parallax;
    }

    /// Positions after applying the field's rotation (x first, then y) and
    /// parallax offset.
    pub fn world_points(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), self.rotation_x)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), self.rotation_y);
        let offset = Vector3::new(0.0, self.offset_y, 0.0);

        self.points.iter().map(move |point| rotation * point + offset)
    }
}
