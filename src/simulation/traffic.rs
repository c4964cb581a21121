use super::{Point, SurfaceSize, TrafficState, Vehicle, VehicleId};
use crate::config::{TrafficConfig, VehicleSpec};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

/// Builds the initial fleet for a mount of the traffic animation.
pub struct TrafficManager {
    config: TrafficConfig,
    rng: StdRng,
}

impl TrafficManager {
    pub fn new(config: TrafficConfig, seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        Self { config, rng }
    }

    /// Creates the entity store for a surface of the given size. The roster
    /// from the configuration wins over random generation.
    pub fn populate(&mut self, surface: SurfaceSize) -> TrafficState {
        let vehicles: Vec<Vehicle> = if self.config.fleet.is_empty() {
            (0..self.config.vehicle_count as usize)
                .map(|index| self.generate_vehicle(index, surface))
                .collect()
        } else {
            self.config
                .fleet
                .iter()
                .enumerate()
                .map(|(index, spec)| Self::vehicle_from_spec(index, spec))
                .collect()
        };

        log::debug!(
            "populated {} vehicles on a {}x{} surface",
            vehicles.len(),
            surface.width,
            surface.height
        );

        TrafficState::new(vehicles, surface)
    }

    fn generate_vehicle(&mut self, index: usize, surface: SurfaceSize) -> Vehicle {
        let config = &self.config;
        let lane = index as u32 % config.lane_count.max(1);
        let width = if index % 3 == 0 { config.long_width } else { config.car_width };
        let color = config.palette[index % config.palette.len()];
        let kind = config.kinds[index % config.kinds.len()];
        let y = config.lane_y(lane) + config.initial_lane_offset;
        let (speed_min, speed_max) = (config.speed_min, config.speed_max);

        let x = self.rng.gen::<f32>() * surface.width as f32;
        let speed = self.draw_speed(speed_min, speed_max);
        let target_speed = self.draw_speed(speed_min, speed_max);

        Vehicle {
            id: VehicleId(index),
            position: Point::new(x, y),
            width,
            height: self.config.vehicle_height,
            speed,
            target_speed,
            lane,
            heading: 0.0,
            color,
            kind,
        }
    }

    fn vehicle_from_spec(index: usize, spec: &VehicleSpec) -> Vehicle {
        Vehicle {
            id: VehicleId(index),
            position: Point::new(spec.x, spec.y),
            width: spec.width,
            height: spec.height,
            speed: spec.speed,
            target_speed: spec.speed,
            lane: spec.lane,
            heading: 0.0,
            color: spec.color,
            kind: spec.kind,
        }
    }

    fn draw_speed(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }
}
