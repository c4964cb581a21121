use super::Vehicle;
use crate::config::TrafficConfig;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

/// The random half of the update step: lane reassignment after a wrap and
/// occasional target speed changes.
pub struct BehaviorEngine {
    lane_count: u32,
    respawn_band_top: f32,
    respawn_band_height: f32,
    retarget_probability: f32,
    retarget_min: f32,
    retarget_max: f32,
    rng: StdRng,
}

impl BehaviorEngine {
    pub fn new(config: &TrafficConfig, seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        Self {
            lane_count: config.lane_count.max(1),
            respawn_band_top: config.respawn_band_top,
            respawn_band_height: config.respawn_band_height,
            retarget_probability: config.retarget_probability,
            retarget_min: config.retarget_min,
            retarget_max: config.retarget_max,
            rng,
        }
    }

    /// Puts a vehicle that just wrapped onto a random lane, starting from a
    /// random height inside the respawn band.
    pub fn reassign_after_wrap(&mut self, vehicle: &mut Vehicle) {
        vehicle.position.y = self.respawn_band_top + self.rng.gen::<f32>() * self.respawn_band_height;
        vehicle.lane = self.rng.gen_range(0..self.lane_count);
        log::trace!("vehicle {} wrapped onto lane {}", vehicle.id.0, vehicle.lane);
    }

    /// Re-draws the target speed with the configured per-frame probability.
    /// Returns whether the target changed.
    pub fn maybe_retarget(&mut self, vehicle: &mut Vehicle) -> bool {
        if self.retarget_probability <= 0.0 {
            return false;
        }

        if self.rng.gen::<f32>() < self.retarget_probability {
            vehicle.target_speed = self.draw_speed();
            return true;
        }

        false
    }

    fn draw_speed(&mut self) -> f32 {
        if self.retarget_max > self.retarget_min {
            self.rng.gen_range(self.retarget_min..self.retarget_max)
        } else {
            self.retarget_min
        }
    }
}
