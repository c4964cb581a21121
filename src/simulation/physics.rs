use super::{BehaviorEngine, TrafficState, Vehicle};
use crate::config::{TrafficConfig, WrapEdge};

/// First-order low-pass step: moves `current` a fraction of the way to `target`.
pub fn relax(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

pub struct PhysicsEngine {
    config: TrafficConfig,
}

impl PhysicsEngine {
    pub fn new(config: TrafficConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrafficConfig {
        &self.config
    }

    /// Advances every vehicle by one frame, in place and in store order.
    ///
    /// Vehicles later in the store see the already-updated positions and
    /// speeds of earlier ones during the proximity check.
    pub fn update(&self, state: &mut TrafficState, behavior: &mut BehaviorEngine) {
        let surface_width = state.surface.width as f32;

        for index in 0..state.vehicles.len() {
            {
                let vehicle = &mut state.vehicles[index];

                vehicle.speed = relax(vehicle.speed, vehicle.target_speed, self.config.speed_smoothing);
                vehicle.position.x += vehicle.speed;

                if self.has_left_surface(vehicle, surface_width) {
                    vehicle.position.x = -vehicle.width;
                    if self.config.reassign_lane_on_wrap {
                        behavior.reassign_after_wrap(vehicle);
                    }
                }

                let lane_y = self.config.lane_y(vehicle.lane);
                vehicle.position.y = relax(vehicle.position.y, lane_y, self.config.lane_smoothing);
            }

            if let Some(target_speed) = self.yield_speed(&state.vehicles, index) {
                state.vehicles[index].target_speed = target_speed;
            }

            behavior.maybe_retarget(&mut state.vehicles[index]);
        }

        state.frame += 1;
    }

    /// `Leading` wraps once the front reaches the right edge. `Trailing`
    /// wraps only after the rear has moved past it.
    fn has_left_surface(&self, vehicle: &Vehicle, surface_width: f32) -> bool {
        match self.config.wrap_edge {
            WrapEdge::Leading => vehicle.position.x >= surface_width,
            WrapEdge::Trailing => vehicle.position.x > surface_width + vehicle.width,
        }
    }

    /// Target speed the vehicle at `index` should adopt because a slower
    /// vehicle is close ahead of it, if any. The last match in store order wins.
    pub fn yield_speed(&self, vehicles: &[Vehicle], index: usize) -> Option<f32> {
        if self.config.following_distance <= 0.0 {
            return None;
        }

        let vehicle = &vehicles[index];
        let mut target = None;

        for (other_index, other) in vehicles.iter().enumerate() {
            if other_index == index {
                continue;
            }

            let delta = other.position - vehicle.position;
            let distance = delta.magnitude();

            if distance > 0.0
                && distance < self.config.following_distance
                && delta.x > 0.0
                && vehicle.speed > other.speed
            {
                target = Some(other.speed * self.config.slowdown_factor);
            }
        }

        target
    }
}
