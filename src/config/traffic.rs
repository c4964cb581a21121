use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;
use crate::color::Color;
use crate::simulation::VehicleKind;

/// Where a vehicle is considered to have left the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapEdge {
    /// Wrap once the front bumper reaches the right edge.
    Leading,
    /// Wrap once the whole body is past the right edge.
    Trailing,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrafficConfig {
    /// Number of generated vehicles. Ignored when `fleet` is non-empty.
    pub vehicle_count: u32,
    /// Explicit roster used instead of random generation.
    pub fleet: Vec<VehicleSpec>,

    pub lane_count: u32,
    pub lane_origin: f32,
    pub lane_spacing: f32,
    pub initial_lane_offset: f32,

    pub car_width: f32,
    pub long_width: f32,
    pub vehicle_height: f32,
    pub speed_min: f32,
    pub speed_max: f32,

    pub speed_smoothing: f32,
    pub lane_smoothing: f32,

    /// Proximity radius for slowing behind a slower vehicle; 0 disables it.
    pub following_distance: f32,
    pub slowdown_factor: f32,

    pub retarget_probability: f32,
    pub retarget_min: f32,
    pub retarget_max: f32,

    pub wrap_edge: WrapEdge,
    pub reassign_lane_on_wrap: bool,
    pub respawn_band_top: f32,
    pub respawn_band_height: f32,

    pub palette: Vec<Color>,
    pub kinds: Vec<VehicleKind>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VehicleSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub lane: u32,
    pub color: Color,
    pub kind: VehicleKind,
}

impl TrafficConfig {
    /// Eight generated vehicles on four lanes with smoothing, following and
    /// random speed changes.
    pub fn enhanced() -> Self {
        Self {
            vehicle_count: 8,
            fleet: Vec::new(),
            lane_count: 4,
            lane_origin: 130.0,
            lane_spacing: 100.0,
            initial_lane_offset: 20.0,
            car_width: 60.0,
            long_width: 80.0,
            vehicle_height: 45.0,
            speed_min: 2.0,
            speed_max: 4.0,
            speed_smoothing: 0.02,
            lane_smoothing: 0.05,
            following_distance: 120.0,
            slowdown_factor: 0.9,
            retarget_probability: 0.01,
            retarget_min: 1.5,
            retarget_max: 4.5,
            wrap_edge: WrapEdge::Trailing,
            reassign_lane_on_wrap: true,
            respawn_band_top: 130.0,
            respawn_band_height: 300.0,
            palette: vec![
                Color::rgb(0xFF, 0x00, 0x00),
                Color::rgb(0xFF, 0xFF, 0x00),
                Color::rgb(0x00, 0x00, 0xFF),
                Color::rgb(0x00, 0x00, 0x00),
                Color::rgb(0xFF, 0xFF, 0xFF),
                Color::rgb(0x00, 0xFF, 0x00),
                Color::rgb(0xFF, 0x00, 0xFF),
            ],
            kinds: vec![
                VehicleKind::Car,
                VehicleKind::Truck,
                VehicleKind::Taxi,
                VehicleKind::Police,
                VehicleKind::Car,
            ],
        }
    }

    /// Fixed five-vehicle roster on three lanes, constant speeds.
    pub fn basic() -> Self {
        let spec = |x, y, width, height, speed, lane, color, kind| VehicleSpec {
            x,
            y,
            width,
            height,
            speed,
            lane,
            color,
            kind,
        };

        Self {
            vehicle_count: 5,
            fleet: vec![
                spec(100.0, 150.0, 60.0, 40.0, 3.0, 0, Color::rgb(0xFF, 0x00, 0x00), VehicleKind::Car),
                spec(200.0, 250.0, 60.0, 40.0, 2.5, 1, Color::rgb(0xFF, 0xFF, 0x00), VehicleKind::Taxi),
                spec(50.0, 350.0, 80.0, 50.0, 2.0, 0, Color::rgb(0x00, 0x00, 0xFF), VehicleKind::Truck),
                spec(300.0, 450.0, 60.0, 40.0, 3.5, 2, Color::rgb(0x00, 0x00, 0x00), VehicleKind::Car),
                spec(150.0, 550.0, 60.0, 40.0, 2.8, 1, Color::rgb(0xFF, 0xFF, 0xFF), VehicleKind::Police),
            ],
            lane_count: 3,
            lane_origin: 150.0,
            lane_spacing: 120.0,
            initial_lane_offset: 0.0,
            speed_smoothing: 0.02,
            lane_smoothing: 0.02,
            following_distance: 0.0,
            retarget_probability: 0.0,
            wrap_edge: WrapEdge::Leading,
            reassign_lane_on_wrap: false,
            ..Self::enhanced()
        }
    }

    /// Canonical vertical coordinate of a lane.
    pub fn lane_y(&self, lane: u32) -> f32 {
        self.lane_origin + lane as f32 * self.lane_spacing
    }
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self::enhanced()
    }
}

fn is_fraction(value: f32) -> bool {
    value > 0.0 && value <= 1.0
}

impl Validate for TrafficConfig {
    fn validate(&self) -> Result<()> {
        if self.fleet.is_empty() && self.vehicle_count == 0 {
            return Err(anyhow!("Either a fleet roster or a positive vehicle count is required"));
        }

        if self.lane_count == 0 {
            return Err(anyhow!("Lane count must be greater than zero"));
        }

        if self.lane_spacing <= 0.0 {
            return Err(anyhow!("Lane spacing must be positive"));
        }

        if self.car_width <= 0.0 || self.long_width <= 0.0 || self.vehicle_height <= 0.0 {
            return Err(anyhow!("Vehicle dimensions must be positive"));
        }

        if self.speed_min <= 0.0 || self.speed_min > self.speed_max {
            return Err(anyhow!(
                "Initial speed range must be positive and ordered, got [{}, {}]",
                self.speed_min,
                self.speed_max
            ));
        }

        if !is_fraction(self.speed_smoothing) || !is_fraction(self.lane_smoothing) {
            return Err(anyhow!("Smoothing factors must be in range (0, 1]"));
        }

        if self.following_distance < 0.0 {
            return Err(anyhow!("Following distance must be non-negative"));
        }

        if !is_fraction(self.slowdown_factor) {
            return Err(anyhow!("Slowdown factor must be in range (0, 1]"));
        }

        if !(0.0..=1.0).contains(&self.retarget_probability) {
            return Err(anyhow!("Retarget probability must be in range [0, 1]"));
        }

        if self.retarget_min <= 0.0 || self.retarget_min > self.retarget_max {
            return Err(anyhow!(
                "Retarget speed range must be positive and ordered, got [{}, {}]",
                self.retarget_min,
                self.retarget_max
            ));
        }

        if self.respawn_band_height < 0.0 {
            return Err(anyhow!("Respawn band height must be non-negative"));
        }

        if self.palette.is_empty() || self.kinds.is_empty() {
            return Err(anyhow!("Palette and vehicle kinds must not be empty"));
        }

        for (i, vehicle) in self.fleet.iter().enumerate() {
            if vehicle.width <= 0.0 || vehicle.height <= 0.0 {
                return Err(anyhow!("Fleet vehicle {} must have positive dimensions", i));
            }

            if vehicle.speed <= 0.0 {
                return Err(anyhow!("Fleet vehicle {} must have a positive speed", i));
            }

            if vehicle.lane >= self.lane_count {
                return Err(anyhow!(
                    "Fleet vehicle {} lane {} is out of range (0-{})",
                    i,
                    vehicle.lane,
                    self.lane_count - 1
                ));
            }
        }

        Ok(())
    }
}
