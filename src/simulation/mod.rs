use nalgebra::{Vector2, Point2};
use serde::{Deserialize, Serialize};
use instant::{Duration, Instant};
use std::collections::VecDeque;

use crate::color::Color;
use crate::config::TrafficConfig;

pub mod physics;
pub mod behavior;
pub mod traffic;
pub mod particles;

pub use physics::*;
pub use behavior::*;
pub use traffic::*;
pub use particles::*;

pub type Vec2 = Vector2<f32>;
pub type Point = Point2<f32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Car,
    Truck,
    Taxi,
    Police,
}

#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    /// Top-left corner of the bounding box.
    pub position: Point,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub target_speed: f32,
    pub lane: u32,
    pub heading: f32,
    pub color: Color,
    pub kind: VehicleKind,
}

impl Vehicle {
    pub fn center(&self) -> Point {
        self.position + Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The entity store for one mount of the traffic animation.
#[derive(Debug, Clone)]
pub struct TrafficState {
    pub vehicles: Vec<Vehicle>,
    pub surface: SurfaceSize,
    pub frame: u64,
}

impl TrafficState {
    pub fn new(vehicles: Vec<Vehicle>, surface: SurfaceSize) -> Self {
        Self {
            vehicles,
            surface,
            frame: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn resize(&mut self, surface: SurfaceSize) {
        self.surface = surface;
    }

    pub fn get_kind_counts(&self) -> std::collections::HashMap<VehicleKind, usize> {
        let mut counts = std::collections::HashMap::new();
        for vehicle in &self.vehicles {
            *counts.entry(vehicle.kind).or_insert(0) += 1;
        }
        counts
    }
}

/// Owns the per-frame update of a traffic state: deterministic motion from
/// the physics engine, random decisions from the behavior engine.
pub struct TrafficSimulation {
    physics_engine: PhysicsEngine,
    behavior_engine: BehaviorEngine,
}

impl TrafficSimulation {
    pub fn new(config: TrafficConfig, seed: Option<u64>) -> Self {
        let behavior_engine = BehaviorEngine::new(&config, seed);
        let physics_engine = PhysicsEngine::new(config);

        Self {
            physics_engine,
            behavior_engine,
        }
    }

    pub fn update(&mut self, state: &mut TrafficState) {
        self.physics_engine.update(state, &mut self.behavior_engine);
    }

    pub fn physics(&self) -> &PhysicsEngine {
        &self.physics_engine
    }
}

/// Rolling frame-to-frame intervals used for the FPS readout.
#[derive(Debug)]
pub struct PerformanceTracker {
    samples: VecDeque<Duration>,
    max_samples: usize,
    last_tick: Option<Instant>,
}

impl PerformanceTracker {
    pub fn new(max_samples: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(max_samples),
            max_samples: max_samples.max(1),
            last_tick: None,
        }
    }

    /// Marks the start of a frame; records the interval since the previous one.
    pub fn tick(&mut self) {
        let now = Instant::now();
        if let Some(previous) = self.last_tick.replace(now) {
            self.record(now.duration_since(previous));
        }
    }

    pub fn record(&mut self, frame_time: Duration) {
        if self.samples.len() >= self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(frame_time);
    }

    pub fn average_frame_time(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }

        let total: Duration = self.samples.iter().sum();
        total / self.samples.len() as u32
    }

    pub fn fps(&self) -> f32 {
        let avg_frame_time = self.average_frame_time();
        if avg_frame_time.is_zero() {
            return 0.0;
        }
        1.0 / avg_frame_time.as_secs_f32()
    }
}
