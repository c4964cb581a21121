//! The two animation components: the road traffic scene and the particle
//! background.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;
use crate::driver::{Animation, FrameInfo};
use crate::graphics::{Canvas, HudStats, ParticleRenderer, TrafficRenderer, Viewport};
use crate::simulation::{ParticleField, SurfaceSize, TrafficManager, TrafficSimulation, TrafficState};

/// Which animation component to mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    #[default]
    Traffic,
    Particles,
}

impl SceneKind {
    pub fn build(self, config: &SceneConfig, surface: SurfaceSize) -> Box<dyn Animation> {
        match self {
            SceneKind::Traffic => Box::new(TrafficScene::new(config, surface)),
            SceneKind::Particles => Box::new(ParticleScene::new(config, surface)),
        }
    }
}

pub struct TrafficScene {
    state: TrafficState,
    simulation: TrafficSimulation,
    renderer: TrafficRenderer,
}

impl TrafficScene {
    /// Populates a fresh entity store for the surface. The store lives as
    /// long as the scene; remounting builds a new one.
    pub fn new(config: &SceneConfig, surface: SurfaceSize) -> Self {
        let seed = config.random.seed;
        let mut manager = TrafficManager::new(config.traffic.clone(), seed);
        let state = manager.populate(surface);

        Self {
            state,
            simulation: TrafficSimulation::new(config.traffic.clone(), seed.map(|s| s.wrapping_add(1))),
            renderer: TrafficRenderer::new(config.road.clone()),
        }
    }

    pub fn state(&self) -> &TrafficState {
        &self.state
    }
}

impl Animation for TrafficScene {
    fn update(&mut self) {
        self.simulation.update(&mut self.state);
    }

    fn render(&self, canvas: &mut dyn Canvas, frame: &FrameInfo) {
        self.renderer.render(&self.state, canvas, &HudStats { fps: frame.fps });
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.state.resize(size);
    }
}

pub struct ParticleScene {
    field: ParticleField,
    viewport: Viewport,
    renderer: ParticleRenderer,
}

impl ParticleScene {
    pub fn new(config: &SceneConfig, surface: SurfaceSize) -> Self {
        Self {
            field: ParticleField::new(&config.particles, config.random.seed),
            viewport: Viewport::new(&config.particles, surface),
            renderer: ParticleRenderer::new(config.particles.clone()),
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

impl Animation for ParticleScene {
    fn update(&mut self) {
        self.field.update();
    }

    fn render(&self, canvas: &mut dyn Canvas, _frame: &FrameInfo) {
        self.renderer.render(&self.field, &self.viewport, canvas);
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.viewport.resize(size);
    }

    fn scroll(&mut self, scroll_y: f32) {
        self.field.set_scroll(scroll_y);
    }
}
