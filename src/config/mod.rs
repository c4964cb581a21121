use anyhow::{Result, Context};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod traffic;
pub mod road;
pub mod particles;
pub mod feed;

pub use traffic::*;
pub use road::*;
pub use particles::*;
pub use feed::*;

/// Named traffic/road parameter bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TrafficPreset {
    Basic,
    #[default]
    Enhanced,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RandomConfig {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    pub traffic: TrafficConfig,
    pub road: RoadLayout,
    pub particles: ParticleConfig,
    pub feed: FeedConfig,
    pub random: RandomConfig,
}

impl SceneConfig {
    pub fn preset(preset: TrafficPreset) -> Self {
        match preset {
            TrafficPreset::Basic => Self {
                traffic: TrafficConfig::basic(),
                road: RoadLayout::basic(),
                ..Self::default()
            },
            TrafficPreset::Enhanced => Self::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene configuration {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("invalid scene configuration {}", path.display()))
    }
}

impl Validate for SceneConfig {
    fn validate(&self) -> Result<()> {
        self.traffic.validate()?;
        self.road.validate()?;
        self.particles.validate()?;
        self.feed.validate()?;
        Ok(())
    }
}

pub trait Validate {
    fn validate(&self) -> Result<()>;
}
