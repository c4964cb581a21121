use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;
use crate::color::Color;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    Solid { color: Color },
    Gradient { top: Color, bottom: Color },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineMarking {
    pub color: Color,
    pub width: f32,
    /// Dash length followed by gap length.
    pub dash: [f32; 2],
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CornerBlocks {
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HudStyle {
    /// Boxed panel in the top-left corner.
    Panel,
    /// Loose lines in the bottom-left corner.
    Corner,
    Hidden,
}

/// Everything the traffic renderer needs to lay out the road and overlay.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoadLayout {
    pub background: Background,
    pub road_color: Color,
    /// Height of the sidewalk bands above and below the road.
    pub verge_height: f32,
    pub sidewalk_color: Color,
    pub corner_blocks: Option<CornerBlocks>,

    pub center_line: LineMarking,
    pub lane_line: LineMarking,
    pub lane_line_origin: f32,
    pub lane_line_spacing: f32,
    pub lane_line_count: u32,

    pub vehicle_outline: Color,
    pub outline_width: f32,
    pub window_tint: Color,
    pub window_inset: f32,
    pub window_trim: f32,
    pub headlights: bool,
    pub headlight_radius: f32,
    pub headlight_color: Color,

    pub hud: HudStyle,
    pub hud_title: String,
    pub hud_accent: Color,
    /// Frame rate assumed when converting the frame counter into seconds.
    pub frames_per_second: u32,
}

impl RoadLayout {
    pub fn enhanced() -> Self {
        Self {
            background: Background::Gradient {
                top: Color::rgb(0x1A, 0x1A, 0x1A),
                bottom: Color::rgb(0x33, 0x33, 0x33),
            },
            road_color: Color::rgb(0x44, 0x44, 0x44),
            verge_height: 80.0,
            sidewalk_color: Color::rgb(0x66, 0x66, 0x66),
            corner_blocks: Some(CornerBlocks {
                width: 40.0,
                color: Color::rgb(0x55, 0x55, 0x55),
            }),
            center_line: LineMarking {
                color: Color::YELLOW,
                width: 4.0,
                dash: [30.0, 15.0],
            },
            lane_line: LineMarking {
                color: Color::WHITE,
                width: 2.0,
                dash: [15.0, 15.0],
            },
            lane_line_origin: 130.0,
            lane_line_spacing: 100.0,
            lane_line_count: 4,
            vehicle_outline: Color::BLACK,
            outline_width: 2.0,
            window_tint: Color::rgb(100, 150, 255).with_alpha(0.7),
            window_inset: 5.0,
            window_trim: 8.0,
            headlights: true,
            headlight_radius: 3.0,
            headlight_color: Color::YELLOW,
            hud: HudStyle::Panel,
            hud_title: "TRAFFIC SIMULATOR".to_string(),
            hud_accent: Color::GREEN,
            frames_per_second: 60,
        }
    }

    pub fn basic() -> Self {
        Self {
            background: Background::Solid {
                color: Color::rgb(0x33, 0x33, 0x33),
            },
            road_color: Color::rgb(0x55, 0x55, 0x55),
            verge_height: 100.0,
            sidewalk_color: Color::rgb(0x88, 0x88, 0x88),
            corner_blocks: None,
            center_line: LineMarking {
                color: Color::YELLOW,
                width: 3.0,
                dash: [20.0, 10.0],
            },
            lane_line: LineMarking {
                color: Color::WHITE,
                width: 2.0,
                dash: [10.0, 10.0],
            },
            lane_line_origin: 150.0,
            lane_line_spacing: 120.0,
            lane_line_count: 3,
            window_tint: Color::rgb(100, 150, 255).with_alpha(0.6),
            window_trim: 5.0,
            headlights: false,
            hud: HudStyle::Corner,
            ..Self::enhanced()
        }
    }
}

impl Default for RoadLayout {
    fn default() -> Self {
        Self::enhanced()
    }
}

impl Validate for RoadLayout {
    fn validate(&self) -> Result<()> {
        if self.verge_height < 0.0 {
            return Err(anyhow!("Verge height must be non-negative"));
        }

        for (name, marking) in [("center", &self.center_line), ("lane", &self.lane_line)] {
            if marking.width <= 0.0 {
                return Err(anyhow!("The {} line width must be positive", name));
            }

            if marking.dash[0] <= 0.0 || marking.dash[1] < 0.0 {
                return Err(anyhow!("The {} line dash pattern must have a positive dash", name));
            }
        }

        if self.outline_width < 0.0 || self.window_inset < 0.0 || self.headlight_radius < 0.0 {
            return Err(anyhow!("Vehicle decoration sizes must be non-negative"));
        }

        if self.frames_per_second == 0 {
            return Err(anyhow!("Frames per second must be greater than zero"));
        }

        Ok(())
    }
}
