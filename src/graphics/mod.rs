use crate::color::Color;
use crate::simulation::{Point, SurfaceSize};

pub mod font;
pub mod raster;
pub mod recorder;
pub mod renderer;
pub mod particles;
pub mod viewport;
#[cfg(feature = "gpu-graphics")]
pub mod vello_canvas;

pub use raster::*;
pub use recorder::*;
pub use renderer::*;
pub use particles::*;
pub use viewport::*;
#[cfg(feature = "gpu-graphics")]
pub use vello_canvas::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient from the top edge of the filled rect to its bottom edge.
    VerticalGradient { top: Color, bottom: Color },
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    /// Dash length followed by gap length; `None` draws a solid line.
    pub dash: Option<[f32; 2]>,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: f32, dash: [f32; 2]) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

/// A 2D drawing surface. Every frame is a full redraw, so implementations
/// keep no scene state beyond their pixels or command buffer.
pub trait Canvas {
    fn size(&self) -> SurfaceSize;

    fn resize(&mut self, size: SurfaceSize);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    fn fill_polygon(&mut self, points: &[Point], color: Color);

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        let stroke = Stroke::solid(color, width);
        let corners = [
            Point::new(rect.x, rect.y),
            Point::new(rect.right(), rect.y),
            Point::new(rect.right(), rect.bottom()),
            Point::new(rect.x, rect.bottom()),
        ];
        self.stroke_polygon(&corners, &stroke);
    }

    fn stroke_polygon(&mut self, points: &[Point], stroke: &Stroke) {
        for (i, from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.stroke_line(*from, to, stroke);
        }
    }

    /// Draws `text` with the embedded HUD font; `origin` is the left end of
    /// the baseline.
    fn fill_text(&mut self, text: &str, origin: Point, size: f32, color: Color) {
        font::draw_text(self, text, origin, size, color);
    }
}

/// Splits a line into the solid segments of a dash pattern.
pub fn dash_segments(from: Point, to: Point, dash: [f32; 2]) -> Vec<(Point, Point)> {
    let delta = to - from;
    let length = delta.magnitude();
    if length <= f32::EPSILON || dash[0] <= 0.0 {
        return vec![(from, to)];
    }

    let direction = delta / length;
    let period = dash[0] + dash[1].max(0.0);
    let mut segments = Vec::with_capacity((length / period) as usize + 1);
    let mut start = 0.0;

    while start < length {
        let end = (start + dash[0]).min(length);
        segments.push((from + direction * start, from + direction * end));
        start += period;
    }

    segments
}
