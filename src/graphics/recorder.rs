use super::{Canvas, Paint, Rect, Stroke};
use crate::color::Color;
use crate::simulation::{Point, SurfaceSize};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, paint: Paint },
    FillPolygon { points: Vec<Point>, color: Color },
    StrokeLine { from: Point, to: Point, stroke: Stroke },
    FillCircle { center: Point, radius: f32, color: Color },
    Text { text: String, origin: Point, size: f32, color: Color },
}

/// Canvas that logs draw calls instead of rasterizing them. Text is kept as
/// a single command rather than expanded into glyph cells.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Index of the first command matching `predicate`.
    pub fn position(&self, predicate: impl Fn(&DrawCommand) -> bool) -> Option<usize> {
        self.commands.iter().position(predicate)
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            paint: paint.clone(),
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            stroke: stroke.clone(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            size,
            color,
        });
    }
}
