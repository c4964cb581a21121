use kurbo::{Affine, BezPath, Circle, Line};
use vello::peniko::{self, Fill, Gradient};
use vello::Scene;

use super::{Canvas, Paint, Rect, Stroke};
use crate::color::Color;
use crate::simulation::{Point, SurfaceSize};

fn to_peniko(color: Color) -> peniko::Color {
    peniko::Color::rgba8(color.r, color.g, color.b, color.a)
}

fn to_kurbo(point: Point) -> kurbo::Point {
    kurbo::Point::new(point.x as f64, point.y as f64)
}

fn stroke_style(stroke: &Stroke) -> kurbo::Stroke {
    let style = kurbo::Stroke::new(stroke.width as f64);
    match stroke.dash {
        Some([dash, gap]) => style.with_dashes(0.0, [dash as f64, gap as f64]),
        None => style,
    }
}

/// Canvas that encodes draw calls into a vello scene for GPU rendering.
pub struct SceneCanvas {
    scene: Scene,
    size: SurfaceSize,
}

impl SceneCanvas {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            scene: Scene::new(),
            size,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Drops the previous frame's encoding.
    pub fn reset(&mut self) {
        self.scene.reset();
    }
}

impl Canvas for SceneCanvas {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let shape = kurbo::Rect::new(
            rect.x as f64,
            rect.y as f64,
            rect.right() as f64,
            rect.bottom() as f64,
        );

        match paint {
            Paint::Solid(color) => {
                self.scene.fill(Fill::NonZero, Affine::IDENTITY, to_peniko(*color), None, &shape);
            }
            Paint::VerticalGradient { top, bottom } => {
                let gradient = Gradient::new_linear((shape.x0, shape.y0), (shape.x0, shape.y1))
                    .with_stops([to_peniko(*top), to_peniko(*bottom)]);
                self.scene.fill(Fill::NonZero, Affine::IDENTITY, &gradient, None, &shape);
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        let mut path = BezPath::new();
        path.move_to(to_kurbo(*first));
        for point in rest {
            path.line_to(to_kurbo(*point));
        }
        path.close_path();

        self.scene.fill(Fill::NonZero, Affine::IDENTITY, to_peniko(color), None, &path);
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        let line = Line::new(to_kurbo(from), to_kurbo(to));
        self.scene.stroke(&stroke_style(stroke), Affine::IDENTITY, to_peniko(stroke.color), None, &line);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        let circle = Circle::new(to_kurbo(center), radius as f64);
        self.scene.fill(Fill::NonZero, Affine::IDENTITY, to_peniko(color), None, &circle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashed_strokes_carry_the_pattern() {
        let dashed = stroke_style(&Stroke {
            color: Color::WHITE,
            width: 2.0,
            dash: Some([20.0, 10.0]),
        });
        assert_eq!(dashed.width, 2.0);
        assert_eq!(dashed.dash_pattern.as_slice(), &[20.0, 10.0]);
        assert_eq!(dashed.dash_offset, 0.0);

        let solid = stroke_style(&Stroke {
            color: Color::WHITE,
            width: 3.0,
            dash: None,
        });
        assert!(solid.dash_pattern.is_empty());
    }
}
