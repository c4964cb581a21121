use std::io::{Seek, Write};
use std::path::Path;

use image::{ImageFormat, ImageResult, RgbaImage};

pub use image::Rgba;

use super::{dash_segments, Canvas, Paint, Rect, Stroke};
use crate::color::Color;
use crate::simulation::{Point, SurfaceSize, Vec2};

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        Rgba([color.r, color.g, color.b, color.a])
    }
}

/// Software canvas rendering into an RGBA image. Shape coverage is decided
/// by pixel centers; no anti-aliasing.
pub struct PixelCanvas {
    image: RgbaImage,
}

impl PixelCanvas {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            image: RgbaImage::new(size.width, size.height),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn write_png<W: Write + Seek>(&self, writer: &mut W) -> ImageResult<()> {
        self.image.write_to(writer, ImageFormat::Png)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.image.save_with_format(path, ImageFormat::Png)
    }

    fn blend(&mut self, x: u32, y: u32, color: Color) {
        let dst = self.image.get_pixel_mut(x, y);

        if color.is_opaque() {
            *dst = color.into();
            return;
        }

        let alpha = color.a as f32 / 255.0;
        let mix = |src: u8, dst: u8| (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8;
        let Rgba([r, g, b, a]) = *dst;
        *dst = Rgba([
            mix(color.r, r),
            mix(color.g, g),
            mix(color.b, b),
            (color.a as f32 + a as f32 * (1.0 - alpha)).round().min(255.0) as u8,
        ]);
    }

    /// Pixel indices whose centers fall in `[start, end)`, clipped to `limit`.
    fn covered(start: f32, end: f32, limit: u32) -> std::ops::Range<u32> {
        let first = (start - 0.5).ceil().max(0.0);
        let last = (end - 0.5).ceil().max(0.0);
        let first = (first as u32).min(limit);
        let last = (last as u32).min(limit);
        first..last.max(first)
    }
}

impl Canvas for PixelCanvas {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.image.width(), self.image.height())
    }

    fn resize(&mut self, size: SurfaceSize) {
        if size == self.size() {
            return;
        }

        self.image = RgbaImage::new(size.width, size.height);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let SurfaceSize { width, height } = self.size();
        let columns = Self::covered(rect.x, rect.right(), width);
        let rows = Self::covered(rect.y, rect.bottom(), height);

        for y in rows {
            let color = match paint {
                Paint::Solid(color) => *color,
                Paint::VerticalGradient { top, bottom } => {
                    let t = if rect.height > 0.0 {
                        (y as f32 + 0.5 - rect.y) / rect.height
                    } else {
                        0.0
                    };
                    top.lerp(*bottom, t)
                }
            };

            for x in columns.clone() {
                self.blend(x, y, color);
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }

        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        let SurfaceSize { width, height } = self.size();
        let mut crossings = Vec::with_capacity(points.len());

        for y in Self::covered(min_y, max_y, height) {
            let center_y = y as f32 + 0.5;
            crossings.clear();

            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                let (low, high) = if a.y <= b.y { (a, &b) } else { (&b, a) };
                if center_y >= low.y && center_y < high.y {
                    let t = (center_y - low.y) / (high.y - low.y);
                    crossings.push(low.x + (high.x - low.x) * t);
                }
            }

            crossings.sort_by(|a, b| a.total_cmp(b));
            for span in crossings.chunks_exact(2) {
                for x in Self::covered(span[0], span[1], width) {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        let segments = match stroke.dash {
            Some(dash) => dash_segments(from, to, dash),
            None => vec![(from, to)],
        };

        for (start, end) in segments {
            let direction = end - start;
            let length = direction.magnitude();
            if length <= f32::EPSILON {
                continue;
            }

            let normal = Vec2::new(-direction.y, direction.x) / length * (stroke.width / 2.0);
            let quad = [start + normal, end + normal, end - normal, start - normal];
            self.fill_polygon(&quad, stroke.color);
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }

        let SurfaceSize { width, height } = self.size();
        let columns = Self::covered(center.x - radius, center.x + radius, width);
        let rows = Self::covered(center.y - radius, center.y + radius, height);
        let radius_sq = radius * radius;

        for y in rows {
            let dy = y as f32 + 0.5 - center.y;
            for x in columns.clone() {
                let dx = x as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= radius_sq {
                    self.blend(x, y, color);
                }
            }
        }
    }
}
