//! HUD text rasterized with rusttype from the embedded Hack typeface.
//!
//! Glyph coverage is painted as one-pixel fills through [`Canvas::fill_rect`],
//! with the coverage folded into the fill alpha, so any canvas backend can
//! show text without a text API of its own.

use std::sync::OnceLock;

use log::warn;
use rusttype::{point, Font, Scale};

use super::{Canvas, Paint, Rect};
use crate::color::Color;
use crate::simulation::Point;

static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();

/// The HUD font, parsed on first use. `None` if the embedded data is unusable.
pub fn hud_font() -> Option<&'static Font<'static>> {
    FONT.get_or_init(|| {
        let font = Font::try_from_bytes(epaint_default_fonts::HACK_REGULAR);
        if font.is_none() {
            warn!("embedded HUD font could not be parsed; text will not be drawn");
        }
        font
    })
    .as_ref()
}

/// Paints `text` with its baseline starting at `origin`, `size` pixels tall.
pub fn draw_text<C: Canvas + ?Sized>(canvas: &mut C, text: &str, origin: Point, size: f32, color: Color) {
    let Some(font) = hud_font() else {
        return;
    };

    for glyph in font.layout(text, Scale::uniform(size), point(origin.x, origin.y)) {
        let Some(bounds) = glyph.pixel_bounding_box() else {
            continue;
        };

        glyph.draw(|x, y, coverage| {
            if coverage <= 0.0 {
                return;
            }
            let pixel = Rect::new((bounds.min.x + x as i32) as f32, (bounds.min.y + y as i32) as f32, 1.0, 1.0);
            let alpha = coverage.min(1.0) * color.a as f32 / 255.0;
            canvas.fill_rect(pixel, &Paint::Solid(color.with_alpha(alpha)));
        });
    }
}
