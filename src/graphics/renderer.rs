use super::{Canvas, Paint, Rect, Stroke};
use crate::color::Color;
use crate::config::{Background, HudStyle, RoadLayout};
use crate::simulation::{Point, TrafficState, Vec2, Vehicle};

/// Per-frame numbers shown in the overlay that the entity store doesn't own.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudStats {
    pub fps: f32,
}

/// Stateless draw routines for the traffic scene.
pub struct TrafficRenderer {
    layout: RoadLayout,
}

impl TrafficRenderer {
    pub fn new(layout: RoadLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &RoadLayout {
        &self.layout
    }

    /// Full redraw, back to front.
    pub fn render(&self, state: &TrafficState, canvas: &mut dyn Canvas, hud: &HudStats) {
        self.draw_background(canvas);
        self.draw_road(canvas);
        self.draw_markings(canvas);
        self.draw_sidewalks(canvas);

        for vehicle in &state.vehicles {
            self.draw_vehicle(canvas, vehicle);
        }

        match self.layout.hud {
            HudStyle::Panel => self.draw_hud_panel(canvas, state, hud),
            HudStyle::Corner => self.draw_hud_corner(canvas, state, hud),
            HudStyle::Hidden => {}
        }
    }

    fn draw_background(&self, canvas: &mut dyn Canvas) {
        let size = canvas.size();
        let paint = match self.layout.background {
            Background::Solid { color } => Paint::Solid(color),
            Background::Gradient { top, bottom } => Paint::VerticalGradient { top, bottom },
        };
        canvas.fill_rect(Rect::new(0.0, 0.0, size.width as f32, size.height as f32), &paint);
    }

    fn draw_road(&self, canvas: &mut dyn Canvas) {
        let size = canvas.size();
        let verge = self.layout.verge_height;
        let height = (size.height as f32 - 2.0 * verge).max(0.0);
        canvas.fill_rect(
            Rect::new(0.0, verge, size.width as f32, height),
            &Paint::Solid(self.layout.road_color),
        );
    }

    fn draw_markings(&self, canvas: &mut dyn Canvas) {
        let size = canvas.size();
        let width = size.width as f32;

        let center = &self.layout.center_line;
        let center_y = size.height as f32 / 2.0;
        canvas.stroke_line(
            Point::new(0.0, center_y),
            Point::new(width, center_y),
            &Stroke::dashed(center.color, center.width, center.dash),
        );

        let lane = &self.layout.lane_line;
        let stroke = Stroke::dashed(lane.color, lane.width, lane.dash);
        for i in 0..self.layout.lane_line_count {
            let y = self.layout.lane_line_origin + i as f32 * self.layout.lane_line_spacing;
            canvas.stroke_line(Point::new(0.0, y), Point::new(width, y), &stroke);
        }
    }

    fn draw_sidewalks(&self, canvas: &mut dyn Canvas) {
        let size = canvas.size();
        let (width, height) = (size.width as f32, size.height as f32);
        let verge = self.layout.verge_height;
        let sidewalk = Paint::Solid(self.layout.sidewalk_color);

        canvas.fill_rect(Rect::new(0.0, 0.0, width, verge), &sidewalk);
        canvas.fill_rect(Rect::new(0.0, height - verge, width, verge), &sidewalk);

        if let Some(blocks) = &self.layout.corner_blocks {
            let paint = Paint::Solid(blocks.color);
            let right = width - blocks.width;
            let bottom = height - verge;
            for (x, y) in [(0.0, 0.0), (right, 0.0), (0.0, bottom), (right, bottom)] {
                canvas.fill_rect(Rect::new(x, y, blocks.width, verge), &paint);
            }
        }
    }

    fn draw_vehicle(&self, canvas: &mut dyn Canvas, vehicle: &Vehicle) {
        let (w, h) = (vehicle.width, vehicle.height);
        let body = oriented_quad(vehicle, -w / 2.0, -h / 2.0, w, h);

        canvas.fill_polygon(&body, vehicle.color);
        if self.layout.outline_width > 0.0 {
            canvas.stroke_polygon(&body, &Stroke::solid(self.layout.vehicle_outline, self.layout.outline_width));
        }

        let inset = self.layout.window_inset;
        let window_height = h / 2.0 - self.layout.window_trim;
        if w > 2.0 * inset && window_height > 0.0 {
            let window = oriented_quad(vehicle, -w / 2.0 + inset, -h / 2.0 + inset, w - 2.0 * inset, window_height);
            canvas.fill_polygon(&window, self.layout.window_tint);
        }

        if self.layout.headlights {
            for offset_x in [-w / 4.0, w / 4.0] {
                let light = oriented_point(vehicle, offset_x, -h / 2.0 - 2.0);
                canvas.fill_circle(light, self.layout.headlight_radius, self.layout.headlight_color);
            }
        }
    }

    fn draw_hud_panel(&self, canvas: &mut dyn Canvas, state: &TrafficState, hud: &HudStats) {
        let accent = self.layout.hud_accent;
        let panel = Rect::new(20.0, 20.0, 200.0, 120.0);
        canvas.fill_rect(panel, &Paint::Solid(Color::BLACK.with_alpha(0.6)));
        canvas.stroke_rect(panel, accent, 2.0);

        let seconds = state.frame / self.layout.frames_per_second as u64;
        canvas.fill_text(&self.layout.hud_title, Point::new(30.0, 45.0), 14.0, accent);

        let lines = [
            format!("Vehicles: {}", state.len()),
            format!("Time: {}s", seconds),
            format!("FPS: {:.0}", hud.fps),
            "Status: ACTIVE".to_string(),
        ];
        for (i, line) in lines.iter().enumerate() {
            canvas.fill_text(line, Point::new(30.0, 65.0 + i as f32 * 20.0), 12.0, accent);
        }
    }

    fn draw_hud_corner(&self, canvas: &mut dyn Canvas, state: &TrafficState, hud: &HudStats) {
        let size = canvas.size();
        let accent = self.layout.hud_accent;
        let panel = Rect::new(32.0, size.height as f32 - 32.0 - 76.0, 240.0, 76.0);
        canvas.fill_rect(panel, &Paint::Solid(Color::BLACK.with_alpha(0.5)));
        canvas.stroke_rect(panel, accent, 1.0);

        let lines = [
            format!("Vehicles on Road: {}", state.len()),
            format!("Canvas: {}x{}", size.width, size.height),
            format!("FPS: {:.0}", hud.fps),
        ];
        for (i, line) in lines.iter().enumerate() {
            let origin = Point::new(panel.x + 12.0, panel.y + 26.0 + i as f32 * 20.0);
            canvas.fill_text(line, origin, 12.0, Color::WHITE);
        }
    }
}

/// Point at `(dx, dy)` from the vehicle's center, rotated by its heading.
fn oriented_point(vehicle: &Vehicle, dx: f32, dy: f32) -> Point {
    let (sin, cos) = vehicle.heading.sin_cos();
    vehicle.center() + Vec2::new(dx * cos - dy * sin, dx * sin + dy * cos)
}

/// Corners of a rect given in the vehicle's local frame (origin at center).
fn oriented_quad(vehicle: &Vehicle, x: f32, y: f32, width: f32, height: f32) -> [Point; 4] {
    [
        oriented_point(vehicle, x, y),
        oriented_point(vehicle, x + width, y),
        oriented_point(vehicle, x + width, y + height),
        oriented_point(vehicle, x, y + height),
    ]
}
