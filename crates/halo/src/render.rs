//! Canvas rendering of the engine output.

use glam::{Vec2, Vec3};
use halo_engine::{FrameOutput, RingFrame};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::canvas::{Canvas, Context, Line as CanvasLine},
};

/// Distance of the camera from the clock face.
const CAMERA_DISTANCE: f32 = 3.0;
/// Half of the visible height at the clock face (75 degree field of view).
const VIEW_HALF_HEIGHT: f64 = 2.3;
/// Numerals swollen past this scale are drawn bold.
const BOLD_SCALE: f32 = 1.5;

/// Perspective projection from a camera on the z axis, shifted by the
/// parallax view offset.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    view: Vec2,
}

impl Projection {
    pub fn new(view: Vec2) -> Self {
        Self { view }
    }

    /// Project a world point onto the clock face plane.
    pub fn project(&self, point: Vec3) -> Vec2 {
        let depth = (CAMERA_DISTANCE - point.z).max(0.1);
        (point.truncate() - self.view) * (CAMERA_DISTANCE / depth)
    }
}

/// Draw every ring: curves first, numerals on top.
pub fn render_clock(frame: &mut Frame, area: Rect, output: &FrameOutput, view: Vec2) {
    let projection = Projection::new(view);
    let half_height = VIEW_HALF_HEIGHT;
    // Terminal cells are about twice as tall as they are wide.
    let half_width = half_height * area.width as f64 / (area.height.max(1) as f64 * 2.0);
    let cell_width = 2.0 * half_width / area.width.max(1) as f64;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-half_width, half_width])
        .y_bounds([-half_height, half_height])
        .paint(|ctx| {
            // Innermost ring is furthest back; draw it first.
            for ring in output.rings.iter().rev() {
                draw_curve(ctx, ring, &projection);
            }
            ctx.layer();
            for ring in output.rings.iter().rev() {
                draw_numerals(ctx, ring, &projection, cell_width);
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_curve(ctx: &mut Context, ring: &RingFrame, projection: &Projection) {
    let color = ring
        .elements
        .iter()
        .find(|element| !element.highlighted)
        .map(|element| element.color.color())
        .unwrap_or(Color::Gray);

    for pair in ring.curve.points().windows(2) {
        let a = projection.project(pair[0]);
        let b = projection.project(pair[1]);
        ctx.draw(&CanvasLine::new(
            a.x as f64, a.y as f64, b.x as f64, b.y as f64, color,
        ));
    }
}

fn draw_numerals(ctx: &mut Context, ring: &RingFrame, projection: &Projection, cell_width: f64) {
    for element in &ring.elements {
        let text = element.label.to_string();
        let point = projection.project(element.world);
        // Center the label on its position.
        let x = point.x as f64 - cell_width * text.len() as f64 / 2.0;

        let mut style = Style::new().fg(element.color.color());
        if element.highlighted || element.scale >= BOLD_SCALE {
            style = style.add_modifier(Modifier::BOLD);
        }
        ctx.print(x, point.y as f64, Span::styled(text, style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halo_config::Config;
    use halo_engine::{ClockEngine, TimeSample};
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_projection_depth() {
        let projection = Projection::new(Vec2::ZERO);
        let face = projection.project(Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(face, Vec2::new(1.0, 1.0));

        let behind = projection.project(Vec3::new(1.0, 1.0, -0.2));
        assert!(behind.x < 1.0 && behind.y < 1.0);
    }

    #[test]
    fn test_projection_view_offset() {
        let projection = Projection::new(Vec2::new(0.3, -0.3));
        let center = projection.project(Vec3::ZERO);
        assert_eq!(center, Vec2::new(-0.3, 0.3));
    }

    #[test]
    fn test_render_draws_numerals() {
        let mut engine = ClockEngine::new(Config {
            noise_seed: Some(5),
            ..Config::default()
        })
        .unwrap();
        engine.step_sample(1.0 / 60.0, 0.0, TimeSample::new(10, 20, 30, 0));

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|frame| render_clock(frame, frame.area(), engine.output(), Vec2::ZERO))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("45"));
        assert!(text.chars().any(|c| ('\u{2801}'..='\u{28ff}').contains(&c)));
    }
}
