//! [`Painter`] adapter that turns tree draw calls into egui shapes.

use egui::{Color32, Pos2, Shape, Stroke};
use glam::{DVec2, Vec2};
use tree_core::render::Painter;

/// Collects egui [`Shape`]s for every line drawn through [`Painter`].
///
/// Tree geometry arrives in `f64` and is narrowed to `f32` screen space
/// here. egui strokes have no cap style, so round caps are emulated by a filled
/// circle of the stroke's diameter at both ends of each line.
///
/// ### Fields
/// - `to_screen` - Maps a tree-space point to screen space.
/// - `scale` - Multiplier applied to stroke widths (the view zoom).
/// - `round_caps` - Whether end caps are currently emitted.
/// - `shapes` - Shapes produced so far, in draw order.
pub struct ShapePainter<F> {
    to_screen: F,
    scale: f32,
    round_caps: bool,
    shapes: Vec<Shape>,
}

impl<F: Fn(Vec2) -> Pos2> ShapePainter<F> {
    pub fn new(to_screen: F, scale: f32) -> Self {
        Self {
            to_screen,
            scale,
            round_caps: false,
            shapes: Vec::new(),
        }
    }

    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }
}

impl<F: Fn(Vec2) -> Pos2> Painter<Color32> for ShapePainter<F> {
    fn set_round_caps(&mut self) {
        self.round_caps = true;
    }

    fn draw_line(&mut self, start: DVec2, end: DVec2, width: f64, color: &Color32) {
        let a = (self.to_screen)(start.as_vec2());
        let b = (self.to_screen)(end.as_vec2());
        let w = width as f32 * self.scale;

        self.shapes.push(Shape::line_segment([a, b], Stroke::new(w, *color)));

        if self.round_caps {
            self.shapes.push(Shape::circle_filled(a, w * 0.5, *color));
            self.shapes.push(Shape::circle_filled(b, w * 0.5, *color));
        }
    }
}
