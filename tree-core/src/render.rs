//! Drawing capability consumed by [`crate::tree::Tree::render`].

use crate::types::Point;

/// A surface that can stroke straight lines.
///
/// Implementors are usually thin adapters over a host canvas. The color
/// type `C` is passed through untouched from the tree's configuration.
pub trait Painter<C> {
    /// Switches subsequent lines to round end caps.
    fn set_round_caps(&mut self);

    /// Strokes a line of the given `width` and `color` from `start` to `end`.
    fn draw_line(&mut self, start: Point, end: Point, width: f64, color: &C);
}

/// A single recorded [`Painter`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall<C> {
    RoundCaps,
    Line {
        start: Point,
        end: Point,
        width: f64,
        color: C,
    },
}

/// A [`Painter`] that records every call instead of drawing.
///
/// Useful for inspecting what a render pass would emit, and for comparing
/// two passes over the same tree.
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter<C> {
    pub calls: Vec<DrawCall<C>>,
}

impl<C> RecordingPainter<C> {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    /// Number of recorded line draws (cap changes are not counted).
    pub fn line_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
            .count()
    }
}

impl<C: Clone> Painter<C> for RecordingPainter<C> {
    fn set_round_caps(&mut self) {
        self.calls.push(DrawCall::RoundCaps);
    }

    fn draw_line(&mut self, start: Point, end: Point, width: f64, color: &C) {
        self.calls.push(DrawCall::Line {
            start,
            end,
            width,
            color: color.clone(),
        });
    }
}
