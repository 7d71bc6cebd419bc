use crate::{render::Painter, types::Point};

/// One straight piece of a tree.
///
/// A segment is immutable once built. Its `length` and `heading` are
/// derived from the endpoints in [`Segment::new`] and cannot drift from
/// them, since no field is exposed for mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment<C> {
    start: Point,
    end: Point,
    width: f64,
    color: C,
    length: f64,
    heading: f64,
}

impl<C> Segment<C> {
    /// Builds a segment from its endpoints, stroke width and color.
    ///
    /// ### Parameters
    /// - `start` - Attachment point (the parent's end, or the tree root).
    /// - `end` - Free end of the segment.
    /// - `width` - Stroke width; expected to be positive.
    /// - `color` - Stroke color, stored as-is.
    pub fn new(start: Point, end: Point, width: f64, color: C) -> Self {
        let ray = end - start;
        Self {
            start,
            end,
            width,
            color,
            length: ray.length(),
            heading: ray.y.atan2(ray.x),
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn color(&self) -> &C {
        &self.color
    }

    /// Euclidean distance between `start` and `end`.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Direction of `end - start` in radians, in `(-π, π]`.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Issues exactly one line draw for this segment.
    pub fn draw<P: Painter<C> + ?Sized>(&self, painter: &mut P) {
        painter.draw_line(self.start, self.end, self.width, &self.color);
    }
}
