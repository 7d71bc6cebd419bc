use glam::DVec2;

/// A position in canvas space.
///
/// The y-axis points down, so a tree growing "up" moves towards negative y.
pub type Point = DVec2;
