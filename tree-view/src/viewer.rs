//! Interactive procedural tree viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the parameter set, the seed
//! and the generated [`Tree`], and implements [`eframe::App`] to edit the
//! parameters and draw the tree on a canvas.

use crate::painter::ShapePainter;
use eframe::App;
use egui::Color32;
use glam::Vec2;
use std::ops::RangeInclusive;
use tree_core::{config::TreeConfig, growth::normalized_depth, interp::lerp, tree::Tree};

/// Size of the canvas the default parameters are laid out for.
pub const CANVAS_SIZE: Vec2 = Vec2::new(1000.0, 1000.0);

/// Default bark color, `#74726E`.
pub const BARK: Color32 = Color32::from_rgb(0x74, 0x72, 0x6e);

/// Default canvas background.
pub const PAPER: Color32 = Color32::from_rgb(0xf2, 0xf0, 0xeb);

/// Largest expected segment count the viewer will grow on the UI thread.
pub const MAX_EXPECTED_SEGMENTS: f64 = 250_000.0;

/// Editable range for the root position; the engine accepts any point.
pub const POSITION_RANGE: RangeInclusive<f64> = f64::NEG_INFINITY..=f64::INFINITY;

/// Expected number of segments a tree grown from `cfg` will hold.
///
/// Each round multiplies the frontier by `1 + p`, where `p` is the round's
/// branchability clamped to `[0, 1]`.
pub fn expected_segment_count<C>(cfg: &TreeConfig<C>) -> f64 {
    let mut frontier = 1.0;
    let mut total = 1.0;
    for iteration in 0..cfg.iterations {
        let t = normalized_depth(iteration, cfg.iterations);
        let p = lerp(cfg.trunk_branchability, cfg.twig_branchability, t).clamp(0.0, 1.0);
        frontier *= 1.0 + p;
        total += frontier;
    }
    total
}

/// Returns a warning when `cfg` would grow more than [`MAX_EXPECTED_SEGMENTS`].
fn over_budget<C>(cfg: &TreeConfig<C>) -> Option<String> {
    let expected = expected_segment_count(cfg);
    // NaN parameters count as over budget too.
    if expected <= MAX_EXPECTED_SEGMENTS {
        None
    } else {
        Some(format!("~{expected:.0} segments expected, tree not regrown"))
    }
}

/// Main application state for the viewer.
///
/// The tree is regenerated whenever a parameter or the seed changes, so the
/// canvas shows `Tree::from_seed(cfg, seed)` unless `cfg` is over the
/// segment budget, in which case the previous tree stays up.
///
/// ### Fields
/// - `cfg` - Parameter set being edited.
/// - `seed` - Seed of the current tree.
/// - `tree` - Tree generated from `cfg` and `seed`.
/// - `warning` - Set when the last parameters were over the segment budget.
/// - `background` - Canvas fill color.
/// - `zoom` - Zoom factor for tree-to-screen mapping.
/// - `pan` - Screen-space pan offset in pixels.
pub struct Viewer {
    cfg: TreeConfig<Color32>,
    seed: u64,
    tree: Tree<Color32>,
    warning: Option<String>,

    background: Color32,
    zoom: f32,
    pan: egui::Vec2,
}

impl Viewer {
    /// Creates a viewer showing the tree grown from `cfg` and `seed`.
    ///
    /// An over-budget `cfg` is kept for editing, but only its trunk is grown.
    pub fn new(cfg: TreeConfig<Color32>, seed: u64) -> Self {
        let warning = over_budget(&cfg);
        let tree = if warning.is_some() {
            Tree::from_seed(
                TreeConfig {
                    iterations: 0,
                    ..cfg.clone()
                },
                seed,
            )
        } else {
            Tree::from_seed(cfg.clone(), seed)
        };

        Self {
            cfg,
            seed,
            tree,
            warning,
            background: PAPER,
            zoom: 0.6,
            pan: egui::vec2(0.0, 0.0),
        }
    }

    /// Default parameters drawn in bark color.
    pub fn default_config() -> TreeConfig<Color32> {
        TreeConfig::with_color(BARK)
    }

    /// Grows the tree again from the current parameters and seed.
    ///
    /// Leaves the current tree in place and sets `warning` if the parameters
    /// are over [`MAX_EXPECTED_SEGMENTS`].
    fn regenerate(&mut self) {
        self.warning = over_budget(&self.cfg);
        if let Some(warning) = &self.warning {
            tracing::warn!(seed = self.seed, "{warning}");
            return;
        }

        self.tree = Tree::from_seed(self.cfg.clone(), self.seed);
        tracing::info!(seed = self.seed, segments = self.tree.len(), "regenerated tree");
    }

    /// Picks a fresh random seed and regenerates.
    ///
    /// Seeds stay within `u32` so the seed field edits them exactly.
    fn reseed(&mut self) {
        self.seed = u64::from(rand::random::<u32>());
        self.regenerate();
    }

    /// Restores the default parameters, keeping the seed.
    fn reset_config(&mut self) {
        self.cfg = Self::default_config();
        self.regenerate();
    }

    /// Converts a tree-space position to screen-space.
    ///
    /// The canvas center is mapped to the center of `rect`, then scaled by
    /// `zoom` and offset by `pan`. Both spaces have y pointing down.
    ///
    /// ### Parameters
    /// - `p` - Tree-space position.
    /// - `rect` - Screen-space rectangle representing the drawing area.
    ///
    /// ### Returns
    /// The corresponding egui position in screen-space.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        to_screen(p, rect, self.zoom, self.pan)
    }

    /// Converts a screen-space position back to tree-space.
    ///
    /// This is the inverse of [`Viewer::world_to_screen`] up to floating
    /// point rounding.
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (p.y - center.y - self.pan.y) / self.zoom;
        Vec2::new(x, y) + CANVAS_SIZE * 0.5
    }

    /// Helper to draw a labeled numeric [`egui::DragValue`].
    ///
    /// ### Returns
    /// `true` if the value was edited this frame.
    fn labeled_drag<N: egui::emath::Numeric>(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut N,
        range: RangeInclusive<N>,
        speed: f64,
    ) -> bool {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed))
                .changed()
        })
        .inner
    }

    /// Helper to draw a labeled angle editor (shown in degrees).
    fn labeled_angle(ui: &mut egui::Ui, label: &str, radians: &mut f64) -> bool {
        let mut value = *radians as f32;
        let changed = ui
            .horizontal(|ui| {
                ui.label(label);
                ui.drag_angle(&mut value).changed()
            })
            .inner;
        if changed {
            *radians = f64::from(value);
        }
        changed
    }

    /// Builds the top panel UI (seed controls, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("🎲 Regenerate").clicked() {
                    self.reseed();
                }

                if ui
                    .add(egui::DragValue::new(&mut self.seed).prefix("seed = "))
                    .changed()
                {
                    self.regenerate();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.1..=10.0).text("Zoom"));

                if ui.button("Recenter").clicked() {
                    self.pan = egui::vec2(0.0, 0.0);
                }
            });
        });
    }

    /// Builds the bottom status bar (seed, segment count).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("seed = {}", self.seed));
                ui.separator();
                ui.label(format!("segments = {}", self.tree.len()));
                if let Some(warning) = &self.warning {
                    ui.separator();
                    let amber = egui::Color32::from_rgb(0xd0, 0x70, 0x20);
                    ui.colored_label(amber, warning.as_str());
                }
            });
        });
    }

    /// Builds the right-hand panel for the tree parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Parameters");
                let cfg = &mut self.cfg;
                let mut changed = false;

                ui.separator();
                changed |= Self::labeled_drag(ui, "iterations:", &mut cfg.iterations, 0..=40, 0.1);

                ui.label("Root");
                changed |= Self::labeled_drag(
                    ui,
                    "x:",
                    &mut cfg.position.x,
                    POSITION_RANGE,
                    1.0,
                );
                changed |= Self::labeled_drag(
                    ui,
                    "y:",
                    &mut cfg.position.y,
                    POSITION_RANGE,
                    1.0,
                );
                ui.horizontal(|ui| {
                    ui.label("color:");
                    changed |= ui.color_edit_button_srgba(&mut cfg.color).changed();
                });

                ui.separator();
                ui.label("Length");
                changed |= Self::labeled_drag(
                    ui,
                    "trunk:",
                    &mut cfg.trunk_length,
                    0.0..=500.0,
                    0.5,
                );
                changed |= Self::labeled_drag(ui, "twig:", &mut cfg.twig_length, 0.0..=500.0, 0.5);

                ui.separator();
                ui.label("Width");
                changed |= Self::labeled_drag(ui, "trunk:", &mut cfg.trunk_width, 0.0..=200.0, 0.2);
                changed |= Self::labeled_drag(ui, "twig:", &mut cfg.twig_width, 0.0..=200.0, 0.2);

                ui.separator();
                ui.label("Branchability");
                changed |= Self::labeled_drag(
                    ui,
                    "trunk:",
                    &mut cfg.trunk_branchability,
                    0.0..=1.0,
                    0.01,
                );
                changed |= Self::labeled_drag(
                    ui,
                    "twig:",
                    &mut cfg.twig_branchability,
                    0.0..=1.0,
                    0.01,
                );

                ui.separator();
                ui.label("Angle jitter");
                changed |= Self::labeled_angle(ui, "single:", &mut cfg.max_angle_delta);
                changed |= Self::labeled_angle(ui, "forked:", &mut cfg.branched.max_angle_delta);

                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("background:");
                    ui.color_edit_button_srgba(&mut self.background);
                });

                if changed {
                    self.regenerate();
                }

                ui.separator();
                if ui.button("Reset parameters to default").clicked() {
                    self.reset_config();
                }
            });
    }

    /// Builds the central panel where the tree is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.1, 10.0);

                let screen_after = self.world_to_screen(world_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            let canvas = egui::Rect::from_two_pos(
                self.world_to_screen(Vec2::ZERO, rect),
                self.world_to_screen(CANVAS_SIZE, rect),
            );
            painter.rect_filled(canvas, 0.0, self.background);

            let (zoom, pan) = (self.zoom, self.pan);
            let mut shapes = ShapePainter::new(|p: Vec2| to_screen(p, rect, zoom, pan), zoom);
            self.tree.render(&mut shapes);
            painter.extend(shapes.into_shapes());
        });
    }
}

/// Maps a tree-space point into `rect` for the given zoom and pan.
fn to_screen(p: Vec2, rect: egui::Rect, zoom: f32, pan: egui::Vec2) -> egui::Pos2 {
    let center = rect.center();
    let local = (p - CANVAS_SIZE * 0.5) * zoom;
    egui::pos2(center.x + local.x + pan.x, center.y + local.y + pan.y)
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
