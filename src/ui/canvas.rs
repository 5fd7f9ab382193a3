// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas preview and pointer handling.
//!
//! This module shows the rendered canvas, draws the selection outline on
//! top of it, and turns pointer input into canvas-space actions. There is
//! no rubber-band selection; only the text layer can be picked.

use crate::models::layer::{Point, Rect};
use crate::util::geometry::{denormalize_coordinates, normalize_coordinates};

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// Primary button pressed at a canvas point
    Press(Point),
    /// Pointer dragged by a canvas-space delta
    Drag { dx: f64, dy: f64 },
}

/// What the preview should display.
pub enum CanvasView<'a> {
    /// Fonts are still loading
    Loading(&'a str),
    /// Ready, no image uploaded yet
    Empty,
    Image {
        texture: &'a egui::TextureHandle,
        /// Text bounds, when the text layer is selected
        selection: Option<Rect>,
    },
}

/// Display the canvas area and handle mouse interactions.
pub fn show(ui: &mut egui::Ui, view: CanvasView<'_>, canvas_size: (u32, u32)) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let (canvas_w, canvas_h) = canvas_size;
    let available = ui.available_size();
    // Shown at natural size, shrunk only when the window is smaller
    let zoom = (available.x / canvas_w as f32)
        .min(available.y / canvas_h as f32)
        .clamp(0.05, 1.0);
    let display = egui::vec2(canvas_w as f32 * zoom, canvas_h as f32 * zoom);

    ui.centered_and_justified(|ui| {
        let (rect, response) = ui.allocate_exact_size(display, egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, 0.0, egui::Color32::from_gray(60));
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, egui::Color32::from_gray(204)));

        match view {
            CanvasView::Loading(message) => {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    message,
                    egui::FontId::proportional(16.0),
                    egui::Color32::from_gray(200),
                );
            }
            CanvasView::Empty => {
                painter.text(
                    rect.center() - egui::vec2(0.0, 12.0),
                    egui::Align2::CENTER_CENTER,
                    "Image Editor",
                    egui::FontId::proportional(28.0),
                    egui::Color32::from_gray(200),
                );
                painter.text(
                    rect.center() + egui::vec2(0.0, 20.0),
                    egui::Align2::CENTER_CENTER,
                    "Upload or drop an image to begin",
                    egui::FontId::proportional(14.0),
                    egui::Color32::from_gray(150),
                );
            }
            CanvasView::Image { texture, selection } => {
                painter.image(
                    texture.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );

                if let Some(bounds) = selection {
                    let min = to_screen(bounds.min, rect, canvas_size);
                    let max = to_screen(
                        Point::new(bounds.min.x + bounds.width, bounds.min.y + bounds.height),
                        rect,
                        canvas_size,
                    );
                    painter.rect_stroke(
                        egui::Rect::from_min_max(min, max).expand(2.0),
                        0.0,
                        egui::Stroke::new(1.5, egui::Color32::from_rgb(0, 140, 255)),
                    );
                }

                let pressed = ui.input(|i| i.pointer.primary_pressed());
                if pressed && response.hovered() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        action = CanvasAction::Press(to_canvas(pos, rect, canvas_size));
                    }
                } else if response.dragged_by(egui::PointerButton::Primary) {
                    let delta = response.drag_delta();
                    if delta != egui::Vec2::ZERO {
                        action = CanvasAction::Drag {
                            dx: delta.x as f64 / zoom as f64,
                            dy: delta.y as f64 / zoom as f64,
                        };
                    }
                }
            }
        }
    });

    action
}

/// Convert a screen position inside `rect` to canvas pixels.
fn to_canvas(pos: egui::Pos2, rect: egui::Rect, canvas_size: (u32, u32)) -> Point {
    let local = normalize_coordinates(
        (pos.x - rect.min.x) as f64,
        (pos.y - rect.min.y) as f64,
        rect.width().round() as u32,
        rect.height().round() as u32,
    );
    let (x, y) = denormalize_coordinates(&local, canvas_size.0, canvas_size.1);
    Point::new(x, y)
}

/// Convert canvas pixels to a screen position inside `rect`.
fn to_screen(point: Point, rect: egui::Rect, canvas_size: (u32, u32)) -> egui::Pos2 {
    let local = normalize_coordinates(point.x, point.y, canvas_size.0, canvas_size.1);
    let (x, y) = denormalize_coordinates(
        &local,
        rect.width().round() as u32,
        rect.height().round() as u32,
    );
    egui::pos2(rect.min.x + x as f32, rect.min.y + y as f32)
}
