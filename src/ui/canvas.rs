// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Map canvas.
//!
//! Draws the background image and the visible pins under the current pan/zoom
//! transform, and turns pointer input into canvas actions:
//! left-drag moves a pin, left-click selects it, right-drag pans the map and
//! middle-click drops a new pin at the center.

use crate::models::viewport::{pin_render_size, DragState};
use crate::session::Session;
use crate::ui::textures::TextureCache;
use crate::util::geometry::{model_to_screen, Point};

/// Result of canvas interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasAction {
    AddPinAtCenter,
    SelectPin(u64),
    BeginPinDrag(u64),
    BeginPan(Point),
    DragTo(Point),
    EndDrag,
}

/// Display the map canvas. Returns the actions to apply and the canvas size.
pub fn show(
    ui: &mut egui::Ui,
    session: &Session,
    textures: &mut TextureCache,
) -> (Vec<CanvasAction>, egui::Vec2) {
    let mut actions = Vec::new();

    let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(40));

    let viewport = session.viewport();
    let zoom = viewport.zoom();
    let offset = viewport.offset();
    let to_local = |pos: egui::Pos2| Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);
    let to_screen = |model: Point| {
        let screen = model_to_screen(model, offset, zoom);
        rect.min + egui::vec2(screen.x as f32, screen.y as f32)
    };

    // Background image in model space, anchored at the model origin
    let background = session
        .background_image()
        .and_then(|url| textures.get(ui.ctx(), url));
    if let Some(texture) = &background {
        let image_rect = egui::Rect::from_min_size(
            to_screen(Point::ZERO),
            texture.size_vec2() * zoom as f32,
        );
        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    if background.is_none() && session.pins().is_empty() {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "Open a background image and add pins to begin",
            egui::FontId::proportional(16.0),
            egui::Color32::from_gray(180),
        );
    }

    // Map-level pointer handling
    if response.clicked_by(egui::PointerButton::Middle) {
        actions.push(CanvasAction::AddPinAtCenter);
    }
    if response.drag_started_by(egui::PointerButton::Secondary) {
        if let Some(origin) = ui.input(|i| i.pointer.press_origin()) {
            actions.push(CanvasAction::BeginPan(to_local(origin)));
        }
    }

    // Pins, drawn at model positions and scaled with the map
    let side = (pin_render_size(zoom) * zoom) as f32;
    for pin in session.visible_pins() {
        let center = to_screen(Point::new(pin.x, pin.y));
        let pin_rect = egui::Rect::from_center_size(center, egui::vec2(side, side));
        if !rect.intersects(pin_rect) {
            continue;
        }

        let pin_response = ui.interact(pin_rect, ui.id().with(("pin", pin.id)), egui::Sense::click_and_drag());
        if pin_response.drag_started_by(egui::PointerButton::Primary) {
            actions.push(CanvasAction::BeginPinDrag(pin.id));
        }
        if pin_response.clicked() {
            actions.push(CanvasAction::SelectPin(pin.id));
        }

        let [r, g, b] = pin.color.rgb();
        let selected = session.selected() == Some(pin.id);
        let stroke = if selected {
            egui::Stroke::new(2.5, egui::Color32::from_rgb(0, 200, 255))
        } else {
            egui::Stroke::new(1.0, egui::Color32::from_gray(20))
        };
        painter.circle(center, side / 2.0, egui::Color32::from_rgb(r, g, b), stroke);
        if pin_response.hovered() {
            pin_response.on_hover_text(format!("{} pin, {} images", pin.color, pin.images.len()));
        }
    }

    // Drag tracking: move, release, leave
    let dragging = session.drag() != DragState::Idle || actions.iter().any(|a| {
        matches!(a, CanvasAction::BeginPan(_) | CanvasAction::BeginPinDrag(_))
    });
    if dragging {
        let (latest, moving, released) = ui.input(|i| {
            (i.pointer.latest_pos(), i.pointer.is_moving(), i.pointer.any_released())
        });
        match latest {
            Some(pos) if rect.contains(pos) => {
                if moving {
                    actions.push(CanvasAction::DragTo(to_local(pos)));
                }
                if released {
                    actions.push(CanvasAction::EndDrag);
                }
            }
            _ => actions.push(CanvasAction::EndDrag),
        }
    }

    (actions, rect.size())
}
