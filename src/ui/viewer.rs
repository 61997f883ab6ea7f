// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Fullscreen image viewer.

use crate::models::annotation::Annotation;
use crate::ui::textures::TextureCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    None,
    Prev,
    Next,
    Close,
}

/// Show `image` scaled to fit, with its caption and navigation controls.
pub fn show(
    ui: &mut egui::Ui,
    image: &Annotation,
    position: (usize, usize),
    textures: &mut TextureCache,
) -> ViewerAction {
    let mut action = ViewerAction::None;

    ui.horizontal(|ui| {
        if ui.button("◀ Prev").clicked() {
            action = ViewerAction::Prev;
        }
        if ui.button("Next ▶").clicked() {
            action = ViewerAction::Next;
        }
        if ui.button("Close").clicked() {
            action = ViewerAction::Close;
        }
        ui.separator();
        ui.label(format!("{} / {}", position.0 + 1, position.1));
    });
    ui.separator();

    let caption_height = if image.text.is_empty() { 0.0 } else { 60.0 };
    let available = ui.available_size() - egui::vec2(0.0, caption_height);
    ui.vertical_centered(|ui| match textures.get(ui.ctx(), &image.src) {
        Some(texture) => {
            let size = texture.size_vec2();
            let scale = (available.x / size.x).min(available.y / size.y).min(1.0);
            ui.image((texture.id(), size * scale));
        }
        None => {
            ui.label("This image could not be decoded.");
        }
    });

    if !image.text.is_empty() {
        ui.separator();
        let mut text = image.text.as_str();
        ui.add(egui::TextEdit::multiline(&mut text).desired_width(f32::INFINITY));
    }

    ui.input(|i| {
        if i.key_pressed(egui::Key::ArrowLeft) {
            action = ViewerAction::Prev;
        } else if i.key_pressed(egui::Key::ArrowRight) {
            action = ViewerAction::Next;
        } else if i.key_pressed(egui::Key::Escape) {
            action = ViewerAction::Close;
        }
    });

    action
}
