// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pin properties panel.
//!
//! Edits the selected pin: its color, attached images and their captions.

use crate::models::pin::{Pin, PinColor};
use crate::ui::textures::TextureCache;

const THUMB_SIZE: f32 = 64.0;

/// Result of properties panel interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertiesAction {
    None,
    SetColor(PinColor),
    AddImages,
    SetCaption(usize, String),
    RemoveImage(usize),
    OpenViewer,
    RemovePin,
    Close,
}

/// Display the editor for `pin`.
pub fn show(ui: &mut egui::Ui, pin: &Pin, textures: &mut TextureCache) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Edit Pin");
    ui.label(egui::RichText::new(format!("({:.1}, {:.1})", pin.x, pin.y)).weak());
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Color:");
        let mut color = pin.color;
        egui::ComboBox::from_id_source(("pin_color", pin.id))
            .selected_text(color.name())
            .show_ui(ui, |ui| {
                for option in PinColor::ALL {
                    ui.selectable_value(&mut color, option, option.name());
                }
            });
        if color != pin.color {
            action = PropertiesAction::SetColor(color);
        }
    });

    ui.horizontal(|ui| {
        ui.label("Images:");
        if ui.button("Add Images...").clicked() {
            action = PropertiesAction::AddImages;
        }
    });

    egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
        for (index, image) in pin.images.iter().enumerate() {
            ui.horizontal(|ui| {
                match textures.get(ui.ctx(), &image.src) {
                    Some(texture) => {
                        let size = texture.size_vec2();
                        let scale = THUMB_SIZE / size.x.max(size.y).max(1.0);
                        ui.image((texture.id(), size * scale));
                    }
                    None => {
                        ui.label("⚠");
                    }
                }

                ui.vertical(|ui| {
                    let mut text = image.text.clone();
                    let response = ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .hint_text("Text for image")
                            .desired_rows(2),
                    );
                    if response.changed() {
                        action = PropertiesAction::SetCaption(index, text);
                    }
                    if ui.small_button("Remove Image").clicked() {
                        action = PropertiesAction::RemoveImage(index);
                    }
                });
            });
            ui.separator();
        }
    });

    ui.horizontal(|ui| {
        if !pin.images.is_empty() && ui.button("View").clicked() {
            action = PropertiesAction::OpenViewer;
        }
        if ui.button("Remove Pin").clicked() {
            action = PropertiesAction::RemovePin;
        }
        if ui.button("Close").clicked() {
            action = PropertiesAction::Close;
        }
    });

    action
}
