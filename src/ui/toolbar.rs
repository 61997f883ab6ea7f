// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Top toolbar.
//!
//! Background upload, project name entry with a picker for saved projects,
//! the Add Pin button and the zoom slider.

use crate::models::viewport::{MAX_ZOOM, MIN_ZOOM};

/// Result of toolbar interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    None,
    PickBackground,
    OpenProject(String),
    AddPin,
    SetZoom(f64),
}

/// Display the toolbar. `name_input` is the project name field's buffer.
pub fn show(
    ui: &mut egui::Ui,
    name_input: &mut String,
    saved_projects: &[String],
    zoom: f64,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("🖼 Background...").clicked() {
            action = ToolbarAction::PickBackground;
        }

        ui.separator();

        let response = ui.add(
            egui::TextEdit::singleline(name_input)
                .hint_text("Project Name")
                .desired_width(160.0),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let open_clicked = ui.button("Open").clicked();
        if submitted || open_clicked {
            action = ToolbarAction::OpenProject(name_input.trim().to_string());
        }

        ui.add_enabled_ui(!saved_projects.is_empty(), |ui| {
            egui::ComboBox::from_id_source("saved_projects")
                .selected_text("Saved")
                .show_ui(ui, |ui| {
                    for name in saved_projects {
                        if ui.selectable_label(false, name).clicked() {
                            action = ToolbarAction::OpenProject(name.clone());
                        }
                    }
                });
        });

        ui.separator();

        if ui.button("📍 Add Pin").clicked() {
            action = ToolbarAction::AddPin;
        }

        ui.separator();

        let mut value = zoom;
        ui.label(format!("Zoom: {:.2}x", zoom));
        let slider = ui.add(
            egui::Slider::new(&mut value, MIN_ZOOM..=MAX_ZOOM)
                .step_by(0.1)
                .show_value(false),
        );
        if slider.changed() {
            action = ToolbarAction::SetZoom(value);
        }
    });

    action
}
