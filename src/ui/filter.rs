// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Color filter panel.

use crate::models::pin::PinColor;
use std::collections::BTreeSet;

/// Show one swatch per color in use. Returns the color whose swatch was clicked.
pub fn show(
    ui: &mut egui::Ui,
    colors: &BTreeSet<PinColor>,
    active: &BTreeSet<PinColor>,
) -> Option<PinColor> {
    let mut toggled = None;

    ui.strong("Filter Pins:");
    if colors.is_empty() {
        ui.label(egui::RichText::new("No pins yet").weak());
        return None;
    }

    for &color in colors {
        ui.horizontal(|ui| {
            let (rect, response) = ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::click());
            let [r, g, b] = color.rgb();
            let stroke = if active.contains(&color) {
                egui::Stroke::new(2.5, egui::Color32::from_rgb(0, 200, 255))
            } else {
                egui::Stroke::new(1.0, egui::Color32::GRAY)
            };
            ui.painter().rect(rect, 3.0, egui::Color32::from_rgb(r, g, b), stroke);

            let label = ui.selectable_label(active.contains(&color), color.name());
            if response.clicked() || label.clicked() {
                toggled = Some(color);
            }
        });
    }

    if !active.is_empty() {
        ui.label(egui::RichText::new("Showing selected colors only").italics().weak());
    }

    toggled
}
