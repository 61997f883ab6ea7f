// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the editing session, routes UI actions into
//! session operations and runs file decoding off the UI thread.

use crate::io::media::{self, AttachmentBatch};
use crate::io::serialization;
use crate::models::project::ProjectData;
use crate::models::viewport::DragState;
use crate::session::{AttachOutcome, Session};
use crate::ui::{canvas, filter, properties, textures::TextureCache, toolbar, viewer};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff", "tif"];

/// Result of a background file load.
enum LoadResult {
    Background(Result<String, String>),
    Attachments { pin_id: u64, batch: AttachmentBatch },
    Import(Result<ProjectData, String>),
}

/// A finished load, tagged with the session generation it started in.
struct Loaded {
    generation: u64,
    result: LoadResult,
}

/// Main application state.
pub struct MapPinsApp {
    session: Session,

    /// Project name field buffer
    name_input: String,

    /// Saved projects, refreshed when the session reports a listing change
    saved_projects: Vec<String>,

    /// Decoded images for display
    textures: TextureCache,

    /// Canvas size from the last frame, used to place pins at its center
    canvas_size: egui::Vec2,

    /// Background loads report back over this channel
    loader_tx: Sender<Loaded>,
    loader_rx: Receiver<Loaded>,
    pending_loads: usize,

    /// Status bar message
    status: Option<String>,
}

impl MapPinsApp {
    /// Create the application around a session.
    pub fn new(session: Session) -> Self {
        let (loader_tx, loader_rx) = channel();
        Self {
            name_input: session.name().to_string(),
            session,
            saved_projects: Vec::new(),
            textures: TextureCache::new(),
            canvas_size: egui::vec2(800.0, 600.0),
            loader_tx,
            loader_rx,
            pending_loads: 0,
            status: None,
        }
    }

    /// Run `job` on a worker thread and deliver its result to the next frame.
    fn spawn_load(&mut self, job: impl FnOnce() -> LoadResult + Send + 'static) {
        let sender = self.loader_tx.clone();
        let generation = self.session.generation();
        self.pending_loads += 1;
        std::thread::spawn(move || {
            let _ = sender.send(Loaded {
                generation,
                result: job(),
            });
        });
    }

    fn open_project(&mut self, name: String) {
        self.session.open_project(&name);
        self.name_input = name;
        self.status = if self.session.name().is_empty() {
            Some("No project name: changes are not saved".to_string())
        } else {
            Some(format!("Project '{}'", self.session.name()))
        };
    }

    fn add_pin_at_center(&mut self) {
        let id = self
            .session
            .add_pin_at_center(self.canvas_size.x as f64, self.canvas_size.y as f64);
        log::info!("Added pin {}, total: {}", id, self.session.pins().len());
    }

    /// Load a background image file (asynchronously).
    fn pick_background(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        self.spawn_load(move || {
            LoadResult::Background(media::read_data_url(&path).map_err(|e| format!("{:#}", e)))
        });
    }

    /// Decode the selected files for a pin (asynchronously, merged as one batch).
    fn pick_attachments(&mut self, pin_id: u64) {
        let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_files()
        else {
            return;
        };
        self.spawn_load(move || LoadResult::Attachments {
            pin_id,
            batch: media::read_attachments(&paths),
        });
    }

    /// Export the current project to a file.
    fn export_project(&mut self, path: PathBuf) {
        match serialization::export(&self.session.snapshot(), &path) {
            Ok(()) => {
                log::info!("Exported project to {}", path.display());
                self.status = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export project: {:#}", e);
                self.status = Some(format!("Export failed: {}", e));
            }
        }
    }

    /// Import a project file into the open project (asynchronously).
    fn import_project(&mut self, path: PathBuf) {
        self.spawn_load(move || {
            LoadResult::Import(serialization::import(&path).map_err(|e| format!("{:#}", e)))
        });
    }

    /// Apply finished background loads. Loads started before a project
    /// switch or import are dropped by the session.
    fn poll_loads(&mut self) {
        while let Ok(Loaded { generation, result }) = self.loader_rx.try_recv() {
            self.pending_loads = self.pending_loads.saturating_sub(1);
            match result {
                LoadResult::Background(Ok(data_url)) => {
                    if self.session.finish_background_load(generation, data_url) {
                        log::info!("Background image loaded");
                    }
                }
                LoadResult::Background(Err(e)) => {
                    log::error!("Failed to load background: {}", e);
                    self.status = Some(format!("Background failed: {}", e));
                }
                LoadResult::Attachments { pin_id, batch } => {
                    for failure in &batch.failures {
                        log::warn!("Skipped attachment: {}", failure);
                    }
                    let failed = batch.failures.len();
                    match self.session.finish_attach(generation, pin_id, batch.images) {
                        AttachOutcome::Appended(count) => {
                            log::info!("Attached {} images to pin {}", count, pin_id);
                            self.status = Some(if failed == 0 {
                                format!("Attached {} images", count)
                            } else {
                                format!("Attached {} images, {} failed", count, failed)
                            });
                        }
                        AttachOutcome::PinMissing => {
                            log::warn!("Pin {} no longer exists, dropping attachments", pin_id);
                        }
                        AttachOutcome::Stale => {}
                    }
                }
                LoadResult::Import(Ok(project)) => {
                    let pins = project.pins.len();
                    if self.session.finish_import(generation, project) {
                        log::info!("Imported project with {} pins", pins);
                        self.status = Some("Project imported".to_string());
                    }
                }
                LoadResult::Import(Err(e)) => {
                    log::error!("Failed to import project: {}", e);
                    self.status = Some(format!("Import failed: {}", e));
                }
            }
        }
    }

    fn refresh_saved_projects(&mut self) {
        if self.session.take_listing_changed() {
            self.saved_projects = self.session.list_projects();
        }
    }

    fn apply_canvas_action(&mut self, action: canvas::CanvasAction) {
        match action {
            canvas::CanvasAction::AddPinAtCenter => self.add_pin_at_center(),
            canvas::CanvasAction::SelectPin(id) => self.session.select_pin(id),
            canvas::CanvasAction::BeginPinDrag(id) => {
                self.session.begin_pin_drag(id);
            }
            canvas::CanvasAction::BeginPan(point) => {
                self.session.begin_pan_drag(point);
            }
            canvas::CanvasAction::DragTo(point) => match self.session.drag() {
                DragState::Pin { .. } => {
                    self.session.update_pin_drag(point);
                }
                DragState::Pan { .. } => {
                    self.session.update_pan_drag(point);
                }
                DragState::Idle => {}
            },
            canvas::CanvasAction::EndDrag => match self.session.drag() {
                DragState::Pin { .. } => self.session.end_pin_drag(),
                DragState::Pan { .. } => self.session.end_pan_drag(),
                DragState::Idle => {}
            },
        }
    }

    fn apply_properties_action(&mut self, pin_id: u64, action: properties::PropertiesAction) {
        match action {
            properties::PropertiesAction::SetColor(color) => {
                self.session.set_pin_color(pin_id, color);
            }
            properties::PropertiesAction::AddImages => self.pick_attachments(pin_id),
            properties::PropertiesAction::SetCaption(index, text) => {
                self.session.set_image_text(pin_id, index, &text);
            }
            properties::PropertiesAction::RemoveImage(index) => {
                self.session.remove_image(pin_id, index);
            }
            properties::PropertiesAction::OpenViewer => self.session.open_viewer(),
            properties::PropertiesAction::RemovePin => {
                self.session.remove_pin(pin_id);
            }
            properties::PropertiesAction::Close => self.session.clear_selection(),
            properties::PropertiesAction::None => {}
        }
    }
}

impl eframe::App for MapPinsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loads();
        self.refresh_saved_projects();

        // Request repaint while loading (to update spinner)
        if self.pending_loads > 0 {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Background...").clicked() {
                        self.pick_background();
                        ui.close_menu();
                    }
                    if ui.button("Import Project...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Projects", &["json", "yaml", "yml"])
                            .pick_file()
                        {
                            self.import_project(path);
                        }
                        ui.close_menu();
                    }
                    ui.menu_button("Export Project", |ui| {
                        if ui.button("Export as JSON...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name("project.json")
                                .save_file()
                            {
                                self.export_project(path);
                            }
                            ui.close_menu();
                        }
                        if ui.button("Export as YAML...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("YAML", &["yaml", "yml"])
                                .set_file_name("project.yaml")
                                .save_file()
                            {
                                self.export_project(path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Zoom In").clicked() {
                        self.session.zoom_in();
                        ui.close_menu();
                    }
                    if ui.button("Zoom Out").clicked() {
                        self.session.zoom_out();
                        ui.close_menu();
                    }
                    if ui.button("Reset View").clicked() {
                        self.session.reset_view();
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(
                    ui,
                    &mut self.name_input,
                    &self.saved_projects,
                    self.session.viewport().zoom(),
                )
            })
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::PickBackground => self.pick_background(),
            toolbar::ToolbarAction::OpenProject(name) => self.open_project(name),
            toolbar::ToolbarAction::AddPin => self.add_pin_at_center(),
            toolbar::ToolbarAction::SetZoom(zoom) => {
                self.session.set_zoom(zoom);
            }
            toolbar::ToolbarAction::None => {}
        }

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let name = self.session.name();
                if name.is_empty() {
                    ui.label(egui::RichText::new("Unsaved").italics());
                } else {
                    ui.label(format!("Project: {}", name));
                }
                ui.separator();
                ui.label(format!("Pins: {}", self.session.pins().len()));
                ui.separator();
                ui.label(format!("Zoom: {:.2}x", self.session.viewport().zoom()));
                if self.pending_loads > 0 {
                    ui.separator();
                    ui.spinner();
                    ui.label("Loading...");
                }
                if let Some(ref status) = self.status {
                    ui.separator();
                    ui.label(egui::RichText::new(status).weak());
                }
            });
        });

        // Filter panel (left side)
        let toggled = egui::SidePanel::left("filter")
            .default_width(140.0)
            .show(ctx, |ui| {
                filter::show(ui, &self.session.distinct_colors(), self.session.filter())
            })
            .inner;
        if let Some(color) = toggled {
            self.session.toggle_filter(color);
        }

        // Pin editor (right side)
        if let Some(pin) = self.session.selected_pin().cloned() {
            let properties_action = egui::SidePanel::right("properties")
                .default_width(280.0)
                .show(ctx, |ui| properties::show(ui, &pin, &mut self.textures))
                .inner;
            self.apply_properties_action(pin.id, properties_action);
        }

        // Handle keyboard events when no text field is focused
        if !ctx.wants_keyboard_input() && !self.session.viewer().open {
            if ctx.input(|i| i.key_pressed(egui::Key::Delete)) {
                if let Some(id) = self.session.selected() {
                    self.session.remove_pin(id);
                }
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                self.session.clear_selection();
            }
        }

        // Main area: image viewer or map canvas
        egui::CentralPanel::default().show(ctx, |ui| {
            let viewer_state = self.session.viewer();
            let count = self.session.selected_pin().map_or(0, |p| p.images.len());
            if let Some(image) = self.session.viewer_image().cloned() {
                let action = viewer::show(ui, &image, (viewer_state.index, count), &mut self.textures);
                match action {
                    viewer::ViewerAction::Prev => self.session.viewer_prev(),
                    viewer::ViewerAction::Next => self.session.viewer_next(),
                    viewer::ViewerAction::Close => self.session.close_viewer(),
                    viewer::ViewerAction::None => {}
                }
            } else {
                let (actions, size) = canvas::show(ui, &self.session, &mut self.textures);
                self.canvas_size = size;
                for action in actions {
                    self.apply_canvas_action(action);
                }
            }
        });

        // The viewer hides the canvas; keep its background decoded for when it closes
        if let Some(background) = self.session.background_image() {
            self.textures.keep(background);
        }
        self.textures.prune();
    }
}
