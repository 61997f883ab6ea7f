// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editing session for the open project.
//!
//! The session is the single owner of model state. The UI reads from it and
//! calls its operations; every operation that touches persisted state (pins,
//! background, zoom, offset) ends in [`Session::on_change`], which writes the
//! full snapshot through to the project store when a project name is set.

use crate::io::storage::ProjectStore;
use crate::models::annotation::Annotation;
use crate::models::pin::{Pin, PinColor, PinPatch};
use crate::models::project::ProjectData;
use crate::models::viewer::ViewerState;
use crate::models::viewport::{self, DragState, MapViewport};
use crate::util::geometry::Point;
use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Outcome of merging an attachment batch into a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    Appended(usize),
    PinMissing,
    /// The batch was read for a project that is no longer open
    Stale,
}

pub struct Session {
    store: ProjectStore,
    name: String,
    viewport: MapViewport,
    background_image: Option<String>,
    selected: Option<u64>,
    filter: BTreeSet<PinColor>,
    viewer: ViewerState,
    last_pin_id: u64,
    /// Bumped whenever a different project state is loaded
    generation: u64,
    /// Whether the open project has an entry in the store
    stored: bool,
    listing_changed: bool,
}

impl Session {
    /// Start with no project name, so nothing is persisted until one is opened.
    pub fn new(store: ProjectStore) -> Self {
        Self {
            store,
            name: String::new(),
            viewport: MapViewport::default(),
            background_image: None,
            selected: None,
            filter: BTreeSet::new(),
            viewer: ViewerState::default(),
            last_pin_id: 0,
            generation: 0,
            stored: false,
            listing_changed: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifies the project state that file loads started against.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the stored project names may have changed since the last call.
    /// True after opening or importing, and after the first save of a new name.
    pub fn take_listing_changed(&mut self) -> bool {
        std::mem::take(&mut self.listing_changed)
    }

    pub fn viewport(&self) -> &MapViewport {
        &self.viewport
    }

    pub fn pins(&self) -> &[Pin] {
        self.viewport.pins()
    }

    pub fn background_image(&self) -> Option<&str> {
        self.background_image.as_deref()
    }

    pub fn list_projects(&self) -> Vec<String> {
        self.store.list_projects()
    }

    /// Current state in its persisted shape.
    pub fn snapshot(&self) -> ProjectData {
        ProjectData {
            pins: self.viewport.pins().to_vec(),
            background_image: self.background_image.clone(),
            zoom: self.viewport.zoom(),
            offset: self.viewport.offset(),
        }
    }

    /// Switch to the named project.
    ///
    /// A stored snapshot is restored; an unseen or unreadable one starts from
    /// defaults. Selection, filter and viewer are reset either way. An empty
    /// name keeps the current state but stops persisting it.
    pub fn open_project(&mut self, name: &str) {
        self.name = name.to_string();
        self.stored = self.store.contains(name);
        self.listing_changed = true;
        if name.is_empty() {
            self.generation += 1;
            return;
        }

        let project = match self.store.load(name) {
            Some(project) => {
                log::info!("Opened project '{}' with {} pins", name, project.pins.len());
                project
            }
            None => {
                log::info!("Starting new project '{}'", name);
                ProjectData::default()
            }
        };
        self.restore(project);
    }

    /// Replace the current state with an imported snapshot and persist it.
    pub fn import_project(&mut self, project: ProjectData) {
        self.restore(project);
        self.on_change();
        self.listing_changed = true;
    }

    fn restore(&mut self, project: ProjectData) {
        self.viewport = MapViewport::new(project.pins, project.zoom, project.offset);
        self.background_image = project.background_image;
        self.selected = None;
        self.filter.clear();
        self.viewer.close();
        self.generation += 1;
    }

    /// Write-through persistence hook, run after every persisted-state mutation.
    fn on_change(&mut self) {
        if self.name.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        match self.store.save(&self.name, &snapshot) {
            Ok(()) if !self.stored => {
                self.stored = true;
                self.listing_changed = true;
            }
            Ok(()) => {}
            Err(e) => log::error!("Failed to save project '{}': {}", self.name, e),
        }
    }

    fn is_current(&self, generation: u64, what: &str) -> bool {
        if generation == self.generation {
            return true;
        }
        log::warn!("Project changed while {} was loading, dropping it", what);
        false
    }

    fn changed(&mut self, changed: bool) -> bool {
        if changed {
            self.on_change();
        }
        changed
    }

    /// Millisecond timestamp, bumped past every id already in use.
    ///
    /// Once the id space above the largest id is used up, the smallest free
    /// id is handed out instead.
    fn next_pin_id(&mut self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let max_existing = self.viewport.pins().iter().map(|p| p.id).max().unwrap_or(0);
        let id = match self.last_pin_id.max(max_existing).checked_add(1) {
            Some(next) => now.max(next),
            None => self.smallest_free_id(),
        };
        self.last_pin_id = id;
        id
    }

    fn smallest_free_id(&self) -> u64 {
        let used: BTreeSet<u64> = self.viewport.pins().iter().map(|p| p.id).collect();
        let mut id = 1;
        for &taken in used.range(1..) {
            if taken != id {
                break;
            }
            id += 1;
        }
        log::warn!("Pin ids exhausted above the largest id, reusing {}", id);
        id
    }

    // Pins

    /// Drop a new pin at the center of a container of the given size.
    pub fn add_pin_at_center(&mut self, container_width: f64, container_height: f64) -> u64 {
        let id = self.next_pin_id();
        self.viewport.add_pin_at_center(container_width, container_height, id);
        self.on_change();
        id
    }

    pub fn update_pin(&mut self, id: u64, patch: PinPatch) -> bool {
        let changed = self.viewport.update_pin(id, patch);
        self.changed(changed)
    }

    pub fn set_pin_color(&mut self, id: u64, color: PinColor) -> bool {
        self.update_pin(id, PinPatch::color(color))
    }

    /// Remove a pin with its images. Clears the selection if it was selected.
    pub fn remove_pin(&mut self, id: u64) -> bool {
        if self.viewport.remove_pin(id).is_none() {
            return false;
        }
        if self.selected == Some(id) {
            self.clear_selection();
        }
        log::info!("Removed pin {}, total: {}", id, self.viewport.pins().len());
        self.on_change();
        true
    }

    pub fn set_background(&mut self, data_url: Option<String>) {
        if self.background_image == data_url {
            return;
        }
        self.background_image = data_url;
        self.on_change();
    }

    /// Apply a background read started at `generation`.
    pub fn finish_background_load(&mut self, generation: u64, data_url: String) -> bool {
        if !self.is_current(generation, "a background image") {
            return false;
        }
        self.set_background(Some(data_url));
        true
    }

    /// Apply a project import started at `generation`.
    pub fn finish_import(&mut self, generation: u64, project: ProjectData) -> bool {
        if !self.is_current(generation, "an import") {
            return false;
        }
        self.import_project(project);
        true
    }

    // Images

    /// Merge an attachment batch read at `generation`.
    pub fn finish_attach(
        &mut self,
        generation: u64,
        pin_id: u64,
        images: Vec<Annotation>,
    ) -> AttachOutcome {
        if !self.is_current(generation, "an attachment batch") {
            return AttachOutcome::Stale;
        }
        self.attach_images(pin_id, images)
    }

    /// Append a decoded batch to a pin in one update.
    pub fn attach_images(&mut self, pin_id: u64, images: Vec<Annotation>) -> AttachOutcome {
        let Some(pin) = self.viewport.pin(pin_id) else {
            return AttachOutcome::PinMissing;
        };
        let count = images.len();
        if count == 0 {
            return AttachOutcome::Appended(0);
        }
        let mut merged = pin.images.clone();
        merged.extend(images);
        self.update_pin(pin_id, PinPatch::images(merged));
        AttachOutcome::Appended(count)
    }

    pub fn set_image_text(&mut self, pin_id: u64, index: usize, text: &str) -> bool {
        let Some(pin) = self.viewport.pin(pin_id) else {
            return false;
        };
        if index >= pin.images.len() {
            return false;
        }
        let mut images = pin.images.clone();
        images[index].text = text.to_string();
        self.update_pin(pin_id, PinPatch::images(images))
    }

    pub fn remove_image(&mut self, pin_id: u64, index: usize) -> bool {
        let Some(pin) = self.viewport.pin(pin_id) else {
            return false;
        };
        if index >= pin.images.len() {
            return false;
        }
        let mut images = pin.images.clone();
        images.remove(index);
        let remaining = images.len();
        let changed = self.update_pin(pin_id, PinPatch::images(images));
        if self.selected == Some(pin_id) {
            self.viewer.clamp(remaining);
        }
        changed
    }

    // Viewport

    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        let changed = self.viewport.set_zoom(zoom);
        self.changed(changed)
    }

    pub fn zoom_in(&mut self) -> bool {
        let changed = self.viewport.zoom_in();
        self.changed(changed)
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.viewport.zoom_out();
        self.changed(changed)
    }

    pub fn reset_view(&mut self) -> bool {
        let changed = self.viewport.reset_view();
        self.changed(changed)
    }

    pub fn drag(&self) -> DragState {
        self.viewport.drag()
    }

    pub fn begin_pin_drag(&mut self, id: u64) -> bool {
        self.viewport.begin_pin_drag(id)
    }

    pub fn update_pin_drag(&mut self, screen: Point) -> bool {
        let changed = self.viewport.update_pin_drag(screen);
        self.changed(changed)
    }

    pub fn end_pin_drag(&mut self) {
        self.viewport.end_pin_drag();
    }

    pub fn begin_pan_drag(&mut self, screen: Point) -> bool {
        self.viewport.begin_pan_drag(screen)
    }

    pub fn update_pan_drag(&mut self, screen: Point) -> bool {
        let changed = self.viewport.update_pan_drag(screen);
        self.changed(changed)
    }

    pub fn end_pan_drag(&mut self) {
        self.viewport.end_pan_drag();
    }

    // Selection

    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    pub fn selected_pin(&self) -> Option<&Pin> {
        self.selected.and_then(|id| self.viewport.pin(id))
    }

    pub fn select_pin(&mut self, id: u64) {
        if self.viewport.pin(id).is_none() || self.selected == Some(id) {
            return;
        }
        self.selected = Some(id);
        self.viewer.close();
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.viewer.close();
    }

    // Filter

    pub fn filter(&self) -> &BTreeSet<PinColor> {
        &self.filter
    }

    pub fn toggle_filter(&mut self, color: PinColor) {
        if !self.filter.remove(&color) {
            self.filter.insert(color);
        }
    }

    pub fn visible_pins(&self) -> Vec<&Pin> {
        viewport::visible_pins(self.viewport.pins(), &self.filter)
    }

    pub fn distinct_colors(&self) -> BTreeSet<PinColor> {
        viewport::distinct_colors(self.viewport.pins())
    }

    // Viewer

    pub fn viewer(&self) -> ViewerState {
        self.viewer
    }

    fn selected_image_count(&self) -> usize {
        self.selected_pin().map_or(0, |p| p.images.len())
    }

    pub fn open_viewer(&mut self) {
        let count = self.selected_image_count();
        self.viewer.open(count);
    }

    pub fn viewer_next(&mut self) {
        let count = self.selected_image_count();
        self.viewer.next(count);
    }

    pub fn viewer_prev(&mut self) {
        let count = self.selected_image_count();
        self.viewer.prev(count);
    }

    pub fn close_viewer(&mut self) {
        self.viewer.close();
    }

    /// Image currently shown by the viewer.
    pub fn viewer_image(&self) -> Option<&Annotation> {
        if !self.viewer.open {
            return None;
        }
        self.selected_pin()?.images.get(self.viewer.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::{storage_key, KeyValueStore, MemoryStore};

    fn session() -> (Session, MemoryStore) {
        let backend = MemoryStore::new();
        let session = Session::new(ProjectStore::new(backend.clone()));
        (session, backend)
    }

    fn stored(backend: &MemoryStore, name: &str) -> Option<ProjectData> {
        backend
            .get(&storage_key(name))
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    fn image(tag: &str) -> Annotation {
        Annotation::new(format!("data:image/png;base64,{}", tag))
    }

    #[test]
    fn test_unseen_project_loads_defaults() {
        let (mut session, _) = session();
        session.open_project("Trip");
        let snapshot = session.snapshot();
        assert!(snapshot.pins.is_empty());
        assert_eq!(snapshot.background_image, None);
        assert_eq!(snapshot.zoom, 1.0);
        assert_eq!(snapshot.offset, Point::ZERO);
    }

    #[test]
    fn test_switching_to_unseen_project_resets_state() {
        let (mut session, _) = session();
        session.open_project("Home");
        session.add_pin_at_center(800.0, 600.0);
        session.set_zoom(3.0);
        session.set_background(Some("data:image/png;base64,AAAA".to_string()));

        session.open_project("Trip");
        assert!(session.pins().is_empty());
        assert_eq!(session.background_image(), None);
        assert_eq!(session.viewport().zoom(), 1.0);

        session.open_project("Home");
        assert_eq!(session.pins().len(), 1);
        assert_eq!(session.viewport().zoom(), 3.0);
    }

    #[test]
    fn test_every_change_is_written_through() {
        let (mut session, backend) = session();
        session.open_project("Trip");

        let id = session.add_pin_at_center(800.0, 600.0);
        assert_eq!(stored(&backend, "Trip").unwrap().pins.len(), 1);

        session.set_pin_color(id, PinColor::Blue);
        assert_eq!(stored(&backend, "Trip").unwrap().pins[0].color, PinColor::Blue);

        session.set_zoom(2.5);
        assert_eq!(stored(&backend, "Trip").unwrap().zoom, 2.5);

        session.begin_pan_drag(Point::new(0.0, 0.0));
        session.update_pan_drag(Point::new(30.0, -5.0));
        session.end_pan_drag();
        assert_eq!(stored(&backend, "Trip").unwrap().offset, Point::new(30.0, -5.0));

        assert_eq!(stored(&backend, "Trip"), Some(session.snapshot()));
    }

    #[test]
    fn test_no_persistence_without_name() {
        let (mut session, backend) = session();
        session.add_pin_at_center(100.0, 100.0);
        session.set_zoom(4.0);
        assert!(backend.keys().unwrap().is_empty());
        assert_eq!(session.pins().len(), 1);
    }

    #[test]
    fn test_opening_does_not_overwrite_malformed_data() {
        let (mut session, mut backend) = session();
        backend.set(&storage_key("Broken"), "{oops").unwrap();
        session.open_project("Broken");
        assert!(session.pins().is_empty());
        assert_eq!(backend.get(&storage_key("Broken")).unwrap().as_deref(), Some("{oops"));
    }

    #[test]
    fn test_center_add_scenario() {
        let (mut session, _) = session();
        session.open_project("Trip");
        session.set_zoom(2.0);
        session.begin_pan_drag(Point::ZERO);
        session.update_pan_drag(Point::new(10.0, 10.0));
        session.end_pan_drag();

        let id = session.add_pin_at_center(800.0, 600.0);
        let pin = session.viewport().pin(id).unwrap();
        assert_eq!((pin.x, pin.y), (195.0, 145.0));
    }

    #[test]
    fn test_add_pin_assigns_fresh_ids() {
        let (mut session, _) = session();
        let mut ids = BTreeSet::new();
        for n in 1..=20 {
            let id = session.add_pin_at_center(100.0, 100.0);
            assert_eq!(session.pins().len(), n);
            assert!(ids.insert(id));
        }
    }

    #[test]
    fn test_ids_avoid_loaded_pins() {
        let mut backend = MemoryStore::new();
        let far_future = ProjectData {
            pins: vec![Pin::new(u64::MAX / 2, 0.0, 0.0)],
            ..Default::default()
        };
        backend
            .set(&storage_key("Trip"), &serde_json::to_string(&far_future).unwrap())
            .unwrap();
        let mut session = Session::new(ProjectStore::new(backend));
        session.open_project("Trip");
        let id = session.add_pin_at_center(10.0, 10.0);
        assert_eq!(id, u64::MAX / 2 + 1);
    }

    #[test]
    fn test_removing_selected_pin_clears_selection() {
        let (mut session, _) = session();
        let keep = session.add_pin_at_center(100.0, 100.0);
        let gone = session.add_pin_at_center(100.0, 100.0);

        session.select_pin(gone);
        assert!(session.remove_pin(gone));
        assert_eq!(session.selected(), None);

        session.select_pin(keep);
        assert!(!session.remove_pin(gone));
        assert_eq!(session.selected(), Some(keep));
    }

    #[test]
    fn test_attach_appends_in_order() {
        let (mut session, backend) = session();
        session.open_project("Trip");
        let id = session.add_pin_at_center(100.0, 100.0);

        assert_eq!(session.attach_images(id, vec![image("A")]), AttachOutcome::Appended(1));
        assert_eq!(
            session.attach_images(id, vec![image("B"), image("C")]),
            AttachOutcome::Appended(2)
        );

        let srcs: Vec<String> = stored(&backend, "Trip").unwrap().pins[0]
            .images
            .iter()
            .map(|i| i.src.clone())
            .collect();
        assert_eq!(
            srcs,
            vec![
                "data:image/png;base64,A".to_string(),
                "data:image/png;base64,B".to_string(),
                "data:image/png;base64,C".to_string(),
            ]
        );
    }

    #[test]
    fn test_attach_to_removed_pin_is_dropped() {
        let (mut session, _) = session();
        let id = session.add_pin_at_center(100.0, 100.0);
        session.remove_pin(id);
        assert_eq!(session.attach_images(id, vec![image("A")]), AttachOutcome::PinMissing);
        assert!(session.pins().is_empty());
    }

    #[test]
    fn test_captions_and_image_removal() {
        let (mut session, _) = session();
        let id = session.add_pin_at_center(100.0, 100.0);
        session.attach_images(id, vec![image("A"), image("B")]);

        assert!(session.set_image_text(id, 1, "bridge"));
        assert!(!session.set_image_text(id, 5, "nope"));
        assert_eq!(session.viewport().pin(id).unwrap().images[1].text, "bridge");

        assert!(session.remove_image(id, 0));
        let images = &session.viewport().pin(id).unwrap().images;
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].text, "bridge");
    }

    #[test]
    fn test_viewer_follows_selected_pin() {
        let (mut session, _) = session();
        let id = session.add_pin_at_center(100.0, 100.0);
        session.attach_images(id, vec![image("A"), image("B"), image("C")]);

        session.open_viewer();
        assert!(!session.viewer().open);

        session.select_pin(id);
        session.open_viewer();
        session.viewer_next();
        session.viewer_next();
        assert_eq!(session.viewer().index, 2);
        session.viewer_next();
        assert_eq!(session.viewer().index, 0);
        session.viewer_prev();
        assert_eq!(session.viewer_image().unwrap().src, "data:image/png;base64,C");

        session.remove_image(id, 2);
        assert_eq!(session.viewer().index, 1);

        session.remove_pin(id);
        assert!(!session.viewer().open);
        assert!(session.viewer_image().is_none());
    }

    #[test]
    fn test_filter_toggle_and_reset_on_open() {
        let (mut session, _) = session();
        session.open_project("Trip");
        let red = session.add_pin_at_center(100.0, 100.0);
        let blue = session.add_pin_at_center(100.0, 100.0);
        session.set_pin_color(blue, PinColor::Blue);

        assert_eq!(session.visible_pins().len(), 2);
        session.toggle_filter(PinColor::Blue);
        let visible: Vec<u64> = session.visible_pins().iter().map(|p| p.id).collect();
        assert_eq!(visible, vec![blue]);
        assert_eq!(session.pins().len(), 2);

        session.toggle_filter(PinColor::Blue);
        assert!(session.filter().is_empty());
        assert_eq!(
            session.distinct_colors(),
            BTreeSet::from([PinColor::Red, PinColor::Blue])
        );

        session.toggle_filter(PinColor::Red);
        session.select_pin(red);
        session.open_project("Trip");
        assert!(session.filter().is_empty());
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_pin_drag_persists_model_coordinates() {
        let (mut session, backend) = session();
        session.open_project("Trip");
        session.set_zoom(2.0);
        let id = session.add_pin_at_center(0.0, 0.0);

        assert!(session.begin_pin_drag(id));
        assert!(!session.begin_pan_drag(Point::ZERO));
        session.update_pin_drag(Point::new(50.0, 20.0));
        session.end_pin_drag();

        let pin = &stored(&backend, "Trip").unwrap().pins[0];
        assert_eq!((pin.x, pin.y), (25.0, 10.0));
        assert_eq!(session.drag(), DragState::Idle);
    }

    #[test]
    fn test_import_replaces_and_persists() {
        let (mut session, backend) = session();
        session.open_project("Trip");
        session.add_pin_at_center(100.0, 100.0);

        let imported = ProjectData {
            pins: vec![Pin::new(9, 1.0, 2.0), Pin::new(10, 3.0, 4.0)],
            background_image: Some("data:image/png;base64,AAAA".to_string()),
            zoom: 5.0,
            offset: Point::new(1.0, 1.0),
        };
        session.import_project(imported.clone());
        assert_eq!(session.snapshot(), imported);
        assert_eq!(stored(&backend, "Trip"), Some(imported));
    }

    #[test]
    fn test_list_projects_after_changes() {
        let (mut session, _) = session();
        session.open_project("Trip");
        session.add_pin_at_center(1.0, 1.0);
        session.open_project("Home");
        session.set_zoom(2.0);
        assert_eq!(session.list_projects(), vec!["Home".to_string(), "Trip".to_string()]);
    }

    #[test]
    fn test_loads_for_a_previous_project_are_dropped() {
        let (mut session, backend) = session();
        session.open_project("Home");
        let pin = session.add_pin_at_center(100.0, 100.0);
        let generation = session.generation();

        session.open_project("Trip");
        assert!(!session.finish_background_load(generation, image("BG").src));
        assert_eq!(
            session.finish_attach(generation, pin, vec![image("A")]),
            AttachOutcome::Stale
        );
        assert!(!session.finish_import(generation, ProjectData::default()));
        assert_eq!(session.background_image(), None);
        assert_eq!(stored(&backend, "Trip"), None);

        session.open_project("Home");
        assert_eq!(session.background_image(), None);
        assert!(session.viewport().pin(pin).unwrap().images.is_empty());
    }

    #[test]
    fn test_loads_for_the_open_project_apply() {
        let (mut session, backend) = session();
        session.open_project("Home");
        let pin = session.add_pin_at_center(100.0, 100.0);
        let generation = session.generation();

        session.set_zoom(2.0);
        assert!(session.finish_background_load(generation, image("BG").src));
        assert_eq!(
            session.finish_attach(generation, pin, vec![image("A")]),
            AttachOutcome::Appended(1)
        );
        let saved = stored(&backend, "Home").unwrap();
        assert_eq!(saved.background_image, Some(image("BG").src));
        assert_eq!(saved.pins[0].images.len(), 1);
    }

    #[test]
    fn test_import_invalidates_pending_loads() {
        let (mut session, _) = session();
        session.open_project("Home");
        let generation = session.generation();
        assert!(session.finish_import(generation, ProjectData::default()));
        assert!(!session.finish_background_load(generation, image("BG").src));
        assert_eq!(session.background_image(), None);
    }

    #[test]
    fn test_ids_fall_back_when_exhausted() {
        let mut backend = MemoryStore::new();
        let full = ProjectData {
            pins: vec![Pin::new(u64::MAX, 0.0, 0.0), Pin::new(1, 0.0, 0.0)],
            ..Default::default()
        };
        backend
            .set(&storage_key("Trip"), &serde_json::to_string(&full).unwrap())
            .unwrap();
        let mut session = Session::new(ProjectStore::new(backend));
        session.open_project("Trip");

        assert_eq!(session.add_pin_at_center(10.0, 10.0), 2);
        assert_eq!(session.add_pin_at_center(10.0, 10.0), 3);
        let ids: BTreeSet<u64> = session.pins().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), session.pins().len());
    }

    #[test]
    fn test_listing_changes_on_open_and_first_save() {
        let (mut session, _) = session();
        assert!(session.take_listing_changed());
        assert!(!session.take_listing_changed());

        session.open_project("Trip");
        assert!(session.take_listing_changed());
        session.set_zoom(2.0);
        assert!(session.take_listing_changed());
        session.set_zoom(3.0);
        session.add_pin_at_center(10.0, 10.0);
        assert!(!session.take_listing_changed());

        session.open_project("Trip");
        assert!(session.take_listing_changed());
        session.set_zoom(4.0);
        assert!(!session.take_listing_changed());

        session.import_project(ProjectData::default());
        assert!(session.take_listing_changed());
    }
}
