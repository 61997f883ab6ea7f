// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Map viewport: pins plus the pan/zoom transform.
//!
//! Pins are stored in model space. Pointer input arrives in screen space
//! (relative to the map container) and is mapped back through the current
//! offset and zoom before it touches a pin.

use super::pin::{Pin, PinColor, PinPatch};
use crate::util::geometry::{screen_to_model, Point};
use std::collections::BTreeSet;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 15.0;
/// Multiplicative step for the View menu zoom actions.
pub const ZOOM_STEP: f64 = 1.25;

/// Active pointer drag. At most one drag exists at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Pin { id: u64 },
    Pan { start: Point, offset_at_start: Point },
}

/// Owns the pins and the view transform of the open project.
#[derive(Debug, Clone)]
pub struct MapViewport {
    pins: Vec<Pin>,
    zoom: f64,
    offset: Point,
    drag: DragState,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self::new(Vec::new(), MIN_ZOOM, Point::ZERO)
    }
}

impl MapViewport {
    pub fn new(pins: Vec<Pin>, zoom: f64, offset: Point) -> Self {
        let mut viewport = Self {
            pins,
            zoom: MIN_ZOOM,
            offset,
            drag: DragState::Idle,
        };
        viewport.set_zoom(zoom);
        viewport
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn pin(&self, id: u64) -> Option<&Pin> {
        self.pins.iter().find(|p| p.id == id)
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Set the zoom level, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    ///
    /// Non-finite values are ignored. Returns whether the zoom changed.
    pub fn set_zoom(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let zoom = value.clamp(MIN_ZOOM, MAX_ZOOM);
        if zoom == self.zoom {
            return false;
        }
        self.zoom = zoom;
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom * ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom / ZOOM_STEP)
    }

    /// Back to zoom 1 with no pan.
    pub fn reset_view(&mut self) -> bool {
        let changed = self.set_zoom(MIN_ZOOM) | (self.offset != Point::ZERO);
        self.offset = Point::ZERO;
        changed
    }

    /// Map a screen-space point into model space under the current view.
    pub fn to_model(&self, screen: Point) -> Point {
        screen_to_model(screen, self.offset, self.zoom)
    }

    /// Insert a pin at the model-space point under the container's center.
    pub fn add_pin_at_center(&mut self, container_width: f64, container_height: f64, id: u64) -> &Pin {
        let center = self.to_model(Point::new(container_width / 2.0, container_height / 2.0));
        self.pins.push(Pin::new(id, center.x, center.y));
        log::debug!("Added pin {} at ({:.2}, {:.2})", id, center.x, center.y);
        &self.pins[self.pins.len() - 1]
    }

    /// Merge a patch into the pin with the given id. Returns whether anything changed.
    pub fn update_pin(&mut self, id: u64, patch: PinPatch) -> bool {
        match self.pins.iter_mut().find(|p| p.id == id) {
            Some(pin) => pin.apply(patch),
            None => false,
        }
    }

    /// Remove a pin and its images. A drag on the removed pin is cancelled.
    pub fn remove_pin(&mut self, id: u64) -> Option<Pin> {
        let index = self.pins.iter().position(|p| p.id == id)?;
        if self.drag == (DragState::Pin { id }) {
            self.drag = DragState::Idle;
        }
        Some(self.pins.remove(index))
    }

    /// Start dragging a pin. Rejected while another drag is active or if the pin is unknown.
    pub fn begin_pin_drag(&mut self, id: u64) -> bool {
        if self.drag != DragState::Idle || self.pin(id).is_none() {
            return false;
        }
        self.drag = DragState::Pin { id };
        true
    }

    /// Move the dragged pin under the pointer. Returns whether the pin moved.
    pub fn update_pin_drag(&mut self, screen: Point) -> bool {
        let DragState::Pin { id } = self.drag else {
            return false;
        };
        let model = self.to_model(screen);
        self.update_pin(id, PinPatch::position(model.x, model.y))
    }

    pub fn end_pin_drag(&mut self) {
        if matches!(self.drag, DragState::Pin { .. }) {
            self.drag = DragState::Idle;
        }
    }

    /// Start panning from a screen point. Rejected while another drag is active.
    pub fn begin_pan_drag(&mut self, screen: Point) -> bool {
        if self.drag != DragState::Idle {
            return false;
        }
        self.drag = DragState::Pan {
            start: screen,
            offset_at_start: self.offset,
        };
        true
    }

    /// Pan by the pointer delta since the drag started. Returns whether the offset moved.
    pub fn update_pan_drag(&mut self, screen: Point) -> bool {
        let DragState::Pan { start, offset_at_start } = self.drag else {
            return false;
        };
        let offset = Point::new(
            offset_at_start.x + (screen.x - start.x),
            offset_at_start.y + (screen.y - start.y),
        );
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        true
    }

    pub fn end_pan_drag(&mut self) {
        if matches!(self.drag, DragState::Pan { .. }) {
            self.drag = DragState::Idle;
        }
    }
}

/// Pin edge length in model units at the given zoom.
///
/// Pins shrink to a third of their base size as soon as zoom exceeds 1.
pub fn pin_render_size(zoom: f64) -> f64 {
    let base = (14.0 / zoom).max(6.0);
    if zoom > 1.0 {
        base / 3.0
    } else {
        base
    }
}

/// Pins whose color is in `filter`, or every pin when the filter is empty.
pub fn visible_pins<'a>(pins: &'a [Pin], filter: &BTreeSet<PinColor>) -> Vec<&'a Pin> {
    pins.iter()
        .filter(|p| filter.is_empty() || filter.contains(&p.color))
        .collect()
}

/// Colors used by at least one pin.
pub fn distinct_colors(pins: &[Pin]) -> BTreeSet<PinColor> {
    pins.iter().map(|p| p.color).collect()
}
