// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate transforms between screen space
//! (pointer positions relative to the map container) and model space
//! (positions on the unscaled, untranslated background image).

use serde::{Deserialize, Serialize};

/// A 2D point or offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Convert a screen-space point to model space for the given view transform.
pub fn screen_to_model(screen: Point, offset: Point, zoom: f64) -> Point {
    Point {
        x: (screen.x - offset.x) / zoom,
        y: (screen.y - offset.y) / zoom,
    }
}

/// Convert a model-space point to screen space for the given view transform.
pub fn model_to_screen(model: Point, offset: Point, zoom: f64) -> Point {
    Point {
        x: model.x * zoom + offset.x,
        y: model.y * zoom + offset.y,
    }
}
