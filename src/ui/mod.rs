// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the MapPins application.

pub mod canvas;
pub mod filter;
pub mod properties;
pub mod textures;
pub mod toolbar;
pub mod viewer;
