// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: pins, their image annotations, the viewport and the
//! persisted project snapshot.

pub mod annotation;
pub mod pin;
pub mod project;
pub mod viewer;
pub mod viewport;
