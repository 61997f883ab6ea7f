// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for media, project storage and export files.

pub mod media;
pub mod serialization;
pub mod storage;
