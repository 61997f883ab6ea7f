// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image annotations attached to pins.

use serde::{Deserialize, Serialize};

/// An embedded image with a caption.
///
/// `src` is always a self-contained data URL; no external file reference is
/// kept once the image has been attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(alias = "url")]
    pub src: String,
    #[serde(default)]
    pub text: String,
}

impl Annotation {
    /// Create an annotation with an empty caption.
    pub fn new(src: String) -> Self {
        Self {
            src,
            text: String::new(),
        }
    }
}
