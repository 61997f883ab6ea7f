// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Texture cache for embedded images.
//!
//! Data URLs are decoded once and kept as GPU textures for as long as some
//! part of the UI keeps asking for them or [`TextureCache::keep`]s them.
//! Entries not requested during a frame are dropped by [`TextureCache::prune`].

use crate::io::media;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

#[derive(Default)]
pub struct TextureCache {
    /// `None` marks a data URL that failed to decode, so it is not retried every frame.
    entries: HashMap<u64, Option<egui::TextureHandle>>,
    used: HashSet<u64>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for a data URL, decoding it on first use.
    pub fn get(&mut self, ctx: &egui::Context, data_url: &str) -> Option<egui::TextureHandle> {
        let key = cache_key(data_url);
        self.used.insert(key);
        self.entries
            .entry(key)
            .or_insert_with(|| match media::load_data_url(data_url) {
                Ok(img) => {
                    let size = [img.width as usize, img.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &img.pixels);
                    Some(ctx.load_texture(
                        format!("image-{:016x}", key),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ))
                }
                Err(e) => {
                    log::warn!("Failed to decode embedded image: {}", e);
                    None
                }
            })
            .clone()
    }

    /// Mark a data URL as in use without decoding it, so a texture hidden
    /// this frame survives the next prune.
    pub fn keep(&mut self, data_url: &str) {
        self.used.insert(cache_key(data_url));
    }

    /// Drop textures nobody asked for since the last prune.
    pub fn prune(&mut self) {
        let used = std::mem::take(&mut self.used);
        self.entries.retain(|key, _| used.contains(key));
    }
}

const SAMPLE_LEN: usize = 64;
const SAMPLES: usize = 4;

/// Cache key from the length and a few evenly spaced windows of the URL.
///
/// Data URLs run to megabytes and are looked up every frame, so only a
/// bounded sample is hashed.
fn cache_key(data_url: &str) -> u64 {
    let bytes = data_url.as_bytes();
    let mut hasher = DefaultHasher::new();
    bytes.len().hash(&mut hasher);
    if bytes.len() <= SAMPLE_LEN * SAMPLES {
        bytes.hash(&mut hasher);
    } else {
        let stride = (bytes.len() - SAMPLE_LEN) / (SAMPLES - 1);
        for i in 0..SAMPLES - 1 {
            let start = i * stride;
            bytes[start..start + SAMPLE_LEN].hash(&mut hasher);
        }
        bytes[bytes.len() - SAMPLE_LEN..].hash(&mut hasher);
    }
    hasher.finish()
}
