// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading.
//!
//! Image files are read fully into memory and embedded as base64 data URLs
//! before they enter the model. For display, data URLs are decoded back into
//! RGBA pixels suitable for egui textures.

use crate::models::annotation::Annotation;
use anyhow::{anyhow, bail, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use std::path::{Path, PathBuf};

/// Decoded RGBA image ready for upload as a texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Read an image file and embed it as a `data:<mime>;base64,...` URL.
pub fn read_data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    encode_data_url(&bytes).with_context(|| format!("Unsupported image file {}", path.display()))
}

/// Files read for one attachment request.
#[derive(Debug, Default)]
pub struct AttachmentBatch {
    /// Readable files, in selection order
    pub images: Vec<Annotation>,
    /// One message per file that could not be read
    pub failures: Vec<String>,
}

/// Read every selected file. A failed file is skipped; the rest keep their order.
pub fn read_attachments(paths: &[PathBuf]) -> AttachmentBatch {
    let mut batch = AttachmentBatch {
        images: Vec::with_capacity(paths.len()),
        failures: Vec::new(),
    };
    for path in paths {
        match read_data_url(path) {
            Ok(data_url) => batch.images.push(Annotation::new(data_url)),
            Err(e) => batch.failures.push(format!("{:#}", e)),
        }
    }
    batch
}

/// Embed raw image bytes as a data URL. The mime type comes from the sniffed format.
pub fn encode_data_url(bytes: &[u8]) -> Result<String> {
    let format = image::guess_format(bytes)?;
    let payload = general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", format.to_mime_type(), payload))
}

/// Extract the raw bytes from a base64 data URL.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| anyhow!("Not a data URL"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| anyhow!("Data URL has no payload"))?;
    if !header.ends_with(";base64") {
        bail!("Only base64 data URLs are supported");
    }
    Ok(general_purpose::STANDARD.decode(payload.trim())?)
}

/// Decode a data URL into RGBA pixels.
pub fn load_data_url(url: &str) -> Result<LoadedImage> {
    let bytes = decode_data_url(url)?;
    let img = image::load_from_memory(&bytes)?.to_rgba8();
    Ok(LoadedImage {
        width: img.width(),
        height: img.height(),
        pixels: img.into_raw(),
    })
}
