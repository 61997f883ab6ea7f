// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project data serialization and deserialization.
//!
//! This module handles exporting and importing project snapshots as YAML
//! and JSON files, independent of the project store.

use crate::models::project::ProjectData;
use anyhow::{bail, Result};
use std::path::Path;

/// Export file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            other => bail!("Unsupported file extension: {:?}", other),
        }
    }
}

/// Export project data to the format implied by the path's extension.
pub fn export(data: &ProjectData, path: &Path) -> Result<()> {
    match Format::from_path(path)? {
        Format::Json => export_json(data, path),
        Format::Yaml => export_yaml(data, path),
    }
}

/// Import project data from the format implied by the path's extension.
pub fn import(path: &Path) -> Result<ProjectData> {
    match Format::from_path(path)? {
        Format::Json => import_json(path),
        Format::Yaml => import_yaml(path),
    }
}

/// Export project data to YAML format.
pub fn export_yaml(data: &ProjectData, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export project data to JSON format.
pub fn export_json(data: &ProjectData, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import project data from YAML format.
pub fn import_yaml(path: &Path) -> Result<ProjectData> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import project data from JSON format.
pub fn import_json(path: &Path) -> Result<ProjectData> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}
