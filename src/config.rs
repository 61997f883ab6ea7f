// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Defaults can be overridden through environment variables.

use std::path::PathBuf;

/// Directory holding one JSON file per project.
pub const DATA_DIR_VAR: &str = "MAPPINS_DATA_DIR";
/// Project opened at startup.
pub const PROJECT_VAR: &str = "MAPPINS_PROJECT";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub initial_project: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("mappins-data"),
            initial_project: None,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        config.initial_project = lookup(PROJECT_VAR).filter(|v| !v.is_empty());
        config
    }
}
