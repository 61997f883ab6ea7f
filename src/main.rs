// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! MapPins - pins, photos and notes on a map image
//!
//! A cross-platform desktop application for dropping colored pins on a
//! pannable, zoomable background image and attaching images and captions to
//! each pin. Every change is saved to a per-project store as it happens.

mod app;
mod config;
mod io;
mod models;
mod session;
mod ui;
mod util;

use anyhow::Result;
use app::MapPinsApp;
use config::AppConfig;
use io::storage::{FileStore, MemoryStore, ProjectStore};
use session::Session;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = AppConfig::from_env();
    let store = match FileStore::open(&config.data_dir) {
        Ok(store) => {
            log::info!("Storing projects in {}", store.dir().display());
            ProjectStore::new(store)
        }
        Err(e) => {
            log::error!("{}; projects will not survive a restart", e);
            ProjectStore::new(MemoryStore::new())
        }
    };

    let mut session = Session::new(store);
    if let Some(name) = &config.initial_project {
        session.open_project(name);
    }

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("MapPins"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "MapPins",
        options,
        Box::new(|_cc| Ok(Box::new(MapPinsApp::new(session)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
