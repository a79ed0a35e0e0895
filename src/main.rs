// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Swing Compare
//!
//! A cross-platform desktop application for comparing a user's swing clip
//! against a reference clip, played in sync side by side or overlaid with
//! adjustable transparency and a swing-plane guide.

mod app;
mod config;
mod guides;
mod io;
mod models;
mod sync;
mod ui;

use anyhow::Result;
use app::CompareApp;
use config::Settings;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Optional settings file as the first argument
    let settings_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let settings = Settings::load_startup(settings_path)?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Swing Compare"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Swing Compare",
        options,
        Box::new(move |_cc| Ok(Box::new(CompareApp::new(settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
