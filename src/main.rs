// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image Text Editor
//!
//! A desktop application for placing editable text over an image and
//! exporting the result as PNG or JPEG.

mod app;
mod config;
mod error;
mod io;
mod models;
mod render;
mod surface;
mod ui;
mod util;

use anyhow::Result;
use app::EditorApp;
use config::EditorConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = EditorConfig::discover(&std::env::current_dir()?);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 780.0])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true)
            .with_title("Image Editor"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Image Editor",
        options,
        Box::new(move |_cc| Ok(Box::new(EditorApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
