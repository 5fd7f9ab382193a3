// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with upload and download buttons.

use crate::io::export::ExportFormat;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    OpenImage,
    Export(ExportFormat),
}

/// Display the toolbar.
///
/// `can_export` disables the download buttons until an image is on the canvas.
pub fn show(ui: &mut egui::Ui, can_upload: bool, can_export: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui
            .add_enabled(can_upload, egui::Button::new("📂 Upload Image..."))
            .clicked()
        {
            action = ToolbarAction::OpenImage;
        }

        ui.separator();

        for format in [ExportFormat::Png, ExportFormat::Jpeg] {
            let label = format!("💾 Download {}", format.label());
            if ui.add_enabled(can_export, egui::Button::new(label)).clicked() {
                action = ToolbarAction::Export(format);
            }
        }

        ui.separator();

        let hint = if can_export {
            "Drag the text to move it, edit it in the properties panel"
        } else {
            "Upload or drop an image to begin"
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
