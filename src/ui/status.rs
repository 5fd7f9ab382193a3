// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Status bar and blocking alert.

use crate::error::EditorError;

const INVALID_FILE_MESSAGE: &str = "Please upload a valid image file.";

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Message shown in the status bar until replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

/// How an error is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Blocking alert window
    Alert(String),
    Status(Status),
}

/// Choose how to surface an error.
///
/// Rejected file types get the alert; everything else lands in the status bar.
pub fn notice_for(error: &EditorError) -> Notice {
    match error {
        EditorError::InvalidFileType { .. } => Notice::Alert(INVALID_FILE_MESSAGE.to_string()),
        _ => Notice::Status(Status::error(error.to_string())),
    }
}

/// Display the status bar.
pub fn show_status_bar(ui: &mut egui::Ui, status: Option<&Status>, busy: Option<&str>) {
    ui.horizontal(|ui| {
        if let Some(message) = busy {
            ui.spinner();
            ui.label(message);
            ui.separator();
        }

        match status {
            Some(Status { kind: StatusKind::Error, message }) => {
                ui.colored_label(egui::Color32::from_rgb(230, 80, 80), format!("⚠ {}", message));
            }
            Some(Status { kind: StatusKind::Info, message }) => {
                ui.label(message);
            }
            None => {
                ui.label(egui::RichText::new("Ready").weak());
            }
        }
    });
}

/// Display a modal-style alert. Clears `alert` when dismissed.
pub fn show_alert(ctx: &egui::Context, alert: &mut Option<String>) {
    let Some(message) = alert.as_deref() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new("Invalid file")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                dismissed = true;
            }
        });

    if dismissed {
        *alert = None;
    }
}
