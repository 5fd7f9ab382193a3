// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Text properties panel.
//!
//! This module provides the form for editing the overlay's text content,
//! font size, color and font family. It only ever sees primitive values;
//! edits are reported back as a [`PropertyEdit`].

use crate::models::session::PropertyEdit;
use crate::models::text::{FontFamily, TextColor, TextProperties};

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    Edit(PropertyEdit),
}

/// Display the properties panel.
pub fn show(
    ui: &mut egui::Ui,
    props: &TextProperties,
    font_size_input: &str,
    has_text_layer: bool,
) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Text");
    ui.separator();

    egui::Grid::new("text_properties")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label("Text:");
            let mut text = props.text.clone();
            if ui.text_edit_singleline(&mut text).changed() {
                action = PropertiesAction::Edit(PropertyEdit::Text(text));
            }
            ui.end_row();

            ui.label("Font Size:");
            let mut raw = font_size_input.to_string();
            let response = ui.add(egui::TextEdit::singleline(&mut raw).desired_width(60.0));
            if response.changed() {
                action = PropertiesAction::Edit(PropertyEdit::FontSize(raw));
            }
            ui.end_row();

            ui.label("Font Color:");
            let mut rgb = [props.color.r, props.color.g, props.color.b];
            ui.horizontal(|ui| {
                if ui.color_edit_button_srgb(&mut rgb).changed() {
                    let [r, g, b] = rgb;
                    action = PropertiesAction::Edit(PropertyEdit::Color(TextColor::new(r, g, b)));
                }
                ui.monospace(props.color.to_string());
            });
            ui.end_row();

            ui.label("Font Family:");
            let mut family = props.font_family;
            egui::ComboBox::from_id_source("font_family")
                .selected_text(family.name())
                .show_ui(ui, |ui| {
                    for option in FontFamily::ALL {
                        ui.selectable_value(&mut family, option, option.name());
                    }
                });
            if family != props.font_family {
                action = PropertiesAction::Edit(PropertyEdit::FontFamily(family));
            }
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.label(
        egui::RichText::new(format!("Effective size: {} px", props.font_size))
            .small()
            .weak(),
    );

    if !has_text_layer {
        ui.add_space(16.0);
        ui.label(
            egui::RichText::new("Changes apply once an image is uploaded.")
                .italics()
                .weak(),
        );
    }

    action
}
