// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Exporting the rendered canvas as PNG or JPEG.

use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::models::text::TextColor;
use crate::render::compose::flatten;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    /// File extension, also used as the format selector.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
        }
    }
}

/// Export settings taken from the editor configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub file_stem: String,
    pub jpeg_quality: f32,
    pub jpeg_matte: TextColor,
}

impl ExportSettings {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            file_stem: config.export_file_stem.clone(),
            jpeg_quality: config.jpeg_quality,
            jpeg_matte: config.jpeg_matte,
        }
    }

    /// Requested encoder quality: the JPEG setting, or 1.0 for lossless PNG.
    pub fn quality(&self, format: ExportFormat) -> f32 {
        match format {
            ExportFormat::Png => 1.0,
            ExportFormat::Jpeg => self.jpeg_quality,
        }
    }

    pub fn file_name(&self, format: ExportFormat) -> String {
        format!("{}.{}", self.file_stem, format.extension())
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

/// An encoded image ready to be saved.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub format: ExportFormat,
    pub file_name: String,
    pub quality: f32,
    pub bytes: Vec<u8>,
}

/// Encode a rendered canvas in the requested format.
pub fn encode(
    image: &RgbaImage,
    format: ExportFormat,
    settings: &ExportSettings,
) -> EditorResult<EncodedImage> {
    let quality = settings.quality(format);
    let mut bytes = Vec::new();

    match format {
        ExportFormat::Png => {
            let encoder =
                PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, FilterType::Adaptive);
            image.write_with_encoder(encoder).map_err(EditorError::Encode)?;
        }
        ExportFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut bytes, jpeg_quality_percent(quality));
            flatten(image, settings.jpeg_matte)
                .write_with_encoder(encoder)
                .map_err(EditorError::Encode)?;
        }
    }

    log::debug!(
        "Encoded {}x{} canvas as {} ({} bytes, quality {})",
        image.width(),
        image.height(),
        format.label(),
        bytes.len(),
        quality
    );

    Ok(EncodedImage {
        format,
        file_name: settings.file_name(format),
        quality,
        bytes,
    })
}

/// Map a (0, 1] quality to the encoder's 1..=100 scale.
fn jpeg_quality_percent(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Write an encoded image to disk.
pub fn save(encoded: &EncodedImage, path: &Path) -> EditorResult<()> {
    std::fs::write(path, &encoded.bytes)?;
    log::info!(
        "Saved {} to {} as {} ({} bytes, quality {})",
        encoded.file_name,
        path.display(),
        encoded.format.label(),
        encoded.bytes.len(),
        encoded.quality
    );
    Ok(())
}
