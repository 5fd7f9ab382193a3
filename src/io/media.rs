// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Uploaded image files.
//!
//! This module reads a picked or dropped file, determines its MIME type,
//! rejects anything that is not an image, and decodes the rest.

use crate::error::{EditorError, EditorResult};
use image::{DynamicImage, ImageFormat};
use std::path::Path;

/// Extensions offered in the open dialog's image filter.
pub const IMAGE_EXTENSIONS: [&str; 9] = ["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "ico"];

const UNKNOWN_MIME: &str = "application/octet-stream";

/// A raw file handed over by the file picker.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Wrap in-memory bytes, sniffing the MIME type.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = sniff_mime(&bytes, Path::new(&name));
        Self { name, mime, bytes }
    }

    /// Read a file from disk, sniffing the MIME type.
    pub fn read(path: &Path) -> EditorResult<Self> {
        let bytes = std::fs::read(path)?;
        let mime = sniff_mime(&bytes, path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, mime, bytes })
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    /// Reject files whose MIME type is not `image/*`.
    pub fn validate(&self) -> EditorResult<()> {
        if self.is_image() {
            Ok(())
        } else {
            Err(EditorError::InvalidFileType {
                mime: self.mime.clone(),
            })
        }
    }

    /// Validate and decode the file.
    pub fn decode(&self) -> EditorResult<DynamicImage> {
        self.validate()?;
        image::load_from_memory(&self.bytes).map_err(EditorError::Decode)
    }
}

/// Determine a MIME type from content, falling back to the file extension.
pub fn sniff_mime(bytes: &[u8], path: &Path) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| UNKNOWN_MIME.to_string())
}
