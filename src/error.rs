// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Please upload a valid image file (got {mime})")]
    InvalidFileType { mime: String },

    #[error("Canvas is not ready yet")]
    SurfaceNotReady,

    #[error("Canvas has been disposed")]
    SurfaceDisposed,

    #[error("Nothing to export: upload an image first")]
    NothingToExport,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Image has zero width or height")]
    EmptyImage,

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type EditorResult<T> = Result<T, EditorError>;
