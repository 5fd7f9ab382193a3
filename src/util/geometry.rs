// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the image-fit scaling rule used when an image is
//! placed on the canvas, and coordinate transformations between canvas
//! pixels and normalized (0.0 to 1.0) coordinates used by the preview.

use crate::models::layer::Point;

/// Where a scaled image sits on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Uniform scale factor applied to both axes
    pub scale: f64,
    /// Top-left corner of the scaled image in canvas pixels
    pub offset: Point,
    /// Scaled width in canvas pixels (rounded, at least 1)
    pub width: u32,
    /// Scaled height in canvas pixels (rounded, at least 1)
    pub height: u32,
}

/// Compute the uniform scale factor that fits an image to the canvas.
///
/// When the canvas aspect ratio is greater than or equal to the image's, the
/// image is scaled to the canvas height; otherwise to the canvas width.
/// Returns `None` if any dimension is zero.
pub fn fit_scale_factor(
    canvas_width: u32,
    canvas_height: u32,
    image_width: u32,
    image_height: u32,
) -> Option<f64> {
    if canvas_width == 0 || canvas_height == 0 || image_width == 0 || image_height == 0 {
        return None;
    }

    let canvas_aspect = canvas_width as f64 / canvas_height as f64;
    let img_aspect = image_width as f64 / image_height as f64;

    let scale = if canvas_aspect >= img_aspect {
        canvas_height as f64 / image_height as f64
    } else {
        canvas_width as f64 / image_width as f64
    };

    Some(scale)
}

/// Compute the scale and centered placement of an image on the canvas.
pub fn fit_placement(
    canvas_width: u32,
    canvas_height: u32,
    image_width: u32,
    image_height: u32,
) -> Option<Placement> {
    let scale = fit_scale_factor(canvas_width, canvas_height, image_width, image_height)?;

    let width = ((image_width as f64 * scale).round() as u32).max(1);
    let height = ((image_height as f64 * scale).round() as u32).max(1);

    Some(Placement {
        scale,
        offset: Point {
            x: (canvas_width as f64 - width as f64) / 2.0,
            y: (canvas_height as f64 - height as f64) / 2.0,
        },
        width,
        height,
    })
}

/// Convert pixel coordinates to normalized coordinates (0.0 to 1.0).
pub fn normalize_coordinates(pixel_x: f64, pixel_y: f64, width: u32, height: u32) -> Point {
    Point {
        x: pixel_x / width as f64,
        y: pixel_y / height as f64,
    }
}

/// Convert normalized coordinates to pixel coordinates.
pub fn denormalize_coordinates(point: &Point, width: u32, height: u32) -> (f64, f64) {
    (point.x * width as f64, point.y * height as f64)
}
