// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pixel compositing helpers.
//!
//! This module scales decoded images into background images, blends
//! pixels, and flattens transparent renders for formats without alpha.

use crate::error::{EditorError, EditorResult};
use crate::models::layer::BackgroundImage;
use crate::models::text::TextColor;
use crate::util::geometry::fit_placement;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

/// Scale a decoded image to fit the canvas and wrap it as a background.
pub fn fit_background(
    image: &DynamicImage,
    canvas_width: u32,
    canvas_height: u32,
) -> EditorResult<BackgroundImage> {
    let (width, height) = (image.width(), image.height());
    let placement = fit_placement(canvas_width, canvas_height, width, height)
        .ok_or(EditorError::EmptyImage)?;

    let rgba = image.to_rgba8();
    let pixels = if (placement.width, placement.height) == (width, height) {
        rgba
    } else {
        imageops::resize(&rgba, placement.width, placement.height, FilterType::Triangle)
    };

    log::debug!(
        "Fitted {}x{} image at scale {:.4} -> {}x{} at ({:.1}, {:.1})",
        width,
        height,
        placement.scale,
        placement.width,
        placement.height,
        placement.offset.x,
        placement.offset.y
    );

    Ok(BackgroundImage::new((width, height), placement, pixels))
}

/// Paint a background image onto the target at its placement.
pub fn draw_background(target: &mut RgbaImage, background: &BackgroundImage) {
    let offset = background.placement.offset;
    imageops::overlay(
        target,
        &background.pixels,
        offset.x.round() as i64,
        offset.y.round() as i64,
    );
}

/// Blend a non-premultiplied source color over a destination pixel.
pub fn blend_pixel(dst: &mut Rgba<u8>, src: [u8; 4]) {
    let src_a = src[3] as f32 / 255.0;
    if src_a <= 0.0 {
        return;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    for i in 0..3 {
        let s = src[i] as f32 / 255.0;
        let d = dst[i] as f32 / 255.0;
        let c = (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
        dst[i] = (c * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Flatten an RGBA image onto an opaque matte color.
pub fn flatten(image: &RgbaImage, matte: TextColor) -> RgbImage {
    let mut out = RgbImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let mut px = Rgba(matte.to_rgba());
        blend_pixel(&mut px, pixel.0);
        out.put_pixel(x, y, Rgb([px[0], px[1], px[2]]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    #[test]
    fn test_fit_background_scales_down() {
        let bg = fit_background(&solid(1600, 1200, [10, 20, 30, 255]), 800, 600).unwrap();
        assert_eq!(bg.source_size, (1600, 1200));
        assert_eq!(bg.placement.scale, 0.5);
        assert_eq!(bg.pixels.dimensions(), (800, 600));
        assert_eq!(bg.pixels.get_pixel(400, 300).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_fit_background_letterbox() {
        let bg = fit_background(&solid(400, 100, [255, 0, 0, 255]), 800, 600).unwrap();
        assert_eq!(bg.pixels.dimensions(), (800, 200));

        let mut target = RgbaImage::new(800, 600);
        draw_background(&mut target, &bg);
        assert_eq!(target.get_pixel(400, 100).0[3], 0);
        assert_eq!(target.get_pixel(400, 300).0, [255, 0, 0, 255]);
        assert_eq!(target.get_pixel(400, 550).0[3], 0);
    }

    #[test]
    fn test_fit_background_rejects_empty() {
        let result = fit_background(&solid(0, 0, [0, 0, 0, 0]), 800, 600);
        assert!(matches!(result, Err(EditorError::EmptyImage)));
    }

    #[test]
    fn test_blend_opaque_and_transparent() {
        let mut px = Rgba([0, 0, 255, 255]);
        blend_pixel(&mut px, [255, 0, 0, 0]);
        assert_eq!(px.0, [0, 0, 255, 255]);

        blend_pixel(&mut px, [255, 0, 0, 255]);
        assert_eq!(px.0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_blend_half_alpha() {
        let mut px = Rgba([0, 0, 0, 255]);
        blend_pixel(&mut px, [255, 255, 255, 128]);
        assert_eq!(px.0[3], 255);
        assert!((127..=129).contains(&px.0[0]));
    }

    #[test]
    fn test_flatten_uses_matte() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(1, 0, Rgba([1, 2, 3, 255]));
        let flat = flatten(&image, TextColor::new(255, 255, 255));
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(flat.get_pixel(1, 0).0, [1, 2, 3]);
    }
}
