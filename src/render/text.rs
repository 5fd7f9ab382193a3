// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Text shaping and rasterization using cosmic-text.

use super::compose::blend_pixel;
use crate::models::layer::{Point, Rect, TextLayer};
use crate::models::text::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use cosmic_text::{Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache};
use image::RgbaImage;

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.16;

/// Shapes and draws text layers. Owns the loaded font database.
pub struct TextRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl TextRasterizer {
    /// Create a rasterizer backed by the fonts installed on this system.
    ///
    /// Scanning system fonts is slow; call this off the UI thread.
    pub fn with_system_fonts() -> Self {
        let font_system = FontSystem::new();
        log::info!("Loaded {} font faces", font_system.db().len());
        Self::from_font_system(font_system)
    }

    /// Create a rasterizer from an explicit font database.
    #[cfg(test)]
    pub fn with_font_db(db: cosmic_text::fontdb::Database) -> Self {
        Self::from_font_system(FontSystem::new_with_locale_and_db("en".to_string(), db))
    }

    fn from_font_system(font_system: FontSystem) -> Self {
        Self {
            font_system,
            swash_cache: SwashCache::new(),
        }
    }

    fn shape(&mut self, layer: &TextLayer) -> Buffer {
        let size = font_px(layer) as f32;
        let metrics = Metrics::new(size, size * LINE_HEIGHT);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);

        let attrs = Attrs::new().family(Family::Name(layer.font_family.name()));
        buffer.set_text(&mut self.font_system, &layer.text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    /// Bounding box of a text layer in canvas pixels.
    ///
    /// Layers whose glyphs cannot be shaped still get a box one line tall so
    /// they stay selectable.
    pub fn bounds(&mut self, layer: &TextLayer) -> Rect {
        let buffer = self.shape(layer);
        let font_size = font_px(layer) as f64;
        let line_height = font_size * LINE_HEIGHT as f64;

        let mut width: f64 = 0.0;
        let mut height: f64 = 0.0;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w as f64);
            height = height.max((run.line_top + run.line_height) as f64);
        }

        Rect {
            min: layer.position,
            width: width.max(font_size / 2.0),
            height: height.max(line_height),
        }
    }

    /// Draw a text layer onto the target image.
    pub fn draw(&mut self, target: &mut RgbaImage, layer: &TextLayer) {
        let buffer = self.shape(layer);
        let [r, g, b, a] = layer.fill.to_rgba();
        let origin = Point::new(layer.position.x.round(), layer.position.y.round());
        let (target_w, target_h) = (target.width() as i64, target.height() as i64);

        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            Color::rgba(r, g, b, a),
            |x, y, w, h, color| {
                if color.a() == 0 {
                    return;
                }
                let src = [color.r(), color.g(), color.b(), color.a()];
                for dy in 0..h as i64 {
                    for dx in 0..w as i64 {
                        let px = origin.x as i64 + x as i64 + dx;
                        let py = origin.y as i64 + y as i64 + dy;
                        if px < 0 || py < 0 || px >= target_w || py >= target_h {
                            continue;
                        }
                        blend_pixel(target.get_pixel_mut(px as u32, py as u32), src);
                    }
                }
            },
        );
    }
}

/// Layer font size limited to the renderable range.
fn font_px(layer: &TextLayer) -> u32 {
    layer.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::text::{parse_font_size, TextProperties};
    use cosmic_text::fontdb;

    fn empty_rasterizer() -> TextRasterizer {
        TextRasterizer::with_font_db(fontdb::Database::new())
    }

    #[test]
    fn test_bounds_start_at_layer_position() {
        let mut rasterizer = empty_rasterizer();
        let layer = TextLayer::new(Point::new(100.0, 100.0), &TextProperties::default());

        let bounds = rasterizer.bounds(&layer);
        assert_eq!(bounds.min, Point::new(100.0, 100.0));
        assert!(bounds.width > 0.0);
        assert!(bounds.height >= 40.0);
    }

    #[test]
    fn test_draw_without_fonts_leaves_target_untouched() {
        let mut rasterizer = empty_rasterizer();
        let layer = TextLayer::new(Point::new(10.0, 10.0), &TextProperties::default());
        let mut target = RgbaImage::new(64, 64);

        rasterizer.draw(&mut target, &layer);
        assert!(target.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_draw_offscreen_layer_does_not_panic() {
        let mut rasterizer = empty_rasterizer();
        let layer = TextLayer::new(Point::new(-500.0, 5000.0), &TextProperties::default());
        let mut target = RgbaImage::new(8, 8);
        rasterizer.draw(&mut target, &layer);
    }

    #[test]
    fn test_huge_font_size_is_clamped_and_renders() {
        let mut rasterizer = empty_rasterizer();
        let props = TextProperties {
            text: "W".to_string(),
            font_size: parse_font_size("100000"),
            ..TextProperties::default()
        };
        assert_eq!(props.font_size, MAX_FONT_SIZE);

        let mut layer = TextLayer::new(Point::new(0.0, 0.0), &props);
        let mut target = RgbaImage::new(800, 600);
        rasterizer.draw(&mut target, &layer);

        layer.font_size = u32::MAX;
        let bounds = rasterizer.bounds(&layer);
        assert!(bounds.height >= MAX_FONT_SIZE as f64, "{}", bounds.height);
        assert!(bounds.height < 2.0 * MAX_FONT_SIZE as f64, "{}", bounds.height);
        rasterizer.draw(&mut target, &layer);
    }
}
