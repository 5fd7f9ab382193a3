// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas object data structures.
//!
//! This module defines the two objects a canvas can hold: the background
//! image and the editable text layer.

use super::text::{FontFamily, TextColor, TextProperties};
use crate::util::geometry::Placement;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// A 2D point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.y >= self.min.y
            && point.x <= self.min.x + self.width
            && point.y <= self.min.y + self.height
    }
}

/// The image occupying the canvas background slot.
///
/// Background images are never selectable and never receive pointer events.
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    /// Dimensions of the decoded source image
    pub source_size: (u32, u32),
    /// Scale and position on the canvas
    pub placement: Placement,
    /// Pixels already scaled to `placement.width` x `placement.height`
    pub pixels: RgbaImage,
}

impl BackgroundImage {
    pub fn new(source_size: (u32, u32), placement: Placement, pixels: RgbaImage) -> Self {
        Self {
            source_size,
            placement,
            pixels,
        }
    }
}

/// The single editable text object overlaid on the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayer {
    /// Top-left corner of the text box
    pub position: Point,
    pub text: String,
    pub font_size: u32,
    pub fill: TextColor,
    pub font_family: FontFamily,
    pub editable: bool,
    pub selectable: bool,
}

impl TextLayer {
    /// Create a text layer at `position` with the given properties.
    pub fn new(position: Point, props: &TextProperties) -> Self {
        let mut layer = Self {
            position,
            text: String::new(),
            font_size: props.font_size,
            fill: props.color,
            font_family: props.font_family,
            editable: true,
            selectable: true,
        };
        layer.apply(props);
        layer
    }

    /// Push the full property set into the layer.
    pub fn apply(&mut self, props: &TextProperties) {
        self.text.clone_from(&props.text);
        self.font_size = props.font_size;
        self.fill = props.color;
        self.font_family = props.font_family;
    }

    /// Read the layer's current properties back.
    pub fn properties(&self) -> TextProperties {
        TextProperties {
            text: self.text.clone(),
            font_size: self.font_size,
            color: self.fill,
            font_family: self.font_family,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_props() -> TextProperties {
        TextProperties {
            text: "Hello".to_string(),
            font_size: 24,
            color: TextColor::new(255, 0, 0),
            font_family: FontFamily::CourierNew,
        }
    }

    #[test]
    fn test_new_layer_uses_properties() {
        let layer = TextLayer::new(Point::new(100.0, 100.0), &sample_props());
        assert_eq!(layer.position, Point::new(100.0, 100.0));
        assert_eq!(layer.properties(), sample_props());
        assert!(layer.editable);
        assert!(layer.selectable);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut layer = TextLayer::new(Point::new(100.0, 100.0), &TextProperties::default());
        let props = sample_props();

        layer.apply(&props);
        let first = serde_json::to_string(&layer).unwrap();
        layer.apply(&props);
        let second = serde_json::to_string(&layer).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_apply_keeps_position() {
        let mut layer = TextLayer::new(Point::new(10.0, 20.0), &TextProperties::default());
        layer.apply(&sample_props());
        assert_eq!(layer.position, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            min: Point::new(10.0, 10.0),
            width: 20.0,
            height: 5.0,
        };
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(30.0, 15.0)));
        assert!(!rect.contains(Point::new(31.0, 12.0)));
        assert!(!rect.contains(Point::new(15.0, 9.0)));
    }
}
