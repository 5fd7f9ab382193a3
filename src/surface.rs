// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The canvas surface and its object graph.
//!
//! A [`Canvas`] owns the background image, the text layer and the
//! active-object state, and renders them into an RGBA raster. The
//! [`Surface`] wraps it with an explicit readiness lifecycle so that
//! operations issued before fonts are loaded, or after shutdown, fail
//! with a clear error instead of being silently dropped.

use crate::error::{EditorError, EditorResult};
use crate::models::layer::{BackgroundImage, Point, Rect, TextLayer};
use crate::models::text::TextProperties;
use crate::render::{compose, text::TextRasterizer};
use image::RgbaImage;

/// Object hit by a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    TextLayer,
}

/// Fixed-size drawing surface holding one background and one text layer.
pub struct Canvas {
    width: u32,
    height: u32,
    /// Dedicated background slot, always painted first
    background: Option<BackgroundImage>,
    /// Regular object stack; holds at most the text layer
    text_layer: Option<TextLayer>,
    /// Whether the text layer is currently selected
    active_object: bool,
    /// Bumped on every visual change
    revision: u64,
    rasterizer: TextRasterizer,
}

impl Canvas {
    pub fn new(width: u32, height: u32, rasterizer: TextRasterizer) -> Self {
        Self {
            width,
            height,
            background: None,
            text_layer: None,
            active_object: false,
            revision: 0,
            rasterizer,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    pub fn text_layer(&self) -> Option<&TextLayer> {
        self.text_layer.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.background().is_some()
    }

    pub fn active_object(&self) -> bool {
        self.active_object
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Install a new background and a fresh text layer.
    ///
    /// Any previous background and text layer are replaced.
    pub fn compose(&mut self, background: BackgroundImage, text_origin: Point, props: &TextProperties) {
        self.background = Some(background);
        // The text layer sits at the back of the object stack, but the
        // background slot is painted before that stack, so text stays visible.
        self.text_layer = Some(TextLayer::new(text_origin, props));
        self.active_object = false;
        self.touch();
    }

    /// Apply the full property set to the text layer.
    ///
    /// Returns `false` when there is no text layer yet.
    pub fn apply_text_properties(&mut self, props: &TextProperties) -> bool {
        match self.text_layer.as_mut() {
            Some(layer) => {
                if layer.properties() != *props {
                    layer.apply(props);
                    self.touch();
                }
                true
            }
            None => false,
        }
    }

    /// Bounding box of the text layer, if one exists.
    pub fn text_bounds(&mut self) -> Option<Rect> {
        let layer = self.text_layer.as_ref()?;
        Some(self.rasterizer.bounds(layer))
    }

    /// Find the topmost interactive object under a canvas point.
    ///
    /// The background never receives pointer events.
    pub fn hit_test(&mut self, point: Point) -> Option<Hit> {
        let selectable = self.text_layer.as_ref().is_some_and(|layer| layer.selectable);
        if selectable && self.text_bounds()?.contains(point) {
            return Some(Hit::TextLayer);
        }
        None
    }

    pub fn set_active_object(&mut self, hit: Option<Hit>) {
        let active = hit == Some(Hit::TextLayer) && self.text_layer.is_some();
        // Selection is UI chrome only, so the raster revision is unchanged
        self.active_object = active;
    }

    /// Clear selection so renders show only content.
    pub fn discard_active_object(&mut self) {
        self.set_active_object(None);
    }

    /// Translate the text layer by a canvas-space delta.
    pub fn move_text_by(&mut self, dx: f64, dy: f64) {
        if let Some(layer) = self.text_layer.as_mut() {
            layer.position.x += dx;
            layer.position.y += dy;
            self.touch();
        }
    }

    /// Render the object graph: background slot first, then the text layer.
    pub fn render(&mut self) -> RgbaImage {
        let mut target = RgbaImage::new(self.width, self.height);
        if let Some(background) = self.background.as_ref() {
            compose::draw_background(&mut target, background);
        }
        if let Some(layer) = self.text_layer.as_ref() {
            self.rasterizer.draw(&mut target, layer);
        }
        target
    }
}

/// Canvas readiness lifecycle.
#[derive(Default)]
pub enum Surface {
    /// Fonts are still loading
    #[default]
    Uninitialized,
    Ready(Canvas),
    /// Torn down at shutdown; terminal
    Disposed,
}

impl Surface {
    /// Move from `Uninitialized` to `Ready`.
    pub fn initialize(&mut self, canvas: Canvas) -> EditorResult<()> {
        match self {
            Surface::Uninitialized => {
                *self = Surface::Ready(canvas);
                Ok(())
            }
            Surface::Ready(_) => {
                log::warn!("Canvas already initialized, ignoring");
                Ok(())
            }
            Surface::Disposed => Err(EditorError::SurfaceDisposed),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Surface::Ready(_))
    }

    pub fn canvas(&self) -> EditorResult<&Canvas> {
        match self {
            Surface::Ready(canvas) => Ok(canvas),
            Surface::Uninitialized => Err(EditorError::SurfaceNotReady),
            Surface::Disposed => Err(EditorError::SurfaceDisposed),
        }
    }

    pub fn canvas_mut(&mut self) -> EditorResult<&mut Canvas> {
        match self {
            Surface::Ready(canvas) => Ok(canvas),
            Surface::Uninitialized => Err(EditorError::SurfaceNotReady),
            Surface::Disposed => Err(EditorError::SurfaceDisposed),
        }
    }

    /// Release the canvas. Later operations fail with `SurfaceDisposed`.
    pub fn dispose(&mut self) {
        if !matches!(self, Surface::Disposed) {
            log::info!("Disposing canvas");
        }
        *self = Surface::Disposed;
    }
}
