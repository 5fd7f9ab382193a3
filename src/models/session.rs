// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editing session state.
//!
//! The session is the single owner of the property panel values and the
//! canvas surface. Every property edit goes through [`Session::update`],
//! which re-applies the complete property set to the text layer so the
//! panel and the layer can never drift apart.

use super::layer::{BackgroundImage, Point};
use super::text::{parse_font_size, FontFamily, TextColor, TextProperties};
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::io::media::UploadedFile;
use crate::render::compose::fit_background;
use crate::surface::{Canvas, Surface};
use crate::util::cancel::CancellationToken;
use image::RgbaImage;

/// A single change made in the properties panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    Text(String),
    /// Raw font size input, coerced on apply
    FontSize(String),
    Color(TextColor),
    FontFamily(FontFamily),
}

pub struct Session {
    props: TextProperties,
    font_size_input: String,
    text_origin: Point,
    surface: Surface,
}

impl Session {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            font_size_input: config.text.font_size.to_string(),
            props: config.text.clone(),
            text_origin: config.text_origin,
            surface: Surface::Uninitialized,
        }
    }

    pub fn properties(&self) -> &TextProperties {
        &self.props
    }

    /// The font size field's text as last typed.
    pub fn font_size_input(&self) -> &str {
        &self.font_size_input
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Hand the session a ready canvas.
    pub fn attach_canvas(&mut self, canvas: Canvas) -> EditorResult<()> {
        self.surface.initialize(canvas)
    }

    /// Apply one edit, then push the full property set into the text layer.
    ///
    /// Returns `true` if a text layer was updated.
    pub fn update(&mut self, edit: PropertyEdit) -> bool {
        match edit {
            PropertyEdit::Text(text) => self.props.text = text,
            PropertyEdit::FontSize(raw) => {
                self.props.font_size = parse_font_size(&raw);
                self.font_size_input = raw;
            }
            PropertyEdit::Color(color) => self.props.color = color,
            PropertyEdit::FontFamily(family) => self.props.font_family = family,
        }
        self.sync_text_layer()
    }

    fn sync_text_layer(&mut self) -> bool {
        match self.surface.canvas_mut() {
            Ok(canvas) => {
                let updated = canvas.apply_text_properties(&self.props);
                if updated {
                    log::debug!("Applied text properties: {:?}", self.props);
                }
                updated
            }
            Err(_) => false,
        }
    }

    /// Install a fitted background and a fresh text layer.
    pub fn place_background(&mut self, background: BackgroundImage) -> EditorResult<()> {
        let canvas = self.surface.canvas_mut()?;
        canvas.compose(background, self.text_origin, &self.props);
        Ok(())
    }

    /// Accept or reject an upload before any decoding happens.
    ///
    /// The MIME type is checked before readiness, so a non-image file is
    /// reported as such even while the canvas is still loading. Returns the
    /// canvas size the image is fitted to.
    pub fn admit_upload(&self, file: &UploadedFile) -> EditorResult<(u32, u32)> {
        file.validate()?;
        Ok(self.surface.canvas()?.size())
    }

    /// Clear selection and render the canvas for export.
    pub fn render_for_export(&mut self) -> EditorResult<RgbaImage> {
        let canvas = self.surface.canvas_mut()?;
        if !canvas.has_image() {
            return Err(EditorError::NothingToExport);
        }
        canvas.discard_active_object();
        Ok(canvas.render())
    }

    pub fn dispose(&mut self) {
        self.surface.dispose();
    }
}

/// Decode an admitted upload and fit it to the canvas.
///
/// Runs on a worker thread. Nothing in the session changes until the result
/// is handed to [`Session::place_background`].
pub fn prepare_background(
    file: &UploadedFile,
    (width, height): (u32, u32),
    token: &CancellationToken,
) -> EditorResult<BackgroundImage> {
    let image = file.decode()?;
    if token.is_cancelled() {
        return Err(EditorError::Cancelled);
    }
    fit_background(&image, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::text::TextRasterizer;
    use crate::surface::Hit;
    use cosmic_text::fontdb;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn ready_session() -> Session {
        let config = EditorConfig::default();
        let mut session = Session::new(&config);
        let canvas = Canvas::new(
            config.canvas_width,
            config.canvas_height,
            TextRasterizer::with_font_db(fontdb::Database::new()),
        );
        session.attach_canvas(canvas).unwrap();
        session
    }

    fn png_upload(width: u32, height: u32) -> UploadedFile {
        let image = RgbaImage::from_pixel(width, height, Rgba([0, 200, 0, 255]));
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        UploadedFile::from_bytes("photo.png", bytes)
    }

    fn upload(session: &mut Session, file: &UploadedFile) -> EditorResult<()> {
        let size = session.admit_upload(file)?;
        let background = prepare_background(file, size, &CancellationToken::new())?;
        session.place_background(background)
    }

    fn layer_json(session: &Session) -> String {
        let layer = session.surface().canvas().unwrap().text_layer().unwrap();
        serde_json::to_string(layer).unwrap()
    }

    #[test]
    fn test_upload_creates_layer_with_current_values() {
        let mut session = ready_session();
        session.update(PropertyEdit::Text("Hello".to_string()));
        session.update(PropertyEdit::FontFamily(FontFamily::ComicSansMs));

        upload(&mut session, &png_upload(1600, 1200)).unwrap();

        let canvas = session.surface().canvas().unwrap();
        let layer = canvas.text_layer().unwrap();
        assert_eq!(layer.position, Point::new(100.0, 100.0));
        assert_eq!(layer.text, "Hello");
        assert_eq!(layer.font_family, FontFamily::ComicSansMs);
        assert_eq!(layer.font_size, 40);
        assert_eq!(canvas.background().unwrap().placement.scale, 0.5);
    }

    #[test]
    fn test_invalid_upload_leaves_state_unchanged() {
        let mut session = ready_session();
        upload(&mut session, &png_upload(100, 100)).unwrap();
        let before = layer_json(&session);
        let revision = session.surface().canvas().unwrap().revision();

        let text_file = UploadedFile::from_bytes("notes.txt", b"hello".to_vec());
        let result = upload(&mut session, &text_file);
        assert!(matches!(result, Err(EditorError::InvalidFileType { .. })));

        assert_eq!(layer_json(&session), before);
        let canvas = session.surface().canvas().unwrap();
        assert_eq!(canvas.revision(), revision);
        assert_eq!(canvas.background().unwrap().source_size, (100, 100));
    }

    #[test]
    fn test_invalid_upload_before_any_image() {
        let mut session = ready_session();
        let text_file = UploadedFile::from_bytes("notes.txt", b"hello".to_vec());
        assert!(upload(&mut session, &text_file).is_err());

        let canvas = session.surface().canvas().unwrap();
        assert!(canvas.background().is_none());
        assert!(canvas.text_layer().is_none());
    }

    #[test]
    fn test_upload_before_ready_fails() {
        let mut session = Session::new(&EditorConfig::default());
        let result = upload(&mut session, &png_upload(10, 10));
        assert!(matches!(result, Err(EditorError::SurfaceNotReady)));
    }

    #[test]
    fn test_file_type_checked_before_readiness() {
        let session = Session::new(&EditorConfig::default());
        let text_file = UploadedFile::from_bytes("notes.txt", b"hello".to_vec());
        assert!(matches!(
            session.admit_upload(&text_file),
            Err(EditorError::InvalidFileType { .. })
        ));
    }

    #[test]
    fn test_cancelled_upload_is_not_placed() {
        let mut session = ready_session();
        let file = png_upload(20, 20);
        let size = session.admit_upload(&file).unwrap();
        assert_eq!(size, (800, 600));

        let token = CancellationToken::new();
        token.cancel();
        let result = prepare_background(&file, size, &token);
        assert!(matches!(result, Err(EditorError::Cancelled)));
        assert!(!session.surface().canvas().unwrap().has_image());
    }

    #[test]
    fn test_edits_without_layer_are_noops() {
        let mut session = ready_session();
        assert!(!session.update(PropertyEdit::Text("early".to_string())));
        assert_eq!(session.properties().text, "early");
        assert!(session.surface().canvas().unwrap().text_layer().is_none());
    }

    #[test]
    fn test_every_edit_pushes_full_set() {
        let mut session = ready_session();
        upload(&mut session, &png_upload(50, 50)).unwrap();

        assert!(session.update(PropertyEdit::Color(TextColor::new(255, 0, 0))));
        assert!(session.update(PropertyEdit::FontSize("72".to_string())));
        assert!(session.update(PropertyEdit::Text("Caption".to_string())));

        let layer = session.surface().canvas().unwrap().text_layer().unwrap();
        assert_eq!(layer.properties(), *session.properties());
        assert_eq!(layer.fill, TextColor::new(255, 0, 0));
        assert_eq!(layer.font_size, 72);
    }

    #[test]
    fn test_same_edit_twice_is_idempotent() {
        let mut session = ready_session();
        upload(&mut session, &png_upload(50, 50)).unwrap();

        session.update(PropertyEdit::FontFamily(FontFamily::Helvetica));
        let first = layer_json(&session);
        session.update(PropertyEdit::FontFamily(FontFamily::Helvetica));
        assert_eq!(layer_json(&session), first);
    }

    #[test]
    fn test_font_size_falls_back_to_one() {
        let mut session = ready_session();
        session.update(PropertyEdit::FontSize("abc".to_string()));
        assert_eq!(session.properties().font_size, 1);
        assert_eq!(session.font_size_input(), "abc");
    }

    #[test]
    fn test_new_upload_replaces_layer() {
        let mut session = ready_session();
        upload(&mut session, &png_upload(50, 50)).unwrap();
        session
            .surface_mut()
            .canvas_mut()
            .unwrap()
            .move_text_by(30.0, 30.0);

        upload(&mut session, &png_upload(40, 80)).unwrap();
        let canvas = session.surface().canvas().unwrap();
        assert_eq!(canvas.text_layer().unwrap().position, Point::new(100.0, 100.0));
        assert_eq!(canvas.background().unwrap().source_size, (40, 80));
    }

    #[test]
    fn test_export_requires_image() {
        let mut session = ready_session();
        assert!(matches!(
            session.render_for_export(),
            Err(EditorError::NothingToExport)
        ));

        let mut unready = Session::new(&EditorConfig::default());
        assert!(matches!(
            unready.render_for_export(),
            Err(EditorError::SurfaceNotReady)
        ));
    }

    #[test]
    fn test_export_clears_selection() {
        let mut session = ready_session();
        upload(&mut session, &png_upload(800, 600)).unwrap();
        session
            .surface_mut()
            .canvas_mut()
            .unwrap()
            .set_active_object(Some(Hit::TextLayer));

        let raster = session.render_for_export().unwrap();
        assert_eq!(raster.dimensions(), (800, 600));
        assert!(!session.surface().canvas().unwrap().active_object());
    }

    #[test]
    fn test_dispose_is_terminal() {
        let mut session = ready_session();
        session.dispose();
        assert!(matches!(
            upload(&mut session, &png_upload(10, 10)),
            Err(EditorError::SurfaceDisposed)
        ));
        assert!(!session.update(PropertyEdit::Text("late".to_string())));
    }
}
