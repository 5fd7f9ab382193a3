// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the eframe::App trait. It owns the editing session, runs font loading,
//! image decoding and export encoding on background threads, and routes
//! actions from the UI components into the session.

use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::io::export::{self, ExportFormat, ExportSettings};
use crate::io::media::{UploadedFile, IMAGE_EXTENSIONS};
use crate::models::layer::BackgroundImage;
use crate::models::session::{prepare_background, Session};
use crate::render::text::TextRasterizer;
use crate::surface::{Canvas, Surface};
use crate::ui::{canvas, properties, status, toolbar};
use crate::ui::canvas::CanvasView;
use crate::ui::status::{Notice, Status};
use crate::util::job::{Finished, PendingJob};
use std::path::PathBuf;
use std::sync::Arc;

/// Where an upload comes from.
enum UploadSource {
    Path(PathBuf),
    Bytes { name: String, bytes: Arc<[u8]> },
}

impl UploadSource {
    fn read(self) -> EditorResult<UploadedFile> {
        match self {
            UploadSource::Path(path) => UploadedFile::read(&path),
            UploadSource::Bytes { name, bytes } => Ok(UploadedFile::from_bytes(name, bytes.to_vec())),
        }
    }
}

/// Result of background image loading.
struct LoadedImage {
    name: String,
    background: BackgroundImage,
}

/// Main application state.
pub struct EditorApp {
    config: EditorConfig,
    export_settings: ExportSettings,

    /// Text properties and the canvas surface
    session: Session,

    /// Loads system fonts; the canvas becomes ready when it finishes
    font_job: Option<PendingJob<TextRasterizer>>,
    upload_job: Option<PendingJob<EditorResult<LoadedImage>>>,
    export_job: Option<PendingJob<EditorResult<PathBuf>>>,

    /// Preview texture and the canvas revision it shows
    preview: Option<egui::TextureHandle>,
    preview_revision: Option<u64>,

    status: Option<Status>,
    /// Blocking alert (invalid file type)
    alert: Option<String>,
}

impl EditorApp {
    /// Create the application and start loading fonts.
    pub fn new(config: EditorConfig) -> Self {
        let font_job = PendingJob::spawn("Loading fonts...", |_| TextRasterizer::with_system_fonts());

        Self {
            export_settings: ExportSettings::from_config(&config),
            session: Session::new(&config),
            config,
            font_job: Some(font_job),
            upload_job: None,
            export_job: None,
            preview: None,
            preview_revision: None,
            status: None,
            alert: None,
        }
    }

    /// Surface an error to the user and the log.
    fn report_error(&mut self, error: &EditorError) {
        match status::notice_for(error) {
            Notice::Alert(message) => {
                log::warn!("{}", error);
                self.alert = Some(message);
            }
            Notice::Status(status) => {
                log::error!("{}", error);
                self.status = Some(status);
            }
        }
    }

    fn busy_message(&self) -> Option<&str> {
        self.font_job
            .as_ref()
            .map(|job| job.message())
            .or_else(|| self.upload_job.as_ref().map(|job| job.message()))
            .or_else(|| self.export_job.as_ref().map(|job| job.message()))
    }

    /// Apply results of finished background jobs.
    fn poll_jobs(&mut self) {
        match PendingJob::take_finished(&mut self.font_job) {
            Some(Finished::Done(rasterizer)) => {
                let canvas = Canvas::new(self.config.canvas_width, self.config.canvas_height, rasterizer);
                match self.session.attach_canvas(canvas) {
                    Ok(()) => log::info!(
                        "Canvas ready ({}x{})",
                        self.config.canvas_width,
                        self.config.canvas_height
                    ),
                    Err(e) => self.report_error(&e),
                }
            }
            Some(Finished::Lost) => {
                log::error!("Font loading thread exited without a result");
                self.status = Some(Status::error("Failed to initialize the canvas"));
            }
            None => {}
        }

        match PendingJob::take_finished(&mut self.upload_job) {
            Some(Finished::Done(Ok(loaded))) => {
                let (width, height) = loaded.background.source_size;
                match self.session.place_background(loaded.background) {
                    Ok(()) => {
                        log::info!("Image loaded: {} ({}x{})", loaded.name, width, height);
                        self.status = Some(Status::info(format!(
                            "Loaded {} ({}x{})",
                            loaded.name, width, height
                        )));
                    }
                    Err(e) => self.report_error(&e),
                }
            }
            Some(Finished::Done(Err(e))) => self.report_error(&e),
            Some(Finished::Lost) => {
                log::error!("Image loading thread exited without a result");
                self.status = Some(Status::error("Failed to load image"));
            }
            None => {}
        }

        match PendingJob::take_finished(&mut self.export_job) {
            Some(Finished::Done(Ok(path))) => {
                self.status = Some(Status::info(format!("Saved {}", path.display())));
            }
            Some(Finished::Done(Err(e))) => self.report_error(&e),
            Some(Finished::Lost) => {
                log::error!("Export thread exited without a result");
                self.status = Some(Status::error("Export failed"));
            }
            None => {}
        }
    }

    /// Check an upload, then decode it in the background.
    ///
    /// A newer upload supersedes one still in flight.
    fn start_upload(&mut self, source: UploadSource) {
        let admitted = source
            .read()
            .and_then(|file| self.session.admit_upload(&file).map(|size| (file, size)));
        let (file, canvas_size) = match admitted {
            Ok(admitted) => admitted,
            Err(e) => {
                self.report_error(&e);
                return;
            }
        };

        if let Some(previous) = self.upload_job.take() {
            log::info!("Superseding pending upload");
            previous.cancel();
        }

        self.upload_job = Some(PendingJob::spawn("Loading image...", move |token| -> EditorResult<LoadedImage> {
            let background = prepare_background(&file, canvas_size, token)?;
            Ok(LoadedImage {
                name: file.name,
                background,
            })
        }));
    }

    /// Open the native file picker and upload the chosen file.
    fn pick_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.start_upload(UploadSource::Path(path));
        }
    }

    /// Upload the first file dropped onto the window.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.first() else {
            return;
        };
        if dropped.len() > 1 {
            log::warn!("{} files dropped, using only {}", dropped.len(), file.name);
        }

        let source = if let Some(path) = &file.path {
            UploadSource::Path(path.clone())
        } else if let Some(bytes) = &file.bytes {
            UploadSource::Bytes {
                name: file.name.clone(),
                bytes: bytes.clone(),
            }
        } else {
            log::warn!("Dropped file {} has neither a path nor contents", file.name);
            return;
        };
        self.start_upload(source);
    }

    /// Render the canvas and save it in the requested format.
    fn start_export(&mut self, format: ExportFormat) {
        if self.export_job.is_some() {
            self.status = Some(Status::info("An export is already in progress"));
            return;
        }

        let raster = match self.session.render_for_export() {
            Ok(raster) => raster,
            Err(e) => {
                self.report_error(&e);
                return;
            }
        };

        let file_name = self.export_settings.file_name(format);
        let Some(path) = rfd::FileDialog::new()
            .add_filter(format.label(), &[format.extension()])
            .set_file_name(&file_name)
            .save_file()
        else {
            log::debug!("Export of {} cancelled by user", file_name);
            return;
        };

        let settings = self.export_settings.clone();
        self.export_job = Some(PendingJob::spawn(format!("Saving {}...", file_name), move |token| -> EditorResult<PathBuf> {
            let encoded = export::encode(&raster, format, &settings)?;
            if token.is_cancelled() {
                return Err(EditorError::Cancelled);
            }
            export::save(&encoded, &path)?;
            Ok(path)
        }));
    }

    /// Re-upload the preview texture when the canvas changed.
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let canvas = match self.session.surface_mut().canvas_mut() {
            Ok(canvas) if canvas.has_image() => canvas,
            _ => {
                self.preview = None;
                self.preview_revision = None;
                return;
            }
        };

        let revision = canvas.revision();
        if self.preview.is_some() && self.preview_revision == Some(revision) {
            return;
        }

        let raster = canvas.render();
        let size = [raster.width() as usize, raster.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, raster.as_raw());
        match self.preview.as_mut() {
            Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.preview = Some(ctx.load_texture("canvas", color_image, egui::TextureOptions::LINEAR));
            }
        }
        self.preview_revision = Some(revision);
    }

    fn handle_canvas_action(&mut self, action: canvas::CanvasAction) {
        let Ok(canvas) = self.session.surface_mut().canvas_mut() else {
            return;
        };
        match action {
            canvas::CanvasAction::Press(point) => {
                let hit = canvas.hit_test(point);
                canvas.set_active_object(hit);
            }
            canvas::CanvasAction::Drag { dx, dy } => {
                if canvas.active_object() {
                    canvas.move_text_by(dx, dy);
                }
            }
            canvas::CanvasAction::None => {}
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_jobs();

        // Keep polling while background work is running (and the spinner animating)
        if self.busy_message().is_some() {
            ctx.request_repaint();
        }

        self.handle_dropped_files(ctx);

        let can_upload = self.session.surface().is_ready();
        let can_export = self
            .session
            .surface()
            .canvas()
            .map(|canvas| canvas.has_image())
            .unwrap_or(false);

        // Top menu bar
        let mut toolbar_action = toolbar::ToolbarAction::None;
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.add_enabled(can_upload, egui::Button::new("Upload Image...")).clicked() {
                        toolbar_action = toolbar::ToolbarAction::OpenImage;
                        ui.close_menu();
                    }
                    ui.separator();
                    for format in [ExportFormat::Png, ExportFormat::Jpeg] {
                        let label = format!("Download {}...", format.label());
                        if ui.add_enabled(can_export, egui::Button::new(label)).clicked() {
                            toolbar_action = toolbar::ToolbarAction::Export(format);
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            let action = toolbar::show(ui, can_upload, can_export);
            if !matches!(action, toolbar::ToolbarAction::None) {
                toolbar_action = action;
            }
        });

        match toolbar_action {
            toolbar::ToolbarAction::OpenImage => self.pick_image(),
            toolbar::ToolbarAction::Export(format) => self.start_export(format),
            toolbar::ToolbarAction::None => {}
        }

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status::show_status_bar(ui, self.status.as_ref(), self.busy_message());
        });

        // Properties panel (right side)
        let has_text_layer = self
            .session
            .surface()
            .canvas()
            .map(|canvas| canvas.text_layer().is_some())
            .unwrap_or(false);
        let properties_action = egui::SidePanel::right("properties")
            .default_width(280.0)
            .show(ctx, |ui| {
                properties::show(
                    ui,
                    self.session.properties(),
                    self.session.font_size_input(),
                    has_text_layer,
                )
            })
            .inner;

        if let properties::PropertiesAction::Edit(edit) = properties_action {
            self.session.update(edit);
        }

        // Deselect on Escape when no text field has focus
        if !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if let Ok(canvas) = self.session.surface_mut().canvas_mut() {
                canvas.discard_active_object();
            }
        }

        self.refresh_preview(ctx);

        let selection = self
            .session
            .surface_mut()
            .canvas_mut()
            .ok()
            .filter(|canvas| canvas.active_object())
            .and_then(|canvas| canvas.text_bounds());
        let canvas_size = (self.config.canvas_width, self.config.canvas_height);

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let view = match (self.session.surface(), self.preview.as_ref()) {
                    (Surface::Uninitialized, _) => CanvasView::Loading("Loading fonts..."),
                    (Surface::Disposed, _) => CanvasView::Loading("Canvas closed"),
                    (Surface::Ready(_), Some(texture)) => CanvasView::Image { texture, selection },
                    (Surface::Ready(_), None) => CanvasView::Empty,
                };
                canvas::show(ui, view, canvas_size)
            })
            .inner;

        self.handle_canvas_action(canvas_action);

        status::show_alert(ctx, &mut self.alert);
    }
}

impl Drop for EditorApp {
    fn drop(&mut self) {
        if let Some(job) = &self.font_job {
            job.cancel();
        }
        if let Some(job) = &self.upload_job {
            job.cancel();
        }
        if let Some(job) = &self.export_job {
            job.cancel();
        }
        self.session.dispose();
    }
}
