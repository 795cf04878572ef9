use eframe::egui;
use mag_capture::RgbaFrame;
use mag_common::{RectF, Vec2};
use mag_display::{TextureConfig, TextureFilter, TextureWrap, ViewportRects};
use tracing::debug;

/// egui texture options for the configured filter and wrap mode.
pub fn texture_options(config: &TextureConfig) -> egui::TextureOptions {
    let filter = match config.filter {
        TextureFilter::Nearest => egui::TextureFilter::Nearest,
        TextureFilter::Linear => egui::TextureFilter::Linear,
    };
    let wrap_mode = match config.wrap {
        TextureWrap::ClampToEdge => egui::TextureWrapMode::ClampToEdge,
        TextureWrap::Repeat => egui::TextureWrapMode::Repeat,
        TextureWrap::MirroredRepeat => egui::TextureWrapMode::MirroredRepeat,
    };
    egui::TextureOptions {
        magnification: filter,
        minification: filter,
        wrap_mode,
    }
}

/// Convert a captured frame into an egui image, consuming the frame.
pub fn color_image(frame: RgbaFrame) -> egui::ColorImage {
    let size = [frame.width() as usize, frame.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, frame.as_bytes())
}

/// Texture coordinates of `source` for a texture of `texture` pixels.
pub fn uv_rect(source: &RectF, texture: Vec2) -> egui::Rect {
    let uv = source.normalized(texture);
    egui::Rect::from_min_size(
        egui::pos2(uv.x as f32, uv.y as f32),
        egui::vec2(uv.width as f32, uv.height as f32),
    )
}

/// Screen rectangle in egui points for a destination in physical pixels.
pub fn dest_rect(dest: &RectF, pixels_per_point: f32) -> egui::Rect {
    let scale = 1.0 / pixels_per_point;
    egui::Rect::from_min_size(
        egui::pos2(dest.x as f32 * scale, dest.y as f32 * scale),
        egui::vec2(dest.width as f32 * scale, dest.height as f32 * scale),
    )
}

/// The captured desktop as a GPU texture.
pub struct DesktopView {
    texture: egui::TextureHandle,
    texture_size: Vec2,
}

impl DesktopView {
    /// Upload the captured frame. The frame's pixel buffer is released once uploaded.
    pub fn new(ctx: &egui::Context, frame: RgbaFrame, config: &TextureConfig) -> Self {
        let texture_size = frame.size().to_vec2();
        debug!(
            "Uploading desktop texture {}x{} ({}, {})",
            texture_size.x, texture_size.y, config.filter, config.wrap
        );
        let texture = ctx.load_texture("desktop", color_image(frame), texture_options(config));
        Self {
            texture,
            texture_size,
        }
    }

    /// Texture dimensions in pixels.
    pub fn size(&self) -> Vec2 {
        self.texture_size
    }

    /// Draw the sampled region of the desktop into the destination rectangle.
    pub fn paint(&self, painter: &egui::Painter, rects: &ViewportRects, pixels_per_point: f32) {
        painter.rect_filled(painter.clip_rect(), 0.0, egui::Color32::BLACK);
        painter.image(
            self.texture.id(),
            dest_rect(&rects.dest, pixels_per_point),
            uv_rect(&rects.source, self.texture_size),
            egui::Color32::WHITE,
        );
    }
}
