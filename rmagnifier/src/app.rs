use eframe::{egui, App, Frame};
use mag_capture::RgbaFrame;
use mag_common::{MonitorDescriptor, Vec2};
use mag_display::{CameraController, FpsCounter, OverlaySnapshot};
use platform_input::{InputDispatcher, ShortcutAction};
use std::time::Instant;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::fullscreen::FullscreenController;
use crate::ui::{overlay::OverlayPanel, viewer::DesktopView};

/// Everything prepared before the window opens.
pub struct MagnifierSetup {
    pub config: AppConfig,
    /// Captured virtual desktop
    pub frame: RgbaFrame,
    /// Camera looking at the selected monitor's top-left corner
    pub camera: CameraController,
}

/// Window position and inner size in egui points covering `target`.
///
/// Monitor geometry is in physical pixels; egui places windows in points, so both are
/// divided by the monitor's scale factor. Non-positive or non-finite factors count as 1.0.
pub fn window_geometry(target: &MonitorDescriptor, scale_factor: f64) -> (egui::Pos2, egui::Vec2) {
    let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    };
    let position = target.position.to_vec2() / scale;
    let size = target.resolution.to_vec2() / scale;
    (
        egui::pos2(position.x as f32, position.y as f32),
        egui::vec2(size.x as f32, size.y as f32),
    )
}

pub struct MagnifierApp {
    camera: CameraController,
    view: DesktopView,
    input: InputDispatcher,
    overlay: OverlayPanel,
    fullscreen: FullscreenController,
    fps: FpsCounter,
    /// Where the view starts and where ResetView returns to
    home: Vec2,
}

impl MagnifierApp {
    /// Build the application and upload the captured frame as a texture.
    pub fn new(ctx: &egui::Context, setup: MagnifierSetup) -> Self {
        let MagnifierSetup {
            config,
            frame,
            camera,
        } = setup;

        let origin = camera.pan();
        let view = DesktopView::new(ctx, frame, &config.texture);
        info!(
            "Magnifier ready: texture {}x{}, starting at ({}, {})",
            view.size().x,
            view.size().y,
            origin.x,
            origin.y
        );

        let input = InputDispatcher::new();
        for (shortcut, action) in input.shortcuts().all_shortcuts() {
            debug!("Shortcut {} -> {:?} ({})", shortcut, action, shortcut.description);
        }

        Self {
            camera,
            view,
            input,
            overlay: OverlayPanel::new(config.overlay),
            fullscreen: FullscreenController::new(config.start_fullscreen),
            fps: FpsCounter::new(Instant::now()),
            home: origin,
        }
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_enabled()
    }

    pub fn handle_action(&mut self, ctx: &egui::Context, action: ShortcutAction) {
        debug!("Handling shortcut action: {:?}", action);

        match action {
            ShortcutAction::Quit => {
                info!("Quit requested");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            ShortcutAction::ToggleFullscreen => self.fullscreen.toggle(),
            ShortcutAction::ToggleOverlay => self.overlay.toggle(),
            ShortcutAction::ResetView => self.camera.reset_view(self.home),
        }
    }

    /// One frame: shortcuts, camera update, then drawing.
    pub fn run_frame(&mut self, ctx: &egui::Context) {
        let frame_input = ctx.input(|i| self.input.handle_frame(i));
        for action in frame_input.actions.iter().copied() {
            self.handle_action(ctx, action);
        }
        self.fullscreen.apply(ctx);

        let pixels_per_point = ctx.pixels_per_point();
        let screen = ctx.screen_rect().size() * pixels_per_point;
        let viewport = Vec2::new(f64::from(screen.x), f64::from(screen.y));

        let output = self
            .camera
            .update(&frame_input.snapshot, self.view.size(), viewport);

        let snapshot = OverlaySnapshot {
            fps: self.fps.tick(Instant::now()),
            pointer: frame_input.snapshot.pointer,
            texture_coord: output.pointer_on_texture,
            pan: self.camera.pan(),
            zoom: self.camera.zoom(),
        };

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let painter = ui.painter();
                self.view.paint(painter, &output.rects, pixels_per_point);
                self.overlay.show(painter, &snapshot);
            });

        // Smoothing needs a steady stream of frames
        ctx.request_repaint();
    }
}

impl App for MagnifierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.run_frame(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Magnifier shutting down");
    }
}
