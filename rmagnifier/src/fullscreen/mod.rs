use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct FullscreenState {
    pub enabled: bool,
    /// A change that has not been sent to the window yet
    pending: bool,
}

/// Tracks the requested fullscreen state and forwards changes to the viewport.
#[derive(Debug, Default)]
pub struct FullscreenController {
    state: FullscreenState,
}

impl FullscreenController {
    pub fn new(enabled: bool) -> Self {
        Self {
            state: FullscreenState {
                enabled,
                pending: enabled,
            },
        }
    }

    pub fn state(&self) -> &FullscreenState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    pub fn toggle(&mut self) {
        self.set_enabled(!self.state.enabled);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.state.enabled != enabled {
            self.state.enabled = enabled;
            self.state.pending = true;
        }
    }

    /// Send a pending change as an egui viewport command.
    pub fn apply(&mut self, ctx: &egui::Context) {
        if !self.state.pending {
            return;
        }
        debug!("Applying fullscreen: {}", self.state.enabled);
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.state.enabled));
        self.state.pending = false;
    }
}
