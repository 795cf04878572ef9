use eframe::egui;
use mag_display::{OverlayConfig, OverlayLine, OverlaySnapshot};

const PADDING: f32 = 8.0;

/// Draws the diagnostic panel in the top-left corner.
pub struct OverlayPanel {
    config: OverlayConfig,
    visible: bool,
}

impl OverlayPanel {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            visible: config.visible,
            config,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Background rectangle for `line_count` rows of `width` points.
    fn panel_rect(&self, line_count: usize, width: f32) -> egui::Rect {
        let origin = egui::pos2(self.config.origin[0], self.config.origin[1]);
        let height = line_count as f32 * self.config.line_height();
        egui::Rect::from_min_size(
            origin - egui::vec2(PADDING, PADDING),
            egui::vec2(width + 2.0 * PADDING, height + 2.0 * PADDING),
        )
    }

    pub fn show(&self, painter: &egui::Painter, snapshot: &OverlaySnapshot) {
        if !self.visible {
            return;
        }

        let lines: Vec<String> = snapshot.lines().iter().map(OverlayLine::text).collect();
        let font_id = egui::FontId::monospace(self.config.font_size);

        // Monospace: every glyph has the width of one character cell
        let char_width = painter
            .layout_no_wrap("0".to_string(), font_id.clone(), egui::Color32::WHITE)
            .size()
            .x;
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let rect = self.panel_rect(lines.len(), widest as f32 * char_width);

        painter.rect_filled(rect, 5.0, egui::Color32::from_rgba_unmultiplied(0, 0, 0, 160));
        painter.rect_stroke(rect, 5.0, egui::Stroke::new(1.0, egui::Color32::GRAY));

        let text_pos = egui::pos2(self.config.origin[0], self.config.origin[1]);
        for (i, line) in lines.iter().enumerate() {
            painter.text(
                text_pos + egui::vec2(0.0, i as f32 * self.config.line_height()),
                egui::Align2::LEFT_TOP,
                line,
                font_id.clone(),
                egui::Color32::WHITE,
            );
        }
    }
}
