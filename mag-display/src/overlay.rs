//! Diagnostic overlay data.
//!
//! The render loop builds an [`OverlaySnapshot`] every frame and hands it to the overlay
//! renderer, which only draws the formatted [`OverlayLine`]s.

use mag_common::Vec2;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Overlay presentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Show the overlay at startup
    pub visible: bool,
    /// Font size in points
    pub font_size: f32,
    /// Line height as a multiple of the font size
    pub line_spacing: f32,
    /// Top-left corner of the text block in screen pixels
    pub origin: [f32; 2],
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            visible: true,
            font_size: 20.0,
            line_spacing: 1.1,
            origin: [12.0, 12.0],
        }
    }
}

impl OverlayConfig {
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_spacing
    }
}

/// Values shown by the overlay for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlaySnapshot {
    pub fps: u32,
    /// Pointer in viewport pixels
    pub pointer: Vec2,
    /// Texture pixel under the pointer
    pub texture_coord: Vec2,
    pub pan: Vec2,
    pub zoom: f64,
}

/// One label/value row of the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayLine {
    pub label: &'static str,
    pub value: String,
}

impl OverlayLine {
    /// Row text with labels padded to a common width.
    pub fn text(&self) -> String {
        format!("{:<7}: {}", self.label, self.value)
    }
}

fn format_pair(v: Vec2) -> String {
    format!("{:04.0}, {:04.0}", v.x, v.y)
}

impl OverlaySnapshot {
    pub fn lines(&self) -> Vec<OverlayLine> {
        vec![
            OverlayLine {
                label: "fps",
                value: self.fps.to_string(),
            },
            OverlayLine {
                label: "mouse",
                value: format_pair(self.pointer),
            },
            OverlayLine {
                label: "texture",
                value: format_pair(self.texture_coord),
            },
            OverlayLine {
                label: "pan",
                value: format_pair(self.pan),
            },
            OverlayLine {
                label: "zoom",
                value: format!("{:.2}", self.zoom),
            },
        ]
    }
}

/// Frames-per-second counter averaged over one-second windows.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_count: u32,
    window_start: Instant,
    current_fps: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            frame_count: 0,
            window_start: now,
            current_fps: 0,
        }
    }

    /// Count a frame presented at `now` and return the latest FPS value.
    pub fn tick(&mut self, now: Instant) -> u32 {
        self.frame_count += 1;
        let elapsed = now.saturating_duration_since(self.window_start);

        if elapsed >= Duration::from_secs(1) {
            self.current_fps = (f64::from(self.frame_count) / elapsed.as_secs_f64()).round() as u32;
            self.frame_count = 0;
            self.window_start = now;
        }

        self.current_fps
    }

    pub fn fps(&self) -> u32 {
        self.current_fps
    }
}
