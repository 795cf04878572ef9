//! Camera management for pan and zoom over the captured desktop texture.
//!
//! The camera keeps a current and a target value for both pan and zoom. Input (drag and
//! wheel) only moves the targets; every frame the current values follow the targets with
//! frame-rate independent exponential smoothing, are clamped against the texture bounds,
//! and are turned into the source/destination rectangles handed to the renderer.
//!
//! Pan is the texture-space coordinate drawn at the viewport's top-left corner, so the
//! view transform is `screen = (texture - pan) * zoom` and its inverse is
//! [`pointer_to_texture`].

use mag_common::{RectF, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors for camera configuration values that cannot produce a stable camera.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CameraConfigError {
    #[error("{0} must be a finite positive number")]
    NotPositive(&'static str),

    #[error("min_zoom ({min}) must not exceed max_zoom ({max})")]
    InvertedZoomRange { min: f64, max: f64 },

    #[error("zoom_factor must be greater than 1.0 (got {0})")]
    ZoomFactor(f64),
}

/// Configuration for camera behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Minimum zoom level (1.0 = one texture pixel per screen pixel)
    pub min_zoom: f64,
    /// Maximum zoom level
    pub max_zoom: f64,
    /// Multiplier applied to the target zoom per wheel notch
    pub zoom_factor: f64,
    /// Rate constant `k` of the `1 - e^(-k*dt)` smoothing factor
    pub smoothing_rate: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 300.0,
            zoom_factor: 1.05,
            smoothing_rate: 7.5,
        }
    }
}

impl CameraConfig {
    /// Check that the configuration describes a usable camera.
    pub fn validate(&self) -> Result<(), CameraConfigError> {
        let positive = |value: f64| value.is_finite() && value > 0.0;

        if !positive(self.min_zoom) {
            return Err(CameraConfigError::NotPositive("min_zoom"));
        }
        if !positive(self.max_zoom) {
            return Err(CameraConfigError::NotPositive("max_zoom"));
        }
        if self.min_zoom > self.max_zoom {
            return Err(CameraConfigError::InvertedZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if !(self.zoom_factor.is_finite() && self.zoom_factor > 1.0) {
            return Err(CameraConfigError::ZoomFactor(self.zoom_factor));
        }
        if !positive(self.smoothing_rate) {
            return Err(CameraConfigError::NotPositive("smoothing_rate"));
        }
        Ok(())
    }

    /// Clamp a zoom value into `[min_zoom, max_zoom]`.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

/// Current and target pan/zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Texture-space point drawn at the viewport origin
    pub pan: Vec2,
    pub target_pan: Vec2,
    pub zoom: f64,
    pub target_zoom: f64,
}

impl CameraState {
    /// State looking at `origin` at 1:1 zoom with nothing in flight.
    pub fn at(origin: Vec2) -> Self {
        Self {
            pan: origin,
            target_pan: origin,
            zoom: 1.0,
            target_zoom: 1.0,
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::at(Vec2::ZERO)
    }
}

impl fmt::Display for CameraState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Camera(zoom={:.2}->{:.2}, pan={:.1},{:.1}->{:.1},{:.1})",
            self.zoom,
            self.target_zoom,
            self.pan.x,
            self.pan.y,
            self.target_pan.x,
            self.target_pan.y
        )
    }
}

/// Whether the pointer is currently dragging the view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Dragging; holds the pointer position seen on the previous frame
    Dragging { last_pointer: Vec2 },
}

/// Rectangles handed to the presentation layer for one textured draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRects {
    /// Region of the texture to sample, in texture pixels
    pub source: RectF,
    /// Region of the window to draw into, in screen pixels
    pub dest: RectF,
}

/// Input sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Pointer position in viewport pixels
    pub pointer: Vec2,
    /// Primary button went down this frame
    pub drag_started: bool,
    /// Primary button went up this frame
    pub drag_ended: bool,
    /// Signed wheel movement; only the sign is used
    pub wheel: f64,
    /// Seconds elapsed since the previous frame
    pub dt: f64,
}

/// Everything the render loop needs after one camera update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub rects: ViewportRects,
    /// Texture pixel currently under the pointer
    pub pointer_on_texture: Vec2,
}

/// Map a pointer position in the viewport to texture space.
pub fn pointer_to_texture(pointer: Vec2, pan: Vec2, zoom: f64) -> Vec2 {
    pointer / zoom + pan
}

/// Pan that keeps texture point `anchor` under the same screen pixel when zoom goes from
/// `previous_zoom` to `next_zoom`, given the pan in effect before the change.
pub fn anchored_pan(anchor: Vec2, previous_zoom: f64, next_zoom: f64, previous_pan: Vec2) -> Vec2 {
    anchor - (anchor - previous_pan) * (previous_zoom / next_zoom)
}

/// Interpolation weight for a frame of `dt` seconds; 0 for non-positive or NaN `dt`.
pub fn smoothing_factor(rate: f64, dt: f64) -> f64 {
    if dt > 0.0 {
        1.0 - (-rate * dt).exp()
    } else {
        0.0
    }
}

/// Constrain `pan` so the sampled region stays inside the texture.
///
/// On an axis where the visible extent covers the whole texture the view is centered
/// instead, which yields a negative pan.
pub fn clamp_pan(pan: Vec2, zoom: f64, texture: Vec2, viewport: Vec2) -> Vec2 {
    let visible = viewport / zoom;
    Vec2::new(
        clamp_axis(pan.x, visible.x, texture.x),
        clamp_axis(pan.y, visible.y, texture.y),
    )
}

fn clamp_axis(pan: f64, visible: f64, texture: f64) -> f64 {
    if visible >= texture {
        (texture - visible) / 2.0
    } else {
        pan.max(0.0).min(texture - visible)
    }
}

/// Source and destination rectangles for the given camera values.
pub fn derive_rects(pan: Vec2, zoom: f64, viewport: Vec2) -> ViewportRects {
    ViewportRects {
        source: RectF::from_origin_size(pan, viewport / zoom),
        dest: RectF::from_origin_size(Vec2::ZERO, viewport),
    }
}

/// Pan/zoom controller driven by per-frame input.
pub struct CameraController {
    config: CameraConfig,
    state: CameraState,
    drag: DragState,
}

impl CameraController {
    /// Create a controller looking at `origin` (texture space) at 1:1 zoom.
    pub fn new(config: CameraConfig, origin: Vec2) -> Result<Self, CameraConfigError> {
        config.validate()?;
        debug!("Creating camera at ({:.1}, {:.1}) with {:?}", origin.x, origin.y, config);
        let mut state = CameraState::at(origin);
        state.zoom = config.clamp_zoom(state.zoom);
        state.target_zoom = state.zoom;
        Ok(Self {
            config,
            state,
            drag: DragState::Idle,
        })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn zoom(&self) -> f64 {
        self.state.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.state.pan
    }

    /// Start dragging from `pointer`.
    pub fn begin_drag(&mut self, pointer: Vec2) {
        trace!("Drag started at ({:.1}, {:.1})", pointer.x, pointer.y);
        self.drag = DragState::Dragging {
            last_pointer: pointer,
        };
    }

    pub fn end_drag(&mut self) {
        if self.is_dragging() {
            trace!("Drag ended");
        }
        self.drag = DragState::Idle;
    }

    /// Feed the pointer position for this frame while dragging.
    ///
    /// The view moves opposite to the pointer: dragging right reveals content on the left.
    pub fn drag_to(&mut self, pointer: Vec2) {
        if let DragState::Dragging { last_pointer } = self.drag {
            let delta = pointer - last_pointer;
            self.state.target_pan = self.state.target_pan - delta / self.state.zoom;
            self.drag = DragState::Dragging {
                last_pointer: pointer,
            };
        }
    }

    /// Step the target zoom by one wheel notch and re-anchor the pan on the pointer.
    pub fn apply_wheel(&mut self, delta: f64, pointer: Vec2) {
        if delta == 0.0 || delta.is_nan() {
            return;
        }

        let previous_zoom = self.state.zoom;
        let anchor = pointer_to_texture(pointer, self.state.pan, previous_zoom);

        let stepped = if delta > 0.0 {
            self.state.target_zoom * self.config.zoom_factor
        } else {
            self.state.target_zoom / self.config.zoom_factor
        };
        self.state.target_zoom = self.config.clamp_zoom(stepped);
        self.state.target_pan = anchored_pan(
            anchor,
            previous_zoom,
            self.state.target_zoom,
            self.state.pan,
        );

        debug!(
            "Wheel {:+}: target zoom {:.3}, anchored on ({:.1}, {:.1})",
            delta, self.state.target_zoom, anchor.x, anchor.y
        );
    }

    /// Move current pan/zoom toward their targets for a frame of `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        let s = smoothing_factor(self.config.smoothing_rate, dt);
        if s == 0.0 {
            return;
        }
        self.state.zoom += (self.state.target_zoom - self.state.zoom) * s;
        self.state.pan = self.state.pan + (self.state.target_pan - self.state.pan) * s;
    }

    /// Clamp the current pan against the texture and viewport sizes.
    ///
    /// Only the current pan is clamped here; [`update`](Self::update) also clamps the
    /// target while a drag is in progress.
    pub fn clamp_to_bounds(&mut self, texture: Vec2, viewport: Vec2) {
        self.state.pan = clamp_pan(self.state.pan, self.state.zoom, texture, viewport);
    }

    /// Rectangles for the current state.
    pub fn rects(&self, viewport: Vec2) -> ViewportRects {
        derive_rects(self.state.pan, self.state.zoom, viewport)
    }

    /// Texture point under a viewport pointer position with the current state.
    pub fn pointer_to_texture(&self, pointer: Vec2) -> Vec2 {
        pointer_to_texture(pointer, self.state.pan, self.state.zoom)
    }

    /// Animate back to 1:1 zoom looking at `origin`.
    pub fn reset_view(&mut self, origin: Vec2) {
        debug!("Resetting view to ({:.1}, {:.1})", origin.x, origin.y);
        self.state.target_pan = origin;
        self.state.target_zoom = self.config.clamp_zoom(1.0);
    }

    /// Run one frame: drag and wheel input, smoothing, clamping, then rectangles.
    pub fn update(&mut self, input: &InputSnapshot, texture: Vec2, viewport: Vec2) -> FrameOutput {
        if input.drag_started {
            self.begin_drag(input.pointer);
        }
        if input.drag_ended {
            self.end_drag();
        }
        if self.is_dragging() {
            self.drag_to(input.pointer);
            // Keep the drag target reachable so reversing at an edge moves the view at once
            self.state.target_pan =
                clamp_pan(self.state.target_pan, self.state.target_zoom, texture, viewport);
        }
        self.apply_wheel(input.wheel, input.pointer);

        self.tick(input.dt);
        self.clamp_to_bounds(texture, viewport);

        trace!("{}", self.state);

        FrameOutput {
            rects: self.rects(viewport),
            pointer_on_texture: self.pointer_to_texture(input.pointer),
        }
    }
}

impl fmt::Debug for CameraController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("drag", &self.drag)
            .finish()
    }
}
