//! # mag-display: monitor layout and camera for the screen magnifier
//!
//! This crate holds the logic between the platform and the renderer:
//!
//! - **Spatial layout**: orders monitors left to right, maps spatial and system indices,
//!   and computes the virtual-desktop extent that gets captured
//! - **Camera**: smoothed pan/zoom with zoom-to-cursor anchoring and texture clamping,
//!   producing the source/destination rectangles for each frame
//! - **Overlay data**: the per-frame diagnostic snapshot and its formatting
//!
//! It never draws; the application feeds it input and consumes [`ViewportRects`].
//!
//! ## Example
//!
//! ```rust
//! use mag_common::{MonitorDescriptor, Point, Size, Vec2};
//! use mag_display::{CameraConfig, CameraController, InputSnapshot, SpatialArrangement};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let arrangement = SpatialArrangement::resolve(
//!     vec![
//!         MonitorDescriptor::new(0, Point::new(0, 0), Size::new(1920, 1080)),
//!         MonitorDescriptor::new(1, Point::new(1920, 0), Size::new(2560, 1440)),
//!     ],
//!     0,
//! )?;
//!
//! let selection = arrangement.select(None);
//! let target = arrangement.descriptor_at_spatial(selection.spatial_index)?;
//!
//! let mut camera = CameraController::new(CameraConfig::default(), target.position.to_vec2())?;
//! let texture = Size::new(arrangement.total_width(), arrangement.total_height()).to_vec2();
//! let viewport = target.resolution.to_vec2();
//!
//! let input = InputSnapshot { dt: 1.0 / 60.0, ..InputSnapshot::default() };
//! let frame = camera.update(&input, texture, viewport);
//! assert_eq!(frame.rects.dest.size(), viewport);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod camera;
mod monitor;
mod overlay;
mod texture;

pub use camera::{
    anchored_pan, clamp_pan, derive_rects, pointer_to_texture, smoothing_factor, CameraConfig,
    CameraConfigError, CameraController, CameraState, DragState, FrameOutput, InputSnapshot,
    ViewportRects,
};
pub use monitor::{parse_spatial_index, LayoutError, MonitorSelection, SpatialArrangement};
pub use overlay::{FpsCounter, OverlayConfig, OverlayLine, OverlaySnapshot};
pub use texture::{TextureConfig, TextureFilter, TextureWrap};

// Re-export the shared descriptor so callers need only this crate for layout work
pub use mag_common::MonitorDescriptor;
