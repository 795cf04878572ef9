//! Screen capture for the magnifier.
//!
//! The magnifier grabs the whole virtual desktop once at startup and then only pans and
//! zooms over that still image. This crate provides:
//!
//! - [`RgbaFrame`]: an owned, tightly packed RGBA8 frame
//! - [`MonitorSource`] and [`ScreenCapture`]: the seams between the application and the
//!   platform capture library
//! - [`XcapBackend`]: the implementation backed by the `xcap` crate
//! - [`compose`]: pastes per-monitor images into one virtual-desktop canvas
//!
//! # Example
//!
//! ```no_run
//! use mag_capture::{capture_region, MonitorSource, XcapBackend};
//! use mag_common::{Point, Size};
//!
//! # fn main() -> Result<(), mag_capture::CaptureError> {
//! let backend = XcapBackend::new()?;
//! let monitors = backend.monitors()?;
//! println!("{} monitors", monitors.len());
//!
//! let frame = capture_region(&backend, Point::new(0, 0), Size::new(1920, 1080))?;
//! assert_eq!(frame.dimensions(), (1920, 1080));
//! # Ok(())
//! # }
//! ```

mod backend;
mod compose;
mod error;
mod frame;

pub use backend::XcapBackend;
pub use compose::compose;
pub use error::{CaptureError, CaptureResult};
pub use frame::RgbaFrame;

use mag_common::{MonitorDescriptor, Point, Size};
use std::time::Instant;
use tracing::info;

/// Enumerates the displays attached to the system.
///
/// Implementations snapshot the monitor set; hot-plugging after startup is not tracked.
pub trait MonitorSource {
    /// Monitors in system enumeration order, `system_index` matching the position.
    fn monitors(&self) -> CaptureResult<Vec<MonitorDescriptor>>;

    /// System index of the main (primary) monitor.
    fn main_monitor(&self) -> CaptureResult<usize>;

    /// Physical pixels per logical point on a monitor.
    ///
    /// Sources without HiDPI information report 1.0.
    fn scale_factor(&self, system_index: usize) -> CaptureResult<f64> {
        let _ = system_index;
        Ok(1.0)
    }
}

/// Produces pixels for a rectangle of the virtual desktop.
pub trait ScreenCapture {
    /// Capture the region at `origin` (virtual-desktop coordinates) of the given size.
    ///
    /// Parts of the region not covered by any monitor are opaque black.
    fn capture(&self, origin: Point, size: Size) -> CaptureResult<RgbaFrame>;
}

/// Capture a region with size validation and timing.
pub fn capture_region<C: ScreenCapture + ?Sized>(
    capture: &C,
    origin: Point,
    size: Size,
) -> CaptureResult<RgbaFrame> {
    if size.is_empty() {
        return Err(CaptureError::EmptyRegion {
            width: size.width,
            height: size.height,
        });
    }

    let start = Instant::now();
    let frame = capture.capture(origin, size)?;
    info!(
        "Captured {}x{} at ({}, {}) in {:?}",
        frame.width(),
        frame.height(),
        origin.x,
        origin.y,
        start.elapsed()
    );
    Ok(frame)
}
