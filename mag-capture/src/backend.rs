//! Capture backend built on the `xcap` crate.

use crate::{compose, CaptureError, CaptureResult, MonitorSource, RgbaFrame, ScreenCapture};
use mag_common::{MonitorDescriptor, Point, Size};
use tracing::{debug, warn};
use xcap::Monitor;

/// Monitor enumeration and capture through `xcap`.
///
/// The monitor list is enumerated once in [`XcapBackend::new`]; the descriptors and the
/// captured images both come from that snapshot so indices stay consistent.
pub struct XcapBackend {
    monitors: Vec<Monitor>,
}

impl XcapBackend {
    pub fn new() -> CaptureResult<Self> {
        let monitors = Monitor::all().map_err(|e| CaptureError::Enumerate(e.to_string()))?;
        if monitors.is_empty() {
            return Err(CaptureError::NoMonitors);
        }
        for (index, monitor) in monitors.iter().enumerate() {
            debug!(
                "Monitor {} '{}': {}x{} at ({}, {}), scale {:.2}{}",
                index,
                monitor.name(),
                monitor.width(),
                monitor.height(),
                monitor.x(),
                monitor.y(),
                monitor.scale_factor(),
                if monitor.is_primary() { " [primary]" } else { "" }
            );
        }
        Ok(Self { monitors })
    }

    fn descriptor(index: usize, monitor: &Monitor) -> MonitorDescriptor {
        MonitorDescriptor::new(
            index,
            Point::new(monitor.x(), monitor.y()),
            Size::new(monitor.width(), monitor.height()),
        )
    }
}

impl MonitorSource for XcapBackend {
    fn monitors(&self) -> CaptureResult<Vec<MonitorDescriptor>> {
        Ok(self
            .monitors
            .iter()
            .enumerate()
            .map(|(index, monitor)| Self::descriptor(index, monitor))
            .collect())
    }

    fn main_monitor(&self) -> CaptureResult<usize> {
        match self.monitors.iter().position(Monitor::is_primary) {
            Some(index) => Ok(index),
            None => {
                warn!("No primary monitor reported, using monitor 0 as main");
                Ok(0)
            }
        }
    }

    fn scale_factor(&self, system_index: usize) -> CaptureResult<f64> {
        self.monitors
            .get(system_index)
            .map(|monitor| f64::from(monitor.scale_factor()))
            .ok_or(CaptureError::UnknownMonitor(system_index))
    }
}

impl ScreenCapture for XcapBackend {
    fn capture(&self, origin: Point, size: Size) -> CaptureResult<RgbaFrame> {
        let mut tiles = Vec::with_capacity(self.monitors.len());

        for (index, monitor) in self.monitors.iter().enumerate() {
            let image = monitor
                .capture_image()
                .map_err(|e| CaptureError::Capture {
                    index,
                    message: e.to_string(),
                })?;

            if image.width() != monitor.width() || image.height() != monitor.height() {
                // HiDPI backends may return physical pixels for a logical geometry
                warn!(
                    "Monitor {} captured as {}x{} but reports {}x{}",
                    index,
                    image.width(),
                    image.height(),
                    monitor.width(),
                    monitor.height()
                );
            }

            tiles.push((Point::new(monitor.x(), monitor.y()), image));
        }

        Ok(compose(origin, size, &tiles))
    }
}

impl std::fmt::Debug for XcapBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XcapBackend")
            .field("monitors", &self.monitors.len())
            .finish()
    }
}
