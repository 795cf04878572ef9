//! Spatial layout of physical monitors.
//!
//! The platform enumerates displays in its own order ("system index"). Users address
//! monitors left-to-right instead ("spatial index", 0 = leftmost), so this module sorts
//! the descriptors by horizontal position, exposes lookups in both directions, and
//! computes the extent of the combined virtual desktop used as the capture rectangle.

use mag_common::{MonitorDescriptor, Point, Size};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while resolving or addressing the monitor layout.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The descriptor source reported no displays at all.
    #[error("No monitors detected")]
    NoMonitorsDetected,

    /// A spatial or system index outside `[0, len)`.
    #[error("Monitor index {index} out of range (monitor count: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// An external selection that is not a monitor index.
    #[error("Invalid monitor selection: {0:?}")]
    InvalidSelection(String),
}

/// Left-to-right arrangement of the monitors and the virtual-desktop extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpatialArrangement {
    /// Descriptors in the order the source reported them
    monitors: Vec<MonitorDescriptor>,
    /// System indices sorted by ascending `position.x`
    order: Vec<usize>,
    total_width: u32,
    total_height: u32,
    main_monitor: usize,
}

impl SpatialArrangement {
    /// Resolve the arrangement for a set of descriptors.
    ///
    /// Monitors sharing the same `x` keep their input order. The height of the virtual
    /// desktop follows a single-pass row heuristic: a monitor whose `y` is strictly below
    /// every monitor seen so far starts a new row and adds its height; any other monitor
    /// shares the current row and can only raise it to its own height. This matches simple
    /// side-by-side and stacked layouts but is not a bounding-box union of the monitors.
    pub fn resolve(
        monitors: Vec<MonitorDescriptor>,
        main_monitor: usize,
    ) -> Result<Self, LayoutError> {
        if monitors.is_empty() {
            return Err(LayoutError::NoMonitorsDetected);
        }

        for monitor in &monitors {
            debug!(
                "Monitor {}: {}x{} | Position: ({},{})",
                monitor.system_index,
                monitor.resolution.width,
                monitor.resolution.height,
                monitor.position.x,
                monitor.position.y
            );
        }

        let mut sorted: Vec<&MonitorDescriptor> = monitors.iter().collect();
        // sort_by_key is stable, which is the tie-break for monitors sharing an x position
        sorted.sort_by_key(|monitor| monitor.position.x);

        let order: Vec<usize> = sorted.iter().map(|m| m.system_index).collect();
        let total_width = sorted.iter().map(|m| m.resolution.width).sum();

        let mut total_height = 0u32;
        let mut max_y = 0i32;
        for monitor in &sorted {
            if monitor.position.y > max_y {
                total_height += monitor.resolution.height;
                max_y = monitor.position.y;
            } else {
                total_height = total_height.max(monitor.resolution.height);
            }
        }

        info!(
            "Monitor order (left to right): {:?}, virtual desktop {}x{}, main monitor {}",
            order, total_width, total_height, main_monitor
        );

        Ok(Self {
            monitors,
            order,
            total_width,
            total_height,
            main_monitor,
        })
    }

    /// System indices from leftmost to rightmost.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Number of monitors in the arrangement.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false; an arrangement cannot be built from zero monitors.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total_width(&self) -> u32 {
        self.total_width
    }

    pub fn total_height(&self) -> u32 {
        self.total_height
    }

    /// System index of the display that had input focus at startup.
    pub fn main_monitor(&self) -> usize {
        self.main_monitor
    }

    /// Rectangle to capture: origin of the virtual desktop and its combined extent.
    pub fn virtual_desktop(&self) -> (Point, Size) {
        (Point::new(0, 0), Size::new(self.total_width, self.total_height))
    }

    /// Spatial index of the rightmost monitor, the default selection.
    pub fn rightmost(&self) -> usize {
        self.order.len() - 1
    }

    /// Map a spatial index (0 = leftmost) to the platform's system index.
    pub fn system_index(&self, spatial_index: usize) -> Result<usize, LayoutError> {
        self.order
            .get(spatial_index)
            .copied()
            .ok_or(LayoutError::IndexOutOfRange {
                index: spatial_index,
                len: self.order.len(),
            })
    }

    /// Map a system index back to its left-to-right position.
    pub fn spatial_index(&self, system_index: usize) -> Result<usize, LayoutError> {
        self.order
            .iter()
            .position(|&index| index == system_index)
            .ok_or(LayoutError::IndexOutOfRange {
                index: system_index,
                len: self.order.len(),
            })
    }

    /// Descriptor of the monitor with the given system index.
    pub fn descriptor(&self, system_index: usize) -> Result<&MonitorDescriptor, LayoutError> {
        self.monitors
            .iter()
            .find(|monitor| monitor.system_index == system_index)
            .ok_or(LayoutError::IndexOutOfRange {
                index: system_index,
                len: self.monitors.len(),
            })
    }

    /// Descriptor of the monitor at the given spatial index.
    pub fn descriptor_at_spatial(
        &self,
        spatial_index: usize,
    ) -> Result<&MonitorDescriptor, LayoutError> {
        self.system_index(spatial_index)
            .and_then(|system_index| self.descriptor(system_index))
    }

    /// Descriptors from leftmost to rightmost.
    pub fn iter_spatial(&self) -> impl Iterator<Item = &MonitorDescriptor> + '_ {
        self.order
            .iter()
            .filter_map(move |&system_index| self.descriptor(system_index).ok())
    }

    /// Resolve an external selection to a monitor, falling back to the rightmost one.
    ///
    /// `None` selects the rightmost monitor without reporting anything. Unparsable or
    /// out-of-range selections also land on the rightmost monitor, and the reason is kept
    /// in [`MonitorSelection::fallback`] for the caller to log.
    pub fn select(&self, requested: Option<&str>) -> MonitorSelection {
        let outcome = match requested {
            None => Ok(self.rightmost()),
            Some(raw) => parse_spatial_index(raw).and_then(|index| {
                if index < self.len() {
                    Ok(index)
                } else {
                    Err(LayoutError::IndexOutOfRange {
                        index,
                        len: self.len(),
                    })
                }
            }),
        };

        let (spatial_index, fallback) = match outcome {
            Ok(index) => (index, None),
            Err(err) => (self.rightmost(), Some(err)),
        };

        MonitorSelection {
            spatial_index,
            system_index: self.order[spatial_index],
            fallback,
        }
    }

    /// Human-readable description of the layout, one monitor per line.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Monitor layout: {} monitor{}, virtual desktop {}x{}",
            self.len(),
            if self.len() == 1 { "" } else { "s" },
            self.total_width,
            self.total_height
        );

        for (spatial_index, monitor) in self.iter_spatial().enumerate() {
            let main_marker = if monitor.system_index == self.main_monitor {
                " [MAIN]"
            } else {
                ""
            };
            summary.push_str(&format!(
                "\n  [{}] system {}: {}x{} at ({}, {}){}",
                spatial_index,
                monitor.system_index,
                monitor.resolution.width,
                monitor.resolution.height,
                monitor.position.x,
                monitor.position.y,
                main_marker
            ));
        }

        summary
    }
}

impl fmt::Display for SpatialArrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Result of resolving a user's monitor selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSelection {
    /// Chosen left-to-right index
    pub spatial_index: usize,
    /// Platform index of the chosen monitor
    pub system_index: usize,
    /// Why the request could not be honored, if it was replaced by the rightmost monitor
    pub fallback: Option<LayoutError>,
}

/// Parse an externally supplied spatial index such as a command-line value.
pub fn parse_spatial_index(raw: &str) -> Result<usize, LayoutError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| LayoutError::InvalidSelection(raw.to_string()))
}
