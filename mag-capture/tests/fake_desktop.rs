//! Capture pipeline tests against an in-memory desktop.

use image::{Rgba, RgbaImage};
use mag_capture::{
    capture_region, compose, CaptureError, CaptureResult, MonitorSource, RgbaFrame,
    ScreenCapture,
};
use mag_common::{MonitorDescriptor, Point, Size};
use mag_display::{LayoutError, SpatialArrangement};
use pretty_assertions::assert_eq;

/// Monitors painted in a solid color each, enumerated out of left-to-right order.
struct FakeDesktop {
    monitors: Vec<(MonitorDescriptor, [u8; 4])>,
    primary: Option<usize>,
}

impl FakeDesktop {
    fn three_monitors() -> Self {
        Self {
            monitors: vec![
                (
                    MonitorDescriptor::new(0, Point::new(1920, 0), Size::new(2560, 1440)),
                    [0, 255, 0, 255],
                ),
                (
                    MonitorDescriptor::new(1, Point::new(0, 0), Size::new(1920, 1080)),
                    [255, 0, 0, 255],
                ),
                (
                    MonitorDescriptor::new(2, Point::new(4480, 0), Size::new(1920, 1080)),
                    [0, 0, 255, 255],
                ),
            ],
            primary: Some(1),
        }
    }
}

impl MonitorSource for FakeDesktop {
    fn monitors(&self) -> CaptureResult<Vec<MonitorDescriptor>> {
        Ok(self.monitors.iter().map(|(m, _)| *m).collect())
    }

    fn main_monitor(&self) -> CaptureResult<usize> {
        Ok(self.primary.unwrap_or(0))
    }
}

impl ScreenCapture for FakeDesktop {
    fn capture(&self, origin: Point, size: Size) -> CaptureResult<RgbaFrame> {
        let tiles: Vec<(Point, RgbaImage)> = self
            .monitors
            .iter()
            .map(|(m, color)| {
                (
                    m.position,
                    RgbaImage::from_pixel(m.resolution.width, m.resolution.height, Rgba(*color)),
                )
            })
            .collect();
        Ok(compose(origin, size, &tiles))
    }
}

#[test]
fn virtual_desktop_capture_places_every_monitor() {
    let desktop = FakeDesktop::three_monitors();
    assert_eq!(desktop.main_monitor().unwrap(), 1);
    // No HiDPI information: one pixel per point
    assert_eq!(desktop.scale_factor(0).unwrap(), 1.0);

    let frame = capture_region(&desktop, Point::new(0, 0), Size::new(6400, 1440)).unwrap();
    assert_eq!(frame.dimensions(), (6400, 1440));
    assert_eq!(frame.pixel(100, 100), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(3000, 1400), Some([0, 255, 0, 255]));
    assert_eq!(frame.pixel(6399, 1079), Some([0, 0, 255, 255]));
    // Under the 1080p monitors the canvas stays black
    assert_eq!(frame.pixel(100, 1300), Some([0, 0, 0, 255]));
}

#[test]
fn single_monitor_region() {
    let desktop = FakeDesktop::three_monitors();
    let frame = capture_region(&desktop, Point::new(4480, 0), Size::new(1920, 1080)).unwrap();
    assert_eq!(frame.size(), Size::new(1920, 1080));
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 255, 255]));
}

#[test]
fn empty_region_is_rejected() {
    let desktop = FakeDesktop::three_monitors();
    let err = capture_region(&desktop, Point::new(0, 0), Size::new(0, 1080)).unwrap_err();
    assert!(matches!(
        err,
        CaptureError::EmptyRegion {
            width: 0,
            height: 1080
        }
    ));
}

#[test]
fn empty_desktop_fails_layout_resolution() {
    let desktop = FakeDesktop {
        monitors: Vec::new(),
        primary: None,
    };
    let monitors = desktop.monitors().unwrap();
    let main = desktop.main_monitor().unwrap();
    assert_eq!(
        SpatialArrangement::resolve(monitors, main),
        Err(LayoutError::NoMonitorsDetected)
    );
}

#[test]
fn fake_desktop_resolves_left_to_right() {
    let desktop = FakeDesktop::three_monitors();
    let arrangement =
        SpatialArrangement::resolve(desktop.monitors().unwrap(), desktop.main_monitor().unwrap())
            .unwrap();
    assert_eq!(arrangement.order(), &[1, 0, 2]);

    // The arrangement's capture rectangle is exactly what the desktop composes
    let (origin, size) = arrangement.virtual_desktop();
    let frame = capture_region(&desktop, origin, size).unwrap();
    assert_eq!(frame.size(), Size::new(6400, 1440));
}
