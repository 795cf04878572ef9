use bitflags::bitflags;
use mag_common::Vec2;
use mag_display::InputSnapshot;
use tracing::trace;

bitflags! {
    /// Pointer buttons held during a frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ButtonMask: u8 {
        const PRIMARY   = 1 << 0;
        const SECONDARY = 1 << 1;
        const MIDDLE    = 1 << 2;
    }
}

/// Raw pointer values read from the windowing layer for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    /// Pointer position in window pixels, `None` when outside the window
    pub position: Option<Vec2>,
    /// Buttons currently held
    pub buttons: ButtonMask,
    /// Buttons that went down during the frame, even if released again before it ended
    pub pressed: ButtonMask,
    /// Buttons that went up during the frame
    pub released: ButtonMask,
    /// Vertical wheel movement, positive away from the user
    pub wheel: f64,
    /// Seconds since the previous frame
    pub dt: f64,
}

/// Tracks pointer state across frames and turns samples into [`InputSnapshot`]s.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Vec2,
    buttons: ButtonMask,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known pointer position.
    pub fn pos(&self) -> Vec2 {
        self.position
    }

    pub fn buttons(&self) -> ButtonMask {
        self.buttons
    }

    /// Fold one frame's sample into the state and build the camera input.
    ///
    /// The last known position is kept while the pointer is outside the window, so a drag
    /// that leaves the window does not jump when it comes back.
    pub fn update(&mut self, sample: &PointerSample) -> InputSnapshot {
        if let Some(position) = sample.position {
            self.position = position;
        }

        let drag_started = sample.pressed.contains(ButtonMask::PRIMARY);
        let drag_ended = sample.released.contains(ButtonMask::PRIMARY)
            && !sample.buttons.contains(ButtonMask::PRIMARY);

        if drag_started || drag_ended {
            trace!(
                "Primary button {} at ({:.1}, {:.1})",
                if drag_started { "down" } else { "up" },
                self.position.x,
                self.position.y
            );
        }

        self.buttons = sample.buttons;

        InputSnapshot {
            pointer: self.position,
            drag_started,
            drag_ended,
            wheel: sample.wheel,
            dt: sample.dt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_press_and_release_edges() {
        let mut mouse = MouseState::new();

        let press = mouse.update(&PointerSample {
            position: Some(Vec2::new(10.0, 20.0)),
            buttons: ButtonMask::PRIMARY,
            pressed: ButtonMask::PRIMARY,
            dt: 0.016,
            ..PointerSample::default()
        });
        assert!(press.drag_started);
        assert!(!press.drag_ended);
        assert_eq!(press.pointer, Vec2::new(10.0, 20.0));
        assert_eq!(mouse.buttons(), ButtonMask::PRIMARY);

        let held = mouse.update(&PointerSample {
            position: Some(Vec2::new(15.0, 20.0)),
            buttons: ButtonMask::PRIMARY,
            ..PointerSample::default()
        });
        assert!(!held.drag_started && !held.drag_ended);

        let release = mouse.update(&PointerSample {
            position: Some(Vec2::new(15.0, 20.0)),
            released: ButtonMask::PRIMARY,
            ..PointerSample::default()
        });
        assert!(release.drag_ended);
        assert!(mouse.buttons().is_empty());
    }

    #[test]
    fn test_keeps_last_position_outside_window() {
        let mut mouse = MouseState::new();
        mouse.update(&PointerSample {
            position: Some(Vec2::new(300.0, 200.0)),
            ..PointerSample::default()
        });
        let outside = mouse.update(&PointerSample {
            position: None,
            wheel: 1.0,
            ..PointerSample::default()
        });
        assert_eq!(outside.pointer, Vec2::new(300.0, 200.0));
        assert_eq!(outside.wheel, 1.0);
    }

    #[test]
    fn test_secondary_button_does_not_drag() {
        let mut mouse = MouseState::new();
        let snapshot = mouse.update(&PointerSample {
            buttons: ButtonMask::SECONDARY,
            pressed: ButtonMask::SECONDARY,
            ..PointerSample::default()
        });
        assert!(!snapshot.drag_started);
    }

    #[test]
    fn test_quick_click_within_one_frame() {
        // Down and up inside a single frame: drag starts and ends, target moves by zero
        let mut mouse = MouseState::new();
        let snapshot = mouse.update(&PointerSample {
            position: Some(Vec2::new(5.0, 5.0)),
            pressed: ButtonMask::PRIMARY,
            released: ButtonMask::PRIMARY,
            ..PointerSample::default()
        });
        assert!(snapshot.drag_started);
        assert!(snapshot.drag_ended);
    }
}
