//! platform-input: sample egui input once per frame for the magnifier
//!
//! [`InputDispatcher`] reads the frame's pointer, wheel and keyboard state from egui and
//! produces a [`FrameInput`]: the camera's [`InputSnapshot`] plus any triggered
//! [`ShortcutAction`]s. Pointer coordinates are converted from egui points to physical
//! pixels so that zoom 1.0 shows one captured pixel per screen pixel.

mod mouse;
mod shortcuts;

use mag_common::Vec2;
use mag_display::InputSnapshot;

pub use mouse::{ButtonMask, MouseState, PointerSample};
pub use shortcuts::{Modifier, Shortcut, ShortcutAction, ShortcutsConfig};

/// Everything the application needs from one frame of input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameInput {
    pub snapshot: InputSnapshot,
    pub actions: Vec<ShortcutAction>,
}

/// Input dispatcher state and helpers.
#[derive(Debug, Clone, Default)]
pub struct InputDispatcher {
    mouse: MouseState,
    shortcuts: ShortcutsConfig,
}

impl InputDispatcher {
    /// Create a dispatcher with the default shortcut bindings.
    pub fn new() -> Self {
        Self::with_shortcuts(ShortcutsConfig::default())
    }

    pub fn with_shortcuts(shortcuts: ShortcutsConfig) -> Self {
        Self {
            mouse: MouseState::new(),
            shortcuts,
        }
    }

    pub fn shortcuts(&self) -> &ShortcutsConfig {
        &self.shortcuts
    }

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    /// Read one frame of egui input.
    pub fn handle_frame(&mut self, input: &egui::InputState) -> FrameInput {
        let sample = pointer_sample(input);
        FrameInput {
            snapshot: self.mouse.update(&sample),
            actions: self.shortcuts.process_events(&input.events),
        }
    }
}

/// Translate egui's pointer state into a [`PointerSample`] in physical pixels.
pub fn pointer_sample(input: &egui::InputState) -> PointerSample {
    let scale = f64::from(input.pixels_per_point);
    let pointer = &input.pointer;

    let mut pressed = ButtonMask::empty();
    let mut released = ButtonMask::empty();
    let mut buttons = ButtonMask::empty();
    for (button, mask) in [
        (egui::PointerButton::Primary, ButtonMask::PRIMARY),
        (egui::PointerButton::Secondary, ButtonMask::SECONDARY),
        (egui::PointerButton::Middle, ButtonMask::MIDDLE),
    ] {
        buttons.set(mask, pointer.button_down(button));
        pressed.set(mask, pointer.button_pressed(button));
        released.set(mask, pointer.button_released(button));
    }

    PointerSample {
        position: pointer
            .hover_pos()
            .map(|pos| Vec2::new(f64::from(pos.x), f64::from(pos.y)) * scale),
        buttons,
        pressed,
        released,
        wheel: f64::from(input.raw_scroll_delta.y),
        dt: f64::from(input.unstable_dt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, Event, PointerButton, RawInput};

    fn run_frame(ctx: &egui::Context, dispatcher: &mut InputDispatcher, events: Vec<Event>) -> FrameInput {
        let mut frame = FrameInput::default();
        let raw = RawInput {
            events,
            ..RawInput::default()
        };
        let _ = ctx.run(raw, |ctx| {
            frame = ctx.input(|i| dispatcher.handle_frame(i));
        });
        frame
    }

    #[test]
    fn test_drag_from_egui_events() {
        let ctx = egui::Context::default();
        let mut dispatcher = InputDispatcher::new();

        let frame = run_frame(
            &ctx,
            &mut dispatcher,
            vec![
                Event::PointerMoved(pos2(100.0, 50.0)),
                Event::PointerButton {
                    pos: pos2(100.0, 50.0),
                    button: PointerButton::Primary,
                    pressed: true,
                    modifiers: egui::Modifiers::NONE,
                },
            ],
        );
        assert!(frame.snapshot.drag_started);
        assert_eq!(frame.snapshot.pointer, Vec2::new(100.0, 50.0));
        assert!(frame.actions.is_empty());

        let frame = run_frame(
            &ctx,
            &mut dispatcher,
            vec![
                Event::PointerMoved(pos2(120.0, 50.0)),
                Event::PointerButton {
                    pos: pos2(120.0, 50.0),
                    button: PointerButton::Primary,
                    pressed: false,
                    modifiers: egui::Modifiers::NONE,
                },
            ],
        );
        assert!(frame.snapshot.drag_ended);
        assert_eq!(frame.snapshot.pointer, Vec2::new(120.0, 50.0));
    }

    #[test]
    fn test_wheel_sign() {
        let ctx = egui::Context::default();
        let mut dispatcher = InputDispatcher::new();

        let frame = run_frame(
            &ctx,
            &mut dispatcher,
            vec![
                Event::PointerMoved(pos2(10.0, 10.0)),
                Event::Scroll(egui::vec2(0.0, 50.0)),
            ],
        );
        assert!(frame.snapshot.wheel > 0.0);
    }
}
