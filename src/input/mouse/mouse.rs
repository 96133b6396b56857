//! Mouse level state, folded from discrete mouse events.

use super::MouseButton;
use crate::{errors::Result, input::MouseStateReader};

use ::tracing::trace;

/// A snapshot of the mouse, as polled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    /// The absolute wheel value, accumulated since the reader was created.
    pub scroll_wheel: i32,
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl MouseState {
    /// Returns `true` if the button is down.
    pub const fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }

    fn set_pressed(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Middle => self.middle = pressed,
        }
    }
}

/// A mouse change reported by the host platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseEvent {
    Move { x: i32, y: i32 },
    /// The wheel turned by `delta`.
    Wheel { delta: i32 },
    ButtonDown { button: MouseButton },
    ButtonUp { button: MouseButton },
}

/// Tracks the mouse for hosts which learn about it through discrete OS
/// messages, and presents it as a polled [`MouseState`].
///
/// ```
/// use ::switchyard::input::{
///     mouse::{Mouse, MouseButton, MouseEvent},
///     MouseStateReader,
/// };
///
/// let mut mouse = Mouse::new();
/// mouse.process_evt(MouseEvent::Wheel { delta: 120 });
/// mouse.process_evt(MouseEvent::Wheel { delta: 120 });
/// mouse.process_evt(MouseEvent::ButtonDown { button: MouseButton::Left });
///
/// let state = mouse.mouse_state().unwrap();
/// assert_eq!(state.scroll_wheel, 240);
/// assert!(state.left);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Mouse {
    state: MouseState,
}

impl Mouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an event from the host platform and update internal state.
    pub fn process_evt(&mut self, evt: MouseEvent) {
        match evt {
            MouseEvent::Move { x, y } => {
                self.state.x = x;
                self.state.y = y;
            }
            MouseEvent::Wheel { delta } => {
                self.state.scroll_wheel = self.state.scroll_wheel.wrapping_add(delta);
            }
            MouseEvent::ButtonDown { button } => {
                trace!(%button, "Mouse button down");
                self.state.set_pressed(button, true);
            }
            MouseEvent::ButtonUp { button } => {
                trace!(%button, "Mouse button up");
                self.state.set_pressed(button, false);
            }
        }
    }

    /// Releases every button, for example when the host window loses focus.
    /// Position and wheel are kept.
    pub fn reset(&mut self) {
        self.state = MouseState {
            x: self.state.x,
            y: self.state.y,
            scroll_wheel: self.state.scroll_wheel,
            ..MouseState::default()
        };
    }
}

impl MouseStateReader for Mouse {
    fn mouse_state(&mut self) -> Result<MouseState> {
        Ok(self.state)
    }
}
