//! A stand-in for a UI view: an in-game HUD with a toggleable help overlay.

use ::std::{cell::Cell, rc::Rc};
use ::switchyard::{
    input::{keyboard::KeyCode, mouse::MouseButton},
    ui::UiView,
};
use ::tracing::info;

/// Handles are cheap clones sharing one HUD, so the same HUD can be attached
/// to both the keyboard and the mouse view handler.
#[derive(Clone, Debug, Default)]
pub struct Hud {
    help_visible: Rc<Cell<bool>>,
}

impl UiView for Hud {
    fn key_down(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::F1 => {
                self.help_visible.set(!self.help_visible.get());
                info!(visible = self.help_visible.get(), "Toggled help overlay");
                true
            }
            KeyCode::Escape if self.help_visible.get() => {
                self.help_visible.set(false);
                info!("Closed help overlay");
                true
            }
            _ => false,
        }
    }

    fn key_up(&mut self, _key: KeyCode) -> bool {
        true
    }

    fn mouse_move(&mut self, x: i32, y: i32) -> bool {
        info!(x, y, "HUD pointer moved");
        false
    }

    fn mouse_wheel(&mut self, _x: i32, _y: i32, delta: i32) -> bool {
        info!(delta, "HUD scrolled");
        true
    }

    fn mouse_button_down(&mut self, x: i32, y: i32, button: MouseButton) -> bool {
        info!(x, y, %button, "HUD clicked");
        true
    }

    fn mouse_button_up(&mut self, _x: i32, _y: i32, _button: MouseButton) -> bool {
        true
    }

    fn mouse_double_click(&mut self, x: i32, y: i32, button: MouseButton) -> bool {
        info!(x, y, %button, "HUD double clicked");
        true
    }
}
