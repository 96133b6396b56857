//! Adapters which feed the input pipeline into a retained-mode UI view.
//!
//! The UI layer usually sits at the top of the handler chains, so it sees
//! input before the game does. Its keyboard handler claims the keys the view
//! accepts. Its mouse handler only observes, so pointer input always reaches
//! the game as well.

mod keyboard;
mod mouse;

pub use keyboard::*;
pub use mouse::*;

use crate::input::{keyboard::KeyCode, mouse::MouseButton};

/// A UI view which accepts input notifications.
///
/// Every method returns `true` if the view handled the notification.
pub trait UiView {
    fn key_down(&mut self, key: KeyCode) -> bool;

    fn key_up(&mut self, key: KeyCode) -> bool;

    fn mouse_move(&mut self, x: i32, y: i32) -> bool;

    /// The wheel moved by `delta` with the pointer at `(x, y)`.
    fn mouse_wheel(&mut self, x: i32, y: i32, delta: i32) -> bool;

    fn mouse_button_down(&mut self, x: i32, y: i32, button: MouseButton) -> bool;

    fn mouse_button_up(&mut self, x: i32, y: i32, button: MouseButton) -> bool;

    fn mouse_double_click(&mut self, x: i32, y: i32, button: MouseButton) -> bool;
}
