//! Change detection over a whole mouse: pointer position, wheel and buttons.

use super::{ButtonTracker, ButtonTransition, MouseButton};
use crate::config::Config;

use ::std::time::Duration;
use ::strum::{EnumCount, IntoEnumIterator};
use ::tracing::trace;

/// A discrete mouse change, positioned at the pointer location of the tick in
/// which it was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseNotification {
    Move { x: i32, y: i32 },
    /// The wheel moved by `delta` since the last wheel notification.
    Wheel { x: i32, y: i32, delta: i32 },
    ButtonDown { x: i32, y: i32, button: MouseButton },
    ButtonUp { x: i32, y: i32, button: MouseButton },
    DoubleClick { x: i32, y: i32, button: MouseButton },
}

/// Folds one tick's worth of sampled mouse state into [`MouseNotification`]s.
///
/// A sample is taken in three steps: [`prepare`] resets the sample to "no
/// change and no buttons down", the `set_*` and [`press`] methods fill it in,
/// and [`update`] compares it with the previous tick and reports what
/// changed.
///
/// [`prepare`]: Self::prepare
/// [`press`]: Self::press
/// [`update`]: Self::update
#[derive(Clone, Debug)]
pub struct MouseTracker {
    double_click_window: Duration,
    x: i32,
    y: i32,
    wheel: i32,
    new_x: i32,
    new_y: i32,
    new_wheel: i32,
    buttons: [ButtonTracker; MouseButton::COUNT],
}

impl Default for MouseTracker {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl MouseTracker {
    pub fn new(config: &Config) -> Self {
        Self {
            double_click_window: config.double_click_window(),
            x: 0,
            y: 0,
            wheel: 0,
            new_x: 0,
            new_y: 0,
            new_wheel: 0,
            buttons: [ButtonTracker::new(); MouseButton::COUNT],
        }
    }

    /// Starts a new sample. Position and wheel carry over from the last
    /// notified values, and every button is assumed up.
    pub fn prepare(&mut self) {
        self.new_x = self.x;
        self.new_y = self.y;
        self.new_wheel = self.wheel;
        for button in self.buttons.iter_mut() {
            button.prepare();
        }
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.new_x = x;
        self.new_y = y;
    }

    /// Records the absolute wheel value of the current sample.
    pub fn set_wheel(&mut self, wheel: i32) {
        self.new_wheel = wheel;
    }

    pub fn press(&mut self, button: MouseButton) {
        self.buttons[button.index()].press();
    }

    /// The pointer position as of the last [`update`](Self::update).
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Returns `true` if the button was down as of the last
    /// [`update`](Self::update).
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].is_pressed()
    }

    /// Completes the current sample and returns the changes since the
    /// previous one: a move, then a wheel change, then button transitions in
    /// [`MouseButton`] order.
    pub fn update(&mut self, time: Duration) -> Vec<MouseNotification> {
        let mut notifications = Vec::new();
        let (x, y) = (self.new_x, self.new_y);

        if (x, y) != (self.x, self.y) {
            notifications.push(MouseNotification::Move { x, y });
            self.x = x;
            self.y = y;
        }

        if self.new_wheel != self.wheel {
            notifications.push(MouseNotification::Wheel {
                x,
                y,
                delta: self.new_wheel.wrapping_sub(self.wheel),
            });
            self.wheel = self.new_wheel;
        }

        for button in MouseButton::iter() {
            let transition = self.buttons[button.index()].update(time, self.double_click_window);
            if let Some(transition) = transition {
                notifications.push(match transition {
                    ButtonTransition::Down => MouseNotification::ButtonDown { x, y, button },
                    ButtonTransition::Up => MouseNotification::ButtonUp { x, y, button },
                    ButtonTransition::DoubleClick => {
                        MouseNotification::DoubleClick { x, y, button }
                    }
                });
            }
        }

        if !notifications.is_empty() {
            trace!(?notifications, "Mouse changed");
        }
        notifications
    }
}
