//! Mouse buttons and per-button edge detection.

use ::std::time::Duration;
use ::strum::{Display, EnumCount, EnumIter};

/// A mouse button which the input pipeline tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// A discrete change in a button's state, as detected by a [`ButtonTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonTransition {
    Down,
    /// A press which followed the previous release closely enough to pair
    /// with it. Reported instead of [`Down`](Self::Down).
    DoubleClick,
    Up,
}

/// Converts a button's level state, sampled once per tick, into discrete
/// transitions.
///
/// Each tick the tracker is first [`prepare`]d, which assumes the button is
/// up, then [`press`]ed if the sample says otherwise, and finally
/// [`update`]d, which compares the sample with the previous tick's.
///
/// Since the state is sampled, a press and release which both happen between
/// two ticks are never observed.
///
/// [`prepare`]: Self::prepare
/// [`press`]: Self::press
/// [`update`]: Self::update
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonTracker {
    pressed: bool,
    last_pressed: bool,
    /// When the button was last released. `None` if no release is available
    /// to pair with, either because none happened yet or because the last
    /// one was already used up by a double click.
    last_release: Option<Duration>,
}

impl ButtonTracker {
    pub const fn new() -> Self {
        Self {
            pressed: false,
            last_pressed: false,
            last_release: None,
        }
    }

    /// Starts a new sample, in which the button is up unless
    /// [`press`](Self::press) is called.
    pub fn prepare(&mut self) {
        self.pressed = false;
    }

    /// Marks the button as down in the current sample.
    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Returns `true` if the button was down in the last completed sample.
    pub fn is_pressed(&self) -> bool {
        self.last_pressed
    }

    /// Completes the current sample, and reports the transition since the
    /// previous one, if any.
    ///
    /// A press is reported as a double click if it happens strictly less
    /// than `double_click_window` after the previous release. That release
    /// is then consumed, so a third press cannot pair with it again.
    pub fn update(
        &mut self,
        now: Duration,
        double_click_window: Duration,
    ) -> Option<ButtonTransition> {
        let transition = match (self.last_pressed, self.pressed) {
            (false, true) => match self.last_release.take() {
                Some(released) if now.saturating_sub(released) < double_click_window => {
                    Some(ButtonTransition::DoubleClick)
                }
                _ => Some(ButtonTransition::Down),
            },
            (true, false) => {
                self.last_release = Some(now);
                Some(ButtonTransition::Up)
            }
            _ => None,
        };

        self.last_pressed = self.pressed;
        transition
    }
}
